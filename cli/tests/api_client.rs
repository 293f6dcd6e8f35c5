//! End-to-end tests against an in-process fake of the catalog API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use dimension_cli::{browse, buy, listing, show, upload, CliError, MarketClient, UploadArgs};
use dimension_core::{
    ApiError, CatalogQuery, CatalogView, Category, GateFailure, MarketApi, MarketConfig,
    MarketError, Route, SortOrder, Step, SubmitBlocked,
};

const BUYER: &str = "0x4444444444444444444444444444444444444444";

#[derive(Default)]
struct Recorded {
    assets: Vec<Value>,
    list_queries: Vec<String>,
    purchases: Vec<(Value, Option<String>)>,
    uploads: Vec<(HashMap<String, String>, Vec<(String, String, usize)>, Option<String>)>,
}

type Shared = Arc<Mutex<Recorded>>;

fn idempotency_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn list_objects(State(state): State<Shared>, RawQuery(query): RawQuery) -> Json<Value> {
    let query = query.unwrap_or_default();
    let mut state = state.lock().unwrap();
    state.list_queries.push(query.clone());

    let category = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("category="))
        .map(str::to_string);
    let assets: Vec<Value> = state
        .assets
        .iter()
        .filter(|a| category.as_deref().map_or(true, |c| a["category"] == c))
        .cloned()
        .collect();
    Json(Value::Array(assets))
}

async fn get_object(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let state = state.lock().unwrap();
    state
        .assets
        .iter()
        .find(|a| a["_id"] == id.as_str())
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(json!({ "error": "Object not found" }))))
}

async fn create_object(
    State(state): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, StatusCode> {
    let mut fields = HashMap::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|_| StatusCode::BAD_REQUEST)? {
        let name = field.name().unwrap_or("").to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                files.push((name, file_name, bytes.len()));
            }
            None => {
                let text = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                fields.insert(name, text);
            }
        }
    }

    let mut state = state.lock().unwrap();
    let id = format!("created{}", state.uploads.len() + 1);
    let asset = json!({
        "_id": id,
        "name": fields.get("name"),
        "description": fields.get("description"),
        "category": fields.get("category"),
        "price": fields.get("price"),
        "creatorAddress": fields.get("creatorAddress"),
        "views": 0,
        "purchases": 0
    });
    state.assets.push(asset.clone());
    state.uploads.push((fields, files, idempotency_key(&headers)));
    Ok(Json(asset))
}

async fn create_purchase(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    state
        .lock()
        .unwrap()
        .purchases
        .push((body, idempotency_key(&headers)));
    Json(json!({ "ok": true }))
}

async fn spawn_api(assets: Vec<Value>) -> (SocketAddr, Shared) {
    let state: Shared = Arc::new(Mutex::new(Recorded {
        assets,
        ..Recorded::default()
    }));

    let app = Router::new()
        .route("/api/objects", get(list_objects).post(create_object))
        .route("/api/objects/{id}", get(get_object))
        .route("/api/purchases", post(create_purchase))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn client_for(addr: SocketAddr) -> MarketClient {
    let config = MarketConfig::default().with_api_base(format!("http://{}/api", addr));
    MarketClient::new(config).unwrap()
}

fn sample_assets() -> Vec<Value> {
    vec![
        json!({
            "_id": "car1",
            "name": "Hover Car",
            "description": "Floating",
            "category": "vehicles",
            "price": "0.2",
            "creatorAddress": "0x1111111111111111111111111111111111111111",
            "creator": { "username": "ava" },
            "thumbnailUrl": "/uploads/car1.png",
            "views": 40,
            "purchases": 2
        }),
        json!({
            "_id": "oak1",
            "name": "Oak",
            "category": "nature",
            "price": 0.05
        }),
    ]
}

#[tokio::test]
async fn test_browse_omits_all_category() {
    let (addr, state) = spawn_api(sample_assets()).await;
    let client = client_for(addr);

    let view = browse(&client, &CatalogQuery::new()).await;
    assert!(matches!(view, CatalogView::Loaded(ref assets) if assets.len() == 2));

    let queries = state.lock().unwrap().list_queries.clone();
    assert_eq!(queries, vec!["sort=newest".to_string()]);
}

#[tokio::test]
async fn test_browse_empty_category_is_empty_state() {
    let (addr, state) = spawn_api(vec![sample_assets()[1].clone()]).await;
    let client = client_for(addr);

    let query = CatalogQuery::new()
        .with_category(Some(Category::Vehicles))
        .with_sort(SortOrder::PriceLow);
    assert_eq!(browse(&client, &query).await, CatalogView::Empty);
    assert_eq!(
        state.lock().unwrap().list_queries,
        vec!["category=vehicles&sort=price-low".to_string()]
    );
}

#[tokio::test]
async fn test_browse_unreachable_api_is_unavailable() {
    let config = MarketConfig::default().with_api_base("http://127.0.0.1:1/api");
    let client = MarketClient::new(config).unwrap();

    let view = browse(&client, &CatalogQuery::new()).await;
    assert!(matches!(view, CatalogView::Unavailable(_)));

    let message = listing(view).unwrap_err().to_string();
    assert!(message.starts_with("Catalog unavailable: Network error:"));
    assert_eq!(message.matches("Network error").count(), 1);
}

#[tokio::test]
async fn test_show_existing_and_missing() {
    let (addr, _state) = spawn_api(sample_assets()).await;
    let client = client_for(addr);

    let asset = show(&client, "car1").await.unwrap();
    assert_eq!(asset.name, "Hover Car");
    assert_eq!(asset.creator_name(), "ava");
    assert_eq!(
        client.config().media_url(asset.thumbnail_url.as_deref().unwrap()),
        "https://dimension-server-bckr.onrender.com/uploads/car1.png"
    );

    let oak = client.get_asset("oak1").await.unwrap();
    assert_eq!(oak.price, "0.05");

    let err = show(&client, "ghost").await.unwrap_err();
    assert!(matches!(
        err,
        CliError::Market(MarketError::Api(ApiError::NotFound(ref id))) if id == "ghost"
    ));
}

#[tokio::test]
async fn test_buy_posts_one_record_with_idempotency_key() {
    let (addr, state) = spawn_api(sample_assets()).await;
    let client = client_for(addr);

    let record = buy(&client, "car1", BUYER, true).await.unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.purchases.len(), 1);
    let (body, key) = &state.purchases[0];
    assert_eq!(body["objectId"], "car1");
    assert_eq!(body["buyerAddress"], BUYER);
    assert_eq!(body["txHash"], record.tx_hash.as_str());
    assert_eq!(key.as_deref(), Some(record.idempotency_key.as_str()));
}

#[tokio::test]
async fn test_buy_rejects_bad_address() {
    let (addr, state) = spawn_api(sample_assets()).await;
    let client = client_for(addr);

    assert!(buy(&client, "car1", "not-an-address", true).await.is_err());
    assert!(state.lock().unwrap().purchases.is_empty());
}

fn upload_args(dir: &tempfile::TempDir, price: &str) -> UploadArgs {
    let model = dir.path().join("car.glb");
    let thumbnail = dir.path().join("car.png");
    std::fs::write(&model, vec![7u8; 2048]).unwrap();
    std::fs::write(&thumbnail, vec![9u8; 256]).unwrap();

    UploadArgs {
        model,
        thumbnail,
        name: "Street Racer".into(),
        description: "Low poly racer".into(),
        category: Category::Vehicles,
        price: price.into(),
        creator: BUYER.into(),
    }
}

#[tokio::test]
async fn test_upload_publishes_multipart() {
    let (addr, state) = spawn_api(vec![]).await;
    let client = client_for(addr);
    let dir = tempfile::tempdir().unwrap();

    let route = upload(&client, &upload_args(&dir, "0.05")).await.unwrap();
    assert_eq!(route, Route::Asset("created1".into()));

    let state = state.lock().unwrap();
    let (fields, files, key) = &state.uploads[0];
    assert_eq!(fields["name"], "Street Racer");
    assert_eq!(fields["category"], "vehicles");
    assert_eq!(fields["price"], "0.05");
    assert_eq!(fields["creatorAddress"], BUYER);
    assert!(files.contains(&("model".to_string(), "car.glb".to_string(), 2048)));
    assert!(files.contains(&("thumbnail".to_string(), "car.png".to_string(), 256)));
    assert!(key.is_some());
}

#[tokio::test]
async fn test_upload_zero_price_blocked_before_network() {
    let (addr, state) = spawn_api(vec![]).await;
    let client = client_for(addr);
    let dir = tempfile::tempdir().unwrap();

    let err = upload(&client, &upload_args(&dir, "0")).await.unwrap_err();
    assert!(matches!(
        err,
        CliError::Market(MarketError::Submit(SubmitBlocked::Gate {
            step: Step::Pricing,
            failure: GateFailure::NonPositivePrice
        }))
    ));
    assert!(state.lock().unwrap().uploads.is_empty());
}
