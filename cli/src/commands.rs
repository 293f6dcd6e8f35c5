//! Command implementations.
//!
//! Each command returns data; `main.rs` decides how to print it.

use std::path::PathBuf;
use std::time::Duration;

use dimension_core::wizard::publish;
use dimension_core::{
    fetch_catalog, purchase, ApiError, Asset, CatalogQuery, CatalogView, Category, FileSlot,
    MarketApi, MarketError, PurchaseRecord, PurchaseStep, Route, SubmitBlocked, UploadWizard,
    WalletSession,
};

use crate::client::{MarketClient, TokioDelay};
use crate::error::{CliError, CliResult};
use crate::files::stage_file;

/// List assets matching `query`.
pub async fn browse(client: &MarketClient, query: &CatalogQuery) -> CatalogView {
    fetch_catalog(client, query).await
}

/// Assets of a settled catalog view.
///
/// An empty catalog is an empty list; an unreachable one is an error.
pub fn listing(view: CatalogView) -> CliResult<Vec<Asset>> {
    match view {
        CatalogView::Loaded(assets) => Ok(assets),
        CatalogView::Empty | CatalogView::Loading => Ok(Vec::new()),
        CatalogView::Unavailable(reason) => Err(CliError::CatalogUnavailable(reason)),
    }
}

/// Fetch one asset; not-found is reported as an error.
pub async fn show(client: &MarketClient, id: &str) -> CliResult<Asset> {
    Ok(client.get_asset(id).await?)
}

/// Buy `id` as `buyer`, waiting the simulated transaction delay unless
/// `skip_delay` is set.
pub async fn buy(
    client: &MarketClient,
    id: &str,
    buyer: &str,
    skip_delay: bool,
) -> CliResult<PurchaseRecord> {
    let wallet = WalletSession::with_account(buyer)?;
    let asset = client.get_asset(id).await?;

    let tx_delay = if skip_delay {
        Duration::ZERO
    } else {
        client.config().simulated_tx_delay
    };

    let mut flow = dimension_core::PurchaseFlow::new();
    match purchase(client, &TokioDelay, tx_delay, &mut flow, &asset, &wallet).await? {
        PurchaseStep::Submit(_) => flow
            .record()
            .cloned()
            .ok_or_else(|| ApiError::Request("purchase finished without a record".into()).into()),
        other => Err(ApiError::Request(format!("purchase not submitted: {:?}", other)).into()),
    }
}

/// Inputs for [`upload`], one per wizard field.
#[derive(Clone, Debug)]
pub struct UploadArgs {
    pub model: PathBuf,
    pub thumbnail: PathBuf,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: String,
    pub creator: String,
}

/// Walk the upload wizard step by step and publish.
///
/// Stops at the first closed gate, naming the step.
pub async fn upload(client: &MarketClient, args: &UploadArgs) -> CliResult<Route> {
    let wallet = WalletSession::with_account(&args.creator)?;
    let mut wizard: UploadWizard<Vec<u8>> = UploadWizard::new();

    stage_file(&mut wizard.draft, FileSlot::Model, &args.model).await?;
    stage_file(&mut wizard.draft, FileSlot::Thumbnail, &args.thumbnail).await?;
    advance(&mut wizard)?;

    wizard.draft.set_name(args.name.clone());
    wizard.draft.set_description(args.description.clone());
    wizard.draft.set_category(args.category);
    advance(&mut wizard)?;

    wizard.draft.set_price(args.price.clone());
    advance(&mut wizard)?;

    let summary = wizard.draft.summary();
    log::info!(
        "Publishing {} ({}): {}",
        summary.name,
        summary.category,
        summary.usd_hint.as_deref().unwrap_or("-")
    );

    publish(client, &mut wizard, &wallet).await.map_err(CliError::from)
}

fn advance(wizard: &mut UploadWizard<Vec<u8>>) -> CliResult<()> {
    let step = wizard.step();
    wizard
        .advance()
        .map(|_| ())
        .map_err(|failure| MarketError::from(SubmitBlocked::Gate { step, failure }).into())
}
