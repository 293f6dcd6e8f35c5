//! Simulated purchase flow.
//!
//! ```text
//!   Idle ──(wallet disconnected)──▶ AwaitingConnection ──(modal resolved)──▶ Idle
//!   Idle ──(wallet connected)─────▶ Submitting ──ok──▶ Purchased
//!                                        └──err──▶ Idle (+ error message)
//! ```
//!
//! A flow allows one submission in flight. Clicking again while submitting
//! returns [`PurchaseStep::AlreadyInFlight`] instead of posting a second
//! record. Each attempt carries its own idempotency key so the server can
//! also drop replays.

use std::time::Duration;

use crate::api::{Delay, MarketApi};
use crate::error::ApiResult;
use crate::models::{Asset, PurchaseRecord, PurchaseRequest};
use crate::wallet::{self, WalletSession};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PurchaseState {
    #[default]
    Idle,
    AwaitingConnection,
    Submitting,
    Purchased,
}

/// One submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseTicket {
    pub asset_id: String,
    pub buyer_address: String,
    pub idempotency_key: String,
}

/// What the caller should do after a purchase click.
#[derive(Clone, Debug, PartialEq)]
pub enum PurchaseStep {
    /// Open the wallet modal.
    AwaitingConnection,
    /// Run [`execute_purchase`] with this ticket.
    Submit(PurchaseTicket),
    /// A submission is already running; nothing to do.
    AlreadyInFlight,
    /// Already bought in this session.
    AlreadyPurchased,
}

/// Purchase state for one asset page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PurchaseFlow {
    state: PurchaseState,
    in_flight: Option<PurchaseTicket>,
    last_error: Option<String>,
    record: Option<PurchaseRecord>,
}

impl PurchaseFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PurchaseState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == PurchaseState::Submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn record(&self) -> Option<&PurchaseRecord> {
        self.record.as_ref()
    }

    /// Handle a purchase click.
    pub fn request(&mut self, asset: &Asset, wallet: &WalletSession) -> PurchaseStep {
        match self.state {
            PurchaseState::Submitting => return PurchaseStep::AlreadyInFlight,
            PurchaseState::Purchased => return PurchaseStep::AlreadyPurchased,
            PurchaseState::Idle | PurchaseState::AwaitingConnection => {}
        }

        let Some(buyer) = wallet.account() else {
            self.state = PurchaseState::AwaitingConnection;
            return PurchaseStep::AwaitingConnection;
        };

        let ticket = PurchaseTicket {
            asset_id: asset.id.clone(),
            buyer_address: buyer.to_string(),
            idempotency_key: uuid::Uuid::new_v4().to_string(),
        };
        self.state = PurchaseState::Submitting;
        self.last_error = None;
        self.in_flight = Some(ticket.clone());
        PurchaseStep::Submit(ticket)
    }

    /// The wallet modal closed (connected or not); go back to idle.
    pub fn connection_resolved(&mut self, wallet: &WalletSession) {
        if self.state == PurchaseState::AwaitingConnection {
            if !wallet.is_connected() {
                log::warn!("⚠️ Purchase cancelled: wallet not connected");
            }
            self.state = PurchaseState::Idle;
        }
    }

    /// Commit the outcome of `ticket`. Outcomes for other tickets are ignored.
    pub fn complete(&mut self, ticket: &PurchaseTicket, result: ApiResult<PurchaseRecord>) -> bool {
        if self.in_flight.as_ref() != Some(ticket) {
            log::debug!("⏭️ Ignoring result for stale purchase attempt");
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(record) => {
                log::info!("✅ Purchase recorded: {} ({})", record.asset_id, record.tx_hash);
                self.state = PurchaseState::Purchased;
                self.record = Some(record);
            }
            Err(e) => {
                log::error!("❌ Purchase failed: {}", e);
                self.state = PurchaseState::Idle;
                self.last_error = Some("Purchase failed. Please try again.".to_string());
            }
        }
        true
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Text of the main call-to-action button.
    pub fn button_label(&self, wallet: &WalletSession) -> &'static str {
        match self.state {
            PurchaseState::Purchased => "Download Asset",
            PurchaseState::Submitting => "Processing...",
            _ if wallet.is_connected() => "Buy Now",
            _ => "Connect Wallet to Buy",
        }
    }
}

/// Wait out the simulated transaction, then record the purchase.
pub async fn execute_purchase<A, D>(
    api: &A,
    delay: &D,
    tx_delay: Duration,
    ticket: &PurchaseTicket,
) -> ApiResult<PurchaseRecord>
where
    A: MarketApi,
    D: Delay,
{
    log::info!("⏳ Simulating transaction for {}...", ticket.asset_id);
    delay.sleep(tx_delay).await;

    let request = PurchaseRequest {
        object_id: ticket.asset_id.clone(),
        buyer_address: ticket.buyer_address.clone(),
        tx_hash: wallet::placeholder_tx_hash(),
    };
    api.record_purchase(&request, &ticket.idempotency_key).await?;

    Ok(PurchaseRecord {
        asset_id: request.object_id,
        buyer_address: request.buyer_address,
        tx_hash: request.tx_hash,
        idempotency_key: ticket.idempotency_key.clone(),
    })
}

/// Click-to-completion in one call, for callers that own the flow
/// across the await (CLI, tests).
pub async fn purchase<A, D>(
    api: &A,
    delay: &D,
    tx_delay: Duration,
    flow: &mut PurchaseFlow,
    asset: &Asset,
    wallet: &WalletSession,
) -> ApiResult<PurchaseStep>
where
    A: MarketApi,
    D: Delay,
{
    let step = flow.request(asset, wallet);
    if let PurchaseStep::Submit(ticket) = &step {
        let result = execute_purchase(api, delay, tx_delay, ticket).await;
        let failure = result.as_ref().err().cloned();
        flow.complete(ticket, result);
        if let Some(e) = failure {
            return Err(e);
        }
    }
    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{asset, FakeApi};
    use crate::api::NoDelay;
    use crate::error::ApiError;
    use crate::models::Category;
    use futures::executor::block_on;

    const BUYER: &str = "0x3333333333333333333333333333333333333333";

    fn connected() -> WalletSession {
        WalletSession::with_account(BUYER).unwrap()
    }

    #[test]
    fn test_disconnected_click_awaits_connection() {
        let mut flow = PurchaseFlow::new();
        let a = asset("a1", Category::Props, "0.1");

        assert_eq!(flow.request(&a, &WalletSession::new()), PurchaseStep::AwaitingConnection);
        assert_eq!(flow.state(), PurchaseState::AwaitingConnection);
        assert_eq!(flow.button_label(&WalletSession::new()), "Connect Wallet to Buy");

        flow.connection_resolved(&connected());
        assert_eq!(flow.state(), PurchaseState::Idle);
        assert_eq!(flow.button_label(&connected()), "Buy Now");
    }

    #[test]
    fn test_successful_purchase() {
        let api = FakeApi::default();
        let mut flow = PurchaseFlow::new();
        let a = asset("a1", Category::Props, "0.1");

        let step = block_on(purchase(&api, &NoDelay, Duration::ZERO, &mut flow, &a, &connected()))
            .unwrap();

        assert!(matches!(step, PurchaseStep::Submit(_)));
        assert_eq!(flow.state(), PurchaseState::Purchased);
        assert_eq!(flow.button_label(&connected()), "Download Asset");

        let purchases = api.purchases.borrow();
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].0.object_id, "a1");
        assert_eq!(purchases[0].0.buyer_address, BUYER);
        assert!(purchases[0].0.tx_hash.starts_with("0x"));
        assert_eq!(Some(&purchases[0].1), flow.record().map(|r| &r.idempotency_key));
    }

    #[test]
    fn test_double_click_while_pending_posts_once() {
        let api = FakeApi::default();
        let mut flow = PurchaseFlow::new();
        let a = asset("a1", Category::Props, "0.1");
        let wallet = connected();

        let PurchaseStep::Submit(ticket) = flow.request(&a, &wallet) else {
            panic!("first click should submit");
        };
        assert_eq!(flow.request(&a, &wallet), PurchaseStep::AlreadyInFlight);
        assert_eq!(flow.button_label(&wallet), "Processing...");

        let result = block_on(execute_purchase(&api, &NoDelay, Duration::ZERO, &ticket));
        assert!(flow.complete(&ticket, result));

        assert_eq!(api.purchases.borrow().len(), 1);
        assert_eq!(flow.request(&a, &wallet), PurchaseStep::AlreadyPurchased);
    }

    #[test]
    fn test_failure_returns_to_idle() {
        let api = FakeApi::default();
        api.fail.set(true);
        let mut flow = PurchaseFlow::new();
        let a = asset("a1", Category::Props, "0.1");

        let err = block_on(purchase(&api, &NoDelay, Duration::ZERO, &mut flow, &a, &connected()))
            .unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(flow.state(), PurchaseState::Idle);
        assert!(flow.last_error().unwrap().contains("try again"));

        api.fail.set(false);
        block_on(purchase(&api, &NoDelay, Duration::ZERO, &mut flow, &a, &connected())).unwrap();
        assert_eq!(flow.state(), PurchaseState::Purchased);
        assert!(flow.last_error().is_none());
    }

    #[test]
    fn test_stale_ticket_ignored() {
        let mut flow = PurchaseFlow::new();
        let stale = PurchaseTicket {
            asset_id: "a1".into(),
            buyer_address: BUYER.into(),
            idempotency_key: "old".into(),
        };
        assert!(!flow.complete(&stale, Err(ApiError::Network("late".into()))));
        assert_eq!(flow.state(), PurchaseState::Idle);
        assert!(flow.last_error().is_none());
    }
}
