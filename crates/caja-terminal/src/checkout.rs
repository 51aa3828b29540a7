//! # Checkout Orchestrator
//!
//! Drives the effects of a session: sale submission, special-price
//! requests, and credit authorization proposals.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Submission                                      │
//! │                                                                         │
//! │  confirm click                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  guard already set? ──yes──► Busy (double-click swallowed)              │
//! │       │ no (guard set now)                                              │
//! │       ▼                                                                 │
//! │  gate checks (caja-core) ──reject──► Gate error, composer untouched     │
//! │       │ pass                                                            │
//! │       ▼                                                                 │
//! │  build payload ──► create_sale ──fail──► backend message, composer      │
//! │       │                                   untouched                     │
//! │       ▼ success                                                         │
//! │  reset composer ──► refetch catalog ──► 200ms ──► success dialog        │
//! │                                                                         │
//! │  all paths: guard released after 300ms                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guard is the only mutual-exclusion device; an in-flight
//! submission is never cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use caja_api::{ApiError, CatalogPage, CatalogQuery, PriceRequestPayload, SaleGateway};
use caja_core::checkout::{build_sale_payload, validate_sale};
use caja_core::validation::{validate_quantity, validate_requested_price};
use caja_core::{GateError, SaleRecord, ValidationError};

use crate::config::TerminalConfig;
use crate::state::SessionState;

/// Pause before the success dialog opens, letting the confirmation
/// dialog finish closing.
pub const SUCCESS_DIALOG_DELAY: Duration = Duration::from_millis(200);

/// Pause before the confirm control re-enables after any attempt.
pub const SUBMIT_REENABLE_DELAY: Duration = Duration::from_millis(300);

/// How a submission attempt failed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A submission is already in flight; this attempt was swallowed.
    #[error("submission already in progress")]
    Busy,

    /// A precondition check failed; nothing reached the network.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Local field validation failed before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend rejected or the call failed; `0` is the text to show.
    #[error("{0}")]
    Backend(String),
}

impl From<ApiError> for CheckoutError {
    fn from(err: ApiError) -> Self {
        CheckoutError::Backend(err.user_message())
    }
}

/// Outcome of a successful submission.
#[derive(Debug)]
pub struct SaleOutcome {
    pub record: SaleRecord,
    /// First catalog page refetched after the sale; `None` when the
    /// refetch itself failed (the sale still stands).
    pub refreshed_catalog: Option<CatalogPage>,
}

/// Orchestrates backend effects for one session.
pub struct CheckoutOrchestrator<G: SaleGateway> {
    gateway: G,
    session: SessionState,
    config: TerminalConfig,
    submitting: AtomicBool,
}

impl<G: SaleGateway> CheckoutOrchestrator<G> {
    pub fn new(gateway: G, session: SessionState, config: TerminalConfig) -> Self {
        CheckoutOrchestrator {
            gateway,
            session,
            config,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// True while the confirm control must stay disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Submits the composed sale.
    ///
    /// On success the composer is reset, the catalog refetched, and the
    /// success dialog opened after [`SUCCESS_DIALOG_DELAY`]. On any
    /// failure the composer keeps its state so the cashier can correct
    /// and retry. The guard is released after [`SUBMIT_REENABLE_DELAY`]
    /// in every path.
    pub async fn submit_sale(&self) -> Result<SaleOutcome, CheckoutError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CheckoutError::Busy);
        }

        let result = self.submit_sale_inner().await;

        tokio::time::sleep(SUBMIT_REENABLE_DELAY).await;
        self.submitting.store(false, Ordering::SeqCst);

        result
    }

    async fn submit_sale_inner(&self) -> Result<SaleOutcome, CheckoutError> {
        // Gate and payload build under one lock; the payload is rebuilt
        // fresh on every attempt.
        let payload = self.session.with(|composer| {
            let context = composer.sale_context();
            validate_sale(&context)?;
            let mut payload = build_sale_payload(
                &context,
                &self.config.user_role,
                self.config.user_id,
                self.config.branch_id,
            );
            if payload.customer_id.is_none() && payload.walk_in.device_imei.is_empty() {
                payload.walk_in.device_imei = self.config.device_imei.clone();
            }
            Ok::<_, GateError>(payload)
        })?;

        let record = self.gateway.create_sale(&payload).await?;
        info!(sale_id = record.id, total = record.total, "sale completed");

        let today = chrono::Local::now().date_naive();
        self.session
            .with_mut(|composer| composer.reset_after_sale(record.clone(), today));

        // Refetch sequenced after the sale so the grid shows post-sale
        // stock. A refetch failure does not undo the sale.
        let refreshed_catalog = match self
            .gateway
            .fetch_catalog(&CatalogQuery::for_branch(self.config.branch_id))
            .await
        {
            Ok(page) => Some(page),
            Err(err) => {
                warn!(error = %err, "catalog refetch after sale failed");
                None
            }
        };

        tokio::time::sleep(SUCCESS_DIALOG_DELAY).await;
        self.session
            .with_mut(|composer| composer.success_dialog_open = true);

        Ok(SaleOutcome {
            record,
            refreshed_catalog,
        })
    }

    /// Asks a supervisor to approve a one-off price for a product.
    ///
    /// Validated locally first; never touches the cart.
    pub async fn request_special_price(
        &self,
        product_id: i64,
        requested_price: f64,
    ) -> Result<(), CheckoutError> {
        validate_requested_price(requested_price)?;

        let payload = PriceRequestPayload {
            product_id,
            requested_price,
            requested_by_id: self.config.user_id,
        };
        self.gateway.create_price_request(&payload).await?;
        Ok(())
    }

    /// Submits the current cart as a credit authorization proposal.
    ///
    /// Defaults are applied to the form (installment count, cadence,
    /// first date) before it leaves; the cart itself is untouched so the
    /// cashier can still complete a regular sale.
    pub async fn submit_credit_request(&self) -> Result<(), CheckoutError> {
        let today = chrono::Local::now().date_naive();
        let form = self.session.with_mut(|composer| {
            if composer.cart.is_empty() {
                return Err(GateError::EmptyCart);
            }
            composer.credit_form.apply_credit_defaults(today);
            Ok(composer.credit_form.clone())
        })?;

        for line in &form.lines {
            validate_quantity(line.quantity)?;
        }

        self.gateway.create_credit_request(&form).await?;
        info!(total = form.proposed_total, "credit authorization requested");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait_impl::ScriptedGateway;
    use caja_core::{
        CatalogItem, CatalogSource, Customer, PriceEntry, PriceRole, VoucherType,
    };

    use crate::state::composer::Composer;

    mod async_trait_impl {
        use super::*;
        use caja_api::ApiResult;
        use caja_core::{CreditRequestForm, SalePayload};

        /// Scripted gateway double: records call order, optionally fails
        /// sale creation.
        pub struct ScriptedGateway {
            pub calls: Mutex<Vec<String>>,
            pub fail_sale: bool,
            pub sale_delay: Duration,
        }

        impl ScriptedGateway {
            pub fn ok() -> Self {
                ScriptedGateway {
                    calls: Mutex::new(Vec::new()),
                    fail_sale: false,
                    sale_delay: Duration::ZERO,
                }
            }

            pub fn failing() -> Self {
                ScriptedGateway {
                    fail_sale: true,
                    ..Self::ok()
                }
            }

            fn log(&self, name: &str) {
                self.calls.lock().unwrap().push(name.to_string());
            }
        }

        #[async_trait::async_trait]
        impl SaleGateway for ScriptedGateway {
            async fn fetch_catalog(&self, _query: &CatalogQuery) -> ApiResult<CatalogPage> {
                self.log("fetch_catalog");
                Ok(CatalogPage::default())
            }

            async fn fetch_customers(&self) -> ApiResult<Vec<Customer>> {
                self.log("fetch_customers");
                Ok(vec![])
            }

            async fn create_sale(&self, payload: &SalePayload) -> ApiResult<SaleRecord> {
                self.log("create_sale");
                tokio::time::sleep(self.sale_delay).await;
                if self.fail_sale {
                    return Err(ApiError::Http {
                        status: 400,
                        message: r#"{"message":"Stock insuficiente"}"#.to_string(),
                    });
                }
                Ok(SaleRecord {
                    id: 900,
                    customer_id: payload.customer_id,
                    sale_date: "2026-03-10".to_string(),
                    sale_time: "14:30".to_string(),
                    total: payload.total,
                    branch_id: payload.branch_id,
                    walk_in_name: None,
                    walk_in_phone: None,
                    walk_in_address: None,
                    device_imei: String::new(),
                })
            }

            async fn create_price_request(
                &self,
                _payload: &PriceRequestPayload,
            ) -> ApiResult<()> {
                self.log("create_price_request");
                Ok(())
            }

            async fn create_credit_request(&self, _form: &CreditRequestForm) -> ApiResult<()> {
                self.log("create_credit_request");
                Ok(())
            }
        }
    }

    fn test_item(id: i64, price: f64) -> CatalogItem {
        CatalogItem {
            id,
            source: CatalogSource::Product,
            name: format!("Item {}", id),
            description: String::new(),
            item_code: String::new(),
            stock_lots: vec![],
            prices: vec![PriceEntry {
                id: id * 10,
                amount: price,
                role: PriceRole::Public,
            }],
            images: vec![],
        }
    }

    fn session_with_cart() -> SessionState {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let mut composer = Composer::new(1, 5, today);
        composer.add_item(&test_item(1, 10.0));
        composer.set_voucher_type(Some(VoucherType::Receipt));
        SessionState::new(composer)
    }

    fn orchestrator(gateway: ScriptedGateway) -> CheckoutOrchestrator<ScriptedGateway> {
        CheckoutOrchestrator::new(gateway, session_with_cart(), TerminalConfig::default())
    }

    #[tokio::test]
    async fn test_successful_sale_resets_and_refetches() {
        let orch = orchestrator(ScriptedGateway::ok());

        let outcome = orch.submit_sale().await.unwrap();
        assert_eq!(outcome.record.id, 900);
        assert!(outcome.refreshed_catalog.is_some());

        // refetch is sequenced after the sale resolves
        let calls = orch.gateway.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["create_sale", "fetch_catalog"]);

        orch.session.with(|c| {
            assert!(c.cart.is_empty());
            assert!(c.success_dialog_open);
            assert_eq!(c.last_sale.as_ref().map(|r| r.id), Some(900));
        });
    }

    #[tokio::test]
    async fn test_failed_sale_preserves_composer() {
        let orch = orchestrator(ScriptedGateway::failing());

        let err = orch.submit_sale().await.unwrap_err();
        match err {
            CheckoutError::Backend(message) => assert_eq!(message, "Stock insuficiente"),
            other => panic!("unexpected error: {other:?}"),
        }

        orch.session.with(|c| {
            assert_eq!(c.cart.len(), 1);
            assert!(!c.success_dialog_open);
            assert!(c.last_sale.is_none());
        });

        // no refetch after a failed sale
        let calls = orch.gateway.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["create_sale"]);
    }

    #[tokio::test]
    async fn test_gate_rejection_never_reaches_network() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let session = SessionState::new(Composer::new(1, 5, today));
        let orch = CheckoutOrchestrator::new(
            ScriptedGateway::ok(),
            session,
            TerminalConfig::default(),
        );

        let err = orch.submit_sale().await.unwrap_err();
        assert!(matches!(err, CheckoutError::Gate(GateError::EmptyCart)));
        assert!(orch.gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_guard_blocks_reentrant_submit() {
        let mut gateway = ScriptedGateway::ok();
        gateway.sale_delay = Duration::from_millis(100);
        let orch = Arc::new(orchestrator(gateway));

        let first = {
            let orch = Arc::clone(&orch);
            tokio::spawn(async move { orch.submit_sale().await.map(|o| o.record.id) })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let second = orch.submit_sale().await;
        assert!(matches!(second, Err(CheckoutError::Busy)));

        assert_eq!(first.await.unwrap().unwrap(), 900);
        // only one sale reached the gateway
        let sales = orch
            .gateway
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == "create_sale")
            .count();
        assert_eq!(sales, 1);
    }

    #[tokio::test]
    async fn test_special_price_request_validates_locally() {
        let orch = orchestrator(ScriptedGateway::ok());

        let err = orch.request_special_price(12, 0.0).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert!(orch.gateway.calls.lock().unwrap().is_empty());

        orch.request_special_price(12, 8.5).await.unwrap();
        let calls = orch.gateway.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["create_price_request"]);
    }

    #[tokio::test]
    async fn test_credit_request_applies_defaults_and_keeps_cart() {
        let orch = orchestrator(ScriptedGateway::ok());

        orch.submit_credit_request().await.unwrap();

        let calls = orch.gateway.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["create_credit_request"]);
        orch.session.with(|c| {
            assert_eq!(c.cart.len(), 1);
            assert!(c.credit_form.installment_count >= 1);
        });
    }

    #[tokio::test]
    async fn test_credit_request_rejects_empty_cart() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let session = SessionState::new(Composer::new(1, 5, today));
        let orch = CheckoutOrchestrator::new(
            ScriptedGateway::ok(),
            session,
            TerminalConfig::default(),
        );

        let err = orch.submit_credit_request().await.unwrap_err();
        assert!(matches!(err, CheckoutError::Gate(GateError::EmptyCart)));
        assert!(orch.gateway.calls.lock().unwrap().is_empty());
    }
}
