//! # caja-terminal: Session Layer for Caja POS
//!
//! One cashier session: catalog browsing, cart composition, payment
//! context, and the checkout flow. Everything here is in-memory; the
//! backend (through `caja-api`) is the only source of persistence.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Caja POS Session Flow                               │
//! │                                                                         │
//! │  UI event (add item, change qty, confirm sale)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  caja-terminal (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌────────────────┐   ┌────────────────┐  │   │
//! │  │   │ SessionState │   │ Checkout       │   │ DebouncedSearch│  │   │
//! │  │   │ (state/)     │   │ Orchestrator   │   │ (search.rs)    │  │   │
//! │  │   │              │   │ (checkout.rs)  │   │                │  │   │
//! │  │   │ Arc<Mutex<   │◄──│ gate → payload │   │ 400ms quiet    │  │   │
//! │  │   │  Composer>>  │   │ → create_sale  │   │ period         │  │   │
//! │  │   └──────────────┘   └────────────────┘   └────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  caja-api (SaleGateway) ──► central backend                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Terminal configuration from `CAJA_*` environment
//! - [`state`] - The session composer and its shared-state wrapper
//! - [`checkout`] - Sale submission, special-price and credit requests
//! - [`search`] - Debounced catalog search scheduling

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod search;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutOrchestrator, SUBMIT_REENABLE_DELAY, SUCCESS_DIALOG_DELAY};
pub use config::TerminalConfig;
pub use search::DebouncedSearch;
pub use state::{composer::Composer, SessionState};

// =============================================================================
// Telemetry
// =============================================================================

/// Initializes tracing for a terminal process.
///
/// Honors `RUST_LOG`; defaults to `info` for the caja crates so a bare
/// terminal still logs sale outcomes.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,caja_core=info,caja_api=info,caja_terminal=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
