//! # Error Types
//!
//! Domain-specific error types for caja-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  caja-core errors (this file)                                           │
//! │  ├── GateError        - Submission-gate rejections (stay local,         │
//! │  │                      never reach the network)                        │
//! │  ├── ValidationError  - Input validation failures                       │
//! │  └── CoreError        - Umbrella for the above                          │
//! │                                                                         │
//! │  caja-api errors (separate crate)                                       │
//! │  └── ApiError         - Remote call failures, user_message()            │
//! │                                                                         │
//! │  Flow: GateError/ValidationError → CoreError → terminal notification    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, amount, threshold)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::checkout::CUSTOMER_REQUIRED_THRESHOLD;

// =============================================================================
// Gate Error
// =============================================================================

/// Locally detected precondition failures of the sale submission gate.
///
/// These are surfaced as inline/informational messages; composer state is
/// never mutated by a rejection, and none of them is sent to the network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateError {
    /// No voucher/comprobante type chosen in the confirmation dialog.
    #[error("Seleccione Recibo o Factura")]
    VoucherRequired,

    /// Payment method is Transfer but the payment reference is empty.
    ///
    /// The confirm control is disabled while this holds, so users normally
    /// never see the message; it exists for programmatic callers.
    #[error("El número de boleta no puede estar vacío")]
    ReferenceRequired,

    /// Order total exceeds the threshold with no customer information.
    #[error(
        "Para ventas mayores a {} es necesario ingresar o seleccionar un cliente",
        CUSTOMER_REQUIRED_THRESHOLD
    )]
    CustomerRequired,

    /// Checkout attempted with nothing in the cart.
    #[error("El carrito está vacío")]
    EmptyCart,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements.
/// Used for early validation before any network call runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for core business logic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Submission gate rejected the checkout attempt.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_error_messages() {
        assert_eq!(
            GateError::VoucherRequired.to_string(),
            "Seleccione Recibo o Factura"
        );
        assert!(GateError::CustomerRequired
            .to_string()
            .contains("mayores a 1000"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "referencia".to_string(),
        };
        assert_eq!(err.to_string(), "referencia is required");

        let err = ValidationError::MustBePositive {
            field: "precio solicitado".to_string(),
        };
        assert_eq!(err.to_string(), "precio solicitado must be positive");
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core: CoreError = GateError::EmptyCart.into();
        assert!(matches!(core, CoreError::Gate(GateError::EmptyCart)));

        let core: CoreError = ValidationError::Required {
            field: "q".to_string(),
        }
        .into();
        assert!(matches!(core, CoreError::Validation(_)));
    }
}
