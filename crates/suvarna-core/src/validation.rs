//! # Validation Module
//!
//! Input validation for operator-entered data at the billing terminal.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Portal frontend (TypeScript)                                 │
//! │  └── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE — business rule validation                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory service (owns uniqueness + sold-state truth)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use suvarna_core::validation::{validate_quantity, validate_unique_code};
//!
//! validate_unique_code("550e8400-e29b-41d4-a716-446655440000").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::CustomerCapture;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a piece's unique tag code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 64 characters
/// - Only alphanumeric characters and hyphens (UUID alphabet)
///
/// ## Example
/// ```rust
/// use suvarna_core::validation::validate_unique_code;
///
/// assert!(validate_unique_code("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_unique_code("").is_err());
/// assert!(validate_unique_code("has space").is_err());
/// ```
pub fn validate_unique_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "unique code".to_string(),
        });
    }

    if code.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "unique code".to_string(),
            max: 64,
        });
    }

    if !code.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "unique code".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (the service treats it as "no results", not an error)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0); removing a line is a separate operation
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a cost in paise.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for promotional pieces)
pub fn validate_cost_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "cost".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates a manager waiver percentage in basis points (0% to 100%).
pub fn validate_waiver_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "waiver percent".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Customer Capture
// =============================================================================

/// Validates customer details before invoice confirmation.
///
/// ## Rules
/// - Name is required, at most 120 characters
/// - Phone, if given, is digits with optional `+`, spaces, and hyphens,
///   and carries 7-15 digits
/// - Email, if given, must look like `local@domain`
///
/// Phone and email stay optional: walk-in cash customers often leave them
/// blank and the floor staff fill the name only.
pub fn validate_customer(customer: &CustomerCapture) -> ValidationResult<()> {
    let name = customer.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        });
    }

    let phone = customer.phone.trim();
    if !phone.is_empty() {
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        let valid_chars = phone
            .chars()
            .all(|c| c.is_ascii_digit() || c == '+' || c == ' ' || c == '-');
        if !valid_chars || !(7..=15).contains(&digits) {
            return Err(ValidationError::InvalidFormat {
                field: "phone".to_string(),
                reason: "must be a phone number with 7-15 digits".to_string(),
            });
        }
    }

    let email = customer.email.trim();
    if !email.is_empty() {
        let well_formed = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.'),
            None => false,
        };
        if !well_formed {
            return Err(ValidationError::InvalidFormat {
                field: "email".to_string(),
                reason: "must be a valid email address".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_unique_code() {
        assert!(validate_unique_code("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_unique_code("ABC123").is_ok());

        assert!(validate_unique_code("").is_err());
        assert!(validate_unique_code("   ").is_err());
        assert!(validate_unique_code("has space").is_err());
        assert!(validate_unique_code("path/segment").is_err());
        assert!(validate_unique_code(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  necklace ").unwrap(), "necklace");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_cost_paise() {
        assert!(validate_cost_paise(0).is_ok());
        assert!(validate_cost_paise(18_499_900).is_ok());
        assert!(validate_cost_paise(-1).is_err());
    }

    #[test]
    fn test_validate_rates() {
        assert!(validate_tax_rate_bps(1800).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());

        assert!(validate_waiver_bps(500).is_ok());
        assert!(validate_waiver_bps(10001).is_err());
    }

    #[test]
    fn test_validate_customer() {
        use crate::types::CustomerCapture;

        let mut customer = CustomerCapture {
            name: "Asha Rao".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "asha@example.com".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
        };
        assert!(validate_customer(&customer).is_ok());

        // Name is the only hard requirement
        customer.phone = String::new();
        customer.email = String::new();
        customer.address = String::new();
        assert!(validate_customer(&customer).is_ok());

        customer.name = "  ".to_string();
        assert!(validate_customer(&customer).is_err());

        customer.name = "Asha".to_string();
        customer.phone = "call-me".to_string();
        assert!(validate_customer(&customer).is_err());

        customer.phone = "12345".to_string(); // too few digits
        assert!(validate_customer(&customer).is_err());

        customer.phone = String::new();
        customer.email = "not-an-email".to_string();
        assert!(validate_customer(&customer).is_err());

        customer.email = "a@b".to_string(); // domain without a dot
        assert!(validate_customer(&customer).is_err());
    }
}
