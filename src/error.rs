// ⚠️ Error Types - one enum per failure domain
//
// Catalog errors are configuration defects (fail fast at load time).
// Booking and registration errors are user-correctable validation gaps.

use thiserror::Error;

use crate::entities::PetSize;

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("price table is missing an entry for size {0}")]
    IncompletePriceTable(PetSize),

    #[error("price {price} for size {size} must be a finite, non-negative amount")]
    NegativePrice { size: PetSize, price: f64 },

    #[error("duplicate service id: {0}")]
    DuplicateService(String),

    #[error("duplicate employee id: {0}")]
    DuplicateEmployee(String),

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("add-on fee must be a finite, non-negative amount, got {0}")]
    InvalidAddOnFee(f64),
}

// ============================================================================
// PET REGISTRATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("pet name is required")]
    MissingName,

    #[error("pet breed is required")]
    MissingBreed,

    #[error("pet weight must be a positive number, got {0}")]
    InvalidWeight(f64),

    #[error("a pet is already registered for this session")]
    AlreadyRegistered,
}

// ============================================================================
// BOOKING
// ============================================================================

/// Fields the composer requires before it can confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    Service,
    DateTime,
}

impl std::fmt::Display for BookingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingField::Service => write!(f, "service"),
            BookingField::DateTime => write!(f, "date-time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("cannot confirm booking: {0} is required")]
    MissingField(BookingField),

    #[error("select a service first")]
    ServiceNotSelected,

    #[error("choose a date-time before the payment method")]
    NotAtPaymentStage,

    #[error("register a pet before booking")]
    PetNotRegistered,

    #[error("no booking in progress")]
    NoBookingInProgress,

    #[error("booking already confirmed; start a new booking")]
    AlreadyConfirmed,

    #[error("invalid date-time '{0}', expected YYYY-MM-DDTHH:MM")]
    InvalidDateTime(String),

    #[error("the transport add-on is currently disabled")]
    AddOnDisabled,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

// ============================================================================
// PRICING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("appointment {appointment}: stored total {stored:.2} differs from computed {computed:.2}")]
    TotalMismatch {
        appointment: String,
        stored: f64,
        computed: f64,
    },

    #[error("appointment {appointment} references service {service}, got {given}")]
    ServiceMismatch {
        appointment: String,
        service: String,
        given: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_field() {
        let err = BookingError::MissingField(BookingField::DateTime);
        assert_eq!(err.to_string(), "cannot confirm booking: date-time is required");
    }

    #[test]
    fn test_catalog_error_converts_into_booking_error() {
        let err: BookingError = CatalogError::UnknownService("9".to_string()).into();
        assert_eq!(err.to_string(), "unknown service: 9");
    }
}
