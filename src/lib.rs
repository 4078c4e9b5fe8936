// PetFlow - Grooming Booking Core Library
// Exposes all modules for use in the CLI, the API server, and tests

pub mod booking;
pub mod catalog;
pub mod config;
pub mod entities;
pub mod error;
pub mod notify;
pub mod pricing;
pub mod reports;
pub mod session;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use booking::{parse_date_time, BookingComposer, BookingDraft, BookingStage};
pub use catalog::Catalog;
pub use config::{Settings, CONFIG_ENV};
pub use entities::{
    demo_history, Appointment, AppointmentStatus, Client, Employee, Expense, PaymentMethod, Pet,
    PetSize, PriceTable, Service, StatusTone,
};
pub use error::{BookingError, BookingField, CatalogError, PricingError, RegistrationError};
pub use notify::{booking_message, whatsapp_link, BookingDetails};
pub use pricing::{price, quote, verify_total, AddOnPolicy, PriceQuote, DEFAULT_ADD_ON_FEE};
pub use reports::{FinancialSummary, ServiceTotal};
pub use session::Session;
pub use store::AppointmentStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the fmt subscriber used by both binaries.
///
/// `RUST_LOG` overrides the default `petflow=info` filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "petflow=info,tower_http=info".into()),
        )
        .init();
}
