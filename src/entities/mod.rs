// Entity Models
//
// Reference data (services, employees, expenses) is static for a session.
// Pets are registered once; appointments are produced by the booking composer.

pub mod appointment;
pub mod employee;
pub mod expense;
pub mod pet;
pub mod service;

pub use appointment::{demo_history, Appointment, AppointmentStatus, PaymentMethod, StatusTone};
pub use employee::Employee;
pub use expense::{default_expenses, load_expenses_csv, Expense};
pub use pet::{Client, Pet, PetSize};
pub use service::{PriceTable, Service};
