// 🧑‍💻 Session - one logged-in client's in-memory state
//
// Single writer. The session owns the catalog, the registered pet, the
// booking in progress and the appointment history. Nothing is persisted.

use chrono::NaiveDate;
use serde::Serialize;

use crate::booking::{BookingComposer, BookingStage};
use crate::catalog::Catalog;
use crate::config::Settings;
use crate::entities::{default_expenses, Appointment, Client, Expense, Pet, PetSize};
use crate::error::{BookingError, PricingError, RegistrationError};
use crate::notify::{self, BookingDetails};
use crate::pricing;
use crate::reports::{self, FinancialSummary, ServiceTotal};
use crate::store::AppointmentStore;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    settings: Settings,
    client: Client,
    booking: Option<BookingComposer>,
    store: AppointmentStore,
    expenses: Vec<Expense>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Session {
            settings,
            client: Client::default(),
            booking: None,
            store: AppointmentStore::new(),
            expenses: default_expenses(),
        }
    }

    /// Session whose store is seeded with earlier appointments
    pub fn with_history(settings: Settings, history: Vec<Appointment>) -> Self {
        Session {
            store: AppointmentStore::with_appointments(history),
            ..Session::new(settings)
        }
    }

    pub fn with_expenses(mut self, expenses: Vec<Expense>) -> Self {
        self.expenses = expenses;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.settings.catalog
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn pet(&self) -> Option<&Pet> {
        self.client.pet()
    }

    // ========================================================================
    // PET REGISTRATION
    // ========================================================================

    /// Register the session's pet (once)
    pub fn register_pet(
        &mut self,
        name: &str,
        breed: &str,
        weight: f64,
        size: PetSize,
    ) -> Result<&Pet, RegistrationError> {
        let pet = Pet::new(name, breed, weight, size)?;
        self.add_pet(pet)
    }

    /// Register an already validated pet (once)
    pub fn add_pet(&mut self, pet: Pet) -> Result<&Pet, RegistrationError> {
        if self.client.pet().is_some() {
            return Err(RegistrationError::AlreadyRegistered);
        }

        tracing::info!(pet = %pet.name, size = %pet.size, "pet registered");
        self.client.pets.push(pet);

        Ok(&self.client.pets[0])
    }

    // ========================================================================
    // BOOKING
    // ========================================================================

    /// Begin a new booking, discarding any unconfirmed one
    pub fn start_booking(&mut self) -> Result<&mut BookingComposer, BookingError> {
        let pet = self
            .client
            .pet()
            .cloned()
            .ok_or(BookingError::PetNotRegistered)?;

        let composer = BookingComposer::new(&self.client.id, pet, self.settings.add_on);
        Ok(self.booking.insert(composer))
    }

    pub fn booking(&self) -> Option<&BookingComposer> {
        self.booking.as_ref()
    }

    pub fn booking_mut(&mut self) -> Result<&mut BookingComposer, BookingError> {
        self.booking.as_mut().ok_or(BookingError::NoBookingInProgress)
    }

    /// Split borrow: composer plus the catalog it selects from
    pub fn booking_with_catalog(
        &mut self,
    ) -> Result<(&mut BookingComposer, &Catalog), BookingError> {
        let composer = self
            .booking
            .as_mut()
            .ok_or(BookingError::NoBookingInProgress)?;
        Ok((composer, &self.settings.catalog))
    }

    /// Convenience for the common flow: select a service on the current booking
    pub fn select_service(&mut self, service_id: &str) -> Result<BookingStage, BookingError> {
        let (composer, catalog) = self.booking_with_catalog()?;
        composer.select_service(catalog, service_id)
    }

    pub fn select_employee(&mut self, employee_id: Option<&str>) -> Result<(), BookingError> {
        let (composer, catalog) = self.booking_with_catalog()?;
        composer.select_employee(catalog, employee_id)
    }

    /// Confirm the current booking and store the appointment.
    ///
    /// On a validation error the store is untouched and the draft is kept
    /// so the client can fix it.
    pub fn confirm_booking(&mut self) -> Result<Appointment, BookingError> {
        let composer = self.booking_mut()?;

        let appointment = match composer.confirm() {
            Ok(appointment) => appointment,
            Err(err) => {
                tracing::warn!(error = %err, "booking rejected");
                return Err(err);
            }
        };

        self.store.add(appointment.clone());
        self.booking = None;

        Ok(appointment)
    }

    // ========================================================================
    // HISTORY
    // ========================================================================

    /// Appointments newest first
    pub fn appointments(&self) -> Vec<Appointment> {
        self.store.list()
    }

    pub fn store(&self) -> &AppointmentStore {
        &self.store
    }

    /// Resolve display values for an appointment's notification message
    pub fn booking_details(&self, appointment: &Appointment) -> Option<BookingDetails> {
        let pet = self.client.pets.iter().find(|p| p.id == appointment.pet_id)?;
        let service = self.catalog().service(&appointment.service_id)?;
        let employee = appointment
            .employee_id
            .as_deref()
            .and_then(|id| self.catalog().employee(id));

        Some(BookingDetails::new(appointment, pet, service, employee))
    }

    /// WhatsApp link for a stored appointment
    pub fn whatsapp_link(&self, appointment_id: &str) -> Option<String> {
        let appointment = self.store.get(appointment_id)?;
        let details = self.booking_details(appointment)?;
        let message = notify::booking_message(&details);

        Some(notify::whatsapp_link(&self.settings.whatsapp_phone, &message))
    }

    pub fn pix_qr_url(&self) -> String {
        notify::pix_qr_url(&self.settings.pix_key)
    }

    /// Recheck every stored appointment made for this session's pet
    pub fn verify_totals(&self) -> Result<(), PricingError> {
        let Some(pet) = self.client.pet() else {
            return Ok(());
        };

        for appointment in self.store.iter().filter(|a| a.pet_id == pet.id) {
            if let Some(service) = self.catalog().service(&appointment.service_id) {
                pricing::verify_total(appointment, service, pet.size, self.settings.add_on.fee)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // OWNER REPORTS
    // ========================================================================

    pub fn financial_summary(&self) -> FinancialSummary {
        FinancialSummary::compute(self.store.iter(), &self.expenses)
    }

    pub fn service_breakdown(&self) -> Vec<ServiceTotal> {
        reports::service_breakdown(self.catalog(), self.store.iter())
    }

    pub fn appointments_on(&self, date: NaiveDate) -> usize {
        reports::appointments_on(self.store.iter(), date)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Settings::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PaymentMethod;
    use crate::error::BookingField;

    fn session_with_pet() -> Session {
        let mut session = Session::default();
        session
            .register_pet("Rex", "Vira-lata", 15.0, PetSize::Medium)
            .unwrap();
        session
    }

    #[test]
    fn test_booking_requires_pet() {
        let mut session = Session::default();
        assert_eq!(
            session.start_booking().unwrap_err(),
            BookingError::PetNotRegistered
        );
    }

    #[test]
    fn test_register_pet_once() {
        let mut session = session_with_pet();

        assert_eq!(session.pet().unwrap().name, "Rex");
        assert_eq!(
            session
                .register_pet("Mel", "Poodle", 4.0, PetSize::Small)
                .unwrap_err(),
            RegistrationError::AlreadyRegistered
        );
    }

    #[test]
    fn test_invalid_registration_leaves_no_pet() {
        let mut session = Session::default();
        assert!(session.register_pet("Rex", "", 15.0, PetSize::Medium).is_err());
        assert!(session.pet().is_none());
    }

    #[test]
    fn test_confirm_booking_stores_appointment() {
        let mut session = session_with_pet();
        session.start_booking().unwrap();
        session.select_service("1").unwrap();
        session.select_employee(Some("1")).unwrap();
        {
            let booking = session.booking_mut().unwrap();
            booking.set_date_time("2024-08-15T14:30").unwrap();
            booking.set_taxi_dog(true).unwrap();
        }

        let appointment = session.confirm_booking().unwrap();

        assert_eq!(appointment.total_price, 55.0);
        assert_eq!(appointment.client_id, session.client().id);
        assert_eq!(session.appointments().len(), 1);
        assert!(session.booking().is_none());
        assert!(session.verify_totals().is_ok());
    }

    #[test]
    fn test_confirm_without_date_time_leaves_store_unchanged() {
        let mut session = session_with_pet();
        session.start_booking().unwrap();
        session.select_service("1").unwrap();

        let err = session.confirm_booking().unwrap_err();

        assert_eq!(err, BookingError::MissingField(BookingField::DateTime));
        assert!(session.appointments().is_empty());
        assert!(session.booking().is_some());
    }

    #[test]
    fn test_confirm_without_booking() {
        let mut session = session_with_pet();
        assert_eq!(
            session.confirm_booking().unwrap_err(),
            BookingError::NoBookingInProgress
        );
    }

    #[test]
    fn test_next_booking_needs_new_composer() {
        let mut session = session_with_pet();
        session.start_booking().unwrap();
        session.select_service("2").unwrap();
        session
            .booking_mut()
            .unwrap()
            .set_date_time("2024-08-15T14:30")
            .unwrap();
        session.confirm_booking().unwrap();

        assert_eq!(
            session.select_service("1").unwrap_err(),
            BookingError::NoBookingInProgress
        );

        let composer = session.start_booking().unwrap();
        assert_eq!(composer.stage(), BookingStage::ServiceSelection);
    }

    #[test]
    fn test_history_listing_newest_first() {
        let mut session = session_with_pet();

        for date_time in ["2024-07-28T10:00", "2024-08-15T14:30"] {
            session.start_booking().unwrap();
            session.select_service("1").unwrap();
            session
                .booking_mut()
                .unwrap()
                .set_date_time(date_time)
                .unwrap();
            session.confirm_booking().unwrap();
        }

        let listed = session.appointments();
        assert_eq!(listed[0].date_time.format("%m").to_string(), "08");
        assert_eq!(listed[1].date_time.format("%m").to_string(), "07");
    }

    #[test]
    fn test_whatsapp_link_for_stored_appointment() {
        let mut session = session_with_pet();
        session.start_booking().unwrap();
        session.select_service("1").unwrap();
        {
            let booking = session.booking_mut().unwrap();
            booking.set_date_time("2024-08-15T14:30").unwrap();
            booking.set_payment_method(PaymentMethod::OnSite).unwrap();
        }
        let appointment = session.confirm_booking().unwrap();

        let link = session.whatsapp_link(&appointment.id).unwrap();
        assert!(link.starts_with("https://wa.me/5511999999999?text="));
        assert!(link.contains("Pet%3A%20Rex"));
        assert!(link.contains("Profissional%3A%20Qualquer%20um"));
        assert!(link.contains("Pagamento%3A%20Na%20Loja"));

        assert!(session.whatsapp_link("missing").is_none());
    }

    #[test]
    fn test_financial_summary_includes_new_bookings() {
        let mut session = session_with_pet().with_expenses(vec![]);
        session.start_booking().unwrap();
        session.select_service("3").unwrap();
        session
            .booking_mut()
            .unwrap()
            .set_date_time("2024-08-20T10:00")
            .unwrap();
        session.confirm_booking().unwrap();

        let summary = session.financial_summary();
        assert_eq!(summary.revenue, 75.0);
        assert_eq!(summary.net_profit, 75.0);

        let day = NaiveDate::from_ymd_opt(2024, 8, 20).unwrap();
        assert_eq!(session.appointments_on(day), 1);
        assert_eq!(session.service_breakdown()[2].count, 1);
    }
}
