// 🧾 Booking Composer - step-wise selections → priced appointment
//
// Stages advance automatically as fields are filled:
//
//   ServiceSelection ──service──▶ DetailSelection ──date-time──▶ PaymentSelection ──confirm──▶ Confirmed
//
// Employee and add-on are detail fields and stay editable from the payment
// stage, which shows them in its summary. Payment is only chosen at
// PaymentSelection. Going back never clears fields. Changing the service keeps the employee,
// date-time, add-on and payment choices; the total is always recomputed from
// the current selection. A confirmed composer rejects every further change.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::entities::{Appointment, AppointmentStatus, Employee, PaymentMethod, Pet, Service};
use crate::error::{BookingError, BookingField};
use crate::pricing::{self, AddOnPolicy, PriceQuote};

/// Accepted date-time input formats (HTML `datetime-local` style)
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

// ============================================================================
// STAGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingStage {
    ServiceSelection,
    DetailSelection,
    PaymentSelection,
    Confirmed,
}

// ============================================================================
// DRAFT
// ============================================================================

/// Selections accumulated so far
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingDraft {
    pub service: Option<Service>,
    pub employee: Option<Employee>,
    pub date_time: Option<NaiveDateTime>,
    pub taxi_dog: bool,
    pub payment_method: PaymentMethod,
}

// ============================================================================
// COMPOSER
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BookingComposer {
    client_id: String,
    pet: Pet,
    add_on: AddOnPolicy,
    draft: BookingDraft,
    stage: BookingStage,
}

impl BookingComposer {
    /// Start a booking for an already registered pet
    pub fn new(client_id: &str, pet: Pet, add_on: AddOnPolicy) -> Self {
        BookingComposer {
            client_id: client_id.to_string(),
            pet,
            add_on,
            draft: BookingDraft::default(),
            stage: BookingStage::ServiceSelection,
        }
    }

    pub fn stage(&self) -> BookingStage {
        self.stage
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    /// Choose (or change) the service; moves past ServiceSelection
    pub fn select_service(
        &mut self,
        catalog: &Catalog,
        service_id: &str,
    ) -> Result<BookingStage, BookingError> {
        self.ensure_open()?;
        let service = catalog.require_service(service_id)?.clone();

        tracing::debug!(service = %service.name, "service selected");
        self.draft.service = Some(service);

        self.stage = match self.draft.date_time {
            Some(_) => BookingStage::PaymentSelection,
            None => BookingStage::DetailSelection,
        };
        Ok(self.stage)
    }

    /// Preferred employee; `None` means anyone
    pub fn select_employee(
        &mut self,
        catalog: &Catalog,
        employee_id: Option<&str>,
    ) -> Result<(), BookingError> {
        self.ensure_open()?;
        self.ensure_service()?;

        self.draft.employee = match employee_id {
            Some(id) if !id.is_empty() => Some(catalog.require_employee(id)?.clone()),
            _ => None,
        };
        Ok(())
    }

    /// Set the appointment time from form input; an empty string clears it
    pub fn set_date_time(&mut self, input: &str) -> Result<BookingStage, BookingError> {
        self.ensure_open()?;
        self.ensure_service()?;

        if input.trim().is_empty() {
            self.draft.date_time = None;
            self.stage = BookingStage::DetailSelection;
            return Ok(self.stage);
        }

        let date_time = parse_date_time(input)?;
        self.schedule_at(date_time)
    }

    /// Set the appointment time directly
    pub fn schedule_at(&mut self, date_time: NaiveDateTime) -> Result<BookingStage, BookingError> {
        self.ensure_open()?;
        self.ensure_service()?;

        self.draft.date_time = Some(date_time);
        self.stage = BookingStage::PaymentSelection;
        Ok(self.stage)
    }

    pub fn set_taxi_dog(&mut self, selected: bool) -> Result<(), BookingError> {
        self.ensure_open()?;
        self.ensure_service()?;

        if selected && !self.add_on.enabled {
            return Err(BookingError::AddOnDisabled);
        }
        self.draft.taxi_dog = selected;
        Ok(())
    }

    /// Only allowed at PaymentSelection
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), BookingError> {
        self.ensure_open()?;
        if self.stage != BookingStage::PaymentSelection {
            return Err(BookingError::NotAtPaymentStage);
        }

        self.draft.payment_method = method;
        Ok(())
    }

    /// Step back one stage, keeping every selection
    pub fn go_back(&mut self) -> Result<BookingStage, BookingError> {
        self.stage = match self.stage {
            BookingStage::ServiceSelection | BookingStage::DetailSelection => {
                BookingStage::ServiceSelection
            }
            BookingStage::PaymentSelection => BookingStage::DetailSelection,
            BookingStage::Confirmed => return Err(BookingError::AlreadyConfirmed),
        };
        Ok(self.stage)
    }

    /// Running price for the chosen service, if any
    pub fn quote(&self) -> Option<PriceQuote> {
        self.draft.service.as_ref().map(|service| {
            pricing::quote(service, self.pet.size, self.draft.taxi_dog, self.add_on.fee)
        })
    }

    /// Payable total; available once service and date-time are both set
    pub fn total(&self) -> Option<f64> {
        self.draft.date_time?;
        self.quote().map(|q| q.total)
    }

    /// Finalize into a Scheduled appointment.
    ///
    /// Fails without changing anything when service or date-time is missing.
    pub fn confirm(&mut self) -> Result<Appointment, BookingError> {
        self.ensure_open()?;

        let service = self
            .draft
            .service
            .as_ref()
            .ok_or(BookingError::MissingField(BookingField::Service))?;
        let date_time = self
            .draft
            .date_time
            .ok_or(BookingError::MissingField(BookingField::DateTime))?;

        let total_price =
            pricing::price(service, self.pet.size, self.draft.taxi_dog, self.add_on.fee);

        let appointment = Appointment {
            id: uuid::Uuid::new_v4().to_string(),
            client_id: self.client_id.clone(),
            pet_id: self.pet.id.clone(),
            service_id: service.id.clone(),
            employee_id: self.draft.employee.as_ref().map(|e| e.id.clone()),
            date_time,
            status: AppointmentStatus::Scheduled,
            taxi_dog: self.draft.taxi_dog,
            payment_method: self.draft.payment_method,
            total_price,
        };

        self.stage = BookingStage::Confirmed;
        tracing::info!(
            appointment = %appointment.id,
            service = %service.name,
            total = appointment.total_price,
            "booking confirmed"
        );

        Ok(appointment)
    }

    fn ensure_open(&self) -> Result<(), BookingError> {
        match self.stage {
            BookingStage::Confirmed => Err(BookingError::AlreadyConfirmed),
            _ => Ok(()),
        }
    }

    fn ensure_service(&self) -> Result<(), BookingError> {
        match self.draft.service {
            Some(_) => Ok(()),
            None => Err(BookingError::ServiceNotSelected),
        }
    }
}

/// Parse `YYYY-MM-DDTHH:MM` (seconds optional)
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime, BookingError> {
    let trimmed = input.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| BookingError::InvalidDateTime(input.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
