// 💰 Pricing - service price by pet size plus the optional transport add-on
//
// Pure and deterministic. Price tables are exhaustive over PetSize, so a
// lookup cannot miss; incomplete tables are rejected when the catalog loads.

use serde::{Deserialize, Serialize};

use crate::entities::{Appointment, PetSize, Service};
use crate::error::{CatalogError, PricingError};

/// Default transport ("Táxi Dog") fee per trip
pub const DEFAULT_ADD_ON_FEE: f64 = 15.0;

/// Half a cent; stored totals closer than this to the computed total match
const CENT_TOLERANCE: f64 = 0.005;

// ============================================================================
// ADD-ON POLICY
// ============================================================================

/// Owner-side settings for the transport add-on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddOnPolicy {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_fee")]
    pub fee: f64,
}

fn default_enabled() -> bool {
    true
}

fn default_fee() -> f64 {
    DEFAULT_ADD_ON_FEE
}

impl AddOnPolicy {
    pub fn new(enabled: bool, fee: f64) -> Result<Self, CatalogError> {
        let policy = AddOnPolicy { enabled, fee };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.fee.is_finite() || self.fee < 0.0 {
            return Err(CatalogError::InvalidAddOnFee(self.fee));
        }
        Ok(())
    }
}

impl Default for AddOnPolicy {
    fn default() -> Self {
        AddOnPolicy {
            enabled: true,
            fee: DEFAULT_ADD_ON_FEE,
        }
    }
}

// ============================================================================
// QUOTE
// ============================================================================

/// Price breakdown for one booking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub base: f64,
    pub add_on: f64,
    pub total: f64,
}

/// Base price for the pet's size plus the add-on fee when selected
pub fn quote(
    service: &Service,
    size: PetSize,
    add_on_selected: bool,
    add_on_fee: f64,
) -> PriceQuote {
    let base = service.price_for(size);
    let add_on = if add_on_selected { add_on_fee } else { 0.0 };

    PriceQuote {
        base,
        add_on,
        total: base + add_on,
    }
}

/// Total only
pub fn price(service: &Service, size: PetSize, add_on_selected: bool, add_on_fee: f64) -> f64 {
    quote(service, size, add_on_selected, add_on_fee).total
}

/// Check a stored appointment against a recomputed total
pub fn verify_total(
    appointment: &Appointment,
    service: &Service,
    size: PetSize,
    add_on_fee: f64,
) -> Result<(), PricingError> {
    if appointment.service_id != service.id {
        return Err(PricingError::ServiceMismatch {
            appointment: appointment.id.clone(),
            service: appointment.service_id.clone(),
            given: service.id.clone(),
        });
    }

    let computed = price(service, size, appointment.taxi_dog, add_on_fee);
    if (appointment.total_price - computed).abs() > CENT_TOLERANCE {
        return Err(PricingError::TotalMismatch {
            appointment: appointment.id.clone(),
            stored: appointment.total_price,
            computed,
        });
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AppointmentStatus, PaymentMethod, PriceTable};
    use chrono::NaiveDate;

    fn bath() -> Service {
        Service::new("bath", "Bath", "", PriceTable::new(30.0, 40.0, 50.0).unwrap())
    }

    fn appointment(total: f64, taxi_dog: bool) -> Appointment {
        Appointment {
            id: "a1".to_string(),
            client_id: "c1".to_string(),
            pet_id: "p1".to_string(),
            service_id: "bath".to_string(),
            employee_id: None,
            date_time: NaiveDate::from_ymd_opt(2024, 8, 15)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            status: AppointmentStatus::Scheduled,
            taxi_dog,
            payment_method: PaymentMethod::Pix,
            total_price: total,
        }
    }

    #[test]
    fn test_price_without_add_on() {
        assert_eq!(price(&bath(), PetSize::Medium, false, 15.0), 40.0);
    }

    #[test]
    fn test_price_with_add_on() {
        assert_eq!(price(&bath(), PetSize::Medium, true, 15.0), 55.0);
    }

    #[test]
    fn test_price_matches_table_for_every_size() {
        let service = bath();
        for size in PetSize::ALL {
            assert_eq!(price(&service, size, false, 15.0), service.prices.get(size));
            assert_eq!(
                price(&service, size, true, 15.0),
                service.prices.get(size) + 15.0
            );
        }
    }

    #[test]
    fn test_quote_breakdown() {
        let q = quote(&bath(), PetSize::Small, true, 12.5);

        assert_eq!(q.base, 30.0);
        assert_eq!(q.add_on, 12.5);
        assert_eq!(q.total, 42.5);
    }

    #[test]
    fn test_verify_total_accepts_consistent_appointment() {
        assert!(verify_total(&appointment(55.0, true), &bath(), PetSize::Medium, 15.0).is_ok());
        assert!(verify_total(&appointment(40.0, false), &bath(), PetSize::Medium, 15.0).is_ok());
    }

    #[test]
    fn test_verify_total_flags_manual_edit() {
        let result = verify_total(&appointment(40.0, true), &bath(), PetSize::Medium, 15.0);

        assert_eq!(
            result,
            Err(PricingError::TotalMismatch {
                appointment: "a1".to_string(),
                stored: 40.0,
                computed: 55.0,
            })
        );
    }

    #[test]
    fn test_verify_total_wrong_service() {
        let other = Service::new("tosa", "Tosa", "", PriceTable::new(1.0, 1.0, 1.0).unwrap());
        let result = verify_total(&appointment(40.0, false), &other, PetSize::Medium, 15.0);

        assert!(matches!(result, Err(PricingError::ServiceMismatch { .. })));
    }

    #[test]
    fn test_add_on_policy_validation() {
        assert!(AddOnPolicy::new(true, 15.0).is_ok());
        assert_eq!(
            AddOnPolicy::new(true, -5.0),
            Err(CatalogError::InvalidAddOnFee(-5.0))
        );
    }

    #[test]
    fn test_add_on_policy_defaults_from_json() {
        let policy: AddOnPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, AddOnPolicy::default());
    }
}
