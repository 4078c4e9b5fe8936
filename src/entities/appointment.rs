// 📅 Appointment Entity - a priced, confirmed booking
//
// The total is always computed by the pricing module, never entered by hand:
//   total_price == service.prices[pet.size] + (taxi_dog ? add_on_fee : 0)

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "Agendado")]
    Scheduled,
    #[serde(rename = "Confirmado")]
    Confirmed,
    #[serde(rename = "Concluído")]
    Completed,
    #[serde(rename = "Cancelado")]
    Canceled,
}

/// Colour family used when rendering a status chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Blue,
    Yellow,
    Green,
    Red,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Agendado",
            AppointmentStatus::Confirmed => "Confirmado",
            AppointmentStatus::Completed => "Concluído",
            AppointmentStatus::Canceled => "Cancelado",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            AppointmentStatus::Scheduled => StatusTone::Blue,
            AppointmentStatus::Confirmed => StatusTone::Yellow,
            AppointmentStatus::Completed => StatusTone::Green,
            AppointmentStatus::Canceled => StatusTone::Red,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// PAYMENT METHOD
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Instant transfer
    #[default]
    #[serde(rename = "Pix")]
    Pix,
    /// Pay at the shop
    #[serde(rename = "Na Loja", alias = "on_site", alias = "OnSite")]
    OnSite,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::OnSite => "Na Loja",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "na loja" | "na-loja" | "na_loja" | "on-site" | "on_site" | "onsite" => {
                Ok(PaymentMethod::OnSite)
            }
            other => Err(format!("Unknown payment method: {}", other)),
        }
    }
}

// ============================================================================
// APPOINTMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    pub pet_id: String,
    pub service_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Local wall-clock time at the shop
    pub date_time: NaiveDateTime,
    pub status: AppointmentStatus,
    /// Transport add-on ("Táxi Dog")
    pub taxi_dog: bool,
    pub payment_method: PaymentMethod,
    pub total_price: f64,
}

impl Appointment {
    /// Hash of what was booked, ignoring identity.
    /// Two submissions of the same booking share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!(
            "{}|{}|{}|{}",
            self.client_id,
            self.pet_id,
            self.service_id,
            self.date_time.format("%Y-%m-%dT%H:%M:%S")
        ));
        format!("{:x}", hasher.finalize())
    }
}

/// A day at the shop, used when no real history exists
pub fn demo_history() -> Vec<Appointment> {
    use AppointmentStatus::{Confirmed, Scheduled};

    let at = |hour: u32| {
        NaiveDate::from_ymd_opt(2024, 8, 20)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap_or_default()
    };
    let entry = |id: &str,
                 service: &str,
                 hour: u32,
                 status: AppointmentStatus,
                 taxi_dog: bool,
                 payment: PaymentMethod,
                 total: f64| {
        Appointment {
            id: id.to_string(),
            client_id: format!("c-{}", id),
            pet_id: format!("p-{}", id),
            service_id: service.to_string(),
            employee_id: Some("1".to_string()),
            date_time: at(hour),
            status,
            taxi_dog,
            payment_method: payment,
            total_price: total,
        }
    };

    vec![
        entry("a1", "1", 10, Scheduled, false, PaymentMethod::Pix, 40.0),
        entry("a2", "3", 11, Confirmed, true, PaymentMethod::OnSite, 90.0),
        entry("a3", "2", 14, Scheduled, false, PaymentMethod::Pix, 45.0),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
