// 💬 Notification Links - pre-filled WhatsApp message for a booking
//
// Field order and labels are fixed; the shop's WhatsApp inbox expects them.
// Encoding follows JavaScript's encodeURIComponent so links are byte-identical
// to the ones the web client produces.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::entities::{Appointment, Employee, PaymentMethod, Pet, Service};

/// Label used when no employee preference was given
pub const ANY_EMPLOYEE: &str = "Qualquer um";

/// Characters encodeURIComponent leaves alone but `urlencoding` escapes
const URI_COMPONENT_EXTRAS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Everything the message needs, resolved to display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDetails {
    pub pet_name: String,
    pub service_name: String,
    pub date_time: NaiveDateTime,
    pub employee_name: Option<String>,
    pub taxi_dog: bool,
    pub payment_method: PaymentMethod,
    pub total: f64,
}

impl BookingDetails {
    pub fn new(
        appointment: &Appointment,
        pet: &Pet,
        service: &Service,
        employee: Option<&Employee>,
    ) -> Self {
        BookingDetails {
            pet_name: pet.name.clone(),
            service_name: service.name.clone(),
            date_time: appointment.date_time,
            employee_name: employee.map(|e| e.name.clone()),
            taxi_dog: appointment.taxi_dog,
            payment_method: appointment.payment_method,
            total: appointment.total_price,
        }
    }
}

/// Plain-text confirmation message (pt-BR)
pub fn booking_message(details: &BookingDetails) -> String {
    format!(
        "Olá! Gostaria de confirmar um agendamento pelo PetFlow:\n\
         Pet: {}\n\
         Serviço: {}\n\
         Data: {}\n\
         Hora: {}\n\
         Profissional: {}\n\
         Táxi Dog: {}\n\
         Pagamento: {}\n\
         Total: R${:.2}",
        details.pet_name,
        details.service_name,
        details.date_time.format("%d/%m/%Y"),
        details.date_time.format("%H:%M"),
        details.employee_name.as_deref().unwrap_or(ANY_EMPLOYEE),
        if details.taxi_dog { "Sim" } else { "Não" },
        details.payment_method.label(),
        details.total
    )
}

/// Percent-encode with encodeURIComponent semantics
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = urlencoding::encode(input).into_owned();
    for (escaped, literal) in URI_COMPONENT_EXTRAS {
        encoded = encoded.replace(escaped, literal);
    }
    encoded
}

/// `https://wa.me/<phone>?text=<message>`
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        phone.trim_start_matches('+'),
        encode_uri_component(message)
    )
}

/// QR image for paying by Pix at the payment stage
pub fn pix_qr_url(pix_key: &str) -> String {
    format!(
        "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data={}",
        encode_uri_component(pix_key)
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::parse_date_time;

    fn details() -> BookingDetails {
        BookingDetails {
            pet_name: "Rex".to_string(),
            service_name: "Somente Banho".to_string(),
            date_time: parse_date_time("2024-08-15T14:30").unwrap(),
            employee_name: None,
            taxi_dog: true,
            payment_method: PaymentMethod::Pix,
            total: 55.0,
        }
    }

    #[test]
    fn test_booking_message_layout() {
        let expected = "Olá! Gostaria de confirmar um agendamento pelo PetFlow:\n\
                        Pet: Rex\n\
                        Serviço: Somente Banho\n\
                        Data: 15/08/2024\n\
                        Hora: 14:30\n\
                        Profissional: Qualquer um\n\
                        Táxi Dog: Sim\n\
                        Pagamento: Pix\n\
                        Total: R$55.00";

        assert_eq!(booking_message(&details()), expected);
    }

    #[test]
    fn test_booking_message_with_employee() {
        let mut d = details();
        d.employee_name = Some("Juliana".to_string());
        d.taxi_dog = false;
        d.payment_method = PaymentMethod::OnSite;
        d.total = 40.0;

        let message = booking_message(&d);
        assert!(message.contains("Profissional: Juliana\n"));
        assert!(message.contains("Táxi Dog: Não\n"));
        assert!(message.contains("Pagamento: Na Loja\n"));
        assert!(message.ends_with("Total: R$40.00"));
    }

    #[test]
    fn test_encode_uri_component_matches_javascript() {
        assert_eq!(encode_uri_component("Olá! (sim)"), "Ol%C3%A1!%20(sim)");
        assert_eq!(encode_uri_component("a\nb"), "a%0Ab");
        assert_eq!(encode_uri_component("R$40.00*"), "R%2440.00*");
        assert_eq!(encode_uri_component("it's"), "it's");
    }

    #[test]
    fn test_whatsapp_link() {
        let link = whatsapp_link("+5511999999999", "Pet: Rex");
        assert_eq!(link, "https://wa.me/5511999999999?text=Pet%3A%20Rex");
    }

    #[test]
    fn test_whatsapp_link_round_trips_message() {
        let message = booking_message(&details());
        let link = whatsapp_link("5511999999999", &message);

        let encoded = link.split("text=").nth(1).unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), message);
    }

    #[test]
    fn test_pix_qr_url() {
        assert_eq!(
            pix_qr_url("chave-pix-aleatoria-petflow"),
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=chave-pix-aleatoria-petflow"
        );
    }
}
