// 🗂️ Appointment Store - append-only, session-scoped
//
// No deduplication and no updates. Listing is newest first; appointments
// with equal date-times keep their insertion order.

use serde::{Deserialize, Serialize};

use crate::entities::Appointment;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        AppointmentStore {
            appointments: Vec::new(),
        }
    }

    /// Seed with existing appointments (insertion order preserved)
    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        AppointmentStore { appointments }
    }

    /// Append an appointment.
    ///
    /// A matching fingerprint already in the store usually means the same
    /// booking was submitted twice; it is logged, not rejected.
    pub fn add(&mut self, appointment: Appointment) {
        let fingerprint = appointment.fingerprint();
        if self
            .appointments
            .iter()
            .any(|existing| existing.fingerprint() == fingerprint)
        {
            tracing::warn!(
                appointment = %appointment.id,
                date_time = %appointment.date_time,
                "possible double submission: identical booking already stored"
            );
        }

        self.appointments.push(appointment);
    }

    /// Snapshot ordered by date-time, newest first (stable on ties)
    pub fn list(&self) -> Vec<Appointment> {
        let mut snapshot = self.appointments.clone();
        snapshot.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        snapshot
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::parse_date_time;
    use crate::entities::{AppointmentStatus, PaymentMethod};

    fn appointment(id: &str, date_time: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            client_id: "c1".to_string(),
            pet_id: "p1".to_string(),
            service_id: "1".to_string(),
            employee_id: None,
            date_time: parse_date_time(date_time).unwrap(),
            status: AppointmentStatus::Scheduled,
            taxi_dog: false,
            payment_method: PaymentMethod::Pix,
            total_price: 40.0,
        }
    }

    #[test]
    fn test_list_newest_first() {
        let mut store = AppointmentStore::new();
        store.add(appointment("july", "2024-07-28T10:00"));
        store.add(appointment("august", "2024-08-15T14:30"));

        let listed = store.list();
        assert_eq!(listed[0].id, "august");
        assert_eq!(listed[1].id, "july");
    }

    #[test]
    fn test_list_is_stable_on_ties() {
        let mut store = AppointmentStore::new();
        store.add(appointment("first", "2024-08-20T10:00"));
        store.add(appointment("later", "2024-08-21T10:00"));
        store.add(appointment("second", "2024-08-20T10:00"));
        store.add(appointment("third", "2024-08-20T10:00"));

        let ids: Vec<String> = store.list().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["later", "first", "second", "third"]);
    }

    #[test]
    fn test_list_does_not_reorder_store() {
        let mut store = AppointmentStore::new();
        store.add(appointment("old", "2024-01-01T10:00"));
        store.add(appointment("new", "2024-12-01T10:00"));

        let _ = store.list();
        let ids: Vec<&str> = store.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "new"]);
    }

    #[test]
    fn test_add_keeps_duplicates() {
        let mut store = AppointmentStore::new();
        store.add(appointment("a", "2024-08-15T14:30"));
        store.add(appointment("a", "2024-08-15T14:30"));

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get() {
        let store = AppointmentStore::with_appointments(vec![
            appointment("a1", "2024-08-20T10:00"),
            appointment("a2", "2024-08-20T14:00"),
            appointment("a3", "2024-08-21T09:00"),
        ]);

        assert_eq!(store.get("a3").unwrap().id, "a3");
        assert!(store.get("missing").is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_empty_store() {
        let store = AppointmentStore::default();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }
}
