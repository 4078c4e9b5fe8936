// 👩‍🔧 Employee Entity - optional staff preference on a booking

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Role label, e.g. "Banhista"
    pub position: String,
    /// Free text, e.g. "09:00 - 18:00"
    pub working_hours: String,
}

impl Employee {
    pub fn new(id: &str, name: &str, position: &str, working_hours: &str) -> Self {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            position: position.to_string(),
            working_hours: working_hours.to_string(),
        }
    }
}
