// 🐾 Pet & Client Entities
//
// A client session owns one client; the client registers one pet, whose size
// is the pricing key for every service.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RegistrationError;

// ============================================================================
// PET SIZE
// ============================================================================

/// Closed size enumeration used as the price-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PetSize {
    #[serde(rename = "Pequeno", alias = "Small", alias = "small")]
    Small,
    #[serde(rename = "Médio", alias = "Medium", alias = "medium")]
    Medium,
    #[serde(rename = "Grande", alias = "Large", alias = "large")]
    Large,
}

impl PetSize {
    pub const ALL: [PetSize; 3] = [PetSize::Small, PetSize::Medium, PetSize::Large];

    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            PetSize::Small => "Pequeno",
            PetSize::Medium => "Médio",
            PetSize::Large => "Grande",
        }
    }
}

impl std::fmt::Display for PetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PetSize {
    type Err = String;

    /// Accepts the display labels and the English names, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "pequeno" | "p" => Ok(PetSize::Small),
            "medium" | "médio" | "medio" | "m" => Ok(PetSize::Medium),
            "large" | "grande" | "g" => Ok(PetSize::Large),
            other => Err(format!("Unknown pet size: {}", other)),
        }
    }
}

// ============================================================================
// PET
// ============================================================================

/// Registered once per session; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub breed: String,
    /// Kilograms
    pub weight: f64,
    pub size: PetSize,
    #[serde(default)]
    pub observations: String,
}

impl Pet {
    /// Validate registration input and create a pet with a fresh identity
    pub fn new(
        name: &str,
        breed: &str,
        weight: f64,
        size: PetSize,
    ) -> Result<Self, RegistrationError> {
        let name = name.trim();
        let breed = breed.trim();

        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        if breed.is_empty() {
            return Err(RegistrationError::MissingBreed);
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(RegistrationError::InvalidWeight(weight));
        }

        Ok(Pet {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            breed: breed.to_string(),
            weight,
            size,
            observations: String::new(),
        })
    }

    pub fn with_observations(mut self, observations: &str) -> Self {
        self.observations = observations.trim().to_string();
        self
    }
}

// ============================================================================
// CLIENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Client {
    pub fn new(full_name: &str, email: &str, phone: &str) -> Self {
        Client {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            pets: Vec::new(),
        }
    }

    /// First registered pet, the one bookings are made for
    pub fn pet(&self) -> Option<&Pet> {
        self.pets.first()
    }
}

impl Default for Client {
    fn default() -> Self {
        Client::new("Cliente PetFlow", "cliente@petflow.app", "")
    }
}

// ============================================================================
// TESTS
// ============================================================================
