// ✂️ Service Entity - grooming service with a size-keyed price table
//
// The price table is exhaustive over PetSize. Incomplete or negative tables
// are rejected when the table is built, so lookups can never miss.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::pet::PetSize;
use crate::error::CatalogError;

// ============================================================================
// PRICE TABLE
// ============================================================================

/// One price per pet size. Serialized as a size-keyed map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<PetSize, f64>", into = "BTreeMap<PetSize, f64>")]
pub struct PriceTable {
    small: f64,
    medium: f64,
    large: f64,
}

impl PriceTable {
    pub fn new(small: f64, medium: f64, large: f64) -> Result<Self, CatalogError> {
        for (size, price) in [
            (PetSize::Small, small),
            (PetSize::Medium, medium),
            (PetSize::Large, large),
        ] {
            if !price.is_finite() || price < 0.0 {
                return Err(CatalogError::NegativePrice { size, price });
            }
        }

        Ok(PriceTable {
            small,
            medium,
            large,
        })
    }

    /// Seed data only; callers guarantee the prices are valid
    pub(crate) const fn from_trusted(small: f64, medium: f64, large: f64) -> Self {
        PriceTable {
            small,
            medium,
            large,
        }
    }

    /// Price for a size (total: every size has an entry)
    pub fn get(&self, size: PetSize) -> f64 {
        match size {
            PetSize::Small => self.small,
            PetSize::Medium => self.medium,
            PetSize::Large => self.large,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PetSize, f64)> + '_ {
        PetSize::ALL.into_iter().map(move |size| (size, self.get(size)))
    }
}

impl TryFrom<BTreeMap<PetSize, f64>> for PriceTable {
    type Error = CatalogError;

    fn try_from(map: BTreeMap<PetSize, f64>) -> Result<Self, Self::Error> {
        let lookup = |size: PetSize| {
            map.get(&size)
                .copied()
                .ok_or(CatalogError::IncompletePriceTable(size))
        };

        PriceTable::new(
            lookup(PetSize::Small)?,
            lookup(PetSize::Medium)?,
            lookup(PetSize::Large)?,
        )
    }
}

impl From<PriceTable> for BTreeMap<PetSize, f64> {
    fn from(table: PriceTable) -> Self {
        table.iter().collect()
    }
}

// ============================================================================
// SERVICE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub prices: PriceTable,
}

impl Service {
    pub fn new(id: &str, name: &str, description: &str, prices: PriceTable) -> Self {
        Service {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            prices,
        }
    }

    /// Base price for a pet size
    pub fn price_for(&self, size: PetSize) -> f64 {
        self.prices.get(size)
    }
}

// ============================================================================
// TESTS
// ============================================================================
