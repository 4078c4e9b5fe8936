// 📖 Catalog - static reference data for a session
//
// Services and employees are read-only once the catalog is built.
// Identities are unique within each list.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::entities::{Employee, PriceTable, Service};
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    services: Vec<Service>,
    employees: Vec<Employee>,
}

/// Unchecked shape used for deserialization
#[derive(Deserialize)]
struct RawCatalog {
    services: Vec<Service>,
    #[serde(default)]
    employees: Vec<Employee>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Catalog::new(raw.services, raw.employees)
    }
}

impl Catalog {
    /// Build a catalog, rejecting duplicate identities
    pub fn new(services: Vec<Service>, employees: Vec<Employee>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for service in &services {
            if !seen.insert(service.id.as_str()) {
                return Err(CatalogError::DuplicateService(service.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for employee in &employees {
            if !seen.insert(employee.id.as_str()) {
                return Err(CatalogError::DuplicateEmployee(employee.id.clone()));
            }
        }

        Ok(Catalog {
            services,
            employees,
        })
    }

    /// Catalog with the shop's standard services and staff
    pub fn with_defaults() -> Self {
        Catalog {
            services: default_services(),
            employees: default_employees(),
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn require_service(&self, id: &str) -> Result<&Service, CatalogError> {
        self.service(id)
            .ok_or_else(|| CatalogError::UnknownService(id.to_string()))
    }

    pub fn require_employee(&self, id: &str) -> Result<&Employee, CatalogError> {
        self.employee(id)
            .ok_or_else(|| CatalogError::UnknownEmployee(id.to_string()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// SEED DATA
// ============================================================================

fn default_services() -> Vec<Service> {
    let table = PriceTable::from_trusted;

    vec![
        Service::new(
            "1",
            "Somente Banho",
            "Um banho refrescante para seu pet.",
            table(30.0, 40.0, 50.0),
        ),
        Service::new(
            "2",
            "Somente Tosa",
            "Tosa higiênica ou na tesoura.",
            table(35.0, 45.0, 55.0),
        ),
        Service::new(
            "3",
            "Banho e Tosa",
            "O pacote completo de beleza.",
            table(60.0, 75.0, 90.0),
        ),
    ]
}

fn default_employees() -> Vec<Employee> {
    vec![
        Employee::new("1", "Juliana", "Banhista", "09:00 - 18:00"),
        Employee::new("2", "Ricardo", "Tosador", "09:00 - 18:00"),
        Employee::new("3", "Ambos", "Banhista e Tosador", "09:00 - 18:00"),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
