// 📊 Owner Reports - revenue, expenses and per-service totals

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::entities::{Appointment, Expense};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub revenue: f64,
    pub expenses: f64,
    pub net_profit: f64,
}

impl FinancialSummary {
    pub fn compute<'a>(
        appointments: impl IntoIterator<Item = &'a Appointment>,
        expenses: &[Expense],
    ) -> Self {
        let revenue: f64 = appointments.into_iter().map(|a| a.total_price).sum();
        let expenses: f64 = expenses.iter().map(|e| e.amount).sum();

        FinancialSummary {
            revenue,
            expenses,
            net_profit: revenue - expenses,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Receita: R$ {:.2} | Despesas: R$ {:.2} | Lucro: R$ {:.2}",
            self.revenue, self.expenses, self.net_profit
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTotal {
    pub service_id: String,
    pub service_name: String,
    pub count: usize,
    pub revenue: f64,
}

/// Count and revenue per catalog service, in catalog order.
/// Appointments for services missing from the catalog are listed last under their id.
pub fn service_breakdown<'a>(
    catalog: &Catalog,
    appointments: impl IntoIterator<Item = &'a Appointment>,
) -> Vec<ServiceTotal> {
    let mut totals: Vec<ServiceTotal> = catalog
        .services()
        .iter()
        .map(|s| ServiceTotal {
            service_id: s.id.clone(),
            service_name: s.name.clone(),
            count: 0,
            revenue: 0.0,
        })
        .collect();

    for appointment in appointments {
        let entry = match totals
            .iter()
            .position(|t| t.service_id == appointment.service_id)
        {
            Some(index) => &mut totals[index],
            None => {
                totals.push(ServiceTotal {
                    service_id: appointment.service_id.clone(),
                    service_name: appointment.service_id.clone(),
                    count: 0,
                    revenue: 0.0,
                });
                let last = totals.len() - 1;
                &mut totals[last]
            }
        };
        entry.count += 1;
        entry.revenue += appointment.total_price;
    }

    totals
}

/// Number of appointments on a given day
pub fn appointments_on<'a>(
    appointments: impl IntoIterator<Item = &'a Appointment>,
    date: NaiveDate,
) -> usize {
    appointments
        .into_iter()
        .filter(|a| a.date_time.date() == date)
        .count()
}

// ============================================================================
// TESTS
// ============================================================================
