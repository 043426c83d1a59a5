//! Fixed enumerations accepted by the engine.
//!
//! Categories and goal statuses are plain strings so they can be overridden
//! from configuration; genres and roles are typed enums (see [`users`]).
//!
//! [`users`]: crate::users

use serde::{Deserialize, Serialize};

pub const INCOME_CATEGORIES: [&str; 3] = ["Salario", "Regalo", "Otros"];
pub const EXPENSE_CATEGORIES: [&str; 4] = ["Supermercado", "Vivienda", "Transporte", "Otros"];
pub const GOAL_CATEGORIES: [&str; 5] = ["Viaje", "Vivienda", "Electrodomesticos", "Educacion", "Otros"];
pub const GOAL_STATUSES: [&str; 3] = ["Iniciado", "En proceso", "Completado"];

/// Allowed values for the categorised fields of incomes, expenses and goals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub income_categories: Vec<String>,
    pub expense_categories: Vec<String>,
    pub goal_categories: Vec<String>,
    pub goal_statuses: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            income_categories: owned(&INCOME_CATEGORIES),
            expense_categories: owned(&EXPENSE_CATEGORIES),
            goal_categories: owned(&GOAL_CATEGORIES),
            goal_statuses: owned(&GOAL_STATUSES),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
