//! Savings goal records.
//!
//! The persisted `status` is advisory. Metrics always recompute it from the
//! amounts with [`goal_progress_status`](crate::goal_progress_status).

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    EngineError, ResultEngine,
    dates::{self, dmy},
    util,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalStatus {
    #[serde(rename = "Iniciado")]
    NotStarted,
    #[serde(rename = "En proceso")]
    InProgress,
    #[serde(rename = "Completado")]
    Completed,
}

impl GoalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Iniciado",
            Self::InProgress => "En proceso",
            Self::Completed => "Completado",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for GoalStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Iniciado" => Ok(Self::NotStarted),
            "En proceso" => Ok(Self::InProgress),
            "Completado" => Ok(Self::Completed),
            _ => Err(EngineError::validation("Estado inválido")),
        }
    }
}

/// A stored savings goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub category: String,
    pub total_amount: f64,
    pub saved_amount: f64,
    #[serde(with = "dmy")]
    pub start_date: NaiveDate,
    #[serde(with = "dmy")]
    pub end_date: NaiveDate,
    pub status: GoalStatus,
    pub user: String,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} [{}] {:.2}/{:.2} hasta {}",
            self.id,
            self.name,
            self.category,
            self.saved_amount,
            self.total_amount,
            dates::format_date(self.end_date)
        )
    }
}

/// Goal payload before validation. `start_date` is never taken from input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalInput {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub total_amount: f64,
    pub saved_amount: f64,
    pub end_date: String,
    pub status: String,
    pub user: String,
}

impl GoalInput {
    pub fn from_value(value: &Value) -> ResultEngine<Self> {
        let map = util::object(value)?;
        Ok(Self {
            id: util::optional_id(map),
            name: util::text_field(map, "name"),
            category: util::text_field(map, "category"),
            total_amount: util::float_field(map, "total_amount")?,
            saved_amount: util::float_field(map, "saved_amount")?,
            end_date: util::text_field(map, "end_date"),
            status: util::text_field(map, "status"),
            user: util::text_field(map, "user"),
        })
    }

    /// Build the stored record. Call after `validate_goal`.
    pub(crate) fn to_goal(&self, id: String, start_date: NaiveDate) -> ResultEngine<Goal> {
        let end_date = dates::parse_date(&self.end_date)
            .ok_or_else(|| EngineError::validation("Fecha de fin inválida (usar dd/mm/yyyy)"))?;
        Ok(Goal {
            id,
            name: self.name.clone(),
            category: self.category.clone(),
            total_amount: self.total_amount,
            saved_amount: self.saved_amount,
            start_date,
            end_date,
            status: GoalStatus::try_from(self.status.as_str())?,
            user: self.user.clone(),
        })
    }
}

impl From<&Goal> for GoalInput {
    fn from(goal: &Goal) -> Self {
        Self {
            id: Some(goal.id.clone()),
            name: goal.name.clone(),
            category: goal.category.clone(),
            total_amount: goal.total_amount,
            saved_amount: goal.saved_amount,
            end_date: dates::format_date(goal.end_date),
            status: goal.status.as_str().to_string(),
            user: goal.user.clone(),
        }
    }
}
