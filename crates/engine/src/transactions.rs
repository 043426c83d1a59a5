//! Income and expense records.
//!
//! Both kinds share the [`Transaction`] shape and live in separate
//! collections with their own id sequence and category set.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    EngineError, ResultEngine,
    catalog::Catalog,
    dates::{self, dmy},
    store::Collection,
    util,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn collection(self) -> Collection {
        match self {
            Self::Income => Collection::Incomes,
            Self::Expense => Collection::Expenses,
        }
    }

    pub fn categories(self, catalog: &Catalog) -> &[String] {
        match self {
            Self::Income => &catalog.income_categories,
            Self::Expense => &catalog.expense_categories,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Income => "ingreso",
            Self::Expense => "egreso",
        }
    }

    pub(crate) fn not_found_message(self, id: &str) -> String {
        format!("No existe {} con id {id}", self.noun())
    }

    pub(crate) fn delete_missing_message(self) -> String {
        format!("El {} que intenta borrar no existe", self.noun())
    }

    pub(crate) fn deleted_message(self) -> String {
        format!("El {} fue borrado satisfactoriamente", self.noun())
    }
}

/// A stored income or expense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub category: String,
    #[serde(with = "dmy")]
    pub date: NaiveDate,
    pub user: String,
}

pub type Income = Transaction;
pub type Expense = Transaction;

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {:.2} {} {} ({})",
            self.id,
            self.amount,
            self.category,
            dates::format_date(self.date),
            self.user
        )
    }
}

/// Income or expense payload before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub id: Option<String>,
    pub amount: f64,
    pub category: String,
    pub date: String,
    pub user: String,
}

impl TransactionInput {
    pub fn new(amount: f64, category: &str, date: &str, user: &str) -> Self {
        Self {
            id: None,
            amount,
            category: category.to_string(),
            date: date.to_string(),
            user: user.to_string(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn from_value(value: &Value) -> ResultEngine<Self> {
        let map = util::object(value)?;
        Ok(Self {
            id: util::optional_id(map),
            amount: util::float_field(map, "amount")?,
            category: util::text_field(map, "category"),
            date: util::text_field(map, "date"),
            user: util::text_field(map, "user"),
        })
    }

    /// Build the stored record. Call after `validate_transaction`.
    pub(crate) fn to_transaction(&self, id: String) -> ResultEngine<Transaction> {
        let date = dates::parse_date(&self.date)
            .ok_or_else(|| EngineError::validation("Fecha inválida (usar dd/mm/yyyy)"))?;
        Ok(Transaction {
            id,
            amount: self.amount,
            category: self.category.clone(),
            date,
            user: self.user.clone(),
        })
    }
}

impl From<&Transaction> for TransactionInput {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: Some(transaction.id.clone()),
            amount: transaction.amount,
            category: transaction.category.clone(),
            date: dates::format_date(transaction.date),
            user: transaction.user.clone(),
        }
    }
}
