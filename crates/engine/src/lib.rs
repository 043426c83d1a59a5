//! Personal finance engine: users, incomes, expenses and savings goals kept
//! in named collections, plus the metrics derived from them.
//!
//! ```rust
//! use engine::{Engine, MemoryStore, TransactionInput};
//!
//! let engine = Engine::builder().store(MemoryStore::new()).build().unwrap();
//! engine.register_user("ana", "pw", "pw", 28, "F").unwrap();
//! let income = engine
//!     .insert_income(&TransactionInput::new(1000.0, "Salario", "01/03/2024", "ana"))
//!     .unwrap();
//! assert_eq!(income.id, "1");
//! assert_eq!(engine.monthly_savings("ana", 3, 2024), 1000.0);
//! ```

pub use catalog::Catalog;
pub use dates::{Clock, Period};
pub use error::EngineError;
pub use goals::{Goal, GoalInput, GoalStatus};
pub use metrics::{DashboardMetrics, GoalDetail, GoalsSummary, goal_progress_status, savings_change};
pub use ops::{Engine, EngineBuilder};
pub use store::{
    Collection, CollectionStore, JsonFileStore, MemoryStore, StoreAnomaly, StoreObserver,
    TracingObserver,
};
pub use transactions::{Expense, Income, Transaction, TransactionInput, TransactionKind};
pub use users::{Genre, Role, User, UserInput};

pub mod catalog;
pub mod dates;
mod error;
mod goals;
mod metrics;
mod ops;
pub mod store;
mod transactions;
mod users;
mod util;
pub mod validation;

type ResultEngine<T> = Result<T, EngineError>;
