//! Record validators.
//!
//! Each validator checks its fields in a fixed order and returns the first
//! failure as [`EngineError::Validation`]; the error message is the reason
//! shown to the user.

use chrono::NaiveDate;

use crate::{
    EngineError, ResultEngine,
    dates::{self, GOAL_HORIZON_YEARS},
    goals::{GoalInput, GoalStatus},
    transactions::{TransactionInput, TransactionKind},
    users::{Genre, Role, UserInput},
    util,
};

fn fail(reason: &str) -> ResultEngine<()> {
    Err(EngineError::validation(reason))
}

fn is_known_user(known_users: &[String], name: &str) -> bool {
    known_users.iter().any(|known| known == name)
}

/// Validate an income or expense. `known_users` are the stored user names.
///
/// Incomes may not be dated after `today`; expenses only need a well formed
/// date within the accepted years.
pub fn validate_transaction(
    input: &TransactionInput,
    kind: TransactionKind,
    allowed_categories: &[String],
    known_users: &[String],
    today: NaiveDate,
) -> ResultEngine<()> {
    if !input.amount.is_finite() {
        return fail("amount debe ser numérico");
    }
    if input.amount <= 0.0 {
        return fail("amount debe ser mayor a 0");
    }
    if !allowed_categories.contains(&input.category) {
        return fail("Categoría inválida");
    }
    let date_ok = match kind {
        TransactionKind::Income => dates::is_past_or_today_on(&input.date, today),
        TransactionKind::Expense => dates::is_valid_date_on(&input.date, today),
    };
    if !date_ok {
        return fail("Fecha inválida (usar dd/mm/yyyy)");
    }
    if !is_known_user(known_users, &input.user) {
        return fail("El usuario que intenta realizar la operación no existe");
    }
    Ok(())
}

/// Validate a user. Genre is checked before age.
pub fn validate_user(input: &UserInput) -> ResultEngine<()> {
    if input.name.trim().is_empty() {
        return fail("El campo name no puede estar vacío");
    }
    if input.password.trim().is_empty() {
        return fail("El campo password no puede estar vacío");
    }
    Genre::try_from(input.genre.as_str())?;
    let Some(age) = util::parse_int(&input.age) else {
        return fail("Edad debe ser numérico");
    };
    if age <= 0 || u32::try_from(age).is_err() {
        return fail("Edad debe ser mayor a 0");
    }
    Role::try_from(input.role.as_str())?;
    Ok(())
}

/// Validate a savings goal.
pub fn validate_goal(
    input: &GoalInput,
    allowed_categories: &[String],
    allowed_statuses: &[String],
    known_users: &[String],
    today: NaiveDate,
) -> ResultEngine<()> {
    if !input.total_amount.is_finite() {
        return fail("total_amount debe ser numérico");
    }
    if input.total_amount <= 0.0 {
        return fail("total_amount debe ser mayor a 0");
    }
    if !input.saved_amount.is_finite() {
        return fail("saved_amount debe ser numérico");
    }
    if input.saved_amount < 0.0 {
        return fail("saved_amount no puede ser negativo");
    }
    if input.saved_amount >= input.total_amount {
        return fail("saved_amount debe ser menor a total_amount");
    }
    if !dates::is_valid_goal_date_on(&input.end_date, GOAL_HORIZON_YEARS, today) {
        return fail("Fecha de fin inválida (debe ser futura y dentro de 50 años)");
    }
    if input.name.trim().is_empty() {
        return fail("El campo name no puede estar vacío");
    }
    if !allowed_categories.contains(&input.category) {
        return fail("Categoría inválida");
    }
    if !allowed_statuses.contains(&input.status) || GoalStatus::try_from(input.status.as_str()).is_err() {
        return fail("Estado inválido");
    }
    if !is_known_user(known_users, &input.user) {
        return fail("El usuario que intenta realizar la operación no existe");
    }
    Ok(())
}
