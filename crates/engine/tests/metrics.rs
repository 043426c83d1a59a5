use chrono::NaiveDate;

use engine::{Engine, GoalInput, GoalStatus, MemoryStore, TransactionInput};

fn engine_on(year: i32, month: u32, day: u32) -> Engine<MemoryStore> {
    let engine = Engine::builder()
        .store(MemoryStore::new())
        .today(NaiveDate::from_ymd_opt(year, month, day).unwrap())
        .build()
        .unwrap();
    engine.register_user("ana", "pw", "pw", 30, "F").unwrap();
    engine
}

fn income(engine: &Engine<MemoryStore>, amount: f64, category: &str, date: &str) {
    engine
        .insert_income(&TransactionInput::new(amount, category, date, "ana"))
        .unwrap();
}

fn expense(engine: &Engine<MemoryStore>, amount: f64, category: &str, date: &str) {
    engine
        .insert_expense(&TransactionInput::new(amount, category, date, "ana"))
        .unwrap();
}

fn goal(engine: &Engine<MemoryStore>, name: &str, total: f64, saved: f64) {
    engine
        .insert_goal(&GoalInput {
            id: None,
            name: name.to_string(),
            category: "Otros".to_string(),
            total_amount: total,
            saved_amount: saved,
            end_date: "31/12/2030".to_string(),
            status: "Iniciado".to_string(),
            user: "ana".to_string(),
        })
        .unwrap();
}

#[test]
fn monthly_savings_ignores_other_months() {
    let engine = engine_on(2024, 6, 1);
    income(&engine, 1000.0, "Salario", "05/03/2024");
    expense(&engine, 400.0, "Vivienda", "10/03/2024");
    expense(&engine, 50.0, "Otros", "10/04/2024");

    assert_eq!(engine.monthly_savings("ana", 3, 2024), 600.0);
    assert_eq!(engine.monthly_savings("ana", 4, 2024), -50.0);
    assert_eq!(engine.monthly_savings("ana", 3, 2023), 0.0);
    assert_eq!(engine.monthly_savings("nobody", 3, 2024), 0.0);
}

#[test]
fn monthly_totals_and_all_time_totals() {
    let engine = engine_on(2024, 6, 1);
    income(&engine, 1000.0, "Salario", "05/03/2024");
    income(&engine, 200.0, "Regalo", "20/03/2024");
    income(&engine, 300.0, "Otros", "01/01/2023");
    expense(&engine, 400.0, "Vivienda", "10/03/2024");

    assert_eq!(engine.total_incomes_for_month("ana", 3, 2024), 1200.0);
    assert_eq!(engine.total_expenses_for_month("ana", 3, 2024), 400.0);
    assert_eq!(engine.total_incomes_all_time("ana"), 1500.0);
    assert_eq!(engine.total_expenses_all_time("ana"), 400.0);
}

#[test]
fn percent_change_between_months() {
    let engine = engine_on(2024, 6, 1);
    income(&engine, 200.0, "Salario", "01/01/2024");
    income(&engine, 300.0, "Salario", "01/02/2024");

    assert_eq!(engine.percent_change("ana", 1, 2024, 2, 2024), Some(50.0));
    assert_eq!(engine.percent_change("ana", 2, 2024, 1, 2024).map(|p| p.round()), Some(-33.0));
    assert_eq!(engine.percent_change("ana", 5, 2024, 4, 2024), Some(0.0));
    assert_eq!(engine.percent_change("ana", 5, 2024, 1, 2024), None);
}

#[test]
fn percent_change_uses_absolute_base() {
    let engine = engine_on(2024, 6, 1);
    expense(&engine, 200.0, "Otros", "01/01/2024");
    income(&engine, 100.0, "Salario", "01/02/2024");

    assert_eq!(engine.percent_change("ana", 1, 2024, 2, 2024), Some(150.0));
}

#[test]
fn expense_distribution_sums_to_hundred() {
    let engine = engine_on(2024, 6, 1);
    expense(&engine, 300.0, "Vivienda", "01/05/2024");
    expense(&engine, 100.0, "Transporte", "02/05/2024");
    expense(&engine, 100.0, "Transporte", "03/05/2024");
    expense(&engine, 999.0, "Supermercado", "03/04/2024");

    let shares = engine.expense_distribution("ana", 5, 2024);
    assert_eq!(shares.len(), 2);
    assert_eq!(shares["Vivienda"], 60.0);
    assert_eq!(shares["Transporte"], 40.0);
    let sum: f64 = shares.values().sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn expense_distribution_is_empty_without_expenses() {
    let engine = engine_on(2024, 6, 1);
    income(&engine, 100.0, "Salario", "01/05/2024");
    assert!(engine.expense_distribution("ana", 5, 2024).is_empty());
}

#[test]
fn goals_summary_classifies_by_amounts() {
    let engine = engine_on(2024, 6, 1);
    goal(&engine, "Fondo", 1000.0, 0.0);
    goal(&engine, "Auto", 1000.0, 250.0);
    goal(&engine, "Tele", 800.0, 400.0);

    let summary = engine.goals_summary("ana");
    assert_eq!(summary.total_goals, 3);
    assert_eq!(summary.not_started, 1);
    assert_eq!(summary.in_progress, 2);
    assert_eq!(summary.completed, 0);
    assert_eq!(summary.details[1].progress_pct, 25.0);
    assert_eq!(summary.details[1].status, GoalStatus::InProgress);
    assert_eq!(summary.details[2].progress_pct, 50.0);
}

#[test]
fn goals_summary_for_unknown_user_is_empty() {
    let engine = engine_on(2024, 6, 1);
    goal(&engine, "Fondo", 1000.0, 100.0);
    let summary = engine.goals_summary("bob");
    assert_eq!(summary.total_goals, 0);
    assert!(summary.details.is_empty());
}

#[test]
fn dashboard_compares_current_and_previous_month() {
    let engine = engine_on(2024, 5, 20);
    income(&engine, 1000.0, "Salario", "01/04/2024");
    expense(&engine, 800.0, "Vivienda", "02/04/2024");
    income(&engine, 1000.0, "Salario", "01/05/2024");
    expense(&engine, 600.0, "Vivienda", "03/05/2024");
    expense(&engine, 200.0, "Transporte", "04/05/2024");
    goal(&engine, "Viaje", 1000.0, 500.0);

    let dashboard = engine.dashboard_metrics("ana");
    assert_eq!((dashboard.month, dashboard.year), (5, 2024));
    assert_eq!((dashboard.prev_month, dashboard.prev_year), (4, 2024));
    assert_eq!(dashboard.total_in_all, 2000.0);
    assert_eq!(dashboard.total_out_all, 1600.0);
    assert_eq!(dashboard.savings_all, 400.0);
    assert_eq!(dashboard.total_in, 1000.0);
    assert_eq!(dashboard.total_out, 800.0);
    assert_eq!(dashboard.savings_current, 200.0);
    assert_eq!(dashboard.savings_prev, 200.0);
    assert_eq!(dashboard.change_pct, Some(0.0));
    assert_eq!(dashboard.goals.in_progress, 1);
    assert_eq!(dashboard.expenses_distribution["Vivienda"], 75.0);
    assert_eq!(dashboard.expenses_distribution["Transporte"], 25.0);
}

#[test]
fn dashboard_in_january_looks_at_december() {
    let engine = engine_on(2024, 1, 10);
    income(&engine, 500.0, "Salario", "15/12/2023");
    income(&engine, 250.0, "Salario", "05/01/2024");

    let dashboard = engine.dashboard_metrics("ana");
    assert_eq!((dashboard.month, dashboard.year), (1, 2024));
    assert_eq!((dashboard.prev_month, dashboard.prev_year), (12, 2023));
    assert_eq!(dashboard.savings_prev, 500.0);
    assert_eq!(dashboard.savings_current, 250.0);
    assert_eq!(dashboard.change_pct, Some(-50.0));
}

#[test]
fn dashboard_for_new_user_is_all_zero() {
    let engine = engine_on(2024, 3, 1);
    let dashboard = engine.dashboard_metrics("ana");
    assert_eq!(dashboard.total_in_all, 0.0);
    assert_eq!(dashboard.savings_current, 0.0);
    assert_eq!(dashboard.change_pct, Some(0.0));
    assert_eq!(dashboard.goals.total_goals, 0);
    assert!(dashboard.expenses_distribution.is_empty());
}

#[test]
fn dashboard_serializes_with_dmy_dates() {
    let engine = engine_on(2024, 3, 1);
    goal(&engine, "Viaje", 1000.0, 1.0);
    let json = serde_json::to_value(engine.dashboard_metrics("ana")).unwrap();
    assert_eq!(json["goals"]["details"][0]["end_date"], "31/12/2030");
    assert_eq!(json["goals"]["details"][0]["status"], "En proceso");
    assert!(json["change_pct"].is_number());
}
