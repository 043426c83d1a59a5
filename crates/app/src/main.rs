use std::{io::Write, process::ExitCode};

use clap::Parser;
use engine::{Engine, GoalInput, JsonFileStore, TransactionInput, TransactionKind};
use serde::Serialize;
use serde_json::json;

use cli::{Cli, Command, GoalCommand, TransactionCommand, UserCommand};
use error::{AppError, Result};

mod cli;
mod error;
mod settings;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "alcancia={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir.unwrap_or(settings.storage.data_dir);
    tracing::debug!("using data directory {}", data_dir.display());

    let mut builder = Engine::builder().store(JsonFileStore::new(data_dir));
    if let Some(catalog) = settings.catalog {
        tracing::info!("Found catalog settings...");
        builder = builder.catalog(catalog);
    }
    let engine = builder.build()?;
    engine.ensure_collections()?;

    dispatch(&engine, cli.command)
}

fn dispatch(engine: &Engine<JsonFileStore>, command: Command) -> Result<()> {
    match command {
        Command::Init => print_json(&json!({ "data_dir": engine.store().dir() })),
        Command::User(user) => match user.command {
            UserCommand::Register(args) => {
                let user = engine.register_user(
                    &args.name,
                    &args.password,
                    &args.confirm,
                    args.age,
                    &args.genre,
                )?;
                print_json(&json!({ "id": user.id, "name": user.name }))
            }
            UserCommand::Login(args) => {
                if !engine.login_check(&args.name, &args.password) {
                    return Err(AppError::InvalidCredentials);
                }
                print_json(&json!({ "name": args.name, "authenticated": true }))
            }
        },
        Command::Income(tx) => transactions(engine, TransactionKind::Income, tx.command),
        Command::Expense(tx) => transactions(engine, TransactionKind::Expense, tx.command),
        Command::Goal(goal) => match goal.command {
            GoalCommand::Add(args) => {
                let goal = engine.insert_goal(&GoalInput {
                    id: None,
                    name: args.name,
                    category: args.category,
                    total_amount: args.total,
                    saved_amount: args.saved,
                    end_date: args.end_date,
                    status: args.status,
                    user: args.user,
                })?;
                print_json(&goal)
            }
            GoalCommand::List(args) => print_json(&engine.goals_by_user(&args.user)),
            GoalCommand::Delete(args) => {
                print_json(&json!({ "message": engine.delete_goal(&args.id)? }))
            }
        },
        Command::Savings(args) => print_json(&json!({
            "month": args.month,
            "year": args.year,
            "savings": engine.monthly_savings(&args.user, args.month, args.year),
        })),
        Command::Change(args) => print_json(&json!({
            "change_pct": engine.percent_change(
                &args.user,
                args.from_month,
                args.from_year,
                args.to_month,
                args.to_year,
            ),
        })),
        Command::Distribution(args) => {
            print_json(&engine.expense_distribution(&args.user, args.month, args.year))
        }
        Command::Goals(args) => print_json(&engine.goals_summary(&args.user)),
        Command::Dashboard(args) => print_json(&engine.dashboard_metrics(&args.user)),
    }
}

fn transactions(
    engine: &Engine<JsonFileStore>,
    kind: TransactionKind,
    command: TransactionCommand,
) -> Result<()> {
    match command {
        TransactionCommand::Add(args) => {
            let input = TransactionInput::new(args.amount, &args.category, &args.date, &args.user);
            print_json(&engine.insert_transaction(kind, &input)?)
        }
        TransactionCommand::List(args) => {
            print_json(&engine.transactions_by_user(kind, &args.user))
        }
        TransactionCommand::Delete(args) => {
            print_json(&json!({ "message": engine.delete_transaction(kind, &args.id)? }))
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
