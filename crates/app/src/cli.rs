use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(name = "alcancia")]
#[command(about = "Personal finance tracker: incomes, expenses, savings goals and metrics")]
pub struct Cli {
    /// Settings file path, without extension (TOML).
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
    /// Override the data directory holding the collection files.
    #[arg(long, env = "ALCANCIA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and any missing collection.
    Init,
    User(User),
    Income(Transactions),
    Expense(Transactions),
    Goal(Goals),
    /// Incomes minus expenses of a month.
    Savings(MonthArgs),
    /// Percent change of savings between two months.
    Change(ChangeArgs),
    /// Share of each expense category in a month.
    Distribution(MonthArgs),
    /// Goal progress summary.
    Goals(UserArgs),
    /// Totals, month comparison, goals and distribution at once.
    Dashboard(UserArgs),
}

#[derive(Args, Debug)]
pub struct User {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    Register(RegisterArgs),
    Login(LoginArgs),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, env = "ALCANCIA_PASSWORD")]
    pub password: String,
    #[arg(long)]
    pub confirm: String,
    #[arg(long)]
    pub age: i64,
    /// M, F or X.
    #[arg(long)]
    pub genre: String,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, env = "ALCANCIA_PASSWORD")]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct Transactions {
    #[command(subcommand)]
    pub command: TransactionCommand,
}

#[derive(Subcommand, Debug)]
pub enum TransactionCommand {
    Add(TransactionAddArgs),
    List(UserArgs),
    Delete(IdArgs),
}

#[derive(Args, Debug)]
pub struct TransactionAddArgs {
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub amount: f64,
    #[arg(long)]
    pub category: String,
    /// dd/mm/yyyy
    #[arg(long)]
    pub date: String,
}

#[derive(Args, Debug)]
pub struct Goals {
    #[command(subcommand)]
    pub command: GoalCommand,
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    Add(GoalAddArgs),
    List(UserArgs),
    Delete(IdArgs),
}

#[derive(Args, Debug)]
pub struct GoalAddArgs {
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub total: f64,
    #[arg(long, default_value_t = 0.0)]
    pub saved: f64,
    /// dd/mm/yyyy, in the future.
    #[arg(long)]
    pub end_date: String,
    #[arg(long, default_value = "Iniciado")]
    pub status: String,
}

#[derive(Args, Debug)]
pub struct UserArgs {
    #[arg(long)]
    pub user: String,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    #[arg(long)]
    pub id: String,
}

#[derive(Args, Debug)]
pub struct MonthArgs {
    #[arg(long)]
    pub user: String,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,
    #[arg(long)]
    pub year: i32,
}

#[derive(Args, Debug)]
pub struct ChangeArgs {
    #[arg(long)]
    pub user: String,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub from_month: u32,
    #[arg(long)]
    pub from_year: i32,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub to_month: u32,
    #[arg(long)]
    pub to_year: i32,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_income_add() {
        let cli = Cli::try_parse_from([
            "alcancia", "income", "add", "--user", "ana", "--amount", "1000", "--category",
            "Salario", "--date", "01/03/2024",
        ])
        .unwrap();
        let Command::Income(Transactions {
            command: TransactionCommand::Add(args),
        }) = cli.command
        else {
            panic!("expected income add");
        };
        assert_eq!(args.amount, 1000.0);
        assert_eq!(args.date, "01/03/2024");
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn rejects_month_out_of_range() {
        let parsed = Cli::try_parse_from([
            "alcancia", "savings", "--user", "ana", "--month", "13", "--year", "2024",
        ]);
        assert!(parsed.is_err());
    }
}
