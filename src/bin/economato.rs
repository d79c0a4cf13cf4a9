//! The `economato` command: single-action trigger surface for the daily board update.
//!
//! Credentials and paths come from the environment (see [`pantry_board::config`]);
//! the action to run is the single positional argument. Exit code is 0 on success,
//! 1 when the action fails, 2 when the configuration is incomplete.

use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::{Parser, ValueEnum};

use pantry_board::config::Config;
use pantry_board::state::StateFile;
use pantry_board::traits::DailyEventSource;
use pantry_board::update::DailyUpdate;
use pantry_board::{RemoteBoard, TemplateSource};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Action {
    /// Destructive full refresh for today (skipped if already prepared for today)
    Today,
    /// Smart update for today: converge the list, preserving matching cards
    Smart,
    /// Destructive full refresh for tomorrow
    Tomorrow,
    /// Empty the to-do list unconditionally
    Clean,
    /// Smart update or full refresh (per the persisted smart_mode flag), if due
    Auto,
    /// Card counts per list, whole board
    Status,
    /// Scheduled event counts for the next seven days (template only, no board access)
    Week,
}

#[derive(Parser, Debug)]
#[command(name = "economato", about = "Daily task-board updates for the supply department")]
struct Cli {
    #[arg(value_enum)]
    action: Action,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {}", err);
            std::process::exit(2);
        }
    };

    if let Err(err) = run(cli.action, &config).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(action: Action, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let board = RemoteBoard::new(&config.api_key, &config.token, &config.board_id);
    let source = TemplateSource::new(&config.template_file);
    let mut update = DailyUpdate::new(board, source, &config.todo_list);
    let mut state = StateFile::load(&config.state_file);

    let today = Local::now().date_naive();

    match action {
        Action::Today => {
            if state.update_needed(today) {
                let report = update.refresh(today).await?;
                state.mark_prepared(today);
                println!("List refreshed for {}: {}", today, report);
            } else {
                println!("List is already prepared for {}", today);
            }
        }
        Action::Smart => {
            let report = update.smart_update(today).await?;
            state.mark_prepared(today);
            println!("Smart update for {}: {}", today, report);
            print_errors(&report.errors);
        }
        Action::Tomorrow => {
            let tomorrow = today + Duration::days(1);
            let report = update.refresh(tomorrow).await?;
            state.mark_prepared(tomorrow);
            println!("List prepared for {}: {}", tomorrow, report);
        }
        Action::Clean => {
            let deleted = update.clean().await?;
            state.reset_prepared();
            println!("Deleted {} cards from {:?}", deleted, config.todo_list);
        }
        Action::Auto => {
            if !state.update_needed(today) {
                println!("List is already prepared for {}, nothing to do", today);
                return Ok(());
            }
            let report = if state.state.smart_mode {
                update.smart_update(today).await?
            } else {
                update.refresh(today).await?
            };
            state.mark_prepared(today);
            println!("Automatic update for {}: {}", today, report);
            print_errors(&report.errors);
        }
        Action::Status => {
            println!("Board status:");
            for (name, count) in update.board_status().await? {
                println!("  {:30} {:3} cards", name, count);
            }
        }
        Action::Week => {
            print_week(update.source(), today).await?;
        }
    }

    Ok(())
}

fn print_errors(errors: &[pantry_board::reconciler::ApplyError]) {
    for error in errors {
        eprintln!("  failed: {}", error);
    }
}

async fn print_week(
    source: &TemplateSource,
    from: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Scheduled events for the next 7 days:");
    for offset in 0..7 {
        let date = from + Duration::days(offset);
        let events = source.events_for_date(date).await?;
        let total: usize = events.values().map(|titles| titles.len()).sum();
        println!("  {} ({:?}): {} events", date, date.weekday(), total);
        for (calendar, titles) in &events {
            println!("    {:20} {}", calendar, titles.len());
        }
    }
    Ok(())
}
