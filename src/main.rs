mod config;
mod display;
mod error;
mod form;
mod parser;
mod schedule;
mod web;

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Settings;
use display::{plan_json, print_allocation, write_schedule_to_file};
use form::export_schedule_to_csv;
use parser::load_workers;
use schedule::CoverageReport;

#[derive(Parser)]
#[command(name = "shift-roster", about = "Weekly shift roster builder")]
struct Cli {
    /// JSON settings file (calendar, staffing rules, daily cap)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web form
    Serve {
        #[arg(long, env = "ROSTER_PORT", default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
    /// Build a schedule from a CSV roster (name,hours)
    Plan {
        roster: PathBuf,
        /// Also write the text schedule to this file
        #[arg(long)]
        output: Option<String>,
        /// Also export the schedule as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print roster, coverage and commit log as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { port, bind } => {
            web::start_server(&bind, port, settings).await?;
        }
        Command::Plan { roster, output, csv, json } => {
            let workers = load_workers(&roster)?;
            tracing::info!(workers = workers.len(), path = %roster.display(), "loaded roster");

            let allocation = settings.allocate(&workers);
            let report = CoverageReport::build(&allocation, &settings.calendar, &settings.staffing);

            if json {
                println!("{}", serde_json::to_string_pretty(&plan_json(&allocation, &report))?);
            } else {
                print_allocation(&allocation, &report);
            }

            if let Some(path) = output {
                write_schedule_to_file(&allocation.grid, &path)?;
                println!("Schedule saved to {}", path);
            }
            if let Some(path) = csv {
                export_schedule_to_csv(&allocation.grid, &path)?;
                println!("CSV saved to {}", path.display());
            }
        }
    }

    Ok(())
}
