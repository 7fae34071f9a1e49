use clap::Parser;
use menu_sheets::{cli, config, error, logging};
use menu_sheets_common::{ErrorReport, MenuReport};
use cli::Cli;
use config::Config;
use error::Result;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            let json = if cli.pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            };
            match json {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => fail(&e.to_string()),
            }
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn run(cli: &Cli) -> Result<MenuReport> {
    let config = Config::load()?.merge_cli(cli.spreadsheet_id.clone(), cli.credentials.clone());

    let today = chrono::Local::now().date_naive();
    let date = menu_sheets::target_date(cli.date.as_deref(), cli.year, today)?;
    tracing::debug!("target date {}", date);

    let mut source = menu_sheets::open_source(&config)?;
    tracing::debug!("source: {}", source.name());

    menu_sheets::fetch_report(source.as_mut(), date)
}

fn fail(message: &str) -> ExitCode {
    tracing::debug!("failed: {}", message);
    let report = ErrorReport::new(message);
    let json = serde_json::to_string(&report)
        .unwrap_or_else(|_| format!("{{\"error\": {:?}, \"success\": false}}", message));
    eprintln!("{}", json);
    ExitCode::FAILURE
}
