//! Terminal host for the date panel.
//!
//! Reads commands from stdin, forwards them to a [`DatePanelState`] and
//! redraws the header and grid after every command.
use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tessera_date_panel::{
    DatePanelConfig, DatePanelState, SelectOutcome, calendar::weekday_from_index,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod command;
mod render;

use command::{Command, HELP};

#[derive(Parser)]
#[command(name = "date-panel")]
#[command(version, about = "Drive a year/month/date panel from the terminal", long_about = None)]
struct Cli {
    /// Panel configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the mode: year, month or date
    #[arg(short, long)]
    mode: Option<String>,
    /// Override the selected value (YYYY-MM-DD)
    #[arg(long)]
    value: Option<String>,
    /// Override the first day of week (0 = Sunday .. 6 = Saturday)
    #[arg(long)]
    first_day_of_week: Option<u8>,
    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn init_tracing() {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match EnvFilter::try_new("off,tessera_date_panel=info") {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("off"),
        },
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<DatePanelConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => DatePanelConfig::default(),
    };
    if let Some(mode) = &cli.mode {
        config.mode = Some(mode.clone());
    }
    if let Some(value) = &cli.value {
        config.value = Some(value.clone());
    }
    if let Some(index) = cli.first_day_of_week {
        weekday_from_index(index)?;
        config.first_day_of_week = Some(index);
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let color = !cli.no_color && io::stdout().is_terminal();

    let args = load_config(&cli)?
        .into_args()?
        .on_change(|date| info!(%date, "selection changed"));
    let mut panel = DatePanelState::from_args(args)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{HELP}\n")?;
    write!(stdout, "{}", render::render(&panel.header(), &panel.table(), color))?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                warn!("{err:#}");
                writeln!(stdout, "error: {err:#}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            Command::Step(direction) => panel.step(direction),
            Command::View(granularity) => {
                panel.switch_view(granularity);
            }
            Command::Mode(mode) => panel.on_mode_changed(mode),
            Command::Value(value) => panel.on_value_changed(value),
            Command::Pick(date) => {
                let Some(cell) = panel.table().find(date).copied() else {
                    writeln!(stdout, "{date} is not on the current grid")?;
                    continue;
                };
                match panel.click_cell(&cell) {
                    SelectOutcome::Changed(date) => {
                        writeln!(stdout, "selected {date}")?;
                        // Feed the emitted value back in as the new prop.
                        panel.on_value_changed(date);
                    }
                    SelectOutcome::Ignored => writeln!(stdout, "{date} is disabled")?,
                    SelectOutcome::DrilledDown { .. } => {}
                }
            }
        }
        write!(stdout, "{}", render::render(&panel.header(), &panel.table(), color))?;
    }
    Ok(())
}
