use std::fmt;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select};
use jma_core::{Config, area, codes, forecast};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "jma", version, about = "JMA weather forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download the area table and refresh the local cache.
    Update,

    /// List forecast centers and the offices under them.
    Areas,

    /// Set the default forecast office, interactively when no code is given.
    Configure {
        /// Office code, e.g. "130000" for 東京都.
        office: Option<String>,
    },

    /// Show the forecast for an office.
    Show {
        /// Office code; falls back to the configured default.
        office: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Update => update().await,
            Command::Areas => areas().await,
            Command::Configure { office } => configure(office).await,
            Command::Show { office } => show(office).await,
        }
    }
}

async fn update() -> Result<()> {
    let (table, body) = area::fetch_area_table().await?;
    let path = area::save_cache(&body)?;

    println!(
        "Cached {} centers and {} offices at {}",
        table.centers.len(),
        table.offices.len(),
        path.display()
    );

    Ok(())
}

async fn areas() -> Result<()> {
    let table = area::load_or_fetch().await?;

    for (code, center) in &table.centers {
        println!("{code} {} ({})", center.name, center.en_name);
        for (office_code, office) in table.offices_of(center) {
            println!("  {office_code} {} ({})", office.name, office.en_name);
        }
    }

    Ok(())
}

async fn configure(office: Option<String>) -> Result<()> {
    let table = area::load_or_fetch().await?;

    let code = match office {
        Some(code) => code,
        None => match pick_office(&table)? {
            Some(code) => code,
            None => return Ok(()),
        },
    };

    let office = table.office(&code).ok_or_else(|| {
        anyhow!(
            "Unknown office code '{code}'.\n\
             Hint: run `jma areas` to list the valid codes."
        )
    })?;

    let mut config = Config::load()?;
    config.set_default_office(&code);
    config.save()?;

    let center = table
        .centers
        .get(&office.parent)
        .map(|center| format!(" in {}", center.name))
        .unwrap_or_default();

    println!(
        "Default office set to {code} {} ({}){center}.",
        office.name, office.en_name
    );

    Ok(())
}

async fn show(office: Option<String>) -> Result<()> {
    let table = area::load_or_fetch().await?;
    let config = Config::load()?;

    let code = match office {
        Some(code) => code,
        // No argument: use the configured default, or fall back to the
        // interactive picker. A cancelled pick surfaces the config hint.
        None => match config.default_office_code() {
            Ok(code) => code.to_string(),
            Err(err) => match pick_office(&table)? {
                Some(code) => code,
                None => return Err(err),
            },
        },
    };

    if table.office(&code).is_none() {
        return Err(anyhow!(
            "Unknown office code '{code}'.\n\
             Hint: run `jma areas` to list the valid codes."
        ));
    }

    let report = forecast::ForecastClient::new().fetch(&code).await?;

    println!(
        "Forecast for {}, published by {} on {}",
        report.area_name,
        report.publishing_office,
        forecast::format_report_date(&report.report_time)
    );

    for day in &report.days {
        println!();
        println!("{}", render_day(day));
    }

    Ok(())
}

/// Two-step selection mirroring the area list: a center first, then one of
/// its offices. `Ok(None)` means the prompt was cancelled.
fn pick_office(table: &area::AreaTable) -> Result<Option<String>> {
    let centers: Vec<Choice> = table
        .centers
        .iter()
        .map(|(code, center)| Choice {
            code: code.clone(),
            label: center.name.clone(),
        })
        .collect();

    let center = match prompt("Forecast center:", centers)? {
        Some(choice) => choice,
        None => return Ok(None),
    };

    let offices: Vec<Choice> = table
        .centers
        .get(&center.code)
        .map(|center| table.offices_of(center))
        .unwrap_or_default()
        .into_iter()
        .map(|(code, office)| Choice {
            code: code.to_string(),
            label: format!("{} ({})", office.name, office.en_name),
        })
        .collect();

    if offices.is_empty() {
        return Err(anyhow!(
            "Center {} lists no offices in the area table.\n\
             Hint: run `jma update` to refresh the cache.",
            center.code
        ));
    }

    let office = match prompt("Forecast office:", offices)? {
        Some(choice) => choice,
        None => return Ok(None),
    };

    Ok(Some(office.code))
}

fn prompt(message: &str, options: Vec<Choice>) -> Result<Option<Choice>> {
    match Select::new(message, options).prompt() {
        Ok(choice) => Ok(Some(choice)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// One selectable row: an area code plus its display label.
struct Choice {
    code: String,
    label: String,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.label)
    }
}

/// One forecast card: the date, icon + label, the verbose text when the
/// payload carries one, and the raw code.
fn render_day(day: &forecast::DailyForecast) -> String {
    let mut lines = vec![
        forecast::format_report_date(&day.date),
        format!(
            "{} {}",
            codes::weather_icon(&day.weather_code),
            codes::describe(&day.weather_code)
        ),
    ];

    if let Some(text) = &day.weather_text {
        lines.push(format!("天気: {text}"));
    }
    lines.push(format!("天気コード: {}", day.weather_code));

    lines.join("\n")
}
