use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Base of the per-office forecast endpoint.
pub const FORECAST_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast";

pub fn forecast_url(office_code: &str) -> String {
    format!("{FORECAST_URL}/{office_code}.json")
}

/// One day of the forecast: the define timestamp, its weather code, and the
/// verbose text when the payload carries one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: DateTime<FixedOffset>,
    pub weather_code: String,
    pub weather_text: Option<String>,
}

/// The decoded forecast for one office: the first report's first time series,
/// first area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub publishing_office: String,
    pub report_time: DateTime<FixedOffset>,
    pub area_name: String,
    pub days: Vec<DailyForecast>,
}

#[derive(Debug, Deserialize)]
struct JmaReport {
    #[serde(rename = "publishingOffice")]
    publishing_office: String,
    #[serde(rename = "reportDatetime")]
    report_datetime: String,
    #[serde(rename = "timeSeries")]
    time_series: Vec<JmaTimeSeries>,
}

#[derive(Debug, Deserialize)]
struct JmaTimeSeries {
    #[serde(rename = "timeDefines")]
    time_defines: Vec<String>,
    areas: Vec<JmaArea>,
}

// Later series in the same report carry pops or temps instead of weathers,
// so both weather lists must default to empty.
#[derive(Debug, Deserialize)]
struct JmaArea {
    area: JmaAreaName,
    #[serde(rename = "weatherCodes", default)]
    weather_codes: Vec<String>,
    #[serde(default)]
    weathers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JmaAreaName {
    name: String,
}

/// Decode a forecast response body into the public model.
pub fn decode(body: &str) -> Result<Forecast> {
    let reports: Vec<JmaReport> =
        serde_json::from_str(body).context("Failed to parse JMA forecast JSON")?;

    let report = reports
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("JMA forecast response contained no reports"))?;

    let report_time = parse_jma_datetime(&report.report_datetime)?;

    let series = report
        .time_series
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("JMA forecast response contained no time series"))?;

    let area = series
        .areas
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("JMA forecast response contained no area entries"))?;

    let mut days = Vec::with_capacity(series.time_defines.len());
    for (i, define) in series.time_defines.iter().enumerate() {
        let weather_code = area
            .weather_codes
            .get(i)
            .cloned()
            .ok_or_else(|| anyhow!("JMA forecast response had no weather code for {define}"))?;

        days.push(DailyForecast {
            date: parse_jma_datetime(define)?,
            weather_code,
            weather_text: area.weathers.get(i).cloned(),
        });
    }

    Ok(Forecast {
        publishing_office: report.publishing_office,
        report_time,
        area_name: area.area.name,
        days,
    })
}

fn parse_jma_datetime(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Failed to parse JMA timestamp '{value}'"))
}

/// Dates the way the forecast cards show them: `2024年11月20日`.
pub fn format_report_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y年%m月%d日").to_string()
}

/// HTTP client for the per-office forecast endpoint.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
}

impl ForecastClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// GET and decode the forecast for one office code.
    pub async fn fetch(&self, office_code: &str) -> Result<Forecast> {
        let url = forecast_url(office_code);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to JMA (forecast for {office_code})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read JMA forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "JMA forecast request for office {} failed with status {}: {}",
                office_code,
                status,
                truncate_body(&body),
            ));
        }

        decode(&body)
    }
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
