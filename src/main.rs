mod api;
mod config;
mod models;
mod pipeline;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use api::client::AmoApiClient;
use config::AppConfig;
use models::cache::CachedSnapshot;
use models::weather::{AirportWeather, SpecialReport, PLACEHOLDER};
use pipeline::FetchOptions;

#[derive(Parser)]
#[command(name = "amo-weather", about = "Real-time aviation weather for Korean national airports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and display the national airport weather table
    Fetch {
        /// Ask the backend to bypass its staleness window
        #[arg(long)]
        force: bool,
    },
    /// List active special weather reports
    Reports,
    /// Show the multi-day forecast for one airport
    Forecast {
        /// ICAO code, e.g. RKSI
        icao: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amo_weather=info".into()),
        )
        .init();

    // Load .env if present (override system env vars)
    dotenvy::dotenv_override().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let client = AmoApiClient::new(&config)?;

    match cli.command {
        Commands::Fetch { force } => run_fetch(&client, &config, force).await?,
        Commands::Reports => {
            let reports = client.get_special_reports().await?;
            print_reports(&reports);
        }
        Commands::Forecast { icao } => {
            let icao = icao.to_uppercase();
            let days = client.get_forecast(&icao).await?;
            print_forecast(&icao, &days);
        }
    }

    Ok(())
}

/// Run the pipeline and display the result. On failure, fall back to the
/// last-known-good snapshot on disk; the error only propagates when there
/// is nothing cached to show.
async fn run_fetch(client: &AmoApiClient, config: &AppConfig, force: bool) -> Result<()> {
    match pipeline::collect(client, FetchOptions { force }).await {
        Ok(result) => {
            print_weather_table(&result.data, &result.last_updated, result.warning.as_deref());

            let snapshot = CachedSnapshot::from_result(&result);
            if let Err(e) = snapshot.save(Path::new(&config.cache_file)) {
                warn!("Cache write failed: {}", e);
            }

            // Forced refreshes are worth a history snapshot, best effort
            if force && !result.data.is_empty() {
                if let Err(e) = client.save_snapshot(&result.data).await {
                    warn!("History snapshot save failed: {}", e);
                }
            }
        }
        Err(e) => {
            warn!("Weather fetch failed: {}", e);
            match CachedSnapshot::load(Path::new(&config.cache_file))? {
                Some(snapshot) => {
                    println!("\n⚠️  백엔드에 연결할 수 없어 저장된 데이터를 표시합니다. ({})", e);
                    if snapshot.is_stale(config.cache_ttl_secs) {
                        println!("⚠️  저장된 데이터가 오래되었습니다. ({} 저장)", snapshot.saved_at.format("%Y-%m-%d %H:%M UTC"));
                    }
                    print_weather_table(&snapshot.data, &snapshot.last_updated, None);
                }
                None => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn print_weather_table(data: &[AirportWeather], last_updated: &str, warning: Option<&str>) {
    println!("\n✈️  전국 공항 실시간 기상  (갱신 {})", last_updated);
    if let Some(w) = warning {
        println!("⚠️  {}", w);
    }

    println!(
        "\n{:<6} {:<6} {:<12} {:>6} {:<16} {:>6}  {}",
        "공항", "ICAO", "현재날씨", "기온", "특보", "적설", "예보 4h/8h/12h"
    );
    println!("{}", "-".repeat(84));

    for record in data {
        let strip = record
            .forecast_12h
            .iter()
            .map(|slot| slot.icon_code.to_string())
            .collect::<Vec<_>>()
            .join(" / ");
        println!(
            "{:<6} {:<6} {:<12} {:>6} {:<16} {:>6}  {}",
            record.airport_name,
            record.icao,
            truncate(&record.current.condition, 12),
            record.current.temperature,
            truncate(&record.advisories, 16),
            record.snowfall,
            strip,
        );
    }

    println!("\n총 {}개 공항", data.len());
}

fn print_reports(reports: &[SpecialReport]) {
    println!("\n📋 기상특보 현황");
    println!("{:<12} {}", "지역", "특보");
    println!("{}", "-".repeat(40));

    if reports.is_empty() {
        println!("   발효 중인 특보 없음");
        return;
    }
    for report in reports {
        println!(
            "{:<12} {}",
            report.airport.as_deref().unwrap_or(PLACEHOLDER),
            report.special_report.as_deref().unwrap_or(PLACEHOLDER),
        );
    }
    println!("\n총 {}건", reports.len());
}

fn print_forecast(icao: &str, days: &[models::weather::DailyForecast]) {
    println!("\n📅 {} 상세 예보", icao);

    if days.is_empty() {
        println!("   예보 데이터 없음");
        return;
    }

    for day in days {
        println!("\n▸ {}", day.date);
        println!(
            "{:<8} {:<12} {:>6} {:>8} {:>8} {:>8}",
            "시각", "날씨", "기온", "풍향", "풍속", "시정"
        );
        println!("{}", "-".repeat(56));
        for hour in &day.forecasts {
            println!(
                "{:<8} {:<12} {:>6} {:>8} {:>8} {:>8}",
                hour.time,
                truncate(&hour.condition, 12),
                hour.temp,
                hour.wind_dir,
                hour.wind_speed,
                hour.visibility,
            );
        }
    }
}

/// Char-boundary-safe truncation; the table carries Korean text.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("인천", 6), "인천");
        assert_eq!(truncate("대설주의보와 강풍주의보", 6), "대설주의보…");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
