use reqwest::Client;
use tracing::debug;

use super::endpoints;
use super::ApiError;
use crate::config::AppConfig;
use crate::models::weather::{
    AirportWeather, DailyForecast, SpecialReport, WeatherEnvelope, WeatherResponse,
};

/// Client for the aviation weather backend (thin CRUD over the scraped
/// snapshot store).
pub struct AmoApiClient {
    http: Client,
    base_url: String,
}

impl AmoApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent("amo-weather/0.1.0")
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the weather snapshot. `force` asks the collector to bypass its
    /// server-side staleness window.
    pub async fn get_weather(&self, force: bool) -> Result<WeatherEnvelope, ApiError> {
        let mut url = format!("{}{}", self.base_url, endpoints::WEATHER);
        if force {
            url.push_str("?force=true");
        }

        debug!("Fetching weather: {}", url);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status,
                message: extract_error_detail(&body)
                    .unwrap_or_else(|| "기상 데이터를 가져오지 못했습니다.".to_string()),
            });
        }

        // The endpoint has served both the envelope and a bare record array
        let body = response.text().await?;
        let parsed: WeatherResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_envelope())
    }

    /// Fetch the standalone advisory list. Used when the weather payload
    /// does not embed its own.
    pub async fn get_special_reports(&self) -> Result<Vec<SpecialReport>, ApiError> {
        let url = format!("{}{}", self.base_url, endpoints::SPECIAL_REPORTS);

        debug!("Fetching special reports: {}", url);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                message: "특보 정보를 가져오지 못했습니다.".to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the detailed multi-day forecast for one airport.
    pub async fn get_forecast(&self, icao: &str) -> Result<Vec<DailyForecast>, ApiError> {
        let url = format!("{}{}/{}", self.base_url, endpoints::FORECAST, icao);

        debug!("Fetching forecast: {}", url);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                message: format!("{} 상세 예보를 가져오지 못했습니다.", icao),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Persist a point-in-time snapshot of the canonical record set.
    pub async fn save_snapshot(&self, records: &[AirportWeather]) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, endpoints::HISTORY_SAVE);

        debug!("Saving snapshot of {} record(s)", records.len());
        let response = self.http.post(&url).json(records).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                message: "스냅샷 저장에 실패했습니다.".to_string(),
            });
        }
        Ok(())
    }
}

/// Pull a human-readable message out of an error body shaped like
/// `{"detail": ...}`, `{"error": ...}`, or `{"message": ...}`.
fn extract_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "error", "message"] {
        match value.get(key) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(v) if !v.is_null() => return Some(v.to_string()),
            _ => {}
        }
    }
    None
}
