pub mod advisory;
pub mod classify;
pub mod forecast;
pub mod normalize;
pub mod sort;
pub mod timestamp;

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::api::client::AmoApiClient;
use crate::api::ApiError;
use crate::models::weather::{AirportWeather, SpecialReport, WeatherEnvelope, WeatherResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Ask the backend to bypass its staleness window.
    pub force: bool,
}

/// Fetch one raw payload and run the full normalization pipeline over it.
///
/// The weather set and the advisory set are fetched concurrently and joined
/// before normalization. A weather failure is the caller's problem (typed
/// error, fall back to your own cache); a standalone advisory failure only
/// degrades to "no advisories".
pub async fn collect(client: &AmoApiClient, opts: FetchOptions) -> Result<WeatherResult, ApiError> {
    let (weather, reports) = tokio::join!(client.get_weather(opts.force), client.get_special_reports());

    let envelope = weather?;
    let fallback_reports = match reports {
        Ok(list) => list,
        Err(e) => {
            warn!("Special report fetch failed: {}", e);
            Vec::new()
        }
    };

    if envelope.cached {
        debug!("Backend served its cached snapshot");
    }

    let result = assemble(envelope, fallback_reports);
    info!(
        "Collected {} airport record(s), {} special report(s)",
        result.data.len(),
        result.special_reports.len()
    );
    Ok(result)
}

/// Pure assembly step: raw payload in, canonical result out. No I/O.
///
/// Advisory source is the envelope's embedded list when present, otherwise
/// the separately fetched one. Records sharing an ICAO code collapse to the
/// last seen, keeping the first occurrence's position.
pub fn assemble(envelope: WeatherEnvelope, fallback_reports: Vec<SpecialReport>) -> WeatherResult {
    let WeatherEnvelope {
        data: raw_records,
        special_reports,
        error,
        last_updated,
        ..
    } = envelope;

    let reports = if special_reports.is_empty() {
        fallback_reports
    } else {
        special_reports
    };

    let mut records: Vec<AirportWeather> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for raw in &raw_records {
        let matched = advisory::match_advisory(raw, &reports);
        let record = normalize::normalize(raw, matched);

        // Records without a code are degenerate but kept; only real codes
        // participate in last-wins dedup.
        if record.icao.is_empty() {
            records.push(record);
            continue;
        }
        match seen.get(&record.icao) {
            Some(&i) => records[i] = record,
            None => {
                seen.insert(record.icao.clone(), records.len());
                records.push(record);
            }
        }
    }

    WeatherResult {
        data: sort::sort_records(records),
        last_updated: timestamp::reconcile(last_updated.as_ref()),
        special_reports: reports,
        warning: error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weather::{RawWeatherRecord, NO_ADVISORY};
    use serde_json::json;

    const CODES: [&str; 15] = [
        "RKSI", "RKSS", "RKPC", "RKPK", "RKTU", "RKTN", "RKPU", "RKJB", "RKJJ", "RKJY", "RKNY",
        "RKPS", "RKTH", "RKJK", "RKNW",
    ];

    fn raw(name: &str, code: &str) -> RawWeatherRecord {
        RawWeatherRecord {
            name: Some(format!("{}공항", name)),
            code: Some(code.to_string()),
            condition: Some("맑음".to_string()),
            temp: Some("3℃".to_string()),
            forecast_12h: Some("맑음 > 흐림 > 비".to_string()),
            ..RawWeatherRecord::default()
        }
    }

    fn report(airport: &str, label: &str) -> SpecialReport {
        SpecialReport {
            airport: Some(airport.to_string()),
            special_report: Some(label.to_string()),
        }
    }

    #[test]
    fn test_end_to_end_batch() {
        let names = [
            "인천", "김포", "제주", "김해", "청주", "대구", "울산", "무안", "광주", "여수",
            "양양", "사천", "포항경주", "군산", "원주",
        ];
        let mut data: Vec<RawWeatherRecord> = names
            .iter()
            .zip(CODES.iter())
            .map(|(&name, &code)| raw(name, code))
            .collect();
        // Scramble input order
        data.reverse();
        data.swap(2, 9);

        let envelope = WeatherEnvelope {
            data,
            special_reports: vec![report("제주", "강풍경보"), report("양양", "대설주의보")],
            last_updated: Some(json!("2026-02-05T07:30:00Z")),
            ..WeatherEnvelope::default()
        };

        let result = assemble(envelope, Vec::new());
        assert_eq!(result.data.len(), 15);

        let order: Vec<&str> = result.data.iter().map(|r| r.icao.as_str()).collect();
        assert_eq!(order, CODES.to_vec());

        let flagged: Vec<&str> = result
            .data
            .iter()
            .filter(|r| r.advisories != NO_ADVISORY)
            .map(|r| r.icao.as_str())
            .collect();
        assert_eq!(flagged, vec!["RKPC", "RKNY"]);

        assert!(result.data.iter().all(|r| r.forecast_12h.len() == 3));
        assert_eq!(result.last_updated, "26.2.5. 16:30");
        assert_eq!(result.warning, None);
    }

    #[test]
    fn test_duplicate_icao_last_wins() {
        let mut second = raw("인천", "RKSI");
        second.condition = Some("흐림".to_string());
        let envelope = WeatherEnvelope {
            data: vec![raw("인천", "RKSI"), raw("김포", "RKSS"), second],
            ..WeatherEnvelope::default()
        };

        let result = assemble(envelope, Vec::new());
        assert_eq!(result.data.len(), 2);
        // Survivor keeps the first occurrence's slot but carries the later data
        assert_eq!(result.data[0].icao, "RKSI");
        assert_eq!(result.data[0].current.condition, "흐림");
    }

    #[test]
    fn test_embedded_reports_preferred() {
        let envelope = WeatherEnvelope {
            data: vec![raw("인천", "RKSI")],
            special_reports: vec![report("인천", "한파주의보")],
            ..WeatherEnvelope::default()
        };
        let fallback = vec![report("인천", "옛날특보")];

        let result = assemble(envelope, fallback);
        assert_eq!(result.data[0].advisories, "한파주의보");
        assert_eq!(result.special_reports.len(), 1);
    }

    #[test]
    fn test_fallback_reports_used_when_envelope_empty() {
        let envelope = WeatherEnvelope {
            data: vec![raw("인천", "RKSI")],
            ..WeatherEnvelope::default()
        };
        let fallback = vec![report("인천", "대설경보")];

        let result = assemble(envelope, fallback);
        assert_eq!(result.data[0].advisories, "대설경보");
    }

    #[test]
    fn test_upstream_warning_carried() {
        let envelope = WeatherEnvelope {
            error: Some("갱신은 10분마다 가능합니다.".to_string()),
            ..WeatherEnvelope::default()
        };
        let result = assemble(envelope, Vec::new());
        assert!(result.data.is_empty());
        assert_eq!(result.warning.as_deref(), Some("갱신은 10분마다 가능합니다."));
        assert_eq!(result.last_updated, timestamp::UPDATING);
    }
}
