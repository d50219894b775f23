use crate::models::weather::{ForecastHour, ForecastSlot, IconCode, PLACEHOLDER};

use super::classify::classify;

const SLOT_HOURS: [ForecastHour; 3] = [ForecastHour::H4, ForecastHour::H8, ForecastHour::H12];

/// Parse the scraped 12-hour forecast string ("맑음 > 흐림 > 비") into the
/// fixed 4h/8h/12h slots. Labels are positional; the input carries no real
/// time offsets.
///
/// Always returns exactly 3 slots. Missing, placeholder, or delimiter-free
/// input yields the all-sunny default.
pub fn parse_forecast(raw: Option<&str>) -> Vec<ForecastSlot> {
    let default = || {
        SLOT_HOURS
            .iter()
            .map(|&time| ForecastSlot {
                time,
                icon_code: IconCode::Sunny,
            })
            .collect::<Vec<_>>()
    };

    let raw = match raw {
        Some(s) => s.trim(),
        None => return default(),
    };
    if raw.is_empty() || raw == PLACEHOLDER || !raw.contains('>') {
        return default();
    }

    let segments: Vec<&str> = raw.split('>').map(str::trim).collect();
    SLOT_HOURS
        .iter()
        .enumerate()
        .map(|(i, &time)| ForecastSlot {
            time,
            icon_code: classify(segments.get(i).copied().unwrap_or("")),
        })
        .collect()
}
