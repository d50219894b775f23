use crate::models::weather::{
    AirportWeather, CurrentConditions, RawWeatherRecord, SpecialReport, NO_ADVISORY, PLACEHOLDER,
};

use super::advisory::strip_facility_suffix;
use super::classify::classify;
use super::forecast::parse_forecast;

/// Canonical display name per ICAO code. Overrides the scraped facility name
/// where the site uses compound names ("포항경주" → "포항").
fn display_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "RKSI" => "인천",
        "RKSS" => "김포",
        "RKPC" => "제주",
        "RKPK" => "김해",
        "RKTU" => "청주",
        "RKTN" => "대구",
        "RKPU" => "울산",
        "RKJB" => "무안",
        "RKJJ" => "광주",
        "RKJY" => "여수",
        "RKNY" => "양양",
        "RKPS" => "사천",
        "RKTH" => "포항",
        "RKJK" => "군산",
        "RKNW" => "원주",
        _ => return None,
    };
    Some(name)
}

/// Trimmed text, or the "-" placeholder when absent/blank.
fn text_or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Strip a trailing unit marker ("℃", "cm", "mm") and surrounding whitespace.
/// Keeps the placeholder untouched.
fn strip_unit(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed == PLACEHOLDER {
        return trimmed.to_string();
    }
    trimmed
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '℃' || c == '°')
        .trim()
        .to_string()
}

fn usable(label: &str) -> bool {
    !label.is_empty() && label != PLACEHOLDER
}

/// Build one canonical record from a raw scraped record and its resolved
/// advisory. Pure; every field falls back to a sentinel rather than failing.
pub fn normalize(raw: &RawWeatherRecord, advisory: Option<&SpecialReport>) -> AirportWeather {
    let icao = raw.code.as_deref().unwrap_or("").trim().to_string();

    let airport_name = match display_name(&icao) {
        Some(name) => name.to_string(),
        None => strip_facility_suffix(raw.name.as_deref().unwrap_or("")),
    };

    let condition = text_or_placeholder(raw.condition.as_deref());

    let temperature = match raw.temp.as_deref().map(strip_unit) {
        Some(t) if !t.is_empty() => t,
        _ => PLACEHOLDER.to_string(),
    };

    // Advisory text: matched report first, then the record's own inline
    // report, then the "none" sentinel. Never empty.
    let matched_label = advisory
        .and_then(|r| r.special_report.as_deref())
        .map(str::trim)
        .filter(|label| usable(label));
    let inline_label = raw
        .report
        .as_deref()
        .map(str::trim)
        .filter(|label| usable(label));
    let advisories = matched_label
        .or(inline_label)
        .unwrap_or(NO_ADVISORY)
        .to_string();

    let snowfall = match raw.rain.as_deref().map(strip_unit) {
        Some(s) if !s.is_empty() => s,
        _ => PLACEHOLDER.to_string(),
    };

    AirportWeather {
        airport_name,
        icao,
        current: CurrentConditions {
            icon_code: classify(raw.condition.as_deref().unwrap_or("")),
            condition,
            temperature,
        },
        forecast_12h: parse_forecast(raw.forecast_12h.as_deref()),
        advisories,
        snowfall,
        collected_at: text_or_placeholder(raw.time.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weather::IconCode;

    fn full_record() -> RawWeatherRecord {
        RawWeatherRecord {
            name: Some("포항경주공항".to_string()),
            code: Some("RKTH".to_string()),
            condition: Some("흐림".to_string()),
            temp: Some(" -1.2℃ ".to_string()),
            forecast_12h: Some("흐림 > 비 > 비".to_string()),
            report: Some("-".to_string()),
            rain: Some("0.5cm".to_string()),
            time: Some("14:00".to_string()),
        }
    }

    #[test]
    fn test_full_record() {
        let out = normalize(&full_record(), None);
        assert_eq!(out.airport_name, "포항");
        assert_eq!(out.icao, "RKTH");
        assert_eq!(out.current.condition, "흐림");
        assert_eq!(out.current.temperature, "-1.2");
        assert_eq!(out.current.icon_code, IconCode::Cloudy);
        assert_eq!(out.forecast_12h.len(), 3);
        assert_eq!(out.forecast_12h[1].icon_code, IconCode::Rain);
        assert_eq!(out.advisories, NO_ADVISORY);
        assert_eq!(out.snowfall, "0.5");
        assert_eq!(out.collected_at, "14:00");
    }

    #[test]
    fn test_empty_record_degrades_to_sentinels() {
        let out = normalize(&RawWeatherRecord::default(), None);
        assert_eq!(out.airport_name, "");
        assert_eq!(out.icao, "");
        assert_eq!(out.current.condition, PLACEHOLDER);
        assert_eq!(out.current.temperature, PLACEHOLDER);
        assert_eq!(out.current.icon_code, IconCode::Sunny);
        assert_eq!(out.forecast_12h.len(), 3);
        assert_eq!(out.advisories, NO_ADVISORY);
        assert_eq!(out.snowfall, PLACEHOLDER);
        assert_eq!(out.collected_at, PLACEHOLDER);
    }

    #[test]
    fn test_name_suffix_strip_without_override() {
        let raw = RawWeatherRecord {
            name: Some("울진공항".to_string()),
            code: Some("RKTL".to_string()),
            ..RawWeatherRecord::default()
        };
        assert_eq!(normalize(&raw, None).airport_name, "울진");
    }

    #[test]
    fn test_matched_advisory_takes_precedence() {
        let mut raw = full_record();
        raw.report = Some("강풍주의보".to_string());
        let advisory = SpecialReport {
            airport: Some("포항".to_string()),
            special_report: Some("대설경보".to_string()),
        };
        assert_eq!(normalize(&raw, Some(&advisory)).advisories, "대설경보");
    }

    #[test]
    fn test_inline_report_fallback() {
        let mut raw = full_record();
        raw.report = Some("태풍주의보".to_string());
        // Matched report carrying the placeholder falls through to the inline one
        let advisory = SpecialReport {
            airport: Some("포항".to_string()),
            special_report: Some("-".to_string()),
        };
        assert_eq!(normalize(&raw, Some(&advisory)).advisories, "태풍주의보");
        assert_eq!(normalize(&raw, None).advisories, "태풍주의보");
    }

    #[test]
    fn test_advisories_never_empty() {
        let mut raw = full_record();
        raw.report = Some("   ".to_string());
        let out = normalize(&raw, None);
        assert_eq!(out.advisories, NO_ADVISORY);
    }

    #[test]
    fn test_unit_stripping() {
        assert_eq!(strip_unit("3.2 mm"), "3.2");
        assert_eq!(strip_unit("-1.2℃"), "-1.2");
        assert_eq!(strip_unit("12°C"), "12");
        assert_eq!(strip_unit("-"), "-");
        assert_eq!(strip_unit("  7  "), "7");
    }
}
