use crate::models::weather::{RawWeatherRecord, SpecialReport};

/// Remove the facility suffix from a scraped airport name ("인천공항" → "인천").
pub fn strip_facility_suffix(name: &str) -> String {
    name.replace("공항", "").trim().to_string()
}

/// Find the advisory covering an airport, if any.
///
/// The advisory list carries free-text region names, so matching is
/// bidirectional substring containment between the suffix-stripped airport
/// name and the report's `airport` fragment. First match in list order wins;
/// the list order is whatever the scraper produced.
pub fn match_advisory<'a>(
    record: &RawWeatherRecord,
    reports: &'a [SpecialReport],
) -> Option<&'a SpecialReport> {
    let name = strip_facility_suffix(record.name.as_deref()?);
    if name.is_empty() {
        return None;
    }

    reports.iter().find(|report| {
        report
            .airport
            .as_deref()
            .map(|fragment| {
                let fragment = fragment.trim();
                !fragment.is_empty() && (name.contains(fragment) || fragment.contains(&name))
            })
            .unwrap_or(false)
    })
}
