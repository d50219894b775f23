use crate::models::weather::AirportWeather;

/// Canonical display order: geographic/administrative, Incheon first.
const SORT_ORDER: [&str; 15] = [
    "RKSI", "RKSS", "RKPC", "RKPK", "RKTU", "RKTN", "RKPU", "RKJB", "RKJJ", "RKJY", "RKNY", "RKPS",
    "RKTH", "RKJK", "RKNW",
];

/// Sink value for codes outside the fixed list.
const UNKNOWN_RANK: usize = 999;

fn rank(icao: &str) -> usize {
    SORT_ORDER
        .iter()
        .position(|&code| code == icao)
        .unwrap_or(UNKNOWN_RANK)
}

/// Order records by the fixed priority list. Unknown codes sink to the end,
/// keeping their relative input order (the sort is stable).
pub fn sort_records(mut records: Vec<AirportWeather>) -> Vec<AirportWeather> {
    records.sort_by_key(|r| rank(&r.icao));
    records
}
