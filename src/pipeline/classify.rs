use crate::models::weather::IconCode;

/// Korean lexical markers checked in priority order; first hit wins.
const MARKERS: &[(&[&str], IconCode)] = &[
    (&["맑음"], IconCode::Sunny),
    (&["흐림", "구름"], IconCode::Cloudy),
    (&["비"], IconCode::Rain),
    (&["눈"], IconCode::Snow),
    (&["박무", "안개", "연무"], IconCode::Mist),
    (&["낙뢰", "번개"], IconCode::Thunderstorm),
];

/// Map free-text Korean condition description to an icon category.
///
/// Checks run top to bottom, so a string carrying both "맑음" and "비"
/// classifies as sunny. That matches the upstream display behavior and is
/// deliberately left as-is.
pub fn classify(condition: &str) -> IconCode {
    for (words, code) in MARKERS {
        if words.iter().any(|w| condition.contains(w)) {
            return *code;
        }
    }
    IconCode::Sunny
}
