use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder for an absent or unusable upstream value.
pub const PLACEHOLDER: &str = "-";

/// Advisory sentinel meaning "no active advisory".
pub const NO_ADVISORY: &str = "없음";

/// Deserialize a value that might be a string, a number, or null as Option<String>.
/// The scraped payload is not consistent about field types.
fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Str(String),
        Num(serde_json::Number),
        Bool(bool),
        Null,
    }
    match Loose::deserialize(deserializer)? {
        Loose::Str(s) => Ok(Some(s)),
        Loose::Num(n) => Ok(Some(n.to_string())),
        Loose::Bool(b) => Ok(Some(b.to_string())),
        Loose::Null => Ok(None),
    }
}

/// One airport entry as the scraper stored it. Every field is optional and
/// may hold a placeholder ("-", "없음") instead of real data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeatherRecord {
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub temp: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub forecast_12h: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub report: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub rain: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub time: Option<String>,
}

/// A regional weather advisory scraped from the KMA special-report page.
/// `airport` is a free-text region/airport name fragment, not an ICAO code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialReport {
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub airport: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub special_report: Option<String>,
}

/// Response envelope from GET /api/weather.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherEnvelope {
    #[serde(default)]
    pub data: Vec<RawWeatherRecord>,
    #[serde(default)]
    pub special_reports: Vec<SpecialReport>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default)]
    pub last_updated: Option<serde_json::Value>,
}

/// The weather endpoint has served two shapes over time: the envelope above,
/// and (older deployments) the bare record array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WeatherResponse {
    Envelope(WeatherEnvelope),
    Legacy(Vec<RawWeatherRecord>),
}

impl WeatherResponse {
    pub fn into_envelope(self) -> WeatherEnvelope {
        match self {
            WeatherResponse::Envelope(env) => env,
            WeatherResponse::Legacy(data) => WeatherEnvelope {
                data,
                ..WeatherEnvelope::default()
            },
        }
    }
}

/// Weather icon category derived from Korean condition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCode {
    Sunny,
    Cloudy,
    Rain,
    Snow,
    Mist,
    Wind,
    Thunderstorm,
}

impl std::fmt::Display for IconCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IconCode::Sunny => "sunny",
            IconCode::Cloudy => "cloudy",
            IconCode::Rain => "rain",
            IconCode::Snow => "snow",
            IconCode::Mist => "mist",
            IconCode::Wind => "wind",
            IconCode::Thunderstorm => "thunderstorm",
        };
        write!(f, "{}", s)
    }
}

/// Positional label of a 12-hour forecast slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastHour {
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "8h")]
    H8,
    #[serde(rename = "12h")]
    H12,
}

impl std::fmt::Display for ForecastHour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ForecastHour::H4 => "4h",
            ForecastHour::H8 => "8h",
            ForecastHour::H12 => "12h",
        };
        write!(f, "{}", s)
    }
}

/// One slot of the 12-hour forecast strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSlot {
    pub time: ForecastHour,
    pub icon_code: IconCode,
}

/// Current conditions at one airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub condition: String,
    pub temperature: String,
    pub icon_code: IconCode,
}

/// Normalized, display-ready weather entry for one airport.
/// Field names on the wire match the historical snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportWeather {
    pub airport_name: String,
    pub icao: String,
    pub current: CurrentConditions,
    /// Always exactly 3 slots (4h/8h/12h).
    pub forecast_12h: Vec<ForecastSlot>,
    /// Advisory label(s), or "없음" when none apply. Never empty.
    pub advisories: String,
    pub snowfall: String,
    /// Observation time reported by the collector, "-" when missing.
    pub collected_at: String,
}

/// Final pipeline output handed to the caller.
#[derive(Debug, Clone)]
pub struct WeatherResult {
    pub data: Vec<AirportWeather>,
    /// Reconciled display timestamp in KST. Never empty; a placeholder
    /// string covers the not-yet-updated case.
    pub last_updated: String,
    pub special_reports: Vec<SpecialReport>,
    pub warning: Option<String>,
}

/// One day of the detailed per-airport forecast (GET /api/forecast/{icao}).
/// Opaque to the normalization pipeline; rendered as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub forecasts: Vec<HourlyForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyForecast {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub temp: String,
    #[serde(default)]
    pub wind_dir: String,
    #[serde(default)]
    pub wind_speed: String,
    #[serde(default)]
    pub cloud: String,
    #[serde(default)]
    pub visibility: String,
}
