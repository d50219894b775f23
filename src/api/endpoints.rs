/// Aviation weather backend endpoints
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

pub const WEATHER: &str = "/api/weather";
pub const SPECIAL_REPORTS: &str = "/api/special-reports";
pub const FORECAST: &str = "/api/forecast";
pub const HISTORY_SAVE: &str = "/api/history/save";
