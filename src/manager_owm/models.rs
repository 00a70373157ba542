use serde::Deserialize;

/// One complete forecast payload: a chronologically ordered sample list
/// plus the location metadata block. Read-only once parsed.
#[derive(Deserialize, Debug, Clone)]
pub struct WeatherData {
    #[serde(default)]
    pub list: Vec<Sample>,
    pub city: City,
}

/// One 3-hour forecast reading. Every display-relevant field is optional
/// at the parse boundary; fallbacks are applied at conversion time, never
/// here.
#[derive(Deserialize, Debug, Clone)]
pub struct Sample {
    pub dt: i64,
    #[serde(default)]
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub clouds: Option<Clouds>,
    pub wind: Option<Wind>,
    pub visibility: Option<f64>,
    pub pop: Option<f64>,
    pub dt_txt: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct MainReadings {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: Option<u32>,
    pub humidity: Option<u8>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Condition {
    pub id: Option<u32>,
    pub main: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Clouds {
    pub all: Option<u8>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Wind {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
    pub gust: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct City {
    pub name: Option<String>,
    pub coord: Option<Coord>,
    pub country: Option<String>,
    pub timezone: Option<i32>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}
