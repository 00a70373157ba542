use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;
use crate::manager_owm::models::{City, Sample, WeatherData};
use crate::partition::partition;
use crate::units::{format_celsius, meters_to_km, mps_to_kmph};

/// Default used when the location metadata carries no sunrise/sunset.
/// Taken from the upstream sample payload.
const FALLBACK_EPOCH: i64 = 1702517657;

/// Default icon identifier when a sample has no condition block.
const FALLBACK_ICON: &str = "01d";

/// The three states the presentation layer can observe. A fresh fetch
/// always starts from `Loading` and ends in exactly one of the others.
#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Error { reason: String },
    Ready(ForecastView),
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Loading
    }
}

/// Everything the presentation layer needs, with all units already
/// converted. Recomputed in full from each payload; holds no state of
/// its own.
#[derive(Serialize, Debug, PartialEq)]
pub struct ForecastView {
    pub location: String,
    pub country: String,
    pub current: Option<CurrentConditions>,
    pub hourly: Vec<IntradayEntry>,
    pub daily: Vec<DailyRow>,
}

/// The "now" display, taken from the first sample of the series.
#[derive(Serialize, Debug, PartialEq)]
pub struct CurrentConditions {
    pub day: String,
    pub date: String,
    pub temp: String,
    pub feels_like: String,
    pub temp_min: String,
    pub temp_max: String,
    pub description: String,
    pub icon: String,
    pub humidity: String,
    pub pressure: String,
    pub visibility: String,
    pub wind_speed: String,
    pub sunrise: String,
    pub sunset: String,
}

/// One cell of the intraday strip. The strip shows the full series,
/// unfiltered.
#[derive(Serialize, Debug, PartialEq)]
pub struct IntradayEntry {
    pub time: String,
    pub icon: String,
    pub temp: String,
}

/// One row of the daily forecast. `summary` is None when the day has no
/// representative sample; the row itself is never dropped so the caller
/// can render a placeholder.
#[derive(Serialize, Debug, PartialEq)]
pub struct DailyRow {
    pub date: String,
    pub day: String,
    pub summary: Option<DailySummary>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct DailySummary {
    pub temp: String,
    pub feels_like: String,
    pub temp_min: String,
    pub temp_max: String,
    pub description: String,
    pub icon: String,
    pub humidity: String,
    pub pressure: String,
    pub visibility: String,
    pub wind_speed: String,
    pub sunrise: String,
    pub sunset: String,
}

fn local_offset(city: &City) -> FixedOffset {
    FixedOffset::east_opt(city.timezone.unwrap_or(0)).unwrap_or_else(|| Utc.fix())
}

fn local_time(dt: i64, offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::from_timestamp(dt, 0).unwrap().with_timezone(&offset)
}

/// Formats an epoch second as a local wall-clock label, e.g. "6:43".
/// Sunrise and sunset go through here on every display path.
fn clock_label(epoch: Option<i64>, offset: FixedOffset) -> String {
    local_time(epoch.unwrap_or(FALLBACK_EPOCH), offset)
        .format("%-H:%M")
        .to_string()
}

fn description_of(sample: &Sample) -> String {
    sample.weather.first()
        .and_then(|c| c.description.clone())
        .unwrap_or_default()
}

fn icon_of(sample: &Sample) -> String {
    sample.weather.first()
        .and_then(|c| c.icon.clone())
        .unwrap_or_else(|| FALLBACK_ICON.to_string())
}

fn humidity_label(humidity: Option<u8>) -> String {
    format!("{}%", humidity.unwrap_or(0))
}

fn pressure_label(pressure: Option<u32>) -> String {
    format!("{} hPa", pressure.unwrap_or(0))
}

fn wind_of(sample: &Sample) -> String {
    mps_to_kmph(sample.wind.as_ref().and_then(|w| w.speed))
}

/// Derives the complete display view from one forecast payload.
///
/// Pure function of its input; running it twice on the same payload
/// yields the same view. An empty sample list produces empty strip and
/// daily lists with no current conditions, which is a valid view, not
/// an error.
///
/// # Arguments
///
/// * 'data' - the full forecast payload for one location
pub fn assemble(data: &WeatherData) -> ForecastView {
    let offset = local_offset(&data.city);
    let sunrise = clock_label(data.city.sunrise, offset);
    let sunset = clock_label(data.city.sunset, offset);

    let current = data.list.first().map(|sample| {
        let at = local_time(sample.dt, offset);
        CurrentConditions {
            day: at.format("%A").to_string(),
            date: at.format("%d.%m.%Y").to_string(),
            temp: format_celsius(sample.main.temp),
            feels_like: format_celsius(sample.main.feels_like),
            temp_min: format_celsius(sample.main.temp_min),
            temp_max: format_celsius(sample.main.temp_max),
            description: description_of(sample),
            icon: icon_of(sample),
            humidity: humidity_label(sample.main.humidity),
            pressure: pressure_label(sample.main.pressure),
            visibility: meters_to_km(sample.visibility),
            wind_speed: wind_of(sample),
            sunrise: sunrise.clone(),
            sunset: sunset.clone(),
        }
    });

    let hourly = data.list.iter()
        .map(|sample| IntradayEntry {
            time: local_time(sample.dt, offset).format("%-I:%M %p").to_string(),
            icon: icon_of(sample),
            temp: format_celsius(sample.main.temp),
        })
        .collect();

    let daily = partition(&data.list).into_iter()
        .map(|(date, rep)| DailyRow {
            date: date.format("%d.%m").to_string(),
            day: date.format("%A").to_string(),
            summary: rep.map(|sample| DailySummary {
                temp: format_celsius(sample.main.temp),
                feels_like: format_celsius(sample.main.feels_like),
                temp_min: format_celsius(sample.main.temp_min),
                temp_max: format_celsius(sample.main.temp_max),
                description: description_of(sample),
                icon: icon_of(sample),
                humidity: humidity_label(sample.main.humidity),
                pressure: pressure_label(sample.main.pressure),
                visibility: meters_to_km(sample.visibility),
                wind_speed: wind_of(sample),
                sunrise: sunrise.clone(),
                sunset: sunset.clone(),
            }),
        })
        .collect();

    ForecastView {
        location: data.city.name.clone().unwrap_or_default(),
        country: data.city.country.clone().unwrap_or_default(),
        current,
        hourly,
        daily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager_owm::models::{Condition, MainReadings, Wind};

    // 2024-01-01 00:00:00 UTC
    const DAY1: i64 = 1704067200;
    const HOUR: i64 = 3600;

    fn sample(dt: i64, temp: f64) -> Sample {
        Sample {
            dt,
            main: MainReadings {
                temp: Some(temp),
                feels_like: Some(temp - 1.0),
                temp_min: Some(temp - 2.0),
                temp_max: Some(temp + 2.0),
                pressure: Some(1012),
                humidity: Some(52),
            },
            weather: vec![Condition {
                id: Some(800),
                main: Some("Clear".to_string()),
                description: Some("clear sky".to_string()),
                icon: Some("01d".to_string()),
            }],
            clouds: None,
            wind: Some(Wind { speed: Some(1.64), deg: Some(210.0), gust: None }),
            visibility: Some(10_000.0),
            pop: Some(0.0),
            dt_txt: None,
        }
    }

    fn payload(list: Vec<Sample>) -> WeatherData {
        WeatherData {
            list,
            city: City {
                name: Some("Berlin".to_string()),
                coord: None,
                country: Some("DE".to_string()),
                timezone: Some(0),
                sunrise: Some(DAY1 + 8 * HOUR),
                sunset: Some(DAY1 + 16 * HOUR),
            },
        }
    }

    #[test]
    fn current_conditions_come_from_first_sample() {
        let view = assemble(&payload(vec![
            sample(DAY1 + 8 * HOUR, 296.37),
            sample(DAY1 + 11 * HOUR, 300.0),
        ]));

        let current = view.current.unwrap();
        assert_eq!(current.day, "Monday");
        assert_eq!(current.date, "01.01.2024");
        assert_eq!(current.temp, "23°");
        assert_eq!(current.description, "clear sky");
        assert_eq!(current.visibility, "10km");
        assert_eq!(current.wind_speed, "6km/h");
        assert_eq!(current.humidity, "52%");
        assert_eq!(current.pressure, "1012 hPa");
    }

    #[test]
    fn no_temperature_drift_between_display_paths() {
        // first sample is also day one's representative
        let view = assemble(&payload(vec![sample(DAY1 + 8 * HOUR, 296.37)]));

        let current = view.current.unwrap();
        let summary = view.daily[0].summary.as_ref().unwrap();
        assert_eq!(current.temp, summary.temp);
        assert_eq!(current.feels_like, summary.feels_like);
        assert_eq!(current.temp_min, summary.temp_min);
        assert_eq!(current.temp_max, summary.temp_max);
        assert_eq!(view.hourly[0].temp, current.temp);
    }

    #[test]
    fn intraday_strip_is_the_full_series() {
        let view = assemble(&payload(vec![
            sample(DAY1 + 2 * HOUR, 290.0),
            sample(DAY1 + 8 * HOUR, 296.37),
            sample(DAY1 + 11 * HOUR, 300.0),
        ]));

        assert_eq!(view.hourly.len(), 3);
        assert_eq!(view.hourly[0].time, "2:00 AM");
        assert_eq!(view.hourly[1].time, "8:00 AM");
        assert_eq!(view.hourly[2].time, "11:00 AM");
    }

    #[test]
    fn intraday_times_use_the_city_offset() {
        let mut data = payload(vec![sample(DAY1 + 8 * HOUR, 296.37)]);
        data.city.timezone = Some(3600);

        let view = assemble(&data);
        assert_eq!(view.hourly[0].time, "9:00 AM");
    }

    #[test]
    fn day_without_representative_keeps_its_row() {
        let view = assemble(&payload(vec![
            sample(DAY1 + 2 * HOUR, 290.0),
            sample(DAY1 + 26 * HOUR, 295.0),
        ]));

        assert_eq!(view.daily.len(), 2);
        assert_eq!(view.daily[0].date, "01.01");
        assert!(view.daily[0].summary.is_none());
        assert!(view.daily[1].summary.is_some());

        // the absent summary is serialized explicitly, not omitted
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["daily"][0]["summary"], serde_json::Value::Null);
    }

    #[test]
    fn sunrise_and_sunset_match_across_display_paths() {
        let view = assemble(&payload(vec![sample(DAY1 + 8 * HOUR, 296.37)]));

        let current = view.current.unwrap();
        assert_eq!(current.sunrise, "8:00");
        assert_eq!(current.sunset, "16:00");

        let summary = view.daily[0].summary.as_ref().unwrap();
        assert_eq!(summary.sunrise, current.sunrise);
        assert_eq!(summary.sunset, current.sunset);
    }

    #[test]
    fn empty_series_is_a_valid_empty_view() {
        let view = assemble(&payload(Vec::new()));

        assert!(view.current.is_none());
        assert!(view.hourly.is_empty());
        assert!(view.daily.is_empty());
        assert_eq!(view.location, "Berlin");
    }

    #[test]
    fn missing_fields_fall_back_instead_of_propagating() {
        let bare = Sample {
            dt: DAY1 + 8 * HOUR,
            main: MainReadings::default(),
            weather: Vec::new(),
            clouds: None,
            wind: None,
            visibility: None,
            pop: None,
            dt_txt: None,
        };
        let view = assemble(&payload(vec![bare]));

        let current = view.current.unwrap();
        assert_eq!(current.temp, "23°");
        assert_eq!(current.wind_speed, "6km/h");
        assert_eq!(current.visibility, "10km");
        assert_eq!(current.icon, "01d");
        assert_eq!(current.description, "");
    }

    #[test]
    fn assemble_is_idempotent() {
        let data = payload(vec![
            sample(DAY1 + 8 * HOUR, 296.37),
            sample(DAY1 + 26 * HOUR, 295.0),
        ]);

        assert_eq!(assemble(&data), assemble(&data));
    }

    #[test]
    fn view_state_serializes_with_a_state_tag() {
        let loading = serde_json::to_value(ViewState::default()).unwrap();
        assert_eq!(loading["state"], "loading");

        let error = serde_json::to_value(ViewState::Error {
            reason: "upstream said no".to_string(),
        }).unwrap();
        assert_eq!(error["state"], "error");
        assert_eq!(error["reason"], "upstream said no");

        let ready = serde_json::to_value(ViewState::Ready(
            assemble(&payload(Vec::new())),
        )).unwrap();
        assert_eq!(ready["state"], "ready");
        assert_eq!(ready["location"], "Berlin");
    }
}
