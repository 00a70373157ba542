/// Default used when the payload carries no temperature value.
/// Taken from the upstream sample payload (23 Celsius).
const FALLBACK_KELVIN: f64 = 296.37;

/// Default used when the payload carries no wind speed value (m/s).
const FALLBACK_WIND_MPS: f64 = 1.64;

/// Default used when the payload carries no visibility value (meters).
const FALLBACK_VISIBILITY_M: f64 = 10_000.0;

/// Converts Kelvin to Celsius, rounded to the nearest whole degree.
///
/// This is the single rounding policy for every display path; current
/// conditions and forecast rows must both go through here. Total on zero
/// and negative input since upstream sentinel values can be below zero.
///
/// # Arguments
///
/// * 'kelvin' - temperature in Kelvin, or None to use the fallback
pub fn kelvin_to_celsius(kelvin: Option<f64>) -> i64 {
    (kelvin.unwrap_or(FALLBACK_KELVIN) - 273.15).round() as i64
}

/// Renders a Kelvin temperature as a whole-degree Celsius label, e.g. "23°".
///
/// # Arguments
///
/// * 'kelvin' - temperature in Kelvin, or None to use the fallback
pub fn format_celsius(kelvin: Option<f64>) -> String {
    format!("{}°", kelvin_to_celsius(kelvin))
}

/// Converts meter per second to a whole kilometer-per-hour label, e.g. "6km/h".
///
/// # Arguments
///
/// * 'mps' - wind speed in m/s, or None to use the fallback
pub fn mps_to_kmph(mps: Option<f64>) -> String {
    format!("{}km/h", (mps.unwrap_or(FALLBACK_WIND_MPS) * 3.6).round() as i64)
}

/// Converts meters to a whole kilometer label, e.g. "10km".
///
/// # Arguments
///
/// * 'meters' - distance in meters, or None to use the fallback
pub fn meters_to_km(meters: Option<f64>) -> String {
    format!("{}km", (meters.unwrap_or(FALLBACK_VISIBILITY_M) / 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_rounds_to_nearest_degree() {
        assert_eq!(kelvin_to_celsius(Some(296.37)), 23);
        assert_eq!(kelvin_to_celsius(Some(273.15)), 0);
        assert_eq!(kelvin_to_celsius(Some(273.65)), 1);
    }

    #[test]
    fn kelvin_is_total_on_zero_and_negative() {
        assert_eq!(kelvin_to_celsius(Some(0.0)), -273);
        assert_eq!(kelvin_to_celsius(Some(-10.0)), -283);
    }

    #[test]
    fn kelvin_fallback_on_missing() {
        assert_eq!(kelvin_to_celsius(None), 23);
        assert_eq!(format_celsius(None), "23°");
    }

    #[test]
    fn wind_speed_to_kmph() {
        assert_eq!(mps_to_kmph(Some(1.64)), "6km/h");
        assert_eq!(mps_to_kmph(Some(0.0)), "0km/h");
        assert_eq!(mps_to_kmph(None), "6km/h");
    }

    #[test]
    fn visibility_to_km() {
        assert_eq!(meters_to_km(Some(10_000.0)), "10km");
        assert_eq!(meters_to_km(Some(1_499.0)), "1km");
        assert_eq!(meters_to_km(None), "10km");
    }
}
