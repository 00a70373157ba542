pub mod errors;
pub mod models;

use std::time::Duration;
use reqwest::Client;
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::WeatherData;

const OWM_DOMAIN: &str = "https://api.openweathermap.org";

/// Number of 3-hour samples to request, enough for the full 5-day horizon.
const SAMPLE_COUNT: u32 = 56;

/// Struct for managing weather forecasts produced by OpenWeatherMap
#[derive(Clone)]
pub struct OWM {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OWM {
    /// Returns an OWM struct ready for fetching and processing weather
    /// forecasts from OpenWeatherMap
    ///
    /// # Arguments
    ///
    /// * 'api_key' - OpenWeatherMap API key
    pub fn new(api_key: &str) -> Result<OWM, OWMError> {
        Self::with_base_url(api_key, OWM_DOMAIN)
    }

    /// Same as `new` but against a caller-supplied endpoint, used by tests
    ///
    /// # Arguments
    ///
    /// * 'api_key' - OpenWeatherMap API key
    /// * 'base_url' - scheme and host of the forecast endpoint
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<OWM, OWMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Retrieves the 5-day / 3-hour forecast for the given place.
    ///
    /// A non-success upstream status is surfaced verbatim as
    /// `OWMError::Upstream`; there is no retry here. A payload with an
    /// empty sample list is returned as-is, empty views are a valid
    /// terminal state for the caller.
    ///
    /// # Arguments
    ///
    /// * 'place' - the location to get a forecast for, e.g. a city name
    pub async fn fetch_forecast(&self, place: &str) -> Result<WeatherData, OWMError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        let cnt = SAMPLE_COUNT.to_string();

        let req = self.client
            .get(&url)
            .query(&[("q", place), ("appid", self.api_key.as_str()), ("cnt", cnt.as_str())])
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(OWMError::Upstream(
                format!("Error while fetching forecast for {}: {}", place, status)));
        }

        let json = req.text().await?;
        let data: WeatherData = serde_json::from_str(&json)?;

        Ok(data)
    }
}
