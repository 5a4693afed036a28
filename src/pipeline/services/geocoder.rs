use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::common::Coordinates;
use crate::config::GeocoderSettings;
use crate::error::AppError;

/// Placeholders the backend uses when it could not place the media.
const UNRESOLVABLE_NAMES: [&str; 2] = ["unknown location", "unknown"];

/// Whether a location name is worth a lookup at all.
pub fn is_resolvable(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty()
        && !UNRESOLVABLE_NAMES
            .iter()
            .any(|sentinel| name.eq_ignore_ascii_case(sentinel))
}

/// Free-text place name to coordinates. Never fails: a miss is `None`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, name: &str) -> Option<Coordinates>;
}

/// Nominatim-style `/search?format=json&q=` lookups.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

#[derive(Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::Client, settings: &GeocoderSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            user_agent: settings.user_agent.clone(),
        }
    }

    async fn lookup(&self, name: &str) -> Result<Option<Coordinates>, AppError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[("format", "json"), ("q", name)])
            .send()
            .await
            .map_err(|e| AppError::GeocodeUnavailable(format!("{}: {}", name, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::GeocodeUnavailable(format!(
                "{}: lookup returned {}",
                name, status
            )));
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| AppError::GeocodeUnavailable(format!("{}: {}", name, e)))?;

        let Some(first) = places.into_iter().next() else {
            return Ok(None);
        };

        let (Ok(latitude), Ok(longitude)) = (
            first.lat.trim().parse::<f64>(),
            first.lon.trim().parse::<f64>(),
        )
        else {
            return Err(AppError::GeocodeUnavailable(format!(
                "{}: unparsable coordinates '{}', '{}'",
                name, first.lat, first.lon
            )));
        };

        let coordinates = Coordinates::new(latitude, longitude);
        if !coordinates.is_valid() {
            return Err(AppError::GeocodeUnavailable(format!(
                "{}: out of range coordinates {:?}",
                name, coordinates
            )));
        }
        Ok(Some(coordinates))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, name: &str) -> Option<Coordinates> {
        if !is_resolvable(name) {
            warn!("No location name provided for geocoding");
            return None;
        }

        debug!("Attempting to geocode: {}", name);
        match self.lookup(name.trim()).await {
            Ok(Some(coordinates)) => {
                debug!("Coordinates found for {}: {:?}", name, coordinates);
                Some(coordinates)
            }
            Ok(None) => {
                warn!("Location not found: {}", name);
                None
            }
            Err(e) => {
                warn!("Error geocoding location: {}", e);
                None
            }
        }
    }
}
