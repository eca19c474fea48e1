//! Nominatim HTTP adapter for forward and reverse geocoding.

use serde::{Deserialize, Serialize};

use crate::traits::{GeocodeError, Geocoder};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("truck-hours/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    fn forward(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        let url = format!("{}/search", self.config.base_url);
        let hits = self
            .client
            .get(url)
            .query(&[("format", "json"), ("q", query), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json::<Vec<SearchHit>>()?;

        hits.into_iter().next().map(SearchHit::coordinates).transpose()
    }

    fn reverse(&self, lat: f64, lng: f64) -> Result<String, GeocodeError> {
        let url = format!("{}/reverse", self.config.base_url);
        let place = self
            .client
            .get(url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()?
            .error_for_status()?
            .json::<ReversePlace>()?;

        Ok(place.label(lat, lng))
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl SearchHit {
    fn coordinates(self) -> Result<(f64, f64), GeocodeError> {
        let lat = self
            .lat
            .parse::<f64>()
            .map_err(|_| GeocodeError::MalformedCoordinate(self.lat.clone()))?;
        let lng = self
            .lon
            .parse::<f64>()
            .map_err(|_| GeocodeError::MalformedCoordinate(self.lon.clone()))?;
        Ok((lat, lng))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ReversePlace {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    road: Option<String>,
    pedestrian: Option<String>,
}

impl ReversePlace {
    /// "road, city", then "city", then the first part of the display name,
    /// then the raw coordinates.
    fn label(self, lat: f64, lng: f64) -> String {
        let address = self.address;
        let city = address
            .city
            .or(address.town)
            .or(address.village)
            .or(address.municipality);
        let road = address.road.or(address.pedestrian);

        match (road, city) {
            (Some(road), Some(city)) => format!("{}, {}", road, city),
            (None, Some(city)) => city,
            _ => self
                .display_name
                .as_deref()
                .and_then(|name| name.split(',').next())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("{:.4}, {:.4}", lat, lng)),
        }
    }
}
