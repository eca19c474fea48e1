//! Polish freight hubs used across the integration tests.
//!
//! Coordinates from OpenStreetMap, rounded to four decimals.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

pub const WARSAW: Location = Location::new("Warszawa", 52.2297, 21.0122);
pub const KRAKOW: Location = Location::new("Kraków", 50.0647, 19.9450);
pub const GDANSK: Location = Location::new("Gdańsk", 54.3520, 18.6466);
pub const POZNAN: Location = Location::new("Poznań", 52.4064, 16.9252);
pub const SWINOUJSCIE: Location = Location::new("Świnoujście", 53.9105, 14.2471);

pub const HUBS: &[Location] = &[WARSAW, KRAKOW, GDANSK, POZNAN, SWINOUJSCIE];
