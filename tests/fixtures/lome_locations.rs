//! Warehouses and wholesale buyers around Lomé.
//!
//! Coordinates are approximate and only need to be plausible for great-circle
//! distances.

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
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

pub const WAREHOUSES: &[Location] = &[
    Location::new("Entrepôt Port Autonome", 6.1375, 1.2870),
    Location::new("Entrepôt Adidogomé", 6.1800, 1.1700),
    Location::new("Entrepôt Agoè", 6.2270, 1.2050),
];

pub const BUYERS: &[Location] = &[
    Location::new("Marché d'Adawlato", 6.1300, 1.2190),
    Location::new("Marché de Hédzranawoé", 6.1590, 1.2480),
    Location::new("Marché d'Agoè-Assiyéyé", 6.2240, 1.2120),
    Location::new("Marché de Bè", 6.1370, 1.2330),
    Location::new("Marché d'Akodésséwa", 6.1420, 1.2660),
    Location::new("Marché de Tokoin", 6.1480, 1.2180),
    Location::new("Coopérative Baguida", 6.1530, 1.3250),
    Location::new("Coopérative Légbassito", 6.2560, 1.1500),
    Location::new("Marché de Kégué", 6.1770, 1.2500),
    Location::new("Marché de Djidjolé", 6.1650, 1.1950),
];
