//! Static reference table of major world cities.
//!
//! Each city contributes an exponentially decaying pollution plume to the
//! world-scale feature synthesis. Baseline levels are rough AQI-scale
//! characterizations, not measurements.

/// A reference city with its baseline pollution characterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// City name.
    pub name: &'static str,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Baseline pollution level on the AQI scale, `>= 0`.
    pub baseline_pollution: f64,
}

impl City {
    const fn new(
        name: &'static str,
        latitude: f64,
        longitude: f64,
        baseline_pollution: f64,
    ) -> Self {
        Self {
            name,
            latitude,
            longitude,
            baseline_pollution,
        }
    }
}

/// The 35 major world cities used by the world pipeline, read-only at
/// runtime.
pub const MAJOR_CITIES: &[City] = &[
    // Asia - high pollution
    City::new("Beijing", 39.9042, 116.4074, 180.0),
    City::new("Delhi", 28.7041, 77.1025, 200.0),
    City::new("Mumbai", 19.0760, 72.8777, 150.0),
    City::new("Shanghai", 31.2304, 121.4737, 140.0),
    City::new("Bangkok", 13.7563, 100.5018, 130.0),
    City::new("Jakarta", 6.2088, 106.8456, 160.0),
    City::new("Manila", 14.5995, 120.9842, 120.0),
    City::new("Seoul", 37.5665, 126.9780, 110.0),
    City::new("Tokyo", 35.6762, 139.6503, 90.0),
    // Middle East
    City::new("Tehran", 35.6892, 51.3890, 170.0),
    City::new("Riyadh", 24.7136, 46.6753, 140.0),
    City::new("Kuwait City", 29.3759, 47.9774, 150.0),
    City::new("Dubai", 25.2048, 55.2708, 120.0),
    // Europe - moderate
    City::new("London", 51.5074, -0.1278, 80.0),
    City::new("Paris", 48.8566, 2.3522, 85.0),
    City::new("Berlin", 52.5200, 13.4050, 75.0),
    City::new("Rome", 41.9028, 12.4964, 90.0),
    City::new("Madrid", 40.4168, -3.7038, 85.0),
    City::new("Moscow", 55.7558, 37.6176, 95.0),
    City::new("Warsaw", 52.2297, 21.0122, 100.0),
    // North America - low to moderate
    City::new("New York", 40.7128, -74.0060, 70.0),
    City::new("Los Angeles", 34.0522, -118.2437, 95.0),
    City::new("Chicago", 41.8781, -87.6298, 75.0),
    City::new("Mexico City", 19.4326, -99.1332, 130.0),
    City::new("Toronto", 43.6532, -79.3832, 65.0),
    // South America
    City::new("São Paulo", -23.5505, -46.6333, 110.0),
    City::new("Buenos Aires", -34.6118, -58.3960, 85.0),
    City::new("Lima", -12.0464, -77.0428, 100.0),
    City::new("Bogotá", 4.7110, -74.0721, 95.0),
    // Africa
    City::new("Cairo", 30.0444, 31.2357, 140.0),
    City::new("Lagos", 6.5244, 3.3792, 120.0),
    City::new("Johannesburg", -26.2041, 28.0473, 100.0),
    City::new("Nairobi", -1.2921, 36.8219, 90.0),
    // Oceania
    City::new("Sydney", -33.8688, 151.2093, 60.0),
    City::new("Melbourne", -37.8136, 144.9631, 65.0),
];
