//! Static geographic zone rectangles for the world pipeline.
//!
//! Coarse rectangles with a fixed additive AQI offset: industrial belts
//! and deserts push pollution up, oceans, polar latitudes and rainforests
//! pull it down. Tables are immutable configuration; membership lookup is
//! first-match-wins in table order. The reference rectangles within each
//! table do not overlap, but if a future edit makes them overlap, the
//! earlier entry wins rather than summing.

/// An axis-aligned lat/lon rectangle carrying a fixed AQI offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRect {
    /// Zone name, for diagnostics.
    pub name: &'static str,
    /// Southern edge, inclusive.
    pub lat_min: f64,
    /// Northern edge, inclusive.
    pub lat_max: f64,
    /// Western edge, inclusive.
    pub lon_min: f64,
    /// Eastern edge, inclusive.
    pub lon_max: f64,
    /// Additive AQI offset applied inside the rectangle.
    pub offset: f64,
}

impl ZoneRect {
    const fn new(
        name: &'static str,
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
        offset: f64,
    ) -> Self {
        Self {
            name,
            lat_min,
            lat_max,
            lon_min,
            lon_max,
            offset,
        }
    }

    /// Whether the point falls inside this rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat)
            && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

/// Industrial belts, highest offset first.
pub const INDUSTRIAL_ZONES: &[ZoneRect] = &[
    ZoneRect::new("East Asia industrial belt", 20.0, 60.0, 100.0, 140.0, 40.0),
    ZoneRect::new("European industrial", 40.0, 60.0, -10.0, 40.0, 25.0),
    ZoneRect::new("North American industrial", 25.0, 50.0, -125.0, -70.0, 20.0),
];

/// Dust-producing desert regions.
pub const DESERT_ZONES: &[ZoneRect] = &[
    ZoneRect::new("Sahara / Middle East", 15.0, 35.0, -20.0, 60.0, 30.0),
    ZoneRect::new("Central Asia deserts", 20.0, 40.0, 70.0, 120.0, 25.0),
];

/// Coarse open-ocean areas (cleaner air). Only applied below the polar
/// threshold, see [`ocean_offset`].
pub const OCEAN_ZONES: &[ZoneRect] = &[
    ZoneRect::new("North Pacific", 0.0, 60.0, -180.0, -120.0, -20.0),
    ZoneRect::new("South Atlantic", -60.0, 0.0, -60.0, 20.0, -20.0),
    ZoneRect::new("West Pacific", -40.0, 40.0, 120.0, 180.0, -20.0),
];

/// Rainforest regions (cleaner air).
pub const FOREST_ZONES: &[ZoneRect] = &[
    ZoneRect::new("Amazon", -10.0, 10.0, -80.0, -40.0, -10.0),
    ZoneRect::new("Central Africa", -10.0, 10.0, 10.0, 40.0, -8.0),
    ZoneRect::new("Southeast Asia", -10.0, 10.0, 95.0, 140.0, -5.0),
];

/// Latitude beyond which a point counts as polar.
pub const POLAR_LATITUDE: f64 = 60.0;

/// Offset applied poleward of [`POLAR_LATITUDE`].
pub const POLAR_OFFSET: f64 = -15.0;

/// First-match zone lookup: the offset of the first rectangle containing
/// the point, or 0 if none does.
#[must_use]
pub fn zone_offset(zones: &[ZoneRect], lat: f64, lon: f64) -> f64 {
    zones
        .iter()
        .find(|zone| zone.contains(lat, lon))
        .map_or(0.0, |zone| zone.offset)
}

/// Ocean offset for a point: applies only equatorward of the polar
/// threshold, first matching rectangle wins.
#[must_use]
pub fn ocean_offset(lat: f64, lon: f64) -> f64 {
    if lat.abs() < POLAR_LATITUDE {
        zone_offset(OCEAN_ZONES, lat, lon)
    } else {
        0.0
    }
}

/// Polar offset for a point: applied strictly poleward of the threshold.
#[must_use]
pub fn polar_offset(lat: f64) -> f64 {
    if lat.abs() > POLAR_LATITUDE {
        POLAR_OFFSET
    } else {
        0.0
    }
}
