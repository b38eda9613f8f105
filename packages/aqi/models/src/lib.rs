#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! EPA AQI category taxonomy and classification.
//!
//! This crate defines the canonical six-band Air Quality Index scale used
//! across the entire aqi-map system. Band bounds, colors, and labels follow
//! the EPA standard; every consumer (statistics, rendering, CLI output)
//! classifies against this shared table.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The upper bound of the AQI scale. Values above this have no category.
pub const AQI_MAX: f64 = 500.0;

/// One of the six EPA AQI severity bands, ordered from least to most severe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AqiCategory {
    /// AQI 0-50: air quality is satisfactory.
    Good,
    /// AQI 51-100: acceptable, possible concern for unusually sensitive people.
    Moderate,
    /// AQI 101-150: members of sensitive groups may experience effects.
    UnhealthySensitive,
    /// AQI 151-200: everyone may begin to experience health effects.
    Unhealthy,
    /// AQI 201-300: health alert, increased risk for everyone.
    VeryUnhealthy,
    /// AQI 301-500: emergency conditions.
    Hazardous,
}

impl AqiCategory {
    /// Returns the inclusive `(lower, upper)` AQI bounds for this band.
    ///
    /// Bands are contiguous and non-overlapping: `[0,50] [51,100] [101,150]
    /// [151,200] [201,300] [301,500]`.
    #[must_use]
    pub const fn bounds(self) -> (u16, u16) {
        match self {
            Self::Good => (0, 50),
            Self::Moderate => (51, 100),
            Self::UnhealthySensitive => (101, 150),
            Self::Unhealthy => (151, 200),
            Self::VeryUnhealthy => (201, 300),
            Self::Hazardous => (301, 500),
        }
    }

    /// Returns the EPA hex color code for this band (e.g. `"#00E400"`).
    #[must_use]
    pub const fn color_hex(self) -> &'static str {
        match self {
            Self::Good => "#00E400",
            Self::Moderate => "#FFFF00",
            Self::UnhealthySensitive => "#FF7E00",
            Self::Unhealthy => "#FF0000",
            Self::VeryUnhealthy => "#8F3F97",
            Self::Hazardous => "#7E0023",
        }
    }

    /// Returns the EPA color as an RGB triple, for rasterization.
    #[must_use]
    pub const fn color_rgb(self) -> [u8; 3] {
        match self {
            Self::Good => [0x00, 0xE4, 0x00],
            Self::Moderate => [0xFF, 0xFF, 0x00],
            Self::UnhealthySensitive => [0xFF, 0x7E, 0x00],
            Self::Unhealthy => [0xFF, 0x00, 0x00],
            Self::VeryUnhealthy => [0x8F, 0x3F, 0x97],
            Self::Hazardous => [0x7E, 0x00, 0x23],
        }
    }

    /// Returns the human-readable EPA label for this band.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Returns all six bands in severity order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Good,
            Self::Moderate,
            Self::UnhealthySensitive,
            Self::Unhealthy,
            Self::VeryUnhealthy,
            Self::Hazardous,
        ]
    }

    /// Classifies an AQI value into its band.
    ///
    /// Total and unambiguous over `[0, 500]`; returns `None` for values
    /// outside that range. Band edges fall on the upper bound: `50.0` is
    /// `Good`, `50.5` and `51.0` are `Moderate`.
    #[must_use]
    pub fn classify(value: f64) -> Option<Self> {
        if !value.is_finite() || !(0.0..=AQI_MAX).contains(&value) {
            return None;
        }
        Some(if value <= 50.0 {
            Self::Good
        } else if value <= 100.0 {
            Self::Moderate
        } else if value <= 150.0 {
            Self::UnhealthySensitive
        } else if value <= 200.0 {
            Self::Unhealthy
        } else if value <= 300.0 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        })
    }

    /// Classifies an AQI value after clamping it into `[0, 500]`.
    ///
    /// Used by the renderer, where an out-of-range prediction still needs
    /// a color. Statistics must instead tally out-of-range values
    /// separately via [`classify`](Self::classify).
    #[must_use]
    pub fn classify_clamped(value: f64) -> Self {
        let clamped = if value.is_finite() {
            value.clamp(0.0, AQI_MAX)
        } else {
            0.0
        };
        // Clamped values are always in range.
        Self::classify(clamped).unwrap_or(Self::Good)
    }
}
