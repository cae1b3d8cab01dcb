// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Geographic coordinates.

use crate::error::{Error, Result};
use qtty::Degrees;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Geodetic latitude/longitude pair in degrees.
///
/// North and east are positive. The calculators accept any value; call
/// [`Coordinates::validate`] first when the input comes from a user.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

/// The Kaaba in Makkah, reference point for the qibla.
pub const KAABA: Coordinates = Coordinates::new(21.4225, 39.8262);

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.latitude.value()
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.longitude.value()
    }

    /// Check that both components are finite and inside their ranges.
    pub fn validate(&self) -> Result<Self> {
        let (lat, lon) = (self.lat(), self.lon());
        if lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0 {
            Ok(*self)
        } else {
            Err(Error::InvalidCoordinate {
                latitude: lat,
                longitude: lon,
            })
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.lat() < 0.0 { 'S' } else { 'N' };
        let ew = if self.lon() < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{} {:.4}°{}",
            self.lat().abs(),
            ns,
            self.lon().abs(),
            ew
        )
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct CoordinatesRepr {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl Serialize for Coordinates {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CoordinatesRepr {
            latitude: self.lat(),
            longitude: self.lon(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Coordinates {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = CoordinatesRepr::deserialize(deserializer)?;
        Ok(Self::new(repr.latitude, repr.longitude))
    }
}
