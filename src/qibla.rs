// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Qibla bearing.

use crate::angle::{darctan2, dcos, dsin, dtan, fix_angle};
use crate::coordinates::{Coordinates, KAABA};
use qtty::Degrees;

/// Initial great-circle bearing from `coords` to the Kaaba, clockwise from
/// true north, in `[0, 360)`.
pub fn calculate_qibla(coords: Coordinates) -> Degrees {
    let d_lon = KAABA.lon() - coords.lon();
    let y = dsin(d_lon);
    let x = dcos(coords.lat()) * dtan(KAABA.lat()) - dsin(coords.lat()) * dcos(d_lon);
    Degrees::new(fix_angle(darctan2(y, x)))
}

/// Qibla relative to a device heading, for rotating a compass needle.
pub fn relative_qibla(qibla: Degrees, heading: Degrees) -> Degrees {
    Degrees::new(fix_angle(qibla.value() - heading.value()))
}
