use crate::dataset::AircraftRecord;
use serde::Serialize;

pub const FT2_TO_M2: f64 = 0.092903;
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
/// Tuning constant of the approximation, not a real aircraft weight.
pub const ASSUMED_WEIGHT: f64 = 600_000.0;
pub const LIFT_PER_DEGREE: f64 = 0.1;

/// Approximate takeoff speed for a wing area (ft²) and angle of attack (degrees).
///
/// `v = sqrt(2W / (ρ · S · Cl))` with `Cl = 0.1 · α`, rounded to the nearest
/// integer. The result is shown as km/h without further conversion.
/// Zero, NaN or infinite inputs, a negative area, and anything that would
/// make the root undefined, give `None`.
pub fn estimate_speed(wing_area_ft2: f64, angle_deg: f64) -> Option<u32> {
    if !is_usable(wing_area_ft2) || wing_area_ft2 < 0.0 || !is_usable(angle_deg) {
        return None;
    }

    let cl = LIFT_PER_DEGREE * angle_deg;
    let wing_area_m2 = wing_area_ft2 * FT2_TO_M2;
    let radicand = (2.0 * ASSUMED_WEIGHT) / (AIR_DENSITY_SEA_LEVEL * wing_area_m2 * cl);
    if !radicand.is_finite() || radicand < 0.0 {
        return None;
    }

    let v = radicand.sqrt().round();
    if v > u32::MAX as f64 {
        return None;
    }
    Some(v as u32)
}

fn is_usable(v: f64) -> bool {
    v.is_finite() && v != 0.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TakeoffEstimate {
    /// Speed with the effective wing area.
    pub normal: Option<u32>,
    /// Speed with the larger with-winglets span, when the record has one.
    pub extended: Option<u32>,
}

/// Computes both speeds shown to the user.
///
/// The extended value only appears when the selected record's with-winglets
/// wingspan is strictly greater than the area already in use.
pub fn estimate_takeoff(
    effective_area_ft2: Option<f64>,
    selected: Option<&AircraftRecord>,
    angle_deg: f64,
) -> TakeoffEstimate {
    let normal = effective_area_ft2.and_then(|area| estimate_speed(area, angle_deg));

    let extended = match (effective_area_ft2, selected.and_then(|r| r.wingspan_with_winglets())) {
        (Some(effective), Some(ext)) if ext > effective => estimate_speed(ext, angle_deg),
        _ => None,
    };

    TakeoffEstimate { normal, extended }
}
