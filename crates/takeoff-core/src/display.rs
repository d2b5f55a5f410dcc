use crate::dataset::{AircraftRecord, Field};
use crate::speed::TakeoffEstimate;

pub const PLACEHOLDER: &str = "—";
pub const SPEED_UNIT: &str = "km/h";

/// Fields listed on the selected-aircraft card, in order.
pub const DISPLAY_FIELDS: [Field; 25] = [
    Field::WingspanWithoutWinglets,
    Field::WingspanWithWinglets,
    Field::Length,
    Field::TailHeight,
    Field::Wheelbase,
    Field::CockpitToMainGear,
    Field::MainGearWidth,
    Field::Mtow,
    Field::Malw,
    Field::MainGearConfig,
    Field::IcaoWtc,
    Field::ParkingArea,
    Field::Class,
    Field::FaaWeight,
    Field::Cwt,
    Field::OneHalfWakeCategory,
    Field::TwoWakeCategoryAppxA,
    Field::TwoWakeCategoryAppxB,
    Field::RotorDiameter,
    Field::Srs,
    Field::Lahso,
    Field::FaaRegistry,
    Field::RegistrationCount,
    Field::TmfsOperations,
    Field::Remarks,
];

/// "Tail_Height_at_OEW_ft" -> "Tail Height at OEW ft"
pub fn label(field: Field) -> String {
    field.header().replace('_', " ")
}

/// Label/value pairs for the fields this record actually has.
pub fn detail_lines(record: &AircraftRecord) -> Vec<(String, String)> {
    DISPLAY_FIELDS
        .iter()
        .filter_map(|f| record.get(*f).map(|v| (label(*f), v.to_string())))
        .collect()
}

/// Engine, AAC and approach-speed lines. These are always shown, with a placeholder when absent.
pub fn summary_lines(record: &AircraftRecord) -> Vec<(String, String)> {
    let engines = format!(
        "{} ({})",
        value_or_placeholder(record, Field::NumEngines),
        value_or_placeholder(record, Field::PhysicalClassEngine)
    );
    vec![
        ("Engines".to_string(), engines),
        ("AAC".to_string(), value_or_placeholder(record, Field::Aac)),
        (
            "Approach Speed (knot)".to_string(),
            value_or_placeholder(record, Field::ApproachSpeed),
        ),
    ]
}

fn value_or_placeholder(record: &AircraftRecord, field: Field) -> String {
    record
        .get(field)
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_speed(speed: Option<u32>) -> String {
    match speed {
        Some(v) => format!("{} {}", v, SPEED_UNIT),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_wing_area(area: Option<f64>) -> String {
    match area {
        Some(a) => format!("{} ft²", a),
        None => PLACEHOLDER.to_string(),
    }
}

/// Speed card lines. The extended line only appears when there is an extended value.
pub fn speed_lines(estimate: &TakeoffEstimate) -> Vec<(String, String)> {
    let mut lines = vec![("Normal Wings".to_string(), format_speed(estimate.normal))];
    if let Some(ext) = estimate.extended {
        lines.push(("Extended Wings".to_string(), format_speed(Some(ext))));
    }
    lines
}
