use crate::dataset::AircraftRecord;

/// Wing area fed to the speed formula, in ft².
///
/// Precedence: a positive user override, then the selected record's wingspan
/// without winglets, then its wingspan with winglets. The dataset's wingspan
/// columns stand in for the area term.
pub fn effective_wing_area(override_ft2: Option<f64>, selected: Option<&AircraftRecord>) -> Option<f64> {
    override_ft2
        .filter(|v| v.is_finite() && *v > 0.0)
        .or_else(|| selected.and_then(default_wing_area))
}

/// Record-only part of the precedence, used to prefill the override on selection.
pub fn default_wing_area(record: &AircraftRecord) -> Option<f64> {
    record
        .wingspan_without_winglets()
        .or_else(|| record.wingspan_with_winglets())
}

/// Parses the wing-area input box. Blank, unparseable and negative input clear the override.
pub fn parse_override(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parses the angle-of-attack input box. Anything unparseable becomes 0, which the
/// estimator reports as not computable.
pub fn parse_angle(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Field;

    fn both() -> AircraftRecord {
        AircraftRecord::new()
            .with(Field::WingspanWithoutWinglets, "112.6")
            .with(Field::WingspanWithWinglets, "117.4")
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(effective_wing_area(Some(1000.0), Some(&both())), Some(1000.0));
        assert_eq!(effective_wing_area(Some(50.0), None), Some(50.0));
    }

    #[test]
    fn test_base_then_extended() {
        assert_eq!(effective_wing_area(None, Some(&both())), Some(112.6));

        let extended_only = AircraftRecord::new().with(Field::WingspanWithWinglets, "117.4");
        assert_eq!(effective_wing_area(None, Some(&extended_only)), Some(117.4));
    }

    #[test]
    fn test_non_positive_override_falls_through() {
        assert_eq!(effective_wing_area(Some(0.0), Some(&both())), Some(112.6));
        assert_eq!(effective_wing_area(Some(-3.0), Some(&both())), Some(112.6));
        assert_eq!(effective_wing_area(Some(0.0), None), None);
    }

    #[test]
    fn test_nothing_available() {
        assert_eq!(effective_wing_area(None, None), None);
        let bare = AircraftRecord::new().with(Field::ModelFaa, "Glider");
        assert_eq!(effective_wing_area(None, Some(&bare)), None);
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override(""), None);
        assert_eq!(parse_override("  "), None);
        assert_eq!(parse_override("abc"), None);
        assert_eq!(parse_override("-1"), None);
        assert_eq!(parse_override("0"), Some(0.0));
        assert_eq!(parse_override(" 1250.5 "), Some(1250.5));
    }

    #[test]
    fn test_parse_angle() {
        assert_eq!(parse_angle("12"), 12.0);
        assert_eq!(parse_angle("-2.5"), -2.5);
        assert_eq!(parse_angle(""), 0.0);
        assert_eq!(parse_angle("steep"), 0.0);
        assert_eq!(parse_angle("NaN"), 0.0);
    }
}
