use log::{debug, info};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
}

/// Known columns of the aircraft characteristics sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    IcaoCode,
    FaaDesignator,
    Manufacturer,
    ModelFaa,
    WingspanWithoutWinglets,
    WingspanWithWinglets,
    Length,
    TailHeight,
    Wheelbase,
    CockpitToMainGear,
    MainGearWidth,
    Mtow,
    Malw,
    MainGearConfig,
    IcaoWtc,
    ParkingArea,
    Class,
    FaaWeight,
    Cwt,
    OneHalfWakeCategory,
    TwoWakeCategoryAppxA,
    TwoWakeCategoryAppxB,
    RotorDiameter,
    Srs,
    Lahso,
    PhysicalClassEngine,
    NumEngines,
    Aac,
    ApproachSpeed,
    FaaRegistry,
    RegistrationCount,
    TmfsOperations,
    Remarks,
}

impl Field {
    pub const ALL: [Field; 33] = [
        Field::IcaoCode,
        Field::FaaDesignator,
        Field::Manufacturer,
        Field::ModelFaa,
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
        Field::PhysicalClassEngine,
        Field::NumEngines,
        Field::Aac,
        Field::ApproachSpeed,
        Field::FaaRegistry,
        Field::RegistrationCount,
        Field::TmfsOperations,
        Field::Remarks,
    ];

    /// Fields searched by the suggestion engine.
    pub const IDENTIFIERS: [Field; 4] = [
        Field::IcaoCode,
        Field::FaaDesignator,
        Field::Manufacturer,
        Field::ModelFaa,
    ];

    /// Column header exactly as it appears in the source sheet.
    pub fn header(self) -> &'static str {
        match self {
            Field::IcaoCode => "ICAO_Code",
            Field::FaaDesignator => "FAA_Designator",
            Field::Manufacturer => "Manufacturer",
            Field::ModelFaa => "Model_FAA",
            Field::WingspanWithoutWinglets => "Wingspan_ft_without_winglets_sharklets",
            Field::WingspanWithWinglets => "Wingspan_ft_with_winglets_sharklets",
            Field::Length => "Length_ft",
            Field::TailHeight => "Tail_Height_at_OEW_ft",
            Field::Wheelbase => "Wheelbase_ft",
            Field::CockpitToMainGear => "Cockpit_to_Main_Gear_ft",
            Field::MainGearWidth => "Main_Gear_Width_ft",
            Field::Mtow => "MTOW_lb",
            Field::Malw => "MALW_lb",
            Field::MainGearConfig => "Main_Gear_Config",
            Field::IcaoWtc => "ICAO_WTC",
            Field::ParkingArea => "Parking_Area_ft2",
            Field::Class => "Class",
            Field::FaaWeight => "FAA_Weight",
            Field::Cwt => "CWT",
            Field::OneHalfWakeCategory => "One_Half_Wake_Category",
            Field::TwoWakeCategoryAppxA => "Two_Wake_Category_Appx_A",
            Field::TwoWakeCategoryAppxB => "Two_Wake_Category_Appx_B",
            Field::RotorDiameter => "Rotor_Diameter_ft",
            Field::Srs => "SRS",
            Field::Lahso => "LAHSO",
            Field::PhysicalClassEngine => "Physical_Class_Engine",
            Field::NumEngines => "Num_Engines",
            Field::Aac => "AAC",
            Field::ApproachSpeed => "Approach_Speed_knot",
            Field::FaaRegistry => "FAA_Registry",
            Field::RegistrationCount => "Registration_Count",
            Field::TmfsOperations => "TMFS_Operations_FY24",
            Field::Remarks => "Remarks",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::WingspanWithoutWinglets
            | Field::WingspanWithWinglets
            | Field::Length
            | Field::TailHeight
            | Field::Wheelbase
            | Field::CockpitToMainGear
            | Field::MainGearWidth
            | Field::Mtow
            | Field::Malw
            | Field::ParkingArea
            | Field::RotorDiameter
            | Field::NumEngines
            | Field::ApproachSpeed
            | Field::RegistrationCount
            | Field::TmfsOperations => FieldKind::Numeric,
            _ => FieldKind::Text,
        }
    }

    pub fn from_header(header: &str) -> Option<Field> {
        let header = header.trim();
        Field::ALL.iter().copied().find(|f| f.header() == header)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Coerces a raw cell into a value of the given kind.
    /// Blank text and numbers that are unparseable or not positive come back as `None`.
    pub fn coerce(raw: &str, kind: FieldKind) -> Option<FieldValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match kind {
            FieldKind::Text => Some(FieldValue::Text(raw.to_string())),
            FieldKind::Numeric => parse_positive(raw).map(FieldValue::Number),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parses a spreadsheet number, tolerating thousands separators ("41,000").
/// Any other comma ("112,6") makes the cell absent.
pub fn parse_positive(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let cleaned = if raw.contains(',') {
        strip_thousands(raw)?
    } else {
        raw.to_string()
    };
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn strip_thousands(raw: &str) -> Option<String> {
    let (int_part, frac) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw, None),
    };
    let digits = int_part.strip_prefix(['+', '-']).unwrap_or(int_part);

    let mut groups = digits.split(',');
    let lead = groups.next()?;
    if lead.is_empty() || lead.len() > 3 || !lead.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    let mut out = int_part.replace(',', "");
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

/// One row of the reference table. Every column is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AircraftRecord {
    fields: BTreeMap<Field, FieldValue>,
    /// Columns the catalog does not know about, keyed by their header.
    pub extra: BTreeMap<String, String>,
}

impl AircraftRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter that applies load-time coercion.
    pub fn with(mut self, field: Field, raw: &str) -> Self {
        self.set(field, raw);
        self
    }

    pub fn set(&mut self, field: Field, raw: &str) {
        match FieldValue::coerce(raw, field.kind()) {
            Some(value) => {
                self.fields.insert(field, value);
            }
            None => {
                self.fields.remove(&field);
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn number(&self, field: Field) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    pub fn model_name(&self) -> Option<&str> {
        self.text(Field::ModelFaa)
    }

    pub fn wingspan_without_winglets(&self) -> Option<f64> {
        self.number(Field::WingspanWithoutWinglets)
    }

    pub fn wingspan_with_winglets(&self) -> Option<f64> {
        self.number(Field::WingspanWithWinglets)
    }

    /// Identifier fields that are present, in search order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        Field::IDENTIFIERS.iter().filter_map(|f| self.text(*f))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.extra.is_empty()
    }
}

impl Serialize for AircraftRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + self.extra.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.header(), value)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The loaded reference table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Arc<AircraftRecord>>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<AircraftRecord>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    /// Loads a CSV export of the first sheet of the aircraft characteristics workbook.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            "Loaded aircraft dataset — path={} records={}",
            path.display(),
            dataset.len()
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        // Header index -> known field, or the raw header for the extra bag
        let columns: Vec<Result<Field, String>> = rdr
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                Field::from_header(h).ok_or_else(|| {
                    let h = h.trim();
                    if h.is_empty() {
                        format!("column_{}", i + 1)
                    } else {
                        h.to_string()
                    }
                })
            })
            .collect();

        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let raw = result?;
            let mut record = AircraftRecord::new();

            for (i, cell) in raw.iter().enumerate() {
                match columns.get(i) {
                    Some(Ok(field)) => record.set(*field, cell),
                    Some(Err(header)) => insert_extra(&mut record, header.clone(), cell),
                    None => insert_extra(&mut record, format!("column_{}", i + 1), cell),
                }
            }

            if record.is_empty() {
                debug!("Skipping blank dataset row — row={}", row + 2);
                continue;
            }
            records.push(Arc::new(record));
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Arc<AircraftRecord>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose model name equals `name`, ignoring case and surrounding whitespace.
    pub fn find_by_model(&self, name: &str) -> Option<&Arc<AircraftRecord>> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|r| r.model_name().is_some_and(|m| m.to_lowercase() == name))
    }
}

fn insert_extra(record: &mut AircraftRecord, header: String, cell: &str) {
    let cell = cell.trim();
    if !cell.is_empty() {
        record.extra.insert(header, cell.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "ICAO_Code,Manufacturer,Model_FAA,Wingspan_ft_without_winglets_sharklets,Wingspan_ft_with_winglets_sharklets,MTOW_lb,FAA_Weight,Note\n\
                          B738,Boeing,737-800,112.6,117.4,\"174,200\",Large,winglet option\n\
                          C172,Cessna,172 Skyhawk,36.1,,2450,Small,\n\
                          ,,,,,,,\n\
                          ZZZZ,Unknown,Mystery,n/a,-5,0,,\n";

    fn load() -> Dataset {
        Dataset::from_reader(Cursor::new(SAMPLE)).unwrap()
    }

    #[test]
    fn test_header_lookup() {
        assert_eq!(Field::from_header("Model_FAA"), Some(Field::ModelFaa));
        assert_eq!(Field::from_header(" MTOW_lb "), Some(Field::Mtow));
        assert_eq!(Field::from_header("model_faa"), None);
        for field in Field::ALL {
            assert_eq!(Field::from_header(field.header()), Some(field));
        }
    }

    #[test]
    fn test_load_skips_blank_rows() {
        let ds = load();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[0].model_name(), Some("737-800"));
        assert_eq!(ds.records()[2].model_name(), Some("Mystery"));
    }

    #[test]
    fn test_numeric_coercion() {
        let ds = load();
        let b738 = &ds.records()[0];
        assert_eq!(b738.wingspan_without_winglets(), Some(112.6));
        assert_eq!(b738.wingspan_with_winglets(), Some(117.4));
        assert_eq!(b738.number(Field::Mtow), Some(174200.0));

        let mystery = &ds.records()[2];
        assert_eq!(mystery.wingspan_without_winglets(), None, "text is absent");
        assert_eq!(mystery.wingspan_with_winglets(), None, "negative is absent");
        assert_eq!(mystery.number(Field::Mtow), None, "zero is absent");
    }

    #[test]
    fn test_comma_handling() {
        assert_eq!(parse_positive("174,200"), Some(174200.0));
        assert_eq!(parse_positive("1,234,567.5"), Some(1234567.5));
        assert_eq!(parse_positive("112,6"), None, "decimal comma is not a thousands group");
        assert_eq!(parse_positive("1,23,456"), None);
        assert_eq!(parse_positive("1234,567"), None);
        assert_eq!(parse_positive(",500"), None);
        assert_eq!(parse_positive("-1,000"), None);
        assert_eq!(parse_positive("112.6"), Some(112.6));
    }

    #[test]
    fn test_text_fields_and_extras() {
        let ds = load();
        let b738 = &ds.records()[0];
        assert_eq!(b738.text(Field::FaaWeight), Some("Large"));
        assert_eq!(b738.extra.get("Note").map(String::as_str), Some("winglet option"));

        let c172 = &ds.records()[1];
        assert!(c172.extra.is_empty());
        assert_eq!(c172.wingspan_with_winglets(), None);
    }

    #[test]
    fn test_ragged_rows_keep_overflow() {
        let csv = "Model_FAA,Length_ft\nA320,123.3,spare\nA321\n";
        let ds = Dataset::from_reader(Cursor::new(csv)).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.records()[0].extra.get("column_3").map(String::as_str),
            Some("spare")
        );
        assert_eq!(ds.records()[1].number(Field::Length), None);
    }

    #[test]
    fn test_find_by_model() {
        let ds = load();
        assert_eq!(
            ds.find_by_model("  172 SKYHAWK ").and_then(|r| r.text(Field::IcaoCode)),
            Some("C172")
        );
        assert!(ds.find_by_model("172").is_none());
        assert!(ds.find_by_model("").is_none());
    }

    #[test]
    fn test_serialize_uses_headers() {
        let record = AircraftRecord::new()
            .with(Field::ModelFaa, "A320")
            .with(Field::Length, "123.3");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Model_FAA"], "A320");
        assert_eq!(json["Length_ft"], 123.3);
    }

    #[test]
    fn test_empty_input() {
        let ds = Dataset::from_reader(Cursor::new("")).unwrap();
        assert!(ds.is_empty());
    }
}
