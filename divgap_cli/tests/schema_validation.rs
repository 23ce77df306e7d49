use chrono::NaiveDate;
use divgap_lib::{to_json_string, DividendEvent, GapOutcome};
use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_schema() -> Value {
    let path = workspace_root()
        .join("schema")
        .join("dividend_event.schema.json");
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn sample_events() -> Vec<DividendEvent> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

    let mut computed = DividendEvent::new("SBER", date(2024, 7, 11), 33.3);
    computed.pre_price = Some(327.2);
    computed.post_price = Some(297.0);
    computed.yield_pct = 10.177;
    computed.gap_pct = 9.229;
    computed.outcome = GapOutcome::Computed;
    computed.report_label = "Положительный".to_string();

    let mut missing = DividendEvent::new("SBER", date(2022, 5, 12), 1.0);
    missing.pre_price = Some(130.0);
    missing.outcome = GapOutcome::MissingPrice;

    let mut failed = DividendEvent::new("SBER", date(2019, 6, 13), 16.0);
    failed.outcome = GapOutcome::FetchFailed {
        reason: "operation timed out".to_string(),
    };

    let insufficient = {
        let mut e = DividendEvent::new("SBER", date(2020, 10, 5), 18.7);
        e.outcome = GapOutcome::InsufficientData { candles: 0 };
        e
    };

    vec![computed, missing, failed, insufficient]
}

fn export_value(events: &[DividendEvent]) -> Value {
    serde_json::from_str(&to_json_string(events).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Positive validation: exports conform to the schema
// ---------------------------------------------------------------------------

#[test]
fn test_export_conforms_to_schema() {
    let schema = load_schema();
    let data = export_value(&sample_events());

    let validator = jsonschema::draft202012::new(&schema).expect("export schema compiles");
    let result = validator.validate(&data);
    if let Err(e) = &result {
        panic!("export failed validation: {e}");
    }
}

#[test]
fn test_empty_export_conforms_to_schema() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("export schema compiles");
    assert!(validator.is_valid(&export_value(&[])));
}

// ---------------------------------------------------------------------------
// Negative validation: the schema rejects malformed records
// ---------------------------------------------------------------------------

#[test]
fn test_schema_rejects_unknown_status() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("export schema compiles");

    let mut data = export_value(&sample_events());
    data[0]["status"] = Value::String("done".to_string());
    assert!(!validator.is_valid(&data));
}

#[test]
fn test_schema_rejects_missing_field() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("export schema compiles");

    let mut data = export_value(&sample_events());
    data[0].as_object_mut().unwrap().remove("gap");
    assert!(!validator.is_valid(&data));
}

#[test]
fn test_schema_rejects_extra_field() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("export schema compiles");

    let mut data = export_value(&sample_events());
    data[1]["note"] = Value::String("unexpected".to_string());
    assert!(!validator.is_valid(&data));
}

#[test]
fn test_schema_rejects_dotted_date() {
    let schema = load_schema();
    let validator = jsonschema::draft202012::new(&schema).expect("export schema compiles");

    let mut data = export_value(&sample_events());
    data[2]["date"] = Value::String("13.06.2019".to_string());
    assert!(!validator.is_valid(&data));
}
