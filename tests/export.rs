use staged_ascent::export::summary::{FlightSidecar, write_sidecar};
use staged_ascent::export::telemetry::{Record, write_csv, writer_for_path};

fn sample_records() -> Vec<Record> {
    (0..3)
        .map(|i| Record {
            time_s: i as f64,
            altitude_m: 10.0 * i as f64,
            speed_m_s: 5.0 * i as f64,
            mass_kg: 140.0 - i as f64,
            thrust_n: 1000.0,
            attitude_rad: 0.0,
            fuel_kg: 50.0 - i as f64,
        })
        .collect()
}

#[test]
fn csv_table_has_header_and_one_row_per_record() {
    let records = sample_records();
    let mut buffer: Vec<u8> = Vec::new();
    write_csv(&mut buffer, &records).expect("write csv");

    let text = String::from_utf8(buffer).expect("utf-8");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("time_s,altitude_m,speed_m_s,mass_kg,thrust_n,attitude_rad,fuel_kg")
    );
    assert_eq!(lines.count(), records.len());
}

#[test]
fn sidecar_round_trips_through_json() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("flight.json");
    let records = sample_records();
    let sidecar = FlightSidecar {
        rocket: "Test Article",
        body: "EARTH",
        generated_utc: "2026-01-01T00:00:00Z",
        outcome: "all stages depleted",
        elapsed_s: 2.0,
        max_altitude_m: 20.0,
        max_speed_m_s: 10.0,
        final_mass_kg: 138.0,
        propellant_used_kg: 2.0,
        samples: &records,
    };
    write_sidecar(&path, &sidecar).expect("write sidecar");

    let text = std::fs::read_to_string(&path).expect("read back");
    let value: serde_json::Value = serde_json::from_str(&text).expect("parse json");
    assert_eq!(value["rocket"], "Test Article");
    assert_eq!(value["outcome"], "all stages depleted");
    assert_eq!(value["samples"].as_array().map(|s| s.len()), Some(3));
}

#[test]
fn writer_for_path_creates_missing_parents() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested/deeper/telemetry.csv");
    {
        let mut writer = writer_for_path(&path).expect("writer");
        write_csv(&mut *writer, &sample_records()).expect("write csv");
    }
    assert!(path.exists());
}
