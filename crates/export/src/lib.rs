//! Export helpers for flight telemetry artifacts.

pub mod telemetry {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use serde::{Deserialize, Serialize};

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// One telemetry row of an exported flight.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Record {
        pub time_s: f64,
        pub altitude_m: f64,
        pub speed_m_s: f64,
        pub mass_kg: f64,
        pub thrust_n: f64,
        pub attitude_rad: f64,
        pub fuel_kg: f64,
    }

    /// Write the telemetry table as CSV, header first.
    pub fn write_csv(writer: &mut dyn Write, records: &[Record]) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

pub mod summary {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use crate::telemetry::Record;

    /// Envelope written next to the CSV table.
    #[derive(Debug, Serialize)]
    pub struct FlightSidecar<'a> {
        pub rocket: &'a str,
        pub body: &'a str,
        pub generated_utc: &'a str,
        pub outcome: &'a str,
        pub elapsed_s: f64,
        pub max_altitude_m: f64,
        pub max_speed_m_s: f64,
        pub final_mass_kg: f64,
        pub propellant_used_kg: f64,
        pub samples: &'a [Record],
    }

    /// Write the JSON sidecar for a completed run.
    pub fn write_sidecar(output: &Path, sidecar: &FlightSidecar<'_>) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(output)?, sidecar)?;
        Ok(())
    }
}
