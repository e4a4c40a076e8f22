use std::fs;
use std::path::PathBuf;

use clap::Parser;
use plotters::prelude::*;
use staged_ascent::export::telemetry::Record;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Render altitude and speed profiles from a telemetry CSV"
)]
struct Cli {
    /// Telemetry CSV produced by `fly --csv`
    #[arg(long)]
    input: PathBuf,

    #[arg(long, default_value = "artifacts/flight.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 1024)]
    width: u32,

    #[arg(long, default_value_t = 768)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut reader = csv::Reader::from_path(&cli.input)?;
    let records: Vec<Record> = reader.deserialize().collect::<Result<_, _>>()?;
    if records.is_empty() {
        return Err(anyhow::anyhow!("Telemetry CSV contains no rows"));
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;

    let time_max = records.last().map(|r| r.time_s).unwrap_or(1.0).max(1e-6);
    let altitude_max = records
        .iter()
        .map(|r| r.altitude_m)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let speed_max = records
        .iter()
        .map(|r| r.speed_m_s)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let (upper, lower) = root.split_vertically(cli.height as i32 / 2);

    let mut altitude_chart = ChartBuilder::on(&upper)
        .caption("Altitude", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..time_max, 0.0..altitude_max * 1.05)?;
    altitude_chart
        .configure_mesh()
        .x_desc("time (s)")
        .y_desc("altitude (m)")
        .draw()?;
    altitude_chart.draw_series(LineSeries::new(
        records.iter().map(|r| (r.time_s, r.altitude_m)),
        &BLUE,
    ))?;

    let mut speed_chart = ChartBuilder::on(&lower)
        .caption("Speed", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..time_max, 0.0..speed_max * 1.05)?;
    speed_chart
        .configure_mesh()
        .x_desc("time (s)")
        .y_desc("speed (m/s)")
        .draw()?;
    speed_chart.draw_series(LineSeries::new(
        records.iter().map(|r| (r.time_s, r.speed_m_s)),
        &RED,
    ))?;

    root.present()?;
    println!("Wrote {}", cli.output.display());
    Ok(())
}
