use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use staged_ascent::export::{summary, telemetry};
use staged_ascent::flight::{AscentConfig, Environment, run_ascent};
use staged_ascent::{scenario, units};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Fly a configured rocket through a discrete-time ascent"
)]
struct Cli {
    /// Rocket name from the catalog (case-insensitive)
    #[arg(long)]
    rocket: String,

    /// Launch body name from the catalog (case-insensitive)
    #[arg(long, default_value = "EARTH")]
    body: String,

    /// Integration time step in seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// Simulation budget in seconds
    #[arg(long, default_value_t = 600.0)]
    max_time: f64,

    /// Constant roll rate in degrees per second
    #[arg(long, default_value_t = 0.0)]
    roll_rate: f64,

    /// Telemetry CSV output path (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// JSON summary sidecar output path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Catalog directory holding `rockets/` and `bodies/`
    #[arg(long, default_value = "configs")]
    config_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let rockets = scenario::load_rockets(cli.config_dir.join("rockets"))?;
    let bodies = scenario::load_bodies(cli.config_dir.join("bodies"))?;

    let rocket_cfg = scenario::select_rocket(&rockets, &cli.rocket)?;
    let body_cfg = scenario::select_body(&bodies, &cli.body)?;
    let mut rocket = scenario::build_rocket(rocket_cfg)?;
    let env = Environment::from_config(body_cfg);

    let ascent_cfg = AscentConfig {
        time_step_s: cli.dt,
        max_time_s: cli.max_time,
        roll_rate_rad_s: units::deg_to_rad(cli.roll_rate),
        ..AscentConfig::default()
    };
    let flight = run_ascent(&mut rocket, &env, &ascent_cfg)?;

    println!("=== Flight Profile ===");
    println!("Rocket          : {}", rocket_cfg.name);
    println!("Launch body     : {}", body_cfg.name);
    println!("Outcome         : {}", flight.outcome);
    println!("Elapsed         : {:.1} s", flight.elapsed_s);
    println!("Max altitude    : {:.1} m", flight.max_altitude_m);
    println!("Max speed       : {:.1} m/s", flight.max_speed_m_s);
    println!("Final mass      : {:.1} kg", flight.final_mass_kg);
    println!("Propellant used : {:.1} kg", flight.propellant_used_kg);
    for event in &flight.staging {
        println!("Staging         : {:?} at t = {:.1} s", event.action, event.time_s);
    }

    let records: Vec<telemetry::Record> = flight
        .samples
        .iter()
        .map(|s| telemetry::Record {
            time_s: s.time_s,
            altitude_m: s.altitude_m,
            speed_m_s: s.speed_m_s,
            mass_kg: s.mass_kg,
            thrust_n: s.thrust_n,
            attitude_rad: s.attitude_rad,
            fuel_kg: s.fuel_kg,
        })
        .collect();

    if let Some(path) = &cli.csv {
        let mut writer = telemetry::writer_for_path(path)?;
        telemetry::write_csv(&mut *writer, &records)?;
    }

    if let Some(path) = &cli.json {
        let generated_utc = Utc::now().to_rfc3339();
        let sidecar = summary::FlightSidecar {
            rocket: &rocket_cfg.name,
            body: &body_cfg.name,
            generated_utc: &generated_utc,
            outcome: flight.outcome.as_str(),
            elapsed_s: flight.elapsed_s,
            max_altitude_m: flight.max_altitude_m,
            max_speed_m_s: flight.max_speed_m_s,
            final_mass_kg: flight.final_mass_kg,
            propellant_used_kg: flight.propellant_used_kg,
            samples: &records,
        };
        summary::write_sidecar(path, &sidecar)?;
    }

    Ok(())
}
