use staged_ascent::config::StageConfig;
use staged_ascent::vehicle::{Payload, Rocket, RocketError, Stage, StageError};
use staged_ascent::vector::{self, Vector3};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn approx_vec(a: &Vector3, b: &Vector3) -> bool {
    approx(a[0], b[0]) && approx(a[1], b[1]) && approx(a[2], b[2])
}

fn stage(dry_mass_kg: f64, fuel_mass_kg: f64, max_thrust_n: f64, max_dmdt_kg_s: f64) -> Stage {
    Stage::from_config(&StageConfig {
        dry_mass_kg,
        fuel_mass_kg,
        max_thrust_n,
        max_dmdt_kg_s,
        ..StageConfig::default()
    })
    .expect("stage config")
}

fn empty_rocket() -> Rocket {
    Rocket::new(vector::ZERO, 0.5, 1.0).expect("rocket")
}

#[test]
fn construction_validates_drag_and_area() {
    assert!(matches!(
        Rocket::new(vector::ZERO, 0.0, 1.0),
        Err(RocketError::InvalidDragCoefficient(_))
    ));
    assert!(matches!(
        Rocket::new(vector::ZERO, f64::NAN, 1.0),
        Err(RocketError::InvalidDragCoefficient(_))
    ));
    assert!(matches!(
        Rocket::new(vector::ZERO, 0.5, -2.0),
        Err(RocketError::InvalidCrossSection(_))
    ));
}

#[test]
fn new_rocket_starts_upright_and_at_rest() {
    let rocket = empty_rocket();
    assert_eq!(rocket.axis(), vector::UP);
    assert_eq!(rocket.momentum_kg_m_s(), vector::ZERO);
    assert_eq!(rocket.roll_rate_rad_s(), 0.0);
    assert!(approx(rocket.attitude_rad(), 0.0));
}

#[test]
fn single_stage_scenario_matches_hand_calculation() {
    let mut rocket = empty_rocket();
    rocket.add_stage(stage(100.0, 50.0, 1000.0, 5.0));
    rocket.adjust_throttle(100.0).expect("throttle");

    let active = rocket.active_stage().expect("active stage");
    assert!(approx(active.current_thrust_n(), 1000.0));
    assert!(approx(active.current_fuel_consumption_kg_s(), 5.0));
    assert!(approx_vec(&rocket.total_thrust(), &[0.0, 1000.0, 0.0]));

    rocket.update_total_mass(2.0).expect("tick");
    let active = rocket.active_stage().expect("active stage");
    assert!(approx(active.fuel_mass_kg(), 40.0));
    assert!(approx(rocket.total_mass_kg(), 140.0));
}

#[test]
fn thrust_is_zero_without_stages_or_boosters() {
    let mut rocket = empty_rocket();
    rocket.add_payload(Payload::new(25.0).expect("payload"));
    assert_eq!(rocket.total_thrust(), vector::ZERO);
    assert_eq!(rocket.active_stage_thrust(), vector::ZERO);
    assert_eq!(rocket.srb_thrust(), vector::ZERO);
    assert!(approx(rocket.total_mass_kg(), 25.0));
}

#[test]
fn only_the_active_stage_burns() {
    let mut rocket = empty_rocket();
    rocket.add_stage(stage(100.0, 50.0, 1000.0, 5.0));
    rocket.add_stage(stage(60.0, 30.0, 500.0, 3.0));
    rocket.adjust_throttle(100.0).expect("throttle");
    rocket.update_total_mass(2.0).expect("tick");

    let fuels: Vec<f64> = rocket.stages().map(Stage::fuel_mass_kg).collect();
    assert!(approx(fuels[0], 40.0));
    assert!(approx(fuels[1], 30.0));
}

#[test]
fn update_total_mass_rejects_bad_time_steps() {
    let mut rocket = empty_rocket();
    for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            rocket.update_total_mass(dt),
            Err(RocketError::InvalidTimeStep(_))
        ));
    }
}

#[test]
fn separation_scales_momentum_with_shed_mass() {
    let mut rocket = empty_rocket();
    rocket.add_stage(stage(100.0, 50.0, 1000.0, 5.0));
    rocket.add_stage(stage(60.0, 30.0, 500.0, 3.0));
    rocket.add_payload(Payload::new(20.0).expect("payload"));
    rocket.set_momentum_kg_m_s([0.0, 520.0, 0.0]);

    let mass_before = rocket.total_mass_kg();
    assert!(approx(mass_before, 260.0));
    let velocity_before = rocket.velocity_m_s();

    let spent = rocket.separate_active_stage().expect("separation");
    assert!(approx(spent.dry_mass_kg(), 100.0));

    let mass_after = rocket.total_mass_kg();
    assert!(approx(mass_after, 110.0));
    // momentum' = momentum * (M'/M); velocity is carried over unchanged.
    assert!(approx_vec(
        &rocket.momentum_kg_m_s(),
        &[0.0, 520.0 * mass_after / mass_before, 0.0]
    ));
    assert!(approx_vec(&rocket.velocity_m_s(), &velocity_before));
    assert_eq!(rocket.stage_count(), 1);
}

#[test]
fn separation_preconditions_are_enforced() {
    let mut rocket = empty_rocket();
    assert!(matches!(
        rocket.separate_active_stage(),
        Err(RocketError::NoStagesRemaining)
    ));
    assert!(matches!(
        rocket.separate_srbs(),
        Err(RocketError::NoBoostersRemaining)
    ));

    // A stage with every parameter defaulted has zero mass, so the bulk
    // velocity is undefined at separation time.
    rocket.add_stage(Stage::from_config(&StageConfig::default()).expect("stage"));
    assert!(matches!(
        rocket.separate_active_stage(),
        Err(RocketError::MasslessSeparation)
    ));
}

#[test]
fn booster_group_fires_and_separates_as_one_unit() {
    let mut rocket = empty_rocket();
    rocket.add_srb(stage(10.0, 5.0, 200.0, 2.0));
    rocket.add_srb(stage(10.0, 5.0, 200.0, 2.0));
    rocket.add_payload(Payload::new(10.0).expect("payload"));

    rocket.ignite_srbs();
    assert!(rocket.srbs().iter().all(|srb| srb.throttle_pct() == 100.0));
    assert!(approx_vec(&rocket.srb_thrust(), &[0.0, 400.0, 0.0]));

    rocket.set_momentum_kg_m_s([0.0, 120.0, 0.0]);
    let velocity_before = rocket.velocity_m_s();
    let spent = rocket.separate_srbs().expect("booster separation");
    assert_eq!(spent.len(), 2);
    assert!(rocket.srbs().is_empty());
    assert!(approx_vec(&rocket.velocity_m_s(), &velocity_before));
    assert!(approx_vec(&rocket.momentum_kg_m_s(), &[0.0, 30.0, 0.0]));
}

#[test]
fn throttle_commands_forward_to_the_active_stage() {
    let mut rocket = empty_rocket();
    // With no stages there is nothing to command; even an out-of-range
    // value is silently ignored.
    assert!(rocket.adjust_throttle(150.0).is_ok());

    rocket.add_stage(stage(100.0, 50.0, 1000.0, 5.0));
    assert!(matches!(
        rocket.adjust_throttle(150.0),
        Err(RocketError::Stage(StageError::ThrottleOutOfRange(_)))
    ));
    rocket.adjust_throttle(60.0).expect("valid throttle");
    assert!(approx(
        rocket.active_stage().expect("stage").throttle_pct(),
        60.0
    ));
}

#[test]
fn attitude_round_trips_through_a_half_turn() {
    let mut rocket = empty_rocket();
    assert!(approx(rocket.attitude_rad(), 0.0));

    let dt = 0.5;
    rocket
        .set_roll_rate(std::f64::consts::PI / dt)
        .expect("roll rate");
    rocket.set_attitude(dt);

    let axis = rocket.axis();
    assert!(axis[0].abs() < 1e-9);
    assert!((axis[1] + 1.0).abs() < 1e-9);
    assert!(axis[2].abs() < 1e-9);
    assert!((rocket.attitude_rad() - std::f64::consts::PI).abs() < 1e-9);
}

#[test]
fn roll_rate_must_be_finite() {
    let mut rocket = empty_rocket();
    assert!(matches!(
        rocket.set_roll_rate(f64::NAN),
        Err(RocketError::InvalidRollRate(_))
    ));
    assert!(rocket.set_roll_rate(-0.25).is_ok());
    assert_eq!(rocket.roll_rate_rad_s(), -0.25);
}

#[test]
fn velocity_is_zero_for_a_massless_rocket() {
    let mut rocket = empty_rocket();
    rocket.set_momentum_kg_m_s([0.0, 10.0, 0.0]);
    assert_eq!(rocket.velocity_m_s(), vector::ZERO);
}

#[test]
fn display_reports_components_and_total_mass() {
    let mut rocket = empty_rocket();
    rocket.add_stage(stage(100.0, 50.0, 1000.0, 5.0));
    rocket.add_payload(Payload::new(20.0).expect("payload"));
    let text = format!("{rocket}");
    assert!(text.contains("Drag coefficient: 0.50"));
    assert!(text.contains("Total mass: 170.00 kg"));
    assert!(text.contains("Payload mass is 20.00 kg."));
}
