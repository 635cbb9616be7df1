//! Integration tests for forcelink-adapter.

use forcelink_adapter::laws::ThresholdForce;
use forcelink_adapter::{
    DVec3, ForceGenerator, ForceLaw, ForceParticipant, GeneratorState, Participant,
};
use forcelink_io::Settings;
use forcelink_types::{Field, ForcelinkError};

fn magnet() -> ThresholdForce {
    ThresholdForce::new(0.07, DVec3::new(0.0, 0.0, 0.0588))
}

fn four_points() -> Vec<f64> {
    vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
}

fn started(coords: &[f64], settings: Settings) -> ForceGenerator {
    let mut gen = ForceGenerator::new(coords, settings).unwrap();
    gen.start();
    gen
}

// ─── Construction ─────────────────────────────────────────────

#[test]
fn new_generator_is_idle_and_zeroed() {
    let gen = ForceGenerator::new(&four_points(), Settings::default()).unwrap();
    assert_eq!(gen.state(), GeneratorState::Idle);
    assert_eq!(gen.num_coordinates(), 4);
    assert_eq!(gen.displacements().len(), 12);
    assert!(gen.displacements().iter().all(|&u| u == 0.0));
    assert_eq!(gen.force(), DVec3::ZERO);
    assert_eq!(gen.current_time(), 0.0);
    assert!(!gen.has_checkpoint());
    assert_eq!(ForceGenerator::dim(), 3);
}

#[test]
fn coordinates_must_be_triplets() {
    assert!(matches!(
        ForceGenerator::new(&[0.0, 1.0], Settings::default()),
        Err(ForcelinkError::SizeMismatch { .. })
    ));
    assert!(matches!(
        ForceGenerator::new(&[], Settings::default()),
        Err(ForcelinkError::SizeMismatch { .. })
    ));
}

#[test]
fn unknown_configured_field_is_rejected() {
    let settings = Settings {
        out_field: "Heat".into(),
        ..Default::default()
    };
    assert!(matches!(
        ForceGenerator::new(&four_points(), settings),
        Err(ForcelinkError::InvalidField { .. })
    ));
}

#[test]
fn coordinates_are_copied() {
    let gen = ForceGenerator::new(&four_points(), Settings::default()).unwrap();
    assert_eq!(gen.coordinates(), four_points().as_slice());

    let mut out = vec![0.0; 12];
    gen.copy_coordinates(&mut out).unwrap();
    assert_eq!(out, four_points());

    let mut short = vec![0.0; 3];
    assert!(gen.copy_coordinates(&mut short).is_err());
}

// ─── Lifecycle ────────────────────────────────────────────────

#[test]
fn start_resets_displacement_and_force() {
    let mut gen = started(&four_points(), Settings::default());
    gen.set("Displacements", &[0.1; 12]).unwrap();
    gen.solve_time_step(&|_t: f64, _u: DVec3| DVec3::ONE, false);
    assert_eq!(gen.force(), DVec3::ONE);

    gen.start();
    assert_eq!(gen.force(), DVec3::ZERO);
    assert!(gen.displacements().iter().all(|&u| u == 0.0));
    assert_eq!(gen.state(), GeneratorState::Stepping);
}

#[test]
fn begin_time_step_returns_preferred_dt() {
    let settings = Settings {
        dt: 0.002,
        ..Default::default()
    };
    let gen = started(&four_points(), settings);
    assert_eq!(gen.begin_time_step(), 0.002);
    assert_eq!(gen.current_time(), 0.0);
}

#[test]
fn is_running_until_end_time_is_passed() {
    let mut gen = started(&four_points(), Settings::default());
    assert!(gen.is_running());

    gen.advance_time(0.3);
    assert!(gen.is_running(), "current_time == endt still runs");

    gen.advance_time(0.005);
    assert!(!gen.is_running());
}

#[test]
fn clock_does_not_move_by_itself() {
    let mut gen = started(&four_points(), Settings::default());
    for _ in 0..100 {
        gen.save_old_state();
        let _ = gen.begin_time_step();
        gen.solve_time_step(&magnet(), false);
        gen.end_time_step();
    }
    assert_eq!(gen.current_time(), 0.0);
    assert!(gen.is_running());
}

// ─── Field Exchange ───────────────────────────────────────────

#[test]
fn set_displacements_overwrites() {
    let mut gen = started(&four_points(), Settings::default());
    gen.set("Displacements", &[1.0; 12]).unwrap();
    gen.set("Displacements", &[2.0; 12]).unwrap();
    assert!(gen.displacements().iter().all(|&u| u == 2.0));
}

#[test]
fn set_deltas_accumulates() {
    let mut gen = started(&four_points(), Settings::default());
    gen.set("Displacements", &[1.0; 12]).unwrap();
    gen.set("DisplacementDeltas", &[0.25; 12]).unwrap();
    gen.set("DisplacementDeltas", &[0.25; 12]).unwrap();
    assert!(gen.displacements().iter().all(|&u| u == 1.5));
}

#[test]
fn set_rejects_unknown_and_outbound_fields() {
    let mut gen = started(&four_points(), Settings::default());
    for name in ["Forces", "Displacement", "Velocities", ""] {
        match gen.set(name, &[0.0; 12]) {
            Err(ForcelinkError::InvalidField { name: got, .. }) => assert_eq!(got, name),
            other => panic!("{name}: unexpected {other:?}"),
        }
    }
}

#[test]
fn set_rejects_wrong_length_without_mutation() {
    let mut gen = started(&four_points(), Settings::default());
    gen.set("Displacements", &[1.0; 12]).unwrap();
    assert!(matches!(
        gen.set("DisplacementDeltas", &[1.0; 9]),
        Err(ForcelinkError::SizeMismatch { .. })
    ));
    assert!(gen.displacements().iter().all(|&u| u == 1.0));
}

#[test]
fn force_law_sees_first_point_only() {
    let mut gen = started(&four_points(), Settings::default());
    let mut u = vec![9.0; 12];
    u[..3].copy_from_slice(&[0.1, 0.2, 0.3]);
    gen.set("Displacements", &u).unwrap();

    gen.solve_time_step(&|_t: f64, u: DVec3| u * 2.0, false);
    assert_eq!(gen.force(), DVec3::new(0.2, 0.4, 0.6));
}

#[test]
fn force_law_sees_current_time() {
    let mut gen = started(&four_points(), Settings::default());
    gen.advance_time(0.125);
    gen.solve_time_step(&|t: f64, _u: DVec3| DVec3::splat(t), false);
    assert_eq!(gen.force(), DVec3::splat(0.125));
}

#[test]
fn get_spreads_force_over_points() {
    let mut gen = started(&four_points(), Settings::default());
    let u: Vec<f64> = (0..12).map(|i| 0.01 * i as f64).collect();
    gen.set("Displacements", &u).unwrap();

    let law = |_t: f64, u: DVec3| DVec3::new(4.0, -8.0, 2.0) + u;
    gen.solve_time_step(&law, false);
    let expected = law.evaluate(0.0, DVec3::new(u[0], u[1], u[2]));

    let mut forces = vec![0.0; 12];
    gen.get("Forces", &mut forces).unwrap();

    let mut sum = DVec3::ZERO;
    for slot in forces.chunks_exact(3) {
        let f = DVec3::from_slice(slot);
        assert!((f - expected / 4.0).length() < 1e-12);
        sum += f;
    }
    assert!((sum - expected).length() < 1e-12);
}

#[test]
fn get_buffer_size_may_differ_from_point_count() {
    let mut gen = started(&four_points(), Settings::default());
    gen.solve_time_step(&|_t: f64, _u: DVec3| DVec3::new(6.0, 0.0, 0.0), false);

    let mut forces = vec![0.0; 6];
    gen.get("Forces", &mut forces).unwrap();
    assert_eq!(forces, vec![3.0, 0.0, 0.0, 3.0, 0.0, 0.0]);

    let mut empty: Vec<f64> = Vec::new();
    gen.get("Forces", &mut empty).unwrap();
}

#[test]
fn get_rejects_other_fields() {
    let gen = started(&four_points(), Settings::default());
    let mut forces = vec![0.0; 12];
    for name in ["Displacements", "DisplacementDeltas", "forces", "Force"] {
        assert!(matches!(
            gen.get(name, &mut forces),
            Err(ForcelinkError::InvalidField { .. })
        ));
    }
}

#[test]
fn get_rejects_partial_triplets() {
    let gen = started(&four_points(), Settings::default());
    for len in [1, 2, 4, 11, 13] {
        let mut forces = vec![0.0; len];
        assert!(matches!(
            gen.get("Forces", &mut forces),
            Err(ForcelinkError::SizeMismatch { .. })
        ));
    }
}

// ─── Checkpointing ────────────────────────────────────────────

#[test]
fn reload_without_save_fails() {
    let mut gen = started(&four_points(), Settings::default());
    assert!(matches!(gen.reload_old_state(), Err(ForcelinkError::NoSavedState)));
}

#[test]
fn reload_restores_saved_state() {
    let mut gen = started(&four_points(), Settings::default());
    gen.set("Displacements", &[0.08; 12]).unwrap();
    gen.advance_time(0.01);
    gen.solve_time_step(&magnet(), false);
    gen.save_old_state();
    assert_eq!(gen.state(), GeneratorState::CheckpointPending);

    let saved_u = gen.displacements().to_vec();
    let saved_f = gen.force();
    let saved_t = gen.current_time();

    gen.set("DisplacementDeltas", &[-0.05; 12]).unwrap();
    gen.advance_time(0.005);
    gen.solve_time_step(&magnet(), false);
    assert_ne!(gen.force(), saved_f);

    gen.reload_old_state().unwrap();
    assert_eq!(gen.displacements(), saved_u.as_slice());
    assert_eq!(gen.force(), saved_f);
    assert_eq!(gen.current_time(), saved_t);
}

#[test]
fn checkpoint_survives_repeated_rollback() {
    let mut gen = started(&four_points(), Settings::default());
    gen.save_old_state();
    for i in 1..=3 {
        gen.set("Displacements", &[i as f64; 12]).unwrap();
        gen.reload_old_state().unwrap();
        assert!(gen.displacements().iter().all(|&u| u == 0.0));
    }
    assert!(gen.has_checkpoint());
}

#[test]
fn newer_save_replaces_older() {
    let mut gen = started(&four_points(), Settings::default());
    gen.save_old_state();
    gen.set("Displacements", &[0.5; 12]).unwrap();
    gen.save_old_state();
    gen.set("Displacements", &[0.9; 12]).unwrap();

    gen.reload_old_state().unwrap();
    assert!(gen.displacements().iter().all(|&u| u == 0.5));
    assert_eq!(gen.checkpoint().unwrap().displacements(), &[0.5; 12]);
}

#[test]
fn end_time_step_discards_checkpoint() {
    let mut gen = started(&four_points(), Settings::default());
    gen.save_old_state();
    gen.end_time_step();
    assert_eq!(gen.state(), GeneratorState::Stepping);
    assert!(matches!(gen.reload_old_state(), Err(ForcelinkError::NoSavedState)));
}

// ─── Sampling and Shutdown ────────────────────────────────────

#[test]
fn stop_without_samples_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut gen = started(&four_points(), Settings::default());
    gen.solve_time_step(&magnet(), false);
    assert_eq!(gen.stop_to(dir.path()).unwrap(), None);
    assert!(!dir.path().join("forces.csv").exists());
    assert_eq!(gen.state(), GeneratorState::Stopped);
}

#[test]
fn sampled_steps_are_written_on_stop() {
    let dir = tempfile::tempdir().unwrap();
    let mut gen = started(&four_points(), Settings::default());

    gen.set("Displacements", &[0.0; 12]).unwrap();
    gen.solve_time_step(&magnet(), true);
    let mut u = vec![0.0; 12];
    u[2] = 0.08;
    gen.set("Displacements", &u).unwrap();
    gen.solve_time_step(&magnet(), true);
    gen.solve_time_step(&magnet(), false);

    assert_eq!(gen.samples().len(), 2);
    assert_eq!(gen.samples()[1], [0.0, 0.0, 0.08, 0.0, 0.0, 0.0588]);

    let path = gen.stop_to(dir.path()).unwrap().unwrap();
    assert_eq!(path, dir.path().join("forces.csv"));
    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with('#'));
    assert!(lines[2].contains("8.0000000e-02"));
    assert!(lines[2].contains("5.8800000e-02"));
    assert!(gen.samples().is_empty());
}

// ─── Scenario ─────────────────────────────────────────────────

#[test]
fn single_point_magnet_scenario() {
    let settings = Settings {
        dt: 0.005,
        endt: 0.01,
        ..Default::default()
    };
    let mut gen = ForceGenerator::new(&[0.0, 0.0, 0.0], settings).unwrap();
    gen.start();

    let dt = gen.begin_time_step();
    assert_eq!(dt, 0.005);
    gen.set("Displacements", &[0.0, 0.0, 0.08]).unwrap();
    gen.solve_time_step(&magnet(), false);

    let mut forces = [0.0; 3];
    gen.get("Forces", &mut forces).unwrap();
    assert_eq!(forces, [0.0, 0.0, 0.0588]);
}

// ─── Participant ──────────────────────────────────────────────

#[test]
fn participant_forwards_to_generator() {
    let dir = tempfile::tempdir().unwrap();
    let gen = ForceGenerator::new(&four_points(), Settings::default()).unwrap();
    let mut p = ForceParticipant::new(gen, magnet())
        .with_sampling(true)
        .with_output_dir(dir.path());

    assert_eq!(p.name(), "ts_dummy_adapter");
    assert_eq!(p.num_points(), 4);
    assert_eq!(p.in_field(), Field::Displacements);
    assert_eq!(p.out_field(), Field::Forces);

    p.start();
    p.save_old_state();
    let mut u = vec![0.0; 12];
    u[2] = 0.1;
    p.set(Field::Displacements, &u).unwrap();
    p.solve_time_step().unwrap();
    let mut f = vec![0.0; 12];
    p.get(Field::Forces, &mut f).unwrap();
    assert!((f.iter().sum::<f64>() - 0.0588).abs() < 1e-12);

    p.reload_old_state().unwrap();
    p.end_time_step();
    p.advance_time(0.005);
    assert_eq!(p.generator().current_time(), 0.005);

    let written = p.stop().unwrap();
    assert_eq!(written, Some(dir.path().join("forces.csv")));
}
