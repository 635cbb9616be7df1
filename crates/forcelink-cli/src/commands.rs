//! CLI command implementations.

use std::path::Path;

use forcelink_adapter::laws::{PulseForce, SigmoidForce, ThresholdForce};
use forcelink_adapter::{DVec3, ForceGenerator, ForceLaw, ForceParticipant};
use forcelink_driver::{CouplingDriver, CouplingScheme, DriverConfig, RigidBody, RunReport};
use forcelink_io::validator::{validate_point_cloud, validate_settings};
use forcelink_io::{ParsePolicy, PointCloudLoader, Settings};

use crate::{LawKind, RunArgs};

// Neodymium cylinder, 6.35 mm diameter and height.
const MAGNET_RADIUS: f64 = 6.35e-3;
const MAGNET_HEIGHT: f64 = 6.35e-3;
const MAGNET_DENSITY: f64 = 7459.0;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn load_settings(config: Option<&Path>) -> Result<Settings, Box<dyn std::error::Error>> {
    let settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    validate_settings(&settings)?;
    tracing::debug!(?settings, "settings validated");
    Ok(settings)
}

fn loader(strict: bool) -> PointCloudLoader {
    let policy = if strict {
        ParsePolicy::Strict
    } else {
        ParsePolicy::Lenient
    };
    PointCloudLoader::new().with_policy(policy)
}

/// Run the participant against the rigid-body driver.
pub fn run(args: &RunArgs) -> CommandResult {
    let settings = load_settings(args.config.as_deref())?;
    let coords = loader(args.strict).load_points(&args.points)?;
    validate_point_cloud(&coords)?;

    println!("forcelink run");
    println!("─────────────");
    println!("Solver:    {}", settings.solver_name);
    println!("Mesh:      {} ({} points)", settings.mesh_name, coords.len() / 3);
    println!("dt / endt: {} / {}", settings.dt, settings.endt);
    println!();

    let force = DVec3::new(0.0, 0.0, args.force);
    match args.law {
        LawKind::Threshold => drive(
            args,
            settings,
            &coords,
            ThresholdForce::new(args.threshold, force),
        ),
        LawKind::Sigmoid => drive(
            args,
            settings,
            &coords,
            SigmoidForce::new(args.threshold, args.width, force),
        ),
        LawKind::Pulse => drive(
            args,
            settings,
            &coords,
            PulseForce::new(args.pulse_start, args.pulse_stop, force),
        ),
    }
}

fn drive<L: ForceLaw>(args: &RunArgs, settings: Settings, coords: &[f64], law: L) -> CommandResult {
    println!("Law:       {}", law.name());

    let generator = ForceGenerator::new(coords, settings)?;
    let mut participant = ForceParticipant::new(generator, law)
        .with_sampling(args.sample)
        .with_output_dir(&args.output_dir);

    let mut body = match args.mass {
        Some(mass) => RigidBody::new(mass),
        None => RigidBody::cylinder(MAGNET_RADIUS, MAGNET_HEIGHT, MAGNET_DENSITY),
    };
    println!("Mass:      {:.6e} kg", body.mass);

    let config = DriverConfig {
        scheme: if args.implicit {
            CouplingScheme::Implicit {
                max_iterations: args.max_iterations,
                tolerance: args.tolerance,
            }
        } else {
            CouplingScheme::Explicit
        },
        max_dt: args.max_dt,
    };
    println!("Scheme:    {:?}", config.scheme);
    println!();

    let report = CouplingDriver::run(&mut participant, &mut body, &config)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("Steps:       {}", report.steps);
    println!("Iterations:  {}", report.iterations);
    println!("Rollbacks:   {}", report.rollbacks);
    if report.unconverged_steps > 0 {
        println!("Unconverged: {}", report.unconverged_steps);
    }
    println!("Final time:  {:.6}s", report.final_time);
    let p = report.final_state.position;
    let f = report.final_force;
    println!("Final disp:  [{:.6e}, {:.6e}, {:.6e}]", p.x, p.y, p.z);
    println!("Final force: [{:.6e}, {:.6e}, {:.6e}]", f.x, f.y, f.z);
    println!("Wall time:   {:.3}ms", report.wall_time * 1000.0);
    if let Some(path) = &report.samples_path {
        println!("Samples written to: {}", path.display());
    }
}

/// Validate a settings document or a point cloud.
pub fn validate(path: &Path, strict: bool) -> CommandResult {
    println!("forcelink validator");
    println!("───────────────────");
    println!();

    if path.extension().is_some_and(|ext| ext == "toml") {
        println!("Validating settings: {}", path.display());
        load_settings(Some(path))?;
        println!("✅ Settings are valid.");
    } else {
        println!("Validating point cloud: {}", path.display());
        let coords = loader(strict).load_points(path)?;
        validate_point_cloud(&coords)?;
        println!("✅ Point cloud is valid ({} points).", coords.len() / 3);
    }

    Ok(())
}

/// Print default or loaded settings.
pub fn settings(config: Option<&Path>) -> CommandResult {
    let settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    print!("{}", settings.dump()?);
    Ok(())
}
