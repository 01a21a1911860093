//! Guided tour demo
//!
//! Builds a small in-memory scene and a scripted timeline, then runs the
//! director through one full playback: waypoint follows, a passenger
//! hand-off on the second step, fades across boundaries, and the final
//! restore when the timeline completes.
//!
//! Usage:
//!   cargo run --example guided_tour -- --mode navigation-rig
//!   cargo run --example guided_tour -- --mode secondary-camera

use clap::Parser;
use glam::{Quat, Vec3};

use director::{
    Director, DirectorSettings, MemoryRig, MemoryScene, Mode, ScriptedTimeline, Transform,
    ViewerRig, Waypoint, status_line,
};

/// Director guided tour.
#[derive(Parser, Debug)]
#[command(name = "guided_tour")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Coordination mode (navigation-rig, secondary-camera)
    #[arg(short, long, default_value = "navigation-rig")]
    mode: String,

    /// Simulated frame delta in seconds
    #[arg(long, default_value_t = 0.05)]
    dt: f32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let mode = match args.mode.as_str() {
        "secondary-camera" => Mode::SecondaryCamera,
        _ => Mode::NavigationRig,
    };

    let mut scene = MemoryScene::new()
        .with_atom("Overlook", Transform::from_position(Vec3::new(0.0, 2.0, 5.0)))
        .with_atom("Fireside", Transform::from_position(Vec3::new(-4.0, 1.5, 0.0)))
        .with_atom("Doorway", Transform::from_position(Vec3::new(3.0, 1.6, -2.0)))
        .with_string_param("Fireside", "plugin#0_DirectorStep", "Passenger", "Host")
        .with_atom("Host", Transform::from_position(Vec3::new(-4.0, 0.0, 1.0)))
        .with_bool_param("Host", "plugin#0_Passenger", "Active", false)
        .with_atom("WindowCamera", Transform::from_position(Vec3::new(0.0, 2.0, 0.0)))
        .with_bool_param("WindowCamera", "CameraControl", "cameraOn", false)
        .with_controller("WindowCamera", "control");

    let mut rig = MemoryRig::new();
    let mut timeline = ScriptedTimeline::new()
        .with_waypoint(Waypoint::new(
            "Overlook",
            Vec3::new(0.0, 2.0, 5.0),
            Quat::from_rotation_y(std::f32::consts::PI),
            0.0,
        ))
        .with_waypoint(
            Waypoint::new("Fireside", Vec3::new(-4.0, 1.5, 0.0), Quat::IDENTITY, 4.0)
                .with_transition_in(0.8),
        )
        .with_waypoint(Waypoint::new(
            "Doorway",
            Vec3::new(3.0, 1.6, -2.0),
            Quat::from_rotation_y(-0.5),
            8.0,
        ))
        .with_duration(10.0);

    let mut director = Director::new(DirectorSettings {
        mode,
        diagnostics: true,
        ..DirectorSettings::default()
    });
    if director.init(&timeline).is_err() {
        std::process::exit(1);
    }

    if let Err(e) = director.play_once_from_start(&mut scene, &mut rig, &mut timeline) {
        eprintln!("failed to start tour: {e}");
        std::process::exit(1);
    }

    let mut elapsed = 0.0;
    while director.is_active() {
        timeline.advance(args.dt);
        director.update(args.dt, &mut scene, &mut rig, &mut timeline);
        elapsed += args.dt;
        // Print roughly twice a second.
        if (elapsed / args.dt) as u32 % 10 == 0 {
            println!("{}", status_line(&director, &timeline));
        }
    }

    println!(
        "tour complete; rig restored to {:?} (height trim {:.2})",
        rig.position(),
        rig.height_adjust()
    );
}
