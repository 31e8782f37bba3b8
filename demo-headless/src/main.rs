use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use arm_swing_core::{ArmSwingConfig, ArmSwingProvider, RigBindings, Vec3};
use clap::Parser;
use nalgebra::{UnitQuaternion, Vector3};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scripted arm-swing session against an in-memory rig
#[derive(Parser, Debug)]
#[command(name = "arm-swing-demo")]
#[command(about = "Headless arm-swing locomotion demo", long_about = None)]
struct Args {
    /// Session duration in seconds
    #[arg(short, long, default_value_t = 10.0)]
    duration: f32,

    /// Frame rate of the simulated headset
    #[arg(long, default_value_t = 90)]
    fps: u32,

    /// Peak hand offset from rest along the swing arc, in meters
    #[arg(short, long, default_value_t = 0.25)]
    amplitude: f32,

    /// Swing cycles per second
    #[arg(short = 'f', long, default_value_t = 1.5)]
    frequency: f32,

    /// Head yaw in degrees (0 = +Z, 90 = +X)
    #[arg(long, default_value_t = 0.0)]
    yaw: f32,

    /// Head pitch in degrees (negative looks down)
    #[arg(long, default_value_t = -15.0)]
    pitch: f32,

    /// Release both grips after this many seconds (never, if omitted)
    #[arg(short, long)]
    release_after: Option<f32>,

    /// Load locomotion settings from a TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report interval in seconds
    #[arg(long, default_value_t = 1.0)]
    report_interval: f32,
}

/// Rig state shared between the script and the bound collaborators.
struct ScriptedRig {
    left_hand: Rc<Cell<Vec3>>,
    right_hand: Rc<Cell<Vec3>>,
    grip: Rc<Cell<f32>>,
    position: Rc<RefCell<Vec3>>,
}

impl ScriptedRig {
    fn left_rest() -> Vec3 {
        Vec3::new(-0.25, 1.0, 0.1)
    }

    fn right_rest() -> Vec3 {
        Vec3::new(0.25, 1.0, 0.1)
    }

    fn new() -> Self {
        Self {
            left_hand: Rc::new(Cell::new(Self::left_rest())),
            right_hand: Rc::new(Cell::new(Self::right_rest())),
            grip: Rc::new(Cell::new(1.0)),
            position: Rc::new(RefCell::new(Vec3::zeros())),
        }
    }

    fn bindings(&self, head_forward: Vec3) -> RigBindings {
        let position = Rc::clone(&self.position);
        let left_hand = Rc::clone(&self.left_hand);
        let right_hand = Rc::clone(&self.right_hand);
        let left_grip = Rc::clone(&self.grip);
        let right_grip = Rc::clone(&self.grip);

        RigBindings::new()
            .with_mover(move |displacement: Vec3| {
                let mut position = position.borrow_mut();
                *position += displacement;
                // Flat floor at y = 0.
                position.y = position.y.max(0.0);
            })
            .with_head_camera(move || head_forward)
            .with_left_hand(move || left_hand.get())
            .with_right_hand(move || right_hand.get())
            .with_left_grip(move || left_grip.get())
            .with_right_grip(move || right_grip.get())
    }

    /// Hands swing in opposite phase along the forward axis.
    fn pose_hands(&self, time: f32, amplitude: f32, frequency: f32) {
        let phase = (std::f32::consts::TAU * frequency * time).sin();
        let offset = Vec3::new(0.0, 0.0, amplitude * phase);
        self.left_hand.set(Self::left_rest() + offset);
        self.right_hand.set(Self::right_rest() - offset);
    }
}

/// Head forward for a yaw about +Y followed by a pitch about the head's X axis.
fn head_forward(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw_degrees.to_radians());
    // Positive rotation about +X tips +Z downwards, so negate to keep "negative looks down".
    let pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -pitch_degrees.to_radians());
    (yaw * pitch) * Vector3::z()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.fps > 0, "fps must be positive");

    let config = match &args.config {
        Some(path) => ArmSwingConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ArmSwingConfig::default(),
    };
    info!(?config, "starting arm-swing session");

    println!("=== Arm-Swing Locomotion Demo ===\n");
    println!(
        "Swing: {:.2} m at {:.1} Hz, head yaw {:.0}°, pitch {:.0}°",
        args.amplitude, args.frequency, args.yaw, args.pitch
    );

    let rig = ScriptedRig::new();
    let bindings = rig.bindings(head_forward(args.yaw, args.pitch));
    let mut provider = ArmSwingProvider::init(bindings, config).context("binding scripted rig")?;

    let dt = 1.0 / args.fps as f32;
    let total_frames = (args.duration * args.fps as f32).ceil() as u32;
    let frames_per_report = ((args.report_interval * args.fps as f32).round() as u32).max(1);
    let mut moving_frames = 0_u32;

    for frame in 1..=total_frames {
        let time = frame as f32 * dt;
        rig.pose_hands(time, args.amplitude, args.frequency);
        if args.release_after.is_some_and(|t| time >= t) {
            rig.grip.set(0.0);
        }

        let report = provider.update(dt);
        if report.locomotion.is_some() {
            moving_frames += 1;
        }

        if frame % frames_per_report == 0 {
            let position = *rig.position.borrow();
            println!(
                "t={:5.1}s  swing={:.3}  grips={}  position=({:6.2}, {:5.2}, {:6.2})",
                time,
                report.swing_speed,
                if report.grips_engaged { "held" } else { "free" },
                position.x,
                position.y,
                position.z
            );
        }
    }

    let position = *rig.position.borrow();
    let travelled = Vec3::new(position.x, 0.0, position.z).norm();
    println!(
        "\nMoved on {moving_frames}/{total_frames} frames, travelled {travelled:.2} m horizontally"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!((actual - expected).norm() < 1e-5, "{actual:?} != {expected:?}");
    }

    #[test]
    fn test_level_head_faces_plus_z() {
        assert_close(head_forward(0.0, 0.0), Vec3::z());
    }

    #[test]
    fn test_yaw_turns_towards_plus_x() {
        assert_close(head_forward(90.0, 0.0), Vec3::x());
    }

    #[test]
    fn test_negative_pitch_looks_down() {
        assert_close(head_forward(0.0, -90.0), -Vec3::y());
        assert_close(head_forward(90.0, -45.0), Vec3::new(0.5_f32.sqrt(), -(0.5_f32.sqrt()), 0.0));
    }
}
