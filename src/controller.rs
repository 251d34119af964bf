//! Discrete camera control.
//!
//! Each [`Command`] moves, turns or zooms the camera by a fixed step and then
//! regenerates every ray.

use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::{Result, TricastError};
use crate::vector::{rotate_around_free_axis, Rotate, Z_AXIS};

/// Camera control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    /// Move along the view direction.
    Forward,
    /// Move against the view direction.
    Backward,
    /// Move left in the horizontal plane.
    StrafeLeft,
    /// Move right in the horizontal plane.
    StrafeRight,
    /// Move towards the camera's up side.
    Up,
    /// Move towards the camera's down side.
    Down,
    /// Turn left around the world Z axis.
    YawLeft,
    /// Turn right around the world Z axis.
    YawRight,
    /// Tilt the view direction up.
    PitchUp,
    /// Tilt the view direction down.
    PitchDown,
    /// Lengthen the focal length.
    ZoomIn,
    /// Shorten the focal length.
    ZoomOut,
    /// Leave the pose alone.
    #[default]
    None,
}

impl Command {
    /// Every command, in declaration order.
    pub const ALL: [Command; 13] = [
        Command::Forward,
        Command::Backward,
        Command::StrafeLeft,
        Command::StrafeRight,
        Command::Up,
        Command::Down,
        Command::YawLeft,
        Command::YawRight,
        Command::PitchUp,
        Command::PitchDown,
        Command::ZoomIn,
        Command::ZoomOut,
        Command::None,
    ];

    /// Map a key of the classic layout (`w s a d t g q e r f z x`) to a command.
    ///
    /// Unmapped keys are `Command::None`.
    pub fn from_key(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'w' => Command::Forward,
            's' => Command::Backward,
            'a' => Command::StrafeLeft,
            'd' => Command::StrafeRight,
            't' => Command::Up,
            'g' => Command::Down,
            'q' => Command::YawLeft,
            'e' => Command::YawRight,
            'r' => Command::PitchUp,
            'f' => Command::PitchDown,
            'z' => Command::ZoomIn,
            'x' => Command::ZoomOut,
            _ => Command::None,
        }
    }

    /// Kebab-case name of the command.
    pub fn name(self) -> &'static str {
        match self {
            Command::Forward => "forward",
            Command::Backward => "backward",
            Command::StrafeLeft => "strafe-left",
            Command::StrafeRight => "strafe-right",
            Command::Up => "up",
            Command::Down => "down",
            Command::YawLeft => "yaw-left",
            Command::YawRight => "yaw-right",
            Command::PitchUp => "pitch-up",
            Command::PitchDown => "pitch-down",
            Command::ZoomIn => "zoom-in",
            Command::ZoomOut => "zoom-out",
            Command::None => "none",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = TricastError;

    /// Parse a kebab-case name or a single key letter.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let named = Command::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s));
        if let Some(command) = named {
            return Ok(command);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => match Command::from_key(key) {
                Command::None => Err(TricastError::InvalidArgument(format!(
                    "unknown command key '{key}'"
                ))),
                command => Ok(command),
            },
            _ => Err(TricastError::InvalidArgument(format!("unknown command '{s}'"))),
        }
    }
}

/// Step sizes applied per command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Translation per move, in world units.
    pub walk_step: f64,
    /// Rotation per turn, in radians.
    pub rot_step: f64,
    /// Focal length change per zoom.
    pub focal_step: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            walk_step: 0.3,
            rot_step: 10f64.to_radians(),
            focal_step: 0.1,
        }
    }
}

impl ControllerSettings {
    /// Check that every step is positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("walk_step", self.walk_step),
            ("rot_step", self.rot_step),
            ("focal_step", self.focal_step),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TricastError::InvalidArgument(format!(
                    "{name} must be positive and finite (got {value})"
                )));
            }
        }
        Ok(())
    }
}

impl Camera {
    /// Apply `command` to the pose, then regenerate all rays.
    ///
    /// `Command::None` still regenerates, which is idempotent.
    pub fn control(&mut self, command: Command, settings: &ControllerSettings) {
        use std::f64::consts::FRAC_PI_2;

        let walk = self.direction * settings.walk_step;
        let rot = settings.rot_step;
        // Tilt axis; degenerates when looking straight along Z.
        let side = self.direction.cross(Z_AXIS);

        match command {
            Command::Forward => self.position += walk,
            Command::Backward => self.position -= walk,
            Command::StrafeLeft => self.position += walk.rotate_euler(0.0, 0.0, FRAC_PI_2),
            Command::StrafeRight => self.position += walk.rotate_euler(0.0, 0.0, -FRAC_PI_2),
            Command::Up => self.position += rotate_around_free_axis(walk, side, FRAC_PI_2),
            Command::Down => self.position += rotate_around_free_axis(walk, side, -FRAC_PI_2),
            Command::YawLeft => {
                self.direction = self.direction.rotate_euler(0.0, 0.0, -rot).normalize();
                self.roll += rot;
            }
            Command::YawRight => {
                self.direction = self.direction.rotate_euler(0.0, 0.0, rot).normalize();
                self.roll -= rot;
            }
            Command::PitchUp => {
                self.direction = rotate_around_free_axis(self.direction, side, rot).normalize();
            }
            Command::PitchDown => {
                self.direction = rotate_around_free_axis(self.direction, side, -rot).normalize();
            }
            Command::ZoomIn => self.focal_length += settings.focal_step,
            Command::ZoomOut => self.focal_length -= settings.focal_step,
            Command::None => {}
        }

        if command != Command::None {
            trace!("{command}: position {:?}, direction {:?}", self.position, self.direction);
        }
        self.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSettings;
    use crate::raster::Raster;
    use crate::vector::Vector;
    use approx::assert_abs_diff_eq;

    fn camera(direction: Vector) -> Camera {
        let settings = CameraSettings {
            position: Vector::ZERO,
            direction,
            roll: 0.0,
            focal_length: 2.0,
            field_width: 1.0,
            field_height: 1.0,
            depth: 10.0,
        };
        Camera::new(Raster::rgb(3, 3).unwrap(), settings).unwrap()
    }

    fn assert_vec_eq(a: Vector, b: Vector) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn walking_moves_along_direction() {
        let settings = ControllerSettings::default();
        let mut cam = camera(Vector::X);
        cam.control(Command::Forward, &settings);
        assert_vec_eq(cam.position(), Vector::new(0.3, 0.0, 0.0));
        cam.control(Command::Backward, &settings);
        cam.control(Command::Backward, &settings);
        assert_vec_eq(cam.position(), Vector::new(-0.3, 0.0, 0.0));
    }

    #[test]
    fn strafing_is_horizontal() {
        let settings = ControllerSettings::default();
        let mut cam = camera(Vector::X);
        cam.control(Command::StrafeLeft, &settings);
        assert_vec_eq(cam.position(), Vector::new(0.0, 0.3, 0.0));
        cam.control(Command::StrafeRight, &settings);
        cam.control(Command::StrafeRight, &settings);
        assert_vec_eq(cam.position(), Vector::new(0.0, -0.3, 0.0));
    }

    #[test]
    fn vertical_moves_are_perpendicular_to_view() {
        let settings = ControllerSettings::default();
        let mut cam = camera(Vector::X);
        cam.control(Command::Up, &settings);
        let up = cam.position();
        assert_abs_diff_eq!(up.length(), 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(up.dot(Vector::X), 0.0, epsilon = 1e-12);
        cam.control(Command::Down, &settings);
        assert_vec_eq(cam.position(), Vector::ZERO);
    }

    #[test]
    fn yaw_turns_and_rolls() {
        let settings = ControllerSettings::default();
        let mut cam = camera(Vector::X);
        cam.control(Command::YawLeft, &settings);
        let (sin, cos) = settings.rot_step.sin_cos();
        assert_vec_eq(cam.direction(), Vector::new(cos, -sin, 0.0));
        assert_abs_diff_eq!(cam.roll(), settings.rot_step, epsilon = 1e-12);
        cam.control(Command::YawRight, &settings);
        assert_vec_eq(cam.direction(), Vector::X);
        assert_abs_diff_eq!(cam.roll(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn pitch_keeps_direction_unit_and_reverses() {
        let settings = ControllerSettings::default();
        let mut cam = camera(Vector::new(1.0, 1.0, 0.0));
        let start = cam.direction();
        cam.control(Command::PitchUp, &settings);
        assert_abs_diff_eq!(cam.direction().length(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cam.direction().dot(start), settings.rot_step.cos(), epsilon = 1e-12);
        cam.control(Command::PitchDown, &settings);
        assert_vec_eq(cam.direction(), start);
    }

    #[test]
    fn pitch_along_z_is_a_no_op() {
        let settings = ControllerSettings::default();
        let mut cam = camera(Vector::Z);
        cam.control(Command::PitchUp, &settings);
        assert_vec_eq(cam.direction(), Vector::Z);
    }

    #[test]
    fn zoom_changes_focal_length() {
        let settings = ControllerSettings::default();
        let mut cam = camera(Vector::X);
        cam.control(Command::ZoomIn, &settings);
        assert_abs_diff_eq!(cam.focal_length(), 2.1, epsilon = 1e-12);
        cam.control(Command::ZoomOut, &settings);
        cam.control(Command::ZoomOut, &settings);
        assert_abs_diff_eq!(cam.focal_length(), 1.9, epsilon = 1e-12);
    }

    #[test]
    fn no_command_regenerates_identically() {
        let mut cam = camera(Vector::new(0.3, -1.0, 0.2));
        let rays = cam.rays().to_vec();
        cam.control(Command::None, &ControllerSettings::default());
        assert_eq!(cam.rays(), &rays[..]);
    }

    #[test]
    fn parses_names_and_keys() {
        assert_eq!("w".parse::<Command>().unwrap(), Command::Forward);
        assert_eq!("strafe-left".parse::<Command>().unwrap(), Command::StrafeLeft);
        assert_eq!("Zoom-Out".parse::<Command>().unwrap(), Command::ZoomOut);
        assert_eq!("none".parse::<Command>().unwrap(), Command::None);
        assert!("k".parse::<Command>().is_err());
        assert!("sideways".parse::<Command>().is_err());
        for command in Command::ALL {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn key_map_covers_every_motion() {
        let keys = "wsadtgqerfzx";
        let mapped: Vec<Command> = keys.chars().map(Command::from_key).collect();
        assert_eq!(mapped, Command::ALL[..12].to_vec());
        assert_eq!(Command::from_key('?'), Command::None);
    }

    #[test]
    fn validates_steps() {
        assert!(ControllerSettings::default().validate().is_ok());
        let bad = ControllerSettings {
            rot_step: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
