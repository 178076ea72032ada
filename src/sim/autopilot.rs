//! Demo pilot
//!
//! Reads the simulation and produces the same inputs a player would: turn
//! toward the nearest asteroid, fire once lined up, and back away from rocks
//! that get too close. It only writes to the input snapshot, so the tick sees
//! nothing different from keyboard play.

use glam::Vec2;

use super::entity::Entity;
use super::state::Simulation;
use crate::input::InputState;

/// Rocks closer than this (pixels) make the pilot retreat
const DANGER_RADIUS: f32 = 140.0;
/// Fire when the aim error is below this (degrees)
const FIRE_CONE_DEG: f32 = 8.0;
/// Stop turning when the aim error is below this (degrees)
const AIM_DEADZONE_DEG: f32 = 2.0;
/// Drift back toward the centre beyond this fraction of the arena height
const HOME_RADIUS_FRACTION: f32 = 0.25;

/// Inputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PilotCommand {
    pub axes: (i8, i8),
    /// -1 turn left, 0 hold, 1 turn right
    pub rotate: i8,
    pub fire: bool,
}

impl PilotCommand {
    pub fn apply(&self, input: &mut InputState) {
        input.set_axes(self.axes.0, self.axes.1);
        input.set_rotation(self.rotate);
        input.set_fire(self.fire);
    }
}

/// Heading in degrees (0 = up, clockwise) that points along `dir`
pub fn heading_toward(dir: Vec2) -> f32 {
    dir.x.atan2(-dir.y).to_degrees()
}

/// Signed smallest turn from `from` to `to`, in (-180, 180]
pub fn angle_between(from: f32, to: f32) -> f32 {
    let diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 { diff - 360.0 } else { diff }
}

fn sign_with_deadzone(v: f32, deadzone: f32) -> i8 {
    if v > deadzone {
        1
    } else if v < -deadzone {
        -1
    } else {
        0
    }
}

fn nearest_asteroid<'a>(sim: &'a Simulation, from: Vec2) -> Option<&'a Entity> {
    sim.entities
        .iter()
        .filter(|e| e.is_asteroid())
        .min_by(|a, b| {
            a.pos
                .distance_squared(from)
                .partial_cmp(&b.pos.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Decide this tick's inputs
pub fn decide(sim: &Simulation) -> PilotCommand {
    let Some(ship) = sim.player() else {
        return PilotCommand::default();
    };

    let mut cmd = PilotCommand::default();

    if let Some(rock) = nearest_asteroid(sim, ship.pos) {
        let to_rock = rock.pos - ship.pos;
        let error = angle_between(ship.rotation, heading_toward(to_rock));
        cmd.rotate = sign_with_deadzone(error, AIM_DEADZONE_DEG);
        cmd.fire = error.abs() < FIRE_CONE_DEG;

        if to_rock.length() < DANGER_RADIUS {
            let away = -to_rock;
            cmd.axes = (sign_with_deadzone(away.x, 1.0), sign_with_deadzone(away.y, 1.0));
            return cmd;
        }
    }

    let home = sim.arena.center() - ship.pos;
    let leash = sim.arena.height * HOME_RADIUS_FRACTION;
    if home.length() > leash {
        cmd.axes = (sign_with_deadzone(home.x, 1.0), sign_with_deadzone(home.y, 1.0));
    }

    cmd
}
