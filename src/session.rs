//! The per-run game session state.
//!
//! A [`Session`] is created fresh when a run starts and mutated exclusively
//! from within the per-tick schedule; every timed effect (power-up expiry,
//! slide clears) is a tick-counted field rather than an external timer, so a
//! single writer advances everything in a deterministic order.

use bevy_ecs::prelude::*;
use strum_macros::Display;
use tracing::debug;

use crate::constants::{mechanics, scoring, ENVIRONMENTS};
use crate::systems::components::ObjectKind;

/// A time-limited modifier effect activated by collecting a tagged object.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUp {
    /// Breathing bonus aura.
    Breathe,
    /// Negates obstacle hits while active.
    Shield,
    /// Attracts collectibles (visual aura).
    Magnet,
}

/// All mutable state of one playthrough, from start to game over.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Session {
    pub score: u32,
    pub distance: u32,
    pub lives: u8,
    pub coins: u32,
    pub calm_bubbles: u32,
    pub light_rays: u32,
    pub focus_symbols: u32,
    /// Scroll speed in pixels per tick. Non-decreasing while playing.
    pub speed: f32,
    pub power_up: Option<PowerUp>,
    pub power_up_ticks: u32,
    /// Index into [`ENVIRONMENTS`], rotated at each milestone.
    pub environment: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0,
            distance: 0,
            lives: mechanics::STARTING_LIVES,
            coins: 0,
            calm_bubbles: 0,
            light_rays: 0,
            focus_symbols: 0,
            speed: mechanics::BASE_SPEED,
            power_up: None,
            power_up_ticks: 0,
            environment: 0,
        }
    }
}

impl Session {
    /// Advances the distance/score drip and applies the speed ramp.
    ///
    /// Returns `true` when a distance milestone was crossed this tick (the
    /// speed increased and the environment rotated).
    pub fn advance_distance(&mut self) -> bool {
        self.distance += 1;
        self.score += 1;

        if self.distance % mechanics::MILESTONE_DISTANCE == 0 {
            self.speed = (self.speed + mechanics::SPEED_INCREMENT).min(mechanics::MAX_SPEED);
            self.environment = (self.environment + 1) % ENVIRONMENTS.len();
            debug!(
                distance = self.distance,
                speed = self.speed,
                environment = ENVIRONMENTS[self.environment].name,
                "Distance milestone crossed"
            );
            true
        } else {
            false
        }
    }

    /// Counts down the active power-up, clearing it on expiry.
    pub fn tick_power_up(&mut self) {
        if self.power_up_ticks > 0 {
            self.power_up_ticks -= 1;
            if self.power_up_ticks == 0 {
                debug!(power_up = ?self.power_up, "Power-up expired");
                self.power_up = None;
            }
        }
    }

    /// Activates a power-up, replacing any active one. Last write wins; the
    /// duration does not stack.
    pub fn activate_power_up(&mut self, power_up: PowerUp) {
        debug!(%power_up, replaced = ?self.power_up, "Power-up activated");
        self.power_up = Some(power_up);
        self.power_up_ticks = mechanics::POWER_UP_TICKS;
    }

    /// Applies a collectible pickup: bumps the matching counter, the score,
    /// and (for focus symbols) the coin purse. Non-collectibles are ignored.
    pub fn collect(&mut self, kind: ObjectKind) {
        match kind {
            ObjectKind::CalmBubble => {
                self.calm_bubbles += 1;
                self.score += scoring::CALM_BUBBLE_POINTS;
            }
            ObjectKind::LightRay => {
                self.light_rays += 1;
                self.score += scoring::LIGHT_RAY_POINTS;
            }
            ObjectKind::FocusSymbol => {
                self.focus_symbols += 1;
                self.coins += scoring::FOCUS_SYMBOL_COINS;
                self.score += scoring::FOCUS_SYMBOL_POINTS;
            }
            _ => debug!(?kind, "collect called with a non-collectible"),
        }
    }

    pub fn shielded(&self) -> bool {
        self.power_up == Some(PowerUp::Shield)
    }

    /// Remaining power-up time rounded up to whole seconds, for the HUD.
    pub fn power_up_seconds(&self) -> u32 {
        self.power_up_ticks.div_ceil(60)
    }
}

/// Computes the experience awarded for a finished run.
///
/// Deterministic in the final session state: one tenth of the score plus
/// weighted collectible bonuses.
pub fn experience_award(session: &Session) -> u32 {
    session.score / scoring::XP_SCORE_DIVISOR
        + session.calm_bubbles * scoring::XP_CALM_BUBBLE_WEIGHT
        + session.light_rays * scoring::XP_LIGHT_RAY_WEIGHT
}
