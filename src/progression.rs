//! The user-progression seam.
//!
//! The game reports earned experience to an external collaborator; here that
//! collaborator is a small in-process ledger behind the [`Progression`]
//! trait, invoked at most once per completed run.

use bevy_ecs::prelude::*;
use tracing::info;

/// Anything that can receive an experience award.
pub trait Progression {
    fn award_experience(&mut self, amount: u32);
}

/// Accumulates experience across runs for the lifetime of the process.
#[derive(Resource, Debug, Default)]
pub struct ExperienceLedger {
    pub total: u32,
    pub awards: u32,
}

impl Progression for ExperienceLedger {
    fn award_experience(&mut self, amount: u32) {
        self.awards += 1;
        self.total += amount;
        info!(amount, total = self.total, "Experience awarded");
    }
}
