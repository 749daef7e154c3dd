//! A headless game harness: the full tick pipeline minus the SDL-backed
//! systems (input polling, presentation, audio playback).

// Not every test binary uses every helper.
#![allow(dead_code)]

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::IntoScheduleConfigs;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use tranquil_run::events::{GameCommand, GameEvent, StageTransition};
use tranquil_run::progression::ExperienceLedger;
use tranquil_run::session::Session;
use tranquil_run::store::{BestScoreStore, StoreResource};
use tranquil_run::surface::FrameBuffer;
use tranquil_run::systems::components::{Collider, ObjectBundle, ObjectKind, ObjectTag, Position};
use tranquil_run::systems::{
    self, AudioEvent, BestScore, Bindings, GameStage, GlobalState, LastRun, PauseState, RunnerBundle, SpawnRng,
};

pub struct Harness {
    pub world: World,
    pub schedule: Schedule,
}

impl Harness {
    /// `tag` keeps each test's scratch store directory distinct.
    pub fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("tranquil-run-harness-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        Self::with_store(BestScoreStore::open(dir))
    }

    pub fn with_store(store: BestScoreStore) -> Self {
        let mut world = World::default();

        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<StageTransition>(&mut world);
        EventRegistry::register_event::<AudioEvent>(&mut world);

        world.insert_resource(Session::default());
        world.insert_resource(GameStage::default());
        world.insert_resource(PauseState::default());
        world.insert_resource(GlobalState::default());
        world.insert_resource(BestScore(store.read(tranquil_run::constants::BEST_SCORE_KEY)));
        world.insert_resource(LastRun::default());
        world.insert_resource(StoreResource(store));
        world.insert_resource(ExperienceLedger::default());
        world.insert_resource(FrameBuffer::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(SpawnRng(SmallRng::seed_from_u64(7)));

        world.spawn(RunnerBundle::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                systems::player_control_system,
                systems::handle_pause_command,
                // The simulation core, gated exactly as in the real schedule.
                // The spawner is left out so tests place objects explicitly.
                (
                    systems::player_physics_system,
                    systems::advection_system,
                    systems::session_tick_system,
                    systems::collision_system,
                    systems::resolver_system,
                    systems::prune_system,
                )
                    .chain()
                    .run_if(|stage: Res<GameStage>, paused: Res<PauseState>| {
                        *stage == GameStage::Playing && !paused.active()
                    }),
                systems::stage_system,
                (systems::render_system, systems::hud_system).chain(),
            )
                .chain(),
        );

        Self { world, schedule }
    }

    pub fn tick(&mut self) {
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<StageTransition>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();
    }

    pub fn send(&mut self, command: GameCommand) {
        self.world.resource_mut::<Events<GameEvent>>().send(GameEvent::Command(command));
    }

    /// Starts a run from the menu.
    pub fn start_run(&mut self) {
        self.send(GameCommand::Confirm);
        self.tick();
        assert_eq!(self.stage(), GameStage::Playing);
    }

    /// Places an object so that it overlaps the runner's standing hitbox on
    /// the next collision pass.
    pub fn spawn_on_runner(&mut self, kind: ObjectKind) -> Entity {
        let base = tranquil_run::constants::player_start_position();
        self.spawn_object(kind, glam::Vec2::new(base.x, base.y + 5.0))
    }

    pub fn spawn_object(&mut self, kind: ObjectKind, position: glam::Vec2) -> Entity {
        self.world
            .spawn(ObjectBundle {
                kind,
                position: Position(position),
                collider: Collider { size: kind.size() },
                tag: ObjectTag,
            })
            .id()
    }

    pub fn session(&self) -> Session {
        self.world.resource::<Session>().clone()
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn object_count(&mut self) -> usize {
        self.world.query_filtered::<(), With<ObjectTag>>().iter(&self.world).count()
    }
}
