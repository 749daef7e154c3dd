//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, ScaleMode, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;
use tracing::{debug, info};

use crate::audio::Audio;
use crate::constants::{BEST_SCORE_KEY, CANVAS_SIZE};
use crate::error::{GameError, GameResult};
use crate::events::{GameEvent, StageTransition};
use crate::progression::ExperienceLedger;
use crate::session::Session;
use crate::store::{BestScoreStore, StoreResource};
use crate::surface::FrameBuffer;
use crate::systems::{
    self, AudioEvent, AudioResource, BackbufferResource, BestScore, Bindings, GameStage, GlobalState, LastRun, PauseState,
    RunnerBundle, SpawnRng,
};

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Gameplay systems that process inputs
    Input,
    /// Gameplay systems that update the game state
    Update,
    /// Gameplay systems that respond to events
    Respond,
}

/// System set for all rendering systems to ensure they run after gameplay logic
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum RenderSet {
    Draw,
    Present,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// Orchestrates all game systems through a centralized `World` containing
/// entities, components, and resources, while a `Schedule` defines system
/// execution order. SDL2 resources are stored as `NonSend` to respect thread
/// safety requirements while integrating with the ECS.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Initializes the complete game state: the ECS world and schedule, the
    /// backbuffer texture, the audio backend, the score store, and the runner
    /// entity.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if the backbuffer texture cannot be created.
    pub fn new(canvas: Canvas<Window>, texture_creator: TextureCreator<WindowContext>, event_pump: EventPump) -> GameResult<Game> {
        info!("Starting game initialization");

        debug!("Creating backbuffer texture");
        let mut backbuffer = texture_creator
            .create_texture_streaming(Some(PixelFormatEnum::ARGB8888), CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        backbuffer.set_scale_mode(ScaleMode::Nearest);

        debug!("Initializing audio subsystem");
        let audio = Audio::new();

        debug!("Opening best-score store");
        let store = BestScoreStore::open_default();
        let best = store.read(BEST_SCORE_KEY);

        debug!("Initializing ECS world and system schedule");
        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, store, best, audio, event_pump, canvas, backbuffer);
        Self::configure_schedule(&mut schedule);

        debug!("Spawning runner entity");
        world.spawn(RunnerBundle::default());

        info!(best, "Game initialization completed successfully");
        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<StageTransition>(world);
        EventRegistry::register_event::<AudioEvent>(world);
    }

    fn insert_resources(
        world: &mut World,
        store: BestScoreStore,
        best: u32,
        audio: Audio,
        event_pump: EventPump,
        canvas: Canvas<Window>,
        backbuffer: sdl2::render::Texture,
    ) {
        world.insert_resource(Session::default());
        world.insert_resource(GameStage::default());
        world.insert_resource(PauseState::default());
        world.insert_resource(GlobalState::default());
        world.insert_resource(BestScore(best));
        world.insert_resource(LastRun::default());
        world.insert_resource(StoreResource(store));
        world.insert_resource(ExperienceLedger::default());
        world.insert_resource(FrameBuffer::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(SpawnRng(SmallRng::from_os_rng()));

        world.insert_non_send_resource(event_pump);
        world.insert_non_send_resource::<&mut Canvas<Window>>(Box::leak(Box::new(canvas)));
        world.insert_non_send_resource(BackbufferResource(backbuffer));
        world.insert_non_send_resource(AudioResource(audio));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (systems::input_system, systems::player_control_system, systems::handle_pause_command)
                    .chain()
                    .in_set(GameplaySet::Input),
                (
                    systems::player_physics_system,
                    systems::advection_system,
                    systems::session_tick_system,
                    systems::spawn_system,
                    systems::collision_system,
                    systems::resolver_system,
                    systems::prune_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                systems::stage_system.in_set(GameplaySet::Respond),
                (systems::render_system, systems::hud_system).chain().in_set(RenderSet::Draw),
                (systems::present_system, systems::audio_system)
                    .chain()
                    .in_set(RenderSet::Present),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(|stage: bevy_ecs::system::Res<GameStage>, paused: bevy_ecs::system::Res<PauseState>| {
                        *stage == GameStage::Playing && !paused.active()
                    }),
                    GameplaySet::Respond,
                    RenderSet::Draw,
                    RenderSet::Present,
                )
                    .chain(),
            );
    }

    /// Executes one fixed-rate tick: input processing, gameplay simulation,
    /// collision resolution, rendering and audio.
    ///
    /// Returns `true` if the game should terminate (exit command received).
    pub fn tick(&mut self) -> bool {
        self.schedule.run(&mut self.world);

        // Double-buffered event queues are swapped manually once per tick.
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<StageTransition>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();

        self.world.resource::<GlobalState>().exit
    }
}
