// Character controller: one tick = sample, steer, animate, move

use glam::Vec3;
use log::{debug, trace, warn};

use super::rig::{CharacterRig, KinematicIntegrator, PositionIntegrator};
use super::state::{AnimationStateMachine, CharacterState, Completion, TriggerOutcome};
use super::stats::CharacterStats;
use super::steering::SteeringSolver;
use super::AnimationError;
use crate::core::math::flatten_xz;
use crate::engine::assets::{ClipName, LoadedCharacter};
use crate::engine::input::{InputSampler, KeyState};

/// Horizontal camera axes supplied by the camera each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl CameraBasis {
    /// Right is derived as `forward x up`
    pub fn from_forward(forward: Vec3) -> Self {
        let forward = flatten_xz(forward);
        Self {
            forward,
            right: forward.cross(Vec3::Y),
        }
    }

    /// Camera looking along the given yaw (0 = +Z)
    pub fn from_yaw(yaw: f32) -> Self {
        Self::from_forward(Vec3::new(yaw.sin(), 0.0, yaw.cos()))
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::from_yaw(0.0)
    }
}

/// Snapshot of the character after a tick, for the renderer and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub state: CharacterState,
    pub active_animation: ClipName,
    pub position: Vec3,
    pub yaw: f32,
    /// Whether the character actually moved this tick
    pub moved: bool,
}

/// Movement input as of the latest tick; used to pick the post-action state
#[derive(Debug, Clone, Copy, Default)]
struct LocomotionInput {
    has_movement: bool,
    run: bool,
}

/// A controllable 3D character
pub struct Character {
    rig: CharacterRig,
    state_machine: AnimationStateMachine,
    sampler: InputSampler,
    steering: SteeringSolver,
    stats: CharacterStats,
    last_input: LocomotionInput,
}

impl Character {
    /// Build a kinematic character standing at the origin on the ground plane
    pub fn new(loaded: LoadedCharacter, stats: CharacterStats) -> Result<Self, AnimationError> {
        let spawn = Vec3::new(0.0, stats.ground_height, 0.0);
        let integrator = Box::new(KinematicIntegrator::new(stats.ground_height));
        Self::with_integrator(loaded, stats, integrator, spawn)
    }

    /// Build a character whose position is driven by the given integrator
    pub fn with_integrator(
        loaded: LoadedCharacter,
        stats: CharacterStats,
        integrator: Box<dyn PositionIntegrator>,
        spawn: Vec3,
    ) -> Result<Self, AnimationError> {
        let state_machine = AnimationStateMachine::new(loaded.clips, stats.fade_duration)?;
        let rig = CharacterRig::new(loaded.skeleton, loaded.equipment, spawn, &stats, integrator);

        Ok(Self {
            rig,
            state_machine,
            sampler: InputSampler::new(),
            steering: SteeringSolver::new(&stats),
            stats,
            last_input: LocomotionInput::default(),
        })
    }

    /// Advance the character by one frame. Never fails; problems are logged and skipped.
    pub fn tick(&mut self, keys: &KeyState, camera: &CameraBasis, dt: f32) -> TickReport {
        if !dt.is_finite() || dt <= 0.0 {
            warn!("Skipping tick with invalid delta time {dt}");
            return self.report(false);
        }

        let intent = self.sampler.sample(keys);
        let steering = self.steering.solve(&intent, camera.forward, camera.right, dt);
        self.last_input = LocomotionInput {
            has_movement: steering.has_movement,
            run: intent.run,
        };

        if intent.attack {
            self.start_action(CharacterState::Attack);
        }
        if intent.block {
            self.start_action(CharacterState::Block);
        }

        if let Err(err) = self
            .state_machine
            .update_locomotion(steering.has_movement, intent.run)
        {
            warn!("{err}");
        }

        // Actions and death freeze both position and facing
        let moved = self.state_machine.state().can_move() && steering.has_movement;
        if moved {
            let yaw_delta = self
                .steering
                .turn_delta(self.rig.yaw(), steering.target_yaw, dt);
            self.rig.apply_tick(steering.move_vector, yaw_delta, dt);
        } else {
            self.rig.apply_tick(Vec3::ZERO, 0.0, dt);
        }

        for clip in self.state_machine.update(dt) {
            self.deliver_finished(clip);
        }

        self.report(moved)
    }

    /// Trigger any one-shot action (ATTACK, BLOCK, SLASH, JUMP, POWER_UP)
    pub fn request_action(
        &mut self,
        action: CharacterState,
    ) -> Result<TriggerOutcome, AnimationError> {
        self.state_machine.trigger_action(action)
    }

    /// Completion signal from an external playback clock
    pub fn notify_clip_finished(&mut self, clip: ClipName) -> Vec<Completion> {
        self.deliver_finished(clip)
    }

    /// Enter DEATH. Invalidates any pending action completion.
    pub fn die(&mut self) -> Result<(), AnimationError> {
        self.state_machine.force(CharacterState::Death)?;
        Ok(())
    }

    pub fn position(&self) -> Vec3 {
        self.rig.position()
    }

    pub fn yaw(&self) -> f32 {
        self.rig.yaw()
    }

    pub fn state(&self) -> CharacterState {
        self.state_machine.state()
    }

    pub fn active_animation(&self) -> ClipName {
        self.state_machine.active_animation()
    }

    /// Current blend weight of every audible clip
    pub fn weights(&self) -> Vec<(ClipName, f32)> {
        self.state_machine.mixer().weights()
    }

    pub fn rig(&self) -> &CharacterRig {
        &self.rig
    }

    pub fn state_machine(&self) -> &AnimationStateMachine {
        &self.state_machine
    }

    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }

    fn start_action(&mut self, action: CharacterState) {
        match self.state_machine.trigger_action(action) {
            Ok(TriggerOutcome::Started(watcher)) => {
                debug!("{:?} started (generation {})", action, watcher.generation)
            }
            Ok(TriggerOutcome::Suppressed) => {
                trace!("{:?} ignored while {:?}", action, self.state_machine.state())
            }
            Err(err) => warn!("{err}"),
        }
    }

    fn deliver_finished(&mut self, clip: ClipName) -> Vec<Completion> {
        let LocomotionInput { has_movement, run } = self.last_input;
        let mut completions = Vec::new();
        for watcher in self.state_machine.watchers_for(clip) {
            match self.state_machine.complete(watcher, has_movement, run) {
                Ok(completion) => completions.push(completion),
                Err(err) => warn!("{err}"),
            }
        }
        completions
    }

    fn report(&self, moved: bool) -> TickReport {
        TickReport {
            state: self.state(),
            active_animation: self.active_animation(),
            position: self.position(),
            yaw: self.yaw(),
            moved,
        }
    }
}
