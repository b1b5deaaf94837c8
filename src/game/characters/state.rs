// Character animation state machine

use log::{debug, trace, warn};

use super::animation::AnimationMixer;
use super::AnimationError;
use crate::engine::assets::{ClipEntry, ClipLibrary, ClipName, LoopMode};

/// Represents the current animation state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still
    #[default]
    Idle,
    /// Moving at walking speed
    Walk,
    /// Moving at running speed
    Run,
    /// One-shot attack swing
    Attack,
    /// One-shot guard
    Block,
    /// One-shot secondary swing
    Slash,
    /// One-shot jump
    Jump,
    /// One-shot power-up flourish
    PowerUp,
    /// Terminal
    Death,
}

impl CharacterState {
    /// Locomotion states loop and can be swapped freely
    pub fn is_locomotion(&self) -> bool {
        matches!(self, Self::Idle | Self::Walk | Self::Run)
    }

    /// Action states play once and cannot be interrupted
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            Self::Attack | Self::Block | Self::Slash | Self::Jump | Self::PowerUp
        )
    }

    /// Check if the state has no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Death)
    }

    /// Check if the character may translate and turn in this state
    pub fn can_move(&self) -> bool {
        self.is_locomotion()
    }

    /// Locomotion state that matches the movement input
    pub fn locomotion_for(has_movement: bool, run: bool) -> Self {
        match (has_movement, run) {
            (false, _) => Self::Idle,
            (true, false) => Self::Walk,
            (true, true) => Self::Run,
        }
    }

    /// Locomotion loops; actions and death play once and hold the last pose
    pub fn loop_mode(&self) -> LoopMode {
        if self.is_locomotion() {
            LoopMode::Repeat
        } else {
            LoopMode::Once
        }
    }

    /// Get the clip played for this state
    pub fn clip_name(&self) -> ClipName {
        match self {
            Self::Idle => ClipName::Idle,
            Self::Walk => ClipName::Walk,
            Self::Run => ClipName::Run,
            Self::Attack => ClipName::Attack,
            Self::Block => ClipName::Block,
            Self::Slash => ClipName::Slash,
            Self::Jump => ClipName::Jump,
            Self::PowerUp => ClipName::PowerUp,
            Self::Death => ClipName::Death,
        }
    }
}

/// Ticket handed out when a one-shot action starts.
///
/// Only valid while the machine is still in `state` at `generation`; any
/// later transition turns it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionWatcher {
    pub state: CharacterState,
    pub generation: u64,
}

/// What happened when an action was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Started(CompletionWatcher),
    /// Another action (or death) owns the animation slot
    Suppressed,
}

/// What happened when a completion watcher fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The action ended and the machine returned to this locomotion state
    Returned(CharacterState),
    /// A newer transition already happened; nothing was changed
    Stale,
}

/// State machine that decides which clip plays and drives the cross-fades
#[derive(Debug)]
pub struct AnimationStateMachine {
    current_state: CharacterState,
    previous_state: CharacterState,
    generation: u64,
    state_time: f32,
    fade_duration: f32,
    library: ClipLibrary,
    mixer: AnimationMixer,
    watchers: Vec<CompletionWatcher>,
}

impl AnimationStateMachine {
    /// Start in IDLE with the idle clip already at full weight
    pub fn new(library: ClipLibrary, fade_duration: f32) -> Result<Self, AnimationError> {
        let idle = clip_for(&library, CharacterState::Idle)?;

        let mut mixer = AnimationMixer::new();
        mixer.cross_fade_to(&idle, 0.0);

        Ok(Self {
            current_state: CharacterState::Idle,
            previous_state: CharacterState::Idle,
            generation: 0,
            state_time: 0.0,
            fade_duration: fade_duration.max(0.0),
            library,
            mixer,
            watchers: Vec::new(),
        })
    }

    pub fn state(&self) -> CharacterState {
        self.current_state
    }

    pub fn previous_state(&self) -> CharacterState {
        self.previous_state
    }

    /// Incremented on every transition
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time spent in the current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Clip the renderer should show as active
    pub fn active_animation(&self) -> ClipName {
        self.current_state.clip_name()
    }

    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    pub fn library(&self) -> &ClipLibrary {
        &self.library
    }

    /// Watchers still waiting on their clip
    pub fn pending_watchers(&self) -> &[CompletionWatcher] {
        &self.watchers
    }

    /// Cross-fade into `next`. A missing clip leaves everything untouched.
    fn transition(&mut self, next: CharacterState) -> Result<u64, AnimationError> {
        if self.current_state.is_terminal() {
            return Err(AnimationError::Terminal(self.current_state));
        }

        let clip = clip_for(&self.library, next)?;
        self.mixer.cross_fade_to(&clip, self.fade_duration);

        self.previous_state = self.current_state;
        self.current_state = next;
        self.generation += 1;
        self.state_time = 0.0;
        // Every outstanding watcher belongs to an older generation now
        self.watchers.clear();

        debug!(
            "Animation {:?} -> {:?} (generation {})",
            self.previous_state, self.current_state, self.generation
        );
        Ok(self.generation)
    }

    /// Enter a one-shot action unless another action already owns the slot
    pub fn trigger_action(&mut self, action: CharacterState) -> Result<TriggerOutcome, AnimationError> {
        if !action.is_action() {
            return Err(AnimationError::NotAnAction(action));
        }
        if !self.current_state.is_locomotion() {
            return Ok(TriggerOutcome::Suppressed);
        }

        let generation = self.transition(action)?;
        Ok(TriggerOutcome::Started(self.watch(action, generation)))
    }

    fn watch(&mut self, state: CharacterState, generation: u64) -> CompletionWatcher {
        let watcher = CompletionWatcher { state, generation };
        self.watchers.push(watcher);
        watcher
    }

    /// Movement-driven swap between IDLE/WALK/RUN. Does nothing outside locomotion.
    ///
    /// Returns true if a transition happened.
    pub fn update_locomotion(&mut self, has_movement: bool, run: bool) -> Result<bool, AnimationError> {
        if !self.current_state.is_locomotion() {
            return Ok(false);
        }

        let desired = CharacterState::locomotion_for(has_movement, run);
        if desired == self.current_state {
            return Ok(false);
        }

        self.transition(desired)?;
        Ok(true)
    }

    /// Fire a completion watcher with the movement input as it is *now*.
    ///
    /// Falls back to IDLE if the wanted locomotion clip is missing, so a
    /// finished action can never strand the character.
    pub fn complete(
        &mut self,
        watcher: CompletionWatcher,
        has_movement: bool,
        run: bool,
    ) -> Result<Completion, AnimationError> {
        self.watchers.retain(|w| *w != watcher);

        if watcher.generation != self.generation || watcher.state != self.current_state {
            trace!(
                "Discarding stale completion for {:?} (generation {}, now {})",
                watcher.state,
                watcher.generation,
                self.generation
            );
            return Ok(Completion::Stale);
        }

        let next = CharacterState::locomotion_for(has_movement, run);
        match self.transition(next) {
            Ok(_) => Ok(Completion::Returned(next)),
            Err(AnimationError::MissingClip(name)) if next != CharacterState::Idle => {
                warn!("{}, returning to IDLE instead", AnimationError::MissingClip(name));
                self.transition(CharacterState::Idle)?;
                Ok(Completion::Returned(CharacterState::Idle))
            }
            Err(err) => Err(err),
        }
    }

    /// Watchers waiting on the given clip
    pub fn watchers_for(&self, clip: ClipName) -> Vec<CompletionWatcher> {
        self.watchers
            .iter()
            .copied()
            .filter(|w| w.state.clip_name() == clip)
            .collect()
    }

    /// Transition regardless of the action lock (death, scripted sequences).
    ///
    /// A forced action still gets a completion watcher and returns to locomotion when it ends.
    pub fn force(&mut self, state: CharacterState) -> Result<u64, AnimationError> {
        if state == self.current_state && !state.is_action() {
            return Ok(self.generation);
        }
        let generation = self.transition(state)?;
        if state.is_action() {
            self.watch(state, generation);
        }
        Ok(generation)
    }

    /// Advance blending and playback. Returns one-shot clips that just finished.
    pub fn update(&mut self, dt: f32) -> Vec<ClipName> {
        self.state_time += dt;
        self.mixer.update(dt)
    }
}

/// Library clip for `state`, with the loop mode the state requires
fn clip_for(library: &ClipLibrary, state: CharacterState) -> Result<ClipEntry, AnimationError> {
    let name = state.clip_name();
    let mut clip = library
        .get(name)
        .cloned()
        .ok_or(AnimationError::MissingClip(name))?;
    clip.loop_mode = state.loop_mode();
    Ok(clip)
}
