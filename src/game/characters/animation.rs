// Clip blending: per-clip playback time, weights and cross-fades

use crate::core::math::lerp;
use crate::engine::assets::{ClipEntry, ClipName, LoopMode};

/// Weights at or below this are treated as silent and the action is dropped
const SILENT_WEIGHT: f32 = 1.0e-4;

#[derive(Debug, Clone, Copy)]
struct Fade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Fade {
    fn weight(&self) -> f32 {
        lerp(self.from, self.to, (self.elapsed / self.duration).min(1.0))
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// One clip being played against the skeleton
#[derive(Debug, Clone)]
pub struct ClipAction {
    clip: ClipEntry,
    time: f32,
    weight: f32,
    fade: Option<Fade>,
    finished: bool,
}

impl ClipAction {
    fn new(clip: ClipEntry) -> Self {
        Self {
            clip,
            time: 0.0,
            weight: 0.0,
            fade: None,
            finished: false,
        }
    }

    pub fn name(&self) -> ClipName {
        self.clip.name
    }

    pub fn clip(&self) -> &ClipEntry {
        &self.clip
    }

    /// Playback position in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.clip.loop_mode
    }

    /// A one-shot that reached its end and is holding the last pose
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn fade_to(&mut self, target: f32, duration: f32) {
        if duration <= 0.0 {
            self.weight = target;
            self.fade = None;
        } else {
            self.fade = Some(Fade {
                from: self.weight,
                to: target,
                elapsed: 0.0,
                duration,
            });
        }
    }

    /// Advance time and weight. Returns true on the tick a one-shot reaches its end.
    fn advance(&mut self, dt: f32) -> bool {
        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += dt;
            self.weight = fade.weight();
            if fade.is_done() {
                self.weight = fade.to;
                self.fade = None;
            }
        }

        let duration = self.clip.duration;
        match self.clip.loop_mode {
            LoopMode::Repeat => {
                self.time = (self.time + dt) % duration;
                false
            }
            LoopMode::Once if self.finished => false,
            LoopMode::Once => {
                self.time += dt;
                if self.time >= duration {
                    self.time = duration;
                    self.finished = true;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn is_silent(&self) -> bool {
        self.fade.is_none() && self.weight <= SILENT_WEIGHT
    }
}

/// Blends clip actions for one character.
///
/// Exactly one action is the fade target at a time; every other action is
/// on its way out. Fades run concurrently and linearly over the same
/// duration, so the weights always sum to one.
#[derive(Debug, Clone, Default)]
pub struct AnimationMixer {
    actions: Vec<ClipAction>,
    target: Option<ClipName>,
}

impl AnimationMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `clip` from its first frame and fade it in while everything else fades out
    pub fn cross_fade_to(&mut self, clip: &ClipEntry, duration: f32) {
        for action in &mut self.actions {
            if action.name() != clip.name {
                action.fade_to(0.0, duration);
            }
        }

        let index = match self.actions.iter().position(|a| a.name() == clip.name) {
            Some(index) => index,
            None => {
                self.actions.push(ClipAction::new(clip.clone()));
                self.actions.len() - 1
            }
        };

        let action = &mut self.actions[index];
        action.clip = clip.clone();
        action.time = 0.0;
        action.finished = false;
        // Fades start from the current weight so a re-entered clip keeps the sum at one
        action.fade_to(1.0, duration);

        self.target = Some(clip.name);
    }

    /// Advance every action. Returns the one-shot clips that finished during this step.
    pub fn update(&mut self, dt: f32) -> Vec<ClipName> {
        let mut finished = Vec::new();
        for action in &mut self.actions {
            if action.advance(dt) {
                finished.push(action.name());
            }
        }

        let target = self.target;
        self.actions
            .retain(|action| Some(action.name()) == target || !action.is_silent());

        finished
    }

    /// The clip currently being faded in (or fully in)
    pub fn target(&self) -> Option<ClipName> {
        self.target
    }

    pub fn action(&self, name: ClipName) -> Option<&ClipAction> {
        self.actions.iter().find(|a| a.name() == name)
    }

    pub fn weight(&self, name: ClipName) -> f32 {
        self.action(name).map_or(0.0, ClipAction::weight)
    }

    pub fn total_weight(&self) -> f32 {
        self.actions.iter().map(ClipAction::weight).sum()
    }

    /// Every audible clip and its weight, for the renderer
    pub fn weights(&self) -> Vec<(ClipName, f32)> {
        self.actions
            .iter()
            .filter(|a| a.weight() > 0.0)
            .map(|a| (a.name(), a.weight()))
            .collect()
    }

    pub fn actions(&self) -> &[ClipAction] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const FADE: f32 = 0.2;

    fn idle() -> ClipEntry {
        ClipEntry::new(ClipName::Idle, 2.0)
    }

    fn attack() -> ClipEntry {
        ClipEntry::new(ClipName::Attack, 0.5)
    }

    #[test]
    fn test_first_clip_fades_in() {
        let mut mixer = AnimationMixer::new();
        mixer.cross_fade_to(&idle(), FADE);
        assert_eq!(mixer.target(), Some(ClipName::Idle));
        assert_eq!(mixer.weight(ClipName::Idle), 0.0);

        mixer.update(FADE);
        assert_abs_diff_eq!(mixer.weight(ClipName::Idle), 1.0);
    }

    #[test]
    fn test_zero_duration_fade_is_instant() {
        let mut mixer = AnimationMixer::new();
        mixer.cross_fade_to(&idle(), 0.0);
        assert_eq!(mixer.weight(ClipName::Idle), 1.0);
    }

    #[test]
    fn test_cross_fade_runs_concurrently() {
        let mut mixer = AnimationMixer::new();
        mixer.cross_fade_to(&idle(), 0.0);
        mixer.cross_fade_to(&attack(), FADE);

        mixer.update(FADE / 2.0);
        assert_abs_diff_eq!(mixer.weight(ClipName::Idle), 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(mixer.weight(ClipName::Attack), 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(mixer.total_weight(), 1.0, epsilon = 1e-5);

        mixer.update(FADE / 2.0);
        assert_abs_diff_eq!(mixer.weight(ClipName::Attack), 1.0);
        // Fully faded-out actions are dropped
        assert!(mixer.action(ClipName::Idle).is_none());
    }

    #[test]
    fn test_weights_sum_to_one_through_interrupted_fades() {
        let walk = ClipEntry::new(ClipName::Walk, 1.0);
        let run = ClipEntry::new(ClipName::Run, 1.0);
        let mut mixer = AnimationMixer::new();
        mixer.cross_fade_to(&idle(), 0.0);
        mixer.cross_fade_to(&walk, FADE);
        mixer.update(0.05);
        mixer.cross_fade_to(&run, FADE);

        for _ in 0..10 {
            mixer.update(0.03);
            assert_abs_diff_eq!(mixer.total_weight(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_incoming_clip_restarts_from_beginning() {
        let mut mixer = AnimationMixer::new();
        mixer.cross_fade_to(&idle(), 0.0);
        mixer.update(1.3);
        assert_abs_diff_eq!(mixer.action(ClipName::Idle).unwrap().time(), 1.3, epsilon = 1e-5);

        mixer.cross_fade_to(&attack(), FADE);
        mixer.update(0.05);
        mixer.cross_fade_to(&idle(), FADE);
        assert_eq!(mixer.action(ClipName::Idle).unwrap().time(), 0.0);
        assert_abs_diff_eq!(mixer.total_weight(), 1.0, epsilon = 1e-5);

        mixer.update(FADE / 2.0);
        assert_abs_diff_eq!(mixer.total_weight(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_one_shot_clamps_and_reports_once() {
        let mut mixer = AnimationMixer::new();
        mixer.cross_fade_to(&attack(), 0.0);

        assert!(mixer.update(0.3).is_empty());
        assert_eq!(mixer.update(0.3), vec![ClipName::Attack]);
        let action = mixer.action(ClipName::Attack).unwrap();
        assert!(action.is_finished());
        assert_eq!(action.time(), 0.5);

        // Holds the last pose without reporting again
        assert!(mixer.update(0.3).is_empty());
        assert_eq!(mixer.action(ClipName::Attack).unwrap().time(), 0.5);
    }

    #[test]
    fn test_looping_clip_wraps() {
        let mut mixer = AnimationMixer::new();
        mixer.cross_fade_to(&idle(), 0.0);
        assert!(mixer.update(2.5).is_empty());
        assert_abs_diff_eq!(mixer.action(ClipName::Idle).unwrap().time(), 0.5, epsilon = 1e-5);
    }
}
