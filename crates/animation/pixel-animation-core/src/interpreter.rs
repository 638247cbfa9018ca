//! Animation interpreter: per-actor playback state machine.
//!
//! Walks a compiled step sequence against an externally supplied elapsed
//! time. Loop and Link steps take no time: they redirect the cursor and the
//! step machine resolves again with the same leftover, so frame timing does
//! not drift across wraps. A bounded redirect count guards against sequences
//! that never reach a frame.

use std::sync::Arc;

use crate::compile::{compile_animation, AnimationSet};
use crate::config::Config;
use crate::data::{AnimationStep, AuthoredStep, FrameDuration};
use crate::error::AnimationError;
use crate::outputs::Signal;
use crate::rng::FrameRng;

const MANUAL_ANIMATION: &str = "<manual>";

/// Mutable playback state owned by one actor.
#[derive(Clone, Debug)]
pub struct PlaybackState {
    pub sequence: Option<Arc<[AnimationStep]>>,
    pub index: usize,
    /// Time left on the current frame; non-positive means the step is due.
    pub countdown: f32,
    pub playing: bool,
    /// Name of the playing animation; `None` for manual sequences and when idle.
    pub animation: Option<String>,
    /// Last frame drawn by any Unique step, across animations.
    pub last_unique: Option<usize>,
    /// Horizontal flip sign: 1.0, or -1.0 when playing reversed.
    pub flip: f32,
    /// Milliseconds per frame-duration unit.
    pub time_scale: f32,
    pub frame: Option<usize>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            sequence: None,
            index: 0,
            countdown: 0.0,
            playing: false,
            animation: None,
            last_unique: None,
            flip: 1.0,
            time_scale: 0.0,
            frame: None,
        }
    }
}

#[derive(Debug)]
pub struct Animator {
    animations: Arc<AnimationSet>,
    state: PlaybackState,
    rng: FrameRng,
    frame_time_ms: f32,
    max_redirects: usize,
    max_frames_per_tick: usize,
}

impl Animator {
    pub fn new(animations: Arc<AnimationSet>, cfg: &Config, rng: FrameRng) -> Self {
        Self {
            animations,
            state: PlaybackState::default(),
            rng,
            frame_time_ms: cfg.frame_time_ms,
            max_redirects: cfg.max_redirects,
            max_frames_per_tick: cfg.max_frames_per_tick,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn animations(&self) -> &Arc<AnimationSet> {
        &self.animations
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    #[inline]
    pub fn current_frame(&self) -> Option<usize> {
        self.state.frame
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.state.animation.as_deref()
    }

    #[inline]
    pub fn flip(&self) -> f32 {
        self.state.flip
    }

    /// Start a named animation. `time` overrides the per-frame time scale.
    ///
    /// An unknown name leaves the animator idle and reports the error.
    pub fn animate(
        &mut self,
        name: &str,
        reverse: bool,
        time: Option<f32>,
        signals: &mut Vec<Signal>,
    ) -> Result<(), AnimationError> {
        let Some(sequence) = self.animations.get(name) else {
            self.stop();
            return Err(AnimationError::UnknownAnimation {
                name: name.to_string(),
            });
        };
        self.begin(
            sequence,
            Some(name.to_string()),
            reverse,
            time.unwrap_or(self.frame_time_ms),
            signals,
        )
    }

    /// Play an ad-hoc step list. Links resolve against this animator's set.
    pub fn animate_manual(
        &mut self,
        steps: &[AuthoredStep],
        reverse: bool,
        time: Option<f32>,
        signals: &mut Vec<Signal>,
    ) -> Result<(), AnimationError> {
        let compiled = match compile_animation(MANUAL_ANIMATION, steps) {
            Ok(compiled) => compiled,
            Err(err) => {
                self.stop();
                return Err(err);
            }
        };
        self.begin(
            Arc::from(compiled),
            None,
            reverse,
            time.unwrap_or(self.frame_time_ms),
            signals,
        )
    }

    /// Begin playing `sequence` from step 0. Step 0 is resolved immediately so
    /// the first frame is current before any time elapses.
    pub fn start(
        &mut self,
        sequence: Arc<[AnimationStep]>,
        reverse: bool,
        time_scale: f32,
        signals: &mut Vec<Signal>,
    ) -> Result<(), AnimationError> {
        self.begin(sequence, None, reverse, time_scale, signals)
    }

    fn begin(
        &mut self,
        sequence: Arc<[AnimationStep]>,
        animation: Option<String>,
        reverse: bool,
        time_scale: f32,
        signals: &mut Vec<Signal>,
    ) -> Result<(), AnimationError> {
        if !time_scale.is_finite() || time_scale <= 0.0 {
            self.stop();
            return Err(AnimationError::InvalidTimeScale { value: time_scale });
        }
        if sequence.is_empty() {
            self.stop();
            return Err(AnimationError::EmptyAnimation {
                animation: animation.unwrap_or_else(|| MANUAL_ANIMATION.to_string()),
            });
        }

        self.state.sequence = Some(sequence);
        self.state.index = 0;
        self.state.animation = animation;
        self.state.flip = if reverse { -1.0 } else { 1.0 };
        self.state.time_scale = time_scale;
        self.state.playing = true;

        if let Err(err) = self.resolve(0.0, signals) {
            self.stop();
            return Err(err);
        }
        Ok(())
    }

    /// Forget all playback state, including the unique-pick memo, and
    /// continue with a fresh random source.
    pub fn reset(&mut self, rng: FrameRng) {
        self.state = PlaybackState::default();
        self.rng = rng;
    }

    /// Stop playback. The current frame stays on screen.
    pub fn stop(&mut self) {
        self.state.playing = false;
        self.state.animation = None;
    }

    /// Show `frame` directly; stops playback, leaves the sequence and cursor alone.
    pub fn set_manual_frame(&mut self, frame: usize) {
        self.stop();
        self.state.frame = Some(frame);
    }

    /// Advance playback by `elapsed` milliseconds.
    ///
    /// Returns whether the current frame changed. Running past the last step
    /// stops playback and emits [`Signal::Stop`]. On error the animator is
    /// left idle.
    ///
    /// Each shown frame must move the countdown forward; a hold too short to
    /// register, or more than `max_frames_per_tick` frames in one tick, is
    /// reported as a degenerate cycle.
    pub fn tick(
        &mut self,
        elapsed: f32,
        signals: &mut Vec<Signal>,
    ) -> Result<bool, AnimationError> {
        if !elapsed.is_finite() {
            return Err(AnimationError::InvalidElapsed { value: elapsed });
        }
        if !self.state.playing {
            return Ok(false);
        }
        self.state.countdown -= elapsed;

        let mut changed = false;
        let mut advanced = 0usize;
        while self.state.countdown <= 0.0 {
            self.state.index += 1;
            let len = self.state.sequence.as_ref().map_or(0, |s| s.len());
            if self.state.index >= len {
                self.state.playing = false;
                let animation = self.state.animation.take();
                signals.push(Signal::Stop { animation });
                return Ok(changed);
            }
            let leftover = self.state.countdown;
            if let Err(err) = self.resolve(leftover, signals) {
                self.stop();
                return Err(err);
            }
            changed = true;

            advanced += 1;
            if self.state.countdown <= leftover || advanced > self.max_frames_per_tick {
                let err = AnimationError::DegenerateCycle {
                    animation: self.animation_label(),
                    redirects: advanced,
                };
                self.stop();
                return Err(err);
            }
        }
        Ok(changed)
    }

    /// Resolve the step under the cursor down to a concrete frame.
    fn resolve(&mut self, leftover: f32, signals: &mut Vec<Signal>) -> Result<(), AnimationError> {
        let mut redirects = 0usize;
        loop {
            let Some(sequence) = self.state.sequence.clone() else {
                return Err(AnimationError::EmptyAnimation {
                    animation: self.animation_label(),
                });
            };
            let Some(step) = sequence.get(self.state.index) else {
                return Err(AnimationError::EmptyAnimation {
                    animation: self.animation_label(),
                });
            };

            match step {
                AnimationStep::Frame { frame, duration } => {
                    self.show(*frame, duration, leftover, signals);
                    return Ok(());
                }
                AnimationStep::Unique { choices, duration } => {
                    let frame = self.pick_unique(choices);
                    self.show(frame, duration, leftover, signals);
                    return Ok(());
                }
                AnimationStep::Loop => {
                    self.state.index = 0;
                    signals.push(Signal::Loop);
                }
                AnimationStep::Link { target } => {
                    let next = self.animations.get(target).ok_or_else(|| {
                        AnimationError::UnknownAnimation {
                            name: target.clone(),
                        }
                    })?;
                    self.state.sequence = Some(next);
                    self.state.index = 0;
                    self.state.animation = Some(target.clone());
                    signals.push(Signal::Link {
                        target: target.clone(),
                    });
                }
            }

            redirects += 1;
            if redirects > self.max_redirects {
                return Err(AnimationError::DegenerateCycle {
                    animation: self.animation_label(),
                    redirects,
                });
            }
        }
    }

    fn show(
        &mut self,
        frame: usize,
        duration: &FrameDuration,
        leftover: f32,
        signals: &mut Vec<Signal>,
    ) {
        self.state.countdown = duration.resolve(&mut self.rng) * self.state.time_scale + leftover;
        self.state.frame = Some(frame);
        signals.push(Signal::Frame { frame });
    }

    /// Draw uniformly from `choices`, skipping the actor's previous unique pick.
    fn pick_unique(&mut self, choices: &[usize]) -> usize {
        let last = self.state.last_unique;
        let allowed = choices.iter().filter(|c| Some(**c) != last).count();
        let pick = if allowed == 0 {
            // Only reachable for uncompiled input; compiled sets guarantee two distinct choices.
            choices[self.rng.index(choices.len())]
        } else {
            let nth = self.rng.index(allowed);
            choices
                .iter()
                .copied()
                .filter(|c| Some(*c) != last)
                .nth(nth)
                .unwrap_or(choices[0])
        };
        self.state.last_unique = Some(pick);
        pick
    }

    fn animation_label(&self) -> String {
        self.state
            .animation
            .clone()
            .unwrap_or_else(|| MANUAL_ANIMATION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_set;
    use hashbrown::HashMap;

    fn set(defs: &[(&str, &str)]) -> Arc<AnimationSet> {
        let mut anims = HashMap::new();
        for (name, json) in defs {
            anims.insert(name.to_string(), serde_json::from_str(json).unwrap());
        }
        Arc::new(compile_set(&anims, None).unwrap())
    }

    fn animator(defs: &[(&str, &str)]) -> Animator {
        Animator::new(set(defs), &Config::default(), FrameRng::new(11))
    }

    #[test]
    fn start_shows_first_frame_before_any_tick() {
        let mut a = animator(&[("idle", "[[4, 2], 5]")]);
        let mut signals = Vec::new();
        a.animate("idle", false, Some(10.0), &mut signals).unwrap();
        assert!(a.is_playing());
        assert_eq!(a.current_frame(), Some(4));
        assert_eq!(a.state().countdown, 20.0);
        assert_eq!(signals, vec![Signal::Frame { frame: 4 }]);
    }

    #[test]
    fn leftover_carries_into_next_frame() {
        let mut a = animator(&[("idle", "[0, 1, 2]")]);
        let mut signals = Vec::new();
        a.animate("idle", false, Some(100.0), &mut signals).unwrap();
        assert!(a.tick(130.0, &mut signals).unwrap());
        assert_eq!(a.current_frame(), Some(1));
        assert_eq!(a.state().countdown, 70.0);
    }

    #[test]
    fn large_tick_skips_several_frames() {
        let mut a = animator(&[("idle", "[0, 1, 2, 3]")]);
        let mut signals = Vec::new();
        a.animate("idle", false, Some(10.0), &mut signals).unwrap();
        signals.clear();
        assert!(a.tick(25.0, &mut signals).unwrap());
        assert_eq!(a.current_frame(), Some(2));
        assert_eq!(
            signals,
            vec![Signal::Frame { frame: 1 }, Signal::Frame { frame: 2 }]
        );
    }

    #[test]
    fn manual_frame_stops_without_touching_cursor() {
        let mut a = animator(&[("idle", "[0, 1, 2]")]);
        let mut signals = Vec::new();
        a.animate("idle", true, Some(10.0), &mut signals).unwrap();
        a.tick(10.0, &mut signals).unwrap();
        a.set_manual_frame(7);
        assert!(!a.is_playing());
        assert_eq!(a.current_frame(), Some(7));
        assert_eq!(a.state().index, 1);
        assert_eq!(a.flip(), -1.0);
        assert!(!a.tick(100.0, &mut signals).unwrap());
    }

    #[test]
    fn unknown_animation_leaves_actor_idle() {
        let mut a = animator(&[("idle", "[0, \"loop\"]")]);
        let mut signals = Vec::new();
        a.animate("idle", false, None, &mut signals).unwrap();
        let err = a.animate("dance", false, None, &mut signals).unwrap_err();
        assert_eq!(err, AnimationError::UnknownAnimation { name: "dance".into() });
        assert!(!a.is_playing());
        assert_eq!(a.current_animation(), None);
    }

    #[test]
    fn rejects_non_positive_time_scale() {
        let mut a = animator(&[("idle", "[0]")]);
        let err = a.animate("idle", false, Some(0.0), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, AnimationError::InvalidTimeScale { .. }));
        assert!(!a.is_playing());
    }

    #[test]
    fn manual_sequences_link_into_the_set() {
        let mut a = animator(&[("run", "[5, 6, \"loop\"]")]);
        let steps: Vec<AuthoredStep> = serde_json::from_str(r#"[1, ["link", "run"]]"#).unwrap();
        let mut signals = Vec::new();
        a.animate_manual(&steps, false, Some(10.0), &mut signals).unwrap();
        assert_eq!(a.current_animation(), None);
        a.tick(10.0, &mut signals).unwrap();
        assert_eq!(a.current_frame(), Some(5));
        assert_eq!(a.current_animation(), Some("run"));
    }

    #[test]
    fn imperceptible_hold_in_a_loop_is_a_degenerate_cycle() {
        let mut a = animator(&[("a", "[[0, 0.000001], \"loop\"]")]);
        let mut signals = Vec::new();
        a.animate("a", false, Some(1.0), &mut signals).unwrap();
        let err = a.tick(100.0, &mut signals).unwrap_err();
        assert!(matches!(err, AnimationError::DegenerateCycle { .. }));
        assert!(!a.is_playing());
        assert!(signals.len() < 16);
        assert!(!a.tick(100.0, &mut signals).unwrap());
    }

    #[test]
    fn imperceptible_time_scale_is_a_degenerate_cycle() {
        let mut a = animator(&[("a", "[0, \"loop\"]")]);
        let mut signals = Vec::new();
        a.animate("a", false, Some(0.000001), &mut signals).unwrap();
        assert!(matches!(
            a.tick(16.0, &mut signals),
            Err(AnimationError::DegenerateCycle { .. })
        ));
        assert!(!a.is_playing());
    }

    #[test]
    fn frames_per_tick_are_capped() {
        let mut a = animator(&[("a", "[0, \"loop\"]")]);
        let mut signals = Vec::new();
        a.animate("a", false, Some(1.0), &mut signals).unwrap();
        assert!(a.tick(4000.0, &mut signals).unwrap());
        assert!(a.is_playing());

        signals.clear();
        let err = a.tick(10_000.0, &mut signals).unwrap_err();
        assert_eq!(
            err,
            AnimationError::DegenerateCycle {
                animation: "a".into(),
                redirects: Config::default().max_frames_per_tick + 1
            }
        );
        assert!(!a.is_playing());
    }

    #[test]
    fn non_finite_elapsed_is_rejected() {
        let mut a = animator(&[("a", "[0, 1, \"loop\"]")]);
        let mut signals = Vec::new();
        a.animate("a", false, Some(10.0), &mut signals).unwrap();
        for bad in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            assert!(matches!(
                a.tick(bad, &mut signals),
                Err(AnimationError::InvalidElapsed { .. })
            ));
        }
        assert!(a.is_playing());
        assert_eq!(a.state().countdown, 10.0);
    }

    #[test]
    fn empty_named_sequence_reports_its_name() {
        let mut anims = AnimationSet::default();
        anims.insert_unchecked("ghost", Vec::new());
        let mut a = Animator::new(Arc::new(anims), &Config::default(), FrameRng::new(1));
        let err = a.animate("ghost", false, None, &mut Vec::new()).unwrap_err();
        assert_eq!(
            err,
            AnimationError::EmptyAnimation {
                animation: "ghost".into()
            }
        );
        let err = a
            .start(Arc::from(Vec::new()), false, 10.0, &mut Vec::new())
            .unwrap_err();
        assert_eq!(
            err,
            AnimationError::EmptyAnimation {
                animation: MANUAL_ANIMATION.into()
            }
        );
    }

    #[test]
    fn reset_replays_the_same_random_frames() {
        let defs = [("idle", "[[0, [1, 9]], [\"unique\", [1, 2, 3]], \"loop\"]")];
        let mut a = animator(&defs);
        let run = |a: &mut Animator| {
            let mut signals = Vec::new();
            a.animate("idle", false, Some(1.0), &mut signals).unwrap();
            for _ in 0..200 {
                a.tick(1.0, &mut signals).unwrap();
            }
            signals
        };
        let first = run(&mut a);
        a.reset(FrameRng::new(11));
        assert_eq!(a.state().last_unique, None);
        assert_eq!(run(&mut a), first);
    }
}
