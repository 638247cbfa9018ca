//! Motion tween engine.
//!
//! Two independent channels per actor: position and rotation. Starting a
//! tween on a channel replaces whatever that channel was doing. A tween is
//! timed either by an explicit duration or by a speed; speed-timed moves use
//! the larger per-axis distance, not the Euclidean one.

use std::f32::consts::PI;

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::outputs::Signal;
use crate::target::SpriteTarget;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Timing {
    /// Total milliseconds.
    Duration(f32),
    /// Units (pixels or radians) per millisecond.
    Speed(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOptions {
    pub timing: Timing,
    /// `None` uses the configured default easing.
    pub easing: Option<Easing>,
}

impl MoveOptions {
    pub fn duration(ms: f32) -> Self {
        Self {
            timing: Timing::Duration(ms),
            easing: None,
        }
    }

    pub fn speed(units_per_ms: f32) -> Self {
        Self {
            timing: Timing::Speed(units_per_ms),
            easing: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Build options from authored fields: exactly one of `duration`/`speed`,
    /// and an optional easing name.
    pub fn from_fields(
        duration: Option<f32>,
        speed: Option<f32>,
        ease: Option<&str>,
    ) -> Result<Self, AnimationError> {
        let timing = match (duration, speed) {
            (Some(ms), None) => Timing::Duration(ms),
            (None, Some(v)) => Timing::Speed(v),
            (Some(_), Some(_)) => {
                return Err(AnimationError::InvalidTween {
                    reason: "give either duration or speed, not both".to_string(),
                })
            }
            (None, None) => {
                return Err(AnimationError::InvalidTween {
                    reason: "a tween needs a duration or a speed".to_string(),
                })
            }
        };
        let easing = ease.map(Easing::from_name).transpose()?;
        Ok(Self { timing, easing })
    }

    fn resolve_duration(&self, distance: f32) -> Result<f32, AnimationError> {
        match self.timing {
            Timing::Duration(ms) if ms.is_finite() && ms >= 0.0 => Ok(ms),
            Timing::Duration(ms) => Err(AnimationError::InvalidTween {
                reason: format!("duration must be non-negative, got {ms}"),
            }),
            Timing::Speed(v) if v.is_finite() && v > 0.0 => Ok(distance / v),
            Timing::Speed(v) => Err(AnimationError::InvalidTween {
                reason: format!("speed must be positive, got {v}"),
            }),
        }
    }
}

/// One in-flight interpolation over `N` axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<const N: usize> {
    pub origin: [f32; N],
    pub delta: [f32; N],
    pub target: [f32; N],
    pub current: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl<const N: usize> Tween<N> {
    fn new(
        origin: [f32; N],
        delta: [f32; N],
        target: [f32; N],
        duration: f32,
        easing: Easing,
    ) -> Self {
        Self {
            origin,
            delta,
            target,
            current: 0.0,
            duration,
            easing,
        }
    }

    /// Advance by `elapsed`; returns the value to write and whether the tween finished.
    fn advance(&mut self, elapsed: f32) -> ([f32; N], bool) {
        self.current += elapsed;
        if self.current >= self.duration {
            return (self.target, true);
        }
        let mut value = [0.0; N];
        for (axis, out) in value.iter_mut().enumerate() {
            *out = self.easing.apply(
                self.current,
                self.origin[axis],
                self.delta[axis],
                self.duration,
            );
        }
        (value, false)
    }
}

/// Signed shortest angular delta from `from` to `to`, in (-PI, PI].
pub fn shortest_angle(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(2.0 * PI);
    if delta > PI {
        delta - 2.0 * PI
    } else {
        delta
    }
}

#[derive(Clone, Debug, Default)]
pub struct MotionTweens {
    pub position: Option<Tween<2>>,
    pub rotation: Option<Tween<1>>,
    default_easing: Easing,
}

impl MotionTweens {
    pub fn new(default_easing: Easing) -> Self {
        Self {
            position: None,
            rotation: None,
            default_easing,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.position.is_some()
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_some()
    }

    /// Tween position from `origin` to `target`.
    pub fn start_move(
        &mut self,
        origin: [f32; 2],
        target: [f32; 2],
        options: MoveOptions,
    ) -> Result<(), AnimationError> {
        let delta = [target[0] - origin[0], target[1] - origin[1]];
        let distance = delta[0].abs().max(delta[1].abs());
        let duration = match options.resolve_duration(distance) {
            Ok(duration) => duration,
            Err(err) => {
                self.position = None;
                return Err(err);
            }
        };
        let easing = options.easing.unwrap_or(self.default_easing);
        self.position = Some(Tween::new(origin, delta, target, duration, easing));
        Ok(())
    }

    /// Tween rotation from `current` toward `target` along the shortest arc.
    pub fn start_rotate(
        &mut self,
        current: f32,
        target: f32,
        options: MoveOptions,
    ) -> Result<(), AnimationError> {
        let delta = shortest_angle(current, target);
        let duration = match options.resolve_duration(delta.abs()) {
            Ok(duration) => duration,
            Err(err) => {
                self.rotation = None;
                return Err(err);
            }
        };
        let easing = options.easing.unwrap_or(self.default_easing);
        self.rotation = Some(Tween::new([current], [delta], [target], duration, easing));
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.position = None;
        self.rotation = None;
    }

    /// Advance both channels and write their values to `node`.
    ///
    /// Returns true if either channel wrote a value.
    pub fn tick<T: SpriteTarget + ?Sized>(
        &mut self,
        elapsed: f32,
        node: &mut T,
        signals: &mut Vec<Signal>,
    ) -> bool {
        let mut changed = false;
        if let Some(tween) = self.position.as_mut() {
            let (value, done) = tween.advance(elapsed);
            node.set_position(value);
            changed = true;
            if done {
                self.position = None;
                signals.push(Signal::MoveDone);
            }
        }
        if let Some(tween) = self.rotation.as_mut() {
            let ([angle], done) = tween.advance(elapsed);
            node.set_rotation(angle);
            changed = true;
            if done {
                self.rotation = None;
            }
        }
        changed
    }
}
