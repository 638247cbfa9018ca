//! Easing function table.
//!
//! Named Penner curves evaluated as `(t, start, delta, duration) -> value`.
//! Names follow the authoring tool (`linear`, `easeInQuad`, `easeInOutSine`, ...);
//! lookup ignores case, `-` and `_`.

use std::f32::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
}

impl Easing {
    pub const ALL: [Easing; 31] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
        Easing::EaseInSine,
        Easing::EaseOutSine,
        Easing::EaseInOutSine,
        Easing::EaseInExpo,
        Easing::EaseOutExpo,
        Easing::EaseInOutExpo,
        Easing::EaseInCirc,
        Easing::EaseOutCirc,
        Easing::EaseInOutCirc,
        Easing::EaseInElastic,
        Easing::EaseOutElastic,
        Easing::EaseInOutElastic,
        Easing::EaseInBack,
        Easing::EaseOutBack,
        Easing::EaseInOutBack,
        Easing::EaseInBounce,
        Easing::EaseOutBounce,
        Easing::EaseInOutBounce,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInQuad => "easeInQuad",
            Easing::EaseOutQuad => "easeOutQuad",
            Easing::EaseInOutQuad => "easeInOutQuad",
            Easing::EaseInCubic => "easeInCubic",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOutCubic => "easeInOutCubic",
            Easing::EaseInQuart => "easeInQuart",
            Easing::EaseOutQuart => "easeOutQuart",
            Easing::EaseInOutQuart => "easeInOutQuart",
            Easing::EaseInQuint => "easeInQuint",
            Easing::EaseOutQuint => "easeOutQuint",
            Easing::EaseInOutQuint => "easeInOutQuint",
            Easing::EaseInSine => "easeInSine",
            Easing::EaseOutSine => "easeOutSine",
            Easing::EaseInOutSine => "easeInOutSine",
            Easing::EaseInExpo => "easeInExpo",
            Easing::EaseOutExpo => "easeOutExpo",
            Easing::EaseInOutExpo => "easeInOutExpo",
            Easing::EaseInCirc => "easeInCirc",
            Easing::EaseOutCirc => "easeOutCirc",
            Easing::EaseInOutCirc => "easeInOutCirc",
            Easing::EaseInElastic => "easeInElastic",
            Easing::EaseOutElastic => "easeOutElastic",
            Easing::EaseInOutElastic => "easeInOutElastic",
            Easing::EaseInBack => "easeInBack",
            Easing::EaseOutBack => "easeOutBack",
            Easing::EaseInOutBack => "easeInOutBack",
            Easing::EaseInBounce => "easeInBounce",
            Easing::EaseOutBounce => "easeOutBounce",
            Easing::EaseInOutBounce => "easeInOutBounce",
        }
    }

    /// Look up a curve by its authored name.
    pub fn from_name(name: &str) -> Result<Easing, AnimationError> {
        let wanted = normalize_name(name);
        Self::ALL
            .iter()
            .copied()
            .find(|e| normalize_name(e.name()) == wanted)
            .ok_or_else(|| AnimationError::UnknownEasing {
                name: name.to_string(),
            })
    }

    /// Evaluate the curve at elapsed `t` of `duration`, mapping onto `start..start + delta`.
    ///
    /// A non-positive duration resolves to the end value.
    #[inline]
    pub fn apply(self, t: f32, start: f32, delta: f32, duration: f32) -> f32 {
        if duration <= 0.0 {
            return start + delta;
        }
        start + delta * self.progress(t / duration)
    }

    /// Eased progress for normalized time `u` (clamped to [0, 1]).
    pub fn progress(self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Easing::Linear => u,
            Easing::EaseInQuad => u * u,
            Easing::EaseOutQuad => 1.0 - (1.0 - u) * (1.0 - u),
            Easing::EaseInOutQuad => {
                if u < 0.5 {
                    2.0 * u * u
                } else {
                    1.0 - (-2.0 * u + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => u * u * u,
            Easing::EaseOutCubic => 1.0 - (1.0 - u).powi(3),
            Easing::EaseInOutCubic => {
                if u < 0.5 {
                    4.0 * u * u * u
                } else {
                    1.0 - (-2.0 * u + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => u.powi(4),
            Easing::EaseOutQuart => 1.0 - (1.0 - u).powi(4),
            Easing::EaseInOutQuart => {
                if u < 0.5 {
                    8.0 * u.powi(4)
                } else {
                    1.0 - (-2.0 * u + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInQuint => u.powi(5),
            Easing::EaseOutQuint => 1.0 - (1.0 - u).powi(5),
            Easing::EaseInOutQuint => {
                if u < 0.5 {
                    16.0 * u.powi(5)
                } else {
                    1.0 - (-2.0 * u + 2.0).powi(5) / 2.0
                }
            }
            Easing::EaseInSine => 1.0 - (u * PI / 2.0).cos(),
            Easing::EaseOutSine => (u * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * u).cos() - 1.0) / 2.0,
            Easing::EaseInExpo => {
                if u == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * u - 10.0)
                }
            }
            Easing::EaseOutExpo => {
                if u == 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * u)
                }
            }
            Easing::EaseInOutExpo => {
                if u == 0.0 || u == 1.0 {
                    u
                } else if u < 0.5 {
                    2f32.powf(20.0 * u - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * u + 10.0)) / 2.0
                }
            }
            Easing::EaseInCirc => 1.0 - (1.0 - u * u).sqrt(),
            Easing::EaseOutCirc => (1.0 - (u - 1.0).powi(2)).sqrt(),
            Easing::EaseInOutCirc => {
                if u < 0.5 {
                    (1.0 - (1.0 - (2.0 * u).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * u + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Easing::EaseInElastic => {
                if u == 0.0 || u == 1.0 {
                    u
                } else {
                    let c4 = (2.0 * PI) / 3.0;
                    -(2f32.powf(10.0 * u - 10.0)) * ((u * 10.0 - 10.75) * c4).sin()
                }
            }
            Easing::EaseOutElastic => ease_out_elastic(u),
            Easing::EaseInOutElastic => {
                if u == 0.0 || u == 1.0 {
                    u
                } else {
                    let c5 = (2.0 * PI) / 4.5;
                    let s = ((20.0 * u - 11.125) * c5).sin();
                    if u < 0.5 {
                        -(2f32.powf(20.0 * u - 10.0) * s) / 2.0
                    } else {
                        (2f32.powf(-20.0 * u + 10.0) * s) / 2.0 + 1.0
                    }
                }
            }
            Easing::EaseInBack => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                c3 * u * u * u - c1 * u * u
            }
            Easing::EaseOutBack => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (u - 1.0).powi(3) + c1 * (u - 1.0).powi(2)
            }
            Easing::EaseInOutBack => {
                let c2 = 1.70158 * 1.525;
                if u < 0.5 {
                    ((2.0 * u).powi(2) * ((c2 + 1.0) * 2.0 * u - c2)) / 2.0
                } else {
                    ((2.0 * u - 2.0).powi(2) * ((c2 + 1.0) * (u * 2.0 - 2.0) + c2) + 2.0) / 2.0
                }
            }
            Easing::EaseInBounce => 1.0 - ease_out_bounce(1.0 - u),
            Easing::EaseOutBounce => ease_out_bounce(u),
            Easing::EaseInOutBounce => {
                if u < 0.5 {
                    (1.0 - ease_out_bounce(1.0 - 2.0 * u)) / 2.0
                } else {
                    (1.0 + ease_out_bounce(2.0 * u - 1.0)) / 2.0
                }
            }
        }
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s)
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn ease_out_elastic(u: f32) -> f32 {
    if u == 0.0 || u == 1.0 {
        u
    } else {
        let c4 = (2.0 * PI) / 3.0;
        2f32.powf(-10.0 * u) * ((u * 10.0 - 0.75) * c4).sin() + 1.0
    }
}

fn ease_out_bounce(u: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if u < 1.0 / d1 {
        n1 * u * u
    } else if u < 2.0 / d1 {
        let u = u - 1.5 / d1;
        n1 * u * u + 0.75
    } else if u < 2.5 / d1 {
        let u = u - 2.25 / d1;
        n1 * u * u + 0.9375
    } else {
        let u = u - 2.625 / d1;
        n1 * u * u + 0.984375
    }
}
