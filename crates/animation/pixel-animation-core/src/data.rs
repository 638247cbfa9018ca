//! Authored and compiled animation data model.
//!
//! Authored steps use the compact JSON forms written by the pixel editor:
//! - `3`, `[3]`, `[3, 2]`, `[3, [2, 5]]` for a frame with optional duration
//! - `[[0, 1, 2], 2]` for a frame group sharing one duration
//! - `"loop"`, `["link", "walk"]`, `["unique", [4, 5, 6], 2]`
//!
//! Durations count frame-time units; the interpreter scales them by the
//! per-frame time. A missing or null duration means 1.

use std::sync::Arc;

use hashbrown::HashMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value as JsonValue};

use crate::compile::AnimationSet;
use crate::rng::FrameRng;
use crate::sheet::frame_key;

/// How long a frame stays up, in frame-time units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameDuration {
    Fixed(f32),
    /// Inclusive integer range, drawn anew on every visit.
    Range(u32, u32),
}

impl Default for FrameDuration {
    fn default() -> Self {
        FrameDuration::Fixed(1.0)
    }
}

impl FrameDuration {
    /// Resolve to a concrete count, drawing from the range when needed.
    pub fn resolve(&self, rng: &mut FrameRng) -> f32 {
        match *self {
            FrameDuration::Fixed(count) => count,
            FrameDuration::Range(min, max) => rng.range_inclusive(min, max) as f32,
        }
    }

    /// Check the duration is usable; returns the reason when it is not.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            FrameDuration::Fixed(count) if !count.is_finite() || count <= 0.0 => {
                Err(format!("duration must be a positive count, got {count}"))
            }
            FrameDuration::Range(min, _) if min == 0 => {
                Err("range minimum must be at least 1".to_string())
            }
            FrameDuration::Range(min, max) if min > max => {
                Err(format!("range minimum {min} exceeds maximum {max}"))
            }
            _ => Ok(()),
        }
    }

    fn from_json(value: Option<&JsonValue>) -> Result<Self, String> {
        match value {
            None | Some(JsonValue::Null) => Ok(FrameDuration::default()),
            Some(JsonValue::Number(n)) => n
                .as_f64()
                .map(|v| FrameDuration::Fixed(v as f32))
                .ok_or_else(|| format!("duration {n} is not representable")),
            Some(JsonValue::Array(pair)) if pair.len() == 2 => {
                let min = as_count(&pair[0]).ok_or("range bounds must be non-negative integers")?;
                let max = as_count(&pair[1]).ok_or("range bounds must be non-negative integers")?;
                Ok(FrameDuration::Range(min, max))
            }
            Some(other) => Err(format!("unsupported duration {other}")),
        }
    }

    fn to_json(self) -> JsonValue {
        match self {
            FrameDuration::Fixed(count) if count.fract() == 0.0 => json!(count as i64),
            FrameDuration::Fixed(count) => json!(count),
            FrameDuration::Range(min, max) => json!([min, max]),
        }
    }
}

fn as_count(value: &JsonValue) -> Option<u32> {
    value.as_u64().and_then(|v| u32::try_from(v).ok())
}

fn as_frame(value: &JsonValue) -> Option<usize> {
    value.as_u64().and_then(|v| usize::try_from(v).ok())
}

/// One step as written by the authoring tool.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthoredStep {
    Frame {
        frame: usize,
        duration: FrameDuration,
    },
    /// Authoring sugar: one frame per index, all sharing `duration`.
    FrameGroup {
        frames: Vec<usize>,
        duration: FrameDuration,
    },
    Loop,
    Link {
        target: String,
    },
    Unique {
        choices: Vec<usize>,
        duration: FrameDuration,
    },
}

impl AuthoredStep {
    pub fn frame(frame: usize, duration: f32) -> Self {
        AuthoredStep::Frame {
            frame,
            duration: FrameDuration::Fixed(duration),
        }
    }

    pub fn link(target: &str) -> Self {
        AuthoredStep::Link {
            target: target.to_string(),
        }
    }

    /// Parse one step from its compact JSON form.
    pub fn from_json(value: &JsonValue) -> Result<Self, String> {
        match value {
            JsonValue::Number(_) => {
                let frame = as_frame(value).ok_or_else(|| format!("invalid frame index {value}"))?;
                Ok(AuthoredStep::Frame {
                    frame,
                    duration: FrameDuration::default(),
                })
            }
            JsonValue::String(s) if s == "loop" => Ok(AuthoredStep::Loop),
            JsonValue::Array(items) => parse_array_step(items),
            other => Err(format!("unsupported animation step {other}")),
        }
    }

    /// Render the step back into its compact JSON form.
    pub fn to_json(&self) -> JsonValue {
        match self {
            AuthoredStep::Frame { frame, duration } => json!([frame, duration.to_json()]),
            AuthoredStep::FrameGroup { frames, duration } => json!([frames, duration.to_json()]),
            AuthoredStep::Loop => json!("loop"),
            AuthoredStep::Link { target } => json!(["link", target]),
            AuthoredStep::Unique { choices, duration } => {
                json!(["unique", choices, duration.to_json()])
            }
        }
    }
}

fn parse_array_step(items: &[JsonValue]) -> Result<AuthoredStep, String> {
    let head = items.first().ok_or("empty animation step")?;
    match head {
        JsonValue::String(tag) if tag == "link" => {
            let target = items
                .get(1)
                .and_then(JsonValue::as_str)
                .ok_or("link step needs a target animation name")?;
            Ok(AuthoredStep::Link {
                target: target.to_string(),
            })
        }
        JsonValue::String(tag) if tag == "unique" => {
            let choices = items
                .get(1)
                .and_then(JsonValue::as_array)
                .ok_or("unique step needs a list of frame choices")?
                .iter()
                .map(|c| as_frame(c).ok_or_else(|| format!("invalid frame index {c}")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AuthoredStep::Unique {
                choices,
                duration: FrameDuration::from_json(items.get(2))?,
            })
        }
        JsonValue::Array(group) => {
            let frames = group
                .iter()
                .map(|c| as_frame(c).ok_or_else(|| format!("invalid frame index {c}")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AuthoredStep::FrameGroup {
                frames,
                duration: FrameDuration::from_json(items.get(1))?,
            })
        }
        JsonValue::Number(_) => {
            let frame = as_frame(head).ok_or_else(|| format!("invalid frame index {head}"))?;
            Ok(AuthoredStep::Frame {
                frame,
                duration: FrameDuration::from_json(items.get(1))?,
            })
        }
        other => Err(format!("unsupported animation step head {other}")),
    }
}

impl<'de> Deserialize<'de> for AuthoredStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = JsonValue::deserialize(deserializer)?;
        AuthoredStep::from_json(&raw).map_err(D::Error::custom)
    }
}

impl Serialize for AuthoredStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Compiled step: frame groups are expanded, nothing else changes.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationStep {
    Frame {
        frame: usize,
        duration: FrameDuration,
    },
    Loop,
    Link {
        target: String,
    },
    Unique {
        choices: Vec<usize>,
        duration: FrameDuration,
    },
}

/// Pixel grid for one frame; `None` entries are transparent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub data: Vec<Option<u32>>,
}

/// Pixel asset as exported by the editor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PixelAssetData {
    pub name: String,
    #[serde(default)]
    pub frames: Vec<FrameData>,
    #[serde(default)]
    pub animations: HashMap<String, Vec<AuthoredStep>>,
}

/// Loaded asset: frames plus the compiled, shared animation set.
#[derive(Clone, Debug)]
pub struct PixelAsset {
    pub name: String,
    pub frames: Vec<FrameData>,
    pub animations: Arc<AnimationSet>,
}

impl PixelAsset {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Width and height of a frame.
    pub fn size(&self, index: usize) -> Option<(u32, u32)> {
        self.frames.get(index).map(|f| (f.width, f.height))
    }

    /// Render-sheet key of a frame of this asset.
    pub fn frame_key(&self, index: usize) -> String {
        frame_key(&self.name, index)
    }
}
