//! Pixel Animation Core (renderer-agnostic)
//!
//! Drives sprite-based animation for pixel-art actors. The crate compiles the
//! compact authored animation language into flat step sequences, interprets
//! them per actor on an externally supplied tick, and runs independent
//! position/rotation tweens. Rendering stays with the host: actors only write
//! position, rotation, scale, visibility and texture through [`SpriteTarget`],
//! and frames are served by a [`RenderSheet`].

pub mod actor;
pub mod compile;
pub mod config;
pub mod data;
pub mod easing;
pub mod error;
pub mod ids;
pub mod interpreter;
pub mod outputs;
pub mod rng;
pub mod sheet;
pub mod stored_asset;
pub mod target;
pub mod tween;

// Re-exports for consumers (scene player, hosts)
pub use actor::Actor;
pub use compile::{compile_animation, compile_set, AnimationSet};
pub use config::Config;
pub use data::{AnimationStep, AuthoredStep, FrameData, FrameDuration, PixelAsset, PixelAssetData};
pub use easing::Easing;
pub use error::AnimationError;
pub use ids::TextureId;
pub use interpreter::{Animator, PlaybackState};
pub use outputs::Signal;
pub use rng::FrameRng;
pub use sheet::{frame_key, FrameSheet, RenderSheet};
pub use stored_asset::{parse_pixel_asset_json, AssetLibrary};
pub use target::{SpriteNode, SpriteTarget};
pub use tween::{MotionTweens, MoveOptions, Timing};
