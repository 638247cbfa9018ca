//! Actor: one pixel sprite composed of a host node, an animation interpreter
//! and motion tweens.
//!
//! The actor owns its playback and tween state exclusively; the asset it
//! plays from is shared read-only. Texture changes are pushed to the node
//! through the render sheet whenever the interpreter shows a new frame.

use std::sync::Arc;

use crate::config::Config;
use crate::data::{AuthoredStep, PixelAsset};
use crate::error::AnimationError;
use crate::interpreter::Animator;
use crate::outputs::Signal;
use crate::rng::FrameRng;
use crate::sheet::RenderSheet;
use crate::target::{SpriteNode, SpriteTarget};
use crate::tween::{MotionTweens, MoveOptions};

#[derive(Debug)]
pub struct Actor<N: SpriteTarget = SpriteNode> {
    asset: Arc<PixelAsset>,
    node: N,
    animator: Animator,
    tweens: MotionTweens,
    placed: bool,
    seed: u32,
}

impl<N: SpriteTarget> Actor<N> {
    pub fn new(asset: Arc<PixelAsset>, node: N, cfg: &Config) -> Self {
        let rng = FrameRng::for_actor(cfg.seed, &asset.name);
        let animator = Animator::new(Arc::clone(&asset.animations), cfg, rng);
        Self {
            asset,
            node,
            animator,
            tweens: MotionTweens::new(cfg.default_easing),
            placed: false,
            seed: cfg.seed,
        }
    }

    pub fn name(&self) -> &str {
        &self.asset.name
    }

    pub fn asset(&self) -> &Arc<PixelAsset> {
        &self.asset
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut N {
        &mut self.node
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn tweens(&self) -> &MotionTweens {
        &self.tweens
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn set_placed(&mut self, placed: bool) {
        self.placed = placed;
    }

    pub fn is_playing(&self) -> bool {
        self.animator.is_playing()
    }

    /// Width and height of frame `index`.
    pub fn size(&self, index: usize) -> Option<(u32, u32)> {
        self.asset.size(index)
    }

    /// Register this actor's frames with the sheet.
    ///
    /// Skipped when the sheet already holds frame 0 of the asset, unless
    /// `force` is set. Returns the number of frames added.
    pub fn render(&self, sheet: &mut dyn RenderSheet, force: bool) -> usize {
        if !force && sheet.exists(&self.asset.frame_key(0)) {
            return 0;
        }
        for (idx, frame) in self.asset.frames.iter().enumerate() {
            sheet.add_frame(&self.asset.frame_key(idx), frame);
        }
        self.asset.frames.len()
    }

    /// Start a named animation; `reverse` mirrors the sprite horizontally.
    pub fn animate(
        &mut self,
        name: &str,
        reverse: bool,
        time: Option<f32>,
        sheet: &dyn RenderSheet,
        signals: &mut Vec<Signal>,
    ) -> Result<(), AnimationError> {
        let before = signals.len();
        self.animator.animate(name, reverse, time, signals)?;
        self.apply_flip();
        self.sync_texture(sheet, &signals[before..]);
        Ok(())
    }

    /// Play an ad-hoc step list.
    pub fn animate_manual(
        &mut self,
        steps: &[AuthoredStep],
        reverse: bool,
        time: Option<f32>,
        sheet: &dyn RenderSheet,
        signals: &mut Vec<Signal>,
    ) -> Result<(), AnimationError> {
        let before = signals.len();
        self.animator.animate_manual(steps, reverse, time, signals)?;
        self.apply_flip();
        self.sync_texture(sheet, &signals[before..]);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    /// Return to the freshly created state: idle, unplaced, no tweens, and a
    /// random source reseeded exactly as `new` seeded it.
    pub fn reset(&mut self) {
        let rng = FrameRng::for_actor(self.seed, &self.asset.name);
        self.animator.reset(rng);
        self.tweens.cancel();
        self.placed = false;
    }

    /// Show frame `index` and stop any animation.
    pub fn frame(&mut self, index: usize, sheet: &dyn RenderSheet) {
        self.animator.set_manual_frame(index);
        self.apply_texture(index, sheet);
    }

    /// Tween to `(x, y)` from the node's current position.
    pub fn move_to(&mut self, x: f32, y: f32, options: MoveOptions) -> Result<(), AnimationError> {
        let origin = self.node.position();
        self.tweens.start_move(origin, [x, y], options)
    }

    /// Tween rotation to `radians` along the shortest arc.
    pub fn rotate_to(&mut self, radians: f32, options: MoveOptions) -> Result<(), AnimationError> {
        let current = self.node.rotation();
        self.tweens.start_rotate(current, radians, options)
    }

    /// Stop both tween channels where they are.
    pub fn cancel_tweens(&mut self) {
        self.tweens.cancel();
    }

    /// Advance animation then tweens by `elapsed` milliseconds.
    ///
    /// Returns whether the sprite changed. An animation error leaves the actor
    /// idle; its tweens still advance this tick. A non-finite `elapsed` is
    /// rejected before anything moves.
    pub fn tick(
        &mut self,
        elapsed: f32,
        sheet: &dyn RenderSheet,
        signals: &mut Vec<Signal>,
    ) -> Result<bool, AnimationError> {
        if !elapsed.is_finite() {
            return Err(AnimationError::InvalidElapsed { value: elapsed });
        }
        let before = signals.len();
        let animated = self.animator.tick(elapsed, signals);
        self.sync_texture(sheet, &signals[before..]);
        let moved = self.tweens.tick(elapsed, &mut self.node, signals);
        animated.map(|changed| changed || moved)
    }

    fn sync_texture(&mut self, sheet: &dyn RenderSheet, emitted: &[Signal]) {
        let shown = emitted.iter().any(|s| matches!(s, Signal::Frame { .. }));
        if let (true, Some(frame)) = (shown, self.animator.current_frame()) {
            self.apply_texture(frame, sheet);
        }
    }

    fn apply_texture(&mut self, frame: usize, sheet: &dyn RenderSheet) {
        let key = self.asset.frame_key(frame);
        let texture = sheet.get_texture(&key);
        if texture.is_none() {
            log::warn!("render sheet has no frame '{key}' for actor '{}'", self.asset.name);
        }
        self.node.set_texture(&key, texture);
    }

    fn apply_flip(&mut self) {
        let [sx, sy] = self.node.scale();
        self.node.set_scale([sx.abs() * self.animator.flip(), sy]);
    }
}
