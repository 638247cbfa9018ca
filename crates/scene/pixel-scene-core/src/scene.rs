//! Scene player: actors, the timeline that drives them, and depth order.
//!
//! Within one tick every due event is applied before any actor advances, so
//! an animation started at time T already receives that tick's elapsed time.

use std::cmp::Ordering;

use hashbrown::HashSet;
use indexmap::IndexMap;
use pixel_animation_core::{
    Actor, AssetLibrary, FrameSheet, MoveOptions, RenderSheet, Signal, SpriteNode, SpriteTarget,
};
use serde::{Deserialize, Serialize};

use crate::config::{SceneConfig, UnsortedLayer};
use crate::data::{EventKind, SceneAction, SceneData, SceneOptions};
use crate::error::SceneError;
use crate::stored_scene::parse_scene_json;
use crate::timeline::{clamp_elapsed, Timeline};

/// Timeline event applied during a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedEvent {
    /// Position in the time-sorted timeline.
    pub index: usize,
    pub time: f32,
    pub actor: String,
    pub kind: EventKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorSignal {
    pub actor: String,
    pub signal: Signal,
}

/// Result of one scene tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneFrame {
    /// Scene time after the tick, in milliseconds.
    pub elapsed: f32,
    /// Whether any actor or the draw order changed.
    pub changed: bool,
    pub applied: Vec<AppliedEvent>,
    pub signals: Vec<ActorSignal>,
    /// Errors recovered from during the tick, in the order they occurred.
    pub errors: Vec<SceneError>,
}

#[derive(Debug)]
pub struct Scene<N: SpriteTarget + Default = SpriteNode, S: RenderSheet = FrameSheet> {
    width: u32,
    height: u32,
    options: SceneOptions,
    unsorted_layer: UnsortedLayer,
    actors: IndexMap<String, Actor<N>>,
    /// Actor indices kept in depth order.
    sorted: Vec<usize>,
    /// Actor indices drawn in insertion order.
    unsorted: Vec<usize>,
    timeline: Timeline,
    sheet: S,
}

impl<N: SpriteTarget + Default, S: RenderSheet> Scene<N, S> {
    /// Build a scene, creating one hidden, unplaced actor per `pixels` entry.
    pub fn new(
        data: SceneData,
        assets: &AssetLibrary,
        sheet: S,
        cfg: &SceneConfig,
    ) -> Result<Self, SceneError> {
        let no_sort: HashSet<&str> = data.options.no_sort.iter().map(String::as_str).collect();

        let mut actors = IndexMap::with_capacity(data.pixels.len());
        let mut sorted = Vec::new();
        let mut unsorted = Vec::new();
        for pixel in &data.pixels {
            let asset = assets.get(pixel).ok_or_else(|| SceneError::UnknownAsset {
                name: pixel.clone(),
            })?;
            let name = asset.name.clone();
            if actors.contains_key(&name) {
                return Err(SceneError::DuplicateActor { name });
            }

            let mut node = N::default();
            node.set_visible(false);
            let actor = Actor::new(asset, node, &cfg.actor);

            let index = actors.len();
            if data.options.sort_y && !no_sort.contains(name.as_str()) {
                sorted.push(index);
            } else {
                unsorted.push(index);
            }
            actors.insert(name, actor);
        }
        for name in &data.options.no_sort {
            if !actors.contains_key(name) {
                log::warn!("noSort names unknown actor '{name}'");
            }
        }
        drop(no_sort);

        Ok(Self {
            width: data.width,
            height: data.height,
            options: data.options,
            unsorted_layer: cfg.unsorted_layer,
            actors,
            sorted,
            unsorted,
            timeline: Timeline::new(data.timeline)?,
            sheet,
        })
    }

    /// Parse a scene asset and build it against `assets`.
    pub fn from_json(
        json: &str,
        assets: &AssetLibrary,
        sheet: S,
        cfg: &SceneConfig,
    ) -> Result<Self, SceneError> {
        Self::new(parse_scene_json(json)?, assets, sheet, cfg)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut S {
        &mut self.sheet
    }

    pub fn get(&self, name: &str) -> Option<&Actor<N>> {
        self.actors.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Actor<N>> {
        self.actors.get_mut(name)
    }

    /// Actors in insertion order.
    pub fn actors(&self) -> impl Iterator<Item = (&str, &Actor<N>)> {
        self.actors.iter().map(|(name, actor)| (name.as_str(), actor))
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Scene time in milliseconds.
    pub fn elapsed(&self) -> f32 {
        self.timeline.elapsed()
    }

    /// True once every timeline event has been applied.
    pub fn is_finished(&self) -> bool {
        self.timeline.is_finished()
    }

    /// Register every actor's frames with the sheet; returns frames added.
    pub fn rendersheet(&mut self, force: bool) -> usize {
        let mut added = 0;
        for actor in self.actors.values() {
            added += actor.render(&mut self.sheet, force);
        }
        added
    }

    /// Actor names in draw order, back to front.
    pub fn render_order(&self) -> Vec<&str> {
        let (first, second) = match self.unsorted_layer {
            UnsortedLayer::Below => (&self.unsorted, &self.sorted),
            UnsortedLayer::Above => (&self.sorted, &self.unsorted),
        };
        first
            .iter()
            .chain(second.iter())
            .filter_map(|idx| self.actors.get_index(*idx).map(|(name, _)| name.as_str()))
            .collect()
    }

    /// Apply one action to the named actor right away.
    ///
    /// Returns the signals the action emitted (an `animate` shows its first
    /// frame immediately).
    pub fn apply(&mut self, sprite: &str, action: &SceneAction) -> Result<Vec<Signal>, SceneError> {
        let actor = self
            .actors
            .get_mut(sprite)
            .ok_or_else(|| SceneError::UnknownActor {
                name: sprite.to_string(),
            })?;
        let mut signals = Vec::new();
        match action {
            SceneAction::Place { x, y } => {
                let node = actor.node_mut();
                node.set_visible(true);
                node.set_position([*x, *y]);
                actor.set_placed(true);
                actor.frame(0, &self.sheet);
            }
            SceneAction::Unplace => {
                actor.node_mut().set_visible(false);
                actor.set_placed(false);
            }
            SceneAction::Animate {
                animate,
                reverse,
                frame_time,
            } => actor
                .animate(animate, *reverse, *frame_time, &self.sheet, &mut signals)
                .map_err(|e| SceneError::animation(sprite, e))?,
            SceneAction::Move {
                x,
                y,
                duration,
                speed,
                ease,
            } => {
                let options = MoveOptions::from_fields(*duration, *speed, ease.as_deref())
                    .map_err(|e| SceneError::animation(sprite, e))?;
                actor
                    .move_to(*x, *y, options)
                    .map_err(|e| SceneError::animation(sprite, e))?;
            }
        }
        Ok(signals)
    }

    /// Advance the scene by `elapsed` milliseconds.
    ///
    /// Errors are collected into the frame and logged; a bad event or actor
    /// never stops the timeline. Negative or non-finite `elapsed` is treated
    /// as zero.
    pub fn tick(&mut self, elapsed: f32) -> SceneFrame {
        let elapsed = clamp_elapsed(elapsed);
        let mut frame = SceneFrame::default();

        for index in self.timeline.advance(elapsed) {
            let Some(entry) = self.timeline.get(index).cloned() else {
                continue;
            };
            match self.apply(&entry.sprite, &entry.action) {
                Ok(signals) => {
                    log::debug!(
                        "t={} applied {:?} to '{}'",
                        entry.time,
                        entry.action.kind(),
                        entry.sprite
                    );
                    frame.changed = true;
                    frame.signals.extend(signals.into_iter().map(|signal| ActorSignal {
                        actor: entry.sprite.clone(),
                        signal,
                    }));
                    frame.applied.push(AppliedEvent {
                        index,
                        time: entry.time,
                        actor: entry.sprite,
                        kind: entry.action.kind(),
                    });
                }
                Err(err) => {
                    log::warn!("timeline event {index} at t={}: {err}", entry.time);
                    frame.errors.push(err);
                }
            }
        }

        let mut signals = Vec::new();
        for (name, actor) in self.actors.iter_mut() {
            signals.clear();
            match actor.tick(elapsed, &self.sheet, &mut signals) {
                Ok(changed) => frame.changed |= changed,
                Err(err) => {
                    log::warn!("actor '{name}' stopped: {err}");
                    frame.errors.push(SceneError::animation(name, err));
                    frame.changed = true;
                }
            }
            frame.signals.extend(signals.drain(..).map(|signal| ActorSignal {
                actor: name.clone(),
                signal,
            }));
        }

        if self.options.sort_y && self.sort_depth() {
            frame.changed = true;
        }
        frame.elapsed = self.timeline.elapsed();
        frame
    }

    /// Rewind the timeline and return every actor to its freshly built state:
    /// hidden, unplaced, idle, and reseeded so a replay draws the same frames.
    pub fn restart(&mut self) {
        self.timeline.rewind();
        for actor in self.actors.values_mut() {
            actor.reset();
            actor.node_mut().set_visible(false);
        }
    }

    /// Stable-sort the depth-sorted actors by y; returns whether the order changed.
    fn sort_depth(&mut self) -> bool {
        let actors = &self.actors;
        let y = |idx: usize| actors[idx].node().position()[1];
        let in_order = self
            .sorted
            .windows(2)
            .all(|w| y(w[0]).total_cmp(&y(w[1])) != Ordering::Greater);
        if in_order {
            return false;
        }
        self.sorted.sort_by(|a, b| y(*a).total_cmp(&y(*b)));
        true
    }
}
