//! Animation compiler.
//!
//! Flattens authored steps into the sequence the interpreter walks: frame
//! groups expand in place, Loop/Link/Unique markers keep their relative
//! position. Validation happens here so no actor ever reaches a bad step.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::data::{AnimationStep, AuthoredStep, FrameDuration};
use crate::error::AnimationError;

/// Compiled, read-only animation table shared by every actor of an asset.
#[derive(Clone, Debug, Default)]
pub struct AnimationSet {
    sequences: HashMap<String, Arc<[AnimationStep]>>,
}

impl AnimationSet {
    pub fn get(&self, name: &str) -> Option<Arc<[AnimationStep]>> {
        self.sequences.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Animation names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sequences.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Insert a sequence without validation.
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, name: &str, steps: Vec<AnimationStep>) {
        self.sequences.insert(name.to_string(), Arc::from(steps));
    }
}

fn check_duration(
    animation: &str,
    step: usize,
    duration: &FrameDuration,
) -> Result<(), AnimationError> {
    duration
        .validate()
        .map_err(|reason| AnimationError::InvalidDuration {
            animation: animation.to_string(),
            step,
            reason,
        })
}

/// Compile one animation's authored steps into a flat sequence.
pub fn compile_animation(
    name: &str,
    steps: &[AuthoredStep],
) -> Result<Vec<AnimationStep>, AnimationError> {
    let mut out = Vec::with_capacity(steps.len());
    for (idx, step) in steps.iter().enumerate() {
        match step {
            AuthoredStep::Frame { frame, duration } => {
                check_duration(name, idx, duration)?;
                out.push(AnimationStep::Frame {
                    frame: *frame,
                    duration: *duration,
                });
            }
            AuthoredStep::FrameGroup { frames, duration } => {
                check_duration(name, idx, duration)?;
                if frames.is_empty() {
                    return Err(AnimationError::InvalidDuration {
                        animation: name.to_string(),
                        step: idx,
                        reason: "frame group has no frames".to_string(),
                    });
                }
                out.extend(frames.iter().map(|frame| AnimationStep::Frame {
                    frame: *frame,
                    duration: *duration,
                }));
            }
            AuthoredStep::Loop => out.push(AnimationStep::Loop),
            AuthoredStep::Link { target } => out.push(AnimationStep::Link {
                target: target.clone(),
            }),
            AuthoredStep::Unique { choices, duration } => {
                check_duration(name, idx, duration)?;
                // The exclusion rule needs a second distinct value to fall back on.
                let distinct = choices
                    .iter()
                    .any(|c| choices.first().is_some_and(|first| c != first));
                if !distinct {
                    return Err(AnimationError::InvalidDuration {
                        animation: name.to_string(),
                        step: idx,
                        reason: format!(
                            "unique step needs at least 2 distinct choices, got {choices:?}"
                        ),
                    });
                }
                out.push(AnimationStep::Unique {
                    choices: choices.clone(),
                    duration: *duration,
                });
            }
        }
    }
    if out.is_empty() {
        return Err(AnimationError::EmptyAnimation {
            animation: name.to_string(),
        });
    }
    Ok(out)
}

/// Compile every animation of an asset.
///
/// Link targets must name an animation of the same set. When `frame_count`
/// is given, frame indices are bounds-checked against it.
pub fn compile_set(
    animations: &HashMap<String, Vec<AuthoredStep>>,
    frame_count: Option<usize>,
) -> Result<AnimationSet, AnimationError> {
    let mut names: Vec<&String> = animations.keys().collect();
    names.sort_unstable();

    let mut sequences = HashMap::with_capacity(animations.len());
    for name in names {
        let authored = &animations[name];
        let compiled = compile_animation(name, authored)?;

        for (idx, step) in authored.iter().enumerate() {
            if let AuthoredStep::Link { target } = step {
                if !animations.contains_key(target) {
                    return Err(AnimationError::UnknownLinkTarget {
                        animation: name.clone(),
                        step: idx,
                        target: target.clone(),
                    });
                }
            }
        }

        if let Some(count) = frame_count {
            check_frames(name, &compiled, count)?;
        }
        sequences.insert(name.clone(), Arc::from(compiled));
    }
    Ok(AnimationSet { sequences })
}

/// Check every frame a sequence can show exists in an asset with `frame_count` frames.
pub fn check_frames(
    name: &str,
    steps: &[AnimationStep],
    frame_count: usize,
) -> Result<(), AnimationError> {
    let out_of_range = |frame: usize| AnimationError::FrameOutOfRange {
        animation: name.to_string(),
        frame,
        frame_count,
    };
    for step in steps {
        match step {
            AnimationStep::Frame { frame, .. } if *frame >= frame_count => {
                return Err(out_of_range(*frame));
            }
            AnimationStep::Unique { choices, .. } => {
                if let Some(frame) = choices.iter().find(|c| **c >= frame_count) {
                    return Err(out_of_range(*frame));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<AuthoredStep> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn frame_groups_expand_in_order() {
        let steps = parse(r#"[[[0, 1, 2], 2], ["unique", [3, 4]], "loop"]"#);
        let compiled = compile_animation("idle", &steps).unwrap();
        assert_eq!(compiled.len(), 5);
        for (i, step) in compiled.iter().take(3).enumerate() {
            assert_eq!(
                step,
                &AnimationStep::Frame {
                    frame: i,
                    duration: FrameDuration::Fixed(2.0)
                }
            );
        }
        assert!(matches!(compiled[3], AnimationStep::Unique { .. }));
        assert_eq!(compiled[4], AnimationStep::Loop);
    }

    #[test]
    fn rejects_unique_without_two_distinct_choices() {
        let err = compile_animation("blink", &parse(r#"[["unique", [3]]]"#)).unwrap_err();
        assert!(matches!(err, AnimationError::InvalidDuration { step: 0, .. }));
        let err = compile_animation("blink", &parse(r#"[["unique", [3, 3]]]"#)).unwrap_err();
        assert!(matches!(err, AnimationError::InvalidDuration { .. }));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = compile_animation("walk", &parse(r#"[0, [1, [5, 2]]]"#)).unwrap_err();
        assert!(matches!(err, AnimationError::InvalidDuration { step: 1, .. }));
    }

    #[test]
    fn rejects_empty_sequences() {
        let err = compile_animation("none", &[]).unwrap_err();
        assert!(matches!(err, AnimationError::EmptyAnimation { .. }));
        let err = compile_animation("none", &parse("[[[], 1]]")).unwrap_err();
        assert!(matches!(err, AnimationError::InvalidDuration { .. }));
    }

    #[test]
    fn set_checks_links_and_frames() {
        let mut anims = HashMap::new();
        anims.insert("walk".to_string(), parse(r#"[0, 1, ["link", "run"]]"#));
        let err = compile_set(&anims, None).unwrap_err();
        assert!(matches!(err, AnimationError::UnknownLinkTarget { step: 2, .. }));

        anims.insert("run".to_string(), parse(r#"[2, ["unique", [3, 9]]]"#));
        let err = compile_set(&anims, Some(4)).unwrap_err();
        assert_eq!(
            err,
            AnimationError::FrameOutOfRange {
                animation: "run".into(),
                frame: 9,
                frame_count: 4
            }
        );

        let set = compile_set(&anims, Some(10)).unwrap();
        assert_eq!(set.names(), vec!["run", "walk"]);
        assert_eq!(set.get("walk").unwrap().len(), 3);
    }
}
