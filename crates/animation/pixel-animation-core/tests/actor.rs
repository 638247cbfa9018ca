use std::sync::Arc;

use pixel_animation_core::{
    parse_pixel_asset_json, Actor, AuthoredStep, Config, Easing, FrameSheet, MoveOptions,
    PixelAsset, PixelAssetData, RenderSheet, Signal, SpriteNode, SpriteTarget,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4
}

fn knight() -> Arc<PixelAsset> {
    let json = pixel_test_fixtures::assets::json("knight").unwrap();
    Arc::new(parse_pixel_asset_json(&json).unwrap())
}

fn actor() -> (Actor, FrameSheet) {
    let mut sheet = FrameSheet::new();
    let actor = Actor::new(knight(), SpriteNode::default(), &Config::default());
    actor.render(&mut sheet, false);
    (actor, sheet)
}

#[test]
fn every_asset_fixture_compiles() {
    for name in pixel_test_fixtures::assets::keys() {
        let json = pixel_test_fixtures::assets::json(&name).unwrap();
        let asset = parse_pixel_asset_json(&json)
            .unwrap_or_else(|e| panic!("fixture {name} failed to load: {e}"));
        assert_eq!(asset.name, name);
    }
}

#[test]
fn render_registers_frames_once_unless_forced() {
    let mut sheet = FrameSheet::new();
    let actor = Actor::new(knight(), SpriteNode::default(), &Config::default());
    assert_eq!(actor.render(&mut sheet, false), 4);
    assert_eq!(sheet.len(), 4);
    let first = sheet.get_texture("knight-0");
    assert!(first.is_some());

    assert_eq!(actor.render(&mut sheet, false), 0);
    assert_eq!(actor.render(&mut sheet, true), 4);
    assert_eq!(sheet.len(), 4);
    assert_eq!(sheet.get_texture("knight-0"), first);
    assert_eq!(actor.size(3), Some((2, 2)));
    assert_eq!(actor.size(4), None);
}

#[test]
fn animate_sets_texture_and_flip() {
    let (mut actor, sheet) = actor();
    let mut signals = Vec::new();
    actor
        .animate("walk", true, Some(10.0), &sheet, &mut signals)
        .unwrap();
    assert_eq!(actor.node().texture_key(), Some("knight-0"));
    assert_eq!(actor.node().texture, sheet.get_texture("knight-0"));
    assert_eq!(actor.node().scale(), [-1.0, 1.0]);

    assert!(actor.tick(10.0, &sheet, &mut signals).unwrap());
    assert_eq!(actor.node().texture_key(), Some("knight-1"));

    actor
        .animate("walk", false, Some(10.0), &sheet, &mut signals)
        .unwrap();
    assert_eq!(actor.node().scale(), [1.0, 1.0]);
}

#[test]
fn reverse_keeps_scale_magnitude() {
    let (mut actor, sheet) = actor();
    actor.node_mut().set_scale([3.0, 2.0]);
    actor
        .animate("walk", true, None, &sheet, &mut Vec::new())
        .unwrap();
    assert_eq!(actor.node().scale(), [-3.0, 2.0]);
}

#[test]
fn manual_frame_stops_playback() {
    let (mut actor, sheet) = actor();
    actor
        .animate("walk", false, None, &sheet, &mut Vec::new())
        .unwrap();
    actor.frame(2, &sheet);
    assert!(!actor.is_playing());
    assert_eq!(actor.node().texture_key(), Some("knight-2"));
}

#[test]
fn manual_steps_play_through_the_actor() {
    let (mut actor, sheet) = actor();
    let steps = vec![AuthoredStep::frame(3, 1.0), AuthoredStep::link("walk")];
    let mut signals = Vec::new();
    actor
        .animate_manual(&steps, false, Some(5.0), &sheet, &mut signals)
        .unwrap();
    assert_eq!(actor.node().texture_key(), Some("knight-3"));
    actor.tick(5.0, &sheet, &mut signals).unwrap();
    assert_eq!(actor.animator().current_animation(), Some("walk"));
    assert_eq!(actor.node().texture_key(), Some("knight-0"));
}

#[test]
fn unknown_animation_is_an_error_and_idles() {
    let (mut actor, sheet) = actor();
    assert!(actor
        .animate("dance", false, None, &sheet, &mut Vec::new())
        .is_err());
    assert!(!actor.is_playing());
}

#[test]
fn linear_move_hits_midpoint_and_lands_exactly() {
    let (mut actor, sheet) = actor();
    let mut signals = Vec::new();
    actor
        .move_to(100.0, 0.0, MoveOptions::duration(1000.0).with_easing(Easing::Linear))
        .unwrap();
    assert!(actor.tick(500.0, &sheet, &mut signals).unwrap());
    assert!(approx(actor.node().position()[0], 50.0));
    assert!(signals.is_empty());

    actor.tick(700.0, &sheet, &mut signals).unwrap();
    assert_eq!(actor.node().position(), [100.0, 0.0]);
    assert_eq!(signals, vec![Signal::MoveDone]);

    // finished tween leaves the node alone
    signals.clear();
    assert!(!actor.tick(100.0, &sheet, &mut signals).unwrap());
    assert!(signals.is_empty());
}

#[test]
fn new_move_replaces_the_running_one() {
    let (mut actor, sheet) = actor();
    let mut signals = Vec::new();
    actor.move_to(100.0, 0.0, MoveOptions::duration(100.0)).unwrap();
    actor.tick(50.0, &sheet, &mut signals).unwrap();
    let halfway = actor.node().position();
    actor
        .move_to(halfway[0], 40.0, MoveOptions::speed(0.5))
        .unwrap();
    actor.tick(80.0, &sheet, &mut signals).unwrap();
    assert_eq!(actor.node().position(), [halfway[0], 40.0]);
    assert_eq!(signals, vec![Signal::MoveDone]);
}

#[test]
fn animation_and_tweens_run_independently() {
    let (mut actor, sheet) = actor();
    let mut signals = Vec::new();
    actor
        .animate("walk", false, Some(10.0), &sheet, &mut signals)
        .unwrap();
    actor
        .rotate_to(1.0, MoveOptions::duration(40.0).with_easing(Easing::Linear))
        .unwrap();
    actor.tick(20.0, &sheet, &mut signals).unwrap();
    assert!(approx(actor.node().rotation(), 0.5));
    assert_eq!(actor.node().texture_key(), Some("knight-2"));
    actor.cancel_tweens();
    actor.tick(20.0, &sheet, &mut signals).unwrap();
    assert!(approx(actor.node().rotation(), 0.5));
    assert!(actor.is_playing());
}

#[test]
fn fixture_data_matches_compiled_asset() {
    let data: PixelAssetData = pixel_test_fixtures::assets::load("knight").unwrap();
    assert_eq!(data.animations.len(), 3);
    let asset = PixelAsset::from_data(data).unwrap();
    assert_eq!(asset.animations.names(), vec!["attack", "idle", "walk"]);
    // frame groups are expanded
    assert_eq!(asset.animations.get("walk").unwrap().len(), 5);
}

#[test]
fn non_finite_elapsed_moves_nothing() {
    let (mut actor, sheet) = actor();
    actor
        .move_to(10.0, 0.0, MoveOptions::duration(100.0))
        .unwrap();
    assert!(actor.tick(f32::NAN, &sheet, &mut Vec::new()).is_err());
    assert_eq!(actor.node().position(), [0.0, 0.0]);
    assert!(actor.tweens().is_moving());
}

#[test]
fn reset_returns_to_a_fresh_actor() {
    let (mut actor, sheet) = actor();
    let mut fresh = Actor::new(knight(), SpriteNode::default(), &Config::default());
    let mut first = Vec::new();
    actor
        .animate("idle", false, Some(1.0), &sheet, &mut first)
        .unwrap();
    for _ in 0..100 {
        actor.tick(1.0, &sheet, &mut first).unwrap();
    }
    actor.set_placed(true);
    actor.move_to(5.0, 5.0, MoveOptions::duration(50.0)).unwrap();
    actor.reset();
    assert!(!actor.is_playing());
    assert!(!actor.is_placed());
    assert!(!actor.tweens().is_moving());

    let run = |a: &mut Actor| {
        let mut signals = Vec::new();
        a.animate("idle", false, Some(1.0), &sheet, &mut signals)
            .unwrap();
        for _ in 0..100 {
            a.tick(1.0, &sheet, &mut signals).unwrap();
        }
        signals
    };
    assert_eq!(run(&mut actor), run(&mut fresh));
    assert_eq!(run(&mut actor), run(&mut fresh));
}
