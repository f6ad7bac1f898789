//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step/cubic interpolation and cursor fallback
//! - AnimationClip duration and playability
//! - ClipBinding loop policy and seek clamping
//! - PlaybackController transport state machine and time reporting
//! - AnimationMixer posing a scene graph

use std::sync::Arc;

use glam::{Quat, Vec3};

use rigview::animation::binder::TargetPath;
use rigview::animation::clip::{AnimationClip, Track, TrackData, TrackMeta};
use rigview::animation::tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
use rigview::animation::{
    ClipBinding, LoopEvent, PlaybackController, PlaybackState, REPORT_THRESHOLD, SPEED_PRESETS,
    TimeUpdateKind,
};
use rigview::scene::{Node, SceneGraph};
use rigview::AnimationMixer;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn hips_track(duration: f32) -> Track {
    Track {
        meta: TrackMeta {
            node_name: "Hips".to_string(),
            target: TargetPath::Translation,
        },
        data: TrackData::Vector3(KeyframeTrack::new(
            vec![0.0, duration],
            vec![Vec3::ZERO, Vec3::new(duration, 0.0, 0.0)],
            InterpolationMode::Linear,
        )),
    }
}

fn clip(duration: f32) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new("walk", vec![hips_track(duration)]))
}

fn playing(duration: f32, loop_enabled: bool) -> PlaybackController {
    let mut c = PlaybackController::new();
    c.set_loop(loop_enabled);
    c.set_clip(Some(clip(duration)));
    assert!(c.play());
    c
}

// ============================================================================
// KeyframeTrack
// ============================================================================

#[test]
fn track_linear_vec3_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 0.0, -10.0)],
        InterpolationMode::Linear,
    );

    let v = track.sample(0.5).unwrap();
    assert!(approx(v.x, 5.0) && approx(v.z, -5.0), "got {v}");
}

#[test]
fn track_clamps_outside_range() {
    let track = KeyframeTrack::new(
        vec![1.0, 2.0],
        vec![10.0_f32, 20.0],
        InterpolationMode::Linear,
    );

    assert!(approx(track.sample(0.0).unwrap(), 10.0));
    assert!(approx(track.sample(5.0).unwrap(), 20.0));
}

#[test]
fn track_step_holds_previous_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Step,
    );

    assert!(approx(track.sample(0.99).unwrap(), 0.0));
    assert!(approx(track.sample(1.0).unwrap(), 10.0));
    assert!(approx(track.sample(1.5).unwrap(), 10.0));
}

#[test]
fn track_cubic_hits_keyframe_values() {
    // [in_tangent, value, out_tangent] per keyframe
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 1.0, 0.0, 0.0, 3.0, 0.0],
        InterpolationMode::CubicSpline,
    );

    assert!(approx(track.sample(0.0).unwrap(), 1.0));
    assert!(approx(track.sample(1.0).unwrap(), 3.0));
    // Zero tangents: symmetric smoothstep between the values.
    assert!(approx(track.sample(0.5).unwrap(), 2.0));
}

#[test]
fn track_quat_slerps() {
    let end = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Quat::IDENTITY, end],
        InterpolationMode::Linear,
    );

    let q = track.sample(0.5).unwrap();
    let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
    assert!(q.dot(expected).abs() > 1.0 - EPSILON);
}

#[test]
fn track_empty_samples_nothing() {
    let track: KeyframeTrack<f32> = KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear);
    assert!(track.sample(0.5).is_none());
    assert!(track.is_empty());
}

#[test]
fn cursor_matches_stateless_sampling_after_jump() {
    let times: Vec<f32> = (0..20).map(|i| i as f32 * 0.1).collect();
    let values: Vec<f32> = (0..20).map(|i| i as f32).collect();
    let track = KeyframeTrack::new(times, values, InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    for t in [0.05, 0.15, 1.85, 0.35, 1.0, 0.0] {
        let with_cursor = track.sample_with_cursor(t, &mut cursor).unwrap();
        let stateless = track.sample(t).unwrap();
        assert!(approx(with_cursor, stateless), "t={t}: {with_cursor} vs {stateless}");
    }
}

// ============================================================================
// AnimationClip
// ============================================================================

#[test]
fn clip_duration_is_last_keyframe() {
    let clip = AnimationClip::new("walk", vec![hips_track(1.5), hips_track(2.5)]);
    assert!(approx(clip.duration, 2.5));
    assert_eq!(clip.track_count(), 2);
    assert_eq!(clip.target_names(), vec!["Hips"]);
}

#[test]
fn clip_playability() {
    assert!(clip(1.0).is_playable());
    assert!(!AnimationClip::new("empty", vec![]).is_playable());
    assert!(!AnimationClip::with_duration("zero", 0.0, vec![hips_track(1.0)]).is_playable());
    assert!(approx(AnimationClip::with_duration("neg", -3.0, vec![]).duration, 0.0));
}

// ============================================================================
// ClipBinding
// ============================================================================

#[test]
fn binding_unbound_is_inert() {
    let mut b = ClipBinding::new();
    assert!(!b.advance(1.0, 1.0));
    assert_eq!(b.apply_loop_policy(true), LoopEvent::None);
    assert!(approx(b.seek(3.0), 0.0));
    assert!(approx(b.time(), 0.0));
}

#[test]
fn binding_wraps_and_clamps() {
    let mut b = ClipBinding::new();
    b.bind(Some(clip(2.0)));
    b.set_paused(false);

    b.advance(2.5, 1.0);
    assert_eq!(b.apply_loop_policy(true), LoopEvent::Wrapped);
    assert!(approx(b.time(), 0.5));

    b.advance(7.0, 1.0);
    assert_eq!(b.apply_loop_policy(false), LoopEvent::Clamped);
    assert!(approx(b.time(), 2.0));
    assert!(b.is_paused());
}

#[test]
fn binding_seek_clamps() {
    let mut b = ClipBinding::new();
    b.bind(Some(clip(2.0)));
    assert!(approx(b.seek(-1.0), 0.0));
    assert!(approx(b.seek(9.0), 2.0));
    assert!(approx(b.seek(f32::NAN), 0.0));
}

// ============================================================================
// PlaybackController: state machine
// ============================================================================

#[test]
fn controller_starts_without_clip() {
    let mut c = PlaybackController::new();
    assert_eq!(c.state(), PlaybackState::NoClip);
    assert!(!c.play());
    assert!(c.seek(1.0).is_none());
    assert!(c.tick(1.0).is_none());
    assert!(approx(c.current_time(), 0.0));
    assert!(approx(c.duration(), 0.0));
    assert!(c.bound_clip_name().is_none());
}

#[test]
fn controller_refuses_invalid_clip() {
    let mut c = PlaybackController::new();
    c.set_clip(Some(Arc::new(AnimationClip::new("empty", vec![]))));
    assert_eq!(c.state(), PlaybackState::NoClip);
    assert!(!c.play());
    assert!(!c.is_playing());
    assert_eq!(c.bound_clip_name(), Some("empty"));
    assert!(!c.has_playable_clip());
}

#[test]
fn controller_new_clip_comes_up_paused() {
    let mut c = PlaybackController::new();
    c.set_clip(Some(clip(2.0)));
    assert_eq!(c.state(), PlaybackState::Paused);
    assert!(approx(c.duration(), 2.0));
    assert_eq!(c.bound_clip_name(), Some("walk"));
}

#[test]
fn controller_clear_from_any_state() {
    let mut c = playing(2.0, true);
    c.tick(0.5);
    c.clear();
    assert_eq!(c.state(), PlaybackState::NoClip);
    assert!(approx(c.current_time(), 0.0));
}

#[test]
fn controller_toggle() {
    let mut c = PlaybackController::new();
    c.set_clip(Some(clip(2.0)));
    assert!(c.toggle());
    assert!(c.is_playing());
    assert!(!c.toggle());
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn controller_paused_does_not_advance() {
    let mut c = PlaybackController::new();
    c.set_clip(Some(clip(2.0)));
    assert!(c.tick(0.5).is_none());
    assert!(approx(c.current_time(), 0.0));
}

#[test]
fn controller_rejects_invalid_speed() {
    let mut c = PlaybackController::new();
    assert!(c.set_speed(1.5));
    assert!(!c.set_speed(0.0));
    assert!(!c.set_speed(-1.0));
    assert!(!c.set_speed(f32::NAN));
    assert!(!c.set_speed(f32::INFINITY));
    assert!(approx(c.speed(), 1.5));
}

#[test]
fn controller_accepts_every_preset_speed() {
    let mut c = PlaybackController::new();
    for speed in SPEED_PRESETS {
        assert!(c.set_speed(speed));
        assert!(approx(c.speed(), speed));
    }
}

#[test]
fn controller_ended_play_requires_loop() {
    let mut c = playing(1.0, false);
    c.tick(2.0);
    assert_eq!(c.state(), PlaybackState::Ended);
    assert!(!c.play());

    c.set_loop(true);
    assert!(c.play());
    let update = c.tick(0.25).unwrap();
    assert_eq!(update.kind, TimeUpdateKind::Wrapped);
    assert!(approx(c.current_time(), 0.25));
}

#[test]
fn controller_seek_leaves_ended() {
    let mut c = playing(1.0, false);
    c.tick(5.0);
    assert_eq!(c.state(), PlaybackState::Ended);

    c.seek(0.5);
    assert_eq!(c.state(), PlaybackState::Paused);
    assert!(c.play());
}

#[test]
fn controller_seek_keeps_play_state() {
    let mut c = playing(2.0, true);
    let update = c.seek(1.25).unwrap();
    assert_eq!(update.kind, TimeUpdateKind::Seek);
    assert!(approx(update.time, 1.25));
    assert!(c.is_playing());
}

#[test]
fn controller_step_scrubs_relative() {
    let mut c = PlaybackController::new();
    c.set_clip(Some(clip(3.0)));
    c.step(1.0);
    c.step(1.0);
    assert!(approx(c.current_time(), 2.0));
    c.step(5.0);
    assert!(approx(c.current_time(), 3.0));
    c.step(-10.0);
    assert!(approx(c.current_time(), 0.0));
}

// ============================================================================
// PlaybackController: time properties
// ============================================================================

#[test]
fn loop_wrap_after_exact_duration() {
    let mut c = playing(2.0, true);
    for _ in 0..8 {
        c.tick(0.25);
    }
    assert!(approx(c.current_time(), 0.0), "got {}", c.current_time());
    assert!(c.is_playing());
}

#[test]
fn loop_wrap_stays_in_range_for_uneven_steps() {
    let mut c = playing(2.0, true);
    let mut total = 0.0_f32;
    for i in 0..500 {
        let dt = 0.013 + (i % 7) as f32 * 0.011;
        total += dt;
        c.tick(dt);
        let t = c.current_time();
        assert!((0.0..2.0).contains(&t), "tick {i}: {t}");
    }
    let expected = total % 2.0;
    let got = c.current_time();
    let gap = (expected - got).abs();
    assert!(gap.min(2.0 - gap) < 1e-3, "expected {expected}, got {got}");
}

#[test]
fn clamp_on_end_regardless_of_overshoot() {
    for overshoot in [0.001, 0.5, 10.0, 1000.0] {
        let mut c = playing(2.0, false);
        c.tick(1.0);
        let update = c.tick(1.0 + overshoot).unwrap();
        assert_eq!(update.kind, TimeUpdateKind::Clamped);
        assert_eq!(c.current_time(), 2.0);
        assert!(!c.is_playing());

        assert!(c.tick(1.0).is_none());
        assert_eq!(c.current_time(), 2.0);
    }
}

#[test]
fn seek_is_idempotent() {
    for t in [-5.0, 0.0, 0.7, 2.0, 9.0] {
        let mut c = PlaybackController::new();
        c.set_clip(Some(clip(2.0)));
        c.seek(t);
        let once = c.current_time();
        c.seek(t);
        assert_eq!(c.current_time(), once, "t={t}");
    }
}

#[test]
fn speed_scales_advance() {
    for speed in [0.25, 0.5, 1.0, 1.75, 2.0, 3.0] {
        let mut c = playing(100.0, true);
        c.set_speed(speed);
        c.tick(0.4);
        assert!(approx(c.current_time(), speed * 0.4), "speed {speed}");
    }
}

#[test]
fn scenario_looping_ticks_wrap_to_point_one() {
    let mut c = playing(2.0, true);
    for dt in [0.5, 0.5, 0.5, 0.6] {
        c.tick(dt);
    }
    assert!((c.current_time() - 0.1).abs() < 1e-4, "got {}", c.current_time());
    assert!(c.is_playing());
}

#[test]
fn scenario_non_looping_ticks_clamp_to_end() {
    let mut c = playing(2.0, false);
    for dt in [0.5, 0.5, 0.5, 0.6] {
        c.tick(dt);
    }
    assert_eq!(c.current_time(), 2.0);
    assert!(!c.is_playing());
}

#[test]
fn wrap_is_always_reported() {
    let mut c = playing(1.0, true);
    c.tick(0.99);
    // Moves less than the threshold but crosses the end.
    let update = c.tick(0.02).unwrap();
    assert!(0.02 < REPORT_THRESHOLD);
    assert_eq!(update.kind, TimeUpdateKind::Wrapped);
    assert!(approx(update.time, c.current_time()));
}

#[test]
fn negative_and_nan_deltas_do_not_move_time() {
    let mut c = playing(2.0, true);
    c.tick(0.5);
    c.tick(-1.0);
    c.tick(f32::NAN);
    assert!(approx(c.current_time(), 0.5));
}

// ============================================================================
// AnimationMixer
// ============================================================================

#[test]
fn mixer_poses_named_node() {
    let mut graph = SceneGraph::new();
    let root = graph.add_node(Node::new("Armature"));
    let hips = graph.add_child(root, Node::new("Hips"));

    let mut mixer = AnimationMixer::new();
    mixer.bind(Some(clip(2.0)), &graph);
    assert_eq!(mixer.bindings().len(), 1);

    mixer.apply(1.0, &mut graph);
    let p = graph.get_node(hips).unwrap().transform.position;
    assert!(approx(p.x, 1.0), "got {p}");

    mixer.stop();
    assert!(!mixer.is_active());
    mixer.apply(2.0, &mut graph);
    assert!(approx(graph.get_node(hips).unwrap().transform.position.x, 1.0));
}

#[test]
fn mixer_skips_unresolved_tracks() {
    let mut graph = SceneGraph::new();
    graph.add_node(Node::new("Root"));

    let mut mixer = AnimationMixer::new();
    mixer.bind(Some(clip(1.0)), &graph);
    assert!(mixer.is_active());
    assert!(mixer.bindings().is_empty());
    mixer.apply(0.5, &mut graph);
}
