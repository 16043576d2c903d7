// Host-side tests for the frame loop, debouncer, animation clock, and timed
// transitions.

mod common;

use common::core::clock::AnimationClock;
use common::core::schedule::{Debouncer, FrameLoop};
use common::core::transition::{lerp, smoothstep, Easing, EntryAnimation, Transition};
use common::{FakeFrames, FakeTimers};
use glam::Vec3;

#[test]
fn frame_loop_keeps_one_request_in_flight() {
    let mut frames = FakeFrames::default();
    let mut fl = FrameLoop::default();
    assert!(fl.start(&mut frames));
    assert!(!fl.start(&mut frames));
    assert_eq!(frames.requested, 1);

    frames.fire();
    assert!(fl.begin_frame());
    fl.schedule_next(&mut frames);
    assert_eq!(frames.pending.len(), 1);
    assert!(fl.has_pending());
}

#[test]
fn stopped_loop_ignores_stray_callbacks() {
    let mut frames = FakeFrames::default();
    let mut fl = FrameLoop::default();
    fl.start(&mut frames);
    fl.stop(&mut frames);
    assert_eq!(frames.cancelled, vec![1]);
    assert!(!fl.begin_frame());
    fl.schedule_next(&mut frames);
    assert_eq!(frames.requested, 1);
}

#[test]
fn debouncer_restarts_on_every_trigger() {
    let mut timers = FakeTimers::default();
    let mut d = Debouncer::new(100);
    d.trigger(&mut timers);
    d.trigger(&mut timers);
    d.trigger(&mut timers);
    assert_eq!(timers.set_calls, 3);
    assert_eq!(timers.cleared.len(), 2);
    assert_eq!(timers.pending.len(), 1);

    assert!(d.fire());
    assert!(!d.fire());
    assert!(!d.is_pending());
}

#[test]
fn cancelled_debounce_never_fires() {
    let mut timers = FakeTimers::default();
    let mut d = Debouncer::new(100);
    d.trigger(&mut timers);
    d.cancel(&mut timers);
    assert!(timers.pending.is_empty());
    assert!(!d.fire());
    d.cancel(&mut timers);
    assert_eq!(timers.cleared.len(), 1);
}

#[test]
fn clock_reports_elapsed_and_clamped_delta() {
    let mut clock = AnimationClock::default();
    assert_eq!(clock.tick(5.0).elapsed, 0.0, "stopped clock reads zero");

    clock.start(10.0);
    let t = clock.tick(10.016);
    assert!((t.elapsed - 0.016).abs() < 1e-6);
    assert!((t.delta - 0.016).abs() < 1e-6);

    let t = clock.tick(20.0);
    assert_eq!(t.delta, 0.25);
    assert!((t.elapsed - 10.0).abs() < 1e-5);

    let t = clock.tick(19.0);
    assert_eq!(t.delta, 0.0);
    assert!((t.elapsed - 10.0).abs() < 1e-5);
}

#[test]
fn restarting_a_running_clock_keeps_its_origin() {
    let mut clock = AnimationClock::default();
    clock.start(1.0);
    clock.start(3.0);
    assert!((clock.tick(4.0).elapsed - 3.0).abs() < 1e-6);
    clock.stop();
    assert!(!clock.is_running());
}

#[test]
fn cubic_ease_out_hits_its_endpoints() {
    assert_eq!(Easing::CubicOut.apply(0.0), 0.0);
    assert_eq!(Easing::CubicOut.apply(1.0), 1.0);
    assert_eq!(Easing::CubicOut.apply(0.5), 0.875);
    assert_eq!(Easing::CubicOut.apply(2.0), 1.0);
    assert_eq!(Easing::Linear.apply(0.25), 0.25);
}

#[test]
fn helpers_interpolate() {
    assert_eq!(lerp(0.25, 1.0, 0.0), 0.25);
    assert_eq!(lerp(0.25, 1.0, 1.0), 1.0);
    assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    assert_eq!(smoothstep(0.25, 1.25, 0.0), 0.0);
    assert_eq!(smoothstep(0.25, 1.25, 5.0), 1.0);
}

#[test]
fn transition_samples_between_endpoints() {
    let t = Transition {
        start_time: 2.0,
        duration: 1.0,
        from: Vec3::ZERO,
        to: Vec3::new(4.0, 2.0, 0.0),
        easing: Easing::Linear,
    };
    assert_eq!(t.sample(1.0), Vec3::ZERO);
    assert_eq!(t.sample(2.5), Vec3::new(2.0, 1.0, 0.0));
    assert_eq!(t.sample(9.0), t.to);
    assert!(t.is_finished(3.0));
    assert!(!t.is_finished(2.9));
}

#[test]
fn entry_animation_returns_to_idle() {
    let mut entry = EntryAnimation::default();
    assert_eq!(entry.advance(0.0), None);

    entry.trigger(1.0, Vec3::ZERO, Vec3::new(1.0, 0.5, 0.0), 1.0);
    assert!(entry.is_active());
    assert_eq!(entry.advance(1.0), Some(Vec3::ZERO));
    assert_eq!(entry.advance(2.0), Some(Vec3::new(1.0, 0.5, 0.0)));
    assert!(!entry.is_active());
    assert_eq!(entry.advance(2.5), None);
}

#[test]
fn retrigger_restarts_from_the_current_rotation() {
    let mut entry = EntryAnimation::default();
    entry.trigger(0.0, Vec3::ZERO, Vec3::X, 1.0);
    let mid = entry.advance(0.5).unwrap_or_default();
    entry.trigger(0.5, mid, Vec3::X, 1.0);
    match entry {
        EntryAnimation::Animating(t) => {
            assert_eq!(t.from, mid);
            assert_eq!(t.to, mid + Vec3::X);
            assert_eq!(t.start_time, 0.5);
        }
        EntryAnimation::Idle => panic!("expected an active animation"),
    }
}
