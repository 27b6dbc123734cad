//! Integration tests for AlertnessEngine

mod common;
use common::*;

use rgb_breather::{AlertnessEngine, AlertnessPhase, AlertnessProfile, StateDescriptor};

fn tick_after(
    engine: &mut AlertnessEngine<TestInstant, MockTimeSource>,
    timer: &MockTimeSource,
    millis: u64,
) -> f32 {
    timer.advance(TestDuration(millis));
    engine.tick()
}

#[test]
fn dormant_engine_emits_baseline_floor() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);

    assert!(levels_equal(tick_after(&mut engine, &timer, 100), 0.0));

    engine.set_baseline(1000);
    assert!(levels_equal(tick_after(&mut engine, &timer, 100), 50.0));

    engine.set_baseline(400);
    assert!(levels_equal(tick_after(&mut engine, &timer, 100), 20.0));
}

#[test]
fn dormant_never_accumulates_state_time() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);

    for _ in 0..50 {
        tick_after(&mut engine, &timer, 250);
        assert_eq!(engine.phase(), AlertnessPhase::Dormant);
        assert_eq!(engine.state().state_time(), 0);
    }
}

#[test]
fn zero_trigger_is_ignored() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);

    engine.set_trigger(0);
    assert_eq!(engine.phase(), AlertnessPhase::Dormant);

    engine.set_trigger(1);
    assert_eq!(engine.phase(), AlertnessPhase::Waking);
}

#[test]
fn waking_ramp_with_regular_ticks() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);
    engine.set_baseline(0);
    engine.set_trigger(1);

    let expected = [0.0, 125.0, 250.0, 375.0, 500.0, 625.0, 750.0, 875.0];
    for value in expected {
        let alertness = tick_after(&mut engine, &timer, 100);
        assert!(levels_equal(alertness, value), "expected {}, got {}", value, alertness);
        assert_eq!(engine.phase(), AlertnessPhase::Waking);
    }

    // state_time sits exactly on the duration, the next tick emits the top and moves on
    assert_eq!(engine.state().state_time(), 800);
    let alertness = tick_after(&mut engine, &timer, 100);
    assert!(levels_equal(alertness, 1000.0));
    assert_eq!(engine.phase(), AlertnessPhase::Active);
    assert_eq!(engine.state().state_time(), 0);
}

#[test]
fn first_tick_measures_from_construction() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);
    engine.set_trigger(1);

    timer.advance(TestDuration(400));
    engine.tick();
    assert_eq!(engine.state().state_time(), 400);
}

#[test]
fn full_cycle_returns_to_dormant() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);
    engine.set_baseline(1000);
    engine.set_trigger(1);

    let mut phases = heapless::Vec::<AlertnessPhase, 8>::new();
    let mut ticks = 0;
    while ticks < 200 {
        tick_after(&mut engine, &timer, 100);
        ticks += 1;
        let phase = engine.phase();
        if phases.last() != Some(&phase) {
            phases.push(phase).unwrap();
        }
        if phase == AlertnessPhase::Dormant {
            break;
        }
    }

    assert_eq!(
        phases.as_slice(),
        &[
            AlertnessPhase::Waking,
            AlertnessPhase::Active,
            AlertnessPhase::Cooldown,
            AlertnessPhase::Dormant
        ]
    );
    // 9 waking ticks, 31 active, 31 cooldown
    assert_eq!(ticks, 71);
    assert!(levels_equal(tick_after(&mut engine, &timer, 100), 50.0));
}

#[test]
fn retrigger_while_active_restarts_hold() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);
    engine.set_trigger(1);

    while engine.phase() != AlertnessPhase::Active {
        tick_after(&mut engine, &timer, 100);
    }
    for _ in 0..20 {
        tick_after(&mut engine, &timer, 100);
    }
    assert_eq!(engine.state().state_time(), 2000);

    engine.set_trigger(1);
    assert_eq!(engine.phase(), AlertnessPhase::Active);
    assert_eq!(engine.state().state_time(), 0);
}

#[test]
fn retrigger_while_cooling_keeps_brightness_continuous() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);
    engine.set_trigger(1);

    while engine.phase() != AlertnessPhase::Cooldown {
        tick_after(&mut engine, &timer, 100);
    }
    for _ in 0..15 {
        tick_after(&mut engine, &timer, 100);
    }
    assert_eq!(engine.state().state_time(), 1500);

    engine.set_trigger(1);
    assert_eq!(engine.phase(), AlertnessPhase::Waking);
    assert_eq!(engine.state().state_time(), 400);

    // cooldown at 1500ms was at 500, waking at 400ms is at 500 too
    let alertness = tick_after(&mut engine, &timer, 0);
    assert!(levels_equal(alertness, 500.0));
}

#[test]
fn baseline_input_is_clamped() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);

    engine.set_baseline(5000);
    assert!(levels_equal(engine.baseline(), 1000.0));

    engine.set_baseline(-20);
    assert!(levels_equal(engine.baseline(), 0.0));
}

#[test]
fn output_stays_in_range_under_jitter() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);
    let mut jitter = Jitter::new(7);

    for _ in 0..5000 {
        match jitter.next(10) {
            0 => engine.set_trigger(1),
            1 => engine.set_baseline(jitter.next(3000) as i32 - 1000),
            _ => {}
        }

        let alertness = tick_after(&mut engine, &timer, jitter.next(400));
        assert!((0.0..=1000.0).contains(&alertness), "out of range: {}", alertness);
    }
}

#[test]
fn custom_profile_changes_ramp() {
    let profile = AlertnessProfile::builder()
        .global_influence(100.0)
        .state(AlertnessPhase::Waking, StateDescriptor::new(0.0, 1000.0, 200))
        .build()
        .unwrap();

    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::with_profile(&timer, profile);
    engine.set_baseline(1000);
    engine.set_trigger(1);

    assert!(levels_equal(tick_after(&mut engine, &timer, 100), 100.0));
    assert!(levels_equal(tick_after(&mut engine, &timer, 100), 600.0));
}

#[test]
fn backward_clock_jump_does_not_rewind_progress() {
    let timer = MockTimeSource::new();
    let mut engine = AlertnessEngine::new(&timer);
    engine.set_trigger(1);

    tick_after(&mut engine, &timer, 300);
    assert_eq!(engine.state().state_time(), 300);

    timer.set_time(TestInstant(100));
    let alertness = engine.tick();
    assert!(levels_equal(alertness, 375.0));
    assert_eq!(engine.state().state_time(), 300);

    tick_after(&mut engine, &timer, 100);
    assert_eq!(engine.state().state_time(), 400);
}
