//! Scenario tests driving every combinator through real scheduler ticks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tickwork_behavior::prelude::*;

/// Shared invocation counter plus a closure that bumps it.
fn counted() -> (Rc<Cell<u32>>, impl FnMut()) {
    let calls = Rc::new(Cell::new(0));
    let bump = Rc::clone(&calls);
    (calls, move || bump.set(bump.get() + 1))
}

// ==================== Ticking forever ====================

#[test]
fn test_always_runs_once_per_tick() {
    let sched = Scheduler::new();
    let (calls, bump) = counted();
    let handle = sched.always(bump);

    for _ in 0..5 {
        sched.tick(0.1);
    }
    assert_eq!(calls.get(), 5);
    assert!(handle.is_active());
    assert_eq!(sched.count(), 1);
}

#[test]
fn test_repeat_every_fires_on_interval_boundaries() {
    let sched = Scheduler::new();
    let (calls, bump) = counted();
    sched.repeat_every(2.0, bump);

    let mut observed = Vec::new();
    for _ in 0..4 {
        sched.tick(1.0);
        observed.push(calls.get());
    }
    assert_eq!(observed, vec![0, 1, 1, 2]);
}

#[test]
fn test_repeat_every_persists_indefinitely() {
    let sched = Scheduler::new();
    let (calls, bump) = counted();
    let handle = sched.repeat_every(2.0, bump);

    for _ in 0..100 {
        sched.tick(1.0);
    }
    assert_eq!(calls.get(), 50);
    assert!(handle.is_active());
    assert_eq!(sched.count(), 1);
}

#[test]
fn test_repeat_every_discards_overshoot() {
    let sched = Scheduler::new();
    let (calls, bump) = counted();
    sched.repeat_every(2.0, bump);

    // 1.5-long ticks cross the boundary on every second tick; the half
    // unit of overshoot is dropped at each firing rather than banked.
    sched.tick(1.5);
    assert_eq!(calls.get(), 0);
    sched.tick(1.5);
    assert_eq!(calls.get(), 1);
    sched.tick(1.5);
    assert_eq!(calls.get(), 1);
    sched.tick(1.5);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_repeat_every_zero_interval_fires_every_tick() {
    let sched = Scheduler::new();
    let (calls, bump) = counted();
    sched.repeat_every(0.0, bump);

    sched.tick(0.1);
    sched.tick(0.1);
    sched.tick(0.1);
    assert_eq!(calls.get(), 3);
}

// ==================== One-shot waits ====================

#[test]
fn test_wait_then_fires_on_the_crossing_tick() {
    let sched = Scheduler::new();
    let (calls, bump) = counted();
    sched.wait_then(3.0, bump);

    sched.tick(1.0);
    sched.tick(1.0);
    assert_eq!(calls.get(), 0);
    assert_eq!(sched.count(), 1);

    sched.tick(1.0);
    assert_eq!(calls.get(), 1);
    assert_eq!(sched.count(), 0);
}

#[test]
fn test_wait_then_zero_duration_fires_on_first_tick() {
    let sched = Scheduler::new();
    let (calls, bump) = counted();
    sched.wait_then(0.0, bump);

    // Not at call time; the first tick is the trigger.
    assert_eq!(calls.get(), 0);
    sched.tick(0.0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_run_when_fires_once_when_predicate_flips() {
    let sched = Scheduler::new();
    let ready = Rc::new(Cell::new(false));
    let (calls, bump) = counted();

    let gate = Rc::clone(&ready);
    let handle = sched.run_when(move || gate.get(), bump);

    sched.tick(1.0);
    sched.tick(1.0);
    assert_eq!(calls.get(), 0);

    ready.set(true);
    sched.tick(1.0);
    assert_eq!(calls.get(), 1);
    assert!(handle.is_finished());

    sched.tick(1.0);
    assert_eq!(calls.get(), 1);
}

// ==================== Timed loops ====================

#[test]
fn test_run_for_action_every_tick_then_callback() {
    let sched = Scheduler::new();
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();

    let action_log = Rc::clone(&log);
    let done_log = Rc::clone(&log);
    sched.run_for(
        3.0,
        move || action_log.borrow_mut().push("action"),
        move || done_log.borrow_mut().push("done"),
    );

    sched.tick(1.0);
    sched.tick(1.0);
    sched.tick(1.0);
    assert_eq!(*log.borrow(), vec!["action", "action", "action"]);
    assert_eq!(sched.count(), 1);

    // The callback lands on the tick after the crossing action call.
    sched.tick(1.0);
    assert_eq!(*log.borrow(), vec!["action", "action", "action", "done"]);
    assert_eq!(sched.count(), 0);
}

#[test]
fn test_run_for_zero_duration_skips_straight_to_callback() {
    let sched = Scheduler::new();
    let (action_calls, action) = counted();
    let (done_calls, done) = counted();
    sched.run_for(0.0, action, done);

    sched.tick(1.0);
    assert_eq!(action_calls.get(), 0);
    assert_eq!(done_calls.get(), 1);
    assert_eq!(sched.count(), 0);
}

#[test]
fn test_run_over_reports_unclamped_progress() {
    let sched = Scheduler::new();
    let reports: Rc<RefCell<Vec<f32>>> = Rc::default();
    let (done, bump) = counted();

    let sink = Rc::clone(&reports);
    sched.run_over(1.0, move |p| sink.borrow_mut().push(p), bump);

    sched.tick(0.4);
    sched.tick(0.4);
    sched.tick(0.4);
    assert_eq!(done.get(), 0);
    {
        let reports = reports.borrow();
        assert_eq!(reports.len(), 3);
        assert!((reports[0] - 0.4).abs() < 1e-6);
        assert!((reports[1] - 0.8).abs() < 1e-6);
        assert!((reports[2] - 1.2).abs() < 1e-6);
        assert!(reports[2] > 1.0);
    }

    sched.tick(0.4);
    assert_eq!(done.get(), 1);
    assert_eq!(sched.count(), 0);
}

#[test]
fn test_run_while_over_pauses_clock_and_reporting() {
    let sched = Scheduler::new();
    let paused = Rc::new(Cell::new(false));
    let reports: Rc<RefCell<Vec<f32>>> = Rc::default();
    let (done, bump) = counted();

    let gate = Rc::clone(&paused);
    let sink = Rc::clone(&reports);
    sched.run_while_over(move || gate.get(), 1.0, move |p| sink.borrow_mut().push(p), bump);

    sched.tick(0.5);
    assert_eq!(reports.borrow().len(), 1);

    // Guarded ticks neither report nor advance the clock.
    paused.set(true);
    sched.tick(0.5);
    sched.tick(0.5);
    assert_eq!(reports.borrow().len(), 1);

    paused.set(false);
    sched.tick(0.5);
    assert_eq!(reports.borrow().len(), 2);
    assert!((reports.borrow()[1] - 1.0).abs() < 1e-6);
    assert_eq!(done.get(), 0);

    sched.tick(0.5);
    assert_eq!(done.get(), 1);
    assert_eq!(sched.count(), 0);
}

// ==================== Stepped sequences ====================

#[test]
fn test_run_steps_walks_every_index_then_completes() {
    let sched = Scheduler::new();
    let log: Rc<RefCell<Vec<usize>>> = Rc::default();
    let (done, bump) = counted();

    let steps = Rc::clone(&log);
    let handle = sched.run_steps(4.0, 4, move |i| steps.borrow_mut().push(i), bump);

    // Index 0 fires synchronously, before any tick elapses.
    assert_eq!(*log.borrow(), vec![0]);
    assert_eq!(done.get(), 0);
    assert!(handle.is_active());

    sched.tick(1.0);
    assert_eq!(*log.borrow(), vec![0, 1]);
    sched.tick(1.0);
    assert_eq!(*log.borrow(), vec![0, 1, 2]);
    sched.tick(1.0);
    assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
    assert_eq!(done.get(), 0);

    // The final index gets its full sub-interval before completion; the
    // action count ends at exactly the step count.
    sched.tick(1.0);
    assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
    assert_eq!(done.get(), 1);
    assert!(handle.is_finished());
    assert_eq!(sched.count(), 0);
}

#[test]
fn test_run_steps_zero_count_completes_at_call_time() {
    let sched = Scheduler::new();
    let log: Rc<RefCell<Vec<usize>>> = Rc::default();
    let (done, bump) = counted();

    let steps = Rc::clone(&log);
    let handle = sched.run_steps(2.0, 0, move |i| steps.borrow_mut().push(i), bump);

    assert_eq!(done.get(), 1);
    assert!(log.borrow().is_empty());
    assert!(handle.is_finished());
    assert_eq!(sched.count(), 0);

    sched.tick(1.0);
    assert_eq!(done.get(), 1);
}

#[test]
fn test_run_steps_zero_duration_advances_once_per_tick() {
    let sched = Scheduler::new();
    let log: Rc<RefCell<Vec<usize>>> = Rc::default();
    let (done, bump) = counted();

    let steps = Rc::clone(&log);
    sched.run_steps(0.0, 3, move |i| steps.borrow_mut().push(i), bump);

    assert_eq!(*log.borrow(), vec![0]);
    sched.tick(0.25);
    assert_eq!(*log.borrow(), vec![0, 1]);
    sched.tick(0.25);
    assert_eq!(*log.borrow(), vec![0, 1, 2]);
    assert_eq!(done.get(), 0);

    sched.tick(0.25);
    assert_eq!(done.get(), 1);
    assert_eq!(sched.count(), 0);
}

// ==================== Primitive wrappers ====================

#[test]
fn test_run_until_completes_without_running_the_body() {
    let sched = Scheduler::new();
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
    let turns = Rc::new(Cell::new(0u32));

    let pred_turns = Rc::clone(&turns);
    let body_log = Rc::clone(&log);
    let done_log = Rc::clone(&log);
    sched.run_until(
        move || pred_turns.get() >= 2,
        move || body_log.borrow_mut().push("body"),
        move || done_log.borrow_mut().push("done"),
    );
    let bump = Rc::clone(&turns);
    sched.always(move || bump.set(bump.get() + 1));

    sched.tick(1.0);
    sched.tick(1.0);
    sched.tick(1.0);
    assert_eq!(*log.borrow(), vec!["body", "body", "done"]);
    assert_eq!(sched.count(), 1);
}

#[test]
fn test_run_while_until_pause_gates_body_not_termination() {
    let sched = Scheduler::new();
    let paused = Rc::new(Cell::new(true));
    let stop = Rc::new(Cell::new(false));
    let (body_calls, body) = counted();
    let (done_calls, on_done) = counted();

    let gate = Rc::clone(&paused);
    let until = Rc::clone(&stop);
    sched.run_while_until(move || gate.get(), move || until.get(), body, on_done);

    sched.tick(1.0);
    assert_eq!(body_calls.get(), 0);

    paused.set(false);
    sched.tick(1.0);
    assert_eq!(body_calls.get(), 1);

    // Termination wins even while paused.
    paused.set(true);
    stop.set(true);
    sched.tick(1.0);
    assert_eq!(body_calls.get(), 1);
    assert_eq!(done_calls.get(), 1);
    assert_eq!(sched.count(), 0);
}

// ==================== Lifecycle ====================

#[test]
fn test_clear_drops_behaviors_without_callbacks() {
    let sched = Scheduler::new();
    let (wait_calls, on_wait) = counted();
    let (loop_calls, on_loop) = counted();
    sched.wait_then(1.0, on_wait);
    sched.run_for(1.0, || {}, on_loop);

    sched.clear();
    assert_eq!(sched.count(), 0);

    sched.tick(5.0);
    assert_eq!(wait_calls.get(), 0);
    assert_eq!(loop_calls.get(), 0);
}

#[test]
fn test_cancel_stops_a_repeating_behavior() {
    let sched = Scheduler::new();
    let (calls, bump) = counted();
    let handle = sched.repeat_every(1.0, bump);

    sched.tick(1.0);
    assert_eq!(calls.get(), 1);

    assert!(handle.cancel());
    sched.tick(1.0);
    assert_eq!(calls.get(), 1);
    assert_eq!(sched.count(), 0);
}

#[test]
fn test_completion_callback_can_chain_the_next_behavior() {
    let sched = Scheduler::new();
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();

    let chain = sched.clone();
    let first = Rc::clone(&log);
    sched.wait_then(1.0, move || {
        first.borrow_mut().push("first");
        let second = Rc::clone(&first);
        chain.wait_then(1.0, move || second.borrow_mut().push("second"));
    });

    sched.tick(1.0);
    assert_eq!(*log.borrow(), vec!["first"]);
    assert_eq!(sched.count(), 1);

    sched.tick(1.0);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
    assert_eq!(sched.count(), 0);
}

// ==================== Validation ====================

#[test]
#[should_panic(expected = "non-negative duration")]
fn test_wait_then_rejects_negative_duration() {
    Scheduler::new().wait_then(-1.0, || {});
}

#[test]
#[should_panic(expected = "non-negative interval")]
fn test_repeat_every_rejects_negative_interval() {
    Scheduler::new().repeat_every(-0.5, || {});
}

#[test]
#[should_panic(expected = "positive duration")]
fn test_run_over_rejects_zero_duration() {
    Scheduler::new().run_over(0.0, |_| {}, || {});
}

#[test]
#[should_panic(expected = "non-negative duration")]
fn test_run_steps_rejects_nan_duration() {
    Scheduler::new().run_steps(f32::NAN, 3, |_| {}, || {});
}
