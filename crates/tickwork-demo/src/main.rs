//! Demo scene: a fixed-timestep frame loop driving a handful of behaviors.
//!
//! Run with `RUST_LOG=tickwork_demo=debug` to see the per-frame progress
//! reports alongside the milestone events.

use anyhow::Result;
use tickwork_behavior::{ScheduleExt, Timer};
use tickwork_core::{Scheduler, Step};
use tracing::{debug, info};

const FRAME: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tickwork_demo=info".parse()?),
        )
        .init();

    let sched = Scheduler::new();

    // Countdown, one step per second, chaining an engine burn from its
    // completion callback.
    let chain = sched.clone();
    sched.run_steps(
        3.0,
        3,
        |step| info!(step, "countdown"),
        move || {
            info!("liftoff");
            chain.run_for(1.0, || debug!("engine burn"), || info!("burn complete"));
        },
    );

    // Heartbeat until the wait below silences it.
    let beats = sched.repeat_every(0.5, || info!("heartbeat"));
    sched.wait_then(3.5, move || {
        info!("silencing the heartbeat");
        beats.cancel();
    });

    // Charge level reported as a completion fraction over two seconds.
    sched.run_over(
        2.0,
        |fraction| debug!(fraction, "charging"),
        || info!("charge complete"),
    );

    // A handwritten routine: delegates to a timed hold, then retires.
    let mut stage = 0u32;
    sched.register(move |_dt: f32| match stage {
        0 => {
            stage = 1;
            info!("probe launched");
            let mut hold = Timer::new(0.75);
            Step::delegate(move |dt: f32| {
                if hold.advance(dt) {
                    info!("probe locked");
                    Step::Complete
                } else {
                    Step::Suspend
                }
            })
        }
        _ => {
            info!("probe retired");
            Step::Complete
        }
    });

    let mut frames = 0u32;
    while sched.is_active() && frames < 600 {
        sched.tick(FRAME);
        frames += 1;
    }
    info!(frames, remaining = sched.count(), "scene over");
    sched.clear();
    Ok(())
}
