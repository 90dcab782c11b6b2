use crate::{
    lifecycle::process_scheduled_events::ProcessScheduledEventsUseCase, shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use std::time::Duration;
use tracing::info;
use wellness_scheduler_infra::WellnessContext;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs the lifecycle processor in-process at the start of every interval,
/// beginning at the next whole minute.
///
/// Runs are awaited one after the other so this process never overlaps itself.
pub fn start_lifecycle_job(ctx: WellnessContext, interval_secs: u64) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        info!("Lifecycle job started with interval of {} seconds", interval_secs);
        let mut lifecycle_interval = interval(Duration::from_secs(interval_secs));
        loop {
            lifecycle_interval.tick().await;
            let usecase = ProcessScheduledEventsUseCase {
                now: ctx.sys.get_timestamp_millis(),
                dry_run: false,
            };
            // Failures are logged by `execute` and retried on the next tick
            let _ = execute(usecase, &ctx).await;
        }
    });
}
