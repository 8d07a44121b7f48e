use crate::reminder::DispatchDueRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::interval;
use nudge_infra::Context;
use std::time::Duration;

/// Spawns the dispatcher loop: one sweep per tick for the lifetime of
/// the process. Sweeps never overlap because the loop awaits each sweep
/// before it sleeps again. A sweep that fails is simply retried at the
/// next tick.
pub fn start_dispatch_due_reminders_job(ctx: Context) {
    actix_web::rt::spawn(async move {
        let mut tick = interval(Duration::from_secs(ctx.config.dispatch_interval_secs));
        loop {
            tick.tick().await;
            let _ = execute(DispatchDueRemindersUseCase, &ctx).await;
        }
    });
}
