mod dispatch_due_reminders;
mod schedule_reminder;
mod subscribers;

use actix_web::web;

pub use dispatch_due_reminders::{DispatchDueRemindersUseCase, SweepReport};
pub use schedule_reminder::ScheduleReminderUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Create a reminder
    cfg.route(
        "/reminders",
        web::post().to(schedule_reminder::schedule_reminder_controller),
    );
}
