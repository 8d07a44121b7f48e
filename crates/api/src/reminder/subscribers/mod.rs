use super::schedule_reminder::{ScheduleReminderUseCase, ScheduledReminder};
use crate::shared::usecase::Subscriber;
use nudge_infra::Context;
use tracing::warn;

pub struct ConfirmReminderScheduled;

#[async_trait::async_trait(?Send)]
impl Subscriber<ScheduleReminderUseCase> for ConfirmReminderScheduled {
    async fn notify(&self, scheduled: &ScheduledReminder, ctx: &Context) {
        // Sideeffect, a lost confirmation never fails the request
        if let Err(e) = ctx
            .notifier
            .deliver(&scheduled.event, "Alright, I'll remind you!")
            .await
        {
            warn!(
                "Unable to confirm reminder {} to @{}: {:?}",
                scheduled.event.id, scheduled.event.recipient, e
            );
        }
    }
}
