use crate::shared::usecase::UseCase;
use nudge_domain::ReminderEvent;
use nudge_infra::Context;
use tracing::{error, warn};

/// One dispatcher sweep. Finds every reminder whose fire time has been
/// reached, delivers it through the notification gateway and retires the
/// delivered ones from both stores. A reminder is removed only after a
/// confirmed delivery; failed deliveries stay due and are picked up again
/// by the next sweep, subject to the configured retry policy.
#[derive(Debug)]
pub struct DispatchDueRemindersUseCase;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

/// What one sweep did, mostly for observability and tests
#[derive(Debug, Default, PartialEq)]
pub struct SweepReport {
    pub delivered: usize,
    pub failed: usize,
    /// Stray index entries without a payload that were cleaned up
    pub healed: usize,
    /// Events dropped because the retry policy gave them up
    pub dead_lettered: usize,
}

fn reminder_message(event: &ReminderEvent) -> String {
    format!("Don't forget about this issue @{}!", event.recipient)
}

#[async_trait::async_trait(?Send)]
impl UseCase for DispatchDueRemindersUseCase {
    type Response = SweepReport;

    type Error = UseCaseError;

    const NAME: &'static str = "DispatchDueReminders";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp();
        // A failed index query aborts the whole sweep, the next tick
        // simply tries again with no partial state left behind.
        let due = ctx.repos.due_times.find_due(now).await.map_err(|e| {
            error!("Unable to query due time index: {:?}", e);
            UseCaseError::StorageError
        })?;

        let mut report = SweepReport::default();
        for entry in due {
            let event = match ctx.repos.scheduled_events.find(&entry.event_id).await {
                Ok(Some(event)) => event,
                Ok(None) => {
                    // Index entry without a payload: the stores diverged,
                    // probably a half-completed schedule. Heal by
                    // dropping the stray entry.
                    warn!(
                        "Due time entry for event {} has no stored payload, removing it",
                        entry.event_id
                    );
                    ctx.repos
                        .due_times
                        .delete(&entry.event_id)
                        .await
                        .map_err(|_| UseCaseError::StorageError)?;
                    report.healed += 1;
                    continue;
                }
                Err(e) => {
                    error!("Unable to load event {}: {:?}", entry.event_id, e);
                    return Err(UseCaseError::StorageError);
                }
            };

            match ctx.notifier.deliver(&event, &reminder_message(&event)).await {
                Ok(()) => {
                    // Delivery is confirmed, only now may the event be
                    // retired from both stores. Payload first: failing
                    // in between leaves an index entry without a
                    // payload, which the healing step above cleans up
                    // on a later sweep. The other way around the
                    // payload would be orphaned with nothing left
                    // pointing at it.
                    ctx.repos
                        .scheduled_events
                        .delete(&entry.event_id)
                        .await
                        .map_err(|_| UseCaseError::StorageError)?;
                    ctx.repos
                        .due_times
                        .delete(&entry.event_id)
                        .await
                        .map_err(|_| UseCaseError::StorageError)?;
                    report.delivered += 1;
                }
                Err(e) => {
                    error!(
                        "Unable to deliver reminder {} to @{}: {:?}",
                        entry.event_id, event.recipient, e
                    );
                    let attempts = ctx
                        .repos
                        .due_times
                        .record_attempt(&entry.event_id)
                        .await
                        .map_err(|_| UseCaseError::StorageError)?;

                    if ctx.config.retry_policy.is_exhausted(attempts) {
                        warn!(
                            "Dropping reminder {} after {} failed delivery attempts",
                            entry.event_id, attempts
                        );
                        // Payload first here as well, for the same reason
                        ctx.repos
                            .scheduled_events
                            .delete(&entry.event_id)
                            .await
                            .map_err(|_| UseCaseError::StorageError)?;
                        ctx.repos
                            .due_times
                            .delete(&entry.event_id)
                            .await
                            .map_err(|_| UseCaseError::StorageError)?;
                        report.dead_lettered += 1;
                    } else {
                        report.failed += 1;
                    }
                }
            }
        }

        Ok(report)
    }
}
