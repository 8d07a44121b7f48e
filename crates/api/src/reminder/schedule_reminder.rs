use super::subscribers::ConfirmReminderScheduled;
use crate::error::NudgeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use nudge_api_structs::schedule_reminder::*;
use nudge_domain::{DueTimeEntry, DurationExpr, ExpressionError, IssueRef, ReminderEvent};
use nudge_infra::Context;
use tracing::warn;

pub async fn schedule_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<Context>,
) -> Result<HttpResponse, NudgeError> {
    let body = body.0;
    let usecase = ScheduleReminderUseCase {
        recipient: body.recipient,
        target: body.target,
        auth_context: body.auth_context,
        duration_expression: body.duration_expression,
    };

    execute(usecase, &ctx)
        .await
        .map(|scheduled| {
            HttpResponse::Created().json(APIResponse::new(&scheduled.event, scheduled.fire_at))
        })
        .map_err(NudgeError::from)
}

/// The producer half of the scheduler. Parses the requested delay,
/// persists the pending reminder and returns it together with its fire
/// time. The dispatcher finds it later through the durable stores only;
/// there is no direct call path between the two.
#[derive(Debug)]
pub struct ScheduleReminderUseCase {
    pub recipient: String,
    pub target: IssueRef,
    pub auth_context: String,
    pub duration_expression: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScheduledReminder {
    pub event: ReminderEvent,
    pub fire_at: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MalformedDuration(String),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MalformedDuration(expr) => {
                Self::BadClientData(format!("Invalid duration expression: `{}`", expr))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScheduleReminderUseCase {
    type Response = ScheduledReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "ScheduleReminder";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        // Reject a malformed request before any store write happens
        let delay = DurationExpr::parse(self.duration_expression.as_deref()).map_err(
            |e| match e {
                ExpressionError::InvalidNumber(expr) => UseCaseError::MalformedDuration(expr),
            },
        )?;

        let event = ReminderEvent {
            id: Default::default(),
            recipient: self.recipient.clone(),
            target: self.target.clone(),
            auth_context: self.auth_context.clone(),
        };
        let entry = DueTimeEntry::new(event.id.clone(), delay.fire_at(ctx.sys.get_timestamp()));

        // The two writes are not one transaction. Index first; if the
        // payload write fails the fresh index entry is orphaned and has
        // to go again before the error surfaces.
        ctx.repos
            .due_times
            .insert(&entry)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if ctx.repos.scheduled_events.insert(&event).await.is_err() {
            if let Err(e) = ctx.repos.due_times.delete(&event.id).await {
                warn!(
                    "Unable to remove orphaned due time entry for event {}: {:?}",
                    event.id, e
                );
            }
            return Err(UseCaseError::StorageError);
        }

        Ok(ScheduledReminder {
            event,
            fire_at: entry.fire_at,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ConfirmReminderScheduled)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use nudge_domain::ID;
    use nudge_infra::{ISys, IScheduledEventRepo, InMemoryNotificationGateway};
    use std::sync::Arc;

    struct StaticSys(i64);
    impl ISys for StaticSys {
        fn get_timestamp(&self) -> i64 {
            self.0
        }
    }

    struct UnavailableScheduledEventRepo;

    #[async_trait::async_trait]
    impl IScheduledEventRepo for UnavailableScheduledEventRepo {
        async fn insert(&self, _event: &ReminderEvent) -> anyhow::Result<()> {
            Err(anyhow!("Event store is down"))
        }

        async fn find(&self, _event_id: &ID) -> anyhow::Result<Option<ReminderEvent>> {
            Err(anyhow!("Event store is down"))
        }

        async fn delete(&self, _event_id: &ID) -> anyhow::Result<()> {
            Err(anyhow!("Event store is down"))
        }
    }

    fn setup(now: i64) -> (Context, Arc<InMemoryNotificationGateway>) {
        let mut ctx = Context::create_inmemory();
        ctx.sys = Arc::new(StaticSys(now));
        let notifier = Arc::new(InMemoryNotificationGateway::new());
        ctx.notifier = notifier.clone();
        (ctx, notifier)
    }

    fn usecase(duration_expression: Option<&str>) -> ScheduleReminderUseCase {
        ScheduleReminderUseCase {
            recipient: "alice".into(),
            target: IssueRef {
                owner: "nudge".into(),
                repo: "nudge".into(),
                issue_number: 7,
            },
            auth_context: "install-1".into(),
            duration_expression: duration_expression.map(Into::into),
        }
    }

    #[tokio::test]
    async fn schedules_reminder_in_both_stores() {
        let now = 1_000;
        let (ctx, _) = setup(now);

        let scheduled = execute(usecase(Some("/remind 2 hours")), &ctx)
            .await
            .expect("To schedule reminder");

        assert_eq!(scheduled.fire_at, now + 7_200);

        let due = ctx.repos.due_times.find_due(scheduled.fire_at).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].event_id, scheduled.event.id);
        assert_eq!(due[0].fire_at, scheduled.fire_at);

        let stored = ctx
            .repos
            .scheduled_events
            .find(&scheduled.event.id)
            .await
            .unwrap()
            .expect("To find stored payload");
        assert_eq!(stored, scheduled.event);
    }

    #[tokio::test]
    async fn missing_expression_uses_default_delay() {
        let now = 1_000;
        let (ctx, _) = setup(now);

        let scheduled = execute(usecase(None), &ctx).await.unwrap();
        assert_eq!(scheduled.fire_at, now + 600);
    }

    #[tokio::test]
    async fn malformed_expression_is_rejected_before_any_write() {
        let (ctx, notifier) = setup(0);

        let res = execute(usecase(Some("remind now please")), &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::MalformedDuration("remind now please".into())
        );

        assert!(ctx.repos.due_times.find_due(i64::MAX).await.unwrap().is_empty());
        assert_eq!(notifier.delivery_count(), 0);
    }

    #[tokio::test]
    async fn failed_payload_write_removes_orphaned_index_entry() {
        let (mut ctx, notifier) = setup(0);
        ctx.repos.scheduled_events = Arc::new(UnavailableScheduledEventRepo);

        let res = execute(usecase(Some("10 minutes")), &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::StorageError);

        // The index entry written before the failure was compensated
        // away, nothing dangles for the dispatcher to trip over
        assert!(ctx.repos.due_times.find_due(i64::MAX).await.unwrap().is_empty());
        assert_eq!(notifier.delivery_count(), 0);
    }

    #[tokio::test]
    async fn confirms_accepted_request() {
        let (ctx, notifier) = setup(0);

        let scheduled = execute(usecase(Some("10 minutes")), &ctx).await.unwrap();

        let deliveries = notifier.deliveries.lock().unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].0, scheduled.event);
        assert_eq!(deliveries[0].1, "Alright, I'll remind you!");
    }

    #[tokio::test]
    async fn lost_confirmation_does_not_fail_the_request() {
        let (ctx, notifier) = setup(0);
        notifier.set_broken(true);

        let scheduled = execute(usecase(None), &ctx).await;
        assert!(scheduled.is_ok());
    }
}
