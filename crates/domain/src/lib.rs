mod duration;
mod reminder;
mod retry;
mod shared;

pub use duration::{DurationExpr, ExpressionError, DEFAULT_REMIND_DELAY_SECS};
pub use reminder::{DueTimeEntry, IssueRef, ReminderEvent};
pub use retry::RetryPolicy;
pub use shared::entity::{Entity, ID};
