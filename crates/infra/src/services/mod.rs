mod notification;

pub use notification::{
    INotificationGateway, InMemoryNotificationGateway, WebhookNotificationGateway,
};
