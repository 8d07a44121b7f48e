mod helpers;

use helpers::setup::spawn_app;
use nudge_api_structs::schedule_reminder;

#[actix_web::test]
async fn health_check_works() {
    let (_, address) = spawn_app().await;

    let res = reqwest::Client::new()
        .get(format!("{}/api/v1/", address))
        .send()
        .await
        .expect("Expected server to be running");

    assert_eq!(res.status(), reqwest::StatusCode::OK);
}

#[actix_web::test]
async fn schedules_a_reminder_over_http() {
    let (app, address) = spawn_app().await;

    let body = serde_json::json!({
        "recipient": "alice",
        "target": { "owner": "octo", "repo": "spoon-knife", "issueNumber": 7 },
        "authContext": "install-1",
        "durationExpression": "/remind 2 hours",
    });
    let res = reqwest::Client::new()
        .post(format!("{}/api/v1/reminders", address))
        .json(&body)
        .send()
        .await
        .expect("Expected server to be running");

    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let res: schedule_reminder::APIResponse = res.json().await.expect("Expected reminder in response");
    assert_eq!(res.reminder.recipient, "alice");

    // The accepted request is pending in both durable stores
    let stored = app
        .ctx
        .repos
        .scheduled_events
        .find(&res.reminder.id)
        .await
        .unwrap();
    assert!(stored.is_some());
    let due = app.ctx.repos.due_times.find_due(res.reminder.fire_at).await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].event_id, res.reminder.id);
}

#[actix_web::test]
async fn rejects_a_malformed_duration_expression() {
    let (app, address) = spawn_app().await;

    let body = serde_json::json!({
        "recipient": "alice",
        "target": { "owner": "octo", "repo": "spoon-knife", "issueNumber": 7 },
        "authContext": "install-1",
        "durationExpression": "remind now please",
    });
    let res = reqwest::Client::new()
        .post(format!("{}/api/v1/reminders", address))
        .json(&body)
        .send()
        .await
        .expect("Expected server to be running");

    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    // Nothing was persisted
    let due = app.ctx.repos.due_times.find_due(i64::MAX).await.unwrap();
    assert!(due.is_empty());
}
