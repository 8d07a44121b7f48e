use nudge_api::Application;
use nudge_infra::Context;

pub struct TestApp {
    pub ctx: Context,
}

// Launch the application as a background task, backed by in-memory
// stores and a recording notification gateway
pub async fn spawn_app() -> (TestApp, String) {
    let mut ctx = Context::create_inmemory();
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");
    let address = format!("http://localhost:{}", application.port());

    actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    (TestApp { ctx }, address)
}
