use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use wellness_scheduler_api::Application;
use wellness_scheduler_infra::{
    PopupWebhookSettings, StaticTimeSys, WebhookPopupNotifier, WellnessContext,
};
use wellness_scheduler_sdk::WellnessSDK;

pub const NOW: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 GMT+0100
pub const HOUR: i64 = 1000 * 60 * 60;
pub const TRIGGER_KEY: &str = "test-trigger-key";
pub const WEBHOOK_KEY: &str = "test-webhook-key";

pub struct TestApp {
    pub ctx: WellnessContext,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app(webhook: Option<&WebhookReceiver>) -> (TestApp, WellnessSDK) {
    let mut ctx = WellnessContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.lifecycle_trigger_key = TRIGGER_KEY.into();
    ctx.config.lifecycle_job_interval_secs = None;
    ctx.sys = Arc::new(StaticTimeSys(NOW));
    if let Some(webhook) = webhook {
        ctx.notifier = Arc::new(WebhookPopupNotifier::new(PopupWebhookSettings {
            url: webhook.url.clone(),
            key: WEBHOOK_KEY.into(),
        }));
    }

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = WellnessSDK::new(address.clone(), TRIGGER_KEY);
    (TestApp { ctx, address }, sdk)
}

/// A notification as received by the webhook
#[derive(Debug, Clone)]
pub struct ReceivedNotification {
    pub key: Option<String>,
    pub body: serde_json::Value,
}

struct ReceiverState {
    status: StatusCode,
    received: Arc<Mutex<Vec<ReceivedNotification>>>,
}

pub struct WebhookReceiver {
    pub url: String,
    received: Arc<Mutex<Vec<ReceivedNotification>>>,
}

impl WebhookReceiver {
    pub fn received(&self) -> Vec<ReceivedNotification> {
        self.received.lock().unwrap().clone()
    }
}

async fn receive_notification(
    req: HttpRequest,
    body: web::Json<serde_json::Value>,
    state: web::Data<ReceiverState>,
) -> HttpResponse {
    let key = req
        .headers()
        .get("wellness-webhook-key")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.received.lock().unwrap().push(ReceivedNotification {
        key,
        body: body.into_inner(),
    });
    HttpResponse::build(state.status).finish()
}

/// Launch a webhook endpoint answering every notification with `status`
pub fn spawn_webhook_receiver(status: StatusCode) -> WebhookReceiver {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = web::Data::new(ReceiverState {
        status,
        received: received.clone(),
    });

    let listener = TcpListener::bind("127.0.0.1:0").expect("To bind webhook receiver");
    let port = listener.local_addr().unwrap().port();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/popups", web::post().to(receive_notification))
    })
    .listen(listener)
    .expect("To listen for webhooks")
    .workers(1)
    .run();
    let _ = actix_web::rt::spawn(server);

    WebhookReceiver {
        url: format!("http://127.0.0.1:{}/popups", port),
        received,
    }
}
