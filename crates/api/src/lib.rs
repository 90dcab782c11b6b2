mod error;
mod job_schedulers;
mod lifecycle;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::start_lifecycle_job;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;
use wellness_scheduler_infra::WellnessContext;

pub use lifecycle::process_scheduled_events::{ProcessScheduledEventsUseCase, UseCaseError};
pub use shared::auth::TRIGGER_KEY_HEADER;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    lifecycle::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: WellnessContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: WellnessContext) {
        // The external scheduler is the regular trigger
        if let Some(interval_secs) = context.config.lifecycle_job_interval_secs {
            start_lifecycle_job(context, interval_secs);
        }
    }

    async fn configure_server(context: WellnessContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
