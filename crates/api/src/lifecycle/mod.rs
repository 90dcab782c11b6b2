pub mod process_scheduled_events;

use crate::error::WellnessError;
use actix_web::web;
use process_scheduled_events::process_scheduled_events_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _| WellnessError::BadClientData(err.to_string()).into());

    cfg.app_data(query_config);
    cfg.route(
        "/lifecycle/process",
        web::post().to(process_scheduled_events_controller),
    );
}
