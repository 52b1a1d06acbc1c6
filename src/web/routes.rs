use actix_web::web;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/chat", web::post().to(handlers::chat))
            .route("/sessions/{id}", web::delete().to(handlers::discard))
            .route("/sessions/{id}/history", web::get().to(handlers::history))
            .route("/sessions/{id}/reset", web::post().to(handlers::reset))
    )
    .route("/", web::get().to(handlers::index))
    .route("/health", web::get().to(handlers::health_check));
}
