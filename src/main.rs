mod chat;
mod config;
mod web;

use actix_web::{App, HttpServer, web::Data};
use actix_files as fs;
use dotenv::dotenv;
use log::{info, error};
use std::sync::{Arc, Mutex};
use std::collections::HashMap;
use tera::Tera;
use tokio::sync::Mutex as AsyncMutex;

use chat::{HttpTransport, Session, Transport};
use config::{AppConfig, SessionConfig};
use web::routes;

// App state structure. Each conversation id owns its own Session.
pub(crate) struct AppState {
    tera: Tera,
    transport: Arc<dyn Transport>,
    session_config: SessionConfig,
    sessions: Mutex<HashMap<uuid::Uuid, Arc<AsyncMutex<Session>>>>,
}

impl AppState {
    fn new(tera: Tera, transport: Arc<dyn Transport>, session_config: SessionConfig) -> Self {
        Self {
            tera,
            transport,
            session_config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn new_session(&self) -> Session {
        Session::new(
            self.session_config.endpoint.clone(),
            self.session_config.model.clone(),
            self.session_config.system_prompt.clone(),
            self.transport.clone(),
        )
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting transcript chat application");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let transport: Arc<dyn Transport> = match HttpTransport::new(config.request_timeout) {
        Ok(transport) => Arc::new(transport),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize template engine
    let mut tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            error!("Template parsing error: {}", e);
            std::process::exit(1);
        }
    };
    tera.autoescape_on(vec![".html", ".sql"]);

    let app_state = Data::new(AppState::new(tera, transport, config.session.clone()));

    info!("Listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
            .service(fs::Files::new("/static", "./static"))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
