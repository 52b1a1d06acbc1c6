use std::collections::HashMap;
use std::sync::{Arc, MutexGuard};

use actix_web::{web, HttpResponse, Responder};
use log::{debug, error, info};
use serde_json::json;
use tera::Context;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use crate::chat::Session;
use crate::web::models::{ChatRequest, ChatResponse, ErrorResponse, HistoryResponse};
use crate::AppState;

pub const GENERIC_ERROR: &str = "Sorry, there was an error generating the response.";

type Registry = HashMap<Uuid, Arc<AsyncMutex<Session>>>;

fn lock_sessions(data: &AppState) -> Result<MutexGuard<'_, Registry>, HttpResponse> {
    data.sessions.lock().map_err(|e| {
        error!("Failed to lock sessions mutex: {}", e);
        HttpResponse::InternalServerError().json(json!({
            "error": "Internal server error"
        }))
    })
}

fn find_session(data: &AppState, id: Uuid) -> Result<Arc<AsyncMutex<Session>>, HttpResponse> {
    let found = lock_sessions(data)?.get(&id).cloned();
    found.ok_or_else(|| {
        HttpResponse::NotFound().json(ErrorResponse {
            error: format!("Unknown session {}", id),
            session_id: Some(id),
        })
    })
}

// Index page handler
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    let mut context = Context::new();
    context.insert("model", &data.session_config.model);
    match data.tera.render("index.html", &context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(e) => {
            error!("Template error: {}", e);
            HttpResponse::InternalServerError().body("Template error")
        }
    }
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat API endpoint
pub async fn chat(
    data: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> impl Responder {
    // Checked before any session exists so a blank message never starts a conversation.
    if req.message.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Message must not be empty".to_string(),
            session_id: req.session_id,
        });
    }

    // Only the registry lookup happens under the registry lock. New conversations
    // are started only when the client sends no id; unknown ids are not revived.
    let (session_id, session) = match req.session_id {
        Some(id) => match find_session(&data, id) {
            Ok(session) => (id, session),
            Err(resp) => return resp,
        },
        None => {
            let mut sessions = match lock_sessions(&data) {
                Ok(guard) => guard,
                Err(resp) => return resp,
            };
            let id = Uuid::new_v4();
            info!("Starting new conversation {}", id);
            let session = Arc::new(AsyncMutex::new(data.new_session()));
            sessions.insert(id, session.clone());
            (id, session)
        }
    };

    info!("Chat request from session {}: {}", session_id, req.message);

    // Held for the whole exchange so turns from one conversation never interleave.
    let mut session = session.lock().await;
    debug!(
        "Session {} talks to {} as {}",
        session_id,
        session.endpoint(),
        session.model()
    );

    // Blank messages were rejected above, so every error here is a failed exchange.
    match session.submit(&req.message).await {
        Ok(response) => HttpResponse::Ok().json(ChatResponse {
            response,
            session_id,
        }),
        Err(e) => {
            error!("Exchange failed for session {}: {}", session_id, e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: GENERIC_ERROR.to_string(),
                session_id: Some(session_id),
            })
        }
    }
}

pub async fn history(data: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();
    let session = match find_session(&data, session_id) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let session = session.lock().await;
    HttpResponse::Ok().json(HistoryResponse {
        session_id,
        turns: session.history().to_vec(),
    })
}

pub async fn reset(data: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();
    let session = match find_session(&data, session_id) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let mut session = session.lock().await;
    session.reset();
    info!("Reset conversation {}", session_id);
    HttpResponse::Ok().json(HistoryResponse {
        session_id,
        turns: session.history().to_vec(),
    })
}

pub async fn discard(data: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();
    let mut sessions = match lock_sessions(&data) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };

    match sessions.remove(&session_id) {
        Some(_) => {
            info!("Discarded conversation {}", session_id);
            HttpResponse::NoContent().finish()
        }
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: format!("Unknown session {}", session_id),
            session_id: Some(session_id),
        }),
    }
}
