//!
//! memberlogin HTTP server
//! -----------------------
//! Axum routes composing the credential verifier, the member repository and
//! the session store.
//!
//! Responsibilities:
//! - Member registration (`POST /members`).
//! - Login issuing the session cookie, logout expiring it.
//! - Home endpoint resolving the session cookie back to the member.
//! - Background sweeper for age-evicted sessions when a TTL is configured.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::identity::{cookie_value, expired_session_cookie, fingerprint, session_cookie, AuthProvider, LocalAuthProvider, LoginRequest, SessionManager};
use crate::member::{Member, MemberView, MemoryMemberRepository};

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub members: Arc<MemoryMemberRepository>,
    pub auth: Arc<dyn AuthProvider>,
    pub sessions: Arc<SessionManager<Member>>,
    /// Fixed for the process lifetime
    pub cookie_name: Arc<str>,
}

impl AppState {
    pub fn new(members: Arc<MemoryMemberRepository>, sessions: Arc<SessionManager<Member>>, cookie_name: &str) -> Self {
        let auth: Arc<dyn AuthProvider> = Arc::new(LocalAuthProvider::new(members.clone()));
        Self { members, auth, sessions, cookie_name: Arc::from(cookie_name) }
    }

    /// Session id presented by the client, if any.
    fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|raw| cookie_value(raw, &self.cookie_name))
    }

    fn current_member(&self, headers: &HeaderMap) -> Option<Member> {
        self.sessions.get_session(self.session_id(headers).as_deref())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/members", post(add_member))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .with_state(state)
}

/// Build state from configuration and serve until the listener fails.
pub async fn run(config: &ServerConfig) -> anyhow::Result<()> {
    let members = Arc::new(MemoryMemberRepository::new());
    if config.seed_demo_member {
        // Demo account so a fresh server can be logged into
        let seeded = members.save(Member::new("test", "tester", "test!"))?;
        info!(login_id = %seeded.login_id, "seeded demo member");
    }

    let sessions: Arc<SessionManager<Member>> = Arc::new(match config.session_ttl {
        Some(ttl) => SessionManager::with_ttl(ttl),
        None => SessionManager::new(),
    });

    if let Some(ttl) = config.session_ttl {
        let sweeper = sessions.clone();
        let every = ttl.min(std::time::Duration::from_secs(60));
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(every).await;
                let removed = sweeper.sweep_expired();
                if removed > 0 { debug!(removed = removed, "session_sweep"); }
            }
        });
    }

    let app = router(AppState::new(members, sessions, &config.cookie_name));

    let addr = config.bind_addr();
    info!(cookie = %config.cookie_name, ttl_secs = ?config.session_ttl.map(|d| d.as_secs()), "Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct AddMemberPayload { login_id: String, name: String, password: String }

#[derive(Debug, Deserialize)]
struct LoginPayload { login_id: String, password: String }

fn set_cookie_headers(value: &str) -> AppResult<HeaderMap> {
    let hv = HeaderValue::from_str(value)
        .map_err(|e| AppError::internal("cookie_encoding".to_string(), e.to_string()))?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, hv);
    Ok(headers)
}

async fn home(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    match state.current_member(&headers) {
        Some(m) => Json(serde_json::json!({"status":"ok","member": MemberView::from(&m)})),
        None => Json(serde_json::json!({"status":"anonymous"})),
    }
}

async fn add_member(State(state): State<AppState>, Json(payload): Json<AddMemberPayload>) -> AppResult<impl IntoResponse> {
    let saved = state.members.save(Member::new(payload.login_id, payload.name, payload.password))?;
    info!(id = saved.id, login_id = %saved.login_id, "member registered");
    Ok((StatusCode::CREATED, Json(MemberView::from(&saved))))
}

async fn login(State(state): State<AppState>, headers: HeaderMap, Json(payload): Json<LoginPayload>) -> AppResult<impl IntoResponse> {
    let req = LoginRequest { login_id: payload.login_id, password: payload.password };
    let Some(member) = state.auth.login(&req) else {
        warn!(login_id = %req.login_id, "login failed");
        return Err(AppError::authentication_failed());
    };
    let view = MemberView::from(&member);
    // Replace rather than accumulate sessions for a client that logs in again
    state.sessions.expire(state.session_id(&headers).as_deref());
    let sid = state.sessions.create_session(member);
    info!(login_id = %view.login_id, sid = %fingerprint(&sid), "login");
    let out = set_cookie_headers(&session_cookie(&state.cookie_name, &sid))?;
    Ok((StatusCode::OK, out, Json(serde_json::json!({"status":"ok","member": view}))))
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<impl IntoResponse> {
    let sid = state.session_id(&headers);
    if state.sessions.expire(sid.as_deref()) {
        if let Some(sid) = sid.as_deref() { info!(sid = %fingerprint(sid), "logout"); }
    }
    let out = set_cookie_headers(&expired_session_cookie(&state.cookie_name))?;
    Ok((StatusCode::OK, out, Json(serde_json::json!({"status":"ok"}))))
}
