//! Mock engine exposing `/v1alpha1/config`
//!
//! Mimics how the engine gates and renders its config report, with knobs
//! to break individual parts of that contract.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

const DEFAULT_NAMESPACE: &str = "https://hasura.io/jwt/claims";

/// How the mock engine was "started"
#[derive(Debug, Clone, Default)]
pub struct EngineSetup {
    pub admin_secret: Option<String>,
    pub webhook: Option<String>,
    /// JWT config as the engine would receive it
    pub jwt: Option<Value>,
    /// Answer a missing admin secret with 400 instead of 401
    pub missing_secret_is_bad_request: bool,
}

/// Deliberate contract violations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Misbehaviour {
    #[default]
    None,
    /// Non-admin roles may read the config
    UserRoleAllowed,
    /// Requests without headers are treated as admin
    OpenWithoutHeaders,
    /// `is_auth_hook_set` is inverted
    FlippedAuthHook,
    /// `jwt` is an object even when JWT is not configured
    JwtObjectWhenUnset,
    /// `claims_namespace` is always reported as `wrong`
    WrongNamespace,
    /// `claims_format` is left out unless explicitly configured
    OmitDefaultFormat,
    /// The admin report is not JSON
    GarbledReport,
}

/// Mock engine server
pub struct MockEngine {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<EngineState>,
}

struct EngineState {
    setup: EngineSetup,
    misbehaviour: Misbehaviour,
    request_count: AtomicU32,
}

impl MockEngine {
    /// Start a well-behaved engine
    pub async fn start(setup: EngineSetup) -> anyhow::Result<Self> {
        Self::start_misbehaving(setup, Misbehaviour::None).await
    }

    /// Start an engine that violates one part of the contract
    pub async fn start_misbehaving(setup: EngineSetup, misbehaviour: Misbehaviour) -> anyhow::Result<Self> {
        let state = Arc::new(EngineState {
            setup,
            misbehaviour,
            request_count: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/v1alpha1/config", routing::get(handle_config))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL to point the probe at
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of config requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn access_denied(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "path": "$",
            "error": message,
            "code": "access-denied"
        })),
    )
        .into_response()
}

async fn handle_config(State(state): State<Arc<EngineState>>, headers: HeaderMap) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let misbehaviour = state.misbehaviour;

    if let Some(ref secret) = state.setup.admin_secret {
        match header("x-hasura-admin-secret") {
            Some(given) if given == secret => {}
            Some(_) => return access_denied(StatusCode::UNAUTHORIZED, "invalid x-hasura-admin-secret"),
            None if misbehaviour == Misbehaviour::OpenWithoutHeaders => {}
            None => {
                let status = if state.setup.missing_secret_is_bad_request {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::UNAUTHORIZED
                };
                return access_denied(status, "x-hasura-admin-secret required, but not found");
            }
        }
    }

    let role = header("x-hasura-role").unwrap_or("admin");
    if role != "admin" && misbehaviour != Misbehaviour::UserRoleAllowed {
        return access_denied(StatusCode::BAD_REQUEST, "restricted access : admin only");
    }

    if misbehaviour == Misbehaviour::GarbledReport {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }

    Json(render_report(&state.setup, misbehaviour)).into_response()
}

fn render_report(setup: &EngineSetup, misbehaviour: Misbehaviour) -> Value {
    let jwt = match setup.jwt {
        Some(ref conf) => render_jwt(conf, misbehaviour),
        None if misbehaviour == Misbehaviour::JwtObjectWhenUnset => json!({}),
        None => json!([]),
    };

    json!({
        "version": "v2.0.0-mock",
        "is_admin_secret_set": setup.admin_secret.is_some(),
        "is_auth_hook_set": setup.webhook.is_some() != (misbehaviour == Misbehaviour::FlippedAuthHook),
        "is_jwt_set": setup.jwt.is_some(),
        "jwt": jwt,
    })
}

fn render_jwt(conf: &Value, misbehaviour: Misbehaviour) -> Value {
    let explicit_format = conf.get("claims_format").and_then(Value::as_str);
    let format = explicit_format.unwrap_or("json");

    let mut jwt = match conf.get("claims_namespace_path").and_then(Value::as_str) {
        Some(path) => json!({ "claims_namespace_path": path, "claims_format": "json" }),
        None => {
            let namespace = if misbehaviour == Misbehaviour::WrongNamespace {
                "wrong"
            } else {
                conf.get("claims_namespace")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_NAMESPACE)
            };
            json!({ "claims_namespace": namespace, "claims_format": format })
        }
    };

    if misbehaviour == Misbehaviour::OmitDefaultFormat
        && explicit_format.is_none()
        && let Some(object) = jwt.as_object_mut()
    {
        object.remove("claims_format");
    }

    jwt
}
