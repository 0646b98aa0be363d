//! HTTP server setup and SSR forwarding.
//!
//! # Responsibilities
//! - Create the axum Router with the gate handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve the client directory and build the static handler
//! - Forward fallback traffic to the upstream SSR server
//! - Bind the server to a listener, with graceful shutdown

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GateConfig;
use crate::observability::metrics;
use crate::resolver::{self, ResolveError};
use crate::serve::files::FileStreamer;
use crate::serve::handler::StaticHandler;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<StaticHandler<FileStreamer>>,
    pub client: Client<HttpConnector, Body>,
    pub upstream: String,
}

/// HTTP server for the static gate.
pub struct HttpServer {
    router: Router,
    config: GateConfig,
}

impl HttpServer {
    /// Create a new server. Resolves the client directory once; a
    /// resolution failure is a deployment misconfiguration and aborts
    /// startup.
    pub fn new(config: GateConfig) -> Result<Self, ResolveError> {
        let entry = match &config.site.location.entry {
            Some(entry) => entry.clone(),
            None => std::env::current_exe()?,
        };
        let client_dir = resolver::resolve_client_dir(
            &config.site.location.client,
            &config.site.location.server,
            &entry,
        )?;
        tracing::info!(client_dir = %client_dir.display(), "client directory resolved");

        let handler = Arc::new(StaticHandler::new(
            config.site.clone(),
            client_dir,
            FileStreamer,
        ));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let state = AppState {
            handler,
            client,
            upstream: config.upstream.address.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the axum router with all middleware layers.
    fn build_router(config: &GateConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gate_handler))
            .route("/", any(gate_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

/// Front handler: try the static side, fall back to the SSR upstream.
async fn gate_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let method_str = method.to_string();

    let response = state
        .handler
        .handle(&method, &uri, || {
            forward_to_ssr(state.client.clone(), state.upstream.clone(), request)
        })
        .await;

    metrics::record_request(&method_str, response.status().as_u16(), start);
    response
}

/// Forward the original request to the upstream SSR server.
async fn forward_to_ssr(
    client: Client<HttpConnector, Body>,
    upstream: String,
    request: Request<Body>,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = match Authority::from_str(&upstream) {
        Ok(authority) => Some(authority),
        Err(err) => {
            tracing::error!(upstream = %upstream, error = %err, "invalid upstream authority");
            return bad_gateway();
        }
    };
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(err) => {
            tracing::error!(error = %err, "failed to rewrite upstream URI");
            return bad_gateway();
        }
    };

    match client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(err) => {
            tracing::error!(error = %err, "SSR upstream request failed");
            bad_gateway()
        }
    }
}

fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, "Bad gateway").into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
