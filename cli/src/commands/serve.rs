//! # Lookup Service
//!
//! Answers `GET /?mac=<address>` and `GET /<address>` with the matching
//! record as JSON, and optionally refreshes the registry in the background.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use ouidb_common::config::Config;
use ouidb_common::network::record::Record;
use ouidb_core::source::{self, RegistrySource};
use ouidb_core::update;
use ouidb_core::{DynamicDb, LookupError, OuiDatabase};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::terminal::print;

struct AppState {
    db: Arc<DynamicDb>,
    pretty: bool,
}

#[derive(Serialize, Default)]
struct LookupResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct MacQuery {
    mac: Option<String>,
}

pub async fn serve(cfg: &Config) -> anyhow::Result<()> {
    print::header("starting lookup service");

    let source: Arc<dyn RegistrySource> = Arc::from(source::source_from_arg(&cfg.source));
    info!("Opening database from {}", source.describe());
    let db: Arc<DynamicDb> = Arc::new(
        update::open_dynamic(source.as_ref())
            .await
            .with_context(|| format!("opening registry from {}", source.describe()))?,
    );

    if let Some(every) = cfg.update_every {
        spawn_updater(Arc::clone(&db), source, every);
    }

    let listener = tokio::net::TcpListener::bind(cfg.listen)
        .await
        .with_context(|| format!("binding {}", cfg.listen))?;
    info!("Listening on {}", cfg.listen);

    axum::serve(listener, router(db, cfg.pretty)).await?;
    Ok(())
}

fn router(db: Arc<DynamicDb>, pretty: bool) -> Router {
    Router::new()
        .route("/", get(lookup_query))
        .route("/{mac}", get(lookup_path))
        .with_state(Arc::new(AppState { db, pretty }))
}

/// Reloads the registry every `every`. A failed reload is logged and the
/// previous data keeps being served.
fn spawn_updater(
    db: Arc<DynamicDb>,
    source: Arc<dyn RegistrySource>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            info!("Next update in {}s", every.as_secs());
            ticker.tick().await;
            match update::reload_from(&db, source.as_ref()).await {
                Ok(()) => info!("Updated successfully"),
                Err(e) => error!("Error updating database from {}: {}", source.describe(), e),
            }
        }
    })
}

async fn lookup_query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MacQuery>,
) -> Response {
    respond(&state, query.mac.as_deref().unwrap_or_default())
}

async fn lookup_path(
    State(state): State<Arc<AppState>>,
    Path(mac): Path<String>,
    Query(query): Query<MacQuery>,
) -> Response {
    match query.mac.as_deref() {
        Some(mac) if !mac.is_empty() => respond(&state, mac),
        _ => respond(&state, mac.trim_matches('/')),
    }
}

fn respond(state: &AppState, mac: &str) -> Response {
    let (status, body) = match state.db.query(mac) {
        Ok(record) => (
            StatusCode::OK,
            LookupResponse {
                data: Some(record),
                ..Default::default()
            },
        ),
        Err(e @ LookupError::NotFound) => (StatusCode::NOT_FOUND, error_body(e)),
        Err(e @ LookupError::InvalidMac(_)) => (StatusCode::BAD_REQUEST, error_body(e)),
    };

    let json = if state.pretty {
        serde_json::to_string_pretty(&body)
    } else {
        serde_json::to_string(&body)
    };

    match json {
        Ok(json) => (status, [(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => {
            error!("Failed to encode response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn error_body(error: LookupError) -> LookupResponse {
    LookupResponse {
        error: Some(error.to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ouidb_core::{Snapshot, Updater};
    use ouidb_common::network::mac::AddressKey;

    const SAMPLE: &str = "00-60-94\t\tIBM Corp\n\t\t\t\tUS\n";

    fn state(pretty: bool) -> AppState {
        AppState {
            db: Arc::new(DynamicDb::open(SAMPLE.as_bytes()).unwrap()),
            pretty,
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn found_returns_record() {
        let response = respond(&state(false), "00:60:94:01:02:03");
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["manufacturer"], "IBM Corp");
        assert_eq!(json["data"]["prefix"], "00:60:94");
        assert_eq!(json["data"]["country"], "US");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn absent_prefix_is_404() {
        let response = respond(&state(true), "ff-ff-ff");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "not found in db");
    }

    #[tokio::test]
    async fn malformed_address_is_400() {
        let response = respond(&state(false), "54-CD-");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("element 3"));
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn replaced_data_is_served() {
        let state = state(false);
        state.db.replace(Snapshot::from_iter([Record::new(
            AddressKey::new([0xD0, 0xDF, 0x9A]),
            "Liteon",
            Vec::new(),
        )]));

        assert_eq!(respond(&state, "00-60-94").status(), StatusCode::NOT_FOUND);
        assert_eq!(respond(&state, "D0DF9A").status(), StatusCode::OK);
    }
}
