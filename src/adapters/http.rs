use crate::adapters::storage::CsvFileStorage;
use crate::core::board::LeaderboardService;
use crate::core::{ConfigProvider, Record, Storage};
use crate::utils::error::{LeaderboardError, Result};
use axum::{
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub const SUBMIT_OK: &str = "CSV file updated successfully";

#[derive(Debug, Default, Deserialize)]
struct FormFields {
    name: Option<String>,
    score: Option<String>,
}

impl FormFields {
    fn overlay(&mut self, other: FormFields) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.score.is_some() {
            self.score = other.score;
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> std::result::Result<Self, Response> {
        let mut fields = FormFields::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            let key = field.name().map(str::to_owned);
            let value = field.text().await.map_err(IntoResponse::into_response)?;
            match key.as_deref() {
                Some("name") => fields.name = Some(value),
                Some("score") => fields.score = Some(value),
                _ => {}
            }
        }
        Ok(fields)
    }
}

/// Submission fields of `POST /write`, read from the query string, a
/// urlencoded body or a multipart body. Body values win over query values;
/// missing fields decode as empty strings.
#[derive(Debug, Default)]
pub struct SubmitForm {
    pub name: String,
    pub score: String,
}

impl<S: Send + Sync> FromRequest<S> for SubmitForm {
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let mut fields = Query::<FormFields>::try_from_uri(req.uri())
            .map(|Query(fields)| fields)
            .map_err(IntoResponse::into_response)?;

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            fields.overlay(FormFields::from_multipart(multipart).await?);
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<FormFields>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            fields.overlay(body);
        }

        Ok(SubmitForm {
            name: fields.name.unwrap_or_default(),
            score: fields.score.unwrap_or_default(),
        })
    }
}

impl IntoResponse for LeaderboardError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!("❌ Request failed: {}", self);
            tracing::error!("💡 Recovery suggestion: {}", self.recovery_suggestion());
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (status, Json(json!({ "message": self.user_friendly_message() }))).into_response()
    }
}

async fn submit_score<S: Storage + 'static>(
    State(service): State<Arc<LeaderboardService<S>>>,
    form: SubmitForm,
) -> Result<&'static str> {
    service.submit(&form.name, &form.score).await?;
    Ok(SUBMIT_OK)
}

async fn read_leaderboard<S: Storage + 'static>(
    State(service): State<Arc<LeaderboardService<S>>>,
) -> Result<Json<Vec<Record>>> {
    let leaderboard = service.retrieve().await?;
    Ok(Json(leaderboard))
}

/// CORS restricted to the configured origins and GET/PUT/POST/DELETE.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| LeaderboardError::InvalidConfigValueError {
                field: "allowed_origins".to_string(),
                value: origin.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Routes plus the request logging, panic recovery and CORS middleware.
pub fn create_router<S: Storage + 'static>(
    service: Arc<LeaderboardService<S>>,
    cors: CorsLayer,
) -> Router {
    Router::new()
        .route("/write", post(submit_score::<S>))
        .route("/read", get(read_leaderboard::<S>))
        .with_state(service)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::new())
                .layer(cors),
        )
}

/// Wires a CSV-backed service from configuration.
pub fn build_router<C: ConfigProvider + ?Sized>(config: &C) -> Result<Router> {
    let storage = CsvFileStorage::new(config.store_path());
    let service = LeaderboardService::with_options(
        storage,
        config.leaderboard_size(),
        config.strict_scores(),
    );
    let cors = cors_layer(config.allowed_origins())?;
    Ok(create_router(Arc::new(service), cors))
}

pub async fn serve(listener: tokio::net::TcpListener, router: Router) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
