use crate::config::Config;
use crate::controller::{self, AppController, SharedController};
use crate::effects::Document;
use crate::notify::Toaster;
use crate::overlay::OverlayEvent;
use crate::tmdb::{MovieApi, TmdbClient};
use crate::ui::search_bar::SearchForm;
use crate::ui::{page, routes};
use anyhow::Result;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub controller: SharedController,
    pub toaster: Arc<Toaster>,
    pub document: Arc<Document>,
}

impl AppState {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        let toaster = Arc::new(Toaster::new());
        let document = Document::new();
        let controller =
            AppController::new(api, toaster.clone(), Arc::clone(&document)).into_shared();
        Self {
            controller,
            toaster,
            document,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BackdropForm {
    pub target: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyForm {
    pub key: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Loaded,
    Error,
}

#[derive(Debug, Deserialize)]
pub struct ImageForm {
    pub movie_id: i64,
    pub status: ImageStatus,
}

pub async fn run_server(config: Config) -> Result<()> {
    let tmdb: Arc<dyn MovieApi> = Arc::new(TmdbClient::new(
        config.tmdb_token.clone(),
        config.tmdb_base_url.clone(),
    )?);
    info!("Using TMDB at {}", config.tmdb_base_url);

    let app = build_router(AppState::new(tmdb));

    info!("Listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(routes::HOME, get(index))
        .route(routes::HEALTH, get(health))
        .route(routes::SEARCH, post(handle_search))
        .route(&format!("{}/:id", routes::SELECT), post(handle_select))
        .route(routes::OVERLAY_CLOSE, post(handle_close))
        .route(routes::OVERLAY_BACKDROP, post(handle_backdrop))
        .route(routes::OVERLAY_KEY, post(handle_key))
        .route(routes::OVERLAY_IMAGE, post(handle_image))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let controller = state.controller.lock().await;
    let now = Utc::now();
    let notices = state.toaster.active(now);
    Html(page::render(&controller, &state.document, &notices, now))
}

/// Redirects as soon as the search is issued; the page shows the loader until it resolves.
async fn handle_search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Redirect {
    match controller::start_search(&state.controller, &form.into_query()).await {
        Ok(_task) => debug!("Search started"),
        Err(e) => debug!("Search not started: {}", e),
    }
    Redirect::to(routes::HOME)
}

async fn handle_select(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    state.controller.lock().await.select_by_id(id);
    Redirect::to(routes::HOME)
}

async fn handle_close(State(state): State<AppState>) -> Redirect {
    dispatch(&state, OverlayEvent::CloseButton).await
}

async fn handle_backdrop(
    State(state): State<AppState>,
    Form(form): Form<BackdropForm>,
) -> Redirect {
    let on_backdrop = form.target == "backdrop";
    dispatch(&state, OverlayEvent::BackdropClick { on_backdrop }).await
}

async fn handle_key(State(state): State<AppState>, Form(form): Form<KeyForm>) -> Redirect {
    if state.document.key_listener_count() == 0 {
        debug!("Key '{}' with no listener registered", form.key);
        return Redirect::to(routes::HOME);
    }
    dispatch(&state, OverlayEvent::Key(form.key)).await
}

async fn handle_image(State(state): State<AppState>, Form(form): Form<ImageForm>) -> Redirect {
    let event = match form.status {
        ImageStatus::Loaded => OverlayEvent::ImageLoaded {
            movie_id: form.movie_id,
        },
        ImageStatus::Error => OverlayEvent::ImageFailed {
            movie_id: form.movie_id,
        },
    };
    dispatch(&state, event).await
}

async fn dispatch(state: &AppState, event: OverlayEvent) -> Redirect {
    state.controller.lock().await.handle_overlay_event(event);
    Redirect::to(routes::HOME)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
