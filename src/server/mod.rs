//! Development server rendering pages straight from the store

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::access::{self, Viewer};
use crate::content::loader::ContentLoader;
use crate::content::{MarkdownRenderer, PageRecord, Role};
use crate::render::PageView;
use crate::resolver::resolve;
use crate::store::{PageStore, StoreError};
use crate::Folio;

/// Server state
struct ServerState {
    folio: Folio,
    store: RwLock<PageStore>,
    markdown: MarkdownRenderer,
}

/// `?role=` demo sign-in and `?slug=` page selection
#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    slug: Option<String>,
    role: Option<String>,
}

impl PageQuery {
    fn viewer(&self) -> Option<Viewer> {
        let name = self.role.as_deref()?;
        match Role::from_name(name) {
            Some(role) => Some(Viewer::demo(role)),
            None => {
                tracing::debug!("Ignoring unknown role {:?}", name);
                None
            }
        }
    }

    /// Page to read; the home page when no slug is given
    fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or("/")
    }

    /// Page to write. Writes never default to the home page.
    fn target(&self) -> Result<&str, Response> {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => Ok(slug),
            _ => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing slug parameter" })),
            )
                .into_response()),
        }
    }
}

/// Start the development server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        folio: folio.clone(),
        store: RwLock::new(folio.open_store()?),
        markdown: MarkdownRenderer::from_config(&folio.config.highlight),
    });

    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching {:?} for changes...", folio.content_dir);
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_import(state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/pages", get(list_pages))
        .route(
            "/api/page",
            get(get_page).put(put_page).delete(delete_page),
        )
        .route("/api/resolve", get(resolve_page))
        .fallback(view_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Re-import the content directory whenever a document changes
fn watch_and_import(state: Arc<ServerState>) -> Result<()> {
    let content_dir = state.folio.content_dir.clone();
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid imports
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;
    if content_dir.exists() {
        debouncer
            .watcher()
            .watch(&content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", content_dir);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<&PathBuf> = events
                    .iter()
                    .map(|e| &e.path)
                    .filter(|path| {
                        path.extension()
                            .map(|ext| ext == "md" || ext == "markdown")
                            .unwrap_or(false)
                    })
                    .collect();

                if changed.is_empty() {
                    continue;
                }
                for path in &changed {
                    tracing::info!("File changed: {}", path.display());
                }

                let loader = ContentLoader::new(&state.folio);
                match loader.load_pages() {
                    Ok(pages) => match state.store.blocking_write().save_all(pages) {
                        Ok(count) => tracing::info!("Re-imported {} pages", count),
                        Err(e) => tracing::error!("Failed to save imported pages: {}", e),
                    },
                    Err(e) => tracing::error!("Import failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

fn not_found(slug: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": StoreError::NotFound(slug.to_string()).to_string() })),
    )
        .into_response()
}

async fn list_pages(State(state): State<Arc<ServerState>>) -> Response {
    let store = state.store.read().await;
    Json(store.list()).into_response()
}

async fn get_page(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let store = state.store.read().await;
    match store.get(query.slug()) {
        Some(page) => Json(page).into_response(),
        None => not_found(query.slug()),
    }
}

/// Save a raw document as the page at `?slug=`
async fn put_page(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PageQuery>,
    document: String,
) -> Response {
    let target = match query.target() {
        Ok(slug) => slug,
        Err(response) => return response,
    };
    let (page, diagnostics) = PageRecord::parse_with_diagnostics(target, &document);
    let diagnostics: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();

    let mut store = state.store.write().await;
    let slug = page.slug.clone();
    match store.save(&slug, page) {
        Ok(()) => Json(json!({
            "page": store.get(&slug),
            "diagnostics": diagnostics,
        }))
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

async fn delete_page(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let target = match query.target() {
        Ok(slug) => slug,
        Err(response) => return response,
    };
    let mut store = state.store.write().await;
    match store.delete(target) {
        Ok(Some(page)) => Json(page).into_response(),
        Ok(None) => not_found(target),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

async fn resolve_page(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let store = state.store.read().await;
    match store.get(query.slug()) {
        Some(page) => Json(resolve(page)).into_response(),
        None => not_found(query.slug()),
    }
}

/// Render any other path as a page
async fn view_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PageQuery>,
    uri: Uri,
) -> Response {
    let store = state.store.read().await;
    let viewer = query.viewer();
    let (status, html) = view_page(&state, &store, uri.path(), viewer.as_ref());
    (status, Html(html)).into_response()
}

fn view_page(
    state: &ServerState,
    store: &PageStore,
    slug: &str,
    viewer: Option<&Viewer>,
) -> (StatusCode, String) {
    let view = PageView::new(&state.folio.config, &state.markdown);

    let Some(page) = store.get(slug) else {
        return (
            StatusCode::NOT_FOUND,
            view.render_error("Page not found (404)", viewer),
        );
    };

    match access::authorize(&page.metadata, viewer) {
        Ok(()) => (StatusCode::OK, view.render(page, store.list(), viewer)),
        Err(e) => {
            let status = match e {
                access::AccessError::Unauthorized => StatusCode::UNAUTHORIZED,
                access::AccessError::Forbidden => StatusCode::FORBIDDEN,
            };
            (status, view.render_error(&e.to_string(), viewer))
        }
    }
}
