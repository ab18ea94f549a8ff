//! Development server rendering pages on request

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::changelog::PostStore;
use crate::docs;
use crate::pages::{SitePages, POST_NOT_FOUND};
use crate::templates::STYLESHEET;

/// Server state, built once at startup and shared read-only
pub struct AppState {
    pub store: PostStore,
    pub pages: SitePages,
}

/// Build the site router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/docs", get(docs_index_handler))
        .route("/docs/:page", get(doc_handler))
        .route("/blog", get(blog_index_handler))
        .route("/blog/:slug", get(blog_post_handler))
        .route("/api/posts", get(posts_api_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/robots.txt", get(robots_handler))
        .route("/css/style.css", get(stylesheet_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the development server
pub async fn start(state: AppState, ip: &str, port: u16) -> Result<()> {
    let post_count = state.store.len();
    let app = router(Arc::new(state));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Serving {} changelog entries", post_count);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Turn a rendered page into a response, logging render failures
fn html_response(status: StatusCode, rendered: crate::Result<String>) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn not_found(state: &AppState, message: &str) -> Response {
    html_response(StatusCode::NOT_FOUND, state.pages.not_found(message))
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Response {
    html_response(StatusCode::OK, state.pages.home(&state.store))
}

async fn docs_index_handler(State(state): State<Arc<AppState>>) -> Response {
    match docs::find("") {
        Some(page) => html_response(StatusCode::OK, state.pages.doc(page)),
        None => not_found(&state, "Page not found"),
    }
}

async fn doc_handler(State(state): State<Arc<AppState>>, Path(page): Path<String>) -> Response {
    match docs::find(&page) {
        Some(doc) if !doc.slug.is_empty() => html_response(StatusCode::OK, state.pages.doc(doc)),
        _ => not_found(&state, "Page not found"),
    }
}

async fn blog_index_handler(State(state): State<Arc<AppState>>) -> Response {
    html_response(StatusCode::OK, state.pages.blog_index(&state.store))
}

async fn blog_post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.store.find(&slug) {
        Ok(post) => html_response(StatusCode::OK, state.pages.blog_post(&state.store, post)),
        Err(e) => {
            tracing::debug!("{}", e);
            not_found(&state, POST_NOT_FOUND)
        }
    }
}

async fn posts_api_handler(State(state): State<Arc<AppState>>) -> Response {
    let error = if state.store.is_empty() {
        Some("Failed to load changelog. Please try again later.")
    } else {
        None
    };
    Json(serde_json::json!({
        "posts": state.store.posts(),
        "error": error,
    }))
    .into_response()
}

async fn sitemap_handler(State(state): State<Arc<AppState>>) -> Response {
    let xml = state.pages.sitemap(&state.store, chrono::Utc::now());
    ([(header::CONTENT_TYPE, "application/xml")], xml).into_response()
}

async fn robots_handler(State(state): State<Arc<AppState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        state.pages.robots(),
    )
        .into_response()
}

async fn stylesheet_handler() -> Response {
    ([(header::CONTENT_TYPE, "text/css")], STYLESHEET).into_response()
}

async fn fallback_handler(State(state): State<Arc<AppState>>) -> Response {
    not_found(&state, "Page not found")
}
