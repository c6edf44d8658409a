//! HTTP server: Markdown interception and minimal page serving
//!
//! A single fallback handler tries the `*.md` interception first, then the
//! normal item pages, then the host 404. Request handling is stateless: the
//! store is consulted on every request and nothing is cached between them.

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentKind, ContentStore, SiteStore};
use crate::helpers::{markdown_link_tag, url_for};
use crate::render::render_document;

lazy_static! {
    static ref MARKDOWN_REQUEST: Regex = Regex::new(r"/([^/.]+)\.md$").unwrap();
    static ref PAGE_REQUEST: Regex = Regex::new(r"^/([^/.]+)/?$").unwrap();
}

/// Server state shared across requests
struct ServerState {
    config: SiteConfig,
    store: SiteStore,
}

/// Start the server
pub async fn start(
    config: SiteConfig,
    store: SiteStore,
    ip: &str,
    port: u16,
    open: bool,
) -> Result<()> {
    let state = Arc::new(ServerState { config, store });

    let app = Router::new()
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Extract the slug from a path matching the `*/<slug>.md` pattern
///
/// The slug is a single path segment without dots. Returns `None` when the
/// path does not match, which means this server declines the request.
pub fn markdown_request_slug(path: &str) -> Option<String> {
    let caps = MARKDOWN_REQUEST.captures(path)?;
    let slug = percent_encoding::percent_decode_str(&caps[1])
        .decode_utf8()
        .ok()?;
    let slug = slug.trim().to_string();
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

/// Extract the slug from a single-item page path (`/<slug>` or `/<slug>/`)
fn page_request_slug(path: &str) -> Option<String> {
    let caps = PAGE_REQUEST.captures(path)?;
    let slug = percent_encoding::percent_decode_str(&caps[1])
        .decode_utf8()
        .ok()?;
    Some(slug.into_owned())
}

/// Fallback handler: markdown interception, then pages, then 404
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path();

    // The interception point runs before normal routing. Declined requests
    // (no match, unknown slug, unpublished item) fall through.
    if let Some(slug) = markdown_request_slug(path) {
        if let Some(item) = state.store.find_by_slug(&slug, ContentKind::Post) {
            if item.is_published() {
                tracing::info!("Serving markdown for '{}'", slug);
                return markdown_response(&item, &state.config, &state.store);
            }
            tracing::debug!("Declining markdown request for unpublished '{}'", slug);
        } else {
            tracing::debug!("No item found for markdown slug '{}'", slug);
        }
    }

    if path == "/" {
        return index_page(&state);
    }

    if let Some(slug) = page_request_slug(path) {
        if let Some(item) = state
            .store
            .find_by_slug(&slug, ContentKind::Post)
            .filter(ContentItem::is_published)
        {
            return item_page(&state, &item);
        }
        if let Some(item) = state
            .store
            .find_by_slug(&slug, ContentKind::Page)
            .filter(ContentItem::is_published)
        {
            return item_page(&state, &item);
        }
    }

    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

/// Build the Markdown response for a published item
fn markdown_response(item: &ContentItem, config: &SiteConfig, store: &dyn ContentStore) -> Response {
    let document = render_document(item, config, store);
    let filename = slug::slugify(&item.slug);

    (
        [
            (
                header::CONTENT_TYPE,
                "text/markdown; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}.md\"", filename),
            ),
        ],
        document.to_markdown(),
    )
        .into_response()
}

/// Render a single item's normal HTML page
///
/// The discovery link goes into the head for published posts only; listing
/// pages and plain pages never advertise a Markdown sibling.
fn item_page(state: &ServerState, item: &ContentItem) -> Response {
    let mut head = String::new();
    if item.kind == ContentKind::Post {
        if let Some(tag) = markdown_link_tag(&state.config, item) {
            head.push_str(&tag);
            head.push('\n');
        }
    }

    let title = html_escape::encode_text(&item.title);
    let body = state.store.render_content(&item.body);
    let page = format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}</head>\n<body>\n<article>\n<h1>{}</h1>\n{}</article>\n</body>\n</html>\n",
        state.config.language, title, head, title, body,
    );

    Html(page).into_response()
}

/// Render the index page listing published posts
fn index_page(state: &ServerState) -> Response {
    let mut entries = String::new();
    for item in state
        .store
        .all(ContentKind::Post)
        .iter()
        .filter(|p| p.is_published())
    {
        entries.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            url_for(&state.config, &item.slug),
            html_escape::encode_text(&item.title),
        ));
    }

    let page = format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<h1>{}</h1>\n<ul>\n{}</ul>\n</body>\n</html>\n",
        state.config.language,
        html_escape::encode_text(&state.config.title),
        html_escape::encode_text(&state.config.title),
        entries,
    );

    Html(page).into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
