//! HTTP server - read-only views over the posts directory

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content::{MarkdownRenderer, Post, PostLoader};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Shared server state: the loader, the view templates and the site title
pub struct AppState {
    loader: PostLoader,
    templates: TemplateRenderer,
    site_title: String,
}

impl AppState {
    fn new(blog: &Blog) -> Result<Self> {
        // One renderer for the whole process; the loader borrows it for
        // every request.
        let renderer = Arc::new(MarkdownRenderer::new());

        Ok(Self {
            loader: PostLoader::new(blog.posts_dir.clone(), renderer),
            templates: TemplateRenderer::new()?,
            site_title: blog.config.title.clone(),
        })
    }

    /// Base context shared by every view: the site title and the latest
    /// post (or null while the posts directory is empty), so templates can
    /// always render the latest-post affordance.
    fn base_context(&self, posts: &[Post]) -> Context {
        let mut context = Context::new();
        context.insert("site_title", &self.site_title);
        context.insert("latest_post", &posts.first());
        context
    }
}

/// Build the application router
pub fn app(blog: &Blog) -> Result<Router> {
    let state = Arc::new(AppState::new(blog)?);

    Ok(Router::new()
        .route("/", get(home))
        .route("/posts", get(list_posts))
        .route("/posts/:slug", get(show_post))
        .fallback_service(ServeDir::new(&blog.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(blog: &Blog, port: u16) -> Result<()> {
    let app = app(blog)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running at http://localhost:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// GET / - home page showing the latest post
async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let posts = state.loader.load_all().await?;

    let mut context = state.base_context(&posts);
    context.insert("posts", &posts);

    Ok(Html(state.templates.render("home.html", &context)?))
}

/// GET /posts - listing of every post
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let posts = state.loader.load_all().await?;

    let mut context = state.base_context(&posts);
    context.insert("posts", &posts);

    Ok(Html(state.templates.render("posts.html", &context)?))
}

/// GET /posts/:slug - a single post
async fn show_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let posts = state.loader.load_all().await?;

    let Some(post) = state.loader.load_post(&slug).await else {
        return Ok((StatusCode::NOT_FOUND, "Post not found").into_response());
    };

    let mut context = state.base_context(&posts);
    context.insert("post", &post);

    Ok(Html(state.templates.render("post.html", &context)?).into_response())
}

/// Route-level error: logged in full server-side, reported to the client
/// as a generic 500 body.
struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Error loading blog posts").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
