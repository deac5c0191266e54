//! Route-level tests against an in-process router

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mdblog::Blog;
use std::fs::{self, FileTimes, OpenOptions};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tower::ServiceExt;

fn write_post(dir: &Path, name: &str, content: &str, mtime_secs: u64) {
    let path = dir.join(format!("{name}.md"));
    fs::write(&path, content).unwrap();
    let file = OpenOptions::new().write(true).open(&path).unwrap();
    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs);
    file.set_times(FileTimes::new().set_modified(mtime)).unwrap();
}

fn fixture() -> (tempfile::TempDir, Blog) {
    let dir = tempfile::tempdir().unwrap();
    let posts = dir.path().join("posts");
    fs::create_dir(&posts).unwrap();

    write_post(
        &posts,
        "hello-world",
        "# Hello World\n\nFirst post with `inline code`.\n",
        1_000,
    );
    write_post(
        &posts,
        "diagrams",
        "# Diagrams\n\n```mermaid\ngraph TD;\n  A-->B;\n```\n",
        2_000,
    );

    fs::create_dir_all(dir.path().join("public/css")).unwrap();
    fs::write(dir.path().join("public/css/style.css"), "body { margin: 0; }").unwrap();

    let blog = Blog::new(dir.path()).unwrap();
    (dir, blog)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn home_shows_the_latest_post() {
    let (_dir, blog) = fixture();
    let app = mdblog::server::app(&blog).unwrap();

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    // "diagrams" has the newer mtime, so the home page shows it
    assert!(body.contains("Diagrams"));
    assert!(body.contains(r#"<div class="mermaid">"#));
}

#[tokio::test]
async fn listing_links_every_post() {
    let (_dir, blog) = fixture();
    let app = mdblog::server::app(&blog).unwrap();

    let (status, body) = get(app, "/posts").await;
    assert_eq!(status, StatusCode::OK);
    // Newest first within the list itself
    let list = &body[body.find("<ul").unwrap()..];
    let diagrams = list.find(r#"href="/posts/diagrams""#).unwrap();
    let hello = list.find(r#"href="/posts/hello-world""#).unwrap();
    assert!(diagrams < hello);
}

#[tokio::test]
async fn single_post_contains_rendered_html() {
    let (_dir, blog) = fixture();
    let app = mdblog::server::app(&blog).unwrap();

    let (status, body) = get(app, "/posts/hello-world").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hello World"));
    assert!(body.contains("<code>inline code</code>"));
}

#[tokio::test]
async fn unknown_slug_is_404() {
    let (_dir, blog) = fixture();
    let app = mdblog::server::app(&blog).unwrap();

    let (status, body) = get(app, "/posts/nonexistent-slug").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Post not found");
}

#[tokio::test]
async fn latest_post_appears_in_navigation_everywhere() {
    let (_dir, blog) = fixture();

    for uri in ["/", "/posts", "/posts/hello-world"] {
        let app = mdblog::server::app(&blog).unwrap();
        let (status, body) = get(app, uri).await;
        assert_eq!(status, StatusCode::OK, "GET {uri}");
        assert!(
            body.contains("Latest: Diagrams"),
            "GET {uri} lacks the latest-post link"
        );
    }
}

#[tokio::test]
async fn empty_posts_directory_renders_home() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("posts")).unwrap();
    let blog = Blog::new(dir.path()).unwrap();
    let app = mdblog::server::app(&blog).unwrap();

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No posts yet"));
}

#[tokio::test]
async fn static_assets_are_served() {
    let (_dir, blog) = fixture();
    let app = mdblog::server::app(&blog).unwrap();

    let (status, body) = get(app, "/css/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("margin: 0"));
}
