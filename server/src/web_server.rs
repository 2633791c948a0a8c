use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::{
    Router,
    routing::{get, post},
};
use common::log;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

use crate::api::{evaluate_handler, lines_handler, move_handler};
use crate::server_config::INDEX_FILE;

/// API routes plus the static page. Unknown paths get `index.html`, so the
/// page can use client-side routes.
pub fn build_router(static_files_path: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(static_files_path)
        .fallback(ServeFile::new(static_files_path.join(INDEX_FILE)));

    Router::new()
        .route("/api/evaluate", post(evaluate_handler))
        .route("/api/move", post(move_handler))
        .route("/api/lines", get(lines_handler))
        .fallback_service(static_files)
        .layer(cors)
}

pub async fn run_web_server(
    port: u16,
    static_files_path: PathBuf,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = build_router(&static_files_path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log!(
        "Serving {} on http://localhost:{}",
        static_files_path.display(),
        port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn make_static_dir() -> PathBuf {
        let random_number: u32 = rand::random();
        let dir = std::env::temp_dir().join(format!("temp_tictactoe_static_{}", random_number));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(INDEX_FILE), "INDEX").unwrap();
        std::fs::write(dir.join("app.js"), "JS").unwrap();
        dir
    }

    async fn send(dir: &Path, request: Request<Body>) -> (StatusCode, String) {
        let response = build_router(dir).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_existing_file_is_served() {
        let dir = make_static_dir();

        let (status, body) = send(&dir, get_request("/app.js")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "JS");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_index() {
        let dir = make_static_dir();

        let (status, body) = send(&dir, get_request("/nope/route")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "INDEX");

        let (status, body) = send(&dir, get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "INDEX");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_move_with_short_board_is_bad_request() {
        let dir = make_static_dir();
        let request = Request::builder()
            .method("POST")
            .uri("/api/move")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"board":[null,"X"],"player":"O"}"#))
            .unwrap();

        let (status, _) = send(&dir, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_lines_through_router() {
        let dir = make_static_dir();

        let (status, body) = send(&dir, get_request("/api/lines")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("[[0,1,2],"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
