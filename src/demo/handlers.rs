use axum::{
    extract::Path,
    http::{header::HOST, HeaderMap, Method, StatusCode},
    routing::{any, get},
    Router,
};

/// Requests to `/test` carrying this host get the restricted answer.
const RESTRICTED_HOST: &str = "mydomain.com";

pub fn demo_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/profile", any(profile))
        .route("/profile/:name", any(profile_named))
        .route("/test", any(test_endpoint))
        .route("/api/characters", get(characters))
}

async fn profile() -> &'static str {
    "Hello, you've requested your profile data"
}

async fn profile_named(Path(name): Path<String>) -> String {
    format!("Hello {name}, you've requested your profile data")
}

async fn test_endpoint(method: Method, headers: HeaderMap) -> (StatusCode, String) {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(|h| h.split(':').next().unwrap_or(h));

    if host == Some(RESTRICTED_HOST) {
        return (
            StatusCode::OK,
            "Hello, you've requested a restricted endpoint".to_string(),
        );
    }

    if method == Method::GET || method == Method::POST {
        (
            StatusCode::OK,
            format!("Hello, you've requested the test data using {method} method"),
        )
    } else {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            format!("{method} HTTP method not allowed"),
        )
    }
}

async fn characters() -> &'static str {
    "Hello, you've requested the characters data"
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    use super::*;
    use crate::{app::build_app, state::AppState};

    async fn get_text(req: Request<Body>) -> (StatusCode, String) {
        let resp = build_app(AppState::fake()).oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn profile_greets() {
        let (status, text) = get_text(request("GET", "/profile")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("profile data"));

        let (status, text) = get_text(request("POST", "/profile/ana")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "Hello ana, you've requested your profile data");
    }

    #[tokio::test]
    async fn test_endpoint_depends_on_host_and_method() {
        let req = Request::builder()
            .method("DELETE")
            .uri("/test")
            .header(HOST, "mydomain.com:8080")
            .body(Body::empty())
            .unwrap();
        let (status, text) = get_text(req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("restricted endpoint"));

        let (status, text) = get_text(request("POST", "/test")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.ends_with("using POST method"));

        let (status, text) = get_text(request("PUT", "/test")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(text, "PUT HTTP method not allowed");
    }

    #[tokio::test]
    async fn characters_is_get_only() {
        let (status, text) = get_text(request("GET", "/api/characters")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("characters data"));

        let (status, _) = get_text(request("POST", "/api/characters")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn static_files_are_served_under_prefix() {
        let (status, text) = get_text(request("GET", "/static/hello.txt")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.starts_with("Hello from the static directory"));

        let (status, _) = get_text(request("GET", "/static/missing.txt")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
