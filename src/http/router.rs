//! Route table and middleware stack.

use super::handlers;
use crate::application::ApplicationServices;
use crate::config::ServerConfig;
use axum::{
    Router,
    http::{
        HeaderValue, Method, StatusCode,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, put},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Builds the full application router.
///
/// Layers, innermost first: panic recovery, request timeout, request
/// tracing and CORS.
pub fn build_router<A>(app: A) -> Router
where
    A: ApplicationServices,
{
    let server = &app.config().server;
    let cors = build_cors_layer(server);
    let timeout = server.request_timeout();

    Router::new()
        .route("/healthz", get(handlers::health))
        .nest("/api", api_routes::<A>())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(app)
}

fn api_routes<A>() -> Router<A>
where
    A: ApplicationServices,
{
    Router::new()
        .route(
            "/users",
            get(handlers::list_users::<A>).post(handlers::sign_up::<A>),
        )
        .route(
            "/projects",
            get(handlers::list_projects::<A>).post(handlers::create_project::<A>),
        )
        .route("/projects/board", get(handlers::project_board::<A>))
        .route(
            "/projects/{id}",
            get(handlers::get_project::<A>)
                .patch(handlers::update_project::<A>)
                .delete(handlers::delete_project::<A>),
        )
        .route(
            "/projects/{id}/tasks",
            get(handlers::list_project_tasks::<A>).post(handlers::create_project_task::<A>),
        )
        .route(
            "/tasks/{id}",
            get(handlers::get_task::<A>)
                .patch(handlers::update_task::<A>)
                .delete(handlers::delete_task::<A>),
        )
        .route("/tasks/{id}/status", put(handlers::set_task_status::<A>))
}

/// Builds the CORS layer from configured origins.
///
/// Origins that are not valid header values are skipped with a warning.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::build_router;
    use crate::application::InMemoryApplication;
    use crate::config::Config;
    use crate::identity::domain::{Session, UserId};
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const TOKEN: &str = "token-alice";

    #[fixture]
    fn router() -> Router {
        let (app, sessions) = InMemoryApplication::in_memory(Config::default());
        let alice = UserId::new("alice").expect("valid user id");
        sessions
            .issue(TOKEN, Session::new(alice).with_name("Alice"))
            .expect("session issued");
        build_router(app)
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body readable")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn authed(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        request.expect("request builds")
    }

    #[rstest]
    #[tokio::test]
    async fn health_is_public(router: Router) {
        let request = Request::get("/healthz")
            .body(Body::empty())
            .expect("request builds");
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic abc"))]
    #[case(Some("Bearer unknown"))]
    #[tokio::test]
    async fn project_routes_require_a_session(router: Router, #[case] authorization: Option<&str>) {
        let mut builder = Request::get("/api/projects");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = builder.body(Body::empty()).expect("request builds");

        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[rstest]
    #[tokio::test]
    async fn created_task_is_authored_by_the_session_user(router: Router) {
        let (status, project) = send(
            &router,
            authed("POST", "/api/projects", Some(json!({ "name": "Launch" }))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let project_id = project["id"].as_str().expect("project id").to_owned();

        let (status, task) = send(
            &router,
            authed(
                "POST",
                &format!("/api/projects/{project_id}/tasks"),
                Some(json!({ "title": "Write copy", "dueDate": "2025-05-01T00:00:00.000Z" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task["authorUserId"], "alice");
        assert_eq!(task["assignedUserIds"], json!([]));
        assert_eq!(task["status"], "TO_DO");
        assert_eq!(task["dueDate"], "2025-05-01");
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_missing_task_is_404_task_not_found(router: Router) {
        let uri = format!("/api/tasks/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&router, authed("DELETE", &uri, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "task not found");
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_project_input_is_a_validation_error(router: Router) {
        let (status, body) = send(
            &router,
            authed(
                "POST",
                "/api/projects",
                Some(json!({ "name": "Dates", "startDate": "soon" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_signup_is_a_conflict(router: Router) {
        let signup = || {
            Request::post("/api/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "name": "Bea", "email": "bea@example.com" }).to_string(),
                ))
                .expect("request builds")
        };

        let (first, _) = send(&router, signup()).await;
        let (second, body) = send(&router, signup()).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");
    }
}
