//! Browser-facing routes
//!
//! Each form post is one controller event. Handlers always redirect back to
//! the page, which shows the outcome of the last event as a notice.

use axum::{
    Form, Json, Router,
    extract::{Path, State, rejection::FormRejection},
    response::{Html, Redirect},
    routing::{get, post},
};
use domain_users::view::SUBMIT_PATH;
use domain_users::{UserFields, UserId, UsersApi};
use serde_json::{Value, json};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

/// Create the router for the users page
pub fn router<A: UsersApi + 'static>(state: AppState<A>) -> Router {
    Router::new()
        .route("/", get(index::<A>))
        .route(SUBMIT_PATH, post(submit::<A>))
        .route("/users/{id}/edit", post(edit::<A>))
        .route("/users/{id}/delete", post(delete::<A>))
        .route("/health", get(health))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// GET /
async fn index<A: UsersApi>(State(state): State<AppState<A>>) -> Html<String> {
    let session = state.lock().await;
    Html(
        session
            .controller
            .view()
            .render_page(session.notice.as_deref()),
    )
}

/// POST /users/submit
async fn submit<A: UsersApi>(
    State(state): State<AppState<A>>,
    form: Result<Form<UserFields>, FormRejection>,
) -> Redirect {
    let mut session = state.lock().await;
    let Form(fields) = match form {
        Ok(form) => form,
        Err(rejection) => {
            session.reject("submit", rejection.body_text());
            return Redirect::to("/");
        }
    };
    session.controller.view().fill_form(fields);

    let result = session.controller.submit().await;
    session.record("submit", result);
    Redirect::to("/")
}

/// POST /users/:id/edit
async fn edit<A: UsersApi>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
) -> Redirect {
    let mut session = state.lock().await;

    let result = session.controller.edit(&UserId::new(id));
    session.record("edit", result);
    Redirect::to("/")
}

/// POST /users/:id/delete
async fn delete<A: UsersApi>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
) -> Redirect {
    let mut session = state.lock().await;

    let result = session.controller.delete(&UserId::new(id)).await;
    session.record("delete", result);
    Redirect::to("/")
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use domain_users::{InMemoryUsersApi, User, UsersController, UsersView};
    use http_body_util::BodyExt;
    use test_utils::TestDataBuilder;
    use tower::ServiceExt; // For oneshot()

    async fn test_app(builder: &TestDataBuilder, ids: &[&str]) -> (Router, InMemoryUsersApi) {
        let seeded = ids
            .iter()
            .map(|id| serde_json::from_value::<User>(builder.stored_user_json(id, id)).unwrap())
            .collect();
        let api = InMemoryUsersApi::with_users(seeded);

        let mut controller = UsersController::new(api.clone(), UsersView::new());
        controller.init().await.unwrap();

        (router(AppState::new(controller, None)), api)
    }

    async fn page(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn post_form(app: &Router, uri: &str, body: &str) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_index_renders_seeded_rows() {
        let builder = TestDataBuilder::from_test_name("routes_index");
        let (app, _) = test_app(&builder, &["1", "2"]).await;

        let html = page(&app).await;

        assert!(html.contains(r#"<tr id="1">"#));
        assert!(html.contains(r#"<tr id="2">"#));
        assert!(html.contains(">Add</button>"));
    }

    #[tokio::test]
    async fn test_submit_creates_user() {
        let builder = TestDataBuilder::from_test_name("routes_submit");
        let (app, api) = test_app(&builder, &["1"]).await;

        post_form(
            &app,
            SUBMIT_PATH,
            "firstName=Grace&lastName=Hopper&email=grace%40example.com&phone=555-0101",
        )
        .await;

        let stored = api.snapshot().await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].first_name, "Grace");
        assert!(page(&app).await.contains("<td>grace@example.com</td>"));
    }

    #[tokio::test]
    async fn test_edit_then_submit_updates_user() {
        let builder = TestDataBuilder::from_test_name("routes_edit");
        let (app, api) = test_app(&builder, &["4", "5"]).await;

        post_form(&app, "/users/5/edit", "").await;
        let html = page(&app).await;
        assert!(html.contains(r#"value="First-5""#));
        assert!(html.contains(">Edit</button>"));

        post_form(
            &app,
            SUBMIT_PATH,
            "firstName=Renamed&lastName=User&email=renamed%40example.com&phone=1",
        )
        .await;

        let stored = api.snapshot().await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].id.as_str(), "5");
        assert_eq!(stored[1].first_name, "Renamed");
        assert!(page(&app).await.contains(">Add</button>"));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let builder = TestDataBuilder::from_test_name("routes_delete");
        let (app, api) = test_app(&builder, &["6", "7", "8"]).await;

        post_form(&app, "/users/7/delete", "").await;

        let ids: Vec<_> = api
            .snapshot()
            .await
            .into_iter()
            .map(|u| u.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["6", "8"]);
        assert!(!page(&app).await.contains(r#"<tr id="7">"#));
    }

    #[tokio::test]
    async fn test_failed_event_is_shown_as_notice() {
        let builder = TestDataBuilder::from_test_name("routes_notice");
        let (app, api) = test_app(&builder, &[]).await;

        post_form(&app, SUBMIT_PATH, "firstName=Ada&lastName=L&email=nope&phone=").await;

        assert!(api.snapshot().await.is_empty());
        let html = page(&app).await;
        assert!(html.contains("user__notice"));
        assert!(html.contains("Invalid input"));

        post_form(&app, "/users/99/edit", "").await;
        assert!(page(&app).await.contains("User not found: 99"));
    }

    #[tokio::test]
    async fn test_incomplete_form_is_shown_as_notice() {
        let builder = TestDataBuilder::from_test_name("routes_incomplete");
        let (app, api) = test_app(&builder, &["1"]).await;

        post_form(&app, SUBMIT_PATH, "firstName=Ada").await;

        assert_eq!(api.snapshot().await.len(), 1);
        let html = page(&app).await;
        assert!(html.contains("user__notice"));
        assert!(html.contains("missing field"));
    }

    #[tokio::test]
    async fn test_health() {
        let builder = TestDataBuilder::from_test_name("routes_health");
        let (app, _) = test_app(&builder, &[]).await;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }
}
