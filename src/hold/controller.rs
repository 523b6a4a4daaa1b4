use axum::{
    extract::State,
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::hold::command::place_on_hold_cmd::{PlaceOnHoldBookCommand, PlaceOnHoldBookCommandRequest, PlaceOnHoldBookCommandResponse};
use crate::hold::factory;

pub async fn hold_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<PlaceOnHoldBookCommandResponse>, ServerError> {
    let req: PlaceOnHoldBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = factory::create_hold_service(&state.config, state.store).await;
    let res = PlaceOnHoldBookCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;
    use crate::core::controller::AppState;
    use crate::core::repository::RepositoryStore;
    use crate::hold::controller::hold_book;

    fn app() -> Router {
        Router::new()
            .route("/hold", post(hold_book))
            .with_state(AppState::new("test", RepositoryStore::LocalDynamoDB))
    }

    fn request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/hold")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("should build request")
    }

    #[tokio::test]
    async fn test_should_reject_request_without_patron() {
        let res = app().oneshot(request(serde_json::json!({
            "library_branch_id": "b1",
            "book_id": "book1",
        }))).await.expect("should respond");
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
    }

    #[tokio::test]
    async fn test_should_reject_negative_days() {
        let res = app().oneshot(request(serde_json::json!({
            "patron_id": "p1",
            "library_branch_id": "b1",
            "book_id": "book1",
            "no_of_days": -1,
        }))).await.expect("should respond");
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
    }
}
