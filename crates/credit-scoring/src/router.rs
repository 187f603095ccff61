use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use crate::applicant::{ScoreRequest, ValidationError};
use crate::error::AppError;
use crate::scoring::ScoringEngine;

/// Router exposing `POST /score` backed by a shared engine.
pub fn score_router(engine: Arc<ScoringEngine>) -> Router {
    Router::new()
        .route("/score", post(score_handler))
        .with_state(engine)
}

pub(crate) async fn score_handler(
    State(engine): State<Arc<ScoringEngine>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(status = %rejection.status(), "rejected malformed score request");
            return AppError::Validation(ValidationError::Malformed(rejection.body_text()))
                .into_response();
        }
    };

    let profile = match request.validate() {
        Ok(profile) => profile,
        Err(err) => {
            warn!(error = %err, "rejected invalid score request");
            return AppError::Validation(err).into_response();
        }
    };

    info!(
        age = profile.age,
        income = profile.income,
        "scoring request for applicant"
    );
    let result = engine.score(&profile);
    info!(
        score = result.score,
        decision = %result.decision,
        risk_level = %result.risk_level,
        "score calculated"
    );

    (StatusCode::OK, Json(result)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        score_router(Arc::new(ScoringEngine::new(ScoringConfig::default())))
    }

    fn base_applicant() -> Value {
        json!({
            "age": 35,
            "income": 75000,
            "credit_history_years": 8,
            "existing_loans": 2,
            "debt_to_income_ratio": 0.25,
            "savings": 25000,
            "employment_status": "employed",
            "employment_years": 5
        })
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::post("/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("request builds")
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.expect("route executes");
        let status = response.status();
        (status, read_json_body(response).await)
    }

    #[tokio::test]
    async fn scores_valid_applicant() {
        let (status, body) = send(post_json(base_applicant().to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 715);
        assert_eq!(body["decision"], "approved");
        assert_eq!(body["risk_level"], "low");
        assert!(body["reason"]
            .as_str()
            .expect("reason is text")
            .starts_with("Strong financial profile"));
    }

    #[tokio::test]
    async fn employment_status_is_case_insensitive() {
        let mut payload = base_applicant();
        payload["employment_status"] = json!("SELF_EMPLOYED");

        let (status, body) = send(post_json(payload.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 705);
    }

    #[tokio::test]
    async fn whole_number_floats_are_scored() {
        let mut payload = base_applicant();
        payload["age"] = json!(35.0);
        payload["employment_years"] = json!(5.0);

        let (status, body) = send(post_json(payload.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 715);

        payload["age"] = json!(35.5);
        let (status, body) = send(post_json(payload.to_string())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["field"], "body");
    }

    #[tokio::test]
    async fn unknown_employment_status_is_unprocessable() {
        let mut payload = base_applicant();
        payload["employment_status"] = json!("freelancer");

        let (status, body) = send(post_json(payload.to_string())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["field"], "employment_status");
    }

    #[tokio::test]
    async fn out_of_range_values_are_unprocessable() {
        let cases = [
            ("age", json!(17)),
            ("age", json!(101)),
            ("income", json!(-100)),
            ("credit_history_years", json!(-1)),
            ("existing_loans", json!(21)),
            ("debt_to_income_ratio", json!(1.5)),
            ("savings", json!(-1)),
            ("employment_years", json!(61)),
        ];

        for (field, value) in cases {
            let mut payload = base_applicant();
            payload[field] = value.clone();

            let (status, body) = send(post_json(payload.to_string())).await;

            assert_eq!(
                status,
                StatusCode::UNPROCESSABLE_ENTITY,
                "{field} = {value}"
            );
            assert_eq!(body["details"][0]["field"], field);
        }
    }

    #[tokio::test]
    async fn missing_fields_are_unprocessable() {
        for field in ["age", "income", "employment_status", "employment_years"] {
            let mut payload = base_applicant();
            payload
                .as_object_mut()
                .expect("payload is an object")
                .remove(field);

            let (status, body) = send(post_json(payload.to_string())).await;

            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "missing {field}");
            assert_eq!(body["details"][0]["field"], "body");
        }
    }

    #[tokio::test]
    async fn wrong_type_is_unprocessable() {
        let mut payload = base_applicant();
        payload["age"] = json!("thirty");

        let (status, _) = send(post_json(payload.to_string())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn malformed_json_is_unprocessable() {
        let (status, body) = send(post_json("{not valid json")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .starts_with("malformed request body"));
    }

    #[tokio::test]
    async fn empty_body_is_unprocessable() {
        let (status, _) = send(post_json(Body::empty())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn handler_can_be_called_directly() {
        let engine = Arc::new(ScoringEngine::default());
        let request: ScoreRequest =
            serde_json::from_value(base_applicant()).expect("request parses");

        let response = score_handler(State(engine), Ok(Json(request))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["decision"], "approved");
    }
}
