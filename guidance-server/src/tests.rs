//! Router tests driven through `tower::ServiceExt::oneshot`

#[cfg(test)]
mod integration_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use guidance_core::logic::prediction::fixtures::{
        btech_labels, btech_model_artifact, btech_service, explainer_for, write_artifacts,
    };
    use guidance_core::InputPolicy;

    use crate::{create_router, AppState, Config};

    fn test_config() -> Config {
        Config::from_vars(|_| None).unwrap()
    }

    fn app(policy: InputPolicy) -> Router {
        let state = AppState {
            service: Arc::new(btech_service(policy).unwrap()),
            config: test_config(),
        };
        create_router(state)
    }

    fn predict_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn student() -> Value {
        json!({
            "CGPA": 9.0,
            "Data Structures And Algorithm Marks": 90,
            "coding practice hours/week": 9,
            "Aptitude_score": "85",
            "English_proficiency": "Good",
            "Name": "Ignored"
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ========================================================================
    // HEALTH
    // ========================================================================

    #[tokio::test]
    async fn test_health() {
        let response = app(InputPolicy::Lenient)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "AI Career Guidance API is running successfully.");
        assert_eq!(body["variant"], "btech");
        assert!(body["timestamp"].is_i64());
    }

    // ========================================================================
    // PREDICT
    // ========================================================================

    #[tokio::test]
    async fn test_predict_contract() {
        let response = app(InputPolicy::Lenient)
            .oneshot(predict_request("/predict", student()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;

        assert_eq!(body["status"], "success");
        assert_eq!(body["prediction"], "AI/ML Engineer");

        let probabilities = body["probabilities"].as_object().unwrap();
        assert_eq!(probabilities.len(), 6);
        let sum: f64 = probabilities.values().map(|p| p.as_f64().unwrap()).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(body["confidence"], probabilities["AI/ML Engineer"]);

        let explanations = body["explanations"].as_array().unwrap();
        assert_eq!(explanations.len(), 7);
        assert_eq!(explanations[0]["feature"], "Data Structures And Algorithm Marks");
        assert!(explanations[0]["impact"].is_f64());
    }

    #[tokio::test]
    async fn test_predict_top_k() {
        let response = app(InputPolicy::Lenient)
            .oneshot(predict_request("/predict?top_k=3", student()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["explanations"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_predict_top_k_out_of_range() {
        for uri in ["/predict?top_k=0", "/predict?top_k=51"] {
            let response = app(InputPolicy::Lenient)
                .oneshot(predict_request(uri, student()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let body = json_body(response).await;
            assert_eq!(body["status"], "error");
            assert!(body["error"].as_str().unwrap().contains("top_k"));
        }
    }

    #[tokio::test]
    async fn test_predict_empty_object_is_lenient() {
        let response = app(InputPolicy::Lenient)
            .oneshot(predict_request("/predict", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["prediction"], "Data Analyst");
    }

    #[tokio::test]
    async fn test_predict_strict_rejects_missing() {
        let response = app(InputPolicy::Strict)
            .oneshot(predict_request("/predict", student()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["error"].as_str().unwrap().contains("Number_of_backlogs"));
    }

    #[tokio::test]
    async fn test_predict_non_object_body() {
        let response = app(InputPolicy::Lenient)
            .oneshot(predict_request("/predict", json!([1, 2, 3])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let malformed = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app(InputPolicy::Lenient).oneshot(malformed).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_open() {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app(InputPolicy::Lenient).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    // ========================================================================
    // STARTUP
    // ========================================================================

    #[test]
    fn test_state_from_artifact_files() {
        let dir = tempfile::tempdir().unwrap();
        let model = btech_model_artifact();
        let explainer = explainer_for(&model);
        let paths = write_artifacts(dir.path(), &model, &explainer, &btech_labels()).unwrap();

        let mut config = test_config();
        config.model_path = paths.model;
        config.explainer_path = paths.explainer;
        config.labels_path = paths.labels;

        let state = tokio_test::assert_ok!(AppState::from_config(config));
        assert_eq!(state.service.metadata().num_classes, 6);
    }

    #[test]
    fn test_state_fails_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.model_path = dir.path().join("model.json");

        let err = AppState::from_config(config).err().unwrap();
        assert!(format!("{:#}", err).contains("model.json"));
    }
}
