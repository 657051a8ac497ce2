pub mod dto;
pub mod handlers;
pub mod openapi;
pub mod response;
pub mod router;

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use crate::api::routes::create_router;
    use crate::api::state::AppState;
    use crate::config::{
        Config, LlmConfig, RecommendationConfig, ServerConfig, SessionConfig,
    };
    use crate::error::Result;
    use crate::llm::{LlmProvider, ModelRequest, MoodModel};
    use crate::services::{CredentialStore, StaticCredentials};

    const HAPPY: &str = r#"{
        "overall_mood": "Happy",
        "mood_summary": "Excited about the promotion",
        "health_tip_1": "Celebrate with someone close",
        "health_tip_2": "Keep your sleep routine",
        "movie_recommendations": [],
        "book_recommendations": []
    }"#;

    struct CannedModel {
        payload: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MoodModel for CannedModel {
        async fn analyze(&self, _request: &ModelRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.payload.clone())
        }
    }

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            llm: LlmConfig::default(),
            recommendations: RecommendationConfig::default(),
            session: SessionConfig {
                idle_ttl_secs: 3600,
                sweep_interval_secs: 60,
            },
        }
    }

    fn test_app(credentials: StaticCredentials) -> (Router, Arc<CannedModel>) {
        let config = test_config();
        let model = Arc::new(CannedModel {
            payload: HAPPY.to_string(),
            calls: AtomicUsize::new(0),
        });
        let credentials: Arc<dyn CredentialStore> = Arc::new(credentials);
        let state = AppState::with_model(
            config.clone(),
            LlmProvider::new(&config.llm),
            model.clone(),
            credentials,
        );
        (create_router(state), model)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_session(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        json["data"]["sessionId"].as_str().unwrap().to_string()
    }

    async fn submit(app: &Router, session_id: &str, body: &str) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/sessions/{session_id}/reports"))
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get(app: &Router, uri: &str) -> axum::response::Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_key_presence_only() {
        let (app, _) = test_app(StaticCredentials::new("sk-super-secret"));

        let response = get(&app, "/api/v1/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json.get("error").is_none());
        assert_eq!(json["data"]["credentials"]["configured"], true);
        assert_eq!(json["data"]["llm"]["provider"], "gemini");
        assert!(!json.to_string().contains("sk-super-secret"));
    }

    #[tokio::test]
    async fn settings_expose_count_bounds() {
        let (app, _) = test_app(StaticCredentials::missing());

        let json = body_json(get(&app, "/api/v1/settings").await).await;
        assert_eq!(json["data"]["minRecommendations"], 1);
        assert_eq!(json["data"]["maxRecommendations"], 5);
        assert_eq!(json["data"]["defaultRecommendations"], 2);
    }

    #[tokio::test]
    async fn openapi_json_is_valid() {
        let (app, _) = test_app(StaticCredentials::missing());

        let response = get(&app, "/api/v1/openapi.json").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let version = json["openapi"]
            .as_str()
            .expect("openapi field should be a string");
        assert!(version.starts_with('3'), "got: {version}");
        assert!(json["paths"]["/api/v1/sessions/{sessionId}/reports"].is_object());
    }

    #[tokio::test]
    async fn new_session_has_empty_dashboard() {
        let (app, _) = test_app(StaticCredentials::new("sk-test"));
        let id = create_session(&app).await;

        let json = body_json(get(&app, &format!("/api/v1/sessions/{id}")).await).await;
        assert!(json["data"]["report"].is_null());
        assert_eq!(json["data"]["busy"], false);
        assert_eq!(json["data"]["trend"]["kind"], "empty");
        assert_eq!(
            json["data"]["trend"]["prompt"],
            "Submit your first entry to see your mood history!"
        );
    }

    #[tokio::test]
    async fn successful_submission_renders_report_and_trend() {
        let (app, model) = test_app(StaticCredentials::new("sk-test"));
        let id = create_session(&app).await;

        let response = submit(
            &app,
            &id,
            r#"{"text":"I just got a promotion","movies":{"enabled":false,"count":3},"books":{"enabled":false,"count":2}}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let report = &json["data"]["report"];
        assert_eq!(report["mood"], "Happy");
        assert_eq!(report["score"], 4);
        assert_eq!(report["healthTips"].as_array().unwrap().len(), 2);
        assert!(report.get("movies").is_none());
        assert!(report.get("books").is_none());
        assert_eq!(json["data"]["trend"]["kind"], "chart");
        assert_eq!(json["data"]["trend"]["points"].as_array().unwrap().len(), 1);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);

        let history = body_json(get(&app, &format!("/api/v1/sessions/{id}/history")).await).await;
        let entries = history["data"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["mood"], "Happy");
        assert_eq!(entries[0]["movieCount"], 0);
        assert_eq!(entries[0]["bookCount"], 0);
    }

    #[tokio::test]
    async fn empty_text_is_invalid_request_and_clears_report() {
        let (app, model) = test_app(StaticCredentials::new("sk-test"));
        let id = create_session(&app).await;

        let ok = submit(&app, &id, r#"{"text":"I just got a promotion"}"#).await;
        assert_eq!(ok.status(), StatusCode::OK);

        let response = submit(&app, &id, r#"{"text":"   "}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
        assert!(json.get("data").is_none());

        let view = body_json(get(&app, &format!("/api/v1/sessions/{id}")).await).await;
        assert!(view["data"]["report"].is_null());
        assert_eq!(view["data"]["trend"]["points"].as_array().unwrap().len(), 1);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn out_of_range_count_is_rejected_before_the_model() {
        let (app, model) = test_app(StaticCredentials::new("sk-test"));
        let id = create_session(&app).await;

        let ok = submit(&app, &id, r#"{"text":"I just got a promotion"}"#).await;
        assert_eq!(ok.status(), StatusCode::OK);

        let response = submit(
            &app,
            &id,
            r#"{"text":"tired","movies":{"enabled":true,"count":9}}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "invalid_request");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);

        let view = body_json(get(&app, &format!("/api/v1/sessions/{id}")).await).await;
        assert!(view["data"]["report"].is_null());
        assert!(view["data"]["error"]
            .as_str()
            .unwrap()
            .contains("Number of movies"));
        assert_eq!(view["data"]["trend"]["points"].as_array().unwrap().len(), 1);
        assert_eq!(view["data"]["busy"], false);
    }

    #[tokio::test]
    async fn missing_key_is_credentials_error_without_model_call() {
        let (app, model) = test_app(StaticCredentials::missing());
        let id = create_session(&app).await;

        let response = submit(&app, &id, r#"{"text":"anxious about exams"}"#).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "credentials_error");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("API Key Error"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_and_malformed_session_ids() {
        let (app, _) = test_app(StaticCredentials::missing());

        let response = get(
            &app,
            "/api/v1/sessions/6f1c1b3e-8a0e-4a8f-9b9f-3f1f0c1d2e3a",
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "not_found");

        let response = get(&app, "/api/v1/sessions/not-a-uuid").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ended_session_is_gone() {
        let (app, _) = test_app(StaticCredentials::new("sk-test"));
        let id = create_session(&app).await;
        submit(&app, &id, r#"{"text":"calm evening"}"#).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/sessions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["discardedEntries"], 1);

        let response = get(&app, &format!("/api/v1/sessions/{id}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_serves_dashboard_page() {
        let (app, _) = test_app(StaticCredentials::missing());

        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let response = get(&app, "/api/v1/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
