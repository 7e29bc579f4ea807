pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::postings::handlers as postings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Posting corpus
        .route("/api/v1/postings/stats", get(postings::handle_stats))
        .route("/api/v1/postings/reload", post(postings::handle_reload))
        // Matching
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/match/resume", post(matching::handle_match_resume))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::{FixedExtractor, ProfileExtractor, UnconfiguredExtractor};
    use crate::matching::engine::{MatchOptions, MatchSession};
    use crate::models::{CandidateProfile, Posting};
    use crate::postings::source::{make_posting, StaticPostingSource};

    fn make_config() -> Config {
        Config {
            postings_path: PathBuf::from("unused.json"),
            anthropic_api_key: None,
            max_features: 5000,
            default_top_k: 10,
            max_missing_skills: 5,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn make_postings() -> Vec<Posting> {
        vec![
            make_posting(json!({
                "job_id": "ml-1",
                "title": "Machine Learning Engineer",
                "category": "Data Science",
                "location": "Remote",
                "experience_level": "Senior",
                "technical_skills": ["Python", "PyTorch", "SQL"],
                "job_summary": "Train and ship machine learning models."
            })),
            make_posting(json!({
                "job_id": "ops-1",
                "title": "Site Reliability Engineer",
                "category": "Infrastructure",
                "location": "Austin, TX",
                "technical_skills": ["Kubernetes", "Terraform"],
                "job_summary": "Keep production healthy."
            })),
        ]
    }

    fn make_app(postings: Vec<Posting>, extractor: Arc<dyn ProfileExtractor>) -> Router {
        let source = Arc::new(StaticPostingSource::new(postings));
        let state = AppState {
            config: make_config(),
            session: Arc::new(MatchSession::new(source, MatchOptions::default())),
            extractor,
        };
        build_router(state)
    }

    fn make_profile() -> CandidateProfile {
        CandidateProfile {
            summary: "Machine learning practitioner".to_string(),
            technical_skills: vec!["python".to_string(), "pytorch".to_string()],
            ..Default::default()
        }
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = make_app(make_postings(), Arc::new(UnconfiguredExtractor));
        let (status, body) = send(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_match_profile() {
        let app = make_app(make_postings(), Arc::new(UnconfiguredExtractor));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/match",
            Some(json!({"profile": {
                "summary": "Machine learning practitioner",
                "technical_skills": ["Python", "PyTorch"]
            }, "top_k": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let matches = body["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["job_id"], "ml-1");
        assert_eq!(matches[0]["matching_skills"], json!(["python", "pytorch"]));
        assert_eq!(matches[0]["missing_skills"], json!(["sql"]));
    }

    #[tokio::test]
    async fn test_zero_top_k_is_bad_request() {
        let app = make_app(make_postings(), Arc::new(UnconfiguredExtractor));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/match",
            Some(json!({"profile": {}, "top_k": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_corpus_is_no_postings() {
        let app = make_app(Vec::new(), Arc::new(UnconfiguredExtractor));
        let (status, body) = send(app, "POST", "/api/v1/match", Some(json!({"profile": {}}))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "NO_POSTINGS");
    }

    #[tokio::test]
    async fn test_resume_extraction_failure_is_bad_gateway() {
        let app = make_app(make_postings(), Arc::new(FixedExtractor(None)));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/match/resume",
            Some(json!({"resume_text": "Ten years of Python"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_blank_resume_is_bad_request() {
        let app = make_app(make_postings(), Arc::new(FixedExtractor(Some(make_profile()))));
        let (status, _) = send(
            app,
            "POST",
            "/api/v1/match/resume",
            Some(json!({"resume_text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resume_match_returns_profile_and_matches() {
        let app = make_app(make_postings(), Arc::new(FixedExtractor(Some(make_profile()))));
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/match/resume",
            Some(json!({"resume_text": "ML engineer, Python and PyTorch",
                        "filter": {"category": "Data Science"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["resume_text"], "ML engineer, Python and PyTorch");
        let matches = body["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["category"], "Data Science");
    }

    #[tokio::test]
    async fn test_stats_and_reload() {
        let app = make_app(make_postings(), Arc::new(UnconfiguredExtractor));

        let (status, body) = send(app.clone(), "POST", "/api/v1/postings/reload", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["postings"], 2);
        assert!(body["vocabulary_size"].as_u64().unwrap() > 0);

        let (status, body) = send(app, "GET", "/api/v1/postings/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_postings"], 2);
        assert_eq!(body["categories"]["Infrastructure"], 1);
        assert_eq!(body["seniority_levels"]["3"], 1);
    }
}
