use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::executives::{
    decision_router, DecisionDispatcher, ExecutivePolicy, LanguageModel, ModelBackedStrategy,
    ModelError,
};

pub(super) fn profit_context() -> Value {
    json!({
        "revenue": 10000,
        "expenses": 4000,
        "wage_earner_pool": [
            { "id": 1, "name": "Ava", "performance_score": 8 },
            { "id": 2, "name": "Ben", "performance_score": 2 }
        ]
    })
}

pub(super) fn quality_context() -> Value {
    json!({
        "customer_feedback": [
            { "rating": 3, "issues": ["late"] },
            { "rating": 2, "issues": ["late", "rude"] },
            { "rating": 4, "issues": ["rude"] }
        ],
        "service_metrics": { "average_rating": 4.6, "average_response_time": 30 }
    })
}

pub(super) fn dispatcher() -> DecisionDispatcher {
    DecisionDispatcher::new(ExecutivePolicy::default())
}

#[derive(Default)]
enum Reply {
    Text(&'static str),
    #[default]
    Offline,
    Panic,
}

/// Language model stub replaying a fixed reply and counting prompts.
#[derive(Default)]
pub(super) struct ScriptedModel {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl ScriptedModel {
    pub(super) fn replying(reply: &'static str) -> Self {
        Self {
            reply: Reply::Text(reply),
            calls: Arc::default(),
        }
    }

    pub(super) fn offline() -> Self {
        Self::default()
    }

    pub(super) fn panicking() -> Self {
        Self {
            reply: Reply::Panic,
            calls: Arc::default(),
        }
    }

    pub(super) fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl LanguageModel for ScriptedModel {
    fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Reply::Text(reply) => Ok(reply.to_string()),
            Reply::Offline => Err(ModelError::Unavailable(
                "no credentials configured".to_string(),
            )),
            Reply::Panic => panic!("model client bug"),
        }
    }
}

pub(super) fn dispatcher_with_model(model: ScriptedModel) -> DecisionDispatcher {
    dispatcher().with_model_strategy(Arc::new(ModelBackedStrategy::new(model)))
}

pub(super) fn router() -> axum::Router {
    decision_router(Arc::new(dispatcher()))
}

pub(super) fn post_json(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serialize body"),
        ))
        .expect("build request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
