// Resolver tests - ordered candidate scan with a fake transport
//
// The transport records every probe so the tests can assert that the scan
// stops at the first success and never probes past it.

use async_trait::async_trait;
use covercheck::config::ModelInfo;
use covercheck::infrastructure::model::{
    ModelError, ModelReply, ModelRequest, ModelTransport, resolver,
};
use std::sync::{Arc, Mutex};

/// Transport that fails for configured model names and logs every probe
struct FakeTransport {
    failing: Vec<&'static str>,
    probes: Mutex<Vec<String>>,
}

impl FakeTransport {
    fn failing(models: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            failing: models.to_vec(),
            probes: Mutex::new(Vec::new()),
        })
    }

    fn probed(&self) -> Vec<String> {
        self.probes.lock().expect("probe log").clone()
    }
}

#[async_trait]
impl ModelTransport for FakeTransport {
    fn id(&self) -> &str {
        "fake"
    }

    async fn generate(
        &self,
        model: &str,
        _request: &ModelRequest,
    ) -> Result<ModelReply, ModelError> {
        self.probes
            .lock()
            .expect("probe log")
            .push(model.to_string());
        if self.failing.contains(&model) {
            Err(ModelError::invalid_response("fake", "model is down"))
        } else {
            Ok(ModelReply::text("ok"))
        }
    }
}

fn candidates(names: &[&str]) -> Vec<ModelInfo> {
    names.iter().map(|name| ModelInfo::named(*name)).collect()
}

#[tokio::test]
async fn binds_first_succeeding_candidate_in_order() {
    let transport = FakeTransport::failing(&["bad-model"]);
    let list = candidates(&["bad-model", "good-model", "never-tried"]);

    let resolved = resolver::resolve(transport.clone(), &list)
        .await
        .expect("resolution");

    assert_eq!(resolved.model(), "good-model");
    // Exactly two probes: the failure and the success; nothing after
    assert_eq!(transport.probed(), vec!["bad-model", "good-model"]);
}

#[tokio::test]
async fn first_candidate_success_probes_nothing_else() {
    let transport = FakeTransport::failing(&[]);
    let list = candidates(&["first", "second"]);

    let resolved = resolver::resolve(transport.clone(), &list)
        .await
        .expect("resolution");

    assert_eq!(resolved.model(), "first");
    assert_eq!(transport.probed(), vec!["first"]);
}

#[tokio::test]
async fn exhausted_candidate_list_is_a_single_failure() {
    let transport = FakeTransport::failing(&["a", "b", "c"]);
    let list = candidates(&["a", "b", "c"]);

    let err = resolver::resolve(transport.clone(), &list)
        .await
        .expect_err("must fail");

    assert!(matches!(err, ModelError::NoUsableModel { attempted: 3 }));
    // Every candidate was probed exactly once
    assert_eq!(transport.probed(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn empty_candidate_list_fails_without_probing() {
    let transport = FakeTransport::failing(&[]);

    let err = resolver::resolve(transport.clone(), &[])
        .await
        .expect_err("must fail");

    assert!(matches!(err, ModelError::NoUsableModel { attempted: 0 }));
    assert!(transport.probed().is_empty());
}

#[tokio::test]
async fn resolved_model_is_reused_without_revalidation() {
    let transport = FakeTransport::failing(&[]);
    let list = candidates(&["pinned"]);

    let resolved = resolver::resolve(transport.clone(), &list)
        .await
        .expect("resolution");
    assert!(format!("{resolved:?}").contains("pinned"));

    // Subsequent generates go straight through; no second probe round
    let reply = resolved
        .generate(&ModelRequest::text("hello"))
        .await
        .expect("generate");
    assert_eq!(reply.text, "ok");
    assert_eq!(transport.probed(), vec!["pinned", "pinned"]);
}
