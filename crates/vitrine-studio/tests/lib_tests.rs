//! Tests relocated from the `integration_tests` module in `src/lib.rs`.
//!
//! They use `vitrine-test-utils`, which itself depends on this crate, so
//! inside the lib-test build they would see a second copy of the crate
//! whose `TextModel` trait is distinct from the one `ScriptedModel`
//! implements. As integration tests only one copy is linked and the
//! impls line up.

use std::sync::Arc;

use vitrine_studio::{RefinementRequest, StudioConfig, StudioSession, TextModel};
use vitrine_test_utils::{button_reply, ScriptedModel};

#[tokio::test]
async fn generate_then_refine_rewrites_history_in_place() {
    let first = button_reply("Buy");
    let second = button_reply("Buy now");
    let model = Arc::new(ScriptedModel::with_replies(&[&first, &second]));
    let mut session = StudioSession::new(model, StudioConfig::new());

    session.generate("a buy button").await.unwrap();
    let refined = session
        .refine(RefinementRequest::whole("change the label"))
        .await
        .unwrap();

    assert_eq!(refined.markup, "<button>Buy now</button>");
    assert_eq!(session.version(), 2);
    // the refinement replaced the matching entry instead of appending
    assert_eq!(session.history().len(), 1);
    assert_eq!(
        session.history().latest().unwrap().artifact.markup,
        "<button>Buy now</button>"
    );
}

#[tokio::test]
async fn refine_prompt_carries_the_current_artifact() {
    let first = button_reply("Buy");
    let second = button_reply("Buy now");
    let model = Arc::new(ScriptedModel::with_replies(&[&first, &second]));
    let mut session = StudioSession::new(Arc::clone(&model) as Arc<dyn TextModel>, StudioConfig::new());

    session.generate("a buy button").await.unwrap();
    session
        .refine(RefinementRequest::whole("change the label"))
        .await
        .unwrap();

    let prompts = model.prompts().await;
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("<button>Buy</button>"));
    assert!(prompts[1].contains("change the label"));
}
