//! Functional tests for the full session flow.
//!
//! Core guarantees exercised here:
//! - Generate installs an artifact, a preview, and a history entry; a
//!   failed request leaves all three untouched.
//! - Element selection resolves against the current preview and feeds a
//!   single-element refinement that splices exactly one element.
//! - Whole-component refinement rewrites the matching history entry in
//!   place instead of appending a near-duplicate.
//! - A refinement reply that targets a version the session has moved
//!   past is discarded with an explicit error.
//! - Exported artifacts never carry preview identifiers; assembled
//!   previews always do.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use vitrine_studio::{
    ModelError, RefinementRequest, StudioConfig, StudioError, StudioSession, TextModel,
};
use vitrine_test_utils::{
    button_reply, card_reply, fenced, init_logging, FailingModel, ScriptedModel,
};

fn session_over(model: Arc<ScriptedModel>) -> StudioSession {
    StudioSession::new(model as Arc<dyn TextModel>, StudioConfig::new())
}

/// Tenet: the preview is the only place identifiers exist.
///
/// A user who selects an element, refines it, and exports the result
/// must get back clean markup: the splice happens on freshly annotated
/// markup and every identifier is stripped before the artifact is
/// rebuilt.
#[tokio::test]
async fn select_refine_export_round_trip() {
    init_logging();
    let model = Arc::new(ScriptedModel::with_replies(&[
        &card_reply(),
        "<button class=\"cta\">Choose now</button>",
    ]));
    let mut session = session_over(Arc::clone(&model));

    session.generate("a pricing card").await.unwrap();

    // pre-order identifiers: div 0, h2 1, p 2, button 3
    let selection = session.select_element("3").cloned().unwrap();
    assert_eq!(selection.fragment, "<button data-id=\"3\">Choose</button>");

    let refined = session.refine_selected("make it a call to action").await.unwrap();
    assert_eq!(
        refined.markup,
        "<div class=\"card\"><h2>Plan</h2><p>Monthly</p><button class=\"cta\">Choose now</button></div>"
    );
    // the artifact changed, so the old selection is gone
    assert!(session.selection().is_none());

    // the element prompt carried the annotated snippet
    let prompts = model.prompts().await;
    assert!(prompts[1].contains("data-id=\"3\""));
    assert!(prompts[1].contains("make it a call to action"));

    // preview keeps identifiers, export does not
    let preview = session.preview().unwrap();
    assert!(preview.document.contains("data-id=\"0\""));
    assert!(preview.document.contains("data-id=\"3\""));
    let exported = session.export_wire_json().unwrap();
    assert!(!exported.contains("data-id"));
    assert!(exported.contains("Choose now"));
}

#[tokio::test]
async fn fenced_element_reply_is_cleaned_before_splicing() {
    let reply = fenced("<button id=\"go\">Choose</button>");
    let model = Arc::new(ScriptedModel::with_replies(&[&card_reply(), &reply]));
    let mut session = session_over(model);

    session.generate("a pricing card").await.unwrap();
    session.select_element("3");
    let refined = session.refine_selected("give it an id").await.unwrap();

    assert!(refined.markup.contains("<button id=\"go\">Choose</button>"));
    assert!(!refined.markup.contains("```"));
}

/// Tenet: refining does not pollute history.
///
/// Refinement replaces the most recent entry whose content matches what
/// was refined; unrelated entries keep their place and their request
/// text survives the rewrite.
#[tokio::test]
async fn whole_refinement_rewrites_matching_history_entry() {
    let one = button_reply("One");
    let two = button_reply("Two");
    let two_refined = button_reply("Two refined");
    let model = Arc::new(ScriptedModel::with_replies(&[&one, &two, &two_refined]));
    let mut session = session_over(model);

    session.generate("first button").await.unwrap();
    session.generate("second button").await.unwrap();
    session
        .refine(RefinementRequest::whole("refine the second"))
        .await
        .unwrap();

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history.get(0).unwrap().artifact.markup, "<button>One</button>");
    assert_eq!(
        history.get(1).unwrap().artifact.markup,
        "<button>Two refined</button>"
    );
    assert_eq!(history.get(1).unwrap().request, "second button");
}

/// Tenet: a stale reply can never clobber newer work.
///
/// Restoring from history while a refinement is in flight moves the
/// session version; the late reply is rejected, nothing changes, and
/// the session is free for the next request.
#[tokio::test]
async fn restore_supersedes_inflight_refinement() {
    let one = button_reply("One");
    let red = button_reply("Red");
    let two = button_reply("Two");
    let model = Arc::new(ScriptedModel::with_replies(&[&one, &two]));
    let mut session = session_over(model);

    session.generate("a button").await.unwrap();
    let pending = session
        .begin_refinement(RefinementRequest::whole("make it red"))
        .unwrap();
    assert!(session.is_busy());

    session.restore(0).unwrap();
    let err = session.complete_refinement(pending, &red).unwrap_err();
    assert!(matches!(
        err,
        StudioError::Superseded { targeted: 1, current: 2 }
    ));

    assert!(!session.is_busy());
    assert_eq!(session.artifact().unwrap().markup, "<button>One</button>");
    assert_eq!(session.history().len(), 1);

    // the session is usable again immediately
    let refined = session
        .refine(RefinementRequest::whole("try again"))
        .await
        .unwrap();
    assert_eq!(refined.markup, "<button>Two</button>");
    assert_eq!(session.version(), 3);
}

#[tokio::test]
async fn instrumentation_toggle_keeps_pending_refinement_valid() {
    let model = Arc::new(ScriptedModel::with_replies(&[&card_reply()]));
    let mut session = session_over(model);

    session.generate("a pricing card").await.unwrap();
    assert!(session.preview().unwrap().document.contains("elementClicked"));

    let selection = session.select_element("3").cloned().unwrap();
    let pending = session
        .begin_refinement(RefinementRequest::fragment(
            selection.id,
            selection.fragment,
            "emphasize it",
        ))
        .unwrap();

    // toggling instrumentation re-assembles but does not move the version
    session.set_instrumented(false);
    assert!(!session.preview().unwrap().document.contains("elementClicked"));

    let refined = session
        .complete_refinement(pending, "<button class=\"cta\">Choose</button>")
        .unwrap();
    assert!(refined.markup.contains("class=\"cta\""));
    assert!(!session.preview().unwrap().document.contains("elementClicked"));
}

#[tokio::test]
async fn chat_prompt_carries_code_context_and_prior_turns() {
    let model = Arc::new(ScriptedModel::with_replies(&[
        &card_reply(),
        "Use a stronger contrast on the button.",
        "Set the heading to 1.5rem.",
    ]));
    let mut session = session_over(Arc::clone(&model));

    session.generate("a pricing card").await.unwrap();
    let first = session.ask("how can I improve contrast?").await.unwrap();
    assert_eq!(first, "Use a stronger contrast on the button.");
    session.ask("and the heading size?").await.unwrap();

    let prompts = model.prompts().await;
    assert!(prompts[2].contains("<div class=\"card\">"));
    assert!(prompts[2].contains("- User: how can I improve contrast?"));
    assert!(prompts[2].contains("- Assistant: Use a stronger contrast on the button."));
    assert!(prompts[2].contains("and the heading size?"));
    assert_eq!(session.chat().len(), 4);
}

#[tokio::test]
async fn model_failure_mid_refinement_frees_the_session() {
    let one = button_reply("One");
    let model = Arc::new(ScriptedModel::with_replies(&[&one]));
    let mut session = session_over(model);

    session.generate("a button").await.unwrap();
    let err = session
        .refine(RefinementRequest::whole("tweak"))
        .await
        .unwrap_err();

    assert!(matches!(err, StudioError::Model(ModelError::RequestFailed(_))));
    assert!(!session.is_busy());
    assert_eq!(session.artifact().unwrap().markup, "<button>One</button>");
    assert_eq!(session.version(), 1);
}

#[tokio::test]
async fn transport_errors_surface_as_retryable() {
    let model = Arc::new(FailingModel::new(ModelError::Timeout { duration_secs: 30 }));
    let mut session = StudioSession::new(model, StudioConfig::new());

    let err = session.generate("a button").await.unwrap_err();
    assert!(err.is_retryable());
    assert!(session.artifact().is_none());
    assert!(session.preview().is_none());
}
