//! Session orchestration
//!
//! [`StudioSession`] ties the pieces together: it builds prompts, sends
//! them through the model provider, recovers and validates artifacts,
//! keeps the preview and registry current, and maintains history and
//! chat. One session, one user, one artifact at a time.
//!
//! Refinement is split into `begin` and `complete` so a host can hold
//! the model call however it likes. Beginning a refinement records the
//! artifact version it targets; completing one first checks that the
//! session is still at that version and discards the reply as
//! superseded otherwise. Generating or restoring bumps the version, so
//! a reply from before either of those can never clobber newer work.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use vitrine_artifact::{extract, validate, UiArtifact};
use vitrine_preview::{assemble, AssembledDocument, ElementRecord};

use crate::chat::ChatThread;
use crate::config::StudioConfig;
use crate::error::StudioError;
use crate::history::SessionHistory;
use crate::model::{ModelError, TextModel};
use crate::patch::{self, RefineTarget, RefinementRequest};
use crate::prompt;

/// Unique session identifier, carried on every log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh identifier.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A refinement that has been started but whose reply has not landed.
///
/// Snapshot of everything the completion step needs: the built prompt,
/// the request, the artifact it was built against, and the version it
/// targets. Consumed by [`StudioSession::complete_refinement`] or
/// [`StudioSession::abandon_refinement`].
#[derive(Debug, Clone)]
pub struct PendingRefinement {
    prompt: String,
    request: RefinementRequest,
    targeted_version: u64,
    baseline: UiArtifact,
}

impl PendingRefinement {
    /// The prompt to send to the model.
    #[inline]
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The artifact version this refinement targets.
    #[inline]
    #[must_use]
    pub fn targeted_version(&self) -> u64 {
        self.targeted_version
    }

    /// The instruction being applied.
    #[inline]
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.request.instruction
    }
}

/// One user's studio session.
#[derive(Debug)]
pub struct StudioSession {
    id: SessionId,
    config: StudioConfig,
    model: Arc<dyn TextModel>,
    artifact: Option<UiArtifact>,
    version: u64,
    history: SessionHistory,
    chat: ChatThread,
    preview: Option<AssembledDocument>,
    selection: Option<ElementRecord>,
    instrumented: bool,
    busy: bool,
}

impl StudioSession {
    /// Open a session over a model provider.
    #[must_use]
    pub fn new(model: Arc<dyn TextModel>, config: StudioConfig) -> Self {
        let id = SessionId::new();
        info!(session = %id, model = model.name(), "session opened");
        Self {
            id,
            instrumented: config.instrumented_preview,
            history: SessionHistory::new(config.max_history_entries),
            chat: ChatThread::new(config.max_chat_turns),
            config,
            model,
            artifact: None,
            version: 0,
            preview: None,
            selection: None,
            busy: false,
        }
    }

    /// Generate a component from a natural-language request.
    ///
    /// On success the new artifact replaces the current one, history
    /// gains an entry, the version bumps, and the preview is
    /// re-assembled. On failure everything stays as it was.
    ///
    /// # Errors
    /// [`StudioError::Busy`] while a refinement is outstanding; model,
    /// extraction, and validation errors otherwise.
    pub async fn generate(&mut self, request: &str) -> Result<&UiArtifact, StudioError> {
        if self.busy {
            return Err(StudioError::Busy);
        }
        let prompt = prompt::generation_prompt(request);
        let reply = self.complete_checked(&prompt).await?;
        let artifact = validate(extract(&reply)?)?;

        self.history.record(request, artifact.clone());
        let fingerprint = artifact.fingerprint();
        self.install(artifact);
        info!(
            session = %self.id,
            version = self.version,
            fingerprint = %fingerprint.short(),
            "generated artifact"
        );
        self.current()
    }

    /// Start a refinement: build the prompt and snapshot the version it
    /// targets. Marks the session busy until completed or abandoned.
    ///
    /// # Errors
    /// [`StudioError::Busy`] when one is already outstanding,
    /// [`StudioError::NoArtifact`] before the first generation.
    pub fn begin_refinement(
        &mut self,
        request: RefinementRequest,
    ) -> Result<PendingRefinement, StudioError> {
        if self.busy {
            return Err(StudioError::Busy);
        }
        let baseline = self.current()?.clone();
        let prompt = match &request.target {
            RefineTarget::Whole => prompt::refine_prompt(&baseline, &request.instruction),
            RefineTarget::Fragment { snippet, .. } => {
                prompt::element_refine_prompt(snippet, &request.instruction)
            }
        };
        self.busy = true;
        debug!(session = %self.id, version = self.version, "refinement started");
        Ok(PendingRefinement {
            prompt,
            request,
            targeted_version: self.version,
            baseline,
        })
    }

    /// Land a refinement reply.
    ///
    /// The version gate runs first: a reply whose refinement targeted an
    /// older version is discarded untouched. Otherwise the reply is
    /// applied in the pending request's mode, the refined artifact is
    /// reconciled into history, and the preview is re-assembled.
    ///
    /// # Errors
    /// [`StudioError::Superseded`] when the version moved on; patch
    /// errors when the reply is unusable. Either way the previous
    /// artifact is retained.
    pub fn complete_refinement(
        &mut self,
        pending: PendingRefinement,
        reply: &str,
    ) -> Result<&UiArtifact, StudioError> {
        self.busy = false;
        if pending.targeted_version != self.version {
            warn!(
                session = %self.id,
                targeted = pending.targeted_version,
                current = self.version,
                "discarding superseded refinement reply"
            );
            return Err(StudioError::Superseded {
                targeted: pending.targeted_version,
                current: self.version,
            });
        }

        let refined = match &pending.request.target {
            RefineTarget::Whole => patch::apply_whole(reply)?,
            RefineTarget::Fragment { snippet, .. } => {
                patch::apply_fragment(&pending.baseline, snippet, reply)?
            }
        };

        self.history.reconcile(&pending.baseline, refined.clone());
        let fingerprint = refined.fingerprint();
        self.install(refined);
        info!(
            session = %self.id,
            version = self.version,
            fingerprint = %fingerprint.short(),
            "refinement applied"
        );
        self.current()
    }

    /// Drop a started refinement without a reply, e.g. after a transport
    /// failure. Clears the busy flag; nothing else changes.
    pub fn abandon_refinement(&mut self, pending: PendingRefinement) {
        debug!(
            session = %self.id,
            targeted = pending.targeted_version,
            "refinement abandoned"
        );
        self.busy = false;
    }

    /// Refine in one call: begin, send the prompt, complete.
    ///
    /// # Errors
    /// Everything [`Self::begin_refinement`] and
    /// [`Self::complete_refinement`] can return, plus model errors.
    pub async fn refine(&mut self, request: RefinementRequest) -> Result<&UiArtifact, StudioError> {
        let pending = self.begin_refinement(request)?;
        let reply = match self.complete_checked(pending.prompt()).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(session = %self.id, error = %err, "model call failed during refinement");
                self.abandon_refinement(pending);
                return Err(err);
            }
        };
        self.complete_refinement(pending, &reply)
    }

    /// Refine the currently selected element with an instruction.
    ///
    /// # Errors
    /// [`StudioError::NoSelection`] when nothing is selected; otherwise
    /// as [`Self::refine`].
    pub async fn refine_selected(&mut self, instruction: &str) -> Result<&UiArtifact, StudioError> {
        let selection = self.selection.clone().ok_or(StudioError::NoSelection)?;
        let request = RefinementRequest::fragment(selection.id, selection.fragment, instruction);
        self.refine(request).await
    }

    /// Resolve a clicked identifier against the current preview and
    /// remember it as the selection. A miss (stale identifier, no
    /// preview, unparseable text) clears the selection and returns
    /// `None`.
    pub fn select_element(&mut self, id_text: &str) -> Option<&ElementRecord> {
        let record = self
            .preview
            .as_ref()
            .and_then(|preview| preview.registry.resolve(id_text))
            .cloned();
        match &record {
            Some(found) => debug!(session = %self.id, id = %found.id, "element selected"),
            None => debug!(session = %self.id, id_text, "selection missed"),
        }
        self.selection = record;
        self.selection.as_ref()
    }

    /// Forget the current selection.
    #[inline]
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Ask the assistant a question about the current artifact.
    ///
    /// The question and the answer are appended to the chat thread.
    ///
    /// # Errors
    /// [`StudioError::NoArtifact`] before the first generation; model
    /// errors otherwise. A failed turn leaves the thread unchanged.
    pub async fn ask(&mut self, question: &str) -> Result<String, StudioError> {
        let artifact = self.current()?.clone();
        let prompt = prompt::chat_prompt(&artifact, &self.chat, question);
        let answer = self.complete_checked(&prompt).await?;

        self.chat.push_user(question);
        self.chat.push_assistant(answer.as_str());
        info!(session = %self.id, turns = self.chat.len(), "chat turn answered");
        Ok(answer)
    }

    /// Re-adopt a history entry's artifact as current.
    ///
    /// Bumps the version (superseding any outstanding refinement) and
    /// re-assembles the preview; history itself is unchanged.
    ///
    /// # Errors
    /// [`StudioError::HistoryOutOfRange`] for an index past the end.
    pub fn restore(&mut self, index: usize) -> Result<&UiArtifact, StudioError> {
        let len = self.history.len();
        let entry = self
            .history
            .get(index)
            .ok_or(StudioError::HistoryOutOfRange { index, len })?;
        let artifact = entry.artifact.clone();
        self.install(artifact);
        info!(session = %self.id, index, version = self.version, "restored from history");
        self.current()
    }

    /// Toggle preview instrumentation and re-assemble when it changes.
    /// The artifact and version stay as they are.
    pub fn set_instrumented(&mut self, instrumented: bool) {
        if self.instrumented == instrumented {
            return;
        }
        self.instrumented = instrumented;
        if let Some(artifact) = &self.artifact {
            self.preview = Some(assemble(artifact, instrumented));
        }
        debug!(session = %self.id, instrumented, "instrumentation toggled");
    }

    /// Export the current artifact in its wire shape, identifier-free by
    /// construction.
    ///
    /// # Errors
    /// [`StudioError::NoArtifact`] before the first generation.
    pub fn export_wire_json(&self) -> Result<String, StudioError> {
        self.current().map(UiArtifact::to_wire_json)
    }

    /// Session identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Session configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// The current artifact, if one has been generated.
    #[inline]
    #[must_use]
    pub fn artifact(&self) -> Option<&UiArtifact> {
        self.artifact.as_ref()
    }

    /// The current assembled preview, if one exists.
    #[inline]
    #[must_use]
    pub fn preview(&self) -> Option<&AssembledDocument> {
        self.preview.as_ref()
    }

    /// Generation history.
    #[inline]
    #[must_use]
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// The chat thread.
    #[inline]
    #[must_use]
    pub fn chat(&self) -> &ChatThread {
        &self.chat
    }

    /// The remembered selection, if any.
    #[inline]
    #[must_use]
    pub fn selection(&self) -> Option<&ElementRecord> {
        self.selection.as_ref()
    }

    /// Current artifact version. Starts at 0; each install bumps it.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether a refinement is outstanding.
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether previews are assembled with inspection enabled.
    #[inline]
    #[must_use]
    pub fn is_instrumented(&self) -> bool {
        self.instrumented
    }

    /// Adopt an artifact as current: bump the version, rebuild the
    /// preview, drop the selection.
    fn install(&mut self, artifact: UiArtifact) {
        self.version += 1;
        self.preview = Some(assemble(&artifact, self.instrumented));
        self.artifact = Some(artifact);
        self.selection = None;
    }

    fn current(&self) -> Result<&UiArtifact, StudioError> {
        self.artifact.as_ref().ok_or(StudioError::NoArtifact)
    }

    async fn complete_checked(&self, prompt: &str) -> Result<String, StudioError> {
        let reply = self.model.complete(prompt).await?;
        if reply.trim().is_empty() {
            return Err(ModelError::EmptyReply.into());
        }
        Ok(reply)
    }
}

