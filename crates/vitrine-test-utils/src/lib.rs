//! Testing utilities for the Vitrine workspace
//!
//! Scripted model providers, artifact fixtures, and logging setup
//! shared across crate test suites.

#![allow(missing_docs)]

use std::collections::VecDeque;

use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use vitrine_artifact::UiArtifact;
use vitrine_studio::{ModelError, TextModel};

/// Replays a scripted list of replies in order and records every prompt
/// it is sent. Runs dry with a request failure.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|reply| (*reply).to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub async fn push_reply(&self, reply: &str) {
        self.replies.lock().await.push_back(reply.to_string());
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn remaining_replies(&self) -> usize {
        self.replies.lock().await.len()
    }
}

#[async_trait::async_trait]
impl TextModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().await.push(prompt.to_string());
        self.replies
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| ModelError::request_failed("scripted model ran out of replies"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Fails every completion with the same error.
#[derive(Debug, Clone)]
pub struct FailingModel {
    error: ModelError,
}

impl FailingModel {
    pub fn new(error: ModelError) -> Self {
        Self { error }
    }
}

#[async_trait::async_trait]
impl TextModel for FailingModel {
    async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub fn button_artifact(label: &str) -> UiArtifact {
    UiArtifact::new(format!("<button>{label}</button>"))
        .with_styles("button { color: rebeccapurple; }")
}

pub fn button_reply(label: &str) -> String {
    button_artifact(label).to_wire_json()
}

pub fn card_artifact() -> UiArtifact {
    UiArtifact::new("<div class=\"card\"><h2>Plan</h2><p>Monthly</p><button>Choose</button></div>")
        .with_styles(".card { padding: 1rem; }")
        .with_script("document.querySelector('button').addEventListener('click', () => {});")
        .with_external_script("https://cdn.tailwindcss.com")
}

pub fn card_reply() -> String {
    card_artifact().to_wire_json()
}

pub fn fenced(reply: &str) -> String {
    format!("```html\n{reply}\n```")
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .try_init();
}
