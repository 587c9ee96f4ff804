use std::sync::Arc;

use crate::error::PromptError;
use crate::transport::PromptTransport;
use crate::types::{PromptResult, WalletContext};
use crate::view::{PromptForm, View};

/// Where the prompt form is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPhase {
    /// No prompt text, nothing in flight.
    Idle,
    /// Prompt text present, nothing waiting to be shown.
    Editing,
    /// A submission is in flight.
    Pending,
    /// The latest submission returned a result.
    Resolved,
    /// The latest submission failed.
    Failed,
}

/// Outcome of feeding a completion back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Resolved,
    Failed,
    /// A newer submission exists; the completion was dropped.
    Stale,
}

/// One submitted prompt, ready to be sent.
///
/// Holds its own handle on the transport so the request can run while the
/// controller keeps taking edits and further submissions.
pub struct PendingRequest<T: ?Sized> {
    seq: u64,
    prompt: String,
    transport: Arc<T>,
}

impl<T: PromptTransport + ?Sized> PendingRequest<T> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub async fn send(self) -> Completion {
        let outcome = self.transport.fetch_prompt(&self.prompt).await;
        Completion {
            seq: self.seq,
            outcome,
        }
    }
}

/// A finished request, tagged with the submission it answers.
#[derive(Debug)]
pub struct Completion {
    seq: u64,
    outcome: Result<PromptResult, PromptError>,
}

impl Completion {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn outcome(&self) -> &Result<PromptResult, PromptError> {
        &self.outcome
    }
}

/// UI state behind the prompt page.
///
/// Holds the input text, the current result and the last error. Only the
/// completion of the most recent submission is applied; anything older is
/// reported as [`Applied::Stale`].
pub struct PromptController<T: ?Sized = dyn PromptTransport> {
    transport: Arc<T>,
    input: String,
    phase: PromptPhase,
    result: Option<PromptResult>,
    last_error: Option<String>,
    next_seq: u64,
    latest: Option<u64>,
    in_flight: bool,
}

impl<T: PromptTransport + ?Sized> PromptController<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            input: String::new(),
            phase: PromptPhase::Idle,
            result: None,
            last_error: None,
            next_seq: 0,
            latest: None,
            in_flight: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> PromptPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&PromptResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the latest submission is still waiting for its completion.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Submission is only disabled for empty input.
    pub fn can_submit(&self) -> bool {
        !self.input.is_empty()
    }

    /// Replace the prompt text. Does not cancel an in-flight request.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.phase = if self.input.is_empty() {
            PromptPhase::Idle
        } else {
            PromptPhase::Editing
        };
    }

    /// Start a submission for the current input, or `None` when it is empty.
    pub fn submit(&mut self) -> Option<PendingRequest<T>> {
        if !self.can_submit() {
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest = Some(seq);
        self.in_flight = true;
        self.phase = PromptPhase::Pending;

        tracing::debug!(seq, prompt = %self.input, "submitting prompt");

        Some(PendingRequest {
            seq,
            prompt: self.input.clone(),
            transport: Arc::clone(&self.transport),
        })
    }

    /// Fold a completion into the UI state.
    ///
    /// On failure the previous result stays on screen and the error is
    /// logged and kept for inspection.
    pub fn apply(&mut self, completion: Completion) -> Applied {
        if self.latest != Some(completion.seq) {
            tracing::debug!(
                seq = completion.seq,
                latest = ?self.latest,
                "dropping stale prompt completion"
            );
            return Applied::Stale;
        }

        self.in_flight = false;
        match completion.outcome {
            Ok(result) => {
                tracing::info!(
                    request_id = ?result.request_id.map(|id| id.to_string()),
                    tool = %result.metadata.tool,
                    "prompt resolved"
                );
                self.result = Some(result);
                self.last_error = None;
                self.phase = PromptPhase::Resolved;
                Applied::Resolved
            }
            Err(e) => {
                tracing::error!("Error fetching data: {e}");
                self.last_error = Some(e.to_string());
                self.phase = PromptPhase::Failed;
                Applied::Failed
            }
        }
    }

    /// Submit, wait for the response and apply it. `None` when the input is
    /// empty and nothing was sent.
    pub async fn submit_and_wait(&mut self) -> Option<Applied> {
        let pending = self.submit()?;
        let completion = pending.send().await;
        Some(self.apply(completion))
    }

    pub fn render(&self, wallet: &WalletContext) -> View {
        let Some(address) = wallet.display_address() else {
            return View::Disconnected;
        };

        View::Connected(PromptForm {
            address,
            input: self.input.clone(),
            submit_enabled: self.can_submit(),
            pending: self.in_flight,
            result_text: self.result.as_ref().map(|r| r.result.clone()),
        })
    }
}
