//! Recording interceptor.
//!
//! `Idle --start(name)--> Active --stop()--> Idle`. While active, every
//! dispatched method outside the skip set (`ping` plus the meta-commands)
//! becomes one [`RecordedStep`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use chrono::DateTime;
use chrono::Utc;
use deskpilot_protocol::ContextInfo;
use deskpilot_protocol::ParamBag;
use deskpilot_protocol::RecordedStep;
use deskpilot_protocol::Recording;
use deskpilot_protocol::Response;
use deskpilot_protocol::RpcResult;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::error::RecorderError;
use crate::ports::Clock;
use crate::store::RecipeStore;
use crate::store::validate_name;

/// Methods served by the agent itself rather than the dispatcher.
pub const META_COMMANDS: &[&str] = &[
    "recordingStart",
    "recordingStop",
    "recordingStatus",
    "listRecordings",
    "getRecording",
    "saveRecipe",
    "getRecipe",
    "listRecipes",
    "deleteRecipe",
    "runRecipe",
];

pub fn is_meta_command(method: &str) -> bool {
    META_COMMANDS.contains(&method)
}

fn is_skipped(method: &str) -> bool {
    method == "ping" || is_meta_command(method)
}

/// Where the stopped recording ended up. Never turned into an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoppedRecording {
    pub recording: Recording,
    pub persisted: PersistOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordingStatus {
    pub name: String,
    pub step_count: usize,
    pub elapsed: Duration,
}

struct ActiveSession {
    name: String,
    started_at: DateTime<Utc>,
    started: Instant,
    steps: Vec<RecordedStep>,
}

enum RecorderState {
    Idle,
    Active(ActiveSession),
}

pub struct Recorder {
    store: Arc<RecipeStore>,
    clock: Arc<dyn Clock>,
    state: RecorderState,
}

impl Recorder {
    pub fn new(store: Arc<RecipeStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: RecorderState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, RecorderState::Active(_))
    }

    pub fn start(&mut self, name: &str) -> Result<(), RecorderError> {
        if let RecorderState::Active(session) = &self.state {
            return Err(RecorderError::AlreadyActive(session.name.clone()));
        }
        validate_name(name).map_err(|_| RecorderError::InvalidName(name.to_string()))?;

        self.state = RecorderState::Active(ActiveSession {
            name: name.to_string(),
            started_at: self.clock.wall_time(),
            started: self.clock.now(),
            steps: Vec::new(),
        });
        info!(name = name, "Recording started");
        Ok(())
    }

    /// Captures one dispatch. No-op while idle or for skipped methods.
    pub fn observe(&mut self, method: &str, params: &ParamBag, response: &Response) {
        let RecorderState::Active(session) = &mut self.state else {
            return;
        };
        if is_skipped(method) {
            return;
        }

        session.steps.push(RecordedStep {
            timestamp: self.clock.wall_time(),
            method: method.to_string(),
            params: params.clone(),
            success: response.is_success(),
            description: describe(response),
            context: context_of(response),
        });
        debug!(method = method, steps = session.steps.len(), "Recorded step");
    }

    /// Ends the session and persists it best-effort. The recording is
    /// returned whatever happened on disk.
    pub fn stop(&mut self) -> Option<StoppedRecording> {
        let session = match std::mem::replace(&mut self.state, RecorderState::Idle) {
            RecorderState::Idle => return None,
            RecorderState::Active(session) => session,
        };

        let recording = Recording {
            name: session.name,
            recorded_at: session.started_at,
            duration: self.clock.elapsed(session.started).as_secs_f64(),
            steps: session.steps,
        };

        let persisted = match self.store.save_recording(&recording) {
            Ok(path) => {
                info!(
                    name = %recording.name,
                    steps = recording.steps.len(),
                    path = %path.display(),
                    "Recording stopped"
                );
                PersistOutcome::Saved(path)
            }
            Err(e) => {
                warn!(name = %recording.name, error = %e, "Failed to persist recording");
                PersistOutcome::Failed(e.to_string())
            }
        };

        Some(StoppedRecording {
            recording,
            persisted,
        })
    }

    pub fn status(&self) -> Option<RecordingStatus> {
        match &self.state {
            RecorderState::Idle => None,
            RecorderState::Active(session) => Some(RecordingStatus {
                name: session.name.clone(),
                step_count: session.steps.len(),
                elapsed: self.clock.elapsed(session.started),
            }),
        }
    }
}

fn describe(response: &Response) -> Option<String> {
    match response.result() {
        Some(RpcResult::Message(text)) => Some(text.clone()),
        Some(RpcResult::ActionResult(action)) => Some(action.description.clone()),
        _ => response.error_info().map(|e| e.message.clone()),
    }
}

pub(crate) fn context_of(response: &Response) -> Option<ContextInfo> {
    let context = match response.result() {
        Some(RpcResult::ActionResult(action)) => action.context.as_ref(),
        Some(RpcResult::Context(context)) => Some(context),
        _ => None,
    };
    context.filter(|c| !c.is_empty()).cloned()
}
