use std::sync::Arc;
use std::sync::Mutex;

use deskpilot_protocol::ErrorCode;
use deskpilot_protocol::Request;
use deskpilot_protocol::Response;
use deskpilot_protocol::decode_request;
use deskpilot_protocol::encode_response;
use tracing::warn;

use crate::config::AgentConfig;
use crate::handlers::recording as meta;
use crate::observer::RefreshScope;
use crate::observer::StateObserver;
use crate::ports::ActionExecutor;
use crate::ports::Clock;
use crate::ports::Notification;
use crate::ports::StateProvider;
use crate::ports::SystemClock;
use crate::recorder::Recorder;
use crate::recorder::is_meta_command;
use crate::router::Dispatcher;
use crate::store::RecipeStore;
use crate::sync::mutex_lock_or_recover;

/// Session context: the dispatcher plus everything that outlives a request.
///
/// Meta-commands are served here; every other method goes to the
/// [`Dispatcher`]. Each handled request is then offered to the recorder.
pub struct Agent {
    dispatcher: Dispatcher,
    recorder: Recorder,
    store: Arc<RecipeStore>,
    observer: Option<StateObserver>,
}

impl Agent {
    pub fn new(
        state: Arc<dyn StateProvider>,
        actions: Arc<dyn ActionExecutor>,
        store: Arc<RecipeStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(state, actions),
            recorder: Recorder::new(Arc::clone(&store), clock),
            store,
            observer: None,
        }
    }

    pub fn from_config(
        config: &AgentConfig,
        state: Arc<dyn StateProvider>,
        actions: Arc<dyn ActionExecutor>,
    ) -> Self {
        let store = Arc::new(RecipeStore::from_config(config));
        Self::new(state, actions, store, Arc::new(SystemClock))
    }

    pub fn with_observer(mut self, observer: StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn observer_mut(&mut self) -> Option<&mut StateObserver> {
        self.observer.as_mut()
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    /// Decodes, handles and encodes one request. Undecodable input gets an
    /// `invalidParams` response addressed to id 0.
    pub fn handle_bytes(&mut self, bytes: &[u8]) -> Vec<u8> {
        let response = match decode_request(bytes) {
            Ok(request) => self.handle(request),
            Err(e) => {
                warn!(error = %e, line = e.line(), "Rejected undecodable request");
                Response::error(0, ErrorCode::InvalidParams, format!("Invalid request: {}", e))
            }
        };
        encode_response(&response)
    }

    pub fn handle(&mut self, request: Request) -> Response {
        let response = if is_meta_command(&request.method) {
            self.route_meta(&request)
        } else {
            self.dispatcher.dispatch(&request)
        };
        self.recorder.observe(&request.method, request.params(), &response);
        response
    }

    /// Applies a notification when an observer is attached.
    pub fn notify(&mut self, notification: &Notification) -> Option<RefreshScope> {
        let observer = self.observer.as_ref()?;
        Some(observer.handle(self.dispatcher.state(), notification))
    }

    fn route_meta(&mut self, request: &Request) -> Response {
        let store = self.store.as_ref();
        match request.method.as_str() {
            "recordingStart" => meta::handle_recording_start(&mut self.recorder, request),
            "recordingStop" => meta::handle_recording_stop(&mut self.recorder, request),
            "recordingStatus" => meta::handle_recording_status(&self.recorder, request),
            "listRecordings" => meta::handle_list_recordings(store, request),
            "getRecording" => meta::handle_get_recording(store, request),
            "saveRecipe" => meta::handle_save_recipe(store, request),
            "getRecipe" => meta::handle_get_recipe(store, request),
            "listRecipes" => meta::handle_list_recipes(store, request),
            "deleteRecipe" => meta::handle_delete_recipe(store, request),
            "runRecipe" => meta::handle_run_recipe(store, &self.dispatcher, request),
            other => Response::error(
                request.id,
                ErrorCode::MethodNotFound,
                format!("Method not found: {}", other),
            ),
        }
    }
}

/// Serializes access to one [`Agent`]: requests and notifications take the
/// same lock, so at most one dispatch is in flight.
#[derive(Clone)]
pub struct SharedAgent {
    inner: Arc<Mutex<Agent>>,
}

impl SharedAgent {
    pub fn new(agent: Agent) -> Self {
        Self {
            inner: Arc::new(Mutex::new(agent)),
        }
    }

    pub fn handle_bytes(&self, bytes: &[u8]) -> Vec<u8> {
        mutex_lock_or_recover(&self.inner).handle_bytes(bytes)
    }

    pub fn handle(&self, request: Request) -> Response {
        mutex_lock_or_recover(&self.inner).handle(request)
    }

    pub fn notify(&self, notification: &Notification) -> Option<RefreshScope> {
        mutex_lock_or_recover(&self.inner).notify(notification)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Agent) -> R) -> R {
        f(&mut mutex_lock_or_recover(&self.inner))
    }
}
