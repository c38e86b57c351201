use std::sync::Arc;

use deskpilot_protocol::ErrorCode;
use deskpilot_protocol::Request;
use deskpilot_protocol::Response;
use tracing::debug;

use crate::handlers;
use crate::ports::ActionExecutor;
use crate::ports::StateProvider;

/// Routes a request to its handler by exact, case-sensitive method name.
///
/// Holds nothing but shared handles to the collaborators, so dispatching is
/// free of side effects beyond the ones the collaborators perform.
#[derive(Clone)]
pub struct Dispatcher {
    state: Arc<dyn StateProvider>,
    actions: Arc<dyn ActionExecutor>,
}

impl Dispatcher {
    pub fn new(state: Arc<dyn StateProvider>, actions: Arc<dyn ActionExecutor>) -> Self {
        Self { state, actions }
    }

    pub fn state(&self) -> &dyn StateProvider {
        self.state.as_ref()
    }

    pub fn dispatch(&self, request: &Request) -> Response {
        debug!(method = %request.method, id = request.id, "Dispatching");
        let state = self.state.as_ref();
        let actions = self.actions.as_ref();

        match request.method.as_str() {
            "ping" => Response::message(request.id, "pong"),
            "getState" => handlers::state::handle_get_state(state, request),
            "getAppState" => handlers::state::handle_get_app_state(state, request),
            "findElement" | "findElements" => handlers::state::handle_find_elements(state, request),
            "getContext" => handlers::state::handle_get_context(state, request),
            "refresh" => handlers::state::handle_refresh(state, request),
            "click" => handlers::input::handle_click(actions, request),
            "type" => handlers::input::handle_type(actions, request),
            "press" => handlers::input::handle_press(actions, request),
            "hotkey" => handlers::input::handle_hotkey(actions, request),
            "scroll" => handlers::input::handle_scroll(actions, request),
            "focus" => handlers::input::handle_focus(actions, request),
            other => Response::error(
                request.id,
                ErrorCode::MethodNotFound,
                format!("Method not found: {}", other),
            ),
        }
    }
}
