use deskpilot_protocol::ContextInfo;
use deskpilot_protocol::ErrorCode;
use deskpilot_protocol::Request;
use deskpilot_protocol::Response;
use deskpilot_protocol::RpcResult;
use deskpilot_protocol::params::AppParams;
use deskpilot_protocol::params::FindParams;
use deskpilot_protocol::params::GetStateParams;

use super::common::parse_params;
use crate::ports::StateProvider;

/// Without `app` the whole tree is refreshed first; with `app` the cached
/// state of that application is returned as is.
pub fn handle_get_state(state: &dyn StateProvider, request: &Request) -> Response {
    let params: GetStateParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match params.app {
        Some(app) => match state.app_state(&app) {
            Some(screen) => Response::success(request.id, RpcResult::ScreenState(screen)),
            None => app_not_found(request.id, &app),
        },
        None => {
            state.refresh();
            Response::success(request.id, RpcResult::ScreenState(state.state()))
        }
    }
}

pub fn handle_get_app_state(state: &dyn StateProvider, request: &Request) -> Response {
    let params: AppParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    state.refresh_focus();
    let Some(screen) = state.app_state(&params.app) else {
        return app_not_found(request.id, &params.app);
    };
    let position = screen
        .apps
        .iter()
        .position(|a| a.name == params.app)
        .unwrap_or(0);
    match screen.apps.into_iter().nth(position) {
        Some(app) => Response::success(request.id, RpcResult::AppInfo(app)),
        None => app_not_found(request.id, &params.app),
    }
}

/// Serves both `findElement` and `findElements`.
pub fn handle_find_elements(state: &dyn StateProvider, request: &Request) -> Response {
    let params: FindParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    state.refresh_focus();
    let elements = state.find_elements(
        &params.query,
        params.role.as_deref(),
        params.app.as_deref(),
    );
    Response::success(request.id, RpcResult::Elements(elements))
}

pub fn handle_refresh(state: &dyn StateProvider, request: &Request) -> Response {
    state.refresh();
    Response::message(request.id, "State refreshed")
}

/// Focused application, its focused window and that window's focused element.
pub fn handle_get_context(state: &dyn StateProvider, request: &Request) -> Response {
    state.refresh_focus();
    let screen = state.state();

    let mut context = ContextInfo::default();
    if let Some(app) = screen.focused() {
        context.app = Some(app.name.clone());
        if let Some(window) = app.focused_window() {
            context.window = Some(window.title.clone());
            context.element = window
                .focused_element
                .as_ref()
                .and_then(|e| e.label())
                .map(String::from);
        }
    }
    Response::success(request.id, RpcResult::Context(context))
}

fn app_not_found(id: i64, app: &str) -> Response {
    Response::error(id, ErrorCode::NotFound, format!("Application not found: {}", app))
}
