//! Action handlers.
//!
//! Executor failures map to a fixed code per method: click and focus report
//! `notFound`, type and hotkey `internalError`, press and scroll
//! `invalidParams`.

use deskpilot_protocol::ContextInfo;
use deskpilot_protocol::ErrorCode;
use deskpilot_protocol::Request;
use deskpilot_protocol::Response;
use deskpilot_protocol::params::ClickParams;
use deskpilot_protocol::params::FocusParams;
use deskpilot_protocol::params::HotkeyParams;
use deskpilot_protocol::params::PressParams;
use deskpilot_protocol::params::ScrollParams;
use deskpilot_protocol::params::TypeParams;

use super::common::action_response;
use super::common::parse_params;
use crate::ports::ActionExecutor;

/// Coordinates win over a semantic target when both are given.
pub fn handle_click(actions: &dyn ActionExecutor, request: &Request) -> Response {
    let params: ClickParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let (outcome, context) = match params {
        ClickParams::At { point } => (actions.click_at(point), None),
        ClickParams::Target { target, app } => {
            let outcome = actions.click_target(&target, app.as_deref());
            let context = ContextInfo {
                app,
                window: None,
                element: Some(target),
            };
            (outcome, Some(context))
        }
    };
    action_response(request.id, "Click", outcome, ErrorCode::NotFound, context)
}

pub fn handle_type(actions: &dyn ActionExecutor, request: &Request) -> Response {
    let params: TypeParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let outcome = actions.type_text(&params.text);
    action_response(request.id, "Type", outcome, ErrorCode::InternalError, None)
}

pub fn handle_press(actions: &dyn ActionExecutor, request: &Request) -> Response {
    let params: PressParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let outcome = actions.press(&params.key);
    action_response(request.id, "Press", outcome, ErrorCode::InvalidParams, None)
}

pub fn handle_hotkey(actions: &dyn ActionExecutor, request: &Request) -> Response {
    let params: HotkeyParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let outcome = actions.hotkey(&params.keys);
    action_response(request.id, "Hotkey", outcome, ErrorCode::InternalError, None)
}

pub fn handle_scroll(actions: &dyn ActionExecutor, request: &Request) -> Response {
    let params: ScrollParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let outcome = actions.scroll(&params.direction, params.amount, params.at);
    action_response(request.id, "Scroll", outcome, ErrorCode::InvalidParams, None)
}

pub fn handle_focus(actions: &dyn ActionExecutor, request: &Request) -> Response {
    let params: FocusParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let outcome = actions.focus(&params.app);
    let context = ContextInfo {
        app: Some(params.app),
        window: None,
        element: None,
    };
    action_response(request.id, "Focus", outcome, ErrorCode::NotFound, Some(context))
}
