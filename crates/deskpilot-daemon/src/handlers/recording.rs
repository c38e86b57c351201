//! Meta-command handlers: recording control and the recipe library.

use deskpilot_protocol::ContentItem;
use deskpilot_protocol::ErrorCode;
use deskpilot_protocol::Request;
use deskpilot_protocol::Response;
use deskpilot_protocol::RpcResult;
use deskpilot_protocol::params::NameParams;
use deskpilot_protocol::params::RunRecipeParams;
use deskpilot_protocol::params::SaveRecipeParams;

use super::common::parse_params;
use crate::error::StoreError;
use crate::recorder::Recorder;
use crate::replay::run_recipe;
use crate::router::Dispatcher;
use crate::store::RecipeStore;

pub fn handle_recording_start(recorder: &mut Recorder, request: &Request) -> Response {
    let params: NameParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match recorder.start(&params.name) {
        Ok(()) => Response::message(request.id, format!("Recording started: {}", params.name)),
        Err(e) => Response::error(request.id, e.code(), e.to_string()),
    }
}

pub fn handle_recording_stop(recorder: &mut Recorder, request: &Request) -> Response {
    match recorder.stop() {
        Some(stopped) => Response::success(request.id, RpcResult::Recording(stopped.recording)),
        None => Response::message(request.id, "No recording in progress"),
    }
}

pub fn handle_recording_status(recorder: &Recorder, request: &Request) -> Response {
    let text = match recorder.status() {
        Some(status) => format!(
            "Recording '{}': {} steps, {:.1}s",
            status.name,
            status.step_count,
            status.elapsed.as_secs_f64()
        ),
        None => "Not recording".to_string(),
    };
    Response::message(request.id, text)
}

pub fn handle_list_recordings(store: &RecipeStore, request: &Request) -> Response {
    let items = store
        .list_recordings()
        .into_iter()
        .map(ContentItem::text)
        .collect();
    Response::success(request.id, RpcResult::Content(items))
}

pub fn handle_get_recording(store: &RecipeStore, request: &Request) -> Response {
    let params: NameParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match store.load_recording(&params.name) {
        Ok(recording) => Response::success(request.id, RpcResult::Recording(recording)),
        Err(e) => store_error_response(request.id, &e),
    }
}

pub fn handle_save_recipe(store: &RecipeStore, request: &Request) -> Response {
    let params: SaveRecipeParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match store.save_recipe_bytes(params.recipe.as_bytes()) {
        Ok(recipe) => Response::message(request.id, format!("Recipe saved: {}", recipe.name)),
        Err(e) => store_error_response(request.id, &e),
    }
}

pub fn handle_get_recipe(store: &RecipeStore, request: &Request) -> Response {
    let params: NameParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match store.load_recipe(&params.name) {
        Ok(recipe) => Response::success(request.id, RpcResult::Recipe(recipe)),
        Err(e) => store_error_response(request.id, &e),
    }
}

pub fn handle_list_recipes(store: &RecipeStore, request: &Request) -> Response {
    Response::success(request.id, RpcResult::Recipes(store.list_recipes()))
}

pub fn handle_delete_recipe(store: &RecipeStore, request: &Request) -> Response {
    let params: NameParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    Response::success(request.id, RpcResult::Bool(store.delete_recipe(&params.name)))
}

pub fn handle_run_recipe(
    store: &RecipeStore,
    dispatcher: &Dispatcher,
    request: &Request,
) -> Response {
    let params: RunRecipeParams = match parse_params(request) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match store.load_recipe(&params.name) {
        Ok(recipe) => run_recipe(dispatcher, &recipe, &params.values, request.id),
        Err(e) => store_error_response(request.id, &e),
    }
}

fn store_error_response(id: i64, err: &StoreError) -> Response {
    let code = err.code();
    if code == ErrorCode::InternalError {
        tracing::warn!(error = %err, "Recipe store failure");
    }
    Response::error(id, code, err.to_string())
}
