//! Recipe replay.
//!
//! Placeholders (`{{name}}`) in step text values and string lists are
//! resolved against the caller's values, then the recipe defaults. Every
//! step is resolved before the first one runs.
//!
//! Steps go straight to the [`Dispatcher`], not back through the agent.
//! `runRecipe` is itself a meta-command, so an active recording gains no
//! steps from a recipe run.

use std::sync::LazyLock;

use deskpilot_protocol::ActionResult;
use deskpilot_protocol::ParamValue;
use deskpilot_protocol::Recipe;
use deskpilot_protocol::RecipeStep;
use deskpilot_protocol::Request;
use deskpilot_protocol::Response;
use deskpilot_protocol::RpcResult;
use regex::Regex;
use tracing::debug;
use tracing::warn;

use crate::error::ReplayError;
use crate::recorder::context_of;
use crate::recorder::is_meta_command;
use crate::router::Dispatcher;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Substitutes placeholders in every step, or reports the first step or
/// value that cannot run.
pub fn resolve_steps(
    recipe: &Recipe,
    values: &[(String, String)],
) -> Result<Vec<RecipeStep>, ReplayError> {
    recipe
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            if is_meta_command(&step.method) {
                return Err(ReplayError::MetaCommand {
                    index: index + 1,
                    method: step.method.clone(),
                });
            }
            let mut resolved = step.clone();
            for (_, value) in resolved.params.iter_mut() {
                match value {
                    ParamValue::Text(text) => *text = substitute(text, recipe, values)?,
                    ParamValue::List(items) => {
                        for item in items.iter_mut() {
                            *item = substitute(item, recipe, values)?;
                        }
                    }
                    ParamValue::Bool(_) | ParamValue::Number(_) => {}
                }
            }
            Ok(resolved)
        })
        .collect()
}

fn substitute(
    text: &str,
    recipe: &Recipe,
    values: &[(String, String)],
) -> Result<String, ReplayError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&lookup(name.as_str(), recipe, values)?);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

fn lookup(name: &str, recipe: &Recipe, values: &[(String, String)]) -> Result<String, ReplayError> {
    if let Some((_, value)) = values.iter().find(|(key, _)| key == name) {
        return Ok(value.clone());
    }
    recipe
        .params
        .get(name)
        .cloned()
        .flatten()
        .ok_or_else(|| ReplayError::MissingValue(name.to_string()))
}

/// Runs a recipe step by step through the dispatcher. The first failing
/// step ends the run and its error code is returned unchanged.
pub fn run_recipe(
    dispatcher: &Dispatcher,
    recipe: &Recipe,
    values: &[(String, String)],
    id: i64,
) -> Response {
    let steps = match resolve_steps(recipe, values) {
        Ok(steps) => steps,
        Err(e) => return Response::error(id, e.code(), e.to_string()),
    };

    let mut context = None;
    for (index, step) in steps.iter().enumerate() {
        let request = Request::new(id, step.method.clone(), Some(step.params.clone()));
        let response = dispatcher.dispatch(&request);
        if let Some(err) = response.error_info() {
            warn!(
                recipe = %recipe.name,
                step = index + 1,
                method = %step.method,
                error = %err.message,
                "Recipe step failed"
            );
            return Response::error(
                id,
                err.code,
                format!(
                    "Step {} ({}) of '{}' failed: {}",
                    index + 1,
                    step.method,
                    recipe.name,
                    err.message
                ),
            );
        }
        debug!(recipe = %recipe.name, step = index + 1, method = %step.method, "Recipe step done");
        context = context_of(&response);
    }

    let description = format!("Ran recipe '{}' ({} steps)", recipe.name, steps.len());
    Response::success(id, RpcResult::ActionResult(ActionResult::ok(description, context)))
}
