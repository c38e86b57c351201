//! Command implementations. Each writes its normal output to `out`.

use std::fs;
use std::io::Write;
use std::path::Path;

use deskpilot_daemon::RecipeStore;
use deskpilot_protocol::codec::to_sorted_vec_pretty;
use serde::Serialize;
use tracing::debug;

use crate::error::CliError;

pub type HandlerResult = Result<(), CliError>;

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> HandlerResult {
    let bytes = to_sorted_vec_pretty(value)?;
    out.write_all(&bytes)?;
    writeln!(out)?;
    Ok(())
}

pub fn handle_recipes_list(store: &RecipeStore, json: bool, out: &mut dyn Write) -> HandlerResult {
    let summaries = store.list_recipes();
    if json {
        return write_json(out, &summaries);
    }
    if summaries.is_empty() {
        writeln!(out, "No recipes in {}", store.recipes_dir().display())?;
        return Ok(());
    }
    for summary in &summaries {
        write!(out, "{}\t{} steps", summary.name, summary.step_count)?;
        if !summary.params.is_empty() {
            write!(out, "\tparams: {}", summary.params.join(", "))?;
        }
        if let Some(description) = &summary.description {
            write!(out, "\t{}", description)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn handle_recipes_show(store: &RecipeStore, name: &str, out: &mut dyn Write) -> HandlerResult {
    let recipe = store.load_recipe(name)?;
    write_json(out, &recipe)
}

pub fn handle_recipes_delete(store: &RecipeStore, name: &str, out: &mut dyn Write) -> HandlerResult {
    if !store.delete_recipe(name) {
        return Err(CliError::RecipeNotFound(name.to_string()));
    }
    writeln!(out, "Deleted recipe '{}'", name)?;
    Ok(())
}

pub fn handle_recipes_import(store: &RecipeStore, file: &Path, out: &mut dyn Write) -> HandlerResult {
    let bytes = fs::read(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    let recipe = store.save_recipe_bytes(&bytes)?;
    debug!(file = %file.display(), name = %recipe.name, "Imported recipe");
    writeln!(
        out,
        "Imported recipe '{}' ({} steps)",
        recipe.name,
        recipe.steps.len()
    )?;
    Ok(())
}

pub fn handle_recordings_list(store: &RecipeStore, out: &mut dyn Write) -> HandlerResult {
    let stems = store.list_recordings();
    if stems.is_empty() {
        writeln!(out, "No recordings in {}", store.recordings_dir().display())?;
        return Ok(());
    }
    for stem in stems {
        writeln!(out, "{}", stem)?;
    }
    Ok(())
}

pub fn handle_recordings_show(store: &RecipeStore, name: &str, out: &mut dyn Write) -> HandlerResult {
    let recording = store.load_recording(name)?;
    write_json(out, &recording)
}

/// Keeps only the successful steps; the recipe takes the recording's name
/// unless `recipe_name` is given.
pub fn handle_recordings_convert(
    store: &RecipeStore,
    name: &str,
    recipe_name: Option<&str>,
    out: &mut dyn Write,
) -> HandlerResult {
    let recording = store.load_recording(name)?;
    let mut recipe = recording.to_recipe();
    if let Some(recipe_name) = recipe_name {
        recipe.name = recipe_name.to_string();
    }
    let path = store.save_recipe(&recipe)?;
    writeln!(
        out,
        "Saved recipe '{}' ({} of {} steps) to {}",
        recipe.name,
        recipe.steps.len(),
        recording.steps.len(),
        path.display()
    )?;
    Ok(())
}
