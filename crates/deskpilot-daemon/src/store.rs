use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;
use deskpilot_protocol::Recipe;
use deskpilot_protocol::RecipeSource;
use deskpilot_protocol::RecipeSummary;
use deskpilot_protocol::Recording;
use deskpilot_protocol::codec::to_sorted_vec_pretty;
use deskpilot_protocol::params::RECIPE_NAME_PARAM;
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing::warn;

use crate::config::AgentConfig;
use crate::error::StoreError;

const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";
const EXTENSION: &str = "json";

/// File-backed storage for recordings and recipes.
///
/// Every write goes to `<path>.tmp` first and is renamed into place, so a
/// reader sees either the previous complete file or the new one.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    recipes_dir: PathBuf,
    recordings_dir: PathBuf,
}

/// Rejects names that would escape the store directories.
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.trim().is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.contains('\0');
    if invalid {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// `{name}-{YYYYMMDDTHHMMSS}`, the file stem a recording is stored under.
pub fn recording_file_stem(name: &str, recorded_at: &DateTime<Utc>) -> String {
    format!("{}-{}", name, recorded_at.format(FILE_TIMESTAMP_FORMAT))
}

impl RecipeStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let base = base_dir.as_ref();
        Self {
            recipes_dir: base.join("recipes"),
            recordings_dir: base.join("recordings"),
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            recipes_dir: config.recipes_dir(),
            recordings_dir: config.recordings_dir(),
        }
    }

    pub fn recipes_dir(&self) -> &Path {
        &self.recipes_dir
    }

    pub fn recordings_dir(&self) -> &Path {
        &self.recordings_dir
    }

    pub fn save_recording(&self, recording: &Recording) -> Result<PathBuf, StoreError> {
        validate_name(&recording.name)?;
        let stem = recording_file_stem(&recording.name, &recording.recorded_at);
        let path = file_path(&self.recordings_dir, &stem);
        let bytes = to_sorted_vec_pretty(recording).map_err(|source| StoreError::Serialize {
            what: "recording",
            source,
        })?;
        write_atomic(&path, &bytes, false)?;
        debug!(path = %path.display(), steps = recording.steps.len(), "Saved recording");
        Ok(path)
    }

    pub fn load_recording(&self, stem: &str) -> Result<Recording, StoreError> {
        validate_name(stem)?;
        read_json(&file_path(&self.recordings_dir, stem), "Recording", stem)
    }

    /// Recording file stems, newest first.
    ///
    /// The compact timestamp suffix is zero-padded, so descending
    /// lexicographic order is reverse chronological order per name.
    pub fn list_recordings(&self) -> Vec<String> {
        let mut stems: Vec<String> = json_files(&self.recordings_dir)
            .into_iter()
            .filter_map(|path| stem_of(&path))
            .collect();
        stems.sort();
        stems.reverse();
        stems
    }

    /// Saves a recipe under `{name}.json`, replacing any previous version.
    pub fn save_recipe(&self, recipe: &Recipe) -> Result<PathBuf, StoreError> {
        validate_recipe(recipe)?;
        let path = file_path(&self.recipes_dir, &recipe.name);
        let bytes = to_sorted_vec_pretty(recipe).map_err(|source| StoreError::Serialize {
            what: "recipe",
            source,
        })?;
        write_atomic(&path, &bytes, true)?;
        debug!(path = %path.display(), "Saved recipe");
        Ok(path)
    }

    /// Validates raw recipe JSON and saves it. Nothing touches disk unless
    /// the bytes parse as a well-formed recipe.
    pub fn save_recipe_bytes(&self, bytes: &[u8]) -> Result<Recipe, StoreError> {
        let recipe: Recipe = serde_json::from_slice(bytes)
            .map_err(|e| StoreError::InvalidRecipe(e.to_string()))?;
        self.save_recipe(&recipe)?;
        Ok(recipe)
    }

    /// Loads a recipe from the user directory.
    // TODO: fall back to a bundled read-only recipe directory once the agent ships one.
    pub fn load_recipe(&self, name: &str) -> Result<Recipe, StoreError> {
        validate_name(name)?;
        read_json(&file_path(&self.recipes_dir, name), "Recipe", name)
    }

    /// Summaries of every parseable recipe, in file name order.
    pub fn list_recipes(&self) -> Vec<RecipeSummary> {
        let mut paths = json_files(&self.recipes_dir);
        paths.sort();
        paths
            .into_iter()
            .filter_map(|path| {
                let name = stem_of(&path)?;
                match read_json::<Recipe>(&path, "Recipe", &name) {
                    Ok(recipe) => Some(recipe.summary(RecipeSource::User)),
                    Err(e) => {
                        debug!(path = %path.display(), error = %e, "Skipping unreadable recipe");
                        None
                    }
                }
            })
            .collect()
    }

    /// Removes a recipe. Returns whether a file was removed.
    pub fn delete_recipe(&self, name: &str) -> bool {
        if validate_name(name).is_err() {
            return false;
        }
        let path = file_path(&self.recipes_dir, name);
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Recipe not removed");
                false
            }
        }
    }
}

fn validate_recipe(recipe: &Recipe) -> Result<(), StoreError> {
    validate_name(&recipe.name)?;
    if recipe.steps.is_empty() {
        return Err(StoreError::InvalidRecipe(format!(
            "recipe '{}' has no steps",
            recipe.name
        )));
    }
    if let Some(index) = recipe.steps.iter().position(|s| s.method.trim().is_empty()) {
        return Err(StoreError::InvalidRecipe(format!(
            "step {} of '{}' has no method",
            index + 1,
            recipe.name
        )));
    }
    // `runRecipe` consumes `name` itself, so only a default could ever fill it.
    if matches!(recipe.params.get(RECIPE_NAME_PARAM), Some(None)) {
        return Err(StoreError::InvalidRecipe(format!(
            "parameter '{}' of '{}' is reserved and needs a default",
            RECIPE_NAME_PARAM, recipe.name
        )));
    }
    Ok(())
}

fn file_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{}.{}", stem, EXTENSION))
}

fn stem_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(String::from)
}

fn json_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Store directory not readable");
            return Vec::new();
        }
    };
    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION))
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path, kind: &'static str, name: &str) -> Result<T, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound {
                kind,
                name: name.to_string(),
            });
        }
        Err(e) => return Err(StoreError::io("read", path, e)),
    };
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `bytes` to `<path>.tmp` and renames it over `path`.
///
/// With `replace_existing`, a file already at `path` is removed right before
/// the rename; the destination filesystem is not assumed to support
/// rename-over-existing.
fn write_atomic(path: &Path, bytes: &[u8], replace_existing: bool) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io("create directory", parent, e))?;
    }

    let temp_path = path.with_extension(format!("{}.tmp", EXTENSION));
    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .map_err(|e| StoreError::io("write", &temp_path, e));
    if let Err(e) = written {
        discard_temp(&temp_path);
        return Err(e);
    }

    if replace_existing && path.exists() {
        if let Err(e) = fs::remove_file(path) {
            discard_temp(&temp_path);
            return Err(StoreError::io("remove", path, e));
        }
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        discard_temp(&temp_path);
        return Err(StoreError::io("rename", &temp_path, e));
    }
    Ok(())
}

fn discard_temp(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file");
        }
    }
}
