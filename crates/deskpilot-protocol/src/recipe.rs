use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::result::ContextInfo;
use crate::timestamp;
use crate::types::ParamBag;

/// One captured dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedStep {
    #[serde(with = "timestamp::iso8601")]
    pub timestamp: DateTime<Utc>,
    pub method: String,
    #[serde(default)]
    pub params: ParamBag,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextInfo>,
}

/// A finished capture session. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub name: String,
    #[serde(with = "timestamp::iso8601")]
    pub recorded_at: DateTime<Utc>,
    /// Elapsed wall-clock seconds between start and stop.
    pub duration: f64,
    pub steps: Vec<RecordedStep>,
}

impl Recording {
    /// Converts the successful steps into a replayable recipe.
    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            name: self.name.clone(),
            description: Some(format!(
                "Recorded {}",
                timestamp::format(&self.recorded_at)
            )),
            app: self
                .steps
                .iter()
                .find_map(|s| s.context.as_ref().and_then(|c| c.app.clone())),
            params: BTreeMap::new(),
            steps: self
                .steps
                .iter()
                .filter(|s| s.success)
                .map(|s| RecipeStep {
                    method: s.method.clone(),
                    params: s.params.clone(),
                    description: s.description.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub method: String,
    #[serde(default)]
    pub params: ParamBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RecipeStep {
    pub fn new(method: impl Into<String>, params: ParamBag) -> Self {
        Self {
            method: method.into(),
            params,
            description: None,
        }
    }
}

/// A named, reusable command sequence. `params` maps each placeholder name
/// to its default value, if it has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default)]
    pub params: BTreeMap<String, Option<String>>,
    pub steps: Vec<RecipeStep>,
}

impl Recipe {
    pub fn summary(&self, source: RecipeSource) -> RecipeSummary {
        RecipeSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            app: self.app.clone(),
            params: self.params.keys().cloned().collect(),
            step_count: self.steps.len(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    pub params: Vec<String>,
    pub step_count: usize,
    pub source: RecipeSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_recipe() -> Recipe {
        let mut params = BTreeMap::new();
        params.insert("user".to_string(), None);
        params.insert("app".to_string(), Some("Mail".to_string()));
        Recipe {
            name: "login".into(),
            description: Some("Sign in".into()),
            app: Some("Mail".into()),
            params,
            steps: vec![
                RecipeStep::new("focus", ParamBag::new().with("app", "{{app}}")),
                RecipeStep::new("type", ParamBag::new().with("text", "{{user}}")),
            ],
        }
    }

    #[test]
    fn test_summary_lists_sorted_param_names() {
        let summary = sample_recipe().summary(RecipeSource::User);
        assert_eq!(summary.params, vec!["app".to_string(), "user".to_string()]);
        assert_eq!(summary.step_count, 2);
        assert_eq!(summary.source, RecipeSource::User);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["stepCount"], 2);
        assert_eq!(value["source"], "user");
    }

    #[test]
    fn test_recipe_parses_minimal_document() {
        let recipe: Recipe = serde_json::from_value(json!({
            "name": "copy",
            "steps": [{"method": "hotkey", "params": {"keys": ["cmd", "c"]}}]
        }))
        .unwrap();
        assert!(recipe.params.is_empty());
        assert_eq!(recipe.steps[0].params.list("keys").unwrap().len(), 2);
    }

    #[test]
    fn test_recipe_requires_steps() {
        assert!(serde_json::from_value::<Recipe>(json!({"name": "empty"})).is_err());
    }

    #[test]
    fn test_recording_wire_names() {
        let recording = Recording {
            name: "demo".into(),
            recorded_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            duration: 1.5,
            steps: vec![],
        };
        let value = serde_json::to_value(&recording).unwrap();
        assert_eq!(value["recordedAt"], "2024-01-02T03:04:05Z");
        assert_eq!(value["duration"], 1.5);
    }

    #[test]
    fn test_recording_to_recipe_keeps_successful_steps() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let step = |method: &str, success: bool| RecordedStep {
            timestamp: at,
            method: method.into(),
            params: ParamBag::new(),
            success,
            description: None,
            context: Some(ContextInfo {
                app: Some("Notes".into()),
                ..ContextInfo::default()
            }),
        };
        let recording = Recording {
            name: "notes".into(),
            recorded_at: at,
            duration: 2.0,
            steps: vec![step("click", true), step("press", false), step("type", true)],
        };

        let recipe = recording.to_recipe();
        let methods: Vec<_> = recipe.steps.iter().map(|s| s.method.as_str()).collect();
        assert_eq!(methods, vec!["click", "type"]);
        assert_eq!(recipe.app.as_deref(), Some("Notes"));
    }
}
