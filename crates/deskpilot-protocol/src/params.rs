//! Per-method parameter structs.
//!
//! Each method reads its own struct out of the [`ParamBag`]; defaults live
//! here and nowhere else:
//!
//! | method | field | default |
//! |---|---|---|
//! | scroll | direction | `"down"` |
//! | scroll | amount | `3.0` |

use thiserror::Error;

use crate::result::Point;
use crate::types::ParamBag;

pub const DEFAULT_SCROLL_DIRECTION: &str = "down";
pub const DEFAULT_SCROLL_AMOUNT: f64 = 3.0;

/// `runRecipe` param naming the recipe. It cannot double as a placeholder value.
pub const RECIPE_NAME_PARAM: &str = "name";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Missing '{0}' param")]
    Missing(&'static str),
    #[error("Missing '{0}' or '{1}' param")]
    MissingEither(&'static str, &'static str),
    #[error("Expected {0}")]
    Unsatisfied(&'static str),
    #[error("Invalid '{name}' param: {reason}")]
    Invalid { name: &'static str, reason: String },
}

pub trait FromParams: Sized {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError>;
}

fn required(params: &ParamBag, key: &'static str) -> Result<String, ParamError> {
    params
        .str(key)
        .map(String::from)
        .ok_or(ParamError::Missing(key))
}

fn optional(params: &ParamBag, key: &str) -> Option<String> {
    params.str(key).map(String::from)
}

fn either(params: &ParamBag, first: &'static str, second: &'static str) -> Result<String, ParamError> {
    optional(params, first)
        .or_else(|| optional(params, second))
        .ok_or(ParamError::MissingEither(first, second))
}

/// Reads `x`/`y` as a point: both present, or neither.
fn point(params: &ParamBag) -> Result<Option<Point>, ParamError> {
    match (params.f64("x"), params.f64("y")) {
        (Some(x), Some(y)) => Ok(Some(Point::new(x, y))),
        (None, None) => Ok(None),
        _ => Err(ParamError::Unsatisfied("both 'x' and 'y' or neither")),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetStateParams {
    pub app: Option<String>,
}

impl FromParams for GetStateParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        Ok(Self {
            app: optional(params, "app"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppParams {
    pub app: String,
}

impl FromParams for AppParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        Ok(Self {
            app: required(params, "app")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindParams {
    /// `query`, falling back to `target`.
    pub query: String,
    pub role: Option<String>,
    pub app: Option<String>,
}

impl FromParams for FindParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        Ok(Self {
            query: either(params, "query", "target")?,
            role: optional(params, "role"),
            app: optional(params, "app"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickParams {
    At {
        point: Point,
    },
    Target {
        target: String,
        app: Option<String>,
    },
}

impl FromParams for ClickParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        if let (Some(x), Some(y)) = (params.f64("x"), params.f64("y")) {
            return Ok(ClickParams::At {
                point: Point::new(x, y),
            });
        }
        match optional(params, "target").or_else(|| optional(params, "query")) {
            Some(target) => Ok(ClickParams::Target {
                target,
                app: optional(params, "app"),
            }),
            None => Err(ParamError::Unsatisfied(
                "'x' and 'y', or 'target' or 'query'",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParams {
    pub text: String,
}

impl FromParams for TypeParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        Ok(Self {
            text: required(params, "text")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PressParams {
    pub key: String,
}

impl FromParams for PressParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        Ok(Self {
            key: required(params, "key")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotkeyParams {
    pub keys: Vec<String>,
}

impl FromParams for HotkeyParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        match params.list("keys") {
            Some(keys) if !keys.is_empty() => Ok(Self {
                keys: keys.to_vec(),
            }),
            _ => Err(ParamError::Missing("keys")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollParams {
    pub direction: String,
    pub amount: f64,
    pub at: Option<Point>,
}

impl FromParams for ScrollParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        Ok(Self {
            direction: optional(params, "direction")
                .unwrap_or_else(|| DEFAULT_SCROLL_DIRECTION.to_string()),
            amount: params.f64("amount").unwrap_or(DEFAULT_SCROLL_AMOUNT),
            at: point(params)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusParams {
    /// `app`, falling back to `target`.
    pub app: String,
}

impl FromParams for FocusParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        Ok(Self {
            app: either(params, "app", "target")?,
        })
    }
}

/// Shared by the meta-commands that address a recording or recipe by name.
#[derive(Debug, Clone, PartialEq)]
pub struct NameParams {
    pub name: String,
}

impl FromParams for NameParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        Ok(Self {
            name: required(params, "name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRecipeParams {
    /// Recipe document as JSON text.
    pub recipe: String,
}

impl FromParams for SaveRecipeParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        Ok(Self {
            recipe: required(params, "recipe")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunRecipeParams {
    pub name: String,
    /// Every other text param, used as placeholder values.
    pub values: Vec<(String, String)>,
}

impl FromParams for RunRecipeParams {
    fn from_params(params: &ParamBag) -> Result<Self, ParamError> {
        let name = required(params, RECIPE_NAME_PARAM)?;
        let values = params
            .iter()
            .filter(|(key, _)| key.as_str() != RECIPE_NAME_PARAM)
            .filter_map(|(key, _)| params.str(key).map(|v| (key.clone(), v.to_string())))
            .collect();
        Ok(Self { name, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_prefers_query_over_target() {
        let params = ParamBag::new().with("query", "Save").with("target", "Open");
        let find = FindParams::from_params(&params).unwrap();
        assert_eq!(find.query, "Save");

        let params = ParamBag::new().with("target", "Open").with("role", "AXButton");
        let find = FindParams::from_params(&params).unwrap();
        assert_eq!(find.query, "Open");
        assert_eq!(find.role.as_deref(), Some("AXButton"));
    }

    #[test]
    fn test_find_requires_query_or_target() {
        let err = FindParams::from_params(&ParamBag::new().with("role", "AXButton")).unwrap_err();
        assert_eq!(err, ParamError::MissingEither("query", "target"));
    }

    #[test]
    fn test_click_coordinates_win_over_target() {
        let params = ParamBag::new()
            .with("x", 5.0)
            .with("y", 6.0)
            .with("target", "OK");
        assert_eq!(
            ClickParams::from_params(&params).unwrap(),
            ClickParams::At {
                point: Point::new(5.0, 6.0)
            }
        );
    }

    #[test]
    fn test_click_falls_back_to_query() {
        let params = ParamBag::new().with("x", 5.0).with("query", "OK").with("app", "Finder");
        assert_eq!(
            ClickParams::from_params(&params).unwrap(),
            ClickParams::Target {
                target: "OK".into(),
                app: Some("Finder".into())
            }
        );
    }

    #[test]
    fn test_click_without_target_is_rejected() {
        let err = ClickParams::from_params(&ParamBag::new().with("x", 1.0)).unwrap_err();
        assert!(matches!(err, ParamError::Unsatisfied(_)));
    }

    #[test]
    fn test_scroll_defaults() {
        let scroll = ScrollParams::from_params(&ParamBag::new()).unwrap();
        assert_eq!(scroll.direction, DEFAULT_SCROLL_DIRECTION);
        assert_eq!(scroll.amount, DEFAULT_SCROLL_AMOUNT);
        assert_eq!(scroll.at, None);
    }

    #[test]
    fn test_scroll_with_point() {
        let params = ParamBag::new()
            .with("direction", "up")
            .with("amount", 1.0)
            .with("x", 10.0)
            .with("y", 20.0);
        let scroll = ScrollParams::from_params(&params).unwrap();
        assert_eq!(scroll.direction, "up");
        assert_eq!(scroll.amount, 1.0);
        assert_eq!(scroll.at, Some(Point::new(10.0, 20.0)));

        assert!(ScrollParams::from_params(&ParamBag::new().with("x", 1.0)).is_err());
    }

    #[test]
    fn test_hotkey_rejects_empty_keys() {
        let err = HotkeyParams::from_params(&ParamBag::new().with("keys", Vec::<String>::new()))
            .unwrap_err();
        assert_eq!(err, ParamError::Missing("keys"));
        assert!(HotkeyParams::from_params(&ParamBag::new().with("keys", "cmd+c")).is_err());
    }

    #[test]
    fn test_focus_accepts_target() {
        let focus = FocusParams::from_params(&ParamBag::new().with("target", "Safari")).unwrap();
        assert_eq!(focus.app, "Safari");
        assert!(FocusParams::from_params(&ParamBag::new()).is_err());
    }

    #[test]
    fn test_type_accepts_empty_text() {
        let ty = TypeParams::from_params(&ParamBag::new().with("text", "")).unwrap();
        assert_eq!(ty.text, "");
        assert_eq!(
            TypeParams::from_params(&ParamBag::new()).unwrap_err().to_string(),
            "Missing 'text' param"
        );
    }

    #[test]
    fn test_run_recipe_collects_text_values() {
        let params = ParamBag::new()
            .with("name", "login")
            .with("user", "ada")
            .with("retries", 2.0);
        let run = RunRecipeParams::from_params(&params).unwrap();
        assert_eq!(run.name, "login");
        assert_eq!(run.values, vec![("user".to_string(), "ada".to_string())]);
    }
}
