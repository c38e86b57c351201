//! Result payloads.
//!
//! [`RpcResult`] is a closed, adjacently tagged union: every variant goes over
//! the wire as `{"type": <tag>, "data": <payload>}`. Decoding an unknown tag is
//! a hard error rather than a silently dropped payload.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::recipe::Recipe;
use crate::recipe::RecipeSummary;
use crate::recipe::Recording;
use crate::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum RpcResult {
    ScreenState(ScreenState),
    Elements(Vec<Element>),
    ElementTree(Element),
    StateDiff(StateDiff),
    Content(Vec<ContentItem>),
    AppInfo(AppInfo),
    Message(String),
    Bool(bool),
    ActionResult(ActionResult),
    Context(ContextInfo),
    Recipe(Recipe),
    Recipes(Vec<RecipeSummary>),
    Recording(Recording),
}

impl RpcResult {
    pub fn tag(&self) -> &'static str {
        match self {
            RpcResult::ScreenState(_) => "screenState",
            RpcResult::Elements(_) => "elements",
            RpcResult::ElementTree(_) => "elementTree",
            RpcResult::StateDiff(_) => "stateDiff",
            RpcResult::Content(_) => "content",
            RpcResult::AppInfo(_) => "appInfo",
            RpcResult::Message(_) => "message",
            RpcResult::Bool(_) => "bool",
            RpcResult::ActionResult(_) => "actionResult",
            RpcResult::Context(_) => "context",
            RpcResult::Recipe(_) => "recipe",
            RpcResult::Recipes(_) => "recipes",
            RpcResult::Recording(_) => "recording",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A node of the accessibility tree as reported by the state provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Rect>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub focused: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

fn default_true() -> bool {
    true
}

impl Element {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            enabled: true,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Best human-readable label: title, then value, then identifier.
    pub fn label(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.value.as_deref())
            .or(self.identifier.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInfo {
    pub title: String,
    #[serde(default)]
    pub focused: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Rect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused_element: Option<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub name: String,
    pub pid: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub windows: Vec<WindowInfo>,
}

impl AppInfo {
    pub fn focused_window(&self) -> Option<&WindowInfo> {
        self.windows.iter().find(|w| w.focused)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenState {
    #[serde(with = "timestamp::iso8601")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused_app: Option<String>,
    #[serde(default)]
    pub apps: Vec<AppInfo>,
}

impl ScreenState {
    pub fn app(&self, name: &str) -> Option<&AppInfo> {
        self.apps.iter().find(|a| a.name == name)
    }

    pub fn focused(&self) -> Option<&AppInfo> {
        match &self.focused_app {
            Some(name) => self.app(name),
            None => self.apps.iter().find(|a| a.focused),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementChange {
    pub before: Element,
    pub after: Element,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StateDiff {
    #[serde(default)]
    pub added: Vec<Element>,
    #[serde(default)]
    pub removed: Vec<Element>,
    #[serde(default)]
    pub changed: Vec<ElementChange>,
}

impl StateDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContentItem {
    Text {
        text: String,
    },
    Image {
        #[serde(rename = "mimeType")]
        mime_type: String,
        /// Base64 payload.
        data: String,
    },
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }
}

/// Where an action happened, as far as the dispatcher can tell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContextInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl ContextInfo {
    pub fn is_empty(&self) -> bool {
        self.app.is_none() && self.window.is_none() && self.element.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextInfo>,
}

impl ActionResult {
    pub fn ok(description: impl Into<String>, context: Option<ContextInfo>) -> Self {
        Self {
            success: true,
            description: description.into(),
            context,
        }
    }
}
