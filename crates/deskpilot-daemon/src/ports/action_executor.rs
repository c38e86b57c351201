use deskpilot_protocol::Point;

use crate::error::ActionError;

/// Performs physical input. Each call returns a human-readable confirmation.
pub trait ActionExecutor: Send + Sync {
    fn click_at(&self, point: Point) -> Result<String, ActionError>;

    fn click_target(&self, target: &str, app: Option<&str>) -> Result<String, ActionError>;

    fn type_text(&self, text: &str) -> Result<String, ActionError>;

    fn press(&self, key: &str) -> Result<String, ActionError>;

    fn hotkey(&self, keys: &[String]) -> Result<String, ActionError>;

    fn scroll(&self, direction: &str, amount: f64, at: Option<Point>) -> Result<String, ActionError>;

    fn focus(&self, app: &str) -> Result<String, ActionError>;
}
