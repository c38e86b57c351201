use deskpilot_protocol::Element;
use deskpilot_protocol::ScreenState;

/// Reads the live accessibility tree.
///
/// Calls are synchronous and may block on accessibility queries; the daemon
/// never calls into a provider from two dispatches at once.
pub trait StateProvider: Send + Sync {
    /// Re-reads every application.
    fn refresh(&self);

    /// Re-reads only the focused application and window.
    fn refresh_focus(&self);

    /// Re-reads one application after a window lifecycle change.
    fn refresh_app(&self, pid: i32);

    fn state(&self) -> ScreenState;

    /// State restricted to one application, `None` when it is not running.
    fn app_state(&self, app: &str) -> Option<ScreenState>;

    fn find_elements(&self, query: &str, role: Option<&str>, app: Option<&str>) -> Vec<Element>;
}
