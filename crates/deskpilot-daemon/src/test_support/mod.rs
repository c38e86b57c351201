//! Mock collaborators for dispatcher, recorder and agent tests.

mod mock_actions;
mod mock_clock;
mod mock_notifications;
mod mock_state;

pub use mock_actions::ActionCall;
pub use mock_actions::MockActionExecutor;
pub use mock_clock::MockClock;
pub use mock_notifications::MockNotificationSource;
pub use mock_state::MockStateProvider;
pub use mock_state::StateCall;

use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use deskpilot_protocol::AppInfo;
use deskpilot_protocol::Element;
use deskpilot_protocol::WindowInfo;

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 9, 14, 0, 0).unwrap()
}

/// A focused app with one focused window whose focused element has `label`.
pub fn focused_app(name: &str, pid: i32, window: &str, label: &str) -> AppInfo {
    AppInfo {
        name: name.to_string(),
        pid,
        bundle_id: None,
        focused: true,
        windows: vec![WindowInfo {
            title: window.to_string(),
            focused: true,
            frame: None,
            focused_element: Some(Element::new("AXTextField").with_title(label)),
        }],
    }
}

pub fn background_app(name: &str, pid: i32) -> AppInfo {
    AppInfo {
        name: name.to_string(),
        pid,
        bundle_id: None,
        focused: false,
        windows: Vec::new(),
    }
}
