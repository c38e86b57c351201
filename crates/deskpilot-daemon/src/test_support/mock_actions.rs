use std::collections::BTreeMap;
use std::sync::Mutex;

use deskpilot_protocol::Point;

use crate::error::ActionError;
use crate::ports::ActionExecutor;

#[derive(Debug, Clone, PartialEq)]
pub enum ActionCall {
    ClickAt(Point),
    ClickTarget {
        target: String,
        app: Option<String>,
    },
    TypeText(String),
    Press(String),
    Hotkey(Vec<String>),
    Scroll {
        direction: String,
        amount: f64,
        at: Option<Point>,
    },
    Focus(String),
}

/// Executor that records every call and fails the operations it was told to.
#[derive(Default)]
pub struct MockActionExecutor {
    failures: BTreeMap<&'static str, ActionError>,
    calls: Mutex<Vec<ActionCall>>,
}

impl MockActionExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> MockActionExecutorBuilder {
        MockActionExecutorBuilder {
            executor: Self::new(),
        }
    }

    pub fn calls(&self) -> Vec<ActionCall> {
        self.calls.lock().unwrap().clone()
    }

    fn run(&self, operation: &'static str, call: ActionCall, done: String) -> Result<String, ActionError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(done),
        }
    }
}

impl ActionExecutor for MockActionExecutor {
    fn click_at(&self, point: Point) -> Result<String, ActionError> {
        let done = format!("Clicked at ({}, {})", point.x, point.y);
        self.run("click", ActionCall::ClickAt(point), done)
    }

    fn click_target(&self, target: &str, app: Option<&str>) -> Result<String, ActionError> {
        let call = ActionCall::ClickTarget {
            target: target.to_string(),
            app: app.map(String::from),
        };
        self.run("click", call, format!("Clicked '{}'", target))
    }

    fn type_text(&self, text: &str) -> Result<String, ActionError> {
        let done = format!("Typed {} characters", text.chars().count());
        self.run("type", ActionCall::TypeText(text.to_string()), done)
    }

    fn press(&self, key: &str) -> Result<String, ActionError> {
        self.run("press", ActionCall::Press(key.to_string()), format!("Pressed {}", key))
    }

    fn hotkey(&self, keys: &[String]) -> Result<String, ActionError> {
        let done = format!("Pressed {}", keys.join("+"));
        self.run("hotkey", ActionCall::Hotkey(keys.to_vec()), done)
    }

    fn scroll(&self, direction: &str, amount: f64, at: Option<Point>) -> Result<String, ActionError> {
        let call = ActionCall::Scroll {
            direction: direction.to_string(),
            amount,
            at,
        };
        self.run("scroll", call, format!("Scrolled {} by {}", direction, amount))
    }

    fn focus(&self, app: &str) -> Result<String, ActionError> {
        self.run("focus", ActionCall::Focus(app.to_string()), format!("Focused {}", app))
    }
}

pub struct MockActionExecutorBuilder {
    executor: MockActionExecutor,
}

impl MockActionExecutorBuilder {
    /// Makes every call to `operation` ("click", "type", "press", "hotkey",
    /// "scroll" or "focus") fail with `err`.
    pub fn failing(mut self, operation: &'static str, err: ActionError) -> Self {
        self.executor.failures.insert(operation, err);
        self
    }

    pub fn build(self) -> MockActionExecutor {
        self.executor
    }
}
