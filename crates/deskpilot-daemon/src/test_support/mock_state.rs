use std::sync::Mutex;

use deskpilot_protocol::AppInfo;
use deskpilot_protocol::Element;
use deskpilot_protocol::ScreenState;

use super::fixed_time;
use crate::ports::StateProvider;

#[derive(Debug, Clone, PartialEq)]
pub enum StateCall {
    Refresh,
    RefreshFocus,
    RefreshApp(i32),
    State,
    AppState(String),
    FindElements {
        query: String,
        role: Option<String>,
        app: Option<String>,
    },
}

/// In-memory screen with a fixed set of apps and search results.
#[derive(Default)]
pub struct MockStateProvider {
    apps: Vec<AppInfo>,
    elements: Vec<Element>,
    calls: Mutex<Vec<StateCall>>,
}

impl MockStateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> MockStateProviderBuilder {
        MockStateProviderBuilder {
            provider: Self::new(),
        }
    }

    pub fn calls(&self) -> Vec<StateCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &StateCall) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn log(&self, call: StateCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl StateProvider for MockStateProvider {
    fn refresh(&self) {
        self.log(StateCall::Refresh);
    }

    fn refresh_focus(&self) {
        self.log(StateCall::RefreshFocus);
    }

    fn refresh_app(&self, pid: i32) {
        self.log(StateCall::RefreshApp(pid));
    }

    fn state(&self) -> ScreenState {
        self.log(StateCall::State);
        ScreenState {
            timestamp: fixed_time(),
            focused_app: self.apps.iter().find(|a| a.focused).map(|a| a.name.clone()),
            apps: self.apps.clone(),
        }
    }

    fn app_state(&self, app: &str) -> Option<ScreenState> {
        self.log(StateCall::AppState(app.to_string()));
        let info = self.apps.iter().find(|a| a.name == app)?;
        Some(ScreenState {
            timestamp: fixed_time(),
            focused_app: info.focused.then(|| info.name.clone()),
            apps: vec![info.clone()],
        })
    }

    fn find_elements(&self, query: &str, role: Option<&str>, app: Option<&str>) -> Vec<Element> {
        self.log(StateCall::FindElements {
            query: query.to_string(),
            role: role.map(String::from),
            app: app.map(String::from),
        });
        self.elements
            .iter()
            .filter(|e| match role {
                Some(r) => e.role == r,
                None => true,
            })
            .cloned()
            .collect()
    }
}

pub struct MockStateProviderBuilder {
    provider: MockStateProvider,
}

impl MockStateProviderBuilder {
    pub fn with_app(mut self, app: AppInfo) -> Self {
        self.provider.apps.push(app);
        self
    }

    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.provider.elements = elements;
        self
    }

    pub fn build(self) -> MockStateProvider {
        self.provider
    }
}
