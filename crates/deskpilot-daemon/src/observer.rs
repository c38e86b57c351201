//! Keeps the state provider fresh from accessibility notifications.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::error::NotificationError;
use crate::ports::Notification;
use crate::ports::NotificationKind;
use crate::ports::NotificationSource;
use crate::ports::StateProvider;
use crate::ports::SubscriptionHandle;

/// What a notification invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshScope {
    Focus,
    App(i32),
}

impl RefreshScope {
    pub fn for_kind(kind: NotificationKind, pid: i32) -> Self {
        match kind {
            NotificationKind::ApplicationActivated
            | NotificationKind::FocusedWindowChanged
            | NotificationKind::FocusedElementChanged
            | NotificationKind::TitleChanged
            | NotificationKind::ValueChanged => RefreshScope::Focus,
            NotificationKind::WindowCreated
            | NotificationKind::WindowDestroyed
            | NotificationKind::WindowMoved
            | NotificationKind::WindowResized
            | NotificationKind::WindowMiniaturized => RefreshScope::App(pid),
        }
    }
}

/// Owns one subscription per observed process. Every handle goes back to
/// the source on [`StateObserver::release_all`] or when the observer drops.
pub struct StateObserver {
    source: Arc<dyn NotificationSource>,
    subscriptions: BTreeMap<i32, SubscriptionHandle>,
}

impl StateObserver {
    pub fn new(source: Arc<dyn NotificationSource>) -> Self {
        Self {
            source,
            subscriptions: BTreeMap::new(),
        }
    }

    /// Subscribes to `pid` unless already subscribed.
    pub fn observe(&mut self, pid: i32) -> Result<SubscriptionHandle, NotificationError> {
        if let Some(handle) = self.subscriptions.get(&pid) {
            return Ok(*handle);
        }
        let handle = self.source.subscribe(pid)?;
        debug!(pid = pid, handle = handle.raw(), "Observing process");
        self.subscriptions.insert(pid, handle);
        Ok(handle)
    }

    /// Drops the subscription for `pid`. Returns whether there was one.
    pub fn forget(&mut self, pid: i32) -> bool {
        match self.subscriptions.remove(&pid) {
            Some(handle) => {
                self.source.unsubscribe(handle);
                true
            }
            None => false,
        }
    }

    pub fn release_all(&mut self) {
        for (pid, handle) in std::mem::take(&mut self.subscriptions) {
            debug!(pid = pid, handle = handle.raw(), "Releasing subscription");
            self.source.unsubscribe(handle);
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_observing(&self, pid: i32) -> bool {
        self.subscriptions.contains_key(&pid)
    }

    /// Applies one notification to the provider.
    pub fn handle(&self, state: &dyn StateProvider, notification: &Notification) -> RefreshScope {
        if !self.is_observing(notification.pid) {
            warn!(pid = notification.pid, kind = ?notification.kind, "Notification for unobserved process");
        }
        let scope = RefreshScope::for_kind(notification.kind, notification.pid);
        match scope {
            RefreshScope::Focus => state.refresh_focus(),
            RefreshScope::App(pid) => state.refresh_app(pid),
        }
        scope
    }
}

impl Drop for StateObserver {
    fn drop(&mut self) {
        self.release_all();
    }
}
