use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::error::NotificationError;
use crate::ports::NotificationSource;
use crate::ports::SubscriptionHandle;

#[derive(Default)]
struct Registry {
    next: u64,
    live: Vec<(i32, SubscriptionHandle)>,
    released: Vec<SubscriptionHandle>,
}

#[derive(Default)]
pub struct MockNotificationSource {
    unobservable: BTreeSet<i32>,
    registry: Mutex<Registry>,
}

impl MockNotificationSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscriptions for `pid` will fail.
    pub fn rejecting(mut self, pid: i32) -> Self {
        self.unobservable.insert(pid);
        self
    }

    pub fn live_pids(&self) -> Vec<i32> {
        self.registry.lock().unwrap().live.iter().map(|(pid, _)| *pid).collect()
    }

    pub fn released(&self) -> Vec<SubscriptionHandle> {
        self.registry.lock().unwrap().released.clone()
    }
}

impl NotificationSource for MockNotificationSource {
    fn subscribe(&self, pid: i32) -> Result<SubscriptionHandle, NotificationError> {
        if self.unobservable.contains(&pid) {
            return Err(NotificationError::Unobservable(pid));
        }
        let mut registry = self.registry.lock().unwrap();
        registry.next += 1;
        let handle = SubscriptionHandle::new(registry.next);
        registry.live.push((pid, handle));
        Ok(handle)
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        let mut registry = self.registry.lock().unwrap();
        registry.live.retain(|(_, h)| *h != handle);
        registry.released.push(handle);
    }
}
