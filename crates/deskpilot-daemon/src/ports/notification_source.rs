use crate::error::NotificationError;

/// Opaque token for one live subscription. Whoever holds it is responsible
/// for handing it back through [`NotificationSource::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

pub trait NotificationSource: Send + Sync {
    /// Starts delivering focus and window events for `pid`.
    fn subscribe(&self, pid: i32) -> Result<SubscriptionHandle, NotificationError>;

    fn unsubscribe(&self, handle: SubscriptionHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    ApplicationActivated,
    FocusedWindowChanged,
    FocusedElementChanged,
    WindowCreated,
    WindowDestroyed,
    WindowMoved,
    WindowResized,
    WindowMiniaturized,
    TitleChanged,
    ValueChanged,
}

impl NotificationKind {
    /// Maps a host accessibility notification name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AXApplicationActivated" => Some(Self::ApplicationActivated),
            "AXFocusedWindowChanged" | "AXMainWindowChanged" => Some(Self::FocusedWindowChanged),
            "AXFocusedUIElementChanged" => Some(Self::FocusedElementChanged),
            "AXWindowCreated" => Some(Self::WindowCreated),
            "AXUIElementDestroyed" => Some(Self::WindowDestroyed),
            "AXWindowMoved" => Some(Self::WindowMoved),
            "AXWindowResized" => Some(Self::WindowResized),
            "AXWindowMiniaturized" | "AXWindowDeminiaturized" => Some(Self::WindowMiniaturized),
            "AXTitleChanged" => Some(Self::TitleChanged),
            "AXValueChanged" => Some(Self::ValueChanged),
            _ => None,
        }
    }
}

/// One delivered event. `handle` is the raw element reference from the
/// host and is only carried through for providers that want it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub pid: i32,
    pub kind: NotificationKind,
    pub handle: u64,
}

impl Notification {
    pub fn new(pid: i32, kind: NotificationKind) -> Self {
        Self {
            pid,
            kind,
            handle: 0,
        }
    }
}
