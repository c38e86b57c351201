//! Narrow contracts for the collaborators the daemon drives but does not own.

mod action_executor;
mod clock;
mod notification_source;
mod state_provider;

pub use action_executor::ActionExecutor;
pub use clock::Clock;
pub use clock::SystemClock;
pub use notification_source::Notification;
pub use notification_source::NotificationKind;
pub use notification_source::NotificationSource;
pub use notification_source::SubscriptionHandle;
pub use state_provider::StateProvider;
