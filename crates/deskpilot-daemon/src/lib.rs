#![deny(clippy::all)]

mod agent;
mod config;
mod error;
pub mod handlers;
mod observer;
pub mod ports;
mod recorder;
mod replay;
mod router;
mod store;
mod sync;

#[cfg(test)]
mod test_support;

pub use agent::Agent;
pub use agent::SharedAgent;
pub use config::AgentConfig;
pub use error::ActionError;
pub use error::NotificationError;
pub use error::RecorderError;
pub use error::ReplayError;
pub use error::StoreError;
pub use observer::RefreshScope;
pub use observer::StateObserver;
pub use recorder::PersistOutcome;
pub use recorder::Recorder;
pub use recorder::RecordingStatus;
pub use recorder::META_COMMANDS;
pub use recorder::StoppedRecording;
pub use recorder::is_meta_command;
pub use replay::resolve_steps;
pub use replay::run_recipe;
pub use router::Dispatcher;
pub use store::RecipeStore;
pub use store::recording_file_stem;
pub use store::validate_name;
pub use sync::mutex_lock_or_recover;
