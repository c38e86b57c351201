use std::env;
use std::path::PathBuf;

const HOME_ENV: &str = "DESKPILOT_HOME";
const LOG_ENV: &str = "DESKPILOT_LOG";
const DEFAULT_DIR_NAME: &str = ".deskpilot";

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Root of the `recipes/` and `recordings/` directories.
    pub base_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AgentConfig {
    pub fn from_env() -> Self {
        Self {
            base_dir: env::var(HOME_ENV)
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_base_dir),
            log_file: env::var(LOG_ENV)
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn recipes_dir(&self) -> PathBuf {
        self.base_dir.join("recipes")
    }

    pub fn recordings_dir(&self) -> PathBuf {
        self.base_dir.join("recordings")
    }
}

fn default_base_dir() -> PathBuf {
    let home = env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"));
    home.join(DEFAULT_DIR_NAME)
}
