//! Support for runtime configuration, read from the environment

use std::path::PathBuf;

use crate::error::ConfigError;

/// Default display name of the to-do column on the board
pub const DEFAULT_TODO_LIST: &str = "DA FARE";
/// Default path of the weekly template file
pub const DEFAULT_TEMPLATE_FILE: &str = "weekly_template.json";
/// Default path of the persisted run state
pub const DEFAULT_STATE_FILE: &str = "economato_state.json";

/// Everything the binary needs to know before it can touch the board
#[derive(Debug)]
pub struct Config {
    pub api_key: String,
    pub token: String,
    pub board_id: String,
    pub todo_list: String,
    pub template_file: PathBuf,
    pub state_file: PathBuf,
}

impl Config {
    /// Gather the configuration from the environment.
    /// Missing credentials are fatal, before any board call is attempted.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: required("TRELLO_API_KEY")?,
            token: required("TRELLO_TOKEN")?,
            board_id: required("TRELLO_BOARD_ID")?,
            todo_list: optional("ECONOMATO_TODO_LIST", DEFAULT_TODO_LIST),
            template_file: PathBuf::from(optional(
                "ECONOMATO_TEMPLATE",
                DEFAULT_TEMPLATE_FILE,
            )),
            state_file: PathBuf::from(optional("ECONOMATO_STATE", DEFAULT_STATE_FILE)),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
