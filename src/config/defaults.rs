//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use crate::state::Access;

// =============================================================================
// Access Defaults
// =============================================================================

pub fn default_access() -> Access {
    Access::LEVEL_1
}

// =============================================================================
// Vote Defaults
// =============================================================================

pub fn default_vote_kick_time() -> u64 {
    60
}

pub fn default_vote_map_time() -> u64 {
    60
}

// =============================================================================
// Command Defaults
// =============================================================================

pub fn default_gagged_commands() -> String {
    "say_team,tell,vsay,vsay_team,vtell,vosay,vosay_team,votell,vtaunt".to_string()
}

pub fn default_config_file() -> String {
    "qmmaddons/qadmin/config/qadmin.cfg".to_string()
}

pub fn default_color_escape() -> String {
    qadmin_proto::COLOR_ESCAPE.to_string()
}

pub fn default_chat_command() -> String {
    "say".to_string()
}

pub fn default_console_aliases() -> Vec<String> {
    vec!["admin_cmd".to_string(), "a_c".to_string()]
}
