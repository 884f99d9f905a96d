//! Configuration validation.

use super::Config;
use crate::handlers::{TableKind, builtin_handler, is_builtin_command};
use crate::state::MatchKind;
use qadmin_proto::eq_ignore_case;
use thiserror::Error;

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("duplicate [[user]] entry: {kind} \"{user}\"")]
    DuplicateUser { kind: MatchKind, user: String },
    #[error("admin.color_escape must be at most one character, got '{0}'")]
    InvalidColorEscape(String),
    #[error("admin.{0} must be greater than zero")]
    ZeroVoteTime(&'static str),
    #[error("admin.chat_command must not be empty")]
    EmptyChatCommand,
    #[error("[[command]] '{command}' names unknown handler '{handler}'")]
    UnknownHandler { command: String, handler: String },
    #[error("[[command]] '{0}' does not name an existing command")]
    UnknownCommand(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let admin = &config.admin;

    if admin.color_escape.chars().count() > 1 {
        errors.push(ValidationError::InvalidColorEscape(admin.color_escape.clone()));
    }
    if admin.vote_kick_time == 0 {
        errors.push(ValidationError::ZeroVoteTime("vote_kick_time"));
    }
    if admin.vote_map_time == 0 {
        errors.push(ValidationError::ZeroVoteTime("vote_map_time"));
    }
    if admin.chat_command.trim().is_empty() {
        errors.push(ValidationError::EmptyChatCommand);
    }

    for (i, user) in config.users.iter().enumerate() {
        let duplicate = config.users[..i]
            .iter()
            .any(|u| u.kind == user.kind && eq_ignore_case(&u.user, &user.user));
        if duplicate {
            errors.push(ValidationError::DuplicateUser {
                kind: user.kind,
                user: user.user.clone(),
            });
        }
    }

    // Aliases defined by earlier blocks may be modified by later ones.
    let mut defined: Vec<(TableKind, &str)> = Vec::new();
    for entry in &config.commands {
        match entry.handler.as_deref() {
            Some(key) if builtin_handler(key).is_none() => {
                errors.push(ValidationError::UnknownHandler {
                    command: entry.name.clone(),
                    handler: key.to_string(),
                });
            }
            Some(_) => defined.push((entry.table, &entry.name)),
            None => {
                let known = is_builtin_command(entry.table, &entry.name, &admin.chat_command)
                    || defined
                        .iter()
                        .any(|(t, n)| *t == entry.table && eq_ignore_case(n, &entry.name));
                if !known {
                    errors.push(ValidationError::UnknownCommand(entry.name.clone()));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_duplicate_user_fails() {
        let config = parse(
            r#"
[[user]]
kind = "name"
user = "Admin"
password = "a"
access = 1

[[user]]
kind = "name"
user = "ADMIN"
password = "b"
access = 2

[[user]]
kind = "ip"
user = "Admin"
password = "c"
access = 3
"#,
        );
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::DuplicateUser { kind: MatchKind::Name, user } if user == "ADMIN"
        ));
    }

    #[test]
    fn test_long_color_escape_fails() {
        let config = parse("[admin]\ncolor_escape = \"^^\"\n");
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidColorEscape(_))));
    }

    #[test]
    fn test_unknown_handler_fails() {
        let config = parse("[[command]]\nname = \"nuke\"\nhandler = \"admin_nuke\"\n");
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownHandler { .. })));
    }

    #[test]
    fn test_override_of_unknown_command_fails() {
        let config = parse("[[command]]\nname = \"admin_nuke\"\naccess = 2\n");
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::UnknownCommand("admin_nuke".into())]);
    }

    #[test]
    fn test_override_of_earlier_alias_is_valid() {
        let config = parse(
            r#"
[[command]]
name = "kick"
handler = "admin_kick"
table = "say"

[[command]]
name = "kick"
table = "say"
access = 2
"#,
        );
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_chat_command_override_is_valid() {
        let config = parse("[admin]\nchat_command = \"say_all\"\n\n[[command]]\nname = \"SAY_ALL\"\naccess = 1\n");
        assert!(validate(&config).is_ok());
    }
}
