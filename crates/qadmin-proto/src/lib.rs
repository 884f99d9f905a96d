//! # qadmin-proto
//!
//! Text handling shared by the QAdmin administration core and its hosts.
//!
//! ## Features
//!
//! - ASCII case-insensitive comparison and substring search ([`casemap`])
//! - Stripping of engine color codes from player names ([`colors`])
//! - Delimiter splitting, joining and quote-aware console tokenizing ([`tokens`])
//! - Removal of console-injection characters ([`sanitize`])
//! - Engine `\key\value` info strings ([`info`])
//!
//! ## Quick Start
//!
//! ```rust
//! use qadmin_proto::{eq_ignore_case, sanitize, split_args, strip_codes};
//!
//! assert!(eq_ignore_case("Admin_Kick", "admin_kick"));
//! assert_eq!(strip_codes("^1Red^7Dog", Some('^')), "RedDog");
//! assert_eq!(sanitize("map\"; quit"), "map   quit");
//! assert_eq!(split_args(r#"admin_kick bob "go away""#), vec!["admin_kick", "bob", "go away"]);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod colors;
pub mod info;
pub mod sanitize;
pub mod tokens;

pub use self::casemap::{cmp_ignore_case, contains_ignore_case, eq_ignore_case};
pub use self::colors::{strip_codes, COLOR_ESCAPE};
pub use self::info::{strip_port, validate as validate_info, value_for_key};
pub use self::sanitize::{is_sanitized, sanitize, UNSAFE_CHARS};
pub use self::tokens::{join, join_with, parse_str, split_args};
