//! Removal of user-identifying details from report output.
//!
//! Reports end up pasted into issues and editor panels, so the home
//! directory is collapsed to `~` and the login name is replaced with
//! `<user>` everywhere it appears.

use std::path::Path;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

/// Replacement for the home directory.
pub const HOME_MASK: &str = "~";

/// Replacement for the username.
pub const USER_MASK: &str = "<user>";

/// Usernames this short would mask ordinary words.
const MIN_USERNAME_LEN: usize = 3;

/// Masks the home directory and username in strings and JSON values.
///
/// # Example
///
/// ```
/// use pycheck::report::Sanitizer;
/// use std::path::Path;
///
/// let sanitizer = Sanitizer::new(Some(Path::new("/home/alice")), Some("alice"));
/// assert_eq!(
///     sanitizer.sanitize_str("/home/alice/.venv owned by Alice"),
///     "~/.venv owned by <user>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Sanitizer {
    home: Option<String>,
    username: Option<Regex>,
}

impl Sanitizer {
    /// Build a sanitizer for an explicit home directory and username.
    pub fn new(home: Option<&Path>, username: Option<&str>) -> Self {
        Self {
            home: home
                .map(|h| h.to_string_lossy().into_owned())
                .filter(|h| !h.is_empty() && h != "/"),
            username: username.and_then(username_pattern),
        }
    }

    /// Sanitizer for the current user.
    ///
    /// The username pattern is compiled once per process.
    pub fn for_current_user() -> Self {
        static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

        let home = dirs::home_dir();
        let username = PATTERN
            .get_or_init(|| current_username(home.as_deref()).as_deref().and_then(username_pattern))
            .clone();

        Self {
            home: home
                .map(|h| h.to_string_lossy().into_owned())
                .filter(|h| !h.is_empty() && h != "/"),
            username,
        }
    }

    /// Mask one string. The home directory is replaced first, and only
    /// where it is a whole path: `/home/al` masks `/home/al/x` but leaves
    /// `/home/alice` alone.
    pub fn sanitize_str(&self, text: &str) -> String {
        let text = match &self.home {
            Some(home) => mask_home(text, home),
            None => text.to_string(),
        };
        match &self.username {
            Some(pattern) => pattern.replace_all(&text, USER_MASK).into_owned(),
            None => text,
        }
    }

    /// Mask every string inside a JSON value. Object keys are left alone.
    pub fn sanitize_value(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.sanitize_str(&s)),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.sanitize_value(v)).collect())
            }
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, self.sanitize_value(v)))
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Characters that continue a path component.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn mask_home(text: &str, home: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut copied = 0;
    for (at, _) in text.match_indices(home) {
        let end = at + home.len();
        let starts_path = text[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !is_name_char(c) && c != '/');
        let ends_component = text[end..].chars().next().map_or(true, |c| !is_name_char(c));
        if starts_path && ends_component {
            masked.push_str(&text[copied..at]);
            masked.push_str(HOME_MASK);
            copied = end;
        }
    }
    masked.push_str(&text[copied..]);
    masked
}

/// `USERNAME`, then `USER`, then the last component of the home directory.
fn current_username(home: Option<&Path>) -> Option<String> {
    std::env::var("USERNAME")
        .ok()
        .filter(|u| !u.is_empty())
        .or_else(|| std::env::var("USER").ok().filter(|u| !u.is_empty()))
        .or_else(|| {
            home.and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
        })
}

fn username_pattern(username: &str) -> Option<Regex> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return None;
    }
    RegexBuilder::new(&regex::escape(username))
        .case_insensitive(true)
        .build()
        .ok()
}
