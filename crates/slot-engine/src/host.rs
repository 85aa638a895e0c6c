//! Hosts: the users other people book time with.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SchedulingError};

/// Opaque store-assigned host identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(pub u64);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered host, addressed publicly by `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub id: HostId,
    pub username: String,
    pub name: String,
}

/// Check that a username can appear in a scheduling link.
///
/// Usernames are 3 to 64 characters of lowercase ASCII letters, digits and
/// hyphens, and may not start or end with a hyphen.
pub fn validate_username(username: &str) -> Result<()> {
    let len = username.len();
    if !(3..=64).contains(&len) {
        return Err(SchedulingError::validation(format!(
            "username must be 3 to 64 characters, got {}",
            len
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SchedulingError::validation(format!(
            "username '{}' may only contain lowercase letters, digits and hyphens",
            username
        )));
    }
    if username.starts_with('-') || username.ends_with('-') {
        return Err(SchedulingError::validation(format!(
            "username '{}' may not start or end with a hyphen",
            username
        )));
    }
    Ok(())
}

