//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Role tag attached to each message sent to the completion service.
///
/// # Examples
///
/// ```
/// use quill_core::Role;
///
/// assert_eq!(Role::User.as_str(), "user");
/// assert_eq!(format!("{}", Role::Assistant), "assistant");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Messages written by the caller
    #[display("user")]
    User,
    /// Messages produced by the model
    #[display("assistant")]
    Assistant,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
