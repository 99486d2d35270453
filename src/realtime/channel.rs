//! Private channel naming and subscription authorization.
//!
//! Channels follow the `user.<uuid>` convention: one private channel per
//! user. A bearer-token holder may subscribe only to their own channel.

use uuid::Uuid;

use crate::database::models::User;

/// Parsed private channel name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelName {
    pub user_id: Uuid,
}

impl ChannelName {
    /// Parse a requested channel name. Only `user.<uuid>` is recognized;
    /// anything else is unparseable and therefore unauthorizable.
    pub fn parse(raw: &str) -> Option<Self> {
        let id = raw.strip_prefix("user.")?;
        let user_id = id.parse::<Uuid>().ok()?;
        Some(Self { user_id })
    }

    pub fn for_user(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

impl std::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user.{}", self.user_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelAccess {
    Granted,
    Denied,
}

/// Decide whether an authenticated user may subscribe to a channel.
///
/// The decision never reveals whether the requested channel exists: a
/// malformed name, an unknown user id, and someone else's channel all come
/// back as the same `Denied`.
pub fn authorize_channel(user: &User, requested_channel: &str) -> ChannelAccess {
    match ChannelName::parse(requested_channel) {
        Some(channel) if channel.user_id == user.id => ChannelAccess::Granted,
        _ => ChannelAccess::Denied,
    }
}
