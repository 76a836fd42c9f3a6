use std::fmt;

use crate::error::SessionError;

/// A normalized battle room id such as `battle-gen9randombattle-123`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub const BATTLE_PREFIX: &'static str = "battle-";

    /// Trim the raw id and add the `battle-` prefix when missing
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionError::InvalidRoom(raw.to_string()));
        }

        if trimmed.starts_with(Self::BATTLE_PREFIX) {
            Ok(Self(trimmed.to_string()))
        } else {
            Ok(Self(format!("{}{}", Self::BATTLE_PREFIX, trimmed)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
