use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role, seeded in the `roles` table
///
/// Discriminants are the `roles.id` values. Lower id means more authority:
/// admin ⊇ editor ⊇ user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserRole {
    Admin = 1,
    Editor = 2,
    #[default]
    User = 3,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "admin",
            Editor => "editor",
            User => "user",
        }
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        use UserRole::*;
        match id {
            1 => Some(Admin),
            2 => Some(Editor),
            3 => Some(User),
            _ => None,
        }
    }

    /// Whether this role carries at least the authority of `required`
    #[inline]
    pub const fn satisfies(&self, required: UserRole) -> bool {
        self.id() <= required.id()
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Unknown role code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        use UserRole::*;
        match code {
            "admin" => Ok(Admin),
            "editor" => Ok(Editor),
            "user" => Ok(User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
