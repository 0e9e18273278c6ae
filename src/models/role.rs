//! Role claims carried by an authenticated session

use serde::{Deserialize, Serialize};

/// Role of the current session.
///
/// Snapshot value: it is re-read from the session for every gate check and
/// never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleClaim {
    Anonymous,
    Member,
    Admin,
}

impl RoleClaim {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleClaim::Anonymous => "anonymous",
            RoleClaim::Member => "member",
            RoleClaim::Admin => "admin",
        }
    }

    /// Role of an authenticated session from the token's `userType` claim.
    ///
    /// Only the literal `admin` grants [`RoleClaim::Admin`]; any other value,
    /// or no claim at all, is a plain member.
    pub fn from_user_type(user_type: Option<&str>) -> Self {
        match user_type {
            Some("admin") => RoleClaim::Admin,
            _ => RoleClaim::Member,
        }
    }
}

impl Default for RoleClaim {
    fn default() -> Self {
        RoleClaim::Anonymous
    }
}

impl std::fmt::Display for RoleClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoleClaim {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anonymous" => Ok(RoleClaim::Anonymous),
            "member" => Ok(RoleClaim::Member),
            "admin" => Ok(RoleClaim::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user_type() {
        assert_eq!(RoleClaim::from_user_type(Some("admin")), RoleClaim::Admin);
        assert_eq!(RoleClaim::from_user_type(Some("Admin")), RoleClaim::Member);
        assert_eq!(RoleClaim::from_user_type(Some("reader")), RoleClaim::Member);
        assert_eq!(RoleClaim::from_user_type(None), RoleClaim::Member);
    }

    #[test]
    fn test_parse() {
        assert_eq!("ADMIN".parse::<RoleClaim>(), Ok(RoleClaim::Admin));
        assert!("librarian".parse::<RoleClaim>().is_err());
    }
}
