//! Token Type
//!
//! The `type` discriminator embedded in every signed token. A token is only
//! accepted by the flow it was issued for: an emailed verification link can
//! never be replayed as a session cookie.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived session credential carried in the `auth_token` cookie
    Access,
    /// Long-lived credential that can only mint new access tokens
    Refresh,
    /// Emailed link confirming address ownership
    Verification,
    /// Emailed link allowing one password reset
    Reset,
}

impl TokenType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
            TokenType::Verification => "verification",
            TokenType::Reset => "reset",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        for (ty, name) in [
            (TokenType::Access, "\"access\""),
            (TokenType::Refresh, "\"refresh\""),
            (TokenType::Verification, "\"verification\""),
            (TokenType::Reset, "\"reset\""),
        ] {
            assert_eq!(serde_json::to_string(&ty).unwrap(), name);
            assert_eq!(format!("\"{}\"", ty), name);
        }
    }
}
