//! Single-password access gate.
//!
//! The gallery itself never validates anything; it is only mounted once a
//! [`SessionGate`] reports a token. [`PasswordGate`] is an in-memory gate that
//! compares the password against a stored BLAKE3 digest and hands out random
//! bearer tokens.

use thiserror::Error;

/// Reasons a password exchange can fail.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid password")]
    InvalidPassword,
    #[error("stored password digest is not valid hex: {0}")]
    MalformedDigest(String),
}

/// An opaque bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

/// Supplies and remembers the session token.
pub trait SessionGate {
    /// Exchange a password for a token, remembering it on success.
    fn obtain_token(&mut self, password: &str) -> Result<Token, AuthError>;
    /// The token from the last successful exchange, if still held.
    fn current_token(&self) -> Option<&Token>;
    /// Forget the current token.
    fn clear_token(&mut self);
}

/// Password gate backed by a BLAKE3 digest.
#[derive(Clone, Debug)]
pub struct PasswordGate {
    digest: blake3::Hash,
    token: Option<Token>,
}

impl PasswordGate {
    /// Build a gate from the hex digest of the password.
    pub fn from_digest_hex(hex: &str) -> Result<Self, AuthError> {
        let digest = blake3::Hash::from_hex(hex.trim())
            .map_err(|e| AuthError::MalformedDigest(e.to_string()))?;
        Ok(Self {
            digest,
            token: None,
        })
    }

    /// Build a gate that accepts `password`.
    pub fn from_password(password: &str) -> Self {
        Self {
            digest: blake3::hash(password.as_bytes()),
            token: None,
        }
    }

    /// Hex digest to store instead of the plain password.
    pub fn digest_hex(password: &str) -> String {
        blake3::hash(password.as_bytes()).to_hex().to_string()
    }

    /// Whether `token` is the one this gate issued.
    pub fn validate(&self, token: &Token) -> bool {
        self.token.as_ref() == Some(token)
    }
}

impl SessionGate for PasswordGate {
    fn obtain_token(&mut self, password: &str) -> Result<Token, AuthError> {
        // blake3::Hash equality is constant time
        if blake3::hash(password.as_bytes()) != self.digest {
            tracing::debug!("password rejected");
            return Err(AuthError::InvalidPassword);
        }
        let token = Token::new(uuid::Uuid::new_v4().to_string());
        self.token = Some(token.clone());
        tracing::debug!("token issued");
        Ok(token)
    }

    fn current_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn clear_token(&mut self) {
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_issues_token() {
        let mut gate = PasswordGate::from_password("hunter2");
        assert!(gate.current_token().is_none());

        let token = gate.obtain_token("hunter2").unwrap();
        assert_eq!(gate.current_token(), Some(&token));
        assert!(gate.validate(&token));
        assert!(token.bearer_header().starts_with("Bearer "));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let mut gate = PasswordGate::from_password("hunter2");
        assert_eq!(gate.obtain_token("hunter3"), Err(AuthError::InvalidPassword));
        assert!(gate.current_token().is_none());
    }

    #[test]
    fn each_exchange_issues_a_fresh_token() {
        let mut gate = PasswordGate::from_password("pw");
        let first = gate.obtain_token("pw").unwrap();
        let second = gate.obtain_token("pw").unwrap();
        assert_ne!(first, second);
        assert!(!gate.validate(&first));
        assert!(gate.validate(&second));
    }

    #[test]
    fn digest_round_trip() {
        let hex = PasswordGate::digest_hex("secret");
        let mut gate = PasswordGate::from_digest_hex(&hex).unwrap();
        assert!(gate.obtain_token("secret").is_ok());
    }

    #[test]
    fn malformed_digest_is_rejected() {
        assert!(matches!(
            PasswordGate::from_digest_hex("not-hex"),
            Err(AuthError::MalformedDigest(_))
        ));
    }

    #[test]
    fn clearing_forgets_token() {
        let mut gate = PasswordGate::from_password("pw");
        let token = gate.obtain_token("pw").unwrap();
        gate.clear_token();
        assert!(gate.current_token().is_none());
        assert!(!gate.validate(&token));
        assert!(!gate.validate(&Token::new("forged")));
    }
}
