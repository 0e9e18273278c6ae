//! Authentication session consumed by the fetch controller and the role gate
//!
//! The session owns the bearer credential. Everything else only reads a
//! [`SessionSnapshot`] at the moment it needs one.

use std::sync::RwLock;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::models::RoleClaim;

/// Opaque bearer token plus its expiry, if known.
///
/// `Debug` never prints the token; use [`Credential::fingerprint`] in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Raw token, for building the `Authorization` header only
    pub fn bearer(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && self.expires_at.map_or(true, |exp| exp > now)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Short SHA-256 prefix identifying the token in logs
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.token.as_bytes());
        hex::encode(&digest[..6])
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("fingerprint", &self.fingerprint())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// What the session looked like at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub token: Option<Credential>,
    pub role: RoleClaim,
}

impl SessionSnapshot {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: Credential, role: RoleClaim) -> Self {
        Self {
            is_authenticated: true,
            token: Some(token),
            role,
        }
    }
}

/// Source of authentication state.
///
/// Implementations must answer [`snapshot`](AuthSession::snapshot) without
/// blocking on I/O.
pub trait AuthSession: Send + Sync {
    fn snapshot(&self) -> SessionSnapshot;

    fn sign_out(&self);
}

/// Claims read from an access token. Only what the client needs.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    exp: Option<i64>,
    #[serde(rename = "userType")]
    user_type: Option<String>,
}

/// In-memory session around a bearer access token.
#[derive(Debug, Default)]
pub struct TokenSession {
    current: RwLock<SessionSnapshot>,
}

impl TokenSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session seeded from an optional configured token
    pub fn from_token(token: Option<&str>) -> Self {
        let session = Self::new();
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            session.sign_in(token);
        }
        session
    }

    /// Replace the session with one built from `token`.
    ///
    /// JWTs are decoded without checking the signature (the backend does
    /// that) to read `exp` and `userType`. Anything that is not a JWT is kept
    /// as an opaque member credential with no expiry.
    pub fn sign_in(&self, token: &str) -> SessionSnapshot {
        let snapshot = match read_claims(token) {
            Some(claims) => {
                let expires_at = claims
                    .exp
                    .and_then(|exp| Utc.timestamp_opt(exp, 0).single());
                SessionSnapshot::authenticated(
                    Credential::new(token, expires_at),
                    RoleClaim::from_user_type(claims.user_type.as_deref()),
                )
            }
            None => {
                tracing::debug!("Access token is not a JWT, treating it as opaque");
                SessionSnapshot::authenticated(Credential::new(token, None), RoleClaim::Member)
            }
        };

        if let Some(credential) = &snapshot.token {
            tracing::info!(
                "Signed in as {} (token {})",
                snapshot.role,
                credential.fingerprint()
            );
        }

        *self.write() = snapshot.clone();
        snapshot
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionSnapshot> {
        self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AuthSession for TokenSession {
    fn snapshot(&self) -> SessionSnapshot {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn sign_out(&self) {
        tracing::info!("Signing out");
        *self.write() = SessionSnapshot::anonymous();
    }
}

fn read_claims(token: &str) -> Option<AccessClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}
