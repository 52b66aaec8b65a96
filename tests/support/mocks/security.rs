// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use inkpost::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use inkpost::domain::user::UserId;

use super::time::fixed_now;

// Tokens read `token:<id>:<username>`. The seeded store holds alice (1) and bob (2).
pub const ALICE_TOKEN: &str = "token:1:alice";
pub const BOB_TOKEN: &str = "token:2:bob";
pub const EXPIRED_TOKEN: &str = "expired-token";

fn user(id: i64, username: &str) -> AuthenticatedUser {
    let now = fixed_now();
    AuthenticatedUser {
        id: UserId::new(id).expect("invalid user id"),
        username: username.into(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

pub fn alice() -> AuthenticatedUser {
    user(1, "alice")
}

pub fn bob() -> AuthenticatedUser {
    user(2, "bob")
}

#[derive(Clone, Debug, Default)]
pub struct FixedTokenManager;

#[async_trait]
impl TokenManager for FixedTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = fixed_now();
        Ok(AuthTokenDto {
            token: format!("token:{}:{}", subject.user_id, subject.username),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        if token == EXPIRED_TOKEN {
            return Err(ApplicationError::unauthorized("token expired"));
        }
        let mut parts = token.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("token"), Some(id), Some(name)) if !name.is_empty() => id
                .parse::<i64>()
                .ok()
                .filter(|id| *id > 0)
                .map(|id| user(id, name))
                .ok_or_else(|| ApplicationError::unauthorized("invalid token")),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

/// Deterministic hasher: the hash of `pw` is `hash::pw`.
#[derive(Clone, Debug, Default)]
pub struct StrictPasswordHasher;

#[async_trait]
impl PasswordHasher for StrictPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hash::{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if format!("hash::{password}") == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}
