// src/domain/article/policy.rs
//! Who may read, create, and change articles.
//!
//! Reading is public. Creating requires a logged-in user. Updating and
//! deleting are reserved to the article's owner.

use crate::domain::article::entity::Article;
use crate::domain::user::UserId;

/// The identity acting on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(UserId),
}

impl Principal {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::User(_))
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Principal::User(id) => Some(*id),
            Principal::Anonymous => None,
        }
    }
}

impl From<Option<UserId>> for Principal {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(Principal::Anonymous, Principal::User)
    }
}

/// Outcome of a gated operation. Callers report `Unauthenticated` and
/// `Forbidden` differently (login prompt vs. refusal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Unauthenticated,
    Forbidden,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allowed
    }
}

pub fn can_read(_article: &Article, _principal: Principal) -> bool {
    true
}

pub fn can_create(principal: Principal) -> bool {
    decide_create(principal).is_allowed()
}

/// Covers both update and delete.
pub fn can_write(article: &Article, principal: Principal) -> bool {
    decide_write(article, principal).is_allowed()
}

pub fn decide_create(principal: Principal) -> Decision {
    match principal {
        Principal::User(_) => Decision::Allowed,
        Principal::Anonymous => Decision::Unauthenticated,
    }
}

pub fn decide_write(article: &Article, principal: Principal) -> Decision {
    match principal {
        Principal::Anonymous => Decision::Unauthenticated,
        Principal::User(id) if article.is_owned_by(id) => Decision::Allowed,
        Principal::User(_) => Decision::Forbidden,
    }
}
