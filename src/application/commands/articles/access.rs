// src/application/commands/articles/access.rs
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::article::{Decision, Principal},
};

/// Translate a policy decision into the error both adapters understand.
pub(crate) fn ensure_allowed(decision: Decision, action: &str) -> ApplicationResult<()> {
    match decision {
        Decision::Allowed => Ok(()),
        Decision::Unauthenticated => Err(ApplicationError::unauthorized(format!(
            "authentication required to {action}"
        ))),
        Decision::Forbidden => Err(ApplicationError::forbidden(format!(
            "only the owner may {action} this article"
        ))),
    }
}

/// Anonymous callers are turned away before the article is looked up, so they
/// learn nothing about which slugs exist.
pub(crate) fn ensure_authenticated(principal: Principal, action: &str) -> ApplicationResult<()> {
    if principal.is_authenticated() {
        Ok(())
    } else {
        Err(ApplicationError::unauthorized(format!(
            "authentication required to {action}"
        )))
    }
}
