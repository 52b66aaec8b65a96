// tests/support/mocks/mod.rs
//! Test doubles for the application ports and repositories.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod security;
pub mod store;
pub mod time;

pub use security::{
    ALICE_TOKEN, BOB_TOKEN, EXPIRED_TOKEN, FixedTokenManager, StrictPasswordHasher, alice, bob,
};
pub use store::StaleReadStore;
pub use time::{SteppingClock, fixed_now};
