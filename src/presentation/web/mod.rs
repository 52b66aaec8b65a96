//! Server-rendered pages. They share the application services with the JSON
//! API and authenticate through a token cookie instead of a bearer header.

pub mod error;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod session;
