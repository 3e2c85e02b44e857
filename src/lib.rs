//! # votesys-client
//!
//! Browser-side session glue for the votesys polling site, compiled to
//! WebAssembly with the `hydrate` feature. Pages are rendered by the server;
//! this crate reads the session from `localStorage`, shows or hides role-marked
//! nav items, gates pages on token and role, and attaches the bearer token to
//! API requests.
//!
//! All decisions live in plain Rust behind small traits (storage, page,
//! transport), so native tests run without a browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Session record, storage trait and backends |
//! | [`nav`] | Role markers and navbar visibility |
//! | [`guard`] | Advisory token/role page gate |
//! | [`fetch`] | Request options and the authenticated fetch wrapper |
//! | [`api`] | Login and typed poll endpoints |
//! | [`token`] | Unverified JWT claim decoding |
//! | [`app`] | Per-page [`app::Client`] wiring it all together |
//! | [`config`] | Storage keys, selectors, routes, log level |
//! | [`error`] | Error enums for the fallible seams |

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod nav;
pub mod navigate;
pub mod session;
pub mod token;

#[cfg(feature = "hydrate")]
mod entry;

#[cfg(test)]
mod test_support;
