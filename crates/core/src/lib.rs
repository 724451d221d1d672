//! AION Core - catalog, session and shared types.
//!
//! This crate provides the logic behind the AION storefront screens:
//! - `catalog` - The seeded perfume catalog and its filter/sort pipeline
//! - `session` - Session entries, the session context and the mock-account
//!   auth state machine
//! - `types` - Newtype wrappers for ids, prices, ratings and emails
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no async. The storefront loads a snapshot of a visitor's session entries,
//! runs a transition from [`session`], and commits the result.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod session;
pub mod types;

pub use catalog::{Catalog, CatalogQuery, Product, SortMode, TagSet, ThemePreset};
pub use session::{AuthError, AuthState, SessionContext, SessionEntries, SessionKey, SessionStorage};
pub use types::*;
