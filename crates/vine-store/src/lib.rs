//! # vine-store
//!
//! In-memory relational store for the Vine feed client.
//!
//! [`EntityStore`] owns every user, video and comment of the session and
//! hands out immutable snapshots.  [`FeedEngine`] is the only mutation path:
//! likes, comments, follows, publishing and registration all go through it
//! so the derived counters never drift from the membership sets they
//! summarise.

pub mod engine;
pub mod models;
pub mod seed;
pub mod store;

mod error;

pub use engine::FeedEngine;
pub use error::{FeedError, Result};
pub use models::*;
pub use store::EntityStore;
