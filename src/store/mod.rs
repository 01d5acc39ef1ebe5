//! Generic store actor for managed record collections.
//!
//! The in-process stand-in for the external order store. One actor task owns
//! each record collection and serializes all access to it, which is what makes
//! status transitions atomic read-modify-writes.
//!
//! # Main Components
//!
//! - [`StoreEntity`] - contract a record type implements to be stored
//! - [`StoreActor`] - generic actor owning the records
//! - [`StoreClient`] - cloneable async handle to the actor
//!
//! # Testing
//!
//! See [`mock`] for scripting store behavior without spawning a real actor.

pub mod core;
pub mod mock;

pub use core::*;
