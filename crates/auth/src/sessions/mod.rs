//! Session storage implementations.
//!
//! Provides the in-memory `SessionRepository` used by a single-process
//! deployment. Multi-process deployments plug a shared store in behind the
//! same trait.

mod inmemory;

pub use inmemory::SessionStore;
