//! # Brushwise Core
//!
//! Domain types for the Brushwise learning assistant: the response catalog,
//! the keyword resolver that picks one catalog entry per query, and the
//! canned practice-feedback and community content served next to it.
//!
//! Nothing in this crate performs I/O at resolution time and nothing is
//! mutable after startup. Latency simulation and transport live in
//! `brushwise-gateway`.

pub mod catalog;
pub mod community;
pub mod error;
pub mod feedback;
pub mod message;
pub mod resolver;

// Re-export key types at crate root for ergonomics
pub use catalog::{Catalog, CatalogEntry, ContextId, MatchMode, Rule, RuleTarget, Scope};
pub use community::{Acknowledgement, Community, HubSnapshot, PostDraft};
pub use error::{Error, Result};
pub use feedback::{Critic, Critique};
pub use message::{ChatMessage, Role, Transcript};
pub use resolver::{Resolution, Resolver};
