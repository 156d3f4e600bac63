//! # Block Parsing
//!
//! Two-phase, line-oriented block parsing.
//!
//! 1. **Line Classification** (`classify`): each line becomes a `LineClass`
//!    from local facts only.
//! 2. **Block Construction** (`builder`): a `BlockBuilder` groups lines into
//!    list, quote and fence nodes and emits everything else directly.
//!
//! Fenced code blocks are raw zones: no block or inline parsing inside.

pub mod builder;
pub mod classify;
pub mod kinds;

pub use builder::BlockBuilder;
pub use classify::{LineClass, classify};
