//! Error types for the cost resolution engine.

use thiserror::Error;

/// Errors raised while resolving crafting costs.
///
/// These are branch-level signals: the engine catches them during a pass,
/// logs a warning, and treats the offending branch as zero cost. They never
/// abort a whole resolution pass.
#[derive(Error, Debug)]
pub enum CraftingError {
    /// Recipe expansion went past the hard depth ceiling, which in
    /// practice means a self-referential or degenerate recipe chain.
    #[error("Recipe depth {depth} exceeded while expanding '{item}'")]
    DepthExceeded { item: String, depth: u32 },
}
