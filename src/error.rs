// ⚠️ Error Taxonomy - Write-side validation and read-side resolution failures
//
// Each variant names the violated invariant. Messages go back to HTTP
// clients verbatim.

use thiserror::Error;

// ============================================================================
// VALIDATION (AddEntry)
// ============================================================================

/// Reasons an entry is refused by [`crate::Cookbook::add_entry`].
///
/// A refused entry never leaves a trace in the cookbook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name missing, not a string, or empty after normalization
    #[error("entry name is missing or unreadable")]
    InvalidName,

    /// Normalized name already taken by an ingredient or a recipe
    #[error("entry names must be unique: '{0}' already exists")]
    DuplicateName(String),

    /// `type` is neither "ingredient" nor "recipe"
    #[error("type can only be \"recipe\" or \"ingredient\"")]
    InvalidKind,

    /// `requiredItems` malformed or naming the same item twice
    #[error("invalid requiredItems: {0}")]
    InvalidRequiredItems(String),

    /// `cookTime` missing, not an integer, or negative
    #[error("cookTime must be an integer greater than or equal to 0")]
    InvalidCookTime,

    /// Ingredient carries fields beyond name/type/cookTime
    #[error("unexpected ingredient fields: {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),
}

// ============================================================================
// RESOLUTION (Summarize)
// ============================================================================

/// Reasons a summary cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("no entry named '{0}'")]
    NotFound(String),

    #[error("'{0}' is an ingredient, not a recipe")]
    NotARecipe(String),

    /// A required item names nothing in the cookbook
    #[error("recipe references unknown item '{0}'")]
    BrokenReference(String),

    /// Recipe chain that leads back to itself, e.g. `["A", "B", "A"]`
    #[error("cyclic recipe reference: {}", .0.join(" -> "))]
    CyclicReference(Vec<String>),

    #[error("recipe nesting exceeds the depth limit of {0}")]
    DepthLimitExceeded(usize),

    /// Quantity or cook time no longer fits in 64 bits
    #[error("arithmetic overflow while expanding '{0}'")]
    Overflow(String),
}
