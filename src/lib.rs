// Cookbook - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod normalize;
pub mod parser;
pub mod entities;
pub mod resolver;
pub mod import;
pub mod config;

// Re-export commonly used types
pub use error::{ResolutionError, ValidationError};
pub use normalize::normalize_name;
pub use parser::{parse_entry, parse_name};
pub use entities::{
    Cookbook,
    Entry, EntryKind, Ingredient, Recipe, RequiredItem,
};
pub use resolver::{
    Resolver, Summary, IngredientQuantity, Expansion, Traversal,
    DEFAULT_MAX_DEPTH,
};
pub use import::{import_entries, import_file, load_entries, parse_entries};
pub use config::{ResolveOptions, ServerConfig, init_logging};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
