// Entity Models
//
// Each entry has:
// - A canonical name that is its identity (unique across both kinds)
// - An immutable value (ingredient cook time or recipe item list)
// - A home in the Cookbook registry, which validates on the way in

pub mod entry;
pub mod cookbook;

pub use entry::{Entry, EntryKind, Ingredient, Recipe, RequiredItem};
pub use cookbook::Cookbook;
