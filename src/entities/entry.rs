// 🥚 Entry Entity - Ingredients and recipes stored in the cookbook
//
// An ingredient is a leaf with a fixed cook time.
// A recipe is a list of other entries (by name) and how many of each it needs.
// Entries are write-once: there is no update or delete.

use serde::{Deserialize, Serialize};

// ============================================================================
// ENTRY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Atomic item with a cook time
    Ingredient,

    /// Composite item built from other entries
    Recipe,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Ingredient => "ingredient",
            EntryKind::Recipe => "recipe",
        }
    }

    /// Parse the wire value of the `type` field
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "ingredient" => Some(EntryKind::Ingredient),
            "recipe" => Some(EntryKind::Recipe),
            _ => None,
        }
    }
}

// ============================================================================
// INGREDIENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Canonical display name (e.g., "Beef")
    pub name: String,

    /// Cost of producing one unit
    pub cook_time: u64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, cook_time: u64) -> Self {
        Ingredient {
            name: name.into(),
            cook_time,
        }
    }
}

// ============================================================================
// RECIPE
// ============================================================================

/// One line of a recipe: which entry, and how many units of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredItem {
    pub name: String,
    pub quantity: u64,
}

impl RequiredItem {
    pub fn new(name: impl Into<String>, quantity: u64) -> Self {
        RequiredItem {
            name: name.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Canonical display name (e.g., "Skibidi Spaghetti")
    pub name: String,

    /// Items in the order they were submitted.
    /// Names may point at entries that don't exist yet.
    pub required_items: Vec<RequiredItem>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Recipe {
            name: name.into(),
            required_items: Vec::new(),
        }
    }

    /// Builder: add a required item
    pub fn with_item(mut self, name: impl Into<String>, quantity: u64) -> Self {
        self.required_items.push(RequiredItem::new(name, quantity));
        self
    }
}

// ============================================================================
// ENTRY
// ============================================================================

/// A cookbook entry as stored and as sent back over the wire.
///
/// Serializes to the same shape clients submit:
/// `{"type": "ingredient", "name": "Egg", "cookTime": 3}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Ingredient(Ingredient),
    Recipe(Recipe),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Ingredient(ingredient) => &ingredient.name,
            Entry::Recipe(recipe) => &recipe.name,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Ingredient(_) => EntryKind::Ingredient,
            Entry::Recipe(_) => EntryKind::Recipe,
        }
    }

    pub fn as_ingredient(&self) -> Option<&Ingredient> {
        match self {
            Entry::Ingredient(ingredient) => Some(ingredient),
            Entry::Recipe(_) => None,
        }
    }

    pub fn as_recipe(&self) -> Option<&Recipe> {
        match self {
            Entry::Recipe(recipe) => Some(recipe),
            Entry::Ingredient(_) => None,
        }
    }
}

impl From<Ingredient> for Entry {
    fn from(ingredient: Ingredient) -> Self {
        Entry::Ingredient(ingredient)
    }
}

impl From<Recipe> for Entry {
    fn from(recipe: Recipe) -> Self {
        Entry::Recipe(recipe)
    }
}

// ============================================================================
// TESTS
// ============================================================================
