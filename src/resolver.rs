// 🍝 Recipe Resolver - Expands a recipe into total cook time and base ingredients
//
// Walks the composition graph depth-first. A child's totals are multiplied by
// the quantity its parent asks for, so leaves end up scaled by the product of
// all quantities on the path from the root.
//
//   Skibidi Spaghetti ×1
//   ├── Meatball ×3 ──► Beef ×6, Egg ×3
//   ├── Pasta ×1    ──► Flour ×3, Egg ×1
//   └── Tomato ×2
//
//   cook time = 6×5 + 3×3 + 3×0 + 1×3 + 2×2 = 46
//   ingredients = Beef 6, Egg 4, Flour 3, Tomato 2   (first-seen order)
//
// Each recipe is expanded once per summary, for one unit, and scaled by every
// parent that needs it. Diamond-shaped graphs stay linear in the number of
// recipes instead of the number of paths.

use crate::entities::{Entry, Ingredient, Recipe};
use crate::error::ResolutionError;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Recipe nesting allowed before a summary gives up
pub const DEFAULT_MAX_DEPTH: usize = 64;

// ============================================================================
// SUMMARY
// ============================================================================

/// Everything it takes to make one unit of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub name: String,
    pub cook_time: u64,

    /// Base ingredients, merged by name, in first-seen order
    pub ingredients: Vec<IngredientQuantity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    pub name: String,
    pub quantity: u64,
}

impl Summary {
    /// Quantity of a base ingredient, if the recipe uses it at all
    pub fn quantity_of(&self, name: &str) -> Option<u64> {
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.name == name)
            .map(|ingredient| ingredient.quantity)
    }
}

// ============================================================================
// EXPANSION
// ============================================================================

/// Result of expanding one subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub cook_time: u64,

    /// Ingredient name → total quantity, in first-seen order
    pub ingredients: IndexMap<String, u64>,
}

impl Expansion {
    /// `units` of a single ingredient
    fn leaf(ingredient: &Ingredient, units: u64) -> Result<Self, ResolutionError> {
        let cook_time = ingredient
            .cook_time
            .checked_mul(units)
            .ok_or_else(|| ResolutionError::Overflow(ingredient.name.clone()))?;

        let mut ingredients = IndexMap::new();
        ingredients.insert(ingredient.name.clone(), units);

        Ok(Expansion { cook_time, ingredients })
    }

    /// This expansion `multiplier` times over; order is unchanged
    fn scaled(&self, multiplier: u64, name: &str) -> Result<Self, ResolutionError> {
        if multiplier == 1 {
            return Ok(self.clone());
        }

        let mut ingredients = IndexMap::with_capacity(self.ingredients.len());
        for (ingredient, quantity) in &self.ingredients {
            let total = quantity
                .checked_mul(multiplier)
                .ok_or_else(|| ResolutionError::Overflow(ingredient.clone()))?;
            ingredients.insert(ingredient.clone(), total);
        }

        let cook_time = self
            .cook_time
            .checked_mul(multiplier)
            .ok_or_else(|| ResolutionError::Overflow(name.to_string()))?;

        Ok(Expansion { cook_time, ingredients })
    }

    /// Merge a child expansion into this one.
    ///
    /// Names already present keep their position and grow; new names go last.
    fn absorb(&mut self, child: Expansion, parent: &str) -> Result<(), ResolutionError> {
        let overflow = || ResolutionError::Overflow(parent.to_string());

        self.cook_time = self.cook_time.checked_add(child.cook_time).ok_or_else(overflow)?;

        for (name, quantity) in child.ingredients {
            let total = self.ingredients.entry(name).or_insert(0);
            *total = total.checked_add(quantity).ok_or_else(overflow)?;
        }

        Ok(())
    }

    pub fn into_summary(self, name: impl Into<String>) -> Summary {
        Summary {
            name: name.into(),
            cook_time: self.cook_time,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|(name, quantity)| IngredientQuantity { name, quantity })
                .collect(),
        }
    }
}

// ============================================================================
// TRAVERSAL STATE
// ============================================================================

/// A recipe already expanded during this traversal
#[derive(Debug)]
struct Finished {
    /// One unit of the recipe
    unit: Expansion,

    /// Recipe levels from this recipe down to its deepest ingredient, itself included
    height: usize,
}

/// Bookkeeping for one summary: the recipes being expanded right now, and
/// the ones already done.
#[derive(Debug, Default)]
pub struct Traversal {
    path: IndexSet<String>,
    finished: HashMap<String, Finished>,
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recipes currently being expanded, root first
    pub fn path(&self) -> &IndexSet<String> {
        &self.path
    }

    /// Number of distinct recipes expanded so far
    pub fn expanded(&self) -> usize {
        self.finished.len()
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Read-only walker over a snapshot of cookbook entries.
///
/// Cycles are caught with the set of recipes on the current path; nesting
/// beyond `max_depth` recipes fails instead of recursing further.
pub struct Resolver<'a> {
    entries: &'a IndexMap<String, Entry>,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(entries: &'a IndexMap<String, Entry>) -> Self {
        Resolver {
            entries,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Builder: cap recipe nesting (at least one level)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Summarize one unit of the recipe called `name`
    pub fn summarize(&self, name: &str) -> Result<Summary, ResolutionError> {
        let recipe = match self.entries.get(name) {
            Some(Entry::Recipe(recipe)) => recipe,
            Some(Entry::Ingredient(_)) => return Err(ResolutionError::NotARecipe(name.to_string())),
            None => return Err(ResolutionError::NotFound(name.to_string())),
        };

        let mut traversal = Traversal::new();
        let (expansion, height) = self.recipe_unit(recipe, &mut traversal)?;

        debug!(
            name = %name,
            cook_time = expansion.cook_time,
            ingredients = expansion.ingredients.len(),
            recipes = traversal.expanded(),
            depth = height,
            "recipe summarized"
        );

        Ok(expansion.into_summary(name))
    }

    /// Expand whatever `name` refers to, `multiplier` times over
    pub fn expand(
        &self,
        name: &str,
        multiplier: u64,
        traversal: &mut Traversal,
    ) -> Result<Expansion, ResolutionError> {
        let (unit, _) = self.unit_of(name, traversal)?;
        unit.scaled(multiplier, name)
    }

    /// One unit of `name` and its recipe height (0 for an ingredient)
    fn unit_of(&self, name: &str, traversal: &mut Traversal) -> Result<(Expansion, usize), ResolutionError> {
        match self.entries.get(name) {
            Some(Entry::Ingredient(ingredient)) => Ok((Expansion::leaf(ingredient, 1)?, 0)),
            Some(Entry::Recipe(recipe)) => self.recipe_unit(recipe, traversal),
            None => Err(ResolutionError::BrokenReference(name.to_string())),
        }
    }

    fn recipe_unit(
        &self,
        recipe: &Recipe,
        traversal: &mut Traversal,
    ) -> Result<(Expansion, usize), ResolutionError> {
        if traversal.path.contains(&recipe.name) {
            let mut cycle: Vec<String> = traversal.path.iter().cloned().collect();
            cycle.push(recipe.name.clone());
            return Err(ResolutionError::CyclicReference(cycle));
        }

        // A reused recipe must still fit below its current position
        if let Some(done) = traversal.finished.get(&recipe.name) {
            if traversal.path.len() + done.height > self.max_depth {
                return Err(ResolutionError::DepthLimitExceeded(self.max_depth));
            }
            return Ok((done.unit.clone(), done.height));
        }

        if traversal.path.len() >= self.max_depth {
            return Err(ResolutionError::DepthLimitExceeded(self.max_depth));
        }

        traversal.path.insert(recipe.name.clone());

        let mut unit = Expansion::default();
        let mut below = 0;
        for item in &recipe.required_items {
            let (child, height) = self.unit_of(&item.name, traversal)?;
            unit.absorb(child.scaled(item.quantity, &item.name)?, &recipe.name)?;
            below = below.max(height);
        }

        traversal.path.pop();

        let height = below + 1;
        traversal.finished.insert(
            recipe.name.clone(),
            Finished {
                unit: unit.clone(),
                height,
            },
        );

        Ok((unit, height))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: Vec<Entry>) -> IndexMap<String, Entry> {
        entries
            .into_iter()
            .map(|entry| (entry.name().to_string(), entry))
            .collect()
    }

    fn spaghetti_catalog() -> IndexMap<String, Entry> {
        catalog(vec![
            Recipe::new("Skibidi Spaghetti")
                .with_item("Meatball", 3)
                .with_item("Pasta", 1)
                .with_item("Tomato", 2)
                .into(),
            Recipe::new("Meatball").with_item("Beef", 2).with_item("Egg", 1).into(),
            Recipe::new("Pasta").with_item("Flour", 3).with_item("Egg", 1).into(),
            Ingredient::new("Beef", 5).into(),
            Ingredient::new("Egg", 3).into(),
            Ingredient::new("Flour", 0).into(),
            Ingredient::new("Tomato", 2).into(),
        ])
    }

    #[test]
    fn test_summarize_spaghetti() {
        let entries = spaghetti_catalog();
        let summary = Resolver::new(&entries).summarize("Skibidi Spaghetti").unwrap();

        assert_eq!(summary.name, "Skibidi Spaghetti");
        assert_eq!(summary.cook_time, 46);

        let ingredients: Vec<(&str, u64)> = summary
            .ingredients
            .iter()
            .map(|i| (i.name.as_str(), i.quantity))
            .collect();
        assert_eq!(ingredients, vec![("Beef", 6), ("Egg", 4), ("Flour", 3), ("Tomato", 2)]);
    }

    #[test]
    fn test_summarize_sub_recipe() {
        let entries = spaghetti_catalog();
        let summary = Resolver::new(&entries).summarize("Meatball").unwrap();

        assert_eq!(summary.cook_time, 13);
        assert_eq!(summary.quantity_of("Beef"), Some(2));
        assert_eq!(summary.quantity_of("Egg"), Some(1));
        assert_eq!(summary.quantity_of("Tomato"), None);
    }

    #[test]
    fn test_summarize_not_found_and_not_a_recipe() {
        let entries = spaghetti_catalog();
        let resolver = Resolver::new(&entries);

        assert_eq!(
            resolver.summarize("Lasagne"),
            Err(ResolutionError::NotFound("Lasagne".to_string()))
        );
        assert_eq!(
            resolver.summarize("Beef"),
            Err(ResolutionError::NotARecipe("Beef".to_string()))
        );
    }

    #[test]
    fn test_broken_reference_fails_whole_summary() {
        let entries = catalog(vec![
            Recipe::new("Cake").with_item("Flour", 2).with_item("Sponge", 1).into(),
            Ingredient::new("Flour", 1).into(),
        ]);

        assert_eq!(
            Resolver::new(&entries).summarize("Cake"),
            Err(ResolutionError::BrokenReference("Sponge".to_string()))
        );
    }

    #[test]
    fn test_empty_recipe_summarizes_to_nothing() {
        let entries = catalog(vec![Recipe::new("Air").into()]);
        let summary = Resolver::new(&entries).summarize("Air").unwrap();

        assert_eq!(summary.cook_time, 0);
        assert!(summary.ingredients.is_empty());
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let entries = catalog(vec![Recipe::new("Ouroboros").with_item("Ouroboros", 1).into()]);

        assert_eq!(
            Resolver::new(&entries).summarize("Ouroboros"),
            Err(ResolutionError::CyclicReference(vec![
                "Ouroboros".to_string(),
                "Ouroboros".to_string()
            ]))
        );
    }

    #[test]
    fn test_transitive_cycle_reports_path() {
        let entries = catalog(vec![
            Recipe::new("Bread").with_item("Dough", 1).into(),
            Recipe::new("Dough").with_item("Starter", 1).into(),
            Recipe::new("Starter").with_item("Dough", 1).into(),
        ]);

        assert_eq!(
            Resolver::new(&entries).summarize("Bread"),
            Err(ResolutionError::CyclicReference(vec![
                "Bread".to_string(),
                "Dough".to_string(),
                "Starter".to_string(),
                "Dough".to_string()
            ]))
        );
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // Egg reached through two sibling recipes
        let entries = catalog(vec![
            Recipe::new("Brunch").with_item("Omelette", 1).with_item("Custard", 2).into(),
            Recipe::new("Omelette").with_item("Egg", 3).into(),
            Recipe::new("Custard").with_item("Egg", 2).with_item("Milk", 1).into(),
            Ingredient::new("Egg", 1).into(),
            Ingredient::new("Milk", 4).into(),
        ]);

        let summary = Resolver::new(&entries).summarize("Brunch").unwrap();
        assert_eq!(summary.quantity_of("Egg"), Some(7));
        assert_eq!(summary.quantity_of("Milk"), Some(2));
        assert_eq!(summary.cook_time, 7 + 8);
        assert_eq!(summary.ingredients.len(), 2);
    }

    #[test]
    fn test_depth_limit() {
        let entries = catalog(vec![
            Recipe::new("Level One").with_item("Level Two", 1).into(),
            Recipe::new("Level Two").with_item("Level Three", 1).into(),
            Recipe::new("Level Three").with_item("Salt", 1).into(),
            Ingredient::new("Salt", 1).into(),
        ]);

        assert!(Resolver::new(&entries).with_max_depth(3).summarize("Level One").is_ok());
        assert_eq!(
            Resolver::new(&entries).with_max_depth(2).summarize("Level One"),
            Err(ResolutionError::DepthLimitExceeded(2))
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let entries = catalog(vec![
            Recipe::new("Feast").with_item("Banquet", u64::MAX).into(),
            Recipe::new("Banquet").with_item("Salt", 2).into(),
            Ingredient::new("Salt", 1).into(),
        ]);

        assert_eq!(
            Resolver::new(&entries).summarize("Feast"),
            Err(ResolutionError::Overflow("Salt".to_string()))
        );
    }

    #[test]
    fn test_depth_limit_applies_to_reused_recipes() {
        // Mole is first expanded one level down, then reused two levels down
        let entries = catalog(vec![
            Recipe::new("Top").with_item("Mole", 1).with_item("Detour", 1).into(),
            Recipe::new("Detour").with_item("Mole", 1).into(),
            Recipe::new("Mole").with_item("Salt", 1).into(),
            Ingredient::new("Salt", 1).into(),
        ]);

        assert_eq!(
            Resolver::new(&entries).with_max_depth(2).summarize("Top"),
            Err(ResolutionError::DepthLimitExceeded(2))
        );

        let summary = Resolver::new(&entries).with_max_depth(3).summarize("Top").unwrap();
        assert_eq!(summary.quantity_of("Salt"), Some(2));
    }

    #[test]
    fn test_zero_depth_is_clamped_to_one() {
        let entries = spaghetti_catalog();

        assert!(Resolver::new(&entries).with_max_depth(0).summarize("Meatball").is_ok());
        assert_eq!(
            Resolver::new(&entries).with_max_depth(0).summarize("Skibidi Spaghetti"),
            Err(ResolutionError::DepthLimitExceeded(1))
        );
    }

    #[test]
    fn test_wide_diamond_ladder_expands_each_recipe_once() {
        // Every rung needs both recipes of the next rung: 2^40 paths, 81 recipes
        const RUNGS: usize = 40;

        let rung = |side: &str, level: usize| format!("{} {}", side, level);
        let mut entries: Vec<Entry> = vec![Ingredient::new("Salt", 1).into()];
        entries.push(
            Recipe::new("Top")
                .with_item(rung("Left", 1), 1)
                .with_item(rung("Right", 1), 1)
                .into(),
        );
        for level in 1..=RUNGS {
            for side in ["Left", "Right"] {
                let recipe = if level == RUNGS {
                    Recipe::new(rung(side, level)).with_item("Salt", 1)
                } else {
                    Recipe::new(rung(side, level))
                        .with_item(rung("Left", level + 1), 1)
                        .with_item(rung("Right", level + 1), 1)
                };
                entries.push(recipe.into());
            }
        }
        let entries = catalog(entries);

        let resolver = Resolver::new(&entries);
        let mut traversal = Traversal::new();
        let expansion = resolver.expand("Top", 1, &mut traversal).unwrap();

        assert_eq!(expansion.ingredients.get("Salt"), Some(&(1u64 << RUNGS)));
        assert_eq!(expansion.cook_time, 1u64 << RUNGS);
        assert_eq!(traversal.expanded(), 2 * RUNGS + 1);
        assert!(traversal.path().is_empty());
    }

    #[test]
    fn test_expand_ingredient_directly() {
        let entries = spaghetti_catalog();
        let mut traversal = Traversal::new();

        let expansion = Resolver::new(&entries).expand("Beef", 4, &mut traversal).unwrap();
        assert_eq!(expansion.cook_time, 20);
        assert_eq!(expansion.ingredients.get("Beef"), Some(&4));
        assert!(traversal.path().is_empty());
        assert_eq!(traversal.expanded(), 0);
    }

    #[test]
    fn test_reused_recipe_keeps_first_seen_order() {
        // Pasta appears under two parents; its Flour/Egg order never changes
        let entries = catalog(vec![
            Recipe::new("Banquet").with_item("Tomato", 1).with_item("Pasta", 2).with_item("Bake", 1).into(),
            Recipe::new("Bake").with_item("Egg", 1).with_item("Pasta", 1).into(),
            Recipe::new("Pasta").with_item("Flour", 3).with_item("Egg", 1).into(),
            Ingredient::new("Tomato", 2).into(),
            Ingredient::new("Flour", 0).into(),
            Ingredient::new("Egg", 3).into(),
        ]);

        let summary = Resolver::new(&entries).summarize("Banquet").unwrap();
        let ingredients: Vec<(&str, u64)> = summary
            .ingredients
            .iter()
            .map(|i| (i.name.as_str(), i.quantity))
            .collect();

        assert_eq!(ingredients, vec![("Tomato", 1), ("Flour", 9), ("Egg", 4)]);
        assert_eq!(summary.cook_time, 2 + 4 * 3);
    }

    #[test]
    fn test_scaled_multiplies_everything() {
        let unit = Expansion::leaf(&Ingredient::new("Egg", 3), 2).unwrap();
        let scaled = unit.scaled(5, "Omelette").unwrap();

        assert_eq!(scaled.cook_time, 30);
        assert_eq!(scaled.ingredients.get("Egg"), Some(&10));
        assert_eq!(
            unit.scaled(u64::MAX, "Omelette"),
            Err(ResolutionError::Overflow("Egg".to_string()))
        );
    }

    #[test]
    fn test_absorb_keeps_first_seen_order() {
        let mut parent = Expansion::default();
        let first = Expansion::leaf(&Ingredient::new("Egg", 1), 2).unwrap();
        let second = Expansion::leaf(&Ingredient::new("Milk", 1), 1).unwrap();
        let third = Expansion::leaf(&Ingredient::new("Egg", 1), 5).unwrap();

        parent.absorb(first, "Custard").unwrap();
        parent.absorb(second, "Custard").unwrap();
        parent.absorb(third, "Custard").unwrap();

        let order: Vec<(&String, &u64)> = parent.ingredients.iter().collect();
        assert_eq!(order, vec![(&"Egg".to_string(), &7), (&"Milk".to_string(), &1)]);
        assert_eq!(parent.cook_time, 8);
    }
}
