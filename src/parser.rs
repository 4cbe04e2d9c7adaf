// 📥 Entry Parser - Untrusted JSON → typed Entry
//
// Clients submit loosely shaped JSON. Everything is checked here, before the
// cookbook is touched, so the store only ever holds well-formed entries.
//
// Accepted shapes:
//   {"type": "ingredient", "name": "Egg", "cookTime": 3}
//   {"type": "recipe", "name": "Pasta", "requiredItems": [{"name": "Flour", "quantity": 3}]}

use crate::entities::{Entry, EntryKind, Ingredient, Recipe, RequiredItem};
use crate::error::ValidationError;
use crate::normalize::normalize_name;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Fields an ingredient may carry, nothing more
const INGREDIENT_FIELDS: [&str; 3] = ["name", "type", "cookTime"];

/// Fields each required item must carry, nothing more
const REQUIRED_ITEM_FIELDS: [&str; 2] = ["name", "quantity"];

// ============================================================================
// NAME
// ============================================================================

/// Read and normalize the `name` field of a raw entry
pub fn parse_name(raw: &Value) -> Result<String, ValidationError> {
    raw.get("name")
        .and_then(Value::as_str)
        .and_then(normalize_name)
        .ok_or(ValidationError::InvalidName)
}

// ============================================================================
// BODY
// ============================================================================

/// Parse the kind-specific part of a raw entry under an already-normalized name
pub fn parse_body(name: String, raw: &Value) -> Result<Entry, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::InvalidName)?;

    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(EntryKind::from_wire)
        .ok_or(ValidationError::InvalidKind)?;

    match kind {
        EntryKind::Recipe => parse_recipe(name, object).map(Entry::Recipe),
        EntryKind::Ingredient => parse_ingredient(name, object).map(Entry::Ingredient),
    }
}

/// Parse a complete raw entry (name + body) without consulting any cookbook
pub fn parse_entry(raw: &Value) -> Result<Entry, ValidationError> {
    let name = parse_name(raw)?;
    parse_body(name, raw)
}

fn parse_ingredient(name: String, object: &Map<String, Value>) -> Result<Ingredient, ValidationError> {
    // as_u64 rejects negatives, floats, booleans and strings alike
    let cook_time = object
        .get("cookTime")
        .and_then(Value::as_u64)
        .ok_or(ValidationError::InvalidCookTime)?;

    let unexpected: Vec<String> = object
        .keys()
        .filter(|key| !INGREDIENT_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect();

    if !unexpected.is_empty() {
        return Err(ValidationError::UnexpectedFields(unexpected));
    }

    Ok(Ingredient { name, cook_time })
}

fn parse_recipe(name: String, object: &Map<String, Value>) -> Result<Recipe, ValidationError> {
    let items = object
        .get("requiredItems")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::InvalidRequiredItems("requiredItems must be a list".to_string()))?;

    let required_items = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_required_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    check_required_items(&required_items)?;

    Ok(Recipe { name, required_items })
}

fn parse_required_item(index: usize, item: &Value) -> Result<RequiredItem, ValidationError> {
    let malformed = || {
        ValidationError::InvalidRequiredItems(format!(
            "item {} must be exactly {{\"name\": string, \"quantity\": integer}}",
            index
        ))
    };

    let object = item.as_object().ok_or_else(malformed)?;

    if object.len() != REQUIRED_ITEM_FIELDS.len()
        || !REQUIRED_ITEM_FIELDS.iter().all(|field| object.contains_key(*field))
    {
        return Err(malformed());
    }

    let name = object.get("name").and_then(Value::as_str).ok_or_else(malformed)?;
    let quantity = object.get("quantity").and_then(Value::as_u64).ok_or_else(malformed)?;

    Ok(RequiredItem::new(name, quantity))
}

/// Structural rules every stored recipe obeys: positive quantities, one line per name
pub fn check_required_items(items: &[RequiredItem]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for item in items {
        if item.quantity == 0 {
            return Err(ValidationError::InvalidRequiredItems(format!(
                "quantity of '{}' must be at least 1",
                item.name
            )));
        }

        if !seen.insert(item.name.as_str()) {
            return Err(ValidationError::InvalidRequiredItems(format!(
                "'{}' appears more than once",
                item.name
            )));
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
