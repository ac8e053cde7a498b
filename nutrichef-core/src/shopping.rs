//! Shopping search links for a recipe's ingredients.

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::ingredient_parser::{parse_ingredient, scale_ingredient, split_ingredient_list};

/// Search page used when none is configured.
pub const DEFAULT_SEARCH_URL: &str = "https://www.amazon.com/s";

#[derive(Debug, Error)]
pub enum ShoppingError {
    #[error("servings must be at least 1")]
    InvalidServings,

    #[error("recipe has no ingredients")]
    NoIngredients,

    #[error("invalid search url: {0}")]
    InvalidSearchUrl(#[from] url::ParseError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShoppingItem {
    /// The ingredient as written in the recipe.
    pub ingredient: String,
    /// Quantity scaled to the requested servings.
    pub quantity: String,
    pub search_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShoppingList {
    pub servings: u32,
    pub items: Vec<ShoppingItem>,
    /// One search covering every item.
    pub search_url: String,
}

/// Build per-ingredient search links for `servings` portions.
pub fn build_shopping_list(
    ingredients: &str,
    servings: u32,
    search_base: &str,
) -> Result<ShoppingList, ShoppingError> {
    if servings == 0 {
        return Err(ShoppingError::InvalidServings);
    }

    let entries = split_ingredient_list(ingredients);
    if entries.is_empty() {
        return Err(ShoppingError::NoIngredients);
    }

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let quantity = scale_ingredient(&parse_ingredient(&entry), servings);
        let search_url = search_link(search_base, &quantity)?;
        items.push(ShoppingItem {
            ingredient: entry,
            quantity,
            search_url,
        });
    }

    let combined: Vec<&str> = items.iter().map(|i| i.quantity.as_str()).collect();
    let search_url = search_link(search_base, &combined.join(", "))?;

    Ok(ShoppingList {
        servings,
        items,
        search_url,
    })
}

fn search_link(base: &str, query: &str) -> Result<String, ShoppingError> {
    Ok(Url::parse_with_params(base, &[("k", query)])?.to_string())
}
