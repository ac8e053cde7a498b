//! Ingredient list parsing.
//!
//! Recipe ingredients are stored as one comma-delimited string such as
//! "150 g chicken breast, 1 1/2 cups rice (cooked), salt". This module splits
//! that string and pulls a leading amount and unit off each entry.

use std::sync::LazyLock;

use serde::Serialize;

use crate::amounts::{format_amount, parse_amount};

/// One entry of an ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIngredient {
    pub amount: Option<String>,
    pub unit: Option<String>,
    pub item: String,
    pub raw: String,
}

/// Known units, longest first so "tablespoons" wins over "tb".
static UNITS_SORTED: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut units = UNITS.to_vec();
    units.sort_by(|a, b| b.len().cmp(&a.len()));
    units
});

const UNITS: &[&str] = &[
    // volume
    "fluid ounces", "fluid ounce", "fl oz", "tablespoons", "tablespoon", "tbsp", "tbs",
    "teaspoons", "teaspoon", "tsp", "cups", "cup", "pints", "pint", "quarts", "quart",
    "milliliters", "milliliter", "ml", "liters", "liter", "litres", "litre", "l",
    // weight
    "ounces", "ounce", "oz", "pounds", "pound", "lbs", "lb", "kilograms", "kilogram", "kg",
    "grams", "gram", "g", "milligrams", "milligram", "mg",
    // count
    "cloves", "clove", "slices", "slice", "cans", "can", "jars", "jar", "packages",
    "package", "pkg", "bunches", "bunch", "sprigs", "sprig", "stalks", "stalk", "sticks",
    "stick", "pinches", "pinch", "handfuls", "handful", "pieces", "piece", "scoops", "scoop",
];

/// Split a comma-delimited ingredient list.
///
/// Commas inside parentheses do not split. Blank entries are dropped.
pub fn split_ingredient_list(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' | '\n' if depth == 0 => {
                push_entry(&mut entries, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_entry(&mut entries, &current);

    entries
}

fn push_entry(entries: &mut Vec<String>, entry: &str) {
    let entry = entry.trim();
    if !entry.is_empty() {
        entries.push(entry.to_string());
    }
}

/// Parse one ingredient entry into amount, unit and item.
///
/// Best effort: text with no recognisable amount is kept whole as the item.
pub fn parse_ingredient(raw: &str) -> ParsedIngredient {
    let raw = raw.trim();

    let (amount, rest) = extract_amount(raw);
    let (unit, rest) = if amount.is_some() {
        extract_unit(rest)
    } else {
        (None, rest)
    };

    let item = rest.trim();
    let item = if item.is_empty() { raw } else { item };

    ParsedIngredient {
        amount,
        unit,
        item: item.to_string(),
        raw: raw.to_string(),
    }
}

/// Quantity text for `servings` portions of a single-serving ingredient.
///
/// A parseable amount is multiplied; otherwise the quantity reads
/// "{servings} servings of {item}".
pub fn scale_ingredient(parsed: &ParsedIngredient, servings: u32) -> String {
    let scaled = parsed
        .amount
        .as_deref()
        .and_then(parse_amount)
        .map(|amount| format_amount(amount * f64::from(servings)));

    match (scaled, &parsed.unit) {
        (Some(amount), Some(unit)) => format!("{} {} {}", amount, unit, parsed.item),
        (Some(amount), None) => format!("{} {}", amount, parsed.item),
        (None, _) => format!("{} servings of {}", servings, parsed.item),
    }
}

/// Leading amount and what follows it.
fn extract_amount(s: &str) -> (Option<String>, &str) {
    let s = s.trim_start();
    let (first, after_first) = split_word(s);
    let (second, after_second) = split_word(after_first.trim_start());

    // "1 1/2", with any run of whitespace between the parts
    if is_whole_number(first) && is_fraction(second) {
        return (Some(format!("{} {}", first, second)), after_second);
    }

    if is_fraction(first) {
        return (Some(first.to_string()), &s[first.len()..]);
    }

    // integer or decimal, possibly glued to the unit as in "150g"
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let number = &s[..end];
    if number.chars().any(|c| c.is_ascii_digit()) && parse_amount(number).is_some() {
        return (Some(number.to_string()), &s[end..]);
    }

    (None, s)
}

/// First whitespace-delimited word and the text after it.
fn split_word(s: &str) -> (&str, &str) {
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    s.split_at(end)
}

fn is_whole_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn is_fraction(s: &str) -> bool {
    match s.split_once('/') {
        Some((numerator, denominator)) => {
            is_whole_number(numerator) && is_whole_number(denominator)
        }
        None => false,
    }
}

/// Leading unit and what follows it.
fn extract_unit(s: &str) -> (Option<String>, &str) {
    let s = s.trim_start();
    let lower = s.to_lowercase();

    for &unit in UNITS_SORTED.iter() {
        if !lower.starts_with(unit) || !s.is_char_boundary(unit.len()) {
            continue;
        }
        let after = &s[unit.len()..];
        if after.is_empty() || after.starts_with(|c: char| c.is_whitespace() || c == '.') {
            let after = after.strip_prefix('.').unwrap_or(after);
            return (Some(unit.to_string()), after.trim_start());
        }
    }

    (None, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_list() {
        assert_eq!(
            split_ingredient_list("2 eggs, 1 cup rice,  salt "),
            vec!["2 eggs", "1 cup rice", "salt"]
        );
    }

    #[test]
    fn test_split_keeps_parenthesised_commas() {
        assert_eq!(
            split_ingredient_list("1 cup beans (black, rinsed), 1 lime"),
            vec!["1 cup beans (black, rinsed)", "1 lime"]
        );
    }

    #[test]
    fn test_split_drops_blank_entries() {
        assert_eq!(split_ingredient_list(" , ,tofu,,"), vec!["tofu"]);
        assert!(split_ingredient_list("").is_empty());
    }

    #[test]
    fn test_parse_amount_unit_item() {
        let parsed = parse_ingredient("2 cups flour");
        assert_eq!(parsed.amount.as_deref(), Some("2"));
        assert_eq!(parsed.unit.as_deref(), Some("cups"));
        assert_eq!(parsed.item, "flour");
    }

    #[test]
    fn test_parse_mixed_number_and_fraction() {
        let parsed = parse_ingredient("1 1/2 tbsp olive oil");
        assert_eq!(parsed.amount.as_deref(), Some("1 1/2"));
        assert_eq!(parsed.unit.as_deref(), Some("tbsp"));
        assert_eq!(parsed.item, "olive oil");

        let parsed = parse_ingredient("1/2 lemon");
        assert_eq!(parsed.amount.as_deref(), Some("1/2"));
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.item, "lemon");
    }

    #[test]
    fn test_parse_mixed_number_with_irregular_spacing() {
        for raw in ["1  1/2 cups rice", "1\u{00A0}1/2 cups rice", "1 \t1/2 cups rice"] {
            let parsed = parse_ingredient(raw);
            assert_eq!(parsed.amount.as_deref(), Some("1 1/2"), "{raw:?}");
            assert_eq!(parsed.unit.as_deref(), Some("cups"), "{raw:?}");
            assert_eq!(parsed.item, "rice", "{raw:?}");
            assert_eq!(scale_ingredient(&parsed, 2), "3 cups rice", "{raw:?}");
        }
    }

    #[test]
    fn test_parse_glued_unit() {
        let parsed = parse_ingredient("150g chicken breast");
        assert_eq!(parsed.amount.as_deref(), Some("150"));
        assert_eq!(parsed.unit.as_deref(), Some("g"));
        assert_eq!(parsed.item, "chicken breast");
    }

    #[test]
    fn test_parse_unit_needs_word_boundary() {
        let parsed = parse_ingredient("2 garlic cloves");
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.item, "garlic cloves");
    }

    #[test]
    fn test_parse_without_amount() {
        let parsed = parse_ingredient("Salt to taste");
        assert_eq!(parsed.amount, None);
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.item, "Salt to taste");
    }

    #[test]
    fn test_scale_parseable_amount() {
        assert_eq!(scale_ingredient(&parse_ingredient("150 g chicken"), 3), "450 g chicken");
        assert_eq!(scale_ingredient(&parse_ingredient("1/2 lemon"), 3), "1.5 lemon");
        assert_eq!(scale_ingredient(&parse_ingredient("1 1/2 cups rice"), 2), "3 cups rice");
    }

    #[test]
    fn test_scale_unparseable_amount() {
        assert_eq!(
            scale_ingredient(&parse_ingredient("fresh basil"), 4),
            "4 servings of fresh basil"
        );
    }
}
