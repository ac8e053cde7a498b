use serde::{Deserialize, Serialize};

use crate::amounts::format_amount;

/// A nutrient that can be bounded in a constraint set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Protein,
    Calories,
    Carbs,
    Fat,
}

impl Nutrient {
    /// Prompt order: protein first, then calories, carbs, fat.
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Protein,
        Nutrient::Calories,
        Nutrient::Carbs,
        Nutrient::Fat,
    ];

    /// JSON key used by the extraction prompt.
    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Calories => "calories",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
        }
    }

    /// Human-readable quantity, e.g. "30g protein" or "400 calories".
    pub fn describe(self, value: f64) -> String {
        match self {
            Nutrient::Calories => format!("{} calories", format_amount(value)),
            other => format!("{}g {}", format_amount(value), other.key()),
        }
    }
}

/// Optional lower/upper bounds on calories and macros.
///
/// An unset bound means "unbounded". Built per request and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NutritionConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fat: Option<f64>,
}

impl NutritionConstraint {
    /// `(min, max)` for one nutrient.
    pub fn bounds(&self, nutrient: Nutrient) -> (Option<f64>, Option<f64>) {
        match nutrient {
            Nutrient::Protein => (self.min_protein, self.max_protein),
            Nutrient::Calories => (self.min_calories, self.max_calories),
            Nutrient::Carbs => (self.min_carbs, self.max_carbs),
            Nutrient::Fat => (self.min_fat, self.max_fat),
        }
    }

    pub fn set_min(&mut self, nutrient: Nutrient, value: Option<f64>) {
        match nutrient {
            Nutrient::Protein => self.min_protein = value,
            Nutrient::Calories => self.min_calories = value,
            Nutrient::Carbs => self.min_carbs = value,
            Nutrient::Fat => self.min_fat = value,
        }
    }

    pub fn set_max(&mut self, nutrient: Nutrient, value: Option<f64>) {
        match nutrient {
            Nutrient::Protein => self.max_protein = value,
            Nutrient::Calories => self.max_calories = value,
            Nutrient::Carbs => self.max_carbs = value,
            Nutrient::Fat => self.max_fat = value,
        }
    }

    /// True when every bound is unset.
    pub fn is_empty(&self) -> bool {
        Nutrient::ALL
            .iter()
            .all(|&n| self.bounds(n) == (None, None))
    }

    /// Every set bound, in prompt order, as `(nutrient, min, max)` with at least one side set.
    pub fn set_bounds(&self) -> impl Iterator<Item = (Nutrient, Option<f64>, Option<f64>)> + '_ {
        Nutrient::ALL.into_iter().filter_map(|n| {
            let (min, max) = self.bounds(n);
            (min.is_some() || max.is_some()).then_some((n, min, max))
        })
    }

    /// The first bound that is negative or not a finite number, if any.
    pub fn first_invalid_bound(&self) -> Option<&'static str> {
        const NAMES: [(&str, &str); 4] = [
            ("minProtein", "maxProtein"),
            ("minCalories", "maxCalories"),
            ("minCarbs", "maxCarbs"),
            ("minFat", "maxFat"),
        ];
        let invalid = |v: Option<f64>| v.map(|v| !v.is_finite() || v < 0.0).unwrap_or(false);

        Nutrient::ALL
            .iter()
            .zip(NAMES)
            .find_map(|(&n, (min_name, max_name))| {
                let (min, max) = self.bounds(n);
                if invalid(min) {
                    Some(min_name)
                } else if invalid(max) {
                    Some(max_name)
                } else {
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_constraint() {
        assert!(NutritionConstraint::default().is_empty());
        let c = NutritionConstraint {
            max_fat: Some(20.0),
            ..Default::default()
        };
        assert!(!c.is_empty());
    }

    #[test]
    fn test_serializes_camel_case_and_skips_unset() {
        let c = NutritionConstraint {
            min_protein: Some(30.0),
            max_calories: Some(500.0),
            ..Default::default()
        };
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"minProtein": 30.0, "maxCalories": 500.0})
        );
    }

    #[test]
    fn test_set_bounds_in_prompt_order() {
        let c = NutritionConstraint {
            max_fat: Some(10.0),
            min_protein: Some(25.0),
            max_calories: Some(400.0),
            ..Default::default()
        };
        let order: Vec<Nutrient> = c.set_bounds().map(|(n, _, _)| n).collect();
        assert_eq!(
            order,
            vec![Nutrient::Protein, Nutrient::Calories, Nutrient::Fat]
        );
    }

    #[test]
    fn test_invalid_bound_detection() {
        let c = NutritionConstraint {
            min_carbs: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(c.first_invalid_bound(), Some("minCarbs"));

        let c = NutritionConstraint {
            max_fat: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(c.first_invalid_bound(), Some("maxFat"));

        let c = NutritionConstraint {
            min_protein: Some(0.0),
            ..Default::default()
        };
        assert_eq!(c.first_invalid_bound(), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(Nutrient::Protein.describe(30.0), "30g protein");
        assert_eq!(Nutrient::Calories.describe(450.5), "450.5 calories");
    }
}
