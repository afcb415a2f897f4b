use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RecipeError;

/// Nutrient code for protein
pub const PROTEIN: &str = "PROCNT";
/// Nutrient code for carbohydrates
pub const CARBS: &str = "CHOCDF";
/// Nutrient code for total fat
pub const FAT: &str = "FAT";

/// A single recipe as returned by the search API.
///
/// Field names on the wire follow the API (`yield`, `ingredientLines`,
/// `totalNutrients`), and favorites are persisted in the same shape.
/// Two recipes are equal when their `uri` matches, whatever the other fields hold.
/// Only `uri` and `label` are required; other fields that are missing or
/// `null` fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub uri: String,
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    /// Link to the original source page
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "yield", default, deserialize_with = "null_as_default")]
    pub servings: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub calories: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredient_lines: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_nutrients: BTreeMap<String, Nutrient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// `None` when the API omits the amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Recipe {
    pub fn rounded_calories(&self) -> i64 {
        self.calories.round() as i64
    }

    /// Rounded amount of a nutrient in grams, `None` when the record does
    /// not carry it or carries no amount.
    pub fn nutrient_grams(&self, code: &str) -> Option<i64> {
        self.total_nutrients
            .get(code)
            .and_then(|n| n.quantity)
            .map(|q| q.round() as i64)
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

/// Response envelope of the recipe search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    pub recipe: Recipe,
}

impl SearchResponse {
    pub fn into_recipes(self) -> Vec<Recipe> {
        self.hits.into_iter().map(|hit| hit.recipe).collect()
    }
}

/// Diet filter understood by the search API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietTag {
    Balanced,
    HighFiber,
    HighProtein,
    LowCarb,
    LowFat,
    LowSodium,
}

impl DietTag {
    pub const ALL: [DietTag; 6] = [
        DietTag::Balanced,
        DietTag::HighFiber,
        DietTag::HighProtein,
        DietTag::LowCarb,
        DietTag::LowFat,
        DietTag::LowSodium,
    ];

    /// Value sent in the `diet` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            DietTag::Balanced => "balanced",
            DietTag::HighFiber => "high-fiber",
            DietTag::HighProtein => "high-protein",
            DietTag::LowCarb => "low-carb",
            DietTag::LowFat => "low-fat",
            DietTag::LowSodium => "low-sodium",
        }
    }
}

/// Health filter understood by the search API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthTag {
    AlcoholFree,
    DairyFree,
    EggFree,
    FishFree,
    GlutenFree,
    KetoFriendly,
    KosherFriendly,
    LowSugar,
    Paleo,
    PeanutFree,
    Pescatarian,
    PorkFree,
    RedMeatFree,
    ShellfishFree,
    SoyFree,
    TreeNutFree,
    Vegan,
    Vegetarian,
    WheatFree,
}

impl HealthTag {
    pub const ALL: [HealthTag; 19] = [
        HealthTag::AlcoholFree,
        HealthTag::DairyFree,
        HealthTag::EggFree,
        HealthTag::FishFree,
        HealthTag::GlutenFree,
        HealthTag::KetoFriendly,
        HealthTag::KosherFriendly,
        HealthTag::LowSugar,
        HealthTag::Paleo,
        HealthTag::PeanutFree,
        HealthTag::Pescatarian,
        HealthTag::PorkFree,
        HealthTag::RedMeatFree,
        HealthTag::ShellfishFree,
        HealthTag::SoyFree,
        HealthTag::TreeNutFree,
        HealthTag::Vegan,
        HealthTag::Vegetarian,
        HealthTag::WheatFree,
    ];

    /// Value sent in the `health` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTag::AlcoholFree => "alcohol-free",
            HealthTag::DairyFree => "dairy-free",
            HealthTag::EggFree => "egg-free",
            HealthTag::FishFree => "fish-free",
            HealthTag::GlutenFree => "gluten-free",
            HealthTag::KetoFriendly => "keto-friendly",
            HealthTag::KosherFriendly => "kosher",
            HealthTag::LowSugar => "low-sugar",
            HealthTag::Paleo => "paleo",
            HealthTag::PeanutFree => "peanut-free",
            HealthTag::Pescatarian => "pescatarian",
            HealthTag::PorkFree => "pork-free",
            HealthTag::RedMeatFree => "red-meat-free",
            HealthTag::ShellfishFree => "shellfish-free",
            HealthTag::SoyFree => "soy-free",
            HealthTag::TreeNutFree => "tree-nut-free",
            HealthTag::Vegan => "vegan",
            HealthTag::Vegetarian => "vegetarian",
            HealthTag::WheatFree => "wheat-free",
        }
    }
}

impl FromStr for DietTag {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DietTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| RecipeError::InvalidTag {
                kind: "diet",
                value: s.to_string(),
            })
    }
}

impl FromStr for HealthTag {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        HealthTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| RecipeError::InvalidTag {
                kind: "health",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for DietTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HealthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
