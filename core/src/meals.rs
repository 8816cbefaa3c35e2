use serde::{Deserialize, Serialize};

/// One meal idea as the suggestions prompt asks the model to describe it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSuggestion {
    pub name: String,
    pub description: String,
    pub ingredients_used: Vec<String>,
    pub additional_needed: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
}

/// Top-level document returned for a suggestions request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub meals: Vec<MealSuggestion>,
}

impl SuggestionSet {
    /// Number of meals the prompt asks for. Not enforced on the model's answer.
    pub const EXPECTED_MEALS: usize = 3;
}
