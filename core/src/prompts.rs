//! Prompt templates sent to the model.

const SUGGESTIONS_INSTRUCTIONS: &str = r#"Please suggest 3 different meals I can make with these ingredients. For each meal:
1. Give it a name
2. List the main ingredients needed (from my list and make sure you use the metric system for measurements)
3. Mention any common ingredients that might be needed (like oil, water, etc.)
4. Provide a brief description
5. Estimate prep and cook time
6. Indicate serving size

Format your response as JSON with this structure:
{
  "meals": [
    {
      "name": "Meal Name",
      "description": "Brief description",
      "ingredients_used": ["ingredient1", "ingredient2"],
      "additional_needed": ["oil", "water"],
      "prep_time": "15 mins",
      "cook_time": "30 mins",
      "servings": "4"
    }
  ]
}

Only return the JSON, no other text."#;

const RECIPE_INSTRUCTIONS: &str = "Please provide:
1. Complete ingredient list with quantities (use metric system of measurement where appropriate)
2. Step-by-step cooking instructions
3. If I'm missing any ingredients, suggest alternatives I might have

Be conversational and helpful.";

/// Ask for three meal ideas, answered as a `SuggestionSet` JSON document.
pub fn suggestions_prompt(ingredients: &[String]) -> String {
    format!(
        "I have these ingredients available: {}.\n\n{}",
        ingredients.join(", "),
        SUGGESTIONS_INSTRUCTIONS
    )
}

/// Ask for a full recipe for `meal_name` given what the user has on hand.
pub fn recipe_prompt(meal_name: &str, ingredients: &[String]) -> String {
    format!(
        "I want to make {}. My available ingredients are: {}.\n\n{}",
        meal_name,
        ingredients.join(", "),
        RECIPE_INSTRUCTIONS
    )
}

/// Follow-up questions go to the model as typed.
pub fn followup_prompt(question: &str) -> String {
    question.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pantry() -> Vec<String> {
        vec!["egg".to_string(), "milk".to_string(), "spring onion".to_string()]
    }

    #[test]
    fn suggestions_prompt_lists_ingredients_comma_joined() {
        let prompt = suggestions_prompt(&pantry());
        assert!(prompt.starts_with("I have these ingredients available: egg, milk, spring onion."));
        assert!(prompt.contains("suggest 3 different meals"));
        assert!(prompt.contains("metric system"));
        assert!(prompt.contains("\"ingredients_used\""));
        assert!(prompt.ends_with("Only return the JSON, no other text."));
    }

    #[test]
    fn suggestions_prompt_keeps_single_ingredient_verbatim() {
        let prompt = suggestions_prompt(&["crème fraîche".to_string()]);
        assert!(prompt.contains("available: crème fraîche."));
    }

    #[test]
    fn recipe_prompt_names_meal_and_pantry() {
        let prompt = recipe_prompt("Omelette", &pantry());
        assert!(prompt.starts_with(
            "I want to make Omelette. My available ingredients are: egg, milk, spring onion."
        ));
        assert!(prompt.contains("Step-by-step cooking instructions"));
        assert!(prompt.contains("suggest alternatives"));
    }

    #[test]
    fn followup_prompt_is_passthrough() {
        assert_eq!(followup_prompt("What if I have no milk?"), "What if I have no milk?");
    }
}
