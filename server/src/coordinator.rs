use crate::errors::ApiError;
use larder_core::gateway::ModelGateway;
use larder_core::meals::SuggestionSet;
use larder_core::normalize;
use larder_core::prompts;
use larder_core::transcript::{append_exchange, Turn};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

pub const SUGGESTIONS_FAILED: &str = "Failed to get meal suggestions";
pub const RECIPE_FAILED: &str = "Failed to get recipe";
pub const FOLLOWUP_FAILED: &str = "Failed to process follow-up question";

/// Model reply together with the history it extends.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub reply: String,
    pub conversation_history: Vec<Turn>,
}

/// Ask the model for meal ideas and return its JSON answer as-is.
pub async fn suggest_meals(
    gateway: &dyn ModelGateway,
    ingredients: &[String],
) -> Result<Value, ApiError> {
    let prompt = prompts::suggestions_prompt(ingredients);
    debug!(prompt_len = prompt.len(), "Constructed suggestions prompt");

    let text = gateway
        .generate(&prompt)
        .await
        .map_err(|e| ApiError::upstream(SUGGESTIONS_FAILED, e))?;

    let parsed =
        normalize::parse_structured(&text).map_err(|e| ApiError::upstream(SUGGESTIONS_FAILED, e))?;

    check_suggestion_shape(&parsed);
    Ok(parsed)
}

// The answer is relayed even when it strays from the requested shape.
fn check_suggestion_shape(value: &Value) {
    match SuggestionSet::deserialize(value) {
        Ok(set) if set.meals.len() == SuggestionSet::EXPECTED_MEALS => {
            info!(meals = set.meals.len(), "Got meal suggestions");
        }
        Ok(set) => warn!(
            meals = set.meals.len(),
            expected = SuggestionSet::EXPECTED_MEALS,
            "Model returned an unexpected number of meals"
        ),
        Err(e) => warn!(error = %e, "Model output does not match the suggestion shape"),
    }
}

/// Ask for a full recipe, continuing `history` when there is one.
pub async fn fetch_recipe(
    gateway: &dyn ModelGateway,
    meal_name: &str,
    ingredients: &[String],
    history: &[Turn],
) -> Result<Exchange, ApiError> {
    let prompt = prompts::recipe_prompt(meal_name, ingredients);
    debug!(prompt_len = prompt.len(), turns = history.len(), "Constructed recipe prompt");

    let result = if history.is_empty() {
        gateway.generate(&prompt).await
    } else {
        gateway.converse(history, &prompt).await
    };
    let reply = result.map_err(|e| ApiError::upstream(RECIPE_FAILED, e))?;

    info!(meal = meal_name, reply_len = reply.len(), "Got recipe");
    Ok(Exchange {
        conversation_history: append_exchange(history, &prompt, &reply),
        reply,
    })
}

/// Continue a conversation with the user's question.
pub async fn answer_followup(
    gateway: &dyn ModelGateway,
    question: &str,
    history: &[Turn],
) -> Result<Exchange, ApiError> {
    let message = prompts::followup_prompt(question);

    let reply = gateway
        .converse(history, &message)
        .await
        .map_err(|e| ApiError::upstream(FOLLOWUP_FAILED, e))?;

    info!(turns = history.len(), reply_len = reply.len(), "Answered follow-up question");
    Ok(Exchange {
        conversation_history: append_exchange(history, &message, &reply),
        reply,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::fake::{FakeGateway, GatewayCall};

    fn pantry() -> Vec<String> {
        vec!["egg".to_string(), "milk".to_string()]
    }

    #[tokio::test]
    async fn test_suggestions_relay_parsed_json() {
        let fake = FakeGateway::replying("```json\n{\"meals\": [{\"name\": \"Frittata\"}]}\n```");
        let value = suggest_meals(&fake, &pantry()).await.unwrap();
        assert_eq!(value, serde_json::json!({"meals": [{"name": "Frittata"}]}));

        match &fake.calls().await[..] {
            [GatewayCall::Generate { prompt }] => assert!(prompt.contains("egg, milk")),
            other => panic!("unexpected calls: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_suggestions_prose_is_malformed() {
        let fake = FakeGateway::replying("I'd suggest an omelette.");
        let err = suggest_meals(&fake, &pantry()).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedUpstreamOutput { .. }));
    }

    #[tokio::test]
    async fn test_recipe_without_history_is_stateless() {
        let fake = FakeGateway::replying("Beat the eggs.");
        let exchange = fetch_recipe(&fake, "Omelette", &pantry(), &[]).await.unwrap();

        let prompt = prompts::recipe_prompt("Omelette", &pantry());
        assert_eq!(fake.calls().await, vec![GatewayCall::Generate { prompt: prompt.clone() }]);
        assert_eq!(
            exchange.conversation_history,
            vec![Turn::user(prompt), Turn::assistant("Beat the eggs.")]
        );
        assert_eq!(exchange.reply, "Beat the eggs.");
    }

    #[tokio::test]
    async fn test_recipe_with_history_converses() {
        let fake = FakeGateway::replying("Here is the pancake recipe.");
        let history = vec![Turn::user("hi"), Turn::assistant("hello")];
        let exchange = fetch_recipe(&fake, "Pancakes", &pantry(), &history).await.unwrap();

        match &fake.calls().await[..] {
            [GatewayCall::Converse { history: seeded, .. }] => assert_eq!(seeded, &history),
            other => panic!("unexpected calls: {:?}", other),
        }
        assert_eq!(exchange.conversation_history.len(), 4);
        assert_eq!(&exchange.conversation_history[..2], history.as_slice());
    }

    #[tokio::test]
    async fn test_followup_failure_carries_context() {
        let fake = FakeGateway::failing("socket hang up");
        let history = vec![Turn::user("q"), Turn::assistant("a")];
        let err = answer_followup(&fake, "And then?", &history).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to process follow-up question: Response Error: socket hang up"
        );
    }
}
