//! Generation service behind the HTTP routes: validation, prompt text and
//! post-processing of provider output.

use std::sync::Arc;

use llm_integration::{IdeaProvider, ProviderError, ScriptProvider};
use shared::{
    domain::{Topic, IDEAS_PER_TOPIC},
    error::{ApiError, ErrorCode},
};

#[derive(Clone)]
pub struct ApiContext {
    pub ideas: Arc<dyn IdeaProvider>,
    pub scripts: Arc<dyn ScriptProvider>,
}

pub fn ideas_prompt(topic: &Topic) -> String {
    format!("Create four YouTube script ideas about {topic}. Each idea must be on one line only.")
}

pub fn script_prompt(idea: &str) -> String {
    format!(
        "Write a YouTube script for {idea}. \
         Include an engaging title at the top. \
         The script must be emotional, story-driven, under 3000 characters, \
         and contain no music cues, brackets, or scene descriptions."
    )
}

/// Turns a free-form completion into exactly [`IDEAS_PER_TOPIC`] one-line
/// ideas, padding with placeholders when the model returned too few.
pub fn normalize_ideas(raw: &str, topic: &Topic) -> Vec<String> {
    let mut ideas: Vec<String> = raw
        .trim()
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.trim_matches(|c: char| c == '-' || c == '•' || c == ' ')
                .to_string()
        })
        .collect();

    while ideas.len() < IDEAS_PER_TOPIC {
        ideas.push(format!("Example idea {} for {topic}", ideas.len() + 1));
    }
    ideas.truncate(IDEAS_PER_TOPIC);
    ideas
}

pub async fn generate_ideas(ctx: &ApiContext, raw_topic: &str) -> Result<Vec<String>, ApiError> {
    let topic = Topic::parse(raw_topic)
        .ok_or_else(|| ApiError::new(ErrorCode::Validation, "topic must not be empty"))?;
    let completion = ctx
        .ideas
        .complete_ideas(&ideas_prompt(&topic))
        .await
        .map_err(|err| upstream(ctx.ideas.model_name(), err))?;
    Ok(normalize_ideas(&completion, &topic))
}

pub async fn generate_script(ctx: &ApiContext, idea: &str) -> Result<String, ApiError> {
    let idea = idea.trim();
    if idea.is_empty() {
        return Err(ApiError::new(ErrorCode::Validation, "idea must not be empty"));
    }
    let completion = ctx
        .scripts
        .complete_script(&script_prompt(idea))
        .await
        .map_err(|err| upstream(ctx.scripts.model_name(), err))?;
    Ok(completion.trim().to_string())
}

fn upstream(model: &str, err: ProviderError) -> ApiError {
    tracing::error!(model, %err, "content provider call failed");
    ApiError::new(ErrorCode::Upstream, format!("{model}: {err}"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
