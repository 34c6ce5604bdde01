// SPDX: CC0-1.0

use crate::config::ModelConfig;
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SYSTEM_PROMPT: &str = r#"You are a function-extraction assistant.
User will ask for a plot in free text (e.g. "Plot sin(3x) from -10 to 10").
You must:
1) Figure out the function type from this limited set:
   - polynomial of degree up to 4 (e.g. x^3 - 3x^2 + 5x - 1)
   - sin(k*x)
   - cos(k*x)
   - or simple forms: x, x^2, sin(x), cos(x).
2) Extract the numeric interval [x_min, x_max].
3) Return one line in a pipe-separated format:
   function_name|parameter_list|x_min|x_max
   For example:
   - "polynomial|[1,-3,5,-1]|-2|5" for x^3 - 3x^2 + 5x - 1 on interval [-2,5]
   - "sin|[3]|-10|10" for sin(3x) on interval [-10,10]
   - "x^2|-5|5" for x^2 on interval [-5,5]
4) If the user says something indicating they are done, just return "exit".
Return nothing else, only the exact pipe-separated line or "exit"."#;

/// Something that turns a system prompt and user text into a reply.
pub trait Model {
    fn complete(&mut self, system_prompt: &str, user_text: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Blocking client for a Mistral-style chat completions endpoint.
#[derive(Debug)]
pub struct MistralClient {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: String,
}

impl MistralClient {
    pub fn new(config: &ModelConfig, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            model: config.name.clone(),
            api_key,
        }
    }
}

impl Model for MistralClient {
    fn complete(&mut self, system_prompt: &str, user_text: &str) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_text,
                },
            ],
        };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "sending chat completion");
        let response: ChatResponse = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Accept", "application/json")
            .send_json(&request)
            .with_context(|| format!("request to {} failed", self.endpoint))?
            .into_json()
            .context("failed to decode chat completion response")?;

        first_reply(response)
    }
}

fn first_reply(response: ChatResponse) -> anyhow::Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("chat completion response has no choices"))?;
    Ok(choice
        .message
        .content
        .unwrap_or_default()
        .trim()
        .to_string())
}
