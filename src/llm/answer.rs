use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::search::RetrievedSegment;

/// Chat-template control tokens that must not reach the model from document text.
const CONTROL_TOKENS: [&str; 6] = [
    "<|im_start|>",
    "<|im_end|>",
    "<|endoftext|>",
    "<|system|>",
    "<|user|>",
    "<|assistant|>",
];

/// Answer one question from the retrieved context segments.
pub async fn answer_question(
    client: &reqwest::Client,
    config: &LlmConfig,
    question: &str,
    context: &[RetrievedSegment],
) -> Result<String> {
    let prompt = build_prompt(question, context);

    let raw = match config.provider.as_str() {
        "gemini" => call_gemini(client, config, &prompt).await?,
        "openai" => call_openai(client, config, &prompt).await?,
        "ollama" => call_ollama(client, config, &prompt).await?,
        other => anyhow::bail!("Unknown LLM provider: {other}"),
    };

    let answer = clean_answer(&raw);
    if answer.is_empty() {
        anyhow::bail!("{} returned an empty answer", config.provider);
    }
    Ok(answer)
}

fn build_prompt(question: &str, context: &[RetrievedSegment]) -> String {
    let document = context
        .iter()
        .map(|s| sanitize_for_prompt(&s.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    let question = sanitize_for_prompt(question);

    format!(
        "Based on the following document content, answer the question accurately and concisely.\n\n\
         Document Content:\n{document}\n\n\
         Question: {question}\n\n\
         Answer:"
    )
}

fn sanitize_for_prompt(text: &str) -> String {
    CONTROL_TOKENS
        .iter()
        .fold(text.to_string(), |acc, token| acc.replace(token, ""))
}

/// Trim and unwrap a reply the model fenced in a code block.
fn clean_answer(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop a language tag on the opening fence
    let inner = match inner.split_once('\n') {
        Some((tag, rest)) if !tag.trim().contains(' ') => rest,
        _ => inner,
    };
    inner.trim().to_string()
}

// ─── Gemini ──────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

fn gemini_text(resp: GeminiResponse) -> Option<String> {
    let candidate = resp.candidates.into_iter().next()?;
    Some(
        candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<String>(),
    )
}

async fn call_gemini(
    client: &reqwest::Client,
    config: &LlmConfig,
    prompt: &str,
) -> Result<String> {
    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        config.base_url, config.model
    );
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let req = GeminiRequest {
        contents: vec![GeminiContent {
            parts: vec![GeminiPart {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        },
    };

    let resp = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&req)
        .send()
        .await
        .context("Failed to call Gemini generateContent API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Gemini API returned {status}: {body}");
    }

    let body: GeminiResponse = resp
        .json()
        .await
        .context("Failed to parse Gemini response")?;
    gemini_text(body).context("Gemini response has no candidates")
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: ChatMessage,
}

fn user_message(prompt: &str) -> Vec<ChatMessage> {
    vec![ChatMessage {
        role: "user".to_string(),
        content: Some(prompt.to_string()),
    }]
}

async fn call_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    prompt: &str,
) -> Result<String> {
    let url = format!("{}/v1/chat/completions", config.base_url);
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let req = OpenAiChatRequest {
        model: &config.model,
        messages: user_message(prompt),
        temperature: config.temperature,
        max_tokens: config.max_output_tokens,
    };

    let resp = client
        .post(&url)
        .bearer_auth(api_key)
        .json(&req)
        .send()
        .await
        .context("Failed to call OpenAI chat API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("OpenAI chat API returned {status}: {body}");
    }

    let body: OpenAiChatResponse = resp
        .json()
        .await
        .context("Failed to parse OpenAI chat response")?;
    body.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .context("OpenAI response has no message content")
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

async fn call_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    prompt: &str,
) -> Result<String> {
    let url = format!("{}/api/chat", config.base_url);

    let req = OllamaChatRequest {
        model: &config.model,
        messages: user_message(prompt),
        stream: false,
        options: OllamaOptions {
            temperature: config.temperature,
            num_predict: config.max_output_tokens,
        },
    };

    let resp = client
        .post(&url)
        .json(&req)
        .send()
        .await
        .context("Failed to call Ollama chat API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Ollama chat API returned {status}: {body}");
    }

    let body: OllamaChatResponse = resp
        .json()
        .await
        .context("Failed to parse Ollama chat response")?;
    body.message
        .content
        .context("Ollama response has no message content")
}
