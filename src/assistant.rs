//! Bridge to the generative-language service behind the AI consultation chat.

use crate::species::{Chromosome, EducationalLevel, Species};
use crossbeam_channel::{bounded, Receiver};
use serde_json::{json, Value};
use std::thread;
use std::time::Duration;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL: &str = "gemini-3-flash-preview";
const ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub const MISSING_KEY_REPLY: &str = "Genomic hub unreachable: API key missing.";
pub const TRANSPORT_ERROR_REPLY: &str = "Error contacting genomic AI hub.";

pub fn capability_present() -> bool {
    std::env::var(API_KEY_ENV)
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

pub fn system_instruction(
    species: &Species,
    chromosome: &Chromosome,
    level: EducationalLevel,
) -> String {
    format!(
        "You are a specialized genomic AI analyst for a mycological research platform. \
         Specimen: {}. Current focus: Chromosome {}. Level: {}. Responses must be concise, \
         expert-level, and formatted in Markdown where helpful.",
        species.scientific_name,
        chromosome.id,
        level.as_str().to_ascii_uppercase()
    )
}

pub fn opening_prompt(
    species: &Species,
    chromosome: &Chromosome,
    level: EducationalLevel,
) -> String {
    format!(
        "As an expert mycologist, provide a brief, 2-sentence fascinating insight about \
         Chromosome {} ({}) in {}. Mention its role in {}.",
        chromosome.id,
        chromosome.label_for_level(level),
        species.scientific_name,
        chromosome.primary_function.as_str()
    )
}

pub fn build_request(system_instruction: &str, history: &[ChatTurn]) -> Value {
    let contents: Vec<Value> = history
        .iter()
        .map(|turn| {
            json!({
                "role": turn.role.as_str(),
                "parts": [{ "text": turn.text }]
            })
        })
        .collect();
    json!({
        "system_instruction": { "parts": [{ "text": system_instruction }] },
        "contents": contents,
        "generationConfig": { "temperature": 0.7 }
    })
}

pub fn parse_reply(response_json: &Value) -> Result<String, String> {
    let parts = response_json
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .ok_or_else(|| "Assistant response did not contain candidate text".to_string())?;
    let mut collected = String::new();
    for part in parts {
        if let Some(text) = part.get("text").and_then(Value::as_str) {
            collected.push_str(text);
        }
    }
    let trimmed = collected.trim();
    if trimmed.is_empty() {
        Err("Assistant response did not contain candidate text".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn consult_blocking(api_key: &str, request: &Value) -> Result<String, String> {
    let endpoint = format!("{ENDPOINT_BASE}/{MODEL}:generateContent");
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| format!("Could not build assistant client: {e}"))?;
    let response = client
        .post(&endpoint)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .map_err(|e| format!("Assistant request failed: {e}"))?;
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| format!("Could not read assistant response: {e}"))?;
    if !status.is_success() {
        return Err(format!(
            "Assistant endpoint error (status={status}): {}",
            body.trim()
        ));
    }
    let response_json = serde_json::from_str::<Value>(&body)
        .map_err(|e| format!("Assistant endpoint returned invalid JSON: {e}"))?;
    parse_reply(&response_json)
}

/// Runs the consultation on a worker thread. Exactly one reply arrives on
/// the returned channel; transport and shape failures are already folded
/// into the canned fallback text, so the UI only ever appends chat lines.
pub fn spawn_consult(system_instruction: String, history: Vec<ChatTurn>) -> Receiver<String> {
    let (sender, receiver) = bounded(1);
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            thread::spawn(move || {
                let request = build_request(&system_instruction, &history);
                let reply = match consult_blocking(key.trim(), &request) {
                    Ok(text) => text,
                    Err(_) => TRANSPORT_ERROR_REPLY.to_string(),
                };
                let _ = sender.send(reply);
            });
        }
        _ => {
            let _ = sender.send(MISSING_KEY_REPLY.to_string());
        }
    }
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_context() -> (Species, Chromosome) {
        let chromosome = Chromosome {
            id: 7,
            primary_function: crate::species::ChromosomeFunction::Reproduction,
            beginner_label: "Identity Core".to_string(),
            intermediate_label: "MAT Complex".to_string(),
            advanced_label: "HD Cassette".to_string(),
            ..Default::default()
        };
        let species = Species {
            id: "x-test".to_string(),
            scientific_name: "Examplea testii".to_string(),
            chromosome_count: 7,
            chromosomes: vec![chromosome.clone()],
            ..Default::default()
        };
        (species, chromosome)
    }

    #[test]
    fn test_system_instruction_embeds_context() {
        let (species, chromosome) = test_context();
        let instruction =
            system_instruction(&species, &chromosome, EducationalLevel::Advanced);
        assert_eq!(
            instruction,
            "You are a specialized genomic AI analyst for a mycological research platform. \
             Specimen: Examplea testii. Current focus: Chromosome 7. Level: ADVANCED. \
             Responses must be concise, expert-level, and formatted in Markdown where helpful."
        );
    }

    #[test]
    fn test_opening_prompt_wording() {
        let (species, chromosome) = test_context();
        let prompt = opening_prompt(&species, &chromosome, EducationalLevel::Intermediate);
        assert_eq!(
            prompt,
            "As an expert mycologist, provide a brief, 2-sentence fascinating insight about \
             Chromosome 7 (MAT Complex) in Examplea testii. Mention its role in reproduction."
        );
    }

    #[test]
    fn test_request_shape() {
        let history = vec![ChatTurn::user("hello"), ChatTurn::model("hi")];
        let request = build_request("act as analyst", &history);
        assert_eq!(
            request["system_instruction"]["parts"][0]["text"],
            "act as analyst"
        );
        assert_eq!(request["contents"][0]["role"], "user");
        assert_eq!(request["contents"][1]["role"], "model");
        assert_eq!(request["contents"][1]["parts"][0]["text"], "hi");
        assert_eq!(request["generationConfig"]["temperature"].as_f64(), Some(0.7));
    }

    #[test]
    fn test_parse_reply_joins_candidate_parts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Chromosome 7 carries the mating locus. " },
                        { "text": "It drives compatibility." }
                    ]
                }
            }]
        });
        assert_eq!(
            parse_reply(&response).unwrap(),
            "Chromosome 7 carries the mating locus. It drives compatibility."
        );
    }

    #[test]
    fn test_parse_reply_rejects_malformed_payloads() {
        let missing = json!({ "promptFeedback": {} });
        let err = parse_reply(&missing).unwrap_err();
        assert!(err.contains("did not contain candidate text"), "{err}");

        let empty = json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        });
        assert!(parse_reply(&empty).is_err());
    }
}
