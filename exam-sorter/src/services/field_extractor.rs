//! LLM-backed exam metadata extraction
//!
//! Sends the leading text of a scan to a chat-completions model, parses the
//! JSON it returns and folds semester/moed synonyms onto the canonical
//! vocabulary from the rule tables.

use super::llm_client::{ChatClient, ChatMessage};
use super::response_parser::parse_fields_response;
use crate::models::ExtractedFields;
use crate::types::{ExtractionError, FieldExtractor};
use exam_common::rules::UNKNOWN;
use exam_common::RuleTables;
use std::collections::BTreeSet;

const SYSTEM_PROMPT: &str = "You are an assistant that extracts metadata from scanned university exams.";

/// Field extractor using an OpenAI-compatible chat model
pub struct LlmFieldExtractor {
    client: ChatClient,
    rules: RuleTables,
}

impl LlmFieldExtractor {
    pub fn new(client: ChatClient, rules: RuleTables) -> Self {
        Self { client, rules }
    }

    /// Map semester and moed onto their canonical labels
    pub fn canonicalize(&self, fields: ExtractedFields) -> ExtractedFields {
        ExtractedFields {
            semester: self.rules.canonical_semester(&fields.semester),
            moed: self.rules.canonical_moed(&fields.moed),
            ..fields
        }
    }
}

#[async_trait::async_trait]
impl FieldExtractor for LlmFieldExtractor {
    fn name(&self) -> &'static str {
        "chat-completions"
    }

    async fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractionError> {
        let messages = build_messages(text, &self.rules);
        let completion = self.client.complete(&messages).await?;
        tracing::debug!(model = %self.client.model(), response = %completion, "Completion received");

        let fields = parse_fields_response(&completion)?;
        Ok(self.canonicalize(fields))
    }
}

/// System and user messages for one document
pub fn build_messages(text: &str, rules: &RuleTables) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_prompt(text, rules)),
    ]
}

fn build_prompt(text: &str, rules: &RuleTables) -> String {
    let semesters = quoted(canonical_values(rules.semester_aliases.values()));
    let moeds = quoted(canonical_values(rules.moed_aliases.values()));

    format!(
        r#"Below are the first lines of a scanned exam PDF. The document is written in Hebrew.

{text}

Extract the following fields as a JSON object:

- course_name: the full Hebrew name of the course, exactly as printed.
- semester: one of {semesters}, without a trailing "׳". Winter (חורף) is "א", spring (אביב) is "ב", summer ("ק", "ג") is "קיץ". It usually follows the word "סמסטר" or "סמ׳".
- year: the four-digit year of the exam, e.g. "2022" and not "22".
- moed: one of {moeds}, without a trailing "׳".
- degree: the department or faculty, e.g. "מדעי המחשב" or "הנדסת חשמל". If none is printed, infer it from the context.

Every value must be a JSON string. If a field cannot be found clearly, set it to "{unknown}".
Return only the JSON object, without code fences or explanation."#,
        text = text,
        semesters = semesters,
        moeds = moeds,
        unknown = UNKNOWN,
    )
}

fn canonical_values<'a>(values: impl Iterator<Item = &'a String>) -> BTreeSet<&'a str> {
    values.map(String::as_str).collect()
}

fn quoted(values: BTreeSet<&str>) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ")
}
