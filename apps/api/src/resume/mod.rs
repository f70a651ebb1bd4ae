pub mod document;
pub mod editor;
pub mod handlers;
pub mod markdown;
pub mod prompts;
pub mod session;
pub mod store;
pub mod sync;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill, CAREER_WRITER_SYSTEM};
use crate::llm_client::LlmClient;
use crate::resume::document::EntryKind;
use crate::resume::prompts::{kind_label, IMPROVE_DESCRIPTION_PROMPT_TEMPLATE};

pub fn build_improve_prompt(description: &str, kind: EntryKind, industry: &str) -> String {
    fill(
        IMPROVE_DESCRIPTION_PROMPT_TEMPLATE,
        &[
            ("kind", kind_label(kind)),
            ("industry", industry),
            ("description", description.trim()),
        ],
    )
}

/// Asks the AI to rewrite an entry description. Returns plain text.
pub async fn improve_description(
    llm: &LlmClient,
    description: &str,
    kind: EntryKind,
    industry: &str,
) -> Result<String, AppError> {
    llm.call_text(&build_improve_prompt(description, kind, industry), CAREER_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to improve {} description: {e}", kind_label(kind))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improve_prompt() {
        let prompt = build_improve_prompt(
            "  Maintained the billing service.  ",
            EntryKind::Experience,
            "tech-software-development",
        );
        assert!(prompt.contains("improve the following work experience description"));
        assert!(prompt.contains("for a tech-software-development professional"));
        assert!(prompt.contains("Current content: \"Maintained the billing service.\""));
    }
}
