// Resume writing prompt templates.

use crate::resume::document::EntryKind;

/// Description improvement prompt. Replace `{kind}`, `{industry}` and `{description}` before
/// sending.
pub const IMPROVE_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"As an expert resume writer, improve the following {kind} description for a {industry} professional.
Make it more impactful, quantifiable and aligned with industry standards.

Current content: "{description}"

Requirements:
1. Use action verbs.
2. Include metrics and results where possible.
3. Highlight relevant technical skills.
4. Keep it concise but detailed.
5. Focus on achievements over responsibilities.
6. Use industry-specific keywords.

Respond with a single paragraph and nothing else."#;

/// Singular noun used inside prompts.
pub fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Experience => "work experience",
        EntryKind::Education => "education",
        EntryKind::Project => "project",
    }
}
