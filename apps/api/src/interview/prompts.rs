// Interview practice prompt templates.

/// Quiz prompt. Replace `{industry}` and `{skills_clause}` before sending.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate 10 technical interview questions for a {industry} professional{skills_clause}.

Each question is multiple choice with exactly 4 options, and correctAnswer must be copied verbatim from options.

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correctAnswer": "string",
      "explanation": "string"
    }
  ]
}"#;

/// Improvement tip prompt. Replace `{industry}` and `{wrong_answers}` before sending.
pub const IMPROVEMENT_TIP_PROMPT_TEMPLATE: &str = r#"A candidate answered the following {industry} technical interview questions incorrectly:

{wrong_answers}

Give one concise, specific improvement tip that targets the knowledge gaps these answers reveal.
Keep it under 2 sentences and encouraging. Do not restate the mistakes; say what to learn or practice."#;
