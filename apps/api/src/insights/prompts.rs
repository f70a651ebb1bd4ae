// Industry insight prompt templates.
// All prompts for the insights module are defined here.

/// Industry insight prompt. Replace `{industry}` before sending.
pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"Analyze the current state of the {industry} industry and return insights as a JSON object with this EXACT schema (no extra fields):
{
  "salaryRanges": [
    { "role": "string", "min": number, "max": number, "median": number, "location": "string" }
  ],
  "growthRate": number,
  "demandLevel": "High" | "Medium" | "Low",
  "topSkills": ["string"],
  "marketOutlook": "Positive" | "Neutral" | "Negative",
  "keyTrends": ["string"],
  "recommendedSkills": ["string"]
}

RULES:
1. Include at least 5 common roles in salaryRanges. Salaries are yearly figures in USD.
2. growthRate is a percentage, e.g. 7.5 for 7.5%.
3. Include at least 5 topSkills and at least 5 keyTrends.
4. Return ONLY the JSON object. No notes, no code fences."#;
