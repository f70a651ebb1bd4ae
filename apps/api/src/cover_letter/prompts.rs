// Cover letter prompt templates.

/// Cover letter prompt. Replace `{job_title}`, `{company_name}`, `{industry}`,
/// `{experience}`, `{skills}`, `{bio}` and `{job_description}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional cover letter for a {job_title} position at {company_name}.

About the candidate:
- Industry: {industry}
- Years of experience: {experience}
- Skills: {skills}
- Professional background: {bio}

Job description:
{job_description}

Requirements:
1. Professional, enthusiastic tone.
2. Highlight the skills and experience relevant to this job and relate them to its requirements.
3. Show an understanding of the company's needs.
4. Include specific examples of achievements.
5. Keep it under 400 words.
6. Use proper business letter formatting in markdown."#;
