use serde::{Deserialize, Serialize};

use crate::schema::{char_len, split_list, ValidationErrors};

const BIO_MAX: usize = 500;
const EXPERIENCE_MIN: f64 = 0.0;
const EXPERIENCE_MAX: f64 = 50.0;
const MIN_SKILLS: usize = 3;

/// Years of experience as typed: form fields send text, API clients send numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearsInput {
    Number(f64),
    Text(String),
}

impl YearsInput {
    /// `None` when blank or not a number. Rounded to one decimal.
    fn to_years(&self) -> Option<f64> {
        let raw = match self {
            YearsInput::Number(n) => *n,
            YearsInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        raw.is_finite().then(|| (raw * 10.0).round() / 10.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub industry: String,
    pub sub_industry: String,
    pub bio: String,
    pub experience: Option<YearsInput>,
    pub skills: String,
}

/// Normalized profile fields. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub industry: Option<String>,
    pub sub_industry: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<f64>,
    pub skills: Option<Vec<String>>,
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn check_experience(errors: &mut ValidationErrors, years: f64) {
    if years < EXPERIENCE_MIN {
        errors.push("experience", "Experience must be at least 0 years");
    } else if years > EXPERIENCE_MAX {
        errors.push("experience", "Experience cannot exceed 50 years");
    }
}

fn check_bio(errors: &mut ValidationErrors, bio: &str) {
    if char_len(bio) > BIO_MAX {
        errors.push("bio", "Bio must be less than 500 characters");
    }
}

/// First-time onboarding: industry, specialization and experience are mandatory.
pub fn validate_onboarding(input: &ProfileInput) -> Result<ProfileUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let industry = non_blank(&input.industry);
    if industry.is_none() {
        errors.push("industry", "Please select an industry");
    }
    let sub_industry = non_blank(&input.sub_industry);
    if sub_industry.is_none() {
        errors.push("sub_industry", "Please select a specialization");
    }

    let bio = non_blank(&input.bio);
    check_bio(&mut errors, bio.as_deref().unwrap_or_default());

    let experience = input.experience.as_ref().and_then(YearsInput::to_years);
    match experience {
        Some(years) => check_experience(&mut errors, years),
        None => errors.push("experience", "Experience must be a number"),
    }

    let skills = split_list(&input.skills);
    if !skills.is_empty() && skills.len() < MIN_SKILLS {
        errors.push("skills", "Please enter at least 3 skills");
    }

    errors.finish(ProfileUpdate {
        industry,
        sub_industry,
        bio,
        experience,
        skills: (!skills.is_empty()).then_some(skills),
    })
}

/// Later profile edits: every field is optional.
pub fn validate_profile_update(input: &ProfileInput) -> Result<ProfileUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let bio = non_blank(&input.bio);
    check_bio(&mut errors, bio.as_deref().unwrap_or_default());

    let experience = input.experience.as_ref().and_then(YearsInput::to_years);
    if let Some(years) = experience {
        check_experience(&mut errors, years);
    }

    let skills = split_list(&input.skills);

    errors.finish(ProfileUpdate {
        industry: non_blank(&input.industry),
        sub_industry: non_blank(&input.sub_industry),
        bio,
        experience,
        skills: (!skills.is_empty()).then_some(skills),
    })
}
