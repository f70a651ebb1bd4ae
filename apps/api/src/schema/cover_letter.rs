use serde::{Deserialize, Serialize};

use crate::schema::ValidationErrors;

/// Input to cover letter generation. Not stored as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverLetterRequest {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
}

pub fn validate_cover_letter_request(
    request: &CoverLetterRequest,
) -> Result<CoverLetterRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let company_name = request.company_name.trim();
    if company_name.is_empty() {
        errors.push("company_name", "Company name is required");
    }
    let job_title = request.job_title.trim();
    if job_title.is_empty() {
        errors.push("job_title", "Job title is required");
    }
    let job_description = request.job_description.trim();
    if job_description.is_empty() {
        errors.push("job_description", "Job description is required");
    }

    errors.finish(CoverLetterRequest {
        company_name: company_name.to_string(),
        job_title: job_title.to_string(),
        job_description: job_description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_required() {
        let errors = validate_cover_letter_request(&CoverLetterRequest::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_whitespace_only_rejected() {
        let request = CoverLetterRequest {
            company_name: "Acme".into(),
            job_title: "   ".into(),
            job_description: "Build things".into(),
        };
        let errors = validate_cover_letter_request(&request).unwrap_err();
        assert!(errors.has("job_title"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_accepted_request_is_trimmed() {
        let request = CoverLetterRequest {
            company_name: " Acme ".into(),
            job_title: "Engineer".into(),
            job_description: "Build things\n".into(),
        };
        let accepted = validate_cover_letter_request(&request).unwrap();
        assert_eq!(accepted.company_name, "Acme");
        assert_eq!(accepted.job_description, "Build things");
    }
}
