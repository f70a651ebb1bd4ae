use crate::schema::profile::ProfileUpdate;

/// `("tech", "Software Development")` → `tech-software-development`.
pub fn format_industry(industry: &str, sub_industry: &str) -> String {
    format!(
        "{}-{}",
        industry.trim(),
        sub_industry.trim().to_lowercase().replace(' ', "-")
    )
}

/// Inverse of [`format_industry`], up to casing: `tech-software-development` →
/// `("tech", "software development")`.
pub fn split_industry(stored: &str) -> (String, String) {
    let mut parts = stored.split('-');
    let industry = parts.next().unwrap_or_default().to_string();
    let sub_industry = parts.collect::<Vec<_>>().join(" ");
    (industry, sub_industry)
}

/// The value written to `users.industry`. The specialization is only appended when both
/// halves were supplied.
pub fn stored_industry(update: &ProfileUpdate) -> Option<String> {
    match (&update.industry, &update.sub_industry) {
        (Some(industry), Some(sub)) => Some(format_industry(industry, sub)),
        (Some(industry), None) => Some(industry.clone()),
        (None, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_industry() {
        assert_eq!(
            format_industry("tech", "Software Development"),
            "tech-software-development"
        );
    }

    #[test]
    fn test_split_industry() {
        assert_eq!(
            split_industry("tech-software-development"),
            ("tech".to_string(), "software development".to_string())
        );
        assert_eq!(split_industry("finance"), ("finance".to_string(), String::new()));
    }

    #[test]
    fn test_stored_industry_needs_industry() {
        let mut update = ProfileUpdate {
            sub_industry: Some("Banking".into()),
            ..Default::default()
        };
        assert_eq!(stored_industry(&update), None);

        update.industry = Some("finance".into());
        assert_eq!(stored_industry(&update).as_deref(), Some("finance-banking"));

        update.sub_industry = None;
        assert_eq!(stored_industry(&update).as_deref(), Some("finance"));
    }
}
