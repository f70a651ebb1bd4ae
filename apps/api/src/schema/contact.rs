use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::document::ContactInfo;
use crate::schema::{char_len, ValidationErrors};

const EMAIL_MAX: usize = 100;
const MOBILE_MIN: usize = 10;
const MOBILE_MAX: usize = 20;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[- \t./0-9]*$").expect("phone regex must compile")
});
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})[/\w .-]*/?$").expect("url regex must compile")
});

/// Validates contact details. Email is required; the rest may be left blank.
pub fn validate_contact(contact: &ContactInfo) -> Result<ContactInfo, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let email = contact.email.trim();
    if email.is_empty() {
        errors.push("email", "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.push("email", "Please enter a valid email address");
    } else if char_len(email) > EMAIL_MAX {
        errors.push("email", "Email is too long");
    }

    let mobile = contact.mobile.trim();
    if !mobile.is_empty() {
        if !PHONE_RE.is_match(mobile) {
            errors.push("mobile", "Please enter a valid phone number");
        } else if char_len(mobile) < MOBILE_MIN {
            errors.push("mobile", "Phone number must be at least 10 digits");
        } else if char_len(mobile) > MOBILE_MAX {
            errors.push("mobile", "Phone number is too long");
        }
    }

    let linkedin = contact.linkedin.trim();
    if !linkedin.is_empty() && !URL_RE.is_match(linkedin) {
        errors.push("linkedin", "Please enter a valid LinkedIn URL");
    }

    let twitter = contact.twitter.trim();
    if !twitter.is_empty() && !URL_RE.is_match(twitter) {
        errors.push("twitter", "Please enter a valid Twitter URL");
    }

    errors.finish(ContactInfo {
        email: email.to_string(),
        mobile: mobile.to_string(),
        linkedin: linkedin.to_string(),
        twitter: twitter.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactInfo {
        ContactInfo {
            email: "jane@example.com".into(),
            mobile: "+91 1234567890".into(),
            linkedin: "https://linkedin.com/in/jane-doe".into(),
            twitter: String::new(),
        }
    }

    #[test]
    fn test_valid_contact_is_trimmed() {
        let mut c = contact();
        c.email = " jane@example.com ".into();
        assert_eq!(validate_contact(&c).unwrap().email, "jane@example.com");
    }

    #[test]
    fn test_email_required() {
        let c = ContactInfo::default();
        assert_eq!(
            validate_contact(&c).unwrap_err().message_for("email"),
            Some("Email is required")
        );
    }

    #[test]
    fn test_email_shape() {
        let mut c = contact();
        c.email = "not-an-email".into();
        assert!(validate_contact(&c).unwrap_err().has("email"));
    }

    #[test]
    fn test_email_too_long() {
        let mut c = contact();
        c.email = format!("{}@example.com", "a".repeat(95));
        assert_eq!(
            validate_contact(&c).unwrap_err().message_for("email"),
            Some("Email is too long")
        );
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        let c = ContactInfo {
            email: "jane@example.com".into(),
            ..Default::default()
        };
        assert!(validate_contact(&c).is_ok());
    }

    #[test]
    fn test_mobile_rules() {
        let mut c = contact();
        c.mobile = "12345".into();
        assert_eq!(
            validate_contact(&c).unwrap_err().message_for("mobile"),
            Some("Phone number must be at least 10 digits")
        );

        c.mobile = "call me maybe".into();
        assert_eq!(
            validate_contact(&c).unwrap_err().message_for("mobile"),
            Some("Please enter a valid phone number")
        );

        c.mobile = "+1 (555) 123-4567-8901-2345".into();
        assert!(validate_contact(&c).unwrap_err().has("mobile"));

        c.mobile = "555 123\n4567".into();
        assert!(validate_contact(&c).unwrap_err().has("mobile"));
    }

    #[test]
    fn test_profile_urls() {
        let mut c = contact();
        c.twitter = "twitter.com/jane".into();
        assert!(validate_contact(&c).is_ok());

        c.linkedin = "not a url".into();
        assert!(validate_contact(&c).unwrap_err().has("linkedin"));
    }
}
