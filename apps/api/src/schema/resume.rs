use crate::resume::document::{EntryDraft, EntryKind, ResumeDocument, TimelineEntry};
use crate::schema::contact::validate_contact;
use crate::schema::entry::validate_entry;
use crate::schema::{char_len, split_list, ValidationErrors};

const SUMMARY_MIN: usize = 50;
const SUMMARY_MAX: usize = 2000;
const SKILLS_MIN_CHARS: usize = 5;
const SKILLS_MAX_CHARS: usize = 1000;
const MIN_SKILLS: usize = 3;

/// (min entries, max entries, message when below min, message when above max)
fn entry_bounds(kind: EntryKind) -> (usize, usize, Option<&'static str>, &'static str) {
    match kind {
        EntryKind::Experience => (
            1,
            10,
            Some("Please add at least one work experience entry"),
            "Maximum 10 work experiences allowed",
        ),
        EntryKind::Education => (
            1,
            5,
            Some("Please add at least one education entry"),
            "Maximum 5 education entries allowed",
        ),
        EntryKind::Project => (0, 8, None, "Maximum 8 projects allowed"),
    }
}

pub fn validate_summary(errors: &mut ValidationErrors, summary: &str) {
    let len = char_len(summary);
    if len < SUMMARY_MIN {
        errors.push(
            "summary",
            format!("Professional summary must be at least {SUMMARY_MIN} characters"),
        );
    } else if len > SUMMARY_MAX {
        errors.push(
            "summary",
            format!("Professional summary must be less than {SUMMARY_MAX} characters"),
        );
    }
}

pub fn validate_skills(errors: &mut ValidationErrors, skills: &str) {
    let len = char_len(skills);
    if len < SKILLS_MIN_CHARS {
        errors.push(
            "skills",
            format!("Skills section must be at least {SKILLS_MIN_CHARS} characters"),
        );
    } else if len > SKILLS_MAX_CHARS {
        errors.push(
            "skills",
            format!("Skills section must be less than {SKILLS_MAX_CHARS} characters"),
        );
    } else if split_list(skills).len() < MIN_SKILLS {
        errors.push("skills", "Please enter at least 3 skills");
    }
}

fn validate_entries(
    errors: &mut ValidationErrors,
    kind: EntryKind,
    entries: &[TimelineEntry],
) -> Vec<TimelineEntry> {
    let field = kind.field_name();
    let (min, max, min_message, max_message) = entry_bounds(kind);
    if entries.len() < min {
        if let Some(message) = min_message {
            errors.push(field, message);
        }
    } else if entries.len() > max {
        errors.push(field, max_message);
    }

    let mut accepted = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match validate_entry(kind, &EntryDraft::from(entry)) {
            Ok(e) => accepted.push(e),
            Err(entry_errors) => errors.extend_nested(&format!("{field}.{i}"), entry_errors),
        }
    }
    accepted
}

/// Validates a full resume before it is saved from the structured form.
pub fn validate_resume(doc: &ResumeDocument) -> Result<ResumeDocument, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let contact_info = match validate_contact(&doc.contact_info) {
        Ok(c) => c,
        Err(contact_errors) => {
            errors.extend_nested("contact_info", contact_errors);
            doc.contact_info.clone()
        }
    };

    let summary = doc.summary.trim();
    validate_summary(&mut errors, summary);
    let skills = doc.skills.trim();
    validate_skills(&mut errors, skills);

    let experience = validate_entries(&mut errors, EntryKind::Experience, &doc.experience);
    let education = validate_entries(&mut errors, EntryKind::Education, &doc.education);
    let projects = validate_entries(&mut errors, EntryKind::Project, &doc.projects);

    errors.finish(ResumeDocument {
        contact_info,
        summary: summary.to_string(),
        skills: skills.to_string(),
        experience,
        education,
        projects,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::resume::document::{ContactInfo, ResumeDocument, TimelineEntry, YearMonth};

    pub fn experience_entry() -> TimelineEntry {
        TimelineEntry {
            title: "Engineer".into(),
            organization: "Acme".into(),
            start_date: YearMonth::new(2020, 1).unwrap(),
            end_date: None,
            description: "Designed and shipped the payments ledger, cutting reconciliation time by 60%"
                .into(),
            current: true,
        }
    }

    pub fn education_entry() -> TimelineEntry {
        TimelineEntry {
            title: "BSc Computer Science".into(),
            organization: "State University".into(),
            start_date: YearMonth::new(2015, 9).unwrap(),
            end_date: YearMonth::new(2019, 6),
            description: "Graduated with first class honours".into(),
            current: false,
        }
    }

    pub fn project_entry() -> TimelineEntry {
        TimelineEntry {
            title: "Resume Linter".into(),
            organization: "Rust, C++".into(),
            start_date: YearMonth::new(2021, 3).unwrap(),
            end_date: YearMonth::new(2021, 8),
            description: "Command line tool flagging vague resume bullets".into(),
            current: false,
        }
    }

    pub fn valid_document() -> ResumeDocument {
        ResumeDocument {
            contact_info: ContactInfo {
                email: "jane@example.com".into(),
                mobile: "+1 5551234567".into(),
                linkedin: "https://linkedin.com/in/jane".into(),
                twitter: String::new(),
            },
            summary: "Backend engineer with seven years building reliable payment systems."
                .into(),
            skills: "Rust, PostgreSQL, Kubernetes".into(),
            experience: vec![experience_entry()],
            education: vec![education_entry()],
            projects: vec![project_entry()],
        }
    }
}
