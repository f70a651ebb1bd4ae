use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::document::{EntryDraft, EntryKind, TimelineEntry, YearMonth};
use crate::schema::{char_len, ValidationErrors};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 2000;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 \t\-_./&()]+$").expect("title regex must compile"));
static ORGANIZATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 \t\-&.,()]+$").expect("organization regex must compile"));
static TECHNOLOGIES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9 \t\-&.,()#+]+$").expect("technologies regex must compile")
});
static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("month regex must compile"));

/// Per-kind labels and limits.
struct EntryRules {
    title_label: &'static str,
    organization_label: &'static str,
    organization_pattern: &'static Lazy<Regex>,
    description_min: usize,
    description_min_message: &'static str,
    end_date_required_message: &'static str,
}

fn rules_for(kind: EntryKind) -> EntryRules {
    match kind {
        EntryKind::Experience => EntryRules {
            title_label: "Job title",
            organization_label: "Company name",
            organization_pattern: &ORGANIZATION_RE,
            description_min: 50,
            description_min_message:
                "Description must be at least 50 characters to properly detail your work experience",
            end_date_required_message:
                "End date is required unless this is your current position",
        },
        EntryKind::Education => EntryRules {
            title_label: "Degree/Certification",
            organization_label: "Institution name",
            organization_pattern: &ORGANIZATION_RE,
            description_min: 10,
            description_min_message: "Description must be at least 10 characters",
            end_date_required_message: "End date is required unless you are currently studying",
        },
        EntryKind::Project => EntryRules {
            title_label: "Project name",
            organization_label: "Technologies/Tools",
            organization_pattern: &TECHNOLOGIES_RE,
            description_min: 30,
            description_min_message:
                "Description must be at least 30 characters to properly explain your project",
            end_date_required_message: "End date is required unless this is an ongoing project",
        },
    }
}

fn check_name(
    errors: &mut ValidationErrors,
    path: &str,
    value: &str,
    label: &str,
    pattern: &Regex,
) {
    let len = char_len(value);
    if len < NAME_MIN {
        errors.push(path, format!("{label} must be at least {NAME_MIN} characters"));
    } else if len > NAME_MAX {
        errors.push(path, format!("{label} must be less than {NAME_MAX} characters"));
    } else if !pattern.is_match(value) {
        errors.push(path, format!("{label} contains invalid characters"));
    }
}

fn parse_month(errors: &mut ValidationErrors, path: &str, value: &str) -> Option<YearMonth> {
    if !MONTH_RE.is_match(value) {
        errors.push(path, "Invalid date format");
        return None;
    }
    match value.parse::<YearMonth>() {
        Ok(ym) => Some(ym),
        Err(_) => {
            errors.push(path, "Invalid date format");
            None
        }
    }
}

/// Validates an entry draft under the rules of `kind` and returns the normalized entry.
///
/// Text fields are trimmed. A `current` entry drops whatever end date was typed.
pub fn validate_entry(kind: EntryKind, draft: &EntryDraft) -> Result<TimelineEntry, ValidationErrors> {
    let rules = rules_for(kind);
    let mut errors = ValidationErrors::new();

    let title = draft.title.trim();
    let organization = draft.organization.trim();
    let description = draft.description.trim();

    check_name(&mut errors, "title", title, rules.title_label, &TITLE_RE);
    check_name(
        &mut errors,
        "organization",
        organization,
        rules.organization_label,
        rules.organization_pattern,
    );

    let description_len = char_len(description);
    if description_len < rules.description_min {
        errors.push("description", rules.description_min_message);
    } else if description_len > DESCRIPTION_MAX {
        errors.push(
            "description",
            format!("Description must be less than {DESCRIPTION_MAX} characters"),
        );
    }

    let start_raw = draft.start_date.trim();
    let start_date = if start_raw.is_empty() {
        errors.push("start_date", "Start date is required");
        None
    } else {
        parse_month(&mut errors, "start_date", start_raw)
    };

    let end_raw = draft.end_date.trim();
    let end_date = if draft.current {
        None
    } else if end_raw.is_empty() {
        errors.push("end_date", rules.end_date_required_message);
        None
    } else {
        parse_month(&mut errors, "end_date", end_raw)
    };

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            errors.push("end_date", "End date must be after start date");
        }
    }

    match start_date {
        Some(start_date) if errors.is_empty() => Ok(TimelineEntry {
            title: title.to_string(),
            organization: organization.to_string(),
            start_date,
            end_date,
            description: description.to_string(),
            current: draft.current,
        }),
        _ => Err(errors),
    }
}
