//! Markdown projection of a resume document, and the best-effort reverse parse.
//!
//! The generated layout is a fixed sequence of `## ` sections: contact, summary, skills,
//! work experience, education, projects. Empty sections are skipped and sections are
//! separated by one blank line. The reverse parser only accepts that same layout; anything
//! else is a [`ParseError`] and callers keep their previous structured state.

use thiserror::Error;

use crate::resume::document::{ContactInfo, EntryKind, ResumeDocument, TimelineEntry, YearMonth};

const CENTER_OPEN: &str = "<div align=\"center\">";
const CENTER_CLOSE: &str = "</div>";
const SUMMARY_TITLE: &str = "Professional Summary";
const SKILLS_TITLE: &str = "Skills";
const PRESENT: &str = "Present";

const EMAIL_MARK: &str = "📧 ";
const MOBILE_MARK: &str = "📱 ";
const LINKEDIN_MARK: &str = "💼 ";
const TWITTER_MARK: &str = "🐦 ";

/// Leading character that marks an escaped body line.
const ESCAPE: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("text found before the first section heading")]
    TextBeforeFirstHeading,

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("section '{0}' is out of order or repeated")]
    OutOfOrder(String),

    #[error("malformed contact block: {0}")]
    MalformedContact(String),

    #[error("malformed entry in '{section}': {reason}")]
    MalformedEntry { section: String, reason: String },
}

/// The section grammar. Order of variants is the required document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Contact,
    Summary,
    Skills,
    Entries(EntryKind),
}

impl SectionKind {
    fn from_heading(heading: &str) -> Option<Self> {
        if heading.starts_with(CENTER_OPEN) {
            return Some(SectionKind::Contact);
        }
        match heading {
            SUMMARY_TITLE => Some(SectionKind::Summary),
            SKILLS_TITLE => Some(SectionKind::Skills),
            other => EntryKind::ALL
                .into_iter()
                .find(|k| k.section_title() == other)
                .map(SectionKind::Entries),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SectionKind::Contact => 0,
            SectionKind::Summary => 1,
            SectionKind::Skills => 2,
            SectionKind::Entries(EntryKind::Experience) => 3,
            SectionKind::Entries(EntryKind::Education) => 4,
            SectionKind::Entries(EntryKind::Project) => 5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Prefixes body lines that would read as a heading (or already start with the escape)
/// with a backslash. Markdown shows `\#` as a literal `#`.
fn escape_body(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.starts_with('#') || line.starts_with(ESCAPE) {
                format!("{ESCAPE}{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape_body(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| line.strip_prefix(ESCAPE).unwrap_or(*line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Centered name heading plus the non-empty contact parts joined by ` | `.
/// Empty when no contact field is filled in.
pub fn contact_markdown(name: &str, contact: &ContactInfo) -> String {
    let mut parts = Vec::new();
    let email = contact.email.trim();
    if !email.is_empty() {
        parts.push(format!("{EMAIL_MARK}{email}"));
    }
    let mobile = contact.mobile.trim();
    if !mobile.is_empty() {
        parts.push(format!("{MOBILE_MARK}{mobile}"));
    }
    let linkedin = contact.linkedin.trim();
    if !linkedin.is_empty() {
        parts.push(format!("{LINKEDIN_MARK}[LinkedIn]({linkedin})"));
    }
    let twitter = contact.twitter.trim();
    if !twitter.is_empty() {
        parts.push(format!("{TWITTER_MARK}[Twitter]({twitter})"));
    }

    if parts.is_empty() {
        return String::new();
    }

    format!(
        "## {CENTER_OPEN}{}{CENTER_CLOSE}\n\n{CENTER_OPEN}\n\n{}\n\n{CENTER_CLOSE}",
        name.split_whitespace().collect::<Vec<_>>().join(" "),
        parts.join(" | ")
    )
}

/// One `## {section}` block with a `### title @ organization` entry per item.
pub fn entries_to_markdown(entries: &[TimelineEntry], kind: EntryKind) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let body = entries
        .iter()
        .map(|e| {
            format!(
                "### {} @ {}\n{}\n\n{}",
                e.title,
                e.organization,
                e.date_range(),
                escape_body(&e.description)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("## {}\n\n{body}", kind.section_title())
}

fn text_section(title: &str, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!("## {title}\n\n{}", escape_body(body))
    }
}

/// Renders the whole document. Deterministic; an empty document renders as `""`.
pub fn render_document(name: &str, doc: &ResumeDocument) -> String {
    [
        contact_markdown(name, &doc.contact_info),
        text_section(SUMMARY_TITLE, &doc.summary),
        text_section(SKILLS_TITLE, &doc.skills),
        entries_to_markdown(&doc.experience, EntryKind::Experience),
        entries_to_markdown(&doc.education, EntryKind::Education),
        entries_to_markdown(&doc.projects, EntryKind::Project),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Reverse parse
// ────────────────────────────────────────────────────────────────────────────

/// Result of a successful reverse parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResume {
    /// Name from the contact heading, if there was a contact block.
    pub name: Option<String>,
    pub document: ResumeDocument,
}

struct RawSection<'a> {
    heading: &'a str,
    body: Vec<&'a str>,
}

fn split_sections(markdown: &str) -> Result<Vec<RawSection<'_>>, ParseError> {
    let mut sections: Vec<RawSection<'_>> = Vec::new();
    for line in markdown.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            sections.push(RawSection {
                heading: heading.trim(),
                body: Vec::new(),
            });
            continue;
        }
        match sections.last_mut() {
            Some(section) => section.body.push(line),
            None if line.trim().is_empty() => {}
            None => return Err(ParseError::TextBeforeFirstHeading),
        }
    }
    Ok(sections)
}

fn link_target(part: &str) -> Option<&str> {
    let (_, rest) = part.split_once("](")?;
    rest.strip_suffix(')')
}

fn parse_contact(heading: &str, body: &[&str]) -> Result<(String, ContactInfo), ParseError> {
    let name = heading
        .strip_prefix(CENTER_OPEN)
        .and_then(|h| h.strip_suffix(CENTER_CLOSE))
        .ok_or_else(|| ParseError::MalformedContact(format!("heading '{heading}'")))?
        .trim()
        .to_string();

    let mut contact = ContactInfo::default();
    let lines = body
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && *l != CENTER_OPEN && *l != CENTER_CLOSE);

    for line in lines {
        for part in line.split(" | ").map(str::trim) {
            if let Some(email) = part.strip_prefix(EMAIL_MARK) {
                contact.email = email.trim().to_string();
            } else if let Some(mobile) = part.strip_prefix(MOBILE_MARK) {
                contact.mobile = mobile.trim().to_string();
            } else if let Some(link) = part.strip_prefix(LINKEDIN_MARK) {
                contact.linkedin = link_target(link)
                    .ok_or_else(|| ParseError::MalformedContact(part.to_string()))?
                    .to_string();
            } else if let Some(link) = part.strip_prefix(TWITTER_MARK) {
                contact.twitter = link_target(link)
                    .ok_or_else(|| ParseError::MalformedContact(part.to_string()))?
                    .to_string();
            } else {
                return Err(ParseError::MalformedContact(part.to_string()));
            }
        }
    }
    Ok((name, contact))
}

fn parse_date_range(
    section: &str,
    line: &str,
) -> Result<(YearMonth, Option<YearMonth>, bool), ParseError> {
    let malformed = || ParseError::MalformedEntry {
        section: section.to_string(),
        reason: format!("bad date range '{line}'"),
    };
    let (start, end) = line.split_once(" - ").ok_or_else(malformed)?;
    let start = YearMonth::parse_display(start).ok_or_else(malformed)?;
    let end = end.trim();
    if end == PRESENT {
        return Ok((start, None, true));
    }
    let end = YearMonth::parse_display(end).ok_or_else(malformed)?;
    Ok((start, Some(end), false))
}

fn parse_entry(section: &str, header: &str, lines: &[&str]) -> Result<TimelineEntry, ParseError> {
    let (title, organization) =
        header
            .split_once(" @ ")
            .ok_or_else(|| ParseError::MalformedEntry {
                section: section.to_string(),
                reason: format!("expected 'title @ organization', got '{header}'"),
            })?;

    let (date_line, rest) = lines.split_first().ok_or_else(|| ParseError::MalformedEntry {
        section: section.to_string(),
        reason: format!("missing date range for '{header}'"),
    })?;
    let (start_date, end_date, current) = parse_date_range(section, date_line.trim())?;

    Ok(TimelineEntry {
        title: title.trim().to_string(),
        organization: organization.trim().to_string(),
        start_date,
        end_date,
        description: unescape_body(rest),
        current,
    })
}

fn parse_entries(kind: EntryKind, body: &[&str]) -> Result<Vec<TimelineEntry>, ParseError> {
    let section = kind.section_title();
    let mut blocks: Vec<(&str, Vec<&str>)> = Vec::new();
    for line in body {
        if let Some(header) = line.strip_prefix("### ") {
            blocks.push((header.trim(), Vec::new()));
            continue;
        }
        match blocks.last_mut() {
            Some((_, lines)) => lines.push(line),
            None if line.trim().is_empty() => {}
            None => {
                return Err(ParseError::MalformedEntry {
                    section: section.to_string(),
                    reason: "text before the first entry".to_string(),
                })
            }
        }
    }
    blocks
        .iter()
        .map(|(header, lines)| parse_entry(section, header, lines))
        .collect()
}

/// Reverse-parses markdown produced by [`render_document`].
///
/// Not lossless for hand-edited text: unknown headings, reordered sections or entries
/// without a `title @ organization` / date-range header fail the whole parse.
pub fn parse_document(markdown: &str) -> Result<ParsedResume, ParseError> {
    let mut parsed = ParsedResume {
        name: None,
        document: ResumeDocument::default(),
    };
    let mut last_rank: Option<u8> = None;

    for section in split_sections(markdown)? {
        let kind = SectionKind::from_heading(section.heading)
            .ok_or_else(|| ParseError::UnknownSection(section.heading.to_string()))?;
        if last_rank.is_some_and(|r| kind.rank() <= r) {
            return Err(ParseError::OutOfOrder(section.heading.to_string()));
        }
        last_rank = Some(kind.rank());

        match kind {
            SectionKind::Contact => {
                let (name, contact) = parse_contact(section.heading, &section.body)?;
                parsed.name = Some(name);
                parsed.document.contact_info = contact;
            }
            SectionKind::Summary => {
                parsed.document.summary = unescape_body(&section.body);
            }
            SectionKind::Skills => {
                parsed.document.skills = unescape_body(&section.body);
            }
            SectionKind::Entries(entry_kind) => {
                let entries = parse_entries(entry_kind, &section.body)?;
                parsed.document.replace_entries(entry_kind, entries);
            }
        }
    }

    Ok(parsed)
}
