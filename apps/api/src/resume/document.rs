//! Structured resume model: the editable projection of a persisted markdown resume.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YearMonthError {
    #[error("expected YYYY-MM, got '{0}'")]
    Format(String),
    #[error("month out of range in '{0}'")]
    Month(String),
}

/// A calendar month, written `YYYY-MM` in forms and `Mon YYYY` in markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Markdown rendering, e.g. `Jan 2020`.
    pub fn to_display(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }

    /// Inverse of [`YearMonth::to_display`].
    pub fn parse_display(text: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(&format!("1 {}", text.trim()), "%d %b %Y").ok()?;
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .filter(|(y, m)| {
                y.len() == 4
                    && m.len() == 2
                    && y.bytes().all(|b| b.is_ascii_digit())
                    && m.bytes().all(|b| b.is_ascii_digit())
            })
            .ok_or_else(|| YearMonthError::Format(s.to_string()))?;
        let year: i32 = year.parse().map_err(|_| YearMonthError::Format(s.to_string()))?;
        let month: u32 = month.parse().map_err(|_| YearMonthError::Format(s.to_string()))?;
        Self::new(year, month).ok_or_else(|| YearMonthError::Month(s.to_string()))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = YearMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// The three timeline collections a resume carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Experience,
    Education,
    Project,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::Experience, EntryKind::Education, EntryKind::Project];

    /// Markdown section heading.
    pub fn section_title(&self) -> &'static str {
        match self {
            EntryKind::Experience => "Work Experience",
            EntryKind::Education => "Education",
            EntryKind::Project => "Projects",
        }
    }

    /// Field-path prefix inside a resume document.
    pub fn field_name(&self) -> &'static str {
        match self {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
            EntryKind::Project => "projects",
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "experience" => Ok(EntryKind::Experience),
            "education" => Ok(EntryKind::Education),
            "project" | "projects" => Ok(EntryKind::Project),
            other => Err(format!("unknown entry kind '{other}'")),
        }
    }
}

/// Unvalidated entry input as typed into the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryDraft {
    pub title: String,
    pub organization: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub current: bool,
}

impl From<&TimelineEntry> for EntryDraft {
    fn from(entry: &TimelineEntry) -> Self {
        Self {
            title: entry.title.clone(),
            organization: entry.organization.clone(),
            start_date: entry.start_date.to_string(),
            end_date: entry.end_date.map(|d| d.to_string()).unwrap_or_default(),
            description: entry.description.clone(),
            current: entry.current,
        }
    }
}

/// One job, degree or project. Only built by the entry schema or the markdown parser;
/// `current` entries never carry an end date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub title: String,
    pub organization: String,
    pub start_date: YearMonth,
    pub end_date: Option<YearMonth>,
    pub description: String,
    pub current: bool,
}

impl TimelineEntry {
    pub fn date_range(&self) -> String {
        match (self.current, self.end_date) {
            (true, _) | (false, None) => format!("{} - Present", self.start_date.to_display()),
            (false, Some(end)) => format!(
                "{} - {}",
                self.start_date.to_display(),
                end.to_display()
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: String,
    pub mobile: String,
    pub linkedin: String,
    pub twitter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    pub contact_info: ContactInfo,
    pub summary: String,
    pub skills: String,
    pub experience: Vec<TimelineEntry>,
    pub education: Vec<TimelineEntry>,
    pub projects: Vec<TimelineEntry>,
}

impl ResumeDocument {
    pub fn entries(&self, kind: EntryKind) -> &[TimelineEntry] {
        match kind {
            EntryKind::Experience => &self.experience,
            EntryKind::Education => &self.education,
            EntryKind::Project => &self.projects,
        }
    }

    pub fn replace_entries(&mut self, kind: EntryKind, entries: Vec<TimelineEntry>) {
        match kind {
            EntryKind::Experience => self.experience = entries,
            EntryKind::Education => self.education = entries,
            EntryKind::Project => self.projects = entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_parses_form_value() {
        let ym: YearMonth = "2020-01".parse().unwrap();
        assert_eq!(ym.year(), 2020);
        assert_eq!(ym.month(), 1);
        assert_eq!(ym.to_string(), "2020-01");
    }

    #[test]
    fn test_year_month_rejects_bad_shapes() {
        assert!("2020-1".parse::<YearMonth>().is_err());
        assert!("20-01".parse::<YearMonth>().is_err());
        assert!("2020/01".parse::<YearMonth>().is_err());
        assert!(matches!(
            "2020-13".parse::<YearMonth>(),
            Err(YearMonthError::Month(_))
        ));
    }

    #[test]
    fn test_year_month_display_round_trip() {
        let ym = YearMonth::new(2021, 9).unwrap();
        assert_eq!(ym.to_display(), "Sep 2021");
        assert_eq!(YearMonth::parse_display("Sep 2021"), Some(ym));
        assert_eq!(YearMonth::parse_display("  Sep 2021 "), Some(ym));
        assert_eq!(YearMonth::parse_display("Present"), None);
    }

    #[test]
    fn test_year_month_ordering() {
        let a = YearMonth::new(2020, 12).unwrap();
        let b = YearMonth::new(2021, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_year_month_serde_as_string() {
        let ym = YearMonth::new(2019, 3).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2019-03\"");
        let back: YearMonth = serde_json::from_str("\"2019-03\"").unwrap();
        assert_eq!(back, ym);
    }

    #[test]
    fn test_date_range_current_and_closed() {
        let mut entry = TimelineEntry {
            title: "Engineer".into(),
            organization: "Acme".into(),
            start_date: YearMonth::new(2020, 1).unwrap(),
            end_date: None,
            description: String::new(),
            current: true,
        };
        assert_eq!(entry.date_range(), "Jan 2020 - Present");

        entry.current = false;
        entry.end_date = YearMonth::new(2022, 6);
        assert_eq!(entry.date_range(), "Jan 2020 - Jun 2022");
    }

    #[test]
    fn test_entry_kind_from_path_segment() {
        assert_eq!("projects".parse::<EntryKind>(), Ok(EntryKind::Project));
        assert_eq!("Experience".parse::<EntryKind>(), Ok(EntryKind::Experience));
        assert!("awards".parse::<EntryKind>().is_err());
    }
}
