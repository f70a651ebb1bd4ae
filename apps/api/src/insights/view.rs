//! Dashboard projection of a stored industry insight.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::insights::generator::SalaryRange;
use crate::models::insight::IndustryInsightRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl DemandLevel {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => DemandLevel::High,
            "medium" => DemandLevel::Medium,
            "low" => DemandLevel::Low,
            _ => DemandLevel::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
    Unknown,
}

impl MarketOutlook {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => MarketOutlook::Positive,
            "neutral" => MarketOutlook::Neutral,
            "negative" => MarketOutlook::Negative,
            _ => MarketOutlook::Unknown,
        }
    }
}

/// One bar of the salary chart, figures in thousands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBar {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl From<&SalaryRange> for SalaryBar {
    fn from(range: &SalaryRange) -> Self {
        SalaryBar {
            name: range.role.clone(),
            min: range.min / 1000.0,
            max: range.max / 1000.0,
            median: range.median / 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub industry: String,
    pub salary_data: Vec<SalaryBar>,
    pub growth_rate: f64,
    pub demand_level: DemandLevel,
    pub market_outlook: MarketOutlook,
    pub top_skills: Vec<String>,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    /// `dd/MM/yyyy`.
    pub last_updated: String,
    pub next_update: DateTime<Utc>,
    /// Whole days until the next refresh, never negative.
    pub next_update_in_days: i64,
}

pub fn build_dashboard(
    row: &IndustryInsightRow,
    now: DateTime<Utc>,
) -> Result<DashboardView, serde_json::Error> {
    let ranges: Vec<SalaryRange> = serde_json::from_value(row.salary_ranges.clone())?;

    Ok(DashboardView {
        industry: row.industry.clone(),
        salary_data: ranges.iter().map(SalaryBar::from).collect(),
        growth_rate: (row.growth_rate * 10.0).round() / 10.0,
        demand_level: DemandLevel::parse(&row.demand_level),
        market_outlook: MarketOutlook::parse(&row.market_outlook),
        top_skills: row.top_skills.clone(),
        key_trends: row.key_trends.clone(),
        recommended_skills: row.recommended_skills.clone(),
        last_updated: row.last_updated.format("%d/%m/%Y").to_string(),
        next_update: row.next_update,
        next_update_in_days: (row.next_update - now).num_days().max(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;
    use uuid::Uuid;

    fn insight_row() -> IndustryInsightRow {
        let last_updated = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        IndustryInsightRow {
            id: Uuid::new_v4(),
            industry: "tech-software-development".into(),
            salary_ranges: json!([
                {"role": "Backend Engineer", "min": 95000, "max": 180000, "median": 132500, "location": "US"}
            ]),
            growth_rate: 7.46,
            demand_level: "HIGH".into(),
            top_skills: vec!["Rust".into()],
            market_outlook: "Cautious".into(),
            key_trends: vec!["AI tooling".into()],
            recommended_skills: vec!["Kubernetes".into()],
            last_updated,
            next_update: last_updated + Duration::days(7),
        }
    }

    #[test]
    fn test_salaries_in_thousands() {
        let row = insight_row();
        let view = build_dashboard(&row, row.last_updated).unwrap();
        assert_eq!(
            view.salary_data,
            vec![SalaryBar {
                name: "Backend Engineer".into(),
                min: 95.0,
                max: 180.0,
                median: 132.5,
            }]
        );
    }

    #[test]
    fn test_last_updated_format() {
        let row = insight_row();
        let view = build_dashboard(&row, row.last_updated).unwrap();
        assert_eq!(view.last_updated, "05/03/2024");
        assert_eq!(view.next_update_in_days, 7);
        assert_eq!(view.growth_rate, 7.5);
    }

    #[test]
    fn test_enum_mapping_falls_back_to_unknown() {
        let row = insight_row();
        let view = build_dashboard(&row, row.last_updated).unwrap();
        assert_eq!(view.demand_level, DemandLevel::High);
        assert_eq!(view.market_outlook, MarketOutlook::Unknown);
        assert_eq!(DemandLevel::parse(""), DemandLevel::Unknown);
        assert_eq!(MarketOutlook::parse(" negative "), MarketOutlook::Negative);
    }

    #[test]
    fn test_overdue_refresh_clamps_to_zero() {
        let row = insight_row();
        let view = build_dashboard(&row, row.next_update + Duration::days(3)).unwrap();
        assert_eq!(view.next_update_in_days, 0);
    }

    #[test]
    fn test_malformed_salary_json_is_error() {
        let mut row = insight_row();
        row.salary_ranges = json!({"not": "a list"});
        assert!(build_dashboard(&row, row.last_updated).is_err());
    }
}
