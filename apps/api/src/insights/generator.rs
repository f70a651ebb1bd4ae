//! Industry insight generation and refresh.
//!
//! Insights are shared per industry. A row is regenerated through the LLM once its
//! `next_update` has passed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::insights::prompts::INSIGHT_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{fill, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::insight::IndustryInsightRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub role: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    #[serde(default)]
    pub location: String,
}

/// Insight payload exactly as the LLM returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedInsight {
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub market_outlook: String,
    #[serde(default)]
    pub key_trends: Vec<String>,
    #[serde(default)]
    pub recommended_skills: Vec<String>,
}

impl GeneratedInsight {
    /// Drops salary rows whose bounds are inverted.
    fn sanitized(mut self) -> Self {
        self.salary_ranges
            .retain(|r| r.min <= r.max && r.min <= r.median && r.median <= r.max);
        self
    }
}

pub fn is_stale(row: &IndustryInsightRow, now: DateTime<Utc>) -> bool {
    row.next_update <= now
}

pub async fn generate_insight(llm: &LlmClient, industry: &str) -> Result<GeneratedInsight, AppError> {
    let prompt = fill(INSIGHT_PROMPT_TEMPLATE, &[("industry", industry)]);
    let insight: GeneratedInsight = llm
        .call_json(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate insights for {industry}: {e}")))?;
    Ok(insight.sanitized())
}

pub async fn find_insight(
    pool: &PgPool,
    industry: &str,
) -> Result<Option<IndustryInsightRow>, AppError> {
    Ok(
        sqlx::query_as::<_, IndustryInsightRow>("SELECT * FROM industry_insights WHERE industry = $1")
            .bind(industry)
            .fetch_optional(pool)
            .await?,
    )
}

async fn upsert_insight(
    pool: &PgPool,
    industry: &str,
    insight: &GeneratedInsight,
    now: DateTime<Utc>,
    refresh_days: i64,
) -> Result<IndustryInsightRow, AppError> {
    let salary_ranges = serde_json::to_value(&insight.salary_ranges)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(sqlx::query_as::<_, IndustryInsightRow>(
        r#"
        INSERT INTO industry_insights
            (industry, salary_ranges, growth_rate, demand_level, top_skills,
             market_outlook, key_trends, recommended_skills, last_updated, next_update)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (industry) DO UPDATE SET
            salary_ranges = EXCLUDED.salary_ranges,
            growth_rate = EXCLUDED.growth_rate,
            demand_level = EXCLUDED.demand_level,
            top_skills = EXCLUDED.top_skills,
            market_outlook = EXCLUDED.market_outlook,
            key_trends = EXCLUDED.key_trends,
            recommended_skills = EXCLUDED.recommended_skills,
            last_updated = EXCLUDED.last_updated,
            next_update = EXCLUDED.next_update
        RETURNING *
        "#,
    )
    .bind(industry)
    .bind(salary_ranges)
    .bind(insight.growth_rate)
    .bind(&insight.demand_level)
    .bind(&insight.top_skills)
    .bind(&insight.market_outlook)
    .bind(&insight.key_trends)
    .bind(&insight.recommended_skills)
    .bind(now)
    .bind(now + Duration::days(refresh_days))
    .fetch_one(pool)
    .await?)
}

/// Returns the stored insight for `industry`, generating or refreshing it when missing or stale.
pub async fn ensure_insight(
    pool: &PgPool,
    llm: &LlmClient,
    industry: &str,
    refresh_days: i64,
) -> Result<IndustryInsightRow, AppError> {
    let now = Utc::now();
    if let Some(row) = find_insight(pool, industry).await? {
        if !is_stale(&row, now) {
            return Ok(row);
        }
        info!("Insight for {industry} is stale (next_update {}), refreshing", row.next_update);
    } else {
        info!("No insight for {industry} yet, generating");
    }

    let generated = generate_insight(llm, industry).await?;
    let row = upsert_insight(pool, industry, &generated, now, refresh_days).await?;
    info!("Stored insight for {industry}, next update {}", row.next_update);
    Ok(row)
}
