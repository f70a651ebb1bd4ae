use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    /// Identifier issued by the external identity provider.
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
    /// Stored as `industry-sub-industry`, e.g. `tech-software-development`.
    pub industry: Option<String>,
    pub experience: Option<f64>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
