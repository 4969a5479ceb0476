use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: Option<i64>,
    pub amount: f64,
    pub description: String,
    pub category: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewExpense {
    pub amount: f64,
    pub description: String,
    pub category: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BudgetSummary {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_spent: f64,
    #[serde(default)]
    pub monthly_budget: Option<f64>,
    #[serde(default)]
    pub remaining_budget: Option<f64>,
}

impl BudgetSummary {
    /// The monthly budget when one is in force. Zero counts as unset.
    pub fn budget_limit(&self) -> Option<f64> {
        self.monthly_budget.filter(|budget| *budget > 0.0)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CurrentUser {
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetUpdate {
    pub budget: f64,
}

// The API emits naive UTC timestamps, but tolerate an explicit offset too.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(with_offset.naive_utc());
    }
    raw.parse::<NaiveDateTime>()
        .map_err(|e| serde::de::Error::custom(format!("invalid expense date {raw:?}: {e}")))
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
