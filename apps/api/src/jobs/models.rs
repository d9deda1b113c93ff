use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Search filters as the frontend sends them. Every field is optional on the
/// wire; `salary` and `radius` arrive as numbers or strings depending on the form.
#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<Value>,
    #[serde(default)]
    pub radius: Option<Value>,
}

/// The body actually sent to the job provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamJobQuery {
    pub keywords: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
}

impl UpstreamJobQuery {
    /// Applies the defaults: blank location becomes `default_location`, and
    /// salary/radius are dropped when falsy or `"0"`.
    pub fn from_query(query: &JobQuery, default_location: &str) -> Self {
        let location = query
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(default_location)
            .to_string();

        Self {
            keywords: query.keywords.as_deref().unwrap_or_default().trim().to_string(),
            location,
            salary: query.salary.as_ref().and_then(salary_filter),
            radius: query.radius.as_ref().and_then(radius_filter),
        }
    }
}

fn salary_filter(value: &Value) -> Option<u64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if amount.is_finite() && amount >= 1.0 {
        Some(amount.trunc() as u64)
    } else {
        None
    }
}

fn radius_filter(value: &Value) -> Option<String> {
    let radius = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if radius.is_empty() || radius == "0" {
        None
    } else {
        Some(radius)
    }
}

/// A listing as the job provider describes it. Only used where the server
/// reads listings (prompt building); search results are forwarded as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub snippet: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub salary: Option<String>,
}

/// Jooble mixes numeric and string ids; accept either, plus null.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<Value>,
}
