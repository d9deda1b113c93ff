use serde_json::Value;

/// Pulls the `jobs` array out of a provider payload, unchanged.
///
/// A payload without a `jobs` array is handed back whole so the caller can
/// surface it for diagnosis instead of pretending the search came back empty.
pub fn take_jobs(payload: Value) -> Result<Vec<Value>, Value> {
    match payload {
        Value::Object(mut map) => match map.remove("jobs") {
            Some(Value::Array(jobs)) => Ok(jobs),
            Some(other) => {
                map.insert("jobs".to_string(), other);
                Err(Value::Object(map))
            }
            None => Err(Value::Object(map)),
        },
        other => Err(other),
    }
}
