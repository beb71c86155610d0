use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AttemptOutcome, StepId};

/// One submission as the results collector receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub name: String,
    pub email: String,
    pub result: AttemptOutcome,
    /// Step ids joined with `", "`.
    pub submitted_order: String,
    /// ISO-8601 in UTC with millisecond precision.
    pub timestamp: String,
}

impl AttemptRecord {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        result: AttemptOutcome,
        submitted_order: &[StepId],
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            result,
            submitted_order: join_step_ids(submitted_order),
            timestamp: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

pub fn join_step_ids(ids: &[StepId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_collector_field_names() {
        let submitted_at: DateTime<Utc> = "2024-03-05T09:30:00Z".parse().expect("timestamp");
        let record = AttemptRecord::new(
            "Ada",
            "ada@example.com",
            AttemptOutcome::Incorrect,
            &[StepId(2), StepId(1), StepId(3)],
            submitted_at,
        );

        let value = serde_json::to_value(&record).expect("json");
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "result": "Incorrect",
                "submittedOrder": "2, 1, 3",
                "timestamp": "2024-03-05T09:30:00.000Z",
            })
        );
    }

    #[test]
    fn joins_single_and_empty_orders() {
        assert_eq!(join_step_ids(&[]), "");
        assert_eq!(join_step_ids(&[StepId(7)]), "7");
    }
}
