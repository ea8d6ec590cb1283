// Data model for the task store

use serde::{Deserialize, Serialize};

/// A single task row.
///
/// `completed` is a plain bool at this boundary; the 0/1 INTEGER encoding
/// exists only inside SQL statements. `created_at` is milliseconds since
/// epoch and may be absent for rows created by other means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: Option<i64>,
}

/// Current timestamp in milliseconds since epoch.
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms() {
        let ts = now_ms();
        assert!(ts > 0);
        // Should be reasonable timestamp (after year 2020)
        assert!(ts > 1_600_000_000_000);
    }

    #[test]
    fn test_task_serialization() {
        let task = Task {
            id: 1,
            title: "Buy milk".to_string(),
            completed: false,
            created_at: Some(1_700_000_000_000),
        };

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"title\":\"Buy milk\""));
        assert!(json.contains("\"completed\":false"));

        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, task);
    }

    #[test]
    fn test_task_null_created_at() {
        let json = r#"{"id":2,"title":"X","completed":true,"created_at":null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.created_at, None);
        assert!(task.completed);
    }
}
