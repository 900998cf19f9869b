use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Execution context handed to the bot by the runner: the task under which
/// this run is tracked plus its parameter map.
#[derive(Debug, Clone, Deserialize)]
pub struct Execution {
    #[serde(rename = "taskId", alias = "id")]
    pub task_id: String,

    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

/// Severity of a progress alert shown on the platform.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AlertType {
    Info,
    Warn,
    Error,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Info => "INFO",
            AlertType::Warn => "WARN",
            AlertType::Error => "ERROR",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlertPayload<'a> {
    pub task_id: &'a str,
    pub title: &'a str,
    pub message: &'a str,
    #[serde(rename = "type")]
    pub alert_type: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorPayload<'a> {
    pub task_id: &'a str,
    pub message: &'a str,
    pub tags: &'a HashMap<String, String>,
}

#[derive(Deserialize)]
pub(crate) struct ErrorCreated {
    pub id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FinishPayload<'a> {
    pub state: &'a str,
    pub finish_status: &'a str,
    pub finish_message: &'a str,
    pub total_items: usize,
    pub processed_items: usize,
    pub failed_items: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_payload_wire_shape() {
        let payload = AlertPayload {
            task_id: "42",
            title: "BotYoutube - Inicio",
            message: "Estamos iniciando o processo",
            alert_type: AlertType::Info.as_str(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["taskId"], "42");
        assert_eq!(json["type"], "INFO");
        assert_eq!(json["message"], "Estamos iniciando o processo");
    }

    #[test]
    fn test_finish_payload_carries_counts() {
        let payload = FinishPayload {
            state: "FINISHED",
            finish_status: "PARTIALLY_COMPLETED",
            finish_message: "Dos 3 canais pesquisados, número de falha: 1 e número de sucesso: 2.",
            total_items: 3,
            processed_items: 2,
            failed_items: 1,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["finishStatus"], "PARTIALLY_COMPLETED");
        assert_eq!(json["totalItems"], 3);
        assert_eq!(json["processedItems"], 2);
        assert_eq!(json["failedItems"], 1);
    }

    #[test]
    fn test_error_payload_keeps_tags() {
        let mut tags = HashMap::new();
        tags.insert("canal".to_string(), "c".to_string());

        let payload = ErrorPayload {
            task_id: "42",
            message: "Navigation to https://www.youtube.com/@c failed",
            tags: &tags,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["tags"]["canal"], "c");
    }

    #[test]
    fn test_execution_accepts_id_alias() {
        let execution: Execution = serde_json::from_str(
            r#"{"id": "99", "parameters": {"canais": "a,b"}}"#,
        )
        .unwrap();

        assert_eq!(execution.task_id, "99");
        assert_eq!(execution.parameters["canais"], "a,b");
    }

    #[test]
    fn test_execution_defaults_missing_parameters() {
        let execution: Execution = serde_json::from_str(r#"{"taskId": "99"}"#).unwrap();
        assert!(execution.parameters.is_empty());
    }
}
