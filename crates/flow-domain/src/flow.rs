//! Snapshot inmutable de un flow tal como lo entrega el servicio de
//! persistencia de eventos. El core nunca muta un `Flow`: cada fetch
//! reemplaza el snapshot anterior.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado del ciclo de vida de un flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowStatus {
    /// El flow sigue recibiendo eventos; sus páginas pueden crecer.
    Active,
    Finished,
    Interrupted,
}

impl FlowStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, FlowStatus::Active)
    }
}

/// Una ejecución monitoreada, dueña de dos streams de eventos (points y
/// assertions) en orden de persistencia.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub status: FlowStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Conteos denormalizados, calculados por el servicio en cada listado.
    #[serde(default)]
    pub point_count: u64,
    #[serde(default)]
    pub assertion_count: u64,
}

/// Conteos agregados por estado. Solo presentación: ninguna lógica del core
/// depende de esto.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowStats {
    pub total_flows: u64,
    pub active_flows: u64,
    pub finished_flows: u64,
    pub interrupted_flows: u64,
    pub total_points: u64,
    pub total_assertions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_screaming_wire_names() {
        assert_eq!(serde_json::to_string(&FlowStatus::Active).unwrap(), "\"ACTIVE\"");
        assert_eq!(serde_json::to_string(&FlowStatus::Interrupted).unwrap(), "\"INTERRUPTED\"");
        let s: FlowStatus = serde_json::from_str("\"FINISHED\"").unwrap();
        assert_eq!(s, FlowStatus::Finished);
    }

    #[test]
    fn flow_roundtrip_keeps_optional_fields() {
        let raw = r#"{
            "id": 7,
            "name": "checkout",
            "identifier": "order-123",
            "status": "ACTIVE",
            "created_at": "2026-01-10T10:00:00Z",
            "point_count": 3,
            "assertion_count": 2
        }"#;
        let f: Flow = serde_json::from_str(raw).unwrap();
        assert_eq!(f.identifier.as_deref(), Some("order-123"));
        assert!(f.service.is_none());
        assert!(f.status.is_active());
        assert_eq!(f.point_count, 3);
    }
}
