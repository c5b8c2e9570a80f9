//! Eventos del timeline de un flow.
//!
//! Dos tipos: POINT declara el valor esperado en un punto de la lógica del
//! flow, ASSERTION reporta el valor realmente observado. Cada stream es
//! append-only en orden de persistencia; ningún evento se reordena ni se
//! muta después de creado. El payload (`expected` / `actual`) es JSON
//! arbitrario y se compara de forma estructural, no se valida contra schema.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload de un POINT: el contrato declarado por la instrumentación.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointData {
    pub id: i64,
    pub description: String,
    pub expected: Value,
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<i64>,
}

/// Payload de una ASSERTION: lo observado en runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionData {
    pub id: i64,
    pub actual: Value,
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointEvent {
    pub timestamp: DateTime<Utc>,
    pub data: PointData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionEvent {
    pub timestamp: DateTime<Utc>,
    pub data: AssertionData,
}

/// Miembro del timeline mixto tal como viaja por el wire:
/// `{"type": "POINT" | "ASSERTION", "timestamp": ..., "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimelineEvent {
    #[serde(rename = "POINT")]
    Point(PointEvent),
    #[serde(rename = "ASSERTION")]
    Assertion(AssertionEvent),
}

impl TimelineEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            TimelineEvent::Point(p) => p.timestamp,
            TimelineEvent::Assertion(a) => a.timestamp,
        }
    }

    pub fn as_point(&self) -> Option<&PointEvent> {
        match self {
            TimelineEvent::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_assertion(&self) -> Option<&AssertionEvent> {
        match self {
            TimelineEvent::Assertion(a) => Some(a),
            _ => None,
        }
    }
}
