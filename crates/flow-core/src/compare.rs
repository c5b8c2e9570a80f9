//! Reporte de comparación agregada: el equivalente batch (no paginado) del
//! pairing engine para un flow completo. Clasifica a través del mismo
//! `classify` que la vista en vivo; las dos superficies no pueden divergir.
use flow_domain::{AssertionEvent, PointEvent};
use serde::Serialize;
use serde_json::Value;

use crate::diff::DiffEntry;
use crate::pairing::{pair_streams, PairingStatus};

/// Resultado por posición, con los ids de persistencia a mano para la vista
/// de comparación.
#[derive(Debug, Clone, Serialize)]
pub struct CompareResult {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_id: Option<i64>,
    pub description: String,
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diffs: Vec<DiffEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    pub status: PairingStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub results: Vec<CompareResult>,
    pub total: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub success: bool,
    pub total_points: usize,
    pub total_asserts: usize,
}

impl CompareReport {
    /// Construye el reporte para los streams completos de un flow.
    pub fn build(points: &[PointEvent], assertions: &[AssertionEvent]) -> Self {
        let results: Vec<CompareResult> =
            pair_streams(points, assertions).into_iter()
                                            .map(|p| {
                                                let description = match (&p.point, &p.assertion) {
                                                    (Some(point), _) => point.data.description.clone(),
                                                    (None, Some(_)) => "Orphan Assertion".to_string(),
                                                    (None, None) => String::new(),
                                                };
                                                CompareResult { index: p.index,
                                                                point_id: p.point.as_ref().map(|e| e.data.id),
                                                                assertion_id: p.assertion.as_ref().map(|e| e.data.id),
                                                                description,
                                                                matched: p.status.is_match(),
                                                                diffs: p.diffs,
                                                                expected: p.point.map(|e| e.data.expected),
                                                                actual: p.assertion.map(|e| e.data.actual),
                                                                status: p.status }
                                            })
                                            .collect();

        let matches = results.iter().filter(|r| r.matched).count();
        let total = results.len();
        CompareReport { matches,
                        mismatches: total - matches,
                        success: matches == total,
                        total,
                        total_points: points.len(),
                        total_asserts: assertions.len(),
                        results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use flow_domain::{AssertionData, PointData};
    use serde_json::json;

    fn point(id: i64, expected: serde_json::Value) -> PointEvent {
        PointEvent { timestamp: Utc::now(),
                     data: PointData { id,
                                       description: format!("contract {id}"),
                                       expected,
                                       service_name: "svc".into(),
                                       schema: None,
                                       timeout_ms: None } }
    }

    fn assertion(id: i64, actual: serde_json::Value) -> AssertionEvent {
        AssertionEvent { timestamp: Utc::now(),
                         data: AssertionData { id, actual, service_name: "svc".into(), processed_at: None } }
    }

    #[test]
    fn report_counts_add_up() {
        let points = vec![point(1, json!(1)), point(2, json!({"a": 1})), point(3, json!(true))];
        let assertions = vec![assertion(10, json!(1)), assertion(11, json!({"a": 2}))];

        let report = CompareReport::build(&points, &assertions);
        assert_eq!(report.total, 3);
        assert_eq!(report.matches, 1);
        assert_eq!(report.mismatches, 2);
        assert!(!report.success);
        assert_eq!(report.total_points, 3);
        assert_eq!(report.total_asserts, 2);

        assert_eq!(report.results[1].status, PairingStatus::Mismatch);
        assert_eq!(report.results[2].status, PairingStatus::MissingAssertion);
        assert_eq!(report.results[2].assertion_id, None);
    }

    #[test]
    fn orphan_results_use_the_placeholder_description() {
        let report = CompareReport::build(&[], &[assertion(5, json!(null))]);
        assert_eq!(report.results[0].description, "Orphan Assertion");
        assert_eq!(report.results[0].status, PairingStatus::Orphan);
        assert_eq!(report.results[0].point_id, None);
    }

    #[test]
    fn all_matches_is_success() {
        let points = vec![point(1, json!({"x": [1, 2]}))];
        let assertions = vec![assertion(2, json!({"x": [1, 2]}))];
        let report = CompareReport::build(&points, &assertions);
        assert!(report.success);
        assert!(report.results[0].diffs.is_empty());
    }
}
