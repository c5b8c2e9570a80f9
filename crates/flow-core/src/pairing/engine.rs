//! Empareja el stream de points con el de assertions por posición.
//!
//! El emparejamiento es puramente posicional: el i-ésimo POINT del flow
//! completo (no por página) corresponde a la i-ésima ASSERTION. No se
//! intenta matching semántico entre descripción y contenido; ambos streams
//! los emite instrumentación cooperante en orden correspondiente.
use flow_domain::{AssertionEvent, PointEvent};
use serde::Serialize;

use super::status::{classify, PairingStatus};
use crate::diff::{deep_compare, DiffEntry};

/// Vista derivada de una posición del flow. Se recalcula en cada pasada de
/// reconciliación; nunca se persiste.
#[derive(Debug, Clone, Serialize)]
pub struct Pairing {
    pub index: usize,
    pub point: Option<PointEvent>,
    pub assertion: Option<AssertionEvent>,
    pub diffs: Vec<DiffEntry>,
    pub status: PairingStatus,
}

/// Produce un `Pairing` por índice `0..max(|points|, |assertions|)`.
/// Los pares con ambos lados llevan el diff estructural; los de un solo
/// lado llevan diffs vacío (no hay nada que comparar).
pub fn pair_streams(points: &[PointEvent], assertions: &[AssertionEvent]) -> Vec<Pairing> {
    let len = points.len().max(assertions.len());
    let mut pairings = Vec::with_capacity(len);

    for index in 0..len {
        let point = points.get(index).cloned();
        let assertion = assertions.get(index).cloned();

        let diffs = match (&point, &assertion) {
            (Some(p), Some(a)) => deep_compare(&p.data.expected, &a.data.actual),
            _ => Vec::new(),
        };
        let status = classify(point.is_some(), assertion.is_some(), &diffs);

        pairings.push(Pairing { index, point, assertion, diffs, status });
    }

    pairings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use flow_domain::{AssertionData, PointData};
    use serde_json::{json, Value};

    fn point(id: i64, expected: Value) -> PointEvent {
        PointEvent { timestamp: Utc::now(),
                     data: PointData { id,
                                       description: format!("point {id}"),
                                       expected,
                                       service_name: "svc-a".into(),
                                       schema: None,
                                       timeout_ms: None } }
    }

    fn assertion(id: i64, actual: Value) -> AssertionEvent {
        AssertionEvent { timestamp: Utc::now(),
                         data: AssertionData { id,
                                               actual,
                                               service_name: "svc-b".into(),
                                               processed_at: None } }
    }

    #[test]
    fn pairing_cardinality_for_uneven_streams() {
        let points = vec![point(1, json!(1)), point(2, json!(2)), point(3, json!(3))];
        let assertions = vec![assertion(1, json!(1)), assertion(2, json!(2))];

        let pairings = pair_streams(&points, &assertions);
        assert_eq!(pairings.len(), 3);
        assert_eq!(pairings[0].status, PairingStatus::Match);
        assert_eq!(pairings[1].status, PairingStatus::Match);
        assert_eq!(pairings[2].status, PairingStatus::MissingAssertion);
        assert!(pairings[2].diffs.is_empty());
    }

    #[test]
    fn surplus_assertions_become_orphans() {
        let points = vec![point(1, json!(1)), point(2, json!(2))];
        let assertions = vec![assertion(1, json!(1)),
                              assertion(2, json!(2)),
                              assertion(3, json!(3))];

        let pairings = pair_streams(&points, &assertions);
        assert_eq!(pairings.len(), 3);
        assert_eq!(pairings[2].status, PairingStatus::Orphan);
        assert!(pairings[2].point.is_none());
    }

    #[test]
    fn mismatch_carries_the_structural_diff() {
        let points = vec![point(1, json!({"a": 1, "b": 2}))];
        let assertions = vec![assertion(1, json!({"a": 1, "b": 3}))];

        let pairings = pair_streams(&points, &assertions);
        assert_eq!(pairings[0].status, PairingStatus::Mismatch);
        assert_eq!(pairings[0].diffs.len(), 1);
        assert_eq!(pairings[0].diffs[0].path, "$.b");
        assert_eq!(pairings[0].diffs[0].expected, Some(json!(2)));
        assert_eq!(pairings[0].diffs[0].actual, Some(json!(3)));
    }

    #[test]
    fn empty_streams_produce_no_pairings() {
        assert!(pair_streams(&[], &[]).is_empty());
    }
}
