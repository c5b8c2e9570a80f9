//! La ventana de eventos frente a paginación real: páginas que llegan en
//! desorden, re-reads de un flow activo que creció, y cambio de sujeto con
//! un fetch en vuelo.
use chrono::{TimeZone, Utc};
use flow_core::{EventWindow, MergeOutcome, PairingStatus};
use flow_domain::{AssertionData, AssertionEvent, PointData, PointEvent, TimelineEvent, TimelineMeta};
use serde_json::{json, Value};

fn point_ev(id: i64, expected: Value) -> TimelineEvent {
    TimelineEvent::Point(PointEvent { timestamp: Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
                                      data: PointData { id,
                                                        description: format!("p{id}"),
                                                        expected,
                                                        service_name: "svc".into(),
                                                        schema: None,
                                                        timeout_ms: None } })
}

fn assertion_ev(id: i64, actual: Value) -> TimelineEvent {
    TimelineEvent::Assertion(AssertionEvent { timestamp: Utc.timestamp_opt(1_700_000_500 + id, 0).unwrap(),
                                              data: AssertionData { id,
                                                                    actual,
                                                                    service_name: "svc".into(),
                                                                    processed_at: None } })
}

fn meta(page: u32, limit: u32, pages: u32, points: u64, assertions: u64) -> TimelineMeta {
    TimelineMeta { page, limit, pages, total_points: points, total_assertions: assertions }
}

#[test]
fn pairing_positions_survive_page_chunking() {
    // 2 páginas de limit 2: el 3er point global (página 2, índice 0) debe
    // emparejar con la 3ra assertion global aunque lleguen en páginas
    // distintas.
    let mut win = EventWindow::new(2);

    let t1 = win.begin(1).unwrap();
    win.complete(t1,
                 vec![point_ev(1, json!(1)), assertion_ev(10, json!(1)),
                      point_ev(2, json!(2)), assertion_ev(11, json!(2))],
                 meta(1, 2, 2, 3, 3));

    let t2 = win.begin(2).unwrap();
    win.complete(t2,
                 vec![point_ev(3, json!(3)), assertion_ev(12, json!(99))],
                 meta(2, 2, 2, 3, 3));

    let pairings = win.reconcile();
    assert_eq!(pairings.len(), 3);
    assert_eq!(pairings[0].status, PairingStatus::Match);
    assert_eq!(pairings[1].status, PairingStatus::Match);
    assert_eq!(pairings[2].status, PairingStatus::Mismatch);
    assert_eq!(pairings[2].point.as_ref().unwrap().data.id, 3);
    assert_eq!(pairings[2].assertion.as_ref().unwrap().data.id, 12);
}

#[test]
fn out_of_order_completion_never_merges_ahead() {
    let mut win = EventWindow::new(1);

    let t1 = win.begin(1).unwrap();
    win.complete(t1, vec![point_ev(1, json!(1))], meta(1, 1, 3, 3, 0));

    // la página 3 resuelve antes que la 2 por timing de red
    let t3 = win.begin(3).unwrap();
    assert_eq!(win.complete(t3, vec![point_ev(3, json!(3))], meta(3, 1, 3, 3, 0)),
               MergeOutcome::Staged);
    assert_eq!(win.points().len(), 1);
    // con la 2 sin fusionar, la ventana sigue incompleta
    assert!(win.has_more());
    assert_eq!(win.next_page(), 2);

    let t2 = win.begin(2).unwrap();
    assert_eq!(win.complete(t2, vec![point_ev(2, json!(2))], meta(2, 1, 3, 3, 0)),
               MergeOutcome::Merged);

    let ids: Vec<i64> = win.points().iter().map(|p| p.data.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(!win.has_more());
}

#[test]
fn refetch_of_grown_active_flow_replaces_page_slice() {
    let mut win = EventWindow::new(50);

    let t1 = win.begin(1).unwrap();
    win.complete(t1, vec![point_ev(1, json!(1))], meta(1, 50, 1, 1, 0));
    assert_eq!(win.reconcile()[0].status, PairingStatus::MissingAssertion);

    // el flow sigue ACTIVE: el re-read de la página 1 trae el item nuevo
    // además de los ya vistos; reemplaza, no concatena
    let t1b = win.begin(1).unwrap();
    assert_eq!(win.complete(t1b,
                            vec![point_ev(1, json!(1)), assertion_ev(9, json!(1))],
                            meta(1, 50, 1, 1, 1)),
               MergeOutcome::Replaced);

    let pairings = win.reconcile();
    assert_eq!(pairings.len(), 1);
    assert_eq!(pairings[0].status, PairingStatus::Match);
    assert_eq!(win.total_assertions(), 1);
}

#[test]
fn subject_switch_discards_in_flight_response() {
    let mut win = EventWindow::new(50);
    let stale = win.begin(1).unwrap();

    // el usuario cambió de flow antes de que el fetch completara
    win.reset();
    assert_eq!(win.complete(stale, vec![point_ev(1, json!(1))], meta(1, 50, 1, 1, 0)),
               MergeOutcome::Stale);
    assert!(win.is_empty());
    assert_eq!(win.total_points(), 0);

    let fresh = win.begin(1).unwrap();
    win.complete(fresh, vec![point_ev(2, json!(2))], meta(1, 50, 1, 1, 0));
    assert_eq!(win.points()[0].data.id, 2);
}

#[test]
fn ordinal_labels_follow_the_page_offset() {
    let mut win = EventWindow::new(50);
    let t = win.begin(1).unwrap();
    win.complete(t, vec![], meta(1, 50, 2, 60, 0));
    // página 2, índice 0 del batch: etiqueta 51
    assert_eq!(win.ordinal(2, 0), 51);
}
