//! Ventana de eventos de un flow: la sesión de stream especializada en el
//! timeline, más los totales por tipo que reporta el servicio.
use flow_domain::{AssertionEvent, PointEvent, TimelineEvent, TimelineMeta};

use super::paged::MergeOutcome;
use super::session::{FetchTicket, StreamSession};
use crate::errors::CoreError;
use crate::pairing::{pair_streams, Pairing};

/// Acumula páginas del timeline (mixtas POINT/ASSERTION en orden de
/// persistencia) y expone la reconciliación derivada. Superficie de lectura
/// principal del core.
#[derive(Debug, Clone)]
pub struct EventWindow {
    session: StreamSession<TimelineEvent>,
    total_points: u64,
    total_assertions: u64,
}

impl EventWindow {
    pub fn new(limit: u32) -> Self {
        Self { session: StreamSession::new(limit), total_points: 0, total_assertions: 0 }
    }

    pub fn begin(&mut self, page: u32) -> Result<FetchTicket, CoreError> {
        self.session.begin(page)
    }

    pub fn complete(&mut self, ticket: FetchTicket, events: Vec<TimelineEvent>, meta: TimelineMeta) -> MergeOutcome {
        let outcome = self.session.complete(ticket, events, meta.pages, meta.total_points);
        if !matches!(outcome, MergeOutcome::Stale) {
            self.total_points = meta.total_points;
            self.total_assertions = meta.total_assertions;
        }
        outcome
    }

    pub fn fail(&mut self, ticket: FetchTicket) {
        self.session.fail(ticket);
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.total_points = 0;
        self.total_assertions = 0;
    }

    /// Points acumulados en orden de flow completo (orden de página, orden
    /// dentro de la página).
    pub fn points(&self) -> Vec<PointEvent> {
        self.session
            .items()
            .filter_map(TimelineEvent::as_point)
            .cloned()
            .collect()
    }

    pub fn assertions(&self) -> Vec<AssertionEvent> {
        self.session
            .items()
            .filter_map(TimelineEvent::as_assertion)
            .cloned()
            .collect()
    }

    /// Lista ordenada de pairings para la ventana actual. Vista derivada:
    /// se recalcula en cada llamada sobre lo acumulado.
    pub fn reconcile(&self) -> Vec<Pairing> {
        pair_streams(&self.points(), &self.assertions())
    }

    /// Etiqueta ordinal del point `index` del batch de la página `page`.
    pub fn ordinal(&self, page: u32, index: usize) -> u64 {
        self.session.cursor().ordinal(page, index)
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    pub fn total_assertions(&self) -> u64 {
        self.total_assertions
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn has_more(&self) -> bool {
        self.session.has_more()
    }

    pub fn next_page(&self) -> u32 {
        self.session.next_page()
    }

    pub fn len(&self) -> usize {
        self.session.window().len()
    }

    pub fn is_empty(&self) -> bool {
        self.session.window().is_empty()
    }
}
