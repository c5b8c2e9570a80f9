//! Orquestación de los dos streams del dashboard.
//!
//! El browser posee en exclusiva la sesión del listado de flows y la del
//! timeline del flow activo. Cada stream tiene su propia bandera de
//! ocupado: un fetch en vuelo suprime un segundo fetch del mismo stream
//! pero nunca bloquea al otro. Cambiar de flow o de filtro sube la
//! generación de la sesión afectada, de modo que la respuesta en vuelo del
//! sujeto anterior se descarta al completar en lugar de fusionarse.
use log::{debug, warn};
use uuid::Uuid;

use flow_core::{CompareReport, CoreError, EventWindow, MergeOutcome, Pairing, StreamSession};
use flow_domain::{Flow, FlowStats, FlowStatus};

use crate::config::ClientConfig;
use crate::error::ServiceError;
use crate::service::{FlowQuery, FlowService};

/// Desenlace observable de un intento de fetch. Ninguna variante es un
/// error del proceso; `Failed` deja la vista como estaba y queda en el log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Página nueva fusionada.
    Merged,
    /// Página ya vista, slice reemplazado (flow activo que creció).
    Replaced,
    /// Página en espera de su predecesora.
    Staged,
    /// Respuesta de una generación anterior, descartada en silencio.
    Stale,
    /// Ya había un fetch en vuelo para este stream.
    Suppressed,
    /// Página fuera del rango conocido; no se emitió el fetch.
    Rejected,
    /// Falla de transporte/decodificación; registrada, nunca reintentada.
    Failed,
}

pub struct DashboardBrowser<S: FlowService> {
    service: S,
    config: ClientConfig,
    flows: StreamSession<Flow>,
    filter_status: Option<FlowStatus>,
    filter_search: Option<String>,
    timeline: EventWindow,
    current_flow_id: Option<i64>,
    current_flow: Option<Flow>,
    last_error: Option<String>,
}

impl<S: FlowService> DashboardBrowser<S> {
    pub fn new(service: S, config: ClientConfig) -> Self {
        let flow_limit = config.flow_limit;
        let timeline_limit = config.timeline_limit;
        Self { service,
               config,
               flows: StreamSession::new(flow_limit),
               filter_status: None,
               filter_search: None,
               timeline: EventWindow::new(timeline_limit),
               current_flow_id: None,
               current_flow: None,
               last_error: None }
    }

    // ---- stream: listado de flows ----

    /// Recarga el listado desde la página 1 descartando lo acumulado.
    pub async fn refresh_flows(&mut self) -> FetchOutcome {
        self.flows.reset();
        self.fetch_flows_page(1).await
    }

    /// Pide la siguiente página del listado, si el total conocido lo
    /// permite.
    pub async fn fetch_more_flows(&mut self) -> FetchOutcome {
        if !self.flows.has_more() {
            return FetchOutcome::Rejected;
        }
        let page = self.flows.next_page();
        self.fetch_flows_page(page).await
    }

    /// Cambia el filtro del listado. Sujeto nuevo: la sesión se resetea y
    /// cualquier respuesta en vuelo del filtro anterior queda huérfana.
    pub fn set_filter(&mut self, status: Option<FlowStatus>, search: Option<String>) {
        self.filter_status = status;
        self.filter_search = search;
        self.flows.reset();
    }

    async fn fetch_flows_page(&mut self, page: u32) -> FetchOutcome {
        let ticket = match self.flows.begin(page) {
            Ok(t) => t,
            Err(e) => return self.begin_rejection(e),
        };

        let req = Uuid::new_v4();
        debug!("[{req}] fetching flows page {page}");
        let query = FlowQuery { page,
                                limit: self.config.flow_limit,
                                status: self.filter_status,
                                search: self.filter_search.clone() };

        match self.service.list_flows(&query).await {
            Ok(batch) => {
                let outcome = self.flows
                                  .complete(ticket, batch.data, batch.meta.pages, batch.meta.total);
                merge_to_fetch(req, outcome)
            }
            Err(e) => {
                warn!("[{req}] flows page {page} failed: {e}");
                self.flows.fail(ticket);
                self.last_error = Some(e.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Flows acumulados, en orden de página.
    pub fn flows(&self) -> Vec<&Flow> {
        self.flows.items().collect()
    }

    pub fn flow_pages_known(&self) -> u32 {
        self.flows.cursor().pages
    }

    // ---- stream: timeline del flow activo ----

    /// Selecciona el flow activo y carga su primera página. Si el sujeto
    /// cambió, el timeline anterior se descarta por completo.
    pub async fn select_flow(&mut self, flow_id: i64) -> FetchOutcome {
        if self.current_flow_id != Some(flow_id) {
            self.timeline.reset();
            self.current_flow = None;
            self.current_flow_id = Some(flow_id);
        }
        self.fetch_timeline_page(1).await
    }

    pub async fn fetch_more_timeline(&mut self) -> FetchOutcome {
        if !self.timeline.has_more() {
            return FetchOutcome::Rejected;
        }
        let page = self.timeline.next_page();
        self.fetch_timeline_page(page).await
    }

    /// Re-lee una página ya vista; para un flow ACTIVE el slice nuevo puede
    /// traer eventos agregados desde la lectura anterior.
    pub async fn refetch_timeline_page(&mut self, page: u32) -> FetchOutcome {
        self.fetch_timeline_page(page).await
    }

    async fn fetch_timeline_page(&mut self, page: u32) -> FetchOutcome {
        let Some(flow_id) = self.current_flow_id else {
            return FetchOutcome::Rejected;
        };
        let ticket = match self.timeline.begin(page) {
            Ok(t) => t,
            Err(e) => return self.begin_rejection(e),
        };

        let req = Uuid::new_v4();
        debug!("[{req}] fetching timeline page {page} of flow {flow_id}");

        match self.service
                  .flow_timeline(flow_id, page, self.config.timeline_limit)
                  .await
        {
            Ok(batch) => {
                let outcome = self.timeline.complete(ticket, batch.data, batch.meta);
                if !matches!(outcome, MergeOutcome::Stale) {
                    self.current_flow = Some(batch.flow);
                }
                merge_to_fetch(req, outcome)
            }
            Err(e) => {
                warn!("[{req}] timeline page {page} of flow {flow_id} failed: {e}");
                self.timeline.fail(ticket);
                self.last_error = Some(e.to_string());
                FetchOutcome::Failed
            }
        }
    }

    fn begin_rejection(&mut self, err: CoreError) -> FetchOutcome {
        match err {
            CoreError::FetchInFlight => {
                debug!("fetch suppressed: {err}");
                FetchOutcome::Suppressed
            }
            _ => {
                debug!("fetch rejected: {err}");
                FetchOutcome::Rejected
            }
        }
    }

    // ---- superficie de lectura ----

    /// Lista ordenada de pairings para la ventana actual del flow activo.
    pub fn pairings(&self) -> Vec<Pairing> {
        self.timeline.reconcile()
    }

    pub fn timeline(&self) -> &EventWindow {
        &self.timeline
    }

    pub fn current_flow(&self) -> Option<&Flow> {
        self.current_flow.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Reporte batch del servicio; clasifica con las mismas reglas que
    /// `pairings()`.
    pub async fn compare(&self, flow_id: i64) -> Result<CompareReport, ServiceError> {
        self.service.compare_flow(flow_id).await
    }

    pub async fn stats(&self) -> Result<FlowStats, ServiceError> {
        self.service.stats().await
    }
}

fn merge_to_fetch(req: Uuid, outcome: MergeOutcome) -> FetchOutcome {
    match outcome {
        MergeOutcome::Merged => FetchOutcome::Merged,
        MergeOutcome::Replaced => FetchOutcome::Replaced,
        MergeOutcome::Staged => FetchOutcome::Staged,
        MergeOutcome::Stale => {
            debug!("[{req}] stale response discarded");
            FetchOutcome::Stale
        }
    }
}
