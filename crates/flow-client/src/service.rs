//! Contrato con el servicio de persistencia de eventos.
//!
//! El core consume exactamente estas formas: listado paginado de flows,
//! timeline paginado de un flow (batch mixto POINT/ASSERTION en orden de
//! persistencia), reporte de comparación agregada y estadísticas. Quién
//! persiste y cómo queda fuera de este crate.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use flow_core::CompareReport;
use flow_domain::{Flow, FlowStats, FlowStatus, PageMeta, TimelineEvent, TimelineMeta};

use crate::error::ServiceError;

/// Parámetros del listado de flows.
#[derive(Debug, Clone, Default)]
pub struct FlowQuery {
    pub page: u32,
    pub limit: u32,
    /// Filtro exacto por estado.
    pub status: Option<FlowStatus>,
    /// Búsqueda de texto (case-insensitive) sobre nombre, identifier y
    /// servicio.
    pub search: Option<String>,
}

/// Respuesta del listado: `{data, meta}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowBatch {
    pub data: Vec<Flow>,
    pub meta: PageMeta,
}

/// Respuesta del timeline: `{flow, data, meta}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineBatch {
    pub flow: Flow,
    pub data: Vec<TimelineEvent>,
    pub meta: TimelineMeta,
}

/// El servicio externo de persistencia/consulta de eventos, visto desde el
/// core. Todas las operaciones son no bloqueantes.
#[async_trait]
pub trait FlowService: Send + Sync {
    async fn list_flows(&self, query: &FlowQuery) -> Result<FlowBatch, ServiceError>;

    async fn flow_timeline(&self, flow_id: i64, page: u32, limit: u32) -> Result<TimelineBatch, ServiceError>;

    /// Equivalente batch (no paginado) del pairing engine; debe clasificar
    /// con las mismas reglas que la vista en vivo.
    async fn compare_flow(&self, flow_id: i64) -> Result<CompareReport, ServiceError>;

    /// Conteos por estado; solo presentación.
    async fn stats(&self) -> Result<FlowStats, ServiceError>;
}

// Permite compartir un mismo servicio entre el browser y quien lo siembra
// (tests, demo) sin duplicar estado.
#[async_trait]
impl<S: FlowService + ?Sized> FlowService for std::sync::Arc<S> {
    async fn list_flows(&self, query: &FlowQuery) -> Result<FlowBatch, ServiceError> {
        (**self).list_flows(query).await
    }

    async fn flow_timeline(&self, flow_id: i64, page: u32, limit: u32) -> Result<TimelineBatch, ServiceError> {
        (**self).flow_timeline(flow_id, page, limit).await
    }

    async fn compare_flow(&self, flow_id: i64) -> Result<CompareReport, ServiceError> {
        (**self).compare_flow(flow_id).await
    }

    async fn stats(&self) -> Result<FlowStats, ServiceError> {
        (**self).stats().await
    }
}
