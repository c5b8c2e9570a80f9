//! flow-client: borde con el servicio de persistencia de eventos.
//!
//! Define el contrato asíncrono `FlowService`, una implementación en
//! memoria para tests y demos, y el `DashboardBrowser` que maneja los dos
//! streams de fetch (listado de flows y timeline del flow activo) con sus
//! banderas de ocupado y el descarte de respuestas viejas.
pub mod browser;
pub mod config;
pub mod error;
pub mod memory;
pub mod service;

pub use browser::{DashboardBrowser, FetchOutcome};
pub use config::ClientConfig;
pub use error::ServiceError;
pub use memory::InMemoryFlowService;
pub use service::{FlowBatch, FlowQuery, FlowService, TimelineBatch};
