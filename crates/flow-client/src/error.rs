//! Errores del borde de servicio. Ninguno escala a fatal: el caller los
//! registra y presenta una vista vacía o pasada.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport: {0}")] Transport(String),
    #[error("decode: {0}")] Decode(String),
    #[error("flow {0} not found")] FlowNotFound(i64),
    #[error("invalid request: {0}")] InvalidRequest(String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
