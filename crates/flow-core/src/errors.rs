//! Errores del core (ninguno es fatal: el peor caso es una vista vacía).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    #[error("fetch already in flight for this stream")] FetchInFlight,
    #[error("page {requested} beyond known total of {known}")] PageOutOfRange { requested: u32, known: u32 },
    #[error("page numbers start at 1")] PageZero,
    #[error("internal: {0}")] Internal(String),
}
