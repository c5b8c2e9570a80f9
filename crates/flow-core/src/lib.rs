//! flow-core: Reconciliación de timelines y diff estructural.
//!
//! El core recibe páginas de eventos (POINT / ASSERTION) de un flow
//! potencialmente aún activo, las acumula en una ventana estable frente a
//! re-fetches y respuestas fuera de orden, empareja ambos streams por
//! posición y clasifica cada par usando el diff estructural.
pub mod compare;
pub mod diff;
pub mod errors;
pub mod pairing;
pub mod window;

pub use compare::{CompareReport, CompareResult};
pub use diff::{deep_compare, deep_compare_str, format_diffs, DiffEntry};
pub use errors::CoreError;
pub use pairing::{classify, pair_streams, Pairing, PairingStatus};
pub use window::{EventWindow, FetchTicket, MergeOutcome, PagedWindow, PaginationCursor, StreamSession};
