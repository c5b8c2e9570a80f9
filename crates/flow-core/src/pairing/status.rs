//! Vocabulario de clasificación y su regla de desempate.
//!
//! Única fuente de verdad: tanto el timeline en vivo como el reporte de
//! comparación agregada clasifican a través de `classify`, para que ambos
//! no puedan divergir.
use serde::{Deserialize, Serialize};

use crate::diff::DiffEntry;

/// Estado de un `Pairing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingStatus {
    /// Ambos lados presentes y sin discrepancias.
    Match,
    /// Ambos lados presentes, lista de diffs no vacía (del tipo que sea).
    Mismatch,
    /// Point sin assertion en su posición (todavía, o nunca).
    MissingAssertion,
    /// Assertion sin point en su posición.
    #[serde(rename = "orphan_assertion")]
    Orphan,
}

impl PairingStatus {
    pub fn is_match(&self) -> bool {
        matches!(self, PairingStatus::Match)
    }
}

/// Regla de clasificación: con ambos lados presentes, diffs vacío es
/// incondicionalmente `Match` y cualquier diff no vacío es `Mismatch`;
/// un solo lado presente decide entre `MissingAssertion` y `Orphan`.
pub fn classify(has_point: bool, has_assertion: bool, diffs: &[DiffEntry]) -> PairingStatus {
    match (has_point, has_assertion) {
        (true, true) if diffs.is_empty() => PairingStatus::Match,
        (true, true) => PairingStatus::Mismatch,
        (true, false) => PairingStatus::MissingAssertion,
        (false, true) => PairingStatus::Orphan,
        (false, false) => PairingStatus::Match, // no ocurre: el engine nunca genera pares vacíos
    }
}
