//! Una discrepancia direccionada por path dentro del árbol de valores.
//! Producida únicamente por el differ; nunca se persiste.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discrepancia en una ubicación concreta. `path` usa direccionamiento
/// punto/corchete con raíz `$` (ej. `$.user.roles[2]`). El lado ausente
/// queda en `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub path: String,
    pub expected: Option<Value>,
    pub actual: Option<Value>,
    pub message: String,
}

/// Resumen legible: mensajes unidos por `"; "`. Cadena vacía si no hay
/// discrepancias.
pub fn format_diffs(diffs: &[DiffEntry]) -> String {
    diffs.iter()
         .map(|d| d.message.as_str())
         .collect::<Vec<_>>()
         .join("; ")
}
