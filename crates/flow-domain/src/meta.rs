//! Metadatos de paginación devueltos por el servicio junto a cada batch.
use serde::{Deserialize, Serialize};

/// Meta del listado de flows: `{page, limit, pages, total}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
    pub total: u64,
}

/// Meta del timeline de un flow. `pages` se calcula sobre `total_points`
/// (cada página trae hasta `limit` points y hasta `limit` assertions con el
/// mismo offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineMeta {
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
    pub total_points: u64,
    pub total_assertions: u64,
}

/// Páginas necesarias para `total` items con tamaño `limit` (ceiling).
pub fn page_count(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    ((total + limit as u64 - 1) / limit as u64) as u32
}
