//! Cursor de paginación de un sujeto (el listado de flows, o el timeline de
//! un flow concreto).
use crate::errors::CoreError;

/// Estado `(page, limit, pages, total)` conocido para una colección
/// paginada. `limit` debe permanecer constante durante la vida de la sesión
/// de reconciliación: la numeración ordinal depende de él.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
    pub total: u64,
}

impl PaginationCursor {
    /// Cursor nuevo. `pages` arranca en 1: antes del primer fetch solo la
    /// página 1 es solicitable.
    pub fn new(limit: u32) -> Self {
        Self { page: 1, limit, pages: 1, total: 0 }
    }

    /// Valida una página contra el último total conocido, antes de emitir
    /// el fetch. Pedir más allá del total es un no-op para el caller.
    pub fn validate_request(&self, page: u32) -> Result<(), CoreError> {
        if page == 0 {
            return Err(CoreError::PageZero);
        }
        if page > 1 && page > self.pages {
            return Err(CoreError::PageOutOfRange { requested: page, known: self.pages });
        }
        Ok(())
    }

    /// Registra los metadatos devueltos por un fetch exitoso.
    pub fn record(&mut self, page: u32, pages: u32, total: u64) {
        self.page = page;
        self.pages = pages;
        self.total = total;
    }

    /// Quedan páginas por pedir después de la actual.
    pub fn has_more(&self) -> bool {
        self.page < self.pages
    }

    /// Etiqueta ordinal (1-based, sobre el flow completo) del item `index`
    /// dentro de la página `page`. Correcta solo mientras `limit` no cambie.
    pub fn ordinal(&self, page: u32, index: usize) -> u64 {
        (page as u64 - 1) * self.limit as u64 + index as u64 + 1
    }

    pub fn reset(&mut self) {
        self.page = 1;
        self.pages = 1;
        self.total = 0;
    }
}
