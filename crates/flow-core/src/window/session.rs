//! Contexto por-stream de fetch: cursor, ventana acumulada, bandera de
//! ocupado y contador de generación de requests.
//!
//! Cada stream lógico (listado de flows, timeline del flow activo) posee su
//! sesión en exclusiva; nada se comparte para mutación entre streams. No
//! existe cancelación real de un fetch en vuelo: cambiar de sujeto solo
//! incrementa la generación, y la respuesta vieja se descarta al llegar.
use super::cursor::PaginationCursor;
use super::paged::{MergeOutcome, PagedWindow};
use crate::errors::CoreError;

/// Emitido por `begin` al despachar un fetch; se presenta en `complete` /
/// `fail`. Si la generación ya no coincide, la respuesta es de un sujeto
/// anterior y se ignora.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub page: u32,
}

#[derive(Debug, Clone)]
pub struct StreamSession<T> {
    cursor: PaginationCursor,
    window: PagedWindow<T>,
    generation: u64,
    in_flight: bool,
}

impl<T> StreamSession<T> {
    pub fn new(limit: u32) -> Self {
        Self { cursor: PaginationCursor::new(limit),
               window: PagedWindow::new(),
               generation: 0,
               in_flight: false }
    }

    /// Inicia un fetch para `page`. Rechaza si ya hay uno en vuelo para
    /// este stream o si la página excede el total conocido; ambos casos son
    /// no-ops para el caller, no fallas.
    pub fn begin(&mut self, page: u32) -> Result<FetchTicket, CoreError> {
        if self.in_flight {
            return Err(CoreError::FetchInFlight);
        }
        self.cursor.validate_request(page)?;
        self.in_flight = true;
        Ok(FetchTicket { generation: self.generation, page })
    }

    /// Completa un fetch con el batch y los metadatos devueltos. Una
    /// respuesta de generación vieja se descarta en silencio y no toca la
    /// bandera de ocupado de la generación vigente.
    pub fn complete(&mut self, ticket: FetchTicket, items: Vec<T>, pages: u32, total: u64) -> MergeOutcome {
        if ticket.generation != self.generation {
            return MergeOutcome::Stale;
        }
        self.in_flight = false;
        let outcome = self.window.accept(ticket.page, items);
        // El cursor registra el progreso contiguo, no la última respuesta:
        // una página en espera de su predecesora no declara completo el
        // stream.
        if !matches!(outcome, MergeOutcome::Staged) {
            self.cursor.record(self.window.next_page() - 1, pages, total);
        }
        outcome
    }

    /// Fetch fallido (transporte/decodificación): libera el stream sin
    /// fusionar nada. Nunca se reintenta automáticamente.
    pub fn fail(&mut self, ticket: FetchTicket) {
        if ticket.generation == self.generation {
            self.in_flight = false;
        }
    }

    /// Cambio de sujeto o de filtro: descarta todo lo acumulado y sube la
    /// generación para que cualquier respuesta en vuelo quede huérfana.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = false;
        self.cursor.reset();
        self.window.clear();
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn window(&self) -> &PagedWindow<T> {
        &self.window
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Siguiente página no fusionada; con todo al día es la página después
    /// de la última.
    pub fn next_page(&self) -> u32 {
        self.window.next_page()
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.window.items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_suppresses_reentrant_fetches() {
        let mut s: StreamSession<i32> = StreamSession::new(20);
        let ticket = s.begin(1).unwrap();
        assert!(matches!(s.begin(1), Err(CoreError::FetchInFlight)));
        s.complete(ticket, vec![1], 1, 1);
        assert!(s.begin(1).is_ok());
    }

    #[test]
    fn stale_ticket_is_discarded_without_side_effects() {
        let mut s: StreamSession<i32> = StreamSession::new(20);
        let old = s.begin(1).unwrap();
        s.reset(); // el usuario cambió de sujeto con el fetch en vuelo

        let fresh = s.begin(1).unwrap();
        assert_eq!(s.complete(old, vec![7, 8, 9], 5, 99), MergeOutcome::Stale);
        assert_eq!(s.window().len(), 0);
        assert!(s.is_busy(), "stale completion must not release the fresh fetch");

        assert_eq!(s.complete(fresh, vec![1], 1, 1), MergeOutcome::Merged);
        assert_eq!(s.items().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn failed_fetch_releases_the_stream() {
        let mut s: StreamSession<i32> = StreamSession::new(20);
        let ticket = s.begin(1).unwrap();
        s.fail(ticket);
        assert!(!s.is_busy());
        assert_eq!(s.window().len(), 0);
    }

    #[test]
    fn staged_page_does_not_advance_the_cursor() {
        let mut s: StreamSession<i32> = StreamSession::new(1);
        let t1 = s.begin(1).unwrap();
        s.complete(t1, vec![1], 3, 3);

        // la página 3 resuelve antes que la 2: queda en espera y el stream
        // sigue reportando páginas pendientes
        let t3 = s.begin(3).unwrap();
        assert_eq!(s.complete(t3, vec![3], 3, 3), MergeOutcome::Staged);
        assert!(s.has_more(), "an unmerged predecessor leaves pages to fetch");
        assert_eq!(s.next_page(), 2);

        let t2 = s.begin(2).unwrap();
        assert_eq!(s.complete(t2, vec![2], 3, 3), MergeOutcome::Merged);
        assert_eq!(s.cursor().page, 3);
        assert!(!s.has_more());
    }

    #[test]
    fn page_beyond_known_total_is_rejected_before_fetching() {
        let mut s: StreamSession<i32> = StreamSession::new(20);
        let t = s.begin(1).unwrap();
        s.complete(t, vec![1], 2, 25);
        assert!(s.begin(2).is_ok());
        let t2 = FetchTicket { generation: s.generation(), page: 2 };
        s.complete(t2, vec![2], 2, 25);
        assert!(matches!(s.begin(3), Err(CoreError::PageOutOfRange { requested: 3, known: 2 })));
    }
}
