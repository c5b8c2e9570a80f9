//! Ventana de páginas acumuladas para una colección append-only.
//!
//! Las páginas se asumen snapshots inmutables de datos append-only: no hay
//! deduplicación. Un re-fetch de una página ya vista (flow ACTIVE que sigue
//! creciendo) reemplaza por completo el slice anterior de esa página, nunca
//! se concatena. Las páginas deben aplicarse en orden creciente: una página
//! que completa antes que su predecesora queda en espera hasta que la
//! ventana sea contigua.
use std::collections::BTreeMap;

/// Resultado de ofrecer una página a la ventana.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Página nueva, fusionada en orden.
    Merged,
    /// Página ya vista; su slice fue reemplazado.
    Replaced,
    /// Falta su predecesora; quedó en espera.
    Staged,
    /// Respuesta de una generación anterior; descartada sin efecto.
    Stale,
}

#[derive(Debug, Clone)]
pub struct PagedWindow<T> {
    merged: BTreeMap<u32, Vec<T>>,
    staged: BTreeMap<u32, Vec<T>>,
    next_page: u32,
}

impl<T> PagedWindow<T> {
    pub fn new() -> Self {
        Self { merged: BTreeMap::new(), staged: BTreeMap::new(), next_page: 1 }
    }

    /// Ofrece el batch de la página `page`. Fusiona, reemplaza o deja en
    /// espera según la contigüidad con lo ya fusionado.
    pub fn accept(&mut self, page: u32, items: Vec<T>) -> MergeOutcome {
        if page < self.next_page {
            self.merged.insert(page, items);
            return MergeOutcome::Replaced;
        }
        if page == self.next_page {
            self.merged.insert(page, items);
            self.next_page += 1;
            self.drain_contiguous();
            return MergeOutcome::Merged;
        }
        self.staged.insert(page, items);
        MergeOutcome::Staged
    }

    fn drain_contiguous(&mut self) {
        while let Some(items) = self.staged.remove(&self.next_page) {
            self.merged.insert(self.next_page, items);
            self.next_page += 1;
        }
    }

    /// Items en orden de página (y de posición dentro de cada página).
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.merged.values().flatten()
    }

    /// Lo mismo, junto con el número de página de cada item.
    pub fn items_with_page(&self) -> impl Iterator<Item = (u32, &T)> {
        self.merged
            .iter()
            .flat_map(|(page, items)| items.iter().map(move |it| (*page, it)))
    }

    /// Primera página nunca fusionada (la siguiente a pedir).
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn len(&self) -> usize {
        self.merged.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.merged.clear();
        self.staged.clear();
        self.next_page = 1;
    }
}

impl<T> Default for PagedWindow<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_flatten_in_page_order() {
        let mut w: PagedWindow<i32> = PagedWindow::new();
        assert_eq!(w.accept(1, vec![1, 2]), MergeOutcome::Merged);
        assert_eq!(w.accept(2, vec![3]), MergeOutcome::Merged);
        let all: Vec<i32> = w.items().copied().collect();
        assert_eq!(all, vec![1, 2, 3]);
        assert_eq!(w.next_page(), 3);
    }

    #[test]
    fn out_of_order_page_waits_for_its_predecessor() {
        let mut w: PagedWindow<i32> = PagedWindow::new();
        assert_eq!(w.accept(2, vec![3, 4]), MergeOutcome::Staged);
        assert_eq!(w.len(), 0);

        assert_eq!(w.accept(1, vec![1, 2]), MergeOutcome::Merged);
        let all: Vec<i32> = w.items().copied().collect();
        assert_eq!(all, vec![1, 2, 3, 4]);
        assert_eq!(w.next_page(), 3);
    }

    #[test]
    fn refetch_replaces_instead_of_appending() {
        let mut w: PagedWindow<i32> = PagedWindow::new();
        w.accept(1, vec![1, 2]);
        // la página 1 creció en el servidor (flow activo): el re-read trae
        // el slice completo, no solo lo nuevo
        assert_eq!(w.accept(1, vec![1, 2, 3]), MergeOutcome::Replaced);
        let all: Vec<i32> = w.items().copied().collect();
        assert_eq!(all, vec![1, 2, 3]);
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn clear_resets_the_expected_page() {
        let mut w: PagedWindow<i32> = PagedWindow::new();
        w.accept(1, vec![1]);
        w.accept(3, vec![9]);
        w.clear();
        assert!(w.is_empty());
        assert_eq!(w.next_page(), 1);
        assert_eq!(w.accept(1, vec![5]), MergeOutcome::Merged);
    }
}
