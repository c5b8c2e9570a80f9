//! Acumulación estable de páginas para un stream paginado.

mod cursor;
mod event_window;
mod paged;
mod session;

pub use cursor::PaginationCursor;
pub use event_window::EventWindow;
pub use paged::{MergeOutcome, PagedWindow};
pub use session::{FetchTicket, StreamSession};
