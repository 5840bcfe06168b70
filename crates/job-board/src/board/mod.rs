//! Catalog filtering, bookmark persistence, card rendering and the apply modal.
//!
//! [`JobBoard`] owns every piece of page state and reacts to [`BoardEvent`]s
//! one at a time; [`board_router`] exposes it over HTTP.

pub mod apply;
pub mod bookmarks;
pub mod catalog;
pub mod events;
pub mod filter;
pub mod render;
pub mod router;
pub mod storage;

#[cfg(test)]
mod tests;

pub use apply::{
    ApplicationDraft, ApplicationError, ApplicationFlow, ApplicationForm, ApplicationRecord,
    ApplicationSink, CloseReason, LogSink, MemorySink, RequiredField, SinkError,
};
pub use bookmarks::{BookmarkStore, BOOKMARKS_KEY};
pub use catalog::{CatalogError, Job, JobCatalog, JobCategory, JobId};
pub use events::{BoardEvent, BoardInput, EventOutcome, EventQueue, JobBoard};
pub use filter::{filter, FilterCriteria};
pub use render::{render, CardBuffer, JobCard, RenderSurface};
pub use router::{board_router, ModalView, SharedBoard};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
