use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, info};

use super::apply::{
    ApplicationError, ApplicationFlow, ApplicationForm, ApplicationRecord, ApplicationSink,
    CloseReason,
};
use super::bookmarks::BookmarkStore;
use super::catalog::{Job, JobCatalog, JobId};
use super::filter::{filter, FilterCriteria};
use super::render::{bookmarked, render, CardBuffer};
use super::storage::KeyValueStore;

/// User-triggered input the board reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    SearchInput(String),
    CategoryChanged(Option<String>),
    LocationChanged(Option<String>),
    /// Replace all three criteria at once.
    CriteriaChanged(FilterCriteria),
    BookmarkClicked(JobId),
    ApplyClicked(JobId),
    CloseModal,
    OutsideClick,
}

/// Anything the board accepts: a UI event or an application submission.
///
/// Only submissions can fail, so UI events go through [`JobBoard::handle`]
/// and submissions through [`JobBoard::submit`] when the caller knows which
/// one it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardInput {
    Event(BoardEvent),
    Submit(ApplicationForm),
}

impl From<BoardEvent> for BoardInput {
    fn from(event: BoardEvent) -> Self {
        BoardInput::Event(event)
    }
}

/// Observable result of handling one event.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    ListingRendered { shown: usize },
    BookmarkToggled { job_id: JobId, bookmarked: bool },
    ModalOpened { job_id: JobId, job_title: String },
    ModalClosed,
    ApplicationSubmitted(ApplicationRecord),
    /// The event referenced something that does not exist or was already in place.
    Ignored,
}

/// Single owner of all page state.
///
/// Every event is handled to completion, including re-rendering, before the
/// next one is looked at.
pub struct JobBoard<S, K> {
    catalog: JobCatalog,
    bookmarks: BookmarkStore<S>,
    criteria: FilterCriteria,
    flow: ApplicationFlow,
    sink: K,
    listing: CardBuffer,
    saved: CardBuffer,
}

impl<S, K> JobBoard<S, K>
where
    S: KeyValueStore,
    K: ApplicationSink,
{
    /// Load bookmarks from `store` and draw both views.
    ///
    /// Persisted ids with no matching catalog entry are dropped and the
    /// pruned set is written back.
    pub fn new(catalog: JobCatalog, store: S, sink: K) -> Self {
        let mut bookmarks = BookmarkStore::load(store);
        let dropped = bookmarks.retain(|job_id| catalog.get(job_id).is_some());
        if dropped > 0 {
            info!(dropped, "pruned bookmarks for jobs missing from the catalog");
        }

        let mut board = Self {
            catalog,
            bookmarks,
            criteria: FilterCriteria::default(),
            flow: ApplicationFlow::Closed,
            sink,
            listing: CardBuffer::default(),
            saved: CardBuffer::default(),
        };
        board.render_listing();
        board.render_bookmarks();
        board
    }

    /// Route one input to [`handle`](Self::handle) or [`submit`](Self::submit).
    pub fn dispatch(
        &mut self,
        input: impl Into<BoardInput>,
    ) -> Result<EventOutcome, ApplicationError> {
        match input.into() {
            BoardInput::Event(event) => Ok(self.handle(event)),
            BoardInput::Submit(form) => {
                let record = self.submit(form)?;
                Ok(EventOutcome::ApplicationSubmitted(record))
            }
        }
    }

    pub fn handle(&mut self, event: BoardEvent) -> EventOutcome {
        debug!(?event, "handling board event");
        match event {
            BoardEvent::SearchInput(term) => {
                self.criteria.search_term = term;
                self.render_listing()
            }
            BoardEvent::CategoryChanged(category) => {
                self.criteria.category = category;
                self.render_listing()
            }
            BoardEvent::LocationChanged(location) => {
                self.criteria.location = location;
                self.render_listing()
            }
            BoardEvent::CriteriaChanged(criteria) => {
                self.criteria = criteria;
                self.render_listing()
            }
            BoardEvent::BookmarkClicked(job_id) => self.toggle_bookmark(job_id),
            BoardEvent::ApplyClicked(job_id) => {
                if self.flow.open(&self.catalog, job_id) {
                    let job_title = self
                        .flow
                        .draft()
                        .map(|draft| draft.job_title.clone())
                        .unwrap_or_default();
                    EventOutcome::ModalOpened { job_id, job_title }
                } else {
                    EventOutcome::Ignored
                }
            }
            BoardEvent::CloseModal => self.close_modal(CloseReason::Dismissed),
            BoardEvent::OutsideClick => self.close_modal(CloseReason::OutsideClick),
        }
    }

    /// Submit the open application to the sink.
    pub fn submit(
        &mut self,
        form: ApplicationForm,
    ) -> Result<ApplicationRecord, ApplicationError> {
        debug!("submitting application");
        self.flow.submit(form, &self.sink)
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn bookmarks(&self) -> &BookmarkStore<S> {
        &self.bookmarks
    }

    pub fn flow(&self) -> &ApplicationFlow {
        &self.flow
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Cards currently shown in the filtered listing.
    pub fn listing(&self) -> &CardBuffer {
        &self.listing
    }

    /// Cards currently shown in the bookmarks panel.
    pub fn saved(&self) -> &CardBuffer {
        &self.saved
    }

    /// Filtered view for the current criteria.
    pub fn visible_jobs(&self) -> Vec<&Job> {
        filter(self.catalog.jobs(), &self.criteria)
    }

    fn toggle_bookmark(&mut self, job_id: JobId) -> EventOutcome {
        if self.catalog.get(job_id).is_none() {
            debug!(%job_id, "bookmark ignored for unknown job");
            return EventOutcome::Ignored;
        }
        let bookmarked = self.bookmarks.toggle(job_id);
        self.render_listing();
        self.render_bookmarks();
        EventOutcome::BookmarkToggled { job_id, bookmarked }
    }

    fn close_modal(&mut self, reason: CloseReason) -> EventOutcome {
        if !self.flow.is_open() {
            return EventOutcome::Ignored;
        }
        self.flow.close(reason);
        EventOutcome::ModalClosed
    }

    fn render_listing(&mut self) -> EventOutcome {
        let jobs = filter(self.catalog.jobs(), &self.criteria);
        let shown = jobs.len();
        render(&mut self.listing, jobs, &self.bookmarks);
        EventOutcome::ListingRendered { shown }
    }

    fn render_bookmarks(&mut self) {
        let jobs = bookmarked(self.catalog.jobs(), &self.bookmarks);
        render(&mut self.saved, jobs, &self.bookmarks);
    }
}

/// Events waiting to be handled, processed strictly in arrival order.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<BoardInput>,
}

impl EventQueue {
    pub fn push(&mut self, input: impl Into<BoardInput>) {
        self.pending.push_back(input.into());
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Handle every queued event against `board`, one at a time.
    ///
    /// A failed event is reported in place and does not stop the rest.
    pub fn drain<S, K>(
        &mut self,
        board: &mut JobBoard<S, K>,
    ) -> Vec<Result<EventOutcome, ApplicationError>>
    where
        S: KeyValueStore,
        K: ApplicationSink,
    {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some(input) = self.pending.pop_front() {
            outcomes.push(board.dispatch(input));
        }
        outcomes
    }
}
