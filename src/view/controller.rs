//! Paginated view controller.
//!
//! A `ViewController` owns one [`PageState`] and turns [`ViewEvent`]s into
//! store fetches. Events may overlap: every fetch is numbered, starting a
//! fetch aborts the one before it, and only the most recently issued fetch
//! is allowed to commit its result.

use super::state::{LoadStatus, PageItems, PageState, SearchQuery, StatusFilter, ViewMode};
use crate::domain::{ContactId, Field};
use crate::error::{StoreResult, ViewError, ViewResult};
use crate::models::{Contact, ContactPage, ValidationPage};
use crate::repositories::ContactStore;
use crate::validation;
use futures::future::{AbortHandle, Abortable};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Something the user did to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Fetch page `n`; with an active search, re-run the search.
    Load(usize),
    SetFilter(StatusFilter),
    /// Search by field; a blank value clears the search.
    SetQuery { field: Field, value: String },
    ClearQuery,
    NextPage,
    PrevPage,
    Jump(usize),
}

/// What an event did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// A fetch completed and its result was committed.
    Loaded,
    /// Only the local filter changed; nothing was fetched.
    Filtered,
    /// The event was out of range and changed nothing.
    Ignored,
    /// A newer fetch started before this one finished; its result was dropped.
    Superseded,
}

/// Where the next fetch should land once it commits.
#[derive(Debug, Clone)]
struct Target {
    page: usize,
    query: Option<SearchQuery>,
    /// Set only by a filter change that needs the store; other fetches keep
    /// whatever filter is current when they commit.
    filter: Option<StatusFilter>,
}

enum Fetched {
    Contacts(ContactPage),
    Validations(ValidationPage),
    Search(Vec<Contact>),
}

enum Step {
    Fetch(Target),
    Local,
    Ignore,
}

struct Inner {
    state: PageState,
    /// Number of the most recently issued fetch
    seq: u64,
    in_flight: Option<AbortHandle>,
    /// Edits confirmed while a fetch was in flight, tagged with `seq` at edit time
    patches: Vec<(u64, Contact)>,
    closed: bool,
}

/// Page/filter/search state machine over a [`ContactStore`].
pub struct ViewController {
    store: Arc<dyn ContactStore>,
    mode: ViewMode,
    page_size: usize,
    inner: Mutex<Inner>,
}

impl ViewController {
    pub fn new(store: Arc<dyn ContactStore>, mode: ViewMode, page_size: usize) -> Self {
        Self {
            store,
            mode,
            page_size,
            inner: Mutex::new(Inner {
                state: PageState::new(mode, page_size),
                seq: 0,
                in_flight: None,
                patches: Vec::new(),
                closed: false,
            }),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> PageState {
        self.lock().state.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Whether `id` is one of the rows currently held.
    pub fn contains(&self, id: &ContactId) -> bool {
        self.lock().state.items.contact(id).is_some()
    }

    /// Apply an event, fetching from the store when the event needs it.
    ///
    /// On a failed fetch the previous rows and pagination are kept, the
    /// status becomes `Error`, and the store error is returned.
    pub async fn dispatch(&self, event: ViewEvent) -> ViewResult<Transition> {
        let (seq, target, registration) = {
            let mut inner = self.lock();
            if inner.closed {
                return Err(ViewError::Closed);
            }

            let target = match plan(&mut inner.state, self.mode, &event) {
                Step::Ignore => {
                    tracing::debug!("{} view ignored {:?}", self.mode, event);
                    return Ok(Transition::Ignored);
                }
                Step::Local => return Ok(Transition::Filtered),
                Step::Fetch(target) => target,
            };

            if let Some(previous) = inner.in_flight.take() {
                previous.abort();
            }
            let (handle, registration) = AbortHandle::new_pair();
            inner.seq += 1;
            inner.in_flight = Some(handle);
            inner.state.status = LoadStatus::Loading;
            (inner.seq, target, registration)
        };

        tracing::debug!("{} view fetch #{} for {:?}", self.mode, seq, event);

        let fetched = match Abortable::new(self.fetch(&target), registration).await {
            Ok(fetched) => fetched,
            Err(_aborted) => {
                tracing::debug!("{} view fetch #{} superseded", self.mode, seq);
                return Ok(Transition::Superseded);
            }
        };

        let mut inner = self.lock();
        if inner.seq != seq || inner.closed {
            tracing::debug!("{} view dropped stale fetch #{}", self.mode, seq);
            return Ok(Transition::Superseded);
        }
        inner.in_flight = None;

        match fetched {
            Ok(fetched) => {
                self.commit(&mut inner, seq, target, fetched);
                Ok(Transition::Loaded)
            }
            Err(e) => {
                tracing::warn!("{} view fetch failed: {}", self.mode, e);
                inner.state.status = LoadStatus::Error(e.to_string());
                Err(ViewError::Store(e))
            }
        }
    }

    /// Fold a store-confirmed edit into the held rows.
    ///
    /// Only the matching row is replaced and revalidated; collection counts
    /// move by at most one. Returns `false` when the contact is not on the
    /// current page. An edit made while a fetch is in flight is also applied
    /// to that fetch's result when it lands.
    pub fn patch(&self, updated: &Contact) -> bool {
        let mut inner = self.lock();
        if inner.in_flight.is_some() {
            let seq = inner.seq;
            inner.patches.push((seq, updated.clone()));
        }

        let state = &mut inner.state;
        match state.items.replace(updated) {
            Some((was_valid, is_valid)) => {
                if let Some(stats) = state.collection_stats.as_mut() {
                    stats.shift(was_valid, is_valid);
                }
                tracing::debug!("{} view patched contact {}", self.mode, updated.id);
                true
            }
            None => false,
        }
    }

    /// Abort any in-flight fetch and refuse further events.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        if let Some(handle) = inner.in_flight.take() {
            handle.abort();
        }
    }

    async fn fetch(&self, target: &Target) -> StoreResult<Fetched> {
        if let Some(query) = &target.query {
            return self
                .store
                .search_contacts(query.field, &query.value)
                .await
                .map(Fetched::Search);
        }

        match self.mode {
            ViewMode::Contacts => self
                .store
                .list_contacts(target.page, self.page_size)
                .await
                .map(Fetched::Contacts),
            ViewMode::Validation => self
                .store
                .validate_contacts(target.page, self.page_size)
                .await
                .map(Fetched::Validations),
        }
    }

    fn commit(&self, inner: &mut Inner, seq: u64, target: Target, fetched: Fetched) {
        let state = &mut inner.state;

        match fetched {
            Fetched::Contacts(mut page) => {
                page.data.truncate(self.page_size);
                state.items = PageItems::Contacts(page.data);
                state.total_count = page.total;
                state.total_pages = page.total_pages;
            }
            Fetched::Validations(mut page) => {
                page.data.truncate(self.page_size);
                // Without store stats the collection size is unknown; a page
                // count is never reported as the total.
                state.total_count = page.stats.map_or(0, |s| s.total);
                state.total_pages = page.total_pages;
                state.collection_stats = page.stats;
                state.items = PageItems::Validations(page.data);
            }
            Fetched::Search(contacts) => {
                state.total_count = contacts.len();
                state.total_pages = usize::from(!contacts.is_empty());
                state.items = match self.mode {
                    ViewMode::Contacts => PageItems::Contacts(contacts),
                    ViewMode::Validation => {
                        PageItems::Validations(validation::validate_all(&contacts))
                    }
                };
            }
        }

        state.current_page = target.page;
        if state.total_pages > 0 && state.current_page > state.total_pages {
            tracing::warn!(
                "{} view page {} is past the last page {}",
                self.mode,
                state.current_page,
                state.total_pages
            );
            state.current_page = state.total_pages;
        }
        state.query = target.query;
        if let Some(filter) = target.filter {
            state.filter = filter;
        }
        state.status = LoadStatus::Loaded;

        // Edits confirmed after this fetch was issued win over its rows.
        for (_, contact) in inner.patches.iter().filter(|(at, _)| *at >= seq) {
            state.items.replace(contact);
        }
        inner.patches.clear();

        tracing::info!(
            "{} view loaded page {}/{} ({} rows)",
            self.mode,
            state.current_page,
            state.total_pages,
            state.items.len()
        );
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ViewController {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = inner.in_flight.take() {
            handle.abort();
        }
    }
}

/// Decide what an event needs, applying purely local changes directly.
fn plan(state: &mut PageState, mode: ViewMode, event: &ViewEvent) -> Step {
    let reload = |page: usize, query: Option<SearchQuery>| {
        Step::Fetch(Target {
            page,
            query,
            filter: None,
        })
    };

    match event {
        ViewEvent::Load(page) => {
            if *page != 1 && !state.contains_page(*page) {
                return Step::Ignore;
            }
            match &state.query {
                Some(query) => reload(1, Some(query.clone())),
                None => reload(*page, None),
            }
        }
        ViewEvent::NextPage => match state.current_page.checked_add(1) {
            Some(page) if state.contains_page(page) => reload(page, state.query.clone()),
            _ => Step::Ignore,
        },
        ViewEvent::PrevPage => match state.current_page.checked_sub(1) {
            Some(page) if state.contains_page(page) => reload(page, state.query.clone()),
            _ => Step::Ignore,
        },
        ViewEvent::Jump(page) => {
            if state.contains_page(*page) {
                reload(*page, state.query.clone())
            } else {
                Step::Ignore
            }
        }
        ViewEvent::SetQuery { field, value } => {
            let value = value.trim();
            if value.is_empty() {
                let page = if state.query.is_some() {
                    1
                } else {
                    state.current_page
                };
                return reload(page, None);
            }
            reload(
                1,
                Some(SearchQuery {
                    field: *field,
                    value: value.to_string(),
                }),
            )
        }
        ViewEvent::ClearQuery => reload(1, None),
        ViewEvent::SetFilter(filter) => {
            if mode == ViewMode::Validation && state.query.is_none() {
                Step::Fetch(Target {
                    page: 1,
                    query: None,
                    filter: Some(*filter),
                })
            } else {
                state.filter = *filter;
                Step::Local
            }
        }
    }
}
