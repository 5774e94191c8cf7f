//! View state for a paginated, locally searchable list.
//!
//! [`ViewState`] is a synchronous state machine: commands go in through
//! [`ViewState::dispatch`], events come out, and a
//! [`ViewEvent::FetchRequested`] tells whoever drives it to run a fetch via
//! [`ViewState::begin_fetch`] / [`ViewState::complete`]. [`PaginatedView`]
//! is that driver for any [`PageSource`].

use std::str::FromStr;

use serde::Deserialize;

use crate::error::DashboardError;
use crate::fetcher::{Page, PageSource};
use crate::filter::{filter_records, Searchable};
use crate::validation;

/// What to do with a response whose request is no longer the latest one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Drop it; only the most recently issued fetch may update the view.
    #[default]
    Discard,
    /// Apply every response in completion order, even out-of-date ones.
    LastWriteWins,
}

impl FromStr for StalePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discard" => Ok(StalePolicy::Discard),
            "last-write-wins" => Ok(StalePolicy::LastWriteWins),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// A dismissible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub page_no: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    NextPage,
    PrevPage,
    SetPageSize(i64),
    SetSearch(String),
    /// Re-fetch the current page, e.g. after a row was changed elsewhere.
    Refresh,
    DismissNotification,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    FetchRequested,
    PageChanged(i64),
    PageSizeChanged(i64),
    SearchChanged(String),
    RefreshTriggered(bool),
    Loaded { page_no: i64, records: usize },
    PageClamped(i64),
    StaleResponseDropped(u64),
    NotificationOpened(String),
    NotificationDismissed,
}

/// State owned by one list view instance.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    page_no: i64,
    page_size: i64,
    total_pages: Option<i64>,
    loading: bool,
    phase: Phase,
    notification: Option<Notification>,
    search: String,
    refresh: bool,
    records: Vec<T>,
    issued: u64,
    stale_policy: StalePolicy,
}

impl<T> ViewState<T> {
    /// `page_size` is expected to be one of
    /// [`PAGE_SIZE_OPTIONS`](validation::PAGE_SIZE_OPTIONS); anything else
    /// only surfaces as a failed first fetch. Use [`ViewState::try_new`] for
    /// sizes that come from user input.
    pub fn new(page_size: i64) -> Self {
        Self {
            page_no: 1,
            page_size,
            total_pages: None,
            loading: false,
            phase: Phase::Idle,
            notification: None,
            search: String::new(),
            refresh: false,
            records: Vec::new(),
            issued: 0,
            stale_policy: StalePolicy::default(),
        }
    }

    pub fn try_new(page_size: i64) -> Result<Self, DashboardError> {
        validation::validate_page_size_option(page_size).map(Self::new)
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    pub fn page_no(&self) -> i64 {
        self.page_no
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// `None` until the first successful fetch.
    pub fn total_pages(&self) -> Option<i64> {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn refresh_trigger(&self) -> bool {
        self.refresh
    }

    /// Records of the loaded page, unfiltered.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn has_previous(&self) -> bool {
        self.page_no > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages
            .is_some_and(|total| total > 1 && self.page_no < total)
    }

    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        match command {
            ViewCommand::NextPage => {
                if !self.has_next() {
                    return Vec::new();
                }
                self.page_no += 1;
                vec![ViewEvent::PageChanged(self.page_no), ViewEvent::FetchRequested]
            }
            ViewCommand::PrevPage => {
                if !self.has_previous() {
                    return Vec::new();
                }
                self.page_no -= 1;
                vec![ViewEvent::PageChanged(self.page_no), ViewEvent::FetchRequested]
            }
            ViewCommand::SetPageSize(size) => self.set_page_size(size),
            ViewCommand::SetSearch(term) => {
                self.search = term;
                vec![ViewEvent::SearchChanged(self.search.clone())]
            }
            ViewCommand::Refresh => {
                self.refresh = !self.refresh;
                vec![
                    ViewEvent::RefreshTriggered(self.refresh),
                    ViewEvent::FetchRequested,
                ]
            }
            ViewCommand::DismissNotification => {
                if self.notification.take().is_none() {
                    return Vec::new();
                }
                if self.phase == Phase::Failed {
                    self.phase = Phase::Loaded;
                }
                vec![ViewEvent::NotificationDismissed]
            }
        }
    }

    fn set_page_size(&mut self, size: i64) -> Vec<ViewEvent> {
        if let Err(err) = validation::validate_page_size_option(size) {
            return self.report_error(&err);
        }
        let mut events = Vec::new();
        if size != self.page_size {
            self.page_size = size;
            events.push(ViewEvent::PageSizeChanged(size));
        }
        if self.page_no != 1 {
            self.page_no = 1;
            events.push(ViewEvent::PageChanged(1));
        }
        if !events.is_empty() {
            events.push(ViewEvent::FetchRequested);
        }
        events
    }

    /// Marks a fetch as started: raises the loading flag and clears the
    /// displayed records so nothing stale shows behind the indicator.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.phase = Phase::Loading;
        self.records.clear();
        FetchTicket {
            seq: self.issued,
            page_no: self.page_no,
            page_size: self.page_size,
        }
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page<T>, DashboardError>,
    ) -> Vec<ViewEvent> {
        if ticket.seq != self.issued && self.stale_policy == StalePolicy::Discard {
            tracing::debug!(
                "Dropping response for page {} (request {}, latest {})",
                ticket.page_no,
                ticket.seq,
                self.issued
            );
            return vec![ViewEvent::StaleResponseDropped(ticket.seq)];
        }
        self.loading = false;

        match result {
            Ok(page) => {
                let total = page.total_pages;
                self.total_pages = Some(total);
                self.records = page.records;
                self.phase = Phase::Loaded;
                let mut events = vec![ViewEvent::Loaded {
                    page_no: ticket.page_no,
                    records: self.records.len(),
                }];
                if total >= 1 && self.page_no > total {
                    tracing::warn!(
                        "Page {} is past the last page ({}), moving back",
                        self.page_no,
                        total
                    );
                    self.page_no = total;
                    events.push(ViewEvent::PageClamped(total));
                    events.push(ViewEvent::FetchRequested);
                }
                events
            }
            Err(err) => {
                self.phase = Phase::Failed;
                self.report_error(&err)
            }
        }
    }

    /// Opens the notification for an error raised outside a fetch, such as
    /// a failed row update.
    pub fn report_error(&mut self, err: &DashboardError) -> Vec<ViewEvent> {
        tracing::error!("{}", err);
        let message = err.user_message();
        self.notification = Some(Notification {
            message: message.clone(),
        });
        vec![ViewEvent::NotificationOpened(message)]
    }
}

impl<T: Searchable> ViewState<T> {
    /// Records of the loaded page that match the search term.
    pub fn visible_records(&self) -> Vec<&T> {
        filter_records(&self.records, &self.search)
    }
}

type LoadingObserver = Box<dyn FnMut(bool)>;

/// Drives a [`ViewState`] against a [`PageSource`], one fetch at a time.
pub struct PaginatedView<S: PageSource> {
    source: S,
    state: ViewState<S::Record>,
    on_loading: Option<LoadingObserver>,
}

impl<S: PageSource> PaginatedView<S> {
    pub fn new(source: S, state: ViewState<S::Record>) -> Self {
        Self {
            source,
            state,
            on_loading: None,
        }
    }

    /// Called with `true` when a fetch starts and `false` once the loading
    /// flag drops.
    pub fn on_loading(mut self, observer: impl FnMut(bool) + 'static) -> Self {
        self.on_loading = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &ViewState<S::Record> {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads the first page.
    pub async fn mount(&mut self) -> Vec<ViewEvent> {
        self.settle(vec![ViewEvent::FetchRequested]).await
    }

    pub async fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        let events = self.state.dispatch(command);
        self.settle(events).await
    }

    pub fn report_error(&mut self, err: &DashboardError) -> Vec<ViewEvent> {
        self.state.report_error(err)
    }

    async fn settle(&mut self, mut events: Vec<ViewEvent>) -> Vec<ViewEvent> {
        let mut all = Vec::new();
        loop {
            let wants_fetch = events.contains(&ViewEvent::FetchRequested);
            all.extend(events);
            if !wants_fetch {
                return all;
            }
            events = self.fetch_once().await;
        }
    }

    async fn fetch_once(&mut self) -> Vec<ViewEvent> {
        let ticket = self.state.begin_fetch();
        self.notify_loading(true);
        let result = self
            .source
            .fetch_page(ticket.page_no, ticket.page_size)
            .await;
        let events = self.state.complete(ticket, result);
        if !self.state.is_loading() {
            self.notify_loading(false);
        }
        events
    }

    fn notify_loading(&mut self, loading: bool) {
        if let Some(observer) = self.on_loading.as_mut() {
            observer(loading);
        }
    }
}
