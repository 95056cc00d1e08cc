use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::effects::Document;
use crate::error::{FetchFailure, SearchError};
use crate::models::Movie;
use crate::notify::{NoticeKind, NoticeOptions, Notifier};
use crate::overlay::{DetailOverlay, OverlayAction, OverlayEvent};
use crate::tmdb::MovieApi;

pub const EMPTY_QUERY_NOTICE: &str = "Please enter your search query.";
pub const NO_RESULTS_NOTICE: &str = "No movies found for your request.";
pub const FETCH_ERROR_NOTICE: &str = "Network error or server error. Please reload the page.";
pub const ERROR_TEXT: &str = "Something went wrong. Please reload the page.";

pub type SharedController = Arc<Mutex<AppController>>;

/// What the main area shows. The detail overlay is drawn on top of any of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    Loading,
    Error,
    Grid(&'a [Movie]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(usize),
    Empty,
    Failed(SearchError),
    /// A newer search started before this one resolved; its response was dropped.
    Superseded,
}

/// Identifies one issued search. Only the ticket of the latest search may apply results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

pub struct AppController {
    api: Arc<dyn MovieApi>,
    notifier: Arc<dyn Notifier>,
    document: Arc<Document>,
    movies: Vec<Movie>,
    loading: bool,
    error: bool,
    generation: u64,
    overlay: Option<DetailOverlay>,
}

impl AppController {
    pub fn new(
        api: Arc<dyn MovieApi>,
        notifier: Arc<dyn Notifier>,
        document: Arc<Document>,
    ) -> Self {
        Self {
            api,
            notifier,
            document,
            movies: Vec::new(),
            loading: false,
            error: false,
            generation: 0,
            overlay: None,
        }
    }

    pub fn into_shared(self) -> SharedController {
        Arc::new(Mutex::new(self))
    }

    pub fn api(&self) -> Arc<dyn MovieApi> {
        Arc::clone(&self.api)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> bool {
        self.error
    }

    pub fn selected(&self) -> Option<&Movie> {
        self.overlay.as_ref().map(DetailOverlay::movie)
    }

    pub fn overlay(&self) -> Option<&DetailOverlay> {
        self.overlay.as_ref()
    }

    pub fn screen(&self) -> Screen<'_> {
        if self.loading {
            Screen::Loading
        } else if self.error {
            Screen::Error
        } else {
            Screen::Grid(&self.movies)
        }
    }

    /// Validates the query and resets state for a new fetch. Empty input only raises a notice.
    pub fn begin_search(&mut self, query: &str) -> Result<SearchTicket, SearchError> {
        if query.trim().is_empty() {
            debug!("Ignoring empty search query");
            self.notifier
                .notify(EMPTY_QUERY_NOTICE, NoticeKind::Blank, NoticeOptions::default());
            return Err(SearchError::EmptyQuery);
        }

        self.generation += 1;
        self.loading = true;
        self.error = false;
        self.movies.clear();
        info!("Searching TMDB for '{}'", query);
        Ok(SearchTicket {
            generation: self.generation,
        })
    }

    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<Movie>, FetchFailure>,
    ) -> SearchOutcome {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "Discarding response from superseded search"
            );
            return SearchOutcome::Superseded;
        }

        let outcome = match result {
            Ok(results) if results.is_empty() => {
                self.notifier
                    .notify(NO_RESULTS_NOTICE, NoticeKind::Blank, NoticeOptions::default());
                self.movies = results;
                SearchOutcome::Empty
            }
            Ok(results) => {
                let count = results.len();
                self.movies = results;
                SearchOutcome::Found(count)
            }
            Err(failure) => {
                self.notifier
                    .notify(FETCH_ERROR_NOTICE, NoticeKind::Error, NoticeOptions::default());
                self.error = true;
                SearchOutcome::Failed(failure.into())
            }
        };
        self.loading = false;
        info!("Search finished: {:?}", outcome);
        outcome
    }

    /// Runs a whole search while holding `&mut self`. The host uses [`start_search`] instead so
    /// the controller stays available while the fetch is in flight.
    pub async fn handle_search(&mut self, query: &str) -> SearchOutcome {
        let ticket = match self.begin_search(query) {
            Ok(ticket) => ticket,
            Err(e) => return SearchOutcome::Failed(e),
        };
        let result = self.api.fetch_movies(query).await;
        self.complete_search(ticket, result)
    }

    pub fn handle_select(&mut self, movie: Movie) {
        info!(movie_id = movie.id, "Selected '{}'", movie.title);
        match self.overlay.as_mut() {
            Some(overlay) => overlay.bind(movie),
            None => {
                self.overlay = Some(DetailOverlay::mount(
                    movie,
                    &self.document,
                    Arc::clone(&self.notifier),
                ))
            }
        }
    }

    /// Selects a movie from the current results. Returns `false` for unknown ids.
    pub fn select_by_id(&mut self, id: i64) -> bool {
        match self.movies.iter().find(|m| m.id == id).cloned() {
            Some(movie) => {
                self.handle_select(movie);
                true
            }
            None => {
                warn!(movie_id = id, "Selection for a movie not in the current results");
                false
            }
        }
    }

    pub fn handle_close(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.close();
        }
    }

    pub fn handle_overlay_event(&mut self, event: OverlayEvent) {
        let Some(overlay) = self.overlay.as_mut() else {
            debug!("Overlay event {:?} with no overlay mounted", event);
            return;
        };
        if overlay.handle_event(event) == OverlayAction::Close {
            self.handle_close();
        }
    }
}

/// Starts a search on a shared controller and returns once `loading` is set.
///
/// The fetch and the final state update run on a spawned task without holding the lock, so
/// `loading` is cleared even if nobody awaits the handle or the fetch panics. Empty queries
/// are rejected before anything is spawned.
pub async fn start_search(
    shared: &SharedController,
    query: &str,
) -> Result<JoinHandle<SearchOutcome>, SearchError> {
    let (ticket, api) = {
        let mut controller = shared.lock().await;
        let ticket = controller.begin_search(query)?;
        (ticket, controller.api())
    };

    let shared = Arc::clone(shared);
    let query = query.to_string();
    Ok(tokio::spawn(async move {
        let fetch = tokio::spawn(async move { api.fetch_movies(&query).await });
        let result = match fetch.await {
            Ok(result) => result,
            Err(e) => {
                error!("Search fetch task failed: {}", e);
                Err(FetchFailure)
            }
        };
        shared.lock().await.complete_search(ticket, result)
    }))
}

/// Runs a search to completion on a shared controller.
pub async fn search(shared: &SharedController, query: &str) -> SearchOutcome {
    let task = match start_search(shared, query).await {
        Ok(task) => task,
        Err(e) => return SearchOutcome::Failed(e),
    };
    match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Search task failed: {}", e);
            SearchOutcome::Failed(SearchError::FetchFailure(FetchFailure))
        }
    }
}
