use std::sync::Arc;
use tracing::{debug, warn};

use crate::effects::{Document, KeyListener, ScrollLock};
use crate::models::Movie;
use crate::notify::{NoticeKind, NoticeOptions, Notifier};

pub const IMAGE_ERROR_NOTICE_ID: &str = "movie-image-error";
pub const IMAGE_ERROR_MESSAGE: &str = "Failed to load movie image";
const IMAGE_ERROR_DURATION_MS: i64 = 4000;
const CANCEL_KEY: &str = "Escape";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    CloseButton,
    /// Click somewhere in the dimmed layer; `on_backdrop` is false when it landed inside
    /// the modal surface.
    BackdropClick { on_backdrop: bool },
    Key(String),
    ImageLoaded { movie_id: i64 },
    ImageFailed { movie_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Stay,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePhase {
    /// Movie has no backdrop; nothing is loaded.
    Absent,
    Loading,
    Loaded,
    Failed,
}

/// Side effects owned for as long as the overlay is mounted.
struct EffectScope {
    _scroll: ScrollLock,
    _keys: KeyListener,
    notifier: Arc<dyn Notifier>,
}

impl Drop for EffectScope {
    fn drop(&mut self) {
        self.notifier.dismiss(IMAGE_ERROR_NOTICE_ID);
    }
}

pub struct DetailOverlay {
    movie: Movie,
    image_loaded: bool,
    image_error: bool,
    effects: EffectScope,
}

impl std::fmt::Debug for DetailOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailOverlay")
            .field("movie_id", &self.movie.id)
            .field("image_loaded", &self.image_loaded)
            .field("image_error", &self.image_error)
            .finish()
    }
}

impl DetailOverlay {
    pub fn mount(movie: Movie, document: &Arc<Document>, notifier: Arc<dyn Notifier>) -> Self {
        debug!(movie_id = movie.id, "Mounting detail overlay");
        Self {
            movie,
            image_loaded: false,
            image_error: false,
            effects: EffectScope {
                _scroll: document.lock_scroll(),
                _keys: document.listen_keys(),
                notifier,
            },
        }
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn image_loaded(&self) -> bool {
        self.image_loaded
    }

    pub fn image_error(&self) -> bool {
        self.image_error
    }

    /// Rebinds to another movie without unmounting. Image state is keyed by movie identity.
    pub fn bind(&mut self, movie: Movie) {
        if movie.id != self.movie.id {
            self.reset_image();
        }
        self.movie = movie;
    }

    pub fn image_phase(&self) -> ImagePhase {
        if self.movie.backdrop_path.is_none() {
            ImagePhase::Absent
        } else if self.image_error {
            ImagePhase::Failed
        } else if self.image_loaded {
            ImagePhase::Loaded
        } else {
            ImagePhase::Loading
        }
    }

    pub fn details_visible(&self) -> bool {
        matches!(self.image_phase(), ImagePhase::Loaded | ImagePhase::Absent)
    }

    pub fn handle_event(&mut self, event: OverlayEvent) -> OverlayAction {
        match event {
            OverlayEvent::CloseButton => OverlayAction::Close,
            OverlayEvent::BackdropClick { on_backdrop } => {
                if on_backdrop {
                    OverlayAction::Close
                } else {
                    OverlayAction::Stay
                }
            }
            OverlayEvent::Key(key) => {
                if key == CANCEL_KEY {
                    OverlayAction::Close
                } else {
                    OverlayAction::Stay
                }
            }
            OverlayEvent::ImageLoaded { movie_id } => {
                if self.accepts_image_event(movie_id) && !self.image_error {
                    self.image_loaded = true;
                }
                OverlayAction::Stay
            }
            OverlayEvent::ImageFailed { movie_id } => {
                if self.accepts_image_event(movie_id) && !self.image_loaded {
                    self.fail_image();
                }
                OverlayAction::Stay
            }
        }
    }

    /// Close path shared by every trigger. Effects are released when `self` drops.
    pub fn close(mut self) {
        self.effects.notifier.dismiss(IMAGE_ERROR_NOTICE_ID);
        self.reset_image();
        debug!(movie_id = self.movie.id, "Closing detail overlay");
    }

    fn accepts_image_event(&self, movie_id: i64) -> bool {
        movie_id == self.movie.id && self.movie.backdrop_path.is_some()
    }

    fn fail_image(&mut self) {
        warn!(
            movie_id = self.movie.id,
            "Backdrop image failed to load for '{}'", self.movie.title
        );
        self.image_error = true;
        self.effects.notifier.notify(
            IMAGE_ERROR_MESSAGE,
            NoticeKind::Error,
            NoticeOptions::default()
                .with_id(IMAGE_ERROR_NOTICE_ID)
                .with_duration_ms(IMAGE_ERROR_DURATION_MS)
                .in_overlay(),
        );
    }

    fn reset_image(&mut self) {
        self.image_loaded = false;
        self.image_error = false;
    }
}
