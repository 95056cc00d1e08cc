use chrono::{DateTime, Utc};

use super::{escape, loader, routes, toaster};
use crate::notify::Notice;
use crate::overlay::{DetailOverlay, ImagePhase};

/// Detail overlay markup. `notices` are the overlay-scoped ones, drawn inside the backdrop.
pub fn render(overlay: &DetailOverlay, notices: &[&Notice], now: DateTime<Utc>) -> String {
    let movie = overlay.movie();
    let title = escape(&movie.title);
    let phase = overlay.image_phase();

    let mut body = String::new();
    if phase == ImagePhase::Loading {
        body.push_str(loader());
    }

    if let Some(url) = movie.backdrop_url() {
        match phase {
            ImagePhase::Loading => body.push_str(&format!(
                r#"<img class="image" src="{src}" alt="{title}" style="display: none" onload="reportImage({id}, 'loaded')" onerror="reportImage({id}, 'error')">"#,
                src = escape(&url),
                id = movie.id,
            )),
            ImagePhase::Loaded => body.push_str(&format!(
                r#"<img class="image" src="{src}" alt="{title}" style="display: block">"#,
                src = escape(&url),
            )),
            ImagePhase::Absent | ImagePhase::Failed => {}
        }
    }

    if overlay.details_visible() {
        body.push_str(&format!(
            r#"<div class="content"><h2>{title}</h2><p>{overview}</p><p><strong>Release Date:</strong> {release}</p><p><strong>Rating:</strong> {rating}</p></div>"#,
            overview = escape(&movie.overview),
            release = escape(&movie.release_date),
            rating = escape(&movie.rating_label()),
        ));
    }

    format!(
        r#"<div class="backdrop" role="dialog" aria-modal="true" data-movie-id="{id}" onclick="backdropClick(event)">{toasts}<div class="modal"><form method="post" action="{close}"><button class="close-button" type="submit" aria-label="Close modal">&times;</button></form>{body}</div></div>"#,
        id = movie.id,
        toasts = toaster::render("overlay-toaster", notices, now),
        close = routes::OVERLAY_CLOSE,
    )
}
