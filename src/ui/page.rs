use chrono::{DateTime, Utc};

use super::{grid, loader, modal, routes, search_bar, toaster};
use crate::controller::{AppController, Screen, ERROR_TEXT};
use crate::effects::Document;
use crate::notify::{Notice, NoticeScope};

const BASE_SCRIPT: &str = r#"<script>
function postForm(url, data) {
  return fetch(url, { method: 'POST', body: new URLSearchParams(data) }).then(() => location.reload());
}
function reportImage(id, status) { postForm('/overlay/image', { movie_id: id, status: status }); }
function backdropClick(e) {
  if (e.target === e.currentTarget) postForm('/overlay/backdrop', { target: 'backdrop' });
}
document.querySelectorAll('[data-remaining-ms]').forEach((el) => {
  setTimeout(() => el.remove(), Number(el.dataset.remainingMs));
});
</script>"#;

/// Reloads the page while a search is in flight so the loader gives way to its result.
const LOADING_REFRESH: &str = r#"<meta http-equiv="refresh" content="1">"#;

const KEY_LISTENER_SCRIPT: &str = r#"<script>
document.addEventListener('keydown', (e) => {
  if (e.key === 'Escape') postForm('/overlay/key', { key: e.key });
});
</script>"#;

pub fn render(
    controller: &AppController,
    document: &Document,
    notices: &[Notice],
    now: DateTime<Utc>,
) -> String {
    let (page_notices, overlay_notices): (Vec<&Notice>, Vec<&Notice>) = notices
        .iter()
        .partition(|n| n.scope == NoticeScope::Page);

    let screen = controller.screen();
    let refresh = if screen == Screen::Loading {
        LOADING_REFRESH
    } else {
        ""
    };
    let main = match screen {
        Screen::Loading => loader().to_string(),
        Screen::Error => format!(r#"<p class="error-text">{ERROR_TEXT}</p>"#),
        Screen::Grid(movies) => grid::render(movies, |m| routes::select(m.id)),
    };

    let overlay = controller
        .overlay()
        .map(|o| modal::render(o, &overlay_notices, now))
        .unwrap_or_default();

    let body_style = if document.scroll_locked() {
        "overflow: hidden"
    } else {
        "overflow: auto"
    };
    let key_script = if document.key_listener_count() > 0 {
        KEY_LISTENER_SCRIPT
    } else {
        ""
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8">{refresh}<title>Movie search</title></head>
<body style="{body_style}">
{toasts}
{search}
<main>{main}</main>
{overlay}
{BASE_SCRIPT}
{key_script}
</body>
</html>
"#,
        toasts = toaster::render("toaster top-center", &page_notices, now),
        search = search_bar::render(routes::SEARCH),
    )
}
