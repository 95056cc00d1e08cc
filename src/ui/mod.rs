//! Server-side HTML rendering. Every function here is a pure function of the state it is
//! given; "callbacks" are the form actions the browser posts back to.

pub mod grid;
pub mod modal;
pub mod page;
pub mod search_bar;
pub mod toaster;

pub mod routes {
    pub const HOME: &str = "/";
    pub const HEALTH: &str = "/health";
    pub const SEARCH: &str = "/search";
    pub const SELECT: &str = "/select";
    pub const OVERLAY_CLOSE: &str = "/overlay/close";
    pub const OVERLAY_BACKDROP: &str = "/overlay/backdrop";
    pub const OVERLAY_KEY: &str = "/overlay/key";
    pub const OVERLAY_IMAGE: &str = "/overlay/image";

    pub fn select(movie_id: i64) -> String {
        format!("{SELECT}/{movie_id}")
    }
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn loader() -> &'static str {
    r#"<div class="loader" role="status" aria-live="polite">Loading…</div>"#
}
