use chrono::{DateTime, Utc};

use super::escape;
use crate::notify::{Notice, NoticeKind};

pub fn render(class: &str, notices: &[&Notice], now: DateTime<Utc>) -> String {
    let mut html = format!(r#"<div class="{}" aria-live="polite">"#, escape(class));
    for notice in notices {
        let kind = match notice.kind {
            NoticeKind::Blank => "toast",
            NoticeKind::Error => "toast toast-error",
        };
        html.push_str(&format!(
            r#"<div class="{kind}" role="status" data-notice-id="{id}" data-remaining-ms="{remaining}">{message}</div>"#,
            id = escape(&notice.id),
            remaining = notice.remaining_ms(now),
            message = escape(&notice.message),
        ));
    }
    html.push_str("</div>");
    html
}
