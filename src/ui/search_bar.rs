use serde::Deserialize;

use super::escape;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

impl SearchForm {
    /// Raw text as typed; validation belongs to the controller.
    pub fn into_query(self) -> String {
        self.query
    }
}

pub fn render(action: &str) -> String {
    format!(
        r#"<header class="search-bar">
  <a class="tmdb-link" href="https://www.themoviedb.org/" target="_blank" rel="noopener noreferrer">Powered by TMDB</a>
  <form class="search-form" method="post" action="{action}">
    <input class="search-input" type="text" name="query" autocomplete="off" placeholder="Search movies..." autofocus>
    <button class="search-button" type="submit">Search</button>
  </form>
</header>"#,
        action = escape(action)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_query_verbatim() {
        let form: SearchForm = serde_json::from_str(r#"{"query":"  batman  "}"#).expect("form");
        assert_eq!(form.into_query(), "  batman  ");
    }

    #[test]
    fn missing_field_is_empty_query() {
        let form: SearchForm = serde_json::from_str("{}").expect("form");
        assert_eq!(form.into_query(), "");
    }

    #[test]
    fn posts_to_given_action_without_prefill() {
        let html = render("/search");
        assert!(html.contains(r#"action="/search""#));
        assert!(html.contains(r#"name="query""#));
        assert!(!html.contains("value="));
    }
}
