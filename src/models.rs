use serde::{Deserialize, Serialize};

pub const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/original";
pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl Movie {
    /// Full-size detail image, or `None` when TMDB has no backdrop for this movie.
    pub fn backdrop_url(&self) -> Option<String> {
        self.backdrop_path
            .as_ref()
            .map(|p| format!("{BACKDROP_BASE}{p}"))
    }

    pub fn poster_url(&self) -> Option<String> {
        self.poster_path.as_ref().map(|p| format!("{POSTER_BASE}{p}"))
    }

    /// Rating as shown in the detail view, e.g. `7.8/10`.
    pub fn rating_label(&self) -> String {
        format!("{}/10", self.vote_average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ignores_extra_fields_and_null_paths() {
        let value = json!({
            "id": 268,
            "title": "Batman",
            "overview": "Gotham",
            "release_date": "1989-06-21",
            "vote_average": 7.2,
            "backdrop_path": null,
            "poster_path": "/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg",
            "adult": false,
            "genre_ids": [14, 28]
        });
        let movie: Movie = serde_json::from_value(value).expect("movie deserialize");
        assert_eq!(movie.id, 268);
        assert_eq!(movie.backdrop_path, None);
        assert_eq!(movie.backdrop_url(), None);
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg")
        );
    }

    #[test]
    fn backdrop_url_is_plain_concatenation() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 1,
            "title": "A",
            "backdrop_path": "/a b.jpg"
        }))
        .expect("movie deserialize");
        assert_eq!(
            movie.backdrop_url().as_deref(),
            Some("https://image.tmdb.org/t/p/original/a b.jpg")
        );
        assert_eq!(movie.overview, "");
        assert_eq!(movie.vote_average, 0.0);
    }

    #[test]
    fn rating_label_uses_shortest_decimal_form() {
        let mut movie: Movie = serde_json::from_value(json!({ "id": 1, "title": "A" }))
            .expect("movie deserialize");
        movie.vote_average = 7.8;
        assert_eq!(movie.rating_label(), "7.8/10");
        movie.vote_average = 7.0;
        assert_eq!(movie.rating_label(), "7/10");
        movie.vote_average = 6.125;
        assert_eq!(movie.rating_label(), "6.125/10");
    }
}
