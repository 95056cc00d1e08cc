use super::escape;
use crate::models::Movie;

/// One tile per movie, in order. `select_action` yields the URL a tile posts to.
pub fn render<F>(movies: &[Movie], select_action: F) -> String
where
    F: Fn(&Movie) -> String,
{
    let mut html = String::from(r#"<ul class="grid">"#);
    for movie in movies {
        let title = escape(&movie.title);
        let poster = match movie.poster_url() {
            Some(url) => format!(
                r#"<img class="poster" src="{}" alt="{}" loading="lazy">"#,
                escape(&url),
                title
            ),
            None => r#"<div class="poster poster-missing"></div>"#.to_string(),
        };
        html.push_str(&format!(
            r#"<li class="tile" data-movie-id="{id}"><form method="post" action="{action}"><button class="card" type="submit">{poster}<h2 class="title">{title}</h2></button></form></li>"#,
            id = movie.id,
            action = escape(&select_action(movie)),
        ));
    }
    html.push_str("</ul>");
    html
}
