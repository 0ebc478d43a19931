use super::{escape_html, page, ShellOptions, NO_POSTER_SVG};
use crate::catalog::{Catalog, Category};
use crate::upstream::MovieSummary;

const TABS_JS: &str = include_str!("assets/tabs.js");

/// Server-rendered page with every category's cards already embedded.
///
/// `sections` is expected in catalog order; categories missing from it
/// render as empty panels.
pub fn render_prerendered(
    catalog: &Catalog,
    sections: &[(&Category, Vec<MovieSummary>)],
    opts: &ShellOptions,
) -> String {
    let mut html = page::open(opts, catalog.categories(), "data-target");
    html.push_str("  <main>\n");
    for (i, category) in catalog.categories().iter().enumerate() {
        let movies = sections
            .iter()
            .find(|(c, _)| c.id == category.id)
            .map(|(_, movies)| movies.as_slice())
            .unwrap_or_default();
        html.push_str(&panel(category, movies, i == 0));
    }
    html.push_str("  </main>\n");
    html.push_str(&page::close(opts, catalog.default_category().id, TABS_JS));
    html
}

fn panel(category: &Category, movies: &[MovieSummary], active: bool) -> String {
    let cards = if movies.is_empty() {
        r#"<p class="status">No se encontraron películas.</p>"#.to_string()
    } else {
        movies.iter().map(card).collect::<Vec<_>>().join("\n")
    };
    format!(
        "    <div class=\"tab-panel{active}\" id=\"{id}\">\n      <div class=\"grid\">\n{cards}\n      </div>\n    </div>\n",
        active = if active { " active" } else { "" },
        id = escape_html(category.id),
    )
}

fn card(movie: &MovieSummary) -> String {
    let title = escape_html(&movie.title);
    let poster = escape_html(movie.poster_url.as_deref().unwrap_or(NO_POSTER_SVG));
    let rating = movie
        .rating
        .as_deref()
        .map(|r| format!(r#"<span class="rating">{}</span>"#, escape_html(r)))
        .unwrap_or_default();
    format!(
        r#"        <div class="card">
          <div class="card-poster"><img src="{poster}" alt="{title}" loading="lazy"/></div>
          <div class="card-info">
            <h3 title="{title}">{title}</h3>
            <div class="card-meta"><span class="year">{year}</span>{rating}</div>
          </div>
        </div>"#,
        year = escape_html(&movie.year),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;
    use crate::render::page::button_labels;
    use crate::upstream::MovieId;

    fn opts() -> ShellOptions {
        ShellOptions {
            provider: ProviderKind::Omdb,
            missing_credential: false,
        }
    }

    #[test]
    fn test_cards_are_embedded_and_escaped() {
        let catalog = Catalog::for_provider(ProviderKind::Omdb);
        let horror = catalog.resolve(Some("horror"));
        let mut movie = MovieSummary::new(MovieId::Text("tt1".into()), "<Scream> & \"Co\"", "1996");
        movie.poster_url = Some("https://img.test/s.jpg".to_string());
        let html = render_prerendered(&catalog, &[(horror, vec![movie])], &opts());

        assert!(html.contains("&lt;Scream&gt; &amp; &quot;Co&quot;"));
        assert!(!html.contains("<Scream>"));
        assert!(html.contains(r#"src="https://img.test/s.jpg""#));
        assert!(html.contains(r#"<div class="tab-panel" id="horror">"#));
        assert!(html.contains(r#"<div class="tab-panel active" id="action">"#));
    }

    #[test]
    fn test_every_category_gets_a_panel() {
        let catalog = Catalog::for_provider(ProviderKind::Omdb);
        let html = render_prerendered(&catalog, &[], &opts());
        assert_eq!(html.matches("No se encontraron películas.").count(), 6);
        assert_eq!(button_labels(&html).len(), 6);
        assert!(html.contains(r#"data-target="scifi""#));
    }

    #[test]
    fn test_missing_poster_uses_placeholder() {
        let catalog = Catalog::for_provider(ProviderKind::Omdb);
        let action = catalog.default_category();
        let movie = MovieSummary::new(MovieId::Text("tt2".into()), "Untitled", "2000");
        let html = render_prerendered(&catalog, &[(action, vec![movie])], &opts());
        assert!(html.contains(r#"src="data:image/svg+xml,"#));
    }
}
