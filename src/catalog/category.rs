use crate::config::ProviderKind;

/// What the upstream is asked for when a category is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// TMDB genre id for `/discover/movie`.
    Genre(u32),
    /// Free-text term for the OMDb `s=` search.
    Search(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub selector: Selector,
}

const fn genre(id: &'static str, name: &'static str, genre_id: u32) -> Category {
    Category {
        id,
        name,
        selector: Selector::Genre(genre_id),
    }
}

const fn search(id: &'static str, name: &'static str, term: &'static str) -> Category {
    Category {
        id,
        name,
        selector: Selector::Search(term),
    }
}

// TMDB genre ids: https://developer.themoviedb.org/reference/genre-movie-list
pub static TMDB_CATEGORIES: [Category; 6] = [
    genre("action", "Acción", 28),
    genre("comedy", "Comedia", 35),
    genre("drama", "Drama", 18),
    genre("horror", "Terror", 27),
    genre("scifi", "Ciencia Ficción", 878),
    genre("animation", "Animación", 16),
];

pub static OMDB_CATEGORIES: [Category; 6] = [
    search("action", "Acción", "mission impossible"),
    search("comedy", "Comedia", "superbad hangover"),
    search("drama", "Drama", "shawshank godfather"),
    search("horror", "Terror", "conjuring halloween"),
    search("scifi", "Ciencia Ficción", "interstellar matrix"),
    search("animation", "Animación", "pixar toy story"),
];

/// Ordered, immutable category table for one provider.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    categories: &'static [Category],
}

impl Catalog {
    pub fn for_provider(provider: ProviderKind) -> Self {
        let categories: &'static [Category] = match provider {
            ProviderKind::Tmdb => &TMDB_CATEGORIES,
            ProviderKind::Omdb => &OMDB_CATEGORIES,
        };
        Self { categories }
    }

    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    pub fn default_category(&self) -> &'static Category {
        &self.categories[0]
    }

    /// Look up a category by id. Unknown, blank or missing ids resolve to
    /// the first entry of the table.
    pub fn resolve(&self, id: Option<&str>) -> &'static Category {
        id.map(str::trim)
            .and_then(|id| self.categories.iter().find(|c| c.id == id))
            .unwrap_or_else(|| self.default_category())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_ids() {
        for provider in [ProviderKind::Tmdb, ProviderKind::Omdb] {
            let catalog = Catalog::for_provider(provider);
            for category in catalog.categories() {
                assert_eq!(catalog.resolve(Some(category.id)), category);
            }
        }
    }

    #[test]
    fn test_resolve_falls_back_to_action() {
        let catalog = Catalog::for_provider(ProviderKind::Tmdb);
        assert_eq!(catalog.resolve(None).id, "action");
        assert_eq!(catalog.resolve(Some("")).id, "action");
        assert_eq!(catalog.resolve(Some("western")).id, "action");
        assert_eq!(catalog.resolve(Some("HORROR")).id, "action");
    }

    #[test]
    fn test_selectors_match_provider() {
        let tmdb = Catalog::for_provider(ProviderKind::Tmdb);
        assert_eq!(tmdb.resolve(Some("horror")).selector, Selector::Genre(27));
        assert!(tmdb
            .categories()
            .iter()
            .all(|c| matches!(c.selector, Selector::Genre(_))));

        let omdb = Catalog::for_provider(ProviderKind::Omdb);
        assert_eq!(
            omdb.resolve(Some("scifi")).selector,
            Selector::Search("interstellar matrix")
        );
    }

    #[test]
    fn test_tables_share_ids_and_names() {
        let ids = |t: &[Category]| t.iter().map(|c| (c.id, c.name)).collect::<Vec<_>>();
        assert_eq!(ids(&TMDB_CATEGORIES), ids(&OMDB_CATEGORIES));
        assert_eq!(TMDB_CATEGORIES.len(), 6);
    }
}
