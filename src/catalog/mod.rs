pub mod category;

pub use category::{Catalog, Category, Selector, OMDB_CATEGORIES, TMDB_CATEGORIES};
