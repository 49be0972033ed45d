use once_cell::sync::Lazy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: u16,
    pub poster: String, // URL or path relative to the page
    pub description: String,
}

impl Movie {
    fn new(id: &str, title: &str, year: u16, poster: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            year,
            poster: poster.to_string(),
            description: description.to_string(),
        }
    }
}

static CATALOG: Lazy<Vec<Movie>> = Lazy::new(|| {
    vec![
        Movie::new(
            "m1",
            "The Conjuring: Last Rites",
            2023,
            "./The-Conjuring-Last-Rites-English.jpg",
            "A chilling supernatural horror.",
        ),
        Movie::new(
            "m2",
            "Nobody 2",
            2024,
            "./Nobody-2-English.jpg",
            "High-octane action sequel.",
        ),
        Movie::new(
            "m3",
            "The-Fantastic-Four-First-Steps",
            2023,
            "./The-Fantastic-Four-First-Steps-English.jpg",
            "Sci-fi exploration at its best.",
        ),
        Movie::new(
            "m4",
            "F1-The-Movie",
            2020,
            "./F1-The-Movie-English.jpg",
            "A mystery that keeps you guessing.",
        ),
    ]
});

/// The fixed list of movies known to the widget, in display order.
pub fn catalog() -> &'static [Movie] {
    &CATALOG
}

pub fn find_movie(id: &str) -> Option<&'static Movie> {
    catalog().iter().find(|m| m.id == id)
}
