use std::fmt;

use chrono::Datelike;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::core::posters::{PosterSupplier, POSTER_CANDIDATES};
use crate::core::rating::{self, AverageRating, StarRating};
use crate::core::reviews::ReviewStore;
use crate::models::{self, Movie, Rating, Review};
use crate::utils::Error;

const MIN_SCROLL_ITEMS: usize = 6;
const MAX_SCROLL_ITEMS: usize = 10;
const MIN_SCROLL_SECS: u32 = 12;
const SECS_PER_SCROLL_ITEM: u32 = 4;

#[derive(Debug, Clone)]
pub struct MovieCard {
    pub movie: &'static Movie,
    pub review_count: usize,
    pub average: Option<AverageRating>,
    pub stars: StarRating,
}

impl MovieCard {
    /// "4.3", or an em dash for a movie nobody rated yet.
    pub fn score_label(&self) -> String {
        self.average
            .map(|avg| avg.to_string())
            .unwrap_or_else(|| "—".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct MovieDetails {
    pub title: String,
    pub year: u16,
    pub reviews: Vec<Review>,
}

impl fmt::Display for MovieDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Title: {}\nYear: {}\n\nReviews:\n", self.title, self.year)?;
        if self.reviews.is_empty() {
            return f.write_str("No reviews yet.");
        }
        for review in &self.reviews {
            writeln!(f, "• ({}) {}", review.rating, review.text)?;
        }
        Ok(())
    }
}

/// Raw values from the review form.
#[derive(Debug, Clone, Default)]
pub struct ReviewForm {
    pub movie_id: String,
    pub rating: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { movie_id: String },
    /// No movie selected; nothing stored.
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollItem {
    pub poster: String,
    pub title: String,
    pub year: i32,
}

#[derive(Debug, Clone)]
pub struct Scroller {
    pub items: Vec<ScrollItem>,
    pub duration_secs: u32,
}

impl Scroller {
    fn new(items: Vec<ScrollItem>) -> Self {
        let n = u32::try_from(items.len()).unwrap_or(u32::MAX);
        let duration_secs = MIN_SCROLL_SECS.max(n.saturating_mul(SECS_PER_SCROLL_ITEM));
        Self {
            items,
            duration_secs,
        }
    }

    /// Items twice over, so the marquee can loop seamlessly at 50% translation.
    pub fn track(&self) -> impl Iterator<Item = &ScrollItem> {
        self.items.iter().chain(self.items.iter())
    }
}

fn fold_for_search(s: &str) -> String {
    s.trim().nfkc().collect::<String>().to_lowercase()
}

pub struct Widget {
    store: ReviewStore,
    posters: PosterSupplier,
    use_random_posters: bool,
}

impl Widget {
    pub fn new(store: ReviewStore, posters: PosterSupplier, use_random_posters: bool) -> Self {
        Self {
            store,
            posters,
            use_random_posters,
        }
    }

    /// Catalog cards whose title contains `filter`, case-insensitively.
    pub fn cards(&self, filter: &str) -> Vec<MovieCard> {
        let reviews = self.store.load();
        let query = fold_for_search(filter);

        models::catalog()
            .iter()
            .filter(|m| fold_for_search(&m.title).contains(&query))
            .map(|movie| {
                let movie_reviews = reviews.reviews_for(&movie.id);
                let average = rating::average(movie_reviews);
                MovieCard {
                    movie,
                    review_count: movie_reviews.len(),
                    average,
                    stars: StarRating::from_average(average),
                }
            })
            .collect()
    }

    pub fn details(&self, movie_id: &str) -> Option<MovieDetails> {
        let movie = models::find_movie(movie_id)?;
        Some(MovieDetails {
            title: movie.title.clone(),
            year: movie.year,
            reviews: self.store.reviews_for(movie_id),
        })
    }

    pub fn submit(&self, form: &ReviewForm) -> Result<SubmitOutcome, Error> {
        let movie_id = form.movie_id.trim();
        if movie_id.is_empty() {
            debug!("Review form submitted without a movie, ignoring");
            return Ok(SubmitOutcome::Aborted);
        }
        if models::find_movie(movie_id).is_none() {
            return Err(Error::UnknownMovie(movie_id.to_string()));
        }
        let rating: Rating = form.rating.parse()?;

        self.store
            .append(movie_id, Review::new(rating, form.text.trim()))?;
        info!("Review added for '{}' ({} stars)", movie_id, rating);
        Ok(SubmitOutcome::Submitted {
            movie_id: movie_id.to_string(),
        })
    }

    pub async fn scroller(&self) -> Scroller {
        if !self.use_random_posters {
            let items = models::catalog()
                .iter()
                .map(|m| ScrollItem {
                    poster: m.poster.clone(),
                    title: m.title.clone(),
                    year: i32::from(m.year),
                })
                .collect();
            return Scroller::new(items);
        }

        let count = MIN_SCROLL_ITEMS.max(POSTER_CANDIDATES.len().min(MAX_SCROLL_ITEMS));
        let year = chrono::Utc::now().year();
        let items = self
            .posters
            .supply_poster_urls(count)
            .await
            .into_iter()
            .enumerate()
            .map(|(i, poster)| ScrollItem {
                poster,
                title: format!("Latest {}", i + 1),
                year,
            })
            .collect();
        Scroller::new(items)
    }
}
