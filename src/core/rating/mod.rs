use std::fmt;

use crate::models::Review;

pub const MAX_STARS: u8 = 5;

/// Mean rating rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AverageRating(f64);

impl AverageRating {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Mean of the numeric ratings in `reviews`, or `None` when there is nothing
/// to average. Non-numeric stored ratings are skipped.
pub fn average(reviews: &[Review]) -> Option<AverageRating> {
    let (sum, count) = reviews
        .iter()
        .filter_map(|r| r.rating.as_f64())
        .fold((0.0_f64, 0_u32), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return None;
    }
    let mean = sum / f64::from(count);
    Some(AverageRating((mean * 10.0).round() / 10.0))
}

/// Filled star count for an average: nearest integer, halves away from zero,
/// clamped to `0..=MAX_STARS`.
pub fn star_count(average: Option<AverageRating>) -> u8 {
    match average {
        Some(avg) => avg.value().round().clamp(0.0, f64::from(MAX_STARS)) as u8,
        None => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub filled: u8,
}

impl StarRating {
    pub fn from_average(average: Option<AverageRating>) -> Self {
        Self {
            filled: star_count(average),
        }
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..MAX_STARS {
            f.write_str(if i < self.filled { "★" } else { "☆" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rating, RatingValue};

    fn rated(values: &[u8]) -> Vec<Review> {
        values
            .iter()
            .map(|&v| Review::with_date(Rating::try_from(v).unwrap(), "", "d"))
            .collect()
    }

    fn raw(rating: RatingValue) -> Review {
        Review {
            rating,
            text: String::new(),
            date: String::new(),
        }
    }

    #[test]
    fn empty_has_no_average() {
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn mean_of_three_and_five_is_four() {
        let avg = average(&rated(&[3, 5])).unwrap();
        assert_eq!(avg.value(), 4.0);
        assert_eq!(avg.to_string(), "4.0");
    }

    #[test]
    fn rounds_to_one_decimal() {
        // 13 / 3 = 4.333..
        assert_eq!(average(&rated(&[4, 4, 5])).unwrap().to_string(), "4.3");
        // 11 / 3 = 3.666..
        assert_eq!(average(&rated(&[3, 4, 4])).unwrap().value(), 3.7);
    }

    #[test]
    fn string_ratings_count_and_garbage_is_skipped() {
        let reviews = vec![
            raw(RatingValue::Text("2".into())),
            raw(RatingValue::Text("oops".into())),
            raw(RatingValue::Number(4.into())),
        ];
        assert_eq!(average(&reviews).unwrap().value(), 3.0);

        let garbage = vec![raw(RatingValue::Text("oops".into()))];
        assert_eq!(average(&garbage), None);
    }

    #[test]
    fn star_counts() {
        assert_eq!(star_count(None), 0);
        assert_eq!(star_count(average(&rated(&[4]))), 4);
        assert_eq!(star_count(average(&rated(&[4, 5]))), 5); // 4.5 rounds up
        assert_eq!(star_count(average(&rated(&[1, 2, 2, 2]))), 2); // 1.8
        assert_eq!(star_count(average(&[raw(RatingValue::Number(9.into()))])), 5);
    }

    #[test]
    fn star_rendering() {
        assert_eq!(StarRating::from_average(None).to_string(), "☆☆☆☆☆");
        let four = StarRating::from_average(average(&rated(&[3, 5])));
        assert_eq!(four.filled, 4);
        assert_eq!(four.to_string(), "★★★★☆");
    }
}
