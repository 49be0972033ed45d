use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::Error;

/// A validated star rating, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidRating(value.to_string()))
        }
    }
}

impl FromStr for Rating {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| Error::InvalidRating(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rating exactly as it sits in storage. Older entries hold the form's
/// string value ("4"), newer ones a JSON number; both are written back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingValue {
    Number(serde_json::Number),
    Text(String),
}

impl RatingValue {
    /// Numeric value, or `None` when the stored value is not a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RatingValue::Number(n) => n.as_f64()?,
            RatingValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<Rating> for RatingValue {
    fn from(rating: Rating) -> Self {
        RatingValue::Number(rating.get().into())
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingValue::Number(n) => write!(f, "{n}"),
            RatingValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub rating: RatingValue,
    #[serde(default)]
    pub text: String,
    /// ISO-8601 UTC, millisecond precision.
    #[serde(default)]
    pub date: String,
}

impl Review {
    /// New review stamped with the current time.
    pub fn new(rating: Rating, text: impl Into<String>) -> Self {
        Self::with_date(
            rating,
            text,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    pub fn with_date(rating: Rating, text: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            rating: rating.into(),
            text: text.into(),
            date: date.into(),
        }
    }
}

/// Reviews keyed by movie id, each list in submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewCollection(BTreeMap<String, Vec<Review>>);

impl ReviewCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reviews for `movie_id`; an absent id simply has none.
    pub fn reviews_for(&self, movie_id: &str) -> &[Review] {
        self.0.get(movie_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, movie_id: &str, review: Review) {
        self.0.entry(movie_id.to_string()).or_default().push(review);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_one_to_five() {
        for n in 1..=5u8 {
            assert_eq!(Rating::try_from(n).unwrap().get(), n);
        }
        assert!(matches!(Rating::try_from(0), Err(Error::InvalidRating(_))));
        assert!(matches!(Rating::try_from(6), Err(Error::InvalidRating(_))));
    }

    #[test]
    fn rating_parses_form_values() {
        assert_eq!(" 4 ".parse::<Rating>().unwrap().get(), 4);
        assert!("".parse::<Rating>().is_err());
        assert!("four".parse::<Rating>().is_err());
        assert!("3.5".parse::<Rating>().is_err());
        assert!("-1".parse::<Rating>().is_err());
    }

    #[test]
    fn stored_rating_values_keep_their_shape() {
        let raw = r#"[{"rating":"4","text":"a","date":"d"},{"rating":5,"text":"b","date":"d"}]"#;
        let reviews: Vec<Review> = serde_json::from_str(raw).unwrap();
        assert_eq!(reviews[0].rating, RatingValue::Text("4".to_string()));
        assert_eq!(reviews[1].rating.as_f64(), Some(5.0));
        assert_eq!(serde_json::to_string(&reviews).unwrap(), raw);
    }

    #[test]
    fn non_numeric_rating_has_no_value() {
        assert_eq!(RatingValue::Text("abc".into()).as_f64(), None);
        assert_eq!(RatingValue::Text("".into()).as_f64(), None);
        assert_eq!(RatingValue::Text("NaN".into()).as_f64(), None);
        assert_eq!(RatingValue::Text(" 2 ".into()).as_f64(), Some(2.0));
    }

    #[test]
    fn new_review_is_stamped_in_utc_millis() {
        let review = Review::new(Rating::try_from(3).unwrap(), "ok");
        assert!(review.date.ends_with('Z'), "{}", review.date);
        assert!(chrono::DateTime::parse_from_rfc3339(&review.date).is_ok());
        // 2025-01-01T00:00:00.000Z
        assert_eq!(review.date.len(), 24);
    }

    #[test]
    fn absent_movie_has_no_reviews() {
        let mut collection = ReviewCollection::new();
        assert!(collection.reviews_for("m1").is_empty());
        collection.push("m1", Review::with_date(Rating::try_from(2).unwrap(), "", "d"));
        assert_eq!(collection.reviews_for("m1").len(), 1);
        assert!(collection.reviews_for("m2").is_empty());
        assert_eq!(collection.len(), 1);
    }
}
