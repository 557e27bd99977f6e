//! Review types, ordering and rating breakdown.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId};

/// Star rating, 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Result<Self, CommerceError> {
        if (1..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(CommerceError::InvalidRating(stars))
        }
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = CommerceError;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        Self::new(stars)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = self.0 as usize;
        let empty = (Self::MAX as usize).saturating_sub(filled);
        write!(f, "{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

/// A shopper's review of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub rating: Rating,
    pub comment: String,
    pub date: NaiveDate,
    /// Number of shoppers who marked the review as helpful.
    #[serde(default)]
    pub helpful: u32,
    /// Written by someone who bought the product.
    #[serde(default)]
    pub verified: bool,
}

impl Review {
    /// Initials shown when there is no avatar ("María García" -> "MG").
    pub fn initials(&self) -> String {
        self.user_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

/// Who is writing a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAuthor {
    pub name: String,
    pub avatar: Option<String>,
}

/// Order of a review listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
    /// Most helpful first.
    Helpful,
}

impl ReviewSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewSort::Newest => "newest",
            ReviewSort::Oldest => "oldest",
            ReviewSort::Highest => "highest",
            ReviewSort::Lowest => "lowest",
            ReviewSort::Helpful => "helpful",
        }
    }

    /// Stable sort, so ties keep their listing order.
    pub fn apply(&self, reviews: &mut [&Review]) {
        match self {
            ReviewSort::Newest => reviews.sort_by(|a, b| b.date.cmp(&a.date)),
            ReviewSort::Oldest => reviews.sort_by(|a, b| a.date.cmp(&b.date)),
            ReviewSort::Highest => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
            ReviewSort::Lowest => reviews.sort_by(|a, b| a.rating.cmp(&b.rating)),
            ReviewSort::Helpful => reviews.sort_by(|a, b| b.helpful.cmp(&a.helpful)),
        }
    }
}

impl FromStr for ReviewSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "newest" => Ok(ReviewSort::Newest),
            "oldest" => Ok(ReviewSort::Oldest),
            "highest" => Ok(ReviewSort::Highest),
            "lowest" => Ok(ReviewSort::Lowest),
            "helpful" => Ok(ReviewSort::Helpful),
            other => Err(format!(
                "unknown sort '{}' (expected newest, oldest, highest, lowest or helpful)",
                other
            )),
        }
    }
}

impl fmt::Display for ReviewSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review counts per star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RatingDistribution {
    /// `counts[0]` is one star, `counts[4]` five stars.
    counts: [usize; 5],
}

impl RatingDistribution {
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        let mut counts = [0usize; 5];
        for review in reviews {
            let slot = &mut counts[usize::from(review.rating.stars()) - 1];
            *slot = slot.saturating_add(1);
        }
        Self { counts }
    }

    pub fn count(&self, rating: Rating) -> usize {
        self.counts[usize::from(rating.stars()) - 1]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Share of reviews with `rating`, 0 to 100. Zero when there are none.
    pub fn percentage(&self, rating: Rating) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(rating) as f64 * 100.0 / total as f64,
        }
    }

    /// Mean star rating, if anyone has reviewed.
    pub fn average(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let stars: usize = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, count)| (i + 1) * count)
            .sum();
        Some(stars as f64 / total as f64)
    }

    /// `(rating, count)` from five stars down to one.
    pub fn rows(&self) -> impl Iterator<Item = (Rating, usize)> + '_ {
        (1..=Rating::MAX).rev().map(|stars| {
            let rating = Rating(stars);
            (rating, self.count(rating))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: &str, stars: u8, day: u32, helpful: u32) -> Review {
        Review {
            id: ReviewId::new(id),
            product_id: ProductId::new("1"),
            user_name: "María García".to_string(),
            user_avatar: None,
            rating: Rating::new(stars).unwrap(),
            comment: "Muy cómoda".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            helpful,
            verified: false,
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(5).unwrap().stars(), 5);
        assert_eq!(Rating::new(3).unwrap().to_string(), "★★★☆☆");
    }

    #[test]
    fn test_rating_rejected_on_deserialize() {
        let mut json = serde_json::to_value(review("a", 4, 1, 0)).unwrap();
        json["rating"] = serde_json::json!(9);
        assert!(serde_json::from_value::<Review>(json).is_err());
    }

    #[test]
    fn test_sort_orders() {
        let reviews = [review("a", 3, 10, 8), review("b", 5, 15, 12), review("c", 4, 8, 15)];
        let ids = |sort: ReviewSort| {
            let mut list: Vec<&Review> = reviews.iter().collect();
            sort.apply(&mut list);
            list.iter().map(|r| r.id.as_str().to_string()).collect::<Vec<_>>()
        };

        assert_eq!(ids(ReviewSort::Newest), ["b", "a", "c"]);
        assert_eq!(ids(ReviewSort::Oldest), ["c", "a", "b"]);
        assert_eq!(ids(ReviewSort::Highest), ["b", "c", "a"]);
        assert_eq!(ids(ReviewSort::Lowest), ["a", "c", "b"]);
        assert_eq!(ids(ReviewSort::Helpful), ["c", "b", "a"]);
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("Helpful".parse::<ReviewSort>(), Ok(ReviewSort::Helpful));
        assert!("best".parse::<ReviewSort>().is_err());
    }

    #[test]
    fn test_distribution() {
        let reviews = [review("a", 5, 1, 0), review("b", 4, 2, 0), review("c", 5, 3, 0)];
        let dist = RatingDistribution::from_reviews(&reviews);
        let five = Rating::new(5).unwrap();

        assert_eq!(dist.total(), 3);
        assert_eq!(dist.count(five), 2);
        assert_eq!(dist.count(Rating::new(1).unwrap()), 0);
        assert!((dist.percentage(five) - 66.666).abs() < 0.01);
        assert!((dist.average().unwrap() - 14.0 / 3.0).abs() < 1e-9);

        let rows: Vec<(u8, usize)> = dist.rows().map(|(r, c)| (r.stars(), c)).collect();
        assert_eq!(rows, [(5, 2), (4, 1), (3, 0), (2, 0), (1, 0)]);
    }

    #[test]
    fn test_empty_distribution() {
        let dist = RatingDistribution::default();
        assert_eq!(dist.average(), None);
        assert_eq!(dist.percentage(Rating::new(5).unwrap()), 0.0);
    }

    #[test]
    fn test_initials() {
        assert_eq!(review("a", 5, 1, 0).initials(), "MG");
    }
}
