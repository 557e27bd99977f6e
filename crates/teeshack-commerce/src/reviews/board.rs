//! The review board: every review the shop knows about.

use chrono::{Local, NaiveDate};
use teeshack_cache::Cache;

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId};
use crate::reviews::{Rating, RatingDistribution, Review, ReviewAuthor, ReviewSort};

/// Slot holding reviews written by shoppers.
pub const REVIEWS_KEY: &str = "teeshack_reviews";

const PHOTO_BASE_URL: &str = "https://images.unsplash.com/photo-";
const PHOTO_CROP: &str = "?w=32&h=32&fit=crop&crop=face";

/// Built-in reviews plus those submitted by shoppers.
///
/// Only submitted reviews are persisted; the built-in ones are recreated on
/// every start.
#[derive(Debug, Clone)]
pub struct ReviewBoard {
    reviews: Vec<Review>,
    submitted: Vec<Review>,
    cache: Option<Cache>,
}

impl ReviewBoard {
    /// Board with no reviews and no persistence.
    pub fn empty() -> Self {
        Self {
            reviews: Vec::new(),
            submitted: Vec::new(),
            cache: None,
        }
    }

    /// Board holding the built-in reviews, without persistence.
    pub fn seeded() -> Self {
        Self {
            reviews: seed_reviews(),
            ..Self::empty()
        }
    }

    /// Built-in reviews plus those stored in `cache`. New reviews are written
    /// back to it.
    pub fn restore(cache: Cache) -> Self {
        let submitted: Vec<Review> = match cache.get(REVIEWS_KEY) {
            Ok(Some(reviews)) => reviews,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable reviews");
                Vec::new()
            }
        };

        let mut reviews = seed_reviews();
        reviews.extend(submitted.iter().cloned());
        Self {
            reviews,
            submitted,
            cache: Some(cache),
        }
    }

    /// Reviews of `product_id`, optionally only those with `rating`, in
    /// `sort` order.
    pub fn for_product(
        &self,
        product_id: &ProductId,
        sort: ReviewSort,
        rating: Option<Rating>,
    ) -> Vec<&Review> {
        let mut reviews: Vec<&Review> = self
            .reviews
            .iter()
            .filter(|r| &r.product_id == product_id)
            .filter(|r| rating.map_or(true, |wanted| r.rating == wanted))
            .collect();
        sort.apply(&mut reviews);
        reviews
    }

    /// Rating breakdown over every review of `product_id`.
    pub fn distribution(&self, product_id: &ProductId) -> RatingDistribution {
        RatingDistribution::from_reviews(self.reviews.iter().filter(|r| &r.product_id == product_id))
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Submit a review dated today.
    pub fn submit(
        &mut self,
        product_id: ProductId,
        author: Option<&ReviewAuthor>,
        rating: u8,
        comment: &str,
    ) -> Result<&Review, CommerceError> {
        self.submit_at(product_id, author, rating, comment, Local::now().date_naive())
    }

    /// Submit a review dated `date`.
    ///
    /// Requires a signed-in author, a rating of 1 to 5 and a non-blank
    /// comment, checked in that order. Submitted reviews start unverified
    /// with no helpful votes.
    pub fn submit_at(
        &mut self,
        product_id: ProductId,
        author: Option<&ReviewAuthor>,
        rating: u8,
        comment: &str,
        date: NaiveDate,
    ) -> Result<&Review, CommerceError> {
        let author = author.ok_or(CommerceError::SignInRequired)?;
        let rating = Rating::new(rating)?;
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(CommerceError::MissingField("comment"));
        }

        let review = Review {
            id: ReviewId::generate(),
            product_id,
            user_name: author.name.clone(),
            user_avatar: author.avatar.clone(),
            rating,
            comment: comment.to_string(),
            date,
            helpful: 0,
            verified: false,
        };

        self.submitted.push(review.clone());
        if let Some(cache) = &self.cache {
            cache.set(REVIEWS_KEY, &self.submitted)?;
        }

        tracing::info!(
            review_id = %review.id,
            product_id = %review.product_id,
            rating = rating.stars(),
            "review submitted"
        );
        self.reviews.push(review);
        Ok(&self.reviews[self.reviews.len() - 1])
    }
}

impl Default for ReviewBoard {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed_reviews() -> Vec<Review> {
    let review = |id: &str, name: &str, photo: &str, stars: u8, comment: &str, day: u32, helpful: u32, verified: bool| {
        Some(Review {
            id: ReviewId::new(id),
            product_id: ProductId::new("1"),
            user_name: name.to_string(),
            user_avatar: Some(format!("{}{}{}", PHOTO_BASE_URL, photo, PHOTO_CROP)),
            rating: Rating::new(stars).ok()?,
            comment: comment.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day)?,
            helpful,
            verified,
        })
    };

    vec![
        review(
            "1",
            "María García",
            "1494790108755-2616b612b47c",
            5,
            "Excelente calidad y muy cómoda. El algodón es suave y el corte perfecto.",
            15,
            12,
            true,
        ),
        review(
            "2",
            "Carlos Ruiz",
            "1507003211169-0a1dd7228f2d",
            4,
            "Muy buena camiseta, aunque pensé que sería un poco más gruesa.",
            10,
            8,
            true,
        ),
        review(
            "3",
            "Ana López",
            "1438761681033-6461ffad8d80",
            5,
            "Perfecta! La compré en negro y blanco. Súper recomendada.",
            8,
            15,
            false,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
