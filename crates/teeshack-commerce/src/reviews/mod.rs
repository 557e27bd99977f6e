//! Product reviews module.
//!
//! Star ratings with comments, the per-product rating breakdown and review
//! submission by signed-in shoppers.

mod board;
mod review;

pub use board::{ReviewBoard, REVIEWS_KEY};
pub use review::{RatingDistribution, Rating, Review, ReviewAuthor, ReviewSort};
