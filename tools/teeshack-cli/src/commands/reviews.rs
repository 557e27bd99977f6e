//! Review commands.

use anyhow::Result;
use serde_json::json;
use teeshack_auth::UserProfile;
use teeshack_commerce::ids::ProductId;
use teeshack_commerce::reviews::{Rating, ReviewAuthor, ReviewBoard, ReviewSort};

use super::{ReviewsArgs, ReviewsCommand};
use crate::context::Context;

/// Run the reviews command.
pub async fn run(args: ReviewsArgs, ctx: &Context) -> Result<()> {
    let mut board = ctx.reviews()?;

    match args.command {
        ReviewsCommand::List {
            product_id,
            sort,
            rating,
        } => {
            let rating = rating.map(Rating::new).transpose()?;
            list(&board, &ProductId::new(product_id), sort, rating, ctx)
        }
        ReviewsCommand::Write {
            product_id,
            rating,
            comment,
        } => {
            let auth = ctx.auth()?;
            let author = auth.current_user().map(author_of);
            let review = board.submit(ProductId::new(product_id), author.as_ref(), rating, &comment)?;

            if ctx.output.is_json() {
                ctx.output.json(&json!({ "review": review }));
            } else {
                ctx.output.success("Review submitted");
                ctx.output.review(review);
            }
            Ok(())
        }
    }
}

fn list(
    board: &ReviewBoard,
    product_id: &ProductId,
    sort: ReviewSort,
    rating: Option<Rating>,
    ctx: &Context,
) -> Result<()> {
    let distribution = board.distribution(product_id);
    let reviews = board.for_product(product_id, sort, rating);

    if ctx.output.is_json() {
        let breakdown: serde_json::Map<String, serde_json::Value> = distribution
            .rows()
            .map(|(rating, count)| (rating.stars().to_string(), json!(count)))
            .collect();
        ctx.output.json(&json!({
            "productId": product_id,
            "average": distribution.average(),
            "total": distribution.total(),
            "distribution": breakdown,
            "reviews": reviews,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Reviews for product {}", product_id));
    match distribution.average() {
        Some(average) => ctx.output.kv(
            "rating",
            &format!("{:.1} / 5 from {} reviews", average, distribution.total()),
        ),
        None => {
            ctx.output.info("No reviews yet. Be the first to write one.");
            return Ok(());
        }
    }
    ctx.output.rating_breakdown(&distribution);

    if reviews.is_empty() {
        ctx.output.info("No reviews match that rating");
    }
    for review in reviews {
        ctx.output.review(review);
    }
    Ok(())
}

fn author_of(profile: &UserProfile) -> ReviewAuthor {
    ReviewAuthor {
        name: profile.name.clone(),
        avatar: profile.avatar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teeshack_auth::AuthService;
    use teeshack_cache::Cache;
    use teeshack_commerce::CommerceError;

    #[test]
    fn test_signed_in_user_writes_review() {
        let mut auth = AuthService::restore(Cache::in_memory());
        let profile = auth.login("demo@teeshack.com", "123456").unwrap();
        let author = author_of(&profile);

        let mut board = ReviewBoard::seeded();
        let review = board
            .submit(ProductId::new("1"), Some(&author), 4, "Buena")
            .unwrap();
        assert_eq!(review.user_name, "Usuario Demo");
        assert_eq!(review.user_avatar, profile.avatar);
    }

    #[test]
    fn test_signed_out_user_is_refused() {
        let auth = AuthService::restore(Cache::in_memory());
        let author = auth.current_user().map(author_of);

        let mut board = ReviewBoard::seeded();
        let err = board
            .submit(ProductId::new("1"), author.as_ref(), 4, "Buena")
            .unwrap_err();
        assert!(matches!(err, CommerceError::SignInRequired));
    }
}
