//! Output formatting for the CLI.

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use teeshack_commerce::cart::{CartPricing, LineItem};
use teeshack_commerce::reviews::{RatingDistribution, Review};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn human(&self) -> bool {
        !self.json
    }

    fn status(&self, badge: StyledObject<&str>, msg: &str) {
        if self.human() {
            println!("{} {}", badge, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.status(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.status(style("✓").green(), msg);
    }

    /// Warnings go to stderr so they survive piping.
    pub fn warn(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Errors are reported in both modes; JSON mode emits `{"error": ..}`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && self.human() {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if self.human() {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Pretty-printed JSON on stdout, whatever the mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!(error = %e, "failed to render JSON output"),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.human() {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    fn row(&self, cells: &[&str], widths: &[usize]) {
        let mut line = String::from(" ");
        for (cell, width) in cells.iter().zip(widths) {
            line.push(' ');
            line.push_str(&format!("{:<width$} ", cell, width = *width));
        }
        println!("{}", line.trim_end());
    }

    /// Print cart lines as a table.
    pub fn line_items(&self, items: &[LineItem]) {
        const WIDTHS: [usize; 6] = [6, 24, 10, 4, 10, 10];

        if !self.human() {
            return;
        }
        self.row(&["ID", "PRODUCT", "VARIANT", "QTY", "PRICE", "TOTAL"], &WIDTHS);
        for item in items {
            let variant = item.variant.to_string();
            let quantity = item.quantity.to_string();
            let price = item.unit_price.display();
            let total = item.line_total().display();
            self.row(
                &[
                    item.product_id.as_str(),
                    item.name.as_str(),
                    variant.as_str(),
                    quantity.as_str(),
                    price.as_str(),
                    total.as_str(),
                ],
                &WIDTHS,
            );
        }
    }

    /// Print the order summary block.
    pub fn summary(&self, pricing: &CartPricing) {
        self.kv("items", &pricing.item_count.to_string());
        self.kv("subtotal", &pricing.subtotal.display());
        let shipping = if pricing.has_free_shipping() {
            style("free").green().to_string()
        } else {
            pricing.shipping.display()
        };
        self.kv("shipping", &shipping);
        self.kv("tax", &pricing.tax.display());
        self.kv("total", &style(pricing.grand_total.display()).bold().to_string());
    }

    /// Star breakdown with a bar per rating.
    pub fn rating_breakdown(&self, distribution: &RatingDistribution) {
        const BAR_WIDTH: usize = 20;

        if !self.human() {
            return;
        }
        for (rating, count) in distribution.rows() {
            let filled = (distribution.percentage(rating) / 100.0 * BAR_WIDTH as f64).round() as usize;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)));
            println!("  {} {} {}", rating.stars(), style(bar).yellow(), style(count).dim());
        }
    }

    pub fn review(&self, review: &Review) {
        if !self.human() {
            return;
        }
        let mut heading = format!(
            "{} {} {}",
            style(review.rating).yellow(),
            style(&review.user_name).bold(),
            style(review.date).dim()
        );
        if review.verified {
            heading.push_str(&format!(" {}", style("verified purchase").green()));
        }
        println!("\n  {}", heading);
        println!("  {}", review.comment);
        println!("  {}", style(format!("helpful ({})", review.helpful)).dim());
    }

    /// Spinner for the simulated network calls; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if !self.human() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}
