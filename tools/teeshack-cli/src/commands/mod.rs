//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod reviews;

use clap::{Args, Subcommand};
use teeshack_commerce::reviews::ReviewSort;

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

/// Identifies one cart line.
#[derive(Args)]
pub struct LineArgs {
    /// Product ID.
    pub product_id: String,

    /// Size of the variant.
    #[arg(long)]
    pub size: String,

    /// Colour of the variant.
    #[arg(long)]
    pub color: String,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart contents (default).
    Show,
    /// Add one unit of a product variant.
    Add {
        #[command(flatten)]
        line: LineArgs,

        /// Product name.
        #[arg(short, long)]
        name: String,

        /// Unit price in major units (e.g. 19.99).
        #[arg(short, long)]
        price: f64,

        /// Product image URL.
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Set the quantity of a line. Zero or less removes it.
    Update {
        #[command(flatten)]
        line: LineArgs,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Open the cart drawer: contents plus order summary.
    Open,
    /// Close the cart drawer.
    Close,
}

/// Arguments for the checkout command.
///
/// Contact fields default to the signed-in user's profile.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub postal_code: String,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub phone: String,

    /// Card number.
    #[arg(long)]
    pub card_number: String,

    /// Card expiry (MM/YY).
    #[arg(long)]
    pub card_expiry: String,

    #[arg(long)]
    pub card_cvv: String,

    /// Accept the terms and conditions.
    #[arg(long)]
    pub accept_terms: bool,
}

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in.
    Login {
        #[arg(short, long)]
        email: String,

        /// Password (prompted when omitted).
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and sign in.
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Password (prompted when omitted).
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out.
    Logout,
    /// Show the signed-in user.
    Whoami,
}

/// Arguments for the reviews command.
#[derive(Args)]
pub struct ReviewsArgs {
    #[command(subcommand)]
    pub command: ReviewsCommand,
}

#[derive(Subcommand)]
pub enum ReviewsCommand {
    /// Show a product's rating breakdown and reviews.
    List {
        /// Product ID.
        product_id: String,

        /// newest, oldest, highest, lowest or helpful.
        #[arg(short, long, default_value = "newest")]
        sort: ReviewSort,

        /// Only reviews with this many stars.
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,
    },
    /// Review a product as the signed-in user.
    Write {
        /// Product ID.
        product_id: String,

        /// Stars, 1 to 5.
        #[arg(short, long)]
        rating: u8,

        #[arg(short = 'm', long)]
        comment: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
