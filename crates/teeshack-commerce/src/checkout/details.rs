//! Checkout form data and validation.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Default destination country.
pub const DEFAULT_COUNTRY: &str = "España";

/// Card details as entered. Only presence is checked; nothing is charged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    /// Last four digits of the card number.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

/// Everything the shopper fills in before placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub card: CardDetails,
    pub accept_terms: bool,
}

impl Default for CheckoutDetails {
    fn default() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            phone: String::new(),
            card: CardDetails::default(),
            accept_terms: false,
        }
    }
}

impl CheckoutDetails {
    /// Details pre-filled from a signed-in shopper.
    ///
    /// The first word of `full_name` becomes the first name and the second
    /// word, if any, the last name.
    pub fn prefilled(email: impl Into<String>, full_name: &str) -> Self {
        let mut words = full_name.split_whitespace();
        Self {
            email: email.into(),
            first_name: words.next().unwrap_or_default().to_string(),
            last_name: words.next().unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// Check that the form can be submitted.
    ///
    /// Terms are checked first, then required fields in form order.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !self.accept_terms {
            return Err(CommerceError::TermsNotAccepted);
        }

        let required = [
            ("email", &self.email),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
            ("phone", &self.phone),
            ("card_number", &self.card.number),
            ("card_expiry", &self.card.expiry),
            ("card_cvv", &self.card.cvv),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(CommerceError::MissingField(*field));
        }

        if !is_plausible_email(&self.email) {
            return Err(CommerceError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }

    /// Single-line shipping address for confirmations.
    pub fn ship_to(&self) -> String {
        format!(
            "{} {}, {}, {} {}, {}",
            self.first_name, self.last_name, self.address, self.postal_code, self.city, self.country
        )
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> CheckoutDetails {
        CheckoutDetails {
            email: "demo@teeshack.com".to_string(),
            first_name: "Usuario".to_string(),
            last_name: "Demo".to_string(),
            address: "Calle Mayor 1".to_string(),
            city: "Madrid".to_string(),
            postal_code: "28013".to_string(),
            phone: "+34 600 000 000".to_string(),
            card: CardDetails {
                number: "4242 4242 4242 4242".to_string(),
                expiry: "12/30".to_string(),
                cvv: "123".to_string(),
            },
            accept_terms: true,
            ..CheckoutDetails::default()
        }
    }

    #[test]
    fn test_complete_details_validate() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_terms_required() {
        let details = CheckoutDetails {
            accept_terms: false,
            ..complete()
        };
        assert!(matches!(details.validate(), Err(CommerceError::TermsNotAccepted)));
    }

    #[test]
    fn test_blank_field_reported() {
        let details = CheckoutDetails {
            city: "  ".to_string(),
            ..complete()
        };
        assert!(matches!(details.validate(), Err(CommerceError::MissingField("city"))));
    }

    #[test]
    fn test_email_needs_at_sign() {
        let details = CheckoutDetails {
            email: "demo.teeshack.com".to_string(),
            ..complete()
        };
        assert!(matches!(details.validate(), Err(CommerceError::InvalidEmail(_))));
    }

    #[test]
    fn test_prefilled_splits_name() {
        let details = CheckoutDetails::prefilled("demo@teeshack.com", "Usuario Demo");
        assert_eq!(details.first_name, "Usuario");
        assert_eq!(details.last_name, "Demo");
        assert_eq!(details.country, DEFAULT_COUNTRY);

        let single = CheckoutDetails::prefilled("admin@teeshack.com", "Administrador");
        assert_eq!(single.last_name, "");
    }

    #[test]
    fn test_last_four() {
        assert_eq!(complete().card.last_four(), "4242");
        let short = CardDetails {
            number: "12".to_string(),
            ..CardDetails::default()
        };
        assert_eq!(short.last_four(), "12");
    }
}
