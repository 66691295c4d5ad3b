//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, normalized
//! emails, E.164 phone numbers) so that once a value reaches the domain layer
//! it can be treated as trusted.
use std::fmt::{Display, Formatter};

use phonenumber::Mode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(CompanyId, "Unique identifier for a company (tenant).");
id_newtype!(ChatId, "Unique identifier for a WhatsApp chat.");
id_newtype!(ClientId, "Unique identifier for an end client.");
id_newtype!(ProductId, "Unique identifier for a catalog product.");
id_newtype!(PlanId, "Unique identifier for a subscription plan.");
id_newtype!(CouponId, "Unique identifier for a discount coupon.");
id_newtype!(AffiliateId, "Unique identifier for an affiliate partner.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        Ok(Self(normalize_email(email)?))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// WhatsApp phone number normalized to E.164.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WhatsAppPhone(String);

impl WhatsAppPhone {
    /// Parses and normalizes a phone number, defaulting to the BR region.
    pub fn new(raw: &str) -> Result<Self, TypeConstraintError> {
        let parsed = phonenumber::parse(Some(phonenumber::country::BR), raw)
            .map_err(|_| TypeConstraintError::InvalidPhone)?;
        if !phonenumber::is_valid(&parsed) {
            return Err(TypeConstraintError::InvalidPhone);
        }
        Ok(Self(parsed.format().mode(Mode::E164).to_string()))
    }

    /// Borrow the number as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for WhatsAppPhone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated absolute URL, e.g. the company's outbound webhook.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookUrl(String);

impl WebhookUrl {
    pub fn new<S: Into<String>>(url: S) -> Result<Self, TypeConstraintError> {
        let url = url.into().trim().to_string();
        if url.validate_url() {
            Ok(Self(url))
        } else {
            Err(TypeConstraintError::InvalidUrl)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Free text entered by users, stripped of any HTML markup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SafeText(String);

impl SafeText {
    /// Sanitizes the input and trims surrounding whitespace.
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        let clean = ammonia::Builder::empty()
            .clean(raw.as_ref())
            .to_string()
            .trim()
            .to_string();
        Self(clean)
    }

    /// Like [`SafeText::new`] but rejects values that sanitize to nothing.
    pub fn non_empty<S: AsRef<str>>(raw: S) -> Result<Self, TypeConstraintError> {
        let text = Self::new(raw);
        if text.0.is_empty() {
            Err(TypeConstraintError::EmptyString)
        } else {
            Ok(text)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SafeText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_newtype_rejects_non_positive() {
        assert!(CompanyId::new(1).is_ok());
        assert_eq!(CompanyId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ChatId::new(-5), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn email_is_normalized() {
        let email = EmailAddress::new("  User@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
        assert!(EmailAddress::new("not-an-email").is_err());
    }

    #[test]
    fn phone_is_normalized_to_e164() {
        let phone = WhatsAppPhone::new("(11) 98765-4321").unwrap();
        assert_eq!(phone.as_str(), "+5511987654321");
        assert!(WhatsAppPhone::new("123").is_err());
    }

    #[test]
    fn safe_text_strips_markup() {
        let text = SafeText::new("<script>alert(1)</script>ola ");
        assert_eq!(text.as_str(), "ola");
        assert!(SafeText::non_empty("<b></b>").is_err());
    }

    #[test]
    fn webhook_url_requires_absolute_url() {
        assert!(WebhookUrl::new("https://hooks.example.com/wa").is_ok());
        assert!(WebhookUrl::new("not a url").is_err());
    }
}
