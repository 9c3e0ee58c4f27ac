//! Field-level validation rules.
//!
//! Each rule checks a single field and either returns the normalized value
//! (trimmed, lowercased where applicable) or a [`ValidationError`] carrying
//! the message shown to the client. Rules never touch storage; uniqueness is
//! checked later by the services.
//!
//! Limits that never varied live in [`limits`]. Limits that differed between
//! deployments come from [`ValidationPolicy`].

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use stockroom_config::ValidationPolicy;
use validator::{ValidateLength, ValidateRange};

use crate::category::CategoryLabel;

pub mod limits {
    use rust_decimal::Decimal;
    use stockroom_config::LengthBounds;

    pub const PRODUCT_NAME: LengthBounds = LengthBounds::new(3, 100);
    pub const CATEGORY_NAME: LengthBounds = LengthBounds::new(1, 100);
    pub const DESCRIPTION_MAX: u64 = 500;
    pub const FULL_NAME_MAX: u64 = 100;
    pub const EMAIL_MAX: u64 = 255;
    /// bcrypt reads at most 72 bytes including its NUL terminator.
    pub const PASSWORD_MAX_BYTES: usize = 71;
    /// 999,999,999
    pub const PRICE_MAX: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 0);
    pub const QUANTITY_MIN: i64 = 0;
    pub const QUANTITY_MAX: i64 = 99_999;
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("Invalid username regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type RuleResult<T> = Result<T, ValidationError>;

/// Trims `value`, treating blank input as absent.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn required<'a>(value: Option<&'a str>, message: &str) -> RuleResult<&'a str> {
    present(value).ok_or_else(|| ValidationError::new(message))
}

/// Rejects NUL, which text columns cannot store.
pub fn printable<'a>(value: &'a str, field: &str) -> RuleResult<&'a str> {
    if value.contains('\0') {
        return Err(ValidationError::new(format!(
            "{field} contains invalid characters"
        )));
    }
    Ok(value)
}

fn within(value: &str, min: Option<u64>, max: Option<u64>) -> bool {
    value.validate_length(min, max, None)
}

pub fn email(value: &str) -> RuleResult<String> {
    let trimmed = value.trim();
    if !within(trimmed, None, Some(limits::EMAIL_MAX)) {
        return Err(ValidationError::new(format!(
            "Email must not exceed {} characters",
            limits::EMAIL_MAX
        )));
    }
    if !EMAIL_RE.is_match(trimmed) {
        return Err(ValidationError::new("Invalid email format"));
    }
    Ok(trimmed.to_lowercase())
}

pub fn username(value: &str, policy: &ValidationPolicy) -> RuleResult<String> {
    let trimmed = value.trim();
    let bounds = policy.username;
    if !within(trimmed, Some(bounds.min), Some(bounds.max)) {
        return Err(ValidationError::new(format!(
            "Username must be between {} and {} characters",
            bounds.min, bounds.max
        )));
    }
    if !USERNAME_RE.is_match(trimmed) {
        return Err(ValidationError::new(
            "Username can only contain letters, numbers, dots, hyphens, and underscores",
        ));
    }
    Ok(trimmed.to_string())
}

/// Passwords are checked as typed; whitespace is significant.
pub fn password(value: &str, policy: &ValidationPolicy) -> RuleResult<()> {
    let bounds = policy.password;
    if !within(value, Some(bounds.min), Some(bounds.max)) {
        return Err(ValidationError::new(format!(
            "Password must be between {} and {} characters",
            bounds.min, bounds.max
        )));
    }
    if value.len() > limits::PASSWORD_MAX_BYTES {
        return Err(ValidationError::new(format!(
            "Password must not exceed {} bytes",
            limits::PASSWORD_MAX_BYTES
        )));
    }
    if !value.chars().any(char::is_alphabetic) {
        return Err(ValidationError::new(
            "Password must contain at least one letter",
        ));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("Password must contain at least one digit"));
    }
    Ok(())
}

pub fn full_name(value: &str) -> RuleResult<String> {
    let trimmed = printable(value.trim(), "Full name")?;
    if !within(trimmed, None, Some(limits::FULL_NAME_MAX)) {
        return Err(ValidationError::new(format!(
            "Full name must not exceed {} characters",
            limits::FULL_NAME_MAX
        )));
    }
    Ok(trimmed.to_string())
}

pub fn product_name(value: Option<&str>) -> RuleResult<String> {
    let name = printable(required(value, "Product name is required")?, "Product name")?;
    let bounds = limits::PRODUCT_NAME;
    if !within(name, Some(bounds.min), Some(bounds.max)) {
        return Err(ValidationError::new(format!(
            "Product name must be between {} and {} characters",
            bounds.min, bounds.max
        )));
    }
    Ok(name.to_string())
}

/// Optional free text; blank input is stored as absent.
pub fn description(value: Option<&str>) -> RuleResult<Option<String>> {
    match present(value) {
        None => Ok(None),
        Some(text) if text.contains('\0') => {
            Err(ValidationError::new("Description contains invalid characters"))
        }
        Some(text) if !within(text, None, Some(limits::DESCRIPTION_MAX)) => {
            Err(ValidationError::new(format!(
                "Description must not exceed {} characters",
                limits::DESCRIPTION_MAX
            )))
        }
        Some(text) => Ok(Some(text.to_string())),
    }
}

pub fn price(value: Option<Decimal>) -> RuleResult<Decimal> {
    let price = value.ok_or_else(|| ValidationError::new("Price is required"))?;
    if price <= Decimal::ZERO {
        return Err(ValidationError::new("Price must be greater than 0"));
    }
    if price > limits::PRICE_MAX {
        return Err(ValidationError::new("Price must not exceed 999,999,999"));
    }
    Ok(price)
}

pub fn quantity(value: Option<i64>) -> RuleResult<i32> {
    let quantity = value.ok_or_else(|| ValidationError::new("Quantity is required"))?;
    if !quantity.validate_range(Some(limits::QUANTITY_MIN), None, None, None) {
        return Err(ValidationError::new(
            "Quantity must be greater than or equal to 0",
        ));
    }
    if !quantity.validate_range(None, Some(limits::QUANTITY_MAX), None, None) {
        return Err(ValidationError::new("Quantity must not exceed 99,999"));
    }
    i32::try_from(quantity).map_err(|_| ValidationError::new("Quantity must not exceed 99,999"))
}

pub fn category_label(value: Option<&str>) -> RuleResult<CategoryLabel> {
    let raw = required(value, "Category is required")?;
    CategoryLabel::parse(raw).map_err(|e| ValidationError::new(e.to_string()))
}

pub fn category_name(value: Option<&str>) -> RuleResult<String> {
    let name = printable(required(value, "Category name is required")?, "Category name")?;
    if !within(name, None, Some(limits::CATEGORY_NAME.max)) {
        return Err(ValidationError::new(format!(
            "Category name must not exceed {} characters",
            limits::CATEGORY_NAME.max
        )));
    }
    Ok(name.to_string())
}
