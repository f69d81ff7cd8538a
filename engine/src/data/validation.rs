// Request validation, run before anything reaches the store or the allocator
use rust_decimal::Decimal;
use shared::models::{Extras, PersonId};

use crate::config::ValidationLimits;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
    pub name: String,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub sharer_ids: Vec<PersonId>,
}

fn invalid(msg: impl Into<String>) -> EngineError {
    EngineError::ValidationError(msg.into())
}

fn required_text(value: &str, field: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!("{} is required", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(invalid(format!("{} must be at most {} characters", field, max_len)));
    }
    Ok(trimmed.to_string())
}

/// Returns the trimmed title.
pub fn validate_title(title: &str, limits: &ValidationLimits) -> Result<String> {
    required_text(title, "Bill title", limits.max_title_len)
}

/// Trims the name and drops a blank instagram handle.
pub fn validate_person(person: &NewPerson, limits: &ValidationLimits) -> Result<NewPerson> {
    let name = required_text(&person.name, "Name", limits.max_name_len)?;
    let instagram = match person.instagram.as_deref().map(str::trim) {
        Some(handle) if !handle.is_empty() => {
            if handle.chars().count() > limits.max_instagram_len {
                return Err(invalid(format!(
                    "Instagram must be at most {} characters",
                    limits.max_instagram_len
                )));
            }
            Some(handle.to_string())
        }
        _ => None,
    };
    Ok(NewPerson { name, instagram })
}

fn min_price() -> Decimal {
    Decimal::new(1, 2)
}

/// Checks one item's price and quantity and returns its line total.
/// The total is bounded so later surcharge and rounding arithmetic cannot overflow.
pub fn validate_line(price: Decimal, quantity: u32, limits: &ValidationLimits) -> Result<Decimal> {
    if price < min_price() {
        return Err(invalid(format!("Price must be at least {}", min_price())));
    }
    if quantity < 1 {
        return Err(invalid("Quantity must be at least 1"));
    }
    let max_amount = Decimal::from(limits.max_amount);
    match price.checked_mul(Decimal::from(quantity)) {
        Some(total) if total <= max_amount => Ok(total),
        _ => Err(invalid(format!("Item total must not exceed {}", max_amount))),
    }
}

pub fn validate_item(item: &NewItem, limits: &ValidationLimits) -> Result<NewItem> {
    let name = required_text(&item.name, "Item name", limits.max_item_name_len)?;
    validate_line(item.price, item.quantity, limits)?;
    if item.sharer_ids.is_empty() {
        return Err(invalid("Select at least one person to share the item"));
    }
    Ok(NewItem { name, ..item.clone() })
}

pub fn validate_extras(extras: &Extras, limits: &ValidationLimits) -> Result<()> {
    let max_percent = Decimal::from(limits.max_percent);
    for (label, value) in [("VAT", extras.vat_percent), ("Service charge", extras.service_percent)] {
        if value < Decimal::ZERO || value > max_percent {
            return Err(invalid(format!("{} must be between 0 and {}%", label, max_percent)));
        }
    }
    if extras.tip_amount < Decimal::ZERO {
        return Err(invalid("Tip must not be negative"));
    }
    if extras.tip_amount > Decimal::from(limits.max_amount) {
        return Err(invalid(format!("Tip must not exceed {}", limits.max_amount)));
    }
    Ok(())
}
