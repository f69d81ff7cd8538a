// Conversions between protobuf messages and domain models
use engine::EngineError;
use shared::models::{BillId, Extras, Item, ItemDetails, Person, PersonSummary, RoundingMode};
use shared::utils::decimal::{format_decimal, parse_decimal, parse_decimal_or_zero};
use tonic::Status;

use crate::services::{ExtrasMessage, ItemMessage, PersonMessage, PersonSummaryMessage};

pub fn parse_bill_id(raw: &str) -> Result<BillId, Status> {
    raw.trim()
        .parse::<BillId>()
        .map_err(|e| Status::invalid_argument(format!("Invalid bill id '{}': {}", raw, e)))
}

/// Blank amounts count as zero; unknown rounding units are rejected.
pub fn extras_from_message(msg: &ExtrasMessage) -> Result<Extras, EngineError> {
    let field = |label: &str, raw: &str| {
        parse_decimal_or_zero(raw)
            .map_err(|e| EngineError::ValidationError(format!("Invalid {}: {}", label, e)))
    };
    Ok(Extras {
        vat_percent: field("VAT percent", &msg.vat_percent)?,
        service_percent: field("service percent", &msg.service_percent)?,
        tip_amount: field("tip amount", &msg.tip_amount)?,
        rounding: RoundingMode::try_from(msg.rounding_unit)
            .map_err(|e| EngineError::ValidationError(e.to_string()))?,
    })
}

pub fn extras_to_message(extras: &Extras) -> ExtrasMessage {
    ExtrasMessage {
        vat_percent: format_decimal(extras.vat_percent),
        service_percent: format_decimal(extras.service_percent),
        tip_amount: format_decimal(extras.tip_amount),
        rounding_unit: extras.rounding.into(),
    }
}

pub fn person_to_message(person: &Person) -> PersonMessage {
    PersonMessage {
        id: person.id,
        name: person.name.clone(),
        instagram: person.instagram.clone().unwrap_or_default(),
    }
}

pub fn person_from_message(msg: &PersonMessage) -> Person {
    let instagram = msg.instagram.trim();
    Person {
        id: msg.id,
        name: msg.name.clone(),
        instagram: (!instagram.is_empty()).then(|| instagram.to_string()),
    }
}

pub fn item_to_message(details: &ItemDetails) -> ItemMessage {
    ItemMessage {
        id: details.id,
        name: details.name.clone(),
        price: format_decimal(details.price),
        quantity: details.quantity,
        total: format_decimal(details.total),
        sharer_ids: details.sharer_ids.clone(),
        shared_with: details.shared_with.clone(),
    }
}

pub fn item_from_message(msg: &ItemMessage) -> Result<Item, EngineError> {
    let price = parse_decimal(&msg.price)
        .map_err(|e| EngineError::ValidationError(format!("Invalid price for item {}: {}", msg.id, e)))?;
    Ok(Item {
        id: msg.id,
        name: msg.name.clone(),
        price,
        quantity: msg.quantity,
        sharer_ids: msg.sharer_ids.clone(),
    })
}

pub fn summary_to_message(summary: &PersonSummary) -> PersonSummaryMessage {
    PersonSummaryMessage {
        person_id: summary.person_id,
        name: summary.name.clone(),
        subtotal: format_decimal(summary.subtotal),
        vat_share: format_decimal(summary.vat_share),
        service_share: format_decimal(summary.service_share),
        tip_share: format_decimal(summary.tip_share),
        grand_total: format_decimal(summary.grand_total),
        rounded_total: format_decimal(summary.rounded_total),
    }
}
