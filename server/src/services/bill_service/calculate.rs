// Handler for the stateless CalculateBill RPC
use engine::config::ValidationLimits;
use engine::data::validation::{validate_extras, validate_line};
use engine::EngineError;
use shared::models::Bill;
use shared::utils::decimal::format_decimal;
use std::collections::HashSet;
use tonic::{Response, Status};

use super::helpers::{extras_from_message, item_from_message, person_from_message, summary_to_message};
use crate::error::status_from;
use crate::services::{CalculateBillRequest, CalculateBillResponse};

fn build_bill(req_payload: &CalculateBillRequest, limits: &ValidationLimits) -> Result<Bill, EngineError> {
    let mut bill = Bill::new("adhoc");
    if let Some(msg) = &req_payload.extras {
        let extras = extras_from_message(msg)?;
        validate_extras(&extras, limits)?;
        bill.apply_extras(&extras);
    }

    bill.people = req_payload.people.iter().map(person_from_message).collect();
    bill.items = req_payload
        .items
        .iter()
        .map(item_from_message)
        .collect::<Result<Vec<_>, _>>()?;

    // Summaries are keyed by id, so ids must be unique within the bill.
    let mut person_ids = HashSet::with_capacity(bill.people.len());
    if let Some(person) = bill.people.iter().find(|p| !person_ids.insert(p.id)) {
        return Err(EngineError::ValidationError(format!("Duplicate person id {}", person.id)));
    }
    let mut item_ids = HashSet::with_capacity(bill.items.len());
    if let Some(item) = bill.items.iter().find(|i| !item_ids.insert(i.id)) {
        return Err(EngineError::ValidationError(format!("Duplicate item id {}", item.id)));
    }

    for item in &bill.items {
        validate_line(item.price, item.quantity, limits).map_err(|e| match e {
            EngineError::ValidationError(msg) => EngineError::ValidationError(format!("Item {}: {}", item.id, msg)),
            other => other,
        })?;
    }
    Ok(bill)
}

pub async fn handle_calculate_bill(
    req_payload: CalculateBillRequest,
    limits: &ValidationLimits,
) -> Result<Response<CalculateBillResponse>, Status> {
    let bill = build_bill(&req_payload, limits).map_err(status_from)?;
    let summary = engine::summarize(&bill);

    tracing::debug!(
        people = bill.people.len(),
        items = bill.items.len(),
        bill_total = %summary.bill_total,
        "Calculated ad-hoc bill"
    );
    Ok(Response::new(CalculateBillResponse {
        summaries: summary.summaries.iter().map(summary_to_message).collect(),
        bill_total: format_decimal(summary.bill_total),
    }))
}
