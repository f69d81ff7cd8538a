// Handler for UpdateExtras (VAT, service charge, tip, rounding)
use engine::data::BillStore;
use engine::EngineError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers::{extras_from_message, extras_to_message, parse_bill_id};
use crate::error::status_from;
use crate::services::{ExtrasMessage, UpdateExtrasRequest};

pub async fn handle_update_extras(
    req_payload: UpdateExtrasRequest,
    store: Arc<RwLock<BillStore>>,
) -> Result<Response<ExtrasMessage>, Status> {
    let bill_id = parse_bill_id(&req_payload.bill_id)?;
    let msg = req_payload.extras.ok_or_else(|| {
        status_from(EngineError::ValidationError("extras are required".to_string()))
    })?;
    let extras = extras_from_message(&msg).map_err(status_from)?;

    store
        .write()
        .await
        .update_extras(&bill_id, &extras)
        .map_err(status_from)?;

    tracing::info!(
        bill_id = %bill_id,
        vat_percent = %extras.vat_percent,
        service_percent = %extras.service_percent,
        tip_amount = %extras.tip_amount,
        rounding = ?extras.rounding,
        "Extras updated"
    );
    Ok(Response::new(extras_to_message(&extras)))
}
