// Handlers for AddItem and DeleteItem
use engine::data::{BillStore, NewItem};
use engine::EngineError;
use shared::utils::decimal::parse_decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers::{item_to_message, parse_bill_id};
use crate::error::status_from;
use crate::services::{AddItemRequest, DeleteItemRequest, DeleteResponse, ItemMessage};

pub async fn handle_add_item(
    req_payload: AddItemRequest,
    store: Arc<RwLock<BillStore>>,
) -> Result<Response<ItemMessage>, Status> {
    let bill_id = parse_bill_id(&req_payload.bill_id)?;
    let price = parse_decimal(&req_payload.price)
        .map_err(|e| status_from(EngineError::ValidationError(format!("Invalid price: {}", e))))?;
    let new_item = NewItem {
        name: req_payload.name,
        price,
        quantity: req_payload.quantity,
        sharer_ids: req_payload.sharer_ids,
    };

    let mut guard = store.write().await;
    let item = guard.add_item(&bill_id, &new_item).map_err(status_from)?;
    let bill = guard.snapshot(&bill_id).map_err(status_from)?;
    drop(guard);

    tracing::info!(
        bill_id = %bill_id,
        item_id = item.id,
        price = %item.price,
        quantity = item.quantity,
        sharers = item.sharer_ids.len(),
        "Item added"
    );
    Ok(Response::new(item_to_message(&engine::report::item_details(&item, &bill))))
}

pub async fn handle_delete_item(
    req_payload: DeleteItemRequest,
    store: Arc<RwLock<BillStore>>,
) -> Result<Response<DeleteResponse>, Status> {
    let bill_id = parse_bill_id(&req_payload.bill_id)?;
    store
        .write()
        .await
        .delete_item(&bill_id, req_payload.item_id)
        .map_err(status_from)?;

    tracing::info!(bill_id = %bill_id, item_id = req_payload.item_id, "Item deleted");
    Ok(Response::new(DeleteResponse {
        success: true,
        message: format!("Deleted item {}", req_payload.item_id),
    }))
}
