// Handlers for the bill-level RPCs: CreateBill, ListBills, GetBill, DeleteBill
use engine::data::BillStore;
use shared::utils::decimal::format_decimal;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};

use super::helpers::{extras_to_message, item_to_message, parse_bill_id, person_to_message, summary_to_message};
use crate::error::status_from;
use crate::services::{
    BillDetailsResponse, CreateBillRequest, CreateBillResponse, DeleteBillRequest, DeleteResponse,
    GetBillRequest, ProtoBillListEntry,
};

pub async fn handle_create_bill(
    req_payload: CreateBillRequest,
    store: Arc<RwLock<BillStore>>,
) -> Result<Response<CreateBillResponse>, Status> {
    let mut guard = store.write().await;
    let bill_id = guard.create_bill(&req_payload.title).map_err(status_from)?;
    let title = guard.snapshot(&bill_id).map_err(status_from)?.title;
    drop(guard);

    tracing::info!(bill_id = %bill_id, title = %title, "Bill created");
    Ok(Response::new(CreateBillResponse { id: bill_id.to_string(), title }))
}

pub async fn handle_list_bills(
    store: Arc<RwLock<BillStore>>,
) -> Result<Response<ReceiverStream<Result<ProtoBillListEntry, Status>>>, Status> {
    let bills = store.read().await.list_bills();
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let total = bills.len();
        for bill in bills {
            let entry = ProtoBillListEntry {
                id: bill.id.to_string(),
                title: bill.title,
                created_at: bill.created_at.timestamp_millis(),
                people_count: bill.people_count as u32,
                item_count: bill.item_count as u32,
            };
            if let Err(e) = tx.send(Ok(entry)).await {
                tracing::warn!(error = ?e, "ListBills receiver dropped before stream finished");
                return;
            }
        }
        tracing::debug!(count = total, "Streamed bill list");
    });

    Ok(Response::new(ReceiverStream::new(rx)))
}

/// Details plus the freshly calculated per-person split.
pub async fn handle_get_bill(
    req_payload: GetBillRequest,
    store: Arc<RwLock<BillStore>>,
) -> Result<Response<BillDetailsResponse>, Status> {
    let bill_id = parse_bill_id(&req_payload.bill_id)?;
    // Snapshot under the read lock, calculate after releasing it.
    let bill = store.read().await.snapshot(&bill_id).map_err(status_from)?;
    let details = engine::report::bill_details(&bill);

    Ok(Response::new(BillDetailsResponse {
        id: details.id.to_string(),
        title: details.title,
        created_at: details.created_at.timestamp_millis(),
        extras: Some(extras_to_message(&details.extras)),
        people: details.people.iter().map(person_to_message).collect(),
        items: details.items.iter().map(item_to_message).collect(),
        summaries: details.summaries.iter().map(summary_to_message).collect(),
        bill_total: format_decimal(details.bill_total),
    }))
}

pub async fn handle_delete_bill(
    req_payload: DeleteBillRequest,
    store: Arc<RwLock<BillStore>>,
) -> Result<Response<DeleteResponse>, Status> {
    let bill_id = parse_bill_id(&req_payload.bill_id)?;
    store.write().await.delete_bill(&bill_id).map_err(status_from)?;

    tracing::info!(bill_id = %bill_id, "Bill deleted");
    Ok(Response::new(DeleteResponse {
        success: true,
        message: format!("Deleted bill {}", bill_id),
    }))
}
