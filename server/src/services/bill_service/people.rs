// Handlers for AddPerson and DeletePerson
use engine::data::{BillStore, NewPerson};
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers::{parse_bill_id, person_to_message};
use crate::error::status_from;
use crate::services::{AddPersonRequest, DeletePersonRequest, DeleteResponse, PersonMessage};

pub async fn handle_add_person(
    req_payload: AddPersonRequest,
    store: Arc<RwLock<BillStore>>,
) -> Result<Response<PersonMessage>, Status> {
    let bill_id = parse_bill_id(&req_payload.bill_id)?;
    let new_person = NewPerson {
        name: req_payload.name,
        instagram: Some(req_payload.instagram),
    };

    let person = store
        .write()
        .await
        .add_person(&bill_id, &new_person)
        .map_err(status_from)?;

    tracing::info!(bill_id = %bill_id, person_id = person.id, name = %person.name, "Person added");
    Ok(Response::new(person_to_message(&person)))
}

/// Also removes the person from every item they were sharing.
pub async fn handle_delete_person(
    req_payload: DeletePersonRequest,
    store: Arc<RwLock<BillStore>>,
) -> Result<Response<DeleteResponse>, Status> {
    let bill_id = parse_bill_id(&req_payload.bill_id)?;
    store
        .write()
        .await
        .delete_person(&bill_id, req_payload.person_id)
        .map_err(status_from)?;

    tracing::info!(bill_id = %bill_id, person_id = req_payload.person_id, "Person deleted");
    Ok(Response::new(DeleteResponse {
        success: true,
        message: format!("Deleted person {}", req_payload.person_id),
    }))
}
