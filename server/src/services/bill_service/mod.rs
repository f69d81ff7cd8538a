// BillSplitter gRPC service: the struct holding shared state, the trait impl
// that logs each request and dispatches it, and the per-concern handler modules.
use super::{
    AddItemRequest, AddPersonRequest, BillDetailsResponse, BillSplitter, CalculateBillRequest,
    CalculateBillResponse, CreateBillRequest, CreateBillResponse, DeleteBillRequest,
    DeleteItemRequest, DeletePersonRequest, DeleteResponse, ExtrasMessage, GetBillRequest,
    ItemMessage, ListBillsRequest, PersonMessage, ProtoBillListEntry, UpdateExtrasRequest,
};
use engine::config::ValidationLimits;
use engine::data::BillStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

pub mod bills;
pub mod calculate;
pub mod extras;
pub mod helpers;
pub mod items;
pub mod people;

pub struct BillSplitterService {
    store: Arc<RwLock<BillStore>>,
    limits: ValidationLimits,
}

impl BillSplitterService {
    pub fn new(store: Arc<RwLock<BillStore>>, limits: ValidationLimits) -> Self {
        BillSplitterService { store, limits }
    }
}

#[tonic::async_trait]
impl BillSplitter for BillSplitterService {
    async fn create_bill(&self, request: Request<CreateBillRequest>) -> Result<Response<CreateBillResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(title = %req_payload.title, "Received CreateBillRequest");
        bills::handle_create_bill(req_payload, self.store.clone()).await
    }

    type ListBillsStream = ReceiverStream<Result<ProtoBillListEntry, Status>>;
    async fn list_bills(&self, _request: Request<ListBillsRequest>) -> Result<Response<Self::ListBillsStream>, Status> {
        tracing::info!("Received ListBillsRequest");
        bills::handle_list_bills(self.store.clone()).await
    }

    async fn get_bill(&self, request: Request<GetBillRequest>) -> Result<Response<BillDetailsResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(bill_id = %req_payload.bill_id, "Received GetBillRequest");
        bills::handle_get_bill(req_payload, self.store.clone()).await
    }

    async fn delete_bill(&self, request: Request<DeleteBillRequest>) -> Result<Response<DeleteResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(bill_id = %req_payload.bill_id, "Received DeleteBillRequest");
        bills::handle_delete_bill(req_payload, self.store.clone()).await
    }

    async fn add_person(&self, request: Request<AddPersonRequest>) -> Result<Response<PersonMessage>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(bill_id = %req_payload.bill_id, name = %req_payload.name, "Received AddPersonRequest");
        people::handle_add_person(req_payload, self.store.clone()).await
    }

    async fn delete_person(&self, request: Request<DeletePersonRequest>) -> Result<Response<DeleteResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            bill_id = %req_payload.bill_id,
            person_id = req_payload.person_id,
            "Received DeletePersonRequest"
        );
        people::handle_delete_person(req_payload, self.store.clone()).await
    }

    async fn add_item(&self, request: Request<AddItemRequest>) -> Result<Response<ItemMessage>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            bill_id = %req_payload.bill_id,
            name = %req_payload.name,
            price = %req_payload.price,
            quantity = req_payload.quantity,
            sharer_ids = ?req_payload.sharer_ids,
            "Received AddItemRequest"
        );
        items::handle_add_item(req_payload, self.store.clone()).await
    }

    async fn delete_item(&self, request: Request<DeleteItemRequest>) -> Result<Response<DeleteResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(bill_id = %req_payload.bill_id, item_id = req_payload.item_id, "Received DeleteItemRequest");
        items::handle_delete_item(req_payload, self.store.clone()).await
    }

    async fn update_extras(&self, request: Request<UpdateExtrasRequest>) -> Result<Response<ExtrasMessage>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(bill_id = %req_payload.bill_id, extras = ?req_payload.extras, "Received UpdateExtrasRequest");
        extras::handle_update_extras(req_payload, self.store.clone()).await
    }

    async fn calculate_bill(&self, request: Request<CalculateBillRequest>) -> Result<Response<CalculateBillResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            people = req_payload.people.len(),
            items = req_payload.items.len(),
            "Received CalculateBillRequest"
        );
        calculate::handle_calculate_bill(req_payload, &self.limits).await
    }
}
