// Generated protobuf types and the BillSplitter service implementation
pub mod billsplitter {
    tonic::include_proto!("billsplitter");
}

pub use billsplitter::bill_splitter_server::{BillSplitter, BillSplitterServer};
pub use billsplitter::{
    AddItemRequest, AddPersonRequest, BillDetailsResponse, BillListEntry as ProtoBillListEntry,
    CalculateBillRequest, CalculateBillResponse, CreateBillRequest, CreateBillResponse,
    DeleteBillRequest, DeleteItemRequest, DeletePersonRequest, DeleteResponse, ExtrasMessage,
    GetBillRequest, ItemMessage, ListBillsRequest, PersonMessage, PersonSummaryMessage,
    UpdateExtrasRequest,
};

pub mod bill_service;
