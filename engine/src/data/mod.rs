pub mod bill_store;
pub mod validation;

pub use bill_store::BillStore;
pub use validation::{NewItem, NewPerson};
