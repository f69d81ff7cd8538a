// Views over calculated bills: the details page model and CSV tables
pub mod csv_export;
pub mod details;

pub use csv_export::{export_summaries_csv, write_summaries_csv};
pub use details::{bill_details, bill_details_json, item_details};
