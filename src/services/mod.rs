//! Application service layer.
//!
//! Services orchestrate store operations that sit outside the paginated
//! views, such as moving spreadsheets in and out of the store.

mod transfer_service;

pub use transfer_service::{
    ExportReceipt, TransferService, TransferServiceImpl, SPREADSHEET_EXTENSIONS,
};
