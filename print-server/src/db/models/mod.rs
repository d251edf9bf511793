//! Database Models

// Serde helpers
pub mod serde_helpers;

// Printer Domain
pub mod printer;
pub mod printer_credential;
pub mod printer_type;

// Print Jobs
pub mod print_job;

// Re-exports
pub use printer::{Printer, PrinterCreate, PrinterId, PrinterResponse, PrinterUpdate};
pub use printer_credential::{
    PrinterCredential, PrinterCredentialCreate, PrinterCredentialResponse, PrinterCredentialUpdate,
};
pub use printer_type::{PrinterType, PrinterTypeResponse, RECEIPT_PRINTER_TYPE};
pub use print_job::{
    JobState, PrintJob, PrintJobCreate, PrintJobId, PrintJobResponse, PrintJobUpdate,
    ReceiptPrintJob, RECEIPT_JOB_TYPE,
};
