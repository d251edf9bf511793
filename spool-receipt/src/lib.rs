//! # spool-receipt
//!
//! Receipt document model and validation engine.
//!
//! ## Scope
//!
//! This crate handles WHAT a receipt document is:
//! - The recursive node tree a receipt printer renders (`ReceiptNode`)
//! - Structural validation of untrusted submissions (`validate_document`)
//!
//! Rendering to printer byte streams and delivery to devices are deliberately
//! out of scope - jobs carry the document as data, consumers decide how to
//! draw it.
//!
//! ## Example
//!
//! ```
//! use spool_receipt::validate_document;
//!
//! let doc = serde_json::json!({
//!     "$type": "alignment",
//!     "alignment": "center",
//!     "children": [
//!         { "$type": "text", "value": "Hello" },
//!         { "$type": "cut" },
//!     ],
//! });
//! assert!(validate_document(&doc).is_ok());
//! ```

mod error;
mod node;
mod validate;

// Re-exports
pub use error::{ValidationError, ValidationResult};
pub use node::{Alignment, Font, LineFormat, NodeKind, ReceiptNode, TextFormat, Underline};
pub use validate::{MAX_DEPTH, validate_document, validate_node};
