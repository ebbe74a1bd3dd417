//! Adapters from the supported input shapes to flat file lists.
//!
//! Each adapter normalizes one input shape (drag-and-drop payload, picker
//! change event, handle list) into annotated files, driving tree-shaped
//! inputs through [`crate::resolve`].

pub mod data_transfer;
pub mod handle_list;
pub mod input_change;

pub use data_transfer::{DataTransfer, DataTransferItem, from_data_transfer};
pub use handle_list::from_handles;
pub use input_change::from_input_change;
