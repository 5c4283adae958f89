//! Foundation types for the snipkit core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`DocumentId`] - Opaque handles for host documents
//! - [`LineCol`], [`LineIndex`] - Cursor positions and offset conversion
//! - [`HostError`] - Failures coming back from the editor host
//!
//! This module has NO dependencies on other snipkit modules.

mod document_id;
mod error;
mod span;

pub use document_id::DocumentId;
pub use error::HostError;
pub use span::{LineCol, LineIndex, TextSize};
