//! Template editing, persistence and verification lookup
//!
//! This crate provides:
//! - The `Editor` state machine for interactive template editing
//!   (selection, add/duplicate/delete/update, pointer dragging)
//! - `TemplateStore` / `CertificateStore` traits over the storage
//!   collaborator, with an in-memory implementation
//! - `TemplateManager`, which layers system-template protection and
//!   selection fallback over a template store
//! - Certificate verification lookup by number or record id

mod editor;
mod manager;
mod store;
mod verify;

pub use editor::{DragState, Editor, ElementPatch, DEFAULT_DISPLAY_SCALE};
pub use manager::TemplateManager;
pub use store::{CertificateStore, MemoryStore, StoreError, StoreResult, TemplateStore};
pub use verify::verify_certificate;

use thiserror::Error;

/// Errors that can occur during editor and storage operations
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("system template '{0}' cannot be deleted")]
    SystemTemplateProtected(String),

    #[error(transparent)]
    Model(#[from] cert_model::ModelError),

    #[error(transparent)]
    Store(#[from] store::StoreError),
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
