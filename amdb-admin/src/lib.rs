//! amdb-admin library - admin page client for the music database
//!
//! Wires admin page controls to the database server's REST endpoints:
//! serialize form fields, send the request, patch the page document on
//! success, or report the failure through the feedback modal.

pub mod autocomplete;
pub mod client;
pub mod document;
pub mod families;
pub mod feedback;
pub mod page;
pub mod sync;

pub use client::{ClientError, MutationClient};
pub use document::Document;
pub use feedback::{FeedbackModal, FeedbackReport, Severity};
pub use page::{ActionError, Page};
