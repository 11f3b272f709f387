// shopfront-api: Async Rust client for the storefront CMS REST API

pub mod client;
pub mod error;
pub mod form;
pub mod operation;
pub mod transport;
pub mod types;

mod cms;
mod domains;
mod storefront;

pub use client::CmsClient;
pub use error::Error;
pub use form::{DraftForm, FilePart, FormValue};
pub use operation::{OperationAction, PendingOperation};
pub use transport::{TlsMode, TransportConfig};
