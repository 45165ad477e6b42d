pub mod client;
pub mod compose;
pub mod error;

pub use client::{CrmClient, CustomerDetail};
pub use compose::{send_email, EmailDraft};
pub use error::{ClientError, Result};
