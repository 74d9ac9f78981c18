pub mod error;

pub use error::{error_body, handle_domain_error, not_found, ApiError};
