pub mod auth;
pub mod error_handler;
pub mod request_id;

pub use auth::{hash_api_key, verify_api_key, PrincipalAuth};
pub use error_handler::{log_error, request_id_of, ErrorLogger};
pub use request_id::{RequestId, RequestIdentifier};
