pub mod credentials;
pub mod parser;
pub mod types;

pub use credentials::{redact_credentials, resolve_credential};
pub use parser::{parse_config, validate_config};
pub use types::*;
