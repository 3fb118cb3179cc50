pub mod error;
pub mod schema;
pub mod types;

#[cfg(feature = "form")]
pub mod form;

#[cfg(feature = "preview")]
pub mod preview;

#[cfg(feature = "preview")]
pub mod export;

#[cfg(feature = "flow")]
pub mod flow;

pub use error::SopError;
pub use schema::LoanSopRecord;
pub use types::*;

/// Standard result type for all loan-sop operations
pub type SopResult<T> = Result<T, SopError>;
