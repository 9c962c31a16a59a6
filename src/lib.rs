// Expense API - Core Library
// Exposes the domain for the server binary and tests

pub mod config;
pub mod expense;
pub mod response;
pub mod store;
pub mod validation;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod body;
#[cfg(feature = "server")]
pub mod error;

// Re-export commonly used types
pub use config::{ServerConfig, MAX_BODY_BYTES};
pub use expense::{Expense, NewExpense};
pub use response::ApiResponse;
pub use store::ExpenseStore;
pub use validation::{validate_body, validate_fields, ValidationError, REQUIRED_FIELDS};

#[cfg(feature = "server")]
pub use api::{create_router, AppState, EXPENSES_PATH};
#[cfg(feature = "server")]
pub use body::{read_body_limited, BodyError};
#[cfg(feature = "server")]
pub use error::ApiError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
