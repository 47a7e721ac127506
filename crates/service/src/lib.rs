//! List query handlers on top of the `models` entities.
//! - Each handler filters, sorts and windows one table, then resolves its lookup.
//! - Responses are flat DTOs ready for JSON, XML or HTML rendering.

pub mod errors;
pub mod listing;
pub mod lookup;
pub mod customers;
pub mod employees;
pub mod suppliers;

pub use listing::ListParams;
