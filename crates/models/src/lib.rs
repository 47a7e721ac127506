//! Entities and connection handling for the backoffice store.
pub mod errors;
pub mod db;
pub mod schema;
pub mod customer_category;
pub mod customer;
pub mod department;
pub mod employee;
pub mod supplier;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

#[cfg(test)]
mod tests;
