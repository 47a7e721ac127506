pub mod routes;
pub mod startup;
pub mod errors;
pub mod negotiate;
pub mod html;
pub mod openapi;

pub use startup::run;
