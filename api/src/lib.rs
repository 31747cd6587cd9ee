//! Core partner operations: the discount engine, the partner repository, the
//! report generator, and the GraphQL contract that exposes them.

pub mod discount;
pub mod report;
pub mod repository;
pub mod schema;
