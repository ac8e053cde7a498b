//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! Everything here is a static string. User input never reaches this module;
//! filters elsewhere pass it through `.bind()` or typed DSL expressions.

use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::sql_types::Double;

/// `ORDER BY RANDOM()` for random listings.
///
/// Diesel has no built-in for PostgreSQL's `random()`.
pub fn random_order() -> SqlLiteral<Double> {
    sql::<Double>("RANDOM()")
}
