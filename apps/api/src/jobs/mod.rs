//! Job search proxy: shapes the caller's query, forwards it to Jooble,
//! and passes the listings back untouched.

pub mod client;
pub mod handlers;
pub mod models;
pub mod normalize;
