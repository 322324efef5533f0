//! HTTP protocol layer module
//!
//! JSON body encoding and response builders, decoupled from request handling.

pub mod json;
pub mod response;

pub use response::{build_501_response, json_response};
