#![deny(missing_docs)]

//! # Encoding Resolution
//!
//! Logic for resolving a typed schema graph into per-method wire encodings.
//!
//! Handles:
//! - Generic type instantiation with bounded recursion.
//! - Partitioning of accepted HTTP methods into default-location groups.
//! - Tag-driven classification of struct fields into header, query, body
//!   and cookie parameters, with conflict detection.
//! - Assembly and validation of request, response and auth encodings, up to
//!   whole-application [`ApiEncoding`] values.
//!
//! Resolution is a pure function over the immutable schema graph: distinct
//! endpoints share no mutable state and may be resolved in parallel.

pub mod auth;
pub mod methods;
pub mod models;
pub mod params;
pub mod requests;
pub mod responses;
pub mod rpc;
mod types;

pub use auth::describe_auth;
pub use methods::{group_methods, MethodGroup};
pub use models::{
    ApiEncoding, AuthEncoding, ParameterEncoding, ParameterLocation, RequestEncoding,
    ResponseEncoding, RpcEncoding, ServiceEncoding,
};
pub use params::Options;
pub use requests::describe_request;
pub use responses::describe_response;
pub use rpc::{default_client_method, describe_api, describe_rpc, describe_service};
