#![deny(missing_docs)]

//! # apienc
//!
//! Wire-encoding resolution for typed RPC schemas.
//!
//! Given a schema graph describing an endpoint's request, response and auth
//! payloads, this crate decides, per HTTP method, which struct field is sent
//! as a header, a query parameter, a cookie or a body field, and under what
//! wire name. The resolved [`encoding::ApiEncoding`] is consumed identically
//! by a server-side request binder and by client generators; its output is
//! deterministic, so repeated resolutions of the same schema are
//! byte-identical.
//!
//! The crate only decides bindings. Marshalling values to wire strings, and
//! extracting schemas from application source, live elsewhere.

/// Shared error types.
pub mod error;

/// Encoding resolution logic.
pub mod encoding;

/// Wire-name case conversion helpers.
pub mod naming;

/// The immutable schema input model.
pub mod schema;

pub use encoding::{
    describe_api, describe_auth, describe_request, describe_response, describe_rpc,
    describe_service, ApiEncoding, AuthEncoding, Options, ParameterEncoding, ParameterLocation,
    RequestEncoding, ResponseEncoding, RpcEncoding, ServiceEncoding,
};
pub use error::{EncodingError, EncodingResult};
pub use schema::{
    Api, AuthHandler, BuiltinKind, DeclId, Declaration, Field, Rpc, SchemaGraph, Service, Tag, Type,
};
