#![deny(missing_docs)]

//! # Encoding Models
//!
//! Definition of the resolved-encoding records handed to consumers.
//!
//! These structs are the output contract shared by the server-side request
//! binder and the client generators: field names are stable and serialized
//! verbatim when the encoding is persisted as an interchange document.
//!
//! Everything here is constructed once per resolution and never mutated.

use crate::schema::{PathSegment, Type};
use derive_more::Display;
use serde::Serialize;

/// Where a parameter travels on the wire.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// No location has been determined. A valid resting state for auth
    /// classification only; never legal in a finished encoding.
    #[display("undefined")]
    #[default]
    Undefined,
    /// An HTTP header.
    #[display("header")]
    Header,
    /// A query-string parameter.
    #[display("query")]
    Query,
    /// A body field.
    #[display("body")]
    Body,
    /// A cookie.
    #[display("cookie")]
    Cookie,
}

/// The resolved binding of one struct field in one encoding context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterEncoding {
    /// The name as it appears on the wire.
    pub name: String,
    /// Where the parameter travels.
    pub location: ParameterLocation,
    /// Whether the parameter is omitted when its value is empty.
    pub omit_empty: bool,
    /// The identifier code generators use to reference the field in the
    /// host struct; may differ from the wire name.
    pub src_name: String,
    /// Documentation carried over from the field.
    pub doc: String,
    /// The field's declared type.
    #[serde(rename = "type")]
    pub typ: Type,
    /// The field's unparsed tag string, carried verbatim.
    pub raw_tag: String,
    /// Whether the field is optional.
    pub optional: bool,
}

/// The request bindings shared by one group of HTTP methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEncoding {
    /// The HTTP methods this encoding applies to.
    pub http_methods: Vec<String>,
    /// Parameters sent as headers.
    pub header_parameters: Vec<ParameterEncoding>,
    /// Parameters sent in the query string.
    pub query_parameters: Vec<ParameterEncoding>,
    /// Parameters sent in the body.
    pub body_parameters: Vec<ParameterEncoding>,
}

/// The response bindings of an endpoint.
///
/// Responses carry headers and a body only; query and cookie parameters
/// cannot appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseEncoding {
    /// Parameters returned as headers.
    pub header_parameters: Vec<ParameterEncoding>,
    /// Parameters returned in the body.
    pub body_parameters: Vec<ParameterEncoding>,
}

/// The resolved bindings of an application's auth handler parameters.
///
/// Auth payloads never ride in a request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuthEncoding {
    /// True when the entire auth payload is a single string, conventionally
    /// a bearer token; the parameter lists are all empty in that case.
    pub legacy_token_format: bool,
    /// Parameters sent as headers.
    pub header_parameters: Vec<ParameterEncoding>,
    /// Parameters sent in the query string.
    pub query_parameters: Vec<ParameterEncoding>,
    /// Parameters sent as cookies.
    pub cookie_parameters: Vec<ParameterEncoding>,
}

/// The full resolved encoding of one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcEncoding {
    /// The endpoint name.
    pub name: String,
    /// Documentation carried over from the endpoint.
    pub doc: String,
    /// The endpoint's URL path segments.
    pub path: Vec<PathSegment>,
    /// The HTTP methods the endpoint accepts, as declared.
    pub http_methods: Vec<String>,
    /// The method a single-encoding consumer should use.
    pub default_method: String,
    /// The request encoding matching [`Self::default_method`], re-packaged
    /// to carry that method alone. This is the record exposed to consumers
    /// that need one canonical binding, e.g. a generated client.
    pub default_request_encoding: RequestEncoding,
    /// Every per-method-group request encoding, for consumers that must
    /// honor multiple accepted methods with differing bindings.
    pub request_encodings: Vec<RequestEncoding>,
    /// The response encoding, absent for bodyless responses.
    pub response_encoding: Option<ResponseEncoding>,
}

/// The resolved encodings of one service's endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceEncoding {
    /// The service name.
    pub name: String,
    /// Documentation carried over from the service.
    pub doc: String,
    /// The service's endpoint encodings, in declaration order.
    pub rpcs: Vec<RpcEncoding>,
}

/// The resolved encodings of a whole application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEncoding {
    /// The application's service encodings, in declaration order.
    pub services: Vec<ServiceEncoding>,
    /// The auth handler's encoding, absent when no auth handler exists.
    pub authorization: Option<AuthEncoding>,
}
