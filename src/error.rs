#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `EncodingError` enum used across the crate.
//!
//! Every variant is a construction-time or validation failure: resolution is
//! deterministic, so nothing here is transient and nothing is retried. An
//! endpoint's encoding either resolves fully or fails as a whole.

use crate::encoding::models::ParameterLocation;
use crate::schema::DeclId;
use derive_more::Display;

/// The crate-wide error enum.
///
/// We use `derive_more` for the `Display` boilerplate.
#[derive(Debug, Display)]
pub enum EncodingError {
    /// Two location-override tags were present on a single field.
    #[display("tag conflict: the tag {first} cannot be combined with {second}")]
    TagConflict {
        /// Key of the override tag that was applied first.
        first: String,
        /// Key of the conflicting override tag encountered later.
        second: String,
    },

    /// A field resolved to a location that its encoding context does not
    /// permit (e.g. a cookie parameter inside a response).
    #[display("invalid location: {location} parameters are not supported in {context} encodings")]
    InvalidLocation {
        /// The offending location.
        location: ParameterLocation,
        /// The encoding context being resolved ("request", "response" or "auth").
        context: &'static str,
    },

    /// The schema shape at a resolution point has no defined mapping.
    #[display("unsupported type: {_0}")]
    UnsupportedType(String),

    /// The auth handler's parameter schema has no defined mapping.
    #[display("unsupported auth type: {_0}")]
    UnsupportedAuthType(String),

    /// The bounded-recursion guard fired while instantiating generics.
    ///
    /// Carries the declaration chain that was being resolved, for diagnosis.
    #[display("recursive generic instantiation: {}", chain.join(" -> "))]
    RecursiveGenericInstantiation {
        /// Declaration names in the order they were entered.
        chain: Vec<String>,
    },

    /// The computed default method has no corresponding request encoding.
    ///
    /// The method grouper guarantees total coverage of the methods it was
    /// given, so hitting this indicates an internal invariant violation
    /// rather than bad user input.
    #[display("no request encoding matches the method {_0}")]
    NoMatchingEncoding(String),

    /// The endpoint's HTTP method list failed input validation.
    #[display("invalid http methods: {_0}")]
    InvalidMethods(String),

    /// A `Named` type referenced a declaration id missing from the graph.
    #[display("unknown declaration: no declaration with id {_0} in the schema graph")]
    UnknownDeclaration(DeclId),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for EncodingError {}

/// Helper type alias for Result using EncodingError.
pub type EncodingResult<T> = Result<T, EncodingError>;
