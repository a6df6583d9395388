#![deny(missing_docs)]

//! # Response Assembly
//!
//! Builds the [`ResponseEncoding`] of an endpoint. Responses have no method
//! groups: every field defaults to the body, and only a `header` tag can
//! move it.

use crate::encoding::models::{ParameterLocation, ResponseEncoding};
use crate::encoding::params::{classify, Options, RESPONSE_TAGS};
use crate::encoding::types::TypeResolver;
use crate::error::{EncodingError, EncodingResult};
use crate::schema::{SchemaGraph, Type};

/// Resolves an endpoint's response encoding.
///
/// Returns `Ok(None)` when the endpoint declares no response schema.
pub fn describe_response(
    graph: &SchemaGraph,
    response_schema: Option<&Type>,
    options: &Options,
) -> EncodingResult<Option<ResponseEncoding>> {
    let Some(schema) = response_schema else {
        return Ok(None);
    };

    let st = TypeResolver::new(graph).concrete_struct(schema)?;
    let mut encoding = ResponseEncoding::default();
    for field in &st.fields {
        let Some(param) = classify(field, ParameterLocation::Body, &RESPONSE_TAGS, options)? else {
            continue;
        };
        match param.location {
            ParameterLocation::Header => encoding.header_parameters.push(param),
            ParameterLocation::Body => encoding.body_parameters.push(param),
            location => {
                return Err(EncodingError::InvalidLocation {
                    location,
                    context: RESPONSE_TAGS.context,
                })
            }
        }
    }
    Ok(Some(encoding))
}
