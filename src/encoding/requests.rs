#![deny(missing_docs)]

//! # Request Assembly
//!
//! Builds the per-method-group [`RequestEncoding`] records for an endpoint.

use crate::encoding::methods::{group_methods, MethodGroup};
use crate::encoding::models::{ParameterLocation, RequestEncoding};
use crate::encoding::params::{classify, request_tags, Options};
use crate::encoding::types::TypeResolver;
use crate::error::{EncodingError, EncodingResult};
use crate::schema::{SchemaGraph, StructType, Type};

/// Resolves an endpoint's request encodings, one per method group.
///
/// An absent schema still yields one empty encoding per group, so callers
/// can always enumerate the accepted methods. Output ordering follows the
/// grouper's deterministic ordering.
pub fn describe_request(
    graph: &SchemaGraph,
    request_schema: Option<&Type>,
    http_methods: &[String],
    options: &Options,
) -> EncodingResult<Vec<RequestEncoding>> {
    let groups = group_methods(http_methods)?;
    let Some(schema) = request_schema else {
        return Ok(groups
            .into_iter()
            .map(|group| RequestEncoding {
                http_methods: group.methods,
                header_parameters: vec![],
                query_parameters: vec![],
                body_parameters: vec![],
            })
            .collect());
    };

    let st = TypeResolver::new(graph).concrete_struct(schema)?;
    groups
        .into_iter()
        .map(|group| describe_group(&st, group, options))
        .collect()
}

fn describe_group(
    st: &StructType,
    group: MethodGroup,
    options: &Options,
) -> EncodingResult<RequestEncoding> {
    let rules = request_tags(group.location);
    let mut encoding = RequestEncoding {
        http_methods: group.methods,
        header_parameters: vec![],
        query_parameters: vec![],
        body_parameters: vec![],
    };
    for field in &st.fields {
        let Some(param) = classify(field, group.location, rules, options)? else {
            continue;
        };
        match param.location {
            ParameterLocation::Header => encoding.header_parameters.push(param),
            ParameterLocation::Query => encoding.query_parameters.push(param),
            ParameterLocation::Body => encoding.body_parameters.push(param),
            location => {
                return Err(EncodingError::InvalidLocation {
                    location,
                    context: rules.context,
                })
            }
        }
    }
    Ok(encoding)
}
