#![deny(missing_docs)]

//! # Endpoint and Application Assembly
//!
//! Drives request, response and auth resolution across whole endpoints,
//! services and applications, and selects the default encoding exposed to
//! single-encoding consumers.

use crate::encoding::auth::describe_auth;
use crate::encoding::models::{ApiEncoding, RequestEncoding, RpcEncoding, ServiceEncoding};
use crate::encoding::params::Options;
use crate::encoding::requests::describe_request;
use crate::encoding::responses::describe_response;
use crate::error::{EncodingError, EncodingResult};
use crate::schema::{Api, Rpc, SchemaGraph, Service};

/// The method a generated client calls an endpoint with.
///
/// `POST` wins whenever the endpoint accepts it (including via the
/// wildcard); otherwise the first declared method is used.
pub fn default_client_method(http_methods: &[String]) -> EncodingResult<String> {
    let first = http_methods.first().ok_or_else(|| {
        EncodingError::InvalidMethods("an endpoint must accept at least one HTTP method".to_string())
    })?;
    if first == "*" {
        return Ok("POST".to_string());
    }
    if http_methods.iter().any(|m| m == "POST") {
        return Ok("POST".to_string());
    }
    Ok(first.clone())
}

/// Resolves the full encoding of one endpoint.
pub fn describe_rpc(graph: &SchemaGraph, rpc: &Rpc, options: &Options) -> EncodingResult<RpcEncoding> {
    let default_method = default_client_method(&rpc.http_methods)?;
    let request_encodings = describe_request(
        graph,
        rpc.request_schema.as_ref(),
        &rpc.http_methods,
        options,
    )?;
    let response_encoding = describe_response(graph, rpc.response_schema.as_ref(), options)?;
    let default_request_encoding = default_encoding(&request_encodings, &default_method)?;

    Ok(RpcEncoding {
        name: rpc.name.clone(),
        doc: rpc.doc.clone(),
        path: rpc.path.clone(),
        http_methods: rpc.http_methods.clone(),
        default_method,
        default_request_encoding,
        request_encodings,
        response_encoding,
    })
}

/// Selects the request encoding containing the default method and
/// re-packages it to carry that method alone.
///
/// The grouper covers every method it is given, so a miss here is an
/// internal invariant violation, not bad user input.
fn default_encoding(
    encodings: &[RequestEncoding],
    default_method: &str,
) -> EncodingResult<RequestEncoding> {
    let matched = encodings
        .iter()
        .find(|e| e.http_methods.iter().any(|m| m == default_method))
        .or_else(|| {
            encodings
                .iter()
                .find(|e| e.http_methods.iter().any(|m| m == "*"))
        })
        .ok_or_else(|| EncodingError::NoMatchingEncoding(default_method.to_string()))?;

    Ok(RequestEncoding {
        http_methods: vec![default_method.to_string()],
        header_parameters: matched.header_parameters.clone(),
        query_parameters: matched.query_parameters.clone(),
        body_parameters: matched.body_parameters.clone(),
    })
}

/// Resolves the encodings of every endpoint in a service.
pub fn describe_service(
    graph: &SchemaGraph,
    service: &Service,
    options: &Options,
) -> EncodingResult<ServiceEncoding> {
    let rpcs = service
        .rpcs
        .iter()
        .map(|rpc| describe_rpc(graph, rpc, options))
        .collect::<EncodingResult<Vec<_>>>()?;
    Ok(ServiceEncoding {
        name: service.name.clone(),
        doc: service.doc.clone(),
        rpcs,
    })
}

/// Resolves a whole application: every service plus the auth handler.
pub fn describe_api(graph: &SchemaGraph, api: &Api, options: &Options) -> EncodingResult<ApiEncoding> {
    let services = api
        .services
        .iter()
        .map(|service| describe_service(graph, service, options))
        .collect::<EncodingResult<Vec<_>>>()?;
    let authorization = match &api.auth_handler {
        Some(handler) => describe_auth(graph, Some(&handler.params), options)?,
        None => None,
    };
    Ok(ApiEncoding {
        services,
        authorization,
    })
}
