#![deny(missing_docs)]

//! # Auth Assembly
//!
//! Builds the [`AuthEncoding`] of an application's auth handler.
//!
//! Two payload shapes are supported: a bare string (the legacy bearer-token
//! format) and a struct reached through a `Named` or `Pointer` type, whose
//! fields each pick a header, query or cookie location via tags.

use crate::encoding::models::{AuthEncoding, ParameterLocation};
use crate::encoding::params::{classify, Options, AUTH_TAGS};
use crate::encoding::types::TypeResolver;
use crate::error::{EncodingError, EncodingResult};
use crate::schema::{BuiltinKind, SchemaGraph, Type};

/// Resolves the auth handler's parameter encoding.
///
/// Returns `Ok(None)` when the application has no auth requirement.
pub fn describe_auth(
    graph: &SchemaGraph,
    auth_schema: Option<&Type>,
    options: &Options,
) -> EncodingResult<Option<AuthEncoding>> {
    let Some(schema) = auth_schema else {
        return Ok(None);
    };

    match schema {
        Type::Builtin(BuiltinKind::String) => Ok(Some(AuthEncoding {
            legacy_token_format: true,
            ..AuthEncoding::default()
        })),
        Type::Named(_) | Type::Pointer(_) => {
            let st = TypeResolver::new(graph).concrete_struct(schema)?;
            let mut encoding = AuthEncoding::default();
            for field in &st.fields {
                let Some(param) =
                    classify(field, ParameterLocation::Undefined, &AUTH_TAGS, options)?
                else {
                    continue;
                };
                match param.location {
                    ParameterLocation::Header => encoding.header_parameters.push(param),
                    ParameterLocation::Query => encoding.query_parameters.push(param),
                    ParameterLocation::Cookie => encoding.cookie_parameters.push(param),
                    location => {
                        return Err(EncodingError::InvalidLocation {
                            location,
                            context: AUTH_TAGS.context,
                        })
                    }
                }
            }
            Ok(Some(encoding))
        }
        other => Err(EncodingError::UnsupportedAuthType(format!(
            "auth parameters must be a string or a struct reference, found a {}",
            other.shape_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DeclId, Declaration, Field, NamedType, StructType, Tag};

    fn tag(key: &str, name: &str) -> Tag {
        Tag {
            key: key.to_string(),
            name: name.to_string(),
            options: vec![],
        }
    }

    fn field(name: &str, tags: Vec<Tag>) -> Field {
        Field {
            name: name.to_string(),
            doc: String::new(),
            optional: false,
            typ: Type::Builtin(BuiltinKind::String),
            raw_tag: String::new(),
            tags,
        }
    }

    fn auth_graph(fields: Vec<Field>) -> (SchemaGraph, Type) {
        let graph = SchemaGraph::new([Declaration {
            id: DeclId(0),
            name: "AuthParams".to_string(),
            pkg: "auth".to_string(),
            type_params: vec![],
            typ: Type::Struct(StructType { fields }),
        }]);
        let schema = Type::Named(NamedType {
            decl: DeclId(0),
            type_args: vec![],
        });
        (graph, schema)
    }

    #[test]
    fn test_absent_schema_yields_none() {
        let graph = SchemaGraph::default();
        assert!(describe_auth(&graph, None, &Options::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_bare_string_is_legacy_token() {
        let graph = SchemaGraph::default();
        let schema = Type::Builtin(BuiltinKind::String);
        let encoding = describe_auth(&graph, Some(&schema), &Options::default())
            .unwrap()
            .unwrap();
        assert!(encoding.legacy_token_format);
        assert!(encoding.header_parameters.is_empty());
        assert!(encoding.query_parameters.is_empty());
        assert!(encoding.cookie_parameters.is_empty());
    }

    #[test]
    fn test_struct_fields_partition_by_tag() {
        let (graph, schema) = auth_graph(vec![
            field("Key", vec![tag("header", "X-API-Key")]),
            field("Sig", vec![tag("query", "sig")]),
            field("Session", vec![tag("cookie", "session")]),
        ]);
        let encoding = describe_auth(&graph, Some(&schema), &Options::default())
            .unwrap()
            .unwrap();
        assert!(!encoding.legacy_token_format);
        assert_eq!(encoding.header_parameters[0].name, "x-api-key");
        assert_eq!(encoding.query_parameters[0].name, "sig");
        assert_eq!(encoding.cookie_parameters[0].name, "session");
    }

    #[test]
    fn test_untagged_auth_field_is_rejected() {
        let (graph, schema) = auth_graph(vec![field("Token", vec![])]);
        let err = describe_auth(&graph, Some(&schema), &Options::default()).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::InvalidLocation {
                location: ParameterLocation::Undefined,
                context: "auth"
            }
        ));
    }

    #[test]
    fn test_non_string_builtin_is_unsupported() {
        let graph = SchemaGraph::default();
        let schema = Type::Builtin(BuiltinKind::Int64);
        let err = describe_auth(&graph, Some(&schema), &Options::default()).unwrap_err();
        assert!(matches!(err, EncodingError::UnsupportedAuthType(_)));
    }

    #[test]
    fn test_bare_struct_is_unsupported() {
        // Only Named and Pointer shapes reach the struct walk.
        let graph = SchemaGraph::default();
        let schema = Type::Struct(StructType { fields: vec![] });
        let err = describe_auth(&graph, Some(&schema), &Options::default()).unwrap_err();
        assert!(matches!(err, EncodingError::UnsupportedAuthType(_)));
    }
}
