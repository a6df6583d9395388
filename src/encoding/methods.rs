#![deny(missing_docs)]

//! # Method Grouping
//!
//! Partitions an endpoint's accepted HTTP methods into the groups that share
//! a structural default location: `GET`/`HEAD`/`DELETE` default their fields
//! to the query string, everything else defaults to the body.

use crate::encoding::models::ParameterLocation;
use crate::error::{EncodingError, EncodingResult};
use indexmap::IndexMap;

/// HTTP methods sharing one structural default location.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodGroup {
    /// The default parameter location for these methods.
    pub location: ParameterLocation,
    /// The methods in the group, in input order.
    pub methods: Vec<String>,
}

/// Partitions `methods` into their default-location groups.
///
/// The wildcard method `"*"` expands into both groups at once:
/// `Query = [GET, HEAD, DELETE]` and `Body = [POST, PUT, PATCH]`. Mixing the
/// wildcard with explicit methods is rejected, as is an empty method list.
///
/// The returned groups are sorted by their lexicographically smallest
/// method, so repeated calls over the same input produce identical
/// orderings.
pub fn group_methods(methods: &[String]) -> EncodingResult<Vec<MethodGroup>> {
    if methods.is_empty() {
        return Err(EncodingError::InvalidMethods(
            "an endpoint must accept at least one HTTP method".to_string(),
        ));
    }
    if methods.iter().any(|m| m == "*") && methods.len() > 1 {
        return Err(EncodingError::InvalidMethods(
            "the wildcard method \"*\" cannot be combined with explicit methods".to_string(),
        ));
    }

    let mut by_location: IndexMap<ParameterLocation, Vec<String>> = IndexMap::new();
    for method in methods {
        match method.as_str() {
            "GET" | "HEAD" | "DELETE" => by_location
                .entry(ParameterLocation::Query)
                .or_default()
                .push(method.clone()),
            "*" => {
                let to_owned = |ms: [&str; 3]| ms.iter().map(|m| m.to_string()).collect();
                by_location.insert(ParameterLocation::Body, to_owned(["POST", "PUT", "PATCH"]));
                by_location.insert(
                    ParameterLocation::Query,
                    to_owned(["GET", "HEAD", "DELETE"]),
                );
            }
            _ => by_location
                .entry(ParameterLocation::Body)
                .or_default()
                .push(method.clone()),
        }
    }

    let mut groups: Vec<MethodGroup> = by_location
        .into_iter()
        .map(|(location, methods)| MethodGroup { location, methods })
        .collect();
    groups.sort_by(|a, b| a.methods.iter().min().cmp(&b.methods.iter().min()));
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(methods: &[&str]) -> Vec<String> {
        methods.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_query_and_body_partition() {
        let groups = group_methods(&strings(&["GET", "POST", "HEAD"])).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].location, ParameterLocation::Query);
        assert_eq!(groups[0].methods, strings(&["GET", "HEAD"]));
        assert_eq!(groups[1].location, ParameterLocation::Body);
        assert_eq!(groups[1].methods, strings(&["POST"]));
    }

    #[test]
    fn test_wildcard_expands_both_groups() {
        let groups = group_methods(&strings(&["*"])).unwrap();
        assert_eq!(groups.len(), 2);
        // DELETE < PATCH, so the query group sorts first.
        assert_eq!(groups[0].location, ParameterLocation::Query);
        assert_eq!(groups[0].methods, strings(&["GET", "HEAD", "DELETE"]));
        assert_eq!(groups[1].location, ParameterLocation::Body);
        assert_eq!(groups[1].methods, strings(&["POST", "PUT", "PATCH"]));
    }

    #[test]
    fn test_unknown_methods_default_to_body() {
        let groups = group_methods(&strings(&["PROPFIND"])).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].location, ParameterLocation::Body);
    }

    #[test]
    fn test_group_ordering_is_deterministic() {
        let methods = strings(&["POST", "DELETE", "PUT"]);
        let first = group_methods(&methods).unwrap();
        let second = group_methods(&methods).unwrap();
        assert_eq!(first, second);
        // DELETE < POST, so the query group still sorts first.
        assert_eq!(first[0].methods, strings(&["DELETE"]));
        assert_eq!(first[1].methods, strings(&["POST", "PUT"]));
    }

    #[test]
    fn test_wildcard_mixed_with_explicit_is_rejected() {
        let err = group_methods(&strings(&["GET", "*"])).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidMethods(_)));
    }

    #[test]
    fn test_empty_methods_rejected() {
        let err = group_methods(&[]).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidMethods(_)));
    }
}
