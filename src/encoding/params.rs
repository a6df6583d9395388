#![deny(missing_docs)]

//! # Parameter Classification
//!
//! Logic for resolving one struct field, under one encoding context, into a
//! [`ParameterEncoding`]: which location it travels in, under what wire
//! name, and with which flags.
//!
//! Classification is tag driven and order sensitive: tags are inspected in
//! field declaration order, the first location-override tag wins, and a
//! second override on the same field is a hard conflict. A tag whose key the
//! active context does not recognize is skipped entirely.
//!
//! Each context carries its own rule table. Request classification uses two
//! tables, one per method-group default: `query`/`qs` overrides are only
//! recognized in groups whose structural default is the query string, so an
//! override tag never reaches across method groups it cannot apply to.

use crate::encoding::models::{ParameterEncoding, ParameterLocation};
use crate::error::{EncodingError, EncodingResult};
use crate::naming::to_snake_case;
use crate::schema::Field;

/// Caller-supplied knobs for a resolution run.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// When set, a tag with this key overrides each parameter's `src_name`
    /// with the tag's value. Client generators use this to reference fields
    /// by their serialized names instead of their source names.
    pub src_name_tag: Option<String>,
}

/// How one tag key behaves inside a rule set.
pub(crate) struct TagRule {
    /// The location this tag is associated with.
    location: ParameterLocation,
    /// Whether the tag's presence moves the field away from the context's
    /// structural default location.
    overrides_default: bool,
    /// Option string that switches on `omit_empty` when present.
    omit_empty_option: Option<&'static str>,
    /// Formatter applied to the tag's value before it becomes the wire name.
    wire_formatter: Option<fn(&str) -> String>,
}

/// The tag rules of one encoding context.
pub(crate) struct RuleSet {
    /// Context label used in validation errors.
    pub(crate) context: &'static str,
    tags: &'static [(&'static str, TagRule)],
}

impl RuleSet {
    fn rule(&self, key: &str) -> Option<&TagRule> {
        self.tags
            .iter()
            .find_map(|(k, rule)| (*k == key).then_some(rule))
    }
}

fn lowercase(s: &str) -> String {
    s.to_lowercase()
}

/// Request rules for method groups whose structural default is the query
/// string.
pub(crate) static REQUEST_QUERY_TAGS: RuleSet = RuleSet {
    context: "request",
    tags: &[
        (
            "query",
            TagRule {
                location: ParameterLocation::Query,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: None,
            },
        ),
        // Alias of query.
        (
            "qs",
            TagRule {
                location: ParameterLocation::Query,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: None,
            },
        ),
        (
            "header",
            TagRule {
                location: ParameterLocation::Header,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: Some(lowercase),
            },
        ),
        (
            "json",
            TagRule {
                location: ParameterLocation::Body,
                overrides_default: false,
                omit_empty_option: Some("omitempty"),
                wire_formatter: None,
            },
        ),
    ],
};

/// Request rules for method groups whose structural default is the body.
///
/// `query`/`qs` are absent: they can only override into a query-default
/// group, so in a body-default group those tags are irrelevant.
pub(crate) static REQUEST_BODY_TAGS: RuleSet = RuleSet {
    context: "request",
    tags: &[
        (
            "header",
            TagRule {
                location: ParameterLocation::Header,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: Some(lowercase),
            },
        ),
        (
            "json",
            TagRule {
                location: ParameterLocation::Body,
                overrides_default: false,
                omit_empty_option: Some("omitempty"),
                wire_formatter: None,
            },
        ),
    ],
};

/// Response rules.
///
/// `query`/`qs`/`cookie` are recognized here even though responses cannot
/// carry those locations: resolving them lets location validation reject the
/// tag loudly instead of ignoring it.
pub(crate) static RESPONSE_TAGS: RuleSet = RuleSet {
    context: "response",
    tags: &[
        (
            "header",
            TagRule {
                location: ParameterLocation::Header,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: Some(lowercase),
            },
        ),
        (
            "json",
            TagRule {
                location: ParameterLocation::Body,
                overrides_default: false,
                omit_empty_option: Some("omitempty"),
                wire_formatter: None,
            },
        ),
        (
            "query",
            TagRule {
                location: ParameterLocation::Query,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: None,
            },
        ),
        (
            "qs",
            TagRule {
                location: ParameterLocation::Query,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: None,
            },
        ),
        (
            "cookie",
            TagRule {
                location: ParameterLocation::Cookie,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: None,
            },
        ),
    ],
};

/// Auth rules. There is no structural default; every auth field must pick
/// its location with a tag.
pub(crate) static AUTH_TAGS: RuleSet = RuleSet {
    context: "auth",
    tags: &[
        (
            "query",
            TagRule {
                location: ParameterLocation::Query,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: None,
            },
        ),
        (
            "header",
            TagRule {
                location: ParameterLocation::Header,
                overrides_default: true,
                omit_empty_option: None,
                wire_formatter: Some(lowercase),
            },
        ),
        (
            "cookie",
            TagRule {
                location: ParameterLocation::Cookie,
                overrides_default: true,
                omit_empty_option: Some("omitempty"),
                wire_formatter: None,
            },
        ),
    ],
};

/// Picks the request rule set matching a method group's default location.
pub(crate) fn request_tags(default_location: ParameterLocation) -> &'static RuleSet {
    match default_location {
        ParameterLocation::Query => &REQUEST_QUERY_TAGS,
        _ => &REQUEST_BODY_TAGS,
    }
}

/// Whether a field opts out of every encoding with a `"-"` wire name on any
/// of the request/response tag keys. Terminal: decided once per field, no
/// matter what other tags it carries.
fn is_excluded(field: &Field) -> bool {
    field
        .tags
        .iter()
        .any(|tag| REQUEST_QUERY_TAGS.rule(&tag.key).is_some() && tag.name == "-")
}

/// Default wire name for a field landing in `location` with no renaming tag.
fn default_wire_name(location: ParameterLocation, name: &str) -> String {
    match location {
        ParameterLocation::Query => to_snake_case(name),
        _ => name.to_string(),
    }
}

/// Classifies one field under one context.
///
/// Returns `Ok(None)` when the field is excluded from the encoding.
pub(crate) fn classify(
    field: &Field,
    default_location: ParameterLocation,
    rules: &RuleSet,
    options: &Options,
) -> EncodingResult<Option<ParameterEncoding>> {
    let mut location = default_location;
    let mut wire_name = default_wire_name(location, &field.name);
    let mut src_name = field.name.clone();
    let mut omit_empty = false;
    let mut used_override: Option<&str> = None;

    for tag in &field.tags {
        if is_excluded(field) {
            return Ok(None);
        }
        let Some(rule) = rules.rule(&tag.key) else {
            continue;
        };
        if rule.overrides_default {
            if let Some(first) = used_override {
                return Err(EncodingError::TagConflict {
                    first: first.to_string(),
                    second: tag.key.clone(),
                });
            }
            location = rule.location;
            used_override = Some(tag.key.as_str());
        }
        if rule.location == location {
            wire_name = match rule.wire_formatter {
                Some(format) => format(&tag.name),
                None => tag.name.clone(),
            };
        }
        if let Some(option) = rule.omit_empty_option {
            if tag.options.iter().any(|o| o == option) {
                omit_empty = true;
            }
        }
        if options.src_name_tag.as_deref() == Some(tag.key.as_str()) {
            src_name = tag.name.clone();
        }
    }

    if wire_name == "-" {
        return Ok(None);
    }
    Ok(Some(ParameterEncoding {
        name: wire_name,
        location,
        omit_empty,
        src_name,
        doc: field.doc.clone(),
        typ: field.typ.clone(),
        raw_tag: field.raw_tag.clone(),
        optional: field.optional,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BuiltinKind, Tag, Type};

    fn tag(key: &str, name: &str, options: &[&str]) -> Tag {
        Tag {
            key: key.to_string(),
            name: name.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
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

    fn classify_ok(
        field: &Field,
        default_location: ParameterLocation,
        rules: &RuleSet,
    ) -> Option<ParameterEncoding> {
        classify(field, default_location, rules, &Options::default()).unwrap()
    }

    #[test]
    fn test_untagged_query_default_snake_cases() {
        let f = field("UserId", vec![]);
        let param = classify_ok(&f, ParameterLocation::Query, &REQUEST_QUERY_TAGS).unwrap();
        assert_eq!(param.location, ParameterLocation::Query);
        assert_eq!(param.name, "user_id");
        assert_eq!(param.src_name, "UserId");
    }

    #[test]
    fn test_untagged_body_default_keeps_name() {
        let f = field("UserId", vec![]);
        let param = classify_ok(&f, ParameterLocation::Body, &REQUEST_BODY_TAGS).unwrap();
        assert_eq!(param.location, ParameterLocation::Body);
        assert_eq!(param.name, "UserId");
    }

    #[test]
    fn test_header_override_lowercases_wire_name() {
        let f = field("Authorization", vec![tag("header", "X-API-Key", &[])]);
        let param = classify_ok(&f, ParameterLocation::Body, &REQUEST_BODY_TAGS).unwrap();
        assert_eq!(param.location, ParameterLocation::Header);
        assert_eq!(param.name, "x-api-key");
        assert_eq!(param.src_name, "Authorization");
    }

    #[test]
    fn test_qs_alias_overrides_like_query() {
        let f = field("Limit", vec![tag("qs", "max", &[])]);
        let param = classify_ok(&f, ParameterLocation::Query, &REQUEST_QUERY_TAGS).unwrap();
        assert_eq!(param.location, ParameterLocation::Query);
        assert_eq!(param.name, "max");
    }

    #[test]
    fn test_override_conflict() {
        let f = field(
            "Value",
            vec![tag("query", "a", &[]), tag("header", "b", &[])],
        );
        let err = classify(
            &f,
            ParameterLocation::Query,
            &REQUEST_QUERY_TAGS,
            &Options::default(),
        )
        .unwrap_err();
        match err {
            EncodingError::TagConflict { first, second } => {
                assert_eq!(first, "query");
                assert_eq!(second, "header");
            }
            other => panic!("expected tag conflict, got {other}"),
        }
    }

    #[test]
    fn test_query_tag_not_recognized_in_body_group() {
        // In a body-default group the query override is irrelevant; the
        // field stays in the body under its own name.
        let f = field("Bar", vec![tag("query", "bar", &[])]);
        let param = classify_ok(&f, ParameterLocation::Body, &REQUEST_BODY_TAGS).unwrap();
        assert_eq!(param.location, ParameterLocation::Body);
        assert_eq!(param.name, "Bar");
    }

    #[test]
    fn test_dash_tag_excludes_field() {
        let f = field("Secret", vec![tag("json", "-", &[])]);
        assert!(classify_ok(&f, ParameterLocation::Body, &REQUEST_BODY_TAGS).is_none());
    }

    #[test]
    fn test_dash_exclusion_is_terminal_across_tags() {
        // The exclusion wins even when another tag would have renamed the
        // field first.
        let f = field(
            "Secret",
            vec![tag("header", "X-Secret", &[]), tag("json", "-", &[])],
        );
        assert!(classify_ok(&f, ParameterLocation::Body, &REQUEST_BODY_TAGS).is_none());
    }

    #[test]
    fn test_dash_wire_name_excludes_field() {
        let f = field("Skipped", vec![tag("query", "-", &[])]);
        assert!(classify_ok(&f, ParameterLocation::Query, &REQUEST_QUERY_TAGS).is_none());
    }

    #[test]
    fn test_json_omitempty_sets_flag() {
        let f = field("Notes", vec![tag("json", "notes", &["omitempty"])]);
        let param = classify_ok(&f, ParameterLocation::Body, &REQUEST_BODY_TAGS).unwrap();
        assert_eq!(param.name, "notes");
        assert!(param.omit_empty);
    }

    #[test]
    fn test_json_omitempty_applies_outside_body_location() {
        // The omit-empty option is honored even when the json tag does not
        // control the wire name.
        let f = field("InternalNotes", vec![tag("json", "notes", &["omitempty"])]);
        let param = classify_ok(&f, ParameterLocation::Query, &REQUEST_QUERY_TAGS).unwrap();
        assert_eq!(param.location, ParameterLocation::Query);
        assert_eq!(param.name, "internal_notes");
        assert!(param.omit_empty);
    }

    #[test]
    fn test_src_name_tag_overrides_source_name() {
        let f = field("UserID", vec![tag("json", "user_id", &[])]);
        let options = Options {
            src_name_tag: Some("json".to_string()),
        };
        let param = classify(&f, ParameterLocation::Body, &REQUEST_BODY_TAGS, &options)
            .unwrap()
            .unwrap();
        assert_eq!(param.src_name, "user_id");
        assert_eq!(param.name, "user_id");
    }

    #[test]
    fn test_auth_field_without_tags_stays_undefined() {
        let f = field("Token", vec![]);
        let param = classify_ok(&f, ParameterLocation::Undefined, &AUTH_TAGS).unwrap();
        assert_eq!(param.location, ParameterLocation::Undefined);
    }

    #[test]
    fn test_auth_cookie_override() {
        let f = field("Session", vec![tag("cookie", "session", &["omitempty"])]);
        let param = classify_ok(&f, ParameterLocation::Undefined, &AUTH_TAGS).unwrap();
        assert_eq!(param.location, ParameterLocation::Cookie);
        assert_eq!(param.name, "session");
        assert!(param.omit_empty);
    }
}
