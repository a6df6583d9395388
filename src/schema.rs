#![deny(missing_docs)]

//! # Schema Model
//!
//! Definition of the immutable input graph the resolver consumes.
//!
//! These structs are produced by an external front-end (source parsing is out
//! of scope here) and transport declarations, struct fields and their raw
//! tags into the encoding resolver. Declarations live in an arena addressed
//! by [`DeclId`]; `Named` types hold only an id, never an owning reference,
//! so mutually and self-recursive declarations need no special casing.
//!
//! Nothing in this module is mutated after construction.

use crate::error::{EncodingError, EncodingResult};
use derive_more::Display;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier of a declaration within a [`SchemaGraph`].
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DeclId(pub u32);

/// A named top-level type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Identifier of this declaration within the graph.
    pub id: DeclId,
    /// Declared name (e.g. `ListParams`).
    pub name: String,
    /// Package or namespace the declaration belongs to.
    pub pkg: String,
    /// Ordered names of the generic type parameters, empty if non-generic.
    #[serde(default)]
    pub type_params: Vec<String>,
    /// The declared type.
    pub typ: Type,
}

/// The arena of declarations an application's schema is resolved against.
///
/// Iteration order follows insertion order, which keeps repeated resolutions
/// of the same graph byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaGraph {
    decls: IndexMap<DeclId, Declaration>,
}

impl SchemaGraph {
    /// Builds a graph from a list of declarations, indexed by their ids.
    pub fn new(decls: impl IntoIterator<Item = Declaration>) -> Self {
        Self {
            decls: decls.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    /// Looks up a declaration by id.
    ///
    /// A miss means the front-end handed us a dangling reference; surfaced
    /// as a value so callers can report it against the offending type.
    pub fn decl(&self, id: DeclId) -> EncodingResult<&Declaration> {
        self.decls
            .get(&id)
            .ok_or(EncodingError::UnknownDeclaration(id))
    }

    /// Number of declarations in the graph.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether the graph contains no declarations.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

/// Fixed set of builtin scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinKind {
    /// Boolean.
    Bool,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// UTF-8 string.
    String,
    /// Raw byte string.
    Bytes,
    /// Timestamp.
    Time,
    /// Arbitrary JSON value.
    Json,
    /// UUID.
    Uuid,
    /// Opaque user identifier.
    UserId,
    /// Arbitrary-precision decimal.
    Decimal,
    /// Any value; opts out of static typing.
    Any,
}

/// A literal value appearing in a type position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralValue {
    /// String literal.
    Str(String),
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
}

/// A struct type: an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    /// The fields, in declaration order.
    pub fields: Vec<Field>,
}

/// A reference to a declaration, with type arguments supplied at the
/// reference site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedType {
    /// The referenced declaration.
    pub decl: DeclId,
    /// Type arguments for the declaration's generic parameters.
    #[serde(default)]
    pub type_args: Vec<Type>,
}

/// The closed union of type shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// A builtin scalar.
    Builtin(BuiltinKind),
    /// A reference to a declaration.
    Named(NamedType),
    /// An anonymous struct.
    Struct(StructType),
    /// A list of elements.
    List(Box<Type>),
    /// A map from keys to values.
    Map {
        /// Key type.
        key: Box<Type>,
        /// Value type.
        value: Box<Type>,
    },
    /// A pointer to a base type.
    Pointer(Box<Type>),
    /// A configuration wrapper; transparent for encoding purposes.
    Config {
        /// The wrapped type.
        elem: Box<Type>,
        /// Whether the wrapper holds a list of values.
        values_list: bool,
    },
    /// A generic type parameter, only meaningful inside the body of the
    /// declaration that introduced it.
    TypeParameter {
        /// The declaration the parameter belongs to.
        decl: DeclId,
        /// Index into that declaration's `type_params`.
        index: usize,
    },
    /// A literal value used as a type.
    Literal(LiteralValue),
    /// A union of alternative types.
    Union(Vec<Type>),
}

impl Type {
    /// Short name of the type's shape, for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Type::Builtin(_) => "builtin",
            Type::Named(_) => "named",
            Type::Struct(_) => "struct",
            Type::List(_) => "list",
            Type::Map { .. } => "map",
            Type::Pointer(_) => "pointer",
            Type::Config { .. } => "config",
            Type::TypeParameter { .. } => "type parameter",
            Type::Literal(_) => "literal",
            Type::Union(_) => "union",
        }
    }
}

/// A single field of a struct type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// The field name in the host struct.
    pub name: String,
    /// Documentation attached to the field.
    #[serde(default)]
    pub doc: String,
    /// Whether the field is optional.
    #[serde(default)]
    pub optional: bool,
    /// The declared type of the field.
    pub typ: Type,
    /// The unparsed tag string, carried verbatim for downstream consumers.
    #[serde(default)]
    pub raw_tag: String,
    /// The parsed tags, in declaration order.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A parsed field tag, e.g. `` `query:"user_id,omitempty"` ``.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag key (e.g. `query`, `header`, `json`).
    pub key: String,
    /// The tag's positional value, used as the wire name when applicable.
    pub name: String,
    /// Trailing options (e.g. `omitempty`), in declaration order.
    #[serde(default)]
    pub options: Vec<String>,
}

/// One segment of an endpoint's URL path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// How the segment is matched.
    pub kind: PathSegmentKind,
    /// The literal value or parameter name.
    pub value: String,
}

/// Classification of a [`PathSegment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSegmentKind {
    /// A fixed literal segment.
    Literal,
    /// A single-segment parameter.
    Param,
    /// A trailing wildcard parameter.
    Wildcard,
}

/// One API endpoint definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rpc {
    /// The endpoint name.
    pub name: String,
    /// Documentation attached to the endpoint.
    #[serde(default)]
    pub doc: String,
    /// The URL path segments.
    #[serde(default)]
    pub path: Vec<PathSegment>,
    /// The HTTP methods the endpoint accepts. `"*"` accepts all methods.
    pub http_methods: Vec<String>,
    /// The request payload schema, absent for parameterless endpoints.
    pub request_schema: Option<Type>,
    /// The response payload schema, absent for bodyless responses.
    pub response_schema: Option<Type>,
}

/// A group of endpoints belonging to one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// The service name.
    pub name: String,
    /// Documentation attached to the service.
    #[serde(default)]
    pub doc: String,
    /// The service's endpoints, in declaration order.
    pub rpcs: Vec<Rpc>,
}

/// An application's authentication handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthHandler {
    /// The handler name.
    pub name: String,
    /// The handler's parameter schema.
    pub params: Type,
}

/// A whole application: every service plus the optional auth handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    /// The application's services, in declaration order.
    pub services: Vec<Service>,
    /// The authentication handler, if the application declares one.
    pub auth_handler: Option<AuthHandler>,
}
