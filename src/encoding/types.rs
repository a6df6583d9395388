#![deny(missing_docs)]

//! # Generic Type Resolution
//!
//! Logic for substituting generic type arguments into a declaration's type,
//! producing the concrete struct an encoding is computed from.
//!
//! Substitution is deliberately one level deep: a `Named` reference's own
//! declaration body is only resolved when that reference is itself walked.
//! Eager resolution would diverge on recursive generic declarations such as
//! `Tree<T> { value: T, children: List<Tree<T>> }`.

use crate::error::{EncodingError, EncodingResult};
use crate::schema::{DeclId, SchemaGraph, StructType, Type};
use std::collections::HashSet;

/// Resolves types against a schema graph.
///
/// Holds the bounded-recursion guard for one resolution call. Create one
/// resolver per call; guards must not be shared across concurrent
/// resolutions.
pub(crate) struct TypeResolver<'a> {
    graph: &'a SchemaGraph,
    /// Instantiations entered on the current chain, keyed by declaration id
    /// and a deterministic fingerprint of the type arguments.
    visiting: HashSet<(DeclId, String)>,
    /// Declaration names in entry order, reported on guard failure.
    chain: Vec<String>,
}

impl<'a> TypeResolver<'a> {
    pub(crate) fn new(graph: &'a SchemaGraph) -> Self {
        Self {
            graph,
            visiting: HashSet::new(),
            chain: Vec::new(),
        }
    }

    /// Resolves `typ` under the given type arguments to a concrete shape.
    ///
    /// `Named` references are transparent: the referenced declaration's type
    /// is resolved under the reference's own arguments. Builtins, structs and
    /// containers are returned with one level of substitution applied.
    pub(crate) fn concrete(&mut self, typ: &Type, type_args: &[Type]) -> EncodingResult<Type> {
        let typ = if type_args.is_empty() {
            typ.clone()
        } else {
            substitute(typ, type_args)?
        };
        match typ {
            Type::Named(named) => {
                let decl = self.graph.decl(named.decl)?;
                let (decl_name, decl_typ) = (decl.name.clone(), decl.typ.clone());
                if !self.visiting.insert((named.decl, fingerprint(&named.type_args))) {
                    self.chain.push(decl_name);
                    return Err(EncodingError::RecursiveGenericInstantiation {
                        chain: std::mem::take(&mut self.chain),
                    });
                }
                self.chain.push(decl_name);
                self.concrete(&decl_typ, &named.type_args)
            }
            Type::Builtin(_)
            | Type::Struct(_)
            | Type::List(_)
            | Type::Map { .. }
            | Type::Pointer(_)
            | Type::Config { .. } => Ok(typ),
            other => Err(EncodingError::UnsupportedType(format!(
                "cannot resolve a bare {} to a concrete type",
                other.shape_name()
            ))),
        }
    }

    /// Resolves `typ` all the way down to the underlying struct.
    ///
    /// Pointers and config wrappers are transparent here: both resolve to
    /// the encoding of what they wrap.
    pub(crate) fn concrete_struct(&mut self, typ: &Type) -> EncodingResult<StructType> {
        let mut current = self.concrete(typ, &[])?;
        loop {
            match current {
                Type::Struct(st) => return Ok(st),
                Type::Pointer(base) => current = self.concrete(&base, &[])?,
                Type::Config { elem, .. } => current = self.concrete(&elem, &[])?,
                other => {
                    return Err(EncodingError::UnsupportedType(format!(
                        "expected a struct schema, found a {}",
                        other.shape_name()
                    )))
                }
            }
        }
    }
}

/// Deterministic rendering of a type-argument list, used to key the
/// recursion guard.
fn fingerprint(type_args: &[Type]) -> String {
    format!("{:?}", type_args)
}

/// Performs one level of type-parameter substitution.
///
/// A `TypeParameter` at index `i` becomes `type_args[i]`; containers and
/// struct fields recurse into their immediate children only.
fn substitute(typ: &Type, type_args: &[Type]) -> EncodingResult<Type> {
    let substituted = match typ {
        Type::TypeParameter { decl, index } => {
            return type_args.get(*index).cloned().ok_or_else(|| {
                EncodingError::UnsupportedType(format!(
                    "type parameter {} of declaration {} has no matching type argument",
                    index, decl
                ))
            })
        }
        Type::Builtin(_) | Type::Literal(_) => typ.clone(),
        Type::Named(named) => {
            let type_args = named
                .type_args
                .iter()
                .map(|t| substitute(t, type_args))
                .collect::<EncodingResult<Vec<_>>>()?;
            Type::Named(crate::schema::NamedType {
                decl: named.decl,
                type_args,
            })
        }
        Type::Struct(st) => {
            let fields = st
                .fields
                .iter()
                .map(|f| {
                    let mut f = f.clone();
                    f.typ = substitute(&f.typ, type_args)?;
                    Ok(f)
                })
                .collect::<EncodingResult<Vec<_>>>()?;
            Type::Struct(StructType { fields })
        }
        Type::List(elem) => Type::List(Box::new(substitute(elem, type_args)?)),
        Type::Map { key, value } => Type::Map {
            key: Box::new(substitute(key, type_args)?),
            value: Box::new(substitute(value, type_args)?),
        },
        Type::Pointer(base) => Type::Pointer(Box::new(substitute(base, type_args)?)),
        Type::Config { elem, values_list } => Type::Config {
            elem: Box::new(substitute(elem, type_args)?),
            values_list: *values_list,
        },
        Type::Union(alts) => Type::Union(
            alts.iter()
                .map(|t| substitute(t, type_args))
                .collect::<EncodingResult<Vec<_>>>()?,
        ),
    };
    Ok(substituted)
}
