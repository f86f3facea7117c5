//! Field type classification.
//!
//! Every annotated field carries a [`FieldType`]: a primitive [`TypeKind`]
//! plus flags describing whether the value sits behind a pointer-like
//! wrapper (`Option<T>`, `Box<T>`, `&T`) or inside a collection
//! (`Vec<T>`, `[T]`). Tokens are parsed with `syn`, so qualified paths
//! such as `std::string::String` classify by their last segment.
//! Classification is total: anything that is not a recognised primitive
//! becomes [`TypeKind::Unknown`] (or [`TypeKind::Struct`] for capitalised
//! type paths), and no built-in rule accepts either.

use serde::{Deserialize, Serialize};
use std::fmt;
use syn::{AngleBracketedGenericArguments, GenericArgument, PathArguments, Type};

/// Primitive kind of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Not a recognised primitive.
    #[default]
    Unknown,
    String,
    /// Platform-sized signed integer (`isize`).
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform-sized unsigned integer (`usize`).
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Bool,
    /// A user-defined record type.
    Struct,
}

impl TypeKind {
    /// Every kind, in declaration order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Unknown,
            Self::String,
            Self::Int,
            Self::Int8,
            Self::Int16,
            Self::Int32,
            Self::Int64,
            Self::Uint,
            Self::Uint8,
            Self::Uint16,
            Self::Uint32,
            Self::Uint64,
            Self::Float32,
            Self::Float64,
            Self::Bool,
            Self::Struct,
        ]
    }

    /// Canonical lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::String => "string",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Struct => "struct",
        }
    }

    /// Returns true for the signed and unsigned integer kinds.
    pub fn is_integer(&self) -> bool {
        self.integer_range().is_some()
    }

    /// Returns true for the floating point kinds.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Inclusive value range of an integer kind.
    ///
    /// Platform-sized kinds use the 64-bit range.
    pub fn integer_range(&self) -> Option<(i128, i128)> {
        let range = match self {
            Self::Int8 => (i8::MIN as i128, i8::MAX as i128),
            Self::Int16 => (i16::MIN as i128, i16::MAX as i128),
            Self::Int32 => (i32::MIN as i128, i32::MAX as i128),
            Self::Int | Self::Int64 => (i64::MIN as i128, i64::MAX as i128),
            Self::Uint8 => (0, u8::MAX as i128),
            Self::Uint16 => (0, u16::MAX as i128),
            Self::Uint32 => (0, u32::MAX as i128),
            Self::Uint | Self::Uint64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    /// Classify a single type name without wrappers or path prefix.
    ///
    /// Accepts Rust primitive spellings as well as the canonical kind names.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "String" | "str" | "string" => Self::String,
            "isize" | "int" => Self::Int,
            "i8" | "int8" => Self::Int8,
            "i16" | "int16" => Self::Int16,
            "i32" | "int32" => Self::Int32,
            "i64" | "int64" => Self::Int64,
            "usize" | "uint" => Self::Uint,
            "u8" | "uint8" => Self::Uint8,
            "u16" | "uint16" => Self::Uint16,
            "u32" | "uint32" => Self::Uint32,
            "u64" | "uint64" => Self::Uint64,
            "f32" | "float32" => Self::Float32,
            "f64" | "float64" => Self::Float64,
            "bool" => Self::Bool,
            "struct" => Self::Struct,
            other if is_type_name(other) => Self::Struct,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A capitalised identifier such as `Address`.
fn is_type_name(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// A fixed set of kinds a rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSet(pub &'static [TypeKind]);

impl TypeSet {
    pub const STRING: Self = Self(&[TypeKind::String]);

    pub const INTEGER: Self = Self(&[
        TypeKind::Int,
        TypeKind::Int8,
        TypeKind::Int16,
        TypeKind::Int32,
        TypeKind::Int64,
        TypeKind::Uint,
        TypeKind::Uint8,
        TypeKind::Uint16,
        TypeKind::Uint32,
        TypeKind::Uint64,
    ]);

    pub const STRING_AND_INTEGER: Self = Self(&[
        TypeKind::String,
        TypeKind::Int,
        TypeKind::Int8,
        TypeKind::Int16,
        TypeKind::Int32,
        TypeKind::Int64,
        TypeKind::Uint,
        TypeKind::Uint8,
        TypeKind::Uint16,
        TypeKind::Uint32,
        TypeKind::Uint64,
    ]);

    /// Every primitive kind (excludes `unknown` and `struct`).
    pub const PRIMITIVE: Self = Self(&[
        TypeKind::String,
        TypeKind::Int,
        TypeKind::Int8,
        TypeKind::Int16,
        TypeKind::Int32,
        TypeKind::Int64,
        TypeKind::Uint,
        TypeKind::Uint8,
        TypeKind::Uint16,
        TypeKind::Uint32,
        TypeKind::Uint64,
        TypeKind::Float32,
        TypeKind::Float64,
        TypeKind::Bool,
    ]);

    pub fn contains(&self, kind: TypeKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn kinds(&self) -> &'static [TypeKind] {
        self.0
    }
}

/// Wrapper a field value sits behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wrapper {
    Option,
    Box,
    Rc,
    Arc,
    /// `&T` other than `&str`.
    Ref,
    Vec,
    /// `[T]` or `&[T]`.
    Slice,
}

impl Wrapper {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Option" => Some(Self::Option),
            "Box" => Some(Self::Box),
            "Rc" => Some(Self::Rc),
            "Arc" => Some(Self::Arc),
            "Vec" => Some(Self::Vec),
            _ => None,
        }
    }

    pub fn is_collection(self) -> bool {
        matches!(self, Self::Vec | Self::Slice)
    }
}

/// Type information for an annotated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FieldType {
    /// Kind of the value, or of the wrapped element for wrapped types.
    pub kind: TypeKind,
    /// Value sits behind `Option`, `Box`, `Rc`, `Arc` or a reference.
    #[serde(default)]
    pub is_pointer: bool,
    /// Value is a `Vec` or slice.
    #[serde(default)]
    pub is_collection: bool,
    /// Element kind; only meaningful when the type is wrapped.
    #[serde(default)]
    pub underlying_kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<Wrapper>,
}

impl FieldType {
    /// A plain, unwrapped value of the given kind.
    pub fn plain(kind: TypeKind) -> Self {
        Self {
            kind,
            is_pointer: false,
            is_collection: false,
            underlying_kind: TypeKind::Unknown,
            wrapper: None,
        }
    }

    /// `kind` behind the given wrapper.
    pub fn wrapped(wrapper: Wrapper, kind: TypeKind) -> Self {
        Self {
            kind,
            is_pointer: !wrapper.is_collection(),
            is_collection: wrapper.is_collection(),
            underlying_kind: kind,
            wrapper: Some(wrapper),
        }
    }

    /// `Option<kind>`.
    pub fn pointer(kind: TypeKind) -> Self {
        Self::wrapped(Wrapper::Option, kind)
    }

    /// `Vec<kind>`.
    pub fn collection(kind: TypeKind) -> Self {
        Self::wrapped(Wrapper::Vec, kind)
    }

    /// Returns true when the value is behind a pointer or inside a collection.
    pub fn is_wrapped(&self) -> bool {
        self.is_pointer || self.is_collection
    }

    /// Classify a type token as written in a record definition.
    ///
    /// Tokens that do not parse as a Rust type are `unknown`.
    pub fn classify(token: &str) -> Self {
        let token = token.trim();
        if token == "struct" {
            return Self::plain(TypeKind::Struct);
        }
        match syn::parse_str::<Type>(token) {
            Ok(ty) => Self::from_syn(&ty),
            Err(_) => Self::plain(TypeKind::Unknown),
        }
    }

    /// Classify a parsed type.
    ///
    /// Paths are classified by their last segment, so `std::string::String`
    /// is a string. `&str` is a plain string. Only one level of wrapping is
    /// understood; `Option<Vec<String>>` is a pointer to an unknown kind.
    pub fn from_syn(ty: &Type) -> Self {
        match ty {
            Type::Group(group) => Self::from_syn(&group.elem),
            Type::Paren(paren) => Self::from_syn(&paren.elem),
            Type::Reference(reference) => match reference.elem.as_ref() {
                Type::Slice(slice) => Self::wrapped(Wrapper::Slice, element_kind(&slice.elem)),
                elem if is_bare_str(elem) => Self::plain(TypeKind::String),
                elem => Self::wrapped(Wrapper::Ref, element_kind(elem)),
            },
            Type::Slice(slice) => Self::wrapped(Wrapper::Slice, element_kind(&slice.elem)),
            Type::Path(path) if path.qself.is_none() => {
                let Some(segment) = path.path.segments.last() else {
                    return Self::plain(TypeKind::Unknown);
                };
                let name = segment.ident.to_string();
                match &segment.arguments {
                    PathArguments::None => Self::plain(TypeKind::from_token(&name)),
                    PathArguments::AngleBracketed(args) => {
                        match (Wrapper::from_name(&name), single_type_argument(args)) {
                            (Some(wrapper), Some(inner)) => Self::wrapped(wrapper, element_kind(inner)),
                            _ => Self::plain(TypeKind::Unknown),
                        }
                    }
                    PathArguments::Parenthesized(_) => Self::plain(TypeKind::Unknown),
                }
            }
            _ => Self::plain(TypeKind::Unknown),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wrapper {
            Some(Wrapper::Ref) => write!(f, "&{}", self.kind),
            Some(Wrapper::Slice) => write!(f, "[{}]", self.kind),
            Some(wrapper) => write!(f, "{wrapper:?}<{}>", self.kind),
            None if self.is_pointer => write!(f, "pointer<{}>", self.kind),
            None if self.is_collection => write!(f, "collection<{}>", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl From<&str> for FieldType {
    fn from(token: &str) -> Self {
        Self::classify(token)
    }
}

impl From<&Type> for FieldType {
    fn from(ty: &Type) -> Self {
        Self::from_syn(ty)
    }
}

/// Kind of a wrapped element; nested wrappers are `unknown`.
fn element_kind(ty: &Type) -> TypeKind {
    let inner = FieldType::from_syn(ty);
    if inner.is_wrapped() { TypeKind::Unknown } else { inner.kind }
}

fn is_bare_str(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path.qself.is_none() && path.path.is_ident("str"),
        _ => false,
    }
}

fn single_type_argument(args: &AngleBracketedGenericArguments) -> Option<&Type> {
    let mut iter = args.args.iter();
    match (iter.next(), iter.next()) {
        (Some(GenericArgument::Type(inner)), None) => Some(inner),
        _ => None,
    }
}
