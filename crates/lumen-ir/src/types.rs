//! The type arena.
//!
//! Every type in a module, named or anonymous, lives in one [`Types`] arena
//! owned by the module. A [`TypeId`] is the identity of a type: two
//! references to the same named type hold the same id and therefore observe
//! the same node, which is what lets mutually recursive types exist without
//! reference cycles. Slots are created empty (skeletons) and filled in place
//! in a second pass.

use std::fmt;

pub use lumen_ast::FloatKind;

/// Index of a type in the module's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    /// Placeholder stored in a compound slot between the skeleton and fill
    /// phases. A successfully lowered module never contains it.
    pub const INVALID: TypeId = TypeId(u32::MAX);

    /// The arena index this id denotes.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The structure of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Void,
    Int {
        bits: u32,
    },
    Float(FloatKind),
    Pointer {
        elem: TypeId,
        addr_space: u32,
    },
    Array {
        len: u64,
        elem: TypeId,
    },
    Vector {
        len: u64,
        elem: TypeId,
    },
    Struct {
        fields: Vec<TypeId>,
        packed: bool,
        /// A declared body is still pending. Set for `opaque` definitions.
        opaque: bool,
    },
    Func {
        ret: TypeId,
        params: Vec<TypeId>,
        variadic: bool,
    },
    Label,
    Token,
    Metadata,
    Mmx,
}

impl TypeKind {
    /// A short noun for diagnostics and internal assertions.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeKind::Void => "void",
            TypeKind::Int { .. } => "integer",
            TypeKind::Float(_) => "floating-point",
            TypeKind::Pointer { .. } => "pointer",
            TypeKind::Array { .. } => "array",
            TypeKind::Vector { .. } => "vector",
            TypeKind::Struct { .. } => "struct",
            TypeKind::Func { .. } => "function",
            TypeKind::Label => "label",
            TypeKind::Token => "token",
            TypeKind::Metadata => "metadata",
            TypeKind::Mmx => "x86_mmx",
        }
    }
}

/// One arena slot: the optional definition name plus the structure.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeData {
    /// The name this slot was defined under, for named type definitions.
    pub name: Option<String>,
    pub kind: TypeKind,
}

/// The arena of all types in a module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Types {
    slots: Vec<TypeData>,
}

impl Types {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new slot and return its id.
    pub fn alloc(&mut self, name: Option<String>, kind: TypeKind) -> TypeId {
        let id = TypeId(u32::try_from(self.slots.len()).expect("type arena overflow"));
        self.slots.push(TypeData { name, kind });
        id
    }

    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.slots[id.index()]
    }

    pub fn get_mut(&mut self, id: TypeId) -> &mut TypeData {
        &mut self.slots[id.index()]
    }

    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.get(id).kind
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Render the reference form of a type: `%name` for named slots, the
    /// structural form otherwise.
    pub fn display(&self, id: TypeId) -> TypeDisplay<'_> {
        TypeDisplay {
            types: self,
            id,
            as_def: false,
        }
    }

    /// Render the structural form of a slot, even when it is named. Used for
    /// printing type definition bodies.
    pub fn display_def(&self, id: TypeId) -> TypeDisplay<'_> {
        TypeDisplay {
            types: self,
            id,
            as_def: true,
        }
    }
}

/// Borrowing pretty-printer for a type; nested named types print as `%name`,
/// which also terminates recursive structures.
pub struct TypeDisplay<'a> {
    types: &'a Types,
    id: TypeId,
    as_def: bool,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.types.get(self.id);
        if !self.as_def {
            if let Some(name) = &data.name {
                return write!(f, "%{}", name);
            }
        }
        let nested = |id| self.types.display(id);
        match &data.kind {
            TypeKind::Void => write!(f, "void"),
            TypeKind::Int { bits } => write!(f, "i{}", bits),
            TypeKind::Float(kind) => write!(f, "{}", kind),
            TypeKind::Pointer { elem, addr_space } => {
                if *addr_space != 0 {
                    write!(f, "{} addrspace({})*", nested(*elem), addr_space)
                } else {
                    write!(f, "{}*", nested(*elem))
                }
            }
            TypeKind::Array { len, elem } => write!(f, "[{} x {}]", len, nested(*elem)),
            TypeKind::Vector { len, elem } => write!(f, "<{} x {}>", len, nested(*elem)),
            TypeKind::Struct {
                fields,
                packed,
                opaque,
            } => {
                if *opaque {
                    return write!(f, "opaque");
                }
                let (open, close) = if *packed { ("<{", "}>") } else { ("{", "}") };
                write!(f, "{} ", open)?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", nested(*field))?;
                }
                write!(f, " {}", close)
            }
            TypeKind::Func {
                ret,
                params,
                variadic,
            } => {
                write!(f, "{} (", nested(*ret))?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", nested(*param))?;
                }
                if *variadic {
                    if !params.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "...")?;
                }
                write!(f, ")")
            }
            TypeKind::Label => write!(f, "label"),
            TypeKind::Token => write!(f, "token"),
            TypeKind::Metadata => write!(f, "metadata"),
            TypeKind::Mmx => write!(f, "x86_mmx"),
        }
    }
}
