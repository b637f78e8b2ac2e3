//! Top-level entities.

use std::fmt;

use crate::attrs::{DllStorageClass, Linkage, Preemption, ThreadLocal, UnnamedAddr, Visibility};
use crate::constant::Const;
use crate::inst::BasicBlock;
use crate::span::Span;
use crate::types::TypeExpr;

/// A parsed module: the ordered sequence of top-level entities.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub entities: Vec<Entity>,
}

/// A top-level entity.
///
/// `AliasDef` and `IFuncDef` are recognized by the grammar but not lowered.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    TypeDef(TypeDef),
    GlobalDecl(GlobalDecl),
    GlobalDef(GlobalDef),
    FuncDecl(FuncDecl),
    FuncDef(FuncDef),
    AliasDef(AliasDef),
    IFuncDef(IFuncDef),
}

/// A type definition, `%name = type <body>`.
///
/// The body may be `opaque`; a later definition of the same name may then
/// supply the concrete body.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

/// A global variable declaration, `@name = external global <ty>`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalDecl {
    pub name: String,
    pub linkage: Option<Linkage>,
    pub preemption: Option<Preemption>,
    pub visibility: Option<Visibility>,
    pub dll_storage_class: Option<DllStorageClass>,
    pub thread_local: Option<ThreadLocal>,
    pub unnamed_addr: Option<UnnamedAddr>,
    pub addr_space: Option<u32>,
    pub externally_initialized: bool,
    /// `constant` rather than `global`.
    pub immutable: bool,
    pub content_ty: TypeExpr,
    pub span: Span,
}

/// A global variable definition, `@name = global <ty> <init>`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalDef {
    pub name: String,
    pub linkage: Option<Linkage>,
    pub preemption: Option<Preemption>,
    pub visibility: Option<Visibility>,
    pub dll_storage_class: Option<DllStorageClass>,
    pub thread_local: Option<ThreadLocal>,
    pub unnamed_addr: Option<UnnamedAddr>,
    pub addr_space: Option<u32>,
    pub externally_initialized: bool,
    pub immutable: bool,
    pub content_ty: TypeExpr,
    pub init: Const,
    pub span: Span,
}

/// The shared header of a function declaration or definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncHeader {
    pub name: String,
    pub linkage: Option<Linkage>,
    pub preemption: Option<Preemption>,
    pub visibility: Option<Visibility>,
    pub dll_storage_class: Option<DllStorageClass>,
    pub unnamed_addr: Option<UnnamedAddr>,
    pub addr_space: Option<u32>,
    pub ret: TypeExpr,
    pub params: Vec<Param>,
    pub variadic: bool,
    pub span: Span,
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: TypeExpr,
    pub name: Option<String>,
}

/// A function declaration, `declare <header>`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub header: FuncHeader,
    pub span: Span,
}

/// A function definition, `define <header> { <blocks> }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub header: FuncHeader,
    pub body: Vec<BasicBlock>,
    pub span: Span,
}

/// An alias definition, `@name = alias <ty>, <aliasee>`.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDef {
    pub name: String,
    pub aliasee: String,
    pub span: Span,
}

/// An ifunc definition, `@name = ifunc <ty>, <resolver>`.
#[derive(Debug, Clone, PartialEq)]
pub struct IFuncDef {
    pub name: String,
    pub resolver: String,
    pub span: Span,
}

impl Entity {
    /// The declared name, when the entity kind has one.
    pub fn name(&self) -> &str {
        match self {
            Entity::TypeDef(def) => &def.name,
            Entity::GlobalDecl(decl) => &decl.name,
            Entity::GlobalDef(def) => &def.name,
            Entity::FuncDecl(decl) => &decl.header.name,
            Entity::FuncDef(def) => &def.header.name,
            Entity::AliasDef(def) => &def.name,
            Entity::IFuncDef(def) => &def.name,
        }
    }

    /// The source span of the whole entity.
    pub fn span(&self) -> Span {
        match self {
            Entity::TypeDef(def) => def.span,
            Entity::GlobalDecl(decl) => decl.span,
            Entity::GlobalDef(def) => def.span,
            Entity::FuncDecl(decl) => decl.span,
            Entity::FuncDef(def) => def.span,
            Entity::AliasDef(def) => def.span,
            Entity::IFuncDef(def) => def.span,
        }
    }
}

fn write_space_sep(f: &mut fmt::Formatter<'_>, part: Option<impl fmt::Display>) -> fmt::Result {
    if let Some(part) = part {
        write!(f, "{} ", part)?;
    }
    Ok(())
}

// Global declarations and definitions render identically up to the
// initializer, factor the prefix out.
fn write_global_prefix(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    linkage: Option<Linkage>,
    preemption: Option<Preemption>,
    visibility: Option<Visibility>,
    dll_storage_class: Option<DllStorageClass>,
    thread_local: Option<ThreadLocal>,
    unnamed_addr: Option<UnnamedAddr>,
    addr_space: Option<u32>,
    externally_initialized: bool,
    immutable: bool,
) -> fmt::Result {
    write!(f, "@{} = ", name)?;
    write_space_sep(f, linkage)?;
    write_space_sep(f, preemption)?;
    write_space_sep(f, visibility)?;
    write_space_sep(f, dll_storage_class)?;
    write_space_sep(f, thread_local)?;
    write_space_sep(f, unnamed_addr)?;
    if let Some(n) = addr_space {
        write!(f, "addrspace({}) ", n)?;
    }
    if externally_initialized {
        write!(f, "externally_initialized ")?;
    }
    write!(f, "{}", if immutable { "constant" } else { "global" })
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{} = type {}", self.name, self.ty)
    }
}

impl fmt::Display for GlobalDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_global_prefix(
            f,
            &self.name,
            self.linkage,
            self.preemption,
            self.visibility,
            self.dll_storage_class,
            self.thread_local,
            self.unnamed_addr,
            self.addr_space,
            self.externally_initialized,
            self.immutable,
        )?;
        write!(f, " {}", self.content_ty)
    }
}

impl fmt::Display for GlobalDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_global_prefix(
            f,
            &self.name,
            self.linkage,
            self.preemption,
            self.visibility,
            self.dll_storage_class,
            self.thread_local,
            self.unnamed_addr,
            self.addr_space,
            self.externally_initialized,
            self.immutable,
        )?;
        write!(f, " {} {}", self.content_ty, self.init)
    }
}

impl fmt::Display for FuncHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_space_sep(f, self.linkage)?;
        write_space_sep(f, self.preemption)?;
        write_space_sep(f, self.visibility)?;
        write_space_sep(f, self.dll_storage_class)?;
        write!(f, "{} @{}(", self.ret, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.ty)?;
            if let Some(name) = &param.name {
                write!(f, " %{}", name)?;
            }
        }
        if self.variadic {
            if !self.params.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "...")?;
        }
        write!(f, ")")?;
        if let Some(ua) = self.unnamed_addr {
            write!(f, " {}", ua)?;
        }
        if let Some(n) = self.addr_space {
            write!(f, " addrspace({})", n)?;
        }
        Ok(())
    }
}

impl fmt::Display for FuncDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "declare {}", self.header)
    }
}

impl fmt::Display for FuncDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bodies are elided; diagnostics only need the header form.
        write!(f, "define {} {{ ... }}", self.header)
    }
}

impl fmt::Display for AliasDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} = alias @{}", self.name, self.aliasee)
    }
}

impl fmt::Display for IFuncDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} = ifunc @{}", self.name, self.resolver)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::TypeDef(def) => write!(f, "{}", def),
            Entity::GlobalDecl(decl) => write!(f, "{}", decl),
            Entity::GlobalDef(def) => write!(f, "{}", def),
            Entity::FuncDecl(decl) => write!(f, "{}", decl),
            Entity::FuncDef(def) => write!(f, "{}", def),
            Entity::AliasDef(def) => write!(f, "{}", def),
            Entity::IFuncDef(def) => write!(f, "{}", def),
        }
    }
}
