//! Attribute keywords carried on global variables and functions.

use std::fmt;

/// Linkage kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Linkage {
    Private,
    Internal,
    AvailableExternally,
    LinkOnce,
    LinkOnceOdr,
    Weak,
    WeakOdr,
    Common,
    Appending,
    ExternWeak,
    External,
}

/// Runtime preemption specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preemption {
    DsoLocal,
    DsoPreemptable,
}

/// Symbol visibility styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Default,
    Hidden,
    Protected,
}

/// DLL storage classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DllStorageClass {
    DllImport,
    DllExport,
}

/// Thread-local storage models, as written inside `thread_local(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlsModel {
    LocalDynamic,
    InitialExec,
    LocalExec,
}

/// A `thread_local` marker, with an optional explicit model.
///
/// Bare `thread_local` selects the general-dynamic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadLocal {
    pub model: Option<TlsModel>,
}

/// Unnamed-address policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnnamedAddr {
    UnnamedAddr,
    LocalUnnamedAddr,
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Linkage::Private => "private",
            Linkage::Internal => "internal",
            Linkage::AvailableExternally => "available_externally",
            Linkage::LinkOnce => "linkonce",
            Linkage::LinkOnceOdr => "linkonce_odr",
            Linkage::Weak => "weak",
            Linkage::WeakOdr => "weak_odr",
            Linkage::Common => "common",
            Linkage::Appending => "appending",
            Linkage::ExternWeak => "extern_weak",
            Linkage::External => "external",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for Preemption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Preemption::DsoLocal => "dso_local",
            Preemption::DsoPreemptable => "dso_preemptable",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Visibility::Default => "default",
            Visibility::Hidden => "hidden",
            Visibility::Protected => "protected",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for DllStorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DllStorageClass::DllImport => "dllimport",
            DllStorageClass::DllExport => "dllexport",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for TlsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TlsModel::LocalDynamic => "localdynamic",
            TlsModel::InitialExec => "initialexec",
            TlsModel::LocalExec => "localexec",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for ThreadLocal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model {
            Some(model) => write!(f, "thread_local({})", model),
            None => write!(f, "thread_local"),
        }
    }
}

impl fmt::Display for UnnamedAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnnamedAddr::UnnamedAddr => "unnamed_addr",
            UnnamedAddr::LocalUnnamedAddr => "local_unnamed_addr",
        };
        write!(f, "{}", text)
    }
}
