//! Errors reported during lowering.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Recoverable errors surfaced by the lowering pass.
///
/// Lowering stops at the first error; there is no accumulation. A kind
/// mismatch between a skeleton and the node filling it is deliberately not
/// represented here — that condition signals a defect in the resolver and
/// panics instead, so a logic bug can never masquerade as a diagnostic
/// about the input.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum LowerError {
    /// A name was bound twice in one namespace. The only sanctioned
    /// exception is an opaque type declaration later completed by a
    /// concrete definition of the same name, which is one logical
    /// definition rather than a duplicate.
    #[error("duplicate definition: `{name}` is already defined")]
    #[diagnostic(code(lumen_lower::duplicate_definition))]
    DuplicateDefinition {
        /// The name, with its sigil (`%t`, `@g`).
        name: String,
        /// Textual form of the earlier definition.
        prev: String,
        /// Textual form of the conflicting definition.
        new: String,
        #[label("redefined here")]
        span: SourceSpan,
        #[label("previously defined here")]
        prev_span: SourceSpan,
    },

    /// A referenced type, global or function name is absent from its table.
    #[error("unresolved identifier: unable to locate `{name}`")]
    #[diagnostic(code(lumen_lower::unresolved_identifier))]
    UnresolvedIdentifier {
        name: String,
        #[label("referenced here")]
        span: SourceSpan,
        #[help("is `{name}` defined in this module?")]
        help: Option<String>,
    },

    /// A named type resolves to itself through a chain of bare aliases.
    /// A compound type embedding its own name is not a cycle.
    #[error("invalid named type: self-referential alias chain through {}", names.join(", "))]
    #[diagnostic(code(lumen_lower::cyclic_type_alias))]
    CyclicTypeAlias {
        /// Every name on the cycle, sorted for deterministic reporting.
        names: Vec<String>,
        #[label("cycle detected here")]
        span: SourceSpan,
    },

    /// A local name (parameter, label or instruction result) is absent from
    /// the enclosing function's scope.
    #[error("unresolved local: unable to locate `{name}` in this function")]
    #[diagnostic(code(lumen_lower::unresolved_local))]
    UnresolvedLocal {
        name: String,
        #[label("referenced here")]
        span: SourceSpan,
    },

    /// A local name exists but is bound to the wrong kind of entity, such
    /// as a branch targeting an instruction result.
    #[error("local kind mismatch: `{name}` is {found}, expected {expected}")]
    #[diagnostic(code(lumen_lower::local_kind_mismatch))]
    LocalKindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
        #[label("referenced here")]
        span: SourceSpan,
    },

    /// A grammar-valid construct the resolver does not handle yet.
    #[error("unsupported construct: {construct}")]
    #[diagnostic(code(lumen_lower::unsupported_construct))]
    UnsupportedConstruct {
        construct: String,
        #[label("not supported here")]
        span: SourceSpan,
    },
}

/// Convert an AST span into a diagnostic span.
pub(crate) fn src(span: lumen_ast::Span) -> SourceSpan {
    (span.start, span.len()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_sorted_names() {
        let err = LowerError::CyclicTypeAlias {
            names: vec!["%a".to_string(), "%b".to_string()],
            span: (0, 0).into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid named type: self-referential alias chain through %a, %b"
        );
    }
}
