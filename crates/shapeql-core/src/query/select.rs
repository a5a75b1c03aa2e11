use crate::{
    QueryError,
    shape::{Member, TypeDescriptor},
};

///
/// Selector resolution
///
/// A textual selector must be exactly one identifier naming a direct member
/// of the root type. Everything else is rejected before any metadata is
/// touched.
///

pub(crate) fn resolve_selector<'a>(
    root: &'a TypeDescriptor,
    selector: &str,
) -> Result<&'a Member, QueryError> {
    let trimmed = selector.trim();
    let ident = trimmed.strip_prefix("r#").unwrap_or(trimmed);

    if !is_identifier(ident) {
        let err = QueryError::unsupported_selector(selector, rejection_reason(trimmed));
        tracing::debug!(%err, "rejected field selector");

        return Err(err);
    }

    root.member(ident).ok_or_else(|| {
        QueryError::unsupported_selector(
            selector,
            format!("{} has no selectable member named '{ident}'", root.key()),
        )
    })
}

fn rejection_reason(selector: &str) -> &'static str {
    if selector.is_empty() {
        "empty selector"
    } else if selector.contains('(') {
        "call expressions are not member accesses"
    } else if selector.contains('.') {
        "chained member access; only direct members of the root can be selected"
    } else {
        "not a direct member access"
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
        && s != "_"
}

///
/// TESTS
///
