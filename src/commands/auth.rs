//! Role-based command authorization

use std::collections::HashSet;

/// True when `required` is empty or shares at least one role with `roles`
///
/// Blank required role names carry no restriction.
pub fn is_authorized(roles: &HashSet<String>, required: &[&str]) -> bool {
    let mut required = required.iter().filter(|role| !role.trim().is_empty()).peekable();
    if required.peek().is_none() {
        return true;
    }
    required.any(|role| roles.contains(*role))
}

/// Render roles as "r1, r2, or r3"
///
/// A single role renders as "or r1". Blank names are skipped.
pub fn roles_sentence(required: &[&str]) -> String {
    let required: Vec<&str> = required
        .iter()
        .copied()
        .filter(|role| !role.trim().is_empty())
        .collect();
    let Some((last, rest)) = required.split_last() else {
        return String::new();
    };
    rest.iter()
        .map(|role| role.to_string())
        .chain(std::iter::once(format!("or {last}")))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn unauthorized_message(required: &[&str]) -> String {
    format!(
        "You do not have permission to use this command. Required role(s): {}",
        roles_sentence(required)
    )
}
