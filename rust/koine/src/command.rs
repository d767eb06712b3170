//! The canonical command — the terminal artifact of a successful match.
//!
//! "toggle .active on #button", its Japanese rendering, and its Turkish
//! grammar-transformed rendering all normalize to the same
//! [`CanonicalCommand`]; this is the value handed to the downstream
//! interpreter.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A language-independent command plus its extracted semantic roles.
///
/// Roles not present in the matched pattern are simply absent, never
/// defaulted — unless the pattern carried an explicit default rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalCommand {
    /// The canonical command name ("toggle", "wait", "fetch").
    pub command: String,
    /// The extracted role values.
    pub roles: BTreeMap<Role, String>,
    /// The id of the pattern that produced this command.
    pub source_pattern: String,
}

impl CanonicalCommand {
    /// The value extracted for `role`, if the pattern populated it.
    pub fn role(&self, role: Role) -> Option<&str> {
        self.roles.get(&role).map(String::as_str)
    }
}

impl fmt::Display for CanonicalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for (role, value) in &self.roles {
            write!(f, " {role}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_roles_in_order() {
        let mut roles = BTreeMap::new();
        roles.insert(Role::Destination, "#button".to_string());
        roles.insert(Role::Patient, ".active".to_string());
        let command = CanonicalCommand {
            command: "toggle".into(),
            roles,
            source_pattern: "en-toggle-on".into(),
        };
        assert_eq!(command.to_string(), "toggle patient=.active destination=#button");
    }
}
