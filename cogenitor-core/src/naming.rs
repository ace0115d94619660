use std::collections::HashMap;

use crate::translate;

/// which identifier-sanitization rules to apply when a schema/property
/// name isn't a valid Rust identifier on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingStrategy {
    /// literal, reversible escaping: reserved words get a suffix, every
    /// character outside `[A-Za-z0-9_]` becomes a bracketed token. Faithful
    /// to the input at the cost of ugly identifiers.
    Defensive,
    /// word-split and re-case into PascalCase/camelCase the way a human
    /// would name the type/field by hand. This is the default.
    #[default]
    Idiomatic,
}

/// explicit name overrides keyed by the OAS name (schema name, property
/// name, etc.), consulted before either [`NamingStrategy`] runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameOverrides(pub HashMap<String, String>);

impl NameOverrides {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

fn defensive_escape(name: &str) -> String {
    if name.is_empty() {
        return "_empty".to_string();
    }
    if name == "_" {
        return "_underscore_".to_string();
    }

    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '_' => out.push(c),
            '-' => out.push_str("_hyphen_"),
            ' ' => out.push_str("_space_"),
            '$' => out.push_str("_dollar_"),
            '+' => out.push_str("_plus_"),
            other => out.push_str(&format!("_x{:04x}_", other as u32)),
        }
    }

    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }

    translate::avoid_reserved(&out)
}

/// sanitizes `name` into a valid PascalCase Rust type identifier.
pub fn sanitize_type_name(name: &str, strategy: NamingStrategy, overrides: &NameOverrides) -> String {
    if let Some(o) = overrides.get(name) {
        return o.to_string();
    }
    match strategy {
        NamingStrategy::Defensive => {
            let escaped = defensive_escape(name);
            translate::capitalize(&escaped)
        }
        NamingStrategy::Idiomatic => translate::schema_to_rust_typename(name),
    }
}

/// sanitizes `name` into a valid snake_case (camelCase under `Defensive`,
/// matching the teacher's original convention for struct fields) Rust
/// member identifier.
pub fn sanitize_member_name(name: &str, strategy: NamingStrategy, overrides: &NameOverrides) -> String {
    if let Some(o) = overrides.get(name) {
        return o.to_string();
    }
    match strategy {
        NamingStrategy::Defensive => defensive_escape(name),
        NamingStrategy::Idiomatic => translate::property_to_rust_fieldname(name),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defensive_escape_special_chars() {
        assert_eq!(defensive_escape(""), "_empty");
        assert_eq!(defensive_escape("_"), "_underscore_");
        assert_eq!(defensive_escape("foo-bar"), "foo_hyphen_bar");
        assert_eq!(defensive_escape("a b"), "a_space_b");
        assert_eq!(defensive_escape("9lives"), "_9lives");
    }

    #[test]
    fn test_sanitize_type_name_idiomatic() {
        let overrides = NameOverrides::default();
        assert_eq!(
            sanitize_type_name("pet-store", NamingStrategy::Idiomatic, &overrides),
            "PetStore"
        );
    }

    #[test]
    fn test_sanitize_type_name_defensive() {
        let overrides = NameOverrides::default();
        assert_eq!(
            sanitize_type_name("pet-store", NamingStrategy::Defensive, &overrides),
            "Pet_hyphen_store"
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut overrides = NameOverrides::default();
        overrides.0.insert("Pet".to_string(), "Animal".to_string());
        assert_eq!(
            sanitize_type_name("Pet", NamingStrategy::Idiomatic, &overrides),
            "Animal"
        );
    }
}
