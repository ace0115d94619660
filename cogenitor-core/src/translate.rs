use crate::types::StatusSpec;

// Array of strict keywords (currently in use)
const STRICT_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

// Array of reserved keywords (for future use)
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "typeof",
    "unsized", "virtual", "yield",
];

pub(crate) fn capitalize(s: &str) -> String {
    modify_first_char(s, char::to_uppercase)
}

fn decapitalize(s: &str) -> String {
    modify_first_char(s, char::to_lowercase)
}

fn modify_first_char<F, R>(s: &str, m: F) -> String
where
    F: FnOnce(char) -> R,
    R: Iterator<Item = char>,
{
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => m(f).collect::<String>() + c.as_str(),
    }
}
pub(crate) fn schema_to_rust_typename(schema_name: &str) -> String {
    // for now, all we do is clone..
    avoid_reserved(&capitalize(schema_name))
}

pub(crate) fn property_to_rust_fieldname(property_name: &str) -> String {
    avoid_reserved(&decapitalize(property_name))
}

pub(crate) fn avoid_reserved(s: &str) -> String {
    if STRICT_KEYWORDS
        .iter()
        .chain(RESERVED_KEYWORDS.iter())
        .any(|e| (*e).eq(s))
    {
        s.to_string() + "_"
    } else {
        s.to_string()
    }
}

/// splits an identifier-ish string into its component words, breaking on
/// non-alphanumeric separators (`/`, `-`, `_`, `.`, ...) as well as
/// lowercase-to-uppercase transitions (`camelCase` -> `camel`, `Case`).
fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(c);
            prev_lower = c.is_lowercase() || c.is_numeric();
        } else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// breaks an OAS path template and HTTP method into word components, with
/// path parameters (`{petId}`) turned into a `by <name>` phrase.
fn path_words(method: &http::Method, path_name: &str) -> Vec<String> {
    let mut words = vec![method.as_str().to_string()];
    for segment in path_name.split('/').filter(|s| !s.is_empty()) {
        if let Some(param_name) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            words.push("by".to_string());
            words.extend(split_words(param_name));
        } else {
            words.extend(split_words(segment));
        }
    }
    words
}

pub(crate) fn path_method_to_rust_fn_name(
    method: &http::Method,
    path_name: &str,
) -> anyhow::Result<String> {
    let words = path_words(method, path_name);
    if words.is_empty() {
        return Err(anyhow::anyhow!(
            "cannot derive a function name from path '{path_name}'"
        ));
    }
    let name = words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    Ok(avoid_reserved(&name))
}

pub(crate) fn path_method_to_rust_type_name(method: http::Method, path_name: &str) -> String {
    let words = path_words(&method, path_name);
    let name = words
        .iter()
        .map(|w| capitalize(&w.to_lowercase()))
        .collect::<String>();
    avoid_reserved(&name)
}

pub(crate) fn status_spec_to_rust_type_name(status: StatusSpec) -> String {
    match status {
        StatusSpec::Informational(code) => format!("Status{code}"),
        StatusSpec::Informational1XX => "Informational".to_string(),
        StatusSpec::Success(code) => format!("Status{code}"),
        StatusSpec::Success2XX => "Success".to_string(),
        StatusSpec::Redirection(code) => format!("Status{code}"),
        StatusSpec::Redirection3XX => "Redirection".to_string(),
        StatusSpec::ClientError(code) => format!("Status{code}"),
        StatusSpec::ClientError4XX => "ClientError".to_string(),
        StatusSpec::ServerError(code) => format!("Status{code}"),
        StatusSpec::ServerError5XX => "ServerError".to_string(),
        StatusSpec::Default => "Default".to_string(),
    }
}

/// e.g. `application/json` -> `ApplicationJson`, `text/*` -> `TextAny`.
pub(crate) fn media_type_range_to_rust_type_name(media_type: &str) -> String {
    media_type
        .split(['/', '+', ';', '-', '.'])
        .filter(|s| !s.is_empty())
        .map(|word| {
            if word == "*" {
                "Any".to_string()
            } else {
                capitalize(&word.to_lowercase())
            }
        })
        .collect::<String>()
}

pub(crate) fn parameter_to_rust_fn_param(name: &str) -> String {
    let words = split_words(name)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>();
    let name = words.join("_");
    if name.is_empty() {
        "param".to_string()
    } else {
        avoid_reserved(&name)
    }
}

/// something that can tell whether a candidate identifier is already taken.
pub(crate) trait ContainsPredicate {
    fn contains_str(&self, s: &str) -> bool;
}

/// appends a numeric suffix until `name` no longer collides according to
/// `predicate`.
pub(crate) fn uncollide(predicate: &impl ContainsPredicate, name: String) -> String {
    if !predicate.contains_str(&name) {
        return name;
    }
    let mut i = 2;
    loop {
        let candidate = format!("{name}_{i}");
        if !predicate.contains_str(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct NoneTaken;
    impl ContainsPredicate for NoneTaken {
        fn contains_str(&self, _s: &str) -> bool {
            false
        }
    }

    struct OnlyTaken<'a>(&'a [&'a str]);
    impl<'a> ContainsPredicate for OnlyTaken<'a> {
        fn contains_str(&self, s: &str) -> bool {
            self.0.contains(&s)
        }
    }

    #[test]
    fn test_path_method_to_rust_fn_name() {
        let name =
            path_method_to_rust_fn_name(&http::Method::GET, "/pets/{petId}").unwrap();
        assert_eq!("get_pets_by_pet_id", name);
    }

    #[test]
    fn test_path_method_to_rust_type_name() {
        let name = path_method_to_rust_type_name(http::Method::POST, "/pets");
        assert_eq!("PostPets", name);
    }

    #[test]
    fn test_media_type_range_to_rust_type_name() {
        assert_eq!("ApplicationJson", media_type_range_to_rust_type_name("application/json"));
        assert_eq!("TextAny", media_type_range_to_rust_type_name("text/*"));
    }

    #[test]
    fn test_parameter_to_rust_fn_param() {
        assert_eq!("x_request_id", parameter_to_rust_fn_param("X-Request-Id"));
        assert_eq!("limit", parameter_to_rust_fn_param("limit"));
    }

    #[test]
    fn test_uncollide() {
        assert_eq!("limit", uncollide(&NoneTaken, "limit".to_string()));
        assert_eq!(
            "limit_2",
            uncollide(&OnlyTaken(&["limit"]), "limit".to_string())
        );
        assert_eq!(
            "limit_3",
            uncollide(&OnlyTaken(&["limit", "limit_2"]), "limit".to_string())
        );
    }
}
