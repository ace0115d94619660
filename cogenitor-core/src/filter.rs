use std::collections::HashSet;

use crate::types::{MediaType, Operation, Parameter, PathItem, RefOr, RequestBody, Response, Schema, Spec};

/// which operations to keep. `tags: None` keeps everything (the default);
/// `tags: Some(set)` keeps only operations carrying at least one of the
/// given tags, plus the transitive closure of schemas those operations
/// reach through `properties`/`items`/`allOf`/`anyOf`/`oneOf`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub tags: Option<HashSet<String>>,
}

impl FilterSpec {
    pub fn all() -> Self {
        Self { tags: None }
    }

    pub fn by_tags(tags: impl IntoIterator<Item = String>) -> Self {
        Self {
            tags: Some(tags.into_iter().collect()),
        }
    }

    fn keeps(&self, operation_tags: &[String]) -> bool {
        match &self.tags {
            None => true,
            Some(wanted) => operation_tags.iter().any(|t| wanted.contains(t)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("tag filter {0:?} matched no operations")]
    EmptyResult(HashSet<String>),
}

/// the result of applying a [`FilterSpec`] to a document: which (path,
/// method) pairs survive, and the full set of component schema names
/// reachable from them.
#[derive(Debug, Default)]
pub struct FilterResult {
    pub operation_keys: HashSet<(String, http::Method)>,
    pub schema_names: HashSet<String>,
}

impl FilterResult {
    pub fn keeps_operation(&self, path: &str, method: &http::Method) -> bool {
        self.operation_keys
            .contains(&(path.to_string(), method.clone()))
    }

    /// a document with no tag filter keeps every schema unconditionally;
    /// `schema_names` is only meaningful once a tag filter narrowed things
    /// down, so callers should check this before consulting it.
    pub fn is_unfiltered(&self) -> bool {
        self.operation_keys.is_empty() && self.schema_names.is_empty()
    }
}

pub fn filter_document<S: Spec>(spec: &S, filter: &FilterSpec) -> Result<FilterResult, FilterError> {
    if filter.tags.is_none() {
        return Ok(FilterResult::default());
    }

    let mut operation_keys = HashSet::new();
    let mut schema_names = HashSet::new();

    for (path, path_item) in spec.paths() {
        for (method, op) in path_item.operations_iter() {
            if !filter.keeps(&op.tags()) {
                continue;
            }
            operation_keys.insert((path.clone(), method.clone()));

            for param in op.parameters() {
                if let Some(schema) = param.resolve_fully().schema() {
                    walk_ref(&schema, &mut schema_names);
                }
            }
            if let Some(request_body) = op.request_body() {
                for (_, media_type) in request_body.resolve_fully().content() {
                    if let Some(schema) = media_type.schema() {
                        walk_ref(&schema, &mut schema_names);
                    }
                }
            }
            for (_, response) in op.responses() {
                for (_, media_type) in response.resolve_fully().content() {
                    if let Some(schema) = media_type.schema() {
                        walk_ref(&schema, &mut schema_names);
                    }
                }
            }
        }
    }

    if operation_keys.is_empty() {
        return Err(FilterError::EmptyResult(
            filter.tags.clone().unwrap_or_default(),
        ));
    }

    Ok(FilterResult {
        operation_keys,
        schema_names,
    })
}

fn walk_ref<Q: Schema>(schema: &RefOr<Q>, visited: &mut HashSet<String>) {
    if let Some(uri) = schema.reference_uri() {
        let name = uri.rsplit('/').next().unwrap_or(uri).to_string();
        if !visited.insert(name) {
            // already visited: either seen before, or we're in a cycle
            return;
        }
    }
    walk_schema(&schema.resolve_fully(), visited);
}

fn walk_schema<Q: Schema>(schema: &Q, visited: &mut HashSet<String>) {
    for (_, prop) in schema.properties() {
        walk_ref(&prop, visited);
    }
    if let Some(items) = schema.items() {
        for item in &items {
            walk_ref(item, visited);
        }
    }
    if let Some(branches) = schema.all_of() {
        for b in &branches {
            walk_schema(b, visited);
        }
    }
    if let Some(branches) = schema.any_of() {
        for b in &branches {
            walk_schema(b, visited);
        }
    }
    if let Some(branches) = schema.one_of() {
        for b in &branches {
            walk_schema(b, visited);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_no_filter_keeps_everything() {
        let f = FilterSpec::all();
        assert!(f.keeps(&[]));
        assert!(f.keeps(&["pets".to_string()]));
    }

    #[test]
    fn test_tag_filter() {
        let f = FilterSpec::by_tags(["pets".to_string()]);
        assert!(f.keeps(&["pets".to_string(), "other".to_string()]));
        assert!(!f.keeps(&["other".to_string()]));
        assert!(!f.keeps(&[]));
    }
}
