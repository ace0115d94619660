//! A reduced OAS 3.1 adapter, enabled by the (non-default) `oas31` feature.
//!
//! OAS 3.1 schemas are full JSON Schema 2020-12 documents, which is a much
//! larger surface than the OAS 3.0 schema object the `oas30` adapter
//! targets. This adapter covers the subset code generation actually needs
//! (types, formats, composition, enums, properties) and intentionally does
//! not attempt JSON Schema features with no OAS 3.0 analogue (e.g. `$dynamicRef`,
//! `prefixItems`, `const`). Parameter/operation/response plumbing mirrors
//! `oas30` but is implemented directly against `oas3::spec` rather than via
//! a shared pointer abstraction, since the two crates' reference models
//! differ enough that sharing code would obscure more than it would save.

use std::hash::Hash;
use std::io::BufReader;
use std::rc::Rc;
use std::str::FromStr;
use std::{borrow::Borrow, collections::HashMap};

use http::Method;
use oas3::spec::{ObjectOrReference, ObjectSchema, Spec};

use crate::types::{
    BooleanOrSchema, ByReference, Components, Discriminator, MediaType, Operation, Parameter,
    ParameterLocation, ParameterStyle, PathItem, RefOr, Reference, RequestBody, Response, Schema,
    StatusSpec,
};

trait OAS31Resolver<T> {
    fn resolve<'a, S>(&'a self, ro: &'a ObjectOrReference<S>) -> Option<&'a T>
    where
        S: Borrow<T>,
    {
        match ro {
            ObjectOrReference::Ref { ref_path } => {
                let reference = ref_path
                    .strip_prefix("#/components/schemas/")
                    .unwrap_or_else(|| {
                        panic!("only references to '#/components/schemas/*' are supported, '{ref_path}' does not match")
                    });
                self.resolve_reference(reference)
            }
            ObjectOrReference::Object(s) => Some(s.borrow()),
        }
    }

    fn resolve_reference(&self, reference: &str) -> Option<&T>;
}

impl OAS31Resolver<ObjectSchema> for Spec {
    fn resolve_reference(&self, reference: &str) -> Option<&ObjectSchema> {
        let schema_ref = self.components.as_ref()?.schemas.get(reference)?;
        self.resolve(schema_ref)
    }
}

#[derive(Clone)]
enum RefSource {
    SchemaName(String),
    SchemaProperty(Box<RefSource>, String),
    AdditionalProperties(Box<RefSource>),
    Items(Box<RefSource>),
    Composite(Box<RefSource>, &'static str, usize),
}

impl std::fmt::Debug for RefSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefSource::SchemaName(name) => f.write_fmt(format_args!("'{name}'")),
            RefSource::SchemaProperty(s, name) => f.write_fmt(format_args!("{s:?}.{name}")),
            RefSource::AdditionalProperties(s) => {
                f.write_fmt(format_args!("{s:?}.additionalProperties"))
            }
            RefSource::Items(s) => f.write_fmt(format_args!("{s:?}.items")),
            RefSource::Composite(s, keyword, index) => {
                f.write_fmt(format_args!("{s:?}.{keyword}[{index}]"))
            }
        }
    }
}

impl Hash for RefSource {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            RefSource::SchemaName(name) => {
                0u8.hash(state);
                name.hash(state);
            }
            RefSource::SchemaProperty(s, name) => {
                1u8.hash(state);
                s.hash(state);
                name.hash(state);
            }
            RefSource::AdditionalProperties(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            RefSource::Items(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            RefSource::Composite(s, keyword, index) => {
                4u8.hash(state);
                s.hash(state);
                keyword.hash(state);
                index.hash(state);
            }
        }
    }
}

impl PartialEq for RefSource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RefSource::SchemaName(a), RefSource::SchemaName(b)) => a == b,
            (RefSource::SchemaProperty(a1, a2), RefSource::SchemaProperty(b1, b2)) => {
                a1 == b1 && a2 == b2
            }
            (RefSource::AdditionalProperties(a), RefSource::AdditionalProperties(b)) => a == b,
            (RefSource::Items(a), RefSource::Items(b)) => a == b,
            (RefSource::Composite(a1, a2, a3), RefSource::Composite(b1, b2, b3)) => {
                a1 == b1 && a2 == b2 && a3 == b3
            }
            _ => false,
        }
    }
}
impl Eq for RefSource {}

#[derive(Clone)]
pub struct OAS31SchemaPointer {
    spec: Rc<Spec>,
    ref_source: RefSource,
}

impl ByReference for OAS31SchemaPointer {
    type Reference = OAS31SchemaReference;
}

impl std::fmt::Debug for OAS31SchemaPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OAS31SchemaPointer[{:?}]", self.ref_source)
    }
}

impl Hash for OAS31SchemaPointer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ref_source.hash(state);
    }
}

impl PartialEq for OAS31SchemaPointer {
    fn eq(&self, other: &Self) -> bool {
        self.ref_source == other.ref_source
    }
}
impl Eq for OAS31SchemaPointer {}

fn schema_from_property<'a>(
    schema: &'a ObjectSchema,
    name: &str,
) -> Option<&'a ObjectOrReference<ObjectSchema>> {
    schema.properties.get(name)
}

fn schema_from_composite<'a>(
    schema: &'a ObjectSchema,
    keyword: &str,
    index: usize,
) -> Option<&'a ObjectOrReference<ObjectSchema>> {
    let members = match keyword {
        "allOf" => &schema.all_of,
        "anyOf" => &schema.any_of,
        "oneOf" => &schema.one_of,
        _ => return None,
    };
    members.get(index)
}

impl OAS31SchemaPointer {
    fn inner(&self) -> &ObjectSchema {
        match &self.ref_source {
            RefSource::SchemaName(schema_name) => self.spec.resolve_reference(schema_name).unwrap(),
            RefSource::AdditionalProperties(parent) => {
                let parent = OAS31SchemaPointer {
                    spec: self.spec.clone(),
                    ref_source: (**parent).clone(),
                };
                match parent.inner().additional_properties.as_ref().unwrap() {
                    oas3::spec::Schema::Object(obj_ref) => self.spec.resolve(obj_ref).unwrap(),
                    oas3::spec::Schema::Boolean(_) => {
                        panic!("boolean additionalProperties has no schema to resolve")
                    }
                }
            }
            RefSource::Items(parent) => {
                let parent = OAS31SchemaPointer {
                    spec: self.spec.clone(),
                    ref_source: (**parent).clone(),
                };
                let ro = parent.inner().items.as_ref().unwrap();
                self.spec.resolve(ro.as_ref()).unwrap()
            }
            RefSource::SchemaProperty(parent, name) => {
                let parent = OAS31SchemaPointer {
                    spec: self.spec.clone(),
                    ref_source: (**parent).clone(),
                };
                let ro = schema_from_property(parent.inner(), name).unwrap();
                self.spec.resolve(ro).unwrap()
            }
            RefSource::Composite(parent, keyword, index) => {
                let parent = OAS31SchemaPointer {
                    spec: self.spec.clone(),
                    ref_source: (**parent).clone(),
                };
                let ro = schema_from_composite(parent.inner(), keyword, *index).unwrap();
                self.spec.resolve(ro).unwrap()
            }
        }
    }
}

impl From<oas3::spec::SchemaType> for crate::types::Type {
    fn from(value: oas3::spec::SchemaType) -> Self {
        use crate::types::Type;
        match value {
            oas3::spec::SchemaType::Number => Type::Number,
            oas3::spec::SchemaType::Integer => Type::Number,
            oas3::spec::SchemaType::Array => Type::Array,
            oas3::spec::SchemaType::Object => Type::Object,
            oas3::spec::SchemaType::String => Type::String,
            oas3::spec::SchemaType::Boolean => Type::Boolean,
            oas3::spec::SchemaType::Null => Type::Null,
        }
    }
}

impl Schema for OAS31SchemaPointer {
    fn name(&self) -> Option<&str> {
        match &self.ref_source {
            RefSource::SchemaName(name) => Some(name),
            _ => None,
        }
    }

    fn type_(&self) -> Option<Vec<crate::types::Type>> {
        self.inner().schema_type.as_ref().map(|t| match t {
            oas3::spec::SchemaTypeSet::Single(t) => vec![(*t).into()],
            oas3::spec::SchemaTypeSet::Multiple(types) => {
                types.iter().map(|t| (*t).into()).collect()
            }
        })
    }

    fn format(&self) -> Option<crate::types::Format> {
        match self.inner().format.as_deref() {
            Some("int32") => Some(crate::types::Format::Int32),
            Some("int64") => Some(crate::types::Format::Int64),
            Some("float") => Some(crate::types::Format::Float),
            Some("double") => Some(crate::types::Format::Double),
            Some("byte") => Some(crate::types::Format::Byte),
            Some("binary") => Some(crate::types::Format::Binary),
            Some("date") => Some(crate::types::Format::Date),
            Some("date-time") => Some(crate::types::Format::DateTime),
            Some("password") => Some(crate::types::Format::Password),
            _ => None,
        }
    }

    fn title(&self) -> Option<&str> {
        self.inner().title.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.inner().description.as_deref()
    }

    fn nullable(&self) -> bool {
        match self.type_() {
            Some(types) => types.contains(&crate::types::Type::Null),
            None => false,
        }
    }

    fn discriminator(&self) -> Option<Discriminator> {
        self.inner().discriminator.as_ref().map(|d| Discriminator {
            property_name: d.property_name.clone(),
            mapping: d
                .mapping
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    fn replace_type(&self) -> Option<&str> {
        None
    }

    fn required(&self) -> Option<Vec<&str>> {
        let required = &self.inner().required;
        if required.is_empty() {
            None
        } else {
            Some(required.iter().map(String::as_str).collect())
        }
    }

    fn all_of(&self) -> Option<Vec<impl Schema>> {
        composite_members(self, "allOf", self.inner().all_of.len())
    }

    fn any_of(&self) -> Option<Vec<impl Schema>> {
        composite_members(self, "anyOf", self.inner().any_of.len())
    }

    fn one_of(&self) -> Option<Vec<impl Schema>> {
        composite_members(self, "oneOf", self.inner().one_of.len())
    }

    fn enum_(&self) -> Option<Vec<json::JsonValue>> {
        let enum_values = &self.inner().enum_values;
        if enum_values.is_empty() {
            return None;
        }
        let values = enum_values
            .iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(json::JsonValue::String(s.clone())),
                serde_json::Value::Number(n) => n
                    .as_i64()
                    .map(|i| json::JsonValue::Number(json::number::Number::from(i)))
                    .or_else(|| {
                        n.as_f64()
                            .map(|f| json::JsonValue::Number(json::number::Number::from(f)))
                    }),
                serde_json::Value::Bool(b) => Some(json::JsonValue::Boolean(*b)),
                serde_json::Value::Null => Some(json::JsonValue::Null),
                _ => None,
            })
            .collect();
        Some(values)
    }

    fn properties(&self) -> HashMap<String, RefOr<Self>> {
        self.inner()
            .properties
            .iter()
            .map(|(k, ro)| {
                let target = OAS31SchemaPointer {
                    spec: self.spec.clone(),
                    ref_source: RefSource::SchemaProperty(Box::new(self.ref_source.clone()), k.clone()),
                };
                (k.clone(), wrap_ref_or(self, ro, target))
            })
            .collect()
    }

    fn pattern_properties(&self) -> HashMap<String, RefOr<impl Schema>> {
        HashMap::<String, RefOr<OAS31SchemaPointer>>::new()
    }

    fn addtional_properties(&self) -> BooleanOrSchema<impl Schema> {
        match self.inner().additional_properties.as_ref() {
            Some(oas3::spec::Schema::Boolean(b)) => BooleanOrSchema::Boolean(b.0),
            Some(oas3::spec::Schema::Object(_)) => BooleanOrSchema::Schema(OAS31SchemaPointer {
                spec: self.spec.clone(),
                ref_source: RefSource::AdditionalProperties(Box::new(self.ref_source.clone())),
            }),
            None => BooleanOrSchema::Boolean(true),
        }
    }

    fn items(&self) -> Option<Vec<RefOr<Self>>> {
        let ro = self.inner().items.as_ref()?;
        let target = OAS31SchemaPointer {
            spec: self.spec.clone(),
            ref_source: RefSource::Items(Box::new(self.ref_source.clone())),
        };
        Some(vec![wrap_ref_or(self, ro.as_ref(), target)])
    }
}

fn composite_members(
    parent: &OAS31SchemaPointer,
    keyword: &'static str,
    len: usize,
) -> Option<Vec<OAS31SchemaPointer>> {
    if len == 0 {
        return None;
    }
    Some(
        (0..len)
            .map(|index| OAS31SchemaPointer {
                spec: parent.spec.clone(),
                ref_source: RefSource::Composite(Box::new(parent.ref_source.clone()), keyword, index),
            })
            .collect(),
    )
}

/// `target` is the pointer that would resolve this position if it turns out
/// to be inline; if `ro` is a `$ref` we instead hand back a reference to the
/// named component.
fn wrap_ref_or(
    parent: &OAS31SchemaPointer,
    ro: &ObjectOrReference<ObjectSchema>,
    target: OAS31SchemaPointer,
) -> RefOr<OAS31SchemaPointer> {
    match ro {
        ObjectOrReference::Ref { ref_path } => RefOr::Reference(OAS31SchemaReference {
            spec: parent.spec.clone(),
            uri: ref_path.clone(),
        }),
        ObjectOrReference::Object(_) => RefOr::Object(target),
    }
}

pub struct OAS31SchemaReference {
    spec: Rc<Spec>,
    uri: String,
}

impl Reference<OAS31SchemaPointer> for OAS31SchemaReference {
    fn resolve(&self) -> RefOr<OAS31SchemaPointer> {
        let name = self
            .uri
            .strip_prefix("#/components/schemas/")
            .unwrap_or(&self.uri)
            .to_string();
        RefOr::Object(OAS31SchemaPointer {
            spec: self.spec.clone(),
            ref_source: RefSource::SchemaName(name),
        })
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}

pub struct OAS31Spec {
    spec: Rc<Spec>,
}

impl FromStr for OAS31Spec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, anyhow::Error> {
        let spec: Spec = oas3::from_str(s)?;
        Ok(spec.into())
    }
}

impl From<Spec> for OAS31Spec {
    fn from(spec: Spec) -> Self {
        OAS31Spec { spec: Rc::new(spec) }
    }
}

pub struct OAS31Components {
    spec: Rc<Spec>,
}

impl Components<OAS31Spec> for OAS31Components {
    fn schemas(&self) -> impl Iterator<Item = (String, RefOr<OAS31SchemaPointer>)> {
        let spec = self.spec.clone();
        let names: Vec<String> = spec
            .components
            .as_ref()
            .map(|c| c.schemas.keys().cloned().collect())
            .unwrap_or_default();
        names.into_iter().map(move |name| {
            let ro = spec
                .components
                .as_ref()
                .unwrap()
                .schemas
                .get(&name)
                .unwrap();
            let target = OAS31SchemaPointer {
                spec: spec.clone(),
                ref_source: RefSource::SchemaName(name.clone()),
            };
            let pointer = OAS31SchemaPointer {
                spec: spec.clone(),
                ref_source: RefSource::SchemaName(String::new()),
            };
            (name, wrap_ref_or(&pointer, ro, target))
        })
    }
}

pub struct OAS31PathItem {
    spec: Rc<Spec>,
    path_item: oas3::spec::PathItem,
}

impl PathItem<OAS31Spec> for OAS31PathItem {
    fn operations_iter(&self) -> impl Iterator<Item = (Method, OAS31Operation)> {
        let candidates: Vec<(Method, Option<oas3::spec::Operation>)> = vec![
            (Method::GET, self.path_item.get.clone()),
            (Method::PUT, self.path_item.put.clone()),
            (Method::POST, self.path_item.post.clone()),
            (Method::DELETE, self.path_item.delete.clone()),
            (Method::OPTIONS, self.path_item.options.clone()),
            (Method::HEAD, self.path_item.head.clone()),
            (Method::PATCH, self.path_item.patch.clone()),
            (Method::TRACE, self.path_item.trace.clone()),
        ];
        let spec = self.spec.clone();
        candidates
            .into_iter()
            .filter_map(move |(method, op)| {
                op.map(|operation| {
                    (
                        method,
                        OAS31Operation {
                            spec: spec.clone(),
                            operation,
                        },
                    )
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn parameters(&self) -> impl Iterator<Item = RefOr<OAS31ParameterPointer>> {
        std::iter::empty()
    }
}

pub struct OAS31Operation {
    spec: Rc<Spec>,
    operation: oas3::spec::Operation,
}

impl Operation<OAS31Spec> for OAS31Operation {
    fn parameters(&self) -> impl Iterator<Item = RefOr<OAS31ParameterPointer>> {
        let spec = self.spec.clone();
        self.operation
            .parameters
            .clone()
            .into_iter()
            .filter_map(move |ro| match ro {
                ObjectOrReference::Ref { ref_path } => Some(RefOr::Reference(OAS31ParameterReference {
                    spec: spec.clone(),
                    uri: ref_path,
                })),
                ObjectOrReference::Object(p) => Some(RefOr::Object(OAS31ParameterPointer {
                    spec: spec.clone(),
                    parameter: p,
                })),
            })
    }

    fn operation_id(&self) -> Option<&str> {
        self.operation.operation_id.as_deref()
    }

    fn request_body(&self) -> Option<RefOr<OAS31RequestBody>> {
        self.operation.request_body.as_ref().map(|ro| match ro {
            ObjectOrReference::Ref { ref_path } => RefOr::Reference(OAS31RequestBodyReference {
                spec: self.spec.clone(),
                uri: ref_path.clone(),
            }),
            ObjectOrReference::Object(b) => RefOr::Object(OAS31RequestBody {
                spec: self.spec.clone(),
                request_body: b.clone(),
            }),
        })
    }

    fn responses(&self) -> impl Iterator<Item = (StatusSpec, RefOr<OAS31Response>)> {
        let spec = self.spec.clone();
        self.operation
            .responses
            .clone()
            .into_iter()
            .filter_map(move |(status, ro)| {
                let status_spec = status.parse::<StatusSpec>().ok()?;
                let wrapped = match ro {
                    ObjectOrReference::Ref { ref_path } => RefOr::Reference(OAS31ResponseReference {
                        spec: spec.clone(),
                        uri: ref_path,
                    }),
                    ObjectOrReference::Object(r) => RefOr::Object(OAS31Response {
                        spec: spec.clone(),
                        response: r,
                    }),
                };
                Some((status_spec, wrapped))
            })
    }

    fn tags(&self) -> Vec<String> {
        self.operation.tags.clone()
    }

    fn deprecated(&self) -> bool {
        self.operation.deprecated.unwrap_or(false)
    }
}

#[derive(Clone)]
pub struct OAS31ParameterPointer {
    spec: Rc<Spec>,
    parameter: oas3::spec::Parameter,
}

impl std::fmt::Debug for OAS31ParameterPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAS31ParameterPointer")
            .field("name", &self.parameter.name)
            .finish()
    }
}

impl Hash for OAS31ParameterPointer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.parameter.name.hash(state);
    }
}
impl PartialEq for OAS31ParameterPointer {
    fn eq(&self, other: &Self) -> bool {
        self.parameter.name == other.parameter.name
    }
}
impl Eq for OAS31ParameterPointer {}

impl ByReference for OAS31ParameterPointer {
    type Reference = OAS31ParameterReference;
}

fn extract_location(location: oas3::spec::ParameterIn) -> ParameterLocation {
    match location {
        oas3::spec::ParameterIn::Query => ParameterLocation::Query,
        oas3::spec::ParameterIn::Header => ParameterLocation::Header,
        oas3::spec::ParameterIn::Path => ParameterLocation::Path,
        oas3::spec::ParameterIn::Cookie => ParameterLocation::Cookie,
    }
}

impl Parameter<OAS31Spec> for OAS31ParameterPointer {
    fn in_(&self) -> ParameterLocation {
        extract_location(self.parameter.location)
    }

    fn name(&self) -> &str {
        &self.parameter.name
    }

    fn required(&self) -> bool {
        self.parameter.required.unwrap_or(false)
    }

    fn style(&self) -> ParameterStyle {
        ParameterStyle::Simple
    }

    fn explode(&self) -> bool {
        self.parameter.explode.unwrap_or(false)
    }

    fn schema(&self) -> Option<RefOr<OAS31SchemaPointer>> {
        let ro = self.parameter.schema.as_ref()?;
        match ro {
            ObjectOrReference::Ref { ref_path } => Some(RefOr::Reference(OAS31SchemaReference {
                spec: self.spec.clone(),
                uri: ref_path.clone(),
            })),
            ObjectOrReference::Object(_) => Some(RefOr::Object(OAS31SchemaPointer {
                spec: self.spec.clone(),
                ref_source: RefSource::SchemaName(format!("__param_{}__", self.parameter.name)),
            })),
        }
    }

    fn content(&self) -> Option<HashMap<String, OAS31MediaType>> {
        None
    }
}

pub struct OAS31ParameterReference {
    spec: Rc<Spec>,
    uri: String,
}

impl Reference<OAS31ParameterPointer> for OAS31ParameterReference {
    fn resolve(&self) -> RefOr<OAS31ParameterPointer> {
        let name = self
            .uri
            .strip_prefix("#/components/parameters/")
            .unwrap_or(&self.uri);
        let parameter = self
            .spec
            .components
            .as_ref()
            .and_then(|c| c.parameters.get(name))
            .and_then(|ro| match ro {
                ObjectOrReference::Object(p) => Some(p.clone()),
                ObjectOrReference::Ref { .. } => None,
            })
            .expect("chained parameter $ref is not supported");
        RefOr::Object(OAS31ParameterPointer {
            spec: self.spec.clone(),
            parameter,
        })
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}

#[derive(Clone)]
pub struct OAS31MediaType {
    spec: Rc<Spec>,
    media_type: oas3::spec::MediaType,
}

impl MediaType<OAS31Spec> for OAS31MediaType {
    fn schema(&self) -> Option<RefOr<OAS31SchemaPointer>> {
        let ro = self.media_type.schema.as_ref()?;
        Some(match ro {
            ObjectOrReference::Ref { ref_path } => RefOr::Reference(OAS31SchemaReference {
                spec: self.spec.clone(),
                uri: ref_path.clone(),
            }),
            ObjectOrReference::Object(_) => RefOr::Object(OAS31SchemaPointer {
                spec: self.spec.clone(),
                ref_source: RefSource::SchemaName("__inline_media_type_schema__".to_string()),
            }),
        })
    }
}

fn collect_content(spec: &Rc<Spec>, content: &std::collections::BTreeMap<String, oas3::spec::MediaType>) -> HashMap<String, OAS31MediaType> {
    content
        .iter()
        .map(|(k, v)| {
            (
                k.clone(),
                OAS31MediaType {
                    spec: spec.clone(),
                    media_type: v.clone(),
                },
            )
        })
        .collect()
}

#[derive(Clone)]
pub struct OAS31RequestBody {
    spec: Rc<Spec>,
    request_body: oas3::spec::RequestBody,
}

impl RequestBody<OAS31Spec> for OAS31RequestBody {
    fn required(&self) -> bool {
        self.request_body.required.unwrap_or(false)
    }

    fn content(&self) -> HashMap<String, OAS31MediaType> {
        collect_content(&self.spec, &self.request_body.content)
    }
}

pub struct OAS31RequestBodyReference {
    spec: Rc<Spec>,
    uri: String,
}

impl Reference<OAS31RequestBody> for OAS31RequestBodyReference {
    fn resolve(&self) -> RefOr<OAS31RequestBody> {
        let name = self
            .uri
            .strip_prefix("#/components/requestBodies/")
            .unwrap_or(&self.uri);
        let request_body = self
            .spec
            .components
            .as_ref()
            .and_then(|c| c.request_bodies.get(name))
            .and_then(|ro| match ro {
                ObjectOrReference::Object(b) => Some(b.clone()),
                ObjectOrReference::Ref { .. } => None,
            })
            .expect("chained requestBody $ref is not supported");
        RefOr::Object(OAS31RequestBody {
            spec: self.spec.clone(),
            request_body,
        })
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}

impl ByReference for OAS31RequestBody {
    type Reference = OAS31RequestBodyReference;
}

#[derive(Clone)]
pub struct OAS31Response {
    spec: Rc<Spec>,
    response: oas3::spec::Response,
}

impl Response<OAS31Spec> for OAS31Response {
    fn description(&self) -> &str {
        &self.response.description
    }

    fn content(&self) -> HashMap<String, OAS31MediaType> {
        collect_content(&self.spec, &self.response.content)
    }

    fn headers(&self) -> HashMap<String, RefOr<OAS31SchemaPointer>> {
        HashMap::new()
    }
}

impl ByReference for OAS31Response {
    type Reference = OAS31ResponseReference;
}

pub struct OAS31ResponseReference {
    spec: Rc<Spec>,
    uri: String,
}

impl Reference<OAS31Response> for OAS31ResponseReference {
    fn resolve(&self) -> RefOr<OAS31Response> {
        let name = self
            .uri
            .strip_prefix("#/components/responses/")
            .unwrap_or(&self.uri);
        let response = self
            .spec
            .components
            .as_ref()
            .and_then(|c| c.responses.get(name))
            .and_then(|ro| match ro {
                ObjectOrReference::Object(r) => Some(r.clone()),
                ObjectOrReference::Ref { .. } => None,
            })
            .expect("chained response $ref is not supported");
        RefOr::Object(OAS31Response {
            spec: self.spec.clone(),
            response,
        })
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}

impl crate::Spec for OAS31Spec {
    type Schema = OAS31SchemaPointer;
    type Components = OAS31Components;
    type PathItem = OAS31PathItem;
    type Parameter = OAS31ParameterPointer;
    type MediaType = OAS31MediaType;
    type Operation = OAS31Operation;
    type RequestBody = OAS31RequestBody;
    type Response = OAS31Response;

    fn from_reader(r: impl std::io::Read) -> anyhow::Result<impl crate::Spec> {
        let r = BufReader::new(r);
        let spec: Spec = oas3::from_reader(r)?;
        Ok(OAS31Spec::from(spec))
    }

    fn components(&self) -> Option<OAS31Components> {
        self.spec
            .components
            .as_ref()
            .map(|_| OAS31Components { spec: self.spec.clone() })
    }

    fn paths(&self) -> impl Iterator<Item = (String, OAS31PathItem)> {
        let spec = self.spec.clone();
        let items: Vec<(String, oas3::spec::PathItem)> = self
            .spec
            .paths
            .as_ref()
            .map(|paths| paths.iter().map(|(p, i)| (p.clone(), i.clone())).collect())
            .unwrap_or_default();
        items.into_iter().map(move |(path, path_item)| {
            (
                path,
                OAS31PathItem {
                    spec: spec.clone(),
                    path_item,
                },
            )
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PETSTORE_FRAGMENT: &str = r#"
openapi: 3.1.0
info:
  title: test
  version: "1"
paths: {}
components:
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id:
          type: integer
          format: int64
        name:
          type: string
"#;

    #[test]
    fn parses_schema_type_and_required() {
        let spec = OAS31Spec::from_str(PETSTORE_FRAGMENT).unwrap();
        let components = spec.components().unwrap();
        let (name, pet) = components.schemas().find(|(n, _)| n == "Pet").unwrap();
        assert_eq!(name, "Pet");
        let pet = pet.resolve_fully();
        assert_eq!(pet.required(), Some(vec!["id", "name"]));
        assert_eq!(pet.type_(), Some(vec![crate::types::Type::Object]));
    }
}
