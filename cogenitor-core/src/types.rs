use std::collections::HashMap;
use std::io;
use std::str::FromStr;

/// An implementation of an OAS spec, specific to our needs for code generation.
///
/// One `Spec` impl exists per supported OpenAPI major version (see
/// `adapters::oas30`, `adapters::oas31`). Everything downstream of the
/// translation pipeline is written against this trait so it never needs to
/// know which concrete OAS version produced the document.
pub trait Spec: FromStr<Err = anyhow::Error> + Sized {
    type Schema: Schema;
    type Components: Components<Self>;
    type PathItem: PathItem<Self>;
    type Parameter: Parameter<Self> + ByReference + Clone;
    type MediaType: MediaType<Self>;
    type Operation: Operation<Self>;
    type RequestBody: RequestBody<Self> + ByReference + Clone;
    type Response: Response<Self> + ByReference + Clone;

    fn from_reader(r: impl io::Read) -> anyhow::Result<impl Spec>;

    fn components(&self) -> Option<Self::Components>;

    fn paths(&self) -> impl Iterator<Item = (String, Self::PathItem)>;

    fn schemata_iter(&self) -> impl Iterator<Item = (String, RefOr<Self::Schema>)> {
        self.components()
            .into_iter()
            .flat_map(|c| c.schemas().collect::<Vec<_>>())
            .collect::<Vec<_>>()
            .into_iter()
    }
}

pub trait Components<S: Spec> {
    fn schemas(&self) -> impl Iterator<Item = (String, RefOr<S::Schema>)>;
}

/// representation of possible values of the `type` keyword. We do not
/// distinguish `number` from `integer` beyond what `Format` already
/// encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    String,
}

/// Formats, as per https://spec.openapis.org/oas/v3.0.4.html#data-type-format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Int32,
    Int64,
    Float,
    Double,
    Byte,
    Binary,
    Date,
    DateTime,
    Password,
}

#[derive(Debug, Clone)]
pub enum BooleanOrSchema<S> {
    Boolean(bool),
    Schema(S),
}

#[derive(Debug, Clone)]
pub struct Discriminator {
    pub property_name: String,
    pub mapping: Vec<(String, String)>,
}

/// Represents a schema for validating a JSON data item. Only the fields
/// relevant to code generation are modeled.
pub trait Schema: Clone + std::fmt::Debug + std::hash::Hash + Eq + ByReference {
    fn name(&self) -> Option<&str>;
    fn type_(&self) -> Option<Vec<Type>>;
    fn format(&self) -> Option<Format>;
    fn title(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
    fn nullable(&self) -> bool;

    fn required(&self) -> Option<Vec<&str>>;

    fn all_of(&self) -> Option<Vec<impl Schema>>;
    fn any_of(&self) -> Option<Vec<impl Schema>>;
    fn one_of(&self) -> Option<Vec<impl Schema>>;
    /// `discriminator` keyword alongside `oneOf`/`anyOf`
    fn discriminator(&self) -> Option<Discriminator>;
    fn enum_(&self) -> Option<Vec<json::JsonValue>>;

    fn properties(&self) -> HashMap<String, RefOr<Self>>;
    fn pattern_properties(&self) -> HashMap<String, RefOr<impl Schema>>;
    fn addtional_properties(&self) -> BooleanOrSchema<impl Schema>;

    fn items(&self) -> Option<Vec<RefOr<Self>>>;

    /// vendor extension `x-replace-type`: an escape hatch letting an OAS
    /// document name a Rust type directly instead of having one generated.
    fn replace_type(&self) -> Option<&str>;
}

// https://spec.openapis.org/oas/v3.0.4.html#x4-7-9-path-item-object
pub trait PathItem<S: Spec> {
    fn operations_iter(&self) -> impl Iterator<Item = (http::Method, S::Operation)>;
    fn parameters(&self) -> impl Iterator<Item = RefOr<S::Parameter>>;
}

// see https://spec.openapis.org/oas/v3.0.4.html#x4-7-10
pub trait Operation<S: Spec> {
    fn parameters(&self) -> impl Iterator<Item = RefOr<S::Parameter>>;
    fn operation_id(&self) -> Option<&str>;
    fn request_body(&self) -> Option<RefOr<S::RequestBody>>;
    fn responses(&self) -> impl Iterator<Item = (StatusSpec, RefOr<S::Response>)>;
    fn tags(&self) -> Vec<String>;
    fn deprecated(&self) -> bool;
}

/// https://spec.openapis.org/oas/v3.0.4.html#x4-7-12-1-parameter-locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterStyle {
    Simple,
    Form,
}

/// see https://spec.openapis.org/oas/v3.0.4.html#x4-7-12-parameter-object
pub trait Parameter<S: Spec> {
    fn in_(&self) -> ParameterLocation;
    fn name(&self) -> &str;
    fn required(&self) -> bool;
    fn style(&self) -> ParameterStyle;
    fn explode(&self) -> bool;

    /// `Parameter` must carry either `schema` or `content` (never both)
    fn schema(&self) -> Option<RefOr<S::Schema>>;
    fn content(&self) -> Option<HashMap<String, S::MediaType>>;
}

pub trait RequestBody<S: Spec> {
    fn required(&self) -> bool;
    fn content(&self) -> HashMap<String, S::MediaType>;
}

pub trait MediaType<S: Spec> {
    fn schema(&self) -> Option<RefOr<S::Schema>>;
}

pub trait Response<S: Spec> {
    fn description(&self) -> &str;
    fn content(&self) -> HashMap<String, S::MediaType>;
    fn headers(&self) -> HashMap<String, RefOr<S::Schema>>;
}

/// a response status key: a literal code, an `NXX` range, or `default`.
/// `Ord` sorts literal codes low-to-high and puts `default` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusSpec {
    Informational(u16),
    Informational1XX,
    Success(u16),
    Success2XX,
    Redirection(u16),
    Redirection3XX,
    ClientError(u16),
    ClientError4XX,
    ServerError(u16),
    ServerError5XX,
    Default,
}

impl StatusSpec {
    pub fn is_success(self) -> bool {
        matches!(
            self,
            StatusSpec::Informational(_)
                | StatusSpec::Informational1XX
                | StatusSpec::Success(_)
                | StatusSpec::Success2XX
                | StatusSpec::Redirection(_)
                | StatusSpec::Redirection3XX
        )
    }
}

/// types implementing `Reference` contain the path in the OAS tree as well
/// as the means necessary to resolve that path. Resolving only ever
/// performs a single hop: OAS documents do not chain `$ref`s that point at
/// other `$ref`s, they point straight at an object.
pub trait Reference<T: ByReference> {
    fn resolve(&self) -> RefOr<T>;
    fn uri(&self) -> &str;
}

pub trait ByReference: Sized {
    type Reference: Reference<Self> + Clone + std::fmt::Debug + std::hash::Hash + Eq;
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum RefOr<T>
where
    T: ByReference,
{
    Reference(T::Reference),
    Object(T),
}

impl<T> RefOr<T>
where
    T: ByReference + Clone,
{
    /// follows a `$ref` to the `RefOr::Object` it points at; a value that
    /// is already `RefOr::Object` is returned unchanged. Useful when the
    /// `RefOr` itself (rather than the bare schema) is needed as a stable
    /// map key.
    pub fn resolve(&self) -> RefOr<T> {
        match self {
            RefOr::Reference(r) => r.resolve(),
            RefOr::Object(o) => RefOr::Object(o.clone()),
        }
    }

    /// fully dereferences to the underlying value.
    pub fn resolve_fully(&self) -> T {
        match self.resolve() {
            RefOr::Reference(_) => panic!("chained $ref is not supported"),
            RefOr::Object(o) => o,
        }
    }

    /// the `$ref` URI, if this is a reference rather than an inline value.
    pub fn reference_uri(&self) -> Option<&str> {
        match self {
            RefOr::Reference(r) => Some(r.uri()),
            RefOr::Object(_) => None,
        }
    }
}
