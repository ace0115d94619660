//! Holds implementations for the OAS object definitions. Each module implements a single OAS object.

mod components;
mod media_type;
mod operation;
mod parameter;
mod path_item;
mod request_body;
mod response;
mod schema;
mod spec;

pub use components::*;
pub use media_type::*;
pub use operation::*;
pub use parameter::*;
pub use path_item::*;
pub use request_body::*;
pub use response::*;
pub use schema::*;
pub use spec::*;
