//! Features: a geometry plus scalar properties.

mod collection;
#[allow(clippy::module_inception)]
mod feature;
mod properties;
mod value;

pub use collection::*;
pub use feature::*;
pub use properties::*;
pub use value::*;
