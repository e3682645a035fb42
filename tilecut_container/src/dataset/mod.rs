//! Vector dataset I/O: opening GeoJSON files for filtered reads and streaming
//! features into new files.

mod driver;
mod reader;
mod schema;
mod writer;

pub use driver::*;
pub use reader::*;
pub use schema::*;
pub use writer::*;
