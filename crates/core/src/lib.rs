//! Core types for the weft hypergraph store: the error taxonomy, the
//! identifier and kind scheme, the persistent datatype catalog, and the
//! literal canonicalizer.

pub mod c14n;
pub mod error;
pub mod ident;
pub mod value;
pub mod xsd;

pub use error::{WeftError, WeftResult};
pub use ident::{Ident, Kind};
pub use value::Literal;
