//! Data model
//!
//! Typed vectors, their physical representations, and the handle
//! wrapper that carries ownership. Coercion between element types lives
//! here too; the lattice over whole types lives in [crate::ptype].

mod coercion;
pub use coercion::*;

mod cow;
pub use cow::*;

mod handle;
pub use handle::*;

mod record;
pub use record::*;

mod rep;
pub use rep::*;

mod types;
pub use types::*;

mod vector;
pub use vector::*;
