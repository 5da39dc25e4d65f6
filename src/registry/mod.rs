//! Type tag registries consulted by the loader and the dumper.
//!
//! - [`constructor`] — decode side: tag string → decode function.
//! - [`representer`] — encode side: value shape → shallow representation,
//!   with an ordered override table consulted first.
//!
//! Registries own no per-call state. They are populated once during
//! setup and then moved into a converter, so concurrent registration
//! during a conversion is not expressible.

pub mod constructor;
pub mod representer;

pub use constructor::{ConstructFn, ConstructorRegistry};
pub use representer::{Rep, RepresentFn, RepresenterRegistry};
