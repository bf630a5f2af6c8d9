mod error;
pub use error::*;

mod compare;
pub use compare::*;

mod map;
pub use map::*;

mod entry;
mod introspect;
mod search;
mod varargs;
