//! Capability witnesses for type-class style dispatch.
//!
//! Capabilities (a numeric algebra, functor mapping, cancellation) are
//! declared as standalone traits and implemented by zero-sized witness types,
//! so generic code selects behavior through type parameters at compile time,
//! including behavior the payload type never opted into itself. There is no
//! runtime registry and no reflection; everything monomorphizes.

mod cancel;
mod eff;
mod error;
mod functor;
pub mod newtype;
mod num;

pub use cancel::{CancelSource, CancelToken, HasCancel};
pub use eff::Eff;
pub use error::Error;
pub use functor::{map, map_as, select, Compose, Functor, PartiallyApplied};
pub use newtype::{NewType, NewTypeOps};
pub use num::{Native, Num, TotalOrderFloat};
