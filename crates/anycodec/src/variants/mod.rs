mod bytes;
#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "zerocopy")]
mod zerocopy;

pub use bytes::*;
#[cfg(feature = "serde")]
pub use serde::*;
#[cfg(feature = "zerocopy")]
pub use zerocopy::*;
