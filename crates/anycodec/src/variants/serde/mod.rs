#[cfg(feature = "bincode")]
mod bincode;
#[cfg(feature = "serde_json")]
mod finite;
#[cfg(feature = "serde_json")]
mod json;

#[cfg(feature = "bincode")]
pub use bincode::*;
#[cfg(feature = "serde_json")]
pub use json::*;
