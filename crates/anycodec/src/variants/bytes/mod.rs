mod codec;
mod reader;
mod r#trait;
mod writer;

pub use codec::*;
pub use reader::*;
pub use r#trait::*;
pub use writer::*;
