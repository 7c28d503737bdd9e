pub mod channel;
pub mod docket;
pub mod document;
pub mod message;
pub mod operation;
pub mod payload;

pub use channel::*;
pub use docket::*;
pub use document::*;
pub use message::*;
pub use operation::*;
pub use payload::*;
