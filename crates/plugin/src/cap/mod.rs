pub mod enumerator;
pub mod listener;
pub mod resolver;
pub mod schema;

pub use enumerator::*;
pub use listener::*;
pub use resolver::*;
pub use schema::*;
