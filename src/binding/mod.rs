mod placeholder;
mod resolver;
mod statement;

pub use placeholder::PlaceholderStyle;
pub use resolver::{resolve, resolve_all, Binding, Resolution};
pub use statement::{BoundStatement, Statement};
