pub mod block;
pub mod document;
pub mod mark;
pub mod selection;

pub use block::{BlockType, Element};
pub use document::{Document, Node, Path};
pub use mark::{Leaf, Mark};
pub use selection::{BlockPoint, Selection};
