mod set;
mod stack;

pub use set::Set;
pub use stack::Stack;
