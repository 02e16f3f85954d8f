//! Type system utilities and aliases.
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>` shared handles.

pub mod aliases;

pub use aliases::*;
