//! Type aliases for commonly used shared handles.
//!
//! The application is single-threaded: the shell, the scene and the undo
//! stack all live on the UI thread, so sharing uses `Rc<RefCell<T>>`.
//!
//! ## Usage
//!
//! ```rust
//! use cherish_core::types::{shared, Shared};
//!
//! let counter: Shared<u32> = shared(0);
//! *counter.borrow_mut() += 1;
//! assert_eq!(*counter.borrow(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// The undo stack is handed to the scene as a `Shared<UndoStack>` owned by
/// the shell.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value into a [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
