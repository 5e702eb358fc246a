// Library interface for jiggle
// This allows tests and the binary to access the crate's functionality

pub mod constants;
pub mod control;
pub mod mover;
pub mod pointer;
pub mod ui;

pub use control::{Controller, InvalidIntervalError};
pub use mover::{CancelToken, MoverEvent, MoverHandle};
pub use pointer::{Pointer, PointerError, SystemPointer};
