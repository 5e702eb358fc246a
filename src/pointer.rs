//! Pointer injection adapter
//!
//! Wraps the platform input-simulation capability behind a small trait so
//! the mover loop stays independent of the concrete backend. Production
//! code uses `enigo`; tests substitute scripted implementations.

use crate::constants::NUDGE_OFFSET_PX;
use enigo::{Coordinate, Enigo, Mouse, Settings};
use log::debug;
use thiserror::Error;

/// Failure of the platform pointer capability. Never retried; a single
/// failure ends the mover loop.
#[derive(Debug, Error)]
pub enum PointerError {
    /// The pointer device could not be opened (missing permissions, no
    /// display server, unsupported platform).
    #[error("pointer device unavailable: {0}")]
    Unavailable(String),

    /// The platform rejected a position read or a synthetic move.
    #[error("pointer injection failed: {0}")]
    Injection(String),
}

/// Capability for reading and synthetically moving the on-screen cursor.
pub trait Pointer {
    /// Current cursor position in screen coordinates.
    fn position(&mut self) -> Result<(i32, i32), PointerError>;

    /// Move the cursor to an absolute screen position.
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), PointerError>;
}

/// Production pointer backed by the platform input-simulation API.
pub struct SystemPointer {
    enigo: Enigo,
}

impl SystemPointer {
    pub fn new() -> Result<Self, PointerError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| PointerError::Unavailable(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl Pointer for SystemPointer {
    fn position(&mut self) -> Result<(i32, i32), PointerError> {
        self.enigo
            .location()
            .map_err(|e| PointerError::Injection(e.to_string()))
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<(), PointerError> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| PointerError::Injection(e.to_string()))
    }
}

/// Displace the cursor by one offset on each axis and move it straight
/// back, leaving it where it started. Enough to reset idle timers without
/// being visible to the user.
pub fn nudge(pointer: &mut dyn Pointer) -> Result<(), PointerError> {
    let (x, y) = pointer.position()?;
    pointer.move_to(x + NUDGE_OFFSET_PX, y + NUDGE_OFFSET_PX)?;
    pointer.move_to(x, y)?;
    debug!("nudged pointer at ({}, {})", x, y);
    Ok(())
}
