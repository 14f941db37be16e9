//! Input-owning overlays
//!
//! Both systems here suspend window interaction while they hold the screen.
//! Neither touches the window stack; the engine reads their state and
//! applies the global block.

mod interrupt;
mod phone;

pub use interrupt::{ModalClick, ModalInterrupt};
pub use phone::{conversation_duration, CallClick, CallPhase, PhoneCallMachine, TranscriptLine};
