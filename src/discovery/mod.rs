//! # Discovery Module
//!
//! Finds the entities that listings display. Everything with I/O lives here,
//! and runs before any rendering happens.
//!
//! ## Sources
//!
//! | Entity | Source | Function |
//! |--------|--------|----------|
//! | Piper voice | `<dir>/*.onnx` | [`voices::discover_piper_voices`] |
//! | System voice | `say -v ?` (macOS) | [`voices::discover_say_voices`] |
//! | Personality | `<dir>/*.md` | [`personalities::discover_personalities`] |
//!
//! Discovery is best-effort: unreadable files and failing commands degrade to
//! empty descriptions or empty lists. Only cancellation through a
//! [`command::CancelToken`] is reported to the caller.

pub mod command;
pub mod personalities;
pub mod voices;

pub use command::{
    run_command, shutdown_signal, CancelToken, Cancellation, CommandError, ShutdownSignal,
};
pub use personalities::{
    discover_personalities, extract_description, read_description, DescriptionError,
};
pub use voices::{discover_piper_voices, discover_say_voices, extract_language, parse_say_output};
