//! Core pipeline for the sweep radar display.
//!
//! Serial bytes are split into lines and parsed into readings; readings move
//! the live sweep and feed a bounded hit store; every scheduled frame derives
//! fading trails and distance labels from that store and hands them to a
//! render sink.

pub mod controls;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod render;
pub mod scheduler;
pub mod telemetry;

pub use controls::{ControlSurface, UiParameters};
pub use prelude::{DisplayConfig, SweepError, SweepResult};
pub use render::{RenderSink, SceneBuffer};
pub use scheduler::{FrameScheduler, TickOutcome};
