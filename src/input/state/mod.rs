mod core;
#[cfg(test)]
mod tests;

pub use core::{
    DrawingSession, DrawingState, DrawingStateMachine, EndReason, SessionEnd, StrokeTarget,
};
