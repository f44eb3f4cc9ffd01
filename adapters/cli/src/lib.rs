#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Terminal adapter that plays hexchess against an external rule engine.
//!
//! [`session::Session`] wires the board, the interaction systems and the
//! engine client together; [`terminal::TerminalBackend`] draws the resulting
//! scene and turns typed cell keys into clicks.

pub mod config;
pub mod scene;
pub mod session;
pub mod terminal;
