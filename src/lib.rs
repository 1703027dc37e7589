// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Touch-driven 3D shape viewer built on wgpu.
//!
//! Cubeview draws a single static, vertex-colored shape and lets the user
//! rotate (one-finger drag), pan (two-finger drag), zoom (pinch), and reset
//! (double-tap) its pose.
//!
//! # Key entry points
//!
//! - [`CubeEngine`] - owns the GPU context, renderer, and camera; the host
//!   forwards lifecycle and input events into it
//! - [`camera::controller::CameraController`] - gesture-to-pose math and
//!   the model-view-projection matrix (no GPU needed)
//! - [`InputProcessor`] - raw touch/mouse events to [`GestureCommand`]s
//! - [`options::Options`] - TOML-backed runtime configuration
//!
//! With the `viewer` feature, [`Viewer`] opens a winit window around the
//! engine.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
#[cfg(feature = "viewer")]
mod viewer;

pub use engine::command::GestureCommand;
pub use engine::CubeEngine;
pub use error::CubeviewError;
pub use input::{InputEvent, InputProcessor, MouseButton, TouchPhase};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
