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
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests may unwrap and use glob imports of the module under test
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::wildcard_imports
    )
)]

//! Particle layout and animation core for a scene that morphs a scattered
//! cloud into a tree silhouette and back.
//!
//! # Key entry points
//!
//! - [`layout::generate_group`] - cone-spiral / scatter-sphere layouts
//! - [`layout::GroupCache`] - layouts memoized by count and category
//! - [`animation::GroupAnimator`] - per-frame damped motion, sway and spin
//! - [`scene::Scene`] - every group plus topper and snow behind one mode flag
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! Layouts are generated once and shared immutably. Each frame the scene
//! folds the current positions toward the mode's targets and hands the
//! renderer one slice of instance matrices per batched draw. The renderer
//! itself (pipelines, materials, post-processing) lives outside this crate.

pub mod animation;
pub mod error;
pub mod layout;
pub mod options;
pub mod scene;
pub mod util;
