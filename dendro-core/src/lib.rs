//! Dendrogram layout of neuronal morphologies.
//!
//! Main components:
//! - [`tree`] — section hierarchy of a neurite.
//! - [`neuron`] — typed neurites and neurons.
//! - [`segment`] — pre-order walk over consecutive point pairs.
//! - [`layout`] — the dendrogram layout pass.
//! - [`transform`] — rotation and line widths of a laid out dendrogram.
//! - [`figure`] — end-to-end figure data for renderers.
//! - [`config`] — dendrogram display options.
//! - [`synth`] — random morphologies.
//! - [`error`] — error types.
//! - [`point`], [`types`] — samples and ids.

pub mod config;
pub mod error;
pub mod figure;
pub mod layout;
pub mod neuron;
pub mod point;
pub mod segment;
pub mod synth;
pub mod transform;
pub mod tree;
pub mod types;
