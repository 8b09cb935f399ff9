// Composition root for the project metrics binary.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the JSON file sources and wire them into the snapshot loader.
// - Render the view-models for the installed snapshot.

pub mod config;
pub mod render;
pub mod state;
