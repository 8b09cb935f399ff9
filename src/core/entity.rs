// This module groups the entity components.
//
// Structure
// - id.rs, timestamp.rs: normalized identifier and date value types
// - model.rs: canonical entity structs and their enums
// - normalize.rs: raw record to canonical struct, per entity kind
// - snapshot.rs: the five collections, raw and normalized
// - time_logged.rs: lifecycle rules for the cached task hours

pub mod id;
pub mod model;
pub mod normalize;
pub mod snapshot;
pub mod time_logged;
pub mod timestamp;
