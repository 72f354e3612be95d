// Composition root for the labour-cost tracker.
//
// Responsibilities
// - Read config from environment.
// - Instantiate concrete adapters (record store, summary sink/feed).
// - Wire them into the tracker and summary service behind the router.

pub mod config;
pub mod http;
pub mod state;
