//! Volley Game — the running-game bounded context.
//!
//! One entity instance per active game, each the single logical owner of
//! that game's authoritative [`volley_physics::GameState`]. Start, move,
//! and tick commands for one game serialize through its mailbox; distinct
//! games run fully in parallel.

pub mod application;
pub mod domain;
