//! Volley Directory — the session directory bounded context.
//!
//! Single logical owner of the mapping from game id to session metadata
//! (name, participants, status), addressed by the fixed key "global".
//! Create and join commands for all games serialize through this one
//! entity.

pub mod application;
pub mod domain;
