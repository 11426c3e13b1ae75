//! Heads-up No-Limit Hold'em hand engine, abstracted game-tree builder, and adapters.
//!
//! ## Core
//! - [`cards`] — card ids, 5/7-card evaluation.
//! - [`engine`] — the dealt-cards `State` machine for a single hand.
//! - [`abstraction`] — the cards-free `TreeState` twin used by the tree builder.
//! - [`tree`] — memoised recursive expansion of a `BettingAbstraction` into a `GameTree`.
//!
//! ## Adapters
//! - [`dto`] — serde wire types for the HTTP surface.
//! - [`server`] — actix-web HTTP/JSON adapter (feature `server`).
//! - [`cli`] — interactive and auto-simulate terminal driver (feature `cli`).

pub mod cards;
pub mod engine;
pub mod abstraction;
pub mod tree;
pub mod dto;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;
