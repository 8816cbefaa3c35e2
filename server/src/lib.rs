//! HTTP backend that turns pantry contents into meal ideas and recipes.
//!
//! The routes live in [`http_server`], the per-route sequences of prompt building,
//! model calls and transcript updates in [`coordinator`].

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod http_server;
