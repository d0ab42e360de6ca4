//! VoxFlow - Mock backend and campaign simulator for a voice AI agent console

pub mod agent;
pub mod api;
pub mod campaign;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod store;
