//! Agent flow editing

pub mod flow;

pub use flow::Direction;
