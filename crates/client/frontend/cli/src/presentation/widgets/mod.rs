//! Individual screen panels.
pub mod banner;
pub mod footer;
pub mod header;
pub mod messages;
pub mod room;
