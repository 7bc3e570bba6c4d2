//! Core, DOM-free primitives and state for the page controllers.
pub mod alerts;
pub mod error;
pub mod selection;
pub mod storage;
pub mod testing;
pub mod theme;
