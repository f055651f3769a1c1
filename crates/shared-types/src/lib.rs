//! # Shared Types Crate
//!
//! Data model shared by every crate in the workspace: the records the
//! object store hands out, the keys used to address them, resource-kind
//! definitions and the component tree that describers render into.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-crate types are defined here.
//! - **Closed component set**: `View` is a closed enum; only `View::List`
//!   nests other components.
//! - **Serializable**: every response type derives serde traits so it can be
//!   shipped to a frontend as JSON.

pub mod component;
pub mod entities;
pub mod errors;

pub use component::*;
pub use entities::*;
pub use errors::*;
