//! fOS UI - Declarative UI runtime
//!
//! Turns node descriptions into live [`fos_dom`] nodes and runs the
//! lifecycle of stateful components wrapping them.
//!
//! ```text
//! h(type, props) --materialize--> live node
//!                      |
//!                      +-- component --> Runtime::build --> root node
//! ```
//!
//! The host document is reached only through the [`Platform`] trait, passed
//! explicitly to every operation.

mod arena;
mod component;
mod config;
mod element;
mod error;
mod flatten;
mod jsx;
mod platform;
mod props;
mod runtime;
mod slot;

pub use component::{Component, ComponentId, Lifecycle, Scope};
pub use config::Config;
pub use element::{fragment, h, Child, ComponentType, Element, ElementType, FunctionComponent};
pub use error::{Error, Result};
pub use flatten::{flatten, Collect};
pub use platform::Platform;
pub use props::{Prop, Props, Ref, RefTarget};
pub use runtime::{Before, Runtime, Target};
pub use slot::{extract, extract_into, slot, Slot, Slots};

pub use fos_dom::{DomTree, Event, NodeId};
