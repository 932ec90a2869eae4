//! # Components Module
//!
//! The shared registry of hoisted fragments.
//!
//! Generators that decide to hoist a fragment call the matching `add_*` on
//! [`ComponentsContext`] and embed a `#/components/<kind>/<id>` reference at
//! the use site. The identifier comes from the logical name; collisions are
//! resolved according to the run's [`NamingPolicy`](crate::config::NamingPolicy).
//!
//! ## Lifecycle
//!
//! ```text
//! ComponentsContext::new ──add_*──▶ ComponentsContext ──render(self)──▶ FrozenComponents
//! ```
//!
//! `render` takes the context by value, so adding after rendering does not
//! compile. [`SharedComponentsContext`] offers the same contract behind a
//! lock for integrations that register routes from several threads; there
//! the freeze is checked at runtime.

mod context;
mod registry;
mod shared;

pub use context::{ComponentsContext, FrozenComponents};
pub use registry::{sanitize_identifier, ComponentKind, Registry};
pub use shared::SharedComponentsContext;
