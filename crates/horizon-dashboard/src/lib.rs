//! Horizon Dashboard - form controls and views for the analytics dashboard.
//!
//! This crate re-exports the reactive core and adds the dashboard components
//! built on it:
//!
//! - [`forms`]: field controls, most notably the editable [`forms::RichListField`]
//! - [`stream`]: issue stream selection ([`stream::SelectedGroupStore`], [`stream::GroupCheckBox`])
//! - [`discover`]: saved query editing
//! - [`config`]: defaults loaded from TOML or JSON
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_dashboard::prelude::*;
//! use serde_json::{json, Value};
//!
//! let owner = Arc::new(FormField::new("symbolSources", "[]"));
//! owner.value_changed.connect(|(value, event)| {
//!     println!("{} at {}: {}", event.kind, event.index, value);
//! });
//!
//! let field = RichListField::builder(
//!     owner.clone(),
//!     AddDropdown::flat(vec![DropdownChoice::new("HTTP", json!({"type": "http"}))]),
//! )
//! .build();
//!
//! field.request_add(json!({"type": "http"}))?;
//! assert_eq!(field.items()?, vec![json!({"type": "http"})]);
//! # Ok::<(), horizon_dashboard::Error>(())
//! ```

pub use horizon_dashboard_core::*;

pub mod config;
pub mod discover;
pub mod error;
pub mod forms;
pub mod prelude;
pub mod stream;

pub use error::{Error, Result};
