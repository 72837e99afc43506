//! # tideline-provider
//!
//! Reconciles declared records against remote state for every managed kind
//! through one generic engine.
//!
//! ## Overview
//!
//! - [`Resource`] implements Create/Read/Update/Delete/Import for a kind.
//! - [`Lookup`] implements read-only FetchOne/FetchAll, redacting sensitive
//!   fields.
//! - [`DynResource`] / [`DynLookup`] expose the same contracts over JSON
//!   values for hosts that manage heterogeneous kinds.
//! - [`Provider`] receives the transport once and hands it to each of the
//!   above.
//!
//! ## Example
//!
//! ```ignore
//! use tideline_core::{Bot, BotAttributes, Record};
//! use tideline_provider::{Provider, ReadOutcome};
//!
//! let mut provider = Provider::new();
//! provider.configure(&config)?;
//! let bots = provider.resource::<Bot>()?;
//!
//! let record = bots.create(&Record::declared(BotAttributes {
//!     name: "Ada".into(),
//!     ..Default::default()
//! })).await?;
//!
//! match bots.read(&record).await? {
//!     ReadOutcome::Present(fresh) => println!("{:?}", fresh.attributes),
//!     ReadOutcome::Gone => println!("deleted out of band"),
//! }
//! ```

mod dynamic;
mod error;
mod lookup;
mod provider;
mod resource;

pub use dynamic::{DynLookup, DynResource};
pub use error::{Operation, ProviderError, ProviderResult};
pub use lookup::Lookup;
pub use provider::Provider;
pub use resource::{ReadOutcome, Resource};
