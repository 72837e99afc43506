//! # tideline-core
//!
//! Shared vocabulary of the tideline reconciler: the six managed kinds, their
//! attribute types, remote entities, host-owned declared records and list
//! pages.
//!
//! Each kind is a zero-sized descriptor implementing [`EntityKind`]. Generic
//! code in `tideline-client` and `tideline-provider` is written once against
//! that trait.

mod attributes;
mod entity;
pub mod fields;
mod kind;

pub use attributes::{
    BotAttributes, DatasetAttributes, FileAttributes, IntegrationAttributes, SecretAttributes,
    SkillsetAttributes,
};
pub use entity::{Cursor, Entity, ListPage, Record};
pub use kind::{
    Bot, Dataset, EntityKind, File, Integration, ResourceKind, Secret, Skillset, UnknownKind,
};
