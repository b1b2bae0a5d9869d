//! Custom Elements Manifest model and merging.

pub mod merge;
pub mod types;

pub use merge::merge_manifests;
pub use types::{
    Attribute, CssProperty, Declaration, Deprecatable, Deprecation, Event, Export, Manifest,
    Member, MemberKind, Module, NamedItem, Parameter, Privacy, Reference, ReturnInfo, TypeText,
};
