//! Option definitions for uprev configuration.
//!
//! Every option the resolver knows about is described by an
//! [`OptionDescriptor`]: its merge behavior, data type, default, and the
//! stage it first applies to. The [`ManagerCatalog`] maps package managers
//! to their language family; both names are valid configuration block keys.

mod managers;
mod option;
mod registry;
mod stage;

pub use managers::{BuiltinManagers, ManagerCatalog};
pub use option::{MergeKind, OptionDescriptor, OptionType};
pub use registry::{default_values, OptionRegistry, RegistryError};
pub use stage::{Stage, UnknownStage, STAGES};
