//! Attack and defense catalogs.
//!
//! - `definition`: static attack/defense data
//! - `registry`: the `Catalog` lookup structure
//! - `defaults`: the standard game content
//! - `loader`: JSON loading with data-integrity reporting

pub mod definition;
pub mod registry;
pub mod defaults;
pub mod loader;

pub use definition::{AttackDefinition, DefenseDefinition, SecondaryEffect};
pub use registry::Catalog;
pub use defaults::{opening_attack_ids, standard_attacks, standard_catalog, standard_defenses, OPENING_ATTACKS};
pub use loader::{load_catalog, LoadReport};
