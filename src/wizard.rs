pub mod base_flow;
pub mod controller;
pub mod parameters;
pub mod request;
pub mod resources;
pub mod selection;
pub mod steps;

pub use base_flow::BaseFlow;
pub use controller::{LaunchState, WizardController, WizardEffect, WizardTransition};
pub use parameters::ParameterMap;
pub use request::{assemble_request, EnvEntry, Request, RequestParameters, BYTES_PER_MEGABYTE};
pub use resources::{ResourceField, ResourceLimits, ResourcesForm, ALL_RESOURCE_FIELDS};
pub use steps::{NavBlocked, WizardStep, ALL_WIZARD_STEPS};

/// Whether externally supplied initial state has been applied yet. Once
/// `Hydrated`, local edits are authoritative and later inputs are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hydration {
    #[default]
    Uninitialized,
    Hydrated,
}
