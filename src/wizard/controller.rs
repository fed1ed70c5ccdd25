use super::base_flow::BaseFlow;
use super::parameters::{self, ParameterMap};
use super::request::{assemble_request, Request};
use super::resources::{ResourceField, ResourceLimits, ResourcesForm};
use super::selection;
use super::steps::{self, GuardContext, NavBlocked, WizardStep};
use super::Hydration;
use crate::catalog::ItemDescriptor;

/// Something the embedding caller must act on after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    None,
    Launch(Request),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardTransition {
    pub effect: WizardEffect,
    pub feedback: Option<String>,
}

impl WizardTransition {
    fn no_op(feedback: Option<String>) -> Self {
        Self {
            effect: WizardEffect::None,
            feedback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Pending,
    Delivered,
}

/// Owns all wizard state and the step state machine.
#[derive(Debug, Clone)]
pub struct WizardController {
    step: WizardStep,
    selection: Vec<ItemDescriptor>,
    parameters: ParameterMap,
    resources: ResourceLimits,
    resources_form: ResourcesForm,
    base_flow: Option<BaseFlow>,
    base_request: Option<Request>,
    hydration: Hydration,
    launch: LaunchState,
}

impl WizardController {
    pub fn new(base_flow: Option<BaseFlow>) -> Self {
        Self {
            step: WizardStep::SelectArtifacts,
            selection: Vec::new(),
            parameters: ParameterMap::new(),
            resources: ResourceLimits::default(),
            resources_form: ResourcesForm::default(),
            base_flow,
            base_request: None,
            hydration: Hydration::Uninitialized,
            launch: LaunchState::Pending,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &[ItemDescriptor] {
        &self.selection
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn resources(&self) -> ResourceLimits {
        self.resources
    }

    pub fn resources_form(&self) -> &ResourcesForm {
        &self.resources_form
    }

    pub fn base_request(&self) -> Option<&Request> {
        self.base_request.as_ref()
    }

    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    pub fn launch_state(&self) -> LaunchState {
        self.launch
    }

    /// Supplies a base flow that arrived after the wizard opened. Ignored
    /// once hydration has started.
    pub fn set_base_flow(&mut self, base_flow: BaseFlow) {
        if self.hydration == Hydration::Uninitialized {
            self.base_flow = Some(base_flow);
        }
    }

    /// Starts edit-mode hydration if it has not happened yet and the base
    /// flow names at least one artifact. Returns the names to resolve.
    pub fn begin_hydration(&mut self) -> Option<Vec<String>> {
        if self.hydration == Hydration::Hydrated {
            return None;
        }
        let names = self.base_flow.as_ref()?.hydration_names()?.to_vec();
        self.base_request = self
            .base_flow
            .as_ref()
            .and_then(|flow| flow.request.clone());
        self.hydration = Hydration::Hydrated;
        self.resources_form.hydrate_from(self.base_request.as_ref());
        Some(names)
    }

    /// Applies resolved descriptors from hydration. An empty result leaves
    /// the wizard untouched.
    pub fn apply_hydration(&mut self, items: Vec<ItemDescriptor>) -> bool {
        if items.is_empty() {
            return false;
        }
        self.selection = items;
        self.parameters = self
            .base_request
            .as_ref()
            .map(Request::parameter_map)
            .unwrap_or_default();
        true
    }

    pub fn set_selection(&mut self, selection: Vec<ItemDescriptor>) {
        self.selection = selection;
    }

    pub fn select(&mut self, item: &ItemDescriptor, selected: bool) {
        self.select_many(std::slice::from_ref(item), selected);
    }

    pub fn select_many(&mut self, items: &[ItemDescriptor], selected: bool) {
        self.set_selection(selection::select_many(&self.selection, items, selected));
    }

    pub fn remove_artifact(&mut self, name: &str) {
        self.set_selection(selection::remove(&self.selection, name));
    }

    pub fn set_parameter(&mut self, name: &str, value: &str) {
        self.parameters = parameters::set_value(&self.parameters, name, value);
    }

    pub fn set_resources(&mut self, resources: ResourceLimits) {
        self.resources = resources;
    }

    pub fn set_resource_field_text(&mut self, field: ResourceField, raw: &str) {
        self.resources_form.set_field_text(field, raw);
    }

    pub fn guard_context(&self) -> GuardContext {
        GuardContext {
            selection_empty: self.selection.is_empty(),
            resources_invalid: self.resources_form.is_locked(),
        }
    }

    pub fn is_step_locked(&self) -> bool {
        steps::is_locked(self.step, self.guard_context())
    }

    pub fn assembled_request(&self) -> Request {
        assemble_request(&self.selection, &self.parameters, &self.resources)
    }

    pub fn go_to_step(&mut self, index: usize) -> Result<WizardTransition, NavBlocked> {
        let target = WizardStep::from_index(index).ok_or(NavBlocked::OutOfRange { index })?;
        if target == self.step {
            return Ok(WizardTransition::no_op(None));
        }
        steps::check_leave(self.step, self.guard_context())?;
        if steps::rule_for(self.step).commit_on_leave {
            self.set_resources(self.resources_form.snapshot());
        }
        self.step = target;
        if target == WizardStep::Launch {
            return Ok(self.enter_launch());
        }
        Ok(WizardTransition::no_op(None))
    }

    pub fn next(&mut self) -> Result<WizardTransition, NavBlocked> {
        self.go_to_step(self.step.index() + 1)
    }

    pub fn prev(&mut self) -> Result<WizardTransition, NavBlocked> {
        match self.step.index().checked_sub(1) {
            Some(index) => self.go_to_step(index),
            None => Ok(WizardTransition::no_op(None)),
        }
    }

    pub fn cancel(&mut self) -> WizardTransition {
        WizardTransition {
            effect: WizardEffect::Cancel,
            feedback: None,
        }
    }

    fn enter_launch(&mut self) -> WizardTransition {
        match self.launch {
            LaunchState::Pending => {
                self.launch = LaunchState::Delivered;
                WizardTransition {
                    effect: WizardEffect::Launch(self.assembled_request()),
                    feedback: Some("collection launched".to_string()),
                }
            }
            LaunchState::Delivered => WizardTransition::no_op(Some(
                "collection was already launched".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ParamSpec;

    #[test]
    fn starts_on_select_step_with_empty_state() {
        let wizard = WizardController::new(None);
        assert_eq!(wizard.step(), WizardStep::SelectArtifacts);
        assert!(wizard.selection().is_empty());
        assert!(wizard.parameters().is_empty());
        assert_eq!(wizard.launch_state(), LaunchState::Pending);
    }

    #[test]
    fn empty_selection_blocks_leaving_select_step() {
        let mut wizard = WizardController::new(None);
        assert!(matches!(
            wizard.next(),
            Err(NavBlocked::EmptySelection { .. })
        ));
        assert_eq!(wizard.step(), WizardStep::SelectArtifacts);

        wizard.select(&ItemDescriptor::named("A"), true);
        assert!(wizard.next().is_ok());
        assert_eq!(wizard.step(), WizardStep::ConfigureParameters);
    }

    #[test]
    fn invalid_resources_block_and_valid_ones_commit_on_leave() {
        let mut wizard = WizardController::new(None);
        wizard.select(&ItemDescriptor::named("A"), true);
        wizard.go_to_step(2).expect("to resources");

        wizard.set_resource_field_text(ResourceField::Timeout, "abc");
        assert!(wizard.is_step_locked());
        assert!(wizard.go_to_step(3).is_err());
        assert!(wizard.prev().is_err());
        assert_eq!(wizard.step(), WizardStep::SpecifyResources);

        wizard.set_resource_field_text(ResourceField::Timeout, "600");
        assert_eq!(wizard.resources().timeout, None);
        wizard.go_to_step(3).expect("to review");
        assert_eq!(wizard.resources().timeout, Some(600));
    }

    #[test]
    fn out_of_range_step_is_rejected() {
        let mut wizard = WizardController::new(None);
        wizard.select(&ItemDescriptor::named("A"), true);
        assert_eq!(
            wizard.go_to_step(9),
            Err(NavBlocked::OutOfRange { index: 9 })
        );
        assert_eq!(wizard.step(), WizardStep::SelectArtifacts);
    }

    #[test]
    fn launch_fires_once() {
        let mut wizard = WizardController::new(None);
        wizard.select(&ItemDescriptor::named("A"), true);
        let first = wizard.go_to_step(4).expect("launch");
        assert!(matches!(first.effect, WizardEffect::Launch(_)));

        wizard.prev().expect("back to review");
        let second = wizard.next().expect("launch again");
        assert_eq!(second.effect, WizardEffect::None);
        assert_eq!(wizard.launch_state(), LaunchState::Delivered);
    }

    #[test]
    fn hydration_is_one_shot() {
        let request = Request {
            artifacts: vec!["A".to_string()],
            ..Request::default()
        };
        let mut wizard = WizardController::new(Some(BaseFlow::from_request(request)));
        assert_eq!(wizard.begin_hydration(), Some(vec!["A".to_string()]));
        assert_eq!(wizard.hydration(), Hydration::Hydrated);
        assert_eq!(wizard.begin_hydration(), None);
    }

    #[test]
    fn late_base_flow_is_picked_up_on_next_update() {
        let mut wizard = WizardController::new(None);
        assert_eq!(wizard.begin_hydration(), None);
        assert_eq!(wizard.hydration(), Hydration::Uninitialized);

        let request = Request {
            artifacts: vec!["A".to_string()],
            timeout: Some(30),
            ..Request::default()
        };
        wizard.set_base_flow(BaseFlow::from_request(request));
        assert_eq!(wizard.begin_hydration(), Some(vec!["A".to_string()]));
        assert_eq!(wizard.resources_form().value(ResourceField::Timeout), Some(30));
    }

    #[test]
    fn empty_hydration_result_keeps_wizard_empty() {
        let request = Request {
            artifacts: vec!["A".to_string()],
            ..Request::default()
        };
        let mut wizard = WizardController::new(Some(BaseFlow::from_request(request)));
        wizard.begin_hydration();
        assert!(!wizard.apply_hydration(Vec::new()));
        assert!(wizard.selection().is_empty());

        let item = ItemDescriptor::named("A").with_parameters(vec![ParamSpec::named("p")]);
        assert!(wizard.apply_hydration(vec![item.clone()]));
        assert_eq!(wizard.selection(), &[item][..]);
    }
}
