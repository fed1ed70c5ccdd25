#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    SelectArtifacts,
    ConfigureParameters,
    SpecifyResources,
    Review,
    Launch,
}

pub const ALL_WIZARD_STEPS: [WizardStep; 5] = [
    WizardStep::SelectArtifacts,
    WizardStep::ConfigureParameters,
    WizardStep::SpecifyResources,
    WizardStep::Review,
    WizardStep::Launch,
];

impl WizardStep {
    pub fn index(self) -> usize {
        match self {
            WizardStep::SelectArtifacts => 0,
            WizardStep::ConfigureParameters => 1,
            WizardStep::SpecifyResources => 2,
            WizardStep::Review => 3,
            WizardStep::Launch => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        ALL_WIZARD_STEPS.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::SelectArtifacts => "select_artifacts",
            WizardStep::ConfigureParameters => "configure_parameters",
            WizardStep::SpecifyResources => "specify_resources",
            WizardStep::Review => "review",
            WizardStep::Launch => "launch",
        }
    }

    /// Label shown in the pagination bar.
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::SelectArtifacts => "Select Artifacts",
            WizardStep::ConfigureParameters => "Configure Parameters",
            WizardStep::SpecifyResources => "Specify Resources",
            WizardStep::Review => "Review",
            WizardStep::Launch => "Launch",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::SelectArtifacts => "New Collection: Select Artifacts to collect",
            WizardStep::ConfigureParameters => "New Collection: Configure Parameters",
            WizardStep::SpecifyResources => "New Collection: Specify Resources",
            WizardStep::Review => "New Collection: Review request",
            WizardStep::Launch => "New Collection: Launch",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepGuard {
    Always,
    SelectionNonEmpty,
    ResourcesValid,
}

/// What must hold before a step may be left, and whether leaving it
/// commits pending form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRule {
    pub step: WizardStep,
    pub leave_guard: StepGuard,
    pub commit_on_leave: bool,
}

pub const TRANSITION_TABLE: [StepRule; 5] = [
    StepRule {
        step: WizardStep::SelectArtifacts,
        leave_guard: StepGuard::SelectionNonEmpty,
        commit_on_leave: false,
    },
    StepRule {
        step: WizardStep::ConfigureParameters,
        leave_guard: StepGuard::Always,
        commit_on_leave: false,
    },
    StepRule {
        step: WizardStep::SpecifyResources,
        leave_guard: StepGuard::ResourcesValid,
        commit_on_leave: true,
    },
    StepRule {
        step: WizardStep::Review,
        leave_guard: StepGuard::Always,
        commit_on_leave: false,
    },
    StepRule {
        step: WizardStep::Launch,
        leave_guard: StepGuard::Always,
        commit_on_leave: false,
    },
];

pub fn rule_for(step: WizardStep) -> &'static StepRule {
    &TRANSITION_TABLE[step.index()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuardContext {
    pub selection_empty: bool,
    pub resources_invalid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavBlocked {
    #[error("select at least one artifact before leaving {step}")]
    EmptySelection { step: WizardStep },
    #[error("fix the invalid resource limits before leaving {step}")]
    InvalidResources { step: WizardStep },
    #[error("no wizard step at position {index}")]
    OutOfRange { index: usize },
}

pub fn check_leave(step: WizardStep, ctx: GuardContext) -> Result<(), NavBlocked> {
    match rule_for(step).leave_guard {
        StepGuard::Always => Ok(()),
        StepGuard::SelectionNonEmpty if ctx.selection_empty => {
            Err(NavBlocked::EmptySelection { step })
        }
        StepGuard::ResourcesValid if ctx.resources_invalid => {
            Err(NavBlocked::InvalidResources { step })
        }
        StepGuard::SelectionNonEmpty | StepGuard::ResourcesValid => Ok(()),
    }
}

/// True when the step may not be left; the pagination bar disables the
/// other steps while this holds.
pub fn is_locked(step: WizardStep, ctx: GuardContext) -> bool {
    check_leave(step, ctx).is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_line_up_with_step_order() {
        for (idx, step) in ALL_WIZARD_STEPS.iter().enumerate() {
            assert_eq!(step.index(), idx);
            assert_eq!(WizardStep::from_index(idx), Some(*step));
            assert_eq!(rule_for(*step).step, *step);
        }
        assert_eq!(WizardStep::from_index(5), None);
    }

    #[test]
    fn guards_apply_only_to_their_step() {
        let blocked = GuardContext {
            selection_empty: true,
            resources_invalid: true,
        };
        assert_eq!(
            check_leave(WizardStep::SelectArtifacts, blocked),
            Err(NavBlocked::EmptySelection {
                step: WizardStep::SelectArtifacts
            })
        );
        assert_eq!(
            check_leave(WizardStep::SpecifyResources, blocked),
            Err(NavBlocked::InvalidResources {
                step: WizardStep::SpecifyResources
            })
        );
        assert!(check_leave(WizardStep::ConfigureParameters, blocked).is_ok());
        assert!(check_leave(WizardStep::Review, blocked).is_ok());
        assert!(!is_locked(WizardStep::SelectArtifacts, GuardContext::default()));
    }
}
