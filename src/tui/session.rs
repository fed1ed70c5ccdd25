use super::navigation::{wizard_action_from_key, ScriptStep, WizardAction};
use crate::catalog::search::clamp_focus;
use crate::catalog::{
    ArtifactType, CatalogDispatcher, CatalogEvent, CatalogQuery, ParamSpec, SearchPane,
};
use crate::shared::logging::WizardLog;
use crate::wizard::parameters::display_value;
use crate::wizard::{
    selection, NavBlocked, Request, WizardController, WizardEffect, WizardStep,
    WizardTransition, ALL_RESOURCE_FIELDS,
};
use std::collections::VecDeque;
use std::time::Duration;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionExit {
    Launched(Request),
    Cancelled,
}

/// Answers free-text questions raised while handling an action.
pub trait Prompter {
    fn prompt_line(
        &mut self,
        title: &str,
        prompt: &str,
        initial: &str,
    ) -> Result<Option<String>, String>;
}

/// Prompter fed from `text=` entries of a scripted run.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn push(&mut self, answer: String) {
        self.answers.push_back(answer);
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_line(
        &mut self,
        title: &str,
        _prompt: &str,
        _initial: &str,
    ) -> Result<Option<String>, String> {
        self.answers.pop_front().map(Some).ok_or_else(|| {
            format!("scripted wizard has no queued text for prompt `{title}`; add text=<value> before the key")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterRow {
    Artifact { name: String },
    Param { artifact: String, spec: ParamSpec },
}

impl ParameterRow {
    pub fn artifact(&self) -> &str {
        match self {
            ParameterRow::Artifact { name } => name,
            ParameterRow::Param { artifact, .. } => artifact,
        }
    }
}

/// A running wizard: controller state plus what the terminal needs on top
/// of it (search pane, row focus, status line, log).
pub struct WizardSession {
    controller: WizardController,
    search: SearchPane,
    artifact_type: ArtifactType,
    focus: usize,
    status_text: String,
    log: WizardLog,
}

impl WizardSession {
    pub fn new(controller: WizardController, artifact_type: ArtifactType, log: WizardLog) -> Self {
        Self {
            controller,
            search: SearchPane::default(),
            artifact_type,
            focus: 0,
            status_text: "Select artifacts to collect.".to_string(),
            log,
        }
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn search(&self) -> &SearchPane {
        &self.search
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn step(&self) -> WizardStep {
        self.controller.step()
    }

    /// Issues the initial unfiltered search and starts hydration.
    pub fn open(&mut self, dispatcher: &mut CatalogDispatcher) {
        self.log.info(
            "wizard_open",
            &format!("artifact_type={}", self.artifact_type),
        );
        let query = self.search.on_filter_change(self.artifact_type, "");
        dispatcher.dispatch(query);
        self.refresh_hydration(dispatcher);
    }

    /// Runs on every update; starts hydration once a base flow is usable.
    pub fn refresh_hydration(&mut self, dispatcher: &mut CatalogDispatcher) {
        if let Some(names) = self.controller.begin_hydration() {
            self.log
                .info("hydration_issued", &format!("names={}", names.join(",")));
            dispatcher.dispatch(CatalogQuery::Names(names));
        }
    }

    pub fn apply_catalog_event(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::SearchResults {
                search_term,
                result,
            } => {
                let items = match result {
                    Ok(items) => items,
                    Err(err) => {
                        self.log.warn(
                            "catalog_fetch_failed",
                            &format!("search_term={search_term} error={err}"),
                        );
                        Vec::new()
                    }
                };
                self.search.apply_response(items);
            }
            CatalogEvent::HydrationResults { names, result } => match result {
                Ok(items) => {
                    let count = items.len();
                    if self.controller.apply_hydration(items) {
                        let params = self
                            .controller
                            .base_request()
                            .map(|request| request.parameters.env.len())
                            .unwrap_or(0);
                        self.log.info(
                            "hydration_applied",
                            &format!(
                                "requested={} resolved={count} params={params}",
                                names.len()
                            ),
                        );
                        self.status_text = format!("Loaded {count} artifact(s) from the base flow.");
                    }
                }
                Err(err) => self.log.warn(
                    "hydration_failed",
                    &format!("names={} error={err}", names.join(",")),
                ),
            },
        }
    }

    pub fn parameter_rows(&self) -> Vec<ParameterRow> {
        let mut rows = Vec::new();
        for item in self.controller.selection() {
            rows.push(ParameterRow::Artifact {
                name: item.name.clone(),
            });
            for spec in &item.parameters {
                rows.push(ParameterRow::Param {
                    artifact: item.name.clone(),
                    spec: spec.clone(),
                });
            }
        }
        rows
    }

    fn row_count(&self) -> usize {
        match self.step() {
            WizardStep::ConfigureParameters => self.parameter_rows().len(),
            WizardStep::SpecifyResources => ALL_RESOURCE_FIELDS.len(),
            _ => 0,
        }
    }

    pub fn handle_action(
        &mut self,
        action: WizardAction,
        prompter: &mut dyn Prompter,
        dispatcher: &mut CatalogDispatcher,
    ) -> Result<Option<SessionExit>, String> {
        match action {
            WizardAction::Cancel => {
                let transition = self.controller.cancel();
                Ok(self.apply_effect(transition.effect))
            }
            WizardAction::PrevStep => {
                let before = self.step();
                let result = self.controller.prev();
                Ok(self.after_navigation(action, before, result))
            }
            WizardAction::NextStep => {
                let before = self.step();
                let result = self.controller.next();
                Ok(self.after_navigation(action, before, result))
            }
            WizardAction::GoToStep(index) => {
                let before = self.step();
                let result = self.controller.go_to_step(index);
                Ok(self.after_navigation(action, before, result))
            }
            WizardAction::MoveUp => {
                if self.step() == WizardStep::SelectArtifacts {
                    self.search.move_focus_up();
                } else {
                    self.focus = self.focus.saturating_sub(1);
                }
                Ok(None)
            }
            WizardAction::MoveDown => {
                if self.step() == WizardStep::SelectArtifacts {
                    self.search.move_focus_down();
                } else {
                    self.focus = clamp_focus(self.focus + 1, self.row_count());
                }
                Ok(None)
            }
            WizardAction::Toggle => {
                match self.step() {
                    WizardStep::SelectArtifacts => self.toggle_focused_artifact(),
                    WizardStep::ConfigureParameters => self.toggle_focused_bool(),
                    _ => {}
                }
                Ok(None)
            }
            WizardAction::SelectAllVisible | WizardAction::UnselectAllVisible => {
                let selected = action == WizardAction::SelectAllVisible;
                let visible = self.search.matching.clone();
                self.controller.select_many(&visible, selected);
                self.status_text = format!(
                    "{} {} artifact(s).",
                    if selected { "Selected" } else { "Unselected" },
                    visible.len()
                );
                Ok(None)
            }
            WizardAction::EditFilter => {
                let current = self.search.filter.clone();
                if let Some(value) =
                    prompter.prompt_line("Search", "Search for artifacts...", &current)?
                {
                    let query = self.search.on_filter_change(self.artifact_type, &value);
                    dispatcher.dispatch(query);
                }
                Ok(None)
            }
            WizardAction::Edit => {
                match self.step() {
                    WizardStep::ConfigureParameters => self.edit_focused_parameter(prompter)?,
                    WizardStep::SpecifyResources => self.edit_focused_resource(prompter)?,
                    _ => self.status_text = "Nothing to edit on this step.".to_string(),
                }
                Ok(None)
            }
            WizardAction::Remove => {
                if self.step() == WizardStep::ConfigureParameters {
                    if let Some(row) = self.parameter_rows().get(self.focus) {
                        let name = row.artifact().to_string();
                        self.controller.remove_artifact(&name);
                        self.focus = clamp_focus(self.focus, self.row_count());
                        self.status_text = format!("Removed {name}.");
                    }
                }
                Ok(None)
            }
        }
    }

    fn after_navigation(
        &mut self,
        action: WizardAction,
        before: WizardStep,
        result: Result<WizardTransition, NavBlocked>,
    ) -> Option<SessionExit> {
        match result {
            Ok(transition) => {
                if self.step() != before {
                    self.focus = 0;
                    self.status_text = format!("{}.", self.step().title());
                }
                if let Some(feedback) = transition.feedback {
                    self.status_text = feedback;
                }
                self.apply_effect(transition.effect)
            }
            Err(blocked) => {
                self.log.warn(
                    "navigation_blocked",
                    &format!("action={} {blocked}", action.as_str()),
                );
                self.status_text = blocked.to_string();
                None
            }
        }
    }

    fn apply_effect(&mut self, effect: WizardEffect) -> Option<SessionExit> {
        match effect {
            WizardEffect::None => None,
            WizardEffect::Launch(request) => {
                self.log.info(
                    "launch",
                    &format!("artifacts={}", request.artifacts.join(",")),
                );
                Some(SessionExit::Launched(request))
            }
            WizardEffect::Cancel => {
                self.log.info("cancel", &format!("step={}", self.step().as_str()));
                Some(SessionExit::Cancelled)
            }
        }
    }

    fn toggle_focused_artifact(&mut self) {
        let Some(item) = self.search.focused_item().cloned() else {
            return;
        };
        let selected = !selection::contains(self.controller.selection(), &item.name);
        self.controller.select(&item, selected);
        self.status_text = format!(
            "{} {}.",
            if selected { "Selected" } else { "Unselected" },
            item.name
        );
        self.search.described = Some(item);
    }

    fn focused_param(&self) -> Option<ParamSpec> {
        match self.parameter_rows().get(self.focus) {
            Some(ParameterRow::Param { spec, .. }) => Some(spec.clone()),
            _ => None,
        }
    }

    fn toggle_focused_bool(&mut self) {
        let Some(spec) = self.focused_param().filter(ParamSpec::is_bool) else {
            return;
        };
        let current = display_value(self.controller.parameters(), &spec);
        let next = if current == "Y" { "" } else { "Y" };
        self.controller.set_parameter(&spec.name, next);
        self.status_text = if next.is_empty() {
            format!("{} cleared.", spec.name)
        } else {
            format!("{} set to {next}.", spec.name)
        };
    }

    fn edit_focused_parameter(&mut self, prompter: &mut dyn Prompter) -> Result<(), String> {
        let Some(spec) = self.focused_param() else {
            self.status_text = "Choose a parameter row to edit.".to_string();
            return Ok(());
        };
        if spec.is_bool() {
            self.toggle_focused_bool();
            return Ok(());
        }
        let current = display_value(self.controller.parameters(), &spec);
        let prompt = spec
            .description
            .clone()
            .unwrap_or_else(|| format!("Enter value for {}:", spec.name));
        if let Some(value) = prompter.prompt_line(&spec.name, &prompt, &current)? {
            self.controller.set_parameter(&spec.name, &value);
            self.status_text = format!("{} updated.", spec.name);
        }
        Ok(())
    }

    fn edit_focused_resource(&mut self, prompter: &mut dyn Prompter) -> Result<(), String> {
        let Some(field) = ALL_RESOURCE_FIELDS.get(self.focus).copied() else {
            return Ok(());
        };
        let current = self.controller.resources_form().input_text(field).to_string();
        let prompt = format!("Enter {} (blank for {}):", field.label(), field.placeholder());
        if let Some(value) = prompter.prompt_line(field.label(), &prompt, &current)? {
            self.controller.set_resource_field_text(field, &value);
            self.status_text = if self.controller.resources_form().is_invalid(field) {
                format!("{} must be a whole number.", field.label())
            } else {
                format!("{} updated.", field.label())
            };
        }
        Ok(())
    }
}

/// Waits for every in-flight fetch and applies the results in arrival
/// order.
pub fn settle(session: &mut WizardSession, dispatcher: &mut CatalogDispatcher) {
    while let Some(event) = dispatcher.wait_next(SETTLE_TIMEOUT) {
        session.apply_catalog_event(event);
        session.refresh_hydration(dispatcher);
    }
}

/// Drives a session from scripted input without a terminal. Fetches are
/// settled after every key so runs are reproducible.
pub fn run_scripted(
    session: &mut WizardSession,
    dispatcher: &mut CatalogDispatcher,
    steps: Vec<ScriptStep>,
) -> Result<SessionExit, String> {
    session.open(dispatcher);
    settle(session, dispatcher);
    let mut prompter = ScriptedPrompter::default();
    for step in steps {
        let key = match step {
            ScriptStep::Text(answer) => {
                prompter.push(answer);
                continue;
            }
            ScriptStep::Key(key) => key,
        };
        let Some(action) = wizard_action_from_key(session.step(), key) else {
            continue;
        };
        if let Some(exit) = session.handle_action(action, &mut prompter, dispatcher)? {
            return Ok(exit);
        }
        settle(session, dispatcher);
    }
    Err("scripted wizard did not terminate; include a launch or cancel key".to_string())
}
