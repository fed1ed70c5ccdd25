use collection_wizard::tui::navigation::{
    parse_scripted_wizard_keys, wizard_action_from_key, ScriptStep, WizardAction,
};
use collection_wizard::wizard::WizardStep;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn tui_navigation_module_maps_enter_by_step() {
    let enter = key_event(KeyCode::Enter);
    assert_eq!(
        wizard_action_from_key(WizardStep::SelectArtifacts, enter),
        Some(WizardAction::Toggle)
    );
    assert_eq!(
        wizard_action_from_key(WizardStep::ConfigureParameters, enter),
        Some(WizardAction::Edit)
    );
    assert_eq!(
        wizard_action_from_key(WizardStep::SpecifyResources, enter),
        Some(WizardAction::Edit)
    );
    assert_eq!(
        wizard_action_from_key(WizardStep::Review, enter),
        Some(WizardAction::NextStep)
    );
    assert_eq!(wizard_action_from_key(WizardStep::Launch, enter), None);
}

#[test]
fn tui_navigation_module_maps_global_keys_on_every_step() {
    for step in [
        WizardStep::SelectArtifacts,
        WizardStep::ConfigureParameters,
        WizardStep::SpecifyResources,
        WizardStep::Review,
    ] {
        assert_eq!(
            wizard_action_from_key(step, key_event(KeyCode::Esc)),
            Some(WizardAction::Cancel)
        );
        assert_eq!(
            wizard_action_from_key(step, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(WizardAction::Cancel)
        );
        assert_eq!(
            wizard_action_from_key(step, key_event(KeyCode::Char('3'))),
            Some(WizardAction::GoToStep(2))
        );
    }
}

#[test]
fn tui_navigation_module_parses_scripted_keys_and_text() {
    let steps =
        parse_scripted_wizard_keys("down, space ,text=Generic Info,/,right").expect("parse script");
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[2], ScriptStep::Text("Generic Info".to_string()));

    let mapped = steps
        .iter()
        .filter_map(|step| match step {
            ScriptStep::Key(key) => wizard_action_from_key(WizardStep::SelectArtifacts, *key),
            ScriptStep::Text(_) => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(
        mapped,
        vec![
            WizardAction::MoveDown,
            WizardAction::Toggle,
            WizardAction::EditFilter,
            WizardAction::NextStep,
        ]
    );

    let err = parse_scripted_wizard_keys("down,launch").expect_err("unknown token");
    assert!(err.contains("launch"), "unexpected error: {err}");
}
