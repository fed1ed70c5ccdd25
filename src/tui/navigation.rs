use crate::wizard::WizardStep;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV: &str = "COLLECTION_WIZARD_SCRIPT_KEYS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    PrevStep,
    NextStep,
    GoToStep(usize),
    MoveUp,
    MoveDown,
    Toggle,
    SelectAllVisible,
    UnselectAllVisible,
    EditFilter,
    Edit,
    Remove,
    Cancel,
}

impl WizardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardAction::PrevStep => "prev_step",
            WizardAction::NextStep => "next_step",
            WizardAction::GoToStep(_) => "go_to_step",
            WizardAction::MoveUp => "move_up",
            WizardAction::MoveDown => "move_down",
            WizardAction::Toggle => "toggle",
            WizardAction::SelectAllVisible => "select_all_visible",
            WizardAction::UnselectAllVisible => "unselect_all_visible",
            WizardAction::EditFilter => "edit_filter",
            WizardAction::Edit => "edit",
            WizardAction::Remove => "remove",
            WizardAction::Cancel => "cancel",
        }
    }
}

pub fn wizard_action_from_key(step: WizardStep, key: KeyEvent) -> Option<WizardAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(WizardAction::Cancel);
    }
    match key.code {
        KeyCode::Esc => return Some(WizardAction::Cancel),
        KeyCode::Left | KeyCode::BackTab => return Some(WizardAction::PrevStep),
        KeyCode::Right | KeyCode::Tab => return Some(WizardAction::NextStep),
        KeyCode::Up => return Some(WizardAction::MoveUp),
        KeyCode::Down => return Some(WizardAction::MoveDown),
        KeyCode::Char(ch @ '1'..='5') => {
            return Some(WizardAction::GoToStep(ch as usize - '1' as usize))
        }
        _ => {}
    }
    let enter = matches!(
        key.code,
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r')
    );
    match step {
        WizardStep::SelectArtifacts => match key.code {
            KeyCode::Char(' ') => Some(WizardAction::Toggle),
            _ if enter => Some(WizardAction::Toggle),
            KeyCode::Char('a') => Some(WizardAction::SelectAllVisible),
            KeyCode::Char('u') => Some(WizardAction::UnselectAllVisible),
            KeyCode::Char('/') => Some(WizardAction::EditFilter),
            _ => None,
        },
        WizardStep::ConfigureParameters => match key.code {
            KeyCode::Char(' ') => Some(WizardAction::Toggle),
            _ if enter => Some(WizardAction::Edit),
            KeyCode::Char('e') => Some(WizardAction::Edit),
            KeyCode::Char('d') => Some(WizardAction::Remove),
            _ => None,
        },
        WizardStep::SpecifyResources => match key.code {
            _ if enter => Some(WizardAction::Edit),
            KeyCode::Char('e') => Some(WizardAction::Edit),
            _ => None,
        },
        WizardStep::Review => {
            if enter {
                Some(WizardAction::NextStep)
            } else {
                None
            }
        }
        WizardStep::Launch => None,
    }
}

/// One entry of a scripted run: a key press, or an answer queued for the
/// next prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Key(KeyEvent),
    Text(String),
}

pub fn parse_scripted_wizard_keys(raw: &str) -> Result<Vec<ScriptStep>, String> {
    let mut steps = Vec::new();
    for token in raw.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(text) = trimmed.strip_prefix("text=") {
            steps.push(ScriptStep::Text(text.to_string()));
            continue;
        }
        let normalized = trimmed.to_ascii_lowercase();
        let code = match normalized.as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "ctrl-c" => {
                steps.push(ScriptStep::Key(KeyEvent::new(
                    KeyCode::Char('c'),
                    KeyModifiers::CONTROL,
                )));
                continue;
            }
            "a" | "u" | "d" | "e" | "/" | "1" | "2" | "3" | "4" | "5" => {
                KeyCode::Char(normalized.chars().next().unwrap_or(' '))
            }
            other => {
                return Err(format!(
                    "invalid {SCRIPT_KEYS_ENV} token `{other}`; valid tokens: up,down,left,right,enter,esc,space,ctrl-c,a,u,d,e,/,1-5,text=<value>"
                ));
            }
        };
        steps.push(ScriptStep::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_means_different_things_per_step() {
        assert_eq!(
            wizard_action_from_key(WizardStep::SelectArtifacts, key(KeyCode::Enter)),
            Some(WizardAction::Toggle)
        );
        assert_eq!(
            wizard_action_from_key(WizardStep::SpecifyResources, key(KeyCode::Enter)),
            Some(WizardAction::Edit)
        );
        assert_eq!(
            wizard_action_from_key(WizardStep::Review, key(KeyCode::Enter)),
            Some(WizardAction::NextStep)
        );
        assert_eq!(
            wizard_action_from_key(WizardStep::Launch, key(KeyCode::Enter)),
            None
        );
    }

    #[test]
    fn digits_jump_to_steps_and_ctrl_c_cancels() {
        assert_eq!(
            wizard_action_from_key(WizardStep::Review, key(KeyCode::Char('3'))),
            Some(WizardAction::GoToStep(2))
        );
        assert_eq!(
            wizard_action_from_key(
                WizardStep::ConfigureParameters,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(WizardAction::Cancel)
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut release = key(KeyCode::Right);
        release.kind = KeyEventKind::Release;
        assert_eq!(
            wizard_action_from_key(WizardStep::SelectArtifacts, release),
            None
        );
    }

    #[test]
    fn scripted_tokens_keep_text_answers_verbatim() {
        let steps = parse_scripted_wizard_keys("text=Generic.Client, /, space ,right").expect("parse");
        assert_eq!(
            steps,
            vec![
                ScriptStep::Text("Generic.Client".to_string()),
                ScriptStep::Key(key(KeyCode::Char('/'))),
                ScriptStep::Key(key(KeyCode::Char(' '))),
                ScriptStep::Key(key(KeyCode::Right)),
            ]
        );
        assert!(parse_scripted_wizard_keys("warp").is_err());
    }
}
