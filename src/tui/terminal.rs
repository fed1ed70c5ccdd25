use super::navigation::wizard_action_from_key;
use super::screens::{draw_prompt, draw_wizard, project_wizard_view_model};
use super::session::{Prompter, SessionExit, WizardSession};
use crate::catalog::CatalogDispatcher;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, IsTerminal};
use std::time::Duration;

type WizardTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

pub fn run_wizard_tui(
    session: &mut WizardSession,
    dispatcher: &mut CatalogDispatcher,
) -> Result<SessionExit, String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter wizard screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create wizard terminal: {e}"))?;
    let result = run_wizard_tui_loop(session, dispatcher, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave wizard screen: {e}"))?;
    result
}

fn run_wizard_tui_loop(
    session: &mut WizardSession,
    dispatcher: &mut CatalogDispatcher,
    terminal: &mut WizardTerminal,
) -> Result<SessionExit, String> {
    session.open(dispatcher);
    loop {
        while let Some(event) = dispatcher.try_next() {
            session.apply_catalog_event(event);
        }
        session.refresh_hydration(dispatcher);

        let view_model = project_wizard_view_model(session);
        terminal
            .draw(|frame| draw_wizard(frame, &view_model))
            .map_err(|e| format!("failed to render wizard: {e}"))?;
        if !event::poll(Duration::from_millis(250))
            .map_err(|e| format!("failed to poll wizard input: {e}"))?
        {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read wizard input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        let Some(action) = wizard_action_from_key(session.step(), key) else {
            continue;
        };
        let mut prompter = TerminalPrompter { terminal };
        if let Some(exit) = session.handle_action(action, &mut prompter, dispatcher)? {
            return Ok(exit);
        }
    }
}

struct TerminalPrompter<'a> {
    terminal: &'a mut WizardTerminal,
}

impl Prompter for TerminalPrompter<'_> {
    fn prompt_line(
        &mut self,
        title: &str,
        prompt: &str,
        initial: &str,
    ) -> Result<Option<String>, String> {
        let mut value = initial.to_string();
        loop {
            self.terminal
                .draw(|frame| draw_prompt(frame, title, prompt, &value))
                .map_err(|e| format!("failed to render prompt: {e}"))?;
            let ev = event::read().map_err(|e| format!("failed to read prompt input: {e}"))?;
            let Event::Key(key) = ev else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key.code {
                KeyCode::Esc => return Ok(None),
                KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => {
                    return Ok(Some(value))
                }
                KeyCode::Backspace => {
                    value.pop();
                }
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    value.push(ch)
                }
                _ => {}
            }
        }
    }
}
