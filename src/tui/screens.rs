use super::session::{ParameterRow, WizardSession};
use crate::wizard::parameters::display_value;
use crate::wizard::{selection, steps, WizardStep, ALL_RESOURCE_FIELDS, ALL_WIZARD_STEPS};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Padding, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub const EMPTY_PARAMETERS_TEXT: &str =
    "No artifacts configured. Please add some artifacts to collect";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectRow {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardFieldRow {
    pub field: String,
    pub value: Option<String>,
    pub invalid: bool,
}

pub fn field_row(field: &str, value: Option<String>) -> WizardFieldRow {
    WizardFieldRow {
        field: field.to_string(),
        value,
        invalid: false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepBody {
    Select {
        filter: String,
        loading: bool,
        rows: Vec<SelectRow>,
        focused: usize,
        description: Vec<String>,
    },
    Parameters {
        rows: Vec<WizardFieldRow>,
        focused: usize,
    },
    Resources {
        rows: Vec<WizardFieldRow>,
        focused: usize,
    },
    Review {
        json: String,
    },
    Launch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub title: String,
    pub pages: Vec<PageItem>,
    pub body: StepBody,
    pub status_text: String,
    pub hint_text: String,
}

pub fn hint_for_step(step: WizardStep) -> &'static str {
    match step {
        WizardStep::SelectArtifacts => {
            "Up/Down move | Space select | a/u all | / search | Right next | Esc cancel"
        }
        WizardStep::ConfigureParameters => {
            "Up/Down move | Enter edit | Space toggle | d remove | Left/Right step | Esc cancel"
        }
        WizardStep::SpecifyResources => "Up/Down move | Enter edit | Left/Right step | Esc cancel",
        WizardStep::Review => "Enter launch | Left back | 1-5 jump | Esc cancel",
        WizardStep::Launch => "Launching...",
    }
}

pub fn project_pagination(session: &WizardSession) -> Vec<PageItem> {
    let step = session.step();
    let locked = steps::is_locked(step, session.controller().guard_context());
    ALL_WIZARD_STEPS
        .iter()
        .map(|page| PageItem {
            label: page.label().to_string(),
            active: *page == step,
            disabled: *page != step && locked,
        })
        .collect()
}

pub fn project_wizard_view_model(session: &WizardSession) -> WizardViewModel {
    let step = session.step();
    let controller = session.controller();
    let body = match step {
        WizardStep::SelectArtifacts => {
            let search = session.search();
            let rows = search
                .matching
                .iter()
                .map(|item| SelectRow {
                    name: item.name.clone(),
                    selected: selection::contains(controller.selection(), &item.name),
                })
                .collect();
            let described = search.described.as_ref().or(search.focused_item());
            let description = described
                .map(|item| {
                    let mut lines = vec![item.name.clone()];
                    if let Some(text) = &item.description {
                        lines.push(String::new());
                        lines.extend(text.lines().map(str::to_string));
                    }
                    if !item.parameters.is_empty() {
                        lines.push(String::new());
                        lines.push("Parameters:".to_string());
                        lines.extend(item.parameters.iter().map(|param| {
                            match &param.default {
                                Some(default) => format!("  {} (default: {default})", param.name),
                                None => format!("  {}", param.name),
                            }
                        }));
                    }
                    lines
                })
                .unwrap_or_default();
            StepBody::Select {
                filter: search.filter.clone(),
                loading: search.loading,
                rows,
                focused: search.focused,
                description,
            }
        }
        WizardStep::ConfigureParameters => {
            let rows = session
                .parameter_rows()
                .iter()
                .map(|row| match row {
                    ParameterRow::Artifact { name } => field_row(name, None),
                    ParameterRow::Param { spec, .. } => field_row(
                        &format!("  {}", spec.name),
                        Some(display_value(controller.parameters(), spec)),
                    ),
                })
                .collect();
            StepBody::Parameters {
                rows,
                focused: session.focus(),
            }
        }
        WizardStep::SpecifyResources => {
            let form = controller.resources_form();
            let rows = ALL_RESOURCE_FIELDS
                .iter()
                .map(|field| {
                    let text = form.input_text(*field);
                    WizardFieldRow {
                        field: field.label().to_string(),
                        value: Some(if text.is_empty() {
                            format!("({})", field.placeholder())
                        } else {
                            text.to_string()
                        }),
                        invalid: form.is_invalid(*field),
                    }
                })
                .collect();
            StepBody::Resources {
                rows,
                focused: session.focus(),
            }
        }
        WizardStep::Review => StepBody::Review {
            json: controller
                .assembled_request()
                .to_pretty_json()
                .unwrap_or_else(|err| format!("failed to render request: {err}")),
        },
        WizardStep::Launch => StepBody::Launch,
    };
    WizardViewModel {
        title: step.title().to_string(),
        pages: project_pagination(session),
        body,
        status_text: session.status_text().to_string(),
        hint_text: hint_for_step(step).to_string(),
    }
}

pub fn tail_for_display(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_chars {
        return value.to_string();
    }
    chars[chars.len() - max_chars..].iter().collect()
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 1))
}

fn pagination_line(pages: &[PageItem]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pages.len() * 2);
    for (idx, page) in pages.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        let label = format!("{} {}", idx + 1, page.label);
        let style = if page.active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if page.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        spans.push(Span::styled(label, style));
    }
    Line::from(spans)
}

fn field_table(rows: &[WizardFieldRow], focused: usize) -> Table<'static> {
    let table_rows = rows.iter().enumerate().map(|(idx, row)| {
        let style = if idx == focused {
            highlight()
        } else if row.invalid {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let mut value = row.value.clone().unwrap_or_default();
        if row.invalid {
            value.push_str("  (invalid)");
        }
        Row::new(vec![Cell::from(row.field.clone()), Cell::from(value)]).style(style)
    });
    Table::new(
        table_rows,
        [Constraint::Percentage(45), Constraint::Percentage(55)],
    )
    .column_spacing(2)
    .block(main_panel_block())
}

pub fn draw_wizard(frame: &mut Frame<'_>, view_model: &WizardViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            view_model.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        pagination_line(&view_model.pages),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    match &view_model.body {
        StepBody::Select {
            filter,
            loading,
            rows,
            focused,
            description,
        } => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(chunks[1]);
            let title = if filter.is_empty() {
                "Search for artifacts...".to_string()
            } else {
                format!("Search: {filter}")
            };
            let items = rows
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    let marker = if row.selected { "[x]" } else { "[ ]" };
                    let item = ListItem::new(Line::from(format!("{marker} {}", row.name)));
                    if idx == *focused {
                        item.style(highlight())
                    } else {
                        item
                    }
                })
                .collect::<Vec<_>>();
            frame.render_widget(
                List::new(items).block(Block::default().borders(Borders::ALL).title(title)),
                columns[0],
            );
            let info = if *loading {
                vec![Line::from("Loading...")]
            } else {
                description.iter().map(|line| Line::from(line.clone())).collect()
            };
            frame.render_widget(
                Paragraph::new(info)
                    .wrap(Wrap { trim: false })
                    .block(main_panel_block()),
                columns[1],
            );
        }
        StepBody::Parameters { rows, focused } => {
            if rows.is_empty() {
                frame.render_widget(
                    Paragraph::new(EMPTY_PARAMETERS_TEXT).block(main_panel_block()),
                    chunks[1],
                );
            } else {
                frame.render_widget(field_table(rows, *focused), chunks[1]);
            }
        }
        StepBody::Resources { rows, focused } => {
            frame.render_widget(field_table(rows, *focused), chunks[1]);
        }
        StepBody::Review { json } => {
            let lines = json.lines().map(|line| Line::from(line.to_string())).collect::<Vec<_>>();
            frame.render_widget(Paragraph::new(lines).block(main_panel_block()), chunks[1]);
        }
        StepBody::Launch => {
            frame.render_widget(Paragraph::new("").block(main_panel_block()), chunks[1]);
        }
    }

    let footer = Paragraph::new(vec![
        Line::from(view_model.hint_text.clone()),
        Line::from(format!("Status: {}", view_model.status_text)),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

pub fn draw_prompt(frame: &mut Frame<'_>, title: &str, prompt: &str, value: &str) {
    let area = centered_rect(70, 30, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 1));
    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);
    let max_input_width = rows[3].width.saturating_sub(2) as usize;
    let display_value = tail_for_display(value, max_input_width);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );
    frame.render_widget(Paragraph::new(prompt.to_string()), rows[2]);
    frame.render_widget(
        Paragraph::new(Line::from(format!("> {display_value}"))),
        rows[3],
    );
    frame.render_widget(Paragraph::new("Enter apply, Esc cancel"), rows[4]);
    frame.set_cursor_position((
        rows[3].x + 2 + display_value.chars().count() as u16,
        rows[3].y,
    ));
}
