use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
};
use ratatui::Frame;

use crate::paging::Pager;
use crate::store::OpStatus;
use crate::ui::app::{App, Focus, PopupKind, View};
use crate::ui::form_draft::{FormDraftData, PERIOD_TYPES};
use crate::ui::notice::NoticeLevel;
use crate::ui::theme;
use crate::ui::user_form::{FormFocus, UserField, UserFormData};

pub fn draw(frame: &mut Frame, app: &App) {
    let outer = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_header(frame, app, outer[0]);
    match app.view() {
        View::Users => draw_users(frame, app, outer[1]),
        View::Forms => draw_forms(frame, app, outer[1]),
        View::OrgUnits => draw_org_units(frame, app, outer[1]),
    }
    draw_footer(frame, app, outer[2]);

    match app.popup_kind() {
        Some(PopupKind::UserForm) => draw_user_form(frame, app),
        Some(PopupKind::FormDraft) => draw_form_draft(frame, app),
        Some(PopupKind::OrgUnitPicker) => draw_org_unit_picker(frame, app),
        Some(PopupKind::PeriodPicker) => draw_period_picker(frame, app),
        Some(PopupKind::ActionLog) => draw_action_log(frame, app),
        None => {}
    }
}

// ----------------------------------------------------------------------
// Chrome
// ----------------------------------------------------------------------

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " fieldbook ",
        Style::default()
            .fg(theme::HEADER_TEXT)
            .add_modifier(Modifier::BOLD),
    )];
    for view in View::ALL {
        let style = if view == app.view() {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::DIM_TEXT)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(view.title(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if let Some(notice) = app.notice() {
        let style = match notice.level {
            NoticeLevel::Info => Style::default().fg(theme::STATUS_OK),
            NoticeLevel::Error => Style::default().fg(theme::STATUS_ERROR),
        };
        let text = format!("{} ", notice.text);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(text, style))).alignment(Alignment::Right),
            area,
        );
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = footer_hints(app);
    let mut line = Line::from(Span::styled(hints, Style::default().fg(theme::DIM_TEXT)));
    if let Some(err) = app.last_effect_error() {
        line.push_span(Span::raw("  "));
        line.push_span(Span::styled(
            err.to_string(),
            Style::default().fg(theme::STATUS_ERROR),
        ));
    }
    frame.render_widget(Paragraph::new(line), area);
}

fn footer_hints(app: &App) -> String {
    match app.focus() {
        Focus::Filter => " esc clear  enter keep  type to narrow".to_string(),
        Focus::Popup(PopupKind::UserForm) => {
            " esc close  tab/↓ next  shift-tab/↑ prev  space toggle role  enter submit".to_string()
        }
        Focus::Popup(PopupKind::FormDraft) => {
            " esc close  tab period type  enter submit".to_string()
        }
        Focus::Popup(PopupKind::OrgUnitPicker) | Focus::Popup(PopupKind::PeriodPicker) => {
            " esc close  ↑↓ move  enter pick".to_string()
        }
        Focus::Popup(PopupKind::ActionLog) => " esc close".to_string(),
        Focus::Table => {
            let armed = match app.view() {
                View::Users => app.users().pending_delete.is_some(),
                View::Forms => app.forms().pending_delete.is_some(),
                View::OrgUnits => false,
            };
            if armed {
                return " enter confirm delete  esc cancel".to_string();
            }
            match app.view() {
                View::Users => {
                    " q quit  tab view  ↑↓ row  ←→ page  / filter  a add  d delete  enter mark  r refresh  l log"
                        .to_string()
                }
                View::Forms => {
                    " q quit  tab view  ↑↓ row  ←→ page  a add  d delete  o org unit  p period  enter pick  r refresh  l log"
                        .to_string()
                }
                View::OrgUnits => {
                    " q quit  tab view  ↑↓ row  r refresh  l log".to_string()
                }
            }
        }
    }
}

// ----------------------------------------------------------------------
// Tables
// ----------------------------------------------------------------------

fn draw_users(frame: &mut Frame, app: &App, area: Rect) {
    let rows_area = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    draw_filter_line(frame, app, rows_area[0]);

    let state = app.users();
    let items = state.page_items();
    let rows: Vec<Row> = items
        .iter()
        .map(|user| {
            let marked = state.active.as_deref() == Some(user.uuid.as_str());
            let armed = state.pending_delete.as_deref() == Some(user.uuid.as_str());
            let marker = if marked { "●" } else { " " };
            let roles = user
                .roles
                .iter()
                .map(|role| role.display.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let row = Row::new(vec![
                Cell::from(marker),
                Cell::from(user.person.display.clone()),
                Cell::from(user.username.clone()),
                Cell::from(roles),
                Cell::from(user.system_id.clone().unwrap_or_default()),
            ]);
            if armed {
                row.style(Style::default().fg(theme::ARMED_DELETE))
            } else {
                row
            }
        })
        .collect();

    let title = table_title("Users", state.filtered_len(), state.items.len(), &state.load);
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(32),
            Constraint::Percentage(18),
        ],
    )
    .header(header_row(&["", "Name", "Username", "Roles", "System id"]))
    .block(bordered(title))
    .row_highlight_style(Style::default().bg(theme::ROW_HIGHLIGHT));

    let mut table_state = TableState::default();
    table_state.select((!items.is_empty()).then_some(app.table_row()));
    frame.render_stateful_widget(table, rows_area[1], &mut table_state);

    draw_pager_line(frame, &state.pager, rows_area[2]);
}

fn draw_filter_line(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.users();
    let line = if app.focus() == Focus::Filter {
        Line::from(vec![
            Span::styled("/", Style::default().fg(theme::ACCENT)),
            Span::raw(state.filter.clone()),
            Span::styled("█", Style::default().fg(theme::ACCENT)),
        ])
    } else if state.filter.is_empty() {
        Line::from(Span::styled(
            " / to filter",
            Style::default().fg(theme::DIM_TEXT),
        ))
    } else {
        Line::from(Span::styled(
            format!(
                "filter: {} ({} of {})",
                state.filter,
                state.filtered_len(),
                state.items.len()
            ),
            Style::default().fg(theme::DIM_TEXT),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_forms(frame: &mut Frame, app: &App, area: Rect) {
    let rows_area = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    draw_report_context(frame, app, rows_area[0]);

    let state = app.forms();
    let items = state.page_items();
    let rows: Vec<Row> = items
        .iter()
        .map(|form| {
            let marked = state.active.as_deref() == Some(form.uuid.as_str());
            let armed = state.pending_delete.as_deref() == Some(form.uuid.as_str());
            let marker = if marked { "●" } else { " " };
            let period = form.period_type.clone().unwrap_or_default();
            let row = Row::new(vec![
                Cell::from(marker),
                Cell::from(form.name.clone()),
                Cell::from(period),
            ]);
            if armed {
                row.style(Style::default().fg(theme::ARMED_DELETE))
            } else {
                row
            }
        })
        .collect();

    let title = table_title("Forms", state.items.len(), state.items.len(), &state.load);
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ],
    )
    .header(header_row(&["", "Name", "Period type"]))
    .block(bordered(title))
    .row_highlight_style(Style::default().bg(theme::ROW_HIGHLIGHT));

    let mut table_state = TableState::default();
    table_state.select((!items.is_empty()).then_some(app.table_row()));
    frame.render_stateful_widget(table, rows_area[1], &mut table_state);

    draw_pager_line(frame, &state.pager, rows_area[2]);
}

/// The picked reporting context: org unit, period, form and the ready flag.
fn draw_report_context(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.forms();
    let dim = Style::default().fg(theme::DIM_TEXT);
    let set = Style::default().fg(theme::HEADER_TEXT);

    let mut spans = vec![Span::styled(" org unit: ", dim)];
    spans.push(match &state.org_unit {
        Some(unit) => Span::styled(unit.name.clone(), set),
        None => Span::styled("—", dim),
    });
    spans.push(Span::styled("  period: ", dim));
    spans.push(match &state.period {
        Some(period) => Span::styled(period.name.clone(), set),
        None => Span::styled("—", dim),
    });
    spans.push(Span::styled("  form: ", dim));
    spans.push(match state.active_form() {
        Some(form) => Span::styled(form.name.clone(), set),
        None => Span::styled("—", dim),
    });
    if state.ready {
        spans.push(Span::styled(
            "  READY",
            Style::default()
                .fg(theme::STATUS_OK)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_org_units(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.org_units();
    let rows: Vec<Row> = state
        .items
        .iter()
        .map(|unit| {
            let level = unit.level.map(|l| l.to_string()).unwrap_or_default();
            Row::new(vec![Cell::from(unit.name.clone()), Cell::from(level)])
        })
        .collect();

    let title = table_title(
        "Org units",
        state.items.len(),
        state.items.len(),
        &state.load,
    );
    let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(6)])
        .header(header_row(&["Name", "Level"]))
        .block(bordered(title))
        .row_highlight_style(Style::default().bg(theme::ROW_HIGHLIGHT));

    let mut table_state = TableState::default();
    table_state.select((!state.items.is_empty()).then_some(app.table_row()));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn table_title(name: &str, shown: usize, total: usize, load: &OpStatus) -> String {
    if load.is_pending() {
        return format!(" {name} (loading…) ");
    }
    if shown == total {
        format!(" {name} ({total}) ")
    } else {
        format!(" {name} ({shown} of {total}) ")
    }
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.iter().map(|t| Cell::from(*t)).collect::<Vec<_>>()).style(
        Style::default()
            .fg(theme::HEADER_TEXT)
            .add_modifier(Modifier::BOLD),
    )
}

fn bordered(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::GLOBAL_BORDER))
        .title(title)
}

/// One line of page numbers around the current page, ten at a time.
fn draw_pager_line(frame: &mut Frame, pager: &Pager, area: Rect) {
    if pager.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " no entries",
                Style::default().fg(theme::DIM_TEXT),
            )),
            area,
        );
        return;
    }

    let mut spans = vec![Span::styled(
        format!(
            " page {}/{} ({} items) ",
            pager.current_page, pager.total_pages, pager.total_items
        ),
        Style::default().fg(theme::DIM_TEXT),
    )];
    if pager.pages.first().copied().unwrap_or(1) > 1 {
        spans.push(Span::styled("« ", Style::default().fg(theme::DIM_TEXT)));
    }
    for page in &pager.pages {
        let style = if *page == pager.current_page {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::DIM_TEXT)
        };
        spans.push(Span::styled(format!("{page} "), style));
    }
    if pager.pages.last().copied().unwrap_or(0) < pager.total_pages {
        spans.push(Span::styled("»", Style::default().fg(theme::DIM_TEXT)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ----------------------------------------------------------------------
// Popups
// ----------------------------------------------------------------------

fn draw_user_form(frame: &mut Frame, app: &App) {
    let Some(data) = app.user_form().data() else {
        return;
    };

    let role_lines = data.role_rows.len() as u16;
    let height = (UserField::ALL.len() as u16 + role_lines + 7).min(frame.area().height);
    let area = centered(frame.area(), 64, height);
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    for field in UserField::ALL {
        lines.push(field_line(data, field));
    }
    lines.push(Line::from(Span::styled(
        " roles (first two stay on the last row)",
        Style::default().fg(theme::DIM_TEXT),
    )));
    for (row, cells) in data.role_rows.iter().enumerate() {
        lines.push(role_line(data, row, cells));
    }
    lines.push(Line::default());
    lines.push(dialog_status_line(
        data.error.as_deref(),
        data.confirm_discard,
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::POPUP_BORDER))
        .title(" New user ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line(data: &UserFormData, field: UserField) -> Line<'static> {
    let focused = data.focus == FormFocus::Field(field);
    let marker = if focused { "▸" } else { " " };
    let value = if field.is_secret() {
        "*".repeat(data.field(field).chars().count())
    } else {
        data.field(field).to_string()
    };
    let value_style = if focused {
        Style::default().fg(theme::ACCENT)
    } else {
        Style::default().fg(theme::HEADER_TEXT)
    };
    Line::from(vec![
        Span::styled(
            format!("{marker} {:<16}", field.label()),
            Style::default().fg(theme::DIM_TEXT),
        ),
        Span::styled(value, value_style),
        Span::styled(if focused { "█" } else { "" }, value_style),
    ])
}

fn role_line(data: &UserFormData, row: usize, cells: &[crate::ui::user_form::RoleItem]) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (col, cell) in cells.iter().enumerate() {
        let focused = data.focus == FormFocus::Role { row, col };
        let check = if cell.selected { "[x]" } else { "[ ]" };
        let style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else if cell.selected {
            Style::default().fg(theme::HEADER_TEXT)
        } else {
            Style::default().fg(theme::DIM_TEXT)
        };
        spans.push(Span::styled(format!("{check} {:<12}", cell.name), style));
    }
    Line::from(spans)
}

fn draw_form_draft(frame: &mut Frame, app: &App) {
    let Some(data) = app.form_draft().data() else {
        return;
    };
    let area = centered(frame.area(), 52, 8);
    frame.render_widget(Clear, area);

    let lines = vec![
        form_draft_name_line(data),
        Line::from(vec![
            Span::styled("  period type    ", Style::default().fg(theme::DIM_TEXT)),
            Span::styled(
                format!("‹ {} ›", data.period_type_label()),
                Style::default().fg(theme::HEADER_TEXT),
            ),
            Span::styled(
                format!("  (tab cycles {} kinds)", PERIOD_TYPES.len()),
                Style::default().fg(theme::DIM_TEXT),
            ),
        ]),
        Line::default(),
        dialog_status_line(data.error.as_deref(), data.confirm_discard),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::POPUP_BORDER))
        .title(" New form ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn form_draft_name_line(data: &FormDraftData) -> Line<'static> {
    Line::from(vec![
        Span::styled("▸ name           ", Style::default().fg(theme::DIM_TEXT)),
        Span::styled(data.name.clone(), Style::default().fg(theme::ACCENT)),
        Span::styled("█", Style::default().fg(theme::ACCENT)),
    ])
}

fn dialog_status_line(error: Option<&str>, confirm_discard: bool) -> Line<'static> {
    if confirm_discard {
        Line::from(Span::styled(
            " unsaved input, esc again to discard".to_string(),
            Style::default().fg(theme::STATUS_PENDING),
        ))
    } else if let Some(message) = error {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(theme::STATUS_ERROR),
        ))
    } else {
        Line::default()
    }
}

fn draw_org_unit_picker(frame: &mut Frame, app: &App) {
    let state = app.org_units();
    let items: Vec<ListItem> = state
        .items
        .iter()
        .map(|unit| ListItem::new(unit.name.clone()))
        .collect();
    let title = if state.load.is_pending() {
        " Pick org unit (loading…) "
    } else {
        " Pick org unit "
    };
    draw_picker_list(frame, app, items, title);
}

fn draw_period_picker(frame: &mut Frame, app: &App) {
    let items: Vec<ListItem> = app
        .periods()
        .iter()
        .map(|period| ListItem::new(period.name.clone()))
        .collect();
    draw_picker_list(frame, app, items, " Pick period ");
}

fn draw_picker_list(frame: &mut Frame, app: &App, items: Vec<ListItem>, title: &str) {
    let height = (items.len() as u16 + 2).clamp(4, frame.area().height.saturating_sub(4));
    let area = centered(frame.area(), 44, height);
    frame.render_widget(Clear, area);

    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::POPUP_BORDER))
                .title(title.to_string()),
        )
        .highlight_style(
            Style::default()
                .bg(theme::ROW_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select((!empty).then_some(app.picker_row()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_action_log(frame: &mut Frame, app: &App) {
    let now = Instant::now();
    let records = app.action_log().snapshot();
    let items: Vec<ListItem> = records
        .iter()
        .map(|record| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<28}", record.name),
                    Style::default().fg(theme::HEADER_TEXT),
                ),
                Span::styled(seconds_ago(now, record.at), Style::default().fg(theme::DIM_TEXT)),
            ]))
        })
        .collect();

    let area = centered(frame.area(), 48, frame.area().height.saturating_sub(6).clamp(4, 24));
    frame.render_widget(Clear, area);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::POPUP_BORDER))
            .title(format!(" Actions ({}) ", records.len())),
    );
    frame.render_widget(list, area);
}

// ----------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

fn seconds_ago(now: Instant, at: Instant) -> String {
    format!("{}s ago", now.duration_since(at).as_secs())
}
