use crate::config::Settings;
use crate::model::{Reminder, ReminderId};
use crate::screen::{AlertSurface, Navigator, Route, ScreenController, ScreenKind};
use crate::sound::{SoundPlayer, SoundResource};
use crate::theme::Theme;
use anyhow::Result;
use chrono::{DateTime, Datelike, Duration as ChronoDuration, Months, NaiveDate, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub fn run(settings: &Settings, player: Arc<dyn SoundPlayer>, sound: SoundResource) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(settings.start_kind(), settings.night_mode, player, sound);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    screen: ScreenController,
    router: Router,
    player: Arc<dyn SoundPlayer>,
    sound: SoundResource,
    night_on_entry: bool,
    mode: Mode,
    form: DraftForm,
    calendar_cursor: NaiveDate,
    selected: usize,
    visible: Vec<ReminderId>,
    status: String,
    dirty: bool,
}

enum Mode {
    Browse,
    Editing,
    Alert(Alert),
    ConfirmDelete { id: ReminderId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Alert {
    title: String,
    message: String,
}

/// Collects the alert raised during one submit so the loop can show it as a
/// modal.
#[derive(Default)]
struct PendingAlert(Option<Alert>);

impl AlertSurface for PendingAlert {
    fn alert(&mut self, title: &str, message: &str) {
        self.0 = Some(Alert {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// Tracks the route on screen. Routes are pushed, never popped, so only the
/// latest one matters.
struct Router {
    current: Route,
}

impl Router {
    fn new(start: Route) -> Self {
        Router { current: start }
    }

    fn current(&self) -> Route {
        self.current
    }
}

impl Navigator for Router {
    fn push(&mut self, route: Route) {
        debug!(from = self.current.path(), to = route.path(), "push route");
        self.current = route;
    }
}

struct DraftForm {
    title: FieldValue,
    description: FieldValue,
    field: FormField,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum FormField {
    Title,
    Description,
}

#[derive(Clone)]
struct FieldValue {
    value: String,
    cursor: usize,
}

impl FieldValue {
    fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = prev_char_boundary(self.cursor, &self.value);
    }

    fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = next_char_boundary(self.cursor, &self.value);
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

impl DraftForm {
    fn new() -> Self {
        DraftForm {
            title: FieldValue::new(""),
            description: FieldValue::new(""),
            field: FormField::Title,
        }
    }

    fn next_field(&mut self) {
        self.field = match self.field {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Title,
        };
    }

    fn active_field_mut(&mut self) -> &mut FieldValue {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }
}

impl App {
    fn new(
        kind: ScreenKind,
        night_mode: bool,
        player: Arc<dyn SoundPlayer>,
        sound: SoundResource,
    ) -> Self {
        let screen = ScreenController::new(kind, night_mode, Arc::clone(&player), sound.clone());
        App {
            screen,
            router: Router::new(kind.route()),
            player,
            sound,
            night_on_entry: night_mode,
            mode: Mode::Browse,
            form: DraftForm::new(),
            calendar_cursor: Utc::now().date_naive(),
            selected: 0,
            visible: Vec::new(),
            status: "Press i to write a reminder, c to pick a due date".into(),
            dirty: true,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            if self.dirty {
                terminal.draw(|f| self.draw(f))?;
                self.dirty = false;
            }
            if event::poll(Duration::from_millis(200))? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        self.dirty = true;
                        if self.handle_key(key)? {
                            break;
                        }
                    }
                    Event::Resize(_, _) => self.dirty = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }
        if matches!(self.mode, Mode::Alert(_)) {
            return Ok(self.handle_alert_key(key));
        }
        if self.screen.flags().show_calendar {
            self.handle_calendar_key(key)?;
            return Ok(false);
        }
        match self.mode {
            Mode::Browse => Ok(self.handle_browse_key(key)),
            Mode::Editing => {
                self.handle_form_key(key);
                Ok(false)
            }
            Mode::ConfirmDelete { id } => {
                self.handle_confirm_key(key, id);
                Ok(false)
            }
            Mode::Alert(_) => Ok(false),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        let kind = self.screen.kind();
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('i') | KeyCode::Tab => {
                self.mode = Mode::Editing;
                self.status = "Editing (Tab switches field, Enter adds, Esc leaves)".into();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char('c') => self.open_calendar(),
            KeyCode::Char('*') => self.screen.toggle_important(),
            KeyCode::Char('n') if kind == ScreenKind::Home => {
                self.screen.toggle_night_mode();
                self.status = format!("Theme: {}", self.screen.theme().name);
            }
            KeyCode::Char('b') if kind == ScreenKind::Home => self.screen.toggle_sidebar(),
            KeyCode::Char('s') if kind == ScreenKind::Silly => {
                self.screen.toggle_shuffle();
                self.status = if self.screen.flags().shuffle_active {
                    "Shuffling!".into()
                } else {
                    "Shuffle off".into()
                };
            }
            KeyCode::Char('o') => self.navigate(),
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.visible.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.visible.get(self.selected).copied() {
                    self.mode = Mode::ConfirmDelete { id };
                    self.status = "Delete? (y to confirm, n/Esc to cancel)".into();
                } else {
                    self.status = "No reminder selected to delete".into();
                }
            }
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                self.status = if self.screen.draft().is_blank() {
                    "Nothing written yet".into()
                } else {
                    "Draft kept".into()
                };
            }
            KeyCode::Tab | KeyCode::BackTab => self.form.next_field(),
            KeyCode::Left => self.form.active_field_mut().move_left(),
            KeyCode::Right => self.form.active_field_mut().move_right(),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.form.active_field_mut().backspace();
                self.sync_draft();
            }
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.form.active_field_mut().insert_char(c);
                    self.sync_draft();
                }
            }
            _ => {}
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.screen.close_calendar(),
            KeyCode::Left | KeyCode::Char('h') => self.shift_calendar_days(-1),
            KeyCode::Right | KeyCode::Char('l') => self.shift_calendar_days(1),
            KeyCode::Up | KeyCode::Char('k') => self.shift_calendar_days(-7),
            KeyCode::Down | KeyCode::Char('j') => self.shift_calendar_days(7),
            KeyCode::PageUp => self.shift_calendar_months(-1),
            KeyCode::PageDown => self.shift_calendar_months(1),
            KeyCode::Enter => {
                let day = self.calendar_cursor.format("%Y-%m-%d").to_string();
                self.screen.select_date(&day)?;
                self.status = format!("Due {}", day);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_alert_key(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.mode = Mode::Browse;
        }
        false
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, id: ReminderId) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                match self.screen.delete_reminder(id) {
                    Some(removed) => self.status = format!("Deleted \"{}\"", removed.title),
                    None => self.status = "Reminder already gone".into(),
                }
                self.mode = Mode::Browse;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.status = "Delete canceled".into();
                self.mode = Mode::Browse;
            }
            _ => {}
        }
    }

    fn sync_draft(&mut self) {
        let draft = self.screen.draft_mut();
        draft.title = self.form.title.value.clone();
        draft.description = self.form.description.value.clone();
    }

    fn submit(&mut self) {
        self.sync_draft();
        let mut pending = PendingAlert::default();
        match self.screen.submit(&mut pending) {
            Some(id) => {
                self.form = DraftForm::new();
                self.mode = Mode::Browse;
                self.status = format!("Added reminder #{}", id);
            }
            None => {
                if let Some(alert) = pending.0 {
                    self.mode = Mode::Alert(alert);
                }
            }
        }
    }

    fn open_calendar(&mut self) {
        self.calendar_cursor = self
            .screen
            .draft()
            .due
            .map(|d| d.date_naive())
            .unwrap_or_else(|| Utc::now().date_naive());
        self.screen.open_calendar();
        self.status = "Pick a day (arrows move, PgUp/PgDn month, Enter select, Esc close)".into();
    }

    fn navigate(&mut self) {
        self.screen.navigate_to_other_screen(&mut self.router);
        let route = self.router.current();
        if route != self.screen.kind().route() {
            self.enter(route.screen());
        }
    }

    /// Replaces the current screen. The old controller is dropped here, which
    /// releases its sounds.
    fn enter(&mut self, kind: ScreenKind) {
        self.screen = ScreenController::new(
            kind,
            self.night_on_entry,
            Arc::clone(&self.player),
            self.sound.clone(),
        );
        self.mode = Mode::Browse;
        self.form = DraftForm::new();
        self.selected = 0;
        self.visible.clear();
        self.status = format!("Silly mode is {}", kind.badge());
    }

    fn shift_calendar_days(&mut self, days: i64) {
        if let Some(next) = self
            .calendar_cursor
            .checked_add_signed(ChronoDuration::days(days))
        {
            self.calendar_cursor = next;
        }
    }

    fn shift_calendar_months(&mut self, months: i32) {
        let shifted = if months < 0 {
            self.calendar_cursor
                .checked_sub_months(Months::new(months.unsigned_abs()))
        } else {
            self.calendar_cursor
                .checked_add_months(Months::new(months as u32))
        };
        if let Some(next) = shifted {
            self.calendar_cursor = next;
        }
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let theme = self.screen.theme();
        f.render_widget(
            Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
            f.size(),
        );
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0], &theme);
        let main = if self.screen.flags().sidebar_visible {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(30), Constraint::Min(20)])
                .split(layout[1]);
            self.draw_sidebar(f, split[0], &theme);
            split[1]
        } else {
            layout[1]
        };
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(3)])
            .split(main);
        self.draw_form(f, sections[0], &theme);
        self.draw_list(f, sections[1], &theme);
        self.draw_footer(f, layout[2], &theme);

        if self.screen.flags().show_calendar {
            self.draw_calendar(f, &theme);
        }
        match &self.mode {
            Mode::Alert(alert) => draw_alert(f, alert, &theme),
            Mode::ConfirmDelete { id } => self.draw_confirm(f, *id, &theme),
            Mode::Browse | Mode::Editing => {}
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect, theme: &Theme) {
        let kind = self.screen.kind();
        let mut spans = vec![
            Span::styled(
                kind.header(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("theme {}", theme.name),
                Style::default().fg(theme.muted),
            ),
        ];
        if kind == ScreenKind::Silly {
            spans.push(Span::raw("  •  "));
            spans.push(Span::styled(
                if self.screen.flags().shuffle_active {
                    "shuffle ON"
                } else {
                    "shuffle off"
                },
                Style::default().fg(theme.important),
            ));
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("( {} )", kind.badge()),
            Style::default()
                .fg(theme.surface)
                .bg(theme.badge)
                .add_modifier(Modifier::BOLD),
        ));
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border));
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_sidebar(&self, f: &mut ratatui::Frame<'_>, area: Rect, theme: &Theme) {
        let reminders = self.screen.store().reminders();
        let important = reminders.iter().filter(|r| r.important).count();
        let next_due = reminders.iter().min_by_key(|r| r.due);
        let mut lines = vec![
            Line::from(format!("{} reminder(s)", reminders.len())),
            Line::from(Span::styled(
                format!("{} important", important),
                Style::default().fg(theme.important),
            )),
            Line::from(""),
        ];
        match next_due {
            Some(r) => {
                lines.push(Line::from(Span::styled(
                    "Next due",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(truncate_text(&r.title, 26)));
                lines.push(Line::from(Span::styled(
                    format_due(&r.due),
                    Style::default().fg(theme.muted),
                )));
            }
            None => lines.push(Line::from("Nothing due")),
        }
        let sidebar = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title("Menu")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
        f.render_widget(sidebar, area);
    }

    fn draw_form(&self, f: &mut ratatui::Frame<'_>, area: Rect, theme: &Theme) {
        let kind = self.screen.kind();
        let editing = matches!(self.mode, Mode::Editing);
        let draft = self.screen.draft();
        let lines = vec![
            field_line(
                kind.title_placeholder(),
                &self.form.title,
                editing && self.form.field == FormField::Title,
                theme,
            ),
            field_line(
                kind.description_placeholder(),
                &self.form.description,
                editing && self.form.field == FormField::Description,
                theme,
            ),
            Line::from(vec![
                Span::styled("[c] ", Style::default().fg(theme.muted)),
                Span::styled(
                    draft
                        .due
                        .as_ref()
                        .map(format_due)
                        .unwrap_or_else(|| kind.due_placeholder().to_string()),
                    Style::default().fg(theme.accent),
                ),
            ]),
            Line::from(vec![
                Span::styled("[*] ", Style::default().fg(theme.muted)),
                Span::styled(
                    kind.importance_label(draft.important),
                    Style::default().fg(theme.important),
                ),
            ]),
            Line::from(Span::styled(
                format!("[Enter] {}", kind.submit_label()),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let form = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if editing {
                    theme.accent
                } else {
                    theme.border
                })),
        );
        f.render_widget(form, area);
    }

    fn draw_list(&mut self, f: &mut ratatui::Frame<'_>, area: Rect, theme: &Theme) {
        let (ids, items): (Vec<ReminderId>, Vec<ListItem<'static>>) = self
            .screen
            .visible_reminders()
            .into_iter()
            .map(|r| (r.id, reminder_item(r, area.width, theme)))
            .unzip();
        self.visible = ids;
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
        let block = Block::default()
            .title(format!("Reminders ({})", self.visible.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        if items.is_empty() {
            let empty = Paragraph::new("No reminders yet")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted))
                .block(block);
            f.render_widget(empty, area);
            return;
        }
        let mut state = ListState::default();
        state.select(Some(self.selected));
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);
        let help_bar = Paragraph::new(self.footer_help_line(theme))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(theme.border)),
            );
        f.render_widget(help_bar, rows[0]);
        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(theme.muted));
        f.render_widget(status, rows[1]);
    }

    fn footer_help_line(&self, theme: &Theme) -> Line<'static> {
        let key = Style::default().fg(theme.accent);
        let mut spans = vec![
            Span::styled("i", key),
            Span::raw(" write  "),
            Span::styled("c", key),
            Span::raw(" date  "),
            Span::styled("*", key),
            Span::raw(" important  "),
            Span::styled("Enter", key),
            Span::raw(" add  "),
            Span::styled("d", key),
            Span::raw(" delete  "),
        ];
        match self.screen.kind() {
            ScreenKind::Home => spans.extend([
                Span::styled("n", key),
                Span::raw(" night  "),
                Span::styled("b", key),
                Span::raw(" sidebar  "),
                Span::styled("o", key),
                Span::raw(" silly mode  "),
            ]),
            ScreenKind::Silly => spans.extend([
                Span::styled("s", key),
                Span::raw(" shuffle  "),
                Span::styled("o", key),
                Span::raw(" home  "),
            ]),
        }
        spans.extend([Span::styled("q", key), Span::raw(" quit")]);
        Line::from(spans)
    }

    fn draw_calendar(&self, f: &mut ratatui::Frame<'_>, theme: &Theme) {
        let area = centered_rect(60, 60, f.size());
        let cursor = self.calendar_cursor;
        let chosen = self.screen.draft().due.map(|d| d.date_naive());
        let month_start =
            NaiveDate::from_ymd_opt(cursor.year(), cursor.month(), 1).unwrap_or(cursor);
        let days = days_in_month(month_start.year(), month_start.month());
        let start_offset = month_start.weekday().num_days_from_sunday();
        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            format!("{} {}", month_start.format("%B"), month_start.year()),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        let headings = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
        let header_spans: Vec<Span<'static>> = headings
            .iter()
            .map(|h| Span::styled(format!("{:^4}", h), Style::default().fg(theme.muted)))
            .collect();
        lines.push(Line::from(header_spans));

        let mut day: i32 = 1 - start_offset as i32;
        while day <= days as i32 {
            let mut spans = Vec::new();
            for _ in 0..7 {
                if day < 1 || day > days as i32 {
                    spans.push(Span::raw("    "));
                } else if let Some(date) =
                    NaiveDate::from_ymd_opt(month_start.year(), month_start.month(), day as u32)
                {
                    let mut style = Style::default().fg(theme.text);
                    if Some(date) == chosen {
                        style = style.fg(theme.accent).add_modifier(Modifier::UNDERLINED);
                    }
                    if date == cursor {
                        style = style
                            .bg(theme.selection_bg)
                            .fg(theme.selection_fg)
                            .add_modifier(Modifier::BOLD);
                    }
                    spans.push(Span::styled(format!("{:^4}", day), style));
                }
                day += 1;
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter select • Esc close",
            Style::default().fg(theme.muted),
        )));

        let block = Block::default()
            .title(Span::styled(
                "Due Date",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface));
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }

    fn draw_confirm(&self, f: &mut ratatui::Frame<'_>, id: ReminderId, theme: &Theme) {
        let area = centered_rect(50, 30, f.size());
        let title = self
            .screen
            .store()
            .get(id)
            .map(|r| r.title.clone())
            .unwrap_or_else(|| format!("#{}", id));
        let body = vec![
            Line::from(Span::styled(
                format!("Delete \"{}\"?", title),
                Style::default()
                    .fg(theme.badge)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press y to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title("Confirm Delete")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.badge))
                .style(Style::default().bg(theme.surface)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn draw_alert(f: &mut ratatui::Frame<'_>, alert: &Alert, theme: &Theme) {
    let area = centered_rect(40, 25, f.size());
    let body = vec![
        Line::from(alert.message.clone()),
        Line::from(""),
        Line::from(Span::styled("[ OK ]", Style::default().add_modifier(Modifier::BOLD))),
    ];
    let dialog = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    alert.title.clone(),
                    Style::default()
                        .fg(theme.badge)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.badge))
                .style(Style::default().bg(theme.surface)),
        );
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_else(|| Utc::now().date_naive());
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap_or(first);
    next.pred_opt().map(|d| d.day()).unwrap_or(28)
}

fn format_due(dt: &DateTime<Utc>) -> String {
    dt.format("%a %b %-d, %Y").to_string()
}

fn prev_char_boundary(cursor: usize, text: &str) -> usize {
    if cursor == 0 {
        return 0;
    }
    let mut prev = 0;
    for (idx, _) in text.char_indices() {
        if idx >= cursor {
            break;
        }
        prev = idx;
    }
    prev
}

fn next_char_boundary(cursor: usize, text: &str) -> usize {
    for (idx, ch) in text.char_indices() {
        if idx > cursor {
            return idx;
        }
        if idx == cursor {
            return cursor + ch.len_utf8();
        }
    }
    text.len()
}

fn truncate_text(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn reminder_item(reminder: &Reminder, width: u16, theme: &Theme) -> ListItem<'static> {
    let inner = width.saturating_sub(6).max(10) as usize;
    let mut title = Vec::new();
    if reminder.important {
        title.push(Span::styled("★ ", Style::default().fg(theme.important)));
    }
    title.push(Span::styled(
        truncate_text(&reminder.title, inner),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let lines = vec![
        Line::from(title),
        Line::from(truncate_text(&reminder.description, inner)),
        Line::from(Span::styled(
            format_due(&reminder.due),
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
    ];
    ListItem::new(lines).style(Style::default().bg(theme.surface).fg(theme.text))
}

fn field_line(
    placeholder: &str,
    field: &FieldValue,
    active: bool,
    theme: &Theme,
) -> Line<'static> {
    let label_style = Style::default()
        .fg(theme.muted)
        .add_modifier(Modifier::BOLD | Modifier::DIM);
    let value_style = Style::default().fg(if active { theme.accent } else { theme.text });
    let text = if active {
        field.with_caret()
    } else {
        field.value.clone()
    };
    if text.is_empty() {
        return Line::from(Span::styled(placeholder.to_string(), label_style));
    }
    Line::from(vec![
        Span::styled(format!("{}: ", placeholder), label_style),
        Span::styled(text, value_style),
    ])
}
