use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ledger_quest::{store, Session, SessionError, Side, Verdict};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use rusqlite::Connection;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Exercises,
    Workbench,
    Ledger,
    TrialBalance,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Exercises => Page::Workbench,
            Page::Workbench => Page::Ledger,
            Page::Ledger => Page::TrialBalance,
            Page::TrialBalance => Page::Exercises,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Exercises => Page::TrialBalance,
            Page::Workbench => Page::Exercises,
            Page::Ledger => Page::Workbench,
            Page::TrialBalance => Page::Ledger,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Exercises => "Exercises",
            Page::Workbench => "Workbench",
            Page::Ledger => "Ledger",
            Page::TrialBalance => "Trial Balance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Good,
    Warn,
    Bad,
}

impl Tone {
    fn color(&self) -> Color {
        match self {
            Tone::Info => Color::White,
            Tone::Good => Color::Green,
            Tone::Warn => Color::Yellow,
            Tone::Bad => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Feedback {
    pub tone: Tone,
    pub lines: Vec<String>,
}

impl Feedback {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Feedback {
            tone,
            lines: vec![text.into()],
        }
    }
}

pub struct App {
    pub session: Session,
    pub current_page: Page,
    pub exercise_state: TableState,
    pub lines_state: TableState,
    pub account_index: usize,
    pub side: Side,
    pub amount_input: String,
    pub feedback: Feedback,
    /// Set by every mutation; the run loop saves and clears it.
    pub dirty: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut exercise_state = TableState::default();
        if !session.exercises().is_empty() {
            exercise_state.select(Some(0));
        }

        let current_page = if session.current_exercise().is_some() {
            Page::Workbench
        } else {
            Page::Exercises
        };

        Self {
            session,
            current_page,
            exercise_state,
            lines_state: TableState::default(),
            account_index: 0,
            side: Side::Debit,
            amount_input: String::new(),
            feedback: Feedback::new(Tone::Info, "Pick an exercise and press Enter to start."),
            dirty: false,
        }
    }

    fn say(&mut self, tone: Tone, text: impl Into<String>) {
        self.feedback = Feedback::new(tone, text);
    }

    fn report(&mut self, err: SessionError) {
        let text = match &err {
            SessionError::NoExerciseSelected => "Pick an exercise first (Exercises page).".to_string(),
            SessionError::UnknownAccount(_) => "Choose an account from the chart.".to_string(),
            SessionError::InvalidAmount(_) => "Amount must be a number greater than 0.".to_string(),
            SessionError::NotYetPassed => "Pass the check (v) before posting.".to_string(),
            other => other.to_string(),
        };
        self.say(Tone::Warn, text);
    }

    pub fn selected_account(&self) -> Option<&str> {
        self.session
            .list_accounts()
            .get(self.account_index)
            .map(|a| a.name.as_str())
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    // ------------------------------------------------------------------------
    // Exercises page
    // ------------------------------------------------------------------------

    pub fn highlighted_exercise(&self) -> Option<String> {
        self.exercise_state
            .selected()
            .and_then(|i| self.session.exercises().get(i))
            .map(|ex| ex.id.clone())
    }

    fn move_exercise(&mut self, forward: bool) {
        let len = self.session.exercises().len();
        if len == 0 {
            return;
        }
        let i = match self.exercise_state.selected() {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.exercise_state.select(Some(i));
    }

    pub fn pick_highlighted(&mut self) {
        let Some(id) = self.highlighted_exercise() else {
            return;
        };
        match self.session.select_exercise(&id) {
            Ok(()) => {
                self.reset_input();
                self.current_page = Page::Workbench;
                self.say(Tone::Info, "Exercise accepted: write the entry, then press v to check.");
                self.dirty = true;
            }
            Err(e) => self.report(e),
        }
    }

    pub fn show_hints(&mut self, id: &str) {
        match self.session.hints(id) {
            Ok(hints) if hints.is_empty() => self.say(Tone::Warn, "No hints for this one."),
            Ok(hints) => {
                let mut lines = vec!["Hint cards".to_string()];
                lines.extend(hints.iter().enumerate().map(|(i, h)| format!("Hint {}: {}", i + 1, h)));
                self.feedback = Feedback {
                    tone: Tone::Warn,
                    lines,
                };
            }
            Err(e) => self.report(e),
        }
    }

    fn seed_more(&mut self) {
        let added = self.session.seed_more_exercises();
        if added > 0 {
            self.say(Tone::Good, format!("Loaded {} more exercises.", added));
            self.dirty = true;
        } else {
            self.say(Tone::Info, "All extra exercises are already loaded.");
        }
    }

    fn daily(&mut self) {
        let id = self.session.start_daily_exercise(&mut rand::thread_rng());
        self.exercise_state.select(Some(0));
        self.reset_input();
        self.current_page = Page::Workbench;
        self.say(Tone::Good, format!("Daily exercise {} accepted.", id));
        self.dirty = true;
    }

    // ------------------------------------------------------------------------
    // Workbench page
    // ------------------------------------------------------------------------

    fn reset_input(&mut self) {
        self.amount_input.clear();
        self.lines_state.select(None);
    }

    fn cycle_account(&mut self, forward: bool) {
        let len = self.session.list_accounts().len();
        if len == 0 {
            return;
        }
        self.account_index = if forward {
            (self.account_index + 1) % len
        } else {
            (self.account_index + len - 1) % len
        };
    }

    fn move_line(&mut self, forward: bool) {
        let len = self.session.working_entry().len();
        if len == 0 {
            self.lines_state.select(None);
            return;
        }
        let i = match self.lines_state.selected() {
            Some(i) if forward => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.lines_state.select(Some(i));
    }

    pub fn add_line(&mut self) {
        let account = self.selected_account().unwrap_or_default().to_string();
        let result = Session::parse_amount(&self.amount_input)
            .and_then(|amount| self.session.append_line(&account, self.side, amount));

        match result {
            Ok(()) => {
                self.amount_input.clear();
                self.dirty = true;
                self.say(Tone::Info, format!("Added {} {}.", self.side, account));
            }
            Err(e) => self.report(e),
        }
    }

    fn remove_selected_line(&mut self) {
        if let Some(i) = self.lines_state.selected() {
            self.session.remove_line(i);
            self.dirty = true;
            self.move_line(false);
        }
    }

    fn clear_lines(&mut self) {
        self.session.clear_lines();
        self.lines_state.select(None);
        self.dirty = true;
        self.say(Tone::Warn, "Entry cleared.");
    }

    pub fn check(&mut self) {
        let eval = match self.session.evaluate() {
            Ok(eval) => eval,
            Err(e) => return self.report(e),
        };
        self.dirty = true;

        self.feedback = match &eval.verdict {
            Verdict::Pass => {
                let mut lines = vec![
                    "Correct! Press p to post it to the ledger.".to_string(),
                    "Posted entries show up on the Ledger and Trial Balance pages.".to_string(),
                ];
                lines.extend(
                    eval.level_ups
                        .iter()
                        .map(|up| format!("Level up! You are now Lv {}", up.level)),
                );
                Feedback {
                    tone: Tone::Good,
                    lines,
                }
            }
            Verdict::Unbalanced { .. } => Feedback::new(Tone::Bad, eval.verdict.summary()),
            Verdict::Fail { missing, extra } => {
                let mut lines = vec!["Close, but not quite right.".to_string()];
                if !missing.is_empty() {
                    lines.push("Possibly missing:".to_string());
                    lines.extend(missing.iter().map(|k| format!("  {}", k)));
                }
                if !extra.is_empty() {
                    lines.push("Extra, or wrong side/amount:".to_string());
                    lines.extend(extra.iter().map(|k| format!("  {}", k)));
                }
                lines.push("Press h for hints. The answer itself stays hidden.".to_string());
                Feedback {
                    tone: Tone::Warn,
                    lines,
                }
            }
        };
    }

    pub fn post(&mut self) {
        match self.session.post() {
            Ok(outcome) => {
                self.dirty = true;
                self.reset_input();
                let next = match &outcome.next_exercise {
                    Some(id) => format!(" Next up: {}.", id),
                    None => " No exercises left; pick one or press d for a daily one.".to_string(),
                };
                self.say(Tone::Good, format!("Posted {} lines to the ledger.{}", outcome.posted_lines, next));
            }
            Err(e) => self.report(e),
        }
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.next_page(),
            KeyCode::BackTab => self.previous_page(),
            _ => match self.current_page {
                Page::Exercises => self.handle_exercises_key(code),
                Page::Workbench => self.handle_workbench_key(code, modifiers),
                Page::Ledger | Page::TrialBalance => {}
            },
        }
        false
    }

    fn handle_exercises_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.move_exercise(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_exercise(false),
            KeyCode::Enter => self.pick_highlighted(),
            KeyCode::Char('h') => {
                if let Some(id) = self.highlighted_exercise() {
                    self.show_hints(&id);
                }
            }
            KeyCode::Char('s') => self.seed_more(),
            KeyCode::Char('d') => self.daily(),
            _ => {}
        }
    }

    fn handle_workbench_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Left => self.cycle_account(false),
            KeyCode::Right => self.cycle_account(true),
            KeyCode::Char(' ') => self.side = self.side.opposite(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == ',' || c == '.' => {
                self.amount_input.push(c)
            }
            KeyCode::Backspace => {
                self.amount_input.pop();
            }
            KeyCode::Enter => self.add_line(),
            KeyCode::Down => self.move_line(true),
            KeyCode::Up => self.move_line(false),
            KeyCode::Delete | KeyCode::Char('x') => self.remove_selected_line(),
            KeyCode::Char('C') => self.clear_lines(),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::SHIFT) => self.clear_lines(),
            KeyCode::Char('v') => self.check(),
            KeyCode::Char('p') => self.post(),
            KeyCode::Char('h') => {
                if let Some(id) = self.session.current_exercise().map(|ex| ex.id.clone()) {
                    self.show_hints(&id);
                }
            }
            _ => {}
        }
    }
}

pub fn run_ui(app: &mut App, conn: &Connection, slot: &str) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, conn, slot);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    conn: &Connection,
    slot: &str,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let quit = app.handle_key(key.code, key.modifiers);

            if app.dirty {
                if let Err(e) = store::save_snapshot(conn, slot, &app.session.snapshot()) {
                    tracing::warn!(error = %e, "failed to save session");
                }
                app.dirty = false;
            }

            if quit {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let feedback_height = (app.feedback.lines.len() as u16 + 2).clamp(3, 12);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Header with navigation
            Constraint::Min(0),                  // Content area
            Constraint::Length(feedback_height), // Feedback
            Constraint::Length(3),               // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Exercises => render_exercises(f, chunks[1], app),
        Page::Workbench => render_workbench(f, chunks[1], app),
        Page::Ledger => render_ledger(f, chunks[1], app),
        Page::TrialBalance => render_trial_balance(f, chunks[1], app),
    }

    render_feedback(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
}

fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let progress = app.session.progress();

    let pages = [Page::Exercises, Page::Workbench, Page::Ledger, Page::TrialBalance];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Lv {}", progress.level),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Score {}/{}", progress.score, progress.next_threshold()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("Accuracy {}%", progress.accuracy()),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_exercises(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Id", "Difficulty", "Points", "Shop", "Title"]
        .iter()
        .map(|h| Cell::from(*h).style(header_style()));
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let current = app.session.current_exercise().map(|ex| ex.id.clone());

    let rows = app.session.exercises().iter().map(|ex| {
        let active = current.as_deref() == Some(ex.id.as_str());
        let style = if active {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(ex.id.clone()),
            Cell::from(ex.difficulty.as_str()),
            Cell::from(format!("+{}", ex.points)),
            Cell::from(truncate(&ex.shop, 22)),
            Cell::from(ex.title.clone()),
        ])
        .style(style)
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Length(7),
            Constraint::Length(24),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Exercise Board "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.exercise_state);
}

fn render_workbench(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Voucher + objective
            Constraint::Length(3), // Input line
            Constraint::Min(0),    // Working lines
        ])
        .split(area);

    let brief = match app.session.current_exercise() {
        Some(ex) => vec![
            Line::from(vec![
                Span::styled(format!(" {} ", ex.title), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("({} | +{})", ex.shop, ex.points),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(""),
        ]
        .into_iter()
        .chain(ex.voucher.lines().map(|l| Line::from(format!(" {}", l))))
        .chain(std::iter::once(Line::from(Span::styled(
            format!(" Goal: {}", ex.objective),
            Style::default().fg(Color::Cyan),
        ))))
        .collect(),
        None => vec![Line::from(" Pick an exercise on the Exercises page first.")],
    };

    let brief = Paragraph::new(brief)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Voucher "),
        );
    f.render_widget(brief, chunks[0]);

    let account = app
        .session
        .list_accounts()
        .get(app.account_index)
        .map(|a| a.label())
        .unwrap_or_default();
    let side_color = match app.side {
        Side::Debit => Color::Cyan,
        Side::Credit => Color::Magenta,
    };
    let input = Paragraph::new(Line::from(vec![
        Span::raw(" Account ◀ "),
        Span::styled(account, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::raw(" ▶   Side "),
        Span::styled(app.side.as_str(), Style::default().fg(side_color).add_modifier(Modifier::BOLD)),
        Span::raw("   Amount "),
        Span::styled(
            format!("{}_", app.amount_input),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" New Line "),
    );
    f.render_widget(input, chunks[1]);

    let entry = app.session.working_entry();
    let header = Row::new(
        ["Account", "Debit", "Credit"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    )
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let mut rows: Vec<Row> = entry
        .lines()
        .iter()
        .map(|line| {
            let (d, c) = match line.side {
                Side::Debit => (line.amount.to_string(), String::new()),
                Side::Credit => (String::new(), line.amount.to_string()),
            };
            Row::new(vec![Cell::from(line.account.clone()), Cell::from(d), Cell::from(c)])
        })
        .collect();

    let balanced = entry.is_balanced();
    let total_style = Style::default()
        .fg(if balanced { Color::Green } else { Color::Red })
        .add_modifier(Modifier::BOLD);
    rows.push(
        Row::new(vec![
            Cell::from("Total"),
            Cell::from(entry.total_debit().to_string()),
            Cell::from(entry.total_credit().to_string()),
        ])
        .style(total_style),
    );

    let title = if app.session.can_post() {
        " Journal Entry (passed - press p to post) "
    } else {
        " Journal Entry "
    };

    let table = Table::new(
        rows,
        [Constraint::Min(30), Constraint::Length(14), Constraint::Length(14)],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[2], &mut app.lines_state);
}

fn render_ledger(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.session.ledger_report();

    if rows.is_empty() {
        let empty = Paragraph::new(" Nothing has been posted yet.").block(
            Block::default()
                .borders(Borders::ALL)
                .title(" General Ledger "),
        );
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        ["Account", "Debit Total", "Credit Total", "Balance"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    )
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let body = rows.iter().map(|r| {
        let side = match r.side {
            Side::Debit => "(Dr)",
            Side::Credit => "(Cr)",
        };
        Row::new(vec![
            Cell::from(format!("{} | {}", r.code, r.account)),
            Cell::from(r.debit_total.to_string()),
            Cell::from(r.credit_total.to_string()),
            Cell::from(format!("{} {}", r.balance, side)),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Min(30),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" General Ledger "),
    );

    f.render_widget(table, area);
}

fn render_trial_balance(f: &mut Frame, area: Rect, app: &App) {
    let tb = app.session.trial_balance();

    let header = Row::new(
        ["Account", "Debit", "Credit"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    )
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let mut rows: Vec<Row> = tb
        .rows
        .iter()
        .map(|r| {
            let show = |v: u64| if v == 0 { String::new() } else { v.to_string() };
            Row::new(vec![
                Cell::from(format!("{} | {}", r.code, r.account)),
                Cell::from(show(r.debit)),
                Cell::from(show(r.credit)),
            ])
        })
        .collect();

    let color = if tb.is_balanced { Color::Green } else { Color::Red };
    rows.push(
        Row::new(vec![
            Cell::from("Total"),
            Cell::from(tb.total_debit.to_string()),
            Cell::from(tb.total_credit.to_string()),
        ])
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
    );

    let table = Table::new(
        rows,
        [Constraint::Min(30), Constraint::Length(14), Constraint::Length(14)],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" Trial Balance - {} ", tb.summary())),
    );

    f.render_widget(table, area);
}

fn render_feedback(f: &mut Frame, area: Rect, app: &App) {
    let color = app.feedback.tone.color();
    let lines: Vec<Line> = app
        .feedback
        .lines
        .iter()
        .map(|l| Line::from(Span::styled(format!(" {}", l), Style::default().fg(color))))
        .collect();

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let keys: &[(&str, &str)] = match app.current_page {
        Page::Exercises => &[
            ("Enter", "Accept"),
            ("h", "Hints"),
            ("s", "More"),
            ("d", "Daily"),
            ("↑/↓", "Nav"),
        ],
        Page::Workbench => &[
            ("←/→", "Account"),
            ("Space", "Dr/Cr"),
            ("0-9", "Amount"),
            ("Enter", "Add"),
            ("x", "Remove"),
            ("C", "Clear"),
            ("v", "Check"),
            ("p", "Post"),
        ],
        Page::Ledger | Page::TrialBalance => &[],
    };

    let mut status_spans = vec![Span::styled(
        format!(" {} ", app.current_page.title()),
        Style::default().fg(Color::Cyan),
    )];

    for (key, label) in keys.iter().chain([("Tab", "Page")].iter()) {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(format!(" {}", label)));
    }
    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
