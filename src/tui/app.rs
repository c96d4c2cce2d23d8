//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use super::events::{handle_event, poll_event, Action};
use super::layout::grid_rects;
use super::state::{AppState, View};
use super::theme::{icons, WorkbenchTheme};
use super::widgets::utils::{spinner, truncate};
use crate::config::WorkbenchConfig;
use crate::reveal::{RevealProgress, RevealState};
use crate::session::WorkbenchSession;

/// TUI Application
pub struct TuiApp {
    state: AppState,
    theme: WorkbenchTheme,
}

impl TuiApp {
    /// Create the app. With a prompt, the workbench opens right away.
    pub fn new(config: WorkbenchConfig, prompt: Option<String>) -> anyhow::Result<Self> {
        let mut state = AppState::new(config);
        if let Some(prompt) = prompt {
            state.input = prompt;
            state.submit_prompt()?;
        }

        Ok(Self {
            state,
            theme: WorkbenchTheme::new(),
        })
    }

    /// Run the TUI application
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = self.setup_terminal()?;

        let result = self.main_loop(&mut terminal).await;

        // Tear the session down before leaving the alternate screen
        self.state.leave_workbench();
        self.restore_terminal(&mut terminal)?;

        result
    }

    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(50);

        loop {
            self.state.tick();

            terminal.draw(|frame| self.render(frame))?;

            if let Some(event) = poll_event(tick_rate)? {
                if handle_event(event, &mut self.state) == Action::Quit {
                    self.state.should_quit = true;
                }
            }

            if self.state.should_quit {
                break;
            }

            // Let the reveal task run between frames
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        match self.state.view {
            View::Landing => self.render_landing(frame),
            View::Workbench => self.render_workbench(frame),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Landing
    // ─────────────────────────────────────────────────────────────────────

    fn render_landing(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(3), // Title
                Constraint::Length(3), // Prompt box
                Constraint::Length(1), // Notice
                Constraint::Min(0),
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled("SIMpol", self.theme.header())),
            Line::from(Span::styled(
                "Your AI-Powered Workbench",
                self.theme.text(),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let box_area = centered(chunks[2], 70);
        let prompt = if self.state.input.is_empty() {
            Span::styled("Start your journey with a prompt...", self.theme.dimmed())
        } else {
            Span::styled(self.state.input.as_str(), self.theme.text())
        };
        let input = Paragraph::new(Line::from(vec![prompt])).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.accent())
                .title(format!(" {} ", icons::ARROW)),
        );
        frame.render_widget(input, box_area);
        frame.set_cursor_position(input_cursor(box_area, &self.state.input));

        if let Some(notice) = &self.state.notice {
            let line = Paragraph::new(Span::styled(notice.as_str(), self.theme.error()))
                .alignment(Alignment::Center);
            frame.render_widget(line, chunks[3]);
        }

        let footer = Line::from(vec![
            Span::styled(" [Enter]", self.theme.accent()),
            Span::styled(" open workbench  ", self.theme.dimmed()),
            Span::styled("[Esc]", self.theme.accent()),
            Span::styled(" quit", self.theme.dimmed()),
        ]);
        frame.render_widget(Paragraph::new(footer), chunks[5]);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Workbench
    // ─────────────────────────────────────────────────────────────────────

    fn render_workbench(&mut self, frame: &mut Frame) {
        let Some(session) = self.state.session.as_ref() else {
            return;
        };
        let area = frame.area();
        let progress = session.thoughts();
        let thoughts_height = thoughts_height(&progress, area.width).min(area.height / 2);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),               // Prompt
                Constraint::Length(thoughts_height), // Thoughts
                Constraint::Min(8),                  // Grid
                Constraint::Length(1),               // Footer
            ])
            .split(area);

        self.render_prompt(frame, chunks[0], session);
        self.render_thoughts(frame, chunks[1], &progress);
        let rects = self.render_grid(frame, chunks[2], session);
        self.render_footer(frame, chunks[3]);

        self.state.panel_rects = rects;
    }

    fn render_prompt(&self, frame: &mut Frame, area: Rect, session: &WorkbenchSession) {
        let max = area.width.saturating_sub(4) as usize;
        let paragraph = Paragraph::new(Span::styled(
            truncate(session.prompt().as_str(), max),
            self.theme.text(),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.dimmed())
                .title(Span::styled(" Initial Prompt ", self.theme.header())),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_thoughts(&self, frame: &mut Frame, area: Rect, progress: &RevealProgress) {
        let status = match progress.state() {
            RevealState::Idle | RevealState::Revealing => Span::styled(
                format!("{} ", spinner(self.state.spinner_frame)),
                self.theme.accent(),
            ),
            RevealState::Complete => Span::styled(format!("{} ", icons::DONE), self.theme.success()),
            RevealState::Stopped => Span::styled(format!("{} ", icons::HALTED), self.theme.warning()),
        };

        let lines: Vec<Line> = progress
            .log()
            .iter()
            .map(|thought| {
                Line::from(vec![
                    Span::styled(format!(" {} ", icons::THOUGHT), self.theme.dimmed()),
                    Span::styled(thought.as_str(), self.theme.text()),
                ])
            })
            .collect();

        let title = Line::from(vec![
            Span::raw(format!(" {} ", icons::BRAIN)),
            Span::styled("Orchestrator Thoughts ", self.theme.header()),
            status,
        ]);

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.dimmed())
                    .title(title),
            );
        frame.render_widget(paragraph, area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, session: &WorkbenchSession) -> Vec<Rect> {
        let grid = session.grid();
        let spans: Vec<_> = grid.sequence().iter().map(|p| p.kind.grid_span()).collect();
        let rects = grid_rects(&spans, area);

        for (index, (panel, rect)) in grid.sequence().iter().zip(&rects).enumerate() {
            let dragging = grid.is_dragging(&panel.id);
            let selected = index == self.state.cursor;

            let mut title = vec![Span::raw(" ")];
            if dragging {
                title.push(Span::raw(format!("{} ", icons::GRAB)));
            }
            title.push(Span::raw(format!("{} ", panel.label)));

            let style = self.theme.panel_border(panel.kind, selected, dragging);
            let body = Paragraph::new(Span::styled(panel.kind.as_str(), self.theme.dimmed())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .title(Line::from(title).style(style)),
            );
            frame.render_widget(body, *rect);
        }

        rects
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let carry = if self.state.is_dragging() { " drop  " } else { " pick up  " };
        let help = Line::from(vec![
            Span::styled(" [q]", self.theme.accent()),
            Span::styled("uit  ", self.theme.dimmed()),
            Span::styled("[Esc]", self.theme.accent()),
            Span::styled(" back  ", self.theme.dimmed()),
            Span::styled("[←↑↓→]", self.theme.accent()),
            Span::styled(" move  ", self.theme.dimmed()),
            Span::styled("[Enter]", self.theme.accent()),
            Span::styled(carry, self.theme.dimmed()),
            Span::styled("[mouse]", self.theme.accent()),
            Span::styled(" drag", self.theme.dimmed()),
        ]);
        frame.render_widget(Paragraph::new(help), area);
    }
}

/// Terminal cursor for the prompt box, kept inside its borders
fn input_cursor(box_area: Rect, input: &str) -> (u16, u16) {
    let typed = u16::try_from(Span::raw(input).width()).unwrap_or(u16::MAX);
    let last_column = box_area.right().saturating_sub(2).max(box_area.x);
    let x = box_area.x.saturating_add(1).saturating_add(typed).min(last_column);
    (x, box_area.y.saturating_add(1))
}

/// Rows needed to show every thought (wrapped to `width`) plus the borders
fn thoughts_height(progress: &RevealProgress, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2)).max(1);
    let bullet = Span::raw(format!(" {} ", icons::THOUGHT)).width();
    let rows = progress
        .script()
        .lines()
        .iter()
        .map(|thought| (bullet + Span::raw(thought.as_str()).width()).div_ceil(inner).max(1))
        .fold(0usize, usize::saturating_add);
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

/// Horizontally centered slice of `area`, `percent` wide
fn centered(area: Rect, percent: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent) / 2),
            Constraint::Percentage(percent),
            Constraint::Percentage((100 - percent) / 2),
        ])
        .split(area)[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_landing_renders_prompt_box() {
        let mut app = TuiApp::new(WorkbenchConfig::default(), None).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("SIMpol"));
        assert!(text.contains("Start your journey with a prompt..."));
    }

    #[tokio::test]
    async fn test_workbench_renders_panels_and_records_rects() {
        let mut app =
            TuiApp::new(WorkbenchConfig::default(), Some("Quarterly review".into())).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Quarterly review"));
        assert!(text.contains("Orchestrator Thoughts"));
        assert!(text.contains("PDF Document"));
        assert!(text.contains("Summary"));
        assert_eq!(app.state.panel_rects.len(), 6);
    }

    #[test]
    fn test_input_cursor_stays_inside_the_box() {
        let box_area = Rect::new(10, 4, 20, 3);
        assert_eq!(input_cursor(box_area, ""), (11, 5));
        assert_eq!(input_cursor(box_area, "abc"), (14, 5));

        let paste = "x".repeat(100_000);
        assert_eq!(input_cursor(box_area, &paste), (box_area.right() - 2, 5));

        // wide glyphs take two columns each
        assert_eq!(input_cursor(box_area, "日本"), (15, 5));
    }

    #[test]
    fn test_thoughts_height_accounts_for_wrapping() {
        use crate::reveal::RevealScript;

        let short = RevealProgress::new(RevealScript::new(vec!["a".into(), "b".into()]).unwrap());
        assert_eq!(thoughts_height(&short, 40), 4);

        // 3 bullet columns + 77 chars = 80 columns, two rows at inner width 40
        let long = RevealProgress::new(RevealScript::new(vec!["y".repeat(77)]).unwrap());
        assert_eq!(thoughts_height(&long, 42), 4);

        let huge = RevealProgress::new(RevealScript::new(vec!["z".into(); 70_000]).unwrap());
        assert_eq!(thoughts_height(&huge, 80), u16::MAX);
    }

    #[tokio::test]
    async fn test_blank_prompt_flag_is_rejected() {
        assert!(TuiApp::new(WorkbenchConfig::default(), Some("  ".into())).is_err());
    }
}
