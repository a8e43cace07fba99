use anyhow::{bail, Context, Result};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};
use serde::{Deserialize, Serialize};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

use crate::{
    config::Config,
    events::{AppEvent, EventHandler},
    linked_list::LinkedListView,
    notice::{Notice, NoticeBoard, Notifier},
    queue::Fifo,
    stack::Lifo,
    themes::Theme,
    ui::ui,
    visualizer::Visualizer,
};

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Running,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    Stack,
    Queue,
    #[serde(alias = "linkedlist")]
    List,
}

impl ActiveView {
    pub fn next(&self) -> Self {
        match self {
            ActiveView::Stack => ActiveView::Queue,
            ActiveView::Queue => ActiveView::List,
            ActiveView::List => ActiveView::Stack,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ActiveView::Stack => ActiveView::List,
            ActiveView::Queue => ActiveView::Stack,
            ActiveView::List => ActiveView::Queue,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActiveView::Stack => "Stack",
            ActiveView::Queue => "Queue",
            ActiveView::List => "Linked List",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ActiveView::Stack => 0,
            ActiveView::Queue => 1,
            ActiveView::List => 2,
        }
    }

    pub fn all() -> &'static [ActiveView] {
        &[ActiveView::Stack, ActiveView::Queue, ActiveView::List]
    }

    /// Whether the view shows a bounded collection (as opposed to the list)
    pub fn is_bounded(&self) -> bool {
        !matches!(self, ActiveView::List)
    }
}

/// What the keyboard is currently typing into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Value,
    Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing(EditTarget),
}

pub struct App {
    pub state: AppState,
    pub active_view: ActiveView,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub theme: Theme,
    pub tick_rate: Duration,
    pub force_redraw: bool,

    pub stack: Visualizer<Lifo>,
    pub queue: Visualizer<Fifo>,
    pub linked_list: LinkedListView,
    pub capacity_input: String,

    pub notice_board: NoticeBoard,
    notices: mpsc::UnboundedReceiver<Notice>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let (notifier, notices) = Notifier::channel();
        let capacity = config.capacity();
        let commit_delay = config.commit_delay();

        Self {
            state: AppState::Running,
            active_view: config.initial_view,
            input_mode: InputMode::Normal,
            show_help: false,
            theme: Theme::new(config.theme_name()),
            tick_rate: config.tick_rate(),
            force_redraw: false,
            stack: Visualizer::new(capacity, commit_delay, notifier.clone()),
            queue: Visualizer::new(capacity, commit_delay, notifier),
            linked_list: LinkedListView::new(),
            capacity_input: String::new(),
            notice_board: NoticeBoard::new(config.notice_duration()),
            notices,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut events = EventHandler::new(self.tick_rate);
        tracing::info!(tick_ms = events.tick_rate().as_millis() as u64, "ui started");

        let result = self.run_app(&mut terminal, &mut events).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut EventHandler,
    ) -> Result<()> {
        loop {
            // Handle forced redraw (like Ctrl+L)
            if self.force_redraw {
                let size = terminal.size()?;
                terminal.resize(Rect::new(0, 0, size.width, size.height))?;
                terminal.clear()?;
                self.force_redraw = false;
            }

            terminal.draw(|f| ui(f, self))?;

            let Some(event) = events.next().await else {
                bail!("terminal event source closed");
            };

            let now = Instant::now();
            match event {
                AppEvent::Key(key) => self.handle_key_event(key.code, key.modifiers, now),
                AppEvent::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                AppEvent::Tick => self.on_tick(now),
            }
            self.notice_board.collect(&mut self.notices, now);

            if self.state == AppState::Quitting {
                break;
            }
        }

        tracing::info!("ui stopped");
        Ok(())
    }

    /// Commit due removals and expire old notices.
    pub fn on_tick(&mut self, now: Instant) {
        self.stack.tick(now);
        self.queue.tick(now);
        self.notice_board.collect(&mut self.notices, now);
        self.notice_board.expire(now);
    }

    pub fn handle_key_event(&mut self, key_code: KeyCode, modifiers: KeyModifiers, now: Instant) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key_code {
                KeyCode::Char('c') => self.state = AppState::Quitting,
                // Ctrl+L - redraw screen (standard terminal convention)
                KeyCode::Char('l') | KeyCode::Char('\x0C') => self.force_redraw = true,
                _ => {}
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key_code, now),
            InputMode::Editing(target) => self.handle_editing_key(target, key_code),
        }
        self.notice_board.collect(&mut self.notices, now);
    }

    fn handle_normal_key(&mut self, key_code: KeyCode, now: Instant) {
        match key_code {
            KeyCode::Char('q') => {
                self.state = AppState::Quitting;
            }
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.state = AppState::Quitting;
                }
            }
            KeyCode::Char('h') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
            }
            KeyCode::Tab => self.switch_view(self.active_view.next()),
            KeyCode::BackTab => self.switch_view(self.active_view.previous()),
            KeyCode::Char('1') => self.switch_view(ActiveView::Stack),
            KeyCode::Char('2') => self.switch_view(ActiveView::Queue),
            KeyCode::Char('3') => self.switch_view(ActiveView::List),
            KeyCode::Char('i') | KeyCode::Enter => {
                self.input_mode = InputMode::Editing(EditTarget::Value);
            }
            KeyCode::Char('s') if self.active_view.is_bounded() => {
                self.capacity_input.clear();
                self.input_mode = InputMode::Editing(EditTarget::Capacity);
            }
            KeyCode::Char('p') | KeyCode::Char('d') | KeyCode::Delete => self.remove(now),
            KeyCode::Char('k') => self.peek(),
            KeyCode::Char('e') => self.report_emptiness(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_capacity(1),
            KeyCode::Char('-') => self.change_capacity(-1),
            KeyCode::Char('c') if self.active_view == ActiveView::List => {
                self.linked_list.clear();
            }
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, target: EditTarget, key_code: KeyCode) {
        match key_code {
            KeyCode::Esc => {
                if target == EditTarget::Capacity {
                    self.capacity_input.clear();
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => match target {
                EditTarget::Value => self.submit_value(),
                EditTarget::Capacity => {
                    let raw = std::mem::take(&mut self.capacity_input);
                    match self.active_view {
                        ActiveView::Stack => {
                            self.stack.set_capacity_from_input(&raw);
                        }
                        ActiveView::Queue => {
                            self.queue.set_capacity_from_input(&raw);
                        }
                        ActiveView::List => {}
                    }
                    self.input_mode = InputMode::Normal;
                }
            },
            KeyCode::Backspace => {
                self.edit_buffer_mut(target).pop();
            }
            KeyCode::Char(c) => {
                self.edit_buffer_mut(target).push(c);
            }
            _ => {}
        }
    }

    fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.input_mode = InputMode::Normal;
    }

    /// Buffer the keyboard types into for the active view
    pub fn edit_buffer(&self, target: EditTarget) -> &str {
        match (target, self.active_view) {
            (EditTarget::Capacity, _) => &self.capacity_input,
            (EditTarget::Value, ActiveView::Stack) => &self.stack.input,
            (EditTarget::Value, ActiveView::Queue) => &self.queue.input,
            (EditTarget::Value, ActiveView::List) => &self.linked_list.input,
        }
    }

    fn edit_buffer_mut(&mut self, target: EditTarget) -> &mut String {
        match (target, self.active_view) {
            (EditTarget::Capacity, _) => &mut self.capacity_input,
            (EditTarget::Value, ActiveView::Stack) => &mut self.stack.input,
            (EditTarget::Value, ActiveView::Queue) => &mut self.queue.input,
            (EditTarget::Value, ActiveView::List) => &mut self.linked_list.input,
        }
    }

    fn submit_value(&mut self) {
        match self.active_view {
            ActiveView::Stack => {
                self.stack.push();
            }
            ActiveView::Queue => {
                self.queue.enqueue();
            }
            ActiveView::List => {
                self.linked_list.generate();
            }
        }
    }

    fn remove(&mut self, now: Instant) {
        match self.active_view {
            ActiveView::Stack => {
                self.stack.pop(now);
            }
            ActiveView::Queue => {
                self.queue.dequeue(now);
            }
            ActiveView::List => {}
        }
    }

    fn peek(&mut self) {
        match self.active_view {
            ActiveView::Stack => {
                self.stack.peek();
            }
            ActiveView::Queue => {
                self.queue.peek();
            }
            ActiveView::List => {}
        }
    }

    fn report_emptiness(&mut self) {
        match self.active_view {
            ActiveView::Stack => {
                self.stack.report_emptiness();
            }
            ActiveView::Queue => {
                self.queue.report_emptiness();
            }
            ActiveView::List => {}
        }
    }

    fn change_capacity(&mut self, delta: i64) {
        match (self.active_view, delta > 0) {
            (ActiveView::Stack, true) => {
                self.stack.grow();
            }
            (ActiveView::Stack, false) => {
                self.stack.shrink();
            }
            (ActiveView::Queue, true) => {
                self.queue.grow();
            }
            (ActiveView::Queue, false) => {
                self.queue.shrink();
            }
            (ActiveView::List, _) => {}
        }
    }
}
