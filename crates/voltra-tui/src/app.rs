//! Application core -- event loop, section routing, toasts, theme.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info};

use voltra_config::Theme;
use voltra_core::{Notice, NoticeLevel, Session, Workspace};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::{ScreenId, create_screens};
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays visible -- the original alert's 4 s auto-dismiss.
const TOAST_DURATION: Duration = Duration::from_secs(4);

pub struct App {
    active: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    session: Session,
    workspace: Arc<Workspace>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    pending_toasts: VecDeque<Notice>,
    current_toast: Option<(Notice, Instant)>,
    session_expired: bool,
}

impl App {
    pub fn new(workspace: &Arc<Workspace>, session: Session, theme_pref: Theme) -> Self {
        theme::set(theme_pref);
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(workspace).into_iter().collect();

        Self {
            active: ScreenId::Overview,
            screens,
            running: true,
            session,
            workspace: Arc::clone(workspace),
            action_tx,
            action_rx,
            pending_toasts: VecDeque::new(),
            current_toast: None,
            session_expired: false,
        }
    }

    /// The event loop stopped because the server rejected the credential.
    pub fn session_expired(&self) -> bool {
        self.session_expired
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        // The initial section loads its data immediately.
        if let Some(screen) = self.screens.get_mut(&self.active) {
            screen.on_activate();
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.handle_action(action, &mut tui)?;
            }
        }

        tui.exit()?;
        Ok(())
    }

    // ── Input routing ────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let modal_active = self
            .screens
            .get(&self.active)
            .is_some_and(|s| s.modal_active());

        // Modals capture everything except Ctrl+C.
        if modal_active {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(Some(Action::Quit));
            }
            if let Some(screen) = self.screens.get_mut(&self.active) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::Quit)),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Ok(Some(Action::Quit))
            }
            KeyCode::Char('t') => Ok(Some(Action::ToggleTheme)),
            KeyCode::Tab => Ok(Some(Action::Switch(self.active.next()))),
            KeyCode::Char('1') => Ok(Some(Action::Switch(ScreenId::Overview))),
            KeyCode::Char('2') => Ok(Some(Action::Switch(ScreenId::Units))),
            KeyCode::Char('3') => Ok(Some(Action::Switch(ScreenId::Rooms))),
            KeyCode::Char('4') => Ok(Some(Action::Switch(ScreenId::Devices))),
            _ => self
                .screens
                .get_mut(&self.active)
                .map_or(Ok(None), |screen| screen.handle_key_event(key)),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        self.screens
            .get_mut(&self.active)
            .map_or(Ok(None), |screen| screen.handle_mouse_event(mouse))
    }

    // ── Action handling ──────────────────────────────────────────────

    fn handle_action(&mut self, action: Action, tui: &mut Tui) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render => {
                tui.draw(|frame| self.draw(frame))?;
            }

            Action::Tick => {
                // A rejected credential forces the login flow; the stored
                // session is destroyed and the dashboard closes.
                if self.workspace.session_expired() {
                    voltra_config::clear_session();
                    self.session_expired = true;
                    self.running = false;
                    return Ok(());
                }
                self.collect_notices();
                self.advance_toast();
                if let Some(screen) = self.screens.get_mut(&self.active) {
                    if let Some(follow_up) = screen.update(&Action::Tick)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::Switch(id) => {
                if self.active != id {
                    debug!(?id, "switching section");
                    self.active = id;
                    if let Some(screen) = self.screens.get_mut(&self.active) {
                        screen.on_activate();
                    }
                }
            }

            Action::ToggleTheme => {
                let next = theme::current().toggled();
                theme::set(next);
                let mut cfg = voltra_config::load_config_or_default();
                cfg.theme = next;
                if let Err(e) = voltra_config::save_config(&cfg) {
                    self.pending_toasts.push_back(Notice {
                        level: NoticeLevel::Error,
                        message: format!("could not persist theme: {e}"),
                    });
                }
            }

            Action::Notify(notice) => self.pending_toasts.push_back(notice),

            Action::LookupPostal(raw) => {
                let workspace = Arc::clone(&self.workspace);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    match workspace.lookup_postal_code(&raw).await {
                        Ok(addr) => {
                            let _ = tx.send(Action::AddressResolved(addr));
                        }
                        Err(e) => {
                            let _ = tx.send(Action::Notify(Notice {
                                level: NoticeLevel::Error,
                                message: format!("address lookup failed: {e}"),
                            }));
                        }
                    }
                });
            }

            action @ (Action::AddressResolved(_) | Action::Resize(..)) => {
                if let Some(screen) = self.screens.get_mut(&self.active) {
                    if let Some(follow_up) = screen.update(&action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Pull queued notices out of every module.
    fn collect_notices(&mut self) {
        for notice in self
            .workspace
            .units
            .notices()
            .drain()
            .into_iter()
            .chain(self.workspace.rooms.notices().drain())
            .chain(self.workspace.devices.notices().drain())
        {
            self.pending_toasts.push_back(notice);
        }
    }

    /// Expire the visible toast and promote the next pending one.
    fn advance_toast(&mut self) {
        if let Some((_, shown_at)) = &self.current_toast {
            if shown_at.elapsed() >= TOAST_DURATION {
                self.current_toast = None;
            }
        }
        if self.current_toast.is_none() {
            if let Some(notice) = self.pending_toasts.pop_front() {
                self.current_toast = Some((notice, Instant::now()));
            }
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────

    fn draw(&self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(3), // header
            Constraint::Min(1),    // active section
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

        self.draw_header(frame, layout[0]);

        if let Some(screen) = self.screens.get(&self.active) {
            screen.render(frame, layout[1]);
        }

        self.draw_footer(frame, layout[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" voltra ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|id| Line::from(format!(" {} ", id.title())))
            .collect();
        let selected = ScreenId::ALL
            .iter()
            .position(|id| *id == self.active)
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .style(theme::tab_inactive())
            .highlight_style(theme::tab_active())
            .divider(Span::styled("·", theme::key_hint()));
        frame.render_widget(tabs, inner);

        // User chrome, right-aligned over the same header line.
        let user = Paragraph::new(Line::from(vec![
            Span::styled(self.session.display_name(), Style::default().fg(theme::text())),
            Span::styled(
                if theme::is_dark() { "  dark " } else { "  light " },
                Style::default().fg(theme::dim()).add_modifier(Modifier::DIM),
            ),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(user, inner);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled(" 1-4", theme::key_hint_key()),
            Span::styled(" section  ", theme::key_hint()),
            Span::styled("Tab", theme::key_hint_key()),
            Span::styled(" next  ", theme::key_hint()),
            Span::styled("t", theme::key_hint_key()),
            Span::styled(" theme  ", theme::key_hint()),
            Span::styled("q", theme::key_hint_key()),
            Span::styled(" quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);

        if let Some((notice, _)) = &self.current_toast {
            let style = match notice.level {
                NoticeLevel::Success => Style::default().fg(theme::success()),
                NoticeLevel::Error => Style::default().fg(theme::error()),
                NoticeLevel::Info => Style::default().fg(theme::warning()),
            };
            let toast = Paragraph::new(Line::from(Span::styled(
                format!("{} ", notice.message),
                style.add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Right);
            frame.render_widget(toast, area);
        }
    }
}
