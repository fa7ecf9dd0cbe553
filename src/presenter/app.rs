//! Dashboard event loop
//!
//! [`Dashboard`] is the only owner of the cache, the stores, the view state
//! and the notification queue. Everything that mutates them runs on the task
//! that drives [`Dashboard::run`], so none of it needs a lock.

use super::command::{is_affirmative, Command};
use super::state::{Page, Selection, ViewState};
use crate::content::{ContentCache, TypeFilter};
use crate::keywords::KeywordStore;
use crate::notifications::Notifications;
use crate::sync::{RecurringTimer, SyncController};
use crate::theme::ThemeStore;
use crate::view::{DashboardHeader, RenderedView, TerminalRenderer};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Events posted by the recurring timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    AutoRefresh,
    StatusCheck,
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Periods of the two recurring timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub auto_refresh: Duration,
    pub status_check: Duration,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            auto_refresh: Duration::from_secs(15 * 60),
            status_check: Duration::from_secs(5 * 60),
        }
    }
}

/// Interactive dashboard writing to `W`
pub struct Dashboard<W: Write> {
    sync: SyncController,
    keywords: KeywordStore,
    theme: ThemeStore,
    cache: ContentCache,
    notices: Notifications,
    state: ViewState,
    view: RenderedView,
    renderer: TerminalRenderer,
    out: W,
    pending_removal: Option<String>,
}

impl<W: Write> Dashboard<W> {
    pub fn new(
        sync: SyncController,
        keywords: KeywordStore,
        theme: ThemeStore,
        notices: Notifications,
        color: bool,
        out: W,
    ) -> Self {
        let renderer = TerminalRenderer::new(theme.current(), color);

        Self {
            sync,
            keywords,
            theme,
            cache: ContentCache::new(),
            notices,
            state: ViewState::default(),
            view: RenderedView::default(),
            renderer,
            out,
            pending_removal: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn view(&self) -> &RenderedView {
        &self.view
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notices
    }

    pub fn keywords(&self) -> &KeywordStore {
        &self.keywords
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    /// Keyword awaiting a yes/no answer
    pub fn pending_removal(&self) -> Option<&str> {
        self.pending_removal.as_deref()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Initial load: every keyword, no refresh, selection `All`
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.renderer.draw_loading(&mut self.out)?;

        let tracked = self.keywords.keywords().to_vec();
        // Failures are already reported as a notification
        let _ = self
            .sync
            .load_all(&tracked, false, &mut self.cache, &mut self.notices)
            .await;

        self.state.selection = Selection::All;
        self.rebuild_view();
        self.draw()
    }

    /// Run until `quit` or end of input
    ///
    /// Both timers are canceled when the loop ends.
    pub async fn run<R>(mut self, input: R, timers: TimerSettings) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut auto_refresh =
            RecurringTimer::start("auto_refresh", timers.auto_refresh, tx.clone(), Event::AutoRefresh);
        let mut status_check =
            RecurringTimer::start("status_check", timers.status_check, tx, Event::StatusCheck);

        self.start().await?;
        let mut lines = input.lines();

        loop {
            let expiry = self.notices.next_expiry();

            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if self.handle_line(&line).await? == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        tracing::debug!("Input closed");
                        break;
                    }
                },
                Some(event) = rx.recv() => self.on_event(event).await?,
                _ = wait_until(expiry) => {
                    let dismissed = self.notices.prune(Instant::now());
                    tracing::trace!(dismissed, "Notifications dismissed");
                }
            }
        }

        auto_refresh.cancel();
        status_check.cancel();
        tracing::info!("Dashboard closed");
        Ok(())
    }

    /// Handle one line of user input
    ///
    /// While a removal is pending the line is its answer, not a command.
    pub async fn handle_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        if let Some(keyword) = self.pending_removal.take() {
            self.confirm_removal(&keyword, is_affirmative(line)).await?;
            return Ok(Flow::Continue);
        }

        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        match line.parse::<Command>() {
            Ok(command) => self.handle(command).await,
            Err(e) => {
                self.notices.error(e.to_string());
                self.draw_notices()?;
                Ok(Flow::Continue)
            }
        }
    }

    pub async fn handle(&mut self, command: Command) -> anyhow::Result<Flow> {
        tracing::debug!(?command, "Command");

        match command {
            Command::Refresh => self.refresh().await?,
            Command::ShowAll => self.select(Selection::All).await?,
            Command::Show(keyword) => self.select(Selection::Keyword(keyword)).await?,
            Command::Filter(filter) => self.set_filter(filter)?,
            Command::Page(page) => self.show_page(page)?,
            Command::Add(keyword) => self.add_keyword(&keyword).await?,
            Command::Remove(keyword) => self.request_removal(keyword)?,
            Command::ToggleTheme => self.toggle_theme()?,
            Command::Status => {
                let _ = self.sync.check_status().await;
            }
            Command::Help => self.renderer.draw_help(&mut self.out)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    pub async fn on_event(&mut self, event: Event) -> anyhow::Result<()> {
        tracing::debug!(?event, "Timer fired");

        match event {
            Event::AutoRefresh => self.refresh().await,
            Event::StatusCheck => {
                let _ = self.sync.check_status().await;
                Ok(())
            }
        }
    }

    /// Force a refresh of the current selection
    pub async fn refresh(&mut self) -> anyhow::Result<()> {
        self.renderer.draw_loading(&mut self.out)?;
        let tracked = self.keywords.keywords().to_vec();

        let _ = match self.state.selection.keyword() {
            Some(keyword) => self
                .sync
                .load_one(&tracked, keyword, true, &mut self.cache, &mut self.notices)
                .await
                .map(|_| ()),
            None => self
                .sync
                .load_all(&tracked, true, &mut self.cache, &mut self.notices)
                .await
                .map(|_| ()),
        };

        self.rebuild_view();
        self.draw()
    }

    /// Switch the dashboard to a keyword or to `All`
    ///
    /// A cached keyword renders without a request; otherwise it is fetched
    /// without a refresh.
    pub async fn select(&mut self, selection: Selection) -> anyhow::Result<()> {
        if let Some(keyword) = selection.keyword() {
            if self.cache.get(keyword).is_none() {
                self.renderer.draw_loading(&mut self.out)?;
                let tracked = self.keywords.keywords().to_vec();
                let _ = self
                    .sync
                    .load_one(&tracked, keyword, false, &mut self.cache, &mut self.notices)
                    .await;
            }
        }

        self.state.page = Page::Dashboard;
        self.state.selection = selection;
        self.rebuild_view();
        self.draw()
    }

    /// Change the type filter of the rendered cards
    pub fn set_filter(&mut self, filter: TypeFilter) -> anyhow::Result<()> {
        self.state.filter = filter;
        self.view.apply_filter(filter);
        self.draw()
    }

    pub fn show_page(&mut self, page: Page) -> anyhow::Result<()> {
        self.state.page = page;
        self.draw()
    }

    pub async fn add_keyword(&mut self, input: &str) -> anyhow::Result<()> {
        match self.keywords.add(input).await {
            Ok(keyword) => {
                self.notices.info(format!("Now tracking '{}'", keyword));
            }
            Err(e) => {
                self.notices.error(e.to_string());
            }
        }
        self.draw()
    }

    /// Ask before removing; the next input line is the answer
    pub fn request_removal(&mut self, keyword: String) -> anyhow::Result<()> {
        if !self.keywords.contains(&keyword) {
            self.notices.error(format!("'{}' is not tracked", keyword));
            return self.draw_notices();
        }

        self.renderer
            .draw_prompt(&mut self.out, &format!("Stop tracking '{}'? [y/N]", keyword))?;
        self.pending_removal = Some(keyword);
        Ok(())
    }

    async fn confirm_removal(&mut self, keyword: &str, confirmed: bool) -> anyhow::Result<()> {
        match self.keywords.remove(keyword, &confirmed).await {
            Ok(true) => {
                self.notices.info(format!("Stopped tracking '{}'", keyword));
                if self.state.selection.keyword() == Some(keyword) {
                    self.state.selection = Selection::All;
                    self.rebuild_view();
                }
            }
            Ok(false) => {}
            Err(e) => {
                self.notices.error(e.to_string());
            }
        }
        self.draw()
    }

    pub fn toggle_theme(&mut self) -> anyhow::Result<()> {
        match self.theme.toggle() {
            Ok(theme) => {
                self.renderer.apply_theme(theme);
                tracing::info!(theme = %theme, "Theme toggled");
            }
            Err(e) => {
                self.notices.error(format!("Failed to save theme: {}", e));
            }
        }
        self.draw()
    }

    fn rebuild_view(&mut self) {
        let bundle = match self.state.selection.keyword() {
            Some(keyword) => self.cache.get(keyword).cloned(),
            None => Some(self.cache.flattened_bundle()),
        };
        self.view = RenderedView::render(bundle.as_ref(), self.state.filter);
    }

    fn draw_notices(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        self.renderer
            .draw_notifications(&mut self.out, self.notices.active(now))?;
        self.out.flush()?;
        Ok(())
    }

    fn draw(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        self.renderer
            .draw_notifications(&mut self.out, self.notices.active(now))?;

        match self.state.page {
            Page::Dashboard => {
                let header = DashboardHeader {
                    selection: self.state.selection.label(),
                    options: self.cache.keywords(),
                    filter: self.state.filter,
                };
                self.renderer.draw_dashboard(&mut self.out, &header, &self.view)?;
            }
            Page::Keywords => {
                self.renderer
                    .draw_keywords(&mut self.out, self.keywords.keywords())?;
            }
        }

        self.out.flush()?;
        Ok(())
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
