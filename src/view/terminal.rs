//! Terminal rendering adapter.
//!
//! Writes views as plain text with optional ANSI colours. Nothing here
//! decides *what* to show; that comes from [`RenderedView`] and the presenter.

use super::model::RenderedView;
use crate::content::{ContentItem, ContentType, TypeFilter};
use crate::notifications::{Level, Notification};
use crate::theme::Theme;
use std::borrow::Cow;
use std::io::{self, Write};

/// Make server-supplied text safe to print
///
/// Whitespace controls become a space; every other control character,
/// including ESC and BEL, is dropped so text cannot drive the terminal.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .filter_map(|c| match c {
                '\n' | '\r' | '\t' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect(),
    )
}

/// ANSI escape sequences for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub video: &'static str,
    pub news: &'static str,
    pub error: &'static str,
    pub info: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: "\x1b[1;96m",
                muted: "\x1b[90m",
                video: "\x1b[91m",
                news: "\x1b[94m",
                error: "\x1b[1;31m",
                info: "\x1b[32m",
                reset: "\x1b[0m",
            },
            Theme::Light => Self {
                accent: "\x1b[1;34m",
                muted: "\x1b[2m",
                video: "\x1b[31m",
                news: "\x1b[34m",
                error: "\x1b[1;31m",
                info: "\x1b[32m",
                reset: "\x1b[0m",
            },
        }
    }

    /// No escape codes at all
    pub fn plain() -> Self {
        Self {
            accent: "",
            muted: "",
            video: "",
            news: "",
            error: "",
            info: "",
            reset: "",
        }
    }

    fn badge(&self, kind: ContentType) -> &'static str {
        match kind {
            ContentType::Video => self.video,
            ContentType::News => self.news,
            ContentType::Unknown => self.muted,
        }
    }
}

/// Dashboard header contents
#[derive(Debug, Clone)]
pub struct DashboardHeader<'a> {
    /// Label of the current selection ("All" or a keyword)
    pub selection: &'a str,
    /// Keywords the user can switch to
    pub options: Vec<&'a str>,
    pub filter: TypeFilter,
}

#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    palette: Palette,
    color: bool,
}

impl TerminalRenderer {
    pub fn new(theme: Theme, color: bool) -> Self {
        let palette = if color {
            Palette::for_theme(theme)
        } else {
            Palette::plain()
        };
        Self { palette, color }
    }

    /// Switch palettes after a theme toggle
    pub fn apply_theme(&mut self, theme: Theme) {
        if self.color {
            self.palette = Palette::for_theme(theme);
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn draw_loading(&self, out: &mut impl Write) -> io::Result<()> {
        let p = &self.palette;
        writeln!(out, "{}Loading...{}", p.muted, p.reset)
    }

    pub fn draw_dashboard(
        &self,
        out: &mut impl Write,
        header: &DashboardHeader<'_>,
        view: &RenderedView,
    ) -> io::Result<()> {
        let p = &self.palette;

        writeln!(out)?;
        writeln!(
            out,
            "{}== Dashboard: {} =={}  filter: {}",
            p.accent,
            sanitize(header.selection),
            p.reset,
            header.filter
        )?;
        if !header.options.is_empty() {
            let options: Vec<_> = header.options.iter().map(|o| sanitize(o)).collect();
            writeln!(
                out,
                "{}keywords: all, {}{}",
                p.muted,
                options.join(", "),
                p.reset
            )?;
        }
        writeln!(out)?;

        if view.is_empty_state() {
            writeln!(out, "{}No content yet.{}", p.muted, p.reset)?;
            writeln!(
                out,
                "{}Try another filter or `refresh` to collect new content.{}",
                p.muted, p.reset
            )?;
            return Ok(());
        }

        for (index, item) in view.visible().enumerate() {
            self.draw_card(out, index + 1, item)?;
        }
        writeln!(
            out,
            "{}{} of {} items shown{}",
            p.muted,
            view.visible_count(),
            view.len(),
            p.reset
        )
    }

    fn draw_card(&self, out: &mut impl Write, number: usize, item: &ContentItem) -> io::Result<()> {
        let p = &self.palette;
        writeln!(
            out,
            "{:>3}. {}[{}]{} {}",
            number,
            p.badge(item.kind),
            item.kind.badge(),
            p.reset,
            sanitize(&item.title)
        )?;

        let source = sanitize(item.source_label());
        let published = sanitize(item.published_at_formatted.as_deref().unwrap_or(""));
        if published.is_empty() {
            writeln!(out, "     {}{}{}", p.muted, source, p.reset)?;
        } else {
            writeln!(
                out,
                "     {}{} · {}{}",
                p.muted,
                source,
                published,
                p.reset
            )?;
        }
        writeln!(out, "     {}", sanitize(&item.url))
    }

    pub fn draw_keywords(&self, out: &mut impl Write, keywords: &[String]) -> io::Result<()> {
        let p = &self.palette;

        writeln!(out)?;
        writeln!(out, "{}== Tracked keywords =={}", p.accent, p.reset)?;
        writeln!(out)?;

        if keywords.is_empty() {
            writeln!(out, "{}No keywords tracked.{}", p.muted, p.reset)?;
            writeln!(out, "{}Use `add <keyword>` to start tracking.{}", p.muted, p.reset)?;
            return Ok(());
        }

        for (index, keyword) in keywords.iter().enumerate() {
            writeln!(out, "{:>3}. {}", index + 1, sanitize(keyword))?;
        }
        Ok(())
    }

    pub fn draw_notifications<'a>(
        &self,
        out: &mut impl Write,
        notices: impl IntoIterator<Item = &'a Notification>,
    ) -> io::Result<()> {
        let p = &self.palette;
        for notice in notices {
            let (color, marker) = match notice.level {
                Level::Info => (p.info, "✓"),
                Level::Error => (p.error, "✕"),
            };
            writeln!(out, "{}{} {}{}", color, marker, sanitize(&notice.message), p.reset)?;
        }
        Ok(())
    }

    pub fn draw_prompt(&self, out: &mut impl Write, text: &str) -> io::Result<()> {
        let p = &self.palette;
        writeln!(out, "{}{}{}", p.accent, text, p.reset)
    }

    pub fn draw_help(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "\
Commands:
  refresh | r               collect fresh content for the current view
  all                       show every keyword
  show <keyword>            show one keyword
  filter <all|news|video>   filter the current view
  dashboard | d             content view
  keywords | k              keyword management view
  add <keyword>             track a keyword
  remove | rm <keyword>     stop tracking a keyword
  theme | t                 toggle light/dark
  status                    log service status
  help | ?                  this help
  quit | q                  exit"
        )
    }
}
