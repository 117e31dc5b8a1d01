use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Attribute, SetAttribute},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::test_mode::{self, MenuTestEvent};

/// A single-choice menu shown below an optional block of context text.
#[derive(Clone, Debug)]
pub struct MenuUI {
    pub title: String,
    pub context: Option<String>,
    pub items: Vec<MenuUIItem>,
    pub initial_index: Option<usize>,
}

impl MenuUI {
    pub fn new(title: impl Into<String>, items: Vec<MenuUIItem>) -> Self {
        Self {
            title: title.into(),
            context: None,
            items,
            initial_index: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = Some(index);
        self
    }

    fn start_index(&self) -> usize {
        self.initial_index
            .unwrap_or(0)
            .min(self.items.len().saturating_sub(1))
    }

    fn label_width(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug)]
pub struct MenuUIItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

impl MenuUIItem {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
pub enum MenuRenderError {
    Interrupted,
    EndOfInput,
    Io(io::Error),
}

impl From<io::Error> for MenuRenderError {
    fn from(err: io::Error) -> Self {
        MenuRenderError::Io(err)
    }
}

#[derive(Default)]
pub struct MenuRenderer {
    formatter: Formatter,
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self {
            formatter: Formatter::new(),
        }
    }

    /// Returns the selected item key, or `None` when the menu was dismissed.
    pub fn show(&self, menu: &MenuUI) -> Result<Option<String>, MenuRenderError> {
        if menu.items.is_empty() {
            return Ok(None);
        }

        if let Some(events) = test_mode::next_menu_events(&menu.title) {
            return Ok(self.show_with_script(menu, events));
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        let hidden = stdout.execute(cursor::Hide).map(|_| ());
        let result = match hidden {
            Ok(()) => self.select(&mut stdout, menu, event::read),
            Err(err) => Err(err.into()),
        };

        let clear_status = self.clear_screen(&mut stdout);
        stdout.execute(cursor::Show).ok();
        terminal::disable_raw_mode().ok();
        clear_status?;

        result
    }

    /// Key loop of the interactive menu. Every failure is returned so the
    /// caller can restore the terminal.
    fn select<W, R>(
        &self,
        out: &mut W,
        menu: &MenuUI,
        mut read_event: R,
    ) -> Result<Option<String>, MenuRenderError>
    where
        W: Write,
        R: FnMut() -> io::Result<Event>,
    {
        let len = menu.items.len();
        let mut selected = menu.start_index();

        loop {
            if let Err(err) = self.render(out, menu, selected) {
                break Err(err.into());
            }
            let event = match read_event() {
                Ok(event) => event,
                Err(err) => break Err(err.into()),
            };
            let Event::Key(key) = event else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        break Err(MenuRenderError::Interrupted)
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') => {
                        break Err(MenuRenderError::EndOfInput)
                    }
                    _ => continue,
                }
            }
            match key.code {
                KeyCode::Up => selected = selected.checked_sub(1).unwrap_or(len - 1),
                KeyCode::Down => selected = (selected + 1) % len,
                KeyCode::Home => selected = 0,
                KeyCode::End => selected = len - 1,
                KeyCode::Enter => break Ok(Some(menu.items[selected].key.clone())),
                KeyCode::Esc => break Ok(None),
                _ => {}
            }
        }
    }

    fn show_with_script(&self, menu: &MenuUI, events: Vec<MenuTestEvent>) -> Option<String> {
        let len = menu.items.len();
        let mut selected = menu.start_index();
        for event in events {
            match event {
                MenuTestEvent::Up => selected = selected.checked_sub(1).unwrap_or(len - 1),
                MenuTestEvent::Down => selected = (selected + 1) % len,
                MenuTestEvent::Home => selected = 0,
                MenuTestEvent::End => selected = len - 1,
                MenuTestEvent::Enter => {
                    self.print_snapshot(menu, selected);
                    return Some(menu.items[selected].key.clone());
                }
                MenuTestEvent::Esc => {
                    self.print_snapshot(menu, selected);
                    return None;
                }
            }
        }
        self.print_snapshot(menu, selected);
        panic!(
            "Scripted menu events must end with ENTER or ESC for `{}`",
            menu.title
        );
    }

    fn lines(&self, menu: &MenuUI, selected: usize) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(context) = &menu.context {
            lines.push(self.formatter.detail_text(context));
            lines.push(String::new());
        }
        lines.push(self.formatter.header_text(&menu.title));
        lines.push(String::new());
        let width = menu.label_width();
        for (index, item) in menu.items.iter().enumerate() {
            let pointer = if index == selected {
                self.formatter.pointer()
            } else {
                " "
            };
            let row = self
                .formatter
                .format_two_column_row(&item.label, &item.description, width);
            lines.push(format!(" {pointer} {row}"));
        }
        lines.push(String::new());
        lines.push(self.formatter.navigation_hint());
        lines
    }

    fn print_snapshot(&self, menu: &MenuUI, selected: usize) {
        for line in self.lines(menu, selected) {
            println!("{line}");
        }
    }

    fn render<W: Write>(&self, stdout: &mut W, menu: &MenuUI, selected: usize) -> io::Result<()> {
        self.clear_screen(stdout)?;
        let header_rows = if menu.context.is_some() { 4 } else { 2 };
        let highlighted = header_rows + selected;
        for (row, line) in self.lines(menu, selected).iter().enumerate() {
            if row == highlighted {
                stdout.execute(SetAttribute(Attribute::Reverse))?;
            }
            // Raw mode needs explicit carriage returns.
            write!(stdout, "{}\r\n", line.replace('\n', "\r\n"))?;
            stdout.execute(SetAttribute(Attribute::Reset))?;
        }
        stdout.flush()
    }

    fn clear_screen<W: Write>(&self, stdout: &mut W) -> io::Result<()> {
        stdout.execute(terminal::Clear(ClearType::All))?;
        stdout.execute(cursor::MoveTo(0, 0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> MenuUI {
        MenuUI::new(
            "Release",
            vec![
                MenuUIItem::new("a", "Alpha", ""),
                MenuUIItem::new("b", "Beta", "second"),
            ],
        )
        .with_context("ctx")
    }

    #[test]
    fn initial_index_is_clamped() {
        assert_eq!(menu().with_initial_index(9).start_index(), 1);
    }

    #[test]
    fn lines_place_context_above_title() {
        let renderer = MenuRenderer::new();
        let lines = renderer.lines(&menu(), 1);
        assert_eq!(lines[0], "ctx");
        assert!(lines[2].contains("Release"));
        assert!(lines[5].ends_with("Beta     second"));
        assert!(lines[5].starts_with(&format!(" {} ", renderer.formatter.pointer())));
    }

    #[test]
    fn read_failure_is_returned_from_key_loop() {
        let renderer = MenuRenderer::new();
        let mut out = Vec::new();
        let result = renderer.select(&mut out, &menu(), || {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        });
        assert!(matches!(result, Err(MenuRenderError::Io(_))));
        assert!(!out.is_empty());
    }

    #[test]
    fn key_loop_moves_and_selects() {
        use crossterm::event::KeyEvent;

        let renderer = MenuRenderer::new();
        let mut keys = vec![KeyCode::Down, KeyCode::Enter].into_iter();
        let mut out = Vec::new();
        let result = renderer.select(&mut out, &menu(), || {
            let code = keys.next().unwrap_or(KeyCode::Esc);
            Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        });
        assert_eq!(result.unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn scripted_events_wrap_around() {
        let renderer = MenuRenderer::new();
        let chosen = renderer.show_with_script(
            &menu(),
            vec![MenuTestEvent::Up, MenuTestEvent::Up, MenuTestEvent::Enter],
        );
        assert_eq!(chosen.as_deref(), Some("a"));
    }
}
