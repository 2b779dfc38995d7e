use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event as CrossTermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style, terminal, ExecutableCommand, QueueableCommand,
};

use super::canvas::Canvas;
use super::error::Result;
use super::events::{Event, EventSource, Screen, UserInput};
use super::renderer::Renderer;
use super::tuxel::Tuxel;

pub(crate) struct Crossterm<T: Write> {
    w: Box<T>,
    active: bool,
}

impl<T: Write> Crossterm<T> {
    pub(crate) fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w, active: true })
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.w.execute(style::ResetColor)?;
        self.w.execute(cursor::Show)?;
        self.w.execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn queue_style(&mut self, tuxel: &Tuxel) -> Result<()> {
        self.w.queue(style::SetAttribute(style::Attribute::Reset))?;
        self.w.queue(style::ResetColor)?;
        let (fg, bg) = tuxel.colors();
        if let Some(fg) = fg {
            self.w.queue(style::SetForegroundColor(fg.into()))?;
        }
        if let Some(bg) = bg {
            self.w.queue(style::SetBackgroundColor(bg.into()))?;
        }
        if tuxel.bold() {
            self.w.queue(style::SetAttribute(style::Attribute::Bold))?;
        }
        Ok(())
    }
}

impl<T: Write> Drop for Crossterm<T> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}

impl<T: Write> Renderer for Crossterm<T> {
    fn size_hint(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn render(&mut self, c: &Canvas) -> Result<()> {
        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        for (y, row) in c.rows().enumerate() {
            self.w.queue(cursor::MoveTo(0, y as u16))?;
            let mut previous: Option<&Tuxel> = None;
            for tuxel in row {
                if !previous.is_some_and(|p| p.same_style(tuxel)) {
                    self.queue_style(tuxel)?;
                }
                self.w.queue(style::Print(tuxel.content()))?;
                previous = Some(tuxel);
            }
        }
        self.w.queue(style::SetAttribute(style::Attribute::Reset))?;
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;
        self.w.flush()?;
        Ok(())
    }

    fn recover(&mut self) -> Result<()> {
        self.restore()
    }
}

pub(crate) struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    /// Block until the next event the application cares about.
    fn next_event(&mut self) -> Result<Event> {
        loop {
            match event::read()? {
                CrossTermEvent::Key(ke) => match handle_key_event(ke) {
                    Some(input) => return Ok(Event::UserInput(input)),
                    None => continue,
                },
                CrossTermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            };
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    if ke.kind == KeyEventKind::Release {
        return None;
    }
    if ke.modifiers.contains(KeyModifiers::CONTROL) {
        return match ke.code {
            KeyCode::Char('c') => Some(UserInput::Quit),
            _ => None,
        };
    }
    match ke.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(UserInput::Move(0)),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(UserInput::Move(1)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(UserInput::Move(2)),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(UserInput::Move(3)),
        KeyCode::Char('r') | KeyCode::Char('n') => Some(UserInput::Restart),
        KeyCode::Char('u') => Some(UserInput::Undo),
        KeyCode::Char('c') => Some(UserInput::KeepPlaying),
        KeyCode::Char('x') => Some(UserInput::ResetStats),
        KeyCode::Tab => Some(UserInput::NextScreen),
        KeyCode::Char('1') => Some(UserInput::Screen(Screen::Game)),
        KeyCode::Char('2') => Some(UserInput::Screen(Screen::Instructions)),
        KeyCode::Char('3') => Some(UserInput::Screen(Screen::Stats)),
        KeyCode::Char('q') | KeyCode::Esc => Some(UserInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::arrow_up(KeyCode::Up, UserInput::Move(0))]
    #[case::vim_right(KeyCode::Char('l'), UserInput::Move(1))]
    #[case::wasd_down(KeyCode::Char('s'), UserInput::Move(2))]
    #[case::arrow_left(KeyCode::Left, UserInput::Move(3))]
    #[case::wasd_left(KeyCode::Char('a'), UserInput::Move(3))]
    #[case::new_game(KeyCode::Char('n'), UserInput::Restart)]
    #[case::undo(KeyCode::Char('u'), UserInput::Undo)]
    #[case::keep_playing(KeyCode::Char('c'), UserInput::KeepPlaying)]
    #[case::tab(KeyCode::Tab, UserInput::NextScreen)]
    #[case::stats(KeyCode::Char('3'), UserInput::Screen(Screen::Stats))]
    #[case::reset(KeyCode::Char('x'), UserInput::ResetStats)]
    #[case::escape(KeyCode::Esc, UserInput::Quit)]
    fn key_mapping(#[case] code: KeyCode, #[case] expected: UserInput) {
        let ke = KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(handle_key_event(ke), Some(expected));
    }

    #[test]
    fn ctrl_c_quits() {
        let ke = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ke), Some(UserInput::Quit));
    }

    #[test]
    fn unmapped_and_released_keys_are_ignored() {
        let ke = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(ke), None);

        let ke = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(handle_key_event(ke), None);
    }
}
