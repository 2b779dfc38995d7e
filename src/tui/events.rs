use super::error::Result;

pub(crate) trait EventSource {
    fn next_event(&mut self) -> Result<Event>;
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    UserInput(UserInput),
    Resize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum UserInput {
    /// A direction code: 0 up, 1 right, 2 down, 3 left.
    Move(u8),
    Restart,
    Undo,
    KeepPlaying,
    NextScreen,
    Screen(Screen),
    ResetStats,
    Quit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum Screen {
    #[default]
    Game,
    Instructions,
    Stats,
}

impl Screen {
    pub(crate) fn next(self) -> Screen {
        match self {
            Screen::Game => Screen::Instructions,
            Screen::Instructions => Screen::Stats,
            Screen::Stats => Screen::Game,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn screens_cycle() {
        let first = Screen::default();
        assert_eq!(first, Screen::Game);
        assert_eq!(first.next(), Screen::Instructions);
        assert_eq!(first.next().next(), Screen::Stats);
        assert_eq!(first.next().next().next(), Screen::Game);
    }
}
