use super::canvas::Modifier;
use super::colors::Rgb;

/// A single terminal cell: one character plus its styling.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Tuxel {
    content: char,
    fgcolor: Option<Rgb>,
    bgcolor: Option<Rgb>,
    bold: bool,
}

impl Default for Tuxel {
    fn default() -> Self {
        Tuxel {
            content: ' ',
            fgcolor: None,
            bgcolor: None,
            bold: false,
        }
    }
}

impl Tuxel {
    pub(crate) fn set_content(&mut self, c: char) {
        self.content = c;
    }

    pub(crate) fn content(&self) -> char {
        self.content
    }

    pub(crate) fn colors(&self) -> (Option<Rgb>, Option<Rgb>) {
        (self.fgcolor, self.bgcolor)
    }

    pub(crate) fn bold(&self) -> bool {
        self.bold
    }

    pub(crate) fn modify(&mut self, m: &Modifier) {
        match m {
            Modifier::SetForegroundColor(rgb) => self.fgcolor = Some(*rgb),
            Modifier::SetBackgroundColor(rgb) => self.bgcolor = Some(*rgb),
            Modifier::Bold => self.bold = true,
        }
    }

    /// Whether two cells can be printed without changing terminal attributes in between.
    pub(crate) fn same_style(&self, other: &Tuxel) -> bool {
        self.colors() == other.colors() && self.bold == other.bold
    }
}
