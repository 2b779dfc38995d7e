use super::colors::Rgb;
use super::error::{InnerError, Result};
use super::geometry::{Bounds2D, Idx, Rectangle};
use super::tuxel::Tuxel;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Modifier {
    SetForegroundColor(Rgb),
    SetBackgroundColor(Rgb),
    Bold,
}

/// A 2d grid of `Tuxel`s that screens are drawn onto before being handed to a renderer.
#[derive(Clone, Debug)]
pub(crate) struct Canvas {
    grid: Vec<Vec<Tuxel>>,
    rectangle: Rectangle,
}

impl Canvas {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            grid: vec![vec![Tuxel::default(); width]; height],
            rectangle: Rectangle(Idx(0, 0), Bounds2D(width, height)),
        }
    }

    pub(crate) fn dimensions(&self) -> (usize, usize) {
        (self.rectangle.width(), self.rectangle.height())
    }

    pub(crate) fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Tuxel]> {
        self.grid.iter().map(|row| row.as_slice())
    }

    #[cfg(test)]
    pub(crate) fn get(&self, idx: &Idx) -> Option<&Tuxel> {
        self.grid.get(idx.y()).and_then(|row| row.get(idx.x()))
    }

    fn get_mut(&mut self, idx: &Idx) -> Result<&mut Tuxel> {
        if idx.x() >= self.rectangle.width() {
            return Err(InnerError::OutOfBoundsX(idx.x()).into());
        }
        self.grid
            .get_mut(idx.y())
            .and_then(|row| row.get_mut(idx.x()))
            .ok_or_else(|| InnerError::OutOfBoundsY(idx.y()).into())
    }

    fn tuxels_mut(&mut self, r: &Rectangle) -> Result<impl Iterator<Item = &mut Tuxel>> {
        self.rectangle.contains_or_err(r)?;
        let (x, width) = (r.x(), r.width());
        Ok(self
            .grid
            .iter_mut()
            .skip(r.y())
            .take(r.height())
            .flat_map(move |row| row.iter_mut().skip(x).take(width)))
    }

    pub(crate) fn fill(&mut self, r: &Rectangle, c: char) -> Result<()> {
        for tuxel in self.tuxels_mut(r)? {
            tuxel.set_content(c);
        }
        Ok(())
    }

    pub(crate) fn modify(&mut self, r: &Rectangle, m: Modifier) -> Result<()> {
        for tuxel in self.tuxels_mut(r)? {
            tuxel.modify(&m);
        }
        Ok(())
    }

    /// Draw a double line border along the edge of `r`.
    pub(crate) fn draw_border(&mut self, r: &Rectangle) -> Result<()> {
        self.rectangle.contains_or_err(r)?;
        if r.width() < 2 || r.height() < 2 {
            // a border needs at least two rows and two columns
            return Ok(());
        }
        let box_corner = boxy::Char::upper_left(boxy::Weight::Doubled);
        let box_horizontal: char = boxy::Char::horizontal(boxy::Weight::Doubled).into();
        let box_vertical: char = boxy::Char::vertical(boxy::Weight::Doubled).into();
        let (right, bottom) = (r.x() + r.width() - 1, r.y() + r.height() - 1);

        self.get_mut(&Idx(r.x(), r.y()))?
            .set_content(box_corner.clone().into());
        self.get_mut(&Idx(right, r.y()))?
            .set_content(box_corner.clone().rotate_cw(1).into());
        self.get_mut(&Idx(right, bottom))?
            .set_content(box_corner.clone().rotate_cw(2).into());
        self.get_mut(&Idx(r.x(), bottom))?
            .set_content(box_corner.clone().rotate_ccw(1).into());

        for x in r.x() + 1..right {
            self.get_mut(&Idx(x, r.y()))?.set_content(box_horizontal);
            self.get_mut(&Idx(x, bottom))?.set_content(box_horizontal);
        }
        for y in r.y() + 1..bottom {
            self.get_mut(&Idx(r.x(), y))?.set_content(box_vertical);
            self.get_mut(&Idx(right, y))?.set_content(box_vertical);
        }
        Ok(())
    }

    /// Write `s` on the given row of `r`, starting at its left edge. Text wider than `r` is cut.
    pub(crate) fn write_left(&mut self, r: &Rectangle, row: usize, s: &str) -> Result<()> {
        self.write_at(r, row, 0, s)
    }

    pub(crate) fn write_right(&mut self, r: &Rectangle, row: usize, s: &str) -> Result<()> {
        let len = s.chars().count();
        self.write_at(r, row, r.width().saturating_sub(len), s)
    }

    pub(crate) fn write_center(&mut self, r: &Rectangle, row: usize, s: &str) -> Result<()> {
        let len = s.chars().count();
        let offset = if len >= r.width() {
            0
        } else {
            ((r.width() - len) as f32 / 2.0).ceil() as usize
        };
        self.write_at(r, row, offset, s)
    }

    fn write_at(&mut self, r: &Rectangle, row: usize, offset: usize, s: &str) -> Result<()> {
        if row >= r.height() {
            return Err(InnerError::OutOfBoundsY(r.y() + row).into());
        }
        let y = r.y() + row;
        for (idx, c) in s
            .chars()
            .enumerate()
            .take_while(|(idx, _)| offset + idx < r.width())
        {
            self.get_mut(&Idx(r.x() + offset + idx, y))?.set_content(c);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn row_text(&self, y: usize) -> String {
        self.grid
            .get(y)
            .map(|row| row.iter().map(Tuxel::content).collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn text(&self) -> String {
        (0..self.rectangle.height())
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
