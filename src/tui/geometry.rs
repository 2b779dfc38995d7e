use super::error::{InnerError, Result};

/// Idx encapsulates the x and y coordinates of a cell on the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Idx(pub usize, pub usize);

impl Idx {
    #[inline(always)]
    pub(crate) fn x(&self) -> usize {
        self.0
    }

    #[inline(always)]
    pub(crate) fn y(&self) -> usize {
        self.1
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Bounds2D(pub usize, pub usize);

impl Bounds2D {
    #[inline(always)]
    pub(crate) fn width(&self) -> usize {
        self.0
    }

    #[inline(always)]
    pub(crate) fn height(&self) -> usize {
        self.1
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Rectangle(pub Idx, pub Bounds2D);

impl Rectangle {
    #[inline(always)]
    pub(crate) fn width(&self) -> usize {
        self.1.width()
    }

    #[inline(always)]
    pub(crate) fn height(&self) -> usize {
        self.1.height()
    }

    #[inline(always)]
    pub(crate) fn x(&self) -> usize {
        self.0 .0
    }

    #[inline(always)]
    pub(crate) fn y(&self) -> usize {
        self.0 .1
    }

    /// One past the right and bottom edges.
    #[inline(always)]
    pub(crate) fn extents(&self) -> (usize, usize) {
        (self.x() + self.width(), self.y() + self.height())
    }

    /// The area left once a one cell border is taken off every side.
    pub(crate) fn inner(&self) -> Rectangle {
        Rectangle(
            Idx(self.x() + 1, self.y() + 1),
            Bounds2D(
                self.width().saturating_sub(2),
                self.height().saturating_sub(2),
            ),
        )
    }

    /// Fails unless `other` lies entirely within this rectangle.
    pub(crate) fn contains_or_err(&self, other: &Rectangle) -> Result<()> {
        let (x_extent, y_extent) = other.extents();
        if other.x() < self.x() || x_extent > self.x() + self.width() {
            return Err(InnerError::OutOfBoundsX(x_extent).into());
        }
        if other.y() < self.y() || y_extent > self.y() + self.height() {
            return Err(InnerError::OutOfBoundsY(y_extent).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[test]
    fn inner() {
        let r = Rectangle(Idx(2, 3), Bounds2D(10, 5));
        assert_eq!(r.inner(), Rectangle(Idx(3, 4), Bounds2D(8, 3)));
        let tiny = Rectangle(Idx(0, 0), Bounds2D(1, 1));
        assert_eq!(tiny.inner().1, Bounds2D(0, 0));
    }

    #[test]
    fn rectangle_reads_its_bounds() {
        let r = Rectangle(Idx(2, 3), Bounds2D(10, 5));
        assert_eq!((r.width(), r.height()), (r.1.width(), r.1.height()));
        assert_eq!((r.x(), r.y()), (2, 3));
        assert_eq!(r.extents(), (12, 8));
    }

    #[rstest]
    #[case::same(Rectangle(Idx(0, 0), Bounds2D(10, 10)), true)]
    #[case::inside(Rectangle(Idx(2, 2), Bounds2D(3, 3)), true)]
    #[case::touching_edge(Rectangle(Idx(5, 5), Bounds2D(5, 5)), true)]
    #[case::too_wide(Rectangle(Idx(5, 0), Bounds2D(6, 1)), false)]
    #[case::too_tall(Rectangle(Idx(0, 9), Bounds2D(1, 2)), false)]
    fn contains(#[case] other: Rectangle, #[case] expected: bool) {
        let outer = Rectangle(Idx(0, 0), Bounds2D(10, 10));
        assert_eq!(outer.contains_or_err(&other).is_ok(), expected);
    }
}
