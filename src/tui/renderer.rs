use super::canvas::Canvas;
use super::error::Result;

pub(crate) trait Renderer {
    /// Current (width, height) of the output in cells.
    fn size_hint(&self) -> Result<(u16, u16)>;
    fn render(&mut self, c: &Canvas) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    /// Give the output back to the user, e.g. after an error.
    fn recover(&mut self) -> Result<()>;
}
