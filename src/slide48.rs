use crate::engine::game::{Game, Status};
use crate::engine::grid::Position;
use crate::engine::tile::{Score, Value};
use crate::error::Result;
use crate::tui::canvas::{Canvas, Modifier};
use crate::tui::colors::{board_background, board_foreground, colors_from_value, empty_slot};
use crate::tui::error::Result as TuiResult;
use crate::tui::events::{Event, EventSource, Screen, UserInput};
use crate::tui::geometry::{Bounds2D, Idx, Rectangle};
use crate::tui::renderer::Renderer;

/// Game screen layout, for a 4x4 board:
///
///  slide48        ╔════════════╗╔════════════╗
///                 ║SCORE     16║║BEST      64║
///                 ╚════════════╝╚════════════╝
///  ╔══════════════════════════════════════╗
///  ║                                      ║
///  ║  xxxxxxx  xxxxxxx  xxxxxxx  xxxxxxx  ║
///  ║  xxxxxxx  xxxxxxx  xxxxxxx  xxxxxxx  ║
///  ║  xxxxxxx  xxxxxxx  xxxxxxx  xxxxxxx  ║
///  ║                                      ║
///  ║  ...                                 ║
///  ╚══════════════════════════════════════╝
///  move: arrows wasd hjkl
///  u undo  r new  tab/1-3 screens  q quit
const HEADER_HEIGHT: usize = 3;
const BOARD_X: usize = 1;
const BOARD_BORDER_WIDTH: usize = 1;
const BOARD_X_PADDING: usize = 2;
const BOARD_Y_PADDING: usize = 1;
const TILE_WIDTH: usize = 7;
const TILE_HEIGHT: usize = 3;
const SCORE_BOX_WIDTH: usize = 14;
const OVERLAY_MAX_HEIGHT: usize = 7;
const MIN_CONTENT_WIDTH: usize = 38;
const TEXT_MAX_WIDTH: usize = 72;

const TITLE: &str = "slide48";
const FOOTER: [&str; 2] = [
    "move: arrows wasd hjkl",
    "u undo  r new  tab/1-3 screens  q quit",
];
const NAVIGATION: &str = "tab/1-3 screens  q quit";

fn board_width(size: usize) -> usize {
    2 * BOARD_BORDER_WIDTH + BOARD_X_PADDING + size * (TILE_WIDTH + BOARD_X_PADDING)
}

fn board_height(size: usize) -> usize {
    2 * BOARD_BORDER_WIDTH + BOARD_Y_PADDING + size * (TILE_HEIGHT + BOARD_Y_PADDING)
}

fn content_width(size: usize) -> usize {
    board_width(size).max(MIN_CONTENT_WIDTH)
}

/// The smallest (width, height) that fits the game screen for a board of the given size.
pub(crate) fn required_size(size: usize) -> (usize, usize) {
    (
        BOARD_X + content_width(size),
        HEADER_HEIGHT + board_height(size) + FOOTER.len(),
    )
}

fn board_rectangle(size: usize) -> Rectangle {
    Rectangle(
        Idx(BOARD_X, HEADER_HEIGHT),
        Bounds2D(board_width(size), board_height(size)),
    )
}

/// Where the tile at `pos` (row `x`, column `y`) is drawn.
fn tile_rectangle(pos: &Position) -> Rectangle {
    let x_offset = BOARD_X + BOARD_BORDER_WIDTH + BOARD_X_PADDING;
    let y_offset = HEADER_HEIGHT + BOARD_BORDER_WIDTH + BOARD_Y_PADDING;
    Rectangle(
        Idx(
            x_offset + (TILE_WIDTH + BOARD_X_PADDING) * pos.y as usize,
            y_offset + (TILE_HEIGHT + BOARD_Y_PADDING) * pos.x as usize,
        ),
        Bounds2D(TILE_WIDTH, TILE_HEIGHT),
    )
}

fn draw_score_box(canvas: &mut Canvas, x: usize, label: &str, value: Score) -> TuiResult<()> {
    let r = Rectangle(Idx(x, 0), Bounds2D(SCORE_BOX_WIDTH, HEADER_HEIGHT));
    canvas.modify(&r, Modifier::SetBackgroundColor(board_background()))?;
    canvas.modify(&r, Modifier::SetForegroundColor(board_foreground()))?;
    canvas.draw_border(&r)?;
    let inner = r.inner();
    canvas.write_left(&inner, 0, label)?;
    canvas.write_right(&inner, 0, &value.to_string())?;
    Ok(())
}

fn draw_header(canvas: &mut Canvas, game: &Game) -> TuiResult<()> {
    let width = content_width(game.state().size);
    let title = Rectangle(Idx(BOARD_X, 1), Bounds2D(TITLE.len(), 1));
    canvas.write_left(&title, 0, TITLE)?;
    canvas.modify(&title, Modifier::Bold)?;

    let best_x = BOARD_X + width - SCORE_BOX_WIDTH;
    let score_x = best_x - SCORE_BOX_WIDTH;
    draw_score_box(canvas, score_x, "SCORE", game.state().score)?;
    draw_score_box(canvas, best_x, "BEST", game.state().best_score)?;
    Ok(())
}

fn draw_board(canvas: &mut Canvas, game: &Game) -> TuiResult<()> {
    let size = game.state().size;
    let board = board_rectangle(size);
    canvas.modify(&board, Modifier::SetBackgroundColor(board_background()))?;
    canvas.modify(&board, Modifier::SetForegroundColor(board_foreground()))?;
    canvas.draw_border(&board)?;

    for x in 0..size as isize {
        for y in 0..size as isize {
            let pos = Position::new(x, y);
            let r = tile_rectangle(&pos);
            match game.state().grid.cell_content(&pos) {
                Some(tile) => {
                    let colors = colors_from_value(tile.value);
                    canvas.modify(&r, Modifier::SetBackgroundColor(colors.background))?;
                    canvas.modify(&r, Modifier::SetForegroundColor(colors.foreground))?;
                    if tile.is_new || tile.is_merged {
                        canvas.modify(&r, Modifier::Bold)?;
                    }
                    canvas.write_center(&r, TILE_HEIGHT / 2, &tile.value.to_string())?;
                }
                None => canvas.modify(&r, Modifier::SetBackgroundColor(empty_slot()))?,
            }
        }
    }
    Ok(())
}

fn draw_overlay(canvas: &mut Canvas, game: &Game) -> TuiResult<()> {
    let (message, actions) = match game.state().status() {
        Status::Over => ("Game Over!", "u undo   r try again"),
        Status::Won {
            keep_playing: false,
        } => ("You Win!", "c keep going   u undo   r try again"),
        _ => return Ok(()),
    };
    let board = board_rectangle(game.state().size);
    let height = (board.height() - 4).min(OVERLAY_MAX_HEIGHT);
    let r = Rectangle(
        Idx(board.x() + 2, board.y() + (board.height() - height) / 2),
        Bounds2D(board.width() - 4, height),
    );
    canvas.fill(&r, ' ')?;
    canvas.modify(&r, Modifier::SetBackgroundColor(board_foreground()))?;
    canvas.modify(&r, Modifier::SetForegroundColor(board_background()))?;
    canvas.draw_border(&r)?;

    let inner = r.inner();
    canvas.write_center(&inner, 1, message)?;
    let lines = textwrap::wrap(actions, inner.width().saturating_sub(2));
    for (row, line) in (3..inner.height()).zip(lines.iter()) {
        canvas.write_center(&inner, row, line)?;
    }
    Ok(())
}

fn draw_footer(canvas: &mut Canvas, game: &Game) -> TuiResult<()> {
    let size = game.state().size;
    let r = Rectangle(
        Idx(BOARD_X, HEADER_HEIGHT + board_height(size)),
        Bounds2D(content_width(size), FOOTER.len()),
    );
    for (row, line) in FOOTER.iter().enumerate() {
        canvas.write_left(&r, row, line)?;
    }
    Ok(())
}

fn draw_game(canvas: &mut Canvas, game: &Game) -> TuiResult<()> {
    draw_header(canvas, game)?;
    draw_board(canvas, game)?;
    draw_overlay(canvas, game)?;
    draw_footer(canvas, game)
}

/// Print as many of `lines` as fit in `r`, starting at `row`. Returns the next free row.
fn write_lines<S: AsRef<str>>(
    canvas: &mut Canvas,
    r: &Rectangle,
    row: usize,
    lines: &[S],
) -> TuiResult<usize> {
    let mut next = row;
    for line in lines {
        if next >= r.height() {
            break;
        }
        canvas.write_left(r, next, line.as_ref())?;
        next += 1;
    }
    Ok(next)
}

/// The full width area with a two cell margin on each side, minus the navigation row.
fn text_area(canvas: &Canvas) -> Rectangle {
    let (width, height) = canvas.dimensions();
    Rectangle(
        Idx(2.min(width), 0),
        Bounds2D(width.saturating_sub(4), height.saturating_sub(1)),
    )
}

fn draw_navigation(canvas: &mut Canvas) -> TuiResult<()> {
    let (width, height) = canvas.dimensions();
    if height == 0 {
        return Ok(());
    }
    let r = Rectangle(Idx(0, height - 1), Bounds2D(width, 1));
    canvas.write_center(&r, 0, NAVIGATION)
}

fn draw_title(canvas: &mut Canvas, r: &Rectangle, title: &str) -> TuiResult<()> {
    if r.height() == 0 {
        return Ok(());
    }
    canvas.write_center(r, 0, title)?;
    let title_row = Rectangle(Idx(r.x(), r.y()), Bounds2D(r.width(), 1));
    canvas.modify(&title_row, Modifier::Bold)
}

fn instructions(target: Value) -> Vec<(&'static str, Vec<String>)> {
    vec![
        (
            "Goal",
            vec![format!(
                "Combine tiles with the same numbers to create a tile with the number {target}!"
            )],
        ),
        (
            "How to Play",
            vec![
                "Use the arrow keys, w a s d, or h j k l to move all tiles in that direction."
                    .to_string(),
                "Tiles with the same number combine into one when they touch.".to_string(),
            ],
        ),
        (
            "Scoring",
            vec![
                "Each time two tiles combine, you earn points equal to the value of the new tile."
                    .to_string(),
                "Try to get the highest score possible!".to_string(),
            ],
        ),
        (
            "Controls",
            vec![
                "- Press u to reverse your last move".to_string(),
                "- Press r or n to start a new game".to_string(),
                "- Press tab, or 1 2 3, to switch screens".to_string(),
                "- Press q to quit".to_string(),
            ],
        ),
        (
            "Tips",
            vec![
                "- Try to keep your highest tiles in one corner".to_string(),
                "- Plan several moves ahead".to_string(),
                "- Don't let your grid fill up without a plan".to_string(),
            ],
        ),
        (
            "Winning",
            vec![format!(
                "When you create a {target} tile, you win! Press c to keep playing for even higher scores and tiles."
            )],
        ),
    ]
}

fn draw_instructions(canvas: &mut Canvas, game: &Game) -> TuiResult<()> {
    let r = text_area(canvas);
    draw_title(canvas, &r, "How to Play")?;
    let wrap_width = r.width().min(TEXT_MAX_WIDTH).max(1);
    let mut row = 2;
    for (heading, paragraphs) in instructions(game.config().target) {
        if row < r.height() {
            let heading_row = Rectangle(Idx(r.x(), r.y() + row), Bounds2D(r.width(), 1));
            canvas.modify(&heading_row, Modifier::Bold)?;
        }
        row = write_lines(canvas, &r, row, &[heading])?;
        for paragraph in paragraphs {
            let lines = textwrap::wrap(&paragraph, wrap_width);
            row = write_lines(canvas, &r, row, &lines)?;
        }
        row += 1;
    }
    draw_navigation(canvas)
}

fn draw_stats(canvas: &mut Canvas, game: &Game) -> TuiResult<()> {
    let r = text_area(canvas);
    draw_title(canvas, &r, "Game Statistics")?;
    let lines = [
        format!("Best Score    {0}", game.stats().best_score()),
        format!("Games Played  {0}", game.stats().games_played()),
        String::new(),
        "x reset statistics".to_string(),
    ];
    write_lines(canvas, &r, 2, &lines)?;
    draw_navigation(canvas)
}

fn draw_too_small(canvas: &mut Canvas, needed: (usize, usize)) -> TuiResult<()> {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return Ok(());
    }
    let message = format!(
        "terminal too small: the game needs {0}x{1} but has {width}x{height}. resize it, switch screens with tab, or press q to quit",
        needed.0, needed.1
    );
    let lines = textwrap::wrap(&message, width);
    let r = canvas.rectangle().clone();
    write_lines(canvas, &r, 0, &lines)?;
    Ok(())
}

/// Slide48 owns the game, draws the current screen and feeds it player input.
pub(crate) struct Slide48<R: Renderer, E: EventSource> {
    game: Game,
    renderer: R,
    event_source: E,
    screen: Screen,
}

impl<R: Renderer, E: EventSource> Slide48<R, E> {
    pub(crate) fn new(game: Game, renderer: R, event_source: E) -> Self {
        Self {
            game,
            renderer,
            event_source,
            screen: Screen::default(),
        }
    }

    /// Run consumes the Slide48 instance and plays until the player quits.
    pub(crate) fn run(mut self) -> Result<()> {
        match self.inner_run() {
            Err(e) => {
                if let Err(re) = self.renderer.recover() {
                    log::error!("failed to recover terminal: {re}");
                }
                Err(e)
            }
            Ok(_) => Ok(()),
        }
    }

    fn inner_run(&mut self) -> Result<()> {
        loop {
            self.draw()?;
            let event = self.event_source.next_event()?;
            if !self.handle(event)? {
                break;
            }
        }
        log::info!("quitting with score {0}", self.game.state().score);
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let (width, height) = self.renderer.size_hint()?;
        let mut canvas = Canvas::new(width as usize, height as usize);
        match self.screen {
            Screen::Game => {
                let needed = required_size(self.game.state().size);
                if (width as usize) < needed.0 || (height as usize) < needed.1 {
                    draw_too_small(&mut canvas, needed)?;
                } else {
                    draw_game(&mut canvas, &self.game)?;
                }
            }
            Screen::Instructions => draw_instructions(&mut canvas, &self.game)?,
            Screen::Stats => draw_stats(&mut canvas, &self.game)?,
        }
        self.renderer.render(&canvas)?;
        Ok(())
    }

    /// Apply one event. Returns false once the player asks to quit.
    fn handle(&mut self, event: Event) -> Result<bool> {
        let input = match event {
            Event::Resize => {
                self.renderer.clear()?;
                return Ok(true);
            }
            Event::UserInput(input) => input,
        };
        match input {
            UserInput::Move(code) if self.screen == Screen::Game => {
                let turn = self.game.shift(code);
                log::debug!("move {code}: {turn:?}");
            }
            UserInput::Move(code) => log::debug!("ignoring move {code} on {0:?}", self.screen),
            UserInput::Restart => {
                self.game.restart();
                self.screen = Screen::Game;
            }
            UserInput::Undo => {
                self.game.undo();
            }
            UserInput::KeepPlaying => {
                self.game.keep_playing();
            }
            UserInput::NextScreen => self.screen = self.screen.next(),
            UserInput::Screen(screen) => self.screen = screen,
            UserInput::ResetStats if self.screen == Screen::Stats => {
                self.game.stats_mut().reset()
            }
            UserInput::ResetStats => log::debug!("ignoring reset on {0:?}", self.screen),
            UserInput::Quit => return Ok(false),
        }
        Ok(true)
    }
}
