/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The renderer only reads game state. Which object a scene cell shows is
/// decided by `Layout::object_at`, the same query the input adapter uses
/// for clicks.

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::geometry::{GeometryCatalog, ObjectId, Point, Rect, Room, LION_HEAD};
use crate::domain::puzzle::{BlockColor, InputMode, PuzzleState};
use crate::sim::transition::Outcome;
use super::layout::Layout;

// ── Palette ──

const WHITE: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const GRAY: Color = Color::Rgb { r: 200, g: 200, b: 200 };
const BROWN: Color = Color::Rgb { r: 139, g: 69, b: 19 };
const DARK_BROWN: Color = Color::Rgb { r: 101, g: 67, b: 33 };
const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const GREEN: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const BLUE: Color = Color::Rgb { r: 0, g: 0, b: 255 };
const YELLOW: Color = Color::Rgb { r: 255, g: 255, b: 0 };
const DARK_BLUE: Color = Color::Rgb { r: 0, g: 0, b: 139 };
const LIGHT_BLUE: Color = Color::Rgb { r: 100, g: 100, b: 255 };
const SHADOW_BLUE: Color = Color::Rgb { r: 0, g: 0, b: 100 };
const DARK_GREEN: Color = Color::Rgb { r: 0, g: 100, b: 0 };
const LION: Color = Color::Rgb { r: 200, g: 150, b: 100 };
const MANE: Color = Color::Rgb { r: 150, g: 100, b: 50 };

const TITLE: &str = " PIXEL ESCAPE ROOM: THE QUANTUM PARADOX";
const ESCAPED_TEXT: &str = "YOU LOSE.....aint that easy";
const LION_WARNING: [&str; 3] = ["BEWARE OF KEYS", "THEY ARE NOT", "WHAT THEY SEEM"];

const CRAWL_TEXT: [&str; 26] = [
    "QUANTUM PARADOX: REALITY UNRAVELED",
    "",
    "As the holographic key flickers,",
    "reality begins to deconstruct.",
    "",
    "YOU ARE NOT JUST THE ARCHITECT...",
    "",
    "You are a quantum experiment.",
    "Multiple versions of yourself",
    "exist simultaneously in this room.",
    "",
    "EACH PUZZLE YOU SOLVED",
    "WAS A MEMORY FRAGMENT",
    "FROM ALTERNATE TIMELINES.",
    "",
    "The room is your mind.",
    "The key is your consciousness.",
    "",
    "REVELATION: You never truly 'escaped'.",
    "YOU ARE TRAPPED IN AN INFINITE LOOP",
    "OF YOUR OWN CREATION.",
    "",
    "QUANTUM STATE: OBSERVED AND OBSERVER",
    "ARE THE SAME ENTITY.",
    "",
    "WAKE UP... OR CONTINUE PLAYING?",
];
const CRAWL_LINE_GAP: usize = 2;
const CRAWL_COLORS: [Color; 4] = [
    Color::Rgb { r: 200, g: 160, b: 255 },
    Color::Rgb { r: 160, g: 255, b: 220 },
    Color::Rgb { r: 255, g: 230, b: 160 },
    Color::Rgb { r: 230, g: 230, b: 230 },
];

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BASE_BG: Color = Color::Rgb { r: 12, g: 12, b: 18 };

    const BLANK: Cell = Cell { ch: ' ', fg: WHITE, bg: Cell::BASE_BG };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', WHITE, bg));
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    /// Write a string centred on column `cx`, keeping the background
    /// of whatever is underneath.
    fn put_centered(&mut self, cx: usize, y: usize, s: &str, fg: Color) {
        let len = s.chars().count();
        let x0 = cx.saturating_sub(len / 2);
        for (i, ch) in s.chars().enumerate() {
            let bg = self.get(x0 + i, y).bg;
            self.set(x0 + i, y, Cell::new(ch, fg, bg));
        }
    }
}

/// What to draw this frame.
pub enum View<'a> {
    Room {
        state: &'a PuzzleState,
        catalog: &'a GeometryCatalog,
        now: Duration,
    },
    Ending {
        outcome: Outcome,
        elapsed: Duration,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Screen {
    Room(Room),
    Ending(Outcome),
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    layout: Layout,
    crawl_step: Duration,
    last_screen: Option<Screen>,
}

impl Renderer {
    pub fn new(crawl_step: Duration) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            layout: Layout::new(0, 0),
            crawl_step,
            last_screen: None,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            terminal::SetTitle("Pixel Escape Room: The Quantum Paradox"),
            EnableMouseCapture,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.front.resize(w, h);
        self.back.resize(w, h);
        self.layout = Layout::new(w, h);
    }

    pub fn render(&mut self, view: View<'_>) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.front.width || th as usize != self.front.height {
            self.resize(tw as usize, th as usize);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Screen change → clear for a clean transition
        let screen = match &view {
            View::Room { state, .. } => Screen::Room(state.current_room()),
            View::Ending { outcome, .. } => Screen::Ending(*outcome),
        };
        if self.last_screen != Some(screen) {
            log::debug!("screen changed to {:?}", screen);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_screen = Some(screen);
        }

        self.compose(&view);
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    /// Has the narrative crawl scrolled completely off the top?
    pub fn crawl_finished(&self, elapsed: Duration) -> bool {
        let bottom = crawl_top(elapsed, self.crawl_step, self.front.height)
            + (CRAWL_TEXT.len() * CRAWL_LINE_GAP) as i64;
        bottom < 0
    }

    fn compose(&mut self, view: &View<'_>) {
        self.front.clear();
        match *view {
            View::Room { state, catalog, now } => self.compose_room(state, catalog, now),
            View::Ending { outcome: Outcome::NarrativeEnding, elapsed } => self.compose_crawl(elapsed),
            View::Ending { .. } => self.compose_escaped(),
        }
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = WHITE;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer, SetForegroundColor(WHITE), SetBackgroundColor(Cell::BASE_BG))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: rooms ──

    fn compose_room(&mut self, state: &PuzzleState, catalog: &GeometryCatalog, now: Duration) {
        let room = state.current_room();
        self.compose_hud(state);
        self.compose_scene(state, catalog, now);
        if room == Room::Room2 && state.lion_warning_active() {
            self.compose_lion_head();
        }
        self.compose_labels(catalog, room);
        if state.input_mode() != InputMode::Free {
            self.compose_input_box(state.pending_text());
        }
        self.compose_notification(state.notification());
    }

    fn compose_hud(&mut self, state: &PuzzleState) {
        let bar = Color::Rgb { r: 30, g: 30, b: 48 };
        self.front.fill_row(0, bar);
        self.front.put_str(0, 0, TITLE, YELLOW, bar);

        // Inventory + painting progress
        let mut x = TITLE.len() + 3;
        let items = [
            (state.key_found(), "KEY"),
            (state.painting_puzzle_solved(), "CLUE"),
            (state.door_unlocked(), "UNLOCKED"),
        ];
        for (_, name) in items.iter().filter(|(have, _)| *have) {
            self.front.put_str(x, 0, &format!("[{}]", name), Color::Rgb { r: 80, g: 255, b: 80 }, bar);
            x += name.len() + 3;
        }
        if state.current_room() == Room::Room1 {
            for color in state.color_sequence_input() {
                let fg = match color {
                    BlockColor::Red => RED,
                    BlockColor::Green => GREEN,
                    BlockColor::Blue => BLUE,
                };
                self.front.set(x, 0, Cell::new('■', fg, bar));
                x += 1;
            }
        }

        let hint = match state.input_mode() {
            InputMode::Free => "click to interact  ESC quit",
            _ => "ENTER submit  ESC cancel",
        };
        let right = format!("{}   ROOM {} ", hint, state.current_room().number());
        let rx = self.front.width.saturating_sub(right.chars().count());
        if rx > x {
            self.front.put_str(rx, 0, &right, GRAY, bar);
        }
    }

    fn compose_scene(&mut self, state: &PuzzleState, catalog: &GeometryCatalog, now: Duration) {
        let layout = self.layout;
        let room_layout = catalog.layout(state.current_room());
        let flicker = (now.as_millis() / 100) as usize;

        for row in layout.scene_top()..layout.input_row() {
            for col in 0..layout.cols {
                let Some(area) = layout.cell_rect(col, row) else { continue };
                let cell = match layout.object_at(room_layout, col, row) {
                    Some((obj, rect)) => object_cell(obj, rect, area, state, flicker + col + row),
                    None => background_cell(col, row),
                };
                self.front.set(col, row, cell);
            }
        }

        // Door handles
        for (obj, r) in room_layout.objects() {
            if matches!(obj, ObjectId::Door | ObjectId::FinalDoor) {
                let (col, row) = layout.cell_of(Point::new(r.right() - 20, r.center().y));
                self.front.set(col, row, Cell::new('●', GRAY, DARK_BROWN));
            }
        }
    }

    fn compose_lion_head(&mut self) {
        let layout = self.layout;
        let r = LION_HEAD;
        let eyes = [
            Rect::new(r.x + 50, r.y + 80, 20, 20),
            Rect::new(r.right() - 70, r.y + 80, 20, 20),
        ];

        for row in layout.scene_top()..layout.input_row() {
            for col in 0..layout.cols {
                let Some(area) = layout.cell_rect(col, row) else { continue };
                let c = area.center();
                if !r.contains(c) {
                    continue;
                }
                let cell = if eyes.iter().any(|e| e.intersects(&area)) {
                    Cell::new(' ', BLACK, BLACK)
                } else if c.y < r.y + 50 {
                    Cell::new('▓', LION, MANE)
                } else {
                    Cell::new(' ', WHITE, LION)
                };
                self.front.set(col, row, cell);
            }
        }

        let (cx, below) = layout.cell_of(Point::new(r.center().x, r.bottom()));
        for (i, line) in LION_WARNING.iter().enumerate() {
            let row = below + 1 + i;
            if row < layout.input_row() {
                self.front.put_centered(cx, row, line, RED);
            }
        }
    }

    fn compose_labels(&mut self, catalog: &GeometryCatalog, room: Room) {
        let layout = self.layout;
        for (obj, r) in catalog.layout(room).objects() {
            if let Some(label) = obj.label(room) {
                let (col, row) = layout.cell_of(Point::new(r.x + 20, r.y - 30));
                for (i, ch) in label.chars().enumerate() {
                    let bg = self.front.get(col + i, row).bg;
                    self.front.set(col + i, row, Cell::new(ch, WHITE, bg));
                }
            }
        }
    }

    fn compose_input_box(&mut self, pending: &str) {
        let row = self.layout.input_row();
        let w = self.front.width;
        if w < 8 {
            return;
        }
        let inner = w - 4;
        for x in 2..w - 2 {
            self.front.set(x, row, Cell::new(' ', BLACK, WHITE));
        }
        // show the tail when the text outgrows the box
        let text = format!("> {}_", pending);
        let len = text.chars().count();
        let shown: String = text.chars().skip(len.saturating_sub(inner - 1)).collect();
        self.front.put_str(3, row, &shown, BLACK, WHITE);
    }

    fn compose_notification(&mut self, message: &str) {
        let top = self.layout.notification_row();
        let w = self.front.width;
        for row in top..self.front.height {
            self.front.fill_row(row, BLACK);
        }
        let lines = textwrap::wrap(message, w.saturating_sub(2).max(1));
        for (i, line) in lines.iter().take(self.front.height.saturating_sub(top)).enumerate() {
            self.front.put_centered(w / 2, top + i, line, WHITE);
        }
    }

    // ── Compose: endings ──

    fn compose_escaped(&mut self) {
        for row in 0..self.front.height {
            self.front.fill_row(row, BLACK);
        }
        self.front.put_centered(self.front.width / 2, self.front.height / 2, ESCAPED_TEXT, WHITE);
    }

    fn compose_crawl(&mut self, elapsed: Duration) {
        for row in 0..self.front.height {
            self.front.fill_row(row, BLACK);
        }
        let top = crawl_top(elapsed, self.crawl_step, self.front.height);
        let steps = (elapsed.as_millis() / self.crawl_step.as_millis().max(1)) as usize;
        for (i, line) in CRAWL_TEXT.iter().enumerate() {
            let y = top + (i * CRAWL_LINE_GAP) as i64;
            if y >= 0 && (y as usize) < self.front.height {
                let color = CRAWL_COLORS[(i + steps) % CRAWL_COLORS.len()];
                self.front.put_centered(self.front.width / 2, y as usize, line, color);
            }
        }
    }
}

// ── Cell styles ──

fn background_cell(col: usize, row: usize) -> Cell {
    let n = ((col * 7 + row * 13) % 5) as u8 * 4;
    Cell::new(' ', WHITE, Color::Rgb { r: 8 + n, g: 8 + n, b: 12 + n })
}

/// Style of a scene cell showing `obj`. `area` is the cell's virtual rect.
fn object_cell(obj: ObjectId, rect: Rect, area: Rect, state: &PuzzleState, phase: usize) -> Cell {
    let c = area.center();
    match obj {
        ObjectId::Door | ObjectId::FinalDoor => {
            // wood grain every 20 virtual units
            let grain = ((c.y - rect.y) / 20) % 2 == 0;
            Cell::new(if grain { '─' } else { ' ' }, BROWN, DARK_BROWN)
        }
        ObjectId::Box => {
            let bg = if c.y < rect.y + 20 {
                LIGHT_BLUE
            } else if c.y >= rect.bottom() - 20 {
                SHADOW_BLUE
            } else {
                DARK_BLUE
            };
            Cell::new(' ', WHITE, bg)
        }
        ObjectId::Painting => Cell::new('░', GREEN, DARK_GREEN),
        ObjectId::ColorBlock(0) => Cell::new(' ', WHITE, RED),
        ObjectId::ColorBlock(1) => Cell::new(' ', WHITE, GREEN),
        ObjectId::ColorBlock(_) => Cell::new(' ', WHITE, BLUE),
        ObjectId::PuzzleDevice => Cell::new('▓', Color::Rgb { r: 160, g: 0, b: 0 }, RED),
        ObjectId::KeyItem => {
            if state.hologram_triggered() {
                let ch = ['▒', '░', ' '][phase % 3];
                Cell::new(ch, WHITE, YELLOW)
            } else {
                Cell::new(' ', WHITE, YELLOW)
            }
        }
    }
}

/// Screen row of the first crawl line: starts just below the screen and
/// climbs one row per step.
fn crawl_top(elapsed: Duration, step: Duration, height: usize) -> i64 {
    let steps = elapsed.as_millis() / step.as_millis().max(1);
    height as i64 - steps as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::GameEvent;

    fn renderer(w: usize, h: usize) -> Renderer {
        let mut r = Renderer::new(Duration::from_millis(50));
        r.resize(w, h);
        r
    }

    fn row_text(r: &Renderer, y: usize) -> String {
        (0..r.front.width).map(|x| r.front.get(x, y).ch).collect()
    }

    fn room_view<'a>(state: &'a PuzzleState, catalog: &'a GeometryCatalog) -> View<'a> {
        View::Room { state, catalog, now: Duration::ZERO }
    }

    #[test]
    fn long_notification_wraps_onto_second_row() {
        let mut r = renderer(80, 24);
        let mut state = PuzzleState::new();
        let catalog = GeometryCatalog::default();
        state.click_riddle_box(&mut vec![]);
        r.compose(&room_view(&state, &catalog));

        let top = r.layout.notification_row();
        assert!(row_text(&r, top).contains("Riddle:"));
        assert!(row_text(&r, top + 1).contains("mouth?'"));
    }

    #[test]
    fn room3_objects_are_labelled() {
        let mut r = renderer(100, 30);
        let mut state = PuzzleState::new();
        let catalog = GeometryCatalog::default();
        let mut ev: Vec<GameEvent> = vec![];
        state.click_door(&mut ev);
        "1234".chars().for_each(|c| state.append_char(c));
        state.submit_text(&mut ev);
        state.click_door(&mut ev);
        state.click_door(&mut ev);
        assert_eq!(state.current_room(), Room::Room3);
        r.compose(&room_view(&state, &catalog));

        let scene: Vec<String> = (r.layout.scene_top()..r.layout.input_row()).map(|y| row_text(&r, y)).collect();
        assert!(scene.iter().any(|row| row.contains("Exit Door")));
        assert!(scene.iter().any(|row| row.contains("Key")));
    }

    #[test]
    fn door_cells_use_door_colors() {
        let mut r = renderer(80, 24);
        let state = PuzzleState::new();
        let catalog = GeometryCatalog::default();
        r.compose(&room_view(&state, &catalog));

        let door = catalog.layout(Room::Room1).rect_of(ObjectId::Door).unwrap();
        let (col, row) = r.layout.cell_of(Point::new(door.x + 10, door.y + 100));
        assert_eq!(r.front.get(col, row).bg, DARK_BROWN);
    }

    #[test]
    fn hud_shows_room_number() {
        let mut r = renderer(100, 30);
        let state = PuzzleState::new();
        let catalog = GeometryCatalog::default();
        r.compose(&room_view(&state, &catalog));
        assert!(row_text(&r, 0).contains("ROOM 1"));
    }

    #[test]
    fn prompt_shows_input_box_and_notification() {
        let mut r = renderer(100, 30);
        let mut state = PuzzleState::new();
        let catalog = GeometryCatalog::default();
        let mut ev: Vec<GameEvent> = vec![];
        state.click_door(&mut ev);
        state.append_char('4');
        state.append_char('2');
        r.compose(&room_view(&state, &catalog));

        assert!(row_text(&r, r.layout.input_row()).contains("> 42_"));
        assert!(row_text(&r, r.layout.notification_row()).contains("Enter the 4-digit code."));
    }

    #[test]
    fn lion_warning_appears_after_device() {
        let mut r = renderer(120, 40);
        let mut state = PuzzleState::new();
        let catalog = GeometryCatalog::default();
        let mut ev: Vec<GameEvent> = vec![];
        state.click_door(&mut ev);
        "1234".chars().for_each(|c| state.append_char(c));
        state.submit_text(&mut ev);
        state.click_door(&mut ev);

        let has_warning = |r: &Renderer| {
            (0..r.front.height).any(|y| row_text(r, y).contains("BEWARE OF KEYS"))
        };
        r.compose(&room_view(&state, &catalog));
        assert!(!has_warning(&r));

        state.click_puzzle_device(Duration::ZERO, &mut ev);
        r.compose(&room_view(&state, &catalog));
        assert!(has_warning(&r));
    }

    #[test]
    fn escaped_screen_text() {
        let mut r = renderer(80, 24);
        r.compose(&View::Ending { outcome: Outcome::Escaped, elapsed: Duration::ZERO });
        assert!(row_text(&r, 12).contains(ESCAPED_TEXT));
    }

    #[test]
    fn crawl_scrolls_then_finishes() {
        let mut r = renderer(80, 24);
        let at = |steps: u64| Duration::from_millis(steps * 50);

        r.compose(&View::Ending { outcome: Outcome::NarrativeEnding, elapsed: at(0) });
        assert!((0..24).all(|y| !row_text(&r, y).contains("QUANTUM PARADOX")));

        r.compose(&View::Ending { outcome: Outcome::NarrativeEnding, elapsed: at(1) });
        assert!(row_text(&r, 23).contains("QUANTUM PARADOX: REALITY UNRAVELED"));
        assert!(!r.crawl_finished(at(1)));

        let total = 24 + (CRAWL_TEXT.len() * CRAWL_LINE_GAP) as u64;
        assert!(!r.crawl_finished(at(total)));
        assert!(r.crawl_finished(at(total + 1)));
    }
}
