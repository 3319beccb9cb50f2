use ratatui::style::Color;
use ratatui::symbols::border;

/// Smallest accepted row count.
pub const MIN_ROWS: u16 = 1;

/// Smallest accepted column count.
///
/// The starting snake fills columns 1..=3, which leaves column 0 free for the
/// first food item.
pub const MIN_COLS: u16 = 4;

/// Number of segments in a freshly constructed snake.
pub const INITIAL_SNAKE_LEN: usize = 3;

/// Column of the starting tail segment.
pub const INITIAL_TAIL_COL: i32 = 1;

/// Default grid rows for the terminal frontend.
pub const DEFAULT_ROWS: u16 = 15;

/// Default grid columns for the terminal frontend.
pub const DEFAULT_COLS: u16 = 15;

/// Default interval between engine steps in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Smallest tick interval accepted from the command line.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Seconds shown by the pre-game countdown.
pub const COUNTDOWN_SECONDS: u8 = 3;

/// Delay between revealing consecutive dead segments after a crash.
pub const DEATH_REVEAL_STEP_MS: u64 = 50;

/// Terminal poll timeout used by the frame loop.
pub const FRAME_POLL_MS: u64 = 16;

/// Default log file path for the terminal frontend.
pub const DEFAULT_LOG_FILE: &str = "grid-snake.log";

/// Each logical cell is drawn two terminal columns wide to look square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_EMPTY: &str = "  ";
pub const GLYPH_FOOD: &str = "()";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";
pub const GLYPH_SNAKE_DEAD: &str = "░░";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";

/// Colors applied by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub snake_dead: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    snake_dead: Color::Gray,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
};

/// Plain-block border around the play field.
pub const BORDER_PLAIN: border::Set = border::PLAIN;
