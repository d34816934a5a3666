//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the core state machine, the terminal adapters, and tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (3, -3), i.e. `10/2 - 4/2` columns in and three rows
//!   above the visible playfield
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FLASH_PAUSE_MS` | 300 | Pause after each row-clear flash pass |
//! | `FLASH_PASSES` | 2 | Number of blink passes before rows are removed |
//! | `DEFAULT_IDLE_POLL_MS` | 5 | Longest wait for input in one loop tick |
//!
//! Gravity is not a constant: the piece falls one row per elapsed wall-clock
//! second, independent of how often the loop runs.
//!
//! # Examples
//!
//! ```
//! use termtris_types::{CellState, InputEvent, Rotation, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let shape = ShapeId::new(2).unwrap();
//! assert_eq!(shape.as_str(), "i");
//! assert!(ShapeId::new(7).is_none());
//!
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//! assert_eq!(CellState::Petrified.code(), 4);
//! assert_eq!(InputEvent::from_str("rotate"), Some(InputEvent::Rotate));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of board cells
pub const BOARD_CELLS: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Width and height of every shape mask
pub const SHAPE_SIZE: u8 = 4;

/// Number of distinct shapes in the catalog
pub const SHAPE_COUNT: u8 = 7;

/// Spawn anchor column: `W/2 - SHAPE_SIZE/2`
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - (SHAPE_SIZE / 2) as i8;

/// Spawn anchor row, above the visible board
pub const SPAWN_Y: i8 = -3;

/// Number of blink passes before completed rows are removed
pub const FLASH_PASSES: u8 = 2;

/// Real-time pause after each flash pass (milliseconds)
pub const DEFAULT_FLASH_PAUSE_MS: u32 = 300;

/// Longest time one loop tick waits for input before moving on (milliseconds)
pub const DEFAULT_IDLE_POLL_MS: u32 = 5;

/// Shape identifier in `[0, SHAPE_COUNT)`.
///
/// Construction is checked, so a `ShapeId` held anywhere is always a valid
/// catalog index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u8);

impl ShapeId {
    /// Every shape in catalog order.
    pub const ALL: [ShapeId; SHAPE_COUNT as usize] = [
        ShapeId(0),
        ShapeId(1),
        ShapeId(2),
        ShapeId(3),
        ShapeId(4),
        ShapeId(5),
        ShapeId(6),
    ];

    /// Returns `None` for ids outside `[0, 6]`.
    pub const fn new(id: u8) -> Option<Self> {
        if id < SHAPE_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Build from an index that is known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if `index >= SHAPE_COUNT`.
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < SHAPE_COUNT as usize,
            "shape index {index} out of range"
        );
        Self(index as u8)
    }

    pub const fn id(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Parse from the single-letter shape name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(Self(0)),
            "t" => Some(Self(1)),
            "i" => Some(Self(2)),
            "l" => Some(Self(3)),
            "j" => Some(Self(4)),
            "s" => Some(Self(5)),
            "z" => Some(Self(6)),
            _ => None,
        }
    }

    /// Lowercase single-letter name
    pub fn as_str(self) -> &'static str {
        match self.0 {
            0 => "o",
            1 => "t",
            2 => "i",
            3 => "l",
            4 => "j",
            5 => "s",
            _ => "z",
        }
    }
}

/// Rotation states (North = spawn orientation, index 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation for an arbitrary step count, reduced mod 4.
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Advance by `steps` quarter turns (negative turns back).
    pub fn turned(self, steps: i32) -> Self {
        Self::from_index(self.index() as i32 + steps)
    }

    /// Rotate one step in the "rotate" key direction
    pub fn rotate_cw(self) -> Self {
        self.turned(1)
    }

    /// Convert to string
    pub fn as_str(self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// State of a single board cell.
///
/// `Active` and `PreviouslyActive` only ever hold the falling piece (or a
/// flashing row); `Petrified` cells are permanent until a row shift moves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    /// Occupied by the falling piece in the current frame
    Active,
    /// Occupied by the falling piece last frame, awaiting erase
    PreviouslyActive,
    /// Permanently landed
    Petrified,
}

impl CellState {
    /// Numeric code shown by the debug overlay.
    pub fn code(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Active => 1,
            CellState::PreviouslyActive => 2,
            CellState::Petrified => 4,
        }
    }

    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }

    /// Whether the renderer should draw a block for this state.
    pub fn is_visible(self) -> bool {
        matches!(self, CellState::Active | CellState::Petrified)
    }
}

/// Discrete command events produced by an input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Pause,
    Quit,
    ToggleDebugOverlay,
    ForceFullRedraw,
    /// Terminal interrupt (Ctrl-C while the keyboard is in raw mode)
    Interrupt,
    /// Nothing buffered
    None,
}

impl InputEvent {
    /// Parse event from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputEvent::MoveLeft),
            "moveright" => Some(InputEvent::MoveRight),
            "softdrop" => Some(InputEvent::SoftDrop),
            "rotate" => Some(InputEvent::Rotate),
            "pause" => Some(InputEvent::Pause),
            "quit" => Some(InputEvent::Quit),
            "toggledebugoverlay" => Some(InputEvent::ToggleDebugOverlay),
            "forcefullredraw" => Some(InputEvent::ForceFullRedraw),
            "interrupt" => Some(InputEvent::Interrupt),
            "none" => Some(InputEvent::None),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(self) -> &'static str {
        match self {
            InputEvent::MoveLeft => "moveLeft",
            InputEvent::MoveRight => "moveRight",
            InputEvent::SoftDrop => "softDrop",
            InputEvent::Rotate => "rotate",
            InputEvent::Pause => "pause",
            InputEvent::Quit => "quit",
            InputEvent::ToggleDebugOverlay => "toggleDebugOverlay",
            InputEvent::ForceFullRedraw => "forceFullRedraw",
            InputEvent::Interrupt => "interrupt",
            InputEvent::None => "none",
        }
    }

    pub fn is_none(self) -> bool {
        self == InputEvent::None
    }
}

/// Raw numeric cell codes, one row per board row (see [`CellState::code`]).
pub type DebugGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Cell-level commands consumed by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCommand {
    /// Clear the screen and draw the empty window outline
    ClearAndDrawFrame,
    /// Draw (visible state) or erase (invisible state) one board cell
    SetCell { x: u8, y: u8, state: CellState },
    /// Rows cleared so far
    SetScore(u32),
    /// Upcoming shape
    SetPreview(ShapeId),
    /// Numeric dump of the board for the debug overlay
    DrawDebugGrid(DebugGrid),
}

impl RenderCommand {
    /// Whether this command draws or erases a board cell.
    pub fn is_cell_draw(&self) -> bool {
        matches!(self, RenderCommand::SetCell { .. })
    }
}
