//! Render table: piece kind → paint, plus UI colours. Optional btop-style
//! `theme[key]="value"` file overrides the defaults.

use crate::grid::Cell;
use crate::shapes::TetrominoKind;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// How one grid cell is drawn. Each cell is two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Glyph pair drawn in `fg` over a darker `bg`.
    Textured {
        glyphs: [char; 2],
        fg: Color,
        bg: Color,
    },
    /// Plain filled block.
    Solid(Color),
}

impl Paint {
    pub fn glyphs(self) -> [char; 2] {
        match self {
            Self::Textured { glyphs, .. } => glyphs,
            Self::Solid(_) => ['█', '█'],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    /// Indexed by `TetrominoKind as usize`.
    pieces: [Color; 8],
    /// Playfield background, also the paint for empty cells.
    pub bg: Color,
    /// Board and panel borders.
    pub div_line: Color,
    /// Score and body text.
    pub main_fg: Color,
    pub title: Color,
    /// Draw the seven standard kinds with glyph textures.
    pub textured: bool,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("theme[{key}]: {source}")]
    Key {
        key: String,
        #[source]
        source: Box<ThemeError>,
    },
}

const CYAN: Color = Color::Rgb(0, 255, 255);
const BLUE: Color = Color::Rgb(0, 0, 255);
const ORANGE: Color = Color::Rgb(255, 165, 0);
const YELLOW: Color = Color::Rgb(255, 255, 0);
const GREEN: Color = Color::Rgb(0, 255, 0);
const PURPLE: Color = Color::Rgb(128, 0, 128);
const RED: Color = Color::Rgb(255, 0, 0);
const WHITE: Color = Color::Rgb(255, 255, 255);

impl Default for Theme {
    fn default() -> Self {
        Self {
            pieces: [CYAN, BLUE, ORANGE, YELLOW, GREEN, PURPLE, RED, WHITE],
            bg: Color::Rgb(0, 0, 0),
            div_line: Color::Rgb(200, 200, 200),
            main_fg: Color::Rgb(230, 230, 230),
            title: YELLOW,
            textured: true,
        }
    }
}

fn piece_key(kind: TetrominoKind) -> &'static str {
    match kind {
        TetrominoKind::I => "piece_i",
        TetrominoKind::J => "piece_j",
        TetrominoKind::L => "piece_l",
        TetrominoKind::O => "piece_o",
        TetrominoKind::S => "piece_s",
        TetrominoKind::T => "piece_t",
        TetrominoKind::Z => "piece_z",
        TetrominoKind::P => "piece_p",
    }
}

/// Texture glyphs for the standard kinds. `P` has none and is drawn solid.
fn texture(kind: TetrominoKind) -> Option<[char; 2]> {
    match kind {
        TetrominoKind::I => Some(['▐', '▌']),
        TetrominoKind::J => Some(['▛', '▜']),
        TetrominoKind::L => Some(['▙', '▟']),
        TetrominoKind::O => Some(['▓', '▓']),
        TetrominoKind::S => Some(['▚', '▚']),
        TetrominoKind::T => Some(['▞', '▞']),
        TetrominoKind::Z => Some(['▒', '▒']),
        TetrominoKind::P => None,
    }
}

/// Halve each channel; used behind textured glyphs.
fn dim(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(r / 2, g / 2, b / 2),
        other => other,
    }
}

impl Theme {
    /// Load overrides from `path`. A missing path or file yields the defaults.
    pub fn load(path: Option<&Path>, textured: bool) -> Result<Self, ThemeError> {
        let mut theme = Self {
            textured,
            ..Self::default()
        };
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(theme),
        };
        let s = std::fs::read_to_string(path)?;
        theme.apply(&parse_theme_file(&s))?;
        Ok(theme)
    }

    /// Apply recognised keys; unknown keys are ignored, bad colours are errors.
    fn apply(&mut self, map: &HashMap<String, String>) -> Result<(), ThemeError> {
        let get = |key: &str| -> Result<Option<Color>, ThemeError> {
            map.get(key)
                .map(|v| {
                    parse_hex(v).map_err(|e| ThemeError::Key {
                        key: key.to_string(),
                        source: Box::new(e),
                    })
                })
                .transpose()
        };
        for kind in TetrominoKind::ALL {
            if let Some(c) = get(piece_key(kind))? {
                self.pieces[kind as usize] = c;
            }
        }
        if let Some(c) = get("main_bg")? {
            self.bg = c;
        }
        if let Some(c) = get("div_line")? {
            self.div_line = c;
        }
        if let Some(c) = get("main_fg")? {
            self.main_fg = c;
        }
        if let Some(c) = get("title")? {
            self.title = c;
        }
        Ok(())
    }

    #[inline]
    pub fn piece_color(&self, kind: TetrominoKind) -> Color {
        self.pieces[kind as usize]
    }

    pub fn piece_paint(&self, kind: TetrominoKind) -> Paint {
        let fg = self.piece_color(kind);
        match texture(kind) {
            Some(glyphs) if self.textured => Paint::Textured {
                glyphs,
                fg,
                bg: dim(fg),
            },
            _ => Paint::Solid(fg),
        }
    }

    /// Paint for a grid cell; `None` for empty cells, which show the background.
    pub fn cell_paint(&self, cell: Cell) -> Option<Paint> {
        cell.kind().map(|k| self.piece_paint(k))
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |digits: &str, scale: u8| {
        u8::from_str_radix(digits, 16)
            .map(|v| v * scale)
            .map_err(|_| invalid())
    };
    if !s.is_ascii() {
        return Err(invalid());
    }
    let (r, g, b) = match s.len() {
        6 => (channel(&s[0..2], 1)?, channel(&s[2..4], 1)?, channel(&s[4..6], 1)?),
        3 => (channel(&s[0..1], 17)?, channel(&s[1..2], 17)?, channel(&s[2..3], 17)?),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}
