//! Sprite and sound loading.
//!
//! Images are text-art files: every non-empty line is one row of the
//! sprite.  A sprite sheet holds several frames separated by blank lines.
//! Sounds are RIFF/WAVE files; only the header is checked, playback is left
//! to an [`AudioSink`].

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::entities::SoundCue;

#[derive(Debug)]
pub enum AssetError {
    NotFound { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
    Empty { path: PathBuf },
    BadSound { path: PathBuf, reason: &'static str },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "asset not found: {}", path.display()),
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Empty { path } => write!(f, "asset has no content: {}", path.display()),
            Self::BadSound { path, reason } => {
                write!(f, "not a usable sound file {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<String>,
    width: usize,
}

impl Sprite {
    /// `None` if the text has no visible rows.
    pub fn from_text(text: &str) -> Option<Self> {
        let rows: Vec<String> = text
            .lines()
            .map(|line| line.trim_end().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return None;
        }
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        Some(Self { rows, width })
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    frames: Vec<Sprite>,
}

impl SpriteSheet {
    pub fn from_text(text: &str) -> Option<Self> {
        let mut frames = Vec::new();
        let mut chunk = String::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                frames.extend(Sprite::from_text(&chunk));
                chunk.clear();
            } else {
                chunk.push_str(line);
                chunk.push('\n');
            }
        }
        frames.extend(Sprite::from_text(&chunk));
        (!frames.is_empty()).then_some(Self { frames })
    }

    pub fn frame(&self, index: usize) -> Option<&Sprite> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

// ── Sounds ────────────────────────────────────────────────────────────────────

/// Anything that can make a noise for a sound handle.
pub trait AudioSink {
    fn play(&mut self, sound: &Sound);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sound {
    name: String,
    bytes: usize,
}

impl Sound {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the file in bytes.
    pub fn len(&self) -> usize {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes == 0
    }

    pub fn play(&self, sink: &mut dyn AudioSink) {
        sink.play(self);
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

fn read(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => AssetError::NotFound {
            path: path.to_path_buf(),
        },
        _ => AssetError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

pub fn load_image(path: &Path) -> Result<Sprite, AssetError> {
    let bytes = read(path)?;
    Sprite::from_text(&String::from_utf8_lossy(&bytes)).ok_or_else(|| AssetError::Empty {
        path: path.to_path_buf(),
    })
}

pub fn load_sheet(path: &Path) -> Result<SpriteSheet, AssetError> {
    let bytes = read(path)?;
    SpriteSheet::from_text(&String::from_utf8_lossy(&bytes)).ok_or_else(|| AssetError::Empty {
        path: path.to_path_buf(),
    })
}

pub fn load_sound(path: &Path) -> Result<Sound, AssetError> {
    let bytes = read(path)?;
    let bad = |reason| AssetError::BadSound {
        path: path.to_path_buf(),
        reason,
    };
    if bytes.len() < 12 {
        return Err(bad("file shorter than a RIFF header"));
    }
    if &bytes[0..4] != b"RIFF" {
        return Err(bad("missing RIFF magic"));
    }
    if &bytes[8..12] != b"WAVE" {
        return Err(bad("RIFF file is not WAVE"));
    }
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Sound {
        name,
        bytes: bytes.len(),
    })
}

// ── Bundle ────────────────────────────────────────────────────────────────────

/// Everything the Playing screen draws or plays.
#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Sprite,
    pub enemy: Sprite,
    pub bullet: Sprite,
    pub enemy_bullet: Sprite,
    pub explosion: SpriteSheet,
    pub shoot_sound: Sound,
    pub explosion_sound: Sound,
}

impl Assets {
    /// Load the full set from `dir`, failing on the first missing or
    /// unusable file.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let images = dir.join("images");
        let sounds = dir.join("sounds");
        let assets = Self {
            player: load_image(&images.join("player.txt"))?,
            enemy: load_image(&images.join("enemy.txt"))?,
            bullet: load_image(&images.join("bullet.txt"))?,
            enemy_bullet: load_image(&images.join("enemy_bullet.txt"))?,
            explosion: load_sheet(&images.join("explosion.txt"))?,
            shoot_sound: load_sound(&sounds.join("shoot.wav"))?,
            explosion_sound: load_sound(&sounds.join("explosion.wav"))?,
        };
        tracing::debug!(
            dir = %dir.display(),
            explosion_frames = assets.explosion.len(),
            "assets loaded"
        );
        Ok(assets)
    }

    pub fn sound(&self, cue: SoundCue) -> &Sound {
        match cue {
            SoundCue::Shoot => &self.shoot_sound,
            SoundCue::Explosion => &self.explosion_sound,
        }
    }
}
