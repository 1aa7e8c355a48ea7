/*
 *  content.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Slogan records and image listing, with random picks
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BadgeError, SourceKind};
use crate::picker::Picker;

/// Lines starting with this character are comments
const COMMENT: char = '#';
/// Field separator within a slogan line
const FIELD_SEPARATOR: char = '\t';
/// text, scale token, align token
const RECORD_FIELDS: usize = 3;

/// Whether the slogan should be shrunk to fit the panel width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    Fixed,
    Scaled,
    /// decided per draw
    Random,
}

impl ScaleMode {
    pub fn from_token(token: &str) -> Self {
        match token {
            "scale" => ScaleMode::Scaled,
            "any" => ScaleMode::Random,
            _ => ScaleMode::Fixed,
        }
    }

    pub fn resolve(self, picker: &mut dyn Picker) -> bool {
        match self {
            ScaleMode::Fixed => false,
            ScaleMode::Scaled => true,
            ScaleMode::Random => picker.coin(),
        }
    }
}

/// Horizontal placement of the slogan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignMode {
    Centered,
    LeftAligned,
    /// decided per draw
    Random,
}

impl AlignMode {
    pub fn from_token(token: &str) -> Self {
        match token {
            "center" => AlignMode::Centered,
            "any" => AlignMode::Random,
            _ => AlignMode::LeftAligned,
        }
    }

    pub fn resolve(self, picker: &mut dyn Picker) -> bool {
        match self {
            AlignMode::Centered => true,
            AlignMode::LeftAligned => false,
            AlignMode::Random => picker.coin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slogan {
    pub text: String,
    pub scale: ScaleMode,
    pub align: AlignMode,
}

/// One eligible line of the slogan source.
///
/// Short lines still take part in the random pick; they only fail once
/// somebody tries to draw them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SloganRecord {
    Complete(Slogan),
    Malformed { fields: Vec<String> },
}

impl SloganRecord {
    pub fn parse_line(line: &str) -> Self {
        let fields: Vec<String> = line
            .trim()
            .split(FIELD_SEPARATOR)
            .map(|field| field.trim().to_string())
            .collect();

        if fields.len() < RECORD_FIELDS {
            return SloganRecord::Malformed { fields };
        }
        SloganRecord::Complete(Slogan {
            scale: ScaleMode::from_token(&fields[1]),
            align: AlignMode::from_token(&fields[2]),
            text: fields.into_iter().next().unwrap_or_default(),
        })
    }

    pub fn slogan(&self) -> Result<&Slogan, BadgeError> {
        match self {
            SloganRecord::Complete(slogan) => Ok(slogan),
            SloganRecord::Malformed { fields } => Err(BadgeError::MalformedRecord { found: fields.len() }),
        }
    }
}

/// Every eligible record in a slogan source, in file order
pub fn parse_slogans(source: &str) -> Vec<SloganRecord> {
    source
        .lines()
        .filter(|line| !line.starts_with(COMMENT) && !line.trim().is_empty())
        .map(SloganRecord::parse_line)
        .collect()
}

/// Where slogans and images live. Nothing is cached: every pick re-reads
/// the filesystem, so edits show up on the next draw.
#[derive(Debug, Clone)]
pub struct ContentStore {
    image_dir: PathBuf,
    slogan_path: PathBuf,
}

impl ContentStore {
    pub fn new(image_dir: impl Into<PathBuf>, slogan_path: impl Into<PathBuf>) -> Self {
        Self { image_dir: image_dir.into(), slogan_path: slogan_path.into() }
    }

    pub fn image_dir(&self) -> &Path { &self.image_dir }
    pub fn slogan_path(&self) -> &Path { &self.slogan_path }

    pub fn load_slogans(&self) -> Result<Vec<SloganRecord>, BadgeError> {
        let source = fs::read_to_string(&self.slogan_path)
            .map_err(|e| BadgeError::io(&self.slogan_path, e))?;
        Ok(parse_slogans(&source))
    }

    pub fn pick_slogan(&self, picker: &mut dyn Picker) -> Result<SloganRecord, BadgeError> {
        let mut records = self.load_slogans()?;
        if records.is_empty() {
            return Err(BadgeError::EmptySource {
                kind: SourceKind::Slogans,
                path: self.slogan_path.clone(),
            });
        }
        let idx = picker.pick(records.len());
        debug!("slogan {} of {}", idx + 1, records.len());
        Ok(records.swap_remove(idx))
    }

    /// Regular files in the image directory, sorted by name
    pub fn list_images(&self) -> Result<Vec<PathBuf>, BadgeError> {
        let entries = fs::read_dir(&self.image_dir)
            .map_err(|e| BadgeError::io(&self.image_dir, e))?;

        let mut images = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| BadgeError::io(&self.image_dir, e))?.path();
            if path.is_file() {
                images.push(path);
            }
        }
        images.sort();
        Ok(images)
    }

    pub fn pick_image_path(&self, picker: &mut dyn Picker) -> Result<PathBuf, BadgeError> {
        let mut images = self.list_images()?;
        if images.is_empty() {
            return Err(BadgeError::EmptySource {
                kind: SourceKind::Images,
                path: self.image_dir.clone(),
            });
        }
        let idx = picker.pick(images.len());
        Ok(images.swap_remove(idx))
    }
}
