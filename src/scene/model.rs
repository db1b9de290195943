//! The displayed model and its tint.

use std::fmt;

use anyhow::{bail, Result};

/// An RGB tint applied to every part of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tint(pub u32);

impl Tint {
    /// Tint used while readings are normal.
    pub const NEUTRAL: Tint = Tint(0xffffff);
    /// Tint used while readings are abnormal.
    pub const WARNING: Tint = Tint(0xff0000);

    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xffffff)
    }
}

/// A named group of figure lines sharing one material.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPart {
    pub name: String,
    pub lines: Vec<String>,
    pub tint: Tint,
}

/// A loaded model: a plain-text figure split into parts.
///
/// Figure files are plain text. A line of the form `[name]` starts a new
/// part; lines before the first header belong to a part called `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneModel {
    pub name: String,
    pub parts: Vec<ModelPart>,
}

/// Figure used when no model file is configured.
const BUILTIN_FIGURE: &str = r#"[head]
      .---.
     / o o \
     \  ^  /
      '-+-'
[torso]
    .---|---.
   /    |    \
  /  .-[♥]-.  \
 '   |     |   '
     '--+--'
[legs]
       / \
      /   \
     /     \
   _/       \_
"#;

impl SceneModel {
    /// Parse a figure from text.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut parts: Vec<ModelPart> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if let Some(part_name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .filter(|n| !n.is_empty() && !n.contains(char::is_whitespace))
            {
                parts.push(ModelPart {
                    name: part_name.to_string(),
                    lines: Vec::new(),
                    tint: Tint::NEUTRAL,
                });
                continue;
            }

            if parts.is_empty() {
                parts.push(ModelPart {
                    name: "body".to_string(),
                    lines: Vec::new(),
                    tint: Tint::NEUTRAL,
                });
            }
            if let Some(part) = parts.last_mut() {
                part.lines.push(line.trim_end().to_string());
            }
        }

        parts.retain(|p| p.lines.iter().any(|l| !l.trim().is_empty()));
        if parts.is_empty() {
            bail!("model contains no figure lines");
        }

        Ok(Self {
            name: name.into(),
            parts,
        })
    }

    /// The figure shipped with the binary.
    pub fn builtin() -> Self {
        Self::parse("builtin", BUILTIN_FIGURE).unwrap_or_else(|_| Self {
            name: "builtin".to_string(),
            parts: Vec::new(),
        })
    }

    /// Set the tint of every part.
    pub fn recolor(&mut self, tint: Tint) {
        for part in &mut self.parts {
            part.tint = tint;
        }
    }

    /// The tint shared by all parts, if they agree.
    pub fn tint(&self) -> Option<Tint> {
        let first = self.parts.first()?.tint;
        self.parts.iter().all(|p| p.tint == first).then_some(first)
    }

    /// Number of figure lines across all parts.
    pub fn height(&self) -> usize {
        self.parts.iter().map(|p| p.lines.len()).sum()
    }

    /// Widest figure line, in characters.
    pub fn width(&self) -> usize {
        self.parts
            .iter()
            .flat_map(|p| p.lines.iter())
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }
}
