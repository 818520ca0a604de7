//! Hole layouts and course loading
//!
//! Level data is immutable once handed to the simulation. The JSON layout
//! mirrors the authoring format: rectangles as `{x, y, w, h}`, points as
//! `{x, y}`, wall material under `type`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{LEVEL_HEIGHT, LEVEL_WIDTH};
use crate::sim::geometry::Rect;

/// Errors raised while loading or validating level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("malformed level JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level {level}: {what} is not a finite, positive-sized rectangle")]
    BadRect { level: u32, what: String },
    #[error("level {level}: hole radius must be positive and finite")]
    BadHole { level: u32 },
    #[error("level {level}: start position is not finite")]
    BadStart { level: u32 },
    #[error("level {level}: par must be at least 1")]
    BadPar { level: u32 },
    #[error("course has no levels")]
    EmptyCourse,
}

/// Wall material (selects the bounce sound, not the bounce physics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Wood,
    Stone,
}

/// A solid axis-aligned obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(rename = "type")]
    pub material: Material,
}

impl Wall {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, material: Material) -> Self {
        Self { rect: Rect::new(x, y, w, h), material }
    }
}

/// A high-friction zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandTrap {
    #[serde(flatten)]
    pub rect: Rect,
}

impl SandTrap {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { rect: Rect::new(x, y, w, h) }
    }
}

/// The cup: center point plus capture radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Hole {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// `{x, y}` point as authored in level files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Point {
    x: f32,
    y: f32,
}

mod point_xy {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Point;

    pub fn serialize<S: Serializer>(v: &Vec2, s: S) -> Result<S::Ok, S::Error> {
        Point { x: v.x, y: v.y }.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec2, D::Error> {
        let p = Point::deserialize(d)?;
        Ok(Vec2::new(p.x, p.y))
    }
}

/// One hole of the course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub id: u32,
    pub name: String,
    pub par: u32,
    #[serde(rename = "startPos", with = "point_xy")]
    pub start: Vec2,
    pub hole: Hole,
    /// Collision order is declaration order
    pub walls: Vec<Wall>,
    /// First containing trap wins
    #[serde(default)]
    pub traps: Vec<SandTrap>,
}

impl LevelData {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Structural checks only. A start position inside a wall is the
    /// author's problem and is not detected here.
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = self.id;
        if self.par == 0 {
            return Err(LevelError::BadPar { level });
        }
        if !self.start.is_finite() {
            return Err(LevelError::BadStart { level });
        }
        if !(self.hole.radius > 0.0 && self.hole.radius.is_finite() && self.hole.pos().is_finite())
        {
            return Err(LevelError::BadHole { level });
        }
        for (i, wall) in self.walls.iter().enumerate() {
            if !wall.rect.is_well_formed() {
                return Err(LevelError::BadRect { level, what: format!("wall #{i}") });
            }
        }
        for (i, trap) in self.traps.iter().enumerate() {
            if !trap.rect.is_well_formed() {
                return Err(LevelError::BadRect { level, what: format!("sand trap #{i}") });
            }
        }

        let field = Rect::new(0.0, 0.0, LEVEL_WIDTH, LEVEL_HEIGHT);
        if !field.contains_strict(self.start) || !field.contains_strict(self.hole.pos()) {
            log::warn!(
                "Level {}: start or hole lies outside the {}x{} field",
                level,
                LEVEL_WIDTH,
                LEVEL_HEIGHT
            );
        }
        Ok(())
    }
}

/// Ordered sequence of holes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Course {
    levels: Vec<LevelData>,
}

impl Course {
    pub fn new(levels: Vec<LevelData>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyCourse);
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelData> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn get(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelData> {
        self.levels.iter()
    }

    /// Total par across all holes
    pub fn par(&self) -> u32 {
        self.levels.iter().map(|l| l.par).sum()
    }

    /// The three-hole starter course
    pub fn classic() -> Self {
        use Material::{Stone, Wood};

        // Boundary walls shared by every hole on the 800x600 field
        let border = || {
            vec![
                Wall::new(0.0, 0.0, 800.0, 20.0, Stone),
                Wall::new(0.0, 580.0, 800.0, 20.0, Stone),
                Wall::new(0.0, 0.0, 20.0, 600.0, Stone),
                Wall::new(780.0, 0.0, 20.0, 600.0, Stone),
            ]
        };

        let mut starter_walls = vec![Wall::new(380.0, 200.0, 40.0, 200.0, Wood)];
        starter_walls.extend(border());

        let mut zigzag_walls = border();
        zigzag_walls.extend([
            Wall::new(200.0, 250.0, 400.0, 30.0, Wood),
            Wall::new(400.0, 0.0, 30.0, 250.0, Wood),
        ]);

        let mut maze_walls = border();
        maze_walls.extend([
            Wall::new(150.0, 0.0, 20.0, 450.0, Wood),
            Wall::new(300.0, 150.0, 20.0, 450.0, Wood),
            Wall::new(450.0, 0.0, 20.0, 400.0, Wood),
            Wall::new(600.0, 200.0, 20.0, 400.0, Wood),
        ]);

        Self {
            levels: vec![
                LevelData {
                    id: 1,
                    name: "The Starter".into(),
                    par: 2,
                    start: Vec2::new(100.0, 300.0),
                    hole: Hole { x: 700.0, y: 300.0, radius: 15.0 },
                    walls: starter_walls,
                    traps: Vec::new(),
                },
                LevelData {
                    id: 2,
                    name: "The Zigzag".into(),
                    par: 3,
                    start: Vec2::new(100.0, 500.0),
                    hole: Hole { x: 700.0, y: 100.0, radius: 15.0 },
                    walls: zigzag_walls,
                    traps: vec![SandTrap::new(500.0, 300.0, 150.0, 100.0)],
                },
                LevelData {
                    id: 3,
                    name: "The Maze".into(),
                    par: 4,
                    start: Vec2::new(50.0, 50.0),
                    hole: Hole { x: 740.0, y: 540.0, radius: 15.0 },
                    walls: maze_walls,
                    traps: vec![
                        SandTrap::new(170.0, 450.0, 130.0, 100.0),
                        SandTrap::new(620.0, 100.0, 160.0, 80.0),
                    ],
                },
            ],
        }
    }
}
