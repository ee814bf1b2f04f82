use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    CubeError,
    engine::MoveEngine,
    moves::{Angle, Move},
};

/// The version written into every save. Saves with any other version are
/// refused.
pub const SESSION_VERSION: u32 = 1;

/// Everything needed to resume a session: the cube dimension, the time spent
/// so far and the full move log. The grid itself is never stored; it is
/// rebuilt by replaying the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionRepr", into = "SessionRepr")]
pub struct SessionData {
    pub dimension: usize,
    pub elapsed_seconds: f64,
    pub moves: Vec<Move>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionRepr {
    version: u32,
    dimension: usize,
    elapsed_seconds: f64,
    #[serde(default)]
    moves: Vec<MoveRepr>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MoveRepr {
    axis: String,
    angle: f64,
    index: usize,
}

impl From<SessionData> for SessionRepr {
    fn from(value: SessionData) -> Self {
        SessionRepr {
            version: SESSION_VERSION,
            dimension: value.dimension,
            elapsed_seconds: value.elapsed_seconds,
            moves: value
                .moves
                .into_iter()
                .map(|move_| MoveRepr {
                    axis: move_.axis.to_string(),
                    angle: move_.angle.degrees(),
                    index: move_.index,
                })
                .collect(),
        }
    }
}

impl TryFrom<SessionRepr> for SessionData {
    type Error = CubeError;

    fn try_from(value: SessionRepr) -> Result<Self, Self::Error> {
        if value.version != SESSION_VERSION {
            return Err(CubeError::Format(format!(
                "unsupported save version {}, expected {SESSION_VERSION}",
                value.version
            )));
        }

        let moves = value
            .moves
            .into_iter()
            .map(|repr| -> Result<Move, CubeError> {
                Ok(Move::new(
                    repr.axis.parse()?,
                    repr.index,
                    Angle::from_degrees(repr.angle)?,
                ))
            })
            .collect::<Result<_, CubeError>>()?;

        Ok(SessionData {
            dimension: value.dimension,
            elapsed_seconds: value.elapsed_seconds,
            moves,
        })
    }
}

impl SessionData {
    /// Encode as TOML.
    ///
    /// # Errors
    ///
    /// `Format` if serialization fails.
    pub fn to_toml(&self) -> Result<String, CubeError> {
        toml::to_string(self).map_err(|e| CubeError::Format(e.to_string()))
    }

    /// Decode from TOML.
    ///
    /// # Errors
    ///
    /// `Format` if `text` is not a valid save of the current version.
    pub fn from_toml(text: &str) -> Result<SessionData, CubeError> {
        toml::from_str(text).map_err(|e| CubeError::Format(e.to_string()))
    }
}

/// A session saved to a single TOML file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> SessionStore {
        SessionStore { path: path.into() }
    }

    /// `<data dir>/cube/session.toml`, if the platform has a data directory.
    pub fn default_location() -> Option<SessionStore> {
        dirs::data_dir().map(|dir| SessionStore::new(dir.join("cube").join("session.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there is a save to resume.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write `data`, replacing any previous save.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be written.
    pub fn save(&self, data: &SessionData) -> Result<(), CubeError> {
        let text = data.to_toml()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)?;

        info!(
            "Saved {} moves to {}",
            data.moves.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the save. A missing file is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `Io` if the file exists but cannot be read, `Format` if it cannot be
    /// decoded.
    pub fn load(&self) -> Result<Option<SessionData>, CubeError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No save at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let data = SessionData::from_toml(&text)?;
        info!(
            "Loaded {} moves from {}",
            data.moves.len(),
            self.path.display()
        );
        Ok(Some(data))
    }

    /// Remove the save. Returns whether there was one.
    ///
    /// # Errors
    ///
    /// `Io` if the file exists but cannot be removed.
    pub fn delete(&self) -> Result<bool, CubeError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Reconstruct the engine of a saved session by replaying its log on a
    /// fresh grid. Undo and redo history is not part of a save, so both
    /// stacks start out empty.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` or `InvalidMove` if the save does not describe a
    /// valid cube.
    pub fn rebuild(data: &SessionData) -> Result<MoveEngine, CubeError> {
        MoveEngine::replay(data.dimension, &data.moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Axis;

    const SAVE: &str = r#"
version = 1
dimension = 3
elapsed_seconds = 12.5

[[moves]]
axis = "X"
angle = 90.0
index = 0

[[moves]]
axis = "y"
angle = -90.0
index = 2

[[moves]]
axis = "Z"
angle = 0.0
index = 1
"#;

    #[test]
    fn decodes_the_documented_format() {
        let data = SessionData::from_toml(SAVE).unwrap();
        assert_eq!(data.dimension, 3);
        assert!((data.elapsed_seconds - 12.5).abs() < f64::EPSILON);
        assert_eq!(
            data.moves,
            [
                Move::new(Axis::X, 0, Angle::Clockwise),
                Move::new(Axis::Y, 2, Angle::CounterClockwise),
                Move::new(Axis::Z, 1, Angle::Zero),
            ]
        );
    }

    #[test]
    fn encodes_axes_and_angles_as_documented() {
        let data = SessionData {
            dimension: 4,
            elapsed_seconds: 3.25,
            moves: vec![Move::new(Axis::Y, 3, Angle::CounterClockwise)],
        };
        let text = data.to_toml().unwrap();
        assert!(text.contains("version = 1"), "{text}");
        assert!(text.contains("axis = \"Y\""), "{text}");
        assert!(text.contains("angle = -90.0"), "{text}");
        assert_eq!(SessionData::from_toml(&text).unwrap(), data);
    }

    #[test]
    fn rejects_bad_saves() {
        let future = SAVE.replace("version = 1", "version = 2");
        assert!(matches!(
            SessionData::from_toml(&future),
            Err(CubeError::Format(_))
        ));

        let half_turn = SAVE.replace("angle = 90.0", "angle = 180.0");
        assert!(matches!(
            SessionData::from_toml(&half_turn),
            Err(CubeError::Format(_))
        ));

        let bad_axis = SAVE.replace("axis = \"X\"", "axis = \"W\"");
        assert!(SessionData::from_toml(&bad_axis).is_err());
        assert!(SessionData::from_toml("dimension = 3").is_err());
    }

    #[test]
    fn empty_log_is_allowed() {
        let data = SessionData::from_toml("version = 1\ndimension = 2\nelapsed_seconds = 0.0\n")
            .unwrap();
        assert!(data.moves.is_empty());
        let engine = SessionStore::rebuild(&data).unwrap();
        assert_eq!(engine.dimension(), 2);
    }

    #[test]
    fn rebuild_validates() {
        let data = SessionData {
            dimension: 1,
            elapsed_seconds: 0.0,
            moves: vec![],
        };
        assert!(matches!(
            SessionStore::rebuild(&data),
            Err(CubeError::InvalidDimension { dimension: 1 })
        ));

        let data = SessionData {
            dimension: 2,
            elapsed_seconds: 0.0,
            moves: vec![Move::new(Axis::X, 2, Angle::Clockwise)],
        };
        assert!(matches!(
            SessionStore::rebuild(&data),
            Err(CubeError::InvalidMove { .. })
        ));
    }
}
