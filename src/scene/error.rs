use crate::formats::{JsonError, StoreError};

pub type SceneParseResult<T> = Result<T, SceneParseError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SceneParseError {
	#[error(transparent)]
	Store(#[from] StoreError),
	#[error(transparent)]
	Json(#[from] JsonError),
	#[error("Node record {record} has no {component:?} component")]
	MissingComponent { record: usize, component: &'static str },
	#[error("Asset {0:?} is neither a sprite frame nor a known file")]
	UnresolvedAsset(String),
	#[error("Font file {0:?} is neither .ttf nor .fnt")]
	InvalidFontFile(String),
	#[error("Unknown {table} code {code}")]
	UnknownCode { table: &'static str, code: i64 },
	#[error("ScrollView record {record} has no {part:?} child")]
	MissingScrollViewPart { record: usize, part: &'static str },
	#[error("ScrollView content child record {record} has no position")]
	ScrollChildWithoutPosition { record: usize },
}

impl SceneParseError {
	pub fn nested(self, key: &str) -> Self {
		match self {
			SceneParseError::Json(err) => SceneParseError::Json(err.nested(key)),
			_ => self,
		}
	}
}
