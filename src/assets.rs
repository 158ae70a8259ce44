//! Read-only uuid lookup over project metadata: the project-wide uuid table
//! (uuid to relative path) and the sprite frames declared by `.meta` files.

mod frame;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use json::JsonValue;

use crate::formats::json::SerialExtend;
use crate::formats::{JsonError, JsonObject};

pub use frame::{Border, SpriteFrame};

pub type AssetIndexResult<T> = Result<T, AssetIndexError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AssetIndexError {
	#[error(transparent)]
	Json(#[from] JsonError),
	#[error("uuid table is not an object")]
	UuidTableIsNotObject,
}

const META_SPRITE: &str = "sprite";
const META_ATLAS: &str = "Texture Packer";

#[derive(Debug, Default)]
pub struct AssetIndex {
	files: HashMap<String, String>,
	frames: BTreeMap<String, SpriteFrame>,
	atlases: BTreeSet<String>,
}

impl AssetIndex {
	pub fn builder() -> AssetIndexBuilder {
		AssetIndexBuilder::default()
	}

	pub fn frame(&self, uuid: &str) -> Option<&SpriteFrame> {
		self.frames.get(uuid)
	}

	/// Relative path of a raw asset file.
	pub fn file(&self, uuid: &str) -> Option<&str> {
		self.files.get(uuid).map(String::as_str)
	}

	/// Name to display an asset by: the sprite frame name when `uuid` is a frame, else its file path.
	pub fn display_name(&self, uuid: &str) -> Option<&str> {
		self.frame(uuid).map(|frame| frame.name.as_str()).or_else(|| self.file(uuid))
	}

	/// Path of a file asset, falling back to a sprite frame name.
	pub fn file_path(&self, uuid: &str) -> Option<&str> {
		self.file(uuid).or_else(|| self.frame(uuid).map(|frame| frame.name.as_str()))
	}

	/// Frames that are not part of an atlas, in uuid order.
	pub fn standalone_frames(&self) -> impl Iterator<Item = &SpriteFrame> {
		self.frames.values().filter(|frame| frame.is_standalone())
	}

	/// Atlas files whose frames are registered in bulk, sorted.
	pub fn atlas_files(&self) -> impl Iterator<Item = &str> {
		self.atlases.iter().map(String::as_str)
	}
}

#[derive(Debug, Default)]
pub struct AssetIndexBuilder {
	files: HashMap<String, String>,
	frames: BTreeMap<String, SpriteFrame>,
	atlas_uuids: BTreeSet<String>,
}

impl AssetIndexBuilder {
	pub fn file(&mut self, uuid: &str, relative_path: &str) -> &mut Self {
		self.files.insert(uuid.to_owned(), relative_path.to_owned());
		self
	}

	/// Consumes a uuid table of the form `{ "<uuid>": { "relativePath": "...", ... }, ... }`.
	pub fn uuid_table(&mut self, table: &JsonValue) -> AssetIndexResult<&mut Self> {
		let table = table.as_object().ok_or(AssetIndexError::UuidTableIsNotObject)?;
		for (uuid, entry) in table.iter() {
			let path = JsonObject::from_value(uuid, entry).and_then(|entry| entry.get_str("relativePath"));
			match path {
				Ok(path) => {
					self.file(uuid, path);
				}
				Err(e) => tracing::warn!("Skipping uuid table entry {uuid:?}: {e}"),
			}
		}
		Ok(self)
	}

	/// Consumes one `.meta` record. Only sprite and atlas metas declare frames, others are ignored.
	pub fn meta(&mut self, meta: &JsonValue) -> AssetIndexResult<&mut Self> {
		let meta = JsonObject::from_value("(meta)", meta)?;
		if !meta.has("type") {
			return Ok(self);
		}

		let atlas = match meta.get_str("type")? {
			META_SPRITE => None,
			META_ATLAS => Some(meta.get_str("uuid")?),
			other => {
				tracing::trace!("Ignoring meta of type {other:?}");
				return Ok(self);
			}
		};

		let sub_metas = meta.get_object("subMetas")?;
		for (name, sub_meta) in sub_metas.entries() {
			let frame = JsonObject::from_value(name, sub_meta)
				.and_then(|obj| SpriteFrame::deserialize(name, obj, atlas))
				.map_err(|e| e.nested(name).nested("subMetas"))?;
			if frame.raw_texture_uuid.is_none() {
				tracing::info!("Frame {name:?} doesn't have rawTextureUuid");
			}
			self.frames.insert(frame.uuid.clone(), frame);
		}

		if let Some(atlas) = atlas {
			self.atlas_uuids.insert(atlas.to_owned());
		}
		Ok(self)
	}

	pub fn build(self) -> AssetIndex {
		let mut atlases = BTreeSet::new();
		for uuid in &self.atlas_uuids {
			match self.files.get(uuid) {
				Some(path) => {
					atlases.insert(path.clone());
				}
				None => tracing::warn!("Atlas {uuid:?} is not in the uuid table"),
			}
		}

		AssetIndex {
			files: self.files,
			frames: self.frames,
			atlases,
		}
	}
}
