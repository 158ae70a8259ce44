use std::collections::BTreeSet;

use crate::assets::{AssetIndex, SpriteFrame};
use crate::formats::{JsonObject, ObjectStore};
use crate::node::components::DesignResolution;

use super::{SceneParseError, SceneParseResult};

/// State of one translation: the inputs, plus what node parsing collects on the side.
pub struct SceneContext<'a> {
	pub store: &'a ObjectStore,
	pub assets: &'a AssetIndex,
	/// Asset paths the generated code loads directly and that must ship with it.
	pub resources: BTreeSet<String>,
	/// Design resolution of the last Canvas seen.
	pub design: Option<DesignResolution>,
}

impl<'a> SceneContext<'a> {
	pub fn new(store: &'a ObjectStore, assets: &'a AssetIndex) -> Self {
		Self {
			store,
			assets,
			resources: BTreeSet::new(),
			design: None,
		}
	}

	/// Component of type `ty` on the node record, which the node's kind requires.
	pub fn component(&self, record: usize, ty: &'static str) -> SceneParseResult<JsonObject<'a>> {
		let store = self.store;
		store
			.component_of_type(record, ty)?
			.ok_or(SceneParseError::MissingComponent { record, component: ty })
	}

	pub fn frame(&self, uuid: &str) -> SceneParseResult<&'a SpriteFrame> {
		let assets = self.assets;
		assets
			.frame(uuid)
			.ok_or_else(|| SceneParseError::UnresolvedAsset(uuid.to_owned()))
	}

	pub fn display_name(&self, uuid: &str) -> SceneParseResult<&'a str> {
		let assets = self.assets;
		assets
			.display_name(uuid)
			.ok_or_else(|| SceneParseError::UnresolvedAsset(uuid.to_owned()))
	}

	pub fn file_path(&self, uuid: &str) -> SceneParseResult<&'a str> {
		let assets = self.assets;
		assets
			.file_path(uuid)
			.ok_or_else(|| SceneParseError::UnresolvedAsset(uuid.to_owned()))
	}

	pub fn require_resource(&mut self, path: &str) {
		if self.resources.insert(path.to_owned()) {
			tracing::debug!("Scene requires resource {path:?}");
		}
	}
}
