use crate::node::cc;
use crate::node::props::{escape, PropKind, PropertyMap};
use crate::scene::{SceneContext, SceneParseResult};
use crate::TranslateOptions;

#[derive(Debug, Clone)]
pub struct TiledMap {
	/// Path of the `.tmx` map.
	pub file: String,
}

impl TiledMap {
	pub(super) fn parse(cx: &mut SceneContext, record: usize, props: &mut PropertyMap) -> SceneParseResult<Self> {
		let component = cx.component(record, cc::TILED_MAP)?;
		let file = cx.file_path(component.get_uuid("_tmxFile")?)?.to_owned();
		cx.require_resource(&file);

		// the map sizes itself from its tiles
		props.remove(PropKind::ContentSize);

		Ok(Self { file })
	}

	pub(super) fn create_params(&self, options: &TranslateOptions) -> String {
		format!("create(\"{}\")", escape(&format!("{}{}", options.asset_path, self.file)))
	}
}

#[cfg(test)]
mod tests {
	use super::super::test_util::parse_node;
	use crate::node::props::PropKind;
	use crate::node::NodeKind;
	use crate::TranslateOptions;

	const DOC: &str = r#"[
		{
			"__type__": "cc.Node",
			"_name": "level",
			"_contentSize": { "__type__": "cc.Size", "width": 100, "height": 50 },
			"_components": [{ "__id__": 1 }]
		},
		{ "__type__": "cc.TiledMap", "_tmxFile": { "__uuid__": "map-level" } }
	]"#;

	#[test]
	fn map_drops_content_size() {
		parse_node(DOC, 0, NodeKind::TiledMap, |node, cx| {
			let node = node.unwrap();
			assert!(!node.props.contains(PropKind::ContentSize));
			assert!(node.props.contains(PropKind::Name));
			assert_eq!(
				node.data.create_params(&TranslateOptions::new("level")),
				r#"create("maps/level1.tmx")"#
			);
			assert_eq!(cx.resources.iter().collect::<Vec<_>>(), vec!["maps/level1.tmx"]);
		});
	}
}
