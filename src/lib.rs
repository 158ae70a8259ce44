pub mod assets;
pub mod codegen;
pub mod formats;
pub mod node;
pub mod scene;

use std::collections::BTreeSet;
use std::fmt;

use assets::AssetIndex;
use formats::{ObjectStore, StoreError};
use scene::{SceneContext, SceneParseError, SceneTree};

/// Per-invocation settings of a translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
	/// Prefix of the generated `<name>_init` and `<name>_create` functions.
	pub scene_name: String,
	/// Prepended to every asset path written into the generated code.
	pub asset_path: String,
}

impl TranslateOptions {
	/// `scene_name` is turned into a valid C++ identifier.
	pub fn new(scene_name: &str) -> Self {
		Self {
			scene_name: codegen::identifier(scene_name),
			asset_path: String::new(),
		}
	}

	/// Sets the asset path prefix, adding a trailing `/` to a non-empty one.
	pub fn with_asset_path(mut self, asset_path: &str) -> Self {
		self.asset_path = asset_path.to_owned();
		if !self.asset_path.is_empty() && !self.asset_path.ends_with('/') {
			self.asset_path.push('/');
		}
		self
	}
}

/// Generated files of one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
	pub source: String,
	pub header: String,
	/// Files the generated code loads by path, relative to the asset path.
	pub resources: BTreeSet<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("Could not translate scene\n  - {0}")]
pub enum TranslateError {
	JsonParse(#[from] json::Error),
	Store(#[from] StoreError),
	Scene(#[from] SceneParseError),
	Fmt(#[from] fmt::Error),
}

/// Translates the text of one `.fire` scene document.
///
/// Every call is independent: node names are numbered from zero and nothing
/// is shared with other translations except the read-only asset index.
pub fn translate(scene: &str, assets: &AssetIndex, options: &TranslateOptions) -> Result<Translation, TranslateError> {
	let store = ObjectStore::from_json(json::parse(scene)?)?;
	tracing::debug!("Scene document has {} records", store.len());

	let mut cx = SceneContext::new(&store, assets);
	let tree = SceneTree::build(&mut cx)?;
	tracing::debug!("Scene graph:\n{tree}");

	let source = codegen::source(&tree, cx.design.as_ref(), assets, options)?;
	let header = codegen::header(&options.scene_name)?;

	Ok(Translation {
		source,
		header,
		resources: cx.resources,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const HERO_META: &str = r#"{
		"uuid": "tex-hero", "type": "sprite",
		"subMetas": { "hero": {
			"uuid": "frame-hero", "rawTextureUuid": "tex-hero",
			"trimX": 0, "trimY": 0, "width": 32, "height": 32, "rotated": false,
			"offsetX": 0, "offsetY": 0, "rawWidth": 32, "rawHeight": 32,
			"borderTop": 0, "borderBottom": 0, "borderLeft": 0, "borderRight": 0
		} }
	}"#;

	const UI_META: &str = r#"{
		"uuid": "tex-ui", "type": "sprite",
		"subMetas": { "panel": {
			"uuid": "frame-panel", "rawTextureUuid": "tex-ui",
			"trimX": 0, "trimY": 0, "width": 64, "height": 64, "rotated": false,
			"offsetX": 0, "offsetY": 0, "rawWidth": 64, "rawHeight": 64
		} }
	}"#;

	fn assets() -> AssetIndex {
		let mut builder = AssetIndex::builder();
		builder.meta(&json::parse(HERO_META).unwrap()).unwrap();
		builder.meta(&json::parse(UI_META).unwrap()).unwrap();
		builder
			.file("tex-hero", "hero.png")
			.file("tex-ui", "ui.png")
			.file("font-ttf", "fonts/title.ttf")
			.file("font-fnt", "fonts/score.fnt")
			.file("fx-stars", "fx/stars.plist");
		builder.build()
	}

	const CANVAS_SCENE: &str = r#"[
		{ "__type__": "cc.SceneAsset", "scene": { "__id__": 1 } },
		{ "__type__": "cc.Scene", "_children": [{ "__id__": 2 }] },
		{ "__type__": "cc.Node", "_name": "Canvas", "_components": [{ "__id__": 3 }], "_children": [{ "__id__": 4 }] },
		{
			"__type__": "cc.Canvas",
			"_designResolution": { "__type__": "cc.Size", "width": 960, "height": 640 },
			"_fitWidth": true,
			"_fitHeight": true
		},
		{
			"__type__": "cc.Node",
			"_name": "hero",
			"_position": { "__type__": "cc.Vec2", "x": 480, "y": 320 },
			"_components": [{ "__id__": 5 }]
		},
		{ "__type__": "cc.Sprite", "_type": 0, "_spriteFrame": { "__uuid__": "frame-hero" } }
	]"#;

	fn node_lines(source: &str) -> Vec<&str> {
		let start = source.find("_create()\n{\n").unwrap() + "_create()\n{\n".len();
		source[start..].lines().collect()
	}

	#[test]
	fn canvas_with_sprite() {
		let options = TranslateOptions::new("menu");
		let translation = translate(CANVAS_SCENE, &assets(), &options).unwrap();

		let expected = "////// AUTOGENERATED:BEGIN //////
////// DO     NOT     EDIT //////

#include <ui/CocosGUI.h>
#include \"creator_utils.h\"

USING_NS_CC;

bool menu_init()
{
    auto director = Director::getInstance();
    auto glview = director->getOpenGLView();
    glview->setDesignResolutionSize(960, 640, ResolutionPolicy::EXACT_FIT);

    // BEGIN SpriteFrame loading
    auto spriteFrameCache = SpriteFrameCache::getInstance();
    // Files from .plist

    // Files from .png
    auto sf_hero = SpriteFrame::create(\"hero.png\", Rect(0, 0, 32, 32), false, Vec2(0, 0), Size(32, 32));
    spriteFrameCache->addSpriteFrame(sf_hero, \"hero\");
    auto sf_panel = SpriteFrame::create(\"ui.png\", Rect(0, 0, 64, 64), false, Vec2(0, 0), Size(64, 64));
    spriteFrameCache->addSpriteFrame(sf_panel, \"panel\");
    // END SpriteFrame loading

    return true;
}
Node* menu_create()
{
    // New node
    auto scene_0 = Scene::create();
    // New node
    auto sprite_1 = Sprite::create();
    sprite_1->setName(\"hero\");
    sprite_1->setPosition(Vec2(480, 320));
    sprite_1->setSpriteFrame(\"hero\");
    sprite_1->setCenterRectNormalized(Rect(0,0,1,1));
    scene_0->addChild(sprite_1);
    return scene_0;
}
////// AUTOGENERATED:END//////
";
		assert_eq!(translation.source, expected);
		assert!(translation.header.contains("bool menu_init();\ncocos2d::Node* menu_create();\n"));
		assert!(translation.resources.is_empty());
	}

	#[test]
	fn translations_are_independent() {
		let assets = assets();
		let options = TranslateOptions::new("menu");
		let first = translate(CANVAS_SCENE, &assets, &options).unwrap();
		let second = translate(CANVAS_SCENE, &assets, &options).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn button_takes_label_as_title() {
		let scene = r#"[
			{ "__type__": "cc.SceneAsset", "scene": { "__id__": 1 } },
			{ "__type__": "cc.Scene", "_children": [{ "__id__": 2 }] },
			{ "__type__": "cc.Node", "_components": [{ "__id__": 3 }, { "__id__": 4 }], "_children": [{ "__id__": 5 }, { "__id__": 7 }] },
			{ "__type__": "cc.Sprite", "_type": 1, "_spriteFrame": { "__uuid__": "frame-panel" } },
			{ "__type__": "cc.Button", "_N$normalSprite": null },
			{ "__type__": "cc.Node", "_components": [{ "__id__": 6 }] },
			{
				"__type__": "cc.Label", "_isSystemFontUsed": true, "_fontSize": 24, "_N$string": "Play",
				"_N$horizontalAlign": 1, "_N$verticalAlign": 1
			},
			{ "__type__": "cc.Node", "_components": [{ "__id__": 8 }] },
			{ "__type__": "cc.Sprite", "_type": 0, "_spriteFrame": { "__uuid__": "frame-hero" } }
		]"#;
		let translation = translate(scene, &assets(), &TranslateOptions::new("ui")).unwrap();
		let lines = node_lines(&translation.source);

		assert!(lines.contains(&"    auto uibutton_1 = ui::Button::create(\"panel\", \"\", \"\", ui::Widget::TextureResType::PLIST);"));
		assert!(lines.contains(&"    uibutton_1->ignoreContentAdaptWithSize(false);"));
		assert!(lines.contains(&"    auto label_2 = Label::createWithSystemFont(\"Play\", \"arial\", 24);"));
		assert!(lines.contains(&"    uibutton_1->setTitleLabel(label_2);"));
		assert!(lines.contains(&"    uibutton_1->addChild(sprite_3);"));
		assert!(lines.contains(&"    scene_0->addChild(uibutton_1);"));
		assert!(!lines.contains(&"    uibutton_1->addChild(label_2);"));
		assert!(!lines.contains(&"    uibutton_1->setTitleLabel(sprite_3);"));
	}

	#[test]
	fn scroll_view_adopts_content_items() {
		let scene = r#"[
			{ "__type__": "cc.SceneAsset", "scene": { "__id__": 1 } },
			{ "__type__": "cc.Scene", "_children": [{ "__id__": 2 }] },
			{ "__type__": "cc.Node", "_components": [{ "__id__": 3 }, { "__id__": 4 }], "_children": [{ "__id__": 5 }] },
			{ "__type__": "cc.Sprite", "_type": 0, "_spriteFrame": { "__uuid__": "frame-panel" } },
			{ "__type__": "cc.ScrollView", "horizontal": true, "vertical": true, "elastic": false },
			{ "__type__": "cc.Node", "_name": "view", "_children": [{ "__id__": 6 }] },
			{
				"__type__": "cc.Node",
				"_name": "content",
				"_contentSize": { "width": 200, "height": 500 },
				"_anchorPoint": { "x": 0, "y": 1 },
				"_children": [{ "__id__": 7 }]
			},
			{
				"__type__": "cc.Node",
				"_name": "row",
				"_position": { "x": 10, "y": -20 },
				"_components": [{ "__id__": 8 }]
			},
			{ "__type__": "cc.Sprite", "_type": 0, "_spriteFrame": { "__uuid__": "frame-hero" } }
		]"#;
		let translation = translate(scene, &assets(), &TranslateOptions::new("list")).unwrap();
		let lines = node_lines(&translation.source);

		let expected = vec![
			"    // New node",
			"    auto scene_0 = Scene::create();",
			"    // New node",
			"    auto uiscrollview_1 = ui::ScrollView::create();",
			"    uiscrollview_1->setBackGroundImage(\"panel\", ui::Widget::TextureResType::PLIST);",
			"    uiscrollview_1->setBackGroundImageScale9Enabled(false);",
			"    uiscrollview_1->setDirection(ui::ScrollView::Direction::BOTH);",
			"    uiscrollview_1->setBounceEnabled(false);",
			"    uiscrollview_1->setInnerContainerSize(Size(200, 500));",
			"    uiscrollview_1->jumpToPercentVertical(0);",
			"    uiscrollview_1->jumpToPercentHorizontal(0);",
			"    scene_0->addChild(uiscrollview_1);",
			"    // New node",
			"    auto sprite_2 = Sprite::create();",
			"    sprite_2->setName(\"row\");",
			"    sprite_2->setPosition(Vec2(10, 480));",
			"    sprite_2->setSpriteFrame(\"hero\");",
			"    sprite_2->setCenterRectNormalized(Rect(0,0,1,1));",
			"    uiscrollview_1->addChild(sprite_2);",
			"    return scene_0;",
			"}",
			"////// AUTOGENERATED:END//////",
		];
		assert_eq!(lines, expected);
	}

	#[test]
	fn labels_pick_constructor_by_font_file() {
		let scene = r#"[
			{ "__type__": "cc.SceneAsset", "scene": { "__id__": 1 } },
			{ "__type__": "cc.Scene", "_children": [{ "__id__": 2 }, { "__id__": 4 }] },
			{ "__type__": "cc.Node", "_components": [{ "__id__": 3 }] },
			{
				"__type__": "cc.Label", "_isSystemFontUsed": false, "_fontSize": 30, "_lineHeight": 36,
				"_N$string": "Title", "_N$horizontalAlign": 0, "_N$verticalAlign": 0,
				"_N$file": { "__uuid__": "font-ttf" }
			},
			{ "__type__": "cc.Node", "_components": [{ "__id__": 5 }] },
			{
				"__type__": "cc.Label", "_isSystemFontUsed": false, "_fontSize": 30, "_lineHeight": 36,
				"_N$string": "0", "_N$horizontalAlign": 2, "_N$verticalAlign": 0,
				"_N$file": { "__uuid__": "font-fnt" }
			}
		]"#;
		let options = TranslateOptions::new("hud").with_asset_path("creator");
		let translation = translate(scene, &assets(), &options).unwrap();
		let lines = node_lines(&translation.source);

		assert!(lines.contains(&"    auto label_1 = Label::createWithTTF(\"Title\", \"creator/fonts/title.ttf\", 30);"));
		assert!(lines.contains(&"    label_1->setLineHeight(36);"));
		assert!(lines.contains(&"    auto label_2 = Label::createWithBMFont(\"creator/fonts/score.fnt\", \"0\");"));
		assert!(lines.contains(&"    label_2->setBMFontSize(30);"));
		assert!(lines.contains(&"    label_2->setHorizontalAlignment(TextHAlignment::RIGHT);"));
	}

	#[test]
	fn resources_and_missing_canvas() {
		let scene = r#"[
			{ "__type__": "cc.SceneAsset", "scene": { "__id__": 1 } },
			{ "__type__": "cc.Scene", "_children": [{ "__id__": 2 }] },
			{ "__type__": "cc.Node", "_components": [{ "__id__": 3 }] },
			{ "__type__": "cc.ParticleSystem", "_file": { "__uuid__": "fx-stars" } }
		]"#;
		let translation = translate(scene, &assets(), &TranslateOptions::new("fx")).unwrap();

		assert!(translation.source.contains("bool fx_init()\n{\n    // No Canvas found: design resolution left unchanged\n"));
		assert!(translation.source.contains("    auto particlesystemquad_1 = ParticleSystemQuad::create(\"fx/stars.plist\");"));
		assert_eq!(translation.resources.into_iter().collect::<Vec<_>>(), vec!["fx/stars.plist"]);
	}

	#[test]
	fn broken_documents() {
		let assets = assets();
		let options = TranslateOptions::new("broken");

		assert!(matches!(
			translate("[1, 2", &assets, &options),
			Err(TranslateError::JsonParse(_))
		));
		assert!(matches!(
			translate("{}", &assets, &options),
			Err(TranslateError::Store(StoreError::NotAList))
		));
		assert!(matches!(
			translate(r#"[{ "__type__": "cc.Scene" }]"#, &assets, &options),
			Err(TranslateError::Scene(SceneParseError::Store(StoreError::NoSceneAsset)))
		));
		assert!(matches!(
			translate(
				r#"[{ "__type__": "cc.SceneAsset", "scene": { "__id__": 4 } }]"#,
				&assets,
				&options
			),
			Err(TranslateError::Scene(SceneParseError::Store(StoreError::IndexOutOfRange {
				index: 4,
				len: 1
			})))
		));
	}

	#[test]
	fn options() {
		let options = TranslateOptions::new("main-menu").with_asset_path("assets");
		assert_eq!(options.scene_name, "main_menu");
		assert_eq!(options.asset_path, "assets/");
		assert_eq!(TranslateOptions::new("x").with_asset_path("").asset_path, "");
		assert_eq!(TranslateOptions::new("x").with_asset_path("a/").asset_path, "a/");
	}
}
