//! Body of `<scene>_init()`: design resolution and sprite frame registration.

use std::collections::HashSet;
use std::fmt::{self, Write};

use tracing::{info, warn};

use crate::assets::AssetIndex;
use crate::node::components::{DesignResolution, ResolutionPolicy};
use crate::node::props::{escape, fmt_g};
use crate::TranslateOptions;

use super::identifier;

pub(super) fn write_design_resolution(out: &mut String, design: Option<&DesignResolution>) -> fmt::Result {
	let Some(design) = design else {
		warn!("No Canvas found, design resolution left unchanged");
		return writeln!(out, "\n    // No Canvas found: design resolution left unchanged");
	};

	let width = design.size.x as i64;
	let height = design.size.y as i64;

	writeln!(out)?;
	writeln!(out, "    auto director = Director::getInstance();")?;
	writeln!(out, "    auto glview = director->getOpenGLView();")?;

	let (w, h) = match design.policy() {
		ResolutionPolicy::ExactFit => {
			return writeln!(
				out,
				"    glview->setDesignResolutionSize({width}, {height}, ResolutionPolicy::EXACT_FIT);"
			);
		}
		ResolutionPolicy::FitHeight => (
			format!("frameSize.width / (frameSize.height / {height})"),
			format!("frameSize.height / (frameSize.height / {height})"),
		),
		ResolutionPolicy::FitWidth => (
			format!("frameSize.width / (frameSize.width / {width})"),
			format!("frameSize.height / (frameSize.width / {width})"),
		),
		ResolutionPolicy::NoBorder => (width.to_string(), height.to_string()),
	};

	writeln!(out, "    auto frameSize = glview->getFrameSize();")?;
	writeln!(out, "    glview->setDesignResolutionSize({w}, {h}, ResolutionPolicy::NO_BORDER);")
}

/// Registers every standalone sprite frame with the frame cache. Atlases are
/// only listed: their frames are loaded together with the atlas file.
///
/// Frame names that sanitize to the same identifier get a numeric suffix so
/// every `sf_` variable is declared once.
pub(super) fn write_sprite_frames(out: &mut String, assets: &AssetIndex, options: &TranslateOptions) -> fmt::Result {
	let asset_path = &options.asset_path;

	writeln!(out)?;
	writeln!(out, "    // BEGIN SpriteFrame loading")?;
	writeln!(out, "    auto spriteFrameCache = SpriteFrameCache::getInstance();")?;
	writeln!(out, "    // Files from .plist")?;
	for atlas in assets.atlas_files() {
		writeln!(
			out,
			"    // {asset_path}{atlas} processed manually. No need to include it in the assets folder"
		)?;
	}

	writeln!(out)?;
	writeln!(out, "    // Files from .png")?;
	let mut declared = HashSet::new();
	for frame in assets.standalone_frames() {
		let Some(texture_uuid) = &frame.raw_texture_uuid else {
			info!("Frame {:?} has no texture, not registering it", frame.name);
			continue;
		};
		let Some(texture) = assets.file(texture_uuid) else {
			warn!("Texture {texture_uuid:?} of frame {:?} is not in the uuid table", frame.name);
			continue;
		};

		let var = frame_variable(&mut declared, &frame.name);
		writeln!(
			out,
			"    auto {var} = SpriteFrame::create(\"{}\", Rect({}, {}, {}, {}), {}, Vec2({}, {}), Size({}, {}));",
			escape(&format!("{asset_path}{texture}")),
			fmt_g(frame.trim.x),
			fmt_g(frame.trim.y),
			fmt_g(frame.size.x),
			fmt_g(frame.size.y),
			frame.rotated,
			fmt_g(frame.offset.x),
			fmt_g(frame.offset.y),
			fmt_g(frame.raw_size.x),
			fmt_g(frame.raw_size.y),
		)?;

		let border = &frame.border;
		if !border.is_zero() {
			let x = border.left as i64;
			let y = border.top as i64;
			let w = (frame.size.x - border.right) as i64 - x;
			let h = (frame.size.y - border.bottom) as i64 - y;
			writeln!(out, "    {var}->setCenterRectInPixels(Rect({x},{y},{w},{h}));")?;
		}

		writeln!(out, "    spriteFrameCache->addSpriteFrame({var}, \"{}\");", escape(&frame.name))?;
	}
	writeln!(out, "    // END SpriteFrame loading")
}

fn frame_variable(declared: &mut HashSet<String>, frame_name: &str) -> String {
	let base = format!("sf_{}", identifier(frame_name));
	let mut var = base.clone();
	let mut suffix = 1;
	while !declared.insert(var.clone()) {
		var = format!("{base}_{suffix}");
		suffix += 1;
	}
	var
}
