use std::fmt::{self, Write};

/// Declarations of the two generated entry points.
pub fn header(scene_name: &str) -> Result<String, fmt::Error> {
	let mut out = String::new();
	writeln!(out)?;
	writeln!(out, "{}", super::BANNER_BEGIN)?;
	writeln!(out, "{}", super::BANNER_DO_NOT_EDIT)?;
	writeln!(out, "#pragma once")?;
	writeln!(out)?;
	writeln!(out, "#include <cocos2d.h>")?;
	writeln!(out)?;
	writeln!(out, "bool {scene_name}_init();")?;
	writeln!(out, "cocos2d::Node* {scene_name}_create();")?;
	writeln!(out)?;
	writeln!(out, "{}", super::BANNER_END)?;
	Ok(out)
}
