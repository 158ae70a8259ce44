//! Turns a built [`SceneTree`] into C++ source text.

mod header;
mod setup;

use std::fmt::{self, Write};

use indextree::NodeId;
use tracing::trace;

use crate::assets::AssetIndex;
use crate::node::components::DesignResolution;
use crate::node::{NodeKind, SceneNode};
use crate::scene::SceneTree;
use crate::TranslateOptions;

pub use header::header;

pub(crate) const BANNER_BEGIN: &str = "////// AUTOGENERATED:BEGIN //////";
pub(crate) const BANNER_DO_NOT_EDIT: &str = "////// DO     NOT     EDIT //////";
pub(crate) const BANNER_END: &str = "////// AUTOGENERATED:END//////";

/// Full source file: setup function, then the scene construction function.
pub fn source(
	tree: &SceneTree,
	design: Option<&DesignResolution>,
	assets: &AssetIndex,
	options: &TranslateOptions,
) -> Result<String, fmt::Error> {
	let scene_name = &options.scene_name;
	let mut out = String::new();

	writeln!(out, "{BANNER_BEGIN}")?;
	writeln!(out, "{BANNER_DO_NOT_EDIT}")?;
	writeln!(out)?;
	writeln!(out, "#include <ui/CocosGUI.h>")?;
	writeln!(out, "#include \"creator_utils.h\"")?;

	writeln!(out)?;
	writeln!(out, "USING_NS_CC;")?;
	writeln!(out)?;
	write!(out, "bool {scene_name}_init()\n{{")?;
	setup::write_design_resolution(&mut out, design)?;
	setup::write_sprite_frames(&mut out, assets, options)?;
	writeln!(out)?;
	writeln!(out, "    return true;")?;
	writeln!(out, "}}")?;

	writeln!(out, "Node* {scene_name}_create()\n{{")?;
	let mut emitter = Emitter::new(options);
	let root = emitter.emit_tree(tree)?;
	out.push_str(&emitter.finish());
	writeln!(out, "    return {root};")?;
	writeln!(out, "}}")?;
	writeln!(out, "{BANNER_END}")?;

	Ok(out)
}

/// Makes `text` usable as a C++ identifier.
pub fn identifier(text: &str) -> String {
	let mut ident = text
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
		.collect::<String>();
	if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
		ident.insert(0, '_');
	}
	ident
}

#[derive(Clone, Copy)]
struct Parent<'t> {
	node: &'t SceneNode,
	name: &'t str,
}

/// Writes construction statements for a tree, depth first: a node is fully
/// configured and attached before any of its children is declared.
pub struct Emitter<'o> {
	options: &'o TranslateOptions,
	next_id: usize,
	out: String,
}

impl<'o> Emitter<'o> {
	pub fn new(options: &'o TranslateOptions) -> Self {
		Self {
			options,
			next_id: 0,
			out: String::new(),
		}
	}

	/// Emits the whole tree and returns the name the root was declared under.
	pub fn emit_tree(&mut self, tree: &SceneTree) -> Result<String, fmt::Error> {
		let root = self.emit_node(tree, tree.root, None, 0, 0)?;
		Ok(root.unwrap_or_else(|| "nullptr".to_owned()))
	}

	pub fn finish(self) -> String {
		self.out
	}

	fn unique_name(&mut self, kind: NodeKind) -> String {
		let name = format!("{}_{}", kind.class_name().to_lowercase().replace(':', ""), self.next_id);
		self.next_id += 1;
		name
	}

	fn emit_node(
		&mut self,
		tree: &SceneTree,
		id: NodeId,
		parent: Option<Parent<'_>>,
		depth: usize,
		sibling: usize,
	) -> Result<Option<String>, fmt::Error> {
		let Some(node) = tree.node(id) else {
			return Ok(None);
		};

		// a Canvas only contributes its design resolution, its children go to its parent
		if node.kind() == NodeKind::Canvas {
			for (index, child) in tree.children(id).enumerate() {
				self.emit_node(tree, child, parent, depth + 1, index)?;
			}
			return Ok(None);
		}

		let name = self.unique_name(node.kind());
		trace!(depth, sibling, "Emitting {} as {name}", node.kind());

		writeln!(self.out, "    // New node")?;
		writeln!(
			self.out,
			"    auto {name} = {}::{};",
			node.kind().class_name(),
			node.data.create_params(self.options)
		)?;
		for (kind, value) in node.props.iter() {
			writeln!(self.out, "    {name}->{}({value});", kind.setter())?;
		}
		node.data.post_construct(&name, &mut self.out)?;

		if let Some(parent) = parent {
			writeln!(
				self.out,
				"    {}->{}({name});",
				parent.name,
				parent.node.data.attach_call(node)
			)?;
		}

		let this = Parent { node, name: &name };
		for (index, child) in tree.children(id).enumerate() {
			self.emit_node(tree, child, Some(this), depth + 1, index)?;
		}

		Ok(Some(name))
	}
}
