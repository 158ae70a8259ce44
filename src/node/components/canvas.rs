use glam::DVec2;
use tracing::warn;

use crate::node::cc;
use crate::scene::{SceneContext, SceneParseResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignResolution {
	pub size: DVec2,
	pub fit_width: bool,
	pub fit_height: bool,
}

/// How the design resolution maps onto the device frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPolicy {
	/// Stretch the design size over the frame.
	ExactFit,
	/// Keep the design height, derive the width from the frame's aspect.
	FitHeight,
	/// Keep the design width, derive the height from the frame's aspect.
	FitWidth,
	NoBorder,
}

impl DesignResolution {
	pub fn policy(&self) -> ResolutionPolicy {
		match (self.fit_width, self.fit_height) {
			(true, true) => ResolutionPolicy::ExactFit,
			(false, true) => ResolutionPolicy::FitHeight,
			(true, false) => ResolutionPolicy::FitWidth,
			(false, false) => ResolutionPolicy::NoBorder,
		}
	}
}

/// The Canvas only carries the design resolution. It emits no node of its own.
#[derive(Debug, Clone)]
pub struct Canvas {
	pub design: DesignResolution,
}

impl Canvas {
	pub(super) fn parse(cx: &mut SceneContext, record: usize) -> SceneParseResult<Self> {
		let component = cx.component(record, cc::CANVAS)?;
		let design = DesignResolution {
			size: component.get_size("_designResolution")?,
			fit_width: component.get_bool("_fitWidth")?,
			fit_height: component.get_bool("_fitHeight")?,
		};

		if cx.design.replace(design).is_some() {
			warn!("Scene has more than one Canvas, using the design resolution of record {record}");
		}
		Ok(Self { design })
	}
}
