use crate::node::cc;
use crate::node::props::escape;
use crate::scene::{SceneContext, SceneParseResult};
use crate::TranslateOptions;

#[derive(Debug, Clone)]
pub struct ParticleSystem {
	/// Path of the `.plist` emitter description.
	pub file: String,
}

impl ParticleSystem {
	pub(super) fn parse(cx: &mut SceneContext, record: usize) -> SceneParseResult<Self> {
		let component = cx.component(record, cc::PARTICLE_SYSTEM)?;
		let file = cx.file_path(component.get_uuid("_file")?)?.to_owned();
		cx.require_resource(&file);
		Ok(Self { file })
	}

	pub(super) fn create_params(&self, options: &TranslateOptions) -> String {
		format!("create(\"{}\")", escape(&format!("{}{}", options.asset_path, self.file)))
	}
}
