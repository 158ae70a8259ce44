use crate::node::cc;
use crate::node::props::{PropKind, PropValue, PropertyMap};
use crate::scene::{SceneContext, SceneParseResult};

#[derive(Debug, Clone)]
pub struct ProgressBar {
	/// Fill amount in percent, 0 to 100.
	pub percent: f64,
}

impl ProgressBar {
	pub(super) fn parse(cx: &mut SceneContext, record: usize, props: &mut PropertyMap) -> SceneParseResult<Self> {
		let component = cx.component(record, cc::PROGRESS_BAR)?;
		let percent = component.get_f64("_N$progress")? * 100.0;
		props.insert(PropKind::Percent, PropValue::Float(percent));
		Ok(Self { percent })
	}
}
