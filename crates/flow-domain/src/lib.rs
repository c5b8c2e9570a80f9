// flow-domain library entry point
pub mod event;
pub mod flow;
pub mod meta;

pub use event::{AssertionData, AssertionEvent, PointData, PointEvent, TimelineEvent};
pub use flow::{Flow, FlowStats, FlowStatus};
pub use meta::{PageMeta, TimelineMeta};
