//! Widget refresh pipeline for vane: icon resolution, change
//! detection, per-surface rendering, and the refresh-cycle
//! orchestrator.

pub mod cycle;
pub mod detect;
pub mod icons;
pub mod render;

pub use cycle::{CycleOutcome, RefreshCycle};
pub use detect::{is_significant, SIGNIFICANT_TEMP_DELTA_C};
pub use icons::{IconId, IconRegistry, StaticIconRegistry};
pub use render::{
    Layout, RenderInstruction, SurfaceDescriptor, WidgetHost, WIDE_WIDTH_THRESHOLD,
};
