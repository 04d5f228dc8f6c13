//! Per-surface render instructions.
//!
//! A surface reports its width; anything at least
//! [`WIDE_WIDTH_THRESHOLD`] wide gets the wide layout with a condition
//! label, everything narrower gets the icon-only compact layout.

use serde::{Deserialize, Serialize};

use vane_core::Theme;
use vane_weather::Condition;

use crate::icons::{self, IconId, IconRegistry};

/// Width (in dp) at or above which a surface uses the wide layout.
pub const WIDE_WIDTH_THRESHOLD: u32 = 300;

/// One registered display surface, as reported by the widget host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    pub id: String,
    pub width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    Compact,
    Wide,
}

/// What a surface should show. Recomputed on every render, never
/// persisted. `icon: None` is the "no icon" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInstruction {
    pub layout: Layout,
    pub icon: Option<IconId>,
    pub label: Option<String>,
}

/// The widget host: owns the set of surfaces and applies instructions
/// to them. A failing surface must not take the others down with it.
pub trait WidgetHost {
    fn surfaces(&self) -> Vec<SurfaceDescriptor>;
    fn update_surface(
        &mut self,
        id: &str,
        instruction: &RenderInstruction,
    ) -> anyhow::Result<()>;
}

/// Compute the instruction for one surface. Pure and idempotent: the
/// host may call this redundantly (every size change, every cycle) and
/// identical inputs always yield identical instructions.
pub fn render(
    condition: Condition,
    theme: Theme,
    surface: &SurfaceDescriptor,
    registry: &dyn IconRegistry,
) -> RenderInstruction {
    let wide = surface.width >= WIDE_WIDTH_THRESHOLD;
    RenderInstruction {
        layout: if wide { Layout::Wide } else { Layout::Compact },
        icon: icons::resolve(condition, theme, registry),
        label: wide.then(|| condition.label().to_string()),
    }
}
