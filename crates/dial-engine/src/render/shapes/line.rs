use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, LineCap};

use super::common::InstancedPipeline;

/// Renderer for `DrawCmd::Line` (stroked segments with butt or round caps).
///
/// A zero-length segment with round caps renders as a dot, which is what a
/// canvas does for a round-capped `drawLine(p, p)`.
pub struct LineRenderer {
    pipeline: InstancedPipeline,
    instances: Vec<LineInstance>,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: InstancedPipeline::new(
                "line",
                include_str!("shaders/line.wgsl"),
                LineInstance::layout(),
            ),
            instances: Vec::new(),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.instances.clear();
        let srgb = ctx.surface_format.is_srgb();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Line(cmd) = &item.cmd else { continue };

            if cmd.width <= 0.0 || !cmd.from.is_finite() || !cmd.to.is_finite() {
                continue;
            }

            let cap = match cmd.cap {
                LineCap::Butt => 0.0,
                LineCap::Round => 1.0,
            };

            self.instances.push(LineInstance {
                p0: [cmd.from.x, cmd.from.y],
                p1: [cmd.to.x, cmd.to.y],
                half_width_cap: [cmd.width * 0.5, cap],
                color: cmd.color.to_target_array(srgb),
            });
        }

        self.pipeline.draw(ctx, target, &self.instances);
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (40 bytes):
///
///  offset  0  p0              [f32; 2]   loc 1
///  offset  8  p1              [f32; 2]   loc 2
///  offset 16  half_width_cap  [f32; 2]   loc 3  (.x = width / 2, .y = 1 for round caps)
///  offset 24  color           [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    half_width_cap: [f32; 2],
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // p0
        2 => Float32x2, // p1
        3 => Float32x2, // half_width_cap
        4 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
