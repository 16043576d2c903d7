use crate::core::geometry::{MeshKind, Vertex};
use crate::core::lifecycle::Surface;
use crate::core::scene::DrawList;
use crate::core::viewport::SurfaceSize;
use web_sys as web;
use wgpu;
use wgpu::util::DeviceExt;

mod helpers;
mod targets;

use helpers::GrowableBuffer;
use targets::DepthTarget;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    particle_model: [[f32; 4]; 4],
    ambient: [f32; 4],
    key_dir: [f32; 4],
    key_color: [f32; 4],
    back_dir: [f32; 4],
    back_color: [f32; 4],
    particle_color: [f32; 4],
    particle_params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

#[inline]
fn scaled(rgb: [f32; 3], k: f32) -> [f32; 4] {
    [rgb[0] * k, rgb[1] * k, rgb[2] * k, 1.0]
}

#[inline]
fn direction(d: [f32; 3]) -> [f32; 4] {
    [d[0], d[1], d[2], 0.0]
}

fn pack_globals(frame: &DrawList) -> Globals {
    let l = &frame.lighting;
    Globals {
        view_proj: frame.view_projection.to_cols_array_2d(),
        particle_model: frame.particles.model.to_cols_array_2d(),
        ambient: scaled(l.ambient, l.ambient_intensity),
        key_dir: direction(l.key.direction),
        key_color: scaled(l.key.color, l.key.intensity),
        back_dir: direction(l.back.direction),
        back_color: scaled(l.back.color, l.back.intensity),
        particle_color: frame.particles.color,
        particle_params: [
            frame.particles.size,
            frame.projection_scale.x,
            frame.projection_scale.y,
            0.0,
        ],
    }
}

/// WebGPU surface on the scene canvas: flat-shaded instanced meshes plus
/// billboarded particles, composited over the page with premultiplied alpha.
pub struct SurfaceRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    meshes: Vec<MeshBuffers>,
    instances: GrowableBuffer,
    particles: GrowableBuffer,

    // Per-frame scratch, reused.
    instance_scratch: Vec<InstanceRaw>,
    kind_ranges: [(u32, u32); MeshKind::ALL.len()],
}

impl SurfaceRenderer {
    pub async fn new(canvas: &web::HtmlCanvasElement, size: SurfaceSize) -> anyhow::Result<Self> {
        let width = size.width.max(1);
        let height = size.height.max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: Some("scene_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let fallback_format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(fallback_format);
        // The canvas sits over page content; keep it see-through.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = DepthTarget::new(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                2 => Float32x4,
                3 => Float32x4,
                4 => Float32x4,
                5 => Float32x4,
                6 => Float32x4
            ],
        };
        let point_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3],
        };
        let mesh_pipeline = helpers::make_scene_pipeline(
            &device,
            "mesh_pipeline",
            &layout,
            &shader,
            "vs_mesh",
            "fs_mesh",
            &[vertex_layout, instance_layout],
            format,
            true,
        );
        let point_pipeline = helpers::make_scene_pipeline(
            &device,
            "point_pipeline",
            &layout,
            &shader,
            "vs_point",
            "fs_point",
            &[point_layout],
            format,
            false,
        );

        let meshes = MeshKind::ALL
            .iter()
            .map(|kind| {
                let vertices = kind.vertices();
                MeshBuffers {
                    vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("mesh_vertices"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                    vertex_count: vertices.len() as u32,
                }
            })
            .collect();
        let instances = GrowableBuffer::new(
            &device,
            "mesh_instances",
            (std::mem::size_of::<InstanceRaw>() * 32) as u64,
        );
        let particles = GrowableBuffer::new(
            &device,
            "particles",
            (std::mem::size_of::<[f32; 3]>() * 512) as u64,
        );

        log::info!(
            "[render] surface ready {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            globals_buffer,
            globals_bind_group,
            mesh_pipeline,
            point_pipeline,
            meshes,
            instances,
            particles,
            instance_scratch: Vec::new(),
            kind_ranges: [(0, 0); MeshKind::ALL.len()],
        })
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Group instances by mesh so each kind is one instanced draw.
    fn pack_instances(&mut self, frame: &DrawList) {
        self.instance_scratch.clear();
        for kind in MeshKind::ALL {
            let start = self.instance_scratch.len() as u32;
            self.instance_scratch.extend(
                frame
                    .meshes
                    .iter()
                    .filter(|m| m.mesh == kind)
                    .map(|m| InstanceRaw {
                        model: m.model.to_cols_array_2d(),
                        color: m.color,
                    }),
            );
            self.kind_ranges[kind.index()] = (start, self.instance_scratch.len() as u32);
        }
    }
}

impl Surface for SurfaceRenderer {
    fn resize(&mut self, size: SurfaceSize) {
        let (width, height) = (size.width.max(1), size.height.max(1));
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        self.depth.recreate(&self.device, width, height);
    }

    fn present(&mut self, frame: &DrawList) {
        self.pack_instances(frame);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&pack_globals(frame)));
        self.instances.write(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.instance_scratch),
        );
        self.particles.write(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&frame.particles.positions),
        );

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return;
            }
            Err(e) => {
                log::warn!("[render] frame skipped: {:?}", e);
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            if !self.instance_scratch.is_empty() {
                rpass.set_pipeline(&self.mesh_pipeline);
                rpass.set_vertex_buffer(1, self.instances.buffer().slice(..));
                for kind in MeshKind::ALL {
                    let (start, end) = self.kind_ranges[kind.index()];
                    if start == end {
                        continue;
                    }
                    let mesh = &self.meshes[kind.index()];
                    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    rpass.draw(0..mesh.vertex_count, start..end);
                }
            }

            let points = frame.particles.positions.len() as u32;
            if points > 0 {
                rpass.set_pipeline(&self.point_pipeline);
                rpass.set_vertex_buffer(0, self.particles.buffer().slice(..));
                rpass.draw(0..6, 0..points);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
    }

    fn release(self) {
        for mesh in &self.meshes {
            mesh.vertex_buffer.destroy();
        }
        self.instances.destroy();
        self.particles.destroy();
        self.globals_buffer.destroy();
        self.depth.destroy();
        self.device.destroy();
        log::debug!("[render] surface released");
    }
}
