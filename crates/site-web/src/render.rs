use site_core::camera::Camera;
use site_core::ledger::{ResourceId, ResourceLedger};
use site_core::scene::{
    generate_starfield, shape_mesh, PartShape, QualityTier, StarInstance, ALL_PART_SHAPES,
};
use site_core::STARFIELD_EXTENT;
use glam::Mat4;
use web_sys as web;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    // xyz camera eye, w elapsed seconds
    camera_time: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PartUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    // x fresnel strength, y wire alpha, z emissive, w unused
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StarUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    time_pad: [f32; 4],
}

struct MeshBuffers {
    shape: PartShape,
    vertex_buf: wgpu::Buffer,
    vertex_id: ResourceId,
    index_buf: wgpu::Buffer,
    index_id: ResourceId,
    index_count: u32,
    edge_buf: wgpu::Buffer,
    edge_id: ResourceId,
    edge_count: u32,
    uniform_buf: wgpu::Buffer,
    uniform_id: ResourceId,
    bind_group: wgpu::BindGroup,
}

/// All GPU-side state for the ambient scene. Created once per mount;
/// `teardown` releases every tracked buffer and texture exactly once.
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,

    globals_buf: wgpu::Buffer,
    globals_id: ResourceId,
    globals_bg: wgpu::BindGroup,

    star_uniform_buf: wgpu::Buffer,
    star_uniform_id: ResourceId,
    star_bg: wgpu::BindGroup,
    star_quad_vb: wgpu::Buffer,
    star_quad_id: ResourceId,
    star_instance_vb: wgpu::Buffer,
    star_instance_id: ResourceId,
    star_count: u32,

    depth_tex: wgpu::Texture,
    depth_id: ResourceId,
    depth_view: wgpu::TextureView,

    meshes: Vec<MeshBuffers>,

    camera: Camera,
    tier: QualityTier,
    ledger: ResourceLedger,
    width: u32,
    height: u32,
}

fn create_depth(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        tier: QualityTier,
        star_seed: u64,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
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
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut ledger = ResourceLedger::new();

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(site_core::SCENE_WGSL.into()),
        });
        let stars_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stars_shader"),
            source: wgpu::ShaderSource::Wgsl(site_core::STARS_WGSL.into()),
        });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[uniform_entry(0)],
        });
        let part_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("part_bgl"),
            entries: &[uniform_entry(0)],
        });
        let star_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("star_bgl"),
            entries: &[uniform_entry(0)],
        });

        let globals_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_id = ledger.alloc("globals uniforms");
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        // one draw per shape per frame; each shape owns its uniform slot
        let mut meshes = Vec::with_capacity(ALL_PART_SHAPES.len());
        for shape in ALL_PART_SHAPES {
            let data = shape_mesh(shape, tier);
            let edges = data.edge_indices();
            let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("part vertices"),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("part indices"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            let edge_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("part edges"),
                contents: bytemuck::cast_slice(&edges),
                usage: wgpu::BufferUsages::INDEX,
            });
            let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("part uniforms"),
                size: std::mem::size_of::<PartUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("part_bg"),
                layout: &part_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buf.as_entire_binding(),
                }],
            });
            meshes.push(MeshBuffers {
                shape,
                vertex_id: ledger.alloc("part vertex buffer"),
                vertex_buf,
                index_id: ledger.alloc("part index buffer"),
                index_count: data.indices.len() as u32,
                index_buf,
                edge_id: ledger.alloc("part edge buffer"),
                edge_count: edges.len() as u32,
                edge_buf,
                uniform_id: ledger.alloc("part uniform buffer"),
                uniform_buf,
                bind_group,
            });
        }

        // starfield: one quad, many instances
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let star_quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star_quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let stars = generate_starfield(tier.starfield_count(), STARFIELD_EXTENT, star_seed);
        let star_instance_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star_instance_vb"),
            contents: bytemuck::cast_slice(&stars),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let star_uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("star_uniforms"),
            size: std::mem::size_of::<StarUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let star_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("star_bg"),
            layout: &star_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: star_uniform_buf.as_entire_binding(),
            }],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<site_core::geometry::Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        };

        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl, &part_bgl],
            push_constant_ranges: &[],
        });
        let depth_state = |write| {
            Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: write,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            })
        };
        let color_target = Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        });

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&scene_pl),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_mesh"),
                buffers: std::slice::from_ref(&vertex_layout),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // glass reads from both sides
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: depth_state(true),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_mesh"),
                targets: std::slice::from_ref(&color_target),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&scene_pl),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_mesh"),
                buffers: std::slice::from_ref(&vertex_layout),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: depth_state(false),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_line"),
                targets: std::slice::from_ref(&color_target),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let star_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star_pl"),
            bind_group_layouts: &[&star_bgl],
            push_constant_ranges: &[],
        });
        let star_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<StarInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let star_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("star_pipeline"),
            layout: Some(&star_pl),
            vertex: wgpu::VertexState {
                module: &stars_shader,
                entry_point: Some("vs_star"),
                buffers: &star_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: depth_state(false),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &stars_shader,
                entry_point: Some("fs_star"),
                targets: std::slice::from_ref(&color_target),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let (depth_tex, depth_view) = create_depth(&device, width, height);
        let depth_id = ledger.alloc("depth texture");
        let star_quad_id = ledger.alloc("star quad buffer");
        let star_instance_id = ledger.alloc("star instance buffer");
        let star_uniform_id = ledger.alloc("star uniform buffer");

        let camera = Camera::ambient(width.max(1) as f32 / height.max(1) as f32);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh_pipeline,
            line_pipeline,
            star_pipeline,
            globals_buf,
            globals_id,
            globals_bg,
            star_uniform_buf,
            star_uniform_id,
            star_bg,
            star_quad_vb,
            star_quad_id,
            star_instance_vb,
            star_instance_id,
            star_count: stars.len() as u32,
            depth_tex,
            depth_id,
            depth_view,
            meshes,
            camera,
            tier,
            ledger,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.camera.set_aspect(width, height);

            // depth target tracks the surface size
            self.depth_tex.destroy();
            if let Err(e) = self.ledger.dispose(self.depth_id) {
                log::error!("ledger error on depth resize: {e}");
            }
            let (tex, view) = create_depth(&self.device, width, height);
            self.depth_tex = tex;
            self.depth_view = view;
            self.depth_id = self.ledger.alloc("depth texture");
        }
    }

    /// Draw one frame. `parts` carries at most one entry per shape.
    pub fn render(
        &mut self,
        elapsed: f32,
        parts: &[(PartShape, Mat4, [f32; 3])],
        star_model: Mat4,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        let eye = self.camera.eye;
        self.queue.write_buffer(
            &self.globals_buf,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: self.camera.view_proj().to_cols_array_2d(),
                camera_time: [eye.x, eye.y, eye.z, elapsed],
            }),
        );
        self.queue.write_buffer(
            &self.star_uniform_buf,
            0,
            bytemuck::bytes_of(&StarUniforms {
                view_proj: self.camera.view_proj().to_cols_array_2d(),
                model: star_model.to_cols_array_2d(),
                time_pad: [elapsed, 0.0, 0.0, 0.0],
            }),
        );

        let (alpha, fresnel, wire_alpha, emissive) = match self.tier {
            QualityTier::Full => (0.35, 0.9, 0.25, 0.06),
            QualityTier::Lite => (0.0, 0.0, 1.0, 0.0),
        };
        for (shape, model, color) in parts {
            if let Some(mesh) = self.meshes.iter().find(|m| m.shape == *shape) {
                self.queue.write_buffer(
                    &mesh.uniform_buf,
                    0,
                    bytemuck::bytes_of(&PartUniforms {
                        model: model.to_cols_array_2d(),
                        color: [color[0], color[1], color[2], alpha],
                        params: [fresnel, wire_alpha, emissive, 0.0],
                    }),
                );
            }
        }

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.016,
                            g: 0.016,
                            b: 0.028,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.star_pipeline);
            rpass.set_bind_group(0, &self.star_bg, &[]);
            rpass.set_vertex_buffer(0, self.star_quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.star_instance_vb.slice(..));
            rpass.draw(0..6, 0..self.star_count);

            if !self.tier.wireframe_only() {
                rpass.set_pipeline(&self.mesh_pipeline);
                rpass.set_bind_group(0, &self.globals_bg, &[]);
                for (shape, _, _) in parts {
                    if let Some(mesh) = self.meshes.iter().find(|m| m.shape == *shape) {
                        rpass.set_bind_group(1, &mesh.bind_group, &[]);
                        rpass.set_vertex_buffer(0, mesh.vertex_buf.slice(..));
                        rpass
                            .set_index_buffer(mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                }
            }

            // wireframe: the whole material on Lite, an accent overlay on Full
            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for (shape, _, _) in parts {
                if let Some(mesh) = self.meshes.iter().find(|m| m.shape == *shape) {
                    rpass.set_bind_group(1, &mesh.bind_group, &[]);
                    rpass.set_vertex_buffer(0, mesh.vertex_buf.slice(..));
                    rpass.set_index_buffer(mesh.edge_buf.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..mesh.edge_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Release every tracked GPU allocation exactly once. Required on every
    /// unmount path; repeated mounts without it exhaust graphics memory.
    pub fn teardown(mut self) {
        let mut dispose = |ledger: &mut ResourceLedger, id: ResourceId| {
            if let Err(e) = ledger.dispose(id) {
                log::error!("scene teardown ledger error: {e}");
            }
        };
        for mesh in self.meshes.drain(..) {
            mesh.vertex_buf.destroy();
            dispose(&mut self.ledger, mesh.vertex_id);
            mesh.index_buf.destroy();
            dispose(&mut self.ledger, mesh.index_id);
            mesh.edge_buf.destroy();
            dispose(&mut self.ledger, mesh.edge_id);
            mesh.uniform_buf.destroy();
            dispose(&mut self.ledger, mesh.uniform_id);
        }
        self.star_quad_vb.destroy();
        dispose(&mut self.ledger, self.star_quad_id);
        self.star_instance_vb.destroy();
        dispose(&mut self.ledger, self.star_instance_id);
        self.star_uniform_buf.destroy();
        dispose(&mut self.ledger, self.star_uniform_id);
        self.globals_buf.destroy();
        dispose(&mut self.ledger, self.globals_id);
        self.depth_tex.destroy();
        dispose(&mut self.ledger, self.depth_id);

        if self.ledger.is_drained() {
            log::info!(
                "scene teardown: {} GPU resources released",
                self.ledger.disposed_count()
            );
        } else {
            log::error!(
                "scene teardown leaked resources: {:?}",
                self.ledger.outstanding()
            );
        }
    }
}
