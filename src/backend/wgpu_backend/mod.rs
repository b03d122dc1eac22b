//! wgpu backend implementation
//!
//! Renders into an offscreen color target that can be read back with
//! [`WgpuBackend::read_pixels`]. Draws are buffered between `begin_frame` and
//! `end_frame` and replayed in a single render pass.

use crate::backend::traits::*;
use crate::backend::types::*;
use crate::resources::GlowTexture;
use crate::shader::ProgramDescriptor;
use crate::MAX_STEPS;
use std::collections::HashMap;
use std::num::NonZeroU64;

/// Format of the offscreen color target.
pub const TARGET_FORMAT: TextureFormat = TextureFormat::Rgba8Unorm;

/// Byte stride between per-draw alpha uniforms; the largest offset alignment
/// wgpu permits.
const ALPHA_STRIDE: u64 = 256;

/// At most one draw per ring slot plus one spare.
const MAX_DRAWS_PER_FRAME: usize = MAX_STEPS + 1;

/// Initial vertex buffer capacity in vertices.
const INITIAL_VERTEX_CAPACITY: u64 = 60;

/// Buffered draw command
#[derive(Clone, Copy)]
struct DrawCommand {
    buffer: BufferHandle,
    vertex_count: u32,
    alpha: f32,
}

/// Frame opened by `begin_frame`, replayed by `end_frame`
struct PendingFrame {
    program: ProgramHandle,
    texture: TextureHandle,
    clear_color: [f32; 4],
    commands: Vec<DrawCommand>,
}

/// Vertex buffer together with its allocated size
struct GpuVertexBuffer {
    buffer: wgpu::Buffer,
    label: String,
    capacity: u64,
}

struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

struct GpuProgram {
    pipeline: wgpu::RenderPipeline,
    frame_layout: wgpu::BindGroupLayout,
    alpha_layout: wgpu::BindGroupLayout,
}

/// wgpu backend implementation
pub struct WgpuBackend {
    #[allow(dead_code)]
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    width: u32,
    height: u32,
    target: wgpu::Texture,
    target_view: wgpu::TextureView,

    // Resource storage
    buffers: HashMap<u64, GpuVertexBuffer>,
    textures: HashMap<u64, GpuTexture>,
    programs: HashMap<u64, GpuProgram>,
    next_buffer_id: u64,
    next_texture_id: u64,
    next_program_id: u64,

    sampler: wgpu::Sampler,
    matrix_buffer: wgpu::Buffer,
    alpha_buffer: wgpu::Buffer,

    pending_frame: Option<PendingFrame>,
    frames_submitted: u64,
}

impl WgpuBackend {
    fn convert_texture_format(format: TextureFormat) -> wgpu::TextureFormat {
        match format {
            TextureFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
        }
    }

    fn convert_vertex_format(format: VertexFormat) -> wgpu::VertexFormat {
        match format {
            VertexFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
            VertexFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
            VertexFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
        }
    }

    fn convert_blend_factor(factor: BlendFactor) -> wgpu::BlendFactor {
        match factor {
            BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
            BlendFactor::DstAlpha => wgpu::BlendFactor::DstAlpha,
        }
    }

    fn convert_blend_state(blend: BlendState) -> wgpu::BlendState {
        let component = wgpu::BlendComponent {
            src_factor: Self::convert_blend_factor(blend.src_factor),
            dst_factor: Self::convert_blend_factor(blend.dst_factor),
            operation: wgpu::BlendOperation::Add,
        };
        wgpu::BlendState {
            color: component,
            alpha: component,
        }
    }

    fn create_target(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("phosphor_target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::convert_texture_format(TARGET_FORMAT),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    fn create_gpu_vertex_buffer(device: &wgpu::Device, label: &str, capacity: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

impl WgpuBackend {
    /// Create a headless backend rendering into a `width` x `height` target.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new_headless(width: u32, height: u32) -> BackendResult<Self> {
        pollster::block_on(Self::new_async(width, height))
    }

    /// Async initialization, wrapped by `new_headless` on native
    pub async fn new_async(width: u32, height: u32) -> BackendResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
        {
            Some(adapter) => adapter,
            None => {
                log::warn!("No hardware adapter available, falling back to software adapter");
                instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: None,
                        force_fallback_adapter: true,
                    })
                    .await
                    .ok_or_else(|| {
                        BackendError::InitializationFailed("No suitable adapter found".into())
                    })?
            }
        };

        let adapter_info = adapter.get_info();
        log::info!(
            "Selected GPU: {} ({:?} backend)",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Phosphor Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                },
                None,
            )
            .await
            .map_err(|e| BackendError::DeviceCreationFailed(e.to_string()))?;

        let (target, target_view) = Self::create_target(&device, width, height);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let matrix_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("matrix_uniforms"),
            size: std::mem::size_of::<MatrixUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let alpha_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("alpha_uniforms"),
            size: ALPHA_STRIDE * MAX_DRAWS_PER_FRAME as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!("wgpu backend initialized with {}x{} target", width, height);

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            width,
            height,
            target,
            target_view,
            buffers: HashMap::new(),
            textures: HashMap::new(),
            programs: HashMap::new(),
            next_buffer_id: 1,
            next_texture_id: 1,
            next_program_id: 1,
            sampler,
            matrix_buffer,
            alpha_buffer,
            pending_frame: None,
            frames_submitted: 0,
        })
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    /// Copy the target back to the CPU as tightly packed RGBA8 rows.
    pub fn read_pixels(&self) -> BackendResult<Vec<u8>> {
        let width = self.width.max(1);
        let height = self.height.max(1);
        let bytes_per_pixel = TARGET_FORMAT.bytes_per_pixel();
        let unpadded_row = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row = unpadded_row.div_ceil(align) * align;

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback"),
            size: (padded_row * height) as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &staging,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);
        receiver
            .recv()
            .map_err(|e| BackendError::ReadbackFailed(e.to_string()))?
            .map_err(|e| BackendError::ReadbackFailed(e.to_string()))?;

        let mut pixels = Vec::with_capacity((unpadded_row * height) as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks(padded_row as usize) {
                pixels.extend_from_slice(&row[..unpadded_row as usize]);
            }
        }
        staging.unmap();
        Ok(pixels)
    }

    /// Replay the buffered draws of `frame` into the target and submit.
    fn submit_frame(&mut self, frame: PendingFrame) -> BackendResult<()> {
        let program = self
            .programs
            .get(&frame.program.0)
            .ok_or(BackendError::UnknownProgram(frame.program))?;
        let texture = self
            .textures
            .get(&frame.texture.0)
            .ok_or(BackendError::UnknownTexture(frame.texture))?;

        if !frame.commands.is_empty() {
            let mut alpha_data = vec![0u8; frame.commands.len() * ALPHA_STRIDE as usize];
            for (i, cmd) in frame.commands.iter().enumerate() {
                let offset = i * ALPHA_STRIDE as usize;
                let uniform = AlphaUniform::new(cmd.alpha);
                let bytes = bytemuck::bytes_of(&uniform);
                alpha_data[offset..offset + bytes.len()].copy_from_slice(bytes);
            }
            self.queue.write_buffer(&self.alpha_buffer, 0, &alpha_data);
        }

        let frame_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("phosphor_frame"),
            layout: &program.frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.matrix_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let alpha_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("phosphor_alpha"),
            layout: &program.alpha_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &self.alpha_buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<AlphaUniform>() as u64),
                }),
            }],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Phosphor Encoder"),
            });

        {
            let [r, g, b, a] = frame.clear_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("phosphor_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&program.pipeline);
            render_pass.set_bind_group(0, &frame_bind_group, &[]);

            let stride = std::mem::size_of::<Vertex>() as u64;
            for (i, cmd) in frame.commands.iter().enumerate() {
                let Some(gpu_buffer) = self.buffers.get(&cmd.buffer.0) else {
                    continue;
                };
                let byte_len = cmd.vertex_count as u64 * stride;
                render_pass.set_bind_group(1, &alpha_bind_group, &[(i as u64 * ALPHA_STRIDE) as u32]);
                render_pass.set_vertex_buffer(0, gpu_buffer.buffer.slice(0..byte_len));
                render_pass.draw(0..cmd.vertex_count, 0..1);
            }
            // render_pass is dropped here, ending the pass
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.frames_submitted += 1;
        log::trace!(
            "wgpu backend: submitted frame {} with {} draws",
            self.frames_submitted,
            frame.commands.len()
        );
        Ok(())
    }
}

impl DisplayBackend for WgpuBackend {
    fn create_program(&mut self, desc: &ProgramDescriptor) -> BackendResult<ProgramHandle> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: desc.label.as_deref(),
                source: wgpu::ShaderSource::Wgsl(desc.wgsl.into()),
            });

        let frame_layout = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("phosphor_frame_layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let alpha_layout = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("phosphor_alpha_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<AlphaUniform>() as u64
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: desc.label.as_deref(),
                bind_group_layouts: &[&frame_layout, &alpha_layout],
                push_constant_ranges: &[],
            });

        let attributes: Vec<wgpu::VertexAttribute> = desc
            .vertex_layout
            .attributes
            .iter()
            .map(|attr| wgpu::VertexAttribute {
                format: Self::convert_vertex_format(attr.format),
                offset: attr.offset,
                shader_location: attr.location,
            })
            .collect();

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: desc.label.as_deref(),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: "vs_main",
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: desc.vertex_layout.array_stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &attributes,
                    }],
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: "fs_main",
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: Self::convert_texture_format(TARGET_FORMAT),
                        blend: Some(Self::convert_blend_state(desc.blend)),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                multiview: None,
            });

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(BackendError::ProgramCreationFailed(error.to_string()));
        }

        let id = self.next_program_id;
        self.next_program_id += 1;
        self.programs.insert(
            id,
            GpuProgram {
                pipeline,
                frame_layout,
                alpha_layout,
            },
        );
        log::debug!("wgpu backend: created program {:?}", desc.label);

        Ok(ProgramHandle(id))
    }

    fn upload_texture(&mut self, texture: &GlowTexture) -> BackendResult<TextureHandle> {
        let expected = (texture.size * texture.bytes_per_row()) as usize;
        if texture.data.len() != expected {
            return Err(BackendError::TextureCreationFailed(format!(
                "expected {} bytes, got {}",
                expected,
                texture.data.len()
            )));
        }

        let size = wgpu::Extent3d {
            width: texture.size,
            height: texture.size,
            depth_or_array_layers: 1,
        };
        let gpu_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glow_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::convert_texture_format(texture.format),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texture.data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(texture.bytes_per_row()),
                rows_per_image: Some(texture.size),
            },
            size,
        );

        let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let id = self.next_texture_id;
        self.next_texture_id += 1;
        self.textures.insert(
            id,
            GpuTexture {
                texture: gpu_texture,
                view,
            },
        );

        Ok(TextureHandle(id))
    }

    fn create_vertex_buffer(&mut self, label: &str) -> BackendResult<BufferHandle> {
        let capacity = INITIAL_VERTEX_CAPACITY * std::mem::size_of::<Vertex>() as u64;
        let buffer = Self::create_gpu_vertex_buffer(&self.device, label, capacity);

        let id = self.next_buffer_id;
        self.next_buffer_id += 1;
        self.buffers.insert(
            id,
            GpuVertexBuffer {
                buffer,
                label: label.to_string(),
                capacity,
            },
        );

        Ok(BufferHandle(id))
    }

    fn upload_vertex_buffer(
        &mut self,
        buffer: BufferHandle,
        vertices: &[Vertex],
    ) -> BackendResult<()> {
        let gpu_buffer = self
            .buffers
            .get_mut(&buffer.0)
            .ok_or(BackendError::UnknownBuffer(buffer))?;

        let data: &[u8] = bytemuck::cast_slice(vertices);
        let needed = data.len() as u64;
        if needed > gpu_buffer.capacity {
            // Grow to the next power of two vertex count.
            let stride = std::mem::size_of::<Vertex>() as u64;
            let capacity = (needed / stride).next_power_of_two() * stride;
            let replacement =
                Self::create_gpu_vertex_buffer(&self.device, &gpu_buffer.label, capacity);
            let old = std::mem::replace(&mut gpu_buffer.buffer, replacement);
            old.destroy();
            gpu_buffer.capacity = capacity;
            log::trace!(
                "wgpu backend: grew {} to {} bytes",
                gpu_buffer.label,
                capacity
            );
        }

        if !data.is_empty() {
            self.queue.write_buffer(&gpu_buffer.buffer, 0, data);
        }
        Ok(())
    }

    fn begin_frame(
        &mut self,
        program: ProgramHandle,
        texture: TextureHandle,
        uniforms: &FrameUniforms,
    ) -> BackendResult<()> {
        if !self.programs.contains_key(&program.0) {
            return Err(BackendError::UnknownProgram(program));
        }
        if !self.textures.contains_key(&texture.0) {
            return Err(BackendError::UnknownTexture(texture));
        }

        let matrices = MatrixUniforms::from(uniforms);
        self.queue
            .write_buffer(&self.matrix_buffer, 0, bytemuck::bytes_of(&matrices));

        self.pending_frame = Some(PendingFrame {
            program,
            texture,
            clear_color: uniforms.clear_color,
            commands: Vec::new(),
        });
        Ok(())
    }

    fn draw_triangles(
        &mut self,
        buffer: BufferHandle,
        vertex_count: u32,
        alpha: f32,
    ) -> BackendResult<()> {
        if !self.buffers.contains_key(&buffer.0) {
            return Err(BackendError::UnknownBuffer(buffer));
        }
        let frame = self
            .pending_frame
            .as_mut()
            .ok_or(BackendError::NotInFrame)?;
        if frame.commands.len() >= MAX_DRAWS_PER_FRAME {
            return Err(BackendError::TooManyDraws(MAX_DRAWS_PER_FRAME));
        }
        if vertex_count > 0 {
            frame.commands.push(DrawCommand {
                buffer,
                vertex_count,
                alpha,
            });
        }
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        let frame = self.pending_frame.take().ok_or(BackendError::NotInFrame)?;
        self.submit_frame(frame)
    }

    fn destroy_buffer(&mut self, buffer: BufferHandle) {
        if let Some(gpu_buffer) = self.buffers.remove(&buffer.0) {
            gpu_buffer.buffer.destroy();
        }
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        if let Some(gpu_texture) = self.textures.remove(&texture.0) {
            gpu_texture.texture.destroy();
        }
    }

    fn destroy_program(&mut self, program: ProgramHandle) {
        self.programs.remove(&program.0);
    }
}
