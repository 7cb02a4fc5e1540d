//! wgpu plumbing that blits camera frames into a window.

use anyhow::Context;
use wgpu::*;
use winit::{
    dpi::PhysicalSize,
    event_loop::EventLoopWindowTarget,
    window::{Window, WindowBuilder},
};

use crate::image::Resolution;

const BACKGROUND: wgpu::Color = wgpu::Color::BLACK;

pub struct Renderer {
    device: Device,
    queue: Queue,
    surface: Surface,
    surface_config: SurfaceConfiguration,
    pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
    bind_group: BindGroup,
    sampler: Sampler,
    texture: Texture,
    texture_size: Extent3d,

    /// Surface must be destroyed before `Window`.
    window: Window,
}

impl Renderer {
    pub fn open<T>(
        target: &EventLoopWindowTarget<T>,
        title: &str,
        res: Resolution,
    ) -> anyhow::Result<Self> {
        let window = WindowBuilder::new()
            .with_resizable(false)
            .with_inner_size(PhysicalSize::new(res.width(), res.height()))
            .with_title(title)
            .build(target)?;

        let instance = Instance::new(InstanceDescriptor::default());
        let surface = unsafe { instance.create_surface(&window)? };
        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            compatible_surface: Some(&surface),
            ..Default::default()
        }))
        .context("no compatible graphics adapter found")?;
        let (device, queue) =
            pollster::block_on(adapter.request_device(&DeviceDescriptor::default(), None))?;

        let surface_format = *surface
            .get_capabilities(&adapter)
            .formats
            .first()
            .context("adapter cannot render to the window surface")?;
        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: res.width(),
            height: res.height(),
            present_mode: PresentMode::Fifo,
            alpha_mode: CompositeAlphaMode::Auto,
            view_formats: Vec::new(),
        };
        surface.configure(&device, &surface_config);

        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("frame blit"),
            source: ShaderSource::Wgsl(include_str!("blit.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: None,
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: TextureSampleType::Float { filterable: false },
                        view_dimension: TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });

        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("frame blit"),
            layout: Some(
                &device.create_pipeline_layout(&PipelineLayoutDescriptor {
                    label: None,
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                }),
            ),
            vertex: VertexState {
                module: &shader,
                entry_point: "vert",
                buffers: &[],
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: "frag",
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: ColorWrites::ALL,
                })],
            }),
            primitive: PrimitiveState::default(),
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
        });

        let sampler = device.create_sampler(&SamplerDescriptor::default());
        let texture_size = extent(res);
        let texture = create_texture(&device, texture_size);
        let bind_group = create_bind_group(&device, &bind_group_layout, &texture, &sampler);

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            texture,
            texture_size,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Uploads RGBA8 `data` as the new frame texture.
    pub fn update_texture(&mut self, res: Resolution, data: &[u8]) {
        let size = extent(res);
        assert_eq!((size.width * size.height * 4) as usize, data.len());

        if size != self.texture_size {
            log::debug!(
                "reallocating frame texture ({}x{} -> {}x{})",
                self.texture_size.width,
                self.texture_size.height,
                size.width,
                size.height,
            );
            self.texture = create_texture(&self.device, size);
            self.texture_size = size;
            // The bind group holds a view of the old texture and has to be
            // recreated along with it.
            self.bind_group = create_bind_group(
                &self.device,
                &self.bind_group_layout,
                &self.texture,
                &self.sampler,
            );
        }

        self.queue.write_texture(
            ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            data,
            ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(size.width * 4),
                rows_per_image: None,
            },
            size,
        );
    }

    pub fn redraw(&mut self) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err @ (SurfaceError::Outdated | SurfaceError::Lost)) => {
                log::debug!("surface error: {}", err);
                self.surface.configure(&self.device, &self.surface_config);
                self.surface
                    .get_current_texture()
                    .expect("failed to acquire next frame after reconfiguring surface")
            }
            Err(e) => {
                panic!("failed to acquire frame: {}", e);
            }
        };
        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor { label: None });
        {
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(BACKGROUND),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }

        self.queue.submit([encoder.finish()]);
        frame.present();
    }
}

fn extent(res: Resolution) -> Extent3d {
    Extent3d {
        width: res.width(),
        height: res.height(),
        depth_or_array_layers: 1,
    }
}

fn create_texture(device: &Device, size: Extent3d) -> Texture {
    device.create_texture(&TextureDescriptor {
        label: Some("frame"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TextureFormat::Rgba8UnormSrgb,
        usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

fn create_bind_group(
    device: &Device,
    layout: &BindGroupLayout,
    texture: &Texture,
    sampler: &Sampler,
) -> BindGroup {
    device.create_bind_group(&BindGroupDescriptor {
        label: Some("frame blit"),
        layout,
        entries: &[
            BindGroupEntry {
                binding: 0,
                resource: BindingResource::TextureView(&texture.create_view(&Default::default())),
            },
            BindGroupEntry {
                binding: 1,
                resource: BindingResource::Sampler(sampler),
            },
        ],
    })
}
