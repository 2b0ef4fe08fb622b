use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use wgpu::util::DeviceExt;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use carousel_core::{
    panel_at, CarouselBindings, CarouselConfig, CarouselController, ContainerHandle, MaskHandle,
    PanelHandle, PanelSurface,
};
use glam::{Mat4, Vec2};

static PANEL_WGSL: &str = include_str!("../shaders/panel.wgsl");

// Scene layout (physical pixels)
const PANEL_SIZE: Vec2 = Vec2::new(360.0, 220.0);
const PANEL_SPACING: f32 = 420.0;
const MASK_WIDTH_FRACTION: f32 = 0.9; // share of the window width left unclipped
const MASK_HEIGHT_SCALE: f32 = 1.3; // mask band height relative to a panel

// Visuals
const SELECTED_BRIGHTNESS: f32 = 1.35;
const IDLE_BRIGHTNESS: f32 = 0.75;
const FLASH_DECAY_PER_SEC: f32 = 2.5;

const WINDOW_TITLE: &str = "Map Select (native)";
const MAP_NAMES: [&str; 5] = ["Harbor", "Canyon", "Glacier", "Foundry", "Orchard"];
const MAP_COLORS: [[f32; 3]; 5] = [
    [0.20, 0.45, 0.80], // harbor blue
    [0.80, 0.45, 0.20], // canyon orange
    [0.70, 0.85, 0.95], // glacier ice
    [0.45, 0.45, 0.50], // foundry steel
    [0.35, 0.70, 0.30], // orchard green
];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceData {
    pos: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

/// Panel quads as seen by the carousel: one slot per panel handle.
struct PanelQuads {
    positions: Vec<Vec2>,
    cull: Vec<bool>,
}

impl PanelQuads {
    fn new(count: usize) -> Self {
        Self {
            positions: vec![Vec2::ZERO; count],
            cull: vec![true; count],
        }
    }

    fn handles(&self) -> Vec<PanelHandle> {
        (0..self.positions.len())
            .map(|i| PanelHandle(i as u32))
            .collect()
    }
}

impl PanelSurface for PanelQuads {
    fn anchored_position(&self, panel: PanelHandle) -> Vec2 {
        self.positions
            .get(panel.0 as usize)
            .copied()
            .unwrap_or(Vec2::ZERO)
    }

    fn set_anchored_position(&mut self, panel: PanelHandle, position: Vec2) {
        if let Some(slot) = self.positions.get_mut(panel.0 as usize) {
            *slot = position;
        }
    }

    fn set_cull_transparent_mesh(&mut self, panel: PanelHandle, cull: bool) {
        if let Some(slot) = self.cull.get_mut(panel.0 as usize) {
            *slot = cull;
        }
    }
}

/// Horizontal clip band the panels slide through.
#[derive(Clone, Copy, Debug)]
struct MaskRect {
    min: Vec2,
    max: Vec2,
}

impl MaskRect {
    fn for_window(width: u32, height: u32) -> Self {
        let size = Vec2::new(width as f32, height as f32);
        let band = Vec2::new(size.x * MASK_WIDTH_FRACTION, PANEL_SIZE.y * MASK_HEIGHT_SCALE);
        let center = size * 0.5;
        Self {
            min: (center - band * 0.5).max(Vec2::ZERO),
            max: (center + band * 0.5).min(size),
        }
    }

    fn contains_any_of(&self, center: Vec2, size: Vec2) -> bool {
        let half = size * 0.5;
        center.x + half.x >= self.min.x
            && center.x - half.x <= self.max.x
            && center.y + half.y >= self.min.y
            && center.y - half.y <= self.max.y
    }

    fn scissor(&self) -> (u32, u32, u32, u32) {
        let x = self.min.x as u32;
        let y = self.min.y as u32;
        let w = ((self.max.x - self.min.x) as u32).max(1);
        let h = ((self.max.y - self.min.y) as u32).max(1);
        (x, y, w, h)
    }
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, max_instances: usize) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("panel_shader"),
            source: wgpu::ShaderSource::Wgsl(PANEL_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Unit quad corners for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<InstanceData>() * max_instances.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-panel instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceData>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 8,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * 0.5
    }

    /// Pixel-space projection with the origin at the top-left corner.
    fn view_proj(&self) -> [[f32; 4]; 4] {
        Mat4::orthographic_rh(0.0, self.width as f32, self.height as f32, 0.0, -1.0, 1.0)
            .to_cols_array_2d()
    }

    fn render(
        &mut self,
        instances: &[InstanceData],
        mask: Option<MaskRect>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: self.view_proj(),
            }),
        );
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(instances));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.03,
                            g: 0.03,
                            b: 0.05,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(mask) = mask {
                let (x, y, w, h) = mask.scissor();
                rpass.set_scissor_rect(x, y, w, h);
            }
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..instances.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Build per-panel instances, skipping panels the mask hides when culling is on.
fn build_instances(
    quads: &PanelQuads,
    selected: usize,
    flash: f32,
    mask: Option<MaskRect>,
) -> Vec<InstanceData> {
    let mut instances = Vec::with_capacity(quads.positions.len());
    for (i, pos) in quads.positions.iter().enumerate() {
        let culled = quads.cull[i] && mask.is_some_and(|m| !m.contains_any_of(*pos, PANEL_SIZE));
        if culled {
            continue;
        }
        let base = MAP_COLORS[i % MAP_COLORS.len()];
        let brightness = if i == selected {
            SELECTED_BRIGHTNESS + flash * 0.5
        } else {
            IDLE_BRIGHTNESS
        };
        instances.push(InstanceData {
            pos: pos.to_array(),
            size: PANEL_SIZE.to_array(),
            color: [
                (base[0] * brightness).min(1.0),
                (base[1] * brightness).min(1.0),
                (base[2] * brightness).min(1.0),
                1.0,
            ],
        });
    }
    instances
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new().map_err(|e| anyhow::anyhow!("event loop: {e}"))?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0))
        .build(&event_loop)
        .map_err(|e| anyhow::anyhow!("window: {e}"))?;

    let mut state = pollster::block_on(GpuState::new(&window, MAP_NAMES.len()))?;

    let mut quads = PanelQuads::new(MAP_NAMES.len());
    let bindings = CarouselBindings::new(quads.handles())
        .with_container(ContainerHandle(0))
        .with_mask(MaskHandle(0));
    let center = state.center();
    let config = CarouselConfig::default()
        .with_panel_spacing(PANEL_SPACING)
        .with_alignment(center.x, center.y);
    let mut carousel = CarouselController::with_tween_engine(bindings, config)?;

    // Re-clicks are reported to the window title on the next frame
    let reselected: Rc<Cell<Option<usize>>> = Rc::new(Cell::new(None));
    let reselected_listener = reselected.clone();
    carousel.on_selected_panel_clicked(move |index| {
        log::info!("[click] open map {}", MAP_NAMES[index % MAP_NAMES.len()]);
        reselected_listener.set(Some(index));
    });
    carousel.start(&mut quads);

    let mut cursor = Vec2::ZERO;
    let mut flash = 0.0_f32;
    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => {
                state.resize(size);
                let center = state.center();
                if let Err(e) = carousel.set_alignment_position(center.x, center.y, &mut quads) {
                    log::warn!("[resize] {}", e);
                }
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => cursor = Vec2::new(position.x as f32, position.y as f32),
            Event::WindowEvent {
                event:
                    WindowEvent::MouseInput {
                        state: ElementState::Released,
                        button: MouseButton::Left,
                        ..
                    },
                ..
            } => {
                if let Some(index) = panel_at(&quads.positions, PANEL_SIZE, cursor) {
                    if let Err(e) = carousel.on_panel_clicked(index, &mut quads) {
                        log::warn!("[click] {}", e);
                    }
                }
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event: key, .. },
                ..
            } if key.state == ElementState::Pressed => {
                let current = carousel.current_index();
                let target = match key.logical_key {
                    Key::Named(NamedKey::ArrowLeft) => current.checked_sub(1),
                    Key::Named(NamedKey::ArrowRight) => {
                        Some(current + 1).filter(|&i| i < carousel.panel_count())
                    }
                    Key::Named(NamedKey::Enter) => Some(current),
                    Key::Named(NamedKey::Escape) => {
                        elwt.exit();
                        None
                    }
                    _ => None,
                };
                if let Some(target) = target {
                    if let Err(e) = carousel.on_panel_clicked(target, &mut quads) {
                        log::warn!("[key] {}", e);
                    }
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = (now - last_frame).min(Duration::from_millis(100));
                last_frame = now;

                carousel.update(dt, &mut quads);
                if let Some(index) = reselected.take() {
                    state.window.set_title(&format!(
                        "{} - {}",
                        WINDOW_TITLE,
                        MAP_NAMES[index % MAP_NAMES.len()]
                    ));
                    flash = 1.0;
                }
                flash = (flash - dt.as_secs_f32() * FLASH_DECAY_PER_SEC).max(0.0);

                let mask = Some(MaskRect::for_window(state.width, state.height));
                let instances = build_instances(&quads, carousel.current_index(), flash, mask);
                match state.render(&instances, mask) {
                    Ok(_) => state.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("event loop: {e}"))
}
