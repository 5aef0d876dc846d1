use crate::constants::{CLEAR_COLOR, MARKER_ACTIVE_COLOR, MARKER_COLOR, MARKER_EDGE_SOFTNESS};
use glam::Mat4;
use web_sys as web;

mod helpers;
mod markers;
mod panorama;

pub use markers::MarkerInstance;
use markers::{create_marker_resources, MarkerResources, MarkerUniforms};
use panorama::{create_panorama_resources, PanoUniforms, PanoramaResources};

pub static PANORAMA_WGSL: &str = include_str!("../shaders/panorama.wgsl");
pub static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");

/// Everything one frame needs, gathered while the viewer is borrowed.
pub struct FrameData<'a> {
    pub view_proj: Mat4,
    pub pixel_ratio: f32,
    pub markers: &'a [MarkerInstance],
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    panorama: PanoramaResources,
    markers: MarkerResources,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
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

        let panorama = create_panorama_resources(&device, &queue, format);
        let markers = create_marker_resources(&device, format);
        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            panorama,
            markers,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
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
        }
    }

    pub fn upload_panorama(&mut self, image: &web::HtmlImageElement) {
        self.panorama.upload_image(&self.device, &self.queue, image);
    }

    pub fn render(&mut self, frame_data: &FrameData<'_>) -> Result<(), wgpu::SurfaceError> {
        let pano = PanoUniforms {
            inv_view_proj: frame_data.view_proj.inverse().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.panorama.uniform_buffer, 0, bytemuck::bytes_of(&pano));
        let marker_uniforms = MarkerUniforms {
            view_proj: frame_data.view_proj.to_cols_array_2d(),
            viewport: [self.width as f32, self.height as f32],
            pixel_ratio: frame_data.pixel_ratio,
            edge: MARKER_EDGE_SOFTNESS,
            color: MARKER_COLOR,
            active_color: MARKER_ACTIVE_COLOR,
        };
        self.queue.write_buffer(
            &self.markers.uniform_buffer,
            0,
            bytemuck::bytes_of(&marker_uniforms),
        );
        self.markers
            .write_instances(&self.device, &self.queue, frame_data.markers);

        let frame = self.surface.get_current_texture()?;
        let view = frame
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
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.panorama.pipeline);
            rpass.set_bind_group(0, &self.panorama.bind_group, &[]);
            rpass.draw(0..3, 0..1);

            if self.markers.count > 0 {
                rpass.set_pipeline(&self.markers.pipeline);
                rpass.set_bind_group(0, &self.markers.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.markers.instance_buffer.slice(..));
                rpass.draw(0..6, 0..self.markers.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
