use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("unknown section id: {0:?}")]
    UnknownSection(String),

    #[error("no graphics adapter compatible with the canvas")]
    NoAdapter,

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("could not attach canvas to the page")]
    Canvas,
}
