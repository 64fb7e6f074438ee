pub mod app;
pub mod camera;
pub mod config;
pub mod content;
pub mod error;
pub mod gallery;
pub mod input;
pub mod movement;
pub mod pointer_lock;
pub mod render;
pub mod section;
pub mod teleport;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use std::sync::Arc;

use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use crate::app::App;
use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::gallery::Gallery;
use crate::render::Renderer;

#[cfg(target_arch = "wasm32")]
const CANVAS_PARENT_ID: &str = "gallery-canvas";

async fn arun() -> Result<(), GalleryError> {
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Virtual Gallery")
            .build(&event_loop)?,
    );

    #[cfg(target_arch = "wasm32")]
    {
        // Winit prevents sizing with CSS, so we have to set
        // the size manually when on web.
        use winit::dpi::PhysicalSize;
        let _ = window.request_inner_size(PhysicalSize::new(1280, 720));

        use winit::platform::web::WindowExtWebSys;
        web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                let dst = doc.get_element_by_id(CANVAS_PARENT_ID)?;
                let canvas = web_sys::Element::from(window.canvas()?);
                dst.append_child(&canvas).ok()?;
                Some(())
            })
            .ok_or(GalleryError::Canvas)?;
    }

    let renderer = Renderer::new(window.clone()).await?;
    let gallery = Gallery::new(GalleryConfig::default());
    let mut app = App::new(window, renderer, gallery);

    event_loop.run(move |event, target| app.handle_event(event, target))?;
    Ok(())
}

async fn start() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            // Already installed on a hot reload; keep the existing logger.
            let _ = console_log::init_with_level(log::Level::Info);
        } else {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
    }

    if let Err(err) = arun().await {
        log::error!("gallery stopped: {err}");
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn run() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        pollster::block_on(start());
    }
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(start());
    }
}
