// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Window for displaying annotated images.

use std::time::Duration;

use image::DynamicImage;
use minifb::{Key, Window, WindowOptions};

use super::color::Color;
use crate::error::{ComError, Result};

/// A simple image viewer using minifb.
pub struct Viewer {
    window: Window,
    width: usize,
    height: usize,
    buffer: Vec<u32>,
}

impl Viewer {
    /// Create a new viewer window.
    ///
    /// # Errors
    ///
    /// Returns [`ComError::VisualizerError`] if the window can't be created.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| ComError::VisualizerError(format!("Failed to create window: {e}")))?;

        window.set_target_fps(60);

        Ok(Self {
            window,
            width,
            height,
            buffer: Vec::new(),
        })
    }

    /// Whether the window is still open and the user has not pressed Escape or Q.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.window.is_open()
            && !self.window.is_key_down(Key::Escape)
            && !self.window.is_key_down(Key::Q)
    }

    /// Show a new image.
    ///
    /// # Errors
    ///
    /// Returns [`ComError::VisualizerError`] if the window can't be updated.
    pub fn show(&mut self, image: &DynamicImage) -> Result<()> {
        self.width = image.width() as usize;
        self.height = image.height() as usize;
        self.buffer = image
            .to_rgb8()
            .pixels()
            .map(|p| Color(p[0], p[1], p[2]).to_u32())
            .collect();
        self.refresh()
    }

    /// Keep the window responsive until the user closes it.
    ///
    /// # Errors
    ///
    /// Returns [`ComError::VisualizerError`] if the window can't be updated.
    pub fn wait_until_closed(&mut self) -> Result<()> {
        while self.is_open() {
            self.refresh()?;
            std::thread::sleep(Duration::from_millis(10));
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| ComError::VisualizerError(format!("Failed to update window: {e}")))
    }
}
