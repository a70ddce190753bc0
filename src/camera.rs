use crate::error::{RenderError, Result};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::tracer::render_pixel;
use glam::DVec3;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use itertools::Itertools;
use rayon::prelude::*;
use std::{fs, path::Path, time::Instant};
use tracing::{debug, info};

const PROGRESS_TEMPLATE: &str = "{bar:40} {percent:>3}% {pos}/{len} pixels [{elapsed}]";

/// Pinhole camera looking through a screen rectangle on the z = 0 plane.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    max_value: u32,
    center: DVec3,
    /// Screen rectangle as (x0, y0, x1, y1).
    screen: (f64, f64, f64, f64),
    show_progress: bool,
}

impl Camera {
    /// Camera at (0, .35, -1). The screen spans x in [-1, 1] and is shifted
    /// up by .25, with its height set by the aspect ratio.
    pub fn new(image_width: u32, image_height: u32) -> Result<Self> {
        if image_width < 2 || image_height < 2 {
            return Err(RenderError::InvalidConfig(format!(
                "image must be at least 2x2, got {image_width}x{image_height}"
            )));
        }
        let aspect_ratio = image_width as f64 / image_height as f64;

        return Ok(Self {
            image_width,
            image_height,
            max_value: 255,
            center: DVec3::new(0., 0.35, -1.),
            screen: (-1., -1. / aspect_ratio + 0.25, 1., 1. / aspect_ratio + 0.25),
            show_progress: false,
        });
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Primary ray for pixel (x, y), with y = 0 the top row.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let (x0, y0, x1, y1) = self.screen;

        // inclusive spacing: the first and last pixels sit on the screen edges
        let sx = x0 + (x1 - x0) * x as f64 / (self.image_width - 1) as f64;
        let row_from_bottom = self.image_height - 1 - y;
        let sy = y0 + (y1 - y0) * row_from_bottom as f64 / (self.image_height - 1) as f64;

        return Ray::towards(self.center, DVec3::new(sx, sy, 0.));
    }

    /// Clamped colors in row-major order, top row first.
    pub fn render(&self, scene: &Scene) -> Vec<DVec3> {
        let started = Instant::now();
        info!(
            width = self.image_width,
            height = self.image_height,
            objects = scene.objects.len(),
            lights = scene.lights.len(),
            max_depth = scene.constants.max_depth,
            threads = rayon::current_num_threads(),
            "rendering"
        );

        let pixel_count = self.image_width as u64 * self.image_height as u64;
        let progress = if self.show_progress {
            ProgressBar::new(pixel_count)
        } else {
            ProgressBar::hidden()
        };
        match ProgressStyle::with_template(PROGRESS_TEMPLATE) {
            Ok(style) => progress.set_style(style),
            Err(err) => debug!(%err, "invalid progress template, using the default style"),
        }

        let pixels = (0..self.image_height)
            .cartesian_product(0..self.image_width)
            .collect::<Vec<(u32, u32)>>()

            // run in parallel (multi-threaded)
            .into_par_iter()
            .progress_with(progress)
            .map(|(y, x)| render_pixel(scene, self.get_ray(x, y)))
            .collect::<Vec<DVec3>>();

        info!(elapsed_ms = started.elapsed().as_millis() as u64, "render finished");
        return pixels;
    }

    /// Plain-text PPM (P3) for colors already clamped to [0, 1].
    pub fn encode_ppm(&self, pixels: &[DVec3]) -> String {
        let scale = self.max_value as f64;
        let body = pixels
            .iter()
            .map(|color| {
                let color = (color.clamp(DVec3::ZERO, DVec3::ONE) * scale).round();
                format!("{} {} {}", color.x as u32, color.y as u32, color.z as u32)
            })
            .join("\n");

        return format!(
            "P3\n{} {}\n{}\n{}\n",
            self.image_width, self.image_height, self.max_value, body
        );
    }

    pub fn render_to_disk(&self, scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let pixels = self.render(scene);

        // write the image to file
        fs::write(path, self.encode_ppm(&pixels))?;
        info!(path = %path.display(), "wrote image");
        Ok(())
    }
}
