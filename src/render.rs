//! Offline frame renderer. Scene shapes are projected to pixels and drawn
//! into a `plotters` bitmap: shaded triangles sorted back to front, then
//! lines, then markers.

use std::path::Path;

use ::glam::{DMat4, DVec3, DVec4};
use plotters::prelude::*;
use tracing::debug;

use crate::camera::Camera;
use crate::error::Result;
use crate::scene::Scene;
use crate::shape::{Geometry, RenderShape, Rgb};
use crate::slope::{TEMPLATE_END, TEMPLATE_START};

pub type Pixel = (i32, i32);

/// Ambient share of the triangle shading
const AMBIENT: f64 = 0.25;
/// Smallest marker half size in pixels
const MIN_MARKER: i32 = 2;
/// Color of the shape picked with Left/Right
pub const SELECTED_COLOR: Rgb = Rgb::YELLOW;

#[derive(Debug, Clone, PartialEq)]
pub struct ShadedTriangle {
    pub points: [Pixel; 3],
    /// mean normalized device depth, larger is farther
    pub depth: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Pixel>,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSquare {
    pub center: Pixel,
    pub half_size: i32,
    pub color: Rgb,
}

/// Everything one draw pass puts on screen, in pixel space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FramePrimitives {
    pub triangles: Vec<ShadedTriangle>,
    pub lines: Vec<Polyline>,
    pub markers: Vec<MarkerSquare>,
}

#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer {
    width: u32,
    height: u32,
}

impl FrameRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        FrameRenderer { width, height }
    }

    /// Pixel position and device depth of a world point, None when it lies
    /// behind the camera or outside the near/far range
    pub fn project(&self, view_proj: &DMat4, world: DVec3) -> Option<(Pixel, f64)> {
        let clip = *view_proj * DVec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= f64::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        let x = (ndc.x + 1.0) * 0.5 * self.width as f64;
        let y = (1.0 - ndc.y) * 0.5 * self.height as f64;
        Some(((x.round() as i32, y.round() as i32), ndc.z))
    }

    /// Project `shapes` into pixel space primitives. Triangles come out
    /// sorted far to near. `highlight` is drawn in [`SELECTED_COLOR`].
    pub fn collect(
        &self,
        shapes: &[&RenderShape],
        highlight: Option<&RenderShape>,
        camera: &Camera,
    ) -> FramePrimitives {
        let view_proj = camera.view_proj();
        let eye = camera.eye();
        let mut frame = FramePrimitives::default();
        for shape in shapes {
            let model = shape.transform.model();
            let color = match highlight {
                Some(selected) if core::ptr::eq(selected, *shape) => SELECTED_COLOR,
                _ => shape.color,
            };
            match &shape.geometry {
                Geometry::Marker => {
                    let Some((center, _)) = self.project(&view_proj, model.transform_point3(DVec3::ZERO)) else {
                        continue;
                    };
                    let half_size = [DVec3::X, DVec3::Y]
                        .into_iter()
                        .filter_map(|axis| self.project(&view_proj, model.transform_point3(axis)))
                        .map(|(p, _)| (p.0 - center.0).abs().max((p.1 - center.1).abs()))
                        .max()
                        .unwrap_or(0)
                        .max(MIN_MARKER);
                    frame.markers.push(MarkerSquare {
                        center,
                        half_size,
                        color,
                    });
                }
                Geometry::Segment => {
                    let ends = [TEMPLATE_START, TEMPLATE_END]
                        .map(|p| self.project(&view_proj, model.transform_point3(p)));
                    if let [Some((a, _)), Some((b, _))] = ends {
                        frame.lines.push(Polyline {
                            points: vec![a, b],
                            color,
                        });
                    }
                }
                Geometry::LineStrip(points) => {
                    let points: Vec<_> = points
                        .iter()
                        .filter_map(|p| self.project(&view_proj, model.transform_point3(*p)))
                        .map(|(pixel, _)| pixel)
                        .collect();
                    frame.lines.push(Polyline { points, color });
                }
                Geometry::Lines(mesh) => {
                    let projected: Vec<_> = mesh
                        .vertices()
                        .iter()
                        .map(|v| self.project(&view_proj, model.transform_point3(*v)))
                        .collect();
                    for [a, b] in mesh.lines().iter().copied() {
                        if let (Some((a, _)), Some((b, _))) = (projected[a as usize], projected[b as usize]) {
                            frame.lines.push(Polyline {
                                points: vec![a, b],
                                color,
                            });
                        }
                    }
                }
                Geometry::Triangles(mesh) => {
                    let world: Vec<_> = mesh.vertices().iter().map(|v| model.transform_point3(*v)).collect();
                    let projected: Vec<_> = world.iter().map(|v| self.project(&view_proj, *v)).collect();
                    for [a, b, c] in mesh.triangles().iter().copied() {
                        let (a, b, c) = (a as usize, b as usize, c as usize);
                        let (Some(pa), Some(pb), Some(pc)) = (projected[a], projected[b], projected[c]) else {
                            continue;
                        };
                        let normal = (world[b] - world[a]).cross(world[c] - world[a]).normalize_or_zero();
                        let centroid = (world[a] + world[b] + world[c]) / 3.0;
                        let light = (eye - centroid).normalize_or_zero();
                        // two sided lambert
                        let shade = AMBIENT + (1.0 - AMBIENT) * normal.dot(light).abs();
                        frame.triangles.push(ShadedTriangle {
                            points: [pa.0, pb.0, pc.0],
                            depth: (pa.1 + pb.1 + pc.1) / 3.0,
                            color: color.scaled(shade),
                        });
                    }
                }
            }
        }
        frame.triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        frame
    }

    /// Draw the scene as seen by `camera` into a PNG at `path`
    pub fn render(&self, scene: &Scene, camera: &Camera, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&BLACK)?;

        let highlight = scene.highlighted();
        let (depth_tested, overlay): (Vec<_>, Vec<_>) =
            scene.draw_list().into_iter().partition(|shape| shape.depth_test);
        for pass in [depth_tested, overlay] {
            let frame = self.collect(&pass, highlight, camera);
            for triangle in &frame.triangles {
                root.draw(&Polygon::new(triangle.points.to_vec(), to_rgb(triangle.color).filled()))?;
            }
            for line in frame.lines.iter().filter(|line| line.points.len() > 1) {
                root.draw(&PathElement::new(line.points.clone(), to_rgb(line.color)))?;
            }
            for marker in &frame.markers {
                let (x, y) = marker.center;
                let h = marker.half_size;
                root.draw(&Rectangle::new([(x - h, y - h), (x + h, y + h)], to_rgb(marker.color).filled()))?;
            }
        }
        root.present()?;
        debug!(path = %path.display(), "frame written");
        Ok(())
    }
}

fn to_rgb(color: Rgb) -> RGBColor {
    let [r, g, b] = color.to_bytes();
    RGBColor(r, g, b)
}
