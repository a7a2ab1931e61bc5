//! The demo commands

use anyhow::{Context, Result};
use clap::Args;
use raykit_core::{Color, Point3f};
use raykit_deform::{DeformConfig, MeshFitter};
use raykit_io::{load_scene, read_mesh, three_row_sheet, write_mesh, write_png};
use raykit_raster::{primitives, Camera, MeshRenderer, PointLight, RasterSettings};
use raykit_trace::{demo, render, RenderMode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SHEET_GAP: usize = 4;
const DEFAULT_SNAPSHOT_EVERY: usize = 250;

#[derive(Args, Debug, Clone, Default)]
pub struct TraceArgs {
    /// TOML scene file; the built-in demo scene is used otherwise
    #[arg(long)]
    pub scene: Option<PathBuf>,
    /// Also write every frame into one contact sheet
    #[arg(long)]
    pub sheet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MeshArgs {
    /// Output image width and height in pixels
    #[arg(long, default_value_t = 512)]
    pub size: usize,
    /// Camera distance from the origin
    #[arg(long, default_value_t = 2.7)]
    pub dist: f32,
    /// Camera elevation in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub elev: f32,
    /// Camera azimuth in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub azim: f32,
    /// OBJ mesh to render instead of the unit box
    #[arg(long)]
    pub input: Option<PathBuf>,
}

impl Default for MeshArgs {
    fn default() -> Self {
        Self {
            size: 512,
            dist: 2.7,
            elev: 0.0,
            azim: 0.0,
            input: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DeformArgs {
    /// OBJ mesh to fit; the unit box is used otherwise
    #[arg(long)]
    pub target: Option<PathBuf>,
    /// TOML file with fit parameters
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Subdivision level of the starting icosphere
    #[arg(long, default_value_t = 4)]
    pub level: u32,
    /// Override the number of iterations
    #[arg(long)]
    pub iterations: Option<usize>,
    /// Render a snapshot every this many iterations
    #[arg(long)]
    pub snapshot_every: Option<usize>,
    /// Size of the rendered snapshots in pixels
    #[arg(long, default_value_t = 256)]
    pub size: usize,
}

/// Render a ray traced scene from every camera position.
///
/// Writes `<prefix>_<i>.png` per frame and, with `--sheet`,
/// `<prefix>_sheet.png`.
pub fn ray_demo(out: &Path, mode: RenderMode, args: &TraceArgs) -> Result<Vec<PathBuf>> {
    let (mut scene, cameras) = match &args.scene {
        Some(path) => load_scene(path).with_context(|| format!("loading scene {}", path.display()))?,
        None => {
            let scene = match mode {
                RenderMode::Projection => demo::projection_scene()?,
                RenderMode::Phong => demo::phong_scene()?,
            };
            (scene, demo::camera_path())
        }
    };
    let prefix = match mode {
        RenderMode::Projection => "projection",
        RenderMode::Phong => "phong",
    };

    let mut written = Vec::new();
    let mut frames = Vec::with_capacity(cameras.len());
    for (i, camera) in cameras.into_iter().enumerate() {
        scene.set_camera(camera);
        let frame = render(&scene, mode);
        let path = out.join(format!("{}_{}.png", prefix, i));
        write_png(&frame, &path).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
        frames.push(frame);
    }

    if args.sheet {
        let sheet = three_row_sheet(&frames, SHEET_GAP, Color::WHITE)?;
        let path = out.join(format!("{}_sheet.png", prefix));
        write_png(&sheet, &path).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    info!(mode = prefix, files = written.len(), "ray tracing demo done");
    Ok(written)
}

/// Rasterize the unit box, or `--input`, to `mesh_render.png`.
///
/// An input mesh is first centered and scaled into the unit box's extent so
/// any OBJ lands in front of the camera.
pub fn mesh_demo(out: &Path, args: &MeshArgs) -> Result<PathBuf> {
    let mesh = match &args.input {
        Some(path) => {
            let mut mesh =
                read_mesh(path).with_context(|| format!("reading mesh {}", path.display()))?;
            let framing = mesh
                .fit_to_unit_cube()
                .with_context(|| format!("framing mesh {}", path.display()))?;
            debug!(path = %path.display(), matrix = ?framing.matrix, "framed input mesh");
            mesh
        }
        None => primitives::unit_box(),
    };
    let renderer = MeshRenderer::new(
        Camera::look_at_view(args.dist, args.elev, args.azim),
        RasterSettings::default().with_image_size(args.size),
        PointLight::at(Point3f::new(0.0, 0.0, -3.0)),
    );
    let image = renderer.render(&mesh)?;
    let path = out.join("mesh_render.png");
    write_png(&image, &path).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// The projection, phong and mesh demos, each with its command defaults
pub fn all_demos(out: &Path) -> Result<Vec<PathBuf>> {
    let trace = TraceArgs::default();
    let mut written = ray_demo(out, RenderMode::Projection, &trace)?;
    written.extend(ray_demo(out, RenderMode::Phong, &trace)?);
    written.push(mesh_demo(out, &MeshArgs::default())?);
    Ok(written)
}

fn deform_config(args: &DeformArgs) -> Result<DeformConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            DeformConfig::from_toml_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DeformConfig::default(),
    };
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    config.snapshot_every = args
        .snapshot_every
        .or(config.snapshot_every)
        .or(Some(DEFAULT_SNAPSHOT_EVERY));
    config.validate()?;
    Ok(config)
}

/// Fit an icosphere to the target and render its progress.
///
/// Writes `deform_<iter>.png` snapshots, `deform_final.png` and the fitted
/// mesh as `deform_final.obj`, scaled back to the target's frame.
pub fn deform_demo(out: &Path, args: &DeformArgs) -> Result<Vec<PathBuf>> {
    let target = match &args.target {
        Some(path) => read_mesh(path).with_context(|| format!("reading target {}", path.display()))?,
        None => primitives::unit_box(),
    };
    let config = deform_config(args)?;
    let source = primitives::icosphere(args.level);
    let fitter = MeshFitter::new(&source, &target, config)?;

    let camera = Camera::look_at_view(2.7, 20.0, 30.0);
    let light = PointLight::at(camera.position);
    let renderer = MeshRenderer::new(
        camera,
        RasterSettings::default().with_image_size(args.size),
        light,
    );

    let mut written = Vec::new();
    let result = fitter.fit_with(|iteration, mesh| {
        let path = out.join(format!("deform_{}.png", iteration));
        write_png(&renderer.render(mesh)?, &path)?;
        written.push(path);
        Ok(())
    })?;

    let path = out.join("deform_final.png");
    write_png(&renderer.render(&result.mesh)?, &path)
        .with_context(|| format!("writing {}", path.display()))?;
    written.push(path);

    let path = out.join("deform_final.obj");
    write_mesh(&result.denormalized_mesh(), &path)
        .with_context(|| format!("writing {}", path.display()))?;
    written.push(path);

    if let Some(last) = result.final_loss() {
        info!(
            iterations = result.history.len(),
            total = last.total,
            chamfer = last.chamfer,
            "mesh fit done"
        );
    }
    Ok(written)
}
