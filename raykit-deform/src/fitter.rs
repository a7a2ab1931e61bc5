//! Mesh fitting by SGD with momentum

use crate::losses::{chamfer_loss, edge_loss, laplacian_loss};
use crate::sample::sample_points;
use rand::rngs::StdRng;
use rand::SeedableRng;
use raykit_core::{Error, Point3f, Result, TriangleMesh, Vector3f};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Parameters of a fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformConfig {
    pub iterations: usize,
    pub learning_rate: f32,
    pub momentum: f32,
    /// Points sampled from the target surface
    pub target_samples: usize,
    pub w_chamfer: f32,
    pub w_edge: f32,
    pub w_laplacian: f32,
    pub seed: u64,
    /// Call the snapshot callback every this many iterations
    pub snapshot_every: Option<usize>,
}

impl Default for DeformConfig {
    fn default() -> Self {
        Self {
            iterations: 2000,
            learning_rate: 1.0,
            momentum: 0.9,
            target_samples: 5000,
            w_chamfer: 1.0,
            w_edge: 1.0,
            w_laplacian: 0.1,
            seed: 0,
            snapshot_every: None,
        }
    }
}

impl DeformConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| Error::Config(format!("invalid deform config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::Config("iterations must be positive".to_string()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::Config(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(Error::Config(format!(
                "momentum must be in [0, 1), got {}",
                self.momentum
            )));
        }
        if self.target_samples == 0 {
            return Err(Error::Config("target_samples must be positive".to_string()));
        }
        for (name, w) in [
            ("w_chamfer", self.w_chamfer),
            ("w_edge", self.w_edge),
            ("w_laplacian", self.w_laplacian),
        ] {
            if !(w.is_finite() && w >= 0.0) {
                return Err(Error::Config(format!("{} must be non-negative, got {}", name, w)));
            }
        }
        if self.snapshot_every == Some(0) {
            return Err(Error::Config("snapshot_every must be positive".to_string()));
        }
        Ok(())
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_target_samples(mut self, target_samples: usize) -> Self {
        self.target_samples = target_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_snapshot_every(mut self, every: usize) -> Self {
        self.snapshot_every = Some(every);
        self
    }
}

/// Loss terms at one iteration, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossRecord {
    pub iteration: usize,
    pub total: f32,
    pub chamfer: f32,
    pub edge: f32,
    pub laplacian: f32,
}

/// Outcome of [`MeshFitter::fit`]
#[derive(Debug, Clone)]
pub struct FitResult {
    /// Fitted mesh, in the normalized frame of the target
    pub mesh: TriangleMesh,
    /// One record per iteration
    pub history: Vec<LossRecord>,
    target_center: Point3f,
    target_scale: f32,
}

impl FitResult {
    /// The fitted mesh moved back into the target's original position and size
    pub fn denormalized_mesh(&self) -> TriangleMesh {
        let mut mesh = self.mesh.clone();
        for v in &mut mesh.vertices {
            *v = Point3f::from(v.coords / self.target_scale) + self.target_center.coords;
        }
        mesh
    }

    pub fn final_loss(&self) -> Option<&LossRecord> {
        self.history.last()
    }
}

/// Deforms a source mesh toward a target surface.
///
/// Only vertex positions move; the face list of the source is kept as is.
pub struct MeshFitter {
    source: TriangleMesh,
    target_points: Vec<Point3f>,
    target_center: Point3f,
    target_scale: f32,
    edges: Vec<(usize, usize)>,
    neighbors: Vec<Vec<usize>>,
    config: DeformConfig,
}

impl MeshFitter {
    pub fn new(source: &TriangleMesh, target: &TriangleMesh, config: DeformConfig) -> Result<Self> {
        config.validate()?;
        source.validate()?;
        target.validate()?;

        let mut source = source.clone();
        source.normalize_to_unit_sphere()?;
        source.normals = None;
        let mut target = target.clone();
        let (target_center, target_scale) = target.normalize_to_unit_sphere()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let target_points = sample_points(&target, config.target_samples, &mut rng)?;

        let edges = source.edges();
        let neighbors = source.vertex_neighbors();
        Ok(Self {
            source,
            target_points,
            target_center,
            target_scale,
            edges,
            neighbors,
            config,
        })
    }

    pub fn config(&self) -> &DeformConfig {
        &self.config
    }

    /// The normalized source mesh the fit starts from
    pub fn source(&self) -> &TriangleMesh {
        &self.source
    }

    pub fn target_points(&self) -> &[Point3f] {
        &self.target_points
    }

    pub fn fit(&self) -> Result<FitResult> {
        self.fit_with(|_, _| Ok(()))
    }

    /// Run the fit, calling `snapshot(iteration, mesh)` every
    /// `snapshot_every` iterations, starting at iteration 0.
    ///
    /// The snapshot sees the mesh the losses of that iteration were measured on.
    pub fn fit_with<F>(&self, mut snapshot: F) -> Result<FitResult>
    where
        F: FnMut(usize, &TriangleMesh) -> Result<()>,
    {
        let start = Instant::now();
        let n = self.source.vertex_count();
        let mut offsets = vec![Vector3f::zeros(); n];
        let mut velocity = vec![Vector3f::zeros(); n];
        let mut history = Vec::with_capacity(self.config.iterations);
        let mut mesh = self.source.clone();
        let log_every = (self.config.iterations / 10).max(1);

        info!(
            vertices = n,
            faces = self.source.face_count(),
            target_samples = self.target_points.len(),
            iterations = self.config.iterations,
            "starting mesh fit"
        );

        for iteration in 0..self.config.iterations {
            for ((v, base), offset) in mesh.vertices.iter_mut().zip(&self.source.vertices).zip(&offsets) {
                *v = base + offset;
            }

            let (chamfer, chamfer_grad) = chamfer_loss(&mesh.vertices, &self.target_points)?;
            let (edge, edge_grad) = edge_loss(&mesh.vertices, &self.edges);
            let (laplacian, laplacian_grad) = laplacian_loss(&mesh.vertices, &self.neighbors);
            let total = self.config.w_chamfer * chamfer
                + self.config.w_edge * edge
                + self.config.w_laplacian * laplacian;

            if !total.is_finite() {
                return Err(Error::Algorithm(format!(
                    "loss diverged at iteration {} (chamfer {}, edge {}, laplacian {})",
                    iteration, chamfer, edge, laplacian
                )));
            }

            history.push(LossRecord {
                iteration,
                total,
                chamfer,
                edge,
                laplacian,
            });

            if iteration % log_every == 0 {
                debug!(iteration, total, chamfer, edge, laplacian, "fit progress");
            }

            if let Some(every) = self.config.snapshot_every {
                if iteration % every == 0 {
                    snapshot(iteration, &mesh)?;
                }
            }

            for (k, (off, vel)) in offsets.iter_mut().zip(velocity.iter_mut()).enumerate() {
                let grad = chamfer_grad[k] * self.config.w_chamfer
                    + edge_grad[k] * self.config.w_edge
                    + laplacian_grad[k] * self.config.w_laplacian;
                *vel = *vel * self.config.momentum + grad;
                *off -= *vel * self.config.learning_rate;
            }
        }

        for ((v, base), offset) in mesh.vertices.iter_mut().zip(&self.source.vertices).zip(&offsets) {
            *v = base + offset;
        }

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            final_loss = history.last().map(|r| r.total).unwrap_or_default(),
            "mesh fit finished"
        );

        Ok(FitResult {
            mesh,
            history,
            target_center: self.target_center,
            target_scale: self.target_scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use raykit_raster::primitives::{icosphere, unit_box};

    fn small_config() -> DeformConfig {
        DeformConfig::default()
            .with_iterations(20)
            .with_target_samples(300)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(DeformConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_from_partial_toml() {
        let config = DeformConfig::from_toml_str("iterations = 50\nw_laplacian = 0.5\n").unwrap();
        assert_eq!(config.iterations, 50);
        assert_relative_eq!(config.w_laplacian, 0.5);
        assert_relative_eq!(config.momentum, 0.9);
        assert_eq!(config.snapshot_every, None);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(DeformConfig::from_toml_str("momentum = 1.0").is_err());
        assert!(DeformConfig::from_toml_str("iterations = 0").is_err());
        assert!(DeformConfig::from_toml_str("w_edge = -1.0").is_err());
        assert!(DeformConfig::from_toml_str("learning_rate = 0.0").is_err());
        assert!(DeformConfig::from_toml_str("iterations = \"many\"").is_err());
        assert!(DeformConfig::default().with_snapshot_every(0).validate().is_err());
    }

    #[test]
    fn test_fit_keeps_topology() {
        let source = icosphere(1);
        let fitter = MeshFitter::new(&source, &unit_box(), small_config()).unwrap();
        let result = fitter.fit().unwrap();
        assert_eq!(result.mesh.faces, source.faces);
        assert_eq!(result.mesh.vertex_count(), source.vertex_count());
        assert_eq!(result.history.len(), 20);
        assert_eq!(result.history[0].iteration, 0);
        assert_eq!(result.final_loss().map(|r| r.iteration), Some(19));
    }

    #[test]
    fn test_snapshots_follow_period() {
        let fitter = MeshFitter::new(
            &icosphere(1),
            &unit_box(),
            small_config().with_iterations(12).with_snapshot_every(5),
        )
        .unwrap();
        let mut seen = Vec::new();
        fitter
            .fit_with(|iteration, mesh| {
                assert_eq!(mesh.vertex_count(), 42);
                seen.push(iteration);
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![0, 5, 10]);
    }

    #[test]
    fn test_snapshot_error_aborts_fit() {
        let fitter = MeshFitter::new(
            &icosphere(0),
            &unit_box(),
            small_config().with_snapshot_every(1),
        )
        .unwrap();
        let result = fitter.fit_with(|_, _| Err(Error::Io(std::io::Error::other("disk full"))));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_divergence_is_reported() {
        let fitter = MeshFitter::new(
            &icosphere(1),
            &unit_box(),
            small_config().with_learning_rate(1e30),
        )
        .unwrap();
        assert!(matches!(fitter.fit(), Err(Error::Algorithm(_))));
    }

    #[test]
    fn test_same_seed_same_fit() {
        let config = small_config().with_iterations(5).with_seed(42);
        let a = MeshFitter::new(&icosphere(1), &unit_box(), config.clone()).unwrap().fit().unwrap();
        let b = MeshFitter::new(&icosphere(1), &unit_box(), config).unwrap().fit().unwrap();
        assert_eq!(a.mesh.vertices, b.mesh.vertices);
    }

    #[test]
    fn test_denormalized_mesh_uses_target_frame() {
        let mut target = unit_box();
        for v in &mut target.vertices {
            *v = Point3f::from(v.coords * 3.0) + Vector3f::new(10.0, 0.0, 0.0);
        }
        let fitter = MeshFitter::new(&icosphere(1), &target, small_config().with_iterations(1)).unwrap();
        let result = fitter.fit().unwrap();
        let moved = result.denormalized_mesh();
        let radius = 3.0 * 3.0f32.sqrt();
        for (n, d) in result.mesh.vertices.iter().zip(&moved.vertices) {
            let expected = Point3f::from(n.coords * radius) + Vector3f::new(10.0, 0.0, 0.0);
            assert_relative_eq!(d.x, expected.x, epsilon = 1e-3);
            assert_relative_eq!(d.y, expected.y, epsilon = 1e-3);
            assert_relative_eq!(d.z, expected.z, epsilon = 1e-3);
        }
    }
}
