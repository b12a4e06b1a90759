//! Neural-network backdrop for the hero section: drifting nodes joined by
//! edges, projected through a slowly orbiting perspective camera.

pub const NODE_COUNT: usize = 40;
pub const LINK_DISTANCE: f64 = 15.0;
const BOUNDS: Vec3 = Vec3 {
    x: 50.0,
    y: 50.0,
    z: 30.0,
};
const CAMERA_DISTANCE: f64 = 30.0;
const FIELD_OF_VIEW_DEG: f64 = 75.0;
const NEAR_PLANE: f64 = 0.1;
const TIME_SCALE: f64 = 0.5;
const FLOAT_AMPLITUDE: f64 = 0.008;
const NODE_RADIUS: f64 = 0.3;
/// Frames longer than this are treated as a pause (hidden tab, debugger).
const MAX_FRAME_DELTA: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NeuralScene {
    nodes: Vec<Vec3>,
    edges: Vec<(usize, usize)>,
    time: f64,
    camera: Vec3,
}

impl NeuralScene {
    /// `random` yields values in `[0, 1)`.
    pub fn generate(count: usize, mut random: impl FnMut() -> f64) -> Self {
        let nodes: Vec<Vec3> = (0..count)
            .map(|_| Vec3 {
                x: (random() - 0.5) * BOUNDS.x,
                y: (random() - 0.5) * BOUNDS.y,
                z: (random() - 0.5) * BOUNDS.z,
            })
            .collect();

        Self::from_nodes(nodes)
    }

    pub fn from_nodes(nodes: Vec<Vec3>) -> Self {
        let mut edges = Vec::new();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if nodes[i].distance(nodes[j]) < LINK_DISTANCE {
                    edges.push((i, j));
                }
            }
        }

        Self {
            nodes,
            edges,
            time: 0.0,
            camera: Vec3 {
                x: 0.0,
                y: 0.0,
                z: CAMERA_DISTANCE,
            },
        }
    }

    pub fn nodes(&self) -> &[Vec3] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn camera(&self) -> Vec3 {
        self.camera
    }

    /// Advances by `delta_seconds` of wall-clock time.
    pub fn advance(&mut self, delta_seconds: f64) {
        let delta = delta_seconds.clamp(0.0, MAX_FRAME_DELTA);
        self.time += delta * TIME_SCALE;

        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.y += (self.time * 2.0 + index as f64 * 0.1).sin() * FLOAT_AMPLITUDE;
        }

        self.camera.x = (self.time * 0.15).sin() * 2.0;
        self.camera.y = (self.time * 0.2).cos() * 2.0;
    }

    /// Perspective projection onto a `width`×`height` canvas, camera looking at the origin.
    pub fn project(&self, point: Vec3, width: f64, height: f64) -> Option<Projected> {
        let forward = normalize(Vec3 {
            x: -self.camera.x,
            y: -self.camera.y,
            z: -self.camera.z,
        })?;
        let right = normalize(cross(forward, Vec3 { x: 0.0, y: 1.0, z: 0.0 }))?;
        let up = cross(right, forward);

        let relative = Vec3 {
            x: point.x - self.camera.x,
            y: point.y - self.camera.y,
            z: point.z - self.camera.z,
        };
        let depth = dot(relative, forward);
        if depth <= NEAR_PLANE {
            return None;
        }

        let focal = (height / 2.0) / (FIELD_OF_VIEW_DEG.to_radians() / 2.0).tan();
        let scale = focal / depth;

        Some(Projected {
            x: width / 2.0 + dot(relative, right) * scale,
            y: height / 2.0 - dot(relative, up) * scale,
            radius: NODE_RADIUS * scale,
        })
    }
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3 {
        x: a.y * b.z - a.z * b.y,
        y: a.z * b.x - a.x * b.z,
        z: a.x * b.y - a.y * b.x,
    }
}

fn normalize(v: Vec3) -> Option<Vec3> {
    let length = dot(v, v).sqrt();
    if length <= f64::EPSILON {
        return None;
    }
    Some(Vec3 {
        x: v.x / length,
        y: v.y / length,
        z: v.z / length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut index = 0;
        move || {
            let value = values[index % values.len()];
            index += 1;
            value
        }
    }

    #[test]
    fn generated_nodes_stay_inside_bounds() {
        let scene = NeuralScene::generate(NODE_COUNT, sequence(&[0.0, 0.25, 0.5, 0.999]));
        assert_eq!(scene.nodes().len(), NODE_COUNT);
        for node in scene.nodes() {
            assert!(node.x.abs() <= 25.0);
            assert!(node.y.abs() <= 25.0);
            assert!(node.z.abs() <= 15.0);
        }
    }

    #[test]
    fn only_close_nodes_are_linked() {
        let scene = NeuralScene::from_nodes(vec![
            Vec3 { x: 0.0, y: 0.0, z: 0.0 },
            Vec3 { x: 10.0, y: 0.0, z: 0.0 },
            Vec3 { x: 30.0, y: 0.0, z: 0.0 },
            Vec3 { x: 0.0, y: 14.9, z: 0.0 },
        ]);
        assert_eq!(scene.edges(), &[(0, 1), (0, 3)]);
    }

    #[test]
    fn origin_projects_to_canvas_centre() {
        let scene = NeuralScene::from_nodes(Vec::new());
        let projected = scene
            .project(Vec3::default(), 800.0, 600.0)
            .expect("origin is in front of the camera");
        assert!((projected.x - 400.0).abs() < 1e-9);
        assert!((projected.y - 300.0).abs() < 1e-9);
        assert!(projected.radius > 0.0);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let scene = NeuralScene::from_nodes(Vec::new());
        assert_eq!(scene.project(Vec3 { x: 0.0, y: 0.0, z: 40.0 }, 800.0, 600.0), None);
    }

    #[test]
    fn advancing_orbits_the_camera_and_ignores_long_pauses() {
        let mut scene = NeuralScene::from_nodes(vec![Vec3::default()]);
        scene.advance(0.016);
        let camera = scene.camera();
        assert!(camera.x > 0.0);
        assert!((camera.z - CAMERA_DISTANCE).abs() < 1e-9);

        let before = scene.clone();
        scene.advance(60.0);
        let drift = (scene.time - before.time).abs();
        assert!(drift <= MAX_FRAME_DELTA * TIME_SCALE + 1e-12);
    }
}
