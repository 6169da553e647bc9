//! Cuboid geometry.
//!
//! [`BoxGeometry`] tessellates an axis-aligned box centred at the origin. Each
//! of the six faces is a regular grid of `(segments_u + 1) * (segments_v + 1)`
//! vertices. Every grid cell is split into two counter-clockwise triangles, and
//! the wireframe is the three edges of every triangle.
//!
//! Faces are not welded, so vertices on shared box edges appear once per face.

/// Immutable box shape: dimensions, subdivisions and the tessellated result.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxGeometry {
    size: [f32; 3],
    segments: [u32; 3],
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

/// Describes one face of the box for [`BoxGeometry::build_plane`].
struct Plane {
    /// Axis the grid columns run along.
    u: usize,
    /// Axis the grid rows run along.
    v: usize,
    /// Axis the face is pushed out on.
    w: usize,
    udir: f32,
    vdir: f32,
    width: f32,
    height: f32,
    /// Signed box extent along `w`; the face sits at half of it.
    depth: f32,
    grid_x: u32,
    grid_y: u32,
}

impl BoxGeometry {
    /// Tessellate a `width` x `height` x `depth` box with the given number of
    /// segments per axis. Segment counts below one are raised to one.
    pub fn new(size: [f32; 3], segments: [u32; 3]) -> Self {
        let [width, height, depth] = size;
        let [sx, sy, sz] = segments.map(|s| s.max(1));

        let mut geometry = Self {
            size,
            segments: [sx, sy, sz],
            positions: Vec::new(),
            indices: Vec::new(),
        };

        // px, nx, py, ny, pz, nz
        #[rustfmt::skip]
        let planes = [
            Plane { u: 2, v: 1, w: 0, udir: -1.0, vdir: -1.0, width: depth, height, depth: width, grid_x: sz, grid_y: sy },
            Plane { u: 2, v: 1, w: 0, udir: 1.0, vdir: -1.0, width: depth, height, depth: -width, grid_x: sz, grid_y: sy },
            Plane { u: 0, v: 2, w: 1, udir: 1.0, vdir: 1.0, width, height: depth, depth: height, grid_x: sx, grid_y: sz },
            Plane { u: 0, v: 2, w: 1, udir: 1.0, vdir: -1.0, width, height: depth, depth: -height, grid_x: sx, grid_y: sz },
            Plane { u: 0, v: 1, w: 2, udir: 1.0, vdir: -1.0, width, height, depth, grid_x: sx, grid_y: sy },
            Plane { u: 0, v: 1, w: 2, udir: -1.0, vdir: -1.0, width, height, depth: -depth, grid_x: sx, grid_y: sy },
        ];
        for plane in &planes {
            geometry.build_plane(plane);
        }
        geometry
    }

    fn build_plane(&mut self, plane: &Plane) {
        let offset = self.positions.len() as u32;
        let segment_width = plane.width / plane.grid_x as f32;
        let segment_height = plane.height / plane.grid_y as f32;
        let width_half = plane.width / 2.0;
        let height_half = plane.height / 2.0;
        let depth_half = plane.depth / 2.0;
        let grid_x1 = plane.grid_x + 1;

        for iy in 0..=plane.grid_y {
            let y = iy as f32 * segment_height - height_half;
            for ix in 0..=plane.grid_x {
                let x = ix as f32 * segment_width - width_half;
                let mut position = [0.0; 3];
                position[plane.u] = x * plane.udir;
                position[plane.v] = y * plane.vdir;
                position[plane.w] = depth_half;
                self.positions.push(position);
            }
        }

        for iy in 0..plane.grid_y {
            for ix in 0..plane.grid_x {
                let a = offset + ix + grid_x1 * iy;
                let b = offset + ix + grid_x1 * (iy + 1);
                let c = offset + (ix + 1) + grid_x1 * (iy + 1);
                let d = offset + (ix + 1) + grid_x1 * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
    }

    pub fn size(&self) -> [f32; 3] {
        self.size
    }

    pub fn segments(&self) -> [u32; 3] {
        self.segments
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Triangle list indices into [`positions`](Self::positions).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Line list indices: the three edges of every triangle.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        self.indices
            .chunks_exact(3)
            .flat_map(|t| [t[0], t[1], t[1], t[2], t[2], t[0]])
            .collect()
    }
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::new([1.0, 1.0, 1.0], [2, 2, 2])
    }
}
