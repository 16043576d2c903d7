use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Unit meshes shared by every scene object; objects scale them per instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Octahedron,
    Icosahedron,
}

impl MeshKind {
    pub const ALL: [MeshKind; 3] = [MeshKind::Cube, MeshKind::Octahedron, MeshKind::Icosahedron];

    pub fn index(self) -> usize {
        match self {
            MeshKind::Cube => 0,
            MeshKind::Octahedron => 1,
            MeshKind::Icosahedron => 2,
        }
    }

    /// Flat-shaded, non-indexed triangle list with outward normals.
    pub fn vertices(self) -> Vec<Vertex> {
        match self {
            MeshKind::Cube => cube(),
            MeshKind::Octahedron => octahedron(),
            MeshKind::Icosahedron => icosahedron(),
        }
    }
}

// Winding is fixed up so every face is counter-clockwise seen from outside.
// Valid for convex meshes centered on the origin.
fn push_face(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3) {
    let mut normal = (b - a).cross(c - a).normalize_or_zero();
    let (b, c) = if normal.dot(a + b + c) < 0.0 {
        normal = -normal;
        (c, b)
    } else {
        (b, c)
    };
    for p in [a, b, c] {
        out.push(Vertex {
            position: p.to_array(),
            normal: normal.to_array(),
        });
    }
}

// Side length 1.
fn cube() -> Vec<Vertex> {
    let mut out = Vec::with_capacity(36);
    let axes = [Vec3::X, Vec3::Y, Vec3::Z];
    for (i, &n) in axes.iter().enumerate() {
        let u = axes[(i + 1) % 3];
        let v = axes[(i + 2) % 3];
        for sign in [1.0, -1.0] {
            let center = n * 0.5 * sign;
            let p00 = center - u * 0.5 - v * 0.5;
            let p10 = center + u * 0.5 - v * 0.5;
            let p11 = center + u * 0.5 + v * 0.5;
            let p01 = center - u * 0.5 + v * 0.5;
            push_face(&mut out, p00, p10, p11);
            push_face(&mut out, p00, p11, p01);
        }
    }
    out
}

// Circumradius 1.
fn octahedron() -> Vec<Vertex> {
    let mut out = Vec::with_capacity(24);
    for sx in [1.0, -1.0] {
        for sy in [1.0, -1.0] {
            for sz in [1.0, -1.0] {
                push_face(&mut out, Vec3::X * sx, Vec3::Y * sy, Vec3::Z * sz);
            }
        }
    }
    out
}

// Circumradius 1.
fn icosahedron() -> Vec<Vertex> {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let corners = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(Vec3::normalize);
    const FACES: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    let mut out = Vec::with_capacity(60);
    for [a, b, c] in FACES {
        push_face(&mut out, corners[a], corners[b], corners[c]);
    }
    out
}
