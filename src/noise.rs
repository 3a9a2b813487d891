//! Seedable gradient noise for bubble motion.
//!
//! Speed-improved 2D/3D simplex and Perlin noise after Stefan Gustavson's
//! public-domain reference code (with Peter Eastman's optimisations). The
//! permutation seeding and corner ordering are kept exactly so a given seed
//! produces the same field, bit for bit, as the reference implementation.

use noise::NoiseFn;

/// Ken Perlin's reference permutation, used as seed material.
const P: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// The 12 cube-edge gradients shared by the 2D and 3D variants.
const GRAD3: [Grad; 12] = [
    Grad::new(1.0, 1.0, 0.0),
    Grad::new(-1.0, 1.0, 0.0),
    Grad::new(1.0, -1.0, 0.0),
    Grad::new(-1.0, -1.0, 0.0),
    Grad::new(1.0, 0.0, 1.0),
    Grad::new(-1.0, 0.0, 1.0),
    Grad::new(1.0, 0.0, -1.0),
    Grad::new(-1.0, 0.0, -1.0),
    Grad::new(0.0, 1.0, 1.0),
    Grad::new(0.0, -1.0, 1.0),
    Grad::new(0.0, 1.0, -1.0),
    Grad::new(0.0, -1.0, -1.0),
];

/// Length of the mirrored lookup tables.
pub const TABLE_LEN: usize = 512;

// Skew/unskew factors. F2 = (√3 - 1) / 2, G2 = (3 - √3) / 6.
const F2: f64 = 0.366_025_403_784_438_6;
const G2: f64 = 0.211_324_865_405_187_13;
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

/// Corner offset within a simplex cell
type Offset3 = (usize, usize, usize);

/// Gradient vector at a lattice corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grad {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Grad {
    const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    fn dot2(&self, x: f64, y: f64) -> f64 {
        self.x * x + self.y * y
    }

    #[inline]
    fn dot3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.x * x + self.y * y + self.z * z
    }
}

/// Permutation and gradient lookup tables derived from one seed.
///
/// Both tables are mirrored (`[i] == [i + 256]`) so corner hashing never
/// needs to wrap an index.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseTables {
    pub perm: [u8; TABLE_LEN],
    pub grad: [Grad; TABLE_LEN],
}

/// Build the lookup tables for `seed`.
///
/// Seeds in (0, 1) are treated as normalized and scaled by 65536. The
/// floored seed is then taken as a 32-bit integer (non-finite values become
/// 0); seeds below 256 are mixed with a copy shifted left by 8 so both
/// bytes carry entropy. Even entries of the base permutation are XOR-ed
/// with the high byte, odd entries with the low byte.
pub fn build_tables(seed: f64) -> NoiseTables {
    let scaled = if seed > 0.0 && seed < 1.0 {
        seed * 65536.0
    } else {
        seed
    };
    let floored = scaled.floor();

    let mut bits = to_int32(floored);
    if floored < 256.0 {
        bits |= bits.wrapping_shl(8);
    }
    let low = (bits & 255) as u8;
    let high = ((bits >> 8) & 255) as u8;

    let mut perm = [0u8; TABLE_LEN];
    let mut grad = [GRAD3[0]; TABLE_LEN];
    for (i, &base) in P.iter().enumerate() {
        let v = if i & 1 == 1 { base ^ low } else { base ^ high };
        perm[i] = v;
        perm[i + 256] = v;
        grad[i] = GRAD3[v as usize % 12];
        grad[i + 256] = grad[i];
    }

    NoiseTables { perm, grad }
}

/// Convert an already-integral float to a 32-bit integer with wrapping.
fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32 as i32
}

/// Lattice coordinate reduced to the 0..256 table range.
#[inline]
fn wrap_cell(cell: f64) -> usize {
    (to_int32(cell) & 255) as usize
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Corner contribution with radial falloff `(0.5 - r²)⁴`.
#[inline]
fn corner2(grad: &Grad, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * grad.dot2(x, y)
    }
}

#[inline]
fn corner3(grad: &Grad, x: f64, y: f64, z: f64) -> f64 {
    let t = 0.5 - x * x - y * y - z * z;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * grad.dot3(x, y, z)
    }
}

/// Which noise function to sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum NoiseKind {
    Simplex2,
    Simplex3,
    Perlin2,
    Perlin3,
}

impl NoiseKind {
    /// Sample this kind on the z = 0 plane
    pub fn sample(self, engine: &NoiseEngine, x: f64, y: f64) -> f64 {
        match self {
            NoiseKind::Simplex2 => engine.simplex2(x, y),
            NoiseKind::Simplex3 => engine.simplex3(x, y, 0.0),
            NoiseKind::Perlin2 => engine.perlin2(x, y),
            NoiseKind::Perlin3 => engine.perlin3(x, y, 0.0),
        }
    }
}

/// Deterministic gradient noise engine
///
/// Immutable after construction except through [`NoiseEngine::reseed`].
#[derive(Clone, Debug)]
pub struct NoiseEngine {
    seed: f64,
    tables: NoiseTables,
}

impl Default for NoiseEngine {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl NoiseEngine {
    /// Create an engine seeded with `seed` (any real number)
    pub fn new(seed: f64) -> Self {
        Self {
            seed,
            tables: build_tables(seed),
        }
    }

    /// Replace both lookup tables with ones built from `seed`
    pub fn reseed(&mut self, seed: f64) {
        self.tables = build_tables(seed);
        self.seed = seed;
    }

    /// Seed the current tables were built from
    pub fn seed(&self) -> f64 {
        self.seed
    }

    /// Permutation and gradient tables for the current seed
    pub fn tables(&self) -> &NoiseTables {
        &self.tables
    }

    /// Borrow this engine as a Perlin [`NoiseFn`]
    pub fn perlin(&self) -> PerlinView<'_> {
        PerlinView { engine: self }
    }

    /// 2D simplex noise in [-1, 1]
    pub fn simplex2(&self, xin: f64, yin: f64) -> f64 {
        // Skew into simplex cell space
        let s = (xin + yin) * F2;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let t = (i + j) * G2;
        let x0 = xin - i + t;
        let y0 = yin - j + t;

        // Lower triangle only on strict x0 > y0; equality takes the upper one.
        let (i1, j1): (usize, usize) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let i = wrap_cell(i);
        let j = wrap_cell(j);
        let perm = &self.tables.perm;
        let grad = &self.tables.grad;
        let g0 = &grad[i + perm[j] as usize];
        let g1 = &grad[i + i1 + perm[j + j1] as usize];
        let g2 = &grad[i + 1 + perm[j + 1] as usize];

        let n0 = corner2(g0, x0, y0);
        let n1 = corner2(g1, x1, y1);
        let n2 = corner2(g2, x2, y2);

        70.0 * (n0 + n1 + n2)
    }

    /// 3D simplex noise in [-1, 1]
    pub fn simplex3(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        let s = (xin + yin + zin) * F3;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let k = (zin + s).floor();

        let t = (i + j + k) * G3;
        let x0 = xin - i + t;
        let y0 = yin - j + t;
        let z0 = zin - k + t;

        // Offsets of the second and third corners, by axis ordering
        let ((i1, j1, k1), (i2, j2, k2)): (Offset3, Offset3) = if x0 >= y0 {
            if y0 >= z0 {
                ((1, 0, 0), (1, 1, 0))
            } else if x0 >= z0 {
                ((1, 0, 0), (1, 0, 1))
            } else {
                ((0, 0, 1), (1, 0, 1))
            }
        } else if y0 < z0 {
            ((0, 0, 1), (0, 1, 1))
        } else if x0 < z0 {
            ((0, 1, 0), (0, 1, 1))
        } else {
            ((0, 1, 0), (1, 1, 0))
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;

        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;

        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let i = wrap_cell(i);
        let j = wrap_cell(j);
        let k = wrap_cell(k);
        let perm = &self.tables.perm;
        let grad = &self.tables.grad;
        let hash =
            |di: usize, dj: usize, dk: usize| i + di + perm[j + dj + perm[k + dk] as usize] as usize;
        let g0 = &grad[hash(0, 0, 0)];
        let g1 = &grad[hash(i1, j1, k1)];
        let g2 = &grad[hash(i2, j2, k2)];
        let g3 = &grad[hash(1, 1, 1)];

        let n0 = corner3(g0, x0, y0, z0);
        let n1 = corner3(g1, x1, y1, z1);
        let n2 = corner3(g2, x2, y2, z2);
        let n3 = corner3(g3, x3, y3, z3);

        32.0 * (n0 + n1 + n2 + n3)
    }

    /// 2D Perlin noise
    pub fn perlin2(&self, x: f64, y: f64) -> f64 {
        let cx = x.floor();
        let cy = y.floor();
        let x = x - cx;
        let y = y - cy;
        let cx = wrap_cell(cx);
        let cy = wrap_cell(cy);

        let perm = &self.tables.perm;
        let grad = &self.tables.grad;
        let n00 = grad[cx + perm[cy] as usize].dot2(x, y);
        let n01 = grad[cx + perm[cy + 1] as usize].dot2(x, y - 1.0);
        let n10 = grad[cx + 1 + perm[cy] as usize].dot2(x - 1.0, y);
        let n11 = grad[cx + 1 + perm[cy + 1] as usize].dot2(x - 1.0, y - 1.0);

        let u = fade(x);
        lerp(lerp(n00, n10, u), lerp(n01, n11, u), fade(y))
    }

    /// 3D Perlin noise
    pub fn perlin3(&self, x: f64, y: f64, z: f64) -> f64 {
        let cx = x.floor();
        let cy = y.floor();
        let cz = z.floor();
        let x = x - cx;
        let y = y - cy;
        let z = z - cz;
        let cx = wrap_cell(cx);
        let cy = wrap_cell(cy);
        let cz = wrap_cell(cz);

        let perm = &self.tables.perm;
        let grad = &self.tables.grad;
        let corner = |dx: usize, dy: usize, dz: usize| {
            grad[cx + dx + perm[cy + dy + perm[cz + dz] as usize] as usize]
        };
        let n000 = corner(0, 0, 0).dot3(x, y, z);
        let n001 = corner(0, 0, 1).dot3(x, y, z - 1.0);
        let n010 = corner(0, 1, 0).dot3(x, y - 1.0, z);
        let n011 = corner(0, 1, 1).dot3(x, y - 1.0, z - 1.0);
        let n100 = corner(1, 0, 0).dot3(x - 1.0, y, z);
        let n101 = corner(1, 0, 1).dot3(x - 1.0, y, z - 1.0);
        let n110 = corner(1, 1, 0).dot3(x - 1.0, y - 1.0, z);
        let n111 = corner(1, 1, 1).dot3(x - 1.0, y - 1.0, z - 1.0);

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        lerp(
            lerp(lerp(n000, n100, u), lerp(n001, n101, u), w),
            lerp(lerp(n010, n110, u), lerp(n011, n111, u), w),
            v,
        )
    }
}

impl NoiseFn<f64, 2> for NoiseEngine {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.simplex2(point[0], point[1])
    }
}

impl NoiseFn<f64, 3> for NoiseEngine {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.simplex3(point[0], point[1], point[2])
    }
}

/// Perlin sampling over a borrowed engine
#[derive(Clone, Copy, Debug)]
pub struct PerlinView<'a> {
    engine: &'a NoiseEngine,
}

impl NoiseFn<f64, 2> for PerlinView<'_> {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.engine.perlin2(point[0], point[1])
    }
}

impl NoiseFn<f64, 3> for PerlinView<'_> {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.engine.perlin3(point[0], point[1], point[2])
    }
}
