//! The six faces of the gallery cube.

use glam::Quat;

/// One side of the cube.
///
/// Variants are listed in canonical fill order: the grid allocator hands the
/// first slice of the input to `Front`, the second to `Back`, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    Front = 0,
    Back = 1,
    Left = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

impl CubeFace {
    /// All six faces in canonical order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    /// Numeric face id, `0..6`.
    #[inline]
    pub fn id(self) -> usize {
        self as usize
    }

    /// Look up a face by its numeric id.
    pub fn from_id(id: usize) -> Option<CubeFace> {
        Self::ALL.get(id).copied()
    }

    /// Face-level orientation as `(axis, degrees)`.
    ///
    /// Y is the vertical axis and X the horizontal one; angles follow the
    /// surface convention where y grows downward and z points at the viewer.
    pub fn rotation_degrees(self) -> (glam::Vec3, f32) {
        match self {
            CubeFace::Front => (glam::Vec3::Y, 0.0),
            CubeFace::Back => (glam::Vec3::Y, 180.0),
            CubeFace::Left => (glam::Vec3::Y, -90.0),
            CubeFace::Right => (glam::Vec3::Y, 90.0),
            CubeFace::Top => (glam::Vec3::X, 90.0),
            CubeFace::Bottom => (glam::Vec3::X, -90.0),
        }
    }

    /// Rotation that turns the front face into this face.
    pub fn rotation(self) -> Quat {
        let (axis, degrees) = self.rotation_degrees();
        Quat::from_axis_angle(axis, degrees.to_radians())
    }

    /// Outward unit normal of this face in cube space.
    pub fn normal(self) -> glam::Vec3 {
        self.rotation() * glam::Vec3::Z
    }
}
