//! The Utah teapot as 28 bicubic patches.
//!
//! Control points from the classic `teapotCGA.bpt` data set
//! (http://www.holmes3d.net/graphics/teapot/teapotCGA.bpt), y up,
//! resting on y = 0 and about 3 units tall.

use ::glam::DVec3;

use super::*;

/// Number of patches in the teapot
pub const TEAPOT_PATCHES: usize = 28;

/// Control points of each patch, row by row
#[rustfmt::skip]
pub const TEAPOT_CONTROL_POINTS: [[[f64; 3]; 16]; TEAPOT_PATCHES] = [
    // rim
    [
        [1.4, 2.25, 0.0], [1.3375, 2.38125, 0.0], [1.4375, 2.38125, 0.0], [1.5, 2.25, 0.0],
        [1.4, 2.25, 0.784], [1.3375, 2.38125, 0.749], [1.4375, 2.38125, 0.805], [1.5, 2.25, 0.84],
        [0.784, 2.25, 1.4], [0.749, 2.38125, 1.3375], [0.805, 2.38125, 1.4375], [0.84, 2.25, 1.5],
        [0.0, 2.25, 1.4], [0.0, 2.38125, 1.3375], [0.0, 2.38125, 1.4375], [0.0, 2.25, 1.5],
    ],
    // rim
    [
        [0.0, 2.25, 1.4], [0.0, 2.38125, 1.3375], [0.0, 2.38125, 1.4375], [0.0, 2.25, 1.5],
        [-0.784, 2.25, 1.4], [-0.749, 2.38125, 1.3375], [-0.805, 2.38125, 1.4375], [-0.84, 2.25, 1.5],
        [-1.4, 2.25, 0.784], [-1.3375, 2.38125, 0.749], [-1.4375, 2.38125, 0.805], [-1.5, 2.25, 0.84],
        [-1.4, 2.25, 0.0], [-1.3375, 2.38125, 0.0], [-1.4375, 2.38125, 0.0], [-1.5, 2.25, 0.0],
    ],
    // rim
    [
        [-1.4, 2.25, 0.0], [-1.3375, 2.38125, 0.0], [-1.4375, 2.38125, 0.0], [-1.5, 2.25, 0.0],
        [-1.4, 2.25, -0.784], [-1.3375, 2.38125, -0.749], [-1.4375, 2.38125, -0.805], [-1.5, 2.25, -0.84],
        [-0.784, 2.25, -1.4], [-0.749, 2.38125, -1.3375], [-0.805, 2.38125, -1.4375], [-0.84, 2.25, -1.5],
        [0.0, 2.25, -1.4], [0.0, 2.38125, -1.3375], [0.0, 2.38125, -1.4375], [0.0, 2.25, -1.5],
    ],
    // rim
    [
        [0.0, 2.25, -1.4], [0.0, 2.38125, -1.3375], [0.0, 2.38125, -1.4375], [0.0, 2.25, -1.5],
        [0.784, 2.25, -1.4], [0.749, 2.38125, -1.3375], [0.805, 2.38125, -1.4375], [0.84, 2.25, -1.5],
        [1.4, 2.25, -0.784], [1.3375, 2.38125, -0.749], [1.4375, 2.38125, -0.805], [1.5, 2.25, -0.84],
        [1.4, 2.25, 0.0], [1.3375, 2.38125, 0.0], [1.4375, 2.38125, 0.0], [1.5, 2.25, 0.0],
    ],
    // upper body
    [
        [1.5, 2.25, 0.0], [1.75, 1.725, 0.0], [2.0, 1.2, 0.0], [2.0, 0.75, 0.0],
        [1.5, 2.25, 0.84], [1.75, 1.725, 0.98], [2.0, 1.2, 1.12], [2.0, 0.75, 1.12],
        [0.84, 2.25, 1.5], [0.98, 1.725, 1.75], [1.12, 1.2, 2.0], [1.12, 0.75, 2.0],
        [0.0, 2.25, 1.5], [0.0, 1.725, 1.75], [0.0, 1.2, 2.0], [0.0, 0.75, 2.0],
    ],
    // upper body
    [
        [0.0, 2.25, 1.5], [0.0, 1.725, 1.75], [0.0, 1.2, 2.0], [0.0, 0.75, 2.0],
        [-0.84, 2.25, 1.5], [-0.98, 1.725, 1.75], [-1.12, 1.2, 2.0], [-1.12, 0.75, 2.0],
        [-1.5, 2.25, 0.84], [-1.75, 1.725, 0.98], [-2.0, 1.2, 1.12], [-2.0, 0.75, 1.12],
        [-1.5, 2.25, 0.0], [-1.75, 1.725, 0.0], [-2.0, 1.2, 0.0], [-2.0, 0.75, 0.0],
    ],
    // upper body
    [
        [-1.5, 2.25, 0.0], [-1.75, 1.725, 0.0], [-2.0, 1.2, 0.0], [-2.0, 0.75, 0.0],
        [-1.5, 2.25, -0.84], [-1.75, 1.725, -0.98], [-2.0, 1.2, -1.12], [-2.0, 0.75, -1.12],
        [-0.84, 2.25, -1.5], [-0.98, 1.725, -1.75], [-1.12, 1.2, -2.0], [-1.12, 0.75, -2.0],
        [0.0, 2.25, -1.5], [0.0, 1.725, -1.75], [0.0, 1.2, -2.0], [0.0, 0.75, -2.0],
    ],
    // upper body
    [
        [0.0, 2.25, -1.5], [0.0, 1.725, -1.75], [0.0, 1.2, -2.0], [0.0, 0.75, -2.0],
        [0.84, 2.25, -1.5], [0.98, 1.725, -1.75], [1.12, 1.2, -2.0], [1.12, 0.75, -2.0],
        [1.5, 2.25, -0.84], [1.75, 1.725, -0.98], [2.0, 1.2, -1.12], [2.0, 0.75, -1.12],
        [1.5, 2.25, 0.0], [1.75, 1.725, 0.0], [2.0, 1.2, 0.0], [2.0, 0.75, 0.0],
    ],
    // lower body
    [
        [2.0, 0.75, 0.0], [2.0, 0.3, 0.0], [1.5, 0.075, 0.0], [1.5, 0.0, 0.0],
        [2.0, 0.75, 1.12], [2.0, 0.3, 1.12], [1.5, 0.075, 0.84], [1.5, 0.0, 0.84],
        [1.12, 0.75, 2.0], [1.12, 0.3, 2.0], [0.84, 0.075, 1.5], [0.84, 0.0, 1.5],
        [0.0, 0.75, 2.0], [0.0, 0.3, 2.0], [0.0, 0.075, 1.5], [0.0, 0.0, 1.5],
    ],
    // lower body
    [
        [0.0, 0.75, 2.0], [0.0, 0.3, 2.0], [0.0, 0.075, 1.5], [0.0, 0.0, 1.5],
        [-1.12, 0.75, 2.0], [-1.12, 0.3, 2.0], [-0.84, 0.075, 1.5], [-0.84, 0.0, 1.5],
        [-2.0, 0.75, 1.12], [-2.0, 0.3, 1.12], [-1.5, 0.075, 0.84], [-1.5, 0.0, 0.84],
        [-2.0, 0.75, 0.0], [-2.0, 0.3, 0.0], [-1.5, 0.075, 0.0], [-1.5, 0.0, 0.0],
    ],
    // lower body
    [
        [-2.0, 0.75, 0.0], [-2.0, 0.3, 0.0], [-1.5, 0.075, 0.0], [-1.5, 0.0, 0.0],
        [-2.0, 0.75, -1.12], [-2.0, 0.3, -1.12], [-1.5, 0.075, -0.84], [-1.5, 0.0, -0.84],
        [-1.12, 0.75, -2.0], [-1.12, 0.3, -2.0], [-0.84, 0.075, -1.5], [-0.84, 0.0, -1.5],
        [0.0, 0.75, -2.0], [0.0, 0.3, -2.0], [0.0, 0.075, -1.5], [0.0, 0.0, -1.5],
    ],
    // lower body
    [
        [0.0, 0.75, -2.0], [0.0, 0.3, -2.0], [0.0, 0.075, -1.5], [0.0, 0.0, -1.5],
        [1.12, 0.75, -2.0], [1.12, 0.3, -2.0], [0.84, 0.075, -1.5], [0.84, 0.0, -1.5],
        [2.0, 0.75, -1.12], [2.0, 0.3, -1.12], [1.5, 0.075, -0.84], [1.5, 0.0, -0.84],
        [2.0, 0.75, 0.0], [2.0, 0.3, 0.0], [1.5, 0.075, 0.0], [1.5, 0.0, 0.0],
    ],
    // handle
    [
        [-1.6, 1.875, 0.0], [-2.3, 1.875, 0.0], [-2.7, 1.875, 0.0], [-2.7, 1.65, 0.0],
        [-1.6, 1.875, 0.3], [-2.3, 1.875, 0.3], [-2.7, 1.875, 0.3], [-2.7, 1.65, 0.3],
        [-1.5, 2.1, 0.3], [-2.5, 2.1, 0.3], [-3.0, 2.1, 0.3], [-3.0, 1.65, 0.3],
        [-1.5, 2.1, 0.0], [-2.5, 2.1, 0.0], [-3.0, 2.1, 0.0], [-3.0, 1.65, 0.0],
    ],
    // handle
    [
        [-1.5, 2.1, 0.0], [-2.5, 2.1, 0.0], [-3.0, 2.1, 0.0], [-3.0, 1.65, 0.0],
        [-1.5, 2.1, -0.3], [-2.5, 2.1, -0.3], [-3.0, 2.1, -0.3], [-3.0, 1.65, -0.3],
        [-1.6, 1.875, -0.3], [-2.3, 1.875, -0.3], [-2.7, 1.875, -0.3], [-2.7, 1.65, -0.3],
        [-1.6, 1.875, 0.0], [-2.3, 1.875, 0.0], [-2.7, 1.875, 0.0], [-2.7, 1.65, 0.0],
    ],
    // handle
    [
        [-2.7, 1.65, 0.0], [-2.7, 1.425, 0.0], [-2.5, 0.975, 0.0], [-2.0, 0.75, 0.0],
        [-2.7, 1.65, 0.3], [-2.7, 1.425, 0.3], [-2.5, 0.975, 0.3], [-2.0, 0.75, 0.3],
        [-3.0, 1.65, 0.3], [-3.0, 1.2, 0.3], [-2.65, 0.7875, 0.3], [-1.9, 0.45, 0.3],
        [-3.0, 1.65, 0.0], [-3.0, 1.2, 0.0], [-2.65, 0.7875, 0.0], [-1.9, 0.45, 0.0],
    ],
    // handle
    [
        [-3.0, 1.65, 0.0], [-3.0, 1.2, 0.0], [-2.65, 0.7875, 0.0], [-1.9, 0.45, 0.0],
        [-3.0, 1.65, -0.3], [-3.0, 1.2, -0.3], [-2.65, 0.7875, -0.3], [-1.9, 0.45, -0.3],
        [-2.7, 1.65, -0.3], [-2.7, 1.425, -0.3], [-2.5, 0.975, -0.3], [-2.0, 0.75, -0.3],
        [-2.7, 1.65, 0.0], [-2.7, 1.425, 0.0], [-2.5, 0.975, 0.0], [-2.0, 0.75, 0.0],
    ],
    // spout
    [
        [1.7, 1.275, 0.0], [2.6, 1.275, 0.0], [2.3, 1.95, 0.0], [2.7, 2.25, 0.0],
        [1.7, 1.275, 0.66], [2.6, 1.275, 0.66], [2.3, 1.95, 0.25], [2.7, 2.25, 0.25],
        [1.7, 0.45, 0.66], [3.1, 0.675, 0.66], [2.4, 1.875, 0.25], [3.3, 2.25, 0.25],
        [1.7, 0.45, 0.0], [3.1, 0.675, 0.0], [2.4, 1.875, 0.0], [3.3, 2.25, 0.0],
    ],
    // spout
    [
        [1.7, 0.45, 0.0], [3.1, 0.675, 0.0], [2.4, 1.875, 0.0], [3.3, 2.25, 0.0],
        [1.7, 0.45, -0.66], [3.1, 0.675, -0.66], [2.4, 1.875, -0.25], [3.3, 2.25, -0.25],
        [1.7, 1.275, -0.66], [2.6, 1.275, -0.66], [2.3, 1.95, -0.25], [2.7, 2.25, -0.25],
        [1.7, 1.275, 0.0], [2.6, 1.275, 0.0], [2.3, 1.95, 0.0], [2.7, 2.25, 0.0],
    ],
    // spout
    [
        [2.7, 2.25, 0.0], [2.8, 2.325, 0.0], [2.9, 2.325, 0.0], [2.8, 2.25, 0.0],
        [2.7, 2.25, 0.25], [2.8, 2.325, 0.25], [2.9, 2.325, 0.15], [2.8, 2.25, 0.15],
        [3.3, 2.25, 0.25], [3.525, 2.34375, 0.25], [3.45, 2.3625, 0.15], [3.2, 2.25, 0.15],
        [3.3, 2.25, 0.0], [3.525, 2.34375, 0.0], [3.45, 2.3625, 0.0], [3.2, 2.25, 0.0],
    ],
    // spout
    [
        [3.3, 2.25, 0.0], [3.525, 2.34375, 0.0], [3.45, 2.3625, 0.0], [3.2, 2.25, 0.0],
        [3.3, 2.25, -0.25], [3.525, 2.34375, -0.25], [3.45, 2.3625, -0.15], [3.2, 2.25, -0.15],
        [2.7, 2.25, -0.25], [2.8, 2.325, -0.25], [2.9, 2.325, -0.15], [2.8, 2.25, -0.15],
        [2.7, 2.25, 0.0], [2.8, 2.325, 0.0], [2.9, 2.325, 0.0], [2.8, 2.25, 0.0],
    ],
    // lid
    [
        [0.0, 3.0, 0.0], [0.8, 3.0, 0.0], [0.0, 2.7, 0.0], [0.2, 2.55, 0.0],
        [0.0, 3.0, 0.002], [0.8, 3.0, 0.45], [0.0, 2.7, 0.0], [0.2, 2.55, 0.112],
        [0.002, 3.0, 0.0], [0.45, 3.0, 0.8], [0.0, 2.7, 0.0], [0.112, 2.55, 0.2],
        [0.0, 3.0, 0.0], [0.0, 3.0, 0.8], [0.0, 2.7, 0.0], [0.0, 2.55, 0.2],
    ],
    // lid
    [
        [0.0, 3.0, 0.0], [0.0, 3.0, 0.8], [0.0, 2.7, 0.0], [0.0, 2.55, 0.2],
        [-0.002, 3.0, 0.0], [-0.45, 3.0, 0.8], [0.0, 2.7, 0.0], [-0.112, 2.55, 0.2],
        [0.0, 3.0, 0.002], [-0.8, 3.0, 0.45], [0.0, 2.7, 0.0], [-0.2, 2.55, 0.112],
        [0.0, 3.0, 0.0], [-0.8, 3.0, 0.0], [0.0, 2.7, 0.0], [-0.2, 2.55, 0.0],
    ],
    // lid
    [
        [0.0, 3.0, 0.0], [-0.8, 3.0, 0.0], [0.0, 2.7, 0.0], [-0.2, 2.55, 0.0],
        [0.0, 3.0, -0.002], [-0.8, 3.0, -0.45], [0.0, 2.7, 0.0], [-0.2, 2.55, -0.112],
        [-0.002, 3.0, 0.0], [-0.45, 3.0, -0.8], [0.0, 2.7, 0.0], [-0.112, 2.55, -0.2],
        [0.0, 3.0, 0.0], [0.0, 3.0, -0.8], [0.0, 2.7, 0.0], [0.0, 2.55, -0.2],
    ],
    // lid
    [
        [0.0, 3.0, 0.0], [0.0, 3.0, -0.8], [0.0, 2.7, 0.0], [0.0, 2.55, -0.2],
        [0.002, 3.0, 0.0], [0.45, 3.0, -0.8], [0.0, 2.7, 0.0], [0.112, 2.55, -0.2],
        [0.0, 3.0, -0.002], [0.8, 3.0, -0.45], [0.0, 2.7, 0.0], [0.2, 2.55, -0.112],
        [0.0, 3.0, 0.0], [0.8, 3.0, 0.0], [0.0, 2.7, 0.0], [0.2, 2.55, 0.0],
    ],
    // lid
    [
        [0.2, 2.55, 0.0], [0.4, 2.4, 0.0], [1.3, 2.4, 0.0], [1.3, 2.25, 0.0],
        [0.2, 2.55, 0.112], [0.4, 2.4, 0.224], [1.3, 2.4, 0.728], [1.3, 2.25, 0.728],
        [0.112, 2.55, 0.2], [0.224, 2.4, 0.4], [0.728, 2.4, 1.3], [0.728, 2.25, 1.3],
        [0.0, 2.55, 0.2], [0.0, 2.4, 0.4], [0.0, 2.4, 1.3], [0.0, 2.25, 1.3],
    ],
    // lid
    [
        [0.0, 2.55, 0.2], [0.0, 2.4, 0.4], [0.0, 2.4, 1.3], [0.0, 2.25, 1.3],
        [-0.112, 2.55, 0.2], [-0.224, 2.4, 0.4], [-0.728, 2.4, 1.3], [-0.728, 2.25, 1.3],
        [-0.2, 2.55, 0.112], [-0.4, 2.4, 0.224], [-1.3, 2.4, 0.728], [-1.3, 2.25, 0.728],
        [-0.2, 2.55, 0.0], [-0.4, 2.4, 0.0], [-1.3, 2.4, 0.0], [-1.3, 2.25, 0.0],
    ],
    // lid
    [
        [-0.2, 2.55, 0.0], [-0.4, 2.4, 0.0], [-1.3, 2.4, 0.0], [-1.3, 2.25, 0.0],
        [-0.2, 2.55, -0.112], [-0.4, 2.4, -0.224], [-1.3, 2.4, -0.728], [-1.3, 2.25, -0.728],
        [-0.112, 2.55, -0.2], [-0.224, 2.4, -0.4], [-0.728, 2.4, -1.3], [-0.728, 2.25, -1.3],
        [0.0, 2.55, -0.2], [0.0, 2.4, -0.4], [0.0, 2.4, -1.3], [0.0, 2.25, -1.3],
    ],
    // lid
    [
        [0.0, 2.55, -0.2], [0.0, 2.4, -0.4], [0.0, 2.4, -1.3], [0.0, 2.25, -1.3],
        [0.112, 2.55, -0.2], [0.224, 2.4, -0.4], [0.728, 2.4, -1.3], [0.728, 2.25, -1.3],
        [0.2, 2.55, -0.112], [0.4, 2.4, -0.224], [1.3, 2.4, -0.728], [1.3, 2.25, -0.728],
        [0.2, 2.55, 0.0], [0.4, 2.4, 0.0], [1.3, 2.4, 0.0], [1.3, 2.25, 0.0],
    ],
];

/// The teapot control nets as a patch spline
pub fn teapot() -> PatchSpline<DVec3, 32> {
    let mut spline = PatchSpline::new();
    for patch in TEAPOT_CONTROL_POINTS.iter() {
        spline.push(BezierPatch::new(patch.map(DVec3::from_array)));
    }
    spline
}
