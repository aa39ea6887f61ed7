use std::sync::Arc;

use approx::assert_relative_eq;
use nalgebra::Point3;
use rbp_core::transform::translation;
use rbp_core::{
    AxisAction, IntrinsicField, IntrinsicParams, Mesh, ProjectionError, Session, project,
};

fn cube(size: f64, center: Point3<f64>) -> Mesh {
    let h = size / 2.0;
    let c = |x: f64, y: f64, z: f64| {
        Point3::new(center.x + x * h, center.y + y * h, center.z + z * h)
    };
    // the eight corners and the centre, grouped three at a time
    Mesh::from_triangles(vec![
        [c(-1.0, -1.0, -1.0), c(1.0, -1.0, -1.0), c(1.0, 1.0, -1.0)],
        [c(-1.0, 1.0, -1.0), c(-1.0, -1.0, 1.0), c(1.0, -1.0, 1.0)],
        [c(1.0, 1.0, 1.0), c(-1.0, 1.0, 1.0), c(0.0, 0.0, 0.0)],
    ])
}

#[test]
fn test_world_moves_shift_image() {
    let mut session = Session::new(Arc::new(cube(10.0, Point3::new(0.0, 0.0, 35.0))));
    let before = session.project().unwrap();

    // moving the camera +X in the world shifts the scene left in the image
    session.apply_world(AxisAction::XMove, 5.0);
    let after = session.project().unwrap();

    for i in 0..before.len() {
        assert!(after.point(i).0 < before.point(i).0);
        assert_relative_eq!(after.point(i).1, before.point(i).1, epsilon = 1e-9);
    }
}

#[test]
fn test_focal_length_scales_about_principal_point() {
    let mut session = Session::new(Arc::new(cube(10.0, Point3::new(0.0, 0.0, 35.0))));
    let before = session.project().unwrap();

    session.set_intrinsic(IntrinsicField::FocalLength, 20.0).unwrap();
    let after = session.project().unwrap();

    let (ox, oy) = session.intrinsics().principal_point();
    for i in 0..before.len() {
        let (u0, v0) = before.point(i);
        let (u1, v1) = after.point(i);
        assert_relative_eq!(u1 - ox, 2.0 * (u0 - ox), epsilon = 1e-6);
        assert_relative_eq!(v1 - oy, 2.0 * (v0 - oy), epsilon = 1e-6);
    }
}

#[test]
fn test_point_on_camera_plane_is_degenerate() {
    // camera at z = -5 looking along +Z; the first vertex shares its plane
    let mesh = Mesh::from_triangles(vec![[
        Point3::new(1.0, 1.0, -5.0),
        Point3::new(5.0, 0.0, 0.0),
        Point3::new(0.0, 5.0, 0.0),
    ]]);
    let pose = translation(0.0, 0.0, -5.0);
    let k = IntrinsicParams::default().calibration_matrix();

    match project(&pose, &k, mesh.points()) {
        Err(ProjectionError::Degenerate { indices, fallback }) => {
            assert_eq!(indices, vec![0]);
            assert_eq!(fallback.len(), 3);
            assert!(fallback.iter().all(|(u, v)| u.is_finite() && v.is_finite()));
            assert_eq!(fallback.triangles().count(), 1);
        }
        other => panic!("expected degenerate projection, got {other:?}"),
    }
}

#[test]
fn test_reset_restores_projection() {
    let mut session = Session::new(Arc::new(Mesh::default_mesh()));
    let initial = session.project().unwrap();

    session.apply_camera(AxisAction::YRotate, 12.0);
    session.apply_world(AxisAction::ZMove, -3.0);
    session.set_intrinsic(IntrinsicField::Skew, 100.0).unwrap();
    assert_ne!(session.project().unwrap(), initial);

    session.reset();
    assert_eq!(session.project().unwrap(), initial);
}

#[test]
fn test_camera_edits_from_default_view() {
    let mut session = Session::new(Arc::new(Mesh::default_mesh()));
    let initial = session.project().unwrap();

    session.apply_camera(AxisAction::XMove, 0.0);
    session.apply_camera(AxisAction::ZRotate, 0.0);
    assert_eq!(session.project().unwrap(), initial);

    // panning the camera right moves the mesh left in the image
    session.apply_camera(AxisAction::XMove, 5.0);
    let moved = session.project().unwrap();
    for i in 0..initial.len() {
        assert!(moved.point(i).0 < initial.point(i).0);
        assert_relative_eq!(moved.point(i).1, initial.point(i).1, epsilon = 1e-9);
    }
}
