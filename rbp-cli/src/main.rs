mod render;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use rbp_core::camera::DEFAULT_AXIS_LENGTH;
use rbp_core::nalgebra::{Matrix3, Matrix4};
use rbp_core::{AxisAction, IntrinsicField, Projection, ProjectionError, Session};
use rbp_io::Scene;

/// Rigid-body motion and perspective projection of a triangle mesh
#[derive(Parser, Debug)]
#[command(name = "rbp", version)]
struct Args {
    /// STL mesh to load (falls back to the built-in mesh)
    #[arg(short, long)]
    mesh: Option<PathBuf>,

    /// JSON scene file with intrinsics and scripted steps
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Reset pose and intrinsics after the scene, before command-line edits
    #[arg(long)]
    reset: bool,

    /// Intrinsic edit, e.g. focal-length=25 (repeatable)
    #[arg(short, long = "intrinsic", value_parser = parse_assignment::<IntrinsicField>)]
    intrinsics: Vec<(IntrinsicField, String)>,

    /// World-frame edit, e.g. z-rotate=30 (repeatable)
    #[arg(short, long, value_parser = parse_assignment::<AxisAction>)]
    world: Vec<(AxisAction, String)>,

    /// Camera-frame edit, e.g. x-move=-5 (repeatable)
    #[arg(short, long, value_parser = parse_assignment::<AxisAction>)]
    camera: Vec<(AxisAction, String)>,

    /// Render the 2D view to this PNG file
    #[arg(long)]
    png: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn parse_assignment<K>(s: &str) -> std::result::Result<(K, String), String>
where
    K: FromStr,
    K::Err: std::fmt::Display,
{
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let key = key.parse::<K>().map_err(|e| e.to_string())?;
    Ok((key, value.to_string()))
}

#[derive(Serialize)]
struct OutputAxes {
    origin: [f64; 3],
    x: [f64; 3],
    y: [f64; 3],
    z: [f64; 3],
}

#[derive(Serialize)]
struct Output {
    triangles: usize,
    image_size: [u32; 2],
    pose: [[f64; 4]; 4],
    calibration: [[f64; 3]; 3],
    camera_axes: OutputAxes,
    degenerate: Vec<usize>,
    pixels: Vec<[f64; 2]>,
}

fn rows4(m: &Matrix4<f64>) -> [[f64; 4]; 4] {
    std::array::from_fn(|r| std::array::from_fn(|c| m[(r, c)]))
}

fn rows3(m: &Matrix3<f64>) -> [[f64; 3]; 3] {
    std::array::from_fn(|r| std::array::from_fn(|c| m[(r, c)]))
}

/// Project, downgrading a degenerate projection to a warning
fn project(session: &Session) -> Result<(Projection, Vec<usize>)> {
    match session.project() {
        Ok(projection) => Ok((projection, Vec::new())),
        Err(ProjectionError::Degenerate { indices, fallback }) => {
            warn!(
                "{} point(s) lie on the camera plane; their pixel coordinates are not meaningful",
                indices.len()
            );
            Ok((fallback, indices))
        }
        Err(e) => Err(e).context("projection failed"),
    }
}

fn apply_edits(session: &mut Session, args: &Args) {
    let intrinsics: Vec<_> = args.intrinsics.iter().map(|(f, t)| (*f, t.as_str())).collect();
    let report = session.update_intrinsics_text(&intrinsics);
    for e in &report.errors {
        warn!("Intrinsic edit rejected: {e}");
    }

    let world: Vec<_> = args.world.iter().map(|(a, t)| (*a, t.as_str())).collect();
    let report = session.update_world_text(&world);
    for e in &report.errors {
        warn!("World edit rejected: {e}");
    }

    let camera: Vec<_> = args.camera.iter().map(|(a, t)| (*a, t.as_str())).collect();
    let report = session.update_camera_text(&camera);
    for e in &report.errors {
        warn!("Camera edit rejected: {e}");
    }
}

fn print_summary(session: &Session, projection: &Projection, degenerate: &[usize]) {
    let pose = session.camera().pose();
    let (w, h) = session.intrinsics().image_size();

    println!("mesh: {} triangles", session.mesh().triangle_count());
    println!("pose:");
    for row in rows4(pose) {
        println!("  {:>10.4} {:>10.4} {:>10.4} {:>10.4}", row[0], row[1], row[2], row[3]);
    }
    println!("K:");
    for row in rows3(&session.calibration_matrix()) {
        println!("  {:>10.4} {:>10.4} {:>10.4}", row[0], row[1], row[2]);
    }
    println!(
        "projected {} points, {} inside {}x{}",
        projection.len(),
        projection.count_in_bounds(f64::from(w), f64::from(h)),
        w,
        h
    );
    if !degenerate.is_empty() {
        println!("degenerate points: {degenerate:?}");
    }
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    let scene = args
        .scene
        .as_ref()
        .map(Scene::from_path)
        .transpose()
        .context("failed to load scene")?
        .unwrap_or_default();

    let mesh_path = args.mesh.as_deref().or(scene.mesh.as_deref());
    let mesh = rbp_io::load_or_default(mesh_path);
    let mut session = Session::new(Arc::new(mesh));

    for e in scene.apply(&mut session) {
        warn!("Scene step rejected: {e}");
    }
    if args.reset {
        info!("Resetting pose and intrinsics");
        session.reset();
    }
    apply_edits(&mut session, &args);

    let (projection, degenerate) = project(&session)?;

    if let Some(path) = &args.png {
        let (w, h) = session.intrinsics().image_size();
        let img = render::render_wireframe(&projection, w, h, &degenerate);
        render::write_png(&img, path)?;
        info!("Wrote {}", path.display());
    }

    if args.json {
        let axes = session.camera().axes(DEFAULT_AXIS_LENGTH);
        let (w, h) = session.intrinsics().image_size();
        let output = Output {
            triangles: session.mesh().triangle_count(),
            image_size: [w, h],
            pose: rows4(session.camera().pose()),
            calibration: rows3(&session.calibration_matrix()),
            camera_axes: OutputAxes {
                origin: axes.origin.coords.into(),
                x: axes.x.into(),
                y: axes.y.into(),
                z: axes.z.into(),
            },
            degenerate,
            pixels: projection.iter().map(|(u, v)| [u, v]).collect(),
        };
        let json = if args.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        println!("{json}");
    } else {
        print_summary(&session, &projection, &degenerate);
    }

    Ok(())
}
