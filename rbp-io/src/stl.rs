use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{info, warn};
use rbp_core::nalgebra::Point3;
use rbp_core::{Mesh, Triangle};

use crate::error::MeshError;

pub type Result<T> = std::result::Result<T, MeshError>;

fn point(x: f32, y: f32, z: f32) -> Point3<f64> {
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Read a binary or ASCII STL stream
pub fn read_stl<R: Read + Seek>(reader: &mut R) -> Result<Mesh> {
    let triangles = stl_io::create_stl_reader(reader)?
        .map(|t| t.map(|t| t.vertices.map(|v| point(v[0], v[1], v[2]))))
        .collect::<std::io::Result<Vec<Triangle>>>()?;

    if triangles.is_empty() {
        return Err(MeshError::Empty);
    }
    Ok(Mesh::from_triangles(triangles))
}

/// Load an STL file from disk
pub fn load_stl<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_stl(&mut BufReader::new(file)).map_err(|e| match e {
        MeshError::Parse(source) => MeshError::InvalidFile {
            path: path.to_path_buf(),
            source,
        },
        e => e,
    })
}

/// Load the chosen mesh, falling back to the built-in mesh when there is
/// no path or the file cannot be read
pub fn load_or_default(path: Option<&Path>) -> Mesh {
    let Some(path) = path else {
        info!("No mesh selected, using the built-in mesh");
        return Mesh::default_mesh();
    };

    match load_stl(path) {
        Ok(mesh) => {
            info!("Loaded {} triangles from {}", mesh.triangle_count(), path.display());
            mesh
        }
        Err(e) => {
            warn!("{e}; falling back to the built-in mesh");
            Mesh::default_mesh()
        }
    }
}
