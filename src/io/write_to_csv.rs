use std::{fs, path::Path};

use csv::Writer;
use ndarray::ArrayView1;
use serde::Serialize;

use crate::{error::SolverError, solver::Grid, state::State};

#[derive(Serialize)]
struct CellData {
    x: f64,
    h: f64,
    hu: f64,
    u: f64,
}

/// Writes one row per interior cell, located at the cell centre.
pub fn write_to_csv(
    solutions: ArrayView1<State>,
    grid: &Grid,
    filename: impl AsRef<Path>,
) -> Result<(), SolverError> {
    if let Some(parent) = filename.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = Writer::from_path(filename)?;
    for x in 1..=grid.ncells {
        let q = solutions[x];
        let data = CellData {
            x: grid.cell_centre(x),
            h: q.h,
            hu: q.hu,
            u: q.velocity(),
        };
        writer.serialize(data)?;
    }
    writer.flush()?;
    Ok(())
}
