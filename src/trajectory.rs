use crate::errors::TrajError;
use crate::survey::{SurveyTable, AZI_COLUMN, INC_COLUMN, MD_COLUMN};
use crate::{find_column, parse_field};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const X_COLUMN: &str = "x[m]";
pub const Y_COLUMN: &str = "y[m]";
pub const Z_COLUMN: &str = "z[m]";

/// Surface location of the wellhead: east, north and vertical depth
/// coordinates in meters of the first survey station.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Origin {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Default for Origin {
    fn default() -> Self {
        Origin::new(0.0, 0.0, 0.0)
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A survey whose stations carry their cumulative position: x (east),
/// y (north) and z (vertical depth, positive down) next to the measured
/// depth, inclination and azimuth. This is the table formation tops are
/// located against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensifiedSurvey {
    pub(crate) mds: Vec<f64>,
    pub(crate) incs: Vec<f64>,
    pub(crate) azis: Vec<f64>,
    pub(crate) xs: Vec<f64>,
    pub(crate) ys: Vec<f64>,
    pub(crate) zs: Vec<f64>,
}

impl DensifiedSurvey {
    pub fn new() -> Self {
        Self {
            mds: vec![],
            incs: vec![],
            azis: vec![],
            xs: vec![],
            ys: vec![],
            zs: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.mds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mds.is_empty()
    }

    /// Append a station. The measured depth must exceed the previous
    /// station's measured depth.
    pub fn add_station(
        &mut self,
        md: f64,
        inc: f64,
        azi: f64,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), TrajError> {
        if let Some(prev) = self.mds.last() {
            if md <= *prev {
                return Err(TrajError::MdNotIncreasing(*prev, md));
            }
        }
        self.mds.push(md);
        self.incs.push(inc);
        self.azis.push(azi);
        self.xs.push(x);
        self.ys.push(y);
        self.zs.push(z);
        Ok(())
    }

    /// Integrate a deviation survey into cumulative positions.
    ///
    /// The first station sits at the origin; every further station adds
    /// the minimum curvature offset of the interval leading up to it.
    pub fn from_survey(survey: &SurveyTable, origin: Origin) -> Self {
        let mut dens = DensifiedSurvey::new();
        if survey.is_empty() {
            return dens;
        }
        let offsets = survey.to_offsets();
        let mut x = origin.x;
        let mut y = origin.y;
        let mut z = origin.z;
        dens.mds.push(survey.mds[0]);
        dens.incs.push(survey.incs[0]);
        dens.azis.push(survey.azis[0]);
        dens.xs.push(x);
        dens.ys.push(y);
        dens.zs.push(z);
        for i in 0..offsets.len() {
            x += offsets.east[i];
            y += offsets.north[i];
            z += offsets.vert[i];
            dens.mds.push(survey.mds[i + 1]);
            dens.incs.push(survey.incs[i + 1]);
            dens.azis.push(survey.azis[i + 1]);
            dens.xs.push(x);
            dens.ys.push(y);
            dens.zs.push(z);
        }
        dens
    }
}

impl Default for DensifiedSurvey {
    fn default() -> Self {
        DensifiedSurvey::new()
    }
}

impl std::fmt::Display for DensifiedSurvey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "{:>9}  {:>8}  {:>8}  {:>9}  {:>9}  {:>9}",
            MD_COLUMN, INC_COLUMN, AZI_COLUMN, X_COLUMN, Y_COLUMN, Z_COLUMN
        )?;
        for i in 0..self.mds.len() {
            writeln!(
                f,
                "{:9.2}  {:8.2}  {:8.2}  {:9.2}  {:9.2}  {:9.2}",
                self.mds[i], self.incs[i], self.azis[i], self.xs[i], self.ys[i], self.zs[i]
            )?;
        }
        Ok(())
    }
}

/// Read an already densified survey from a CSV file with a header row.
/// Required columns: MD[m], Inc[deg], Azi[deg], x[m], y[m], z[m].
pub fn read_densified_survey(path_buf: PathBuf) -> Result<DensifiedSurvey, TrajError> {
    let res_rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path_buf);
    if let Err(e) = res_rdr {
        return Err(TrajError::IO(e.to_string()));
    }
    parse_densified_survey(res_rdr.unwrap())
}

fn parse_densified_survey<R: std::io::Read>(
    mut rdr: csv::Reader<R>,
) -> Result<DensifiedSurvey, TrajError> {
    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(e) => return Err(TrajError::Format(e.to_string())),
    };
    let imd = find_column(&headers, MD_COLUMN)?;
    let iinc = find_column(&headers, INC_COLUMN)?;
    let iazi = find_column(&headers, AZI_COLUMN)?;
    let ix = find_column(&headers, X_COLUMN)?;
    let iy = find_column(&headers, Y_COLUMN)?;
    let iz = find_column(&headers, Z_COLUMN)?;

    let mut dens = DensifiedSurvey::new();
    let mut row = 0;
    for record in rdr.records() {
        if let Err(e) = record {
            return Err(TrajError::Format(e.to_string()));
        }
        let record = record.unwrap();
        if record.len() == 0 {
            continue;
        }
        let md = parse_field(&record, imd, MD_COLUMN, row)?;
        let inc = parse_field(&record, iinc, INC_COLUMN, row)?;
        let azi = parse_field(&record, iazi, AZI_COLUMN, row)?;
        let x = parse_field(&record, ix, X_COLUMN, row)?;
        let y = parse_field(&record, iy, Y_COLUMN, row)?;
        let z = parse_field(&record, iz, Z_COLUMN, row)?;
        dens.add_station(md, inc, azi, x, y, z)?;
        row += 1;
    }
    Ok(dens)
}
