use crate::errors::TrajError;
use crate::ipol::{find_bracket, interpolate_linear};
use crate::survey::{AZI_COLUMN, INC_COLUMN, MD_COLUMN};
use crate::trajectory::{DensifiedSurvey, X_COLUMN, Y_COLUMN, Z_COLUMN};
use crate::{find_column, parse_field};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const TOP_COLUMN: &str = "Top";

/// Formation tops of a well: named measured depths of geological layer
/// boundaries. Tops are kept in file order and need not be sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopsTable {
    pub(crate) names: Vec<String>,
    pub(crate) mds: Vec<f64>,
}

/// A formation top located along the well path: the interpolated hole
/// direction and position at the top's measured depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatedTop {
    pub name: String,
    pub md: f64,
    pub inc: f64,
    pub azi: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl std::fmt::Display for LocatedTop {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<20} MD[m]: {:>9.2}  Inc[deg]: {:>6.2}  Azi[deg]: {:>6.2}  x[m]: {:>9.2}  y[m]: {:>9.2}  z[m]: {:>9.2}",
            self.name, self.md, self.inc, self.azi, self.x, self.y, self.z
        )
    }
}

impl TopsTable {
    pub fn new() -> Self {
        Self {
            names: vec![],
            mds: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.mds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mds.is_empty()
    }

    pub fn add(&mut self, name: &str, md: f64) {
        self.names.push(name.to_string());
        self.mds.push(md);
    }

    /// Locate every top along the well path.
    ///
    /// Each top's measured depth is enclosed between two adjacent survey
    /// stations and the inclination, azimuth and position are linearly
    /// interpolated at that exact depth. The output is a fresh record per
    /// top, in the order of the tops table; the first top that cannot be
    /// enclosed aborts the whole computation.
    pub fn locate(&self, survey: &DensifiedSurvey) -> Result<Vec<LocatedTop>, TrajError> {
        let mut located = Vec::with_capacity(self.mds.len());
        for i in 0..self.mds.len() {
            let md = self.mds[i];
            let (iu, il) = find_bracket(md, &survey.mds)?;
            let md_u = survey.mds[iu];
            let md_l = survey.mds[il];
            located.push(LocatedTop {
                name: self.names[i].clone(),
                md,
                inc: interpolate_linear(md, md_u, md_l, survey.incs[iu], survey.incs[il]),
                azi: interpolate_linear(md, md_u, md_l, survey.azis[iu], survey.azis[il]),
                x: interpolate_linear(md, md_u, md_l, survey.xs[iu], survey.xs[il]),
                y: interpolate_linear(md, md_u, md_l, survey.ys[iu], survey.ys[il]),
                z: interpolate_linear(md, md_u, md_l, survey.zs[iu], survey.zs[il]),
            });
        }
        Ok(located)
    }
}

impl Default for TopsTable {
    fn default() -> Self {
        TopsTable::new()
    }
}

/// Read formation tops from a CSV file with a header row.
///
/// The column MD[m] is mandatory; the column Top holds the formation
/// name and may be absent, in which case the names stay empty.
pub fn read_tops_table(path_buf: PathBuf) -> Result<TopsTable, TrajError> {
    let res_rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path_buf);
    if let Err(e) = res_rdr {
        return Err(TrajError::IO(e.to_string()));
    }
    parse_tops_table(res_rdr.unwrap())
}

fn parse_tops_table<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<TopsTable, TrajError> {
    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(e) => return Err(TrajError::Format(e.to_string())),
    };
    let imd = find_column(&headers, MD_COLUMN)?;
    let iname = find_column(&headers, TOP_COLUMN).ok();

    let mut table = TopsTable::new();
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
        let name = match iname {
            Some(idx) => record.get(idx).unwrap_or(""),
            None => "",
        };
        table.add(name, md);
        row += 1;
    }
    Ok(table)
}

/// Write located tops to a CSV file: the tops table augmented with the
/// interpolated direction and position columns.
pub fn write_located_tops(path_buf: PathBuf, tops: &[LocatedTop]) -> Result<(), TrajError> {
    let res_wtr = csv::WriterBuilder::new().from_path(path_buf);
    if let Err(e) = res_wtr {
        return Err(TrajError::IO(e.to_string()));
    }
    let mut wtr = res_wtr.unwrap();
    let header = [
        TOP_COLUMN, MD_COLUMN, INC_COLUMN, AZI_COLUMN, X_COLUMN, Y_COLUMN, Z_COLUMN,
    ];
    if let Err(e) = wtr.write_record(&header) {
        return Err(TrajError::IO(e.to_string()));
    }
    for top in tops {
        let record = [
            top.name.clone(),
            top.md.to_string(),
            top.inc.to_string(),
            top.azi.to_string(),
            top.x.to_string(),
            top.y.to_string(),
            top.z.to_string(),
        ];
        if let Err(e) = wtr.write_record(&record) {
            return Err(TrajError::IO(e.to_string()));
        }
    }
    if let Err(e) = wtr.flush() {
        return Err(TrajError::IO(e.to_string()));
    }
    Ok(())
}
