use crate::errors::TrajError;
use crate::survey::{read_survey_table, SurveyTable};
use crate::tops::{read_tops_table, LocatedTop, TopsTable};
use crate::trajectory::{DensifiedSurvey, Origin};
use serde::{Deserialize, Serialize};

use async_std::task;
use std::path::{Path, PathBuf};

pub const DEV_PREFIX: &str = "dev_";
pub const TOPS_PREFIX: &str = "tops_";

/// The input data of one well: its deviation survey and its formation
/// tops, paired up by well name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellData {
    pub name: String,
    pub survey: SurveyTable,
    pub tops: TopsTable,
}

impl WellData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            survey: SurveyTable::new(),
            tops: TopsTable::new(),
        }
    }

    /// Integrate the deviation survey into a densified survey anchored
    /// at the wellhead origin.
    pub fn trajectory(&self, origin: Origin) -> DensifiedSurvey {
        DensifiedSurvey::from_survey(&self.survey, origin)
    }

    /// Compute the trajectory and locate all formation tops along it.
    pub fn locate_tops(&self, origin: Origin) -> Result<Vec<LocatedTop>, TrajError> {
        let dens = self.trajectory(origin);
        self.tops.locate(&dens)
    }
}

/// Well name encoded in a data file name: dev_<well>.csv or
/// tops_<well>.csv.
fn well_name(path: &Path, prefix: &str) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem.len() <= prefix.len() {
        return None;
    }
    Some(stem[prefix.len()..].to_string())
}

/// List the deviation survey and formation top files in a data
/// directory, recognized by their dev_ and tops_ file name prefixes.
pub fn get_list_data_files(dirname: &str) -> Result<(Vec<PathBuf>, Vec<PathBuf>), TrajError> {
    let dir = PathBuf::from(dirname);
    if !dir.is_dir() {
        return Err(TrajError::DirNotFound(dir));
    }
    let mut vdev = vec![];
    let mut vtops = vec![];
    for entry in std::fs::read_dir(dir)? {
        if let Err(e) = entry {
            return Err(TrajError::IO(e.to_string()));
        }
        let entry = entry?;
        let ep = entry.path();
        if ep.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        let file_name = file_name.to_str().unwrap_or("");
        if file_name.starts_with(DEV_PREFIX) {
            vdev.push(ep);
        } else if file_name.starts_with(TOPS_PREFIX) {
            vtops.push(ep);
        }
    }
    Ok((vdev, vtops))
}

/// Load all wells found in a data directory.
///
/// Every file is read in its own task so the tables of a directory are
/// parsed concurrently; the computation downstream stays synchronous.
/// A deviation survey without a tops file is a valid well with an empty
/// tops table; a tops file without a deviation survey is an error.
pub async fn load_wells(dirname: &str) -> Result<Vec<WellData>, TrajError> {
    let (vdev, vtops) = get_list_data_files(dirname)?;

    let mut thandles_dev = vec![];
    let mut thandles_tops = vec![];

    // Spawn a task per file; each handle resolves to the parsed table
    // (or the read error) so failures surface on the receiving end.
    for pb in vdev {
        let name = well_name(&pb, DEV_PREFIX);
        let tpb = pb.clone();
        thandles_dev.push((name, task::spawn(async move { read_survey_table(tpb) })));
    }

    for pb in vtops {
        let name = well_name(&pb, TOPS_PREFIX);
        let tpb = pb.clone();
        thandles_tops.push((name, task::spawn(async move { read_tops_table(tpb) })));
    }

    let mut wells: Vec<WellData> = vec![];
    for (name, handle) in thandles_dev {
        let name = match name {
            Some(n) => n,
            None => {
                return Err(TrajError::Format(
                    "Deviation file name must be of the form dev_<well>.csv".to_owned(),
                ))
            }
        };
        let mut well = WellData::new(&name);
        well.survey = handle.await?;
        wells.push(well);
    }

    for (name, handle) in thandles_tops {
        let name = match name {
            Some(n) => n,
            None => {
                return Err(TrajError::Format(
                    "Tops file name must be of the form tops_<well>.csv".to_owned(),
                ))
            }
        };
        let tops = handle.await?;
        let mut matched = false;
        for well in wells.iter_mut() {
            if well.name == name {
                well.tops = tops.clone();
                matched = true;
                break;
            }
        }
        if !matched {
            return Err(TrajError::Logic(format!(
                "Tops file for well [{}] has no matching deviation survey",
                name
            )));
        }
    }

    if wells.is_empty() {
        return Err(TrajError::IO("No well data was loaded.".to_owned()));
    }

    Ok(wells)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn well_name_from_path() {
        assert_eq!(
            well_name(Path::new("/data/dev_volve_f11.csv"), DEV_PREFIX),
            Some("volve_f11".to_string())
        );
        assert_eq!(
            well_name(Path::new("tops_a1.csv"), TOPS_PREFIX),
            Some("a1".to_string())
        );
        assert_eq!(well_name(Path::new("dev_.csv"), DEV_PREFIX), None);
    }

    #[test]
    fn locate_tops_through_well() {
        let mut well = WellData::new("a1");
        assert!(well.survey.add_station(0.0, 0.0, 0.0, 0.0).is_ok());
        assert!(well.survey.add_station(100.0, 0.0, 0.0, 0.0).is_ok());
        well.tops.add("Sandstone", 60.0);
        let located = well.locate_tops(Origin::default()).unwrap();
        assert_eq!(located.len(), 1);
        assert!((located[0].z - 60.0).abs() < 1e-12);
        assert_eq!(located[0].x, 0.0);
        assert_eq!(located[0].y, 0.0);
    }

    #[test]
    fn missing_data_dir() {
        assert!(get_list_data_files("/definitely/not/a/dir").is_err());
    }
}
