use crate::errors::TrajError;
use crate::{find_column, parse_field};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const MD_COLUMN: &str = "MD[m]";
pub const INC_COLUMN: &str = "Inc[deg]";
pub const AZI_COLUMN: &str = "Azi[deg]";
pub const DOGLEG_COLUMN: &str = "Dogleg [deg/30m]";

/// Deviation survey of a well: one row per station along the wellbore.
///
/// Measured depth is strictly increasing; inclination and azimuth are in
/// degrees, dogleg severity in degrees per 30 m interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyTable {
    pub(crate) mds: Vec<f64>,
    pub(crate) incs: Vec<f64>,
    pub(crate) azis: Vec<f64>,
    pub(crate) doglegs: Vec<f64>,
}

/// Cartesian offsets per survey interval, in meters.
///
/// For a survey with N stations each vector holds N - 1 values: east,
/// north and vertical displacement between consecutive stations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalOffsets {
    pub east: Vec<f64>,
    pub north: Vec<f64>,
    pub vert: Vec<f64>,
}

impl IntervalOffsets {
    pub fn new() -> Self {
        Self {
            east: vec![],
            north: vec![],
            vert: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.east.len()
    }

    pub fn is_empty(&self) -> bool {
        self.east.is_empty()
    }
}

impl Default for IntervalOffsets {
    fn default() -> Self {
        IntervalOffsets::new()
    }
}

/// Minimum curvature ratio factor for a dogleg angle in radians.
/// The formula is indeterminate (0/0) at zero curvature; its limit there
/// is exactly 1, which turns a zero-dogleg interval into a straight line.
pub fn ratio_factor(dogleg_rad: f64) -> f64 {
    if dogleg_rad == 0.0 {
        return 1.0;
    }
    (2.0 / dogleg_rad) * (dogleg_rad / 2.0).tan()
}

impl SurveyTable {
    pub fn new() -> Self {
        Self {
            mds: vec![],
            incs: vec![],
            azis: vec![],
            doglegs: vec![],
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
        dogleg: f64,
    ) -> Result<(), TrajError> {
        if let Some(prev) = self.mds.last() {
            if md <= *prev {
                return Err(TrajError::MdNotIncreasing(*prev, md));
            }
        }
        self.mds.push(md);
        self.incs.push(inc);
        self.azis.push(azi);
        self.doglegs.push(dogleg);
        Ok(())
    }

    /// Compute the Cartesian offset of every survey interval with the
    /// minimum curvature method.
    ///
    /// Each interval is treated as a circular arc between its upper and
    /// lower station; the ratio factor corrects the straight-line chord
    /// for that curvature. The dogleg severity of the lower station is
    /// the one attributed to the interval. A survey with fewer than two
    /// stations has no intervals and yields empty offsets.
    pub fn to_offsets(&self) -> IntervalOffsets {
        let mut offsets = IntervalOffsets::new();
        let n = self.mds.len();
        if n < 2 {
            return offsets;
        }
        for i in 0..n - 1 {
            let dmd = self.mds[i + 1] - self.mds[i];
            let rf = ratio_factor(self.doglegs[i + 1].to_radians());
            let inc_u = self.incs[i].to_radians();
            let inc_l = self.incs[i + 1].to_radians();
            let azi_u = self.azis[i].to_radians();
            let azi_l = self.azis[i + 1].to_radians();
            let half = dmd / 2.0;
            offsets
                .east
                .push(half * (inc_u.sin() * azi_u.sin() + inc_l.sin() * azi_l.sin()) * rf);
            offsets
                .north
                .push(half * (inc_u.sin() * azi_u.cos() + inc_l.sin() * azi_l.cos()) * rf);
            offsets.vert.push(half * (inc_u.cos() + inc_l.cos()) * rf);
        }
        offsets
    }
}

impl Default for SurveyTable {
    fn default() -> Self {
        SurveyTable::new()
    }
}

/// Read a deviation survey from a CSV file with a header row.
///
/// The columns MD[m], Inc[deg], Azi[deg] and Dogleg [deg/30m] are located
/// by name; any other column (such as the index column 'Unnamed: 0' left
/// behind by spreadsheet exports) is ignored.
pub fn read_survey_table(path_buf: PathBuf) -> Result<SurveyTable, TrajError> {
    let res_rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path_buf);
    if let Err(e) = res_rdr {
        return Err(TrajError::IO(e.to_string()));
    }
    parse_survey_table(res_rdr.unwrap())
}

fn parse_survey_table<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<SurveyTable, TrajError> {
    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(e) => return Err(TrajError::Format(e.to_string())),
    };
    let imd = find_column(&headers, MD_COLUMN)?;
    let iinc = find_column(&headers, INC_COLUMN)?;
    let iazi = find_column(&headers, AZI_COLUMN)?;
    let idogleg = find_column(&headers, DOGLEG_COLUMN)?;

    let mut table = SurveyTable::new();
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
        let dogleg = parse_field(&record, idogleg, DOGLEG_COLUMN, row)?;
        table.add_station(md, inc, azi, dogleg)?;
        row += 1;
    }
    Ok(table)
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_survey() -> SurveyTable {
        let mut table = SurveyTable::new();
        assert!(table.add_station(0.0, 0.0, 0.0, 0.0).is_ok());
        assert!(table.add_station(100.0, 30.0, 90.0, 0.0).is_ok());
        table
    }

    #[test]
    fn ratio_factor_zero_dogleg() {
        assert_eq!(ratio_factor(0.0), 1.0);
    }

    #[test]
    fn ratio_factor_small_angle() {
        // rf -> 1 as the dogleg angle vanishes, from above
        let rf = ratio_factor(0.01_f64.to_radians());
        assert!(rf > 1.0);
        assert!((rf - 1.0).abs() < 1e-6);
    }

    #[test]
    fn md_must_increase() {
        let mut table = build_survey();
        assert!(table.add_station(100.0, 10.0, 0.0, 0.0).is_err());
        assert!(table.add_station(99.0, 10.0, 0.0, 0.0).is_err());
        assert!(table.add_station(100.5, 10.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn single_station_has_no_intervals() {
        let mut table = SurveyTable::new();
        assert!(table.add_station(0.0, 0.0, 0.0, 0.0).is_ok());
        let offsets = table.to_offsets();
        assert!(offsets.is_empty());
        assert!(SurveyTable::new().to_offsets().is_empty());
    }

    #[test]
    fn build_and_slant() {
        // kick-off from vertical to 30 deg inclination due east over 100 m
        let table = build_survey();
        let offsets = table.to_offsets();
        assert_eq!(offsets.len(), 1);
        assert!((offsets.east[0] - 25.0).abs() < 1e-12);
        assert!(offsets.north[0].abs() < 1e-12);
        assert!((offsets.vert[0] - 50.0 * (1.0 + 3.0_f64.sqrt() / 2.0)).abs() < 1e-12);
        assert!((offsets.vert[0] - 93.30127).abs() < 1e-4);
    }

    #[test]
    fn straight_slanted_interval_is_plain_trigonometry() {
        // equal angles at both stations, zero dogleg: the arc is a line
        let mut table = SurveyTable::new();
        assert!(table.add_station(500.0, 40.0, 70.0, 0.0).is_ok());
        assert!(table.add_station(530.0, 40.0, 70.0, 0.0).is_ok());
        let offsets = table.to_offsets();
        let inc = 40.0_f64.to_radians();
        let azi = 70.0_f64.to_radians();
        assert!((offsets.east[0] - 30.0 * inc.sin() * azi.sin()).abs() < 1e-12);
        assert!((offsets.north[0] - 30.0 * inc.sin() * azi.cos()).abs() < 1e-12);
        assert!((offsets.vert[0] - 30.0 * inc.cos()).abs() < 1e-12);
    }

    fn survey_reader(csv_text: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_text.as_bytes())
    }

    #[test]
    fn parse_survey_ignores_index_column() {
        let csv_text = "Unnamed: 0,MD[m],Inc[deg],Azi[deg],Dogleg [deg/30m]\n\
                        0,0.0,0.0,0.0,0.0\n\
                        1,100.0,30.0,90.0,0.0\n";
        let table = parse_survey_table(survey_reader(csv_text)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.mds[1], 100.0);
        assert_eq!(table.incs[1], 30.0);
        assert_eq!(table.azis[1], 90.0);
        assert_eq!(table.doglegs[1], 0.0);
    }

    #[test]
    fn parse_survey_missing_column() {
        let csv_text = "MD[m],Inc[deg],Azi[deg]\n0.0,0.0,0.0\n";
        let res = parse_survey_table(survey_reader(csv_text));
        assert!(matches!(res, Err(TrajError::ColumnNotFound(_))));
    }

    #[test]
    fn parse_survey_non_numeric_cell() {
        let csv_text = "MD[m],Inc[deg],Azi[deg],Dogleg [deg/30m]\n0.0,abc,0.0,0.0\n";
        let res = parse_survey_table(survey_reader(csv_text));
        assert!(matches!(res, Err(TrajError::Value(_))));
    }

    #[test]
    fn parse_survey_ragged_row() {
        let csv_text = "MD[m],Inc[deg],Azi[deg],Dogleg [deg/30m]\n\
                        0.0,0.0,0.0,0.0\n\
                        100.0,30.0\n";
        let res = parse_survey_table(survey_reader(csv_text));
        assert!(matches!(res, Err(TrajError::Format(_))));
    }

    #[test]
    fn parse_survey_non_increasing_md() {
        let csv_text = "MD[m],Inc[deg],Azi[deg],Dogleg [deg/30m]\n\
                        100.0,0.0,0.0,0.0\n\
                        100.0,1.0,0.0,0.0\n";
        let res = parse_survey_table(survey_reader(csv_text));
        assert!(matches!(res, Err(TrajError::MdNotIncreasing(_, _))));
    }

    #[test]
    fn read_survey_table_from_file() {
        let csv_text = "Unnamed: 0,MD[m],Inc[deg],Azi[deg],Dogleg [deg/30m]\n\
                        0,0.0,0.0,0.0,0.0\n\
                        1,100.0,30.0,90.0,0.0\n";
        let path = std::env::temp_dir().join("welltraj_dev_read_test.csv");
        std::fs::write(&path, csv_text).unwrap();
        let res = read_survey_table(path.clone());
        std::fs::remove_file(&path).ok();
        let table = res.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.incs[1], 30.0);
        assert!(read_survey_table(std::env::temp_dir().join("welltraj_no_such_file.csv")).is_err());
    }

    #[test]
    fn vertical_well_has_no_lateral_offset() {
        let mut table = SurveyTable::new();
        assert!(table.add_station(0.0, 0.0, 10.0, 0.0).is_ok());
        assert!(table.add_station(150.0, 0.0, 200.0, 1.5).is_ok());
        assert!(table.add_station(300.0, 0.0, 355.0, 0.5).is_ok());
        let offsets = table.to_offsets();
        assert_eq!(offsets.len(), 2);
        for i in 0..2 {
            assert!(offsets.east[i].abs() < 1e-12);
            assert!(offsets.north[i].abs() < 1e-12);
        }
    }
}
