mod errors;
pub use errors::*;
mod ipol;
mod survey;
pub use survey::*;
mod tops;
pub use tops::*;
mod trajectory;
pub use trajectory::*;
mod well;
pub use well::*;

use console::Term;

/// Index of a named column in a CSV header row. Header cells are
/// trimmed before comparison.
pub(crate) fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, TrajError> {
    for (i, h) in headers.iter().enumerate() {
        if h.trim() == name {
            return Ok(i);
        }
    }
    Err(TrajError::ColumnNotFound(name.to_owned()))
}

/// Parse one CSV cell as f64; the column name and row index make the
/// error message point at the offending cell.
pub(crate) fn parse_field(
    record: &csv::StringRecord,
    idx: usize,
    column: &str,
    row: usize,
) -> Result<f64, TrajError> {
    let s = match record.get(idx) {
        Some(s) => s,
        None => {
            return Err(TrajError::Format(format!(
                "Row [{}] has no value for column [{}]",
                row, column
            )))
        }
    };
    match s.trim().parse::<f64>() {
        Ok(v) => Ok(v),
        Err(e) => Err(TrajError::Value(format!(
            "Column [{}], row [{}]: {}",
            column, row, e
        ))),
    }
}

pub fn question(term: &Term, msg: &str) -> Result<String, TrajError> {
    if let Err(e) = term.write_str(&format!("{}: ", msg)) {
        return Err(TrajError::Terminal(e.to_string()));
    }
    let res_ans = term.read_line();
    if let Err(e) = res_ans {
        return Err(TrajError::Terminal(e.to_string()));
    }
    let ans_str = res_ans.unwrap();
    Ok(ans_str)
}

pub fn question_parse_res<T>(term: &Term, msg: &str) -> Result<T, TrajError>
where
    T: std::str::FromStr + std::fmt::Display,
    <T as std::str::FromStr>::Err: std::string::ToString + std::fmt::Debug,
{
    let res_ans = question(term, msg);
    if let Err(e) = res_ans {
        return Err(e);
    }
    let ans_str = res_ans.unwrap();
    let res_f = ans_str.trim().parse::<T>();
    if let Err(e) = res_f {
        return Err(TrajError::Terminal(e.to_string()));
    }
    Ok(res_f.unwrap())
}
