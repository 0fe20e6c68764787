use async_std::task;
use clap::{App, Arg, ArgMatches};
use console::Term;
use log::{debug, error, info};
use serde::Serialize;
use std::path::PathBuf;
use welltraj::{
    load_wells, question_parse_res, write_located_tops, DensifiedSurvey, LocatedTop, Origin,
    TrajError, WellData, TOPS_PREFIX,
};

fn main() {
    let matches = App::new("welltraj")
        .version("0.1.0")
        .about(
            "Computes the 3D trajectory of drilled wells from their deviation \
             surveys with the minimum curvature method and locates formation \
             tops along the well path.",
        )
        .arg(
            Arg::with_name("data_dir")
                .help("Directory holding dev_<well>.csv and tops_<well>.csv files")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("origin")
                .long("origin")
                .value_name("X,Y,Z")
                .takes_value(true)
                .help("Wellhead position in meters; prompted for when absent"),
        )
        .arg(
            Arg::with_name("out_dir")
                .short("o")
                .long("out-dir")
                .value_name("DIR")
                .takes_value(true)
                .help("Write a tops_<well>_located.csv per well into this directory"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Print the computed wells as JSON instead of tables"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Enable debug logging"),
        )
        .get_matches();

    let level = if matches.is_present("verbose") {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Failed to initialize the logger: {}", e);
    }

    if let Err(e) = run(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), TrajError> {
    let dirname = matches.value_of("data_dir").unwrap_or(".");
    let origin = match matches.value_of("origin") {
        Some(s) => parse_origin(s)?,
        None => {
            let term = Term::stdout();
            let x: f64 = question_parse_res(&term, "Wellhead x[m]")?;
            let y: f64 = question_parse_res(&term, "Wellhead y[m]")?;
            let z: f64 = question_parse_res(&term, "Wellhead z[m]")?;
            Origin::new(x, y, z)
        }
    };
    debug!("Wellhead origin: {}", origin);

    let wells = task::block_on(load_wells(dirname))?;
    info!("Loaded {} well(s) from [{}]", wells.len(), dirname);

    if matches.is_present("json") {
        print_json(&wells, origin)?;
    } else {
        print_tables(&wells, origin)?;
    }

    if let Some(out_dir) = matches.value_of("out_dir") {
        write_results(&wells, origin, out_dir)?;
    }
    Ok(())
}

fn parse_origin(s: &str) -> Result<Origin, TrajError> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(TrajError::Value(format!(
            "Expected the origin as x,y,z but got [{}]",
            s
        )));
    }
    let mut v = [0.0f64; 3];
    for i in 0..3 {
        match parts[i].trim().parse::<f64>() {
            Ok(f) => v[i] = f,
            Err(e) => {
                return Err(TrajError::Value(format!(
                    "Origin component [{}]: {}",
                    parts[i], e
                )))
            }
        }
    }
    Ok(Origin::new(v[0], v[1], v[2]))
}

fn out(term: &Term, line: &str) -> Result<(), TrajError> {
    if let Err(e) = term.write_line(line) {
        return Err(TrajError::Terminal(e.to_string()));
    }
    Ok(())
}

fn print_tables(wells: &[WellData], origin: Origin) -> Result<(), TrajError> {
    let term = Term::stdout();
    for well in wells {
        let dens = well.trajectory(origin);
        info!(
            "Well [{}]: {} station(s), {} top(s)",
            well.name,
            dens.len(),
            well.tops.len()
        );
        out(&term, &format!("Well: {}", well.name))?;
        if let Err(e) = term.write_str(&format!("{}", dens)) {
            return Err(TrajError::Terminal(e.to_string()));
        }
        if !well.tops.is_empty() {
            out(&term, "Formation tops:")?;
            let located = well.tops.locate(&dens)?;
            for top in &located {
                out(&term, &format!("{}", top))?;
            }
        }
        out(&term, "")?;
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
struct ComputedWell {
    name: String,
    trajectory: DensifiedSurvey,
    tops: Vec<LocatedTop>,
}

fn print_json(wells: &[WellData], origin: Origin) -> Result<(), TrajError> {
    let mut computed = Vec::with_capacity(wells.len());
    for well in wells {
        let dens = well.trajectory(origin);
        let located = well.tops.locate(&dens)?;
        computed.push(ComputedWell {
            name: well.name.clone(),
            trajectory: dens,
            tops: located,
        });
    }
    let res_json = serde_json::to_string_pretty(&computed);
    match res_json {
        Ok(json) => println!("{}", json),
        Err(e) => return Err(TrajError::Str(e.to_string())),
    }
    Ok(())
}

fn write_results(wells: &[WellData], origin: Origin, out_dir: &str) -> Result<(), TrajError> {
    let dir = PathBuf::from(out_dir);
    if !dir.is_dir() {
        return Err(TrajError::DirNotFound(dir));
    }
    for well in wells {
        if well.tops.is_empty() {
            debug!("Well [{}] has no tops, nothing to write", well.name);
            continue;
        }
        let located = well.locate_tops(origin)?;
        let path = dir.join(format!("{}{}_located.csv", TOPS_PREFIX, well.name));
        write_located_tops(path.clone(), &located)?;
        info!("Wrote located tops for well [{}] to {:?}", well.name, path);
    }
    Ok(())
}
