use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_t, App, AppSettings, Arg,
    ArgMatches, SubCommand,
};
use edgeprep::{
    extractor::extract_file,
    filter::{TypeThresholdFilter, DEFAULT_THRESHOLD},
};
use log::error;
use std::error::Error;

fn handle_extract(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    extract_file(
        matches.value_of("INPUT").unwrap(),
        matches.value_of("out-dir").unwrap(),
    )?;
    Ok(())
}

fn handle_filter(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let report = TypeThresholdFilter::new()
        .threshold(value_t!(matches, "threshold", usize)?)
        .run_file(
            matches.value_of("INPUT").unwrap(),
            matches.value_of("OUTPUT").unwrap(),
        )?;
    println!("{}", report);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let default_threshold = DEFAULT_THRESHOLD.to_string();
    let matches = App::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("extract")
                .about("Writes one typed edge list per graph of a packed document")
                .after_help(
                    r"The packed document has three lines:

  [0,1]                     graph ids, the last one gives the graph count
  [2,5,7,3,1,2,3]           per graph: node count, then node types
  [2,0,1,9,1,0,4,1,2,0,8]   per graph: edge count, then src dst type triples

Graph i is written to edgeList<i>.txt as `src<TAB>dst<TAB>srcType:dstType:edgeType`.
",
                )
                .arg(
                    Arg::with_name("INPUT")
                        .help("The packed document")
                        .default_value("matlablist_progprofile.txt"),
                )
                .arg(
                    Arg::with_name("out-dir")
                        .help("Directory receiving the edgeList<i>.txt files")
                        .long("out-dir")
                        .takes_value(true)
                        .default_value("."),
                ),
        )
        .subcommand(
            SubCommand::with_name("filter")
                .about("Caps repeated edge types of an edge list")
                .arg(
                    Arg::with_name("INPUT")
                        .help("The edge list to thin")
                        .default_value("edgeList2.txt"),
                )
                .arg(
                    Arg::with_name("OUTPUT")
                        .help("The thinned edge list")
                        .default_value("edgeList_rst.txt"),
                )
                .arg(
                    Arg::with_name("threshold")
                        .help("Stops after this many lines with already seen types")
                        .long("threshold")
                        .takes_value(true)
                        .default_value(&default_threshold),
                ),
        )
        .get_matches();
    let result = if let Some(matches) = matches.subcommand_matches("extract") {
        handle_extract(matches)
    } else if let Some(matches) = matches.subcommand_matches("filter") {
        handle_filter(matches)
    } else {
        Ok(())
    };
    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}
