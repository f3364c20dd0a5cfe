use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::{error, Level};

use regionkit::utils::logger::Logger;
use regionkit::commands::{CommandFactory, RegionkitCommandFactory};

fn build_cli() -> ClapCommand {
    ClapCommand::new("regionkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reproject computational regions and derive display geometry")
        .arg(
            Arg::new("extent")
                .help("Region extent as west,south,east,north")
                .required(false)
                .allow_hyphen_values(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Hide progress bars")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Configuration file overriding the built-in defaults")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Log file path")
                .value_name("FILE")
                .default_value("regionkit.log"),
        )
        .arg(
            Arg::new("engine")
                .long("engine")
                .help("Coordinate transformation engine (process, builtin)")
                .value_name("ENGINE")
                .value_parser(["process", "builtin"])
                .default_value("process"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Source coordinate system descriptor (e.g. EPSG:4326 or a PROJ string)")
                .value_name("CRS")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Target coordinate system descriptor")
                .value_name("CRS")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("reproject")
                .short('r')
                .long("reproject")
                .help("Reproject the extent from --from to --to")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("point")
                .long("point")
                .help("Reproject a single point given as x,y")
                .value_name("X,Y")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .help("Reproject every extent listed in FILE")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("render-size")
                .long("render-size")
                .help("Compute the rendering size of the extent (default operation)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Rendering width in pixels")
                .value_name("PIXELS")
                .required(false),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Rendering height in pixels")
                .value_name("PIXELS")
                .required(false),
        )
        .arg(
            Arg::new("resolution")
                .long("resolution")
                .help("Estimate cell resolution of the extent grid or of --raster in the target session")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("rows")
                .long("rows")
                .help("Number of grid rows")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("cols")
                .long("cols")
                .help("Number of grid columns")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("raster")
                .long("raster")
                .help("Raster whose reprojected resolution is estimated")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("mapset")
                .long("mapset")
                .help("Mapset of the raster")
                .value_name("MAPSET")
                .required(false),
        )
        .arg(
            Arg::new("project")
                .long("project")
                .help("Project (location) of the raster")
                .value_name("PROJECT")
                .required(false),
        )
        .arg(
            Arg::new("dbase")
                .long("dbase")
                .help("Database directory of the raster's project")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("align")
                .long("align")
                .help("Derive the target grid for the extent grid (--rows, --cols) in --to")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("set-region")
                .long("set-region")
                .help("Set the target session's region from the source session's region")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("source-rc")
                .long("source-rc")
                .help("Session rc file of the source environment")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("target-rc")
                .long("target-rc")
                .help("Session rc file of the target environment")
                .value_name("FILE")
                .required(false),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") { Level::Debug } else { Level::Warn };
    let log_file = matches.get_one::<String>("log-file")
        .map(String::as_str)
        .unwrap_or("regionkit.log");

    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("regionkit-global.log", level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = RegionkitCommandFactory::new();

    match factory.create_command(&matches, &logger) {
        Ok(command) => match command.execute() {
            Ok(output) => println!("{}", output),
            Err(e) => {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
