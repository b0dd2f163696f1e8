use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use glam::DVec2;
use log::{Level, LevelFilter, info};

use coverage_grid::{
    CellType, GridConfig, GridMap, RosImportOptions, load_ros_map, save_preview,
};

/// Create, inspect and convert coverage grid maps.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a uniform grid map and save it under OUTPUT_DIR/<name>
    Create {
        output_dir: PathBuf,
        /// YAML grid configuration; flags below override its fields
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        rows: Option<u32>,
        #[arg(long)]
        cols: Option<u32>,
        /// Meters per cell
        #[arg(long)]
        resolution: Option<f64>,
        /// World x of cell (0, 0)
        #[arg(long, allow_hyphen_values = true)]
        origin_x: Option<f64>,
        /// World y of cell (0, 0)
        #[arg(long, allow_hyphen_values = true)]
        origin_y: Option<f64>,
        /// non_traversable, traversable or cuttable
        #[arg(long)]
        default_cell_type: Option<CellType>,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Print shape, metadata and cell counts of a saved map
    Inspect { map_dir: PathBuf },
    /// Convert a ROS map_server map and save it under OUTPUT_DIR/<name>
    ImportRos {
        yaml: PathBuf,
        output_dir: PathBuf,
        /// Defaults to the YAML file stem
        #[arg(short, long)]
        name: Option<String>,
        /// Cell type for free space
        #[arg(long, default_value = "cuttable")]
        free: CellType,
    },
    /// Render a saved map to an image
    Render { map_dir: PathBuf, output: PathBuf },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose, args.log_file.as_deref())?;

    match args.command {
        Command::Create {
            output_dir,
            config,
            rows,
            cols,
            resolution,
            origin_x,
            origin_y,
            default_cell_type,
            name,
            description,
        } => {
            let mut config = match config {
                Some(path) => GridConfig::from_yaml_file(path)?,
                None => GridConfig::default(),
            };
            config.rows = rows.unwrap_or(config.rows);
            config.cols = cols.unwrap_or(config.cols);
            config.resolution = resolution.unwrap_or(config.resolution);
            config.origin = [
                origin_x.unwrap_or(config.origin[0]),
                origin_y.unwrap_or(config.origin[1]),
            ];
            config.default_cell_type = default_cell_type.unwrap_or(config.default_cell_type);
            config.name = name.unwrap_or(config.name);
            config.description = description.unwrap_or(config.description);

            let map = GridMap::from_config(&config)?;
            let saved = map.save(&output_dir)?;
            println!("{}", saved.display());
        }
        Command::Inspect { map_dir } => {
            let map = GridMap::open(&map_dir)?;
            print_summary(&map);
        }
        Command::ImportRos {
            yaml,
            output_dir,
            name,
            free,
        } => {
            let options = RosImportOptions {
                free_cell_type: free,
                name,
                ..Default::default()
            };
            let map = load_ros_map(&yaml, &options)?;
            let saved = map.save(&output_dir)?;
            println!("{}", saved.display());
        }
        Command::Render { map_dir, output } => {
            let map = GridMap::open(&map_dir)?;
            save_preview(&map, &output)?;
            info!("rendered {} to {}", map_dir.display(), output.display());
        }
    }

    Ok(())
}

fn print_summary(map: &GridMap) {
    let meta = map.metadata();
    let bounds = map.world_bounds();
    let counts = map.cell_counts();
    println!("name:        {}", meta.name);
    println!("description: {}", meta.description);
    println!("shape:       {} rows x {} cols", map.rows(), map.cols());
    println!("resolution:  {} m/cell", meta.resolution);
    println!("origin:      {}", fmt_point(meta.origin));
    println!(
        "extent:      x [{}, {}) y [{}, {}) ({} m x {} m)",
        bounds.x_min,
        bounds.x_max,
        bounds.y_min,
        bounds.y_max,
        map.width_m(),
        map.height_m()
    );
    for cell_type in CellType::ALL {
        println!("{:<16} {}", format!("{cell_type}:"), counts.get(cell_type));
    }
}

fn fmt_point(p: DVec2) -> String {
    format!("({}, {})", p.x, p.y)
}

const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes every log record to stdout and to a file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

fn log_line(timestamp: NaiveDateTime, level: Level, message: impl fmt::Display) -> String {
    format!(
        "{} - coverage_grid - {level} - {message}",
        timestamp.format(LOG_TIMESTAMP_FORMAT)
    )
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let now = Local::now().naive_local();
            writeln!(buf, "{}", log_line(now, record.level(), record.args()))
        });

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::options().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(Tee { file })));
    }

    builder.try_init()?;
    Ok(())
}
