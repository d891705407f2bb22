use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use grid_planner::{load_map_file, render_plan, Cell, PlanRecord, PlannerConfig, SearchState};

/// Plan a route on an occupancy grid map and write the result for the plan viewer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Map file to plan on
    #[arg(long)]
    map: PathBuf,

    /// Start cell as `i,j`
    #[arg(long, value_parser = parse_cell, allow_hyphen_values = true)]
    start: Cell,

    /// Goal cell as `i,j`
    #[arg(long, value_parser = parse_cell, allow_hyphen_values = true)]
    goal: Cell,

    /// YAML planner configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the plan record
    #[arg(long, default_value = "out.planner")]
    out: PathBuf,

    /// Also render the result to this PNG file
    #[arg(long)]
    image: Option<PathBuf>,

    /// Pixels per cell in the rendered image
    #[arg(long, default_value_t = 8)]
    scale: u32,
}

fn parse_cell(s: &str) -> Result<Cell, String> {
    let (i, j) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `i,j`, got `{}`", s))?;
    let i = i.trim().parse().map_err(|_| format!("invalid column `{}`", i))?;
    let j = j.trim().parse().map_err(|_| format!("invalid row `{}`", j))?;
    Ok(Cell::new(i, j))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PlannerConfig::from_yaml(&fs::read_to_string(path)?)?,
        None => PlannerConfig::default(),
    };

    let mut graph = load_map_file(&args.map)?;
    graph.apply_config(&config)?;

    for (label, cell) in [("start", args.start), ("goal", args.goal)] {
        if !graph.is_cell_in_bounds(cell.i, cell.j) {
            log::warn!("The {} cell {:?} is outside the map", label, cell);
        } else if graph.check_collision(cell.i, cell.j) {
            log::warn!("The {} cell {:?} is in collision", label, cell);
        }
    }

    let mut planner = config.algorithm.planner();
    let mut state = SearchState::new(&graph);
    let path = planner.plan(&graph, &mut state, args.start, args.goal);
    if path.is_empty() {
        log::info!("No route from {:?} to {:?}", args.start, args.goal);
    } else {
        log::info!(
            "Found a route of {} cells after exploring {} cells",
            path.len(),
            state.visited_cells().len()
        );
    }

    let record = PlanRecord::new(&graph, &state, args.start, args.goal, &path, planner.name());
    log::info!("Saving planning data to {}", args.out.display());
    fs::write(&args.out, record.to_json()?)?;

    if let Some(image_path) = &args.image {
        let image = render_plan(&graph, &state, &path, args.start, args.goal, args.scale)?;
        image.save(image_path)?;
        log::info!("Saved rendering to {}", image_path.display());
    }

    Ok(())
}
