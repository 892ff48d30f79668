//! drilljig CLI: generate hinge jigs and export them to STL and STEP.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use drilljig::io::export_solid;
use drilljig::jig::{self, JigParams, JigVariant};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "drilljig")]
#[command(about = "Parametric drilling jigs for cabinet hinge hardware", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the jig solids and write .stl + .step files
    Generate {
        /// Output directory (created if missing)
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
        /// Which jig to generate
        #[arg(long, value_enum, default_value = "all")]
        variant: VariantArg,
        /// TOML parameter file overriding the built-in hardware defaults
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Print the resolved parameters and derived jig dimensions
    Dims {
        /// TOML parameter file overriding the built-in hardware defaults
        #[arg(long)]
        params: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Edge,
    Pocket,
    Drill,
    All,
}

impl VariantArg {
    fn variants(self) -> Vec<JigVariant> {
        match self {
            VariantArg::Edge => vec![JigVariant::Edge],
            VariantArg::Pocket => vec![JigVariant::Pocket],
            VariantArg::Drill => vec![JigVariant::Drill],
            VariantArg::All => JigVariant::ALL.to_vec(),
        }
    }
}

fn load_params(path: Option<&PathBuf>) -> Result<JigParams> {
    let params = match path {
        Some(path) => JigParams::from_toml_path(path)
            .with_context(|| format!("reading parameters from {}", path.display()))?,
        None => JigParams::default(),
    };
    params.validate()?;
    Ok(params)
}

fn generate(out_dir: &PathBuf, variant: VariantArg, params: &JigParams) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    for variant in variant.variants() {
        let solid = jig::build(variant, params)
            .with_context(|| format!("building the {} jig", variant.name()))?;
        let stem = format!("jig-{}-{}", params.model_name(), variant.name());
        let (stl_path, step_path) = export_solid(&solid, out_dir, &stem)?;
        info!(
            variant = variant.name(),
            polygons = solid.polygons.len(),
            "wrote {} and {}",
            stl_path.display(),
            step_path.display()
        );
    }

    Ok(())
}

fn dims(params: &JigParams) -> Result<()> {
    println!("model: {}", params.model_name());
    println!(
        "board: {} x {} x {} mm",
        params.board.length, params.board.width, params.board.thickness
    );
    println!(
        "hinge: d {} mm, opening {} mm, inner {} mm, counterbore at {} mm",
        params.hinge.diameter,
        params.hinge.length,
        params.hinge.inner_length,
        params.hinge.counter_distance
    );
    println!(
        "hinge depths: {} mm outer, {} mm inner",
        params.hinge.depth, params.hinge.inner_depth
    );
    println!(
        "plate: {} x {} x {} mm, corner fillet r {} mm",
        params.fixture.plate_width,
        params.fixture.plate_depth,
        params.fixture.plate_thickness,
        params.fixture.corner_radius
    );
    println!(
        "wall: {} mm thick, {} mm tall",
        params.wall_thickness(),
        params.fixture.wall_height
    );
    println!("plate top sits {} mm above the board edge", params.top_height());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            out_dir,
            variant,
            params,
        } => {
            let params = load_params(params.as_ref())?;
            generate(&out_dir, variant, &params)?;
        }
        Commands::Dims { params } => {
            let params = load_params(params.as_ref())?;
            dims(&params)?;
        }
    }

    Ok(())
}
