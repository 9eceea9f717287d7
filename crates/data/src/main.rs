//! SlotWise CLI runner.

use std::error::Error;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use slotwise_alloc::{assign_initial_stock, AllocConfig, FillMode, FitCache};
use slotwise_data::{
    export_allocations_csv, export_score_json, export_unallocated_csv, load_warehouse,
    write_initial_state, write_simulation_summary,
};
use slotwise_sim::{build_sku_states, run_simulation, SimConfig};

#[derive(Parser)]
#[command(name = "slotwise-runner")]
#[command(about = "Warehouse slotting allocator and demand simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate SKUs to slots and write reports
    Allocate {
        #[command(flatten)]
        alloc: AllocateArgs,
    },

    /// Allocate, then run the monthly demand simulation
    Simulate {
        #[command(flatten)]
        alloc: AllocateArgs,

        /// Months to simulate
        #[arg(short, long, default_value = "36")]
        months: u32,
    },
}

#[derive(Args)]
struct AllocateArgs {
    /// CSV file with SKU definitions (';' separated)
    #[arg(short, long)]
    parts: PathBuf,

    /// CSV file with slot definitions (',' separated)
    #[arg(short, long)]
    slots: PathBuf,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Fill behavior
    #[arg(long, value_enum, default_value = "max-capacity")]
    fill_mode: FillModeArg,

    /// Target utilization for the capped fill mode
    #[arg(long, default_value = "0.5")]
    target_utilization: f64,

    /// Random SKU draws per empty slot in pass 2
    #[arg(long, default_value = "200")]
    max_random_tries: usize,

    /// Directory for CSV/JSON outputs
    #[arg(short, long, default_value = "outputs")]
    output: PathBuf,

    /// Slots to print in the console summary
    #[arg(long, default_value = "50")]
    max_print: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum FillModeArg {
    /// Fill every feasible slot to its geometric capacity
    MaxCapacity,
    /// Partially fill slots up to the utilization target
    UtilizationCapped,
}

impl From<FillModeArg> for FillMode {
    fn from(arg: FillModeArg) -> Self {
        match arg {
            FillModeArg::MaxCapacity => FillMode::MaxCapacity,
            FillModeArg::UtilizationCapped => FillMode::UtilizationCapped,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Allocate { alloc } => {
            run_allocation(&alloc)?;
        }
        Commands::Simulate { alloc, months } => {
            let (skus, mut slots) = run_allocation(&alloc)?;

            let mut states = build_sku_states(&skus, &slots);
            let mut sim_config = SimConfig::new().with_months(months);
            if let Some(seed) = alloc.seed {
                sim_config = sim_config.with_seed(seed);
            }

            let kpis = run_simulation(&mut states, &mut slots, &sim_config);
            write_simulation_summary(&mut io::stdout().lock(), &kpis)?;

            let kpi_path = alloc.output.join("simulation_kpis.json");
            serde_json::to_writer_pretty(File::create(&kpi_path)?, &kpis)?;
            println!("\nSimulation KPIs written to: {}", kpi_path.display());
        }
    }

    Ok(())
}

fn run_allocation(
    args: &AllocateArgs,
) -> Result<(Vec<slotwise_core::Sku>, Vec<slotwise_core::Slot>), Box<dyn Error>> {
    let warehouse = load_warehouse(&args.parts, &args.slots)?;
    let mut slots = warehouse.slots;

    let mut config = AllocConfig::new()
        .with_fill_mode(args.fill_mode.into())
        .with_target_utilization(args.target_utilization)
        .with_max_random_tries(args.max_random_tries);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut cache = FitCache::new();
    let outcome = assign_initial_stock(
        &warehouse.skus,
        &mut slots,
        warehouse.total_capacity,
        &config,
        &mut cache,
    )?;

    write_initial_state(
        &mut io::stdout().lock(),
        &slots,
        warehouse.total_capacity,
        outcome.used_volume,
        args.max_print,
    )?;

    fs::create_dir_all(&args.output)?;

    let alloc_path = args.output.join("initial_allocations.csv");
    export_allocations_csv(File::create(&alloc_path)?, &slots)?;
    println!("\nAllocation CSV written to: {}", alloc_path.display());

    if outcome.unallocated.is_empty() {
        println!("All SKUs were successfully allocated.");
    } else {
        let unallocated_path = args.output.join("unallocated_skus.csv");
        export_unallocated_csv(File::create(&unallocated_path)?, &outcome.unallocated)?;
        println!(
            "Unallocated SKUs written to: {}",
            unallocated_path.display()
        );
    }

    let score_path = args.output.join("allocation_score.json");
    export_score_json(File::create(&score_path)?, &outcome.score)?;
    println!("Allocation score written to: {}", score_path.display());

    Ok((warehouse.skus, slots))
}
