use clap::Parser;
use server::init::{self, LevelHostConfig};
use shared::constants::DEFAULT_LEVEL_NAME;
use shared::{get_game_folder_paths, TICKS_PER_SECOND};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = DEFAULT_LEVEL_NAME)]
    level: String,

    #[arg(short, long)]
    game_folder_path: Option<String>,

    /// Save and exit after this many ticks.
    #[arg(long)]
    tick_limit: Option<u64>,

    #[arg(short, long, default_value_t = TICKS_PER_SECOND)]
    tick_rate: u64,
}

fn main() {
    let args = Args::parse();

    if args.tick_rate == 0 {
        eprintln!("Error: tick_rate must be at least 1.");
        std::process::exit(1);
    }

    init::init(
        LevelHostConfig {
            level_name: args.level,
            tick_limit: args.tick_limit,
            tick_rate: args.tick_rate,
        },
        get_game_folder_paths(args.game_folder_path),
    );
}
