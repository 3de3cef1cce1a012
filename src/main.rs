use anyhow::Result;
use clap::{Parser, ValueEnum};
use drone_depot::game::DepotConfig;
use drone_depot::modes::{HumanMode, PilotMode, RolloutConfig, RolloutMode};

#[derive(Parser)]
#[command(name = "drone_depot")]
#[command(version, about = "Warehouse drone simulation with an RL environment interface")]
struct Cli {
    /// Run mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid width in pixels
    #[arg(long, default_value_t = 640)]
    width: i32,

    /// Grid height in pixels
    #[arg(long, default_value_t = 480)]
    height: i32,

    /// Evaluation layout: spawn at the door, cargo beside the racks
    #[arg(long)]
    trained: bool,

    /// Episodes to fly in rollout mode
    #[arg(long, default_value_t = 200)]
    episodes: usize,

    /// Print rollout progress every N episodes
    #[arg(long, default_value_t = 20)]
    log_frequency: usize,

    /// Attach the fixed-rate terminal display to rollout steps
    #[arg(long)]
    watch: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Fly the drone with the keyboard
    Human,
    /// Watch the scripted pilot
    Pilot,
    /// Batch episodes with the scripted pilot
    Rollout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DepotConfig::new(cli.width, cli.height, cli.trained);

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await?;
        }
        Mode::Pilot => {
            let mut pilot_mode = PilotMode::new(config);
            pilot_mode.run().await?;
        }
        Mode::Rollout => {
            let mut rollout_config = RolloutConfig::new(cli.episodes);
            rollout_config.log_frequency = cli.log_frequency;
            rollout_config.depot_config = config;
            rollout_config.watch = cli.watch;

            if cli.watch {
                RolloutMode::watched(rollout_config)?.run()?;
            } else {
                RolloutMode::new(rollout_config).run()?;
            }
        }
    }

    Ok(())
}
