use agent_2048::agent::{Player, RandomEnvironment};
use agent_2048::episode::Episode;
use agent_2048::statistics::Statistics;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser, Debug)]
#[command(name = "agent-2048", version, about = "Play 2048 episodes between a player and a random environment")]
struct Args {
    /// Number of episodes to play
    #[arg(long, default_value_t = 1000)]
    total: usize,
    /// Print a summary every BLOCK episodes (defaults to --total)
    #[arg(long)]
    block: Option<usize>,
    /// Cap on player moves per episode
    #[arg(long)]
    limit: Option<u32>,
    /// Player properties, e.g. "strategy=heuristic depth=1 seed=7"
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    play: String,
    /// Environment properties, e.g. "seed=7"
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    evil: String,
    /// Print summaries as JSON
    #[arg(long)]
    json: bool,
    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut player = Player::new(&args.play)?;
    let mut env = RandomEnvironment::new(&args.evil)?;
    let block = args.block.unwrap_or(args.total).max(1);
    log::info!("playing {} episodes with the {} strategy", args.total, player.strategy());

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.total as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner} {elapsed_precise} [{bar:40}] {pos}/{len} | {msg}")?
                .progress_chars("=> "),
        );
        pb
    };

    let mut stats = Statistics::new();
    for _ in 0..args.total {
        let episode = Episode::play(&mut player, &mut env, args.limit);
        pb.set_message(format!("score: {}", episode.score));
        pb.inc(1);
        stats.push(&episode);

        if stats.len() % block == 0 {
            if let Some(summary) = stats.summary(block) {
                let text = if args.json { serde_json::to_string(&summary)? } else { summary.to_string() };
                pb.suspend(|| println!("{}", text.trim_end()));
            }
        }
    }
    pb.finish_and_clear();
    Ok(())
}
