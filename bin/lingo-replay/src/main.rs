use clap::Parser;
use lingo_practice::{PracticeConfig, tracing::init_tracing};
use lingo_replay::{Args, replayed_state, run};

fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = PracticeConfig::from_env()?;
    init_tracing(&config.environment);

    let args = Args::parse();
    match run(&args, &config) {
        Ok(state) => {
            println!("{}", serde_json::to_string_pretty(&state)?);
            Ok(())
        }
        Err(err) => {
            // Print the authoritative state so it can be written back
            if let Some(state) = replayed_state(&err) {
                println!("{}", serde_json::to_string_pretty(&state)?);
            }
            Err(err)
        }
    }
}
