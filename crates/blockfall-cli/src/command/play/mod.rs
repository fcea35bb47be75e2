use std::time::Duration;

use blockfall_engine::SourceSeed;

use crate::{command::CommandArgs, tui::Tui, util};

use self::app::PlayApp;

mod app;
mod screen;

pub fn run(args: &CommandArgs) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(SourceSeed::random);
    let high_score = util::load_high_score(&args.high_score_file)?;
    let cadence = Duration::from_millis(args.ai_cadence_ms.max(1));

    let mut app = PlayApp::new(seed, high_score, args.ai, cadence);
    Tui::new().run(&mut app)?;

    let final_high = app.high_score();
    if final_high > high_score {
        util::save_high_score(&args.high_score_file, final_high)?;
    }
    Ok(())
}
