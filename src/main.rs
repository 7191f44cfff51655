//! Lava Platformer headless runner
//!
//! Plays a level pack with a scripted "run right and jump" input and logs
//! how each level ends. Usage: `lava-platformer [levels.json] [seed]`.
//! Set `LAVA_TUNING` to a JSON file to override the driver tuning.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lava_platformer::sim::{ActorDictionary, Campaign, CampaignEvent, TickInput};
    use lava_platformer::{LevelPack, Tuning};

    /// Fixed frame step (60 Hz)
    const FRAME_DT: f64 = 1.0 / 60.0;
    /// Stop after two simulated minutes
    const MAX_FRAMES: u32 = 60 * 120;

    env_logger::init();
    log::info!("Lava Platformer (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let pack = match args.first() {
        Some(path) => match LevelPack::load(path) {
            Ok(pack) => pack,
            Err(e) => {
                log::error!("Cannot load level pack: {}", e);
                std::process::exit(1);
            }
        },
        None => LevelPack::builtin(),
    };

    let mut tuning = match std::env::var("LAVA_TUNING") {
        Ok(path) => Tuning::load_or_default(path),
        Err(_) => Tuning::default(),
    };
    if let Some(seed) = args.get(1) {
        match seed.parse::<u64>() {
            Ok(seed) => tuning.seed = Some(seed),
            Err(_) => log::warn!("Ignoring invalid seed {:?}", seed),
        }
    }

    let mut campaign = Campaign::new(pack, ActorDictionary::standard(), tuning);
    let input = TickInput {
        right: true,
        up: true,
        ..Default::default()
    };

    let mut won = 0;
    let mut lost = 0;
    for frame in 0..MAX_FRAMES {
        for event in campaign.advance(&input, FRAME_DT) {
            match event {
                CampaignEvent::LevelWon { .. } => won += 1,
                CampaignEvent::LevelLost { .. } => lost += 1,
                CampaignEvent::LevelStarted { .. } => {}
                CampaignEvent::CampaignComplete => {
                    log::info!("Campaign complete after {} frames", frame + 1);
                }
            }
        }
        if campaign.is_complete() {
            break;
        }
    }

    if !campaign.is_complete() {
        log::info!("Stopped after {} frames ({:?})", MAX_FRAMES, campaign.phase());
    }
    log::info!("Levels won: {}, levels lost: {}", won, lost);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; a host page drives the simulation
}
