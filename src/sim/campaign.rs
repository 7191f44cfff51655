//! Campaign: play a pack of levels in order
//!
//! A lost level is restarted from its plan; a won level advances to the
//! next plan. After the last level is won the campaign is complete.

use super::level::{Level, LevelStatus};
use super::parser::{ActorDictionary, LevelParser};
use super::tick::{TickInput, tick};
use crate::levels::LevelPack;
use crate::settings::Tuning;

/// Where the campaign is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignPhase {
    /// Playing the level at `index` in the pack
    Playing { index: usize },
    /// Every level has been won
    Complete,
}

/// Transitions reported by [`Campaign::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignEvent {
    LevelStarted { index: usize },
    LevelLost { index: usize },
    LevelWon { index: usize },
    CampaignComplete,
}

#[derive(Debug)]
pub struct Campaign {
    pack: LevelPack,
    parser: LevelParser,
    tuning: Tuning,
    phase: CampaignPhase,
    level: Option<Level>,
    /// Failed attempts per level index
    losses: Vec<u32>,
}

impl Campaign {
    /// Start the campaign at the first level of the pack
    pub fn new(pack: LevelPack, dictionary: ActorDictionary, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let parser = match tuning.seed {
            Some(seed) => LevelParser::with_seed(dictionary, seed),
            None => LevelParser::new(dictionary),
        };
        let losses = vec![0; pack.len()];
        let mut campaign = Self {
            pack,
            parser,
            tuning,
            phase: CampaignPhase::Complete,
            level: None,
            losses,
        };
        campaign.start_level(0);
        campaign
    }

    pub fn phase(&self) -> CampaignPhase {
        self.phase
    }

    /// Level being played, if the campaign is not complete
    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.level.as_mut()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Times the level at `index` has been lost
    pub fn losses(&self, index: usize) -> u32 {
        self.losses.get(index).copied().unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == CampaignPhase::Complete
    }

    /// Tick the current level and move on once it has finished
    pub fn advance(&mut self, input: &TickInput, dt: f64) -> Vec<CampaignEvent> {
        let CampaignPhase::Playing { index } = self.phase else {
            return Vec::new();
        };
        let Some(level) = self.level.as_mut() else {
            return Vec::new();
        };

        tick(level, input, dt, &self.tuning);
        if !level.is_finished() {
            return Vec::new();
        }

        let mut events = Vec::new();
        match level.status() {
            Some(LevelStatus::Lost) => {
                self.losses[index] += 1;
                log::info!("Level {} lost (attempt {})", index + 1, self.losses[index]);
                events.push(CampaignEvent::LevelLost { index });
                events.push(self.start_level(index));
            }
            Some(LevelStatus::Won) => {
                log::info!("Level {} won", index + 1);
                events.push(CampaignEvent::LevelWon { index });
                events.push(self.start_level(index + 1));
            }
            None => {}
        }
        events
    }

    /// Parse and enter the level at `index`, or complete the campaign
    fn start_level(&mut self, index: usize) -> CampaignEvent {
        let Some(plan) = self.pack.get(index) else {
            log::info!("Campaign complete");
            self.phase = CampaignPhase::Complete;
            self.level = None;
            return CampaignEvent::CampaignComplete;
        };

        let level = self
            .parser
            .parse(plan.rows())
            .with_finish_delay(self.tuning.finish_delay);
        log::info!(
            "Starting level {}/{} ({}x{})",
            index + 1,
            self.pack.len(),
            level.width(),
            level.height()
        );
        self.level = Some(level);
        self.phase = CampaignPhase::Playing { index };
        CampaignEvent::LevelStarted { index }
    }
}
