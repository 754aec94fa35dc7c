//! XP Reveal demo
//!
//! Drives a seeded session of task claims through the engine and logs what
//! a UI would show. Usage: `xp-reveal [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use xp_reveal::consts::TICK_DT;
    use xp_reveal::{
        BurstEvent, BurstPhase, Claim, ClaimBurst, ProgressFrame, ProgressHost, ProgressionSnapshot,
        RevealSequencer, RevealSettings, TrackCurves, TrackId, dispatch_burst, dispatch_reveal,
        level_for_xp,
    };

    /// Claims in one session
    const SESSION_CLAIMS: u32 = 12;
    /// Ticks between claims (1.5 s at 60 Hz)
    const TICKS_BETWEEN_CLAIMS: u32 = 90;
    /// Rewards handed out on level-up, cycled by level
    const REWARDS: [&str; 4] = ["Bronze Badge", "Night Theme", "Streak Freeze", "Silver Badge"];

    /// Logs every signal instead of drawing it
    #[derive(Default)]
    struct ConsoleHost {
        level_ups: u32,
        bursts_completed: u32,
        last_fraction: f32,
    }

    impl ProgressHost for ConsoleHost {
        fn on_progress_changed(&mut self, frame: &ProgressFrame) {
            // Only log visible changes in bar fill
            if (frame.fraction - self.last_fraction).abs() >= 0.1 || frame.fraction == 1.0 {
                log::debug!(
                    "bar: level {} {}/{} ({:.0}%)",
                    frame.level,
                    frame.xp_into_level,
                    frame.xp_needed_for_level,
                    frame.fraction * 100.0
                );
                self.last_fraction = frame.fraction;
            }
        }

        fn on_level_up(&mut self, new_level: u32) {
            self.level_ups += 1;
            log::info!("LEVEL UP -> {}", new_level);
        }

        fn on_burst_phase_changed(&mut self, phase: BurstPhase) {
            log::debug!("burst: {}", phase.as_str());
        }

        fn on_burst_complete(&mut self) {
            self.bursts_completed += 1;
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0x5eed);
        let settings = match args.next() {
            Some(path) => RevealSettings::load(path),
            None => RevealSettings::default(),
        };

        log::info!("Session seed: {}", seed);
        let mut rng = Pcg32::seed_from_u64(seed);

        let curves = TrackCurves::default();
        let mut player_xp = 0u64;
        let mut category_xp = rng.random_range(0..2_000u64);
        let category = TrackId::Category(rng.random_range(1..10u64));

        let mut reveal = RevealSequencer::new(
            curves.clone(),
            settings.clone(),
            ProgressionSnapshot::player(1, 0),
        );
        let mut bursts: Vec<ClaimBurst> = Vec::new();
        let mut host = ConsoleHost::default();

        for claim_index in 0..SESSION_CLAIMS {
            // Occasionally peek at a category track, then come back
            if rng.random_bool(0.2) {
                let level = level_for_xp(curves.for_track(category), category_xp);
                log::info!("Viewing {:?} (level {})", category, level);
                let snapshot = ProgressionSnapshot::new(category, level, category_xp);
                dispatch_reveal(&reveal.submit_snapshot(snapshot), &mut host);
                category_xp += rng.random_range(10..80u64);
            }

            let amount = rng.random_range(20..=250u64);
            let old_level = level_for_xp(curves.for_track(TrackId::Player), player_xp);
            player_xp += amount;
            let new_level = level_for_xp(curves.for_track(TrackId::Player), player_xp);

            let mut claim = Claim::new(amount);
            if new_level > old_level {
                let reward = REWARDS[new_level as usize % REWARDS.len()];
                claim = claim.with_level_up(new_level, vec![reward.to_string()]);
            }
            log::info!("Claim #{}: +{} XP", claim_index + 1, amount);
            bursts.push(ClaimBurst::start(claim, settings.effective_burst()));

            let snapshot = ProgressionSnapshot::player(new_level, player_xp);
            dispatch_reveal(&reveal.submit_snapshot(snapshot), &mut host);

            for _ in 0..TICKS_BETWEEN_CLAIMS {
                step(&mut reveal, &mut bursts, &mut host);
            }
        }

        // Let everything finish
        while reveal.is_animating() || !bursts.is_empty() {
            step(&mut reveal, &mut bursts, &mut host);
        }
        reveal.dispose();

        let shown = reveal.progress();
        log::info!(
            "Session done: level {}, {} XP, {} level-up(s), {} burst(s)",
            shown.level,
            shown.xp,
            host.level_ups,
            host.bursts_completed
        );
    }

    fn step(reveal: &mut RevealSequencer, bursts: &mut Vec<ClaimBurst>, host: &mut ConsoleHost) {
        dispatch_reveal(&reveal.tick(TICK_DT), host);
        for burst in bursts.iter_mut() {
            let events = burst.tick(TICK_DT);
            if events.contains(&BurstEvent::PhaseChanged(BurstPhase::LevelUpReveal)) {
                if let Some(grant) = burst.reveal() {
                    log::info!("Unlocked at level {}: {:?}", grant.new_level, grant.unlocked_rewards);
                }
            }
            dispatch_burst(&events, host);
        }
        // Host owns burst lifetime: drop finished ones
        bursts.retain(|b| !b.is_done());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("XP Reveal demo starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host page drives the engine
}
