//! Headless demo driver
//!
//! Runs one hypercube module against a simulated bomb: external solves
//! arrive on a timer, and once submission begins the correct answer is
//! issued through the command front-end. Useful for watching a full
//! play-through in the logs.

use std::time::Instant;

use hypercube::command;
use hypercube::config::AppConfig;
use hypercube::sim::SimulatedBomb;
use hypercube::HypercubeModule;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting hypercube module demo");

    let rng = match config.simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let bomb = SimulatedBomb::new(&config.simulation.serial, config.simulation.other_modules);
    let mut module = HypercubeModule::with_rng(bomb.clone(), config.timing, rng)
        .unwrap_or_else(|e| panic!("Failed to create module: {}", e));

    let dt = 1.0 / 60.0;
    let mut since_solve = 0.0f32;
    let mut solved_for = 0.0f32;
    let mut last_status = String::new();
    let mut answer_sent = false;
    let started = Instant::now();

    loop {
        module.tick(dt);
        since_solve += dt;

        // Feed the stage machine one external solve per interval
        if !module.is_solved() && since_solve >= config.simulation.solve_interval {
            since_solve = 0.0;
            if let Some(name) = bomb.solve_next() {
                log::info!("simulated solve of {:?}", name);
            }
        }

        // Submit the full answer through the command front-end once
        if module.in_submission() && !answer_sent {
            let tokens: Vec<String> = module
                .plans()
                .iter()
                .map(|plan| plan.target.to_string())
                .collect();
            let line = format!("press {}", tokens.join(" "));
            match command::handle_command(&mut module, &line) {
                Ok(count) => {
                    log::info!("command {:?} queued {} presses", line, count);
                    answer_sent = true;
                }
                Err(e) => log::warn!("command rejected: {}", e),
            }
        }

        if module.status_text() != last_status {
            last_status = module.status_text().to_string();
            log::info!("display reads {:?}", last_status);
        }

        // Let the shrink animation finish before exiting
        if module.is_solved() {
            solved_for += dt;
            if solved_for >= config.timing.shrink + 0.5 {
                break;
            }
        }

        std::thread::sleep(std::time::Duration::from_secs_f32(dt));
    }

    log::info!(
        "run complete in {:.1}s: {} pass, {} strikes",
        started.elapsed().as_secs_f32(),
        bomb.passes(),
        bomb.strikes()
    );
}
