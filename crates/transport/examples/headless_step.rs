//! Headless transport run
//!
//! Walks the deck through every transport mode with some friction and
//! jitter, prints the readout at each mode change and dumps the final state
//! as JSON.

use simcore::{DeckConfig, EncoderConfig, TransportMode};
use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};
use transport::{Readout, Simulator};

const DT: f64 = 0.016;
const SECONDS_PER_MODE: f64 = 3.0;

fn main() {
    if TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        let _ = SimpleLogger::init(LevelFilter::Info, Config::default());
    }

    let config = DeckConfig {
        encoder: EncoderConfig { seed: Some(1), ..Default::default() },
        ..Default::default()
    };
    let mut sim = Simulator::new(&config);
    sim.set_faults(0.35, 0.5);

    let steps = (SECONDS_PER_MODE / DT).round() as usize;
    for mode in [
        TransportMode::Play,
        TransportMode::Pause,
        TransportMode::FastForward,
        TransportMode::Rewind,
        TransportMode::Stop,
    ] {
        sim.set_transport(mode);
        for _ in 0..steps {
            sim.step(DT);
        }
        println!("t = {:6.2} s\n{}\n", sim.time(), Readout(sim.state()));
    }

    match serde_json::to_string_pretty(sim.state()) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize state: {e}"),
    }
}
