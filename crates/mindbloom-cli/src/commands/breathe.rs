use clap::Args;
use mindbloom_core::breathing::progress_label;
use mindbloom_core::{
    BreathPhase, BreathingDriver, BreathingSession, Config, CoreError, Event, Result,
};
use tokio::sync::broadcast::error::RecvError;

#[derive(Args)]
pub struct BreatheArgs {
    /// Cycles in this session (defaults to breathing.max_cycles)
    #[arg(long, conflicts_with = "uncapped", value_parser = clap::value_parser!(u32).range(1..))]
    cycles: Option<u32>,
    /// Keep cycling until interrupted with Ctrl-C
    #[arg(long)]
    uncapped: bool,
    /// Multiply every phase duration, e.g. 0.1 for a quick run
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

pub fn run(args: BreatheArgs) -> Result<()> {
    let config = Config::load()?;
    let cap = if args.uncapped {
        None
    } else {
        args.cycles.or(config.breathing.cycle_cap())
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let mut driver =
            BreathingDriver::new(BreathingSession::new(cap)).with_time_scale(args.time_scale);
        let mut rx = driver.subscribe();
        driver.start()?;

        let interrupt = tokio::signal::ctrl_c();
        tokio::pin!(interrupt);
        let mut interrupted = false;

        loop {
            tokio::select! {
                received = rx.recv() => {
                    let event = match received {
                        Ok(event) => event,
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "breathing events dropped");
                            continue;
                        }
                        Err(RecvError::Closed) => break,
                    };
                    if args.json {
                        println!("{}", serde_json::to_string(&event)?);
                    } else {
                        print_event(&event, cap);
                    }
                    if matches!(
                        event,
                        Event::BreathingCompleted { .. } | Event::BreathingStopped { .. }
                    ) {
                        break;
                    }
                }
                signal = &mut interrupt, if !interrupted => {
                    signal?;
                    interrupted = true;
                    tracing::debug!("interrupted, stopping breathing session");
                    // The stop event arrives on `rx` and ends the loop.
                    driver.stop();
                }
            }
        }
        Ok::<(), CoreError>(())
    })
}

fn print_event(event: &Event, cap: Option<u32>) {
    let phase_line = |phase: BreathPhase, cycles: u32| {
        println!(
            "{:<12} {:>2}s   {}",
            phase.instruction(),
            phase.duration_secs(),
            progress_label(cycles, cap)
        );
    };
    match event {
        Event::BreathingStarted { .. } => phase_line(BreathPhase::Inhale, 0),
        Event::PhaseChanged {
            phase,
            cycles_completed,
            ..
        } => phase_line(*phase, *cycles_completed),
        Event::BreathingCompleted { cycles_completed, .. } => {
            println!("Well done. {cycles_completed} cycles complete.");
        }
        Event::BreathingStopped { cycles_completed, .. } => {
            println!("Stopped after {cycles_completed} cycles.");
        }
        _ => {}
    }
}
