use std::error::Error;

use tally8::{Simulation, run_counter_suite, run_load_timing_suite, run_reset_priority_suite};

fn main() -> Result<(), Box<dyn Error>> {
    // Full functional suite, with waveform capture (generated in the current
    // directory)
    let mut sim = Simulation::builder()
        .clock(10, 0)
        .vcd("counter.vcd")
        .build()?;
    run_counter_suite(&mut sim)?;
    println!(
        "counter suite passed at t={} after {} edges; waveform in counter.vcd",
        sim.time(),
        sim.edges()
    );

    let mut sim = Simulation::builder().clock(10, 0).build()?;
    run_reset_priority_suite(&mut sim)?;

    let mut sim = Simulation::builder().clock(10, 0).build()?;
    run_load_timing_suite(&mut sim)?;

    println!("all suites passed");
    Ok(())
}
