//! Verification driver for the counter peripheral.
//!
//! Pin-level scenarios exercising reset, counting, parallel load, tri-state
//! gating, and wraparound. Each suite expects a freshly built [`Simulation`]
//! with a clock registered; inputs are changed between edges and outputs are
//! sampled only after the edge's effects have settled.

use crate::counter::BusValue;
use crate::device::{Pin, UI_LOAD, UI_OUTPUT_ENABLE};
use crate::simulation::{Simulation, SimulationError};
use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    /// Expected vs. actual bus value at a given simulation time. Fatal to the
    /// scenario, but the simulation itself stays usable.
    #[error("at t={time}: expected {expected}, got {actual}")]
    Mismatch {
        time: u64,
        expected: BusValue,
        actual: BusValue,
    },
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Check that the output bus currently drives `expected`.
pub fn expect_count(sim: &Simulation, expected: u8) -> Result<(), DriverError> {
    let actual = sim.uo_out();
    if actual == BusValue::Driven(expected) {
        Ok(())
    } else {
        Err(DriverError::Mismatch {
            time: sim.time(),
            expected: BusValue::Driven(expected),
            actual,
        })
    }
}

/// Check that the output bus is currently high-impedance.
pub fn expect_undriven(sim: &Simulation) -> Result<(), DriverError> {
    let actual = sim.uo_out();
    if actual == BusValue::Undriven {
        Ok(())
    } else {
        Err(DriverError::Mismatch {
            time: sim.time(),
            expected: BusValue::Undriven,
            actual,
        })
    }
}

fn expect_internal(sim: &Simulation, expected: u8) -> Result<(), DriverError> {
    let actual = sim.count();
    if actual == expected {
        Ok(())
    } else {
        Err(DriverError::Mismatch {
            time: sim.time(),
            expected: BusValue::Driven(expected),
            actual: BusValue::Driven(actual),
        })
    }
}

fn init(sim: &mut Simulation) {
    sim.set_pin(Pin::Ena, 1);
    sim.set_pin(Pin::RstN, 0);
    sim.set_pin(Pin::UiIn, UI_OUTPUT_ENABLE);
    sim.set_pin(Pin::UioIn, 0);
}

/// Full functional suite: reset, counting, load, tri-state, wraparound, and
/// reset during operation.
pub fn run_counter_suite(sim: &mut Simulation) -> Result<(), DriverError> {
    info!("starting 8-bit counter suite");
    init(sim);

    info!("reset");
    sim.tick()?;
    sim.tick()?;
    sim.set_pin(Pin::RstN, 1);
    sim.tick()?;
    // Counter starts at 1 on the first edge after reset release
    expect_count(sim, 1)?;

    info!("basic counting");
    for expected in 2..10 {
        sim.tick()?;
        expect_count(sim, expected)?;
    }

    info!("parallel load");
    let load_value = 0xA5;
    sim.set_pin(Pin::UioIn, load_value);
    sim.set_pin(Pin::UiIn, UI_OUTPUT_ENABLE | UI_LOAD);
    sim.tick()?;
    expect_count(sim, load_value)?;

    sim.set_pin(Pin::UiIn, UI_OUTPUT_ENABLE);
    sim.tick()?;
    expect_count(sim, load_value.wrapping_add(1))?;

    info!("tri-state output");
    sim.set_pin(Pin::UiIn, 0);
    sim.tick()?;
    expect_undriven(sim)?;
    // The register keeps counting while the output is disabled
    expect_internal(sim, load_value.wrapping_add(2))?;

    sim.set_pin(Pin::UiIn, UI_OUTPUT_ENABLE);
    sim.tick()?;
    expect_count(sim, load_value.wrapping_add(3))?;

    info!("wrap-around");
    sim.set_pin(Pin::UioIn, 0xFF);
    sim.set_pin(Pin::UiIn, UI_OUTPUT_ENABLE | UI_LOAD);
    sim.tick()?;
    expect_count(sim, 0xFF)?;

    sim.set_pin(Pin::UiIn, UI_OUTPUT_ENABLE);
    sim.tick()?;
    expect_count(sim, 0x00)?;
    sim.tick()?;
    expect_count(sim, 0x01)?;

    info!("reset during operation");
    for _ in 0..5 {
        sim.tick()?;
    }
    expect_count(sim, 0x06)?;

    sim.set_pin(Pin::RstN, 0);
    sim.tick()?;
    sim.set_pin(Pin::RstN, 1);
    sim.tick()?;
    expect_count(sim, 1)?;

    info!("counter suite passed");
    Ok(())
}

/// Reset has absolute priority over load on the same edge; a load held into
/// the first post-release edge wins on that edge.
pub fn run_reset_priority_suite(sim: &mut Simulation) -> Result<(), DriverError> {
    info!("starting reset priority suite");
    init(sim);

    sim.tick()?;
    sim.tick()?;
    sim.set_pin(Pin::RstN, 1);
    sim.tick()?;
    expect_count(sim, 1)?;

    info!("simultaneous reset and load");
    sim.set_pin(Pin::UioIn, 0x88);
    sim.set_pin(Pin::UiIn, UI_OUTPUT_ENABLE | UI_LOAD);
    sim.set_pin(Pin::RstN, 0);
    sim.tick()?;
    sim.set_pin(Pin::RstN, 1);
    sim.tick()?;
    // Load was still asserted on the first post-release edge
    expect_count(sim, 0x88)?;

    info!("reset priority suite passed");
    Ok(())
}

/// Load asserted just before an edge takes effect on that edge.
pub fn run_load_timing_suite(sim: &mut Simulation) -> Result<(), DriverError> {
    info!("starting load timing suite");
    init(sim);

    sim.tick()?;
    sim.tick()?;
    sim.set_pin(Pin::RstN, 1);
    for _ in 0..5 {
        sim.tick()?;
    }

    sim.set_pin(Pin::UioIn, 0x33);
    sim.set_pin(Pin::UiIn, UI_OUTPUT_ENABLE | UI_LOAD);
    sim.tick()?;
    expect_count(sim, 0x33)?;

    sim.set_pin(Pin::UiIn, UI_OUTPUT_ENABLE);
    sim.tick()?;
    expect_count(sim, 0x34)?;

    info!("load timing suite passed");
    Ok(())
}
