mod counter;
mod device;
mod driver;
mod scheduler;
mod simulation;
mod vcd;

pub use counter::{BusValue, ControlInputs, Counter};
pub use device::{Peripheral, Pin, UI_LOAD, UI_OUTPUT_ENABLE};
pub use driver::{
    DriverError, expect_count, expect_undriven, run_counter_suite, run_load_timing_suite,
    run_reset_priority_suite,
};
pub use simulation::{Simulation, SimulationBuilder, SimulationError};
