use crate::device::{Peripheral, Pin};
use crate::scheduler::{ClockDef, Scheduler, SimEvent};
use crate::vcd::VcdWriter;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("no clock registered; configure one with SimulationBuilder::clock")]
    NoClock,
    #[error("waveform output error: {0}")]
    Io(#[from] std::io::Error),
}

/// A timed simulation wrapper around the counter peripheral.
///
/// Manages simulation time, the free-running clock, and an event queue of
/// pending pin changes. Outputs sampled after [`Simulation::tick`] or
/// [`Simulation::step`] return are post-settle: every effect of the processed
/// edge has already been committed.
pub struct Simulation {
    pub(crate) device: Peripheral,
    pub(crate) scheduler: Scheduler,
    pub(crate) vcd_writer: Option<VcdWriter>,
    clk: bool,
    edges: u64,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("time", &self.scheduler.time)
            .field("edges", &self.edges)
            .finish()
    }
}

/// A fluent builder for configuring and initializing a [`Simulation`].
#[derive(Debug, Default)]
pub struct SimulationBuilder {
    clock: Option<(u64, u64)>,
    vcd: Option<PathBuf>,
}

impl SimulationBuilder {
    /// Register the free-running clock. `initial_delay` specifies when the
    /// first rising edge occurs; edges then alternate every half period.
    pub fn clock(mut self, period: u64, initial_delay: u64) -> Self {
        self.clock = Some((period, initial_delay));
        self
    }

    /// Enable VCD waveform capture to `path`.
    pub fn vcd<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.vcd = Some(path.into());
        self
    }

    pub fn build(self) -> Result<Simulation, SimulationError> {
        let vcd_writer = match self.vcd {
            Some(path) => Some(VcdWriter::new(path)?),
            None => None,
        };
        let mut sim = Simulation {
            device: Peripheral::new(),
            scheduler: Scheduler::new(),
            vcd_writer,
            clk: false,
            edges: 0,
        };
        if let Some((period, initial_delay)) = self.clock {
            sim.scheduler.clock = Some(ClockDef { period });
            sim.scheduler.push(SimEvent {
                time: initial_delay,
                pin: Pin::Clk,
                next_val: 1,
            });
        }
        Ok(sim)
    }
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::default()
    }

    /// Apply an input pin change immediately, at the current simulation time.
    ///
    /// Driving [`Pin::Clk`] this way performs manual clocking: a 0-to-1
    /// transition applies one rising edge to the device.
    pub fn set_pin(&mut self, pin: Pin, value: u8) {
        self.apply(pin, value);
    }

    /// Schedule a one-shot pin change at a future time.
    pub fn schedule(&mut self, pin: Pin, time: u64, value: u8) {
        self.scheduler.push(SimEvent {
            time,
            pin,
            next_val: value,
        });
    }

    fn apply(&mut self, pin: Pin, value: u8) {
        match pin {
            Pin::Clk => {
                let rising = !self.clk && value != 0;
                self.clk = value != 0;
                if rising {
                    self.device.posedge();
                    self.edges += 1;
                }
            }
            Pin::RstN => self.device.rst_n = value != 0,
            Pin::Ena => self.device.ena = value != 0,
            Pin::UiIn => self.device.ui_in = value,
            Pin::UioIn => self.device.uio_in = value,
        }
    }

    /// Advance time to the next scheduled event and process all events at
    /// that time. Level changes commit before the clock transition, so an
    /// input scheduled at the same timestamp as an edge is sampled by it.
    /// Returns the new simulation time, or `None` if nothing is scheduled.
    pub fn step(&mut self) -> Result<Option<u64>, SimulationError> {
        let (current_time, events_to_process) = match self.scheduler.pop_all_at_next_time() {
            Some(res) => res,
            None => return Ok(None),
        };

        self.scheduler.time = current_time;

        for ev in events_to_process.iter().filter(|ev| ev.pin != Pin::Clk) {
            self.apply(ev.pin, ev.next_val);
        }
        for ev in events_to_process.iter().filter(|ev| ev.pin == Pin::Clk) {
            self.apply(ev.pin, ev.next_val);

            // Free-running clock: reschedule the opposite level half a period out
            if let Some(def) = &self.scheduler.clock {
                let half_period = def.period / 2;
                self.scheduler.push(SimEvent {
                    time: current_time + half_period,
                    pin: Pin::Clk,
                    next_val: 1 - ev.next_val,
                });
            }
        }

        self.dump(current_time)?;

        Ok(Some(current_time))
    }

    /// Advance until one rising clock edge has been processed.
    /// Returns the simulation time of that edge.
    pub fn tick(&mut self) -> Result<u64, SimulationError> {
        if self.scheduler.clock.is_none() {
            return Err(SimulationError::NoClock);
        }
        let start = self.edges;
        while self.edges == start {
            if self.step()?.is_none() {
                return Err(SimulationError::NoClock);
            }
        }
        Ok(self.scheduler.time)
    }

    /// Advance time and run until `end_time` (inclusive).
    pub fn run_until(&mut self, end_time: u64) -> Result<(), SimulationError> {
        while let Some(next_time) = self.scheduler.next_event_time() {
            if next_time > end_time {
                break;
            }
            self.step()?;
        }
        self.scheduler.time = end_time;
        self.dump(end_time)?;
        Ok(())
    }

    /// Captures the current pin state and writes it to the VCD file.
    pub fn dump(&mut self, timestamp: u64) -> Result<(), SimulationError> {
        if let Some(ref mut writer) = self.vcd_writer {
            writer.dump(timestamp, self.clk, &self.device)?;
        }
        Ok(())
    }

    /// Returns the current simulation time.
    pub fn time(&self) -> u64 {
        self.scheduler.time
    }

    /// Number of rising clock edges processed so far.
    pub fn edges(&self) -> u64 {
        self.edges
    }

    /// Returns the time of the next scheduled event, if any.
    pub fn next_event_time(&self) -> Option<u64> {
        self.scheduler.next_event_time()
    }

    /// Current value on the output bus.
    pub fn uo_out(&self) -> crate::BusValue {
        self.device.uo_out()
    }

    /// Internal register value, regardless of output gating.
    pub fn count(&self) -> u8 {
        self.device.count()
    }

    pub fn peripheral(&self) -> &Peripheral {
        &self.device
    }

    pub fn peripheral_mut(&mut self) -> &mut Peripheral {
        &mut self.device
    }
}
