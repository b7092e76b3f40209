use crate::counter::{BusValue, ControlInputs, Counter};

/// `ui_in[1]`: output driver enable.
pub const UI_OUTPUT_ENABLE: u8 = 1 << 1;
/// `ui_in[2]`: parallel load strobe.
pub const UI_LOAD: u8 = 1 << 2;

/// Schedulable input pins of the peripheral.
///
/// `Clk` is handled specially by the simulation layer (edge detection and
/// rescheduling); the rest are plain level changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pin {
    Clk,
    RstN,
    Ena,
    UiIn,
    UioIn,
}

/// Pin-level view of the counter peripheral.
///
/// Pinout (Tiny Tapeout user-project shape):
///
/// | signal       | width | meaning                                  |
/// |--------------|-------|------------------------------------------|
/// | `rst_n`      | 1     | active-low synchronous reset             |
/// | `ena`        | 1     | device enable; 0 = inactive              |
/// | `ui_in[1]`   | 1     | output enable                            |
/// | `ui_in[2]`   | 1     | load                                     |
/// | `uio_in`     | 8     | load value bus                           |
/// | `uo_out`     | 8     | count when enabled, otherwise undriven   |
///
/// `ui_in[0]` and `ui_in[7:3]` are accepted and ignored.
#[derive(Debug, Clone)]
pub struct Peripheral {
    pub rst_n: bool,
    pub ena: bool,
    pub ui_in: u8,
    pub uio_in: u8,
    counter: Counter,
}

impl Peripheral {
    pub fn new() -> Self {
        Self {
            rst_n: true,
            ena: false,
            ui_in: 0,
            uio_in: 0,
            counter: Counter::new(),
        }
    }

    fn controls(&self) -> ControlInputs {
        ControlInputs {
            reset_n: self.rst_n,
            load: self.ui_in & UI_LOAD != 0,
            output_enable: self.ui_in & UI_OUTPUT_ENABLE != 0,
            load_value: self.uio_in,
        }
    }

    /// Apply one rising clock edge to the device.
    ///
    /// With `ena` low the device is inactive: it holds state and never
    /// faults.
    pub fn posedge(&mut self) {
        if self.ena {
            self.counter.posedge(self.controls());
        }
    }

    /// Current value on the `uo_out` bus.
    pub fn uo_out(&self) -> BusValue {
        self.counter.output(self.ui_in & UI_OUTPUT_ENABLE != 0)
    }

    /// Internal register value, regardless of output gating.
    pub fn count(&self) -> u8 {
        self.counter.count()
    }
}

impl Default for Peripheral {
    fn default() -> Self {
        Self::new()
    }
}
