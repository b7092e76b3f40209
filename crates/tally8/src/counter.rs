/// Control inputs sampled on each active clock edge. Not persisted between
/// edges; the peripheral re-decodes them from the pin levels every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlInputs {
    /// Active-low synchronous reset. `false` means reset is asserted.
    pub reset_n: bool,
    /// Parallel load strobe.
    pub load: bool,
    /// Output driver enable. Gating only; never affects the register.
    pub output_enable: bool,
    /// Value captured by the register when `load` is set.
    pub load_value: u8,
}

/// Value seen on the 8-bit output bus.
///
/// Tri-state is a distinct state, not a sentinel: `Undriven` can never be
/// confused with a legal 0..=255 count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusValue {
    Driven(u8),
    Undriven,
}

impl std::fmt::Display for BusValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusValue::Driven(v) => write!(f, "0x{v:02x}"),
            BusValue::Undriven => write!(f, "z"),
        }
    }
}

/// The 8-bit count register and its synchronous transition function.
///
/// Exactly one rule fires per rising edge, in priority order:
///
/// 1. reset (active low): `count` is cleared to 0 and held there while reset
///    stays asserted. The first post-release edge then increments to 1 (or
///    loads, if `load` is asserted on that edge), which is the externally
///    observed post-reset value.
/// 2. load: `count` is replaced by `load_value`.
/// 3. increment: `count` advances modulo 256.
///
/// The transition is total; there is no illegal input combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    count: u8,
}

impl Counter {
    /// Power-up state. Real hardware leaves the register undefined until the
    /// first reset; the model uses 0 as a deterministic stand-in.
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Current register value. Valid regardless of output gating.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Apply one rising clock edge.
    pub fn posedge(&mut self, inputs: ControlInputs) {
        if !inputs.reset_n {
            self.count = 0;
        } else if inputs.load {
            self.count = inputs.load_value;
        } else {
            self.count = self.count.wrapping_add(1);
        }
    }

    /// Combinational output gating. Re-evaluated continuously, never clocked,
    /// and side-effect free.
    pub fn output(&self, output_enable: bool) -> BusValue {
        if output_enable {
            BusValue::Driven(self.count)
        } else {
            BusValue::Undriven
        }
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}
