use crate::counter::BusValue;
use crate::device::Peripheral;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Dumped signals, in declaration order: name and width in bits.
const SIGNALS: [(&str, usize); 6] = [
    ("clk", 1),
    ("rst_n", 1),
    ("ena", 1),
    ("ui_in", 8),
    ("uio_in", 8),
    ("uo_out", 8),
];

pub struct VcdWriter {
    writer: BufWriter<File>,
    ids: Vec<String>,
    last_values: Vec<Option<String>>,
    timestamp: u64,
}

impl VcdWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        // VCD Header
        writeln!(writer, "$date")?;
        writeln!(
            writer,
            "  {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(writer, "$end")?;
        writeln!(writer, "$version")?;
        writeln!(writer, "  tally8")?;
        writeln!(writer, "$end")?;
        writeln!(writer, "$timescale 1ns $end")?;

        writeln!(writer, "$scope module counter $end")?;
        let mut ids = Vec::with_capacity(SIGNALS.len());
        for (num, (name, width)) in SIGNALS.iter().enumerate() {
            let vcd_id = Self::generate_vcd_id(num);
            writeln!(writer, "$var wire {} {} {} $end", width, vcd_id, name)?;
            ids.push(vcd_id);
        }
        writeln!(writer, "$upscope $end")?;

        writeln!(writer, "$enddefinitions $end")?;
        writeln!(writer, "$dumpvars")?;
        writeln!(writer, "$end")?;

        Ok(Self {
            writer,
            ids,
            last_values: vec![None; SIGNALS.len()],
            timestamp: 0,
        })
    }

    fn generate_vcd_id(num: usize) -> String {
        let mut id = String::new();
        let mut n = num;
        loop {
            let char = ((n % 94) + 33) as u8 as char;
            id.push(char);
            if n < 94 {
                break;
            }
            n = (n / 94) - 1;
        }
        id.chars().rev().collect()
    }

    fn scalar(val: bool) -> String {
        if val { "1".into() } else { "0".into() }
    }

    fn vector(val: u8) -> String {
        format!("b{val:08b}")
    }

    fn bus(val: BusValue) -> String {
        match val {
            BusValue::Driven(v) => Self::vector(v),
            BusValue::Undriven => "bzzzzzzzz".into(),
        }
    }

    /// Write the current pin state, emitting only signals that changed since
    /// the previous dump.
    pub fn dump(&mut self, timestamp: u64, clk: bool, device: &Peripheral) -> std::io::Result<()> {
        if timestamp > self.timestamp || timestamp == 0 {
            writeln!(self.writer, "#{}", timestamp)?;
            self.timestamp = timestamp;
        }

        let values = [
            Self::scalar(clk),
            Self::scalar(device.rst_n),
            Self::scalar(device.ena),
            Self::vector(device.ui_in),
            Self::vector(device.uio_in),
            Self::bus(device.uo_out()),
        ];

        for (idx, current_val) in values.into_iter().enumerate() {
            if self.last_values[idx].as_deref() != Some(current_val.as_str()) {
                if SIGNALS[idx].1 == 1 {
                    writeln!(self.writer, "{}{}", current_val, self.ids[idx])?;
                } else {
                    writeln!(self.writer, "{} {}", current_val, self.ids[idx])?;
                }
                self.last_values[idx] = Some(current_val);
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
