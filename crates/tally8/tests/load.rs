use tally8::{BusValue, Peripheral, UI_LOAD, UI_OUTPUT_ENABLE};
use test_case::test_case;

fn running_peripheral() -> Peripheral {
    let mut dev = Peripheral::new();
    dev.ena = true;
    dev.ui_in = UI_OUTPUT_ENABLE;
    dev.rst_n = false;
    dev.posedge();
    dev.rst_n = true;
    dev.posedge();
    dev
}

#[test_case(0x00 ; "zero")]
#[test_case(0x01 ; "one")]
#[test_case(0x7F ; "mid high")]
#[test_case(0x80 ; "msb set")]
#[test_case(0xA5 ; "alternating")]
#[test_case(0xFF ; "max")]
fn test_load_lands_on_edge(value: u8) {
    let mut dev = running_peripheral();
    dev.uio_in = value;
    dev.ui_in = UI_OUTPUT_ENABLE | UI_LOAD;
    dev.posedge();
    assert_eq!(dev.uo_out(), BusValue::Driven(value));
}

#[test]
fn test_load_idempotent_while_held() {
    let mut dev = running_peripheral();
    dev.uio_in = 0x42;
    dev.ui_in = UI_OUTPUT_ENABLE | UI_LOAD;
    for _ in 0..5 {
        dev.posedge();
        assert_eq!(dev.count(), 0x42); // no drift across held edges
    }
}

#[test]
fn test_load_then_increment() {
    let mut dev = running_peripheral();
    dev.uio_in = 0xA5;
    dev.ui_in = UI_OUTPUT_ENABLE | UI_LOAD;
    dev.posedge();
    assert_eq!(dev.uo_out(), BusValue::Driven(0xA5));

    dev.ui_in = UI_OUTPUT_ENABLE;
    dev.posedge();
    assert_eq!(dev.uo_out(), BusValue::Driven(0xA6));
}

#[test]
fn test_load_value_sampled_per_edge() {
    let mut dev = running_peripheral();
    dev.ui_in = UI_OUTPUT_ENABLE | UI_LOAD;

    // The bus is sampled fresh on every edge while load is held
    for value in [0x10u8, 0x20, 0x30] {
        dev.uio_in = value;
        dev.posedge();
        assert_eq!(dev.count(), value);
    }
}

#[test]
fn test_load_overrides_increment() {
    let mut dev = running_peripheral();
    for _ in 0..9 {
        dev.posedge();
    }
    assert_eq!(dev.count(), 10);

    dev.uio_in = 0x05;
    dev.ui_in = UI_OUTPUT_ENABLE | UI_LOAD;
    dev.posedge();
    assert_eq!(dev.count(), 0x05);
}
