use tally8::{BusValue, Peripheral, UI_LOAD, UI_OUTPUT_ENABLE};

fn enabled_peripheral() -> Peripheral {
    let mut dev = Peripheral::new();
    dev.ena = true;
    dev.ui_in = UI_OUTPUT_ENABLE;
    dev
}

#[test]
fn test_reset_release_yields_one_regardless_of_prior_value() {
    let mut dev = enabled_peripheral();

    // Run the counter to an arbitrary value first
    dev.uio_in = 0xC3;
    dev.ui_in = UI_OUTPUT_ENABLE | UI_LOAD;
    dev.posedge();
    assert_eq!(dev.count(), 0xC3);

    dev.ui_in = UI_OUTPUT_ENABLE;
    dev.rst_n = false;
    dev.posedge();
    dev.rst_n = true;
    dev.posedge();
    assert_eq!(dev.uo_out(), BusValue::Driven(1));
}

#[test]
fn test_reset_wins_over_load_on_same_edge() {
    let mut dev = enabled_peripheral();

    dev.uio_in = 0x88;
    dev.ui_in = UI_OUTPUT_ENABLE | UI_LOAD;
    dev.rst_n = false;
    dev.posedge();
    // Load was ignored on the reset edge
    assert_eq!(dev.count(), 0);

    // Load released before the first post-release edge: plain increment to 1
    dev.rst_n = true;
    dev.ui_in = UI_OUTPUT_ENABLE;
    dev.posedge();
    assert_eq!(dev.uo_out(), BusValue::Driven(1));
}

#[test]
fn test_load_held_through_reset_release() {
    let mut dev = enabled_peripheral();

    dev.uio_in = 0x88;
    dev.ui_in = UI_OUTPUT_ENABLE | UI_LOAD;
    dev.rst_n = false;
    dev.posedge();

    // Load still asserted on the first post-release edge wins that edge
    dev.rst_n = true;
    dev.posedge();
    assert_eq!(dev.uo_out(), BusValue::Driven(0x88));
}

#[test]
fn test_reset_held_across_edges() {
    let mut dev = enabled_peripheral();
    dev.rst_n = false;
    for _ in 0..10 {
        dev.posedge();
        assert_eq!(dev.count(), 0);
    }
    dev.rst_n = true;
    dev.posedge();
    assert_eq!(dev.count(), 1);
}

#[test]
fn test_reset_reasserted_mid_count() {
    let mut dev = enabled_peripheral();
    dev.rst_n = false;
    dev.posedge();
    dev.rst_n = true;
    for _ in 0..7 {
        dev.posedge();
    }
    assert_eq!(dev.count(), 7);

    dev.rst_n = false;
    dev.posedge();
    dev.rst_n = true;
    dev.posedge();
    assert_eq!(dev.uo_out(), BusValue::Driven(1));
}
