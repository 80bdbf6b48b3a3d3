#![allow(dead_code)]
use picadc_driver::common::{registers::ad1con1, Register};
use picadc_driver::sim::{Access, SimAdc, SimEvent};

/// Install a test logger, so driver logs show up in failing test output
pub fn init_logging() {
    // Logger may already be installed by another test in the same binary
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a simulated ADC with a distinct value on every input
///
/// Input n converts to `n * 64 + 1`, so a reading identifies the channel it came from.
pub fn new_sim() -> SimAdc {
    init_logging();
    let sim = SimAdc::new();
    for ch in 0..16u8 {
        let channel = picadc_driver::common::AnalogChannel::new(ch).unwrap();
        sim.set_input(channel, ch as u16 * 64 + 1);
    }
    sim
}

/// Index of the first write to `reg`, at or after `start`, whose value satisfies `pred`
pub fn find_write(
    events: &[SimEvent],
    start: usize,
    reg: Register,
    pred: impl Fn(u32) -> bool,
) -> Option<usize> {
    events
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, e)| e.is_write_to(reg) && pred(e.value))
        .map(|(i, _)| i)
}

/// Index of the first read of `reg` at or after `start`
pub fn find_read(events: &[SimEvent], start: usize, reg: Register) -> Option<usize> {
    events
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, e)| e.access == Access::Read && e.register == reg)
        .map(|(i, _)| i)
}

/// Index of the first AD1CON1 read which saw DONE set
pub fn first_done_observed(events: &[SimEvent]) -> Option<usize> {
    events.iter().position(|e| {
        e.access == Access::Read
            && e.register == Register::Ad1Con1
            && ad1con1::DONE.is_set(e.value)
    })
}

/// Index of the first AD1CON1 read, at or after `start`, whose value satisfies `pred`
pub fn find_con1_read(
    events: &[SimEvent],
    start: usize,
    pred: impl Fn(u32) -> bool,
) -> Option<usize> {
    events
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, e)| {
            e.access == Access::Read && e.register == Register::Ad1Con1 && pred(e.value)
        })
        .map(|(i, _)| i)
}

/// The write which set SAMP and the following write which cleared it
pub fn samp_window(events: &[SimEvent]) -> Option<(SimEvent, SimEvent)> {
    let set = find_write(events, 0, Register::Ad1Con1, |v| ad1con1::SAMP.is_set(v))?;
    let clear = find_write(events, set + 1, Register::Ad1Con1, |v| {
        !ad1con1::SAMP.is_set(v)
    })?;
    Some((events[set], events[clear]))
}
