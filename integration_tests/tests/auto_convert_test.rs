use assertables::assert_lt;
use integration_tests::prelude::*;
use picadc_driver::boards::{AUTO_CONVERT_AD1CON3, RB2_AN4};

const T2IE: u32 = 1 << 9;
const OTHER_IRQ: u32 = 1 << 4;

fn assert_auto_convert_config(sim: &SimAdc) {
    let con1 = sim.peek(Register::Ad1Con1);
    assert_eq!(0x80E0, con1);
    assert_eq!(ad1con1::SSRC_AUTO, ad1con1::SSRC.get(con1));
    assert_eq!(ad1con1::FORM_INTEGER16, ad1con1::FORM.get(con1));
    assert_eq!(AUTO_CONVERT_AD1CON3, sim.peek(Register::Ad1Con3));
    assert_eq!(0, ad1con3::SAMC.get(sim.peek(Register::Ad1Con3)));
    assert_eq!(0, sim.peek(Register::Ad1Con2));
    assert_eq!(0, sim.peek(Register::Ad1Cssl));
}

#[test]
fn test_mx3_initialize() {
    let sim = new_sim();
    let mut adc = Mx3::new(sim.registers());
    adc.initialize();
    assert!(adc.is_initialized());
    assert_auto_convert_config(&sim);
    // The MX3 leaves the port configuration alone
    assert_eq!(0xFFFF, sim.peek(Register::AnselB));
    assert_eq!(0xFFFF, sim.peek(Register::TrisB));
}

#[test]
fn test_microstick_initialize() {
    let sim = new_sim();
    sim.poke(Register::TrisB, 0);
    sim.poke(Register::AnselB, 0);
    let mut adc = MicrostickII::new(sim.registers());
    adc.initialize();

    assert_auto_convert_config(&sim);
    assert_eq!(RB2_AN4, sim.peek(Register::TrisB));
    assert_eq!(RB2_AN4, sim.peek(Register::AnselB));
}

#[test]
fn test_initialize_clears_previous_configuration() {
    let sim = new_sim();
    // Leftovers from a bootloader
    sim.poke(Register::Ad1Con2, 0xFFFF);
    sim.poke(Register::Ad1Con3, 0xFFFF);
    sim.poke(Register::Ad1Cssl, 0xFFFF);
    let mut adc = Mx3::new(sim.registers());
    adc.initialize();
    assert_auto_convert_config(&sim);
}

#[test]
fn test_mx3_read() {
    let sim = new_sim();
    sim.set_input(AnalogChannel::AN4, 777);
    let mut adc = Mx3::new(sim.registers());
    adc.initialize();

    assert_eq!(Ok(777), adc.read_channel(AnalogChannel::AN4));
    assert_eq!(Ok(65), adc.read_channel(AnalogChannel::AN1));
    assert_eq!(ConversionPhase::Idle, adc.phase());
    assert_eq!(2, sim.conversions());
    // The hardware is left with a finished conversion
    assert_eq!(ConversionPhase::ResultReady, sim.phase());
}

#[test]
fn test_microstick_read() {
    let sim = new_sim();
    sim.set_input(AnalogChannel::AN4, 1023);
    let mut adc = MicrostickII::new(sim.registers());
    adc.initialize();
    assert_eq!(Ok(1023), adc.read_channel(AnalogChannel::AN4));
}

#[test]
fn test_read_before_initialize() {
    let sim = new_sim();
    let mut mx3 = Mx3::new(sim.registers());
    let mut microstick = MicrostickII::new(sim.registers());

    assert_eq!(
        Err(AdcError::NotInitialized),
        mx3.read_channel(AnalogChannel::AN4)
    );
    assert_eq!(
        Err(AdcError::NotInitialized),
        microstick.read_channel(AnalogChannel::AN4)
    );
    assert!(sim.events().is_empty());
}

#[test]
fn test_channel_select_rewrites_register() {
    let sim = new_sim();
    let mut adc = Mx3::new(sim.registers());
    adc.initialize();
    // Stale bits in MUX B and the negative input select are dropped
    sim.poke(Register::Ad1Chs, 0xFFFF_FFFF);
    adc.read_channel(AnalogChannel::AN2).unwrap();
    assert_eq!(ad1chs::CH0SA.set(0, 2), sim.peek(Register::Ad1Chs));
}

/// Read every channel, checking the register access order of each conversion
fn check_read_ordering(adc: &mut impl Converter, sim: &SimAdc) {
    for raw in 0..16u8 {
        let channel = AnalogChannel::new(raw).unwrap();
        sim.clear_events();
        assert_eq!(Ok(raw as u16 * 64 + 1), adc.read_channel(channel));
        let events = sim.events();

        let select = find_write(&events, 0, Register::Ad1Chs, |v| {
            ad1chs::CH0SA.get(v) == raw as u32
        })
        .expect("Channel was never selected");
        let samp_set = find_write(&events, 0, Register::Ad1Con1, |v| ad1con1::SAMP.is_set(v))
            .expect("Sampling never started");
        let samp_cleared = find_con1_read(&events, samp_set + 1, |v| !ad1con1::SAMP.is_set(v))
            .expect("SAMP never seen cleared");
        // DONE from the previous conversion is still set until sampling starts
        let done = find_con1_read(&events, samp_set + 1, |v| ad1con1::DONE.is_set(v))
            .expect("DONE never observed");
        let result = find_read(&events, 0, Register::Adc1Buf0).expect("Result never read");

        assert_lt!(select, samp_set, "{channel}");
        assert_lt!(samp_cleared, done, "{channel}");
        assert_lt!(done, result, "{channel}");
    }
}

#[test]
fn test_mx3_read_ordering() {
    let sim = new_sim();
    let mut adc = Mx3::new(sim.registers());
    adc.initialize();
    check_read_ordering(&mut adc, &sim);
}

#[test]
fn test_microstick_read_ordering() {
    let sim = new_sim();
    let mut adc = MicrostickII::new(sim.registers());
    adc.initialize();
    check_read_ordering(&mut adc, &sim);
}

#[test]
fn test_mx3_masks_timer_interrupt() {
    let sim = new_sim();
    sim.poke(Register::Iec0, T2IE | OTHER_IRQ);
    let mut adc = Mx3::new(sim.registers());
    adc.initialize();
    sim.clear_events();

    adc.read_channel(AnalogChannel::AN4).unwrap();
    let events = sim.events();

    let masked = find_write(&events, 0, Register::Iec0, |v| v & T2IE == 0)
        .expect("Timer interrupt was never masked");
    let select = find_write(&events, 0, Register::Ad1Chs, |_| true).unwrap();
    let result = find_read(&events, 0, Register::Adc1Buf0).unwrap();
    let restored = find_write(&events, masked + 1, Register::Iec0, |v| v & T2IE != 0)
        .expect("Timer interrupt was never restored");

    assert_lt!(masked, select);
    assert_lt!(result, restored);
    // Other interrupts are not touched
    assert!(events
        .iter()
        .filter(|e| e.is_write_to(Register::Iec0))
        .all(|e| e.value & OTHER_IRQ != 0));
    assert_eq!(T2IE | OTHER_IRQ, sim.peek(Register::Iec0));
}

#[test]
fn test_mx3_leaves_disabled_timer_interrupt_disabled() {
    let sim = new_sim();
    sim.poke(Register::Iec0, OTHER_IRQ);
    let mut adc = Mx3::new(sim.registers());
    adc.initialize();
    sim.clear_events();

    adc.read_channel(AnalogChannel::AN4).unwrap();
    let events = sim.events();

    let result = find_read(&events, 0, Register::Adc1Buf0).unwrap();
    assert!(find_write(&events, result, Register::Iec0, |_| true).is_none());
    assert_eq!(OTHER_IRQ, sim.peek(Register::Iec0));
}

#[test]
fn test_microstick_does_not_touch_interrupts() {
    let sim = new_sim();
    sim.poke(Register::Iec0, T2IE);
    let mut adc = MicrostickII::new(sim.registers());
    adc.initialize();
    adc.read_channel(AnalogChannel::AN4).unwrap();

    assert!(!sim.events().iter().any(|e| e.register == Register::Iec0));
}

#[test]
fn test_microstick_with_timer_guard() {
    let sim = new_sim();
    sim.poke(Register::Iec0, T2IE);
    let options = Board::MicrostickII
        .default_options()
        .with_timer_guard(Some(TimerIrqGuard::TIMER2));
    let mut adc = MicrostickII::with_options(sim.registers(), options);
    adc.initialize();
    sim.clear_events();
    adc.read_channel(AnalogChannel::AN4).unwrap();

    let events = sim.events();
    let masked = find_write(&events, 0, Register::Iec0, |v| v & T2IE == 0);
    assert!(masked.is_some());
    assert_eq!(T2IE, sim.peek(Register::Iec0));
}

#[test]
fn test_mx3_without_timer_guard() {
    let sim = new_sim();
    sim.poke(Register::Iec0, T2IE);
    let options = Board::Mx3.default_options().with_timer_guard(None);
    let mut adc = Mx3::with_options(sim.registers(), options);
    adc.initialize();
    adc.read_channel(AnalogChannel::AN4).unwrap();

    assert!(!sim.events().iter().any(|e| e.register == Register::Iec0));
}

#[test]
fn test_stuck_sampling_restores_interrupt() {
    let sim = new_sim();
    sim.poke(Register::Iec0, T2IE);
    let options = Board::Mx3
        .default_options()
        .with_poll_limit(PollLimit::polls(100));
    let mut adc = Mx3::with_options(sim.registers(), options);
    adc.initialize();

    sim.set_fault(Some(SimFault::StuckSampling));
    assert_eq!(
        Err(AdcError::Timeout {
            phase: ConversionPhase::Sampling,
            polls: 100
        }),
        adc.read_channel(AnalogChannel::AN4)
    );
    assert_eq!(ConversionPhase::Sampling, adc.phase());
    assert_eq!(T2IE, sim.peek(Register::Iec0));
}

#[test]
fn test_stuck_conversion_restores_interrupt() {
    let sim = new_sim();
    sim.poke(Register::Iec0, T2IE);
    let options = Board::Mx3
        .default_options()
        .with_poll_limit(PollLimit::polls(100));
    let mut adc = Mx3::with_options(sim.registers(), options);
    adc.initialize();

    sim.set_fault(Some(SimFault::StuckConverting));
    assert_eq!(
        Err(AdcError::Timeout {
            phase: ConversionPhase::Converting,
            polls: 100
        }),
        adc.read_channel(AnalogChannel::AN4)
    );
    assert_eq!(ConversionPhase::Converting, adc.phase());
    assert_eq!(T2IE, sim.peek(Register::Iec0));

    // The next read starts over once the hardware recovers
    sim.set_fault(None);
    assert_eq!(Ok(4 * 64 + 1), adc.read_channel(AnalogChannel::AN4));
}
