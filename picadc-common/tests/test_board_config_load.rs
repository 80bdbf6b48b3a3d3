use assertables::assert_contains;
use picadc_common::{
    board_config::{BoardConfig, ConfigError},
    AnalogChannel, Board, PollLimit, TimerIrqGuard,
};

/// A config with nothing but the board gives the board defaults
#[test]
fn test_board_defaults() {
    for board in Board::ALL {
        let cfg = BoardConfig::load_from_str(&format!("board = \"{board}\""))
            .expect("Failed to parse board config");
        assert_eq!(board, cfg.board);
        assert_eq!(board.default_options(), cfg.read_options().unwrap());
        assert!(cfg.analog_channels().unwrap().is_empty());
    }
}

#[test]
fn test_full_config() {
    const CFG: &str = r#"
        board = "explorer16_32"
        timer_guard = true

        [sampling]
        sample_ns = 500
        core_timer_hz = 40_000_000

        [polling]
        limit = 1000

        [[channels]]
        name = "pot"
        channel = 2

        [[channels]]
        name = "temp"
        channel = 4
    "#;

    let cfg = BoardConfig::load_from_str(CFG).expect("Failed to parse board config");
    let opts = cfg.read_options().unwrap();
    assert_eq!(20, opts.sample_ticks);
    assert_eq!(PollLimit::polls(1000), opts.poll_limit);
    assert_eq!(Some(TimerIrqGuard::TIMER2), opts.timer_guard);

    assert_eq!(
        vec![("pot", AnalogChannel::AN2), ("temp", AnalogChannel::AN4)],
        cfg.analog_channels().unwrap()
    );
}

#[test]
fn test_guard_override() {
    // The MX3 guards Timer 2 by default, and the config can turn that off
    let cfg = BoardConfig::load_from_str("board = \"mx3\"\ntimer_guard = false").unwrap();
    assert_eq!(None, cfg.read_options().unwrap().timer_guard);

    // A Microstick can opt in, on a different IEC0 bit
    let cfg =
        BoardConfig::load_from_str("board = \"microstick_ii\"\ntimer_guard = true\ntimer_irq_bit = 8")
            .unwrap();
    assert_eq!(
        TimerIrqGuard::new(8),
        cfg.read_options().unwrap().timer_guard
    );
}

#[test]
fn test_invalid_channel() {
    const CFG: &str = r#"
        board = "mx3"
        [[channels]]
        name = "bogus"
        channel = 16
    "#;

    let err = BoardConfig::load_from_str(CFG).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidChannel { .. }));
    assert_contains!(err.to_string(), "bogus");
}

#[test]
fn test_invalid_sampling() {
    let err = BoardConfig::load_from_str("board = \"mx3\"\n[sampling]\nsample_ns = 250").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSampleTime { .. }));

    let err = BoardConfig::load_from_str(
        "board = \"mx3\"\n[sampling]\nsample_ns = 250\nsample_ticks = 10",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSampleTime { .. }));
}

#[test]
fn test_invalid_board() {
    let err = BoardConfig::load_from_str("board = \"pic18\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_invalid_irq_bit() {
    let err = BoardConfig::load_from_str("board = \"mx3\"\ntimer_irq_bit = 40").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimerIrqBit { bit: 40 }));
}

#[test]
fn test_zero_poll_limit() {
    let err = BoardConfig::load_from_str("board = \"mx3\"\n[polling]\nlimit = 0").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPollLimit));

    let cfg = BoardConfig::load_from_str("board = \"mx3\"\n[polling]\nlimit = 1").unwrap();
    assert_eq!(PollLimit::polls(1), cfg.read_options().unwrap().poll_limit);
}
