use integration_tests::prelude::*;

type SimConverter = BoardConverter<SimRegisters, SimTicks>;

#[test]
fn test_not_installed() {
    static ADC: SharedConverter<SimConverter> = SharedConverter::new();

    assert!(!ADC.is_installed());
    assert_eq!(Err(SharedError::NotInstalled), ADC.initialize());
    assert_eq!(
        Err(SharedError::NotInstalled),
        ADC.read_channel(AnalogChannel::AN4)
    );
}

#[test]
fn test_read_before_initialize() {
    static ADC: SharedConverter<SimConverter> = SharedConverter::new();
    let sim = new_sim();
    ADC.install(BoardConverter::with_defaults(
        Board::Mx3,
        sim.registers(),
        sim.ticks(),
    ));

    assert_eq!(
        Err(SharedError::Adc {
            source: AdcError::NotInitialized
        }),
        ADC.read_channel(AnalogChannel::AN4)
    );
}

#[test]
fn test_install_and_take() {
    let adc: SharedConverter<Mx3<SimRegisters>> = SharedConverter::default();
    let sim = new_sim();

    assert!(adc.install(Mx3::new(sim.registers())).is_none());
    assert!(adc.is_installed());
    adc.initialize().unwrap();
    assert_eq!(Ok(true), adc.with(|c| c.is_initialized()));

    // Replacing hands back the old converter
    let old = adc.install(Mx3::new(sim.registers())).unwrap();
    assert!(old.is_initialized());
    assert_eq!(Ok(false), adc.with(|c| c.is_initialized()));

    assert!(adc.take().is_some());
    assert!(!adc.is_installed());
    assert!(adc.take().is_none());
}

#[test]
fn test_reads_from_many_threads() {
    static ADC: SharedConverter<SimConverter> = SharedConverter::new();
    let sim = new_sim();
    ADC.install(BoardConverter::with_defaults(
        Board::Explorer16_32,
        sim.registers(),
        sim.ticks(),
    ));
    ADC.initialize().unwrap();

    let channels = [AnalogChannel::AN1, AnalogChannel::AN2, AnalogChannel::AN4];
    std::thread::scope(|s| {
        for channel in channels {
            s.spawn(move || {
                for _ in 0..20 {
                    // Reads are never interleaved, so each gets its own channel's value
                    assert_eq!(
                        Ok(channel.raw() as u16 * 64 + 1),
                        ADC.read_channel(channel)
                    );
                }
            });
        }
    });

    assert_eq!(60, sim.conversions());
    assert_eq!(Ok(ConversionPhase::Idle), ADC.with(|c| c.phase()));
}
