pub mod utils;

pub mod prelude {
    pub use super::utils::{
        find_con1_read, find_read, find_write, first_done_observed, init_logging, new_sim,
        samp_window,
    };
    pub use picadc_driver::common::{
        registers::{ad1chs, ad1con1, ad1con2, ad1con3},
        AnalogChannel, Board, ConversionPhase, PollLimit, ReadOptions, Register, TimerIrqGuard,
    };
    pub use picadc_driver::sim::{Access, SimAdc, SimEvent, SimFault, SimRegisters, SimTicks};
    pub use picadc_driver::{
        AdcError, BoardConverter, Converter, Explorer16, MicrostickII, Mx3, SharedConverter,
        SharedError,
    };
}
