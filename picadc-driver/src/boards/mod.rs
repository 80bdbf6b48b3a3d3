//! Converter implementations for each supported board
//!
//! The boards differ in which pins they switch to analog mode, how the conversion clock is set
//! up, and whether sampling is timed by software or by the ADC's internal counter. Each
//! implementation owns its register file (and tick counter, where needed) until released.

mod explorer16;
mod microstick;
mod mx3;

pub use explorer16::{Explorer16, EXPLORER_ADCS};
pub use microstick::{MicrostickII, RB2_AN4};
pub use mx3::Mx3;
pub use crate::sequencer::AUTO_CONVERT_AD1CON3;
