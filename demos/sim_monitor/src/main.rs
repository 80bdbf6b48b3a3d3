use std::{path::PathBuf, time::Duration};

use clap::Parser;
use picadc_driver::{
    common::{board_config::BoardConfig, AnalogChannel, Board, ReadOptions},
    sim::SimAdc,
    BoardConverter, Converter,
};

#[derive(Parser, Debug)]
struct Args {
    /// Board config file. Overrides --board.
    #[clap(long, short)]
    config: Option<PathBuf>,
    #[clap(long, short, default_value = "explorer16_32")]
    board: Board,
    /// Extra channel to read, by AN number
    #[clap(long = "channel")]
    channels: Vec<u8>,
    /// Stop after this many heartbeats
    #[clap(long)]
    count: Option<u32>,
    #[clap(long, default_value = "500")]
    interval_ms: u64,
    /// Initial simulated input, as CHANNEL=VALUE
    #[clap(long = "input", value_parser = parse_input)]
    inputs: Vec<(AnalogChannel, u16)>,
    /// Randomly move the simulated inputs by up to this much each heartbeat
    #[clap(long, default_value = "0")]
    noise: u16,
}

fn parse_input(s: &str) -> Result<(AnalogChannel, u16), String> {
    let (channel, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected CHANNEL=VALUE, got '{s}'"))?;
    let channel = channel
        .trim()
        .trim_start_matches("AN")
        .parse::<u8>()
        .map_err(|e| e.to_string())?;
    let channel = AnalogChannel::new(channel).map_err(|e| e.to_string())?;
    let value = value.trim().parse::<u16>().map_err(|e| e.to_string())?;
    Ok((channel, value))
}

fn jitter(value: u16, noise: u16) -> u16 {
    if noise == 0 {
        return value;
    }
    let delta = rand::random_range(-(noise as i32)..=noise as i32);
    (value as i32 + delta).clamp(0, 0x3FF) as u16
}

#[tokio::main]
async fn main() {
    // Initialize the logger
    env_logger::init();
    let args = Args::parse();

    let (board, options, mut channels) = match &args.config {
        Some(path) => {
            let config = BoardConfig::load(path).unwrap_or_else(|e| {
                log::error!("Error loading config {}: {e}", path.display());
                std::process::exit(1);
            });
            let options = config.read_options().unwrap_or_else(|e| {
                log::error!("Invalid config: {e}");
                std::process::exit(1);
            });
            let channels: Vec<(String, AnalogChannel)> = config
                .analog_channels()
                .unwrap_or_else(|e| {
                    log::error!("Invalid config: {e}");
                    std::process::exit(1);
                })
                .into_iter()
                .map(|(name, ch)| (name.to_string(), ch))
                .collect();
            (config.board, options, channels)
        }
        None => (args.board, args.board.default_options(), Vec::new()),
    };

    for &raw in &args.channels {
        match AnalogChannel::new(raw) {
            Ok(ch) => channels.push((ch.to_string(), ch)),
            Err(e) => log::warn!("Ignoring channel: {e}"),
        }
    }
    if channels.is_empty() {
        channels = board
            .analog_pins()
            .iter()
            .map(|ch| (ch.to_string(), *ch))
            .collect();
    }
    if channels.is_empty() {
        log::error!("No channels to read on {board}. Pass --channel or a config with channels.");
        std::process::exit(1);
    }

    let sim = SimAdc::new();
    // Nothing inspects the access log, and the loop may run forever
    sim.set_recording(false);
    let mut levels = [0u16; 16];
    for (channel, value) in &args.inputs {
        levels[channel.raw() as usize] = *value;
    }

    log::info!("Starting {board} monitor with {}", describe(&options));
    let mut adc = BoardConverter::new(board, sim.registers(), sim.ticks(), options);
    adc.initialize();

    let mut heartbeat = tokio::time::interval(Duration::from_millis(args.interval_ms));
    let mut beats = 0;
    loop {
        heartbeat.tick().await;
        if args.count.is_some_and(|count| beats >= count) {
            break;
        }
        beats += 1;

        for (channel, level) in levels.iter_mut().enumerate() {
            *level = jitter(*level, args.noise);
            if let Ok(channel) = AnalogChannel::new(channel as u8) {
                sim.set_input(channel, *level);
            }
        }

        for (name, channel) in &channels {
            match adc.read_channel(*channel) {
                Ok(value) => log::info!("{name} ({channel}): {value}"),
                Err(e) => log::error!("{name} ({channel}): {e}"),
            }
        }
    }
    log::info!("{} conversions in {beats} heartbeats", sim.conversions());
}

fn describe(options: &ReadOptions) -> String {
    let guard = match options.timer_guard {
        Some(guard) => format!("IEC0 bit {} masked", guard.bit()),
        None => "no interrupt masking".to_string(),
    };
    format!(
        "{} sample ticks, {:?} polling, {guard}",
        options.sample_ticks, options.poll_limit
    )
}
