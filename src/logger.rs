use log::LevelFilter;

const NOISY_CRATES: [&str; 6] = [
    "wgpu_core",
    "wgpu_hal",
    "naga",
    "iced_wgpu",
    "cosmic_text",
    "calloop",
];

pub fn setup(is_debug: bool, verbose: bool) -> Result<(), fern::InitError> {
    let level = if is_debug || verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .level_for("panic", LevelFilter::Error);

    for name in NOISY_CRATES {
        logger = logger.level_for(name, LevelFilter::Warn);
    }

    logger.chain(std::io::stdout()).apply()?;

    Ok(())
}
