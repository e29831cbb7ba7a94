use app::{App, Mode};
use config::Config;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::Arc;

mod app;
mod capture;
mod config;
mod detector;
mod display;
mod frame;
mod geolocation;
mod library;
mod pipeline;
mod sensor;
mod video;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (mode, config) = configure(&args)?;

    let logger = Arc::new(LoggerConsole::new(config.logger_timezone));

    run(mode, config, logger)
}

/// Picks the mode from the first argument; the second overrides that mode's input path.
fn configure(args: &[String]) -> Result<(Mode, Config), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = Config::default();
    let mode = Mode::parse(args.first().map(String::as_str))?;

    if let Some(path) = args.get(1) {
        match mode {
            Mode::Image => config.image_path = PathBuf::from(path),
            _ => config.video_path = PathBuf::from(path),
        }
    }

    Ok((mode, config))
}

fn run(
    mode: Mode,
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = App::new(config, logger.clone());

    if let Err(e) = app.start(mode) {
        logger.error(&e.to_string())?;
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_path_overrides_input_of_selected_mode() {
        let (mode, config) = configure(&args(&["image", "road.png"])).unwrap();
        assert_eq!(mode, Mode::Image);
        assert_eq!(config.image_path, PathBuf::from("road.png"));
        assert_eq!(config.video_path, Config::default().video_path);

        let (mode, config) = configure(&args(&[])).unwrap();
        assert_eq!(mode, Mode::Video);
        assert_eq!(config.video_path, Config::default().video_path);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(configure(&args(&["webcam"])).is_err());
    }

    #[test]
    fn test_fatal_error_is_logged_and_returned() {
        let dir = tempfile::tempdir().unwrap();
        let (mode, mut config) = configure(&args(&["image"])).unwrap();
        config.image_path = dir.path().join("missing.jpg");
        let logger = LoggerFake::new();

        let result = run(mode, config, Arc::new(logger.clone()));

        assert!(result.is_err());
        assert!(logger
            .lines()
            .iter()
            .any(|l| l.starts_with("ERROR") && l.contains("missing.jpg")));
    }
}
