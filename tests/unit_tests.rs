use luxstream::{
    error::BotError,
    web::{chart, SlidingWindow, WebConfig},
    BotConfig, Mode, DEFAULT_BAUD, DEFAULT_DEVICE, WINDOW_CAPACITY,
};

/// Empty device and zero baud resolve to the platform defaults.
#[test]
fn test_config_defaulting_rules() {
    let config = BotConfig::new(Mode::Sensor)
        .with_device("")
        .with_baud(0)
        .resolve();
    assert_eq!(config.device, DEFAULT_DEVICE);
    assert_eq!(config.device, "/dev/ttyACM0");
    assert_eq!(config.baud, DEFAULT_BAUD);
    assert_eq!(config.baud, 57600);
}

/// Mode parsing accepts exactly the two documented modes.
#[test]
fn test_mode_parsing() {
    assert_eq!("led".parse::<Mode>().unwrap(), Mode::Led);
    assert_eq!("sensor".parse::<Mode>().unwrap(), Mode::Sensor);

    let err = "both".parse::<Mode>().unwrap_err();
    assert!(matches!(err, BotError::Config(_)));
    assert!(format!("{}", err).contains("invalid mode"));
}

/// Compaction fires exactly at capacity: after 1025 appends the window
/// holds points 513..=1025.
#[test]
fn test_window_compaction_at_capacity() {
    let mut window = SlidingWindow::new(WINDOW_CAPACITY);

    for i in 1..=1024 {
        window.push(i as f64, i as f64);
    }
    // the 1024th append filled the window and compacted it
    assert_eq!(window.len(), 512);
    assert_eq!(window.points()[0], (513.0, 513.0));
    assert_eq!(window.points()[511], (1024.0, 1024.0));

    window.push(1025.0, 1025.0);
    assert_eq!(window.len(), 513);
    assert_eq!(window.points()[0], (513.0, 513.0));
    assert_eq!(window.points()[512], (1025.0, 1025.0));
}

/// One append short of capacity must not compact.
#[test]
fn test_window_no_early_compaction() {
    let mut window = SlidingWindow::new(WINDOW_CAPACITY);
    for i in 1..=1023 {
        window.push(i as f64, 0.0);
    }
    assert_eq!(window.len(), 1023);
    assert_eq!(window.points()[0].0, 1.0);
}

/// The chart clamps the Y minimum to 0 and formats X ticks as date+time
/// strings, even when all values are positive.
#[test]
fn test_chart_axes() {
    let svg = chart::render(&[(0.0, 1.0), (1.0, 2.0)]).unwrap();

    assert!(svg.contains("<svg"));
    assert!(svg.contains("Time"));
    assert!(svg.contains("Light (A.U.)"));
    // Y minimum clamped to 0 although the smallest value is 1.0
    assert!(svg.contains(">0.0<"));
    // X ticks carry the date, not bare seconds
    assert!(svg.contains("1970-01-01"));
}

/// Error values format their context into the message.
#[test]
fn test_error_formatting() {
    let device = BotError::device("read failed");
    assert!(format!("{}", device).contains("read failed"));

    let config = BotError::config("bad flag");
    assert!(format!("{}", config).contains("bad flag"));

    let web = BotError::web_server("bind refused");
    assert!(format!("{}", web).contains("bind refused"));

    let render = BotError::render("no canvas");
    assert!(format!("{}", render).contains("no canvas"));

    let port = BotError::port_open(
        "/dev/ttyACM0",
        serialport::Error::new(serialport::ErrorKind::NoDevice, "gone"),
    );
    assert!(format!("{}", port).contains("/dev/ttyACM0"));
}

/// Address parsing mirrors the `-addr` flag rules.
#[test]
fn test_web_config_addr_parsing() {
    let config = WebConfig::from_addr(":8080").unwrap();
    assert_eq!(config.bind_address(), "localhost:8080");

    let config = WebConfig::from_addr("192.168.0.5:80").unwrap();
    assert_eq!(config.bind_address(), "192.168.0.5:80");

    assert!(WebConfig::from_addr("nonsense").is_err());
}
