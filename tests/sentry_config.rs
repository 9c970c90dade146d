use std::sync::Mutex;

use tempfile::NamedTempFile;

use motion_sentry::SentryConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "MOTION_CONFIG",
        "MOTION_SIZE_THRESHOLD",
        "MOTION_SPEED_THRESHOLD_MS",
        "MOTION_PIXEL_DIFF_THRESHOLD",
        "MOTION_DOWNSAMPLE_FACTOR",
        "MOTION_ROI",
        "MOTION_SOUND_ENABLED",
        "MOTION_SOUND_VOLUME",
        "MOTION_VIBRATION_ENABLED",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_without_file_or_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = SentryConfig::load().expect("load config");
    assert_eq!(cfg.classifier.size_threshold, 0.05);
    assert_eq!(cfg.classifier.speed_threshold_ms, 500);
    assert_eq!(cfg.classifier.pixel_diff_threshold, 30);
    assert_eq!(cfg.classifier.downsample_factor, 0.25);
    assert!(cfg.notify.sound_enabled);
    assert_eq!(cfg.notify.sound_volume, 0.8);
    assert!(cfg.notify.vibration_enabled);
    assert!(cfg.roi.is_none());
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "classifier": {
            "size_threshold": 0.1,
            "speed_threshold_ms": 1000,
            "pixel_diff_threshold": 40,
            "downsample_factor": 0.5
        },
        "notify": {
            "sound_enabled": false,
            "sound_volume": 0.4
        },
        "roi": {
            "enabled": true,
            "left": 0.1,
            "top": 0.2,
            "right": 0.9,
            "bottom": 0.8
        }
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("MOTION_CONFIG", file.path());
    std::env::set_var("MOTION_SIZE_THRESHOLD", "0.2");
    std::env::set_var("MOTION_SOUND_VOLUME", "1.0");

    let cfg = SentryConfig::load().expect("load config");

    // Env wins over file.
    assert_eq!(cfg.classifier.size_threshold, 0.2);
    assert_eq!(cfg.notify.sound_volume, 1.0);

    // File wins over defaults.
    assert_eq!(cfg.classifier.speed_threshold_ms, 1000);
    assert_eq!(cfg.classifier.pixel_diff_threshold, 40);
    assert_eq!(cfg.classifier.downsample_factor, 0.5);
    assert!(!cfg.notify.sound_enabled);
    assert!(cfg.notify.vibration_enabled);

    let roi = cfg.roi.expect("roi enabled");
    assert_eq!(roi.left, 0.1);
    assert_eq!(roi.bottom, 0.8);

    clear_env();
}

#[test]
fn disabled_roi_section_yields_none() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "roi": { "enabled": false, "left": 0.1, "top": 0.1, "right": 0.9, "bottom": 0.9 }
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");
    std::env::set_var("MOTION_CONFIG", file.path());

    let cfg = SentryConfig::load().expect("load config");
    assert!(cfg.roi.is_none());

    clear_env();
}

#[test]
fn roi_env_override_sets_and_clamps() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("MOTION_ROI", "0.2,-0.5,0.8,1.5");
    let cfg = SentryConfig::load().expect("load config");
    let roi = cfg.roi.expect("roi from env");
    assert_eq!(roi.left, 0.2);
    assert_eq!(roi.top, 0.0);
    assert_eq!(roi.right, 0.8);
    assert_eq!(roi.bottom, 1.0);

    clear_env();
}

#[test]
fn out_of_range_values_are_clamped_not_rejected() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("MOTION_SIZE_THRESHOLD", "2.5");
    std::env::set_var("MOTION_SPEED_THRESHOLD_MS", "-100");
    std::env::set_var("MOTION_DOWNSAMPLE_FACTOR", "0");
    std::env::set_var("MOTION_SOUND_VOLUME", "7");

    let cfg = SentryConfig::load().expect("load config");
    assert_eq!(cfg.classifier.size_threshold, 1.0);
    assert_eq!(cfg.classifier.speed_threshold_ms, 0);
    assert_eq!(cfg.classifier.downsample_factor, 0.25);
    assert_eq!(cfg.notify.sound_volume, 1.0);

    clear_env();
}

#[test]
fn unparseable_env_values_are_errors() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("MOTION_SIZE_THRESHOLD", "lots");
    assert!(SentryConfig::load().is_err());

    clear_env();
}

#[test]
fn missing_config_file_is_an_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("MOTION_CONFIG", "/nonexistent/motion.json");
    assert!(SentryConfig::load().is_err());

    clear_env();
}
