use storefront_core::{AppConfig, Environment, LocationPermission};
use storefront_location::{LocationProvider, Permission};

use super::*;
use crate::locate::{device_from, display_options};

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        catalog_path: None,
        location_timeout_ms: 15_000,
        address_max_chars: 30,
        geocoder_url: "http://127.0.0.1:9".to_string(),
        geocoder_user_agent: "storefront-test/0.1".to_string(),
        geocoder_timeout_secs: 1,
        geocoder_max_retries: 0,
        geocoder_backoff_base_ms: 0,
        device_position: None,
        location_permission: LocationPermission::Granted,
    }
}

#[test]
fn parses_stores_with_search() {
    let cli = Cli::try_parse_from(["storefront", "stores", "--search", "hat"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Stores { search: Some(ref q) }) if q == "hat"
    ));
}

#[test]
fn parses_recommended_without_search() {
    let cli = Cli::try_parse_from(["storefront", "recommended"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Recommended { search: None })
    ));
}

#[test]
fn parses_show_with_default_tab() {
    let cli =
        Cli::try_parse_from(["storefront", "show", "store", "1"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Show {
            category: Category::Store,
            id: 1,
            tab: DetailTab::About,
        })
    ));
}

#[test]
fn parses_show_contact_tab() {
    let cli = Cli::try_parse_from(["storefront", "show", "recommended", "4", "--tab", "contact"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Show {
            category: Category::Recommended,
            id: 4,
            tab: DetailTab::Contact,
        })
    ));
}

#[test]
fn rejects_unknown_category() {
    let result = Cli::try_parse_from(["storefront", "show", "warehouse", "1"]);
    assert!(result.is_err());
}

#[test]
fn parses_repeated_favorite_toggles() {
    let cli = Cli::try_parse_from([
        "storefront",
        "favorites",
        "--toggle",
        "store-1",
        "--toggle",
        "recommended-2",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Favorites { toggles, clear }) = cli.command else {
        panic!("expected favorites command");
    };
    assert_eq!(
        toggles,
        vec![
            FavoriteKey::new(Category::Store, 1),
            FavoriteKey::new(Category::Recommended, 2),
        ]
    );
    assert!(!clear);
}

#[test]
fn rejects_malformed_favorite_key() {
    let result = Cli::try_parse_from(["storefront", "favorites", "--toggle", "store1"]);
    assert!(result.is_err());
}

#[test]
fn parses_locate_with_negative_longitude() {
    let cli = Cli::try_parse_from([
        "storefront",
        "locate",
        "--lat",
        "39.78",
        "--lon",
        "-89.65",
        "--narrow",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Locate {
        lat,
        lon,
        deny,
        narrow,
    }) = cli.command
    else {
        panic!("expected locate command");
    };
    assert_eq!(lat.zip(lon), Some((39.78, -89.65)));
    assert!(!deny);
    assert!(narrow);
}

#[test]
fn locate_lat_requires_lon() {
    let result = Cli::try_parse_from(["storefront", "locate", "--lat", "39.78"]);
    assert!(result.is_err());
}

#[test]
fn help_is_handled_by_clap() {
    let err = Cli::try_parse_from(["storefront", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["storefront"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[tokio::test]
async fn deny_flag_overrides_granted_config() {
    let device = device_from(
        &test_config(),
        LocateArgs {
            deny: true,
            ..LocateArgs::default()
        },
    );
    assert_eq!(device.request_permission().await, Permission::Denied);
}

#[tokio::test]
async fn flag_position_wins_over_config_position() {
    let mut config = test_config();
    config.device_position = Some((1.0, 2.0));
    let device = device_from(
        &config,
        LocateArgs {
            position: Some((3.0, 4.0)),
            ..LocateArgs::default()
        },
    );
    let coordinates = device
        .current_coordinates(std::time::Duration::from_secs(1))
        .await
        .unwrap();
    assert!((coordinates.latitude - 3.0).abs() < f64::EPSILON);
    assert!((coordinates.longitude - 4.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn locate_denied_prints_permission_message() {
    let mut config = test_config();
    config.location_permission = LocationPermission::Denied;
    let line = run_locate(&config, LocateArgs::default()).await.unwrap();
    assert!(line.starts_with("Location permission denied"));
}

#[tokio::test]
async fn locate_without_position_is_unavailable() {
    let line = run_locate(&test_config(), LocateArgs::default())
        .await
        .unwrap();
    assert!(line.starts_with("Location unavailable"));
}

#[test]
fn narrow_uses_configured_budget() {
    let mut config = test_config();
    config.address_max_chars = 12;
    assert_eq!(display_options(&config, true).max_address_chars, Some(12));
    assert_eq!(display_options(&config, false).max_address_chars, None);
}
