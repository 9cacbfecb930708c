use clap::Parser;

use super::*;

#[test]
fn no_subcommand_parses_to_none() {
    let cli = Cli::try_parse_from(["stockwatch"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn brands_and_session_subcommands() {
    let cli = Cli::try_parse_from(["stockwatch", "brands"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Brands)));

    let cli = Cli::try_parse_from(["stockwatch", "session"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Session)));
}

#[test]
fn report_defaults() {
    let cli = Cli::try_parse_from(["stockwatch", "report", "--brand", "Amul"]).unwrap();
    let Some(Commands::Report {
        brands,
        view,
        watches,
        notify,
        json,
    }) = cli.command
    else {
        panic!("expected report command");
    };
    assert_eq!(brands, vec!["Amul".to_string()]);
    assert_eq!(view, View::All);
    assert!(watches.is_empty());
    assert!(!notify);
    assert!(!json);
}

#[test]
fn report_with_every_flag() {
    let cli = Cli::try_parse_from([
        "stockwatch",
        "report",
        "--brand",
        "Amul",
        "--brand",
        "Tata Sampann",
        "--view",
        "out-of-stock",
        "--watch",
        "Amul=buyer@example.com",
        "--watch",
        "Tata Sampann",
        "--notify",
        "--json",
    ])
    .unwrap();
    let Some(Commands::Report {
        brands,
        view,
        watches,
        notify,
        json,
    }) = cli.command
    else {
        panic!("expected report command");
    };
    assert_eq!(brands, vec!["Amul".to_string(), "Tata Sampann".to_string()]);
    assert_eq!(view, View::OutOfStock);
    assert_eq!(
        watches,
        vec![
            WatchArg {
                brand: "Amul".to_string(),
                email: Some("buyer@example.com".to_string()),
            },
            WatchArg {
                brand: "Tata Sampann".to_string(),
                email: None,
            },
        ]
    );
    assert!(notify);
    assert!(json);
}

#[test]
fn report_requires_a_brand() {
    assert!(Cli::try_parse_from(["stockwatch", "report"]).is_err());
}

#[test]
fn report_rejects_unknown_view_and_blank_watch() {
    let unknown_view = ["stockwatch", "report", "--brand", "Amul", "--view", "chart"];
    assert!(Cli::try_parse_from(unknown_view).is_err());

    let blank_watch = ["stockwatch", "report", "--brand", "Amul", "--watch", "=x@y.com"];
    assert!(Cli::try_parse_from(blank_watch).is_err());
}

#[test]
fn report_accepts_raw_view() {
    let cli =
        Cli::try_parse_from(["stockwatch", "report", "--brand", "Amul", "--view", "raw"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Report {
            view: View::Raw,
            ..
        })
    ));
}
