use super::*;

#[test]
fn parses_lookup_command() {
    let cli = Cli::try_parse_from([
        "copertura",
        "lookup",
        "--city",
        "Milano",
        "--address",
        "via Rossi",
        "--number",
        "12",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Lookup {
        city,
        address,
        number,
        json,
    }) = cli.command
    else {
        panic!("expected lookup command");
    };
    assert_eq!(city, "Milano");
    assert_eq!(address, "via Rossi");
    assert_eq!(number, "12");
    assert!(!json);
}

#[test]
fn parses_lookup_json_flag() {
    let cli = Cli::try_parse_from([
        "copertura",
        "lookup",
        "--city",
        "Roma",
        "--address",
        "Corso Italia",
        "--number",
        "3/B",
        "--json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Lookup { json: true, .. })
    ));
}

#[test]
fn lookup_requires_number() {
    let result = Cli::try_parse_from([
        "copertura",
        "lookup",
        "--city",
        "Milano",
        "--address",
        "Rossi",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_normalize_with_positional_address() {
    let cli = Cli::try_parse_from(["copertura", "normalize", "viale Monza 3"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Normalize { ref address, .. }) if address == "viale Monza 3"
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["copertura"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}
