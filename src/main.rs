//! Profile Form - Main Entry Point
//!
//! Command-line host for the profile settings form. It loads the host
//! configuration, mounts a form, replays edits given on the command line in
//! order, and then saves or cancels and prints the result.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use profile_form::{
    catalog,
    config::{CliArgs, FormSettings, OutputFormat},
    form::{FieldKey, ListField, LoggingListener, Section, SelectionField, SettingsForm},
    profile::ProfileConfig,
    NAME, VERSION,
};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
}

/// Argument ids that carry edits, replayed in command-line order.
const EDIT_ARGS: &[&str] = &["set", "append", "remove", "select", "deselect", "tab"];

/// One edit requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
    Set { key: String, value: String },
    Append { field: ListField, entry: String },
    Remove { field: ListField, index: String },
    Select { field: SelectionField, value: String },
    Deselect { field: SelectionField, value: String },
    Tab(Section),
}

/// Print a short profile summary to stderr
fn print_summary(form: &SettingsForm<LoggingListener>) {
    let profile = form.profile();
    eprintln!(
        "{bold}{blue}Profile:{reset} {}",
        profile.identity.profile_name,
        bold = colors::BOLD,
        blue = colors::BLUE,
        reset = colors::RESET
    );
    eprintln!(
        "  {dim}Browser:{reset}        {} on {}",
        profile.identity.browser_type.label(),
        profile.identity.operating_system.label(),
        dim = colors::DIM,
        reset = colors::RESET
    );
    eprintln!(
        "  {dim}Resolution:{reset}     {}",
        profile.identity.screen_resolution,
        dim = colors::DIM,
        reset = colors::RESET
    );
    eprintln!(
        "  {dim}Proxy:{reset}          {}",
        if profile.proxy.enabled {
            format!(
                "{green}{}{reset}",
                profile.proxy.to_url(),
                green = colors::GREEN,
                reset = colors::RESET
            )
        } else {
            format!("{yellow}disabled{reset}", yellow = colors::YELLOW, reset = colors::RESET)
        },
        dim = colors::DIM,
        reset = colors::RESET
    );
    eprintln!(
        "  {dim}Active Tab:{reset}     {}",
        form.active_section().label(),
        dim = colors::DIM,
        reset = colors::RESET
    );
    eprintln!(
        "  {dim}Unsaved Changes:{reset} {}",
        if form.has_changes() {
            format!("{yellow}yes{reset}", yellow = colors::YELLOW, reset = colors::RESET)
        } else {
            format!("{green}no{reset}", green = colors::GREEN, reset = colors::RESET)
        },
        dim = colors::DIM,
        reset = colors::RESET
    );
    eprintln!();
}

/// Build the CLI command parser
fn build_cli() -> Command {
    Command::new(NAME)
        .version(VERSION)
        .about("Edit an anti-detect browser profile from the command line")
        .long_about(
            "Profile Form mounts a browser profile settings form and applies edits:\n\
             - Typed field updates with --set KEY=VALUE\n\
             - List editing with --append and --remove\n\
             - Checkbox editing with --select and --deselect\n\
             - Optional validation before save\n\
             Edits are applied in the order they appear on the command line.",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to configuration file (TOML or JSON)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("FILE")
                .help("Profile file to load instead of the built-in default")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: json or toml")
                .value_parser(["json", "toml"]),
        )
        .arg(
            Arg::new("start-tab")
                .long("start-tab")
                .value_name("SECTION")
                .help("Tab that is active when the form mounts"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .help("Set a field, e.g. proxyPort=8080")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("append")
                .long("append")
                .value_name("KEY=ENTRY")
                .help("Append an entry to a list field, e.g. bookmarkFolders=Travel")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("remove")
                .long("remove")
                .value_name("KEY=INDEX")
                .help("Remove the entry at INDEX from a list field")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("select")
                .long("select")
                .value_name("KEY=VALUE")
                .help("Check a value in a selection field, e.g. languages=fr-FR")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("deselect")
                .long("deselect")
                .value_name("KEY=VALUE")
                .help("Uncheck a value in a selection field")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("tab")
                .long("tab")
                .value_name("SECTION")
                .help("Switch to a tab")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("webgl-preset")
                .long("webgl-preset")
                .value_name("NAME")
                .help("Fill the WebGL vendor/renderer from a named GPU preset"),
        )
        .arg(
            Arg::new("random-webgl")
                .long("random-webgl")
                .help("Fill the WebGL vendor/renderer from a random GPU preset")
                .action(ArgAction::SetTrue)
                .conflicts_with("webgl-preset"),
        )
        .arg(
            Arg::new("validate")
                .long("validate")
                .help("Fail if the edited profile has validation issues")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .help("Save the form after applying edits")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cancel")
                .long("cancel")
                .help("Cancel the form after applying edits")
                .action(ArgAction::SetTrue)
                .conflicts_with("save"),
        )
        .arg(
            Arg::new("test-proxy")
                .long("test-proxy")
                .help("Show the proxy URL a connection test would use")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print")
                .long("print")
                .help("Print the resulting profile")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("show-visible")
                .long("show-visible")
                .help("List the fields shown on the active tab")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-fields")
                .long("list-fields")
                .help("List every field key with its tab and kind, then exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-options")
                .long("list-options")
                .value_name("KEY")
                .help("List the values a select or checkbox field offers, then exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress output except errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
}

/// Parse CLI arguments into CliArgs struct
fn parse_cli_args(matches: &ArgMatches) -> Result<CliArgs> {
    let mut args = CliArgs::default();

    args.config_file = matches.get_one::<PathBuf>("config").cloned();
    args.initial_profile = matches.get_one::<PathBuf>("profile").cloned();

    if let Some(format) = matches.get_one::<String>("format") {
        args.output_format = Some(format.parse::<OutputFormat>()?);
    }
    if let Some(section) = matches.get_one::<String>("start-tab") {
        args.start_section = Some(section.parse::<Section>()?);
    }

    Ok(args)
}

/// Split a `KEY=VALUE` argument.
fn split_pair<'a>(arg: &str, raw: &'a str) -> Result<(&'a str, &'a str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("--{} expects KEY=VALUE, got: {}", arg, raw),
    }
}

fn list_field(name: &str) -> Result<ListField> {
    let key: FieldKey = name.parse()?;
    ListField::from_key(key).with_context(|| format!("{} is not a list field", key))
}

fn selection_field(name: &str) -> Result<SelectionField> {
    let key: FieldKey = name.parse()?;
    SelectionField::from_key(key).with_context(|| format!("{} is not a selection field", key))
}

fn parse_edit(arg: &str, raw: &str) -> Result<Edit> {
    if arg == "tab" {
        return Ok(Edit::Tab(raw.parse()?));
    }

    let (key, value) = split_pair(arg, raw)?;
    let value = value.to_string();
    let edit = match arg {
        "set" => Edit::Set {
            key: key.to_string(),
            value,
        },
        "append" => Edit::Append {
            field: list_field(key)?,
            entry: value,
        },
        "remove" => Edit::Remove {
            field: list_field(key)?,
            index: value,
        },
        "select" => Edit::Select {
            field: selection_field(key)?,
            value,
        },
        "deselect" => Edit::Deselect {
            field: selection_field(key)?,
            value,
        },
        other => bail!("Unknown edit argument: {}", other),
    };
    Ok(edit)
}

/// Collect all edit arguments, ordered by their position on the command line.
fn collect_edits(matches: &ArgMatches) -> Result<Vec<Edit>> {
    let mut positioned = Vec::new();

    for arg in EDIT_ARGS {
        let (Some(indices), Some(values)) =
            (matches.indices_of(arg), matches.get_many::<String>(arg))
        else {
            continue;
        };
        for (index, raw) in indices.zip(values) {
            let edit = parse_edit(arg, raw).with_context(|| format!("Invalid --{} {}", arg, raw))?;
            positioned.push((index, edit));
        }
    }

    positioned.sort_by_key(|(index, _)| *index);
    Ok(positioned.into_iter().map(|(_, edit)| edit).collect())
}

fn apply_edit(form: &mut SettingsForm<LoggingListener>, edit: Edit) -> Result<()> {
    match edit {
        Edit::Set { key, value } => {
            form.set(&key, &value)
                .with_context(|| format!("Failed to set {}", key))?;
        }
        Edit::Append { field, entry } => {
            if !form.append(field, &entry) {
                warn!(field = %field, "Blank entry not appended");
            }
        }
        Edit::Remove { field, index } => match index.trim().parse::<usize>() {
            Ok(index) => {
                if !form.remove_at(field, index) {
                    warn!(field = %field, index, "Index out of range, nothing removed");
                }
            }
            Err(_) => warn!(field = %field, index = %index, "Invalid index, nothing removed"),
        },
        Edit::Select { field, value } => {
            if !form.select(field, &value) {
                warn!(field = %field, value = %value, "Already selected or blank, nothing added");
            }
        }
        Edit::Deselect { field, value } => {
            if !form.deselect(field, &value) && form_keeps(form, field, &value) {
                warn!(field = %field, value = %value, "Cannot remove the last entry");
            }
        }
        Edit::Tab(section) => form.select_section(section),
    }
    Ok(())
}

/// True when `value` is still selected after a refused deselect.
fn form_keeps(form: &SettingsForm<LoggingListener>, field: SelectionField, value: &str) -> bool {
    field.members(form.profile()).contains(value)
}

/// Initialize the tracing/logging subsystem
fn init_tracing(verbosity: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();
}

/// Mount the form on the configured profile
fn mount_form(settings: &FormSettings) -> Result<SettingsForm<LoggingListener>> {
    let profile = match settings.initial_profile {
        Some(ref path) => {
            info!("Loading profile from {}", path.display());
            ProfileConfig::from_file(path)
                .with_context(|| format!("Failed to load profile {}", path.display()))?
        }
        None => ProfileConfig::default(),
    };

    let listener = LoggingListener::new(&settings.save_message, &settings.cancel_message);
    let mut form = SettingsForm::with_profile(profile, listener);
    form.select_section(settings.start_section);
    Ok(form)
}

fn list_fields() {
    for key in FieldKey::ALL {
        println!("{:<28} {:<12} {:?}", key.value(), key.section().value(), key.kind());
    }
}

/// Values offered by a select or checkbox field.
fn field_options(name: &str) -> Result<Vec<&'static str>> {
    let key: FieldKey = name.parse()?;
    let options = key.options();
    if options.is_empty() {
        bail!("{} is a free-form field", key);
    }
    Ok(options)
}

/// Main application entry point
fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let verbosity = matches.get_count("verbose");
    let quiet = matches.get_flag("quiet");

    init_tracing(verbosity, quiet);

    if matches.get_flag("list-fields") {
        list_fields();
        return Ok(());
    }

    if let Some(name) = matches.get_one::<String>("list-options") {
        for option in field_options(name)? {
            println!("{}", option);
        }
        return Ok(());
    }

    let cli_args = parse_cli_args(&matches)?;
    let settings = cli_args
        .load_settings()
        .context("Failed to load configuration")?;

    let edits = collect_edits(&matches)?;
    let mut form = mount_form(&settings)?;

    let preset = if let Some(name) = matches.get_one::<String>("webgl-preset") {
        Some(catalog::webgl_preset(name).with_context(|| format!("Unknown WebGL preset: {}", name))?)
    } else if matches.get_flag("random-webgl") {
        Some(catalog::random_webgl_preset(&mut rand::thread_rng()))
    } else {
        None
    };
    if let Some(preset) = preset {
        info!("Using WebGL preset {}", preset.name);
        form.update_all(preset.updates());
    }

    info!("Applying {} edit(s)", edits.len());
    for edit in edits {
        apply_edit(&mut form, edit)?;
    }

    if matches.get_flag("test-proxy") {
        if form.profile().proxy.enabled {
            println!("Testing proxy connection: {}", form.profile().proxy.to_url());
        } else {
            warn!("Proxy is disabled, nothing to test");
        }
    }

    let issues = form.validate();
    for issue in &issues {
        warn!("{}", issue);
    }
    if matches.get_flag("validate") && !issues.is_empty() {
        bail!("Profile has {} validation issue(s)", issues.len());
    }

    if !quiet {
        print_summary(&form);
    }

    if matches.get_flag("save") {
        form.save();
    } else if matches.get_flag("cancel") {
        form.cancel();
    } else if form.has_changes() {
        info!("Form has unsaved changes");
    }

    if matches.get_flag("show-visible") {
        for key in form.visible_fields() {
            println!("{} = {}", key, form.profile().get(key));
        }
    }

    if matches.get_flag("print") {
        let rendered = form
            .profile()
            .render(settings.output_format)
            .context("Failed to render profile")?;
        println!("{}", rendered);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cmd = build_cli();

        let matches = cmd
            .clone()
            .try_get_matches_from(["profile-form", "--save", "--print"])
            .unwrap();

        assert!(matches.get_flag("save"));
        assert!(matches.get_flag("print"));
    }

    #[test]
    fn test_cli_conflicts() {
        let cmd = build_cli();

        let result = cmd
            .clone()
            .try_get_matches_from(["profile-form", "--save", "--cancel"]);
        assert!(result.is_err());

        let result = cmd.try_get_matches_from(["profile-form", "--format", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_cli_args() {
        let matches = build_cli()
            .try_get_matches_from([
                "profile-form",
                "--format",
                "toml",
                "--start-tab",
                "webgl",
                "--profile",
                "work.json",
            ])
            .unwrap();

        let args = parse_cli_args(&matches).unwrap();

        assert_eq!(args.output_format, Some(OutputFormat::Toml));
        assert_eq!(args.start_section, Some(Section::WebGl));
        assert_eq!(args.initial_profile, Some(PathBuf::from("work.json")));
    }

    #[test]
    fn test_edits_keep_command_line_order() {
        let matches = build_cli()
            .try_get_matches_from([
                "profile-form",
                "--select",
                "languages=fr-FR",
                "--set",
                "enableProxy=true",
                "--tab",
                "proxy",
                "--set",
                "proxyPort=8080",
                "--remove",
                "bookmarkFolders=0",
            ])
            .unwrap();

        let edits = collect_edits(&matches).unwrap();
        assert_eq!(
            edits,
            vec![
                Edit::Select {
                    field: SelectionField::Languages,
                    value: "fr-FR".to_string()
                },
                Edit::Set {
                    key: "enableProxy".to_string(),
                    value: "true".to_string()
                },
                Edit::Tab(Section::Proxy),
                Edit::Set {
                    key: "proxyPort".to_string(),
                    value: "8080".to_string()
                },
                Edit::Remove {
                    field: ListField::BookmarkFolders,
                    index: "0".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_edit_arguments_need_matching_field_kind() {
        assert!(parse_edit("append", "languages=en").is_err());
        assert!(parse_edit("select", "allowedFonts=Arial").is_err());
        assert!(parse_edit("set", "no-equals-sign").is_err());
        assert!(parse_edit("tab", "settings").is_err());
    }

    #[test]
    fn test_field_options() {
        assert_eq!(
            field_options("webrtcMode").unwrap(),
            vec!["default", "block", "proxy"]
        );
        assert_eq!(field_options("languages").unwrap(), catalog::LANGUAGES.to_vec());
        assert!(field_options("proxyPort").is_err());
        assert!(field_options("nope").is_err());
    }

    #[test]
    fn test_apply_edits() {
        let settings = FormSettings::default();
        let mut form = mount_form(&settings).unwrap();

        apply_edit(
            &mut form,
            Edit::Set {
                key: "proxyPort".to_string(),
                value: "8080".to_string(),
            },
        )
        .unwrap();
        apply_edit(
            &mut form,
            Edit::Remove {
                field: ListField::AllowedFonts,
                index: "-1".to_string(),
            },
        )
        .unwrap();

        apply_edit(
            &mut form,
            Edit::Select {
                field: SelectionField::Languages,
                value: "en".to_string(),
            },
        )
        .unwrap();

        assert_eq!(form.profile().proxy.port, "8080");
        assert_eq!(form.profile().fonts.allowed.len(), 3);
        assert_eq!(form.profile().locale.languages.len(), 2);
        assert!(form.has_changes());

        let result = apply_edit(
            &mut form,
            Edit::Set {
                key: "canvasSpoofingLevel".to_string(),
                value: "high".to_string(),
            },
        );
        assert!(result.is_err());
    }
}
