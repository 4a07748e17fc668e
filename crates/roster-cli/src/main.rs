// # roster - Registration Front-End
//
// Thin command-line front-end over roster-core. It plays the role the
// graphical form plays in a desktop build: gather raw field values, invoke
// submit/refresh, and render results with the password masked.
//
// No business logic lives here; validation, uniqueness and identifier
// policy all belong to roster-core.
//
// ## Configuration
//
// Configuration is done via environment variables:
//
// - `ROSTER_STORE_PATH`: Path to the store file (default: users_registration.csv)
// - `ROSTER_LOG_LEVEL`: Log level (trace, debug, info, warn, error)
//
// ## Usage
//
// ```bash
// roster register --username bob --password pw1 --email bob@x.com \
//     --firstname Bob [--lastname ...] [--middlename ...] \
//     [--birthdate dd.mm.yyyy] [--phone ...] [--gender male|female]
//
// roster list
// ```

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use roster_core::record::BIRTHDATE_FORMAT;
use roster_core::{NewRegistration, Registrar, Registration, RosterConfig, StoreConfig};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Placeholder shown instead of the stored password
const PASSWORD_MASK: &str = "******";

/// Exit codes for different termination scenarios
///
/// - 0: Success
/// - 1: Usage, configuration, or rejected submission
/// - 2: Store error (file missing, locked, or unwritable)
#[derive(Debug, Clone, Copy)]
enum RosterExitCode {
    Success = 0,
    UsageError = 1,
    StoreError = 2,
}

impl From<RosterExitCode> for ExitCode {
    fn from(code: RosterExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    store_path: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        Self {
            store_path: env::var("ROSTER_STORE_PATH")
                .unwrap_or_else(|_| roster_core::config::DEFAULT_STORE_PATH.to_string()),
            log_level: env::var("ROSTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.store_path.is_empty() {
            anyhow::bail!("ROSTER_STORE_PATH cannot be empty");
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "ROSTER_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

/// Action parsed from the command line
#[derive(Debug, PartialEq)]
enum Action {
    Register(Box<NewRegistration>),
    List,
}

/// Parse an action from argv (program name excluded)
fn parse_args(args: &[String]) -> Result<Action> {
    let Some(command) = args.first() else {
        anyhow::bail!("missing command. Usage: roster <register|list> [options]");
    };

    match command.as_str() {
        "list" => {
            if args.len() > 1 {
                anyhow::bail!("'list' takes no options");
            }
            Ok(Action::List)
        }
        "register" => parse_register(&args[1..]).map(|c| Action::Register(Box::new(c))),
        other => anyhow::bail!("unknown command '{}'. Expected 'register' or 'list'", other),
    }
}

/// Parse `--flag value` pairs into a candidate record
///
/// Required fields left unset stay empty; the core validator reports them
/// by name, so the front-end does not duplicate the presence checks.
fn parse_register(args: &[String]) -> Result<NewRegistration> {
    let mut candidate = NewRegistration::new("", "", "", "");

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing value for '{}'", flag))?;

        match flag.as_str() {
            "--username" => candidate.username = value.clone(),
            "--password" => candidate.password = value.clone(),
            "--email" => candidate.email = value.clone(),
            "--firstname" => candidate.firstname = value.clone(),
            "--lastname" => candidate.lastname = value.clone(),
            "--middlename" => candidate.middlename = value.clone(),
            "--phone" => candidate.phone = value.clone(),
            "--gender" => {
                candidate.gender = value
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid --gender: {}", e))?
            }
            "--birthdate" => {
                candidate.birthdate = chrono::NaiveDate::parse_from_str(value, BIRTHDATE_FORMAT)
                    .map_err(|e| anyhow::anyhow!("invalid --birthdate '{}': {} (expected dd.mm.yyyy)", value, e))?
            }
            other => anyhow::bail!("unknown option '{}'", other),
        }
    }

    Ok(candidate)
}

/// Render records as a table with the password masked
fn render_table(records: &[Registration]) -> String {
    let mut out = String::new();
    out.push_str(&roster_core::record::COLUMNS.join(" | "));
    out.push('\n');

    for r in records {
        let cells = [
            r.id.to_string(),
            r.username.clone(),
            PASSWORD_MASK.to_string(),
            r.email.clone(),
            r.lastname.clone(),
            r.firstname.clone(),
            r.middlename.clone(),
            r.birthdate.format(BIRTHDATE_FORMAT).to_string(),
            r.phone.clone(),
            r.gender.to_string(),
            r.registered_at
                .format(roster_core::record::TIMESTAMP_FORMAT)
                .to_string(),
        ];
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }

    out
}

fn main() -> ExitCode {
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        return RosterExitCode::UsageError.into();
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let action = match parse_args(&args) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("Error: {}", e);
            return RosterExitCode::UsageError.into();
        }
    };

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return RosterExitCode::UsageError.into();
    }

    // Every operation runs to completion on a single thread; there is no
    // background work to schedule.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return RosterExitCode::StoreError.into();
        }
    };

    rt.block_on(run(config, action)).into()
}

/// Run one action against the store
async fn run(config: Config, action: Action) -> RosterExitCode {
    let roster_config = RosterConfig {
        store: StoreConfig::Csv {
            path: config.store_path,
        },
    };

    let registrar = match Registrar::from_config(&roster_config) {
        Ok(registrar) => registrar,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return RosterExitCode::UsageError;
        }
    };

    if let Err(e) = registrar.init().await {
        eprintln!("Store error: {}", e);
        return RosterExitCode::StoreError;
    }

    match action {
        Action::Register(candidate) => match registrar.register(*candidate).await {
            Ok(record) => {
                println!("Registered {} (id {})", record.username, record.id);
                // Refresh the view after a successful submit.
                refresh(&registrar).await
            }
            Err(e) if e.is_rejection() => {
                eprintln!("Error: {}", e);
                RosterExitCode::UsageError
            }
            Err(e) => {
                eprintln!("Store error: {}", e);
                RosterExitCode::StoreError
            }
        },
        Action::List => refresh(&registrar).await,
    }
}

/// Reload the store and print every record
async fn refresh(registrar: &Registrar) -> RosterExitCode {
    match registrar.list().await {
        Ok(records) => {
            info!("loaded {} record(s)", records.len());
            print!("{}", render_table(&records));
            RosterExitCode::Success
        }
        Err(e) => {
            eprintln!("Store error: {}", e);
            RosterExitCode::StoreError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_register_collects_fields() {
        let args = strings(&[
            "register",
            "--username",
            "bob",
            "--password",
            "pw1",
            "--email",
            "bob@x.com",
            "--firstname",
            "Bob",
            "--birthdate",
            "14.03.1990",
            "--gender",
            "male",
        ]);

        let Action::Register(candidate) = parse_args(&args).unwrap() else {
            panic!("expected register action");
        };
        assert_eq!(candidate.username, "bob");
        assert_eq!(candidate.birthdate.format(BIRTHDATE_FORMAT).to_string(), "14.03.1990");
        assert_eq!(candidate.gender, roster_core::Gender::Male);
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(parse_args(&strings(&["register", "--nope", "x"])).is_err());
        assert!(parse_args(&strings(&["frobnicate"])).is_err());
        assert!(parse_args(&strings(&[])).is_err());
    }

    #[test]
    fn rendered_table_masks_the_password() {
        let candidate = NewRegistration::new("bob", "secret", "bob@x.com", "Bob");
        let record = {
            // Build a full record without going through a store.
            let mut rows: Vec<Registration> = Vec::new();
            let stamp = chrono::NaiveDateTime::parse_from_str(
                "2025-06-01 12:00:00",
                roster_core::record::TIMESTAMP_FORMAT,
            )
            .unwrap();
            rows.push(Registration {
                id: 1,
                username: candidate.username,
                password: candidate.password,
                email: candidate.email,
                lastname: String::new(),
                firstname: candidate.firstname,
                middlename: String::new(),
                birthdate: candidate.birthdate,
                phone: String::new(),
                gender: candidate.gender,
                registered_at: stamp,
            });
            rows
        };

        let table = render_table(&record);
        assert!(table.contains(PASSWORD_MASK));
        assert!(!table.contains("secret"));
    }
}
