//! Should I Sleep? - sleep-cycle calculator command-line interface

use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use should_i_sleep::adapters::{
    FileSleepStore, InMemorySleepStore, InMemoryUsageTracker, TracingUsageTracker,
};
use should_i_sleep::application::{
    CalculateSleepTimesCommand, CalculateSleepTimesHandler, CalculationOutcome,
    ClearUserDataHandler, DataExport, DeleteCalculationCommand, DeleteCalculationHandler,
    ExportUserDataHandler, GetPreferencesHandler, GetSleepHistoryHandler, ImportUserDataCommand,
    ImportUserDataHandler, SavePreferencesCommand, SavePreferencesHandler, SelectMoodCommand,
    SelectMoodHandler, SubmitFeedbackCommand, SubmitFeedbackHandler,
};
use should_i_sleep::config::{AppConfig, AppSettings, LogFormat, StorageBackend};
use should_i_sleep::domain::foundation::{ErrorCode, RecordId, UserId, ValidationError};
use should_i_sleep::domain::sleep::{
    CalculationDirection, FeedbackType, Mood, MoodKey, PreferenceUpdate, SleepError,
    SleepHistory, Theme, UserPreferences,
};
use should_i_sleep::ports::{SleepStore, UsageTracker};

#[derive(Parser)]
#[command(name = "should-i-sleep")]
#[command(about = "Find bed and wake times that line up with 90-minute sleep cycles", long_about = None)]
#[command(version)]
struct Cli {
    /// Signed-in user id (enables history and saved preferences)
    #[arg(short, long, global = true, value_parser = parse_user_id)]
    user: Option<UserId>,

    /// Current mood (defaults to the saved mood)
    #[arg(short, long, global = true, value_parser = parse_mood)]
    mood: Option<Mood>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// When should I wake up if I go to bed now (or at --at)?
    Wake {
        /// Bed time as HH:MM (defaults to the current local time)
        #[arg(long)]
        at: Option<String>,
    },

    /// When should I go to bed to wake up at --wake?
    Sleep {
        /// Desired wake time as HH:MM
        #[arg(long)]
        wake: String,
    },

    /// Change the selected mood
    Mood {
        #[command(subcommand)]
        action: MoodAction,
    },

    /// Show or save preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Show recent calculations (requires --user)
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Delete stored preferences and history
    Clear,

    /// Print all stored data as JSON
    Export,

    /// Restore data from a file written by `export`
    Import {
        /// Path to the export JSON
        file: PathBuf,
    },

    /// Send feedback about the app
    Feedback {
        /// bug, feature or general
        #[arg(long = "type", default_value = "general", value_parser = parse_feedback_type)]
        kind: FeedbackType,

        message: String,
    },
}

#[derive(Subcommand)]
enum MoodAction {
    /// Move to the next mood
    Next,
    /// Move to the previous mood
    Previous,
    /// Select a mood by name
    Set {
        #[arg(value_name = "MOOD", value_parser = parse_mood)]
        name: Mood,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Show current preferences
    Show,
    /// Save preferences (requires --user); unset flags keep their value
    Save {
        #[arg(long, value_parser = parse_theme)]
        theme: Option<Theme>,

        #[arg(long)]
        notifications: Option<bool>,

        #[arg(long)]
        auto_set_current_time: Option<bool>,

        #[arg(long)]
        preferred_sleep_hours: Option<u8>,

        #[arg(long)]
        bedtime_reminder: Option<bool>,

        /// Reminder time as HH:MM
        #[arg(long)]
        reminder_time: Option<String>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Remove one calculation by id
    Delete {
        #[arg(value_parser = parse_record_id)]
        id: RecordId,
    },
}

fn parse_user_id(s: &str) -> Result<UserId, ValidationError> {
    s.parse()
}

fn parse_mood(s: &str) -> Result<Mood, ValidationError> {
    s.parse()
}

fn parse_theme(s: &str) -> Result<Theme, ValidationError> {
    s.parse()
}

fn parse_feedback_type(s: &str) -> Result<FeedbackType, ValidationError> {
    s.parse()
}

fn parse_record_id(s: &str) -> Result<RecordId, uuid::Error> {
    s.parse()
}

/// Ports wired from configuration.
struct Services {
    store: Arc<dyn SleepStore>,
    usage_tracker: Arc<dyn UsageTracker>,
    history_limit: usize,
}

impl Services {
    fn from_config(config: &AppConfig) -> Self {
        let store: Arc<dyn SleepStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(InMemorySleepStore::new()),
            StorageBackend::File => Arc::new(FileSleepStore::new(&config.storage.data_dir)),
        };
        let usage_tracker: Arc<dyn UsageTracker> = if config.features.enable_analytics {
            Arc::new(TracingUsageTracker::new())
        } else {
            Arc::new(InMemoryUsageTracker::new())
        };
        tracing::debug!(
            store = store.name(),
            usage_tracker = usage_tracker.name(),
            "Services wired"
        );

        Self {
            store,
            usage_tracker,
            history_limit: config.storage.history_limit,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[{}] {}", ErrorCode::ConfigError, e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.app);

    let services = Services::from_config(&config);
    match run(cli, &services, Local::now().naive_local()).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if config.show_error_details() {
                eprintln!("[{}] {} ({:?})", e.code(), e, e);
            } else {
                eprintln!("[{}] {}", e.code(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<AppConfig, should_i_sleep::config::ConfigError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

/// Logs go to stderr so that stdout stays clean for results.
fn init_tracing(settings: &AppSettings) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match settings.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Sleep(#[from] SleepError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            CliError::Sleep(e) => e.code(),
            CliError::Read { .. } => ErrorCode::StorageError,
            CliError::Output(_) => ErrorCode::InternalError,
        }
    }
}

/// Runs one command and returns what goes to stdout.
///
/// `now` is the local wall-clock time, read once per invocation.
async fn run(cli: Cli, services: &Services, now: NaiveDateTime) -> Result<String, CliError> {
    let user_id = cli.user;

    match cli.command {
        Commands::Wake { at } => {
            let at = at.unwrap_or_else(|| now.format("%H:%M").to_string());
            let mood = resolve_mood(services, cli.mood, user_id.as_ref()).await?;
            let outcome = calculate(services, user_id, mood, now, Some(at), None).await?;
            emit(cli.json, &outcome, render_outcome)
        }
        Commands::Sleep { wake } => {
            let mood = resolve_mood(services, cli.mood, user_id.as_ref()).await?;
            let outcome = calculate(services, user_id, mood, now, None, Some(wake)).await?;
            emit(cli.json, &outcome, render_outcome)
        }
        Commands::Mood { action } => {
            let key = match action {
                MoodAction::Next => MoodKey::Next,
                MoodAction::Previous => MoodKey::Previous,
                MoodAction::Set { name } => MoodKey::Select(name),
            };
            let handler =
                SelectMoodHandler::new(services.store.clone(), services.usage_tracker.clone());
            let result = handler.handle(SelectMoodCommand { user_id, key }).await?;
            emit(cli.json, &result.mood, |mood| {
                format!("Mood: {}\nPersonalized Tip: {}\n", mood, mood.suggestion())
            })
        }
        Commands::Prefs { action } => match action {
            PrefsAction::Show => {
                let prefs = GetPreferencesHandler::new(services.store.clone())
                    .handle(user_id.as_ref())
                    .await?;
                emit(cli.json, &prefs, render_preferences)
            }
            PrefsAction::Save {
                theme,
                notifications,
                auto_set_current_time,
                preferred_sleep_hours,
                bedtime_reminder,
                reminder_time,
            } => {
                let update = PreferenceUpdate {
                    mood: cli.mood,
                    theme,
                    notifications,
                    auto_set_current_time,
                    preferred_sleep_hours,
                    bedtime_reminder,
                    reminder_time,
                };
                let handler = SavePreferencesHandler::new(
                    services.store.clone(),
                    services.usage_tracker.clone(),
                );
                let prefs = handler
                    .handle(SavePreferencesCommand { user_id, update })
                    .await?;
                emit(cli.json, &prefs, |prefs| {
                    format!("Preferences saved successfully!\n{}", render_preferences(prefs))
                })
            }
        },
        Commands::History { action } => {
            let user_id = user_id.ok_or(SleepError::SignInRequired)?;
            match action {
                None => {
                    let history =
                        GetSleepHistoryHandler::new(services.store.clone(), services.history_limit)
                            .handle(&user_id)
                            .await?;
                    emit(cli.json, history.entries(), |_| render_history(&history))
                }
                Some(HistoryAction::Delete { id }) => {
                    DeleteCalculationHandler::new(
                        services.store.clone(),
                        services.usage_tracker.clone(),
                        services.history_limit,
                    )
                    .handle(DeleteCalculationCommand {
                        user_id,
                        record_id: id,
                    })
                    .await?;
                    Ok(unless_json(cli.json, format!("Calculation {} deleted.\n", id)))
                }
            }
        }
        Commands::Clear => {
            let user_id = user_id.ok_or(SleepError::SignInRequired)?;
            ClearUserDataHandler::new(services.store.clone(), services.usage_tracker.clone())
                .handle(&user_id)
                .await?;
            Ok(unless_json(cli.json, format!("Stored data for {} cleared.\n", user_id)))
        }
        Commands::Export => {
            let export = ExportUserDataHandler::new(services.store.clone(), services.history_limit)
                .handle(user_id)
                .await?;
            Ok(format!("{}\n", serde_json::to_string_pretty(&export)?))
        }
        Commands::Import { file } => {
            let data = read_export(&file).await?;
            let summary = ImportUserDataHandler::new(
                services.store.clone(),
                services.usage_tracker.clone(),
                services.history_limit,
            )
            .handle(ImportUserDataCommand { user_id, data })
            .await?;
            Ok(unless_json(
                cli.json,
                format!(
                    "Imported preferences and {} history records.\n",
                    summary.history_records
                ),
            ))
        }
        Commands::Feedback { kind, message } => {
            let feedback = SubmitFeedbackHandler::new(services.usage_tracker.clone())
                .handle(SubmitFeedbackCommand {
                    user_id,
                    kind,
                    message,
                })
                .await?;
            emit(cli.json, &feedback, |_| "Thank you for your feedback!\n".to_string())
        }
    }
}

/// Confirmation text, empty in JSON mode.
fn unless_json(json: bool, text: String) -> String {
    if json {
        String::new()
    } else {
        text
    }
}

async fn read_export(file: &Path) -> Result<DataExport, CliError> {
    let text = tokio::fs::read_to_string(file)
        .await
        .map_err(|source| CliError::Read {
            path: file.display().to_string(),
            source,
        })?;
    serde_json::from_str(&text).map_err(|e| {
        CliError::Sleep(ValidationError::invalid_format("import", e.to_string()).into())
    })
}

/// An explicit `--mood` wins over the saved one.
async fn resolve_mood(
    services: &Services,
    explicit: Option<Mood>,
    user_id: Option<&UserId>,
) -> Result<Mood, SleepError> {
    match explicit {
        Some(mood) => Ok(mood),
        None => Ok(GetPreferencesHandler::new(services.store.clone())
            .handle(user_id)
            .await?
            .mood),
    }
}

async fn calculate(
    services: &Services,
    user_id: Option<UserId>,
    mood: Mood,
    now: NaiveDateTime,
    current_time: Option<String>,
    wake_time: Option<String>,
) -> Result<CalculationOutcome, SleepError> {
    let handler = CalculateSleepTimesHandler::new(
        services.store.clone(),
        services.usage_tracker.clone(),
        services.history_limit,
    );
    handler
        .handle(CalculateSleepTimesCommand {
            user_id,
            mood,
            current_time,
            wake_time,
            anchor_date: now.date(),
        })
        .await
}

fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String, CliError> {
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
    } else {
        Ok(text(value))
    }
}

fn render_outcome(outcome: &CalculationOutcome) -> String {
    let reference = outcome.anchor.date();
    let mut lines = vec![
        outcome.direction.heading().to_string(),
        outcome.direction.description().to_string(),
        String::new(),
    ];
    for option in &outcome.options {
        lines.push(format!(
            "  {:>8}  ({})  {}",
            option.formatted_time(),
            option.time.day_label(reference),
            option.summary()
        ));
    }
    lines.push(String::new());
    lines.push(format!("Personalized Tip: {}", outcome.suggestion));
    lines.join("\n") + "\n"
}

fn render_preferences(prefs: &UserPreferences) -> String {
    let mut lines = vec![
        format!("mood:                  {}", prefs.mood),
        format!("theme:                 {}", prefs.theme),
        format!("notifications:         {}", prefs.notifications),
        format!("auto_set_current_time: {}", prefs.auto_set_current_time),
        format!("preferred_sleep_hours: {}", prefs.preferred_sleep_hours),
        format!("bedtime_reminder:      {}", prefs.bedtime_reminder),
        format!("reminder_time:         {}", prefs.reminder_time),
    ];
    if let Some(updated) = &prefs.last_updated {
        lines.push(format!("last_updated:          {}", updated.to_rfc3339()));
    }
    lines.join("\n") + "\n"
}

/// One line per record, starting with the id `history delete` takes.
fn render_history(history: &SleepHistory) -> String {
    if history.is_empty() {
        return "No calculations yet.\n".to_string();
    }
    let mut out = String::new();
    for record in history.entries() {
        let label = match record.input_type {
            CalculationDirection::WakeTimes => "bed at",
            CalculationDirection::SleepTimes => "wake at",
        };
        out.push_str(&format!(
            "{}  {}  {} {}  ({})\n",
            record.id,
            record.timestamp.as_datetime().with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            label,
            record.input_value,
            record.mood
        ));
    }
    out
}
