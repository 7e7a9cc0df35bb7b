//! Collabcut CLI - session-scoped team collaboration.

use clap::Parser;
use collabcut::cli::{
    ChatCommands, Cli, Commands, DecisionCommands, DocCommands, ProfileCommands, ProjectCommands,
    SessionLine, TaskCommands, split_line,
};
use collabcut::commands::{App, Output, TaskQuery, UploadRequest};
use collabcut::config::{self, ConfigOverrides, OutputFormat, ToggleBehavior};
use collabcut::forms::{DecisionForm, LoginForm, ProfileForm, ProjectForm, RegisterForm, TaskForm};
use collabcut::models::TaskStatus;
use collabcut::{Error, Result};
use std::io::{self, BufRead};
use std::process;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "COLLAB_LOG";

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let mut human = cli.human_readable;

    let result = build_app(&cli).and_then(|(mut app, format)| {
        human = format == OutputFormat::Human;
        run_command(cli.command, &mut app, human)
    });

    if let Err(e) = result {
        report_error(&e, human);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_app(cli: &Cli) -> Result<(App, OutputFormat)> {
    let mut overrides = ConfigOverrides::new();
    if cli.human_readable {
        overrides = overrides.with_output_format(OutputFormat::Human);
    }
    if cli.no_seed {
        overrides = overrides.with_seed(false);
    }
    if let Some(ref user) = cli.user {
        if user.trim().is_empty() {
            return Err(Error::InvalidInput("--user cannot be empty".to_string()));
        }
        overrides = overrides.with_current_user(user.clone());
    }
    if let Some(ref behavior) = cli.toggle_behavior {
        let parsed = ToggleBehavior::parse(behavior).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Unknown toggle behavior: {} (expected reset or restore)",
                behavior
            ))
        })?;
        overrides = overrides.with_toggle_behavior(parsed);
    }

    let resolved = config::resolve_config(cli.config_path.as_deref(), &overrides)?;
    let app = App::from_config(&resolved)?;
    Ok((app, resolved.output_format()))
}

fn run_command(command: Commands, app: &mut App, human: bool) -> Result<()> {
    match command {
        Commands::Project { command } => match command {
            ProjectCommands::List => output(&app.project_list()?, human),
            ProjectCommands::Show { id } => output(&app.project_show(&id)?, human),
            ProjectCommands::Create {
                name,
                description,
                methodology,
            } => {
                let form = ProjectForm {
                    name,
                    description,
                    methodology,
                };
                output(&app.project_create(&form)?, human);
            }
            ProjectCommands::Progress { id } => output(&app.project_progress(&id)?, human),
        },

        Commands::Task { command } => match command {
            TaskCommands::List {
                project,
                mine,
                status,
            } => {
                let query = TaskQuery {
                    project_id: project,
                    mine,
                    status: status.as_deref().map(parse_status).transpose()?,
                };
                output(&app.task_list(&query)?, human);
            }
            TaskCommands::Show { id } => output(&app.task_show(&id)?, human),
            TaskCommands::Create {
                project,
                title,
                assignee,
                description,
                due,
            } => {
                let form = TaskForm {
                    title,
                    description: description.unwrap_or_default(),
                    assignee_ids: assignee,
                    due_date: due.unwrap_or_default(),
                };
                output(&app.task_create(&project, &form)?, human);
            }
            TaskCommands::Toggle { id } => output(&app.task_toggle(&id)?, human),
            TaskCommands::Status { id, status } => {
                let status = parse_status(&status)?;
                output(&app.task_set_status(&id, status)?, human);
            }
        },

        Commands::Decision { command } => match command {
            DecisionCommands::List { project, tag } => {
                output(&app.decision_list(project.as_deref(), tag.as_deref())?, human)
            }
            DecisionCommands::Create {
                project,
                title,
                description,
                made_by,
                outcomes,
                tags,
            } => {
                let form = DecisionForm {
                    title,
                    description,
                    made_by,
                    project_id: project,
                    outcomes,
                    tags,
                };
                output(&app.decision_create(&form)?, human);
            }
        },

        Commands::Chat { command } => match command {
            ChatCommands::Channels => output(&app.chat_channels()?, human),
            ChatCommands::History { channel } => output(&app.chat_history(&channel)?, human),
            ChatCommands::Send { channel, content } => {
                output(&app.chat_send(&channel, &content)?, human)
            }
        },

        Commands::Doc { command } => match command {
            DocCommands::List { project } => output(&app.doc_list(project.as_deref())?, human),
            DocCommands::Upload {
                path,
                project,
                size,
                doc_type,
            } => {
                let mut request = UploadRequest::from_path(&path, &project)?;
                if let Some(size) = size {
                    request.size = size;
                }
                request.doc_type = doc_type;
                output(&app.doc_upload(&request)?, human);
            }
        },

        Commands::Login { email, password } => {
            output(&app.login(&LoginForm { email, password })?, human)
        }

        Commands::Register {
            name,
            email,
            password,
            confirm,
            profile_type,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password: confirm,
                profile_type,
            };
            output(&app.register(&form)?, human);
        }

        Commands::Logout => output(&app.logout(), human),

        Commands::Profile { command } => match command {
            ProfileCommands::Show => output(&app.profile_show()?, human),
            ProfileCommands::Update {
                name,
                email,
                profile_type,
                bio,
                current_password,
                new_password,
                confirm_new_password,
            } => {
                let current = app.profile_show()?.user;
                let form = ProfileForm {
                    name: name.unwrap_or(current.name),
                    email: email.unwrap_or(current.email),
                    profile_type: profile_type
                        .unwrap_or_else(|| current.profile_type.as_str().to_string()),
                    bio: bio.or(current.bio).unwrap_or_default(),
                    current_password,
                    new_password,
                    confirm_new_password,
                };
                output(&app.profile_update(&form)?, human);
            }
        },

        Commands::Nav { current } => output(&app.nav(&current), human),

        Commands::Navigate { path } => output(&app.navigate(&path)?, human),

        Commands::Session => run_session(app, human)?,
    }
    Ok(())
}

/// Run commands read from stdin against one session until EOF or `exit`.
fn run_session(app: &mut App, human: bool) -> Result<()> {
    tracing::info!("interactive session started");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        let args = match split_line(trimmed) {
            Ok(args) => args,
            Err(e) => {
                report_error(&e, human);
                continue;
            }
        };
        let parsed = match SessionLine::try_parse_from(args) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("{}", e.render());
                continue;
            }
        };
        let line_human = human || parsed.human_readable;
        let result = match parsed.command {
            Commands::Session => Err(Error::InvalidInput(
                "Already in an interactive session".to_string(),
            )),
            command => run_command(command, app, line_human),
        };
        if let Err(e) = result {
            report_error(&e, line_human);
        }
    }
    tracing::info!("interactive session ended");
    Ok(())
}

fn parse_status(raw: &str) -> Result<TaskStatus> {
    raw.parse::<TaskStatus>().map_err(Error::InvalidInput)
}

fn report_error(e: &Error, human: bool) {
    match (e, human) {
        (Error::Validation(errors), true) => {
            eprintln!("Error: Validation failed");
            for field in errors.errors() {
                eprintln!("  {}: {}", field.field, field.message);
            }
        }
        (Error::Validation(errors), false) => {
            let err = serde_json::json!({
                "error": "Validation failed",
                "fields": errors,
            });
            eprintln!("{}", err);
        }
        (Error::Unauthenticated { redirect }, false) => {
            let err = serde_json::json!({
                "error": e.to_string(),
                "redirect": redirect,
            });
            eprintln!("{}", err);
        }
        (_, true) => eprintln!("Error: {}", e),
        (_, false) => eprintln!("{}", serde_json::json!({ "error": e.to_string() })),
    }
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
