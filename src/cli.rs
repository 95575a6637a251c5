use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::internal::config::AppConfig;
use crate::internal::dashboard::{
    Command as DashboardCommand, CommandOutput, Dashboard, DashboardError, DashboardView,
};
use crate::internal::forms::{college_form, student_form, FormData};
use crate::internal::gateway::HttpGateway;
use crate::internal::ui::{Confirm, ConsoleNotifier, FixedAnswer, LoadingIndicator, StdinConfirm};

pub fn build_cli() -> Command {
    // Leak the version string to get a 'static lifetime
    let version: &'static str = Box::leak(
        crate::internal::config::get_version_info().into_boxed_str()
    );

    Command::new("student-dashboard")
        .version(version)
        .about("Manage student and college records through their REST services")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to config file (default: ./config.yaml, /etc/student-dashboard/config.yaml)")
        )
        .arg(
            Arg::new("student-url")
                .long("student-url")
                .global(true)
                .help("Student service base URL (e.g., http://localhost:9002)")
        )
        .arg(
            Arg::new("college-url")
                .long("college-url")
                .global(true)
                .help("College service base URL (e.g., http://localhost:9001)")
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .global(true)
                .value_parser(clap::value_parser!(u64))
                .help("Request timeout in milliseconds")
        )
        .arg(
            Arg::new("notification-ms")
                .long("notification-ms")
                .global(true)
                .value_parser(clap::value_parser!(u64))
                .help("How long notifications stay visible, 0 to keep them")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log level or filter directive (e.g., debug, student_dashboard=trace)")
        )
        .subcommand(
            Command::new("student")
                .about("Student records")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add a student")
                        .arg(Arg::new("name").long("name").help("Student name"))
                        .arg(Arg::new("address").long("address").help("Postal address"))
                        .arg(Arg::new("age").long("age").help("Age in years"))
                        .arg(Arg::new("college-id").long("college-id").help("College the student attends"))
                )
                .subcommand(Command::new("list").about("List every student"))
                .subcommand(
                    Command::new("get")
                        .about("Show one student by name")
                        .arg(Arg::new("name").required(true))
                )
                .subcommand(
                    Command::new("by-college")
                        .about("List the students of a college")
                        .arg(Arg::new("college-id").required(true))
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a student by id")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name").help("Student name, shown in the confirmation prompt"))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .short('y')
                                .action(ArgAction::SetTrue)
                                .help("Skip the confirmation prompt")
                        )
                )
        )
        .subcommand(
            Command::new("college")
                .about("College records")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add a college")
                        .arg(Arg::new("name").long("name").help("College name"))
                        .arg(Arg::new("address").long("address").help("Postal address"))
                        .arg(Arg::new("university").long("university").help("Affiliated university"))
                )
        )
}

/// Load configuration and apply command line overrides.
pub fn parse_config(matches: &ArgMatches) -> anyhow::Result<AppConfig> {
    let config_file = matches.get_one::<String>("config").map(String::as_str);
    let mut config = AppConfig::load(config_file).context("Failed to load configuration")?;

    if let Some(url) = matches.get_one::<String>("student-url") {
        config.services.student_service_url = url.clone();
    }
    if let Some(url) = matches.get_one::<String>("college-url") {
        config.services.college_service_url = url.clone();
    }
    if let Some(timeout_ms) = matches.get_one::<u64>("timeout-ms") {
        config.gateway.timeout_ms = *timeout_ms;
    }
    if let Some(duration_ms) = matches.get_one::<u64>("notification-ms") {
        config.notifications.duration_ms = *duration_ms;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn value<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches.get_one::<String>(id).map(String::as_str).unwrap_or("")
}

/// Map `student add` flags onto the add-student form inputs.
pub fn student_form_from(matches: &ArgMatches) -> FormData {
    FormData::new()
        .with(student_form::NAME_INPUT, value(matches, "name"))
        .with(student_form::ADDRESS_INPUT, value(matches, "address"))
        .with(student_form::AGE_INPUT, value(matches, "age"))
        .with(student_form::COLLEGE_ID_INPUT, value(matches, "college-id"))
}

/// Map `college add` flags onto the add-college form inputs.
pub fn college_form_from(matches: &ArgMatches) -> FormData {
    FormData::new()
        .with(college_form::NAME_INPUT, value(matches, "name"))
        .with(college_form::ADDRESS_INPUT, value(matches, "address"))
        .with(college_form::UNIVERSITY_INPUT, value(matches, "university"))
}

fn skips_confirmation(matches: &ArgMatches) -> bool {
    matches!(
        matches.subcommand(),
        Some(("student", sub)) if matches!(sub.subcommand(), Some(("delete", del)) if del.get_flag("yes"))
    )
}

/// Dashboard failures have already been shown to the user as a banner.
pub fn already_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DashboardError>().is_some()
}

/// Run the selected subcommand against the configured services.
pub async fn execute(matches: &ArgMatches, config: &AppConfig) -> anyhow::Result<()> {
    let endpoints = config.endpoints().context("Invalid service URLs")?;
    let gateway = HttpGateway::new(&config.gateway)?;
    let confirm: Arc<dyn Confirm> = if skips_confirmation(matches) {
        Arc::new(FixedAnswer(true))
    } else {
        Arc::new(StdinConfirm)
    };

    let dashboard = Dashboard::new(
        Arc::new(gateway),
        endpoints,
        Arc::new(ConsoleNotifier),
        confirm,
        config.notifications.duration(),
    )?;
    let mut view = DashboardView::default();

    match matches.subcommand() {
        Some(("student", sub)) => match sub.subcommand() {
            Some(("add", args)) => {
                let mut form = student_form_from(args);
                view.submit_button = LoadingIndicator::new("Add Student");
                let student = dashboard.save_student(&mut form, &mut view.submit_button).await?;
                println!("{}", student.details());
            }
            Some(("list", _)) => {
                let result = dashboard.dispatch(DashboardCommand::ListStudents, &mut view).await;
                println!("{}", view.table.render());
                result?;
            }
            Some(("get", args)) => {
                let command = DashboardCommand::ViewStudent {
                    name: value(args, "name").to_string(),
                };
                if let CommandOutput::StudentDetails(details) = dashboard.dispatch(command, &mut view).await? {
                    println!("{}", details);
                }
            }
            Some(("by-college", args)) => {
                let result = dashboard
                    .fetch_students_from_input(value(args, "college-id"), &mut view.table)
                    .await;
                if view.table.is_visible() {
                    println!("{}", view.table.render());
                }
                result?;
            }
            Some(("delete", args)) => {
                let command = DashboardCommand::DeleteStudent {
                    id: value(args, "id").to_string(),
                    name: args.get_one::<String>("name").cloned(),
                };
                dashboard.dispatch(command, &mut view).await?;
            }
            _ => return Err(anyhow!("unknown student command")),
        },
        Some(("college", sub)) => match sub.subcommand() {
            Some(("add", args)) => {
                let mut form = college_form_from(args);
                view.submit_button = LoadingIndicator::new("Add College");
                dashboard.save_college(&mut form, &mut view.submit_button).await?;
            }
            _ => return Err(anyhow!("unknown college command")),
        },
        _ => return Err(anyhow!("no command given")),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn student_add_flags_fill_the_form() {
        let matches = build_cli().get_matches_from([
            "student-dashboard", "student", "add", "--name", "Alice", "--address", "1 Main St",
            "--age", "20", "--college-id", "5",
        ]);
        let (_, student) = matches.subcommand().unwrap();
        let (_, add) = student.subcommand().unwrap();

        let form = student_form_from(add);
        assert_eq!(form.get(student_form::NAME_INPUT), Some("Alice"));
        assert_eq!(form.get(student_form::COLLEGE_ID_INPUT), Some("5"));
    }

    #[test]
    fn missing_flags_leave_inputs_blank() {
        let matches = build_cli().get_matches_from(["student-dashboard", "college", "add", "--name", "City"]);
        let (_, college) = matches.subcommand().unwrap();
        let (_, add) = college.subcommand().unwrap();

        let form = college_form_from(add);
        assert_eq!(form.get(college_form::UNIVERSITY_INPUT), Some(""));
    }

    #[test]
    fn yes_flag_skips_confirmation() {
        let with_yes = build_cli().get_matches_from(["student-dashboard", "student", "delete", "7", "--yes"]);
        let without = build_cli().get_matches_from(["student-dashboard", "student", "delete", "7"]);
        assert!(skips_confirmation(&with_yes));
        assert!(!skips_confirmation(&without));
    }

    #[test]
    fn dashboard_failures_are_not_reported_twice() {
        let handled = anyhow::Error::from(DashboardError::MissingInput("collegeId"));
        let unhandled = anyhow!("Invalid service URLs");
        assert!(already_reported(&handled));
        assert!(!already_reported(&unhandled));
    }

    #[test]
    fn global_overrides_are_parsed() {
        let matches = build_cli().get_matches_from([
            "student-dashboard", "--timeout-ms", "250", "student", "list",
        ]);
        assert_eq!(matches.get_one::<u64>("timeout-ms"), Some(&250));
    }
}
