use std::io::Write;
use std::sync::Arc;

use snafu::{prelude::*, Whatever};
use wod_timer::console::config::{self, Configuration};
use wod_timer::console::outbound::motivational_message;
use wod_timer::console::{
    drive, notice_writer, prompt_writer, stdin_lines, CelebrationNotifier, ConsoleObserver,
    Controller, ObserverGroup, RenderFormat, WorkoutConfiguration,
};
use wod_timer::domain::app::{ApplicationCore, WorkoutSelection};
use wod_timer::domain::engine::SessionOutcome;
use wod_timer::domain::entity::{TimerConfig, WorkoutPlan};
use wod_timer::domain::outbound::SessionObserver;
use wod_timer::domain::repository::WorkoutRepository;

use crate::cli::{Arguments, Command};

const APP_NAME: &str = "wod-timer";

pub async fn bootstrap(arg: Arguments) -> Result<(), Whatever> {
    let configuration = configuration(&arg)?;
    let repository: Arc<dyn WorkoutRepository> = Arc::new(WorkoutConfiguration::new(configuration));

    let selection = match &arg.command {
        Command::List => return list(repository).await,
        Command::Run { name } => WorkoutSelection::Named(name.clone()),
        Command::Quick(quick) => WorkoutSelection::Adhoc(WorkoutPlan::new(
            "quick",
            quick.kind,
            TimerConfig::from(quick),
        )),
    };

    let core = ApplicationCore::setup(observer(&arg), repository, selection)
        .await
        .whatever_context("Could not setup application core")?;

    run(core, format(&arg)).await
}

fn configuration(arg: &Arguments) -> Result<Arc<Configuration>, Whatever> {
    let res = match &arg.config {
        Some(path) => config::load_with_path(path),
        None => config::load_with_xdg(APP_NAME),
    };

    let configuration = res.whatever_context("Could not load configuration")?;
    Ok(Arc::new(configuration))
}

fn format(arg: &Arguments) -> RenderFormat {
    if arg.json {
        RenderFormat::Json
    } else {
        RenderFormat::Text
    }
}

fn observer(arg: &Arguments) -> Arc<dyn SessionObserver> {
    let mut group = ObserverGroup::new().with(Arc::new(ConsoleObserver::stdout(format(arg))));
    if !arg.no_notify {
        group = group.with(Arc::new(CelebrationNotifier::new(APP_NAME.to_owned())));
    }
    Arc::new(group)
}

async fn list(repository: Arc<dyn WorkoutRepository>) -> Result<(), Whatever> {
    let workouts = match repository.workouts().await {
        Ok(workouts) => workouts,
        Err(err) => whatever!("Could not list workouts: {err}"),
    };

    for plan in workouts {
        println!("{:<24} {:<8} {}", plan.name, plan.variant.name(), plan.summary());
        if let Some(description) = &plan.description {
            println!("{:<24} {description}", "");
        }
    }
    Ok(())
}

async fn run(core: ApplicationCore, format: RenderFormat) -> Result<(), Whatever> {
    let ApplicationCore {
        plan,
        control,
        query,
        completion,
    } = core;

    let mut notice = notice_writer(format);
    writeln!(notice, "{} ({}): {}", plan.name, plan.variant, plan.summary())
        .whatever_context("Could not write to terminal")?;
    writeln!(notice, "Controls: enter/p play or pause, r mark round, f finish, q quit")
        .whatever_context("Could not write to terminal")?;

    let controller = Controller::new(stdin_lines(), control, query, prompt_writer(format));
    let outcome = drive(controller, completion)
        .await
        .whatever_context("Could not run the workout")?;

    let line = match outcome {
        Some(SessionOutcome::Completed { result }) => motivational_message(result),
        Some(SessionOutcome::Stopped) => return Ok(()),
        None => "Workout abandoned",
    };
    writeln!(notice, "{line}").whatever_context("Could not write to terminal")?;
    Ok(())
}
