//! Then steps for board gating BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;
use taskboard::domain::{TaskId, TaskView};
use taskboard::store::TaskStoreError;

/// Looks up a task snapshot by title.
fn find_task(world: &BoardWorld, title: &str) -> Result<TaskView, eyre::Report> {
    world
        .store
        .get_all()
        .into_iter()
        .find(|view| view.title == title)
        .ok_or_else(|| eyre::eyre!("no task titled \"{title}\" on the board"))
}

#[then(r#"the active tasks are "{first}" and "{second}""#)]
fn active_pair(world: &BoardWorld, first: String, second: String) -> Result<(), eyre::Report> {
    let active = world.active_titles();
    eyre::ensure!(
        active == vec![first, second],
        "unexpected active tasks: {active:?}"
    );
    Ok(())
}

#[then(r#"the only active task is "{title}""#)]
fn single_active(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let active = world.active_titles();
    eyre::ensure!(active == vec![title], "unexpected active tasks: {active:?}");
    Ok(())
}

#[then(r#"task "{title}" is not assigned"#)]
fn task_not_assigned(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let view = find_task(world, &title)?;
    eyre::ensure!(!view.assigned, "task \"{title}\" holds a slot");
    Ok(())
}

#[then(r#"task "{title}" remains incomplete"#)]
fn task_remains_incomplete(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let view = find_task(world, &title)?;
    eyre::ensure!(!view.completed, "task \"{title}\" was completed");
    Ok(())
}

#[then("the completion is rejected as gated")]
fn completion_gated(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_complete
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing completion result in scenario world"))?;
    eyre::ensure!(
        matches!(result, Err(TaskStoreError::GatingViolation { .. })),
        "expected a gating violation, found {result:?}"
    );
    Ok(())
}

#[then("the creation is rejected as gated")]
fn creation_gated(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result in scenario world"))?;
    eyre::ensure!(
        matches!(result, Err(TaskStoreError::GatingViolation { .. })),
        "expected a gating violation, found {result:?}"
    );
    Ok(())
}

#[then("the new task receives id {id:u64}")]
fn created_with_id(world: &BoardWorld, id: u64) -> Result<(), eyre::Report> {
    let result = world
        .last_create
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result in scenario world"))?;
    let view = result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected creation failure: {err}"))?;
    eyre::ensure!(
        view.id == TaskId::new(id),
        "expected id {id}, found {}",
        view.id
    );
    Ok(())
}

#[then(r#"the completed tasks are "{first}" and "{second}""#)]
fn completed_pair(world: &BoardWorld, first: String, second: String) -> Result<(), eyre::Report> {
    let completed: Vec<String> = world
        .store
        .get_completed()
        .into_iter()
        .map(|view| view.title)
        .collect();
    eyre::ensure!(
        completed == vec![first, second],
        "unexpected completed tasks: {completed:?}"
    );
    Ok(())
}
