//! Given steps for board gating BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::given;
use taskboard::domain::StageGroup;
use taskboard::seed::SeedTask;

/// Builds a seed record for scenario boards.
fn record(title: &str, group: StageGroup) -> SeedTask {
    SeedTask {
        title: title.to_owned(),
        description: format!("{title} description"),
        persona: "Intern".to_owned(),
        group,
    }
}

#[given(r#"a board seeded with tasks "{first}" and "{second}" in stage 1 and task "{third}" in stage 2"#)]
fn seed_two_stages(
    world: &mut BoardWorld,
    first: String,
    second: String,
    third: String,
) -> Result<(), eyre::Report> {
    let later = StageGroup::new(2)?;
    world.store.initialize(vec![
        record(&first, StageGroup::FIRST),
        record(&second, StageGroup::FIRST),
        record(&third, later),
    ]);
    Ok(())
}

#[given(r#"a board seeded with tasks "{first}", "{second}" and "{third}" all in stage 1"#)]
fn seed_single_stage(world: &mut BoardWorld, first: String, second: String, third: String) {
    world.store.initialize(vec![
        record(&first, StageGroup::FIRST),
        record(&second, StageGroup::FIRST),
        record(&third, StageGroup::FIRST),
    ]);
}
