//! Given steps for board move BDD scenarios.

use super::world::{BoardMoveWorld, split_ids};
use rstest_bdd_macros::given;
use taskboard::board::domain::{BoardLayout, ColumnId};

#[given("a board with unbounded columns")]
fn unbounded_board(world: &mut BoardMoveWorld) {
    world.layout = BoardLayout::default();
}

#[given(r#"a board whose "{column}" column holds at most {capacity:u64} tasks"#)]
fn bounded_board(
    world: &mut BoardMoveWorld,
    column: String,
    capacity: u64,
) -> Result<(), eyre::Report> {
    let limit = usize::try_from(capacity)?;
    world.layout = BoardLayout::default().with_capacity(&ColumnId::new(column)?, limit)?;
    Ok(())
}

#[given(r#"column "{column}" holds tasks "{tasks}""#)]
fn column_holds_tasks(world: &mut BoardMoveWorld, column: String, tasks: String) {
    for task_id in split_ids(&tasks) {
        world.add_record(task_id, &column);
    }
}
