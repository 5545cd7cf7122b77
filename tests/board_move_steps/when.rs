//! When steps for board move BDD scenarios.

use super::world::{BoardMoveWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::board::{domain::ColumnId, services::MoveRequest};

#[when(r#"task {source_index:u64} of "{source}" is dropped at position {destination_index:u64} of "{destination}""#)]
fn drop_task(
    world: &mut BoardMoveWorld,
    source_index: u64,
    source: String,
    destination_index: u64,
    destination: String,
) -> Result<(), eyre::Report> {
    let request = MoveRequest::new(
        ColumnId::new(source)?,
        usize::try_from(source_index)?,
        ColumnId::new(destination)?,
        usize::try_from(destination_index)?,
    );
    let service = world.service()?;
    let result = run_async(service.move_task(&request));
    world.last_move = Some(result);
    Ok(())
}
