use crate::narrator::LogKind;
use crate::session::{Run, RunError};

/// Insertion sort: walk the value at `i` left until the value before it is
/// not larger.
///
/// The outer loop starts at 0, so the first pass lifts the first value,
/// compares it against nothing and settles it. Pass labels count from 0 to
/// match.
pub(super) async fn sort(run: &Run) -> Result<(), RunError> {
    let n = run.len()?;

    for i in 0..n {
        let value = run.step(|board| {
            board.stats.set_pass(i);
            let value = board.sequence.get(i);
            board.log.log(format!("Inserting {value}..."), LogKind::Plain);
            board.sequence.set_swapping(i, true);
            value
        })?;
        run.full().await;

        let mut j = i;
        while j > 0 {
            let left = run.step(|board| {
                let left = board.sequence.get(j - 1);
                board.stats.record_comparison();
                board.sequence.set_comparing(j - 1, true);
                board.step = format!("Comparing {value} with {left}");
                left
            })?;
            run.half().await;

            if left <= value {
                run.step(|board| {
                    board
                        .log
                        .log(format!("{value} sits after {left}"), LogKind::Plain);
                    board.sequence.set_comparing(j - 1, false);
                })?;
                break;
            }

            run.step(|board| {
                board.stats.record_swap();
                board
                    .log
                    .log(format!("Shift: {left} moves right"), LogKind::Swap);
                board.sequence.swap(j - 1, j);
                board.sequence.set_swapping(j, false);
                board.sequence.set_swapping(j - 1, true);
            })?;
            run.full().await;
            run.step(|board| board.sequence.set_comparing(j - 1, false))?;
            j -= 1;
        }

        run.step(|board| {
            for k in 0..=i {
                board.sequence.mark_settled(k);
            }
            board.sequence.set_swapping(j, false);
            board.stats.set_progress(i + 1, n);
            board.refresh_snapshot();
        })?;
    }

    Ok(())
}
