use crate::narrator::LogKind;
use crate::session::{Run, RunError};

/// Selection sort: scan `[i + 1, n)` for the smallest value, then swap it
/// into position `i`.
///
/// The running minimum carries the swapping marker while the scan moves on.
pub(super) async fn sort(run: &Run) -> Result<(), RunError> {
    let n = run.len()?;

    for i in 0..n {
        run.step(|board| {
            board.stats.set_pass(i + 1);
            board.sequence.set_swapping(i, true);
            board.log.log(
                format!("New search: finding smallest from index {i}"),
                LogKind::Plain,
            );
        })?;

        let mut min_idx = i;
        for j in i + 1..n {
            let (candidate, current_min) = run.step(|board| {
                let (candidate, current_min) =
                    (board.sequence.get(j), board.sequence.get(min_idx));
                board.sequence.set_comparing(j, true);
                board.stats.record_comparison();
                board.step = format!("Is {candidate} smaller than {current_min}?");
                (candidate, current_min)
            })?;
            run.half().await;

            let found = candidate < current_min;
            run.step(|board| {
                if found {
                    board
                        .log
                        .log(format!("New minimum found: {candidate}"), LogKind::Plain);
                    if min_idx != i {
                        board.sequence.set_swapping(min_idx, false);
                    }
                    board.sequence.set_swapping(j, true);
                }
                board.sequence.set_comparing(j, false);
            })?;
            if found {
                min_idx = j;
            }
        }

        if min_idx != i {
            run.step(|board| {
                let (current, smallest) = (board.sequence.get(i), board.sequence.get(min_idx));
                board.stats.record_swap();
                board
                    .log
                    .log(format!("Swapping {current} with {smallest}"), LogKind::Swap);
            })?;
            run.full().await;
        }

        run.step(|board| {
            if min_idx != i {
                board.sequence.swap(i, min_idx);
            }
            board.sequence.clear_markers(min_idx);
            board.sequence.clear_markers(i);
            board.sequence.mark_settled(i);
            board.stats.set_progress(i + 1, n);
            board.refresh_snapshot();
        })?;
    }

    Ok(())
}
