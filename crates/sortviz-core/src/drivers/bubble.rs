use crate::narrator::LogKind;
use crate::session::{Run, RunError};

/// Bubble sort: pass `i` walks adjacent pairs up to `n - i - 1` and leaves the
/// largest remaining value settled at the end.
pub(super) async fn sort(run: &Run) -> Result<(), RunError> {
    let n = run.len()?;

    for i in 0..n {
        run.step(|board| board.stats.set_pass(i + 1))?;

        for j in 0..n - i - 1 {
            let (left, right) = run.step(|board| {
                let (left, right) = (board.sequence.get(j), board.sequence.get(j + 1));
                board.sequence.set_comparing(j, true);
                board.sequence.set_comparing(j + 1, true);
                board.stats.record_comparison();
                board.step = format!("Comparing {left} and {right}");
                (left, right)
            })?;
            run.half().await;

            let swap = left > right;
            if swap {
                run.step(|board| {
                    board.stats.record_swap();
                    board.log.log(format!("Swap: {left} > {right}"), LogKind::Swap);
                    board.sequence.set_swapping(j, true);
                    board.sequence.set_swapping(j + 1, true);
                })?;
                run.full().await;
            }

            run.step(|board| {
                if swap {
                    board.sequence.swap(j, j + 1);
                }
                board.sequence.clear_markers(j);
                board.sequence.clear_markers(j + 1);
            })?;
        }

        run.step(|board| {
            let last = n - i - 1;
            board.sequence.mark_settled(last);
            // The final pass compares nothing; it only settles position 0.
            if last > 0 {
                let value = board.sequence.get(last);
                board.log.log(
                    format!("Pass {} complete. {value} is in position.", i + 1),
                    LogKind::Pass,
                );
            }
            board.stats.set_progress(i + 1, n);
            board.refresh_snapshot();
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::drivers::Algorithm;
    use crate::drivers::tests::{flags, messages, run_to_end, start_timed, view_at};
    use crate::narrator::LogKind;
    use crate::session::RunOutcome;

    #[tokio::test(start_paused = true)]
    async fn test_walkthrough_example() {
        let session = run_to_end(Algorithm::Bubble, &[5, 3, 8, 1]).await;

        assert_eq!(session.values(), vec![1, 3, 5, 8]);
        let stats = session.stats();
        assert_eq!(stats.comparisons, 6);
        assert_eq!(stats.swaps, 4);

        let passes: Vec<String> = messages(&session, LogKind::Pass)
            .into_iter()
            .filter(|m| m.contains("complete."))
            .collect();
        assert_eq!(
            passes,
            vec![
                "Pass 1 complete. 8 is in position.",
                "Pass 2 complete. 5 is in position.",
                "Pass 3 complete. 3 is in position.",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reverse_sorted_counts() {
        for n in 1..=7_i64 {
            let input: Vec<i64> = (1..=n).rev().collect();
            let session = run_to_end(Algorithm::Bubble, &input).await;
            let expected = (n * (n - 1) / 2) as u64;
            let stats = session.stats();
            assert_eq!(stats.comparisons, expected, "n = {n}");
            assert_eq!(stats.swaps, expected, "n = {n}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_swap_lines_name_the_pair() {
        let session = run_to_end(Algorithm::Bubble, &[2, 1]).await;
        assert_eq!(messages(&session, LogKind::Swap), vec!["Swap: 2 > 1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_equal_values_are_not_swapped() {
        let session = run_to_end(Algorithm::Bubble, &[4, 4, 4]).await;
        assert_eq!(session.stats().swaps, 0);
        assert_eq!(session.stats().comparisons, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_beat_order_highlight_pause_then_swap() {
        // delay 100: compare pause 0..50, swap pause 50..150, next compare from 150.
        let (session, handle, start) = start_timed(Algorithm::Bubble, &[2, 1, 3], 100);

        let view = view_at(&session, start, 10).await;
        assert_eq!(view.values(), vec![2, 1, 3]);
        assert_eq!(flags(&view, |e| e.comparing), vec![true, true, false]);
        assert_eq!(flags(&view, |e| e.swapping), vec![false, false, false]);
        assert_eq!((view.stats.comparisons, view.stats.swaps), (1, 0));
        assert_eq!(view.step, "Comparing 2 and 1");

        let view = view_at(&session, start, 70).await;
        assert_eq!(view.values(), vec![2, 1, 3]);
        assert_eq!(flags(&view, |e| e.swapping), vec![true, true, false]);
        assert_eq!(view.stats.swaps, 1);
        assert_eq!(view.log[0].message, "Swap: 2 > 1");

        let view = view_at(&session, start, 160).await;
        assert_eq!(view.values(), vec![1, 2, 3]);
        assert_eq!(flags(&view, |e| e.swapping), vec![false, false, false]);
        assert_eq!(flags(&view, |e| e.comparing), vec![false, true, true]);
        assert_eq!(view.stats.comparisons, 2);

        assert_eq!(handle.finished().await, RunOutcome::Completed);
    }
}
