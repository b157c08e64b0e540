use super::*;

#[test]
fn hidden_in_quiet_mode() {
    let progress = LintProgress::new(100, true);
    progress.inc();
    progress.inc();
    assert_eq!(progress.progress_bar.position(), 2);
    progress.finish();
}

#[test]
fn clones_share_the_counter() {
    let progress = LintProgress::new(100, true);
    let cloned = progress.clone();

    progress.inc();
    cloned.inc();

    assert_eq!(progress.progress_bar.position(), 2);
    progress.finish();
}

#[test]
fn visible_bar_counts_too() {
    let progress = LintProgress::new_with_visibility(3, false, true);
    for _ in 0..3 {
        progress.inc();
    }
    assert_eq!(progress.progress_bar.position(), 3);
    progress.finish();
}
